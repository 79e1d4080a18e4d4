// SPDX-License-Identifier: MIT OR Apache-2.0

use prospector_core::{Prospect, ProspectId, ProspectPatch, ProspectPayload, UserId};

use crate::assert_all_stores;
use crate::prospects::ProspectStore;

fn prospect(id: &str, owner: &str, name: &str) -> Prospect {
    Prospect::new(
        ProspectId::from(id),
        UserId::from(owner),
        ProspectPayload::new(name).with_geometry("POINT(13.40 52.52)"),
    )
}

#[tokio::test]
async fn insert_and_get_owner_scoped() {
    assert_all_stores!(|store| async {
        let p1 = prospect("p1", "alice", "Bakery");

        assert!(store.insert_prospect(&p1).await.unwrap());

        assert_eq!(
            store
                .get_prospect_owned_by(&UserId::from("alice"), &p1.id)
                .await
                .unwrap(),
            Some(p1.clone())
        );

        // Somebody else asking for the same id gets nothing, even though it exists.
        assert_eq!(
            store
                .get_prospect_owned_by(&UserId::from("bob"), &p1.id)
                .await
                .unwrap(),
            None
        );
    });
}

#[tokio::test]
async fn ids_are_unique_across_owners() {
    assert_all_stores!(|store| async {
        assert!(store.insert_prospect(&prospect("p1", "alice", "Bakery")).await.unwrap());

        // Same id, different owner.
        assert!(!store.insert_prospect(&prospect("p1", "bob", "Butcher")).await.unwrap());

        assert_eq!(
            store.find_prospect_owner(&ProspectId::from("p1")).await.unwrap(),
            Some(UserId::from("alice"))
        );
        assert!(
            store
                .prospects_owned_by(&UserId::from("bob"))
                .await
                .unwrap()
                .is_empty()
        );
    });
}

#[tokio::test]
async fn find_owner_across_all_users() {
    assert_all_stores!(|store| async {
        for (id, owner) in [("p1", "alice"), ("p2", "bob"), ("p3", "carol"), ("p4", "bob")] {
            assert!(store.insert_prospect(&prospect(id, owner, "Shop")).await.unwrap());
        }

        assert_eq!(
            store.find_prospect_owner(&ProspectId::from("p4")).await.unwrap(),
            Some(UserId::from("bob"))
        );
        assert_eq!(
            store.find_prospect_owner(&ProspectId::from("p3")).await.unwrap(),
            Some(UserId::from("carol"))
        );
        assert_eq!(
            store.find_prospect_owner(&ProspectId::from("p5")).await.unwrap(),
            None
        );
    });
}

#[tokio::test]
async fn list_by_owner_in_id_order() {
    assert_all_stores!(|store| async {
        for id in ["p3", "p1", "p2"] {
            assert!(store.insert_prospect(&prospect(id, "alice", "Shop")).await.unwrap());
        }
        assert!(store.insert_prospect(&prospect("p0", "bob", "Shop")).await.unwrap());

        let ids: Vec<String> = store
            .prospects_owned_by(&UserId::from("alice"))
            .await
            .unwrap()
            .into_iter()
            .map(|prospect| prospect.id.to_string())
            .collect();
        assert_eq!(ids, vec!["p1", "p2", "p3"]);
    });
}

#[tokio::test]
async fn apply_patch() {
    assert_all_stores!(|store| async {
        let alice = UserId::from("alice");
        let p1 = prospect("p1", "alice", "Bakery");
        assert!(store.insert_prospect(&p1).await.unwrap());

        let patch = ProspectPatch::new()
            .status("contacted")
            .notes(Some("wants a second meeting".into()));
        let updated = store
            .apply_prospect_patch(&alice, &p1.id, &patch)
            .await
            .unwrap()
            .expect("prospect exists");

        assert_eq!(updated.owner, alice);
        assert_eq!(updated.payload.name, "Bakery");
        assert_eq!(updated.payload.status, "contacted");
        assert_eq!(updated.payload.notes.as_deref(), Some("wants a second meeting"));
        assert_eq!(updated.payload.geometry, p1.payload.geometry);
        assert!(updated.updated_at >= p1.updated_at);

        // The stored record reflects the patch.
        assert_eq!(
            store.get_prospect_owned_by(&alice, &p1.id).await.unwrap(),
            Some(updated)
        );
    });
}

#[tokio::test]
async fn patch_is_owner_scoped() {
    assert_all_stores!(|store| async {
        let p1 = prospect("p1", "alice", "Bakery");
        assert!(store.insert_prospect(&p1).await.unwrap());

        let result = store
            .apply_prospect_patch(
                &UserId::from("bob"),
                &p1.id,
                &ProspectPatch::new().status("lost"),
            )
            .await
            .unwrap();
        assert_eq!(result, None);

        assert_eq!(
            store
                .get_prospect_owned_by(&UserId::from("alice"), &p1.id)
                .await
                .unwrap(),
            Some(p1)
        );
    });
}

#[tokio::test]
async fn delete_is_owner_scoped() {
    assert_all_stores!(|store| async {
        let p1 = prospect("p1", "alice", "Bakery");
        assert!(store.insert_prospect(&p1).await.unwrap());

        assert!(!store.delete_prospect(&UserId::from("bob"), &p1.id).await.unwrap());
        assert!(store.delete_prospect(&UserId::from("alice"), &p1.id).await.unwrap());
        assert!(!store.delete_prospect(&UserId::from("alice"), &p1.id).await.unwrap());

        assert_eq!(store.find_prospect_owner(&p1.id).await.unwrap(), None);
    });
}

#[tokio::test]
async fn refused_insert_registers_nobody() {
    use crate::users::UserStore;

    assert_all_stores!(|store| async {
        assert!(store.insert_prospect(&prospect("p1", "alice", "Bakery")).await.unwrap());
        assert!(!store.insert_prospect(&prospect("p1", "bob", "Butcher")).await.unwrap());
        assert!(!store.has_user(&UserId::from("bob")).await.unwrap());
    });
}
