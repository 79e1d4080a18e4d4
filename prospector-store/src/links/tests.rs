// SPDX-License-Identifier: MIT OR Apache-2.0

use prospector_core::{Prospect, ProspectId, ProspectPayload, UserId, Workspace, WorkspaceId};

use crate::assert_all_stores;
use crate::links::LinkStore;
use crate::prospects::ProspectStore;
use crate::workspaces::WorkspaceStore;

fn prospect(id: &str, owner: &str) -> Prospect {
    Prospect::new(
        ProspectId::from(id),
        UserId::from(owner),
        ProspectPayload::new("Corner shop"),
    )
}

fn workspace(id: &str, owner: &str) -> Workspace {
    Workspace::new(WorkspaceId::from(id), UserId::from(owner), "Neighbourhood")
}

#[tokio::test]
async fn upsert_is_idempotent() {
    assert_all_stores!(|store| async {
        let w1 = WorkspaceId::from("w1");
        let p1 = ProspectId::from("p1");
        assert!(store.insert_workspace(&workspace("w1", "bob")).await.unwrap());
        assert!(store.insert_prospect(&prospect("p1", "alice")).await.unwrap());

        assert!(store.upsert_link(&w1, &p1).await.unwrap());
        assert!(!store.upsert_link(&w1, &p1).await.unwrap());

        assert_eq!(store.linked_prospects(&w1).await.unwrap(), vec![p1.clone()]);
        assert_eq!(store.linked_workspaces(&p1).await.unwrap(), vec![w1]);
    });
}

#[tokio::test]
async fn dangling_links_are_skipped() {
    assert_all_stores!(|store| async {
        assert!(store.insert_workspace(&workspace("w1", "bob")).await.unwrap());
        assert!(store.insert_prospect(&prospect("p1", "alice")).await.unwrap());

        assert!(
            !store
                .upsert_link(&WorkspaceId::from("w1"), &ProspectId::from("p404"))
                .await
                .unwrap()
        );
        assert!(
            !store
                .upsert_link(&WorkspaceId::from("w404"), &ProspectId::from("p1"))
                .await
                .unwrap()
        );
        assert!(
            store
                .linked_workspaces(&ProspectId::from("p1"))
                .await
                .unwrap()
                .is_empty()
        );
    });
}

#[tokio::test]
async fn delete_link() {
    assert_all_stores!(|store| async {
        let w1 = WorkspaceId::from("w1");
        let p1 = ProspectId::from("p1");
        assert!(store.insert_workspace(&workspace("w1", "bob")).await.unwrap());
        assert!(store.insert_prospect(&prospect("p1", "alice")).await.unwrap());
        assert!(store.upsert_link(&w1, &p1).await.unwrap());

        assert!(store.delete_link(&w1, &p1).await.unwrap());

        // Removing a pair which is not linked (anymore) tells us so.
        assert!(!store.delete_link(&w1, &p1).await.unwrap());
        assert!(store.linked_prospects(&w1).await.unwrap().is_empty());
    });
}

#[tokio::test]
async fn links_across_workspaces_in_id_order() {
    assert_all_stores!(|store| async {
        let p1 = ProspectId::from("p1");
        assert!(store.insert_prospect(&prospect("p1", "alice")).await.unwrap());
        assert!(store.insert_prospect(&prospect("p2", "dave")).await.unwrap());

        // Workspaces of different owners, nobody of them owns the prospect.
        for (id, owner) in [("w3", "bob"), ("w1", "carol"), ("w2", "bob")] {
            assert!(store.insert_workspace(&workspace(id, owner)).await.unwrap());
            assert!(store.upsert_link(&WorkspaceId::from(id), &p1).await.unwrap());
        }
        assert!(
            store
                .upsert_link(&WorkspaceId::from("w2"), &ProspectId::from("p2"))
                .await
                .unwrap()
        );

        assert_eq!(
            store.linked_workspaces(&p1).await.unwrap(),
            vec![
                WorkspaceId::from("w1"),
                WorkspaceId::from("w2"),
                WorkspaceId::from("w3")
            ]
        );
        assert_eq!(
            store.linked_prospects(&WorkspaceId::from("w2")).await.unwrap(),
            vec![p1, ProspectId::from("p2")]
        );
    });
}

#[tokio::test]
async fn deleting_workspace_removes_its_links() {
    assert_all_stores!(|store| async {
        let p1 = ProspectId::from("p1");
        assert!(store.insert_prospect(&prospect("p1", "alice")).await.unwrap());
        assert!(store.insert_workspace(&workspace("w1", "bob")).await.unwrap());
        assert!(store.insert_workspace(&workspace("w2", "bob")).await.unwrap());
        assert!(store.upsert_link(&WorkspaceId::from("w1"), &p1).await.unwrap());
        assert!(store.upsert_link(&WorkspaceId::from("w2"), &p1).await.unwrap());

        assert!(store.delete_workspace(&WorkspaceId::from("w1")).await.unwrap());

        assert_eq!(
            store.linked_workspaces(&p1).await.unwrap(),
            vec![WorkspaceId::from("w2")]
        );
        assert!(
            store
                .linked_prospects(&WorkspaceId::from("w1"))
                .await
                .unwrap()
                .is_empty()
        );
    });
}

#[tokio::test]
async fn deleting_prospect_removes_its_links() {
    assert_all_stores!(|store| async {
        let w1 = WorkspaceId::from("w1");
        assert!(store.insert_workspace(&workspace("w1", "bob")).await.unwrap());
        assert!(store.insert_prospect(&prospect("p1", "alice")).await.unwrap());
        assert!(store.insert_prospect(&prospect("p2", "alice")).await.unwrap());
        assert!(store.upsert_link(&w1, &ProspectId::from("p1")).await.unwrap());
        assert!(store.upsert_link(&w1, &ProspectId::from("p2")).await.unwrap());

        assert!(
            store
                .delete_prospect(&UserId::from("alice"), &ProspectId::from("p1"))
                .await
                .unwrap()
        );

        assert_eq!(
            store.linked_prospects(&w1).await.unwrap(),
            vec![ProspectId::from("p2")]
        );

        // A new prospect re-using the id does not inherit the old links.
        assert!(store.insert_prospect(&prospect("p1", "erin")).await.unwrap());
        assert!(
            store
                .linked_workspaces(&ProspectId::from("p1"))
                .await
                .unwrap()
                .is_empty()
        );
    });
}
