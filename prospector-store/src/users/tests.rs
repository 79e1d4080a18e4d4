// SPDX-License-Identifier: MIT OR Apache-2.0

use prospector_core::{Prospect, ProspectId, ProspectPayload, UserId};

use crate::assert_all_stores;
use crate::prospects::ProspectStore;
use crate::users::UserStore;

#[tokio::test]
async fn insert_user() {
    assert_all_stores!(|store| async {
        let alice = UserId::from("alice");

        assert!(!store.has_user(&alice).await.unwrap());
        assert!(store.insert_user(&alice).await.unwrap());
        assert!(store.has_user(&alice).await.unwrap());

        // Registering the same user again is not an error.
        assert!(!store.insert_user(&alice).await.unwrap());
    });
}

#[tokio::test]
async fn owners_get_registered_implicitly() {
    assert_all_stores!(|store| async {
        let bob = UserId::from("bob");
        let prospect = Prospect::new(
            ProspectId::from("p1"),
            bob.clone(),
            ProspectPayload::new("Flower shop"),
        );

        assert!(store.insert_prospect(&prospect).await.unwrap());
        assert!(store.has_user(&bob).await.unwrap());
    });
}
