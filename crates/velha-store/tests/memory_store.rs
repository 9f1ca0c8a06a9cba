//! Integration tests for the in-memory store: snapshot delivery,
//! guarded updates, atomic appends and increments.

use velha_model::{
    ChatMessage, Mark, MatchDocument, MatchResult, MatchStatus, PlayerId,
    UserProfile,
};
use velha_store::{
    MatchChange, MatchExpect, MatchStore, MemoryStore, ProfileStore, StoreError,
};

fn waiting_room(host: PlayerId) -> MatchDocument {
    MatchDocument::new(host)
}

#[tokio::test]
async fn test_create_and_get_round_trip() {
    let store = MemoryStore::new();
    let host = PlayerId::generate();
    let doc = waiting_room(host);
    let id = store.create_match(doc.clone()).await.unwrap();

    let stored = store.get_match(id).await.unwrap();
    assert_eq!(stored, doc);
}

#[tokio::test]
async fn test_create_duplicate_id_is_a_conflict() {
    let store = MemoryStore::new();
    let doc = waiting_room(PlayerId::generate());
    store.create_match(doc.clone()).await.unwrap();
    let err = store.create_match(doc).await.unwrap_err();
    assert!(matches!(err, StoreError::Conflict(_)));
}

#[tokio::test]
async fn test_get_missing_match_is_not_found() {
    let store = MemoryStore::new();
    let id = waiting_room(PlayerId::generate()).id;
    let err = store.get_match(id).await.unwrap_err();
    assert!(matches!(err, StoreError::MatchNotFound(_)));
}

#[tokio::test]
async fn test_watch_sees_initial_snapshot_and_updates() {
    let store = MemoryStore::new();
    let host = PlayerId::generate();
    let guest = PlayerId::generate();
    let id = store.create_match(waiting_room(host)).await.unwrap();

    let mut watch = store.watch_match(id).await.unwrap();
    assert_eq!(
        watch.borrow_and_update().as_ref().unwrap().status,
        MatchStatus::Waiting
    );

    store
        .update_match(id, MatchChange::Seat { guest_id: guest })
        .await
        .unwrap();

    watch.changed().await.unwrap();
    let snapshot = watch.borrow_and_update().clone().unwrap();
    assert_eq!(snapshot.status, MatchStatus::Playing);
    assert_eq!(snapshot.guest_id, Some(guest));
}

#[tokio::test]
async fn test_delete_notifies_watchers_with_none() {
    let store = MemoryStore::new();
    let id = store
        .create_match(waiting_room(PlayerId::generate()))
        .await
        .unwrap();
    let mut watch = store.watch_match(id).await.unwrap();
    watch.borrow_and_update();

    store.delete_match(id).await.unwrap();
    watch.changed().await.unwrap();
    assert!(watch.borrow_and_update().is_none());
}

#[tokio::test]
async fn test_guarded_join_rejects_second_guest() {
    let store = MemoryStore::new();
    let id = store
        .create_match(waiting_room(PlayerId::generate()))
        .await
        .unwrap();

    let guard = || MatchExpect {
        status: Some(MatchStatus::Waiting),
        guest_vacant: true,
        ..Default::default()
    };

    let first = PlayerId::generate();
    let second = PlayerId::generate();
    store
        .update_match_if(id, guard(), MatchChange::Seat { guest_id: first })
        .await
        .unwrap();

    let err = store
        .update_match_if(id, guard(), MatchChange::Seat { guest_id: second })
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Conflict(_)));

    // First joiner kept the seat.
    let doc = store.get_match(id).await.unwrap();
    assert_eq!(doc.guest_id, Some(first));
}

#[tokio::test]
async fn test_guarded_settle_applies_exactly_once() {
    let store = MemoryStore::new();
    let host = PlayerId::generate();
    let id = store.create_match(waiting_room(host)).await.unwrap();
    store
        .update_match(id, MatchChange::Seat { guest_id: PlayerId::generate() })
        .await
        .unwrap();

    let guard = || MatchExpect {
        status: Some(MatchStatus::Playing),
        winner_unset: true,
        ..Default::default()
    };

    // First settle wins, second (the racing client) conflicts.
    store
        .update_match_if(id, guard(), MatchChange::Settle { winner: MatchResult::X })
        .await
        .unwrap();
    let err = store
        .update_match_if(id, guard(), MatchChange::Settle { winner: MatchResult::X })
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Conflict(_)));
}

#[tokio::test]
async fn test_conflicting_update_leaves_document_untouched() {
    let store = MemoryStore::new();
    let host = PlayerId::generate();
    let id = store.create_match(waiting_room(host)).await.unwrap();

    let mut board = velha_model::Board::empty();
    board.set(0, Mark::X);
    let err = store
        .update_match_if(
            id,
            MatchExpect {
                status: Some(MatchStatus::Playing),
                ..Default::default()
            },
            MatchChange::Play { board, current_turn: host },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Conflict(_)));

    let doc = store.get_match(id).await.unwrap();
    assert!(doc.board.is_clear());
}

#[tokio::test]
async fn test_append_message_keeps_both_concurrent_sends() {
    let store = MemoryStore::new();
    let host = PlayerId::generate();
    let guest = PlayerId::generate();
    let id = store.create_match(waiting_room(host)).await.unwrap();

    store
        .append_message(id, ChatMessage::new(host, "Ana", "boa sorte"))
        .await
        .unwrap();
    store
        .append_message(id, ChatMessage::new(guest, "Bia", "pra você também"))
        .await
        .unwrap();

    let doc = store.get_match(id).await.unwrap();
    assert_eq!(doc.messages.len(), 2);
    assert_eq!(doc.messages[0].message, "boa sorte");
    assert_eq!(doc.messages[1].message, "pra você também");
}

#[tokio::test]
async fn test_listed_watch_tracks_status_and_deletion() {
    let store = MemoryStore::new();
    let mut listed = store.watch_listed().await;
    assert!(listed.borrow_and_update().is_empty());

    let id = store
        .create_match(waiting_room(PlayerId::generate()))
        .await
        .unwrap();
    listed.changed().await.unwrap();
    assert_eq!(listed.borrow_and_update().len(), 1);

    // Playing matches stay listed (hosts can resume them).
    store
        .update_match(id, MatchChange::Seat { guest_id: PlayerId::generate() })
        .await
        .unwrap();
    listed.changed().await.unwrap();
    assert_eq!(listed.borrow_and_update()[0].status, MatchStatus::Playing);

    // Finished matches drop out of the directory.
    store
        .update_match(id, MatchChange::Settle { winner: MatchResult::Draw })
        .await
        .unwrap();
    listed.changed().await.unwrap();
    assert!(listed.borrow_and_update().is_empty());
}

#[tokio::test]
async fn test_profile_points_increment_and_ranking_order() {
    let store = MemoryStore::new();
    let a = PlayerId::generate();
    let b = PlayerId::generate();
    let c = PlayerId::generate();
    for (id, name) in [(a, "Ana"), (b, "Bia"), (c, "Caio")] {
        store
            .create_profile(UserProfile::new(id, name, 20, "Brasil"))
            .await
            .unwrap();
    }

    store.add_points(a, 10).await.unwrap();
    store.add_points(b, -2).await.unwrap();
    store.add_points(c, 10).await.unwrap();
    store.add_points(c, 10).await.unwrap();

    let top = store.profiles_by_points(Some(2)).await.unwrap();
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].uid, c);
    assert_eq!(top[0].points, 20);
    assert_eq!(top[1].uid, a);

    let all = store.profiles_by_points(None).await.unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[2].points, -2);
}

#[tokio::test]
async fn test_update_profile_preserves_points() {
    let store = MemoryStore::new();
    let id = PlayerId::generate();
    store
        .create_profile(UserProfile::new(id, "Ana", 20, "Brasil"))
        .await
        .unwrap();
    store.add_points(id, 10).await.unwrap();

    store
        .update_profile(id, "Ana Clara".into(), 21, "Portugal".into())
        .await
        .unwrap();

    let profile = store.get_profile(id).await.unwrap();
    assert_eq!(profile.name, "Ana Clara");
    assert_eq!(profile.age, 21);
    assert_eq!(profile.country, "Portugal");
    assert_eq!(profile.points, 10);
}
