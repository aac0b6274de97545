use rsleeptracker::errors::AppError;
use rsleeptracker::models::{SleepNight, UNASSIGNED_ID, UNRATED};
use rsleeptracker::store::SleepStore;
use std::time::Duration;
use tokio::time::timeout;

fn night(id: i64, start: i64, stop: i64, quality: i32) -> SleepNight {
    SleepNight::new(id, start, stop, quality)
}

async fn memory_store() -> SleepStore {
    SleepStore::open_in_memory().await.expect("open in-memory store")
}

#[tokio::test]
async fn test_insert_assigns_id_and_get_returns_same_fields() {
    let store = memory_store().await;
    let id = store
        .insert(night(UNASSIGNED_ID, 1_000, 5_000, 3))
        .await
        .expect("insert");
    assert!(id > 0);

    let stored = store.get(id).await.expect("get").expect("present");
    assert_eq!(stored, night(id, 1_000, 5_000, 3));
}

#[tokio::test]
async fn test_get_tonight_returns_greatest_id() {
    let store = memory_store().await;
    for id in 1..=5 {
        store
            .insert(night(id, id * 100, id * 100 + 50, UNRATED))
            .await
            .expect("insert");
    }

    let tonight = store.get_tonight().await.expect("get_tonight").expect("present");
    assert_eq!(tonight.id, 5);
}

#[tokio::test]
async fn test_get_tonight_on_empty_store_is_none() {
    let store = memory_store().await;
    assert!(store.get_tonight().await.expect("get_tonight").is_none());
    assert!(store.get(42).await.expect("get").is_none());
}

#[tokio::test]
async fn test_open_night_round_trips_as_open() {
    let store = memory_store().await;
    store
        .insert(SleepNight::begin(10))
        .await
        .expect("insert");

    let tonight = store.get_tonight().await.expect("get_tonight").expect("present");
    assert_eq!(tonight.start_time, 10);
    assert_eq!(tonight.stop_time, 10);
    assert_eq!(tonight.quality, UNRATED);
    assert!(tonight.is_open());
}

#[tokio::test]
async fn test_update_replaces_every_field() {
    let store = memory_store().await;
    let id = store
        .insert(night(UNASSIGNED_ID, 1_000, 1_000, UNRATED))
        .await
        .expect("insert");

    let replacement = night(id, 2_000, 9_000, 5);
    assert!(store.update(replacement.clone()).await.expect("update"));
    assert_eq!(store.get(id).await.expect("get"), Some(replacement));
}

#[tokio::test]
async fn test_update_missing_id_reports_not_found() {
    let store = memory_store().await;
    let found = store
        .update(night(99, 1, 2, 3))
        .await
        .expect("update");

    assert!(!found);
    assert!(store.get(99).await.expect("get").is_none());
    assert!(store.get_all_nights().await.expect("all").is_empty());
}

#[tokio::test]
async fn test_duplicate_explicit_id_is_rejected() {
    let store = memory_store().await;
    store.insert(night(3, 1, 2, UNRATED)).await.expect("insert");

    let err = store
        .insert(night(3, 10, 20, UNRATED))
        .await
        .expect_err("duplicate id must fail");
    assert!(matches!(err, AppError::DuplicateNight(3)));

    // the original row is untouched
    let stored = store.get(3).await.expect("get").expect("present");
    assert_eq!(stored.start_time, 1);
}

#[tokio::test]
async fn test_get_all_nights_is_newest_first() {
    let store = memory_store().await;
    for i in 0..4 {
        store
            .insert(night(UNASSIGNED_ID, i, i + 1, UNRATED))
            .await
            .expect("insert");
    }

    let ids: Vec<i64> = store
        .get_all_nights()
        .await
        .expect("all")
        .iter()
        .map(|n| n.id)
        .collect();
    assert_eq!(ids, vec![4, 3, 2, 1]);
}

#[tokio::test]
async fn test_clear_removes_every_night() {
    let store = memory_store().await;
    for id in 1..=10 {
        store.insert(night(id, id, id + 1, 2)).await.expect("insert");
    }

    assert_eq!(store.clear().await.expect("clear"), 10);
    for id in 1..=10 {
        assert!(store.get(id).await.expect("get").is_none());
    }
    assert!(store.get_all_nights().await.expect("all").is_empty());
    assert!(store.get_tonight().await.expect("get_tonight").is_none());
}

#[tokio::test]
async fn test_ids_are_not_reused_after_clear() {
    let store = memory_store().await;
    let first = store
        .insert(night(UNASSIGNED_ID, 1, 2, UNRATED))
        .await
        .expect("insert");
    store.clear().await.expect("clear");

    let second = store
        .insert(night(UNASSIGNED_ID, 3, 4, UNRATED))
        .await
        .expect("insert");
    assert!(second > first);
}

#[tokio::test]
async fn test_subscription_receives_refreshed_history() {
    let store = memory_store().await;
    let mut sub = store.subscribe_all_nights().await.expect("subscribe");
    assert!(sub.current().is_empty());

    let id = store
        .insert(night(UNASSIGNED_ID, 100, 100, UNRATED))
        .await
        .expect("insert");
    let list = timeout(Duration::from_secs(2), sub.changed())
        .await
        .expect("insert republished")
        .expect("store alive");
    assert_eq!(list, vec![night(id, 100, 100, UNRATED)]);

    store
        .update(night(id, 100, 900, UNRATED))
        .await
        .expect("update");
    let list = timeout(Duration::from_secs(2), sub.changed())
        .await
        .expect("update republished")
        .expect("store alive");
    assert_eq!(list[0].stop_time, 900);

    store.clear().await.expect("clear");
    let list = timeout(Duration::from_secs(2), sub.changed())
        .await
        .expect("clear republished")
        .expect("store alive");
    assert!(list.is_empty());
}

#[tokio::test]
async fn test_subscription_starts_with_existing_history() {
    let store = memory_store().await;
    store.insert(night(1, 1, 2, 4)).await.expect("insert");
    store.insert(night(2, 3, 4, 1)).await.expect("insert");

    let sub = store.subscribe_all_nights().await.expect("subscribe");
    let ids: Vec<i64> = sub.current().iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![2, 1]);
}

#[tokio::test]
async fn test_dropping_subscription_unsubscribes() {
    let store = memory_store().await;
    let first = store.subscribe_all_nights().await.expect("subscribe");
    let second = store.subscribe_all_nights().await.expect("subscribe");
    assert_eq!(store.subscriber_count(), 2);

    drop(first);
    assert_eq!(store.subscriber_count(), 1);

    drop(second);
    assert_eq!(store.subscriber_count(), 0);

    // nobody listening: mutations still succeed
    store
        .insert(night(UNASSIGNED_ID, 1, 2, UNRATED))
        .await
        .expect("insert");
}

#[tokio::test]
async fn test_concurrent_inserts_get_distinct_ids() {
    let store = memory_store().await;

    let mut handles = Vec::new();
    for i in 0..8 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store
                .insert(night(UNASSIGNED_ID, i, i + 1, UNRATED))
                .await
                .expect("insert")
        }));
    }

    let mut ids = Vec::new();
    for h in handles {
        ids.push(h.await.expect("join"));
    }
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 8);
    assert_eq!(store.get_all_nights().await.expect("all").len(), 8);
}

#[tokio::test]
async fn test_file_store_persists_across_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nights.sqlite");
    let path = path.to_string_lossy().to_string();

    let id = {
        let store = SleepStore::open(&path).await.expect("open");
        store
            .insert(night(UNASSIGNED_ID, 1_000, 2_000, 4))
            .await
            .expect("insert")
    };

    let store = SleepStore::open(&path).await.expect("reopen");
    assert_eq!(store.path(), path);
    assert_eq!(
        store.get(id).await.expect("get"),
        Some(night(id, 1_000, 2_000, 4))
    );
}
