use std::collections::HashMap;

use tadow_assistant::services::kv_store::KvStore;
use tadow_assistant::services::price_alerts::PriceAlerts;

#[tokio::test]
async fn test_missing_and_malformed_values_read_as_default() {
    let dir = tempfile::tempdir().unwrap();
    let store = KvStore::new(dir.path());

    let missing: Vec<String> = store.load("watchlist").await;
    assert!(missing.is_empty());

    std::fs::write(dir.path().join("email_prefs.json"), "{not json").unwrap();
    let malformed: HashMap<String, bool> = store.load("email_prefs").await;
    assert!(malformed.is_empty());
}

#[tokio::test]
async fn test_last_write_wins() {
    let dir = tempfile::tempdir().unwrap();
    let store = KvStore::new(dir.path().join("nested"));

    store.save("user", &vec!["first"]).await.unwrap();
    store.save("user", &vec!["second"]).await.unwrap();
    let value: Vec<String> = store.load("user").await;
    assert_eq!(value, vec!["second".to_string()]);

    assert!(store.remove("user").await.unwrap());
    assert!(!store.remove("user").await.unwrap());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_readers_never_see_a_half_written_document() {
    let dir = tempfile::tempdir().unwrap();
    let store = KvStore::new(dir.path());
    let seed: Vec<String> = (0..200).map(|i| format!("alert-{i}")).collect();
    store.save("price_alerts", &seed).await.unwrap();

    let writer = {
        let store = store.clone();
        let seed = seed.clone();
        tokio::spawn(async move {
            for _ in 0..100 {
                store.save("price_alerts", &seed).await.unwrap();
            }
        })
    };
    let reader = {
        let store = store.clone();
        tokio::spawn(async move {
            for _ in 0..300 {
                let seen: Vec<String> = store.load("price_alerts").await;
                assert_eq!(seen.len(), 200);
                tokio::task::yield_now().await;
            }
        })
    };
    writer.await.unwrap();
    reader.await.unwrap();

    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(leftovers, vec![std::ffi::OsString::from("price_alerts.json")]);
}

#[tokio::test]
async fn test_keys_cannot_escape_the_data_dir() {
    let dir = tempfile::tempdir().unwrap();
    let store = KvStore::new(dir.path());
    assert!(store.save("../evil", &1).await.is_err());
    let value: u32 = store.load("../evil").await;
    assert_eq!(value, 0);
}

#[tokio::test]
async fn test_price_alerts_crud() {
    let dir = tempfile::tempdir().unwrap();
    let alerts = PriceAlerts::new(KvStore::new(dir.path()));

    let alert = alerts.create("deal-008", 249.0).await.unwrap();
    alerts.create("deal-009", 150.0).await.unwrap();
    assert_eq!(alerts.list().await.len(), 2);

    assert!(alerts.delete(&alert.id).await.unwrap());
    assert!(!alerts.delete(&alert.id).await.unwrap());
    let remaining = alerts.list().await;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].product_id, "deal-009");

    assert!(alerts.create("deal-001", -5.0).await.is_err());
}
