use domain::CapacityDate;
use plant_storage::{CapacitySeeder, CapacityStore, InMemoryCapacityStore, StorageError};
use std::sync::Arc;

fn day(d: u32) -> CapacityDate {
    CapacityDate::from_ymd(2025, 1, d).expect("date")
}

#[tokio::test]
async fn registered_capacity_is_returned_by_query() {
    let store = InMemoryCapacityStore::new();
    store.register(day(1), 120.5).await.expect("register");

    assert_eq!(store.query(day(1)).await.expect("query"), 120.5);
}

#[tokio::test]
async fn query_never_changes_used_capacity() {
    let store = InMemoryCapacityStore::with_records([(day(1), 100.0)]);
    store.reserve(day(1), 25.0).await.expect("reserve");

    for _ in 0..10 {
        assert_eq!(store.query(day(1)).await.expect("query"), 75.0);
    }
    let record = store.get(day(1)).await.expect("get").expect("record");
    assert_eq!(record.used_tons, 25.0);
}

#[tokio::test]
async fn unknown_date_is_not_found() {
    let store = InMemoryCapacityStore::new();
    assert_eq!(
        store.query(day(2)).await,
        Err(StorageError::NotFound(day(2)))
    );
    assert_eq!(
        store.reserve(day(2), 1.0).await,
        Err(StorageError::NotFound(day(2)))
    );
    assert_eq!(
        store.release(day(2), 1.0).await,
        Err(StorageError::NotFound(day(2)))
    );
}

#[tokio::test]
async fn reserve_rejects_more_than_available() {
    let store = InMemoryCapacityStore::with_records([(day(1), 10.0)]);
    store.reserve(day(1), 6.0).await.expect("reserve");

    let err = store.reserve(day(1), 5.0).await.expect_err("over");
    assert_eq!(
        err,
        StorageError::InsufficientCapacity {
            date: day(1),
            requested: 5.0,
            available: 4.0,
        }
    );
    // 恰好用完是允许的
    let record = store.reserve(day(1), 4.0).await.expect("exact");
    assert_eq!(record.available_tons(), 0.0);
    assert_eq!(record.used_tons, record.total_tons);
}

#[tokio::test]
async fn reserve_and_release_reject_invalid_amounts() {
    let store = InMemoryCapacityStore::with_records([(day(1), 10.0)]);
    for amount in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        assert!(matches!(
            store.reserve(day(1), amount).await,
            Err(StorageError::InvalidAmount(_))
        ));
        assert!(matches!(
            store.release(day(1), amount).await,
            Err(StorageError::InvalidAmount(_))
        ));
    }
}

#[tokio::test]
async fn release_is_floored_at_zero() {
    let store = InMemoryCapacityStore::with_records([(day(1), 10.0)]);
    store.reserve(day(1), 3.0).await.expect("reserve");

    let record = store.release(day(1), 2.0).await.expect("release");
    assert_eq!(record.used_tons, 1.0);
    let record = store.release(day(1), 50.0).await.expect("release");
    assert_eq!(record.used_tons, 0.0);
    assert_eq!(record.available_tons(), 10.0);
}

#[tokio::test]
async fn register_cannot_drop_below_used() {
    let store = InMemoryCapacityStore::new();
    store.register(day(1), 50.0).await.expect("register");
    store.reserve(day(1), 30.0).await.expect("reserve");

    assert!(matches!(
        store.register(day(1), 20.0).await,
        Err(StorageError::InvalidAmount(_))
    ));
    let record = store.register(day(1), 80.0).await.expect("raise");
    assert_eq!(record.used_tons, 30.0);
    assert_eq!(record.available_tons(), 50.0);
    assert!(matches!(
        store.register(day(2), 0.0).await,
        Err(StorageError::InvalidAmount(_))
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_equal_reservations_never_overbook() {
    let store = Arc::new(InMemoryCapacityStore::with_records([(day(1), 100.0)]));

    let mut handles = Vec::new();
    for _ in 0..50 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move { store.reserve(day(1), 7.0).await }));
    }

    let mut succeeded = 0;
    for handle in handles {
        if handle.await.expect("join").is_ok() {
            succeeded += 1;
        }
    }

    assert_eq!(succeeded, 14);
    let record = store.get(day(1)).await.expect("get").expect("record");
    assert_eq!(record.used_tons, 98.0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_mixed_reservations_sum_to_used() {
    let store = Arc::new(InMemoryCapacityStore::with_records([(day(1), 100.0)]));

    let mut handles = Vec::new();
    for amount in 1..=20 {
        let store = Arc::clone(&store);
        let amount = amount as f64;
        handles.push(tokio::spawn(async move {
            store.reserve(day(1), amount).await.map(|_| amount)
        }));
    }

    let mut reserved = 0.0;
    for handle in handles {
        match handle.await.expect("join") {
            Ok(amount) => reserved += amount,
            Err(err) => assert!(matches!(err, StorageError::InsufficientCapacity { .. })),
        }
    }

    assert!(reserved <= 100.0);
    let record = store.get(day(1)).await.expect("get").expect("record");
    assert_eq!(record.used_tons, reserved);
    assert!(record.used_tons <= record.total_tons);
}

#[tokio::test]
async fn list_and_total_respect_range() {
    let store = InMemoryCapacityStore::with_records([
        (day(1), 10.0),
        (day(2), 20.0),
        (day(3), 30.0),
        (day(5), 50.0),
    ]);

    let items = store.list_between(day(2), day(4)).await.expect("list");
    assert_eq!(
        items.iter().map(|r| r.date).collect::<Vec<_>>(),
        vec![day(2), day(3)]
    );
    assert_eq!(store.total_between(day(1), day(3)).await.expect("total"), 60.0);
    assert!(store.list_between(day(4), day(1)).await.expect("empty").is_empty());
    assert_eq!(store.list_from(day(3)).await.expect("from").len(), 2);
}

#[tokio::test]
async fn remove_deletes_record() {
    let store = InMemoryCapacityStore::with_records([(day(1), 10.0)]);
    assert!(store.remove(day(1)).await.expect("remove"));
    assert!(!store.remove(day(1)).await.expect("remove again"));
    assert!(store.is_empty());
}

#[tokio::test]
async fn seeded_window_is_reproducible() {
    let seeder = CapacitySeeder::default().with_seed(2024);
    let first = InMemoryCapacityStore::new();
    let second = InMemoryCapacityStore::new();

    let a = first
        .initialize_window(day(1), 10, &seeder)
        .await
        .expect("seed");
    let b = second
        .initialize_window(day(1), 10, &seeder)
        .await
        .expect("seed");

    assert_eq!(a, b);
    assert_eq!(first.len(), 10);
    assert_eq!(a[0].date, day(1));
    assert_eq!(a[9].date, day(10));
    for record in &a {
        assert!((80.0..=150.0).contains(&record.total_tons));
        assert_eq!(record.used_tons, 0.0);
    }
}
