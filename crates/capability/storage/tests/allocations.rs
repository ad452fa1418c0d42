use domain::{AllocationNotice, CapacityDate};
use plant_storage::{
    AllocationFilter, AllocationRecord, AllocationStatus, AllocationStore,
    InMemoryAllocationStore, StorageError,
};

fn notice(day: u32) -> AllocationNotice {
    AllocationNotice::new(CapacityDate::from_ymd(2025, 3, day).expect("date"), 2, 30, 4.5)
        .assigned_by("ops")
}

#[tokio::test]
async fn insert_and_find() {
    let store = InMemoryAllocationStore::new();
    let record = store
        .insert(AllocationRecord::from_notice(&notice(1)))
        .await
        .expect("insert");

    let found = store.find(&record.id).await.expect("find").expect("record");
    assert_eq!(found, record);
    assert_eq!(found.status, AllocationStatus::Pending);
    assert!(store.find("missing").await.expect("find").is_none());
}

#[tokio::test]
async fn list_filters_by_date_and_status() {
    let store = InMemoryAllocationStore::new();
    let mut rejected = AllocationRecord::from_notice(&notice(1));
    rejected.status = AllocationStatus::Rejected;
    store.insert(rejected).await.expect("insert");
    store
        .insert(AllocationRecord::from_notice(&notice(1)))
        .await
        .expect("insert");
    store
        .insert(AllocationRecord::from_notice(&notice(2)))
        .await
        .expect("insert");

    let all = store.list(&AllocationFilter::default()).await.expect("list");
    assert_eq!(all.len(), 3);

    let day_one = store
        .list(&AllocationFilter {
            date: Some(notice(1).date),
            status: None,
        })
        .await
        .expect("list");
    assert_eq!(day_one.len(), 2);

    let pending_day_one = store
        .list(&AllocationFilter {
            date: Some(notice(1).date),
            status: Some(AllocationStatus::Pending),
        })
        .await
        .expect("list");
    assert_eq!(pending_day_one.len(), 1);
    assert_eq!(
        store
            .count_by_status(AllocationStatus::Rejected)
            .await
            .expect("count"),
        1
    );
}

#[tokio::test]
async fn terminal_status_cannot_change() {
    let store = InMemoryAllocationStore::new();
    let record = store
        .insert(AllocationRecord::from_notice(&notice(1)))
        .await
        .expect("insert");

    let updated = store
        .update_status(&record.id, AllocationStatus::Processing)
        .await
        .expect("processing");
    assert_eq!(updated.status, AllocationStatus::Processing);
    store
        .update_status(&record.id, AllocationStatus::Completed)
        .await
        .expect("completed");

    assert!(matches!(
        store
            .update_status(&record.id, AllocationStatus::Pending)
            .await,
        Err(StorageError::InvalidTransition(_))
    ));
    assert!(matches!(
        store.update_status("missing", AllocationStatus::Pending).await,
        Err(StorageError::AllocationNotFound(_))
    ));
}

#[test]
fn status_parses_case_insensitively() {
    assert_eq!("rejected".parse(), Ok(AllocationStatus::Rejected));
    assert_eq!(AllocationStatus::Processing.to_string(), "PROCESSING");
    assert!("lost".parse::<AllocationStatus>().is_err());
}
