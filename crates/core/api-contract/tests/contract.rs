use api_contract::{AllocationRequest, CapacityDto, RegisterCapacityRequest};
use domain::{CapacityDate, CapacityRecord};
use serde_json::Value;

#[test]
fn capacity_dto_is_camel_case() {
    let date = CapacityDate::from_ymd(2025, 1, 1).expect("date");
    let mut record = CapacityRecord::new(date, 100.0);
    record.used_tons = 40.0;

    let value = serde_json::to_value(CapacityDto::from(record)).expect("serialize");
    assert_eq!(value.get("date"), Some(&Value::from("01-01-2025")));
    assert_eq!(value.get("availableTons"), Some(&Value::from(60.0)));
    assert!(value.get("available_tons").is_none());
}

#[test]
fn register_request_accepts_original_field_names() {
    let payload = r#"{"fecha":"05-12-2024","capacidad":120.5}"#;
    let req: RegisterCapacityRequest = serde_json::from_str(payload).expect("parse");
    assert_eq!(req.date.to_string(), "05-12-2024");
    assert_eq!(req.total_tons, 120.5);
}

#[test]
fn register_request_rejects_malformed_date() {
    let payload = r#"{"date":"2024-12-05","totalTons":1.0}"#;
    assert!(serde_json::from_str::<RegisterCapacityRequest>(payload).is_err());
}

#[test]
fn allocation_request_defaults_container_ids() {
    let payload = r#"{
        "date": "01-01-2025",
        "totalContainers": 3,
        "totalPackages": 40,
        "estimatedWeightTons": 12.5,
        "assignedBy": "ops"
    }"#;
    let req: AllocationRequest = serde_json::from_str(payload).expect("parse");
    assert_eq!(req.total_containers, 3);
    assert!(req.container_ids.is_empty());
}
