use plant_telemetry::{
    TelemetryMetrics, metrics, new_connection_id, new_request_ids, record_command,
    record_reservation,
};

#[test]
fn request_ids_non_empty() {
    let ids = new_request_ids();
    assert!(!ids.request_id.is_empty());
    assert!(!ids.trace_id.is_empty());
    assert_ne!(ids.request_id, ids.trace_id);
}

#[test]
fn connection_ids_are_unique() {
    assert_ne!(new_connection_id(), new_connection_id());
}

#[test]
fn fresh_metrics_start_at_zero() {
    let snapshot = TelemetryMetrics::new().snapshot();
    assert_eq!(snapshot.commands_processed, 0);
    assert_eq!(snapshot.gateway_failures, 0);
}

#[test]
fn global_counters_only_grow() {
    let before = metrics().snapshot();
    record_command(false);
    record_reservation(true);
    let after = metrics().snapshot();
    assert!(after.commands_processed > before.commands_processed);
    assert!(after.commands_failed > before.commands_failed);
    assert!(after.reservations_accepted > before.reservations_accepted);
}
