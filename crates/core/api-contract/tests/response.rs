use api_contract::{ApiResponse, CapacityDto};

#[test]
fn api_response_success() {
    let response = ApiResponse::success(42.0_f64);
    assert!(response.success);
    assert_eq!(response.data, Some(42.0));
    assert!(response.error.is_none());
}

#[test]
fn api_response_error_round_trips_through_json() {
    let response = ApiResponse::<CapacityDto>::error("CAPACITY.NOT_FOUND", "no capacity");
    let json = serde_json::to_string(&response).expect("serialize");

    let parsed: ApiResponse<CapacityDto> = serde_json::from_str(&json).expect("parse");
    assert!(!parsed.success);
    assert!(parsed.data.is_none());
    let error = parsed.error.expect("error");
    assert_eq!(error.code, "CAPACITY.NOT_FOUND");
    assert_eq!(error.message, "no capacity");
}
