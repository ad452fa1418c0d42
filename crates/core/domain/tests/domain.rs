use domain::{
    CapacityDate, CapacityRecord, DateParseError, EndpointParseError, GatewayEndpoint,
    TransportKind,
};

#[test]
fn date_parses_and_formats() {
    let date = CapacityDate::parse("05-12-2024").expect("date");
    assert_eq!(date, CapacityDate::from_ymd(2024, 12, 5).expect("ymd"));
    assert_eq!(date.to_string(), "05-12-2024");
}

#[test]
fn date_rejects_loose_and_impossible_values() {
    assert!(matches!(
        CapacityDate::parse("5-12-2024"),
        Err(DateParseError::Malformed(_))
    ));
    assert!(matches!(
        CapacityDate::parse("2024-12-05"),
        Err(DateParseError::Malformed(_))
    ));
    assert!(matches!(
        CapacityDate::parse(""),
        Err(DateParseError::Malformed(_))
    ));
    assert!(matches!(
        CapacityDate::parse("31-02-2025"),
        Err(DateParseError::Invalid(_))
    ));
}

#[test]
fn date_serializes_as_text() {
    let date = CapacityDate::from_ymd(2025, 1, 1).expect("ymd");
    let json = serde_json::to_string(&date).expect("serialize");
    assert_eq!(json, "\"01-01-2025\"");
    let back: CapacityDate = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, date);
    assert!(serde_json::from_str::<CapacityDate>("\"2025-01-01\"").is_err());
}

#[test]
fn date_add_days_crosses_month() {
    let date = CapacityDate::from_ymd(2025, 1, 30).expect("ymd");
    assert_eq!(date.add_days(3).expect("add").to_string(), "02-02-2025");
}

#[test]
fn record_available_is_total_minus_used() {
    let date = CapacityDate::from_ymd(2025, 1, 1).expect("ymd");
    let mut record = CapacityRecord::new(date, 120.5);
    assert_eq!(record.available_tons(), 120.5);
    record.used_tons = 20.5;
    assert_eq!(record.available_tons(), 100.0);
    assert!(record.can_accommodate(100.0));
    assert!(!record.can_accommodate(100.01));
}

#[test]
fn transport_kind_aliases() {
    assert_eq!("HTTP".parse::<TransportKind>(), Ok(TransportKind::Http));
    assert_eq!("SpringBoot".parse::<TransportKind>(), Ok(TransportKind::Http));
    assert_eq!("tcp".parse::<TransportKind>(), Ok(TransportKind::Socket));
    assert!(matches!(
        "ftp".parse::<TransportKind>(),
        Err(EndpointParseError::UnknownKind(_))
    ));
}

#[test]
fn endpoint_entry_parses_with_and_without_token() {
    let socket = GatewayEndpoint::parse_entry("contsocket=socket@127.0.0.1:8090").expect("socket");
    assert_eq!(socket.kind(), TransportKind::Socket);
    assert_eq!(socket.address(), "127.0.0.1:8090");
    assert_eq!(socket.display_name(), "contsocket");
    assert!(socket.credential().is_none());

    let http =
        GatewayEndpoint::parse_entry(" plassb = http@http://localhost:8083#secret ").expect("http");
    assert_eq!(http.kind(), TransportKind::Http);
    assert_eq!(http.address(), "http://localhost:8083");
    assert_eq!(http.credential(), Some("secret"));

    assert!(GatewayEndpoint::parse_entry("missing-kind").is_err());
    assert!(GatewayEndpoint::parse_entry("=socket@host:1").is_err());
}
