use domain::{AllocationNotice, CapacityDate, GatewayEndpoint, TransportKind};
use plant_gateway::{GatewayError, PlantGateway, SocketGateway, SocketGatewayConfig};
use plant_protocol::{ProtocolServer, ProtocolServerConfig};
use plant_storage::InMemoryCapacityStore;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;

fn date(s: &str) -> CapacityDate {
    CapacityDate::parse(s).expect("date")
}

fn gateway(addr: SocketAddr) -> SocketGateway {
    let endpoint = GatewayEndpoint::new(TransportKind::Socket, addr.to_string(), "contsocket");
    SocketGateway::new(&endpoint).expect("gateway")
}

async fn start_plant() -> SocketAddr {
    let store = Arc::new(InMemoryCapacityStore::with_records([(
        date("05-12-2024"),
        120.5,
    )]));
    let config = ProtocolServerConfig {
        host: "127.0.0.1".to_string(),
        listen_port: 0,
        ..ProtocolServerConfig::default()
    };
    let server = ProtocolServer::bind(config, store).await.expect("bind");
    let addr = server.local_addr().expect("addr");
    tokio::spawn(server.run());
    addr
}

/// 接受一个连接，读一行后按 `reply` 回应（`None` 表示直接关闭）。
async fn start_scripted(reply: Option<&'static str>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.expect("accept");
        let (read, mut write) = stream.into_split();
        let mut line = String::new();
        BufReader::new(read).read_line(&mut line).await.expect("read");
        if let Some(reply) = reply {
            write.write_all(reply.as_bytes()).await.expect("write");
        }
    });
    addr
}

#[tokio::test]
async fn query_against_protocol_server() {
    let addr = start_plant().await;
    let gateway = gateway(addr);

    assert_eq!(
        gateway.query_capacity(date("05-12-2024")).await,
        Ok(120.5)
    );
    // 每次调用独立连接，可重复调用
    assert_eq!(
        gateway.query_capacity(date("05-12-2024")).await,
        Ok(120.5)
    );
    assert_eq!(gateway.transport_kind(), TransportKind::Socket);
}

#[tokio::test]
async fn missing_date_is_unavailable() {
    let addr = start_plant().await;

    let result = gateway(addr).query_capacity(date("31-12-2099")).await;

    assert_eq!(
        result,
        Err(GatewayError::Unavailable(
            "No capacity available for date: 31-12-2099".to_string()
        ))
    );
}

#[tokio::test]
async fn notify_is_acknowledged() {
    let addr = start_plant().await;
    let notice = AllocationNotice::new(date("05-12-2024"), 3, 120, 0.0);

    let ack = gateway(addr).notify(&notice).await.expect("notify");

    assert_eq!(ack, "Notification received: 3 containers, 120 packages");
}

#[tokio::test]
async fn invalid_notification_is_rejected() {
    let addr = start_plant().await;
    let notice = AllocationNotice::new(date("05-12-2024"), 0, 120, 0.0);

    let result = gateway(addr).notify(&notice).await;

    assert!(matches!(result, Err(GatewayError::Rejected(_))));
}

#[tokio::test]
async fn spanish_no_capacity_reply_is_unavailable() {
    let addr = start_scripted(Some(
        "ERROR|No hay capacidad disponible para la fecha: 05-12-2024\n",
    ))
    .await;

    let result = gateway(addr).query_capacity(date("05-12-2024")).await;

    assert!(matches!(result, Err(GatewayError::Unavailable(_))), "{result:?}");
}

#[tokio::test]
async fn other_error_reply_is_protocol_error() {
    let addr = start_scripted(Some("ERROR|Invalid date format. Use: dd-MM-yyyy\n")).await;

    let result = gateway(addr).query_capacity(date("05-12-2024")).await;

    assert_eq!(
        result,
        Err(GatewayError::Protocol(
            "Invalid date format. Use: dd-MM-yyyy".to_string()
        ))
    );
}

#[tokio::test]
async fn malformed_reply_is_protocol_error() {
    let addr = start_scripted(Some("120.5\n")).await;

    let result = gateway(addr).query_capacity(date("05-12-2024")).await;

    assert!(matches!(result, Err(GatewayError::Protocol(_))));
}

#[tokio::test]
async fn non_numeric_ok_is_protocol_error() {
    let addr = start_scripted(Some("OK|lots\n")).await;

    let result = gateway(addr).query_capacity(date("05-12-2024")).await;

    assert!(matches!(result, Err(GatewayError::Protocol(_))));
}

#[tokio::test]
async fn closed_without_reply_is_transport_error() {
    let addr = start_scripted(None).await;

    let result = gateway(addr).query_capacity(date("05-12-2024")).await;

    assert!(matches!(result, Err(GatewayError::Transport(_))));
}

#[tokio::test]
async fn silent_plant_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let holder = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.expect("accept");
        tokio::time::sleep(std::time::Duration::from_secs(5)).await;
        drop(stream);
    });

    let endpoint = GatewayEndpoint::new(TransportKind::Socket, addr.to_string(), "silent");
    let config = SocketGatewayConfig {
        read_timeout_ms: 200,
        ..SocketGatewayConfig::default()
    };
    let gateway = SocketGateway::with_config(&endpoint, config).expect("gateway");

    let result = gateway.query_capacity(date("05-12-2024")).await;

    match result {
        Err(GatewayError::Transport(message)) => assert!(message.contains("200ms"), "{message}"),
        other => panic!("unexpected result: {other:?}"),
    }
    holder.abort();
}

#[tokio::test]
async fn refused_connection_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let result = gateway(addr).query_capacity(date("05-12-2024")).await;

    assert!(matches!(result, Err(GatewayError::Transport(_))));
}
