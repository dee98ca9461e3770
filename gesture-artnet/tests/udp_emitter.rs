use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::UdpSocket;
use tokio::time::timeout;

use gesture_artnet::artnet::{ArtDmx, ControlPayload, UdpTransport};
use gesture_artnet::{Config, GestureLinkError, LandmarkPoint, ProtocolEmitter};

/// Receive side of the wire: a localhost socket standing in for a node
async fn receiver() -> (UdpSocket, SocketAddr) {
    let socket = UdpSocket::bind("127.0.0.1:0").await.expect("bind receiver");
    let addr = socket.local_addr().expect("receiver address");
    (socket, addr)
}

async fn recv_frame(socket: &UdpSocket) -> ArtDmx {
    let mut buf = [0u8; 1024];
    let (len, _) = timeout(Duration::from_secs(2), socket.recv_from(&mut buf))
        .await
        .expect("frame not received in time")
        .expect("recv failed");
    ArtDmx::decode(&buf[..len]).expect("valid ArtDmx")
}

#[tokio::test]
async fn emitted_payloads_arrive_in_call_order() {
    let (socket, addr) = receiver().await;
    let transport = UdpTransport::bind(addr).await.expect("bind transport");
    let emitter = ProtocolEmitter::spawn(Box::new(transport), 7, 16);

    assert_eq!(
        emitter.emit(2, Some(LandmarkPoint::new(360, 275)), 720, 550),
        Some((153, 153))
    );
    emitter.emit(3, None, 720, 550);
    emitter.emit(0, None, 720, 550);

    let mut received = Vec::new();
    for _ in 0..3 {
        received.push(recv_frame(&socket).await);
    }

    let payloads: Vec<ControlPayload> = received.iter().map(|f| f.payload().unwrap()).collect();
    assert_eq!(
        payloads,
        vec![
            ControlPayload::new(2, 153, 153),
            ControlPayload::new(3, 0, 0),
            ControlPayload::new(0, 0, 0),
        ]
    );
    assert!(received.iter().all(|f| f.universe == 7));
    assert_eq!(
        received.iter().map(|f| f.sequence).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );

    let stats = emitter.shutdown().await;
    assert_eq!(stats.sent, 3);
    assert_eq!(stats.failed, 0);
}

#[tokio::test]
async fn connect_uses_config_destination() {
    let (socket, addr) = receiver().await;
    let config = Config {
        ip: addr.ip().to_string(),
        port: addr.port(),
        universe: 0x0123,
        ..Config::default()
    };

    let emitter = ProtocolEmitter::connect(&config, false).await.unwrap();
    emitter.emit(1, None, config.pointer_width, config.pointer_height);

    let frame = recv_frame(&socket).await;
    assert_eq!(frame.universe, 0x0123);
    assert_eq!(frame.data, vec![1, 0, 0, 0]);
    emitter.shutdown().await;
}

#[tokio::test]
async fn connect_rejects_unparseable_address() {
    let config = Config {
        ip: "not-an-address".into(),
        ..Config::default()
    };
    let result = ProtocolEmitter::connect(&config, false).await;
    assert!(matches!(result, Err(GestureLinkError::InvalidAddress(_))));
}

#[tokio::test]
async fn dry_run_sends_nothing_but_counts() {
    let config = Config::default();
    let emitter = ProtocolEmitter::connect(&config, true).await.unwrap();
    emitter.emit(2, Some(LandmarkPoint::new(0, 0)), 720, 550);
    let stats = emitter.shutdown().await;
    assert_eq!(stats.enqueued, 1);
    assert_eq!(stats.sent, 1);
}
