use std::time::Duration;

use tokio::net::UdpSocket;
use tokio::time::timeout;

use gesture_artnet::artnet::{ArtDmx, ControlPayload, UdpTransport};
use gesture_artnet::bridge::TraceRecord;
use gesture_artnet::{Config, GesturePipeline, ProtocolEmitter};

fn hand_line(hand_sign: u8, tip: (i32, i32)) -> String {
    let points: Vec<String> = (0..21)
        .map(|i| {
            if i == 8 {
                format!("[{},{}]", tip.0, tip.1)
            } else {
                format!("[{},{}]", 200 + i, 300 - i)
            }
        })
        .collect();
    format!(
        r#"{{"hand": {{"landmarks": [{}], "handedness": "Right"}}, "hand_sign": {}}}"#,
        points.join(","),
        hand_sign
    )
}

const NO_HAND: &str = r#"{"hand": null}"#;

/// Close held, pointer sweep, then the hand leaves the frame
fn session() -> Vec<String> {
    let mut lines = Vec::new();
    for _ in 0..3 {
        lines.push(hand_line(1, (250, 250)));
    }
    lines.push(hand_line(2, (0, 0)));
    lines.push(hand_line(2, (720, 550)));
    for _ in 0..3 {
        lines.push(NO_HAND.to_string());
    }
    lines
}

#[tokio::test]
async fn replayed_session_produces_expected_wire_updates() {
    let receiver = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let addr = receiver.local_addr().unwrap();

    let config = Config::default();
    let transport = UdpTransport::bind(addr).await.unwrap();
    let emitter = ProtocolEmitter::spawn(Box::new(transport), config.universe, config.queue_depth);
    let mut pipeline = GesturePipeline::new(config, emitter);

    let mut emitted = Vec::new();
    for (idx, line) in session().iter().enumerate() {
        let record = TraceRecord::parse_line(line, idx + 1).unwrap();
        let hand = record.hand_frame(720, 480).unwrap();
        let mut pose = record.classifier();
        let mut trajectory = record.classifier();
        let report = pipeline.process_frame(hand.as_ref(), &mut pose, &mut trajectory);
        emitted.push(report.emitted);
    }

    // close confirmed on its second frame, pointer streams, no-op confirmed
    assert_eq!(
        emitted,
        vec![false, true, false, true, true, false, true, false]
    );

    let stats = pipeline.shutdown().await;
    assert_eq!(stats.sent, 4);

    let mut payloads = Vec::new();
    let mut buf = [0u8; 1024];
    for _ in 0..4 {
        let (len, _) = timeout(Duration::from_secs(2), receiver.recv_from(&mut buf))
            .await
            .expect("frame not received in time")
            .unwrap();
        payloads.push(ArtDmx::decode(&buf[..len]).unwrap().payload().unwrap());
    }

    assert_eq!(
        payloads,
        vec![
            ControlPayload::new(1, 0, 0),
            ControlPayload::new(2, 25, 25),
            ControlPayload::new(2, 255, 255),
            ControlPayload::new(0, 0, 0),
        ]
    );
}

#[tokio::test]
async fn pointer_trajectory_fills_after_sixteen_frames() {
    let config = Config::default();
    let emitter = ProtocolEmitter::connect(&config, true).await.unwrap();
    let mut pipeline = GesturePipeline::new(config, emitter);

    let line = r#"{"hand": {"normalized_landmarks": [[0.5,0.5],[0.5,0.5],[0.5,0.5],[0.5,0.5],[0.5,0.5],[0.5,0.5],[0.5,0.5],[0.5,0.5],[0.5,0.5],[0.5,0.5],[0.5,0.5],[0.5,0.5],[0.5,0.5],[0.5,0.5],[0.5,0.5],[0.5,0.5],[0.5,0.5],[0.5,0.5],[0.5,0.5],[0.5,0.5],[0.5,0.5]]}, "hand_sign": 2, "finger_gesture": 1}"#;
    let record = TraceRecord::parse_line(line, 1).unwrap();
    let hand = record.hand_frame(720, 480).unwrap();

    let mut reports = Vec::new();
    for _ in 0..16 {
        let mut pose = record.classifier();
        let mut trajectory = record.classifier();
        reports.push(pipeline.process_frame(hand.as_ref(), &mut pose, &mut trajectory));
    }

    assert!(reports[..15].iter().all(|r| r.finger_gesture.is_none()));
    assert_eq!(reports[15].finger_gesture, Some(1));
    assert!(pipeline.aggregator().trajectory_ready());
    // 15 zero votes still outweigh the first classified frame
    assert_eq!(reports[15].smoothed_finger_gesture, 0);

    let stats = pipeline.shutdown().await;
    assert_eq!(stats.enqueued, 16);
}
