//! Session behaviour against an in-process fake service.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;

use bytes::Bytes;
use tokio::sync::mpsc;

use concord_client::config::{self, ConcordConfig};
use concord_client::{ChannelSink, Inbound, Session};
use concord_core::protocol::payload::{
    Challenge, CreateServerRequest, GetChannelsRequest, GetChannelsResponse, GetServersRequest,
    GetServersResponse,
};
use concord_core::protocol::{Channel, Image, Pubkey, ServerId};
use concord_core::{Envelope, ErrorCode, EventCodec, EventKind, Payload};

fn cfg(timeout_ms: u64) -> ConcordConfig {
    config::load_from_str(&format!(
        "version: 1\nsession:\n  request_timeout_ms: {timeout_ms}\n  max_pending: 8\n"
    ))
    .unwrap()
}

/// Answers every request it understands through `Session::on_frame`.
fn spawn_service(session: Arc<Session<ChannelSink>>, mut rx: mpsc::Receiver<Bytes>) {
    tokio::spawn(async move {
        let codec = EventCodec::server();
        while let Some(frame) = rx.recv().await {
            let (req, _) = codec.decode(&frame).unwrap();
            let resp = match &req.payload {
                Payload::GetServersRequest(_) => req.reply(GetServersResponse { servers: vec![] }),
                Payload::GetChannelsRequest(r) => req.reply(GetChannelsResponse {
                    server_id: r.server_id,
                    server_pubkey: r.server_pubkey,
                    channels: vec![Channel {
                        channel_id: 1,
                        name: "general".into(),
                        description: String::new(),
                    }],
                }),
                _ => continue,
            };
            let bytes = codec.encode(&resp).unwrap();
            match session.on_frame(&bytes) {
                Inbound::Response { request_id, .. } => assert_eq!(request_id, req.request_id),
                other => panic!("unexpected {other:?}"),
            }
        }
    });
}

#[tokio::test]
async fn request_receives_matching_response() {
    let (sink, rx) = ChannelSink::new(8);
    let session = Arc::new(Session::new(&cfg(2_000), sink));
    spawn_service(session.clone(), rx);

    let resp = session.request(GetServersRequest {}).await.unwrap();
    assert_eq!(resp.kind(), EventKind::GetServersResponse);

    let req = GetChannelsRequest {
        server_id: ServerId::from(9),
        server_pubkey: Pubkey([4; 32]),
    };
    let resp = session.request(req).await.unwrap();
    match resp.payload {
        Payload::GetChannelsResponse(body) => {
            assert_eq!(body.server_id, ServerId::from(9));
            assert_eq!(body.channels.len(), 1);
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(session.pending(), 0);
}

#[tokio::test]
async fn concurrent_requests_are_correlated() {
    let (sink, rx) = ChannelSink::new(8);
    let session = Arc::new(Session::new(&cfg(2_000), sink));
    spawn_service(session.clone(), rx);

    let a = session.request(GetServersRequest {});
    let b = session.request(GetChannelsRequest {
        server_id: ServerId::from(1),
        server_pubkey: Pubkey([1; 32]),
    });
    let (a, b) = tokio::join!(a, b);
    assert_eq!(a.unwrap().kind(), EventKind::GetServersResponse);
    assert_eq!(b.unwrap().kind(), EventKind::GetChannelsResponse);
}

#[tokio::test]
async fn unanswered_request_times_out() {
    let (sink, mut rx) = ChannelSink::new(8);
    let session = Session::new(&cfg(100), sink);

    let err = session.request(GetServersRequest {}).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::Timeout);
    assert_eq!(session.pending(), 0);
    assert!(rx.recv().await.is_some());
}

#[tokio::test]
async fn fire_and_forget_send() {
    let (sink, mut rx) = ChannelSink::new(8);
    let session = Session::new(&cfg(1_000), sink);

    let id = session
        .send(CreateServerRequest {
            name: "general".into(),
            icon: Image::from(vec![1, 2, 3]),
        })
        .await
        .unwrap();
    let frame = rx.recv().await.unwrap();
    let (env, _) = EventCodec::server().decode(&frame).unwrap();
    assert_eq!(env.request_id, id);
    assert_eq!(session.pending(), 0);

    // no response kind, so it cannot be awaited
    let err = session
        .request(CreateServerRequest {
            name: "x".into(),
            icon: Image::default(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotSupported);
}

#[tokio::test]
async fn closed_transport_fails_request() {
    let (sink, rx) = ChannelSink::new(1);
    drop(rx);
    let session = Session::new(&cfg(1_000), sink);
    let err = session.request(GetServersRequest {}).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::Transport);
    assert_eq!(session.pending(), 0);
}

#[tokio::test]
async fn bad_frames_are_dropped_and_session_survives() {
    let (sink, rx) = ChannelSink::new(8);
    let session = Arc::new(Session::new(&cfg(2_000), sink));

    match session.on_frame(&[1, 0, 0]) {
        Inbound::ProtocolError { code, .. } => assert_eq!(code, ErrorCode::OutOfBounds),
        other => panic!("unexpected {other:?}"),
    }

    let mut unknown = vec![1u8; 23];
    unknown[21] = 0;
    unknown[22] = 250;
    match session.on_frame(&unknown) {
        Inbound::ProtocolError { code, .. } => assert_eq!(code, ErrorCode::UnknownEventType),
        other => panic!("unexpected {other:?}"),
    }

    // a request frame echoed back is the wrong direction for a client
    let echoed = EventCodec::client()
        .encode(&Envelope::new(GetServersRequest {}))
        .unwrap();
    match session.on_frame(&echoed) {
        Inbound::ProtocolError { code, .. } => assert_eq!(code, ErrorCode::NotSupported),
        other => panic!("unexpected {other:?}"),
    }

    let oversized = vec![0u8; 4 * 1024 * 1024 + 1];
    match session.on_frame(&oversized) {
        Inbound::ProtocolError { code, .. } => assert_eq!(code, ErrorCode::FrameTooLarge),
        other => panic!("unexpected {other:?}"),
    }

    spawn_service(session.clone(), rx);
    let resp = session.request(GetServersRequest {}).await.unwrap();
    assert_eq!(resp.kind(), EventKind::GetServersResponse);
}

#[tokio::test]
async fn challenge_is_unsolicited() {
    let (sink, _rx) = ChannelSink::new(8);
    let session = Session::new(&ConcordConfig::default(), sink);

    let push = EventCodec::server()
        .encode(&Envelope::new(Challenge { challenge: 77 }))
        .unwrap();
    match session.on_frame(&push) {
        Inbound::Unsolicited(env) => {
            assert_eq!(env.payload, Payload::Challenge(Challenge { challenge: 77 }))
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn stale_requests_expire() {
    let (sink, _rx) = ChannelSink::new(8);
    let session = Arc::new(Session::new(&cfg(100), sink));

    let s = session.clone();
    let waiter = tokio::spawn(async move { s.request(GetServersRequest {}).await });
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    assert_eq!(session.pending(), 1);
    assert!(session.expire_stale().is_empty());

    let err = waiter.await.unwrap().unwrap_err();
    assert_eq!(err.code(), ErrorCode::Timeout);
}
