//! Integration tests for events

use efetch_events::{channel, AppEvent, DownloadEvent, EventEmitter};

#[test]
fn test_download_event_roundtrip_json() {
    let event = AppEvent::Download(DownloadEvent::Progress {
        asset: "electron".to_string(),
        bytes_downloaded: 1024,
        total_bytes: Some(4096),
    });

    let json = serde_json::to_string(&event).unwrap();
    assert!(json.contains(r#""domain":"download""#));
    assert!(json.contains(r#""type":"Progress""#));

    let back: AppEvent = serde_json::from_str(&json).unwrap();
    match back {
        AppEvent::Download(DownloadEvent::Progress {
            bytes_downloaded, ..
        }) => assert_eq!(bytes_downloaded, 1024),
        other => panic!("unexpected event: {other:?}"),
    }
}

#[test]
fn test_events_arrive_in_emission_order() {
    let (tx, mut rx) = channel();

    tx.emit_download_started("electron", "https://example.com/e.zip", Some(10));
    tx.emit_download_progress("electron", 5, Some(10));
    tx.emit_download_completed("electron", 10, "/tmp/e.zip".into());

    let mut assets = Vec::new();
    while let Ok(AppEvent::Download(ev)) = rx.try_recv() {
        assets.push(ev.asset().to_string());
    }
    assert_eq!(assets.len(), 3);

    assert!(assets.iter().all(|a| a == "electron"));
}

#[test]
fn test_log_level_mapping() {
    let failed = AppEvent::Download(DownloadEvent::Failed {
        asset: "ffmpeg".to_string(),
        error: "boom".to_string(),
    });
    assert_eq!(failed.log_level(), tracing::Level::ERROR);

    let progress = AppEvent::Download(DownloadEvent::Progress {
        asset: "ffmpeg".to_string(),
        bytes_downloaded: 1,
        total_bytes: None,
    });
    assert_eq!(progress.log_level(), tracing::Level::DEBUG);
}
