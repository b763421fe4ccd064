//! Integration tests for net, against a mocked release store

use efetch_errors::{Error, LookupError, NetworkError};
use efetch_events::{AppEvent, DownloadEvent, EventReceiver};
use efetch_net::{download_asset, fetch_text, Mirror, NetClient};
use efetch_types::{FetchRequest, Platform, ResolvedSpec, Version};
use httpmock::prelude::*;

const HELLO_SHA256: &str = "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9";

fn spec(version: &str, platform: Platform) -> ResolvedSpec {
    FetchRequest::new(Version::parse(version).unwrap(), platform)
        .resolve()
        .unwrap()
}

fn mirror_for(server: &MockServer) -> Mirror {
    Mirror {
        release_base: server.base_url(),
        api_base: server.base_url(),
    }
}

fn drain(rx: &mut EventReceiver) -> Vec<AppEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[tokio::test]
async fn test_default_path_downloads_and_verifies() {
    let server = MockServer::start_async().await;

    let manifest = server
        .mock_async(|when, then| {
            when.method(GET).path("/v10.0.0/SHASUMS256.txt");
            then.status(200)
                .body(format!("{HELLO_SHA256}  electron-v10.0.0-linux-x64.zip\n"));
        })
        .await;

    let archive = server
        .mock_async(|when, then| {
            when.method(GET).path("/v10.0.0/electron-v10.0.0-linux-x64.zip");
            then.status(200).body("hello world");
        })
        .await;

    let client = NetClient::with_defaults().unwrap();
    let (tx, mut rx) = efetch_events::channel();
    let dest = tempfile::tempdir().unwrap();

    let path = download_asset(
        &client,
        &spec("10.0.0", Platform::Linux),
        &mirror_for(&server),
        dest.path(),
        &tx,
    )
    .await
    .unwrap();

    manifest.assert_async().await;
    archive.assert_async().await;

    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        "electron-v10.0.0-linux-x64.zip"
    );
    assert_eq!(std::fs::read(&path).unwrap(), b"hello world");

    let events = drain(&mut rx);
    let mut saw_started = false;
    let mut saw_completed = false;
    let mut last_progress = 0;
    for event in events {
        match event {
            AppEvent::Download(DownloadEvent::Started { asset, .. }) => {
                assert_eq!(asset, "electron");
                saw_started = true;
            }
            AppEvent::Download(DownloadEvent::Progress {
                bytes_downloaded, ..
            }) => {
                assert!(bytes_downloaded >= last_progress);
                last_progress = bytes_downloaded;
            }
            AppEvent::Download(DownloadEvent::Completed {
                bytes_downloaded, ..
            }) => {
                assert_eq!(bytes_downloaded, 11);
                saw_completed = true;
            }
            _ => {}
        }
    }
    assert!(saw_started && saw_completed);
}

#[tokio::test]
async fn test_checksum_mismatch_removes_archive() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/v10.0.0/SHASUMS256.txt");
            then.status(200)
                .body(format!("{HELLO_SHA256}  electron-v10.0.0-linux-x64.zip\n"));
        })
        .await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/v10.0.0/electron-v10.0.0-linux-x64.zip");
            then.status(200).body("tampered bytes");
        })
        .await;

    let client = NetClient::with_defaults().unwrap();
    let (tx, mut rx) = efetch_events::channel();
    let dest = tempfile::tempdir().unwrap();

    let err = download_asset(
        &client,
        &spec("10.0.0", Platform::Linux),
        &mirror_for(&server),
        dest.path(),
        &tx,
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        Error::Network(NetworkError::ChecksumMismatch { .. })
    ));

    // Neither the final archive nor the temporary file survives
    assert!(!dest.path().join("electron-v10.0.0-linux-x64.zip").exists());
    assert!(!dest.path().join("electron-v10.0.0-linux-x64.download").exists());

    let events = drain(&mut rx);
    assert!(events.iter().any(|e| matches!(
        e,
        AppEvent::Download(DownloadEvent::Failed { asset, .. }) if asset == "electron"
    )));
}

#[tokio::test]
async fn test_missing_manifest_entry_prevents_download() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/v10.0.0/SHASUMS256.txt");
            then.status(200)
                .body(format!("{HELLO_SHA256}  something-else.zip\n"));
        })
        .await;

    let archive = server
        .mock_async(|when, then| {
            when.method(GET).path("/v10.0.0/electron-v10.0.0-linux-x64.zip");
            then.status(200).body("hello world");
        })
        .await;

    let client = NetClient::with_defaults().unwrap();
    let (tx, _rx) = efetch_events::channel();
    let dest = tempfile::tempdir().unwrap();

    let err = download_asset(
        &client,
        &spec("10.0.0", Platform::Linux),
        &mirror_for(&server),
        dest.path(),
        &tx,
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        Error::Network(NetworkError::ChecksumMissing { .. })
    ));
    assert_eq!(archive.hits_async().await, 0);
}

#[tokio::test]
async fn test_custom_repo_lookup_and_download() {
    let server = MockServer::start_async().await;

    let lookup = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/repos/acme/electron-builds/releases/tags/v10.0.0")
                .header("authorization", "Bearer s3cr3t");
            then.status(200).json_body(serde_json::json!({
                "tag_name": "v10.0.0",
                "assets": [
                    {
                        "name": "electron-v10.0.0-linux-x64.zip",
                        "browser_download_url": server.url("/custom/electron-v10.0.0-linux-x64.zip")
                    }
                ]
            }));
        })
        .await;

    let archive = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/custom/electron-v10.0.0-linux-x64.zip");
            // Content differs from any published checksum; verification is off
            then.status(200).body("tampered bytes");
        })
        .await;

    let client = NetClient::with_defaults().unwrap();
    let (tx, _rx) = efetch_events::channel();
    let dest = tempfile::tempdir().unwrap();

    let mut spec = spec("10.0.0", Platform::Linux);
    spec.repo = Some("acme/electron-builds".parse().unwrap());
    spec.token = Some("s3cr3t".to_string());

    let path = download_asset(&client, &spec, &mirror_for(&server), dest.path(), &tx)
        .await
        .unwrap();

    lookup.assert_async().await;
    archive.assert_async().await;
    assert_eq!(std::fs::read(&path).unwrap(), b"tampered bytes");
}

#[tokio::test]
async fn test_lookup_failure_prevents_download() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/repos/acme/electron-builds/releases/tags/v10.0.0");
            then.status(404);
        })
        .await;

    let client = NetClient::with_defaults().unwrap();
    let (tx, mut rx) = efetch_events::channel();
    let dest = tempfile::tempdir().unwrap();

    let mut spec = spec("10.0.0", Platform::Linux);
    spec.repo = Some("acme/electron-builds".parse().unwrap());

    let err = download_asset(&client, &spec, &mirror_for(&server), dest.path(), &tx)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Lookup(LookupError::ReleaseNotFound { .. })
    ));

    // No download was started, only the failure surfaced
    let events = drain(&mut rx);
    assert!(!events
        .iter()
        .any(|e| matches!(e, AppEvent::Download(DownloadEvent::Started { .. }))));
    assert!(events
        .iter()
        .any(|e| matches!(e, AppEvent::Download(DownloadEvent::Failed { .. }))));
}

#[tokio::test]
async fn test_missing_release_asset() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/repos/acme/electron-builds/releases/tags/v10.0.0");
            then.status(200).json_body(serde_json::json!({
                "tag_name": "v10.0.0",
                "assets": []
            }));
        })
        .await;

    let client = NetClient::with_defaults().unwrap();
    let (tx, _rx) = efetch_events::channel();
    let dest = tempfile::tempdir().unwrap();

    let mut spec = spec("10.0.0", Platform::Linux);
    spec.repo = Some("acme/electron-builds".parse().unwrap());

    let err = download_asset(&client, &spec, &mirror_for(&server), dest.path(), &tx)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Lookup(LookupError::AssetNotFound { .. })
    ));
}

#[tokio::test]
async fn test_fetch_text_maps_http_errors() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/missing.txt");
            then.status(404);
        })
        .await;

    let client = NetClient::with_defaults().unwrap();
    let err = fetch_text(&client, &server.url("/missing.txt"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Network(NetworkError::HttpError { status: 404, .. })
    ));
}
