//
//  upcloud-api
//  api/upload.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Direct upload of storage import data.
//!
//! A direct upload is a two-phase exchange:
//!
//! 1. `POST /storage/{uuid}/import` with `source = direct_upload` and a blank
//!    `source_location`; the API answers with a pre-signed `direct_upload_url`
//! 2. `PUT` of the raw bytes to that URL, without the API credentials
//!
//! The import details are then read once more so the caller sees the state
//! after the upload. Completion is usually awaited with the import wait loop.
//!
//! The payload is streamed and never held in memory as a whole.

use reqwest::Body;
use tokio::fs::File;
use tokio::io::AsyncRead;
use tokio_util::io::ReaderStream;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use url::Url;

use crate::api::client::Client;
use crate::api::common::{decode_error_response, Error, Result};
use crate::api::storage::{
    CreateStorageImportRequest, GetStorageImportDetailsRequest, SourceLocation,
    StorageImportDetails, StorageImportEnvelope,
};

/// Content type sent when the request does not name one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Runs a direct upload import.
///
/// The request is consumed: a `Stream` source is read to the end and
/// dropped, and a file opened from a `Path` source is closed on every exit
/// path, including errors and cancellation.
///
/// # Errors
///
/// - [`Error::InvalidArgument`] if no source location is given
/// - [`Error::SourceOpen`] if the source file cannot be opened
/// - [`Error::Protocol`] if the API returns no usable upload URL
/// - [`Error::Service`] if either the import request or the upload is refused
pub(crate) async fn direct_upload(
    client: &Client,
    ctx: &CancellationToken,
    mut request: CreateStorageImportRequest,
) -> Result<StorageImportDetails> {
    let reader = open_source(std::mem::take(&mut request.source_location)).await?;

    let mut created = StorageImportEnvelope::default();
    client.create(ctx, &request, &mut created).await?;

    let upload_url = created.storage_import.direct_upload_url;
    if upload_url.is_empty() {
        return Err(Error::Protocol("no DirectUploadURL found in response".to_string()));
    }
    let upload_url = Url::parse(&upload_url)
        .map_err(|e| Error::Protocol(format!("invalid DirectUploadURL {}: {}", upload_url, e)))?;

    let content_type = request
        .content_type
        .as_deref()
        .unwrap_or(DEFAULT_CONTENT_TYPE);
    let body = Body::wrap_stream(ReaderStream::new(reader));

    let response = client.upload(ctx, upload_url, content_type, body).await?;
    if !response.status.is_success() {
        return Err(decode_error_response(response.status, &response.body).into());
    }
    debug!(storage = %request.storage_uuid, "direct upload accepted");

    let mut details = StorageImportEnvelope::default();
    client
        .get(
            ctx,
            &GetStorageImportDetailsRequest {
                uuid: request.storage_uuid.clone(),
            },
            &mut details,
        )
        .await?;
    Ok(details.storage_import)
}

async fn open_source(location: SourceLocation) -> Result<Box<dyn AsyncRead + Send + Unpin>> {
    match location {
        SourceLocation::Path(path) if !path.is_empty() => {
            let file = File::open(&path).await.map_err(Error::SourceOpen)?;
            Ok(Box::new(file))
        }
        SourceLocation::Stream(reader) => Ok(reader),
        SourceLocation::Path(_) | SourceLocation::None => Err(Error::InvalidArgument(
            "SourceLocation must be specified".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::testing::silent_server;
    use crate::api::storage::{StorageImportSource, StorageImportState};
    use mockito::Matcher;
    use serde_json::json;
    use std::io::Write;
    use std::pin::Pin;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::task::{Context, Poll};
    use std::time::Duration;
    use tokio::io::ReadBuf;

    /// Reader that records when it is dropped.
    struct TrackedReader {
        inner: std::io::Cursor<Vec<u8>>,
        dropped: Arc<AtomicBool>,
    }

    impl AsyncRead for TrackedReader {
        fn poll_read(
            mut self: Pin<&mut Self>,
            cx: &mut Context<'_>,
            buf: &mut ReadBuf<'_>,
        ) -> Poll<std::io::Result<()>> {
            Pin::new(&mut self.inner).poll_read(cx, buf)
        }
    }

    impl Drop for TrackedReader {
        fn drop(&mut self) {
            self.dropped.store(true, Ordering::SeqCst);
        }
    }

    fn client_for(server: &mockito::Server) -> Client {
        Client::new("user", "pass")
            .unwrap()
            .with_base_url(server.url())
            .unwrap()
    }

    fn import_request(location: SourceLocation, content_type: Option<&str>) -> CreateStorageImportRequest {
        CreateStorageImportRequest {
            storage_uuid: "01bb".to_string(),
            source: StorageImportSource::DirectUpload,
            source_location: location,
            content_type: content_type.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_direct_upload_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"gzip bytes").unwrap();
        let path = file.path().to_string_lossy().into_owned();

        let mut server = mockito::Server::new_async().await;
        let upload_url = format!("{}/upload/xyz", server.url());

        let create = server
            .mock("POST", "/storage/01bb/import")
            .match_header("authorization", Matcher::Any)
            .match_body(Matcher::Json(json!({
                "storage_import": {"source": "direct_upload", "source_location": ""}
            })))
            .with_status(201)
            .with_body(
                json!({"storage_import": {"state": "prepared", "direct_upload_url": upload_url}})
                    .to_string(),
            )
            .create_async()
            .await;
        let upload = server
            .mock("PUT", "/upload/xyz")
            .match_header("authorization", Matcher::Missing)
            .match_header("content-type", "application/gzip")
            .match_body("gzip bytes")
            .with_status(200)
            .create_async()
            .await;
        let fetch = server
            .mock("GET", "/storage/01bb/import")
            .with_status(200)
            .with_body(r#"{"storage_import":{"state":"completed","sha256sum":"fd80"}}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let details = direct_upload(
            &client,
            &CancellationToken::new(),
            import_request(SourceLocation::Path(path), Some("application/gzip")),
        )
        .await
        .unwrap();

        create.assert_async().await;
        upload.assert_async().await;
        fetch.assert_async().await;
        assert_eq!(details.state, StorageImportState::Completed);
        assert_eq!(details.sha256sum, "fd80");
    }

    #[tokio::test]
    async fn test_direct_upload_from_stream_uses_default_content_type() {
        let mut server = mockito::Server::new_async().await;
        let upload_url = format!("{}/upload/abc", server.url());
        server
            .mock("POST", "/storage/01bb/import")
            .with_status(201)
            .with_body(json!({"storage_import": {"direct_upload_url": upload_url}}).to_string())
            .create_async()
            .await;
        let upload = server
            .mock("PUT", "/upload/abc")
            .match_header("content-type", DEFAULT_CONTENT_TYPE)
            .match_body("streamed")
            .with_status(200)
            .create_async()
            .await;
        server
            .mock("GET", "/storage/01bb/import")
            .with_status(200)
            .with_body(r#"{"storage_import":{"state":"running"}}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let reader = std::io::Cursor::new(b"streamed".to_vec());
        let details = direct_upload(
            &client,
            &CancellationToken::new(),
            import_request(SourceLocation::stream(reader), None),
        )
        .await
        .unwrap();

        upload.assert_async().await;
        assert_eq!(details.state, StorageImportState::Running);
    }

    #[tokio::test]
    async fn test_missing_source_location_makes_no_request() {
        let mut server = mockito::Server::new_async().await;
        let create = server
            .mock("POST", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let client = client_for(&server);
        for location in [SourceLocation::None, SourceLocation::Path(String::new())] {
            let err = direct_upload(&client, &CancellationToken::new(), import_request(location, None))
                .await
                .unwrap_err();
            assert_eq!(err.to_string(), "SourceLocation must be specified");
        }
        create.assert_async().await;
    }

    #[tokio::test]
    async fn test_unopenable_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.img").to_string_lossy().into_owned();

        let server = mockito::Server::new_async().await;
        let client = client_for(&server);
        let err = direct_upload(
            &client,
            &CancellationToken::new(),
            import_request(SourceLocation::Path(missing), None),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, Error::SourceOpen(_)));
        assert!(err.to_string().starts_with("unable to open SourceLocation: "));
    }

    #[tokio::test]
    async fn test_missing_upload_url_is_protocol_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/storage/01bb/import")
            .with_status(201)
            .with_body(r#"{"storage_import":{"state":"pending"}}"#)
            .create_async()
            .await;
        let upload = server
            .mock("PUT", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = direct_upload(
            &client,
            &CancellationToken::new(),
            import_request(SourceLocation::stream(tokio::io::empty()), None),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, Error::Protocol(_)));
        assert_eq!(err.to_string(), "no DirectUploadURL found in response");
        upload.assert_async().await;
    }

    #[tokio::test]
    async fn test_rejected_upload_is_service_error() {
        let mut server = mockito::Server::new_async().await;
        let upload_url = format!("{}/upload/denied", server.url());
        server
            .mock("POST", "/storage/01bb/import")
            .with_status(201)
            .with_body(json!({"storage_import": {"direct_upload_url": upload_url}}).to_string())
            .create_async()
            .await;
        server
            .mock("PUT", "/upload/denied")
            .with_status(403)
            .with_body("signature expired")
            .create_async()
            .await;

        let client = client_for(&server);
        let err = direct_upload(
            &client,
            &CancellationToken::new(),
            import_request(SourceLocation::stream(tokio::io::empty()), None),
        )
        .await
        .unwrap_err();

        let se = err.service_error().unwrap();
        assert_eq!(se.status, Some(403));
        assert!(se.message.contains("signature expired"));
    }

    #[tokio::test]
    async fn test_cancel_during_upload_releases_source() {
        let (upload_base, upload_host) = silent_server().await;
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/storage/01bb/import")
            .with_status(201)
            .with_body(
                json!({"storage_import": {"direct_upload_url": format!("{}/upload/slow", upload_base)}})
                    .to_string(),
            )
            .create_async()
            .await;
        let details = server
            .mock("GET", "/storage/01bb/import")
            .expect(0)
            .create_async()
            .await;

        let dropped = Arc::new(AtomicBool::new(false));
        let reader = TrackedReader {
            inner: std::io::Cursor::new(b"image bytes".to_vec()),
            dropped: dropped.clone(),
        };

        let client = client_for(&server);
        let ctx = CancellationToken::new();
        let canceller = ctx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            canceller.cancel();
        });

        let result = tokio::time::timeout(
            Duration::from_secs(10),
            direct_upload(
                &client,
                &ctx,
                import_request(SourceLocation::stream(reader), None),
            ),
        )
        .await
        .expect("cancellation did not interrupt the upload");

        assert!(result.unwrap_err().is_canceled());
        details.assert_async().await;

        upload_host.abort();
        for _ in 0..200 {
            if dropped.load(Ordering::SeqCst) {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert!(dropped.load(Ordering::SeqCst), "upload source was never released");
    }
}
