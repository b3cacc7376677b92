//
//  upcloud-api
//  service/storage.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Storage, backup and storage import operations.

use serde::de::IgnoredAny;
use tokio_util::sync::CancellationToken;

use super::Service;
use crate::api::common::{Error, Result};
use crate::api::server::{ServerDetails, ServerDetailsEnvelope};
use crate::api::storage::{
    AttachStorageRequest, CancelStorageImportRequest, CloneStorageRequest, CreateBackupRequest,
    CreateStorageImportRequest, CreateStorageRequest, DeleteStorageRequest, DetachStorageRequest,
    GetStorageDetailsRequest, GetStorageImportDetailsRequest, GetStoragesRequest,
    ModifyStorageRequest, ResizeBackupEnvelope, ResizeStorageFilesystemBackup,
    ResizeStorageFilesystemRequest, RestoreBackupRequest, SourceLocation, Storage,
    StorageDetails, StorageDetailsEnvelope, StorageImportDetails, StorageImportEnvelope,
    StorageImportSource, StoragesEnvelope, WaitForStorageImportCompletionRequest,
    WaitForStorageStateRequest,
};
use crate::api::upload::direct_upload;
use crate::api::wait::{import_verdict, poll_until, storage_state_verdict, PollPolicy};

impl Service {
    /// Lists storages, optionally filtered.
    pub async fn get_storages(
        &self,
        ctx: &CancellationToken,
        req: &GetStoragesRequest,
    ) -> Result<Vec<Storage>> {
        let mut out = StoragesEnvelope::default();
        self.client.get(ctx, req, &mut out).await?;
        Ok(out.storages.storage)
    }

    /// Returns the full description of one storage.
    pub async fn get_storage_details(
        &self,
        ctx: &CancellationToken,
        req: &GetStorageDetailsRequest,
    ) -> Result<StorageDetails> {
        let mut out = StorageDetailsEnvelope::default();
        self.client.get(ctx, req, &mut out).await?;
        Ok(out.storage)
    }

    /// Creates an empty storage.
    pub async fn create_storage(
        &self,
        ctx: &CancellationToken,
        req: &CreateStorageRequest,
    ) -> Result<StorageDetails> {
        let mut out = StorageDetailsEnvelope::default();
        self.client.create(ctx, req, &mut out).await?;
        Ok(out.storage)
    }

    /// Modifies a storage.
    pub async fn modify_storage(
        &self,
        ctx: &CancellationToken,
        req: &ModifyStorageRequest,
    ) -> Result<StorageDetails> {
        let mut out = StorageDetailsEnvelope::default();
        self.client.modify(ctx, req, &mut out).await?;
        Ok(out.storage)
    }

    /// Deletes a storage.
    pub async fn delete_storage(&self, ctx: &CancellationToken, req: &DeleteStorageRequest) -> Result<()> {
        self.client.delete(ctx, req).await
    }

    /// Attaches a storage to a server and returns the updated server.
    pub async fn attach_storage(
        &self,
        ctx: &CancellationToken,
        req: &AttachStorageRequest,
    ) -> Result<ServerDetails> {
        let mut out = ServerDetailsEnvelope::default();
        self.client.create(ctx, req, &mut out).await?;
        Ok(out.server)
    }

    /// Detaches a storage from a server and returns the updated server.
    pub async fn detach_storage(
        &self,
        ctx: &CancellationToken,
        req: &DetachStorageRequest,
    ) -> Result<ServerDetails> {
        let mut out = ServerDetailsEnvelope::default();
        self.client.create(ctx, req, &mut out).await?;
        Ok(out.server)
    }

    /// Clones a storage and returns the new one.
    pub async fn clone_storage(
        &self,
        ctx: &CancellationToken,
        req: &CloneStorageRequest,
    ) -> Result<StorageDetails> {
        let mut out = StorageDetailsEnvelope::default();
        self.client.create(ctx, req, &mut out).await?;
        Ok(out.storage)
    }

    /// Takes a backup and returns the backup storage.
    pub async fn create_backup(
        &self,
        ctx: &CancellationToken,
        req: &CreateBackupRequest,
    ) -> Result<StorageDetails> {
        let mut out = StorageDetailsEnvelope::default();
        self.client.create(ctx, req, &mut out).await?;
        Ok(out.storage)
    }

    /// Restores a backup. The API answers with no content.
    pub async fn restore_backup(&self, ctx: &CancellationToken, req: &RestoreBackupRequest) -> Result<()> {
        self.client.create(ctx, req, &mut IgnoredAny).await
    }

    /// Grows a storage's filesystem to fill the storage.
    ///
    /// Returns the backup taken before the resize.
    pub async fn resize_storage_filesystem(
        &self,
        ctx: &CancellationToken,
        req: &ResizeStorageFilesystemRequest,
    ) -> Result<ResizeStorageFilesystemBackup> {
        let mut out = ResizeBackupEnvelope::default();
        self.client.create(ctx, req, &mut out).await?;
        Ok(out.resize_backup)
    }

    /// Starts a storage import.
    ///
    /// For [`StorageImportSource::HttpImport`] the API fetches
    /// `source_location` itself. For [`StorageImportSource::DirectUpload`] the
    /// data is streamed from the given file or reader to the pre-signed URL
    /// returned by the API, and the details are read back after the upload.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] for a missing source, or a stream given
    ///   to an HTTP import
    /// - [`Error::SourceOpen`] if the upload file cannot be opened
    /// - [`Error::Protocol`] if the API returns no upload URL
    pub async fn create_storage_import(
        &self,
        ctx: &CancellationToken,
        req: CreateStorageImportRequest,
    ) -> Result<StorageImportDetails> {
        if req.source == StorageImportSource::DirectUpload {
            return direct_upload(&self.client, ctx, req).await;
        }
        if matches!(req.source_location, SourceLocation::Stream(_)) {
            return Err(Error::InvalidArgument(
                "unsupported source location type".to_string(),
            ));
        }

        let mut out = StorageImportEnvelope::default();
        self.client.create(ctx, &req, &mut out).await?;
        Ok(out.storage_import)
    }

    /// Returns the state of a storage's current import.
    pub async fn get_storage_import_details(
        &self,
        ctx: &CancellationToken,
        req: &GetStorageImportDetailsRequest,
    ) -> Result<StorageImportDetails> {
        let mut out = StorageImportEnvelope::default();
        self.client.get(ctx, req, &mut out).await?;
        Ok(out.storage_import)
    }

    /// Cancels a running import.
    pub async fn cancel_storage_import(
        &self,
        ctx: &CancellationToken,
        req: &CancelStorageImportRequest,
    ) -> Result<StorageImportDetails> {
        let mut out = StorageImportEnvelope::default();
        self.client.create(ctx, req, &mut out).await?;
        Ok(out.storage_import)
    }

    /// Polls a storage until it reaches `desired_state`.
    pub async fn wait_for_storage_state(
        &self,
        ctx: &CancellationToken,
        req: &WaitForStorageStateRequest,
    ) -> Result<StorageDetails> {
        let policy = PollPolicy {
            interval: self.client.poll_interval(),
            timeout: req.timeout,
            sleep_first: false,
        };
        let details_request = &GetStorageDetailsRequest {
            uuid: req.uuid.clone(),
        };

        poll_until(
            ctx,
            policy,
            move || self.get_storage_details(ctx, details_request),
            |details| storage_state_verdict(details.storage.state, req.desired_state),
        )
        .await
    }

    /// Polls an import until it completes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ImportFailed`] when the import ends in `failed`,
    /// `cancelled` or `cancelling`. The error carries the last details and a
    /// [`ServiceError`](crate::api::ServiceError) built from the import's
    /// error code and message, or from the state name when those are empty.
    pub async fn wait_for_storage_import_completion(
        &self,
        ctx: &CancellationToken,
        req: &WaitForStorageImportCompletionRequest,
    ) -> Result<StorageImportDetails> {
        let policy = PollPolicy {
            interval: self.client.poll_interval(),
            timeout: req.timeout,
            sleep_first: false,
        };
        let details_request = &GetStorageImportDetailsRequest {
            uuid: req.storage_uuid.clone(),
        };

        poll_until(
            ctx,
            policy,
            move || self.get_storage_import_details(ctx, details_request),
            import_verdict,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::api::storage::{
        CreateStorageImportRequest, SourceLocation, StorageImportSource, StorageImportState,
        StorageState, WaitForStorageImportCompletionRequest, WaitForStorageStateRequest,
    };
    use crate::service::testing::service_for;
    use crate::Error;
    use mockito::Matcher;
    use serde_json::json;
    use tokio_util::sync::CancellationToken;

    #[tokio::test]
    async fn test_http_import_is_plain_create() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/storage/01bb/import")
            .match_body(Matcher::Json(json!({"storage_import": {
                "source": "http_import",
                "source_location": "https://example.com/disk.img"
            }})))
            .with_status(201)
            .with_body(r#"{"storage_import":{"uuid":"07a6","state":"pending","source":"http_import"}}"#)
            .create_async()
            .await;

        let service = service_for(&server);
        let details = service
            .create_storage_import(
                &CancellationToken::new(),
                CreateStorageImportRequest {
                    storage_uuid: "01bb".to_string(),
                    source: StorageImportSource::HttpImport,
                    source_location: SourceLocation::Path("https://example.com/disk.img".to_string()),
                    content_type: None,
                },
            )
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(details.state, StorageImportState::Pending);
    }

    #[tokio::test]
    async fn test_http_import_rejects_stream() {
        let server = mockito::Server::new_async().await;
        let service = service_for(&server);
        let err = service
            .create_storage_import(
                &CancellationToken::new(),
                CreateStorageImportRequest {
                    storage_uuid: "01bb".to_string(),
                    source: StorageImportSource::HttpImport,
                    source_location: SourceLocation::stream(tokio::io::empty()),
                    content_type: None,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "unsupported source location type");
    }

    #[tokio::test]
    async fn test_wait_for_import_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/storage/01bb/import")
            .with_status(200)
            .with_body(r#"{"storage_import":{"state":"running","read_bytes":10}}"#)
            .expect(1)
            .create_async()
            .await;
        server
            .mock("GET", "/storage/01bb/import")
            .with_status(200)
            .with_body(r#"{"storage_import":{"state":"failed","error_code":"ERR","error_message":"boom"}}"#)
            .create_async()
            .await;

        let service = service_for(&server);
        let req = WaitForStorageImportCompletionRequest {
            storage_uuid: "01bb".to_string(),
            timeout: Duration::from_secs(10),
        };
        let err = service
            .wait_for_storage_import_completion(&CancellationToken::new(), &req)
            .await
            .unwrap_err();

        match err {
            Error::ImportFailed { details, source } => {
                assert_eq!(source.code, "ERR");
                assert_eq!(source.message, "boom");
                assert_eq!(details.state, StorageImportState::Failed);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_wait_for_import_completion() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/storage/01bb/import")
            .with_status(200)
            .with_body(r#"{"storage_import":{"state":"completed","sha256sum":"fd80"}}"#)
            .create_async()
            .await;

        let service = service_for(&server);
        let req = WaitForStorageImportCompletionRequest {
            storage_uuid: "01bb".to_string(),
            timeout: Duration::from_secs(10),
        };
        let details = service
            .wait_for_storage_import_completion(&CancellationToken::new(), &req)
            .await
            .unwrap();
        assert_eq!(details.sha256sum, "fd80");
    }

    #[tokio::test]
    async fn test_wait_for_storage_state_fetches_first() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/storage/01bb")
            .with_status(200)
            .with_body(r#"{"storage":{"uuid":"01bb","state":"online"}}"#)
            .expect(1)
            .create_async()
            .await;

        // A long poll interval proves the first read is not delayed.
        let service = crate::Service::new(
            service_for(&server)
                .client()
                .clone()
                .with_poll_interval(Duration::from_secs(30)),
        );
        let req = WaitForStorageStateRequest {
            uuid: "01bb".to_string(),
            desired_state: StorageState::Online,
            timeout: Duration::from_secs(60),
        };
        let details = tokio::time::timeout(
            Duration::from_secs(5),
            service.wait_for_storage_state(&CancellationToken::new(), &req),
        )
        .await
        .unwrap()
        .unwrap();

        mock.assert_async().await;
        assert_eq!(details.storage.state, StorageState::Online);
    }

    #[tokio::test]
    async fn test_restore_backup_empty_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/storage/02cc/restore")
            .with_status(204)
            .create_async()
            .await;

        let service = service_for(&server);
        tokio_test::assert_ok!(
            service
                .restore_backup(
                    &CancellationToken::new(),
                    &crate::api::storage::RestoreBackupRequest {
                        uuid: "02cc".to_string()
                    },
                )
                .await
        );
        mock.assert_async().await;
    }
}
