//
//  upcloud-api
//  api/storage.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Storage API types and data structures.
//!
//! Covers block storages, their backups, attaching them to servers, and
//! storage imports (HTTP import and direct upload).
//!
//! # Storage Import Lifecycle
//!
//! ```text
//! pending -> preparing -> running -> completed
//!                     \-> cancelling -> cancelled
//!                     \-> failed
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use upcloud_api::api::storage::{
//!     CreateStorageImportRequest, SourceLocation, StorageImportSource,
//! };
//!
//! // Upload a local gzip image straight to the storage
//! let request = CreateStorageImportRequest {
//!     storage_uuid: "01d4fcd4-e446-433b-8a9c-551a1284952e".to_string(),
//!     source: StorageImportSource::DirectUpload,
//!     source_location: SourceLocation::Path("/tmp/disk.img.gz".to_string()),
//!     content_type: Some("application/gzip".to_string()),
//! };
//! ```

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize, Serializer};
use tokio::io::AsyncRead;

use crate::api::common::ServerUuids;
use crate::api::request::{envelope, Request};

/// Operational state of a storage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageState {
    Online,
    Maintenance,
    Cloning,
    Backuping,
    Syncing,
    Error,
    #[default]
    #[serde(other)]
    Unknown,
}

impl StorageState {
    /// The wire name of the state.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Maintenance => "maintenance",
            Self::Cloning => "cloning",
            Self::Backuping => "backuping",
            Self::Syncing => "syncing",
            Self::Error => "error",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for StorageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StorageState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "online" => Ok(Self::Online),
            "maintenance" => Ok(Self::Maintenance),
            "cloning" => Ok(Self::Cloning),
            "backuping" => Ok(Self::Backuping),
            "syncing" => Ok(Self::Syncing),
            "error" => Ok(Self::Error),
            other => Err(format!("unknown storage state: {}", other)),
        }
    }
}

/// Summary of a storage as returned by list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Storage {
    pub uuid: String,
    pub title: String,
    /// `public` or `private`.
    pub access: String,
    pub state: StorageState,
    /// Size in GiB.
    pub size: u32,
    /// `normal`, `backup`, `cdrom` or `template`.
    #[serde(rename = "type")]
    pub storage_type: String,
    pub tier: String,
    pub zone: String,
    pub license: f64,
    pub origin: String,
    pub created: String,
}

/// `{"backup": [...]}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupUuids {
    #[serde(default)]
    pub backup: Vec<String>,
}

/// Scheduled backup settings of a storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupRule {
    /// `daily`, `mon`, `tue`, ... `sun`.
    pub interval: String,
    /// `hhmm`, e.g. `0430`.
    pub time: String,
    /// Days to keep each backup.
    pub retention: u32,
}

/// Full storage description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageDetails {
    #[serde(flatten)]
    pub storage: Storage,
    pub backups: BackupUuids,
    pub servers: ServerUuids,
    pub backup_rule: Option<BackupRule>,
}

/// `{"storage": {...}}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageDetailsEnvelope {
    pub storage: StorageDetails,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageList {
    #[serde(default)]
    pub storage: Vec<Storage>,
}

/// `{"storages": {"storage": [...]}}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoragesEnvelope {
    pub storages: StorageList,
}

/// Restricts a storage listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageFilter {
    Public,
    Private,
    Normal,
    Backup,
    Cdrom,
    Template,
    Favorite,
}

impl StorageFilter {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
            Self::Normal => "normal",
            Self::Backup => "backup",
            Self::Cdrom => "cdrom",
            Self::Template => "template",
            Self::Favorite => "favorite",
        }
    }
}

/// Lists storages, optionally filtered by access or type.
#[derive(Debug, Clone, Default)]
pub struct GetStoragesRequest {
    pub filter: Option<StorageFilter>,
}

impl Request for GetStoragesRequest {
    fn request_url(&self) -> String {
        match self.filter {
            Some(filter) => format!("/storage/{}", filter.as_str()),
            None => "/storage".to_string(),
        }
    }
}

/// Fetches one storage.
#[derive(Debug, Clone, Default)]
pub struct GetStorageDetailsRequest {
    pub uuid: String,
}

impl Request for GetStorageDetailsRequest {
    fn request_url(&self) -> String {
        format!("/storage/{}", self.uuid)
    }
}

/// Creates an empty storage.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateStorageRequest {
    pub size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
    pub title: String,
    pub zone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_rule: Option<BackupRule>,
}

impl Request for CreateStorageRequest {
    fn request_url(&self) -> String {
        "/storage".to_string()
    }

    fn request_body(&self) -> serde_json::Result<Option<serde_json::Value>> {
        envelope("storage", self)
    }
}

/// Changes storage properties; unset fields are left as they are.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ModifyStorageRequest {
    #[serde(skip)]
    pub uuid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_rule: Option<BackupRule>,
}

impl Request for ModifyStorageRequest {
    fn request_url(&self) -> String {
        format!("/storage/{}", self.uuid)
    }

    fn request_body(&self) -> serde_json::Result<Option<serde_json::Value>> {
        envelope("storage", self)
    }
}

/// Deletes a storage.
#[derive(Debug, Clone, Default)]
pub struct DeleteStorageRequest {
    pub uuid: String,
}

impl Request for DeleteStorageRequest {
    fn request_url(&self) -> String {
        format!("/storage/{}", self.uuid)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
struct StorageDevicePayload<'a> {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    device_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    address: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    storage: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    boot_disk: Option<&'a str>,
}

/// Attaches a storage to a server.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AttachStorageRequest {
    pub server_uuid: String,
    pub storage_uuid: String,
    /// `disk` or `cdrom`.
    pub device_type: Option<String>,
    /// Bus address such as `virtio:1`; chosen by the API when unset.
    pub address: Option<String>,
    pub boot_disk: bool,
}

impl Request for AttachStorageRequest {
    fn request_url(&self) -> String {
        format!("/server/{}/storage/attach", self.server_uuid)
    }

    fn request_body(&self) -> serde_json::Result<Option<serde_json::Value>> {
        let payload = StorageDevicePayload {
            device_type: self.device_type.as_deref(),
            address: self.address.as_deref(),
            storage: Some(&self.storage_uuid),
            boot_disk: self.boot_disk.then_some("1"),
        };
        envelope("storage_device", &payload)
    }
}

/// Detaches the storage at `address` from a server.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DetachStorageRequest {
    pub server_uuid: String,
    pub address: String,
}

impl Request for DetachStorageRequest {
    fn request_url(&self) -> String {
        format!("/server/{}/storage/detach", self.server_uuid)
    }

    fn request_body(&self) -> serde_json::Result<Option<serde_json::Value>> {
        let payload = StorageDevicePayload {
            address: Some(&self.address),
            ..Default::default()
        };
        envelope("storage_device", &payload)
    }
}

/// Clones a storage, possibly into another zone.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CloneStorageRequest {
    #[serde(skip)]
    pub uuid: String,
    pub zone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
    pub title: String,
}

impl Request for CloneStorageRequest {
    fn request_url(&self) -> String {
        format!("/storage/{}/clone", self.uuid)
    }

    fn request_body(&self) -> serde_json::Result<Option<serde_json::Value>> {
        envelope("storage", self)
    }
}

/// Takes an on-demand backup of a storage.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateBackupRequest {
    #[serde(skip)]
    pub uuid: String,
    pub title: String,
}

impl Request for CreateBackupRequest {
    fn request_url(&self) -> String {
        format!("/storage/{}/backup", self.uuid)
    }

    fn request_body(&self) -> serde_json::Result<Option<serde_json::Value>> {
        envelope("storage", self)
    }
}

/// Restores a backup onto its origin storage.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RestoreBackupRequest {
    #[serde(skip)]
    pub uuid: String,
}

impl Request for RestoreBackupRequest {
    fn request_url(&self) -> String {
        format!("/storage/{}/restore", self.uuid)
    }
}

/// Grows the partition and filesystem of a storage to its full size.
///
/// The API takes a backup first and returns it.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResizeStorageFilesystemRequest {
    #[serde(skip)]
    pub uuid: String,
}

impl Request for ResizeStorageFilesystemRequest {
    fn request_url(&self) -> String {
        format!("/storage/{}/resize", self.uuid)
    }
}

/// The safety backup taken by a filesystem resize.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResizeStorageFilesystemBackup {
    pub uuid: String,
    pub title: String,
    pub origin: String,
    pub created: String,
}

/// `{"resize_backup": {...}}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResizeBackupEnvelope {
    pub resize_backup: ResizeStorageFilesystemBackup,
}

/// Where an import reads its data from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageImportSource {
    /// The API downloads `source_location` itself.
    #[default]
    HttpImport,
    /// The client streams the data to a pre-signed URL.
    DirectUpload,
}

/// Source of a storage import.
///
/// `Path` holds a URL for [`StorageImportSource::HttpImport`] and a local file
/// path for [`StorageImportSource::DirectUpload`]. `Stream` is only valid for
/// direct uploads and is consumed by the upload.
#[derive(Default)]
pub enum SourceLocation {
    #[default]
    None,
    Path(String),
    Stream(Box<dyn AsyncRead + Send + Sync + Unpin>),
}

impl SourceLocation {
    /// Wraps any async reader as an upload source.
    pub fn stream<R: AsyncRead + Send + Sync + Unpin + 'static>(reader: R) -> Self {
        Self::Stream(Box::new(reader))
    }
}

impl fmt::Debug for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Path(path) => f.debug_tuple("Path").field(path).finish(),
            Self::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

/// Only `Path` has a wire form; everything else is sent as `""`.
impl Serialize for SourceLocation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Path(path) => serializer.serialize_str(path),
            Self::None | Self::Stream(_) => serializer.serialize_str(""),
        }
    }
}

/// Starts an import into an existing storage.
#[derive(Debug, Default, Serialize)]
pub struct CreateStorageImportRequest {
    #[serde(skip)]
    pub storage_uuid: String,
    pub source: StorageImportSource,
    pub source_location: SourceLocation,
    /// Content type of the uploaded bytes (direct upload only).
    #[serde(skip)]
    pub content_type: Option<String>,
}

impl Request for CreateStorageImportRequest {
    fn request_url(&self) -> String {
        format!("/storage/{}/import", self.storage_uuid)
    }

    fn request_body(&self) -> serde_json::Result<Option<serde_json::Value>> {
        envelope("storage_import", self)
    }
}

/// Fetches the state of the current import of a storage.
#[derive(Debug, Clone, Default)]
pub struct GetStorageImportDetailsRequest {
    pub uuid: String,
}

impl Request for GetStorageImportDetailsRequest {
    fn request_url(&self) -> String {
        format!("/storage/{}/import", self.uuid)
    }
}

/// Cancels a running import.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CancelStorageImportRequest {
    #[serde(skip)]
    pub uuid: String,
}

impl Request for CancelStorageImportRequest {
    fn request_url(&self) -> String {
        format!("/storage/{}/import/cancel", self.uuid)
    }
}

/// State of a storage import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageImportState {
    Pending,
    Preparing,
    Running,
    Completed,
    Cancelling,
    Cancelled,
    Failed,
    #[default]
    #[serde(other)]
    Unknown,
}

impl StorageImportState {
    /// The wire name of the state.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Preparing => "preparing",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Cancelling => "cancelling",
            Self::Cancelled => "cancelled",
            Self::Failed => "failed",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for StorageImportState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress and outcome of a storage import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageImportDetails {
    pub uuid: String,
    pub state: StorageImportState,
    pub source: String,
    pub source_location: String,
    pub client_content_type: String,
    pub client_content_length: u64,
    pub completed: String,
    pub created: String,
    /// Pre-signed upload target, only present for direct uploads.
    pub direct_upload_url: String,
    pub error_code: String,
    pub error_message: String,
    pub md5sum: String,
    pub read_bytes: u64,
    pub sha256sum: String,
    pub written_bytes: u64,
}

/// `{"storage_import": {...}}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageImportEnvelope {
    pub storage_import: StorageImportDetails,
}

/// Input of the storage state wait loop.
#[derive(Debug, Clone)]
pub struct WaitForStorageStateRequest {
    pub uuid: String,
    pub desired_state: StorageState,
    pub timeout: Duration,
}

/// Input of the import completion wait loop.
#[derive(Debug, Clone)]
pub struct WaitForStorageImportCompletionRequest {
    pub storage_uuid: String,
    pub timeout: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_storage_list_urls() {
        assert_eq!(GetStoragesRequest::default().request_url(), "/storage");
        let req = GetStoragesRequest {
            filter: Some(StorageFilter::Template),
        };
        assert_eq!(req.request_url(), "/storage/template");
    }

    #[test]
    fn test_attach_storage_body() {
        let req = AttachStorageRequest {
            server_uuid: "00af".to_string(),
            storage_uuid: "01bb".to_string(),
            device_type: Some("disk".to_string()),
            address: Some("virtio:1".to_string()),
            boot_disk: false,
        };
        assert_eq!(req.request_url(), "/server/00af/storage/attach");
        assert_eq!(
            req.request_body().unwrap().unwrap(),
            json!({"storage_device": {"type": "disk", "address": "virtio:1", "storage": "01bb"}})
        );
    }

    #[test]
    fn test_detach_storage_body() {
        let req = DetachStorageRequest {
            server_uuid: "00af".to_string(),
            address: "virtio:1".to_string(),
        };
        assert_eq!(
            req.request_body().unwrap().unwrap(),
            json!({"storage_device": {"address": "virtio:1"}})
        );
    }

    #[test]
    fn test_http_import_body() {
        let req = CreateStorageImportRequest {
            storage_uuid: "01bb".to_string(),
            source: StorageImportSource::HttpImport,
            source_location: SourceLocation::Path("https://example.com/disk.img".to_string()),
            content_type: None,
        };
        assert_eq!(req.request_url(), "/storage/01bb/import");
        assert_eq!(
            req.request_body().unwrap().unwrap(),
            json!({"storage_import": {"source": "http_import", "source_location": "https://example.com/disk.img"}})
        );
    }

    #[test]
    fn test_stream_source_serializes_blank() {
        let req = CreateStorageImportRequest {
            storage_uuid: "01bb".to_string(),
            source: StorageImportSource::DirectUpload,
            source_location: SourceLocation::stream(tokio::io::empty()),
            content_type: None,
        };
        assert_eq!(
            req.request_body().unwrap().unwrap(),
            json!({"storage_import": {"source": "direct_upload", "source_location": ""}})
        );
        assert_eq!(format!("{:?}", req.source_location), "Stream(..)");
    }

    #[test]
    fn test_decode_import_details() {
        let body = r#"{"storage_import":{"uuid":"07a6","state":"completed",
            "source":"direct_upload","client_content_type":"application/gzip",
            "sha256sum":"fd80","read_bytes":1024,"written_bytes":4096,"future_field":true}}"#;
        let envelope: StorageImportEnvelope = serde_json::from_str(body).unwrap();
        let details = envelope.storage_import;
        assert_eq!(details.state, StorageImportState::Completed);
        assert_eq!(details.sha256sum, "fd80");
        assert_eq!(details.written_bytes, 4096);
        assert!(details.direct_upload_url.is_empty());
    }

    #[test]
    fn test_decode_storage_details() {
        let body = r#"{"storage":{"uuid":"01bb","title":"disk","access":"private",
            "state":"online","size":10,"type":"normal","tier":"maxiops","zone":"fi-hel1",
            "backups":{"backup":["02cc"]},"servers":{"server":["00af"]},
            "backup_rule":{"interval":"daily","time":"0430","retention":7}}}"#;
        let envelope: StorageDetailsEnvelope = serde_json::from_str(body).unwrap();
        let details = envelope.storage;
        assert_eq!(details.storage.state, StorageState::Online);
        assert_eq!(details.storage.storage_type, "normal");
        assert_eq!(details.servers.server, vec!["00af".to_string()]);
        assert_eq!(details.backup_rule.unwrap().retention, 7);
    }
}
