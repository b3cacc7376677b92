//
//  upcloud-api
//  api/server.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Server API types and data structures.
//!
//! # Server Lifecycle
//!
//! ```text
//! maintenance -> started -> (stop) -> maintenance -> stopped
//!                        \-> (restart) -> maintenance -> started
//! ```
//!
//! A freshly created server may report its previous state for a short while
//! before it enters `maintenance`; see the wait loops in
//! [`crate::api::wait`].
//!
//! # Endpoints
//!
//! | Request | Method | Path |
//! |---------|--------|------|
//! | [`GetServerSizesRequest`] | GET | `/server_size` |
//! | [`GetServersRequest`] | GET | `/server` |
//! | [`GetServerDetailsRequest`] | GET | `/server/{uuid}` |
//! | [`CreateServerRequest`] | POST | `/server` |
//! | [`StartServerRequest`] | POST | `/server/{uuid}/start` |
//! | [`StopServerRequest`] | POST | `/server/{uuid}/stop` |
//! | [`RestartServerRequest`] | POST | `/server/{uuid}/restart` |
//! | [`ModifyServerRequest`] | PUT | `/server/{uuid}` |
//! | [`DeleteServerRequest`] | DELETE | `/server/{uuid}` |
//! | [`DeleteServerAndStoragesRequest`] | DELETE | `/server/{uuid}?storages=1` |

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::api::common::Boolean;
use crate::api::request::{envelope, Request};

/// Added to the server-side stop timeout to form the transport timeout.
pub const STOP_TIMEOUT_GRACE: Duration = Duration::from_secs(10);

/// Power state of a server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerState {
    Started,
    Stopped,
    Maintenance,
    Error,
    /// Any state this client does not know about.
    #[default]
    #[serde(other)]
    Unknown,
}

impl ServerState {
    /// The wire name of the state.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Started => "started",
            Self::Stopped => "stopped",
            Self::Maintenance => "maintenance",
            Self::Error => "error",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ServerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ServerState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "started" => Ok(Self::Started),
            "stopped" => Ok(Self::Stopped),
            "maintenance" => Ok(Self::Maintenance),
            "error" => Ok(Self::Error),
            other => Err(format!("unknown server state: {}", other)),
        }
    }
}

/// How a server is shut down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopType {
    /// ACPI shutdown, falling back to `hard` after the timeout.
    #[default]
    Soft,
    /// Immediate power off.
    Hard,
}

/// What a restart does when the soft stop times out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeoutAction {
    Destroy,
    Ignore,
}

/// Summary of a server as returned by list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Server {
    pub uuid: String,
    pub hostname: String,
    pub title: String,
    pub state: ServerState,
    pub zone: String,
    pub plan: String,
    /// Number of CPU cores; the API encodes it as a string.
    pub core_number: String,
    /// Memory in MiB; the API encodes it as a string.
    pub memory_amount: String,
    pub license: f64,
    pub tags: ServerTags,
}

/// `{"tag": [...]}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerTags {
    #[serde(default)]
    pub tag: Vec<String>,
}

/// A storage device attached to a server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerStorageDevice {
    pub address: String,
    #[serde(rename = "storage")]
    pub uuid: String,
    #[serde(rename = "storage_size")]
    pub size: u32,
    #[serde(rename = "storage_title")]
    pub title: String,
    #[serde(rename = "type")]
    pub device_type: String,
    #[serde(rename = "boot_disk")]
    pub boot_disk: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerStorageDevices {
    #[serde(default)]
    pub storage_device: Vec<ServerStorageDevice>,
}

/// An IP address assigned to a server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IpAddress {
    pub access: String,
    pub address: String,
    pub family: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpAddresses {
    #[serde(default)]
    pub ip_address: Vec<IpAddress>,
}

/// Full server description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerDetails {
    #[serde(flatten)]
    pub server: Server,
    pub boot_order: String,
    pub firewall: String,
    pub host: i64,
    pub nic_model: String,
    pub timezone: String,
    pub video_model: String,
    pub metadata: Boolean,
    pub storage_devices: ServerStorageDevices,
    pub ip_addresses: IpAddresses,
}

/// `{"server": {...}}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerDetailsEnvelope {
    pub server: ServerDetails,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerList {
    #[serde(default)]
    pub server: Vec<Server>,
}

/// `{"servers": {"server": [...]}}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServersEnvelope {
    pub servers: ServerList,
}

/// A CPU/memory combination available for custom plans.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSize {
    pub core_number: String,
    pub memory_amount: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerSizeList {
    #[serde(default)]
    pub server_size: Vec<ServerSize>,
}

/// `{"server_sizes": {"server_size": [...]}}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerSizesEnvelope {
    pub server_sizes: ServerSizeList,
}

/// Lists available server sizes.
#[derive(Debug, Clone, Copy, Default)]
pub struct GetServerSizesRequest;

impl Request for GetServerSizesRequest {
    fn request_url(&self) -> String {
        "/server_size".to_string()
    }
}

/// Lists all servers of the account.
#[derive(Debug, Clone, Copy, Default)]
pub struct GetServersRequest;

impl Request for GetServersRequest {
    fn request_url(&self) -> String {
        "/server".to_string()
    }
}

/// Fetches one server.
#[derive(Debug, Clone, Default)]
pub struct GetServerDetailsRequest {
    pub uuid: String,
}

impl Request for GetServerDetailsRequest {
    fn request_url(&self) -> String {
        format!("/server/{}", self.uuid)
    }
}

/// A storage device to create or attach together with a new server.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateServerStorageDevice {
    /// `create`, `clone` or `attach`.
    pub action: String,
    /// Source storage UUID for `clone` and `attach`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub storage: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub device_type: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateServerStorageDevices {
    pub storage_device: Vec<CreateServerStorageDevice>,
}

/// Creates a server.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateServerRequest {
    pub zone: String,
    pub title: String,
    pub hostname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub core_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_amount: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_delivery: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Boolean>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_data: Option<String>,
    pub storage_devices: CreateServerStorageDevices,
}

impl Request for CreateServerRequest {
    fn request_url(&self) -> String {
        "/server".to_string()
    }

    fn request_body(&self) -> serde_json::Result<Option<serde_json::Value>> {
        envelope("server", self)
    }
}

/// Starts a stopped server.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StartServerRequest {
    #[serde(skip)]
    pub uuid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avoid_host: Option<i64>,
    /// Transport timeout for the call; the API blocks until the server starts.
    #[serde(skip)]
    pub timeout: Option<Duration>,
}

impl Request for StartServerRequest {
    fn request_url(&self) -> String {
        format!("/server/{}/start", self.uuid)
    }

    fn request_body(&self) -> serde_json::Result<Option<serde_json::Value>> {
        envelope("server", self)
    }

    fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

/// Stops a running server.
///
/// With `timeout` set, the API waits that long for a soft stop before it
/// answers, so the transport timeout becomes `timeout` + [`STOP_TIMEOUT_GRACE`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct StopServerRequest {
    #[serde(skip)]
    pub uuid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_type: Option<StopType>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "seconds")]
    pub timeout: Option<Duration>,
}

impl Request for StopServerRequest {
    fn request_url(&self) -> String {
        format!("/server/{}/stop", self.uuid)
    }

    fn request_body(&self) -> serde_json::Result<Option<serde_json::Value>> {
        envelope("stop_server", self)
    }

    fn timeout(&self) -> Option<Duration> {
        self.timeout.map(|t| t + STOP_TIMEOUT_GRACE)
    }
}

/// Restarts a running server.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RestartServerRequest {
    #[serde(skip)]
    pub uuid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_type: Option<StopType>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "seconds")]
    pub timeout: Option<Duration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_action: Option<TimeoutAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<i64>,
}

impl Request for RestartServerRequest {
    fn request_url(&self) -> String {
        format!("/server/{}/restart", self.uuid)
    }

    fn request_body(&self) -> serde_json::Result<Option<serde_json::Value>> {
        envelope("restart_server", self)
    }

    fn timeout(&self) -> Option<Duration> {
        self.timeout.map(|t| t + STOP_TIMEOUT_GRACE)
    }
}

/// The API takes timeouts as a string of whole seconds.
fn seconds<S: serde::Serializer>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(d) => serializer.serialize_str(&d.as_secs().to_string()),
        None => serializer.serialize_none(),
    }
}

/// Changes server properties; unset fields are left as they are.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ModifyServerRequest {
    #[serde(skip)]
    pub uuid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub core_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_amount: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Boolean>,
}

impl Request for ModifyServerRequest {
    fn request_url(&self) -> String {
        format!("/server/{}", self.uuid)
    }

    fn request_body(&self) -> serde_json::Result<Option<serde_json::Value>> {
        envelope("server", self)
    }
}

/// Deletes a server, keeping its storages.
#[derive(Debug, Clone, Default)]
pub struct DeleteServerRequest {
    pub uuid: String,
}

impl Request for DeleteServerRequest {
    fn request_url(&self) -> String {
        format!("/server/{}", self.uuid)
    }
}

/// What happens to backups when storages are deleted with their server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteBackups {
    Keep,
    KeepLatest,
    Delete,
}

impl DeleteBackups {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Keep => "keep",
            Self::KeepLatest => "keep_latest",
            Self::Delete => "delete",
        }
    }
}

/// Deletes a server together with its attached storages.
#[derive(Debug, Clone, Default)]
pub struct DeleteServerAndStoragesRequest {
    pub uuid: String,
    pub backups: Option<DeleteBackups>,
}

impl Request for DeleteServerAndStoragesRequest {
    fn request_url(&self) -> String {
        match self.backups {
            Some(backups) => format!(
                "/server/{}?storages=1&backups={}",
                self.uuid,
                backups.as_str()
            ),
            None => format!("/server/{}?storages=1", self.uuid),
        }
    }
}

/// Input of the server state wait loop.
///
/// The loop finishes when the server reaches `desired_state`, or leaves
/// `undesired_state`; at least one of them must be set.
#[derive(Debug, Clone)]
pub struct WaitForServerStateRequest {
    pub uuid: String,
    pub desired_state: Option<ServerState>,
    pub undesired_state: Option<ServerState>,
    pub timeout: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stop_server_body_and_timeout() {
        let req = StopServerRequest {
            uuid: "00af".to_string(),
            stop_type: Some(StopType::Soft),
            timeout: Some(Duration::from_secs(15 * 60)),
        };
        assert_eq!(req.request_url(), "/server/00af/stop");
        assert_eq!(
            req.request_body().unwrap().unwrap(),
            json!({"stop_server": {"stop_type": "soft", "timeout": "900"}})
        );
        assert_eq!(
            Request::timeout(&req),
            Some(Duration::from_secs(15 * 60 + 10))
        );
    }

    #[test]
    fn test_stop_server_without_timeout() {
        let req = StopServerRequest {
            uuid: "00af".to_string(),
            stop_type: Some(StopType::Hard),
            timeout: None,
        };
        assert_eq!(
            req.request_body().unwrap().unwrap(),
            json!({"stop_server": {"stop_type": "hard"}})
        );
        assert_eq!(Request::timeout(&req), None);
    }

    #[test]
    fn test_restart_server_body() {
        let req = RestartServerRequest {
            uuid: "00af".to_string(),
            stop_type: Some(StopType::Soft),
            timeout: Some(Duration::from_secs(60)),
            timeout_action: Some(TimeoutAction::Destroy),
            host: None,
        };
        assert_eq!(req.request_url(), "/server/00af/restart");
        assert_eq!(
            req.request_body().unwrap().unwrap(),
            json!({"restart_server": {"stop_type": "soft", "timeout": "60", "timeout_action": "destroy"}})
        );
        assert_eq!(Request::timeout(&req), Some(Duration::from_secs(70)));
    }

    #[test]
    fn test_delete_with_storages_url() {
        let req = DeleteServerAndStoragesRequest {
            uuid: "00af".to_string(),
            backups: None,
        };
        assert_eq!(req.request_url(), "/server/00af?storages=1");
        let req = DeleteServerAndStoragesRequest {
            uuid: "00af".to_string(),
            backups: Some(DeleteBackups::KeepLatest),
        };
        assert_eq!(req.request_url(), "/server/00af?storages=1&backups=keep_latest");
    }

    #[test]
    fn test_decode_server_details() {
        let body = r#"{"server":{
            "uuid":"00af","hostname":"web","title":"Web","state":"started",
            "zone":"fi-hel1","plan":"1xCPU-1GB","core_number":"1","memory_amount":"1024",
            "tags":{"tag":["PROD"]},"metadata":"yes","host":7,
            "storage_devices":{"storage_device":[{"address":"virtio:0","storage":"01aa",
                "storage_size":25,"storage_title":"disk","type":"disk","boot_disk":"1"}]},
            "ip_addresses":{"ip_address":[{"access":"public","address":"1.2.3.4","family":"IPv4"}]},
            "something_new":{"a":1}}}"#;
        let envelope: ServerDetailsEnvelope = serde_json::from_str(body).unwrap();
        let details = envelope.server;
        assert_eq!(details.server.state, ServerState::Started);
        assert_eq!(details.server.tags.tag, vec!["PROD".to_string()]);
        assert!(details.metadata.0);
        assert_eq!(details.storage_devices.storage_device[0].uuid, "01aa");
        assert_eq!(details.ip_addresses.ip_address[0].address, "1.2.3.4");
    }

    #[test]
    fn test_unknown_server_state() {
        let server: Server = serde_json::from_str(r#"{"state":"hibernating"}"#).unwrap();
        assert_eq!(server.state, ServerState::Unknown);
        assert_eq!("stopped".parse::<ServerState>().unwrap(), ServerState::Stopped);
        assert!("sleepy".parse::<ServerState>().is_err());
    }

    #[test]
    fn test_create_server_body() {
        let req = CreateServerRequest {
            zone: "fi-hel1".to_string(),
            title: "t".to_string(),
            hostname: "h".to_string(),
            plan: Some("1xCPU-1GB".to_string()),
            metadata: Some(Boolean(true)),
            storage_devices: CreateServerStorageDevices {
                storage_device: vec![CreateServerStorageDevice {
                    action: "clone".to_string(),
                    storage: "01000000-0000-4000-8000-000030220200".to_string(),
                    title: "disk1".to_string(),
                    size: Some(10),
                    tier: Some("maxiops".to_string()),
                    device_type: None,
                }],
            },
            ..Default::default()
        };
        let body = req.request_body().unwrap().unwrap();
        assert_eq!(body["server"]["metadata"], "yes");
        assert_eq!(body["server"]["storage_devices"]["storage_device"][0]["action"], "clone");
        assert!(body["server"].get("core_number").is_none());
    }
}
