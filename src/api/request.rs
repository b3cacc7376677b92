//
//  upcloud-api
//  api/request.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! The request capability set shared by every API operation.
//!
//! Every operation is described by a small value type implementing [`Request`].
//! The value knows its path (including ids and query string) and, optionally,
//! the JSON body to send. The HTTP verb is chosen by the dispatcher method the
//! caller invokes, never by the request itself.
//!
//! # Example
//!
//! ```rust
//! use serde::Serialize;
//! use upcloud_api::api::request::{envelope, Request};
//!
//! struct GetServerDetails {
//!     uuid: String,
//! }
//!
//! impl Request for GetServerDetails {
//!     fn request_url(&self) -> String {
//!         format!("/server/{}", self.uuid)
//!     }
//! }
//!
//! #[derive(Serialize)]
//! struct RenameServer {
//!     #[serde(skip)]
//!     uuid: String,
//!     hostname: String,
//! }
//!
//! impl Request for RenameServer {
//!     fn request_url(&self) -> String {
//!         format!("/server/{}", self.uuid)
//!     }
//!
//!     fn request_body(&self) -> serde_json::Result<Option<serde_json::Value>> {
//!         envelope("server", self)
//!     }
//! }
//!
//! let req = RenameServer { uuid: "0011".into(), hostname: "web-1".into() };
//! let body = req.request_body().unwrap().unwrap();
//! assert_eq!(body["server"]["hostname"], "web-1");
//! assert!(body["server"].get("uuid").is_none());
//! ```

use std::time::Duration;

use serde::Serialize;
use serde_json::{Map, Value};

/// A typed description of one API operation.
pub trait Request {
    /// Path component of the URL, relative to the API base URL.
    ///
    /// Always starts with `/` and includes any resource ids and query string.
    fn request_url(&self) -> String;

    /// JSON payload for mutating verbs.
    ///
    /// `None` means the request value itself is marshalled as the payload.
    fn request_body(&self) -> serde_json::Result<Option<Value>> {
        Ok(None)
    }

    /// Per-request transport timeout; `None` uses the client default.
    fn timeout(&self) -> Option<Duration> {
        None
    }
}

/// Wraps `payload` as `{key: payload}`.
pub fn envelope<T: Serialize + ?Sized>(key: &str, payload: &T) -> serde_json::Result<Option<Value>> {
    let mut map = Map::new();
    map.insert(key.to_string(), serde_json::to_value(payload)?);
    Ok(Some(Value::Object(map)))
}

/// Serializes the body for a mutating verb.
pub(crate) fn marshal<R: Request + Serialize + ?Sized>(req: &R) -> serde_json::Result<Vec<u8>> {
    match req.request_body()? {
        Some(body) => serde_json::to_vec(&body),
        None => serde_json::to_vec(req),
    }
}
