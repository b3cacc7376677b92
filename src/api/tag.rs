//
//  upcloud-api
//  api/tag.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Server tag API types.
//!
//! Tags are account-wide labels; assigning them to servers goes through the
//! server endpoints and answers with the updated server details.

use serde::{Deserialize, Serialize};

use crate::api::common::ServerUuids;
use crate::api::request::{envelope, Request};

/// A tag and the servers carrying it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub servers: ServerUuids,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagList {
    #[serde(default)]
    pub tag: Vec<Tag>,
}

/// `{"tags": {"tag": [...]}}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagsEnvelope {
    pub tags: TagList,
}

/// `{"tag": {...}}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagEnvelope {
    pub tag: Tag,
}

/// Lists all tags of the account.
#[derive(Debug, Clone, Copy, Default)]
pub struct GetTagsRequest;

impl Request for GetTagsRequest {
    fn request_url(&self) -> String {
        "/tag".to_string()
    }
}

/// Creates a tag, optionally assigning it to servers.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateTagRequest {
    pub tag: Tag,
}

impl Request for CreateTagRequest {
    fn request_url(&self) -> String {
        "/tag".to_string()
    }

    fn request_body(&self) -> serde_json::Result<Option<serde_json::Value>> {
        envelope("tag", &self.tag)
    }
}

/// Renames or redescribes a tag, or replaces its server list.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ModifyTagRequest {
    /// Current name of the tag.
    #[serde(skip)]
    pub name: String,
    pub tag: Tag,
}

impl Request for ModifyTagRequest {
    fn request_url(&self) -> String {
        format!("/tag/{}", self.name)
    }

    fn request_body(&self) -> serde_json::Result<Option<serde_json::Value>> {
        envelope("tag", &self.tag)
    }
}

/// Deletes a tag.
#[derive(Debug, Clone, Default)]
pub struct DeleteTagRequest {
    pub name: String,
}

impl Request for DeleteTagRequest {
    fn request_url(&self) -> String {
        format!("/tag/{}", self.name)
    }
}

/// Assigns tags to a server.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TagServerRequest {
    #[serde(skip)]
    pub uuid: String,
    #[serde(skip)]
    pub tags: Vec<String>,
}

impl Request for TagServerRequest {
    fn request_url(&self) -> String {
        format!("/server/{}/tag/{}", self.uuid, self.tags.join(","))
    }
}

/// Removes tags from a server.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UntagServerRequest {
    #[serde(skip)]
    pub uuid: String,
    #[serde(skip)]
    pub tags: Vec<String>,
}

impl Request for UntagServerRequest {
    fn request_url(&self) -> String {
        format!("/server/{}/untag/{}", self.uuid, self.tags.join(","))
    }
}
