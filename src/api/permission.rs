//
//  upcloud-api
//  api/permission.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Sub-account permission API types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::request::{envelope, Request};

/// Access granted to a sub-account on one resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Permission {
    /// Target-specific options, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub permission: String,
    pub target_identifier: String,
    /// `server`, `storage`, `network`, ...
    pub target_type: String,
    /// The sub-account username.
    pub user: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PermissionList {
    #[serde(default)]
    pub permission: Vec<Permission>,
}

/// `{"permissions": {"permission": [...]}}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PermissionsEnvelope {
    pub permissions: PermissionList,
}

/// `{"permission": {...}}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PermissionEnvelope {
    pub permission: Permission,
}

/// Lists every permission granted to sub-accounts.
#[derive(Debug, Clone, Copy, Default)]
pub struct GetPermissionsRequest;

impl Request for GetPermissionsRequest {
    fn request_url(&self) -> String {
        "/permission".to_string()
    }
}

/// Grants a sub-account access to a resource.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GrantPermissionRequest {
    pub permission: Permission,
}

impl Request for GrantPermissionRequest {
    fn request_url(&self) -> String {
        "/permission/grant".to_string()
    }

    fn request_body(&self) -> serde_json::Result<Option<Value>> {
        envelope("permission", &self.permission)
    }
}

/// Revokes a previously granted permission.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RevokePermissionRequest {
    pub permission: Permission,
}

impl Request for RevokePermissionRequest {
    fn request_url(&self) -> String {
        "/permission/revoke".to_string()
    }

    fn request_body(&self) -> serde_json::Result<Option<Value>> {
        envelope("permission", &self.permission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_grant_body_skips_empty_fields() {
        let req = GrantPermissionRequest {
            permission: Permission {
                target_identifier: "00af".to_string(),
                target_type: "server".to_string(),
                user: "helper".to_string(),
                ..Default::default()
            },
        };
        assert_eq!(req.request_url(), "/permission/grant");
        assert_eq!(
            req.request_body().unwrap().unwrap(),
            json!({"permission": {"target_identifier": "00af", "target_type": "server", "user": "helper"}})
        );
    }

    #[test]
    fn test_decode_permissions() {
        let body = r#"{"permissions":{"permission":[{"options":{"storage":"yes"},
            "permission":"server","target_identifier":"00af","target_type":"server","user":"helper"}]}}"#;
        let envelope: PermissionsEnvelope = serde_json::from_str(body).unwrap();
        let permission = &envelope.permissions.permission[0];
        assert_eq!(permission.user, "helper");
        assert_eq!(permission.options, Some(json!({"storage": "yes"})));
    }
}
