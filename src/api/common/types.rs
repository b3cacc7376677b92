//
//  upcloud-api
//  api/common/types.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Small wire types shared by several resource modules.
//!
//! The UpCloud API encodes flags as `"yes"`/`"no"` strings and wraps lists in
//! a single-key object named after the element (`{"server": ["uuid", ...]}`).

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

/// A flag encoded as `"yes"` or `"no"` on the wire.
///
/// Decoding also accepts JSON booleans, `0`/`1`, and `"true"`/`"false"`,
/// since different endpoints are not consistent.
///
/// # Example
///
/// ```rust
/// use upcloud_api::api::common::Boolean;
///
/// assert_eq!(serde_json::to_string(&Boolean(true)).unwrap(), r#""yes""#);
/// let flag: Boolean = serde_json::from_str("0").unwrap();
/// assert!(!flag.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Boolean(pub bool);

impl From<bool> for Boolean {
    fn from(value: bool) -> Self {
        Self(value)
    }
}

impl Serialize for Boolean {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if self.0 { "yes" } else { "no" })
    }
}

impl<'de> Deserialize<'de> for Boolean {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Bool(bool),
            Int(i64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Bool(b) => Ok(Self(b)),
            Raw::Int(i) => Ok(Self(i != 0)),
            Raw::Text(s) => match s.to_ascii_lowercase().as_str() {
                "yes" | "true" | "1" => Ok(Self(true)),
                "no" | "false" | "0" | "" => Ok(Self(false)),
                other => Err(de::Error::custom(format!("invalid boolean value: {}", other))),
            },
        }
    }
}

/// A list of server UUIDs, `{"server": [...]}` on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerUuids {
    #[serde(default)]
    pub server: Vec<String>,
}

impl From<Vec<String>> for ServerUuids {
    fn from(server: Vec<String>) -> Self {
        Self { server }
    }
}

/// A list of role names, `{"role": [...]}` on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roles {
    #[serde(default)]
    pub role: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boolean_round_trip() {
        assert_eq!(serde_json::to_string(&Boolean(false)).unwrap(), r#""no""#);
        let yes: Boolean = serde_json::from_str(r#""yes""#).unwrap();
        assert!(yes.0);
        let t: Boolean = serde_json::from_str("true").unwrap();
        assert!(t.0);
        let one: Boolean = serde_json::from_str("1").unwrap();
        assert!(one.0);
    }

    #[test]
    fn test_boolean_rejects_garbage() {
        assert!(serde_json::from_str::<Boolean>(r#""maybe""#).is_err());
    }

    #[test]
    fn test_server_uuids_shape() {
        let list = ServerUuids::from(vec!["a".to_string()]);
        assert_eq!(
            serde_json::to_value(&list).unwrap(),
            serde_json::json!({"server": ["a"]})
        );
        let empty: ServerUuids = serde_json::from_str("{}").unwrap();
        assert!(empty.server.is_empty());
    }
}
