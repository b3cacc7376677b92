//
//  upcloud-api
//  api/account.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Account and sub-account API types.
//!
//! # Endpoints
//!
//! | Request | Method | Path |
//! |---------|--------|------|
//! | [`GetAccountRequest`] | GET | `/account` |
//! | [`GetAccountListRequest`] | GET | `/account/list` |
//! | [`GetAccountDetailsRequest`] | GET | `/account/details/{username}` |
//! | [`CreateSubaccountRequest`] | POST | `/sub_account` |
//! | [`ModifySubaccountRequest`] | PUT | `/sub_account/{username}` |
//! | [`DeleteSubaccountRequest`] | DELETE | `/sub_account/{username}` |
//!
//! Creating or modifying a sub-account answers with an empty body; the
//! service facade re-fetches the account details afterwards.

use serde::{Deserialize, Serialize};

use crate::api::common::{Boolean, Roles};
use crate::api::request::{envelope, Request};

/// The authenticated account and its resource limits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Remaining credits, in cents.
    #[serde(default)]
    pub credits: f64,

    /// The account username.
    pub username: String,

    /// Limits applied to this account.
    #[serde(default)]
    pub resource_limits: ResourceLimits,
}

/// Per-account resource quotas.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceLimits {
    pub cores: u32,
    pub detached_floating_ips: u32,
    pub load_balancers: u32,
    pub memory: u32,
    pub network_peerings: u32,
    pub networks: u32,
    pub ntp_excess_gib: u32,
    pub public_ipv4: u32,
    pub public_ipv6: u32,
    pub storage_hdd: u32,
    pub storage_maxiops: u32,
    pub storage_ssd: u32,
}

/// `{"account": {...}}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountEnvelope {
    pub account: Account,
}

/// One entry of the account list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountListItem {
    /// `main` or `sub`.
    #[serde(rename = "type", default)]
    pub account_type: String,

    pub username: String,

    #[serde(default)]
    pub roles: Roles,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountListItems {
    #[serde(default)]
    pub account: Vec<AccountListItem>,
}

/// `{"accounts": {"account": [...]}}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountListEnvelope {
    pub accounts: AccountListItems,
}

/// Profile and permissions of a main or sub-account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountDetails {
    pub main_account: String,
    #[serde(rename = "type")]
    pub account_type: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub address: String,
    pub postal_code: String,
    pub city: String,
    pub email: String,
    pub phone: String,
    pub state: String,
    pub vat_number: String,
    pub country: String,
    pub currency: String,
    pub language: String,
    pub timezone: String,
    pub allow_api: Boolean,
    pub allow_gui: Boolean,
    pub roles: Roles,
}

/// `{"account": {...}}` for detail responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountDetailsEnvelope {
    pub account: AccountDetails,
}

/// Fetches the authenticated account.
#[derive(Debug, Clone, Copy, Default)]
pub struct GetAccountRequest;

impl Request for GetAccountRequest {
    fn request_url(&self) -> String {
        "/account".to_string()
    }
}

/// Lists the main account and all its sub-accounts.
#[derive(Debug, Clone, Copy, Default)]
pub struct GetAccountListRequest;

impl Request for GetAccountListRequest {
    fn request_url(&self) -> String {
        "/account/list".to_string()
    }
}

/// Fetches the details of one account.
#[derive(Debug, Clone, Default)]
pub struct GetAccountDetailsRequest {
    pub username: String,
}

impl Request for GetAccountDetailsRequest {
    fn request_url(&self) -> String {
        format!("/account/details/{}", self.username)
    }
}

/// Fields of a new sub-account.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateSubaccount {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub company: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub address: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub postal_code: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub city: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub state: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub vat_number: String,
    pub country: String,
    pub currency: String,
    pub language: String,
    pub timezone: String,
    pub allow_api: Boolean,
    pub allow_gui: Boolean,
    pub roles: Roles,
}

/// Creates a sub-account under the authenticated main account.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateSubaccountRequest {
    pub subaccount: CreateSubaccount,
}

impl Request for CreateSubaccountRequest {
    fn request_url(&self) -> String {
        "/sub_account".to_string()
    }

    fn request_body(&self) -> serde_json::Result<Option<serde_json::Value>> {
        envelope("sub_account", &self.subaccount)
    }
}

/// Fields to change on a sub-account; unset fields are left as they are.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ModifySubaccount {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_api: Option<Boolean>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_gui: Option<Boolean>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Roles>,
}

/// Modifies an existing sub-account.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ModifySubaccountRequest {
    #[serde(skip)]
    pub username: String,
    pub subaccount: ModifySubaccount,
}

impl Request for ModifySubaccountRequest {
    fn request_url(&self) -> String {
        format!("/sub_account/{}", self.username)
    }

    fn request_body(&self) -> serde_json::Result<Option<serde_json::Value>> {
        envelope("sub_account", &self.subaccount)
    }
}

/// Deletes a sub-account.
#[derive(Debug, Clone, Default)]
pub struct DeleteSubaccountRequest {
    pub username: String,
}

impl Request for DeleteSubaccountRequest {
    fn request_url(&self) -> String {
        format!("/sub_account/{}", self.username)
    }
}
