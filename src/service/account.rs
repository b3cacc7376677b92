//
//  upcloud-api
//  service/account.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Account and sub-account operations.

use serde::de::IgnoredAny;
use tokio_util::sync::CancellationToken;

use super::Service;
use crate::api::account::{
    Account, AccountDetails, AccountDetailsEnvelope, AccountEnvelope, AccountListEnvelope,
    AccountListItem, CreateSubaccountRequest, DeleteSubaccountRequest, GetAccountDetailsRequest,
    GetAccountListRequest, GetAccountRequest, ModifySubaccountRequest,
};
use crate::api::common::Result;

impl Service {
    /// Returns the authenticated account.
    pub async fn get_account(&self, ctx: &CancellationToken) -> Result<Account> {
        let mut out = AccountEnvelope::default();
        self.client.get(ctx, &GetAccountRequest, &mut out).await?;
        Ok(out.account)
    }

    /// Lists the main account and its sub-accounts.
    pub async fn get_account_list(&self, ctx: &CancellationToken) -> Result<Vec<AccountListItem>> {
        let mut out = AccountListEnvelope::default();
        self.client.get(ctx, &GetAccountListRequest, &mut out).await?;
        Ok(out.accounts.account)
    }

    /// Returns the details of one account.
    pub async fn get_account_details(
        &self,
        ctx: &CancellationToken,
        req: &GetAccountDetailsRequest,
    ) -> Result<AccountDetails> {
        let mut out = AccountDetailsEnvelope::default();
        self.client.get(ctx, req, &mut out).await?;
        Ok(out.account)
    }

    /// Creates a sub-account and returns its details.
    ///
    /// The API answers the creation without a body, so the details are read
    /// back with a second request.
    pub async fn create_subaccount(
        &self,
        ctx: &CancellationToken,
        req: &CreateSubaccountRequest,
    ) -> Result<AccountDetails> {
        self.client.create(ctx, req, &mut IgnoredAny).await?;
        self.get_account_details(
            ctx,
            &GetAccountDetailsRequest {
                username: req.subaccount.username.clone(),
            },
        )
        .await
    }

    /// Modifies a sub-account and returns its refreshed details.
    pub async fn modify_subaccount(
        &self,
        ctx: &CancellationToken,
        req: &ModifySubaccountRequest,
    ) -> Result<AccountDetails> {
        self.client.modify(ctx, req, &mut IgnoredAny).await?;
        self.get_account_details(
            ctx,
            &GetAccountDetailsRequest {
                username: req.username.clone(),
            },
        )
        .await
    }

    /// Deletes a sub-account.
    pub async fn delete_subaccount(
        &self,
        ctx: &CancellationToken,
        req: &DeleteSubaccountRequest,
    ) -> Result<()> {
        self.client.delete(ctx, req).await
    }
}

#[cfg(test)]
mod tests {
    use crate::api::account::{
        CreateSubaccount, CreateSubaccountRequest, ModifySubaccount, ModifySubaccountRequest,
    };
    use crate::api::common::Boolean;
    use crate::service::testing::service_for;
    use mockito::Matcher;
    use serde_json::json;
    use tokio_util::sync::CancellationToken;

    #[tokio::test]
    async fn test_get_account() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/account")
            .match_header("authorization", "Basic dXNlcjpwYXNz")
            .with_status(200)
            .with_body(r#"{"account":{"credits":10000,"username":"testuser","resource_limits":{"cores":200}}}"#)
            .create_async()
            .await;

        let service = service_for(&server);
        let account = service.get_account(&CancellationToken::new()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(account.username, "testuser");
        assert_eq!(account.credits, 10000.0);
        assert_eq!(account.resource_limits.cores, 200);
    }

    #[tokio::test]
    async fn test_create_subaccount_reads_back_details() {
        let mut server = mockito::Server::new_async().await;
        let create = server
            .mock("POST", "/sub_account")
            .match_body(Matcher::PartialJson(json!({
                "sub_account": {"username": "sdk_test_subaccount", "allow_api": "yes"}
            })))
            .with_status(200)
            .create_async()
            .await;
        let details = server
            .mock("GET", "/account/details/sdk_test_subaccount")
            .with_status(200)
            .with_body(
                r#"{"account":{"type":"sub","username":"sdk_test_subaccount",
                "main_account":"owner","roles":{"role":["api"]}}}"#,
            )
            .create_async()
            .await;

        let service = service_for(&server);
        let req = CreateSubaccountRequest {
            subaccount: CreateSubaccount {
                username: "sdk_test_subaccount".to_string(),
                password: "Superpass123".to_string(),
                allow_api: Boolean(true),
                ..Default::default()
            },
        };
        let account = service
            .create_subaccount(&CancellationToken::new(), &req)
            .await
            .unwrap();

        create.assert_async().await;
        details.assert_async().await;
        assert_eq!(account.username, "sdk_test_subaccount");
        assert_eq!(account.account_type, "sub");
        assert_eq!(account.roles.role, vec!["api".to_string()]);
    }

    #[tokio::test]
    async fn test_modify_subaccount_reads_back_details() {
        let mut server = mockito::Server::new_async().await;
        let modify = server
            .mock("PUT", "/sub_account/helper")
            .match_body(Matcher::Json(json!({"sub_account": {"last_name": "Updated"}})))
            .with_status(200)
            .with_body(r#"{"status":200}"#)
            .create_async()
            .await;
        let details = server
            .mock("GET", "/account/details/helper")
            .with_status(200)
            .with_body(r#"{"account":{"username":"helper","last_name":"Updated","allow_api":"yes"}}"#)
            .create_async()
            .await;

        let service = service_for(&server);
        let req = ModifySubaccountRequest {
            username: "helper".to_string(),
            subaccount: ModifySubaccount {
                last_name: Some("Updated".to_string()),
                ..Default::default()
            },
        };
        let account = service
            .modify_subaccount(&CancellationToken::new(), &req)
            .await
            .unwrap();

        modify.assert_async().await;
        details.assert_async().await;
        assert_eq!(account.username, "helper");
        assert_eq!(account.last_name, "Updated");
        assert!(account.allow_api.0);
    }

    #[tokio::test]
    async fn test_failed_modify_skips_read_back() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("PUT", "/sub_account/helper")
            .with_status(403)
            .with_body(r#"{"error":{"error_code":"FORBIDDEN","error_message":"no"}}"#)
            .create_async()
            .await;
        let details = server
            .mock("GET", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let service = service_for(&server);
        let req = ModifySubaccountRequest {
            username: "helper".to_string(),
            ..Default::default()
        };
        let err = service
            .modify_subaccount(&CancellationToken::new(), &req)
            .await
            .unwrap_err();

        assert_eq!(err.service_error().unwrap().code, "FORBIDDEN");
        details.assert_async().await;
    }
}
