//! Platform API gateway client.
//!
//! [`ApiClient`] owns the HTTP connection for one run and performs every
//! platform call with the right credential scope. Each endpoint method
//! decodes the response into a typed record from [`types`]; callers never
//! see raw JSON or reqwest types.

mod error;
pub mod types;

pub use error::{ApiError, ApiErrorKind};

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::Credentials;
use types::{
    CreateDomainRequest, CreateIpPoolRequest, CreateSubAccountRequest, CreateWebhookRequest,
    DailyStat, DedicatedIp, Domain, EmailMessage, EmailResponse, IpPool, MessageDetail,
    StatCounters, SubAccount, Webhook,
};

/// Credential scope for a platform call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Account-level key: tenant management, stats, IP operations.
    Account,
    /// Sub-account key: domain and email operations.
    SubAccount,
}

impl Scope {
    /// Header carrying the bearer token for this scope.
    pub fn header_name(self) -> &'static str {
        match self {
            Self::Account => "X-Account-ApiKey",
            Self::SubAccount => "X-SubAccount-ApiKey",
        }
    }
}

/// Authenticated HTTP client for the platform API.
pub struct ApiClient {
    http: Client,
    base_url: String,
    credentials: Credentials,
}

impl ApiClient {
    /// Create a client for the given base URL and credentials.
    pub fn new(base_url: impl Into<String>, timeout: Duration, credentials: Credentials) -> Self {
        Self {
            http: Client::builder()
                .user_agent(concat!("mailflow/", env!("CARGO_PKG_VERSION")))
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
        }
    }

    /// List all sub-accounts under the account.
    pub fn list_sub_accounts(&self) -> Result<Vec<SubAccount>, ApiError> {
        self.get(Scope::Account, "/account/subaccounts", &[])
    }

    /// Create a new sub-account.
    pub fn create_sub_account(
        &self,
        request: &CreateSubAccountRequest,
    ) -> Result<SubAccount, ApiError> {
        self.post(Scope::Account, "/account/subaccounts", request)
    }

    /// Register a webhook for event delivery.
    pub fn create_webhook(&self, request: &CreateWebhookRequest) -> Result<Webhook, ApiError> {
        self.post(Scope::Account, "/account/webhooks", request)
    }

    /// Add a sending domain to the sub-account.
    pub fn add_domain(&self, request: &CreateDomainRequest) -> Result<Domain, ApiError> {
        self.post(Scope::SubAccount, "/subaccount/domains", request)
    }

    /// List the sub-account's sending domains.
    pub fn list_domains(&self) -> Result<Vec<Domain>, ApiError> {
        self.get(Scope::SubAccount, "/subaccount/domains", &[])
    }

    /// Submit an email; one acknowledgement per recipient.
    pub fn send_email(&self, message: &EmailMessage) -> Result<Vec<EmailResponse>, ApiError> {
        self.post(Scope::SubAccount, "/subaccount/emails", message)
    }

    /// Fetch full detail for a submitted message.
    pub fn get_message(&self, message_id: &str) -> Result<MessageDetail, ApiError> {
        self.get(
            Scope::Account,
            &format!("/account/messages/{}", message_id),
            &[],
        )
    }

    /// Daily statistics for one sub-account over a date window.
    pub fn sub_account_stats(
        &self,
        sub_account_id: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DailyStat>, ApiError> {
        self.get(
            Scope::Account,
            &format!("/account/subaccounts/{}/stats", sub_account_id),
            &date_window(from, to),
        )
    }

    /// Aggregated counters for one sub-account over a date window.
    pub fn aggregate_stats(
        &self,
        sub_account_id: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<StatCounters, ApiError> {
        self.get(
            Scope::Account,
            &format!("/account/subaccounts/{}/stats/aggregate", sub_account_id),
            &date_window(from, to),
        )
    }

    /// Daily statistics across the whole account.
    pub fn account_stats(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<DailyStat>, ApiError> {
        self.get(Scope::Account, "/account/stats", &date_window(from, to))
    }

    /// List dedicated sending IPs allocated to the account.
    pub fn list_ips(&self) -> Result<Vec<DedicatedIp>, ApiError> {
        self.get(Scope::Account, "/account/ips", &[])
    }

    /// Create a named IP pool.
    pub fn create_ip_pool(&self, request: &CreateIpPoolRequest) -> Result<IpPool, ApiError> {
        self.post(Scope::Account, "/account/ippools", request)
    }

    fn get<T: DeserializeOwned>(
        &self,
        scope: Scope,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let endpoint = format!("GET {}", path);
        let mut request = self.http.get(self.url(path));
        if !query.is_empty() {
            request = request.query(query);
        }
        self.execute(self.authorize(request, scope), endpoint)
    }

    fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        scope: Scope,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let endpoint = format!("POST {}", path);
        let request = self.http.post(self.url(path)).json(body);
        self.execute(self.authorize(request, scope), endpoint)
    }

    fn authorize(&self, request: RequestBuilder, scope: Scope) -> RequestBuilder {
        let key = match scope {
            Scope::Account => self.credentials.account_key(),
            Scope::SubAccount => self.credentials.sub_account_key(),
        };
        request.header(scope.header_name(), key)
    }

    fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        endpoint: String,
    ) -> Result<T, ApiError> {
        let response = request.send().map_err(|source| ApiError::Transport {
            endpoint: endpoint.clone(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                endpoint,
                body,
            });
        }

        response
            .json()
            .map_err(|source| ApiError::Decode { endpoint, source })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn date_window(from: NaiveDate, to: NaiveDate) -> [(&'static str, String); 2] {
    [
        ("from", from.format("%Y-%m-%d").to_string()),
        ("to", to.format("%Y-%m-%d").to_string()),
    ]
}
