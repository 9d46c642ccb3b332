//! Management API HTTP Client Implementation
//!
//! Every call issues one request under `{auth_url}/api/backend/v1/`,
//! authenticated with `Authorization: Bearer {api_key}`.

use std::collections::HashMap;

use propelauth_common::AuthConfig;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use url::Url;

use crate::types::{
    CreateUserRequest, CreatedOrg, CreatedUser, OrgQuery, OrgQueryResponse, Organization,
    UserMetadata, UserPagedResponse, UserQuery, UsersInOrgQuery,
};
use crate::ClientError;

const API_PREFIX: [&str; 3] = ["api", "backend", "v1"];

/// Management API client.
///
/// Holds one `reqwest::Client`, so clones share a connection pool.
#[derive(Clone)]
pub struct PropelAuthClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl std::fmt::Debug for PropelAuthClient {
    #[mutants::skip]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropelAuthClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

/// Which field keys a batch lookup's result map
#[derive(Debug, Clone, Copy)]
enum BatchKey {
    UserIds,
    Emails,
    Usernames,
}

impl BatchKey {
    fn as_str(&self) -> &'static str {
        match self {
            BatchKey::UserIds => "user_ids",
            BatchKey::Emails => "emails",
            BatchKey::Usernames => "usernames",
        }
    }

    fn key_of(&self, user: &UserMetadata) -> Option<String> {
        match self {
            BatchKey::UserIds => Some(user.user_id.clone()),
            BatchKey::Emails => user.email.clone(),
            BatchKey::Usernames => user.username.clone(),
        }
    }
}

impl PropelAuthClient {
    /// Create a client from configuration.
    ///
    /// Requires both the auth URL and the API key.
    pub fn new(config: &AuthConfig) -> Result<Self, ClientError> {
        let (Some(auth_url), Some(api_key)) = (config.auth_url(), config.api_key()) else {
            return Err(ClientError::NotConfigured);
        };
        Self::with_base_url(auth_url, api_key)
    }

    /// Create a client against an arbitrary base URL, skipping the https
    /// requirement `AuthConfig` enforces. Used for local proxies and tests.
    pub fn with_base_url(base_url: &str, api_key: impl Into<String>) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ClientError::Unexpected(format!("Invalid base URL: {}", e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Unexpected(format!(
                "Invalid base URL: {}",
                base_url
            )));
        }

        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            api_key: api_key.into(),
        })
    }

    pub async fn fetch_user_metadata_by_user_id(
        &self,
        user_id: &str,
        include_orgs: bool,
    ) -> Result<Option<UserMetadata>, ClientError> {
        self.fetch_user_metadata(&["user", user_id], &[("include_orgs", include_orgs.to_string())])
            .await
    }

    pub async fn fetch_user_metadata_by_email(
        &self,
        email: &str,
        include_orgs: bool,
    ) -> Result<Option<UserMetadata>, ClientError> {
        self.fetch_user_metadata(
            &["user", "email"],
            &[
                ("email", email.to_string()),
                ("include_orgs", include_orgs.to_string()),
            ],
        )
        .await
    }

    pub async fn fetch_user_metadata_by_username(
        &self,
        username: &str,
        include_orgs: bool,
    ) -> Result<Option<UserMetadata>, ClientError> {
        self.fetch_user_metadata(
            &["user", "username"],
            &[
                ("username", username.to_string()),
                ("include_orgs", include_orgs.to_string()),
            ],
        )
        .await
    }

    /// Look up many users by ID. The result is keyed by user ID; IDs
    /// that match no user are simply absent.
    pub async fn fetch_batch_user_metadata_by_user_ids(
        &self,
        user_ids: &[&str],
        include_orgs: bool,
    ) -> Result<HashMap<String, UserMetadata>, ClientError> {
        self.fetch_batch_user_metadata(BatchKey::UserIds, user_ids, include_orgs)
            .await
    }

    /// Look up many users by email, keyed by email
    pub async fn fetch_batch_user_metadata_by_emails(
        &self,
        emails: &[&str],
        include_orgs: bool,
    ) -> Result<HashMap<String, UserMetadata>, ClientError> {
        self.fetch_batch_user_metadata(BatchKey::Emails, emails, include_orgs)
            .await
    }

    /// Look up many users by username, keyed by username
    pub async fn fetch_batch_user_metadata_by_usernames(
        &self,
        usernames: &[&str],
        include_orgs: bool,
    ) -> Result<HashMap<String, UserMetadata>, ClientError> {
        self.fetch_batch_user_metadata(BatchKey::Usernames, usernames, include_orgs)
            .await
    }

    pub async fn fetch_org(&self, org_id: &str) -> Result<Option<Organization>, ClientError> {
        let request = self.http.get(self.endpoint(&["org", org_id])?);
        let response = self.send(request).await?;

        match response.status() {
            StatusCode::OK => Ok(Some(read_json(response).await?)),
            StatusCode::NOT_FOUND => Ok(None),
            StatusCode::UNAUTHORIZED => Err(ClientError::InvalidApiKey),
            StatusCode::UPGRADE_REQUIRED => Err(ClientError::FeatureDisabled),
            status => Err(unexpected_status(status)),
        }
    }

    pub async fn fetch_orgs_by_query(
        &self,
        query: &OrgQuery,
    ) -> Result<OrgQueryResponse, ClientError> {
        let request = self.http.post(self.endpoint(&["org", "query"])?).json(query);
        let response = self.send(request).await?;

        match response.status() {
            StatusCode::OK => read_json(response).await,
            StatusCode::BAD_REQUEST => Err(bad_request(response).await),
            StatusCode::UNAUTHORIZED => Err(ClientError::InvalidApiKey),
            StatusCode::UPGRADE_REQUIRED => Err(ClientError::FeatureDisabled),
            status => Err(unexpected_status(status)),
        }
    }

    pub async fn fetch_users_by_query(
        &self,
        query: &UserQuery,
    ) -> Result<UserPagedResponse, ClientError> {
        let request = self.http.get(self.endpoint(&["user", "query"])?).query(query);
        self.fetch_users_page(request).await
    }

    pub async fn fetch_users_in_org(
        &self,
        org_id: &str,
        query: &UsersInOrgQuery,
    ) -> Result<UserPagedResponse, ClientError> {
        let request = self
            .http
            .get(self.endpoint(&["user", "org", org_id])?)
            .query(query);
        self.fetch_users_page(request).await
    }

    pub async fn create_user(&self, user: &CreateUserRequest) -> Result<CreatedUser, ClientError> {
        // Trailing empty segment keeps the trailing slash the API expects
        let request = self.http.post(self.endpoint(&["user", ""])?).json(user);
        let response = self.send(request).await?;

        match response.status() {
            status if status.is_success() => read_json(response).await,
            StatusCode::BAD_REQUEST => Err(bad_request(response).await),
            StatusCode::UNAUTHORIZED => Err(ClientError::InvalidApiKey),
            status => Err(unexpected_status(status)),
        }
    }

    pub async fn create_org(&self, name: &str) -> Result<CreatedOrg, ClientError> {
        let request = self
            .http
            .post(self.endpoint(&["org", ""])?)
            .json(&json!({ "name": name }));
        let response = self.send(request).await?;

        match response.status() {
            status if status.is_success() => read_json(response).await,
            StatusCode::BAD_REQUEST => Err(bad_request(response).await),
            StatusCode::UNAUTHORIZED => Err(ClientError::InvalidApiKey),
            StatusCode::UPGRADE_REQUIRED => Err(ClientError::FeatureDisabled),
            status => Err(unexpected_status(status)),
        }
    }

    async fn fetch_user_metadata(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<Option<UserMetadata>, ClientError> {
        let request = self.http.get(self.endpoint(segments)?).query(query);
        let response = self.send(request).await?;

        match response.status() {
            StatusCode::OK => Ok(Some(read_json(response).await?)),
            StatusCode::NOT_FOUND => Ok(None),
            StatusCode::UNAUTHORIZED => Err(ClientError::InvalidApiKey),
            status => Err(unexpected_status(status)),
        }
    }

    // Users the key cannot be derived for (no email, no username) are
    // dropped from the result rather than reported.
    async fn fetch_batch_user_metadata(
        &self,
        key: BatchKey,
        values: &[&str],
        include_orgs: bool,
    ) -> Result<HashMap<String, UserMetadata>, ClientError> {
        let request = self
            .http
            .post(self.endpoint(&["user", key.as_str()])?)
            .query(&[("include_orgs", include_orgs)])
            .json(&json!({ key.as_str(): values }));
        let response = self.send(request).await?;

        match response.status() {
            StatusCode::OK => {
                let users: Vec<UserMetadata> = read_json(response).await?;
                let user_by_key: HashMap<String, UserMetadata> = users
                    .into_iter()
                    .filter_map(|user| key.key_of(&user).map(|k| (k, user)))
                    .collect();
                Ok(user_by_key)
            }
            StatusCode::BAD_REQUEST => Err(bad_request(response).await),
            StatusCode::UNAUTHORIZED => Err(ClientError::InvalidApiKey),
            status => Err(unexpected_status(status)),
        }
    }

    async fn fetch_users_page(
        &self,
        request: RequestBuilder,
    ) -> Result<UserPagedResponse, ClientError> {
        let response = self.send(request).await?;

        match response.status() {
            StatusCode::OK => read_json(response).await,
            StatusCode::BAD_REQUEST => Err(bad_request(response).await),
            StatusCode::UNAUTHORIZED => Err(ClientError::InvalidApiKey),
            StatusCode::UPGRADE_REQUIRED => Err(ClientError::FeatureDisabled),
            status => Err(unexpected_status(status)),
        }
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::Unexpected("Base URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(API_PREFIX)
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        let response = request
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Management API request failed");
                ClientError::Unexpected(e.to_string())
            })?;

        tracing::debug!(
            url = %response.url(),
            status = %response.status(),
            "Management API responded"
        );

        Ok(response)
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    response.json::<T>().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to decode management API response");
        ClientError::Unexpected(e.to_string())
    })
}

// Field errors are JSON; anything else is passed on as the raw text
async fn bad_request(response: Response) -> ClientError {
    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read bad request body");
            return ClientError::BadRequest(Value::Null);
        }
    };

    let errors = serde_json::from_str::<Value>(&body).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Bad request body is not JSON");
        Value::String(body)
    });
    ClientError::BadRequest(errors)
}

fn unexpected_status(status: StatusCode) -> ClientError {
    tracing::warn!(status = %status, "Unexpected management API status");
    ClientError::Unexpected(format!("Management API returned {}", status))
}
