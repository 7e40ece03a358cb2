use crate::error::ApiError;
use crate::github::issues::GitHubIssue;
use crate::github::repos::{RepoTarget, Repository, Visibility};
use reqwest::Method;
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::de::DeserializeOwned;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const ACCEPT_JSON: &str = "application/vnd.github+json";
const CLIENT_USER_AGENT: &str = "repoman-cli";

/// Thin client over the GitHub REST API. One method per endpoint, one request per call.
#[derive(Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(ApiError::Client)?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    /// `GET /user/repos`
    pub async fn list_repositories(&self) -> Result<Vec<Repository>, ApiError> {
        let response = self.send(Method::GET, "/user/repos", None).await?;
        decode(response).await
    }

    /// `PATCH /repos/{owner}/{repo}` with `{"visibility": ...}`
    pub async fn set_visibility(
        &self,
        target: &RepoTarget,
        visibility: Visibility,
    ) -> Result<(), ApiError> {
        let body = serde_json::json!({ "visibility": visibility });
        self.send(Method::PATCH, &target.api_path(), Some(&body))
            .await?;
        Ok(())
    }

    /// `GET /repos/{owner}/{repo}/issues`
    pub async fn list_issues(&self, target: &RepoTarget) -> Result<Vec<GitHubIssue>, ApiError> {
        let path = format!("{}/issues", target.api_path());
        let response = self.send(Method::GET, &path, None).await?;
        decode(response).await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<EndpointResponse, ApiError> {
        let endpoint = format!("{method} {path}");
        let url = format!("{}{}", self.base_url, path);

        let mut request = self
            .http
            .request(method, url.as_str())
            .header(ACCEPT, ACCEPT_JSON)
            .header(USER_AGENT, CLIENT_USER_AGENT);
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("token {token}"));
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        tracing::debug!(%endpoint, authenticated = self.token.is_some(), "sending request");
        let response = request.send().await.map_err(|source| ApiError::Transport {
            endpoint: endpoint.clone(),
            source,
        })?;

        let status = response.status();
        tracing::debug!(%endpoint, status = status.as_u16(), "received response");
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                endpoint,
            });
        }

        Ok(EndpointResponse { endpoint, response })
    }
}

struct EndpointResponse {
    endpoint: String,
    response: reqwest::Response,
}

async fn decode<T: DeserializeOwned>(response: EndpointResponse) -> Result<T, ApiError> {
    let EndpointResponse { endpoint, response } = response;
    let text = response
        .text()
        .await
        .map_err(|source| ApiError::Transport {
            endpoint: endpoint.clone(),
            source,
        })?;
    serde_json::from_str(&text).map_err(|source| ApiError::Decode { endpoint, source })
}
