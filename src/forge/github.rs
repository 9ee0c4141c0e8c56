//! forge::github
//!
//! GitHub page source using the REST API.
//!
//! # Design
//!
//! [`GitHubForge`] performs plain authenticated GETs and hands back the raw
//! body and `Link` header. It knows nothing about pull requests or commits;
//! URL construction lives in [`RepoEndpoints`](super::RepoEndpoints).
//!
//! # Authentication
//!
//! A bearer token is optional. Without one, requests go out unauthenticated
//! and are subject to GitHub's anonymous rate limit.
//!
//! # Rate Limiting
//!
//! Returns `ForgeError::RateLimited` for 429 responses and for 403 responses
//! with `X-RateLimit-Remaining: 0`. There is no automatic retry.
//!
//! # Example
//!
//! ```ignore
//! use quarterlog::forge::github::GitHubForge;
//! use quarterlog::forge::PageSource;
//!
//! let forge = GitHubForge::new(Some("ghp_xxx".to_string()));
//! let page = forge
//!     .get_page("https://api.github.com/repos/octocat/hello-world/pulls?state=closed")
//!     .await?;
//! ```

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, LINK, USER_AGENT};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;

use super::traits::{ForgeError, Page, PageSource};

/// Default GitHub API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Default User-Agent header value for API requests.
pub const DEFAULT_USER_AGENT: &str = "quarterlog-cli";

/// GitHub page source.
#[derive(Clone)]
pub struct GitHubForge {
    /// HTTP client for making requests
    client: Client,
    /// Bearer token, if one was configured
    token: Option<String>,
    /// User-Agent header value
    user_agent: String,
}

// Custom Debug to avoid exposing the token
impl std::fmt::Debug for GitHubForge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubForge")
            .field("has_token", &self.token.is_some())
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl GitHubForge {
    /// Create a GitHub page source with an optional bearer token.
    pub fn new(token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            token,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Override the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Whether requests carry an `Authorization` header.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Build common headers for API requests.
    fn headers(&self) -> Result<HeaderMap, ForgeError> {
        let mut headers = HeaderMap::new();
        if let Some(ref token) = self.token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
                ForgeError::AuthFailed("token contains characters not allowed in a header".into())
            })?;
            headers.insert(AUTHORIZATION, value);
        }
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        let user_agent = HeaderValue::from_str(&self.user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_USER_AGENT));
        headers.insert(USER_AGENT, user_agent);
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static("2022-11-28"),
        );
        Ok(headers)
    }

    /// Map a non-success response to a `ForgeError`.
    async fn error_from_response(response: Response, status: StatusCode) -> ForgeError {
        let rate_limited = response
            .headers()
            .get("X-RateLimit-Remaining")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == "0");

        // Try to get error message from body
        let message = match response.json::<GitHubErrorResponse>().await {
            Ok(err) => err.message,
            Err(_) => "Unknown error".to_string(),
        };

        match status {
            StatusCode::UNAUTHORIZED => ForgeError::AuthFailed("Invalid or expired token".into()),
            StatusCode::FORBIDDEN if rate_limited => ForgeError::RateLimited,
            StatusCode::FORBIDDEN => ForgeError::AuthFailed(format!("Permission denied: {}", message)),
            StatusCode::NOT_FOUND => ForgeError::NotFound(message),
            StatusCode::TOO_MANY_REQUESTS => ForgeError::RateLimited,
            _ if status.is_server_error() => ForgeError::ApiError {
                status: status.as_u16(),
                message: format!("GitHub server error: {}", message),
            },
            _ => ForgeError::ApiError {
                status: status.as_u16(),
                message,
            },
        }
    }
}

#[async_trait]
impl PageSource for GitHubForge {
    fn name(&self) -> &'static str {
        "github"
    }

    async fn get_page(&self, url: &str) -> Result<Page, ForgeError> {
        let response = self
            .client
            .get(url)
            .headers(self.headers()?)
            .send()
            .await
            .map_err(|e| ForgeError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::error_from_response(response, status).await);
        }

        let link = response
            .headers()
            .get(LINK)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let body = response
            .bytes()
            .await
            .map_err(|e| ForgeError::NetworkError(e.to_string()))?;

        Ok(Page {
            body: body.to_vec(),
            link,
        })
    }
}

/// GitHub error response format.
#[derive(Deserialize)]
struct GitHubErrorResponse {
    message: String,
}

/// Parse owner and repository from a GitHub remote URL.
///
/// Accepts SSH (`git@github.com:owner/repo.git`) and HTTPS
/// (`https://github.com/owner/repo`) forms.
///
/// # Example
///
/// ```
/// use quarterlog::forge::github::parse_github_url;
///
/// assert_eq!(
///     parse_github_url("git@github.com:graphiteeditor/graphite.git"),
///     Some(("graphiteeditor".to_string(), "graphite".to_string()))
/// );
/// assert_eq!(parse_github_url("https://gitlab.com/a/b"), None);
/// ```
pub fn parse_github_url(url: &str) -> Option<(String, String)> {
    let url = url.trim();

    // SSH format: git@github.com:owner/repo.git
    if let Some(rest) = url.strip_prefix("git@github.com:") {
        return split_owner_repo(rest);
    }

    // HTTPS format: https://github.com/owner/repo.git
    if let Some(rest) = url
        .strip_prefix("https://github.com/")
        .or_else(|| url.strip_prefix("http://github.com/"))
    {
        return split_owner_repo(rest);
    }

    None
}

fn split_owner_repo(rest: &str) -> Option<(String, String)> {
    let rest = rest.trim_end_matches('/');
    let rest = rest.strip_suffix(".git").unwrap_or(rest);
    let mut parts = rest.splitn(3, '/');
    let owner = parts.next()?;
    let repo = parts.next()?;
    if owner.is_empty() || repo.is_empty() {
        return None;
    }
    Some((owner.to_string(), repo.to_string()))
}
