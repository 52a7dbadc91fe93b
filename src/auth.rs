//! OAuth installed-app consent flow.
//!
//! Loads a Google-style `client_secret.json`, sends the user to the
//! consent page in their browser, and captures the authorization code on a
//! loopback listener bound to an ephemeral port. Transport security is an
//! explicit constructor setting rather than a process-wide environment
//! toggle: non-HTTPS endpoints are rejected unless
//! `allow_insecure_transport` is set.

use std::path::Path;

use oauth2::basic::BasicClient;
use oauth2::reqwest::async_http_client;
use oauth2::{
    AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, RedirectUrl, Scope,
    TokenResponse, TokenUrl,
};
use serde::Deserialize;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tracing::info;
use url::Url;

/// Scope required for the Data API calls the pipeline makes.
const YOUTUBE_SCOPE: &str = "https://www.googleapis.com/auth/youtube.force-ssl";

const CONSENT_RESPONSE: &str = "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\n\r\n\
    <html><body>Authorization received. You can close this tab.</body></html>";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Failed to read client secret file {path}: {source}")]
    ReadSecret {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse client secret file: {0}")]
    ParseSecret(#[from] serde_json::Error),

    #[error("Client secret file has no \"installed\" section")]
    NotInstalledApp,

    #[error("Endpoint {0} is not HTTPS (set allow_insecure_transport to permit this)")]
    InsecureTransport(String),

    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error during consent flow: {0}")]
    Io(#[from] std::io::Error),

    #[error("Redirect request carried no authorization code")]
    MissingCode,

    #[error("OAuth state parameter did not match")]
    StateMismatch,

    #[error("Token exchange failed: {0}")]
    Exchange(String),
}

/// The `installed` section of a Google client secret file.
#[derive(Debug, Clone, Deserialize)]
pub struct InstalledSecret {
    pub client_id: String,
    pub client_secret: String,
    pub auth_uri: String,
    pub token_uri: String,
}

#[derive(Debug, Deserialize)]
struct ClientSecretFile {
    installed: Option<InstalledSecret>,
}

/// Browser-based consent flow for an installed application.
pub struct InstalledFlow {
    secret: InstalledSecret,
}

impl InstalledFlow {
    /// Create a flow, validating endpoint transport up front.
    pub fn new(secret: InstalledSecret, allow_insecure_transport: bool) -> Result<Self, AuthError> {
        if !allow_insecure_transport {
            for uri in [&secret.auth_uri, &secret.token_uri] {
                if !uri.starts_with("https://") {
                    return Err(AuthError::InsecureTransport(uri.clone()));
                }
            }
        }
        Ok(Self { secret })
    }

    /// Load the client secret file and create a flow.
    pub fn from_secret_file(
        path: &Path,
        allow_insecure_transport: bool,
    ) -> Result<Self, AuthError> {
        let content = std::fs::read_to_string(path).map_err(|source| AuthError::ReadSecret {
            path: path.display().to_string(),
            source,
        })?;

        let file: ClientSecretFile = serde_json::from_str(&content)?;
        let secret = file.installed.ok_or(AuthError::NotInstalledApp)?;
        Self::new(secret, allow_insecure_transport)
    }

    /// Run the consent flow and return a bearer access token.
    ///
    /// Blocks until the user completes (or abandons) the browser consent
    /// page; the redirect lands on a loopback listener we own.
    pub async fn obtain_access_token(&self) -> Result<String, AuthError> {
        let listener = TcpListener::bind(("127.0.0.1", 0)).await?;
        let port = listener.local_addr()?.port();

        let client = BasicClient::new(
            ClientId::new(self.secret.client_id.clone()),
            Some(ClientSecret::new(self.secret.client_secret.clone())),
            AuthUrl::new(self.secret.auth_uri.clone())?,
            Some(TokenUrl::new(self.secret.token_uri.clone())?),
        )
        .set_redirect_uri(RedirectUrl::new(format!("http://127.0.0.1:{port}"))?);

        let (authorize_url, csrf_state) = client
            .authorize_url(CsrfToken::new_random)
            .add_scope(Scope::new(YOUTUBE_SCOPE.to_string()))
            .url();

        info!("Waiting for browser consent on port {port}");
        println!("Open this URL in your browser to authorize access:\n{authorize_url}");

        let (code, state) = wait_for_redirect(&listener).await?;
        if state.as_deref() != Some(csrf_state.secret().as_str()) {
            return Err(AuthError::StateMismatch);
        }

        let token = client
            .exchange_code(AuthorizationCode::new(code))
            .request_async(async_http_client)
            .await
            .map_err(|e| AuthError::Exchange(e.to_string()))?;

        Ok(token.access_token().secret().clone())
    }
}

/// Accept one redirect request and pull out the code and state parameters.
async fn wait_for_redirect(listener: &TcpListener) -> Result<(String, Option<String>), AuthError> {
    let (mut stream, _) = listener.accept().await?;
    let (read_half, mut write_half) = stream.split();

    let mut request_line = String::new();
    BufReader::new(read_half).read_line(&mut request_line).await?;

    let result = parse_redirect_query(&request_line).ok_or(AuthError::MissingCode);

    write_half.write_all(CONSENT_RESPONSE.as_bytes()).await?;
    write_half.shutdown().await?;

    result
}

/// Extract `code` and `state` from an HTTP request line like
/// `GET /?state=xyz&code=abc HTTP/1.1`.
fn parse_redirect_query(request_line: &str) -> Option<(String, Option<String>)> {
    let path = request_line.split_whitespace().nth(1)?;
    let url = Url::parse(&format!("http://localhost{path}")).ok()?;

    let mut code = None;
    let mut state = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "code" => code = Some(value.into_owned()),
            "state" => state = Some(value.into_owned()),
            _ => {}
        }
    }

    Some((code?, state))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(auth_uri: &str, token_uri: &str) -> InstalledSecret {
        InstalledSecret {
            client_id: "id".to_string(),
            client_secret: "secret".to_string(),
            auth_uri: auth_uri.to_string(),
            token_uri: token_uri.to_string(),
        }
    }

    #[test]
    fn test_https_endpoints_accepted() {
        let result = InstalledFlow::new(
            secret(
                "https://accounts.google.com/o/oauth2/auth",
                "https://oauth2.googleapis.com/token",
            ),
            false,
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_insecure_token_endpoint_rejected() {
        let err = InstalledFlow::new(
            secret(
                "https://accounts.google.com/o/oauth2/auth",
                "http://localhost/token",
            ),
            false,
        )
        .err()
        .unwrap();

        match err {
            AuthError::InsecureTransport(uri) => assert_eq!(uri, "http://localhost/token"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_insecure_endpoint_allowed_when_opted_in() {
        let result = InstalledFlow::new(
            secret("http://localhost/auth", "http://localhost/token"),
            true,
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_parse_redirect_query() {
        let (code, state) =
            parse_redirect_query("GET /?state=xyz&code=abc HTTP/1.1\r\n").unwrap();
        assert_eq!(code, "abc");
        assert_eq!(state.as_deref(), Some("xyz"));
    }

    #[test]
    fn test_parse_redirect_query_without_code() {
        assert!(parse_redirect_query("GET /favicon.ico HTTP/1.1\r\n").is_none());
    }

    #[test]
    fn test_secret_file_requires_installed_section() {
        let json = r#"{"web": {"client_id": "x"}}"#;
        let file: ClientSecretFile = serde_json::from_str(json).unwrap();
        assert!(file.installed.is_none());
    }
}
