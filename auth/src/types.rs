use anyhow::{Context, Result, anyhow};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use http::header::AUTHORIZATION;
use std::fmt::Display;

/// Provider variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    /// Authenticates against the content repository
    Repository,
    /// Delegates to the authentication support and authenticator services
    Sling,
}

impl Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderKind::Repository => write!(f, "repository"),
            ProviderKind::Sling => write!(f, "sling"),
        }
    }
}

/// User name and password submitted to the console
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user_id: String,
    pub password: String,
}

impl Credentials {
    pub fn new(user_id: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            password: password.into(),
        }
    }

    /// Parses the value of an `Authorization: Basic ...` header.
    ///
    /// The decoded payload is split at the first `:`, so passwords may contain colons.
    pub fn from_basic_header(header: &str) -> Result<Self> {
        let encoded = header
            .strip_prefix("Basic ")
            .ok_or_else(|| anyhow!("expected Basic authorization scheme"))?;
        let decoded = STANDARD
            .decode(encoded.trim())
            .with_context(|| "decoding basic credentials")?;
        let decoded = String::from_utf8(decoded).with_context(|| "basic credentials not utf-8")?;
        let (user_id, password) = decoded
            .split_once(':')
            .ok_or_else(|| anyhow!("basic credentials missing ':' separator"))?;
        Ok(Self::new(user_id, password))
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("user_id", &self.user_id)
            .field("password", &"<sensitive>")
            .finish()
    }
}

/// Principal handed back to the console after a successful authentication
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleUser {
    /// Identifier of the authenticated user
    pub user_id: String,
    /// Configured groups the user was admitted through, if any
    pub groups: Vec<String>,
}

/// Read access to the parts of an incoming console request that authentication needs
pub trait RequestParts: Send + Sync {
    fn authorization_header(&self) -> Option<&str>;
    fn method(&self) -> &http::Method;
    fn uri(&self) -> &http::Uri;
}

/// Request parts of a plain HTTP request
#[derive(Debug, Clone)]
pub struct HttpRequestParts {
    pub headers: http::HeaderMap,
    pub method: http::Method,
    pub uri: http::Uri,
}

impl RequestParts for HttpRequestParts {
    fn authorization_header(&self) -> Option<&str> {
        self.headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
    }

    fn method(&self) -> &http::Method {
        &self.method
    }

    fn uri(&self) -> &http::Uri {
        &self.uri
    }
}

/// Capability the console invokes to authenticate its users.
///
/// Exactly one implementation is published at a time; the console calls it without
/// knowing which variant it is talking to.
#[async_trait::async_trait]
pub trait SecurityProvider: Send + Sync {
    /// Which variant this is
    fn kind(&self) -> ProviderKind;

    /// Checks a user name and password. `Ok(None)` means the credentials were rejected.
    async fn authenticate(&self, credentials: &Credentials) -> Result<Option<ConsoleUser>>;

    /// Whether an authenticated user may use a console role.
    ///
    /// Access is decided at authentication time, so any authenticated user holds every role.
    fn authorize(&self, _user: &ConsoleUser, _role: &str) -> bool {
        true
    }

    /// Authenticates a whole request. Without usable basic credentials the request is rejected.
    async fn authenticate_request(&self, parts: &dyn RequestParts) -> Result<Option<ConsoleUser>> {
        let Some(header) = parts.authorization_header() else {
            return Ok(None);
        };
        match Credentials::from_basic_header(header) {
            Ok(credentials) => self.authenticate(&credentials).await,
            Err(_) => Ok(None),
        }
    }

    /// Ends the console session of the request
    async fn logout(&self, _parts: &dyn RequestParts) -> Result<()> {
        Ok(())
    }
}
