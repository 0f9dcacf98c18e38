use crate::error::{Result, ServicesError};
use crate::host::PropertySource;
use micromegas_tracing::prelude::*;
use std::fmt::Display;
use webconsole_auth::access::AccessConfig;

/// Property selecting the authentication mode
pub const WEBCONSOLE_AUTH_TYPE: &str = "webconsole.authType";
/// Value pinning the console to the repository-backed provider
pub const JCR_AUTH: &str = "jcr";
/// Value requiring the authentication front-end provider
pub const SLING_AUTH: &str = "sling";
/// Property holding the console access policy as JSON, see [`AccessConfig::from_json`]
pub const WEBCONSOLE_ACCESS: &str = "webconsole.access";

/// Which provider family may be published
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AuthType {
    /// Prefer the front-end provider, fall back to the repository
    #[default]
    Default,
    /// Only ever the repository-backed provider
    Jcr,
    /// Only ever the front-end provider
    Sling,
}

impl AuthType {
    /// Maps the configured value to a mode. Matching is case-sensitive; anything
    /// unrecognized, including no value at all, is `Default`.
    pub fn from_property(value: Option<&str>) -> Self {
        match value {
            Some(JCR_AUTH) => AuthType::Jcr,
            Some(SLING_AUTH) => AuthType::Sling,
            Some(other) => {
                warn!(
                    "unknown {WEBCONSOLE_AUTH_TYPE} value {other:?}, using default authentication"
                );
                AuthType::Default
            }
            None => AuthType::Default,
        }
    }
}

impl Display for AuthType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthType::Default => write!(f, "default"),
            AuthType::Jcr => write!(f, "{JCR_AUTH}"),
            AuthType::Sling => write!(f, "{SLING_AUTH}"),
        }
    }
}

/// Configuration fixed for the lifetime of a listener
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListenerConfig {
    pub auth_type: AuthType,
    /// Access policy handed to every provider the listener constructs
    pub access: AccessConfig,
}

impl ListenerConfig {
    pub fn new(auth_type: AuthType) -> Self {
        Self {
            auth_type,
            access: AccessConfig::default(),
        }
    }

    pub fn with_access(mut self, access: AccessConfig) -> Self {
        self.access = access;
        self
    }

    /// Reads the mode and the access policy once from the property source.
    ///
    /// Without a `webconsole.access` property the policy comes from the
    /// `WEBCONSOLE_ACCESS_CONFIG` environment variable, then from the default.
    pub fn from_properties<P: PropertySource + ?Sized>(properties: &P) -> Result<Self> {
        let auth_type = properties.property(WEBCONSOLE_AUTH_TYPE);
        let auth_type = AuthType::from_property(auth_type.as_deref());
        let access = match properties.property(WEBCONSOLE_ACCESS) {
            Some(json) => AccessConfig::from_json(&json).map_err(|e| {
                ServicesError::Config(e.context(format!("parsing {WEBCONSOLE_ACCESS}")))
            })?,
            None => AccessConfig::from_env().map_err(ServicesError::Config)?,
        };
        Ok(Self::new(auth_type).with_access(access))
    }
}
