use crate::collaborators::Session;
use crate::types::ConsoleUser;
use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

/// Environment variable holding the access configuration as JSON
pub const ACCESS_CONFIG_ENV: &str = "WEBCONSOLE_ACCESS_CONFIG";

/// Users and groups allowed to open the console
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessConfig {
    /// User ids admitted directly
    pub users: Vec<String>,
    /// Members of any of these groups are admitted
    pub groups: Vec<String>,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            users: vec!["admin".to_string()],
            groups: Vec::new(),
        }
    }
}

impl AccessConfig {
    /// Load access configuration from the `WEBCONSOLE_ACCESS_CONFIG` environment variable.
    ///
    /// Falls back to the default (only `admin`) when the variable is not set.
    ///
    /// Expected format:
    /// ```json
    /// {
    ///   "users": ["admin", "ops"],
    ///   "groups": ["console-administrators"]
    /// }
    /// ```
    pub fn from_env() -> Result<Self> {
        match std::env::var(ACCESS_CONFIG_ENV) {
            Ok(json) => Self::from_json(&json)
                .map_err(|e| anyhow!("Failed to parse {ACCESS_CONFIG_ENV}: {e:?}")),
            Err(_) => Ok(Self::default()),
        }
    }

    /// Parses the JSON form shown in [`from_env`](Self::from_env). Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Returns the console user for the session, or `None` if the session may not use the console.
    pub fn admit(&self, session: &dyn Session) -> Option<ConsoleUser> {
        let user_id = session.user_id();
        let groups: Vec<String> = self
            .groups
            .iter()
            .filter(|group| session.is_member_of(group))
            .cloned()
            .collect();
        if self.users.iter().any(|user| user == user_id) || !groups.is_empty() {
            Some(ConsoleUser {
                user_id: user_id.to_string(),
                groups,
            })
        } else {
            None
        }
    }
}
