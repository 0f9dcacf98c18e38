//! Web console security provider selection
//!
//! Watches the host for the repository, authentication support and authenticator
//! services and keeps exactly one matching security provider published, or none.
//!
//! # Example
//!
//! ```rust
//! use webconsole_services::config::{AuthType, ListenerConfig};
//! use webconsole_services::listener::{ServicesListener, State};
//! use webconsole_services::memory::InMemoryHost;
//! use std::sync::Arc;
//!
//! # fn example() -> anyhow::Result<()> {
//! let host = Arc::new(InMemoryHost::new());
//! let listener = ServicesListener::new(host.clone(), ListenerConfig::new(AuthType::Default));
//! listener.notify_change()?;
//! assert_eq!(listener.active_state()?, State::None);
//! listener.deactivate()?;
//! # Ok(())
//! # }
//! ```

/// Error types
pub mod error;

/// Authentication mode configuration
pub mod config;

/// Contract of the host environment
pub mod host;

/// Availability tracking of one service type
pub mod tracker;

/// Provider selection and registration
pub mod listener;

/// In-memory host environment
pub mod memory;
