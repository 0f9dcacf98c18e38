//! Security providers for the web console
//!
//! This crate provides the capability the console uses to authenticate incoming
//! requests, and the two provider families that can back it:
//!
//! - **Repository**: credentials are checked by logging into the content repository
//! - **Sling**: requests are authenticated by a pluggable authentication front-end
//!   (authentication support + authenticator), falling back to the repository for
//!   plain credentials
//!
//! Which provider is live at a given time is decided elsewhere; this crate only
//! describes what each variant does once constructed.
//!
//! # Example: Repository-backed provider
//!
//! ```rust,no_run
//! use webconsole_auth::access::AccessConfig;
//! use webconsole_auth::collaborators::Repository;
//! use webconsole_auth::repository_provider::RepositorySecurityProvider;
//! use webconsole_auth::types::{Credentials, SecurityProvider};
//! use std::sync::Arc;
//!
//! # async fn example(repository: Arc<dyn Repository>) -> anyhow::Result<()> {
//! let provider = RepositorySecurityProvider::new(repository, AccessConfig::default());
//! let credentials = Credentials::new("admin", "admin");
//! if let Some(user) = provider.authenticate(&credentials).await? {
//!     println!("Authenticated: {}", user.user_id);
//! }
//! # Ok(())
//! # }
//! ```

/// Core provider contract and request types
pub mod types;

/// Services the providers delegate to
pub mod collaborators;

/// Which users and groups may open the console
pub mod access;

/// Provider authenticating directly against the repository
pub mod repository_provider;

/// Provider delegating to the authentication front-end
pub mod sling_provider;
