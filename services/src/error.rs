//! Error types of the controller and the host binding

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServicesError {
    #[error("failed to publish security provider: {0}")]
    Publish(anyhow::Error),
    #[error("failed to withdraw security provider: {0}")]
    Withdraw(anyhow::Error),
    #[error("invalid configuration: {0:#}")]
    Config(anyhow::Error),
    #[error("unknown registration {0}")]
    UnknownRegistration(u64),
    #[error("services listener already deactivated")]
    Deactivated,
    #[error("lock poisoned: {0}")]
    LockPoisoned(&'static str),
}

pub type Result<T> = std::result::Result<T, ServicesError>;
