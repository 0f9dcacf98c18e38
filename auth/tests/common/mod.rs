#![allow(dead_code)]

use anyhow::{Result, anyhow};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use webconsole_auth::collaborators::{AuthenticationSupport, Authenticator, Repository, Session};
use webconsole_auth::types::{Credentials, HttpRequestParts, RequestParts};

pub struct FakeSession {
    pub user_id: String,
    pub groups: Vec<String>,
    pub logouts: Arc<AtomicUsize>,
}

impl Session for FakeSession {
    fn user_id(&self) -> &str {
        &self.user_id
    }

    fn is_member_of(&self, group: &str) -> bool {
        self.groups.iter().any(|g| g == group)
    }

    fn logout(&self) {
        self.logouts.fetch_add(1, Ordering::SeqCst);
    }
}

/// Repository accepting a fixed set of users
#[derive(Default)]
pub struct FakeRepository {
    users: HashMap<String, (String, Vec<String>)>,
    pub logins: AtomicUsize,
    pub logouts: Arc<AtomicUsize>,
}

impl FakeRepository {
    pub fn with_user(mut self, user_id: &str, password: &str, groups: &[&str]) -> Self {
        self.users.insert(
            user_id.to_string(),
            (
                password.to_string(),
                groups.iter().map(|g| g.to_string()).collect(),
            ),
        );
        self
    }
}

#[async_trait::async_trait]
impl Repository for FakeRepository {
    async fn login(&self, credentials: &Credentials) -> Result<Box<dyn Session>> {
        self.logins.fetch_add(1, Ordering::SeqCst);
        match self.users.get(&credentials.user_id) {
            Some((password, groups)) if *password == credentials.password => {
                Ok(Box::new(FakeSession {
                    user_id: credentials.user_id.clone(),
                    groups: groups.clone(),
                    logouts: self.logouts.clone(),
                }))
            }
            _ => Err(anyhow!("login failed")),
        }
    }
}

/// Authentication support that authenticates every request as the same user, or none
#[derive(Default)]
pub struct FakeAuthSupport {
    pub user: Option<(String, Vec<String>)>,
    pub logouts: Arc<AtomicUsize>,
}

impl FakeAuthSupport {
    pub fn authenticating(user_id: &str, groups: &[&str]) -> Self {
        Self {
            user: Some((
                user_id.to_string(),
                groups.iter().map(|g| g.to_string()).collect(),
            )),
            logouts: Arc::default(),
        }
    }
}

#[async_trait::async_trait]
impl AuthenticationSupport for FakeAuthSupport {
    async fn handle_security(&self, _parts: &dyn RequestParts) -> Result<Option<Box<dyn Session>>> {
        Ok(self.user.as_ref().map(|(user_id, groups)| {
            Box::new(FakeSession {
                user_id: user_id.clone(),
                groups: groups.clone(),
                logouts: self.logouts.clone(),
            }) as Box<dyn Session>
        }))
    }
}

#[derive(Default)]
pub struct FakeAuthenticator {
    pub logins: AtomicUsize,
    pub logouts: AtomicUsize,
}

#[async_trait::async_trait]
impl Authenticator for FakeAuthenticator {
    async fn login(&self, _parts: &dyn RequestParts) -> Result<()> {
        self.logins.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn logout(&self, _parts: &dyn RequestParts) -> Result<()> {
        self.logouts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub fn request(authorization: Option<&str>) -> HttpRequestParts {
    let mut headers = http::HeaderMap::new();
    if let Some(value) = authorization {
        headers.insert(
            http::header::AUTHORIZATION,
            value.parse().expect("header value"),
        );
    }
    HttpRequestParts {
        headers,
        method: http::Method::GET,
        uri: "/system/console/bundles".parse().expect("uri"),
    }
}
