mod common;

use common::FakeSession;
use serial_test::serial;
use std::sync::Arc;
use webconsole_auth::access::{ACCESS_CONFIG_ENV, AccessConfig};

fn session(user_id: &str, groups: &[&str]) -> FakeSession {
    FakeSession {
        user_id: user_id.to_string(),
        groups: groups.iter().map(|g| g.to_string()).collect(),
        logouts: Arc::default(),
    }
}

#[test]
fn test_default_admits_admin_only() {
    let access = AccessConfig::default();
    let admitted = access.admit(&session("admin", &[])).expect("admin admitted");
    assert_eq!(admitted.user_id, "admin");
    assert!(admitted.groups.is_empty());
    assert!(access.admit(&session("anonymous", &[])).is_none());
}

#[test]
fn test_admit_through_group() {
    let access = AccessConfig {
        users: vec![],
        groups: vec!["console-admins".to_string(), "ops".to_string()],
    };
    let admitted = access
        .admit(&session("jane", &["ops", "everyone"]))
        .expect("group member admitted");
    assert_eq!(admitted.user_id, "jane");
    assert_eq!(admitted.groups, vec!["ops".to_string()]);
    assert!(access.admit(&session("joe", &["everyone"])).is_none());
}

#[test]
#[serial]
fn test_from_env() {
    unsafe {
        std::env::remove_var(ACCESS_CONFIG_ENV);
    }
    assert_eq!(AccessConfig::from_env().expect("default"), AccessConfig::default());

    unsafe {
        std::env::set_var(ACCESS_CONFIG_ENV, r#"{"groups": ["ops"]}"#);
    }
    let access = AccessConfig::from_env().expect("parse");
    assert_eq!(access.users, vec!["admin".to_string()]);
    assert_eq!(access.groups, vec!["ops".to_string()]);

    unsafe {
        std::env::set_var(ACCESS_CONFIG_ENV, "not json");
    }
    assert!(AccessConfig::from_env().is_err());

    unsafe {
        std::env::remove_var(ACCESS_CONFIG_ENV);
    }
}
