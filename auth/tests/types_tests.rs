mod common;

use common::request;
use webconsole_auth::types::{Credentials, ProviderKind, RequestParts};

#[test]
fn test_parse_basic_header() {
    let credentials = Credentials::from_basic_header("Basic YWRtaW46YWRtaW4=").expect("parse");
    assert_eq!(credentials, Credentials::new("admin", "admin"));
}

#[test]
fn test_basic_header_password_with_colons() {
    let credentials = Credentials::from_basic_header("Basic b3BzOnBhOnNz").expect("parse");
    assert_eq!(credentials.user_id, "ops");
    assert_eq!(credentials.password, "pa:ss");
}

#[test]
fn test_basic_header_errors() {
    assert!(Credentials::from_basic_header("Bearer YWRtaW46YWRtaW4=").is_err());
    assert!(Credentials::from_basic_header("Basic not base64!").is_err());
    assert!(Credentials::from_basic_header("Basic bm9jb2xvbg==").is_err());
}

#[test]
fn test_credentials_debug_hides_password() {
    let debug = format!("{:?}", Credentials::new("admin", "secret"));
    assert!(debug.contains("admin"));
    assert!(!debug.contains("secret"));
}

#[test]
fn test_http_request_parts() {
    let parts = request(Some("Basic YWRtaW46YWRtaW4="));
    assert_eq!(parts.authorization_header(), Some("Basic YWRtaW46YWRtaW4="));
    assert_eq!(parts.method(), &http::Method::GET);
    assert_eq!(parts.uri().path(), "/system/console/bundles");
    assert_eq!(request(None).authorization_header(), None);
}

#[test]
fn test_provider_kind_display() {
    assert_eq!(ProviderKind::Repository.to_string(), "repository");
    assert_eq!(ProviderKind::Sling.to_string(), "sling");
}
