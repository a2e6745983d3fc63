use super::*;
use crate::test_support::MemoryStore;

fn client() -> AppwriteClient {
    AppwriteClient::new(ServiceConfig::new("https://baas.example.com/v1", "proj-1").unwrap())
}

fn query_pairs(raw: &str) -> Vec<(String, String)> {
    Url::parse(raw)
        .unwrap()
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

// =============================================================
// oauth_authorization_url
// =============================================================

#[test]
fn oauth_url_targets_provider_path() {
    let raw = client()
        .oauth_authorization_url("alibaba", "https://app.test/", "https://app.test/", &["read:user"])
        .unwrap();
    let url = Url::parse(&raw).unwrap();
    assert_eq!(url.host_str(), Some("baas.example.com"));
    assert_eq!(url.path(), "/v1/account/sessions/oauth2/alibaba");
}

#[test]
fn oauth_url_carries_redirects_scopes_and_project() {
    let raw = client()
        .oauth_authorization_url(
            "alibaba",
            "https://app.test/landing",
            "https://app.test/landing?x=1",
            &["read:user", "user:email"],
        )
        .unwrap();
    assert_eq!(
        query_pairs(&raw),
        vec![
            ("success".to_owned(), "https://app.test/landing".to_owned()),
            ("failure".to_owned(), "https://app.test/landing?x=1".to_owned()),
            ("scopes[0]".to_owned(), "read:user".to_owned()),
            ("scopes[1]".to_owned(), "user:email".to_owned()),
            ("project".to_owned(), "proj-1".to_owned()),
        ]
    );
}

#[test]
fn oauth_url_rejects_empty_provider() {
    let err = client()
        .oauth_authorization_url("", "https://app.test/", "https://app.test/", &[])
        .unwrap_err();
    assert!(matches!(err, SessionError::Provider(_)));
}

#[test]
fn oauth_url_rejects_provider_with_path_characters() {
    let err = client()
        .oauth_authorization_url("../admin", "https://app.test/", "https://app.test/", &[])
        .unwrap_err();
    assert!(matches!(err, SessionError::Provider(_)));
}

#[test]
fn create_oauth_authorization_url_delegates_to_builder() {
    let c = client();
    let direct = c
        .oauth_authorization_url("alibaba", "https://app.test/", "https://app.test/", &["read:user"])
        .unwrap();
    let via_trait = futures::executor::block_on(c.create_oauth_authorization_url(
        "alibaba",
        "https://app.test/",
        "https://app.test/",
        &["read:user"],
    ))
    .unwrap();
    assert_eq!(direct, via_trait);
}

// =============================================================
// identities_url
// =============================================================

#[test]
fn identities_url_encodes_provider_equal_query() {
    let raw = client().identities_url("alibaba").unwrap();
    assert!(raw.starts_with("https://baas.example.com/v1/account/identities?"));
    let pairs = query_pairs(&raw);
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].0, "queries[0]");
    let query: serde_json::Value = serde_json::from_str(&pairs[0].1).unwrap();
    assert_eq!(
        query,
        serde_json::json!({ "method": "equal", "attribute": "provider", "values": ["alibaba"] })
    );
}

// =============================================================
// failure_message / account_status_error
// =============================================================

#[test]
fn failure_message_prefers_service_message() {
    let body = r#"{"message":"Invalid token passed in the request.","code":401,"type":"user_invalid_token"}"#;
    assert_eq!(failure_message(401, body), "Invalid token passed in the request. (user_invalid_token)");
}

#[test]
fn failure_message_falls_back_to_status() {
    assert_eq!(failure_message(502, "<html>bad gateway</html>"), "request failed: 502");
    assert_eq!(failure_message(500, r#"{"message":""}"#), "request failed: 500");
}

#[test]
fn account_status_error_maps_unauthorized_to_no_session() {
    assert_eq!(account_status_error(401, ""), SessionError::NoActiveSession);
}

#[test]
fn account_status_error_maps_other_statuses_to_transport() {
    assert_eq!(
        account_status_error(503, r#"{"message":"maintenance"}"#),
        SessionError::Transport("maintenance".to_owned())
    );
}

// =============================================================
// cookie fallback
// =============================================================

fn client_with_store() -> (AppwriteClient, Rc<MemoryStore>) {
    let store = Rc::new(MemoryStore::default());
    let config = ServiceConfig::new("https://baas.example.com/v1", "proj-1").unwrap();
    (AppwriteClient::with_store(config, store.clone()), store)
}

#[test]
fn fallback_cookies_absent_until_service_issues_one() {
    let (c, _store) = client_with_store();
    assert_eq!(c.fallback_cookies(), None);
}

#[test]
fn returned_fallback_header_is_persisted_and_replayed() {
    let (c, store) = client_with_store();
    c.remember_fallback_cookies(Some(r#"{"a_session_proj-1":"abc"}"#));
    assert_eq!(store.raw(COOKIE_FALLBACK_KEY).as_deref(), Some(r#"{"a_session_proj-1":"abc"}"#));
    assert_eq!(c.fallback_cookies().as_deref(), Some(r#"{"a_session_proj-1":"abc"}"#));
}

#[test]
fn missing_or_empty_header_keeps_previous_fallback() {
    let (c, _store) = client_with_store();
    c.remember_fallback_cookies(Some("first"));
    c.remember_fallback_cookies(None);
    c.remember_fallback_cookies(Some(""));
    assert_eq!(c.fallback_cookies().as_deref(), Some("first"));
}

#[test]
fn empty_stored_fallback_is_not_sent() {
    let (c, store) = client_with_store();
    store.set(COOKIE_FALLBACK_KEY, "");
    assert_eq!(c.fallback_cookies(), None);
}

#[test]
fn forget_drops_stored_fallback() {
    let (c, store) = client_with_store();
    c.remember_fallback_cookies(Some("abc"));
    c.forget_fallback_cookies();
    assert_eq!(store.raw(COOKIE_FALLBACK_KEY), None);
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn ssr_build_stubs_remote_calls() {
    let err = futures::executor::block_on(client().get_current_user()).unwrap_err();
    assert!(matches!(err, SessionError::Transport(_)));
}
