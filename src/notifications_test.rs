use super::*;
use crate::state::session::{AUTH_TOKEN_KEY, MemoryStore};
use crate::test_helpers::{FakePage, FakeTransport};
use futures::executor::block_on;
use serde_json::json;

const BADGE: &str = "notification-badge";

fn page_with_badge() -> FakePage {
    FakePage::at("/feed/").with_element(BADGE, &["badge", "d-none"])
}

fn signed_in() -> (MemoryStore, Session<MemoryStore>) {
    let store = MemoryStore::new();
    let session = Session::new(store.clone());
    session.sign_in("tok", &json!({ "id": 1 }));
    (store, session)
}

// =============================================================
// render_badge
// =============================================================

#[test]
fn positive_count_shows_exact_number() {
    let page = page_with_badge();
    render_badge(&page.element_by_id(BADGE).unwrap(), 5);
    let state = page.element(BADGE);
    assert_eq!(state.text, "5");
    assert!(!state.is_hidden());
}

#[test]
fn zero_count_hides_without_removing() {
    let page = FakePage::at("/feed/").with_element(BADGE, &["badge"]);
    render_badge(&page.element_by_id(BADGE).unwrap(), 0);
    let state = page.element(BADGE);
    assert!(state.is_hidden());
    assert!(!state.removed);
}

// =============================================================
// update_notification_badge
// =============================================================

#[test]
fn anonymous_poll_sends_no_request() {
    let page = page_with_badge();
    let session = Session::new(MemoryStore::new());
    let transport = FakeTransport::new();

    let outcome = block_on(update_notification_badge(&page, &session, &transport, &ClientConfig::default()));

    assert_eq!(outcome, PollOutcome::Skipped);
    assert!(transport.requests().is_empty());
}

#[test]
fn poll_renders_unread_count() {
    let page = page_with_badge();
    let (_store, session) = signed_in();
    let transport = FakeTransport::new().reply(200, json!({ "unread_count": 5, "total_count": 8 }));

    let outcome = block_on(update_notification_badge(&page, &session, &transport, &ClientConfig::default()));

    assert_eq!(outcome, PollOutcome::Updated(5));
    assert_eq!(page.element(BADGE).text, "5");
    assert!(!page.element(BADGE).is_hidden());
    let reqs = transport.requests();
    assert_eq!(reqs.len(), 1);
    assert_eq!(reqs[0].authorization().as_deref(), Some("Token tok"));
}

#[test]
fn poll_with_zero_hides_badge() {
    let page = FakePage::at("/feed/").with_element(BADGE, &["badge"]);
    let (_store, session) = signed_in();
    let transport = FakeTransport::new().reply(200, json!({ "unread_count": 0 }));

    block_on(update_notification_badge(&page, &session, &transport, &ClientConfig::default()));

    assert!(page.element(BADGE).is_hidden());
}

#[test]
fn repeated_polls_are_independent() {
    let page = page_with_badge();
    let (_store, session) = signed_in();
    let transport = FakeTransport::new()
        .reply(200, json!({ "unread_count": 3 }))
        .reply(200, json!({ "unread_count": 0 }));
    let config = ClientConfig::default();

    block_on(update_notification_badge(&page, &session, &transport, &config));
    assert!(!page.element(BADGE).is_hidden());
    block_on(update_notification_badge(&page, &session, &transport, &config));
    assert!(page.element(BADGE).is_hidden());
    assert_eq!(transport.requests().len(), 2);
}

#[test]
fn poll_failure_is_silent() {
    let page = page_with_badge();
    let (store, session) = signed_in();
    let transport = FakeTransport::new().reply_empty(500);

    let outcome = block_on(update_notification_badge(&page, &session, &transport, &ClientConfig::default()));

    assert_eq!(outcome, PollOutcome::Failed);
    assert!(page.alerts().is_empty());
    assert!(page.navigations().is_empty());
    assert!(page.element(BADGE).is_hidden());
    assert!(store.get(AUTH_TOKEN_KEY).is_some());
}

#[test]
fn poll_unauthorized_clears_session_without_redirect() {
    let page = page_with_badge();
    let (store, session) = signed_in();
    let transport = FakeTransport::new().reply(401, json!({ "detail": "Invalid token." }));

    let outcome = block_on(update_notification_badge(&page, &session, &transport, &ClientConfig::default()));

    assert_eq!(outcome, PollOutcome::Failed);
    assert!(store.is_empty());
    assert!(page.alerts().is_empty());
    assert!(page.scheduled_delays().is_empty());
}

#[test]
fn poll_without_badge_element_still_reports_count() {
    let page = FakePage::at("/feed/");
    let (_store, session) = signed_in();
    let transport = FakeTransport::new().reply(200, json!({ "unread_count": 2 }));
    let outcome = block_on(update_notification_badge(&page, &session, &transport, &ClientConfig::default()));
    assert_eq!(outcome, PollOutcome::Updated(2));
}

// =============================================================
// mark_all_read
// =============================================================

#[test]
fn mark_all_read_refreshes_badge() {
    let page = FakePage::at("/notifications/").with_element(BADGE, &["badge"]);
    let (_store, session) = signed_in();
    let transport = FakeTransport::new()
        .reply(200, json!({ "message": "Marked 4 notifications as read" }))
        .reply(200, json!({ "unread_count": 0 }));

    block_on(mark_all_read(&page, &session, &transport, &ClientConfig::default(), None)).unwrap();

    assert!(page.element(BADGE).is_hidden());
    let paths: Vec<String> = transport.requests().into_iter().map(|r| r.path).collect();
    assert_eq!(paths, vec!["/api/notifications/mark_all_read/", "/api/notifications/count/"]);
}

#[test]
fn mark_all_read_failure_is_presented() {
    let page = FakePage::at("/notifications/");
    let (_store, session) = signed_in();
    let transport = FakeTransport::new().reply_empty(500);

    let err = block_on(mark_all_read(&page, &session, &transport, &ClientConfig::default(), None)).unwrap_err();

    assert_eq!(err.status(), 500);
    assert_eq!(page.alerts(), vec![crate::feedback::SERVER_ERROR_MESSAGE.to_owned()]);
    assert_eq!(transport.requests().len(), 1);
}

#[test]
fn mark_all_read_without_credential_is_unauthorized() {
    let page = FakePage::at("/notifications/");
    let session = Session::new(MemoryStore::new());
    let transport = FakeTransport::new();

    let err = block_on(mark_all_read(&page, &session, &transport, &ClientConfig::default(), None)).unwrap_err();

    assert!(err.is_unauthorized());
    assert!(transport.requests().is_empty());
    page.run_timers();
    assert_eq!(page.navigations(), vec!["/login/".to_owned()]);
}
