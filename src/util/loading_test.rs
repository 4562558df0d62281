use super::*;
use crate::page::Page;
use crate::test_helpers::FakePage;

#[test]
fn show_then_hide_restores_button() {
    let page = FakePage::at("/login/").with_element("submit", &["btn"]);
    let button = page.element_by_id("submit").unwrap();

    show_loading(&button);
    let state = page.element("submit");
    assert!(state.disabled);
    assert_eq!(state.html, SPINNER_HTML);

    hide_loading(&button, "Log in");
    let state = page.element("submit");
    assert!(!state.disabled);
    assert_eq!(state.text, "Log in");
}
