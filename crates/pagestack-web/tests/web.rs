#![forbid(unsafe_code)]
#![cfg(target_arch = "wasm32")]

//! In-browser mount tests.
//!
//! Run: `wasm-pack test --headless --chrome crates/pagestack-web`

use pagestack_core::DeckConfig;
use pagestack_web::{MountError, MountOptions, Mounted, mount, mount_with};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, Element, Event, EventInit, HtmlElement, KeyboardEvent, KeyboardEventInit};

wasm_bindgen_test_configure!(run_in_browser);

const FIXTURE: &str = r##"
<button class="menu-button">Menu</button>
<nav class="pages-nav">
  <a class="link--page" href="#home">Home</a>
  <a class="link--page" href="#docs">Docs</a>
  <a class="link--page" href="#blog">Blog</a>
  <a class="link--page" href="#about">About</a>
  <a class="link--page" href="#contact">Contact</a>
</nav>
<div class="pages-stack">
  <div class="page" id="home"><span class="inner">home</span></div>
  <div class="page" id="docs"><span class="inner">docs</span></div>
  <div class="page" id="blog"><span class="inner">blog</span></div>
  <div class="page" id="about"><span class="inner">about</span></div>
  <div class="page" id="contact"><span class="inner">contact</span></div>
</div>
<a id="about-link" href="#">about us</a>
"##;

fn document() -> Document {
    web_sys::window()
        .and_then(|w| w.document())
        .expect("browser document")
}

fn install_fixture(html: &str) {
    document()
        .body()
        .expect("body")
        .set_inner_html(html);
}

fn element(selector: &str) -> Element {
    document()
        .query_selector(selector)
        .expect("valid selector")
        .expect("element present")
}

fn click(selector: &str) {
    element(selector)
        .dyn_into::<HtmlElement>()
        .expect("html element")
        .click();
}

fn has_class(selector: &str, class: &str) -> bool {
    element(selector).class_list().contains(class)
}

fn fire_transition_end(selector: &str) {
    let init = EventInit::new();
    init.set_bubbles(true);
    let event = Event::new_with_event_init_dict("transitionend", &init).expect("event");
    element(selector).dispatch_event(&event).expect("dispatch");
}

fn press_escape() {
    let init = KeyboardEventInit::new();
    init.set_key("Escape");
    let event =
        KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).expect("keyboard event");
    document().dispatch_event(&event).expect("dispatch");
}

fn mounted() -> Mounted {
    install_fixture(FIXTURE);
    mount_with(MountOptions::default().with_shortcut("about-link", "docs")).expect("mount")
}

#[wasm_bindgen_test]
fn mount_lays_out_first_page() {
    let app = mounted();
    assert_eq!(app.current_page(), "home");
    assert!(!app.is_menu_open());
    assert!(!has_class("#home", "page--inactive"));
    assert!(has_class("#docs", "page--inactive"));
    assert!(!has_class(".pages-stack", "pages-stack--open"));
}

#[wasm_bindgen_test]
fn nav_click_opens_page_after_own_transition_end() {
    let app = mounted();
    click("button.menu-button");
    assert!(app.is_menu_open());
    assert!(has_class("button.menu-button", "menu-button--open"));
    assert!(has_class(".pages-nav", "pages-nav--open"));

    click(".pages-nav a[href='#blog']");
    assert_eq!(app.current_page(), "blog");
    assert!(app.is_transitioning());
    // The active flag only moves once the transition finishes.
    assert!(has_class("#blog", "page--inactive"));

    // Bubbled from content: ignored.
    fire_transition_end("#blog .inner");
    assert!(app.is_transitioning());

    fire_transition_end("#blog");
    assert!(!app.is_transitioning());
    assert!(!app.is_menu_open());
    assert!(!has_class(".pages-nav", "pages-nav--open"));
    assert!(!has_class("#blog", "page--inactive"));
    assert!(has_class("#home", "page--inactive"));
}

#[wasm_bindgen_test]
fn escape_closes_menu_back_to_current_page() {
    let app = mounted();
    click("button.menu-button");
    press_escape();
    assert!(app.is_transitioning());
    fire_transition_end("#home");
    assert!(!app.is_menu_open());
    assert_eq!(app.current_page(), "home");
}

#[wasm_bindgen_test]
fn shortcut_opens_its_page() {
    let app = mounted();
    click("#about-link");
    assert_eq!(app.current_page(), "docs");
    fire_transition_end("#docs");
    assert!(!app.is_transitioning());
}

#[wasm_bindgen_test]
fn drop_detaches_listeners() {
    let app = mounted();
    drop(app);
    click("button.menu-button");
    assert!(!has_class("button.menu-button", "menu-button--open"));
}

#[wasm_bindgen_test]
fn invalid_config_is_rejected_before_mounting() {
    install_fixture(FIXTURE);
    let options =
        MountOptions::default().with_config(DeckConfig::default().with_opacity_step(0.9));
    assert!(matches!(mount_with(options), Err(MountError::Config(_))));
    click("button.menu-button");
    assert!(!has_class("button.menu-button", "menu-button--open"));
}

#[wasm_bindgen_test]
fn missing_stack_is_reported() {
    install_fixture(r#"<button class="menu-button"></button><nav class="pages-nav"></nav>"#);
    assert!(matches!(
        mount(),
        Err(MountError::MissingElement(selector)) if selector == ".pages-stack"
    ));
}
