//! Browser host: DOM surface, transition-end wiring and the JS entry point.
//!
//! # Invariants
//!
//! - Every listener registered at mount is removed when [`Mounted`] drops.
//! - Handlers never hold the host borrow across a JS call that could
//!   dispatch another of our handlers; a re-entrant event finds the host
//!   busy and is dropped with a debug log.
//! - Only a `transitionend` whose target is the panel itself completes a
//!   transition. Events bubbling from panel content are ignored.
//!
//! # Failure Modes
//!
//! - DOM writes that throw are logged at warn and skipped; the state
//!   machine is never rolled back.
//! - If the browser supports transitions but the stylesheet declares none,
//!   no `transitionend` ever arrives and the stack stays transitioning.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Object, Reflect};
use pagestack_core::{
    Arming, Bindings, Deck, InputBinder, Key, ManualNotifier, Markers, Outcome,
    PANEL_INACTIVE_CLASS, PageStack, PanelStyle, SignalOrigin, Surface, TransitionNotifier,
    TransitionTicket, UiEvent,
};
use tracing::{debug, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, KeyboardEvent};

use crate::error::MountError;
use crate::options::MountOptions;
use crate::style::{panel_style_properties, transition_end_event_name};

fn js_error(value: JsValue) -> MountError {
    MountError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}

// --- Surface ---

/// Writes projected styles and markers onto the page elements.
struct DomSurface {
    panels: Vec<HtmlElement>,
    menu_button: Element,
    nav: Element,
    stack: Element,
}

impl DomSurface {
    fn toggle(element: &Element, class: &str, on: bool) {
        if let Err(e) = element.class_list().toggle_with_force(class, on) {
            warn!(class, error = ?e, "class toggle failed");
        }
    }
}

impl Surface for DomSurface {
    fn set_panel_style(&mut self, index: usize, style: &PanelStyle) {
        let Some(panel) = self.panels.get(index) else {
            return;
        };
        let css = panel.style();
        for (property, value) in panel_style_properties(style) {
            if let Err(e) = css.set_property(property, &value) {
                warn!(index, property, error = ?e, "style write failed");
            }
        }
    }

    fn set_panel_inactive(&mut self, index: usize, inactive: bool) {
        if let Some(panel) = self.panels.get(index) {
            Self::toggle(panel, PANEL_INACTIVE_CLASS, inactive);
        }
    }

    fn set_chrome(&mut self, markers: Markers) {
        for (flag, element) in [
            (Markers::MENU_BUTTON_OPEN, &self.menu_button),
            (Markers::NAV_OPEN, &self.nav),
            (Markers::STACK_OPEN, &self.stack),
        ] {
            if let Some(class) = flag.class_name() {
                Self::toggle(element, class, markers.contains(flag));
            }
        }
    }
}

// --- Notifier ---

/// Records armed tickets until the panel's own `transitionend` arrives.
/// Without CSS transitions every arm completes immediately.
struct DomNotifier {
    signals: ManualNotifier,
    transitions: bool,
}

impl TransitionNotifier for DomNotifier {
    fn arm(&mut self, panel: usize, ticket: TransitionTicket) -> Arming {
        if self.transitions {
            self.signals.arm(panel, ticket)
        } else {
            Arming::Immediate
        }
    }
}

// --- Host ---

struct Host {
    stack: PageStack<DomNotifier>,
    binder: InputBinder,
    surface: DomSurface,
}

impl Host {
    fn dispatch(&mut self, event: UiEvent) -> Outcome {
        let outcome = self.binder.dispatch(&mut self.stack, event);
        self.stack.present(&mut self.surface);
        outcome
    }

    fn transition_end(&mut self, panel: usize, origin: SignalOrigin) {
        // One event per transitioned property; only the first one counts.
        if !self.stack.notifier().signals.is_armed(panel) {
            return;
        }
        let tickets = self.stack.notifier_mut().signals.signal(panel, origin);
        for ticket in tickets {
            self.stack.finish_transition(ticket);
        }
        self.stack.present(&mut self.surface);
    }

    fn apply(&mut self, op: impl FnOnce(&mut PageStack<DomNotifier>) -> bool) -> bool {
        let changed = op(&mut self.stack);
        self.stack.present(&mut self.surface);
        changed
    }
}

type SharedHost = Rc<RefCell<Host>>;

fn handle_ui(host: &SharedHost, ui: UiEvent, event: &Event) {
    let Ok(mut host) = host.try_borrow_mut() else {
        debug!(?ui, "host busy; event dropped");
        return;
    };
    if host.dispatch(ui).prevent_default {
        event.prevent_default();
    }
}

// --- Listeners ---

/// An event listener that unregisters itself on drop.
struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn register(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, MountError> {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target
            .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
            .map_err(js_error)?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

// --- Mount ---

/// A widget mounted onto the document.
///
/// Dropping it detaches every listener; the DOM keeps its last styles.
pub struct Mounted {
    host: SharedHost,
    _listeners: Vec<Listener>,
}

impl Mounted {
    fn with_host<R>(&self, busy: R, f: impl FnOnce(&mut Host) -> R) -> R {
        match self.host.try_borrow_mut() {
            Ok(mut host) => f(&mut host),
            Err(_) => {
                debug!("host busy; call ignored");
                busy
            }
        }
    }

    fn read<R: Default>(&self, f: impl FnOnce(&PageStack<DomNotifier>) -> R) -> R {
        self.host
            .try_borrow()
            .map(|host| f(&host.stack))
            .unwrap_or_default()
    }

    /// Id of the current page.
    #[must_use]
    pub fn current_page(&self) -> String {
        self.read(|stack| stack.current_id().to_string())
    }

    /// Whether the menu is open (or a transition started from it).
    #[must_use]
    pub fn is_menu_open(&self) -> bool {
        self.read(PageStack::is_menu_open)
    }

    /// Whether a page transition is in flight.
    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.read(PageStack::is_transitioning)
    }

    /// Toggle the menu.
    pub fn toggle_menu(&self) -> bool {
        self.with_host(false, |host| host.apply(PageStack::toggle_menu))
    }

    /// Close the menu, returning to the current page.
    pub fn close_menu(&self) -> bool {
        self.with_host(false, |host| host.apply(PageStack::close_menu))
    }

    /// Open the page with id `target`, or the current page for `None`.
    pub fn open_page(&self, target: Option<&str>) -> bool {
        self.with_host(false, |host| host.apply(|stack| stack.open_page(target)))
    }
}

fn query(root: &Document, selector: &str) -> Result<Element, MountError> {
    root.query_selector(selector)
        .map_err(js_error)?
        .ok_or_else(|| MountError::MissingElement(selector.to_owned()))
}

fn supports(style_target: &HtmlElement, property: &str) -> bool {
    Reflect::has(&style_target.style(), &JsValue::from_str(property)).unwrap_or(false)
}

/// Mount with the default selectors.
pub fn mount() -> Result<Mounted, MountError> {
    mount_with(MountOptions::default())
}

/// Mount using `options`.
pub fn mount_with(options: MountOptions) -> Result<Mounted, MountError> {
    console_error_panic_hook::set_once();

    options.config.validate()?;

    let window = web_sys::window().ok_or(MountError::NoWindow)?;
    let document = window.document().ok_or(MountError::NoDocument)?;

    let stack_el = query(&document, &options.stack_selector)?;
    let menu_button = query(&document, &options.menu_button_selector)?;
    let nav = query(&document, &options.nav_selector)?;

    let children = stack_el.children();
    let panels: Vec<HtmlElement> = (0..children.length())
        .filter_map(|i| children.item(i))
        .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
        .collect();
    let deck = Deck::new(panels.iter().map(|p| p.id()))?;

    let nav_list = nav
        .query_selector_all(&options.nav_item_selector)
        .map_err(js_error)?;
    let nav_items: Vec<Element> = (0..nav_list.length())
        .filter_map(|i| nav_list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect();
    let mut bindings = Bindings::from_hrefs(
        nav_items
            .iter()
            .map(|item| item.get_attribute("href").unwrap_or_default()),
    );

    let mut shortcut_items = Vec::with_capacity(options.shortcuts.len());
    for (element_id, panel) in options.shortcuts {
        match document.get_element_by_id(&element_id) {
            Some(element) => {
                bindings = bindings.with_shortcut(panel);
                shortcut_items.push(element);
            }
            None => warn!(%element_id, "shortcut trigger not found; skipped"),
        }
    }

    let event_name = panels.first().and_then(|first| {
        transition_end_event_name(supports(first, "transition"), supports(first, "WebkitTransition"))
    });
    let notifier = DomNotifier {
        signals: ManualNotifier::new(),
        transitions: event_name.is_some(),
    };

    let host: SharedHost = Rc::new(RefCell::new(Host {
        stack: PageStack::new(deck, options.config, notifier),
        binder: InputBinder::new(bindings),
        surface: DomSurface {
            panels: panels.clone(),
            menu_button: menu_button.clone(),
            nav,
            stack: stack_el,
        },
    }));
    {
        let mut host = host.borrow_mut();
        let Host { stack, surface, .. } = &mut *host;
        stack.present_all(surface);
    }

    let mut listeners = Vec::new();

    let shared = Rc::clone(&host);
    listeners.push(Listener::register(&menu_button, "click", move |event| {
        handle_ui(&shared, UiEvent::MenuButtonClick, &event);
    })?);

    for (index, item) in nav_items.iter().enumerate() {
        let shared = Rc::clone(&host);
        listeners.push(Listener::register(item, "click", move |event| {
            handle_ui(&shared, UiEvent::NavItemClick(index), &event);
        })?);
    }

    for (index, item) in shortcut_items.iter().enumerate() {
        let shared = Rc::clone(&host);
        listeners.push(Listener::register(item, "click", move |event| {
            handle_ui(&shared, UiEvent::ShortcutClick(index), &event);
        })?);
    }

    for (index, panel) in panels.iter().enumerate() {
        let shared = Rc::clone(&host);
        listeners.push(Listener::register(panel, "click", move |event| {
            handle_ui(&shared, UiEvent::PanelClick(index), &event);
        })?);

        if let Some(name) = event_name {
            let shared = Rc::clone(&host);
            let own: JsValue = panel.clone().into();
            listeners.push(Listener::register(panel, name, move |event| {
                let origin = match event.target() {
                    Some(target) if Object::is(&target, &own) => SignalOrigin::Target,
                    _ => SignalOrigin::Descendant,
                };
                match shared.try_borrow_mut() {
                    Ok(mut host) => host.transition_end(index, origin),
                    Err(_) => debug!(index, "host busy; transition end dropped"),
                }
            })?);
        }
    }

    let shared = Rc::clone(&host);
    listeners.push(Listener::register(&document, "keydown", move |event| {
        let Some(key_event) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        let key = Key::from_dom(&key_event.key(), key_event.key_code());
        handle_ui(&shared, UiEvent::KeyDown(key), &event);
    })?);

    let (nav_len, shortcut_len) = {
        let host = host.borrow();
        let bindings = host.binder.bindings();
        (bindings.nav_len(), bindings.shortcut_len())
    };
    info!(
        panels = panels.len(),
        nav_items = nav_len,
        shortcuts = shortcut_len,
        transition_event = event_name.unwrap_or("none"),
        "page stack mounted"
    );

    Ok(Mounted {
        host,
        _listeners: listeners,
    })
}

// --- JS API ---

/// JS handle on a mounted page stack.
#[wasm_bindgen]
pub struct PageStackApp {
    mounted: Mounted,
}

#[wasm_bindgen]
impl PageStackApp {
    #[wasm_bindgen(js_name = currentPage)]
    pub fn current_page(&self) -> String {
        self.mounted.current_page()
    }

    #[wasm_bindgen(js_name = isMenuOpen)]
    pub fn is_menu_open(&self) -> bool {
        self.mounted.is_menu_open()
    }

    #[wasm_bindgen(js_name = isTransitioning)]
    pub fn is_transitioning(&self) -> bool {
        self.mounted.is_transitioning()
    }

    #[wasm_bindgen(js_name = toggleMenu)]
    pub fn toggle_menu(&self) -> bool {
        self.mounted.toggle_menu()
    }

    #[wasm_bindgen(js_name = closeMenu)]
    pub fn close_menu(&self) -> bool {
        self.mounted.close_menu()
    }

    #[wasm_bindgen(js_name = openPage)]
    pub fn open_page(&self, id: Option<String>) -> bool {
        self.mounted.open_page(id.as_deref())
    }
}

/// Mount onto the current document with the default selectors.
#[wasm_bindgen(js_name = mount)]
pub fn mount_app() -> Result<PageStackApp, JsValue> {
    mount()
        .map(|mounted| PageStackApp { mounted })
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
