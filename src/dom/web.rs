use std::fmt::Display;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, EventTarget, HtmlElement};

use super::spec::ElementSpec;
use crate::util::logger::{Logger, TARGET};

/// An attached event listener. Dropping it unsubscribes.
pub struct Listener {
    target: EventTarget,
    event: String,
    callback: Option<Closure<dyn FnMut(Event)>>,
}

impl Listener {
    /// Attach `handler` to `target` for `event`.
    ///
    /// # Errors
    ///
    /// Returns the browser's exception when the listener cannot be added.
    pub fn new(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) -> Result<Self, JsValue> {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self { target: target.clone(), event: event.to_owned(), callback: Some(callback) })
    }

    /// Keep the listener attached for the rest of the page's life.
    pub fn forget(mut self) {
        if let Some(callback) = self.callback.take() {
            callback.forget();
        }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let Some(callback) = &self.callback else {
            return;
        };
        if let Err(err) = self
            .target
            .remove_event_listener_with_callback(&self.event, callback.as_ref().unchecked_ref())
        {
            log::debug!(target: TARGET, "failed to remove {} listener: {err:?}", self.event);
        }
    }
}

/// Handle onto the page document.
pub struct Dom {
    document: Document,
    log: Logger,
}

impl Dom {
    pub fn new(document: Document, log: Logger) -> Self {
        Self { document, log }
    }

    /// The current window's document, if there is one.
    pub fn from_window(log: Logger) -> Option<Self> {
        let document = web_sys::window().and_then(|w| w.document());
        if document.is_none() {
            log.error("no document available");
        }
        document.map(|document| Self::new(document, log))
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn root(&self) -> Option<Element> {
        self.document.document_element()
    }

    fn report<T>(&self, op: impl Display, result: Result<T, JsValue>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.log.warn(format_args!("{op} failed: {err:?}"));
                None
            }
        }
    }

    fn missing(&self, op: &str) {
        self.log.debug(format_args!("{op}: no element, skipping"));
    }

    // =========================================================================
    // LOOKUP
    // =========================================================================

    pub fn query(&self, selector: &str) -> Option<Element> {
        let found = self.report(format_args!("query {selector}"), self.document.query_selector(selector))?;
        if found.is_none() {
            self.log.debug(format_args!("nothing matches {selector}"));
        }
        found
    }

    pub fn query_all(&self, selector: &str) -> Vec<Element> {
        let Some(list) = self.report(format_args!("query_all {selector}"), self.document.query_selector_all(selector))
        else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| match node.dyn_into::<Element>() {
                Ok(el) => Some(el),
                Err(_) => None,
            })
            .collect()
    }

    /// Query inside `scope` instead of the whole document.
    pub fn query_in(&self, scope: Option<&Element>, selector: &str) -> Option<Element> {
        let Some(scope) = scope else {
            self.missing("query_in");
            return None;
        };
        self.report(format_args!("query_in {selector}"), scope.query_selector(selector))?
    }

    pub fn by_id(&self, id: &str) -> Option<Element> {
        let found = self.document.get_element_by_id(id);
        if found.is_none() {
            self.log.debug(format_args!("no element with id {id}"));
        }
        found
    }

    // =========================================================================
    // MUTATION
    // =========================================================================

    pub fn set_attr(&self, el: Option<&Element>, name: &str, value: &str) {
        match el {
            Some(el) => {
                self.report(format_args!("set_attr {name}"), el.set_attribute(name, value));
            }
            None => self.missing("set_attr"),
        }
    }

    pub fn remove_attr(&self, el: Option<&Element>, name: &str) {
        match el {
            Some(el) => {
                self.report(format_args!("remove_attr {name}"), el.remove_attribute(name));
            }
            None => self.missing("remove_attr"),
        }
    }

    pub fn add_class(&self, el: Option<&Element>, class: &str) {
        match el {
            Some(el) => {
                self.report(format_args!("add_class {class}"), el.class_list().add_1(class));
            }
            None => self.missing("add_class"),
        }
    }

    pub fn remove_class(&self, el: Option<&Element>, class: &str) {
        match el {
            Some(el) => {
                self.report(format_args!("remove_class {class}"), el.class_list().remove_1(class));
            }
            None => self.missing("remove_class"),
        }
    }

    /// Force `class` on or off.
    pub fn toggle_class(&self, el: Option<&Element>, class: &str, on: bool) {
        match el {
            Some(el) => {
                self.report(format_args!("toggle_class {class}"), el.class_list().toggle_with_force(class, on));
            }
            None => self.missing("toggle_class"),
        }
    }

    pub fn has_class(&self, el: Option<&Element>, class: &str) -> bool {
        el.is_some_and(|el| el.class_list().contains(class))
    }

    pub fn set_style(&self, el: Option<&Element>, property: &str, value: &str) {
        let Some(el) = el.and_then(|el| el.dyn_ref::<HtmlElement>()) else {
            self.missing("set_style");
            return;
        };
        self.report(format_args!("set_style {property}"), el.style().set_property(property, value));
    }

    pub fn show(&self, el: Option<&Element>) {
        let Some(el) = el.and_then(|el| el.dyn_ref::<HtmlElement>()) else {
            self.missing("show");
            return;
        };
        self.report("show", el.style().remove_property("display"));
    }

    pub fn hide(&self, el: Option<&Element>) {
        self.set_style(el, "display", "none");
    }

    pub fn set_text(&self, el: Option<&Element>, text: &str) {
        match el {
            Some(el) => el.set_text_content(Some(text)),
            None => self.missing("set_text"),
        }
    }

    pub fn set_html(&self, el: Option<&Element>, html: &str) {
        match el {
            Some(el) => el.set_inner_html(html),
            None => self.missing("set_html"),
        }
    }

    // =========================================================================
    // EVENTS
    // =========================================================================

    /// Subscribe `handler` to `event` on `el`. Drop the returned listener to
    /// unsubscribe.
    pub fn on(&self, el: Option<&Element>, event: &str, handler: impl FnMut(Event) + 'static) -> Option<Listener> {
        let Some(el) = el else {
            self.missing("on");
            return None;
        };
        self.report(format_args!("on {event}"), Listener::new(el.as_ref(), event, handler))
    }

    pub fn on_document(&self, event: &str, handler: impl FnMut(Event) + 'static) -> Option<Listener> {
        self.report(format_args!("on_document {event}"), Listener::new(self.document.as_ref(), event, handler))
    }

    // =========================================================================
    // CONSTRUCTION
    // =========================================================================

    /// Build the element tree `spec` describes and append it to
    /// `spec.parent` when that resolves. Bindings live as long as the page.
    pub fn create(&self, spec: &ElementSpec) -> Option<Element> {
        let el = self.build(spec)?;
        if let Some(selector) = &spec.parent {
            match self.query(selector) {
                Some(parent) => {
                    self.report(format_args!("append to {selector}"), parent.append_child(&el));
                }
                None => self.log.warn(format_args!("parent {selector} missing, element left detached")),
            }
        }
        Some(el)
    }

    fn build(&self, spec: &ElementSpec) -> Option<Element> {
        let el = self.report(format_args!("create <{}>", spec.tag), self.document.create_element(&spec.tag))?;
        if let Some(classes) = spec.class_attr() {
            self.set_attr(Some(&el), "class", &classes);
        }
        for (name, value) in &spec.attributes {
            self.set_attr(Some(&el), name, value);
        }
        if let Some(text) = &spec.text {
            el.set_text_content(Some(text));
        }
        for child in &spec.children {
            if let Some(child_el) = self.build(child) {
                self.report(format_args!("append <{}>", child.tag), el.append_child(&child_el));
            }
        }
        for binding in &spec.bindings {
            let handler = binding.handler.clone();
            if let Some(listener) = self.on(Some(&el), &binding.event, move |_| handler()) {
                listener.forget();
            }
        }
        Some(el)
    }
}
