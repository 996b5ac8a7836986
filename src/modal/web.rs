use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{DocumentFragment, Element, Event, EventTarget, HtmlTemplateElement, KeyboardEvent, Node};

use super::{Content, ModalError, ModalSurface, Slot, Triggers};
use crate::config::PageConfig;
use crate::dom::{Dom, Listener};
use crate::util::logger::Logger;

/// Modal surface backed by the page's overlay element and `<template>`s.
pub struct DomSurface {
    dom: Rc<Dom>,
    overlay: Element,
    content: Element,
    close_control: Option<Element>,
    open_class: String,
    scroll_lock_class: String,
    /// Button listeners bound to a dialog that has not been shown yet.
    pending: RefCell<Vec<Listener>>,
    /// Button listeners of the dialog currently shown.
    active: RefCell<Vec<Listener>>,
    triggers: RefCell<Vec<Listener>>,
    log: Logger,
}

impl DomSurface {
    /// Resolve the overlay, its content slot and close control.
    ///
    /// # Errors
    ///
    /// Returns `MissingOverlay` or `MissingContentSlot`. A missing close
    /// control only disables that trigger.
    pub fn locate(dom: Rc<Dom>, config: &PageConfig, log: Logger) -> Result<Self, ModalError> {
        let overlay = dom.query(&config.overlay_selector).ok_or(ModalError::MissingOverlay)?;
        let content = dom
            .query_in(Some(&overlay), &config.content_selector)
            .ok_or_else(|| ModalError::MissingContentSlot(config.content_selector.clone()))?;
        let close_control = dom.query_in(Some(&overlay), &config.close_selector);
        if close_control.is_none() {
            log.warn(format_args!("no close control matching {}", config.close_selector));
        }
        Ok(Self {
            dom,
            overlay,
            content,
            close_control,
            open_class: config.open_class.clone(),
            scroll_lock_class: config.scroll_lock_class.clone(),
            pending: RefCell::default(),
            active: RefCell::default(),
            triggers: RefCell::default(),
            log,
        })
    }

    fn slot(node: &Node, slot: Slot) -> Option<Element> {
        let fragment = node.dyn_ref::<DocumentFragment>()?;
        match fragment.query_selector(&slot.selector()) {
            Ok(found) => found,
            Err(_) => None,
        }
    }
}

impl ModalSurface for DomSurface {
    type Node = Node;

    fn set_visible(&self, visible: bool) {
        self.dom.toggle_class(Some(&self.overlay), &self.open_class, visible);
        self.dom.set_attr(Some(&self.overlay), "aria-hidden", if visible { "false" } else { "true" });
    }

    fn set_scroll_lock(&self, locked: bool) {
        self.dom.toggle_class(self.dom.root().as_ref(), &self.scroll_lock_class, locked);
    }

    fn replace_content(&self, content: Content<Node>) {
        match content {
            Content::Markup(markup) => self.dom.set_html(Some(&self.content), &markup),
            Content::Node(node) => {
                self.dom.set_html(Some(&self.content), "");
                if let Err(err) = self.content.append_child(&node) {
                    self.log.warn(format_args!("could not insert dialog content: {err:?}"));
                }
            }
        }
        // Listeners of the replaced dialog unsubscribe as they drop.
        let bound = self.pending.take();
        *self.active.borrow_mut() = bound;
    }

    fn instantiate(&self, template: &str) -> Option<Node> {
        let el = self.dom.by_id(template)?;
        let Some(template_el) = el.dyn_ref::<HtmlTemplateElement>() else {
            self.log.warn(format_args!("#{template} is not a <template>"));
            return None;
        };
        match template_el.content().clone_node_with_deep(true) {
            Ok(node) => Some(node),
            Err(err) => {
                self.log.warn(format_args!("could not clone #{template}: {err:?}"));
                None
            }
        }
    }

    fn fill_slot(&self, node: &Node, slot: Slot, text: &str) -> bool {
        let Some(el) = Self::slot(node, slot) else {
            return false;
        };
        el.set_text_content(Some(text));
        true
    }

    fn bind_slot(&self, node: &Node, slot: Slot, action: Rc<dyn Fn()>) -> bool {
        let Some(el) = Self::slot(node, slot) else {
            return false;
        };
        let Some(listener) = self.dom.on(Some(&el), "click", move |_| action()) else {
            return false;
        };
        self.pending.borrow_mut().push(listener);
        true
    }

    fn discard_bindings(&self) {
        self.pending.borrow_mut().clear();
    }

    fn install_triggers(&self, triggers: Triggers) {
        let mut installed = self.triggers.borrow_mut();

        let backdrop: EventTarget = self.overlay.clone().into();
        let on_backdrop = triggers.backdrop;
        installed.extend(self.dom.on(Some(&self.overlay), "click", move |ev: Event| {
            let target_is_backdrop = ev.target().is_some_and(|target| target == backdrop);
            on_backdrop(target_is_backdrop);
        }));

        let on_close = triggers.close_control;
        installed.extend(self.dom.on(self.close_control.as_ref(), "click", move |_| on_close()));

        let on_key = triggers.key;
        installed.extend(self.dom.on_document("keydown", move |ev: Event| {
            if let Some(key_event) = ev.dyn_ref::<KeyboardEvent>() {
                on_key(&key_event.key());
            }
        }));
    }
}
