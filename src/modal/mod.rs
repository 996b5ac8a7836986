//! Singleton modal dialog.
//!
//! DESIGN
//! ======
//! `Modal` owns the open/closed state and the dialog flows (`alert`,
//! `confirm`); everything that touches the page goes through a
//! `ModalSurface`. The browser surface (`DomSurface`) toggles classes on the
//! overlay and clones `<template>` content; tests drive the same state
//! machine through an in-memory surface.
//!
//! Dismissal has three independent triggers: a click whose target is the
//! backdrop itself, a click on the close control, and Escape. They are
//! registered once by `install`, never per open/close cycle.
//!
//! ERROR HANDLING
//! ==============
//! A page without the overlay gets a `Modal` with no surface: every call logs
//! `MissingOverlay` and does nothing, and `is_open` stays false. A missing
//! template or slot aborts that dialog before anything on screen changes.

#[cfg(feature = "csr")]
mod web;

#[cfg(feature = "csr")]
pub use web::DomSurface;

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::config::PageConfig;
use crate::util::logger::Logger;

/// Key that dismisses an open dialog.
pub const DISMISS_KEY: &str = "Escape";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModalState {
    #[default]
    Closed,
    Open,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModalError {
    #[error("modal overlay root is missing from the page")]
    MissingOverlay,
    #[error("modal overlay has no content slot matching {0}")]
    MissingContentSlot(String),
    #[error("modal template not found: {0}")]
    MissingTemplate(String),
    #[error("modal template {template} has no `{slot}` slot")]
    MissingSlot { template: String, slot: Slot },
}

/// Named fill/bind points inside a dialog template (`data-slot="..."`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    Title,
    Message,
    /// Affirmative (or only) button.
    Ok,
    Cancel,
}

impl Slot {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Message => "message",
            Self::Ok => "ok",
            Self::Cancel => "cancel",
        }
    }

    /// CSS selector matching this slot inside a template.
    #[must_use]
    pub fn selector(self) -> String {
        format!("[data-slot=\"{}\"]", self.as_str())
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What `open` puts into the content slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Content<N> {
    /// Preformatted markup.
    Markup(String),
    /// A detached node, e.g. a cloned template.
    Node(N),
}

impl<N> From<&str> for Content<N> {
    fn from(markup: &str) -> Self {
        Self::Markup(markup.to_owned())
    }
}

impl<N> From<String> for Content<N> {
    fn from(markup: String) -> Self {
        Self::Markup(markup)
    }
}

/// Callbacks a surface wires to its dismissal gestures.
#[derive(Clone)]
pub struct Triggers {
    /// Overlay click; the flag says whether the target was the backdrop itself.
    pub backdrop: Rc<dyn Fn(bool)>,
    pub close_control: Rc<dyn Fn()>,
    /// Document keydown with the key name as reported by the browser.
    pub key: Rc<dyn Fn(&str)>,
}

/// Page-side operations the modal needs.
pub trait ModalSurface {
    type Node;

    fn set_visible(&self, visible: bool);

    fn set_scroll_lock(&self, locked: bool);

    /// Replace whatever the content slot shows.
    fn replace_content(&self, content: Content<Self::Node>);

    /// Clone the named template, or `None` when it does not exist.
    fn instantiate(&self, template: &str) -> Option<Self::Node>;

    /// Set the text of `slot` inside `node`. Returns false when the slot is absent.
    fn fill_slot(&self, node: &Self::Node, slot: Slot, text: &str) -> bool;

    /// Run `action` when `slot` inside `node` is clicked. Returns false when
    /// the slot is absent.
    fn bind_slot(&self, node: &Self::Node, slot: Slot, action: Rc<dyn Fn()>) -> bool;

    /// Drop bindings made for a dialog that will not be shown.
    fn discard_bindings(&self);

    fn install_triggers(&self, triggers: Triggers);
}

/// Template ids for the built-in dialogs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Templates {
    pub alert: String,
    pub confirm: String,
}

impl Default for Templates {
    fn default() -> Self {
        Self::from_config(&PageConfig::default())
    }
}

impl Templates {
    #[must_use]
    pub fn from_config(config: &PageConfig) -> Self {
        Self { alert: config.alert_template.clone(), confirm: config.confirm_template.clone() }
    }
}

pub struct Modal<S: ModalSurface> {
    surface: Option<S>,
    state: Cell<ModalState>,
    installed: Cell<bool>,
    templates: Templates,
    log: Logger,
}

impl<S: ModalSurface + 'static> Modal<S> {
    /// `surface` is `None` when the page has no overlay root.
    pub fn new(surface: Option<S>, templates: Templates, log: Logger) -> Rc<Self> {
        Rc::new(Self { surface, state: Cell::new(ModalState::Closed), installed: Cell::new(false), templates, log })
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn state(&self) -> ModalState {
        self.state.get()
    }

    pub fn is_open(&self) -> bool {
        self.state.get() == ModalState::Open
    }

    fn require_surface(&self) -> Result<&S, ModalError> {
        self.surface.as_ref().ok_or(ModalError::MissingOverlay)
    }

    // =========================================================================
    // OPEN / CLOSE
    // =========================================================================

    /// Show `content`, replacing anything already displayed.
    pub fn open(&self, content: impl Into<Content<S::Node>>) {
        let surface = match self.require_surface() {
            Ok(surface) => surface,
            Err(err) => {
                self.log.warn(err);
                return;
            }
        };
        surface.replace_content(content.into());
        if self.state.get() == ModalState::Closed {
            surface.set_visible(true);
            surface.set_scroll_lock(true);
            self.state.set(ModalState::Open);
            self.log.debug("opened");
        } else {
            self.log.debug("content replaced");
        }
    }

    /// Hide the overlay and release the scroll lock. No-op when closed.
    pub fn close(&self) {
        if self.state.get() == ModalState::Closed {
            return;
        }
        if let Some(surface) = &self.surface {
            surface.set_visible(false);
            surface.set_scroll_lock(false);
        }
        self.state.set(ModalState::Closed);
        self.log.debug("closed");
    }

    // =========================================================================
    // DIALOGS
    // =========================================================================

    fn prepare(surface: &S, template: &str, title: &str, message: &str) -> Result<S::Node, ModalError> {
        let node = surface
            .instantiate(template)
            .ok_or_else(|| ModalError::MissingTemplate(template.to_owned()))?;
        for (slot, text) in [(Slot::Title, title), (Slot::Message, message)] {
            if !surface.fill_slot(&node, slot, text) {
                return Err(ModalError::MissingSlot { template: template.to_owned(), slot });
            }
        }
        Ok(node)
    }

    fn bind(surface: &S, node: &S::Node, template: &str, slot: Slot, action: Rc<dyn Fn()>) -> Result<(), ModalError> {
        if surface.bind_slot(node, slot, action) {
            Ok(())
        } else {
            Err(ModalError::MissingSlot { template: template.to_owned(), slot })
        }
    }

    fn closer(self: &Rc<Self>) -> Rc<dyn Fn()> {
        let weak = Rc::downgrade(self);
        Rc::new(move || {
            if let Some(modal) = weak.upgrade() {
                modal.close();
            }
        })
    }

    /// Show a one-button dialog built from the alert template.
    ///
    /// # Errors
    ///
    /// Returns `MissingOverlay`, `MissingTemplate` or `MissingSlot`; nothing
    /// on screen changes in that case.
    pub fn try_alert(self: &Rc<Self>, title: &str, message: &str) -> Result<(), ModalError> {
        let surface = self.require_surface()?;
        let template = &self.templates.alert;
        let node = Self::prepare(surface, template, title, message)?;
        if let Err(err) = Self::bind(surface, &node, template, Slot::Ok, self.closer()) {
            surface.discard_bindings();
            return Err(err);
        }
        self.open(Content::Node(node));
        Ok(())
    }

    /// Show a two-button dialog. The affirmative button closes and then runs
    /// `on_confirm`; the negative button only closes.
    ///
    /// # Errors
    ///
    /// Same as `try_alert`.
    pub fn try_confirm(self: &Rc<Self>, title: &str, message: &str, on_confirm: impl Fn() + 'static) -> Result<(), ModalError> {
        let surface = self.require_surface()?;
        let template = &self.templates.confirm;
        let node = Self::prepare(surface, template, title, message)?;

        let close = self.closer();
        let affirm: Rc<dyn Fn()> = Rc::new(move || {
            close();
            on_confirm();
        });
        let bound = Self::bind(surface, &node, template, Slot::Ok, affirm)
            .and_then(|()| Self::bind(surface, &node, template, Slot::Cancel, self.closer()));
        if let Err(err) = bound {
            surface.discard_bindings();
            return Err(err);
        }
        self.open(Content::Node(node));
        Ok(())
    }

    pub fn alert(self: &Rc<Self>, title: &str, message: &str) {
        if let Err(err) = self.try_alert(title, message) {
            self.log.warn(format_args!("alert aborted: {err}"));
        }
    }

    pub fn confirm(self: &Rc<Self>, title: &str, message: &str, on_confirm: impl Fn() + 'static) {
        if let Err(err) = self.try_confirm(title, message, on_confirm) {
            self.log.warn(format_args!("confirm aborted: {err}"));
        }
    }

    // =========================================================================
    // DISMISSAL
    // =========================================================================

    /// Overlay click. Closes only when the target is the backdrop itself.
    pub fn dismiss_backdrop(&self, target_is_backdrop: bool) -> bool {
        if !target_is_backdrop || !self.is_open() {
            return false;
        }
        self.close();
        true
    }

    pub fn dismiss_control(&self) -> bool {
        if !self.is_open() {
            return false;
        }
        self.close();
        true
    }

    /// Keydown. Closes on Escape while open.
    pub fn dismiss_key(&self, key: &str) -> bool {
        if key != DISMISS_KEY || !self.is_open() {
            return false;
        }
        self.close();
        true
    }

    /// Wire the dismissal triggers. Later calls are no-ops.
    pub fn install(self: &Rc<Self>) {
        let surface = match self.require_surface() {
            Ok(surface) => surface,
            Err(err) => {
                self.log.warn(err);
                return;
            }
        };
        if self.installed.replace(true) {
            self.log.debug("dismissal triggers already installed");
            return;
        }

        let backdrop = Rc::downgrade(self);
        let control = Rc::downgrade(self);
        let key = Rc::downgrade(self);
        surface.install_triggers(Triggers {
            backdrop: Rc::new(move |target_is_backdrop| {
                if let Some(modal) = backdrop.upgrade() {
                    modal.dismiss_backdrop(target_is_backdrop);
                }
            }),
            close_control: Rc::new(move || {
                if let Some(modal) = control.upgrade() {
                    modal.dismiss_control();
                }
            }),
            key: Rc::new(move |pressed: &str| {
                if let Some(modal) = key.upgrade() {
                    modal.dismiss_key(pressed);
                }
            }),
        });
        self.log.debug("dismissal triggers installed");
    }
}
