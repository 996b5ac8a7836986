//! "Change background color" demo.
//!
//! Trigger → confirmation dialog → on confirm: random gray applied to the
//! page region and persisted → after a fixed delay, an acknowledgment dialog.
//! Cancelling changes nothing. On load, `restore` repaints the persisted
//! color, falling back to the configured default.

#[cfg(test)]
#[path = "demo_test.rs"]
mod demo_test;

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::config::PageConfig;
use crate::modal::{Modal, ModalSurface};
use crate::store::{KvStore, StorageBackend};
use crate::util::color::{is_hex_color, random_gray};
use crate::util::logger::Logger;

pub const CONFIRM_TITLE: &str = "Change color?";
pub const CONFIRM_MESSAGE: &str = "The background will be repainted with a random shade of gray.";
pub const ACK_TITLE: &str = "Success!";

/// One-shot delayed execution. Scheduled tasks cannot be cancelled.
pub trait Scheduler {
    fn after(&self, delay: Duration, task: Box<dyn FnOnce()>);
}

/// Applies a background color to the demo's page region.
pub trait Paint {
    fn paint_background(&self, color: &str);
}

/// Collaborators the demo is wired to by the composition root.
pub struct DemoDeps<S: ModalSurface, B: StorageBackend> {
    pub modal: Rc<Modal<S>>,
    pub store: KvStore<B>,
    pub paint: Rc<dyn Paint>,
    pub scheduler: Rc<dyn Scheduler>,
}

pub struct ColorDemo<S: ModalSurface, B: StorageBackend> {
    modal: Rc<Modal<S>>,
    store: KvStore<B>,
    paint: Rc<dyn Paint>,
    scheduler: Rc<dyn Scheduler>,
    rng: RefCell<SmallRng>,
    storage_key: String,
    default_color: String,
    ack_delay: Duration,
    current: RefCell<String>,
    log: Logger,
}

impl<S: ModalSurface + 'static, B: StorageBackend + 'static> ColorDemo<S, B> {
    pub fn new(deps: DemoDeps<S, B>, config: &PageConfig, seed: u64, log: Logger) -> Rc<Self> {
        Rc::new(Self {
            modal: deps.modal,
            store: deps.store,
            paint: deps.paint,
            scheduler: deps.scheduler,
            rng: RefCell::new(SmallRng::seed_from_u64(seed)),
            storage_key: config.storage_key.clone(),
            default_color: config.default_color.clone(),
            ack_delay: config.ack_delay(),
            current: RefCell::new(config.default_color.clone()),
            log,
        })
    }

    /// Color currently applied to the region.
    pub fn current(&self) -> String {
        self.current.borrow().clone()
    }

    pub fn store(&self) -> &KvStore<B> {
        &self.store
    }

    /// Apply the persisted color, or the default when absent or invalid.
    pub fn restore(&self) -> String {
        let color = match self.store.get::<Option<String>>(&self.storage_key, None) {
            Some(color) if is_hex_color(&color) => color.trim().to_owned(),
            Some(color) => {
                self.log.warn(format_args!("ignoring persisted color {color:?}"));
                self.default_color.clone()
            }
            None => self.default_color.clone(),
        };
        self.paint.paint_background(&color);
        self.log.info(format_args!("restored background {color}"));
        *self.current.borrow_mut() = color.clone();
        color
    }

    /// Start the flow: ask for confirmation, change the color on "yes".
    pub fn trigger(self: &Rc<Self>) {
        let weak = Rc::downgrade(self);
        self.modal.confirm(CONFIRM_TITLE, CONFIRM_MESSAGE, move || {
            if let Some(demo) = weak.upgrade() {
                demo.change_color();
            }
        });
    }

    /// Paint and persist a new random gray, then schedule the acknowledgment.
    pub fn change_color(&self) -> String {
        let color = random_gray(&mut *self.rng.borrow_mut());
        self.paint.paint_background(&color);
        if self.store.set(&self.storage_key, color.as_str()) {
            self.log.success(format_args!("background changed to {color}"));
        } else {
            self.log.warn(format_args!("background changed to {color} but not persisted"));
        }
        *self.current.borrow_mut() = color.clone();

        let modal = Rc::clone(&self.modal);
        let message = format!("The background is now {color}.");
        self.scheduler.after(self.ack_delay, Box::new(move || modal.alert(ACK_TITLE, &message)));
        color
    }
}

// =============================================================================
// BROWSER BINDINGS
// =============================================================================

/// `setTimeout`-backed scheduler.
#[cfg(feature = "csr")]
pub struct TimeoutScheduler;

#[cfg(feature = "csr")]
impl Scheduler for TimeoutScheduler {
    fn after(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        gloo_timers::callback::Timeout::new(millis, task).forget();
    }
}

/// Paints the background of one page element.
#[cfg(feature = "csr")]
pub struct RegionPaint {
    dom: Rc<crate::dom::Dom>,
    region: Option<web_sys::Element>,
}

#[cfg(feature = "csr")]
impl RegionPaint {
    pub fn locate(dom: Rc<crate::dom::Dom>, selector: &str) -> Self {
        let region = dom.query(selector);
        Self { dom, region }
    }
}

#[cfg(feature = "csr")]
impl Paint for RegionPaint {
    fn paint_background(&self, color: &str) {
        self.dom.set_style(self.region.as_ref(), "background-color", color);
    }
}
