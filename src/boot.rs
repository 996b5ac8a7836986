//! Composition root.
//!
//! SYSTEM CONTEXT
//! ==============
//! Runs once after the shell is mounted. Every service is built here as an
//! explicit instance and handed to the pieces that need it: the DOM handle,
//! the modal and its surface, the store, and the demo. Element handles are
//! resolved here once and never re-queried.
//!
//! Startup order: config → modal + dismissal triggers → store → restore the
//! persisted color → register the trigger click.

use std::rc::Rc;

use crate::config::{CONFIG_ELEMENT_ID, PageConfig};
use crate::demo::{ColorDemo, DemoDeps, RegionPaint, TimeoutScheduler};
use crate::dom::{Dom, Listener};
use crate::modal::{DomSurface, Modal, Templates};
use crate::store::{KvStore, LocalStorage, MemoryStorage, StorageBackend};
use crate::util::logger::Logger;

type PageModal = Modal<DomSurface>;
type PageDemo = ColorDemo<DomSurface, Box<dyn StorageBackend>>;

/// Everything the running page owns.
pub struct Page {
    dom: Rc<Dom>,
    modal: Rc<PageModal>,
    demo: Rc<PageDemo>,
    _trigger: Option<Listener>,
}

impl Page {
    pub fn dom(&self) -> &Dom {
        &self.dom
    }

    pub fn modal(&self) -> &Rc<PageModal> {
        &self.modal
    }

    pub fn demo(&self) -> &Rc<PageDemo> {
        &self.demo
    }

    /// Keep every service and listener alive until the page unloads.
    pub fn keep(self) {
        std::mem::forget(self);
    }
}

/// Read the inline config block, falling back to defaults.
fn load_config(dom: &Dom, log: &Logger) -> PageConfig {
    let Some(el) = dom.by_id(CONFIG_ELEMENT_ID) else {
        return PageConfig::default();
    };
    let raw = el.text_content().unwrap_or_default();
    match PageConfig::from_json(&raw) {
        Ok(config) => config,
        Err(err) => {
            log.error(format_args!("{err}; using defaults"));
            PageConfig::default()
        }
    }
}

fn open_backend(log: &Logger) -> Box<dyn StorageBackend> {
    match LocalStorage::open() {
        Ok(storage) => Box::new(storage),
        Err(err) => {
            log.warn(format_args!("{err}; colors will not survive a reload"));
            Box::new(MemoryStorage::new())
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn seed() -> u64 {
    js_sys::Date::now() as u64
}

/// Wire the page. Returns `None` only when there is no document at all.
pub fn boot() -> Option<Page> {
    let log = Logger::new("boot");
    let dom = Rc::new(Dom::from_window(log.with_label("dom"))?);
    let config = load_config(&dom, &log);

    let surface = match DomSurface::locate(Rc::clone(&dom), &config, log.with_label("modal")) {
        Ok(surface) => Some(surface),
        Err(err) => {
            log.error(err);
            None
        }
    };
    let modal = Modal::new(surface, Templates::from_config(&config), log.with_label("modal"));
    modal.install();

    let deps = DemoDeps {
        modal: Rc::clone(&modal),
        store: KvStore::new(open_backend(&log), log.with_label("store")),
        paint: Rc::new(RegionPaint::locate(Rc::clone(&dom), &config.region_selector)),
        scheduler: Rc::new(TimeoutScheduler),
    };
    let demo = ColorDemo::new(deps, &config, seed(), log.with_label("demo"));
    demo.restore();

    let on_click = Rc::clone(&demo);
    let trigger = dom.on(dom.query(&config.trigger_selector).as_ref(), "click", move |_| on_click.trigger());
    if trigger.is_none() {
        log.warn(format_args!("no trigger matching {}", config.trigger_selector));
    }

    log.success("page ready");
    Some(Page { dom, modal, demo, _trigger: trigger })
}
