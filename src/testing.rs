//! In-memory stand-ins for the browser seams, shared by unit tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use crate::demo::{Paint, Scheduler};
use crate::modal::{Content, ModalSurface, Slot, Triggers};

// =============================================================================
// MODAL SURFACE
// =============================================================================

/// A cloned template: the slots it declares plus whatever was filled/bound.
pub struct FakeNode {
    pub template: String,
    declared: Vec<Slot>,
    texts: RefCell<HashMap<Slot, String>>,
    actions: RefCell<HashMap<Slot, Rc<dyn Fn()>>>,
}

impl FakeNode {
    pub fn text(&self, slot: Slot) -> Option<String> {
        self.texts.borrow().get(&slot).cloned()
    }

    pub fn action(&self, slot: Slot) -> Option<Rc<dyn Fn()>> {
        self.actions.borrow().get(&slot).cloned()
    }
}

#[derive(Default)]
struct SurfaceState {
    visible: Cell<bool>,
    locked: Cell<bool>,
    content: RefCell<Option<Content<Rc<FakeNode>>>>,
    templates: RefCell<HashMap<String, Vec<Slot>>>,
    triggers: RefCell<Option<Triggers>>,
    installs: Cell<usize>,
    replaces: Cell<usize>,
    pending: Cell<usize>,
    active: Cell<usize>,
    discards: Cell<usize>,
}

/// Cheap-to-clone handle; the `Modal` owns one clone and the test keeps another.
#[derive(Clone, Default)]
pub struct FakeSurface {
    state: Rc<SurfaceState>,
}

impl FakeSurface {
    /// Surface with the alert and confirm templates the page normally declares.
    pub fn with_dialog_templates() -> Self {
        let surface = Self::default();
        surface.add_template("modal-alert", &[Slot::Title, Slot::Message, Slot::Ok]);
        surface.add_template("modal-confirm", &[Slot::Title, Slot::Message, Slot::Ok, Slot::Cancel]);
        surface
    }

    pub fn add_template(&self, name: &str, slots: &[Slot]) {
        self.state.templates.borrow_mut().insert(name.to_owned(), slots.to_vec());
    }

    pub fn visible(&self) -> bool {
        self.state.visible.get()
    }

    pub fn scroll_locked(&self) -> bool {
        self.state.locked.get()
    }

    pub fn installs(&self) -> usize {
        self.state.installs.get()
    }

    pub fn replaces(&self) -> usize {
        self.state.replaces.get()
    }

    /// Button bindings held by the dialog on screen.
    pub fn active_bindings(&self) -> usize {
        self.state.active.get()
    }

    /// Bindings made but not yet attached to shown content.
    pub fn pending_bindings(&self) -> usize {
        self.state.pending.get()
    }

    pub fn discards(&self) -> usize {
        self.state.discards.get()
    }

    pub fn markup(&self) -> Option<String> {
        match &*self.state.content.borrow() {
            Some(Content::Markup(markup)) => Some(markup.clone()),
            _ => None,
        }
    }

    /// The node currently in the content slot, if it came from a template.
    pub fn shown(&self) -> Option<Rc<FakeNode>> {
        match &*self.state.content.borrow() {
            Some(Content::Node(node)) => Some(Rc::clone(node)),
            _ => None,
        }
    }

    /// Click a bound button in the displayed dialog.
    pub fn click(&self, slot: Slot) {
        let action = self.shown().and_then(|node| node.action(slot));
        if let Some(action) = action {
            action();
        }
    }

    fn triggers(&self) -> Option<Triggers> {
        self.state.triggers.borrow().clone()
    }

    pub fn click_overlay(&self, on_backdrop: bool) {
        if let Some(triggers) = self.triggers() {
            (triggers.backdrop)(on_backdrop);
        }
    }

    pub fn click_close_control(&self) {
        if let Some(triggers) = self.triggers() {
            (triggers.close_control)();
        }
    }

    pub fn press(&self, key: &str) {
        if let Some(triggers) = self.triggers() {
            (triggers.key)(key);
        }
    }
}

impl ModalSurface for FakeSurface {
    type Node = Rc<FakeNode>;

    fn set_visible(&self, visible: bool) {
        self.state.visible.set(visible);
    }

    fn set_scroll_lock(&self, locked: bool) {
        self.state.locked.set(locked);
    }

    fn replace_content(&self, content: Content<Self::Node>) {
        self.state.replaces.set(self.state.replaces.get() + 1);
        self.state.active.set(self.state.pending.replace(0));
        *self.state.content.borrow_mut() = Some(content);
    }

    fn instantiate(&self, template: &str) -> Option<Self::Node> {
        let declared = self.state.templates.borrow().get(template)?.clone();
        Some(Rc::new(FakeNode {
            template: template.to_owned(),
            declared,
            texts: RefCell::default(),
            actions: RefCell::default(),
        }))
    }

    fn fill_slot(&self, node: &Self::Node, slot: Slot, text: &str) -> bool {
        if !node.declared.contains(&slot) {
            return false;
        }
        node.texts.borrow_mut().insert(slot, text.to_owned());
        true
    }

    fn bind_slot(&self, node: &Self::Node, slot: Slot, action: Rc<dyn Fn()>) -> bool {
        if !node.declared.contains(&slot) {
            return false;
        }
        node.actions.borrow_mut().insert(slot, action);
        self.state.pending.set(self.state.pending.get() + 1);
        true
    }

    fn discard_bindings(&self) {
        self.state.discards.set(self.state.discards.get() + 1);
        self.state.pending.set(0);
    }

    fn install_triggers(&self, triggers: Triggers) {
        self.state.installs.set(self.state.installs.get() + 1);
        *self.state.triggers.borrow_mut() = Some(triggers);
    }
}

// =============================================================================
// SCHEDULER / PAINT
// =============================================================================

type Task = Box<dyn FnOnce()>;

/// Collects delayed tasks until the test decides time has passed.
#[derive(Default)]
pub struct FakeScheduler {
    tasks: RefCell<Vec<(Duration, Task)>>,
}

impl FakeScheduler {
    pub fn pending(&self) -> Vec<Duration> {
        self.tasks.borrow().iter().map(|(delay, _)| *delay).collect()
    }

    /// Run every queued task in scheduling order.
    pub fn run_all(&self) {
        let tasks = std::mem::take(&mut *self.tasks.borrow_mut());
        for (_, task) in tasks {
            task();
        }
    }
}

impl Scheduler for FakeScheduler {
    fn after(&self, delay: Duration, task: Task) {
        self.tasks.borrow_mut().push((delay, task));
    }
}

#[derive(Default)]
pub struct FakePaint {
    painted: RefCell<Vec<String>>,
}

impl FakePaint {
    pub fn painted(&self) -> Vec<String> {
        self.painted.borrow().clone()
    }

    pub fn last(&self) -> Option<String> {
        self.painted.borrow().last().cloned()
    }
}

impl Paint for FakePaint {
    fn paint_background(&self, color: &str) {
        self.painted.borrow_mut().push(color.to_owned());
    }
}
