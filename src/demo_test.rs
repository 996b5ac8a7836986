use super::*;

use crate::config::STORAGE_KEY;
use crate::modal::{Slot, Templates};
use crate::store::MemoryStorage;
use crate::testing::{FakePaint, FakeScheduler, FakeSurface};
use crate::util::color::is_gray;

struct Harness {
    demo: Rc<ColorDemo<FakeSurface, MemoryStorage>>,
    modal: Rc<Modal<FakeSurface>>,
    surface: FakeSurface,
    paint: Rc<FakePaint>,
    scheduler: Rc<FakeScheduler>,
}

fn harness_with(backend: MemoryStorage, surface: Option<FakeSurface>) -> Harness {
    let quiet = Logger::disabled("demo");
    let fake = surface.clone().unwrap_or_default();
    let modal = Modal::new(surface, Templates::default(), quiet.clone());
    let paint = Rc::new(FakePaint::default());
    let scheduler = Rc::new(FakeScheduler::default());
    let deps = DemoDeps {
        modal: Rc::clone(&modal),
        store: KvStore::new(backend, quiet.clone()),
        paint: paint.clone(),
        scheduler: scheduler.clone(),
    };
    let demo = ColorDemo::new(deps, &PageConfig::default(), 42, quiet);
    Harness { demo, modal, surface: fake, paint, scheduler }
}

fn harness(backend: MemoryStorage) -> Harness {
    harness_with(backend, Some(FakeSurface::with_dialog_templates()))
}

fn title_shown(h: &Harness) -> Option<String> {
    h.surface.shown().and_then(|node| node.text(Slot::Title))
}

// =============================================================
// restore
// =============================================================

#[test]
fn restore_uses_default_when_nothing_persisted() {
    let h = harness(MemoryStorage::new());
    assert_eq!(h.demo.restore(), "#111");
    assert_eq!(h.paint.last().as_deref(), Some("#111"));
    assert_eq!(h.demo.current(), "#111");
}

#[test]
fn restore_applies_persisted_color() {
    let backend = MemoryStorage::new();
    backend.insert_raw(STORAGE_KEY, "\"#3a3a3a\"");
    let h = harness(backend);
    assert_eq!(h.demo.restore(), "#3a3a3a");
    assert_eq!(h.paint.painted(), vec!["#3a3a3a"]);
}

#[test]
fn restore_trims_padded_persisted_color() {
    let backend = MemoryStorage::new();
    backend.insert_raw(STORAGE_KEY, "\"  #3a3a3a \"");
    let h = harness(backend);
    assert_eq!(h.demo.restore(), "#3a3a3a");
    assert_eq!(h.paint.painted(), vec!["#3a3a3a"]);
    assert_eq!(h.demo.current(), "#3a3a3a");
}

#[test]
fn restore_falls_back_on_unparsable_value() {
    for raw in ["#3a3a3a", "{", "\"blue\"", "12", "null"] {
        let backend = MemoryStorage::new();
        backend.insert_raw(STORAGE_KEY, raw);
        let h = harness(backend);
        assert_eq!(h.demo.restore(), "#111", "raw value {raw:?}");
    }
}

#[test]
fn restore_falls_back_when_storage_unavailable() {
    let h = harness(MemoryStorage::unavailable());
    assert_eq!(h.demo.restore(), "#111");
}

#[test]
fn changed_color_survives_a_reload() {
    let h = harness(MemoryStorage::new());
    let color = h.demo.change_color();
    let raw = h.demo.store().backend().raw(STORAGE_KEY).unwrap();

    let reloaded = MemoryStorage::new();
    reloaded.insert_raw(STORAGE_KEY, &raw);
    let after = harness(reloaded);
    assert_eq!(after.demo.restore(), color);
}

// =============================================================
// trigger flow
// =============================================================

#[test]
fn trigger_asks_for_confirmation_first() {
    let h = harness(MemoryStorage::new());
    h.demo.restore();
    h.demo.trigger();

    assert!(h.modal.is_open());
    assert_eq!(title_shown(&h).as_deref(), Some(CONFIRM_TITLE));
    assert_eq!(h.paint.painted().len(), 1);
}

#[test]
fn confirming_paints_a_gray_and_acknowledges_after_delay() {
    let h = harness(MemoryStorage::new());
    h.demo.restore();
    h.demo.trigger();
    h.surface.click(Slot::Ok);

    let color = h.paint.last().unwrap();
    assert_ne!(color, "#111");
    assert_eq!(color.len(), 7);
    assert!(is_gray(&color), "{color} is not gray");
    assert_eq!(h.demo.current(), color);
    assert_eq!(h.demo.store().get(STORAGE_KEY, String::new()), color);

    // Acknowledgment is only scheduled, not shown yet.
    assert!(!h.modal.is_open());
    assert_eq!(h.scheduler.pending(), vec![Duration::from_millis(400)]);

    h.scheduler.run_all();
    assert!(h.modal.is_open());
    assert_eq!(title_shown(&h).as_deref(), Some(ACK_TITLE));
    let message = h.surface.shown().and_then(|n| n.text(Slot::Message)).unwrap();
    assert!(message.contains(&color));

    h.surface.click(Slot::Ok);
    assert!(!h.modal.is_open());
}

#[test]
fn cancelling_leaves_color_unchanged() {
    let backend = MemoryStorage::new();
    backend.insert_raw(STORAGE_KEY, "\"#3a3a3a\"");
    let h = harness(backend);
    h.demo.restore();
    h.demo.trigger();
    h.surface.click(Slot::Cancel);

    assert!(!h.modal.is_open());
    assert_eq!(h.paint.painted(), vec!["#3a3a3a"]);
    assert_eq!(h.demo.current(), "#3a3a3a");
    assert!(h.scheduler.pending().is_empty());
    assert_eq!(h.demo.store().backend().raw(STORAGE_KEY).as_deref(), Some("\"#3a3a3a\""));
}

#[test]
fn escape_on_confirmation_acts_like_cancel() {
    let h = harness(MemoryStorage::new());
    h.modal.install();
    h.demo.restore();
    h.demo.trigger();
    h.surface.press("Escape");

    assert!(!h.modal.is_open());
    assert!(h.scheduler.pending().is_empty());
    assert_eq!(h.paint.painted().len(), 1);
}

#[test]
fn storage_failure_still_paints_and_acknowledges() {
    let h = harness(MemoryStorage::with_quota(4));
    h.demo.trigger();
    h.surface.click(Slot::Ok);

    assert!(h.paint.last().is_some_and(|c| is_gray(&c)));
    assert_eq!(h.scheduler.pending().len(), 1);
    assert_eq!(h.demo.store().backend().raw(STORAGE_KEY), None);
}

#[test]
fn trigger_without_overlay_does_nothing() {
    let h = harness_with(MemoryStorage::new(), None);
    h.demo.trigger();
    assert!(!h.modal.is_open());
    assert!(h.paint.painted().is_empty());
    assert!(h.scheduler.pending().is_empty());
}

#[test]
fn same_seed_gives_same_sequence() {
    let a = harness(MemoryStorage::new());
    let b = harness(MemoryStorage::new());
    for _ in 0..5 {
        assert_eq!(a.demo.change_color(), b.demo.change_color());
    }
}
