//! Declarative element descriptions.
//!
//! `ElementSpec` replaces an untyped options bag with named fields. Defaults:
//! no parent, no classes, no attributes, no text, no children, no bindings.

#[cfg(test)]
#[path = "spec_test.rs"]
mod spec_test;

use std::fmt;
use std::rc::Rc;

/// Event callback attached to a built element.
pub type Handler = Rc<dyn Fn()>;

#[derive(Clone)]
pub struct Binding {
    pub event: String,
    pub handler: Handler,
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding").field("event", &self.event).finish_non_exhaustive()
    }
}

#[derive(Clone, Debug, Default)]
pub struct ElementSpec {
    pub tag: String,
    /// Selector of the element to append to once built. Children of another
    /// spec ignore this and attach to their parent spec.
    pub parent: Option<String>,
    pub classes: Vec<String>,
    pub attributes: Vec<(String, String)>,
    pub text: Option<String>,
    pub children: Vec<ElementSpec>,
    pub bindings: Vec<Binding>,
}

impl ElementSpec {
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into(), ..Self::default() }
    }

    #[must_use]
    pub fn parent(mut self, selector: impl Into<String>) -> Self {
        self.parent = Some(selector.into());
        self
    }

    /// Add one or more whitespace-separated classes, skipping duplicates.
    #[must_use]
    pub fn class(mut self, classes: &str) -> Self {
        for class in classes.split_whitespace() {
            if !self.classes.iter().any(|c| c == class) {
                self.classes.push(class.to_owned());
            }
        }
        self
    }

    /// Set an attribute. Setting the same name twice keeps the last value.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(existing) => existing.1 = value,
            None => self.attributes.push((name, value)),
        }
        self
    }

    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn child(mut self, child: ElementSpec) -> Self {
        self.children.push(child);
        self
    }

    #[must_use]
    pub fn on(mut self, event: impl Into<String>, handler: impl Fn() + 'static) -> Self {
        self.bindings.push(Binding { event: event.into(), handler: Rc::new(handler) });
        self
    }

    /// Classes joined as a `class` attribute value, or `None` when empty.
    #[must_use]
    pub fn class_attr(&self) -> Option<String> {
        if self.classes.is_empty() { None } else { Some(self.classes.join(" ")) }
    }

    /// Number of elements this spec builds, itself included.
    #[must_use]
    pub fn element_count(&self) -> usize {
        1 + self.children.iter().map(ElementSpec::element_count).sum::<usize>()
    }
}
