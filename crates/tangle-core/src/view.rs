//! View types: per-element handlers selected by markup class names.
//!
//! A view type is registered under a name; during the construction scan the
//! engine instantiates one fresh view per (element, class) pair, so each
//! element keeps independent instance state (drag position, hover) while
//! sharing per-type behavior.

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::diag::{Diagnostic, DiagnosticSink};
use crate::dom::{Document, NodeId};
use crate::model::Variables;
use crate::value::Value;

/// Semantic UI events fed by the host through [`Tangle::dispatch`].
///
/// These are already-recognized gestures: pointer translation deltas are
/// measured from the pointer-down position, and the engine does no gesture
/// recognition of its own.
///
/// [`Tangle::dispatch`]: crate::Tangle::dispatch
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    Click,
    PointerDown,
    /// Translation since pointer-down.
    PointerMove { dx: f64, dy: f64 },
    PointerUp,
    PointerEnter,
    PointerLeave,
}

/// Cross-instance coordination state, owned by the engine and handed to
/// every view. Replaces the module-level globals a widget type would
/// otherwise smuggle in; currently just the "some widget is dragging" flag
/// that keeps only one adjustable value active at a time.
#[derive(Clone, Default)]
pub struct SharedViewState {
    drag_active: Rc<Cell<bool>>,
}

impl SharedViewState {
    pub fn drag_active(&self) -> bool {
        self.drag_active.get()
    }

    pub fn set_drag_active(&self, active: bool) {
        self.drag_active.set(active);
    }
}

/// One-time setup context handed to [`View::initialize`] at discovery.
pub struct ViewInit<'a> {
    pub(crate) element: NodeId,
    pub(crate) document: &'a mut Document,
    pub(crate) variables: &'a Variables,
    pub(crate) var_names: &'a [String],
    pub(crate) shared: &'a SharedViewState,
}

impl ViewInit<'_> {
    pub fn element(&self) -> NodeId {
        self.element
    }

    pub fn document(&self) -> &Document {
        self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        self.document
    }

    /// Variable names declared on the element, in attribute order.
    pub fn var_names(&self) -> &[String] {
        self.var_names
    }

    pub fn variables(&self) -> &Variables {
        self.variables
    }

    pub fn shared(&self) -> &SharedViewState {
        self.shared
    }

    /// Attribute read on the bound element, with a parsed-number fallback.
    pub fn number_attr(&self, name: &str, default: f64) -> f64 {
        self.document
            .attr(self.element, name)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }
}

/// Event context handed to [`View::event`]. Reads see current values;
/// writes are staged and applied as one `set_values` batch after every
/// handler for the dispatch has returned.
pub struct EventCx<'a> {
    pub(crate) element: NodeId,
    pub(crate) document: &'a mut Document,
    pub(crate) variables: &'a Variables,
    pub(crate) sink: &'a dyn DiagnosticSink,
    pub(crate) pending: &'a mut Vec<(String, Value)>,
    pub(crate) shared: &'a SharedViewState,
}

impl EventCx<'_> {
    pub fn element(&self) -> NodeId {
        self.element
    }

    pub fn document(&self) -> &Document {
        self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        self.document
    }

    pub fn shared(&self) -> &SharedViewState {
        self.shared
    }

    /// Current value of a variable; unknown names report a diagnostic and
    /// read as the zero value, like [`Tangle::get_value`](crate::Tangle::get_value).
    pub fn value(&self, name: &str) -> Value {
        match self.variables.get(name) {
            Some(value) => value.clone(),
            None => {
                self.sink
                    .report(&Diagnostic::UnknownVariable(name.to_string()));
                Value::zero()
            }
        }
    }

    /// Stages a variable write.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.pending.push((name.into(), value.into()));
    }
}

/// A per-element handler. All hooks are optional; a type that overrides
/// [`View::update`] must also report it via [`View::handles_update`] so the
/// engine knows not to fall back to the default text setter.
pub trait View {
    /// One-time setup at discovery (read widget attributes, stash the bound
    /// variable names, inject helper nodes).
    fn initialize(&mut self, _cx: &mut ViewInit<'_>) {}

    /// Whether this view consumes variable changes itself.
    fn handles_update(&self) -> bool {
        false
    }

    /// Called when a watched variable changes. `values` holds the current
    /// values of all declared variables, in declaration order.
    fn update(&mut self, _doc: &mut Document, _element: NodeId, _values: &[Value]) {}

    /// Semantic UI event on the bound element.
    fn event(&mut self, _cx: &mut EventCx<'_>, _event: &Event) {}
}

pub type ViewFactory = Rc<dyn Fn() -> Box<dyn View>>;

/// Maps markup class names to view-type factories.
#[derive(Default)]
pub struct ViewRegistry {
    factories: HashMap<String, ViewFactory>,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a view type; the factory runs once per matching
    /// (element, class) pair.
    pub fn register<V, F>(&mut self, name: impl Into<String>, factory: F)
    where
        V: View + 'static,
        F: Fn() -> V + 'static,
    {
        self.factories
            .insert(name.into(), Rc::new(move || Box::new(factory())));
    }

    pub fn get(&self, name: &str) -> Option<&ViewFactory> {
        self.factories.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }
}
