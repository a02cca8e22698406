//! The binding engine: discovery scan, setter table, and the
//! recompute-and-patch update cycle.

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use smallvec::SmallVec;

use crate::diag::{Diagnostic, DiagnosticSink, LogSink};
use crate::dom::{Document, NodeId};
use crate::format::{FormatRegistry, Formatter};
use crate::model::{Model, Variables};
use crate::value::Value;
use crate::view::{Event, EventCx, SharedViewState, View, ViewInit, ViewRegistry};

type VarList = SmallVec<[String; 2]>;

/// View types and formatters available to a [`Tangle`] instance.
///
/// The default registry knows only the `default` stringifier; collaborators
/// (e.g. `tangle-kit`) add their view classes and formats here before the
/// engine is constructed.
#[derive(Default)]
pub struct Registry {
    pub views: ViewRegistry,
    pub formats: FormatRegistry,
}

/// A registered reaction to one variable changing.
///
/// Setters are data rather than boxed closures, so the engine can
/// split-borrow the document, the views, and the variable map while firing.
enum SetterKind {
    /// Forward to a view's `update`. Single-variable bindings receive the
    /// fired value directly; multi-variable bindings re-read all their
    /// variables at fire time so they always see a consistent joint
    /// snapshot.
    View { slot: usize },
    /// Plain text binding: lazily prepend a text node, then rewrite its
    /// content with the resolved formatter on every fire.
    Text {
        text_node: Option<NodeId>,
        formatter: Formatter,
    },
}

struct Setter {
    element: NodeId,
    kind: SetterKind,
}

struct ViewSlot {
    view: Box<dyn View>,
    vars: VarList,
}

/// A reactive binding over one document: scans it once at construction,
/// then patches it on every variable change.
///
/// ```rust
/// use tangle_core::{Document, Element, FnModel, Tangle};
///
/// let mut doc = Document::new();
/// let root = doc.root();
/// doc.insert(root, Element::new("span").var("calories"));
///
/// let model = FnModel::new(
///     |vars| vars.set("cookies", 3),
///     |vars| {
///         let calories = vars.number("cookies") * 50.0;
///         vars.set("calories", calories);
///     },
/// );
///
/// let mut tangle = Tangle::new(doc, model);
/// assert_eq!(tangle.get_value("calories").as_number(), 150.0);
///
/// tangle.set_value("cookies", 4);
/// assert_eq!(tangle.get_value("calories").as_number(), 200.0);
/// ```
pub struct Tangle {
    document: Document,
    model: Box<dyn Model>,
    variables: Variables,
    views: Vec<ViewSlot>,
    setters: Vec<Setter>,
    by_variable: HashMap<String, Vec<usize>>,
    by_element: HashMap<NodeId, SmallVec<[usize; 2]>>,
    formats: FormatRegistry,
    shared: SharedViewState,
    sink: Rc<dyn DiagnosticSink>,
}

impl Tangle {
    /// Binds `model` to `document` with the default registry and the
    /// `log`-backed diagnostic sink.
    pub fn new(document: Document, model: impl Model + 'static) -> Self {
        Self::with_registry(document, model, Registry::default())
    }

    pub fn with_registry(document: Document, model: impl Model + 'static, registry: Registry) -> Self {
        Self::with_sink(document, model, registry, Rc::new(LogSink))
    }

    pub fn with_sink(
        document: Document,
        model: impl Model + 'static,
        registry: Registry,
        sink: Rc<dyn DiagnosticSink>,
    ) -> Self {
        let mut tangle = Tangle {
            document,
            model: Box::new(model),
            variables: Variables::new(),
            views: Vec::new(),
            setters: Vec::new(),
            by_variable: HashMap::new(),
            by_element: HashMap::new(),
            formats: registry.formats,
            shared: SharedViewState::default(),
            sink,
        };
        tangle.discover(&registry.views);
        tangle.update_model(true);
        tangle
    }

    // ------------------------------------------------------------------
    // discovery

    /// One-time scan: collect bindable elements, instantiate views, and
    /// build the setter table.
    fn discover(&mut self, registry: &ViewRegistry) {
        // Snapshot first: view initialization may mutate the tree, and a
        // live traversal would see those edits mid-scan.
        let interesting: Vec<NodeId> = self
            .document
            .descendants(self.document.root())
            .into_iter()
            .filter(|&id| {
                self.document.attr(id, "class").is_some()
                    || self.document.attr(id, "data-var").is_some()
            })
            .collect();

        for element in interesting {
            let var_names = self.document.var_names(element);
            let class_names: Vec<String> =
                self.document.classes(element).map(String::from).collect();

            let mut slots: SmallVec<[usize; 2]> = SmallVec::new();
            for class in &class_names {
                let Some(factory) = registry.get(class) else { continue };
                let mut view = factory();
                let mut cx = ViewInit {
                    element,
                    document: &mut self.document,
                    variables: &self.variables,
                    var_names: var_names.as_slice(),
                    shared: &self.shared,
                };
                view.initialize(&mut cx);
                slots.push(self.views.len());
                self.views.push(ViewSlot {
                    view,
                    vars: var_names.clone(),
                });
            }
            if !slots.is_empty() {
                self.by_element.insert(element, slots.clone());
            }

            if var_names.is_empty() {
                continue;
            }

            let mut did_add_setter = false;
            for &slot in &slots {
                if !self.views[slot].view.handles_update() {
                    continue;
                }
                let id = self.setters.len();
                self.setters.push(Setter {
                    element,
                    kind: SetterKind::View { slot },
                });
                for name in &var_names {
                    self.by_variable.entry(name.clone()).or_default().push(id);
                }
                did_add_setter = true;
            }

            if !did_add_setter {
                let format_name = self
                    .document
                    .attr(element, "data-format")
                    .unwrap_or("default")
                    .to_string();
                let formatter = self.formats.resolve(&format_name, self.sink.as_ref());
                let id = self.setters.len();
                self.setters.push(Setter {
                    element,
                    kind: SetterKind::Text {
                        text_node: None,
                        formatter,
                    },
                });
                self.by_variable
                    .entry(var_names[0].clone())
                    .or_default()
                    .push(id);
            }
        }
    }

    // ------------------------------------------------------------------
    // variables

    /// Current value of a variable. Unknown names report a diagnostic and
    /// return the zero value instead of failing hard.
    pub fn get_value(&self, name: &str) -> Value {
        match self.variables.get(name) {
            Some(value) => value.clone(),
            None => {
                self.sink
                    .report(&Diagnostic::UnknownVariable(name.to_string()));
                Value::zero()
            }
        }
    }

    pub fn set_value(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.set_values([(name.into(), value.into())]);
    }

    /// Writes a batch of variables.
    ///
    /// The batch is all-or-nothing on unknown names: if any key is not a
    /// model variable, the first offender is reported and nothing is
    /// applied. Entries equal to the stored value are skipped. Changed
    /// variables are all written, then their setters fire (setter-table
    /// order per variable, once per setter for the batch); if anything
    /// changed, the model's `update` runs afterwards to recompute derived
    /// variables and cascade further firings the same way.
    pub fn set_values<K, V, I>(&mut self, entries: I)
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        let entries: Vec<(String, Value)> = entries
            .into_iter()
            .map(|(name, value)| (name.into(), value.into()))
            .collect();

        for (name, _) in &entries {
            if !self.variables.contains(name) {
                self.sink
                    .report(&Diagnostic::SettingUnknownVariable(name.clone()));
                return;
            }
        }

        let mut changed: Vec<(String, Value)> = Vec::new();
        for (name, value) in entries {
            if self.variables.get(&name) == Some(&value) {
                continue;
            }
            self.variables.set(name.clone(), value.clone());
            changed.push((name, value));
        }

        if !changed.is_empty() {
            self.fire_batch(&changed);
            self.update_model(false);
        }
    }

    /// Swaps the model; the variable map is rebuilt from scratch by a full
    /// `initialize` + `update` pass and every setter re-fires.
    pub fn set_model(&mut self, model: impl Model + 'static) {
        self.model = Box::new(model);
        self.variables = Variables::new();
        self.update_model(true);
    }

    // ------------------------------------------------------------------
    // update cycle

    /// Runs the model against a scratch copy of the variable map, diffs it
    /// against the base key-by-key, adopts every differing (or newly
    /// appearing) value, then fires the affected setters with the settled
    /// values. One rescan per pass; assignments inside `update` are never
    /// observed incrementally.
    fn update_model(&mut self, should_initialize: bool) {
        let mut scratch = self.variables.clone();
        if should_initialize {
            self.model.initialize(&mut scratch);
        }
        self.model.update(&mut scratch);

        let mut changed: Vec<(String, Value)> = Vec::new();
        for (name, value) in scratch.iter() {
            if self.variables.get(name) != Some(value) {
                changed.push((name.to_string(), value.clone()));
            }
        }
        // Settle the whole map before any setter can observe it.
        for (name, value) in &changed {
            self.variables.set(name.clone(), value.clone());
        }
        self.fire_batch(&changed);
    }

    /// Fires the setters affected by one settled batch of changes, in
    /// setter-table order per variable. A setter watching several variables
    /// in the batch fires once, not once per variable; it re-reads its
    /// dependencies at fire time, so it sees the whole batch either way.
    fn fire_batch(&mut self, changed: &[(String, Value)]) {
        let mut fired: HashSet<usize> = HashSet::new();
        for (name, value) in changed {
            let Some(ids) = self.by_variable.get(name).cloned() else { continue };
            for id in ids {
                if fired.insert(id) {
                    self.fire(id, value);
                }
            }
        }
    }

    fn fire(&mut self, id: usize, value: &Value) {
        let Tangle {
            document,
            variables,
            views,
            setters,
            ..
        } = self;
        let setter = &mut setters[id];
        let element = setter.element;
        match &mut setter.kind {
            SetterKind::View { slot } => {
                let slot = &mut views[*slot];
                if slot.vars.len() == 1 {
                    slot.view
                        .update(document, element, std::slice::from_ref(value));
                } else {
                    let values: Vec<Value> = slot
                        .vars
                        .iter()
                        .map(|name| {
                            variables
                                .get(name)
                                .cloned()
                                .unwrap_or_else(Value::zero)
                        })
                        .collect();
                    slot.view.update(document, element, &values);
                }
            }
            SetterKind::Text {
                text_node,
                formatter,
            } => {
                let node = *text_node.get_or_insert_with(|| {
                    let node = document.create_text("");
                    document.prepend(element, node);
                    node
                });
                document.set_text(node, formatter(value));
            }
        }
    }

    // ------------------------------------------------------------------
    // events

    /// Routes a semantic UI event to the views bound to `element`. Writes
    /// staged by the handlers are applied as a single `set_values` batch
    /// after every handler has returned.
    pub fn dispatch(&mut self, element: NodeId, event: Event) {
        let Some(slots) = self.by_element.get(&element).cloned() else { return };
        let mut pending: Vec<(String, Value)> = Vec::new();
        {
            let Tangle {
                document,
                variables,
                views,
                shared,
                sink,
                ..
            } = self;
            for slot in slots {
                let mut cx = EventCx {
                    element,
                    document: &mut *document,
                    variables: &*variables,
                    sink: &**sink,
                    pending: &mut pending,
                    shared: &*shared,
                };
                views[slot].view.event(&mut cx, &event);
            }
        }
        if !pending.is_empty() {
            self.set_values(pending);
        }
    }

    // ------------------------------------------------------------------
    // accessors

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }
}
