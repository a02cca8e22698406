//! # Tangle: reactive data-binding for explorable documents
//!
//! A document declares, in its markup, which elements show or control which
//! model variables. The engine scans the document once, wires a setter table
//! from variable names to patch callbacks, and thereafter keeps the document
//! consistent with the model through a recompute-and-diff update cycle.
//!
//! There are four pieces:
//!
//! - [`Document`] — the element/text tree the host builds and the engine
//!   patches.
//! - [`Model`] — user behavior: `initialize` populates variables once,
//!   `update` recomputes derived variables after every change.
//! - [`View`] — per-element handlers selected by markup class names,
//!   registered in a [`Registry`].
//! - [`Tangle`] — the binding instance tying the three together, with the
//!   public runtime API: [`Tangle::get_value`], [`Tangle::set_value`],
//!   [`Tangle::set_values`].
//!
//! ## Binding a document
//!
//! ```rust
//! use tangle_core::{Document, Element, FnModel, Tangle};
//!
//! let mut doc = Document::new();
//! let root = doc.root();
//! doc.append_text(root, "When you eat ");
//! doc.insert(root, Element::new("span").var("cookies").text(" cookies"));
//! doc.append_text(root, " you consume ");
//! doc.insert(root, Element::new("span").var("calories").text(" calories"));
//!
//! let model = FnModel::new(
//!     |vars| vars.set("cookies", 3),
//!     |vars| {
//!         let calories = vars.number("cookies") * 50.0;
//!         vars.set("calories", calories);
//!     },
//! );
//!
//! let mut tangle = Tangle::new(doc, model);
//! assert_eq!(
//!     tangle.document().rendered_text(tangle.document().root()),
//!     "When you eat 3 cookies you consume 150 calories",
//! );
//!
//! tangle.set_value("cookies", 4);
//! assert_eq!(tangle.get_value("calories").as_number(), 200.0);
//! ```
//!
//! ## Failure posture
//!
//! Unknown variables and unknown format names are soft failures: reported
//! through a [`DiagnosticSink`] (the default forwards to `log::warn!`) and
//! resolved with a safe default. A malformed binding degrades one widget,
//! never the document.

pub mod diag;
pub mod dom;
pub mod engine;
pub mod format;
pub mod model;
pub mod value;
pub mod view;

pub use diag::{Diagnostic, DiagnosticSink, LogSink, NullSink};
pub use dom::{Document, Element, NodeFlags, NodeId};
pub use engine::{Registry, Tangle};
pub use format::{FormatRegistry, Formatter, PatternHook};
pub use model::{FnModel, Model, Variables};
pub use value::Value;
pub use view::{Event, EventCx, SharedViewState, View, ViewInit, ViewRegistry};
