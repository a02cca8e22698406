//! # tangle-kit: stock widgets and formats for Tangle documents
//!
//! The engine in `tangle-core` knows nothing about toggles, drags, or
//! dollar signs; it only routes variable changes to registered view classes
//! and formatters. This crate supplies the standard set:
//!
//! - formats: `p3`, `neg_p3`, `p2`, `e6`, `abs_e6`, `freq`, `dollars`,
//!   `free`, `percent`, plus printf-style patterns (`data-format="%.2f"`).
//! - view classes: `TKToggle`, `TKIf`, `TKIfElse`, `TKPlusMinus`,
//!   `TKSwitch`, `TKAdjustableNumber`.
//!
//! ```rust
//! use tangle_core::{Document, Element, FnModel, Registry, Tangle};
//!
//! let mut registry = Registry::default();
//! tangle_kit::install(&mut registry);
//!
//! let mut doc = Document::new();
//! let root = doc.root();
//! doc.insert(root, Element::new("span").var("price").format("dollars"));
//!
//! let model = FnModel::new(|vars| vars.set("price", 18), |_| {});
//! let tangle = Tangle::with_registry(doc, model, registry);
//! assert_eq!(tangle.document().rendered_text(tangle.document().root()), "$18");
//! ```

pub mod formats;
pub mod sprintf;
pub mod views;

pub use views::{AdjustableNumber, If, IfElse, PlusMinus, Switch, Toggle};

use tangle_core::Registry;

/// Registers every stock view class and formatter on `registry`, and
/// installs the printf pattern formatter as the `%` fallback.
pub fn install(registry: &mut Registry) {
    formats::install(&mut registry.formats);
    registry.formats.set_pattern_hook(sprintf::pattern_hook());
    views::install(&mut registry.views);
}
