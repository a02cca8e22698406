//! Conditional visibility views: `TKIf`, `TKIfElse`, `TKPlusMinus`,
//! `TKSwitch`. All of them consume updates and carry no text binding.

use tangle_core::{Document, NodeId, Value, View, ViewInit};

fn is_inverted(cx: &ViewInit<'_>) -> bool {
    cx.document().attr(cx.element(), "data-invert").is_some()
}

/// Hides the element when the value is falsy; `data-invert` hides on truthy.
#[derive(Clone, Debug, Default)]
pub struct If {
    inverted: bool,
}

impl View for If {
    fn initialize(&mut self, cx: &mut ViewInit<'_>) {
        self.inverted = is_inverted(cx);
    }

    fn handles_update(&self) -> bool {
        true
    }

    fn update(&mut self, doc: &mut Document, element: NodeId, values: &[Value]) {
        let shown = values[0].truthy() != self.inverted;
        doc.set_hidden(element, !shown);
    }
}

/// Shows the first child when truthy, the second when falsy.
#[derive(Clone, Debug, Default)]
pub struct IfElse {
    inverted: bool,
}

impl IfElse {
    fn select(doc: &mut Document, element: NodeId, first: bool) {
        let children = doc.element_children(element);
        if let Some(&child) = children.first() {
            doc.set_hidden(child, !first);
        }
        if let Some(&child) = children.get(1) {
            doc.set_hidden(child, first);
        }
    }
}

impl View for IfElse {
    fn initialize(&mut self, cx: &mut ViewInit<'_>) {
        self.inverted = is_inverted(cx);
    }

    fn handles_update(&self) -> bool {
        true
    }

    fn update(&mut self, doc: &mut Document, element: NodeId, values: &[Value]) {
        Self::select(doc, element, values[0].truthy() != self.inverted);
    }
}

/// First child for zero-or-positive values, second child for negative.
#[derive(Clone, Debug, Default)]
pub struct PlusMinus;

impl View for PlusMinus {
    fn handles_update(&self) -> bool {
        true
    }

    fn update(&mut self, doc: &mut Document, element: NodeId, values: &[Value]) {
        IfElse::select(doc, element, values[0].as_number() >= 0.0);
    }
}

/// Shows the element's nth child when the value is n.
#[derive(Clone, Debug, Default)]
pub struct Switch;

impl View for Switch {
    fn handles_update(&self) -> bool {
        true
    }

    fn update(&mut self, doc: &mut Document, element: NodeId, values: &[Value]) {
        let selected = values[0].as_number().round() as i64;
        for (index, child) in doc.element_children(element).into_iter().enumerate() {
            doc.set_hidden(child, index as i64 != selected);
        }
    }
}
