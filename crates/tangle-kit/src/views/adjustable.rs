//! `TKAdjustableNumber` — drag a number to adjust it.
//!
//! The host feeds already-recognized pointer events (translation measured
//! from the pointer-down position); this view turns them into clamped,
//! step-rounded variable writes. Its displayed number stays a plain text
//! binding on the same element, since this view consumes no updates.

use tangle_core::{Event, EventCx, View, ViewInit};

const DOWN_CLASS: &str = "TKAdjustableNumberDown";
const HOVER_CLASS: &str = "TKAdjustableNumberHover";

/// Horizontal pixels per step increment.
const PIXELS_PER_STEP: f64 = 5.0;

#[derive(Clone, Debug)]
pub struct AdjustableNumber {
    variable: Option<String>,
    min: f64,
    max: f64,
    step: f64,
    dragging: bool,
    hovering: bool,
    value_at_down: f64,
}

impl Default for AdjustableNumber {
    fn default() -> Self {
        AdjustableNumber {
            variable: None,
            min: 1.0,
            max: 10.0,
            step: 1.0,
            dragging: false,
            hovering: false,
            value_at_down: 0.0,
        }
    }
}

impl AdjustableNumber {
    fn refresh_style(&self, cx: &mut EventCx<'_>) {
        let element = cx.element();
        // Hover effects are suppressed while any instance is dragging, so a
        // value dragged across another one doesn't light it up.
        let hover = !self.dragging && self.hovering && !cx.shared().drag_active();
        let doc = cx.document_mut();
        if self.dragging {
            doc.add_class(element, DOWN_CLASS);
        } else {
            doc.remove_class(element, DOWN_CLASS);
        }
        if hover {
            doc.add_class(element, HOVER_CLASS);
        } else {
            doc.remove_class(element, HOVER_CLASS);
        }
    }
}

impl View for AdjustableNumber {
    fn initialize(&mut self, cx: &mut ViewInit<'_>) {
        self.variable = cx.var_names().first().cloned();
        self.min = cx.number_attr("data-min", 1.0);
        self.max = cx.number_attr("data-max", 10.0);
        self.step = cx.number_attr("data-step", 1.0);
    }

    fn event(&mut self, cx: &mut EventCx<'_>, event: &Event) {
        let Some(variable) = self.variable.clone() else { return };
        match *event {
            Event::PointerDown => {
                self.value_at_down = cx.value(&variable).as_number();
                self.dragging = true;
                cx.shared().set_drag_active(true);
                self.refresh_style(cx);
            }
            Event::PointerMove { dx, .. } if self.dragging => {
                let raw = self.value_at_down + dx / PIXELS_PER_STEP * self.step;
                let stepped = (raw / self.step).round() * self.step;
                let value = stepped.min(self.max).max(self.min);
                log::debug!("adjust {variable} -> {value}");
                cx.set(variable, value);
            }
            Event::PointerUp => {
                self.dragging = false;
                cx.shared().set_drag_active(false);
                self.refresh_style(cx);
            }
            Event::PointerEnter => {
                self.hovering = true;
                self.refresh_style(cx);
            }
            Event::PointerLeave => {
                self.hovering = false;
                self.refresh_style(cx);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DOWN_CLASS, HOVER_CLASS};
    use tangle_core::{Document, Element, Event, FnModel, NodeId, Registry, Tangle, Value};

    fn bind(doc: Document) -> Tangle {
        let mut registry = Registry::default();
        crate::install(&mut registry);
        let model = FnModel::new(
            |vars| vars.set("cookies", 3),
            |vars| {
                let calories = vars.number("cookies") * 50.0;
                vars.set("calories", calories);
            },
        );
        Tangle::with_registry(doc, model, registry)
    }

    fn adjustable(doc: &mut Document, attrs: &[(&str, &str)]) -> NodeId {
        let root = doc.root();
        let mut element = Element::new("span")
            .class("TKAdjustableNumber")
            .var("cookies")
            .text(" cookies");
        for (name, value) in attrs {
            element = element.attr(*name, *value);
        }
        doc.insert(root, element)
    }

    #[test]
    fn drag_steps_and_clamps() {
        let mut doc = Document::new();
        let span = adjustable(&mut doc, &[("data-max", "8")]);
        let mut tangle = bind(doc);

        assert_eq!(tangle.document().rendered_text(span), "3 cookies");

        tangle.dispatch(span, Event::PointerDown);
        tangle.dispatch(span, Event::PointerMove { dx: 10.0, dy: 0.0 });
        assert_eq!(tangle.get_value("cookies"), Value::from(5));
        assert_eq!(tangle.get_value("calories"), Value::from(250));
        assert_eq!(tangle.document().rendered_text(span), "5 cookies");

        // Translation is measured from pointer-down, not the last move.
        tangle.dispatch(span, Event::PointerMove { dx: 100.0, dy: 0.0 });
        assert_eq!(tangle.get_value("cookies"), Value::from(8));

        tangle.dispatch(span, Event::PointerMove { dx: -100.0, dy: 0.0 });
        assert_eq!(tangle.get_value("cookies"), Value::from(1));
        tangle.dispatch(span, Event::PointerUp);
    }

    #[test]
    fn fractional_steps_round_to_the_grid() {
        let mut doc = Document::new();
        let span = adjustable(&mut doc, &[("data-step", "0.5")]);
        let mut tangle = bind(doc);

        tangle.dispatch(span, Event::PointerDown);
        tangle.dispatch(span, Event::PointerMove { dx: 3.0, dy: 0.0 });
        // 3 + 3/5 * 0.5 = 3.3, rounded to the 0.5 grid.
        assert_eq!(tangle.get_value("cookies"), Value::from(3.5));
    }

    #[test]
    fn moves_without_a_down_are_ignored() {
        let mut doc = Document::new();
        let span = adjustable(&mut doc, &[]);
        let mut tangle = bind(doc);

        tangle.dispatch(span, Event::PointerMove { dx: 50.0, dy: 0.0 });
        assert_eq!(tangle.get_value("cookies"), Value::from(3));
    }

    #[test]
    fn only_one_instance_drags_at_a_time() {
        let mut doc = Document::new();
        let first = adjustable(&mut doc, &[]);
        let root = doc.root();
        let second = doc.insert(
            root,
            Element::new("span").class("TKAdjustableNumber").var("calories"),
        );
        let mut tangle = bind(doc);

        tangle.dispatch(first, Event::PointerDown);
        assert!(tangle.document().has_class(first, DOWN_CLASS));

        // Hover on a second instance stays dark while the first drags.
        tangle.dispatch(second, Event::PointerEnter);
        assert!(!tangle.document().has_class(second, HOVER_CLASS));

        tangle.dispatch(first, Event::PointerUp);
        assert!(!tangle.document().has_class(first, DOWN_CLASS));

        tangle.dispatch(second, Event::PointerEnter);
        assert!(tangle.document().has_class(second, HOVER_CLASS));
        tangle.dispatch(second, Event::PointerLeave);
        assert!(!tangle.document().has_class(second, HOVER_CLASS));
    }
}
