//! `TKToggle` — click to toggle the bound variable between 0 and 1.

use tangle_core::{Event, EventCx, View, ViewInit};

#[derive(Clone, Debug, Default)]
pub struct Toggle {
    variable: Option<String>,
}

impl View for Toggle {
    fn initialize(&mut self, cx: &mut ViewInit<'_>) {
        self.variable = cx.var_names().first().cloned();
    }

    fn event(&mut self, cx: &mut EventCx<'_>, event: &Event) {
        if *event != Event::Click {
            return;
        }
        let Some(variable) = self.variable.clone() else { return };
        let is_active = cx.value(&variable).truthy();
        cx.set(variable, if is_active { 0 } else { 1 });
    }
}
