//! The consumed model contract: `initialize` populates the variable map
//! once, `update` recomputes derived variables after every change.

use std::collections::HashMap;
use std::rc::Rc;

use crate::value::Value;

/// Named variables, iterable in first-assignment order.
///
/// Insertion order matters: the update cycle fires setters for changed
/// variables in the order the model first assigned them, which keeps firing
/// deterministic without the model author declaring dependencies.
#[derive(Clone, Debug, Default)]
pub struct Variables {
    values: HashMap<String, Value>,
    order: Vec<String>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Numeric read; missing variables read as 0.
    pub fn number(&self, name: &str) -> f64 {
        self.values.get(name).map(Value::as_number).unwrap_or(0.0)
    }

    /// Truthiness read; missing variables read as false.
    pub fn truthy(&self, name: &str) -> bool {
        self.values.get(name).map(Value::truthy).unwrap_or(false)
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        if self.values.insert(name.clone(), value.into()).is_none() {
            self.order.push(name);
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterates in first-assignment order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.order
            .iter()
            .map(|name| (name.as_str(), &self.values[name]))
    }
}

/// A user-supplied model: behavior only, state lives in [`Variables`].
pub trait Model {
    /// Populates initial variables. Called once at construction (and again
    /// on [`Tangle::set_model`](crate::Tangle::set_model)).
    fn initialize(&self, _vars: &mut Variables) {}

    /// Recomputes derived variables from current ones. Called after every
    /// change; must be a pure function of the variable map.
    fn update(&self, vars: &mut Variables);
}

/// Closure-backed [`Model`] for hosts that don't want a named type.
///
/// ```rust
/// use tangle_core::FnModel;
///
/// let model = FnModel::new(
///     |vars| vars.set("cookies", 3),
///     |vars| {
///         let calories = vars.number("cookies") * 50.0;
///         vars.set("calories", calories);
///     },
/// );
/// ```
#[derive(Clone)]
pub struct FnModel {
    init: Rc<dyn Fn(&mut Variables)>,
    update: Rc<dyn Fn(&mut Variables)>,
}

impl FnModel {
    pub fn new(
        init: impl Fn(&mut Variables) + 'static,
        update: impl Fn(&mut Variables) + 'static,
    ) -> Self {
        FnModel {
            init: Rc::new(init),
            update: Rc::new(update),
        }
    }
}

impl Model for FnModel {
    fn initialize(&self, vars: &mut Variables) {
        (self.init)(vars);
    }

    fn update(&self, vars: &mut Variables) {
        (self.update)(vars);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iteration_preserves_first_assignment_order() {
        let mut vars = Variables::new();
        vars.set("b", 1);
        vars.set("a", 2);
        vars.set("b", 3);

        let names: Vec<&str> = vars.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["b", "a"]);
        assert_eq!(vars.number("b"), 3.0);
        assert_eq!(vars.len(), 2);
    }

    #[test]
    fn missing_reads_degrade_to_zero() {
        let vars = Variables::new();
        assert_eq!(vars.number("nope"), 0.0);
        assert!(!vars.truthy("nope"));
        assert!(vars.get("nope").is_none());
    }
}
