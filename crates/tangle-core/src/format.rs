//! Formatter registry: named pure functions from value to display text.

use std::collections::HashMap;
use std::rc::Rc;

use crate::diag::{Diagnostic, DiagnosticSink};
use crate::value::Value;

pub type Formatter = Rc<dyn Fn(&Value) -> String>;

/// Hook that turns a `%`-bearing format string into a formatter, if the
/// string parses as a pattern. The engine core does not define the pattern
/// grammar; `tangle-kit` installs a printf-style implementation.
pub type PatternHook = Rc<dyn Fn(&str) -> Option<Formatter>>;

pub struct FormatRegistry {
    formats: HashMap<String, Formatter>,
    pattern_hook: Option<PatternHook>,
}

impl Default for FormatRegistry {
    fn default() -> Self {
        let mut registry = FormatRegistry {
            formats: HashMap::new(),
            pattern_hook: None,
        };
        registry.register("default", |value| value.to_string());
        registry
    }
}

impl FormatRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, f: impl Fn(&Value) -> String + 'static) {
        self.formats.insert(name.into(), Rc::new(f));
    }

    pub fn set_pattern_hook(&mut self, hook: PatternHook) {
        self.pattern_hook = Some(hook);
    }

    /// Lookup order: exact registered name, then the pattern hook for
    /// strings containing `%`, then a reported unknown-format diagnostic
    /// resolved with the always-empty-string formatter.
    pub fn resolve(&self, name: &str, sink: &dyn DiagnosticSink) -> Formatter {
        if let Some(formatter) = self.formats.get(name) {
            return formatter.clone();
        }
        if name.contains('%') {
            if let Some(formatter) = self.pattern_hook.as_ref().and_then(|hook| hook(name)) {
                return formatter;
            }
        }
        sink.report(&Diagnostic::UnknownFormat(name.to_string()));
        Rc::new(|_| String::new())
    }
}
