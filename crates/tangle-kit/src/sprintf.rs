//! Printf-style pattern formatting for `data-format` attributes containing
//! a `%` directive, e.g. `data-format="%.2f"` or `data-format="%d bottles"`.
//!
//! The engine core only detects the `%` marker; this module supplies the
//! grammar: `%%`, `%d`/`%i` (rounded integer), `%s`, `%f` with optional
//! width, `-` (left align), `0` (zero pad), and `.N` precision. A pattern
//! with no value directive is rejected, which sends the engine down its
//! unknown-format soft-failure path.

use std::iter::Peekable;
use std::rc::Rc;
use std::str::Chars;

use tangle_core::{Formatter, PatternHook, Value};

struct Spec {
    zero_pad: bool,
    left: bool,
    width: usize,
    precision: Option<usize>,
    conversion: char,
}

enum Parsed {
    /// `%%`
    Literal,
    Spec(Spec),
    Invalid,
}

fn parse_directive(chars: &mut Peekable<Chars<'_>>) -> Parsed {
    if chars.peek() == Some(&'%') {
        chars.next();
        return Parsed::Literal;
    }

    let mut spec = Spec {
        zero_pad: false,
        left: false,
        width: 0,
        precision: None,
        conversion: ' ',
    };

    while let Some(&c) = chars.peek() {
        match c {
            '-' => spec.left = true,
            '0' => spec.zero_pad = true,
            _ => break,
        }
        chars.next();
    }
    while let Some(c) = chars.peek().filter(|c| c.is_ascii_digit()) {
        spec.width = spec.width * 10 + (*c as usize - '0' as usize);
        chars.next();
    }
    if chars.peek() == Some(&'.') {
        chars.next();
        let mut precision = 0;
        while let Some(c) = chars.peek().filter(|c| c.is_ascii_digit()) {
            precision = precision * 10 + (*c as usize - '0' as usize);
            chars.next();
        }
        spec.precision = Some(precision);
    }

    match chars.next() {
        Some(c @ ('d' | 'i' | 's' | 'f')) => {
            spec.conversion = c;
            Parsed::Spec(spec)
        }
        _ => Parsed::Invalid,
    }
}

fn render(spec: &Spec, value: &Value) -> String {
    let body = match spec.conversion {
        'd' | 'i' => format!("{}", value.as_number().round() as i64),
        'f' => format!("{:.*}", spec.precision.unwrap_or(6), value.as_number()),
        _ => value.to_string(),
    };
    if body.len() >= spec.width {
        return body;
    }
    let fill = spec.width - body.len();
    if spec.left {
        format!("{}{}", body, " ".repeat(fill))
    } else if spec.zero_pad && spec.conversion != 's' {
        match body.strip_prefix('-') {
            Some(digits) => format!("-{}{}", "0".repeat(fill), digits),
            None => format!("{}{}", "0".repeat(fill), body),
        }
    } else {
        format!("{}{}", " ".repeat(fill), body)
    }
}

/// Applies `pattern` to `value`; every value directive receives the same
/// value (bindings format one variable at a time).
pub fn format(pattern: &str, value: &Value) -> String {
    let mut out = String::new();
    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match parse_directive(&mut chars) {
            Parsed::Literal => out.push('%'),
            Parsed::Spec(spec) => out.push_str(&render(&spec, value)),
            Parsed::Invalid => {}
        }
    }
    out
}

fn has_value_directive(pattern: &str) -> bool {
    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '%' && matches!(parse_directive(&mut chars), Parsed::Spec(_)) {
            return true;
        }
    }
    false
}

/// The hook installed on the formatter registry's `%` fallback.
pub fn pattern_hook() -> PatternHook {
    Rc::new(|pattern: &str| {
        if !has_value_directive(pattern) {
            return None;
        }
        let pattern = pattern.to_string();
        let formatter: Formatter = Rc::new(move |value| format(&pattern, value));
        Some(formatter)
    })
}
