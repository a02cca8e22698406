//! Stock numeric formatters: precision-by-magnitude, millions, frequency,
//! currency, percentage.

use tangle_core::{FormatRegistry, Value};

/// Round to `places` decimals and render minimally (trailing zeros drop out,
/// integral results carry no fraction).
fn rounded(value: f64, places: i32) -> String {
    let factor = 10f64.powi(places);
    Value::from((value * factor).round() / factor).to_string()
}

/// Show roughly `precision` significant decimals, backing off one decimal at
/// magnitude ≥ 10 and another at ≥ 100, never below zero decimals.
fn with_precision(value: f64, mut precision: i32) -> String {
    if value.abs() >= 100.0 {
        precision -= 1;
    }
    if value.abs() >= 10.0 {
        precision -= 1;
    }
    rounded(value, precision.max(0))
}

pub fn install(formats: &mut FormatRegistry) {
    formats.register("p3", |v| with_precision(v.as_number(), 3));
    formats.register("neg_p3", |v| with_precision(-v.as_number(), 3));
    formats.register("p2", |v| with_precision(v.as_number(), 2));
    formats.register("e6", |v| rounded(v.as_number() * 1e-6, 0));
    formats.register("abs_e6", |v| rounded(v.as_number().abs() * 1e-6, 0));
    formats.register("freq", |v| {
        let hz = v.as_number();
        if hz < 100.0 {
            format!("{} Hz", rounded(hz, 1))
        } else if hz < 1000.0 {
            format!("{} Hz", rounded(hz, 0))
        } else {
            format!("{} KHz", rounded(hz / 1000.0, 2))
        }
    });
    formats.register("dollars", |v| format!("${}", rounded(v.as_number(), 0)));
    formats.register("free", |v| {
        if v.truthy() {
            format!("${}", rounded(v.as_number(), 0))
        } else {
            "free".to_string()
        }
    });
    formats.register("percent", |v| {
        format!("{}%", rounded(100.0 * v.as_number(), 0))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use tangle_core::{Diagnostic, DiagnosticSink};

    struct Quiet;
    impl DiagnosticSink for Quiet {
        fn report(&self, _: &Diagnostic) {}
    }

    fn fmt(name: &str, value: impl Into<Value>) -> String {
        let mut formats = FormatRegistry::new();
        install(&mut formats);
        let formatter = formats.resolve(name, &Quiet);
        formatter(&value.into())
    }

    #[test]
    fn precision_backs_off_with_magnitude() {
        assert_eq!(fmt("p3", 1.23456), "1.235");
        assert_eq!(fmt("p3", 12.3456), "12.35");
        assert_eq!(fmt("p3", 123.456), "123.5");
        assert_eq!(fmt("p2", 1.239), "1.24");
        assert_eq!(fmt("p2", 123.9), "124");
        assert_eq!(fmt("neg_p3", 1.23456), "-1.235");
    }

    #[test]
    fn rounding_drops_trailing_zeros() {
        assert_eq!(fmt("p3", 1.5), "1.5");
        assert_eq!(fmt("p3", 2.0), "2");
    }

    #[test]
    fn millions() {
        assert_eq!(fmt("e6", 28_000_000), "28");
        assert_eq!(fmt("abs_e6", -75_400_000), "75");
    }

    #[test]
    fn frequency_picks_a_unit() {
        assert_eq!(fmt("freq", 62.35), "62.4 Hz");
        assert_eq!(fmt("freq", 440.4), "440 Hz");
        assert_eq!(fmt("freq", 12340), "12.34 KHz");
    }

    #[test]
    fn money_and_percent() {
        assert_eq!(fmt("dollars", 12.4), "$12");
        assert_eq!(fmt("free", 0), "free");
        assert_eq!(fmt("free", 18), "$18");
        assert_eq!(fmt("percent", 0.853), "85%");
    }

    #[test]
    fn install_composes_with_the_default() {
        let mut formats = FormatRegistry::new();
        install(&mut formats);
        let formatter = formats.resolve("default", &Quiet);
        assert_eq!(formatter(&Value::from(3)), "3");
    }
}
