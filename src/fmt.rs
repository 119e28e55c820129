//! Number formatting for the output file.
//!
//! Values are written like `printf("%g")` with six significant digits,
//! which is what C-family text streams produce by default. Plotting tools
//! that already read such files keep working, and files stay compact.

use std::fmt;

/// Significant digits used when none are given.
pub const DEFAULT_PRECISION: usize = 6;

/// Display adaptor printing an `f64` in `%g` style.
#[derive(Debug, Copy, Clone)]
pub struct General {
    value: f64,
    precision: usize,
}

impl General {
    pub fn new(value: f64) -> Self {
        General::with_precision(value, DEFAULT_PRECISION)
    }

    pub fn with_precision(value: f64, precision: usize) -> Self {
        General {
            value,
            precision: precision.max(1),
        }
    }
}

/// Shorthand for `General::new`.
#[inline]
pub fn g(value: f64) -> General {
    General::new(value)
}

fn strip_fraction_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

impl fmt::Display for General {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.value;
        if v.is_nan() {
            return f.write_str("nan");
        }
        if v.is_infinite() {
            return f.write_str(if v < 0.0 { "-inf" } else { "inf" });
        }
        if v == 0.0 {
            return f.write_str(if v.is_sign_negative() { "-0" } else { "0" });
        }

        let p = self.precision;
        // Exponent after rounding to p significant digits
        let sci = format!("{:.*e}", p - 1, v);
        let (mantissa, exp) = match sci.split_once('e') {
            Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
            None => (sci.as_str(), 0),
        };

        if exp < -4 || exp >= p as i32 {
            let sign = if exp < 0 { '-' } else { '+' };
            write!(
                f,
                "{}e{}{:02}",
                strip_fraction_zeros(mantissa),
                sign,
                exp.unsigned_abs()
            )
        } else {
            let decimals = (p as i32 - 1 - exp).max(0) as usize;
            let fixed = format!("{:.*}", decimals, v);
            f.write_str(strip_fraction_zeros(&fixed))
        }
    }
}
