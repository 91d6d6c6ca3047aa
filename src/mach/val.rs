/// ## Scalar value
///
/// Every variable, array element, memory cell and stack scalar is a `Val`.
/// The value is stored as a single `f32`; the integer view truncates toward zero.

#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct Val(f32);

impl Val {
    pub const ZERO: Val = Val(0.0);

    /// Truncates toward zero. Saturates at the `i32` bounds, NaN becomes 0.
    pub fn as_int(self) -> i32 {
        self.0 as i32
    }

    pub fn as_float(self) -> f32 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }
}

impl From<f32> for Val {
    fn from(f: f32) -> Val {
        Val(f)
    }
}

impl From<i32> for Val {
    fn from(i: i32) -> Val {
        Val(i as f32)
    }
}

impl From<bool> for Val {
    fn from(b: bool) -> Val {
        if b {
            Val(1.0)
        } else {
            Val(0.0)
        }
    }
}

impl std::fmt::Display for Val {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", format_float(self.0))
    }
}

/// Formats like C's `%g` with six significant digits.
pub fn format_float(value: f32) -> String {
    const PRECISION: i32 = 6;
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-inf" } else { "inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }
    let value = value as f64;
    let sci = format!("{:.*e}", (PRECISION - 1) as usize, value);
    let (mantissa, exponent) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };
    if exponent < -4 || exponent >= PRECISION {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.abs()
        )
    } else {
        let decimals = (PRECISION - 1 - exponent) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
