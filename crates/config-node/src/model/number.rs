//! Numeric views of nodes.
//!
//! Any numeric node can be read as any numeric width. Conversions follow the
//! usual primitive casts: floating values truncate toward zero and saturate,
//! integer values wrap when narrowed.

use super::Node;

impl Node {
    /// Returns true for the byte, short, int, long, float and double variants.
    pub fn is_number(&self) -> bool {
        matches!(
            self.unwrap_commented(),
            Node::Byte(_)
                | Node::Short(_)
                | Node::Int(_)
                | Node::Long(_)
                | Node::Float(_)
                | Node::Double(_)
        )
    }

    pub fn as_long(&self) -> Option<i64> {
        match self.unwrap_commented() {
            Node::Byte(v) => Some(*v as i64),
            Node::Short(v) => Some(*v as i64),
            Node::Int(v) => Some(*v as i64),
            Node::Long(v) => Some(*v),
            Node::Float(v) => Some(*v as i64),
            Node::Double(v) => Some(*v as i64),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self.unwrap_commented() {
            Node::Float(v) => Some(*v as i32),
            Node::Double(v) => Some(*v as i32),
            other => other.as_long().map(|v| v as i32),
        }
    }

    // Floating values narrow through int first, so 300.7 reads as byte 44.
    pub fn as_short(&self) -> Option<i16> {
        self.as_int().map(|v| v as i16)
    }

    pub fn as_byte(&self) -> Option<i8> {
        self.as_int().map(|v| v as i8)
    }

    pub fn as_double(&self) -> Option<f64> {
        match self.unwrap_commented() {
            Node::Float(v) => Some(*v as f64),
            Node::Double(v) => Some(*v),
            other => other.as_long().map(|v| v as f64),
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self.unwrap_commented() {
            Node::Float(v) => Some(*v),
            Node::Double(v) => Some(*v as f32),
            other => other.as_long().map(|v| v as f32),
        }
    }
}

/// Float equality where every NaN equals every other NaN.
pub(crate) fn float_eq(a: f32, b: f32) -> bool {
    float_bits(a) == float_bits(b)
}

pub(crate) fn double_eq(a: f64, b: f64) -> bool {
    double_bits(a) == double_bits(b)
}

/// Bit pattern with all NaNs collapsed onto one, usable for hashing.
pub(crate) fn float_bits(v: f32) -> u32 {
    if v.is_nan() { f32::NAN.to_bits() } else { v.to_bits() }
}

pub(crate) fn double_bits(v: f64) -> u64 {
    if v.is_nan() { f64::NAN.to_bits() } else { v.to_bits() }
}

/// Canonical text of a float: plain decimal for magnitudes in `[1e-3, 1e7)`
/// and zero, `1.5E-7` style outside it.
pub(crate) fn format_float(v: f32) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v.is_infinite() {
        if v > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if v == 0.0 || (1e-3..1e7).contains(&v.abs()) {
        format!("{v:?}")
    } else {
        scientific(format!("{v:e}"))
    }
}

pub(crate) fn format_double(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v.is_infinite() {
        if v > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if v == 0.0 || (1e-3..1e7).contains(&v.abs()) {
        format!("{v:?}")
    } else {
        scientific(format!("{v:e}"))
    }
}

// "1e20" -> "1.0E20", "-1.25e-7" -> "-1.25E-7"
fn scientific(lower: String) -> String {
    match lower.split_once('e') {
        Some((mantissa, exponent)) if mantissa.contains('.') => {
            format!("{mantissa}E{exponent}")
        }
        Some((mantissa, exponent)) => format!("{mantissa}.0E{exponent}"),
        None => lower,
    }
}
