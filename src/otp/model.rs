use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A 6-digit one-time passcode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OtpCode(u32);

impl OtpCode {
    pub const MIN: u32 = 100_000;
    pub const MAX: u32 = 999_999;

    /// Wrap a raw value. Callers are expected to stay within `MIN..=MAX`.
    pub fn new(code: u32) -> Self {
        debug_assert!((Self::MIN..=Self::MAX).contains(&code));
        OtpCode(code)
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    /// Loose comparison against a submitted value.
    ///
    /// The candidate is turned into a number the way a JS `==` against a
    /// number would: strings are trimmed and read as decimal, or as hex,
    /// octal or binary with a `0x`/`0o`/`0b` prefix; arrays go through their
    /// string form first. Objects, booleans and `null` never match.
    pub fn matches(&self, candidate: &Value) -> bool {
        let submitted = match candidate {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => string_to_number(s),
            Value::Array(_) => string_to_number(&js_string(candidate)),
            _ => None,
        };

        submitted.is_some_and(|n| n == f64::from(self.0))
    }
}

impl fmt::Display for OtpCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Store key derived from whatever the client sent as `phone`.
///
/// The value is not validated: a missing field becomes `"undefined"` and
/// everything else goes through [`js_string`].
pub fn phone_key(phone: Option<&Value>) -> String {
    match phone {
        None => "undefined".to_string(),
        Some(value) => js_string(value),
    }
}

/// String form of a JSON value as JS `String()` produces it.
///
/// Whole floats drop their fraction, arrays join their elements with `,`
/// (with `null` elements left empty), and objects become `[object Object]`.
pub fn js_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
            (Some(i), _, _) => i.to_string(),
            (_, Some(u), _) => u.to_string(),
            (_, _, Some(f)) => f.to_string(),
            _ => n.to_string(),
        },
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => js_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

fn string_to_number(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return Some(0.0);
    }

    let radix_prefixes = [
        ("0x", 16),
        ("0X", 16),
        ("0o", 8),
        ("0O", 8),
        ("0b", 2),
        ("0B", 2),
    ];
    for (prefix, radix) in radix_prefixes {
        if let Some(digits) = s.strip_prefix(prefix) {
            return u64::from_str_radix(digits, radix).ok().map(|n| n as f64);
        }
    }

    // Rust also reads "inf" and "nan"; neither can equal a code
    s.parse::<f64>().ok()
}

// Keeps an explicit `null` as `Some(Value::Null)`; only a missing field is `None`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

#[derive(Debug, Default, Deserialize)]
pub struct SendOtpRequest {
    #[serde(default, deserialize_with = "present")]
    pub phone: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct VerifyOtpRequest {
    #[serde(default, deserialize_with = "present")]
    pub phone: Option<Value>,
    pub otp: Option<Value>,
}

/// Success envelope returned by both endpoints
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
}

impl ApiResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        ApiResponse {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        ApiResponse {
            success: false,
            message: message.into(),
        }
    }
}
