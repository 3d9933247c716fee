use base64::prelude::*;
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Number, Value};
use thiserror::Error;

use crate::{
    common_types::SendEmail::Request,
    Email::OutgoingEmail,
};

// Anything but '@' or the whitespace set below. Unicode `\s` is not the
// same set: it includes U+0085 and leaves out U+FEFF.
const ADDRESS_PART: &str = concat!(
    r"[^@\t\n\x0B\x0C\r ",
    r"\x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}]+",
);

lazy_static!{
    // Shape check only, deliberately loose: "a@b.c.d" passes, "a@b" does not
    static ref EMAIL_SHAPE: Regex = {
        let pattern = format!(r"^{ADDRESS_PART}@{ADDRESS_PART}\.{ADDRESS_PART}$");
        Regex::new(&pattern).expect("Failed to compile EMAIL_SHAPE")
    };
}

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("{0}")]
    Base64(#[from] base64::DecodeError),
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required fields")]
    MissingFields,
    #[error("invalid receiver_email format")]
    InvalidEmailFormat,
}

/// Decodes the raw body into its loosely typed fields. A missing body is
/// parsed as an empty one, which is never valid JSON.
pub fn parse(body: Option<&str>, is_base64_encoded: bool) -> Result<Request, ParseError> {
    let body = body.unwrap_or_default();
    let value: Value = if is_base64_encoded {
        let bytes = BASE64_STANDARD.decode(body)?;
        serde_json::from_slice(&bytes)?
    } else {
        serde_json::from_str(body)?
    };
    Ok(Request::from_value(value))
}

fn number_text(number: &Number) -> String {
    if number.is_i64() || number.is_u64() {
        return number.to_string();
    }
    let n = number.as_f64().unwrap_or_default();
    let magnitude = n.abs();
    if magnitude >= 1e21 || (magnitude != 0.0 && magnitude < 1e-6) {
        let text = format!("{n:e}");
        return match text.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => format!("{mantissa}e+{exponent}"),
            _ => text,
        };
    }
    if n.fract() == 0.0 {
        format!("{n:.0}")
    } else {
        n.to_string()
    }
}

/// Text form of a field value: whole floats lose their `.0`, arrays are
/// comma joined with nulls left empty, objects collapse to `[object Object]`.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number_text(number),
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                item => value_text(item),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Text of a field if it would count as present, `None` for absent, null,
/// false, zero and the empty string.
pub fn truthy_text(value: Value) -> Option<String> {
    match &value {
        Value::Null | Value::Bool(false) => None,
        Value::Number(number) if number.as_f64().is_some_and(|n| n == 0.0) => None,
        Value::String(text) if text.is_empty() => None,
        _ => Some(value_text(&value)),
    }
}

pub fn is_valid_email_shape(email: &str) -> bool {
    EMAIL_SHAPE.is_match(email)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestPayload {
    pub receiver_email: Option<String>,
    pub subject: Option<String>,
    pub body_text: Option<String>,
}

impl From<Request> for RequestPayload {
    fn from(request: Request) -> Self {
        RequestPayload {
            receiver_email: truthy_text(request.receiver_email),
            subject: truthy_text(request.subject),
            body_text: truthy_text(request.body_text),
        }
    }
}

impl RequestPayload {
    pub fn validate(self) -> Result<OutgoingEmail, ValidationError> {
        let (receiver_email, subject, body_text) = match (self.receiver_email, self.subject, self.body_text) {
            (Some(receiver_email), Some(subject), Some(body_text)) => (receiver_email, subject, body_text),
            (receiver_email, subject, body_text) => {
                tracing::warn!(?receiver_email, ?subject, ?body_text, "Missing required fields");
                return Err(ValidationError::MissingFields);
            }
        };
        if !is_valid_email_shape(&receiver_email) {
            tracing::warn!("Invalid receiver_email format: {receiver_email}");
            return Err(ValidationError::InvalidEmailFormat);
        }
        Ok(OutgoingEmail {
            receiver_email,
            subject,
            body_text,
        })
    }
}
