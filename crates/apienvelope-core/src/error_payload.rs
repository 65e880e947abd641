use serde::{Deserialize, Serialize};

use crate::de::null_as_default;

/// The `error` section of an envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorPayload {
    /// Numeric error code, usually the HTTP status.
    #[serde(skip_serializing_if = "is_zero")]
    pub code: i64,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub message: String,

    /// Detail records in the order they were reported.
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "null_as_default"
    )]
    pub errors: Vec<ErrorDetail>,
}

fn is_zero(value: &i64) -> bool {
    *value == 0
}

impl ErrorPayload {
    /// Create an error payload with no details.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an error payload with a code and message.
    pub fn with_code(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            errors: Vec::new(),
        }
    }

    /// Append a detail record.
    pub fn push(&mut self, detail: ErrorDetail) {
        self.errors.push(detail);
    }

    /// True when no code, message or details are set.
    pub fn is_empty(&self) -> bool {
        self.code == 0 && self.message.is_empty() && self.errors.is_empty()
    }
}

/// One entry of `error.errors`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ErrorDetail {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub message: String,

    /// Path of the field or parameter the error refers to.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub location: String,

    /// What kind of thing `location` names, for example `parameter`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub location_type: String,

    /// Link to extended help for this error.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub extended_helper: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub domain: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub reason: String,

    /// Link where the client can report the error.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub send_report: String,
}

impl ErrorDetail {
    /// Create a detail record carrying only a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn location_type(mut self, location_type: impl Into<String>) -> Self {
        self.location_type = location_type.into();
        self
    }

    pub fn extended_helper(mut self, url: impl Into<String>) -> Self {
        self.extended_helper = url.into();
        self
    }

    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }

    pub fn send_report(mut self, url: impl Into<String>) -> Self {
        self.send_report = url.into();
        self
    }
}
