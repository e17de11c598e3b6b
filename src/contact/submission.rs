use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Wire names of the contact fields, in form order.
pub const FIELD_NAMES: [&str; 6] = ["firstName", "lastName", "email", "phone", "interest", "message"];

/// One visitor's contact details as typed into the form.
///
/// Every field is required; nothing beyond non-emptiness is checked here, the
/// browser's input types are the only format gate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactSubmission {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub interest: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownField(pub String);

impl std::fmt::Display for UnknownField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unknown contact field: {}", self.0)
    }
}

impl std::error::Error for UnknownField {}

impl ContactSubmission {
    /// Pick the contact fields out of a parsed form body, ignoring anything else.
    pub fn from_fields(fields: &HashMap<String, String>) -> Self {
        let mut submission = Self::default();
        for name in FIELD_NAMES {
            if let Some(value) = fields.get(name) {
                // Names come from FIELD_NAMES, so this cannot fail.
                let _ = submission.set(name, value.clone());
            }
        }
        submission
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) -> Result<(), UnknownField> {
        let slot = match name {
            "firstName" => &mut self.first_name,
            "lastName" => &mut self.last_name,
            "email" => &mut self.email,
            "phone" => &mut self.phone,
            "interest" => &mut self.interest,
            "message" => &mut self.message,
            other => return Err(UnknownField(other.to_string())),
        };
        *slot = value.into();
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs()
            .into_iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value)
    }

    /// Names of required fields that are still empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        self.pairs()
            .into_iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(name, _)| name)
            .collect()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Multipart body mirroring the field names, as a browser `FormData` would send it.
    pub fn to_multipart(&self) -> reqwest::multipart::Form {
        self.pairs()
            .into_iter()
            .fold(reqwest::multipart::Form::new(), |form, (name, value)| {
                form.text(name, value.to_string())
            })
    }

    fn pairs(&self) -> [(&'static str, &str); 6] {
        [
            ("firstName", self.first_name.as_str()),
            ("lastName", self.last_name.as_str()),
            ("email", self.email.as_str()),
            ("phone", self.phone.as_str()),
            ("interest", self.interest.as_str()),
            ("message", self.message.as_str()),
        ]
    }
}
