use super::parser::FieldMap;

/// Check if the honeypot field is filled. Returns true if spam detected.
pub fn is_spam(fields: &FieldMap, honeypot_field: Option<&str>) -> bool {
    let Some(field) = honeypot_field else {
        return false;
    };

    if field.is_empty() {
        return false;
    }

    fields.get(field).is_some_and(|value| !value.trim().is_empty())
}
