use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Where the hosted form service puts its verdict in the JSON reply.
///
/// Paths are dot-separated (`data.ok`). Defaults follow the usual hosted-form
/// shape: `{"ok": true}` on success, `{"errors": [{"message": "..."}]}` on rejection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseContract {
    pub ack_field: String,
    pub errors_field: String,
    pub message_field: String,
}

impl Default for ResponseContract {
    fn default() -> Self {
        Self {
            ack_field: "ok".to_string(),
            errors_field: "errors".to_string(),
            message_field: "message".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceVerdict {
    Accepted,
    /// First service-reported message, if the reply carried a usable one.
    Rejected(Option<String>),
}

impl ResponseContract {
    pub fn interpret(&self, body: &Value) -> ServiceVerdict {
        if lookup(body, &self.ack_field).is_some_and(is_truthy) {
            return ServiceVerdict::Accepted;
        }

        let message = lookup(body, &self.errors_field)
            .and_then(Value::as_array)
            .and_then(|errors| errors.first())
            .and_then(|first| lookup(first, &self.message_field))
            .and_then(Value::as_str)
            .filter(|msg| !msg.is_empty())
            .map(str::to_string);

        ServiceVerdict::Rejected(message)
    }
}

fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |current, segment| {
        if segment.is_empty() {
            None
        } else {
            current.get(segment)
        }
    })
}

/// Loose truthiness of a JSON value: `false`, `null`, `0` and `""` are false.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
