use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};
use std::borrow::Cow;

// ============ Inbound ============

/// Query parameters sent by the helpdesk's live lookup feature.
///
/// Every field is optional and untrusted. An absent field and an empty one
/// mean the same thing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub customer_id: Option<String>,
}

impl LookupRequest {
    /// Builds a request from decoded `key=value` pairs.
    ///
    /// When a field repeats, the last occurrence wins. Unknown keys are ignored.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (Cow<'a, str>, Cow<'a, str>)>,
    {
        let mut request = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "first_name" => &mut request.first_name,
                "last_name" => &mut request.last_name,
                "email" => &mut request.email,
                "customer_id" => &mut request.customer_id,
                _ => continue,
            };
            *slot = Some(value.into_owned());
        }
        request
    }

    /// Parses a raw, still percent-encoded query string.
    pub fn from_query(query: &str) -> Self {
        Self::from_pairs(url::form_urlencoded::parse(query.as_bytes()))
    }

    pub fn first_name(&self) -> &str {
        self.first_name.as_deref().unwrap_or("")
    }

    pub fn last_name(&self) -> &str {
        self.last_name.as_deref().unwrap_or("")
    }

    pub fn email(&self) -> &str {
        self.email.as_deref().unwrap_or("")
    }

    pub fn customer_id(&self) -> &str {
        self.customer_id.as_deref().unwrap_or("")
    }
}

// ============ Directory API ============

/// A user record as returned by the directory search endpoint.
///
/// Upstream values are loosely typed, so each field is coerced on the way in.
/// `id` is kept whenever it is a scalar. The other fields are dropped when
/// their text is `""` or `"0"` (so `0`, `0.0` and `false` are dropped too).
/// Null, arrays and objects always become `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryUser {
    /// Directory identifier; numeric upstream in practice.
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub phone: Option<String>,
}

impl DirectoryUser {
    /// Builds a user from one element of the upstream `users` array.
    ///
    /// Elements that are not objects yield a user with no fields.
    pub fn from_value(value: Value) -> Self {
        if !value.is_object() {
            return Self::default();
        }
        serde_json::from_value(value).unwrap_or_default()
    }
}

/// Text form of a scalar JSON value; `None` for null, arrays and objects.
///
/// `true` reads as `"1"` and `false` as `""`.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(number_text(n)),
        Value::Bool(true) => Some("1".to_string()),
        Value::Bool(false) => Some(String::new()),
        _ => None,
    }
}

/// Whether a coerced value carries information. `""` and `"0"` do not.
pub fn is_blank(text: &str) -> bool {
    text.is_empty() || text == "0"
}

/// Integral floats print without a fraction (`1e3` reads as `"1000"`).
fn number_text(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        _ => n.to_string(),
    }
}

fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(scalar_text)
        .filter(|text| !text.is_empty()))
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(scalar_text)
        .filter(|text| !is_blank(text)))
}
