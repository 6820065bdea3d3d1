//! Core data models for translation

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::errors::{Result, TranslationError, ValidationIssue};

/// Which side of a translation a language list refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageType {
    /// Languages text can be translated from
    Source,
    /// Languages text can be translated into
    Target,
}

impl LanguageType {
    /// Value of the upstream `type` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageType::Source => "source",
            LanguageType::Target => "target",
        }
    }
}

/// Translation request, also the upstream `POST /v2/translate` body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslateRequest {
    /// Texts to translate, at least one
    pub text: Vec<String>,
    /// Target language code, e.g. `DE` or `EN-US`
    pub target_lang: String,
    /// Omitted from the body when absent so upstream auto-detects
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_lang: Option<String>,
}

impl TranslateRequest {
    /// Validate an untyped tool argument payload.
    ///
    /// Rejects unknown, missing and mis-typed fields, collecting every issue
    /// before failing.
    pub fn from_arguments(arguments: &Value) -> Result<Self> {
        let mut issues = Vec::new();
        let Some(object) = as_object(arguments, &mut issues) else {
            return Err(TranslationError::InvalidParams { issues });
        };
        let object: &Map<String, Value> = &object;
        reject_unknown(object, &["text", "target_lang", "source_lang"], &mut issues);

        let text = match object.get("text") {
            None | Some(Value::Null) => {
                issues.push(ValidationIssue::new(&["text"], "Required"));
                None
            }
            Some(Value::Array(items)) => {
                let mut strings = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    match item {
                        Value::String(s) => strings.push(s.clone()),
                        other => issues.push(ValidationIssue::new(
                            &["text", index.to_string().as_str()],
                            format!("Expected string, received {}", type_name(other)),
                        )),
                    }
                }
                if items.is_empty() {
                    issues.push(ValidationIssue::new(
                        &["text"],
                        "Array must contain at least 1 element(s)",
                    ));
                }
                Some(strings)
            }
            Some(other) => {
                issues.push(ValidationIssue::new(
                    &["text"],
                    format!("Expected array, received {}", type_name(other)),
                ));
                None
            }
        };

        let target_lang = required_string(object, "target_lang", &mut issues);
        let source_lang = optional_string(object, "source_lang", &mut issues);

        match (text, target_lang) {
            (Some(text), Some(target_lang)) if issues.is_empty() => Ok(Self {
                text,
                target_lang,
                source_lang,
            }),
            _ => Err(TranslationError::InvalidParams { issues }),
        }
    }
}

/// Language list request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageListRequest {
    /// `None` lists languages without a filter
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub language_type: Option<LanguageType>,
}

impl LanguageListRequest {
    /// Validate an untyped tool argument payload
    pub fn from_arguments(arguments: &Value) -> Result<Self> {
        let mut issues = Vec::new();
        let Some(object) = as_object(arguments, &mut issues) else {
            return Err(TranslationError::InvalidParams { issues });
        };
        let object: &Map<String, Value> = &object;
        reject_unknown(object, &["type"], &mut issues);

        let language_type = match object.get("type") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if s == "source" => Some(LanguageType::Source),
            Some(Value::String(s)) if s == "target" => Some(LanguageType::Target),
            Some(other) => {
                issues.push(ValidationIssue::new(
                    &["type"],
                    format!(
                        "Invalid enum value. Expected 'source' | 'target', received {}",
                        other
                    ),
                ));
                None
            }
        };

        if issues.is_empty() {
            Ok(Self { language_type })
        } else {
            Err(TranslationError::InvalidParams { issues })
        }
    }
}

/// One translated text, in input order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationResult {
    /// Source language as detected or given
    pub detected_source_language: String,
    /// Translated text
    pub text: String,
}

/// Upstream `POST /v2/translate` response body
#[derive(Debug, Clone, Deserialize)]
pub struct TranslateResponse {
    /// One entry per input text
    pub translations: Vec<TranslationResult>,
}

/// A language supported by the upstream service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageDescriptor {
    /// Language code
    pub language: String,
    /// English display name
    pub name: String,
    /// Only reported for target languages; absent means `false`
    #[serde(default)]
    pub supports_formality: bool,
}

/// Missing or `null` payloads count as an empty object
fn as_object<'a>(
    arguments: &'a Value,
    issues: &mut Vec<ValidationIssue>,
) -> Option<std::borrow::Cow<'a, Map<String, Value>>> {
    match arguments {
        Value::Object(map) => Some(std::borrow::Cow::Borrowed(map)),
        Value::Null => Some(std::borrow::Cow::Owned(Map::new())),
        other => {
            issues.push(ValidationIssue::new(
                &[],
                format!("Expected object, received {}", type_name(other)),
            ));
            None
        }
    }
}

fn reject_unknown(object: &Map<String, Value>, known: &[&str], issues: &mut Vec<ValidationIssue>) {
    for key in object.keys().filter(|k| !known.contains(&k.as_str())) {
        issues.push(ValidationIssue::new(
            &[key.as_str()],
            format!("Unrecognized key: '{}'", key),
        ));
    }
}

fn required_string(
    object: &Map<String, Value>,
    field: &str,
    issues: &mut Vec<ValidationIssue>,
) -> Option<String> {
    match object.get(field) {
        None | Some(Value::Null) => {
            issues.push(ValidationIssue::new(&[field], "Required"));
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            issues.push(ValidationIssue::new(
                &[field],
                format!("Expected string, received {}", type_name(other)),
            ));
            None
        }
    }
}

fn optional_string(
    object: &Map<String, Value>,
    field: &str,
    issues: &mut Vec<ValidationIssue>,
) -> Option<String> {
    match object.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            issues.push(ValidationIssue::new(
                &[field],
                format!("Expected string, received {}", type_name(other)),
            ));
            None
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
