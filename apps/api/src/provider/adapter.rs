//! Normalizes provider responses into `AnalysisResult`.
//!
//! Providers (webhook workflows in particular) wrap the result in various envelopes.
//! Each envelope is a `ResponseShape`. Detection tries the shapes in `ResponseShape::ORDER`
//! and peels one layer at a time until a bare result object is reached. A new quirk
//! becomes a new variant; field decoding is untouched.
//!
//! Only the shape is normalized. Whether matched/missing/extra are consistent with
//! each other is the provider's business.

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::models::analysis::AnalysisResult;
use crate::provider::{strip_json_fences, ProviderError};
use crate::screening::classifier::{classify, Label};

/// Maximum number of envelopes peeled before giving up.
pub const MAX_UNWRAP_DEPTH: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// `{ "score": .., "label": .., ... }`
    BareObject,
    /// `[ <anything> ]`
    WrappedList,
    /// `{ "output": "<encoded object>" }` or `{ "output": { ... } }`
    EncodedOutput,
    /// `"<encoded object>"`
    EncodedString,
}

impl ResponseShape {
    pub const ORDER: [ResponseShape; 4] = [
        ResponseShape::BareObject,
        ResponseShape::WrappedList,
        ResponseShape::EncodedOutput,
        ResponseShape::EncodedString,
    ];

    fn matches(self, value: &Value) -> bool {
        match self {
            ResponseShape::BareObject => value
                .as_object()
                .is_some_and(|map| map.contains_key("score") || !map.contains_key("output")),
            ResponseShape::WrappedList => value.as_array().is_some_and(|items| items.len() == 1),
            ResponseShape::EncodedOutput => value
                .as_object()
                .is_some_and(|map| map.contains_key("output")),
            ResponseShape::EncodedString => value.is_string(),
        }
    }

    /// Removes one envelope. Not called for `BareObject`, which is terminal.
    fn peel(self, value: Value) -> Result<Value, ProviderError> {
        match (self, value) {
            (ResponseShape::WrappedList, Value::Array(mut items)) => Ok(items.remove(0)),
            (ResponseShape::EncodedOutput, Value::Object(mut map)) => match map.remove("output") {
                Some(Value::String(encoded)) => decode_encoded(&encoded),
                Some(inner @ (Value::Object(_) | Value::Array(_))) => Ok(inner),
                _ => Err(malformed("`output` is neither an encoded payload nor an object")),
            },
            (ResponseShape::EncodedString, Value::String(encoded)) => decode_encoded(&encoded),
            (shape, _) => Err(malformed(format!("cannot unwrap {shape:?}"))),
        }
    }
}

fn detect(value: &Value) -> Option<ResponseShape> {
    ResponseShape::ORDER
        .into_iter()
        .find(|shape| shape.matches(value))
}

/// Normalizes a decoded provider body into an `AnalysisResult`.
pub fn normalize(body: Value) -> Result<AnalysisResult, ProviderError> {
    let mut current = body;

    for _ in 0..=MAX_UNWRAP_DEPTH {
        let shape = detect(&current)
            .ok_or_else(|| malformed(format!("unrecognised response shape: {}", kind_of(&current))))?;

        if shape == ResponseShape::BareObject {
            return match current {
                Value::Object(map) => decode_fields(map),
                other => Err(malformed(format!("expected an object, got {}", kind_of(&other)))),
            };
        }

        current = shape.peel(current)?;
    }

    Err(malformed(format!(
        "unexpected nesting depth (more than {MAX_UNWRAP_DEPTH} envelopes)"
    )))
}

fn decode_encoded(encoded: &str) -> Result<Value, ProviderError> {
    serde_json::from_str(strip_json_fences(encoded))
        .map_err(|e| malformed(format!("undecodable encoded payload: {e}")))
}

// ────────────────────────────────────────────────────────────────────────────
// Field decoding
// ────────────────────────────────────────────────────────────────────────────

/// A scalar that may arrive as a plain string or as a single-element list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TextField {
    Plain(String),
    List(Vec<String>),
}

impl TextField {
    fn into_string(self) -> String {
        match self {
            TextField::Plain(text) => text,
            TextField::List(items) => items.into_iter().next().unwrap_or_default(),
        }
    }
}

/// A skill list that may arrive as an array or flattened into one comma-separated string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SkillList {
    List(Vec<String>),
    Joined(String),
}

impl SkillList {
    fn into_vec(self) -> Vec<String> {
        let items: Vec<String> = match self {
            SkillList::List(items) => items,
            SkillList::Joined(joined) => joined.split(',').map(str::to_string).collect(),
        };
        items
            .into_iter()
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRemoteResult {
    #[serde(default)]
    candidate_name: Option<TextField>,
    #[serde(default)]
    role_title: Option<TextField>,
    #[serde(default)]
    score: Option<Value>,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    matched_skills: Option<SkillList>,
    #[serde(default)]
    missing_skills: Option<SkillList>,
    #[serde(default)]
    extra_skills: Option<SkillList>,
}

fn decode_fields(map: Map<String, Value>) -> Result<AnalysisResult, ProviderError> {
    let raw: RawRemoteResult = serde_json::from_value(Value::Object(map))
        .map_err(|e| malformed(format!("unexpected field type: {e}")))?;

    let score = parse_score(raw.score)?;

    let label_text = raw
        .label
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .ok_or_else(|| malformed("missing required `label`"))?;
    let label: Label = serde_json::from_value(Value::String(label_text.clone()))
        .map_err(|_| malformed(format!("unknown label '{label_text}'")))?;

    if label != classify(score) {
        warn!(
            score,
            %label,
            expected = %classify(score),
            "Provider label disagrees with its score; keeping provider label"
        );
    }

    let summary = raw
        .summary
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| malformed("missing required `summary`"))?;

    Ok(AnalysisResult {
        candidate_name: raw.candidate_name.map(TextField::into_string).unwrap_or_default(),
        role_title: raw.role_title.map(TextField::into_string).unwrap_or_default(),
        score,
        label,
        summary,
        matched_skills: raw.matched_skills.map(SkillList::into_vec).unwrap_or_default(),
        missing_skills: raw.missing_skills.map(SkillList::into_vec).unwrap_or_default(),
        extra_skills: raw.extra_skills.map(SkillList::into_vec).unwrap_or_default(),
    })
}

/// Accepts any JSON number in [0, 100]; fractional scores are rounded.
fn parse_score(score: Option<Value>) -> Result<u8, ProviderError> {
    let value = score
        .and_then(|s| s.as_f64())
        .ok_or_else(|| malformed("missing required numeric `score`"))?;

    if !(0.0..=100.0).contains(&value) {
        return Err(malformed(format!("score {value} outside 0–100")));
    }

    Ok(value.round() as u8)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

fn malformed(message: impl Into<String>) -> ProviderError {
    ProviderError::MalformedResponse(message.into())
}
