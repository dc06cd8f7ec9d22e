//! Field schemas and the casting/validation applied before anything is stored

use serde_json::{Map, Value};

use super::Collection;
use crate::error::{ContentError, ContentResult};

/// Record fields keyed by schema field name
pub type Fields = Map<String, Value>;

/// Storage kind of a schema field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    /// Non-negative integer
    Counter,
    Flag,
}

impl FieldKind {
    fn type_name(self) -> &'static str {
        match self {
            FieldKind::String => "String",
            FieldKind::Counter => "Number",
            FieldKind::Flag => "Boolean",
        }
    }
}

/// Value written when a field is absent on create
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDefault {
    Zero,
    False,
    Empty,
}

impl FieldDefault {
    pub fn to_value(self) -> Value {
        match self {
            FieldDefault::Zero => Value::from(0),
            FieldDefault::False => Value::Bool(false),
            FieldDefault::Empty => Value::String(String::new()),
        }
    }
}

/// One field of a collection schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub default: Option<FieldDefault>,
}

impl FieldSpec {
    pub const fn required(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::String,
            required: true,
            default: None,
        }
    }

    pub const fn optional(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::String,
            required: false,
            default: None,
        }
    }

    pub const fn with_default(name: &'static str, kind: FieldKind, default: FieldDefault) -> Self {
        Self {
            name,
            kind,
            required: false,
            default: Some(default),
        }
    }
}

const LIKES: FieldSpec = FieldSpec::with_default("likes", FieldKind::Counter, FieldDefault::Zero);

pub const NEWS_SCHEMA: &[FieldSpec] = &[
    FieldSpec::required("title"),
    FieldSpec::required("text"),
    FieldSpec::optional("image"),
    LIKES,
];

pub const VIDEOS_SCHEMA: &[FieldSpec] = &[
    FieldSpec::required("title"),
    FieldSpec::optional("image"),
    FieldSpec::required("videoUrl"),
    LIKES,
];

pub const MATERIALS_VIDEO_SCHEMA: &[FieldSpec] = &[
    FieldSpec::required("title"),
    FieldSpec::optional("image"),
    FieldSpec::required("downloadUrl"),
    LIKES,
];

pub const MATERIALS_SURAT_SCHEMA: &[FieldSpec] = &[
    FieldSpec::required("title"),
    FieldSpec::required("image"),
    FieldSpec::required("downloadUrl"),
    LIKES,
];

pub const MATERIALS_AUDIO_SCHEMA: &[FieldSpec] = &[
    FieldSpec::required("title"),
    FieldSpec::required("downloadUrl"),
    LIKES,
];

pub const MATERIALS_MATN_SCHEMA: &[FieldSpec] = &[
    FieldSpec::required("title"),
    FieldSpec::required("content"),
    FieldSpec::required("downloadUrl"),
    LIKES,
];

pub const ADMIN_SCHEMA: &[FieldSpec] = &[
    FieldSpec::required("title"),
    FieldSpec::optional("text"),
    FieldSpec::optional("url"),
    FieldSpec::optional("handle"),
    FieldSpec::with_default("highlight", FieldKind::Flag, FieldDefault::False),
    LIKES,
];

pub const COMMENT_SCHEMA: &[FieldSpec] = &[
    FieldSpec::required("message"),
    FieldSpec::required("itemType"),
    FieldSpec::with_default("itemId", FieldKind::String, FieldDefault::Empty),
];

/// Cast and validate a create payload.
///
/// Unknown keys are dropped, defaults are filled in and every required
/// field must be present and non-empty.
pub fn prepare_insert(collection: Collection, raw: Fields) -> ContentResult<Fields> {
    let mut fields = Fields::new();
    let mut errors = Vec::new();

    for spec in collection.schema() {
        match raw.get(spec.name) {
            None => {
                if spec.required {
                    errors.push(required_message(spec));
                } else if let Some(default) = spec.default {
                    fields.insert(spec.name.to_string(), default.to_value());
                }
            }
            Some(value) => match cast_field(spec, value, spec.required) {
                Ok(v) => {
                    fields.insert(spec.name.to_string(), v);
                }
                Err(e) => errors.push(e),
            },
        }
    }

    if errors.is_empty() {
        Ok(fields)
    } else {
        Err(ContentError::Validation(format!(
            "{} validation failed: {}",
            collection.model_name(),
            errors.join(", ")
        )))
    }
}

/// Cast an update payload.
///
/// Only schema fields present in `raw` are returned; absent fields are left
/// untouched by the update. Required fields are not re-checked, so an update
/// may blank them.
pub fn prepare_update(collection: Collection, raw: Fields) -> ContentResult<Fields> {
    let mut fields = Fields::new();
    let mut errors = Vec::new();

    for spec in collection.schema() {
        if let Some(value) = raw.get(spec.name) {
            match cast_field(spec, value, false) {
                Ok(v) => {
                    fields.insert(spec.name.to_string(), v);
                }
                Err(e) => errors.push(e),
            }
        }
    }

    if errors.is_empty() {
        Ok(fields)
    } else {
        Err(ContentError::Validation(format!(
            "Validation failed: {}",
            errors.join(", ")
        )))
    }
}

fn required_message(spec: &FieldSpec) -> String {
    format!("{0}: Path `{0}` is required.", spec.name)
}

fn cast_message(spec: &FieldSpec, value: &Value) -> String {
    format!(
        "{0}: Cast to {1} failed for value \"{2}\" (type {3}) at path \"{0}\"",
        spec.name,
        spec.kind.type_name(),
        display_value(value),
        json_type(value)
    )
}

fn cast_field(spec: &FieldSpec, value: &Value, required: bool) -> Result<Value, String> {
    if value.is_null() {
        return if required {
            Err(required_message(spec))
        } else {
            Ok(Value::Null)
        };
    }

    let cast = match spec.kind {
        FieldKind::String => cast_string(value),
        FieldKind::Counter => cast_counter(value),
        FieldKind::Flag => cast_flag(value),
    }
    .ok_or_else(|| cast_message(spec, value))?;

    match (&cast, spec.kind) {
        (Value::String(s), _) if required && s.is_empty() => Err(required_message(spec)),
        (Value::Number(n), FieldKind::Counter) if n.as_i64().is_some_and(|i| i < 0) => Err(format!(
            "{0}: Path `{0}` ({1}) is less than minimum allowed value (0).",
            spec.name, n
        )),
        _ => Ok(cast),
    }
}

fn cast_string(value: &Value) -> Option<Value> {
    match value {
        Value::String(_) => Some(value.clone()),
        Value::Number(n) => Some(Value::String(n.to_string())),
        Value::Bool(b) => Some(Value::String(b.to_string())),
        _ => None,
    }
}

fn cast_counter(value: &Value) -> Option<Value> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| is_integral_i64(*f)).map(|f| f as i64))
            .map(Value::from),
        Value::String(s) => s.trim().parse::<i64>().ok().map(Value::from),
        _ => None,
    }
}

/// Whether `f` is a whole number that `as i64` converts without saturating
pub(crate) fn is_integral_i64(f: f64) -> bool {
    f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64
}

fn cast_flag(value: &Value) -> Option<Value> {
    match value {
        Value::Bool(_) => Some(value.clone()),
        Value::String(s) => match s.as_str() {
            "true" | "1" | "yes" => Some(Value::Bool(true)),
            "false" | "0" | "no" => Some(Value::Bool(false)),
            _ => None,
        },
        Value::Number(n) => match n.as_i64() {
            Some(1) => Some(Value::Bool(true)),
            Some(0) => Some(Value::Bool(false)),
            _ => None,
        },
        _ => None,
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "Array",
        Value::Object(_) => "Object",
    }
}
