//! Input schemas as typed constraint descriptors
//!
//! Each tool declares an ordered mapping from parameter name to a
//! `ParamSpec` describing type, optionality, default, and bounds. A single
//! generic routine validates raw arguments against the descriptors,
//! reporting the first violation with enough detail for the caller to
//! correct the request. No schema-definition library is involved; the
//! JSON-Schema rendering exists only for tool discovery.

use serde_json::{Map, Value, json};
use thiserror::Error;

use crate::id::is_valid_post_id;

/// Validated, defaulted arguments handed to a tool handler.
pub type ToolArgs = Map<String, Value>;

/// First schema violation found in a raw argument set.
///
/// Carries the offending field, the expected constraint, and what was
/// actually supplied.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("arguments must be a JSON object, got {actual}")]
    NotAnObject { actual: String },

    #[error("missing required parameter `{field}`")]
    MissingRequired { field: String },

    #[error("parameter `{field}` must be a {expected}, got {actual}")]
    WrongType {
        field: String,
        expected: &'static str,
        actual: String,
    },

    #[error("parameter `{field}` must be >= {min}, got {actual}")]
    BelowMinimum { field: String, min: f64, actual: f64 },

    #[error("parameter `{field}` must be <= {max}, got {actual}")]
    AboveMaximum { field: String, max: f64, actual: f64 },

    #[error("parameter `{field}` must be at least {min} characters, got {actual}")]
    TooShort {
        field: String,
        min: usize,
        actual: usize,
    },

    #[error("parameter `{field}` must be at most {max} characters, got {actual}")]
    TooLong {
        field: String,
        max: usize,
        actual: usize,
    },

    #[error("parameter `{field}` is not a valid post id: {actual}")]
    BadFormat { field: String, actual: String },
}

impl ValidationError {
    /// Name of the offending field, if the violation is field-level.
    pub fn field_name(&self) -> Option<&str> {
        match self {
            Self::NotAnObject { .. } => None,
            Self::MissingRequired { field }
            | Self::WrongType { field, .. }
            | Self::BelowMinimum { field, .. }
            | Self::AboveMaximum { field, .. }
            | Self::TooShort { field, .. }
            | Self::TooLong { field, .. }
            | Self::BadFormat { field, .. } => Some(field),
        }
    }
}

/// Declared parameter type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    String,
    Number,
    Integer,
    Boolean,
}

impl ParamType {
    /// JSON-Schema type name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
        }
    }
}

/// String format constraints beyond length bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamFormat {
    /// Must satisfy [`is_valid_post_id`]
    PostId,
}

/// Constraint descriptor for a single parameter
#[derive(Debug, Clone)]
pub struct ParamSpec {
    pub param_type: ParamType,
    pub description: String,
    pub required: bool,
    pub default: Option<Value>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub min_len: Option<usize>,
    pub max_len: Option<usize>,
    pub format: Option<ParamFormat>,
}

impl ParamSpec {
    fn new(param_type: ParamType, description: impl Into<String>) -> Self {
        Self {
            param_type,
            description: description.into(),
            required: false,
            default: None,
            minimum: None,
            maximum: None,
            min_len: None,
            max_len: None,
            format: None,
        }
    }

    pub fn string(description: impl Into<String>) -> Self {
        Self::new(ParamType::String, description)
    }

    pub fn number(description: impl Into<String>) -> Self {
        Self::new(ParamType::Number, description)
    }

    pub fn integer(description: impl Into<String>) -> Self {
        Self::new(ParamType::Integer, description)
    }

    pub fn boolean(description: impl Into<String>) -> Self {
        Self::new(ParamType::Boolean, description)
    }

    /// Mark the parameter as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Default value applied when the parameter is omitted
    pub fn default_value(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    /// Inclusive numeric lower bound
    pub fn minimum(mut self, min: f64) -> Self {
        self.minimum = Some(min);
        self
    }

    /// Inclusive numeric upper bound
    pub fn maximum(mut self, max: f64) -> Self {
        self.maximum = Some(max);
        self
    }

    /// Inclusive string length bounds
    pub fn length(mut self, min: usize, max: usize) -> Self {
        self.min_len = Some(min);
        self.max_len = Some(max);
        self
    }

    /// String format constraint
    pub fn format(mut self, format: ParamFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Render this descriptor as a JSON-Schema property
    fn to_property(&self) -> Value {
        let mut prop = Map::new();
        prop.insert("type".into(), json!(self.param_type.as_str()));
        prop.insert("description".into(), json!(self.description));
        if let Some(min) = self.minimum {
            prop.insert("minimum".into(), json!(min));
        }
        if let Some(max) = self.maximum {
            prop.insert("maximum".into(), json!(max));
        }
        if let Some(min) = self.min_len {
            prop.insert("minLength".into(), json!(min));
        }
        if let Some(max) = self.max_len {
            prop.insert("maxLength".into(), json!(max));
        }
        if let Some(default) = &self.default {
            prop.insert("default".into(), default.clone());
        }
        Value::Object(prop)
    }

    /// Check one present value against this descriptor.
    fn check(&self, field: &str, value: &Value) -> Result<(), ValidationError> {
        match self.param_type {
            ParamType::Number => {
                let Some(num) = value.as_f64() else {
                    return Err(wrong_type(field, "number", value));
                };
                self.check_bounds(field, num)?;
            }
            ParamType::Integer => {
                let Some(num) = value.as_i64() else {
                    return Err(wrong_type(field, "integer", value));
                };
                self.check_bounds(field, num as f64)?;
            }
            ParamType::String => {
                let Some(s) = value.as_str() else {
                    return Err(wrong_type(field, "string", value));
                };
                let len = s.chars().count();
                if let Some(min) = self.min_len {
                    if len < min {
                        return Err(ValidationError::TooShort {
                            field: field.to_string(),
                            min,
                            actual: len,
                        });
                    }
                }
                if let Some(max) = self.max_len {
                    if len > max {
                        return Err(ValidationError::TooLong {
                            field: field.to_string(),
                            max,
                            actual: len,
                        });
                    }
                }
                if let Some(ParamFormat::PostId) = self.format {
                    if !is_valid_post_id(s) {
                        return Err(ValidationError::BadFormat {
                            field: field.to_string(),
                            actual: s.to_string(),
                        });
                    }
                }
            }
            ParamType::Boolean => {
                if !value.is_boolean() {
                    return Err(wrong_type(field, "boolean", value));
                }
            }
        }
        Ok(())
    }

    fn check_bounds(&self, field: &str, actual: f64) -> Result<(), ValidationError> {
        if let Some(min) = self.minimum {
            if actual < min {
                return Err(ValidationError::BelowMinimum {
                    field: field.to_string(),
                    min,
                    actual,
                });
            }
        }
        if let Some(max) = self.maximum {
            if actual > max {
                return Err(ValidationError::AboveMaximum {
                    field: field.to_string(),
                    max,
                    actual,
                });
            }
        }
        Ok(())
    }
}

fn wrong_type(field: &str, expected: &'static str, value: &Value) -> ValidationError {
    ValidationError::WrongType {
        field: field.to_string(),
        expected,
        actual: json_type_name(value).to_string(),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Ordered parameter descriptors for one tool
///
/// Built once at registration, read-only afterwards. Declaration order is
/// both the validation order and the order in the rendered JSON-Schema.
#[derive(Debug, Clone, Default)]
pub struct InputSchema {
    params: Vec<(String, ParamSpec)>,
}

impl InputSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a parameter. Order of calls is preserved.
    pub fn param(mut self, name: impl Into<String>, spec: ParamSpec) -> Self {
        self.params.push((name.into(), spec));
        self
    }

    /// Validate raw arguments and apply defaults.
    ///
    /// `Null` is treated as an empty object so callers can omit arguments
    /// entirely. Stops at the first violation. Undeclared keys are dropped;
    /// the returned map contains declared parameters only.
    pub fn validate(&self, raw: &Value) -> Result<ToolArgs, ValidationError> {
        let empty = Map::new();
        let raw = match raw {
            Value::Null => &empty,
            Value::Object(map) => map,
            other => {
                return Err(ValidationError::NotAnObject {
                    actual: json_type_name(other).to_string(),
                });
            }
        };

        let mut validated = Map::new();
        for (name, spec) in &self.params {
            match raw.get(name) {
                Some(value) => {
                    spec.check(name, value)?;
                    validated.insert(name.clone(), value.clone());
                }
                None if spec.required => {
                    return Err(ValidationError::MissingRequired {
                        field: name.clone(),
                    });
                }
                None => {
                    if let Some(default) = &spec.default {
                        validated.insert(name.clone(), default.clone());
                    }
                }
            }
        }
        Ok(validated)
    }

    /// Render the schema as a JSON-Schema object for tool discovery
    pub fn to_json_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();
        for (name, spec) in &self.params {
            properties.insert(name.clone(), spec.to_property());
            if spec.required {
                required.push(json!(name));
            }
        }
        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}
