//! Declared parameter shapes and the validator that enforces them.
//!
//! Every handler declares an ordered [`InputSchema`]; the dispatcher checks
//! incoming parameters against it before the handler is ever invoked.
//! A missing required parameter is an explicit error, never a silent
//! default.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::FieldError;

/// The value kinds a handler may declare for its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    Number,
    String,
    Boolean,
    StringList,
}

impl std::fmt::Display for ParamKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ParamKind::Number => "number",
            ParamKind::String => "string",
            ParamKind::Boolean => "boolean",
            ParamKind::StringList => "list of strings",
        };
        f.write_str(name)
    }
}

/// One declared parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSpec {
    pub name: String,
    pub kind: ParamKind,
    pub required: bool,
}

/// Ordered parameter declarations for one handler.
///
/// Declaration order is preserved so validation errors and the describe
/// listing are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputSchema {
    params: Vec<ParamSpec>,
}

impl InputSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self, name: &str, kind: ParamKind) -> Self {
        self.params.push(ParamSpec {
            name: name.to_string(),
            kind,
            required: true,
        });
        self
    }

    pub fn optional(mut self, name: &str, kind: ParamKind) -> Self {
        self.params.push(ParamSpec {
            name: name.to_string(),
            kind,
            required: false,
        });
        self
    }

    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    /// Check `params` against the declared shape.
    ///
    /// On success returns the parameter mapping with declared fields coerced
    /// to their kinds (numeric strings become numbers). Unknown fields are
    /// passed through untouched; extra parameters are forward compatible,
    /// not an error. Field errors accumulate in declaration order.
    pub fn validate(&self, params: &Map<String, Value>) -> Result<Map<String, Value>, Vec<FieldError>> {
        let mut errors = Vec::new();
        let mut coerced = params.clone();

        for spec in &self.params {
            match params.get(&spec.name) {
                None if spec.required => errors.push(FieldError::Missing(spec.name.clone())),
                None => {}
                Some(value) => match coerce(spec.kind, value) {
                    Some(value) => {
                        coerced.insert(spec.name.clone(), value);
                    }
                    None => errors.push(FieldError::Mismatch {
                        name: spec.name.clone(),
                        expected: spec.kind,
                    }),
                },
            }
        }

        if errors.is_empty() {
            Ok(coerced)
        } else {
            Err(errors)
        }
    }
}

/// Coerce `value` to `kind`, or `None` when it cannot represent it.
///
/// Numbers accept any JSON number plus textual integer/float forms;
/// booleans and string lists are strict.
fn coerce(kind: ParamKind, value: &Value) -> Option<Value> {
    match kind {
        ParamKind::Number => match value {
            Value::Number(_) => Some(value.clone()),
            Value::String(text) => text
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|parsed| parsed.is_finite())
                .and_then(serde_json::Number::from_f64)
                .map(Value::Number),
            _ => None,
        },
        ParamKind::String => value.is_string().then(|| value.clone()),
        ParamKind::Boolean => value.as_bool().map(Value::Bool),
        ParamKind::StringList => match value {
            Value::Array(items) if items.iter().all(Value::is_string) => Some(value.clone()),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: Value) -> Map<String, Value> {
        value.as_object().cloned().expect("object literal")
    }

    fn schema() -> InputSchema {
        InputSchema::new()
            .required("a", ParamKind::Number)
            .required("b", ParamKind::Number)
            .optional("label", ParamKind::String)
    }

    #[test]
    fn accepts_declared_parameters() {
        let validated = schema()
            .validate(&params(json!({ "a": 2, "b": 3.5 })))
            .expect("valid");
        assert_eq!(validated["a"], json!(2));
        assert_eq!(validated["b"], json!(3.5));
    }

    #[test]
    fn coerces_numeric_strings() {
        let validated = schema()
            .validate(&params(json!({ "a": "4", "b": " 2.5 " })))
            .expect("valid");
        assert_eq!(validated["a"].as_f64(), Some(4.0));
        assert_eq!(validated["b"].as_f64(), Some(2.5));
    }

    #[test]
    fn missing_required_parameter_is_an_error() {
        let errors = schema()
            .validate(&params(json!({ "a": 1 })))
            .expect_err("missing b");
        assert_eq!(errors, vec![FieldError::Missing("b".to_string())]);
    }

    #[test]
    fn non_numeric_string_is_a_mismatch_not_a_default() {
        let errors = schema()
            .validate(&params(json!({ "a": "abc", "b": 1 })))
            .expect_err("a is not numeric");
        assert_eq!(
            errors,
            vec![FieldError::Mismatch {
                name: "a".to_string(),
                expected: ParamKind::Number,
            }]
        );
    }

    #[test]
    fn errors_accumulate_in_declaration_order() {
        let errors = schema()
            .validate(&params(json!({ "b": true })))
            .expect_err("two failures");
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field(), "a");
        assert_eq!(errors[1].field(), "b");
    }

    #[test]
    fn unknown_fields_pass_through() {
        let validated = schema()
            .validate(&params(json!({ "a": 1, "b": 2, "extra": "kept" })))
            .expect("valid");
        assert_eq!(validated["extra"], json!("kept"));
    }

    #[test]
    fn boolean_is_strict() {
        let schema = InputSchema::new().required("flag", ParamKind::Boolean);
        assert!(schema.validate(&params(json!({ "flag": true }))).is_ok());
        assert!(schema.validate(&params(json!({ "flag": "true" }))).is_err());
    }

    #[test]
    fn string_list_rejects_mixed_arrays() {
        let schema = InputSchema::new().required("items", ParamKind::StringList);
        assert!(schema
            .validate(&params(json!({ "items": ["a", "b"] })))
            .is_ok());
        assert!(schema
            .validate(&params(json!({ "items": ["a", 1] })))
            .is_err());
        assert!(schema.validate(&params(json!({ "items": "a" }))).is_err());
    }

    #[test]
    fn non_finite_numeric_strings_are_rejected() {
        let schema = InputSchema::new().required("a", ParamKind::Number);
        assert!(schema.validate(&params(json!({ "a": "NaN" }))).is_err());
        assert!(schema.validate(&params(json!({ "a": "inf" }))).is_err());
    }
}
