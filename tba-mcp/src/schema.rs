//! Shape declarations and structural validation.
//!
//! A [`Shape`] describes the expected structure of a JSON value: primitive
//! kinds, objects with required/optional fields, homogeneous arrays, and
//! string-keyed maps. Validation is recursive and fail-fast: the first
//! violation is reported with its field path and the expected versus actual
//! kind. Unknown extra fields are accepted (permissive superset matching),
//! and optional fields may be absent or explicitly null — the two are
//! treated as equivalent.

use std::sync::OnceLock;

use chrono::{Datelike, Utc};
use regex::Regex;
use serde_json::Value;
use thiserror::Error;

/// First competition year of the upstream dataset.
pub const MIN_YEAR: i64 = 1992;

/// Validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field was absent.
    #[error("missing required field `{path}`")]
    MissingField {
        /// Path of the absent field.
        path: String,
    },

    /// A value had the wrong JSON kind.
    #[error("field `{path}`: expected {expected}, got {actual}")]
    WrongKind {
        /// Path of the offending value.
        path: String,
        /// Expected JSON kind.
        expected: &'static str,
        /// Actual JSON kind.
        actual: &'static str,
    },

    /// A value had the right kind but violated a constraint
    /// (pattern mismatch, out-of-range number).
    #[error("field `{path}`: {message}")]
    Constraint {
        /// Path of the offending value.
        path: String,
        /// Constraint description.
        message: String,
    },
}

/// A field of an object shape.
#[derive(Debug, Clone)]
pub struct Field {
    /// Field name.
    pub name: &'static str,

    /// Shape of the field value.
    pub shape: Shape,

    /// Whether the field may be absent or null.
    pub optional: bool,
}

impl Field {
    /// A field that must be present and non-null.
    pub fn required(name: &'static str, shape: Shape) -> Self {
        Self {
            name,
            shape,
            optional: false,
        }
    }

    /// A field that may be absent or null.
    pub fn optional(name: &'static str, shape: Shape) -> Self {
        Self {
            name,
            shape,
            optional: true,
        }
    }
}

/// A structural type description for a JSON value.
#[derive(Debug, Clone)]
pub enum Shape {
    /// Any JSON string.
    String,

    /// Any JSON number (no numeric-string coercion).
    Number,

    /// A JSON boolean.
    Boolean,

    /// An opaque pass-through value; never fails validation.
    Any,

    /// An object with declared fields. Undeclared fields are ignored.
    Object(Vec<Field>),

    /// An array whose elements all match the element shape.
    Array(Box<Shape>),

    /// An object whose keys are opaque strings and whose values all match
    /// the value shape.
    Map(Box<Shape>),
}

/// JSON kind name for error messages.
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Validate a JSON value against a shape.
///
/// `path` is the location of `value` for error reporting; callers start
/// at `"$"`.
pub fn validate(value: &Value, shape: &Shape, path: &str) -> Result<(), ValidationError> {
    match shape {
        Shape::Any => Ok(()),
        Shape::String => expect_kind(value, path, "string", Value::is_string),
        Shape::Number => expect_kind(value, path, "number", Value::is_number),
        Shape::Boolean => expect_kind(value, path, "boolean", Value::is_boolean),
        Shape::Object(fields) => {
            let Value::Object(map) = value else {
                return Err(wrong_kind(value, path, "object"));
            };
            for field in fields {
                let child_path = format!("{}.{}", path, field.name);
                match map.get(field.name) {
                    None | Some(Value::Null) if field.optional => {}
                    None => {
                        return Err(ValidationError::MissingField { path: child_path });
                    }
                    Some(child) => validate(child, &field.shape, &child_path)?,
                }
            }
            Ok(())
        }
        Shape::Array(element) => {
            let Value::Array(items) = value else {
                return Err(wrong_kind(value, path, "array"));
            };
            for (i, item) in items.iter().enumerate() {
                validate(item, element, &format!("{}[{}]", path, i))?;
            }
            Ok(())
        }
        Shape::Map(element) => {
            let Value::Object(map) = value else {
                return Err(wrong_kind(value, path, "object"));
            };
            for (key, item) in map {
                validate(item, element, &format!("{}.{}", path, key))?;
            }
            Ok(())
        }
    }
}

fn expect_kind(
    value: &Value,
    path: &str,
    expected: &'static str,
    check: impl Fn(&Value) -> bool,
) -> Result<(), ValidationError> {
    if check(value) {
        Ok(())
    } else {
        Err(wrong_kind(value, path, expected))
    }
}

fn wrong_kind(value: &Value, path: &str, expected: &'static str) -> ValidationError {
    ValidationError::WrongKind {
        path: path.to_string(),
        expected,
        actual: kind_of(value),
    }
}

/// Compiled team-key pattern (`frc` followed by one or more digits).
pub fn team_key_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^frc\d+$").expect("team key pattern compiles"))
}

/// Validate a team key against the `^frc\d+$` pattern.
pub fn validate_team_key(value: &str, path: &str) -> Result<(), ValidationError> {
    if team_key_pattern().is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::Constraint {
            path: path.to_string(),
            message: format!("`{}` must be a team key in format frcXXXX", value),
        })
    }
}

/// Upper bound of the accepted year range: next calendar year, because
/// upstream publishes the coming season's events ahead of time.
pub fn max_year() -> i64 {
    i64::from(Utc::now().year()) + 1
}

/// Validate a competition year against the inclusive range
/// `[1992, current year + 1]`.
pub fn validate_year(year: i64, path: &str) -> Result<(), ValidationError> {
    let max = max_year();
    if (MIN_YEAR..=max).contains(&year) {
        Ok(())
    } else {
        Err(ValidationError::Constraint {
            path: path.to_string(),
            message: format!("{} is outside the year range {}..={}", year, MIN_YEAR, max),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn team_key_field() -> Shape {
        Shape::Object(vec![
            Field::required("key", Shape::String),
            Field::required("team_number", Shape::Number),
            Field::optional("nickname", Shape::String),
        ])
    }

    #[test]
    fn test_valid_object() {
        let value = json!({"key": "frc86", "team_number": 86, "nickname": "Resistance"});
        assert!(validate(&value, &team_key_field(), "$").is_ok());
    }

    #[test]
    fn test_missing_required_field() {
        let value = json!({"key": "frc86"});
        let err = validate(&value, &team_key_field(), "$").unwrap_err();
        assert!(matches!(err, ValidationError::MissingField { .. }));
        assert!(err.to_string().contains("$.team_number"));
    }

    #[test]
    fn test_wrong_kind_reports_expected_and_actual() {
        let value = json!({"key": "frc86", "team_number": "86"});
        let err = validate(&value, &team_key_field(), "$").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("$.team_number"));
        assert!(message.contains("expected number"));
        assert!(message.contains("got string"));
    }

    #[test]
    fn test_optional_absent_and_null_are_equivalent() {
        let absent = json!({"key": "frc86", "team_number": 86});
        let null = json!({"key": "frc86", "team_number": 86, "nickname": null});
        assert!(validate(&absent, &team_key_field(), "$").is_ok());
        assert!(validate(&null, &team_key_field(), "$").is_ok());
    }

    #[test]
    fn test_required_null_is_rejected() {
        let value = json!({"key": null, "team_number": 86});
        let err = validate(&value, &team_key_field(), "$").unwrap_err();
        assert!(matches!(err, ValidationError::WrongKind { .. }));
    }

    #[test]
    fn test_unknown_extra_fields_are_accepted() {
        let value = json!({"key": "frc86", "team_number": 86, "brand_new_field": [1, 2, 3]});
        assert!(validate(&value, &team_key_field(), "$").is_ok());
    }

    #[test]
    fn test_array_element_path() {
        let shape = Shape::Array(Box::new(Shape::String));
        let value = json!(["frc86", 86]);
        let err = validate(&value, &shape, "$").unwrap_err();
        assert!(err.to_string().contains("$[1]"));
    }

    #[test]
    fn test_map_values_validated_keys_opaque() {
        let shape = Shape::Map(Box::new(Shape::Number));
        assert!(validate(&json!({"frc86": 42.5, "anything": 1}), &shape, "$").is_ok());
        assert!(validate(&json!({"frc86": "oops"}), &shape, "$").is_err());
    }

    #[test]
    fn test_any_accepts_everything() {
        for value in [json!(null), json!(1), json!("x"), json!([{}]), json!({"a": 1})] {
            assert!(validate(&value, &Shape::Any, "$").is_ok());
        }
    }

    #[test]
    fn test_no_numeric_string_coercion() {
        let err = validate(&json!("1992"), &Shape::Number, "$").unwrap_err();
        assert!(matches!(err, ValidationError::WrongKind { .. }));
    }

    #[test]
    fn test_team_key_pattern() {
        for accepted in ["frc86", "frc1", "frc254", "frc99999"] {
            assert!(validate_team_key(accepted, "$.team_key").is_ok(), "{accepted}");
        }
        for rejected in ["86", "team86", "FRC86", "frc", "", "frc86a", " frc86"] {
            assert!(validate_team_key(rejected, "$.team_key").is_err(), "{rejected:?}");
        }
    }

    #[test]
    fn test_year_range() {
        let current = i64::from(Utc::now().year());
        for accepted in [MIN_YEAR, current, current + 1] {
            assert!(validate_year(accepted, "$.year").is_ok(), "{accepted}");
        }
        for rejected in [MIN_YEAR - 1, current + 2, 0, -1] {
            assert!(validate_year(rejected, "$.year").is_err(), "{rejected}");
        }
    }
}
