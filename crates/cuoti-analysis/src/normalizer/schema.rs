//! Schema validation for [`ParsedQuestion`].
//!
//! The serde derive on `ParsedQuestion` is the declarative description:
//! required string fields, a string list for knowledge points, an optional
//! subject. Validation is deserializing a parsed `Value` into it.

use serde_json::Value;
use thiserror::Error;

use cuoti_core::ParsedQuestion;

/// Keys the model must produce. Listed in prompts.
pub const REQUIRED_FIELDS: [&str; 4] = ["questionText", "answerText", "analysis", "knowledgePoints"];

#[derive(Debug, Error, PartialEq, Eq)]
#[error("schema validation failed: {0}")]
pub struct ValidationError(String);

/// Check a parsed JSON value against the question schema.
pub fn validate(value: Value) -> Result<ParsedQuestion, ValidationError> {
    if !value.is_object() {
        return Err(ValidationError(format!(
            "expected an object, got {}",
            kind(&value)
        )));
    }
    serde_json::from_value(value).map_err(|e| ValidationError(e.to_string()))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid() -> Value {
        json!({
            "questionText": "解方程 $x^2=4$",
            "answerText": "$x=\\pm 2$",
            "analysis": "开平方",
            "knowledgePoints": ["一元二次方程"],
            "subject": "数学"
        })
    }

    #[test]
    fn test_valid_record() {
        let q = validate(valid()).unwrap();
        assert_eq!(q.knowledge_points, vec!["一元二次方程"]);
        assert_eq!(q.subject.as_deref(), Some("数学"));
    }

    #[test]
    fn test_extra_keys_ignored() {
        let mut v = valid();
        v["confidence"] = json!(0.9);
        assert!(validate(v).is_ok());
    }

    #[test]
    fn test_each_required_field_enforced() {
        for field in REQUIRED_FIELDS {
            let mut v = valid();
            v.as_object_mut().unwrap().remove(field);
            let err = validate(v).unwrap_err();
            assert!(err.to_string().contains(field), "{err}");
        }
    }

    #[test]
    fn test_wrong_primitive_type() {
        let mut v = valid();
        v["answerText"] = json!(4);
        assert!(validate(v).is_err());
    }

    #[test]
    fn test_knowledge_points_must_be_list_of_strings() {
        let mut v = valid();
        v["knowledgePoints"] = json!("一元二次方程");
        assert!(validate(v).is_err());

        let mut v = valid();
        v["knowledgePoints"] = json!([1, 2]);
        assert!(validate(v).is_err());
    }

    #[test]
    fn test_empty_knowledge_points_allowed() {
        let mut v = valid();
        v["knowledgePoints"] = json!([]);
        assert!(validate(v).unwrap().knowledge_points.is_empty());
    }

    #[test]
    fn test_non_object() {
        let err = validate(json!("just a string")).unwrap_err();
        assert!(err.to_string().contains("a string"));
        assert!(validate(json!([valid()])).is_err());
    }
}
