//! Structural argument validation against tool input schemas
//!
//! Tools declare their arguments with a small JSON-Schema subset:
//! `properties`, `required`, a per-property `type` (a name or a list of
//! names), `minimum`/`maximum` for numbers, `items` for arrays and
//! `default`. Object values and array items that declare their own
//! `properties` or `required` are checked recursively. [`validate_arguments`]
//! checks a call against that subset and returns the normalized arguments
//! the handler should see.

use serde_json::{Map, Value};
use std::fmt;

/// One violated constraint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Dotted path of the offending field, e.g. `labelIds[1]` or `issues[0].title`
    pub field: String,
    /// What is wrong with it
    pub problem: String,
}

impl FieldError {
    fn new(field: impl Into<String>, problem: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            problem: problem.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.problem)
    }
}

/// Arguments that do not satisfy a tool schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Every violation found, in schema order
    pub errors: Vec<FieldError>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let problems: Vec<String> = self.errors.iter().map(ToString::to_string).collect();
        f.write_str(&problems.join("; "))
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    /// Whether a given field was reported
    pub fn mentions(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

/// Validate `arguments` against `schema`, returning the normalized map
///
/// Normalization fills declared defaults for absent fields and decodes
/// strings holding JSON where an object or array is declared. Fields the
/// schema does not mention are passed through untouched.
pub fn validate_arguments(
    schema: &Value,
    arguments: Map<String, Value>,
) -> Result<Map<String, Value>, ValidationError> {
    let empty = Map::new();
    let properties = schema
        .get("properties")
        .and_then(Value::as_object)
        .unwrap_or(&empty);
    let required: Vec<&str> = schema
        .get("required")
        .and_then(Value::as_array)
        .map(|names| names.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    let mut normalized = arguments;
    let mut errors = Vec::new();

    for name in &required {
        if normalized.get(*name).map_or(true, Value::is_null) {
            errors.push(FieldError::new(*name, "is required"));
        }
    }

    for (name, property) in properties {
        match normalized.get_mut(name) {
            Some(value) => {
                if value.is_null() && !required.contains(&name.as_str()) {
                    if allows_type(property, "null") {
                        continue;
                    }
                    // Explicit null on an optional field means "not supplied"
                    normalized.remove(name);
                    if let Some(default) = property.get("default") {
                        normalized.insert(name.clone(), default.clone());
                    }
                    continue;
                }
                if value.is_null() {
                    continue;
                }
                decode_stringified_json(property, value);
                check_value(name, property, value, &mut errors);
            }
            None => {
                if let Some(default) = property.get("default") {
                    normalized.insert(name.clone(), default.clone());
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(normalized)
    } else {
        Err(ValidationError { errors })
    }
}

fn declared_types(property: &Value) -> Vec<&str> {
    match property.get("type") {
        Some(Value::String(name)) => vec![name.as_str()],
        Some(Value::Array(names)) => names.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    }
}

fn allows_type(property: &Value, type_name: &str) -> bool {
    declared_types(property).contains(&type_name)
}

fn decode_stringified_json(property: &Value, value: &mut Value) {
    let Value::String(raw) = value else {
        return;
    };
    let types = declared_types(property);
    if types.contains(&"string") {
        return;
    }
    let wants_object = types.contains(&"object");
    let wants_array = types.contains(&"array");
    if !wants_object && !wants_array {
        return;
    }

    match serde_json::from_str::<Value>(raw) {
        Ok(decoded @ Value::Object(_)) if wants_object => *value = decoded,
        Ok(decoded @ Value::Array(_)) if wants_array => *value = decoded,
        _ => {}
    }
}

fn check_value(field: &str, property: &Value, value: &mut Value, errors: &mut Vec<FieldError>) {
    let types = declared_types(property);
    if !types.is_empty() && !types.iter().any(|t| matches_type(t, value)) {
        errors.push(FieldError::new(
            field,
            format!(
                "expected {}, got {}",
                types.join(" or "),
                json_type_name(value)
            ),
        ));
        return;
    }

    if let Some(problem) = range_problem(property, value) {
        errors.push(FieldError::new(field, problem));
    }

    match value {
        Value::Array(items) => {
            if let Some(item_schema) = property.get("items") {
                for (index, item) in items.iter_mut().enumerate() {
                    check_value(&format!("{field}[{index}]"), item_schema, item, errors);
                }
            }
        }
        Value::Object(object) if has_object_constraints(property) => {
            match validate_arguments(property, object.clone()) {
                Ok(normalized) => *object = normalized,
                Err(nested) => errors.extend(nested.errors.into_iter().map(|e| {
                    FieldError::new(format!("{field}.{}", e.field), e.problem)
                })),
            }
        }
        _ => {}
    }
}

fn has_object_constraints(property: &Value) -> bool {
    property.get("properties").is_some() || property.get("required").is_some()
}

fn bound<'a>(property: &'a Value, key: &str) -> Option<&'a Value> {
    property.get(key).filter(|b| b.is_number())
}

fn range_problem(property: &Value, value: &Value) -> Option<String> {
    let number = value.as_f64()?;
    let minimum = bound(property, "minimum");
    let maximum = bound(property, "maximum");

    let below = minimum
        .and_then(Value::as_f64)
        .map_or(false, |min| number < min);
    let above = maximum
        .and_then(Value::as_f64)
        .map_or(false, |max| number > max);
    if !below && !above {
        return None;
    }

    match (minimum, maximum) {
        (Some(min), Some(max)) => Some(format!("must be between {min} and {max}")),
        (Some(min), None) => Some(format!("must be at least {min}")),
        (None, Some(max)) => Some(format!("must be at most {max}")),
        (None, None) => None,
    }
}

fn matches_type(type_name: &str, value: &Value) -> bool {
    match type_name {
        "string" => value.is_string(),
        "number" => value.is_number(),
        "integer" => value.is_i64() || value.is_u64(),
        "boolean" => value.is_boolean(),
        "object" => value.is_object(),
        "array" => value.is_array(),
        "null" => value.is_null(),
        _ => true,
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "title": { "type": "string" },
                "priority": { "type": "number" },
                "labelIds": { "type": "array", "items": { "type": "string" } },
                "limit": { "type": "integer", "minimum": 0, "default": 25 },
                "assigneeId": { "type": ["string", "null"] },
                "issues": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "title": { "type": "string" },
                            "priority": { "type": "integer", "minimum": 0, "maximum": 4 },
                            "size": { "type": "string", "default": "m" }
                        },
                        "required": ["title"]
                    }
                }
            },
            "required": ["title"]
        })
    }

    fn args(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_valid_arguments_get_defaults() {
        let normalized = validate_arguments(&schema(), args(json!({"title": "Bug"}))).unwrap();
        assert_eq!(normalized["title"], "Bug");
        assert_eq!(normalized["limit"], 25);
    }

    #[test]
    fn test_supplied_value_overrides_default() {
        let normalized =
            validate_arguments(&schema(), args(json!({"title": "Bug", "limit": 5}))).unwrap();
        assert_eq!(normalized["limit"], 5);
    }

    #[test]
    fn test_missing_required_field() {
        let err = validate_arguments(&schema(), Map::new()).unwrap_err();
        assert!(err.mentions("title"));
        assert_eq!(err.to_string(), "title: is required");
    }

    #[test]
    fn test_null_required_field_is_missing() {
        let err = validate_arguments(&schema(), args(json!({"title": null}))).unwrap_err();
        assert!(err.mentions("title"));
    }

    #[test]
    fn test_type_mismatches_are_all_reported() {
        let err = validate_arguments(
            &schema(),
            args(json!({"title": 7, "priority": "high", "labelIds": ["a", 2]})),
        )
        .unwrap_err();

        assert_eq!(err.errors.len(), 3);
        assert!(err.mentions("title"));
        assert!(err.mentions("priority"));
        assert!(err.mentions("labelIds[1]"));
        assert!(err
            .to_string()
            .contains("priority: expected number, got string"));
    }

    #[test]
    fn test_nullable_field_keeps_null() {
        let normalized =
            validate_arguments(&schema(), args(json!({"title": "x", "assigneeId": null})))
                .unwrap();
        assert_eq!(normalized["assigneeId"], Value::Null);
    }

    #[test]
    fn test_null_optional_field_is_dropped() {
        let normalized =
            validate_arguments(&schema(), args(json!({"title": "x", "priority": null}))).unwrap();
        assert!(!normalized.contains_key("priority"));
    }

    #[test]
    fn test_unknown_fields_pass_through() {
        let normalized =
            validate_arguments(&schema(), args(json!({"title": "x", "extra": true}))).unwrap();
        assert_eq!(normalized["extra"], true);
    }

    #[test]
    fn test_stringified_array_is_decoded() {
        let normalized = validate_arguments(
            &schema(),
            args(json!({"title": "x", "issues": "[{\"title\": \"a\"}]"})),
        )
        .unwrap();
        assert_eq!(normalized["issues"], json!([{"title": "a", "size": "m"}]));
    }

    #[test]
    fn test_undecodable_string_is_a_type_error() {
        let err = validate_arguments(&schema(), args(json!({"title": "x", "issues": "nope"})))
            .unwrap_err();
        assert!(err.mentions("issues"));
    }

    #[test]
    fn test_integer_type() {
        let schema = json!({"properties": {"n": {"type": "integer"}}});
        assert!(validate_arguments(&schema, args(json!({"n": 3}))).is_ok());
        assert!(validate_arguments(&schema, args(json!({"n": 3.5}))).is_err());
    }

    #[test]
    fn test_integer_bounds() {
        let schema = json!({
            "properties": {
                "priority": { "type": "integer", "minimum": 0, "maximum": 4 },
                "limit": { "type": "integer", "minimum": 0 },
                "ceiling": { "type": "number", "maximum": 1.5 }
            }
        });

        assert!(validate_arguments(&schema, args(json!({"priority": 0, "limit": 0}))).is_ok());
        assert!(validate_arguments(&schema, args(json!({"priority": 4, "ceiling": 1.5}))).is_ok());

        let err = validate_arguments(
            &schema,
            args(json!({"priority": 7, "limit": -1, "ceiling": 2})),
        )
        .unwrap_err();
        assert_eq!(err.errors.len(), 3);
        assert!(err.errors.contains(&FieldError::new("priority", "must be between 0 and 4")));
        assert!(err.errors.contains(&FieldError::new("limit", "must be at least 0")));
        assert!(err.errors.contains(&FieldError::new("ceiling", "must be at most 1.5")));
    }

    #[test]
    fn test_fractional_limit_is_rejected() {
        let err = validate_arguments(&schema(), args(json!({"title": "x", "limit": 2.5})))
            .unwrap_err();
        assert_eq!(err.to_string(), "limit: expected integer, got number");
    }

    #[test]
    fn test_array_items_are_validated_as_objects() {
        let err = validate_arguments(
            &schema(),
            args(json!({
                "title": "x",
                "issues": [
                    {"title": "ok"},
                    {"description": "no title"},
                    {"title": 3, "priority": -1}
                ]
            })),
        )
        .unwrap_err();

        assert_eq!(err.errors.len(), 3);
        assert!(err.mentions("issues[1].title"));
        assert!(err.mentions("issues[2].title"));
        assert!(err.mentions("issues[2].priority"));
        assert!(err.to_string().contains("issues[1].title: is required"));
    }

    #[test]
    fn test_array_items_get_defaults() {
        let normalized = validate_arguments(
            &schema(),
            args(json!({"title": "x", "issues": [{"title": "a"}, {"title": "b", "size": "l"}]})),
        )
        .unwrap();
        assert_eq!(
            normalized["issues"],
            json!([{"title": "a", "size": "m"}, {"title": "b", "size": "l"}])
        );
    }

    #[test]
    fn test_nested_object_property() {
        let schema = json!({
            "properties": {
                "filter": {
                    "type": "object",
                    "properties": { "teamId": { "type": "string" } },
                    "required": ["teamId"]
                }
            }
        });
        let err = validate_arguments(&schema, args(json!({"filter": {}}))).unwrap_err();
        assert_eq!(err.to_string(), "filter.teamId: is required");
    }
}
