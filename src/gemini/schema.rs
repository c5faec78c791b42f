//! Response schema for generated reports
//!
//! The schema is the single source of truth for what the model is permitted
//! to return; parsing validates the same field set via `ReportBody`.

use serde_json::{json, Value};

/// JSON schema (Gemini OpenAPI subset) constraining the model output
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "suggestedTitle": {
                "type": "STRING",
                "description": "A clear, professional one-line bug title"
            },
            "summary": {
                "type": "STRING",
                "description": "One-sentence summary of the defect"
            },
            "stepsToReproduce": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            },
            "expectedBehavior": { "type": "STRING" },
            "actualBehavior": { "type": "STRING" },
            "impact": {
                "type": "STRING",
                "description": "Who is affected and how badly"
            },
            "environment": {
                "type": "OBJECT",
                "properties": {
                    "browser": { "type": "STRING" },
                    "os": { "type": "STRING" },
                    "device": { "type": "STRING" }
                },
                "required": ["browser", "os", "device"]
            },
            "suggestedFix": { "type": "STRING" },
            "severity": {
                "type": "STRING",
                "enum": ["Low", "Medium", "High", "Critical"]
            }
        },
        "required": [
            "suggestedTitle",
            "summary",
            "stepsToReproduce",
            "expectedBehavior",
            "actualBehavior",
            "impact",
            "environment"
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_fields_are_not_required() {
        let schema = response_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert!(!required.contains(&"suggestedFix"));
        assert!(!required.contains(&"severity"));
        assert!(required.contains(&"impact"));
        assert!(required.contains(&"environment"));
    }

    #[test]
    fn environment_requires_all_three_values() {
        let schema = response_schema();
        let required = &schema["properties"]["environment"]["required"];
        assert_eq!(required, &json!(["browser", "os", "device"]));
    }

    #[test]
    fn severity_enum_matches_the_fixed_set() {
        let schema = response_schema();
        assert_eq!(
            schema["properties"]["severity"]["enum"],
            json!(["Low", "Medium", "High", "Critical"])
        );
    }

    #[test]
    fn steps_are_an_ordered_string_array() {
        let schema = response_schema();
        assert_eq!(schema["properties"]["stepsToReproduce"]["type"], "ARRAY");
        assert_eq!(
            schema["properties"]["stepsToReproduce"]["items"]["type"],
            "STRING"
        );
    }
}
