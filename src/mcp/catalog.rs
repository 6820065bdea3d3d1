//! Static tool catalog

use serde_json::json;

use crate::mcp::protocol::ToolDescriptor;

/// Name of the translation tool
pub const TRANSLATE_TEXT: &str = "translate_text";
/// Name of the language listing tool
pub const LIST_LANGUAGES: &str = "list_languages";

/// The tools this server exposes, in listing order
pub fn tool_descriptors() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor {
            name: TRANSLATE_TEXT,
            description: "Translate one or more texts to a target language using DeepL",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "text": {
                        "type": "array",
                        "items": { "type": "string" },
                        "minItems": 1,
                        "description": "Texts to translate"
                    },
                    "target_lang": {
                        "type": "string",
                        "description": "Target language code (e.g. 'DE', 'FR', 'EN-US')"
                    },
                    "source_lang": {
                        "type": "string",
                        "description": "Source language code; auto-detected when omitted"
                    }
                },
                "required": ["text", "target_lang"],
                "additionalProperties": false
            }),
        },
        ToolDescriptor {
            name: LIST_LANGUAGES,
            description: "List the languages supported by DeepL",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "type": {
                        "type": "string",
                        "enum": ["source", "target"],
                        "description": "Whether to list source or target languages; upstream default when omitted"
                    }
                },
                "additionalProperties": false
            }),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_lists_both_tools_in_order() {
        let names: Vec<&str> = tool_descriptors().iter().map(|t| t.name).collect();
        assert_eq!(names, vec![TRANSLATE_TEXT, LIST_LANGUAGES]);
    }

    #[test]
    fn translate_schema_requires_text_and_target() {
        let tools = tool_descriptors();
        let required = tools[0].input_schema["required"].as_array().expect("arr");
        assert_eq!(required.len(), 2);
        assert_eq!(tools[0].input_schema["properties"]["text"]["minItems"], 1);
        assert!(tools[1].input_schema.get("required").is_none());
    }
}
