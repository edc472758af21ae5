//! App definition: action metadata, input fields and authentication, in the shape the
//! automation platform consumes.

use crate::action::ACTION_KEY;
use crate::auth::{auth_config, AuthConfig};
use crate::constants::{QUERY_DOCS_URL, SAMPLE_REQUEST_ID, SAMPLE_SCREENSHOT};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Text,
    Boolean,
}

/// One input field of an action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputField {
    pub key: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub required: bool,
    #[serde(rename = "helpText")]
    pub help_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Display {
    pub label: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionDefinition {
    pub key: String,
    pub noun: String,
    pub display: Display,
    #[serde(rename = "inputFields")]
    pub input_fields: Vec<InputField>,
    pub sample: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppDefinition {
    pub authentication: AuthConfig,
    pub creates: Vec<ActionDefinition>,
}

impl InputField {
    fn new(key: &str, label: &str, field_type: FieldType, required: bool, help_text: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            field_type,
            required,
            help_text: help_text.to_string(),
            choices: None,
            default: None,
        }
    }

    fn with_default(mut self, default: &str) -> Self {
        self.default = Some(default.to_string());
        self
    }
}

pub fn query_data_input_fields() -> Vec<InputField> {
    let mut mode = InputField::new(
        "mode",
        "Extraction Mode",
        FieldType::String,
        false,
        "Specifies the extraction mode: standard for complex or high-volume data, or fast for typical use cases.",
    )
    .with_default("fast");
    mode.choices = Some(BTreeMap::from([
        (
            "fast".to_string(),
            "Fast - Recommended for typical use cases".to_string(),
        ),
        (
            "standard".to_string(),
            "Standard - Better for complex or high-volume data".to_string(),
        ),
    ]));

    vec![
        InputField::new(
            "url",
            "Website URL",
            FieldType::String,
            true,
            "The URL of the website you want to query data from",
        ),
        InputField::new(
            "query",
            "AgentQL Query",
            FieldType::Text,
            true,
            &format!(
                "The AgentQL query used to extract data. [Visit our docs for more information.]({})",
                QUERY_DOCS_URL
            ),
        ),
        mode,
        InputField::new(
            "is_screenshot_enabled",
            "Capture Screenshot",
            FieldType::Boolean,
            false,
            "Enable/disable screenshot capture",
        )
        .with_default("false"),
        InputField::new(
            "experimental_stealth_mode_enabled",
            "Experimental Stealth Mode",
            FieldType::Boolean,
            false,
            "Enable/disable experimental stealth mode. This mode may improve extraction success rates for some websites.",
        )
        .with_default("false"),
    ]
}

pub fn query_data_action() -> ActionDefinition {
    ActionDefinition {
        key: ACTION_KEY.to_string(),
        noun: "Query".to_string(),
        display: Display {
            label: "Extract Data From Web Page".to_string(),
            description: "Extracts data from a webpage using a query".to_string(),
        },
        input_fields: query_data_input_fields(),
        sample: json!({
            "data": {},
            "request_id": SAMPLE_REQUEST_ID,
            "screenshot": SAMPLE_SCREENSHOT,
        }),
    }
}

pub fn app_definition() -> AppDefinition {
    AppDefinition {
        authentication: auth_config(),
        creates: vec![query_data_action()],
    }
}
