//! Presentation: text and JSON renderings of command results.

use crate::definition::AppDefinition;
use crate::error::ApiError;
use crate::sample::{SampleMap, SampleValue};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use serde::Serialize;

pub fn format_json<T: Serialize>(value: &T) -> Result<String, ApiError> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Indented outline of sample data, one field per line
pub fn format_sample_text(map: &SampleMap) -> String {
    let mut out = String::new();
    write_map(&mut out, map, 0);
    out.trim_end().to_string()
}

fn write_map(out: &mut String, map: &SampleMap, indent: usize) {
    for (key, value) in map.iter() {
        let pad = "  ".repeat(indent);
        match value {
            SampleValue::Token(token) => out.push_str(&format!("{}{}: {}\n", pad, key, token)),
            SampleValue::List(items) => {
                out.push_str(&format!("{}{}:\n", pad, key));
                for item in items {
                    write_list_item(out, item, indent + 1);
                }
            }
            SampleValue::Object(inner) => {
                out.push_str(&format!("{}{}:\n", pad, key));
                write_map(out, inner, indent + 1);
            }
        }
    }
}

fn write_list_item(out: &mut String, item: &SampleValue, indent: usize) {
    let pad = "  ".repeat(indent);
    match item {
        SampleValue::Token(token) => out.push_str(&format!("{}- {}\n", pad, token)),
        SampleValue::List(items) => {
            out.push_str(&format!("{}-\n", pad));
            for inner in items {
                write_list_item(out, inner, indent + 1);
            }
        }
        SampleValue::Object(map) => {
            out.push_str(&format!("{}-\n", pad));
            write_map(out, map, indent + 1);
        }
    }
}

pub fn format_definition_text(definition: &AppDefinition) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Authentication: {} ({})\n",
        definition.authentication.auth_type,
        definition
            .authentication
            .fields
            .iter()
            .map(|f| f.key.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    ));

    for action in &definition.creates {
        out.push_str(&format!(
            "\nAction: {} - {}\n{}\n",
            action.key, action.display.label, action.display.description
        ));
        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        table.set_header(vec!["Key", "Label", "Type", "Required", "Default"]);
        for field in &action.input_fields {
            let field_type = serde_json::to_value(field.field_type)
                .ok()
                .and_then(|v| v.as_str().map(String::from))
                .unwrap_or_default();
            table.add_row(vec![
                field.key.clone(),
                field.label.clone(),
                field_type,
                if field.required { "yes" } else { "no" }.to_string(),
                field.default.clone().unwrap_or_else(|| "-".to_string()),
            ]);
        }
        out.push_str(&table.to_string());
        out.push('\n');
    }
    out.trim_end().to_string()
}
