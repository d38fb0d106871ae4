// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Label input: a JSON file with partial content and field switches, plus
// `key=value` assignments from the command line.

use std::collections::BTreeMap;
use std::path::Path;

use eurolabel_core::{ContentKey, FieldId, LabelError, NutritionKey, Result};
use serde::Deserialize;
use serde_json::Value;

/// One change to the label model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    Text(ContentKey, String),
    Nutrition(NutritionKey, String),
    Enable(FieldId, bool),
}

/// Contents of an input file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LabelInput {
    pub content: serde_json::Map<String, Value>,
    pub enabled: BTreeMap<String, bool>,
}

impl LabelInput {
    pub fn from_path(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    pub fn from_json(data: &str) -> Result<Self> {
        Ok(serde_json::from_str(data)?)
    }

    /// The edits this input describes: content first, then field switches.
    pub fn edits(&self) -> Result<Vec<Edit>> {
        let mut edits = Vec::new();
        for (key, value) in &self.content {
            if key == "nutrition" {
                let Value::Object(nutrition) = value else {
                    return Err(LabelError::UnknownKey(
                        "nutrition value (expected an object)".into(),
                    ));
                };
                for (key, value) in nutrition {
                    edits.push(Edit::Nutrition(key.parse()?, text(value)?));
                }
            } else {
                edits.push(Edit::Text(key.parse()?, text(value)?));
            }
        }
        for (key, enabled) in &self.enabled {
            edits.push(Edit::Enable(key.parse()?, *enabled));
        }
        Ok(edits)
    }
}

fn text(value: &Value) -> Result<String> {
    Ok(serde_json::from_value(value.clone())?)
}

/// Parse `key=value`, where `key` is a content field or `nutrition.<key>`.
pub fn parse_assignment(assignment: &str) -> Result<Edit> {
    let (key, value) = assignment.split_once('=').ok_or_else(|| {
        LabelError::UnknownKey(format!("assignment '{assignment}' (expected key=value)"))
    })?;
    let key = key.trim();
    match key.strip_prefix("nutrition.") {
        Some(nutrient) => Ok(Edit::Nutrition(nutrient.parse()?, value.to_string())),
        None => Ok(Edit::Text(key.parse()?, value.to_string())),
    }
}
