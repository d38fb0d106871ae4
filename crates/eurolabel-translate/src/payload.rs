// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Translation payload: the JSON shape the service is asked to produce, and
// strict parsing of what comes back.

use std::collections::BTreeMap;

use eurolabel_core::{
    ContentKey, LabelContent, LabelError, Language, NutritionKey, Result, TranslatedLabels,
};
use serde::Deserialize;
use serde_json::{Value, json};

/// Wire name of the nested nutrition object.
const NUTRITION_KEY: &str = "nutrition";

/// One complete label per language. Every field is required.
#[derive(Debug, Deserialize)]
struct TranslationPayload {
    #[serde(rename = "EN")]
    en: LabelContent,
    #[serde(rename = "DE")]
    de: LabelContent,
    #[serde(rename = "FR")]
    fr: LabelContent,
    #[serde(rename = "IT")]
    it: LabelContent,
}

/// Parse a service response into translations for all four languages.
///
/// Any missing language, missing field, or non-string value fails the whole
/// payload.
pub fn parse_translations(text: &str) -> Result<TranslatedLabels> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(LabelError::Translation(
            "empty response from translation service".into(),
        ));
    }
    let payload: TranslationPayload = serde_json::from_str(trimmed).map_err(|err| {
        LabelError::Translation(format!("response does not match the label schema: {err}"))
    })?;

    let map = BTreeMap::from([
        (Language::En, payload.en),
        (Language::De, payload.de),
        (Language::Fr, payload.fr),
        (Language::It, payload.it),
    ]);
    Ok(TranslatedLabels::new(map))
}

/// Response schema in the service's OpenAPI subset.
pub fn response_schema() -> Value {
    let content_fields: Vec<&str> = ContentKey::ALL.iter().map(|key| key.wire_name()).collect();
    let nutrition_fields: Vec<&str> = NutritionKey::ALL
        .iter()
        .map(|key| key.wire_name())
        .collect();
    let strings = |names: &[&str]| -> serde_json::Map<String, Value> {
        names
            .iter()
            .map(|name| ((*name).to_string(), json!({ "type": "STRING" })))
            .collect()
    };

    let mut content = strings(&content_fields);
    content.insert(
        NUTRITION_KEY.into(),
        json!({
            "type": "OBJECT",
            "properties": strings(&nutrition_fields),
            "required": nutrition_fields,
        }),
    );
    let mut required = content_fields;
    required.push(NUTRITION_KEY);
    let label = json!({
        "type": "OBJECT",
        "properties": content,
        "required": required,
    });

    let codes: Vec<&str> = Language::ALL.iter().map(|l| l.code()).collect();
    let languages: serde_json::Map<String, Value> = codes
        .iter()
        .map(|code| ((*code).to_string(), label.clone()))
        .collect();
    json!({
        "type": "OBJECT",
        "properties": languages,
        "required": codes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_payload() -> Value {
        let label = serde_json::to_value(LabelContent::initial()).unwrap();
        json!({ "EN": label, "DE": label, "FR": label, "IT": label })
    }

    #[test]
    fn parses_all_four_languages() {
        let translations = parse_translations(&full_payload().to_string()).unwrap();
        assert_eq!(translations.len(), 4);
        assert_eq!(translations.languages(), Language::ALL.to_vec());
    }

    #[test]
    fn missing_language_fails_whole_payload() {
        let mut payload = full_payload();
        payload.as_object_mut().unwrap().remove("IT");
        let err = parse_translations(&payload.to_string()).unwrap_err();
        assert!(matches!(err, LabelError::Translation(_)));
    }

    #[test]
    fn missing_field_fails_whole_payload() {
        let mut payload = full_payload();
        payload["DE"].as_object_mut().unwrap().remove("allergens");
        assert!(parse_translations(&payload.to_string()).is_err());

        let mut payload = full_payload();
        payload["FR"]["nutrition"]
            .as_object_mut()
            .unwrap()
            .remove("salt");
        assert!(parse_translations(&payload.to_string()).is_err());
    }

    #[test]
    fn empty_response_is_translation_error() {
        assert!(matches!(
            parse_translations("  "),
            Err(LabelError::Translation(_))
        ));
    }

    #[test]
    fn schema_requires_every_field() {
        let schema = response_schema();
        assert_eq!(schema["required"].as_array().unwrap().len(), 4);
        let label = &schema["properties"]["DE"];
        assert_eq!(label["required"].as_array().unwrap().len(), 12);
        assert_eq!(
            label["properties"]["nutrition"]["required"]
                .as_array()
                .unwrap()
                .len(),
            8
        );
        assert_eq!(label["properties"]["batchNumber"]["type"], "STRING");
    }

    #[test]
    fn schema_matches_serialised_content() {
        let serialised = serde_json::to_value(LabelContent::initial()).unwrap();
        let schema = response_schema();
        let label = &schema["properties"]["EN"];

        let mut expected: Vec<&str> = serialised
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        let mut required: Vec<&str> = label["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        expected.sort_unstable();
        required.sort_unstable();
        assert_eq!(required, expected);

        let mut nutrition: Vec<&str> = serialised[NUTRITION_KEY]
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        let mut nutrition_required: Vec<&str> = label["properties"][NUTRITION_KEY]["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        nutrition.sort_unstable();
        nutrition_required.sort_unstable();
        assert_eq!(nutrition_required, nutrition);
    }
}
