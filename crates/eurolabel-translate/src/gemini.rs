// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Gemini translation provider.
//
// Sends the source label as JSON with a regulatory-translation instruction and
// asks for a structured response covering all four output languages.

use eurolabel_core::{LabelContent, LabelError, Result, TranslatedLabels, TranslatorConfig};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, info, instrument, warn};

use super::payload::{parse_translations, response_schema};
use super::retry::{
    RATE_LIMIT_BASE_DELAY, RATE_LIMIT_MAX_RETRIES, is_rate_limited, retry_after, wait_with_backoff,
};
use super::{TranslateFuture, Translator};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Accepted in addition to the configured variable.
const FALLBACK_KEY_ENV: &str = "GEMINI_API_KEY";

const SYSTEM_INSTRUCTION: &str = "\
You translate food product labels for sale in the EU and UK, following the \
Food Information to Consumers regulation. The input is a JSON label written in \
Chinese. Produce the same label in English (UK), German, French and Italian.

Rules:
1. Nutrition: use the legal terms of each language, e.g. Energy, Fat, of which \
saturates, Carbohydrate, of which sugars, Protein, Salt.
2. Allergens: translate every allergen unambiguously.
3. Dates: a value such as \"见包装喷码\" means the date is printed on the pack; \
use the local wording (EN \"See printing on package\", DE \"Siehe Aufdruck\", \
FR \"Voir impression\", IT \"Vedi stampa sulla confezione\").
4. Empty source fields stay empty.
5. Addresses: translate country names and standard parts such as Road or \
Street; keep street and city names recognisable.
6. Keep a professional, compliant tone.";

/// Translator backed by the Gemini `generateContent` endpoint.
#[derive(Debug, Clone)]
pub struct GeminiTranslator {
    client: reqwest::Client,
    key: String,
    model: String,
    base_url: String,
}

impl GeminiTranslator {
    pub fn new(key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            key: key.into(),
            model: model.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Build a translator from settings, reading the API key from the
    /// environment.
    pub fn from_config(config: &TranslatorConfig) -> Result<Self> {
        let key = resolve_key(&config.api_key_env, |name| std::env::var(name).ok())?;
        let translator = Self::new(key, config.model.clone());
        Ok(match &config.base_url {
            Some(base_url) => translator.with_base_url(base_url.clone()),
            None => translator,
        })
    }

    /// Point the translator at a different API root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    #[instrument(skip(self, source), fields(model = %self.model))]
    async fn request(&self, source: &LabelContent) -> Result<TranslatedLabels> {
        let body = request_body(source)?;
        let url = self.endpoint();

        let mut attempt = 0usize;
        let mut delay = RATE_LIMIT_BASE_DELAY;
        loop {
            attempt += 1;
            let response = self
                .client
                .post(&url)
                .header("x-goog-api-key", &self.key)
                .json(&body)
                .send()
                .await
                .map_err(|err| LabelError::Http(err.to_string()))?;

            let status = response.status();
            let retry_after = retry_after(response.headers());
            let text = response.text().await.unwrap_or_default();
            if status.is_success() {
                let translations = parse_translations(&extract_text(&text)?)?;
                info!(languages = translations.len(), "Translation complete");
                return Ok(translations);
            }
            if is_rate_limited(status, &text) && attempt < RATE_LIMIT_MAX_RETRIES {
                delay = wait_with_backoff(attempt, delay, retry_after).await;
                continue;
            }
            warn!(%status, "Translation request rejected");
            return Err(LabelError::Translation(format!(
                "Gemini API error ({}): {}",
                status,
                summarize_error(&text).unwrap_or(text)
            )));
        }
    }
}

impl Translator for GeminiTranslator {
    fn translate<'a>(&'a self, source: &'a LabelContent) -> TranslateFuture<'a> {
        Box::pin(self.request(source))
    }
}

/// Look up the API key under `primary`, then the fallback variable. Blank
/// values count as missing.
fn resolve_key(primary: &str, lookup: impl Fn(&str) -> Option<String>) -> Result<String> {
    [primary, FALLBACK_KEY_ENV]
        .into_iter()
        .filter_map(|name| lookup(name))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
        .ok_or_else(|| LabelError::MissingCredential(primary.to_string()))
}

fn request_body(source: &LabelContent) -> Result<Value> {
    let source_json = serde_json::to_string(source)?;
    Ok(json!({
        "contents": [
            { "role": "user", "parts": [{ "text": source_json }] }
        ],
        "systemInstruction": { "parts": [{ "text": SYSTEM_INSTRUCTION }] },
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": response_schema(),
        }
    }))
}

/// Concatenated text parts of the first candidate.
fn extract_text(body: &str) -> Result<String> {
    let payload: GeminiResponse = serde_json::from_str(body).map_err(|err| {
        LabelError::Translation(format!("failed to parse Gemini response JSON: {err}"))
    })?;
    if let Some(version) = payload.model_version.as_deref() {
        debug!(model_version = version, "Gemini responded");
    }
    let text: String = payload
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();
    if text.trim().is_empty() {
        return Err(LabelError::Translation(
            "no response from translation service".into(),
        ));
    }
    Ok(text)
}

/// One-line summary of a Gemini error body.
fn summarize_error(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: Option<GeminiError>,
    }

    #[derive(Deserialize)]
    struct GeminiError {
        message: Option<String>,
        status: Option<String>,
        code: Option<i32>,
    }

    let error = serde_json::from_str::<ErrorBody>(body).ok()?.error?;
    let parts: Vec<String> = [
        error.message,
        error.status.map(|s| format!("type: {s}")),
        error.code.map(|c| format!("code: {c}")),
    ]
    .into_iter()
    .flatten()
    .filter(|part| !part.trim().is_empty())
    .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" | "))
    }
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(rename = "modelVersion")]
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
struct GeminiPart {
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use eurolabel_core::Language;

    use super::*;

    #[test]
    fn key_prefers_configured_variable() {
        let env = HashMap::from([
            ("API_KEY", "primary".to_string()),
            ("GEMINI_API_KEY", "fallback".to_string()),
        ]);
        let key = resolve_key("API_KEY", |name| env.get(name).cloned()).unwrap();
        assert_eq!(key, "primary");
    }

    #[test]
    fn key_falls_back_and_ignores_blank() {
        let env = HashMap::from([
            ("API_KEY", "   ".to_string()),
            ("GEMINI_API_KEY", "fallback".to_string()),
        ]);
        let key = resolve_key("API_KEY", |name| env.get(name).cloned()).unwrap();
        assert_eq!(key, "fallback");
    }

    #[test]
    fn missing_key_names_configured_variable() {
        let err = resolve_key("LABEL_KEY", |_| None).unwrap_err();
        assert!(matches!(err, LabelError::MissingCredential(ref v) if v == "LABEL_KEY"));
    }

    #[test]
    fn request_carries_source_and_schema() {
        let body = request_body(&LabelContent::initial()).unwrap();
        let text = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
        let source: LabelContent = serde_json::from_str(text).unwrap();
        assert_eq!(source, LabelContent::initial());
        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert!(body["generationConfig"]["responseSchema"]["properties"]["IT"].is_object());
    }

    #[test]
    fn extracts_candidate_text() {
        let label = serde_json::to_value(LabelContent::initial()).unwrap();
        let payload = json!({ "EN": label, "DE": label, "FR": label, "IT": label }).to_string();
        let (head, tail) = payload.split_at(payload.len() / 2);
        let body = json!({
            "candidates": [{ "content": { "parts": [{ "text": head }, { "text": tail }] } }],
            "modelVersion": "gemini-2.5-flash"
        });
        let text = extract_text(&body.to_string()).unwrap();
        let translations = parse_translations(&text).unwrap();
        assert!(translations.get(Language::Fr).is_some());
    }

    #[test]
    fn empty_candidates_are_translation_errors() {
        let err = extract_text(r#"{"candidates": []}"#).unwrap_err();
        assert!(matches!(err, LabelError::Translation(_)));
    }

    #[test]
    fn error_body_is_summarised() {
        let body = r#"{"error":{"code":403,"message":"API key not valid","status":"PERMISSION_DENIED"}}"#;
        assert_eq!(
            summarize_error(body).unwrap(),
            "API key not valid | type: PERMISSION_DENIED | code: 403"
        );
        assert_eq!(summarize_error("<html>"), None);
    }

    #[test]
    fn endpoint_includes_model() {
        let translator = GeminiTranslator::new("k", "gemini-2.5-flash")
            .with_base_url("http://localhost:8080/models/");
        assert_eq!(
            translator.endpoint(),
            "http://localhost:8080/models/gemini-2.5-flash:generateContent"
        );
    }

    #[tokio::test]
    async fn unreachable_service_is_http_error() {
        let translator =
            GeminiTranslator::new("k", "gemini-2.5-flash").with_base_url("http://127.0.0.1:9");
        let err = translator
            .translate(&LabelContent::initial())
            .await
            .unwrap_err();
        assert!(matches!(err, LabelError::Http(_)));
    }
}
