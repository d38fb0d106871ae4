// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::types::{Language, PaperSize};

/// Persistent application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Paper size selected when a session starts.
    pub default_paper_size: PaperSize,
    /// Language shown in the preview when a session starts.
    pub default_preview_language: Language,
    /// Raster oversampling relative to the on-screen preview (never below 3.0).
    pub capture_scale: f32,
    /// Background fill for captures, as `#rrggbb`.
    pub background: String,
    /// Where exported PDFs are written. `None` means the current directory.
    pub output_dir: Option<PathBuf>,
    /// Font files loaded on top of the system fonts, e.g. a CJK face for
    /// product names.
    pub font_files: Vec<PathBuf>,
    /// Translation service settings.
    pub translator: TranslatorConfig,
}

/// Settings for the AI translation backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    /// Model name passed to the service.
    pub model: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    /// API root to use instead of the public Gemini endpoint, e.g. a proxy.
    pub base_url: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_paper_size: PaperSize::Square,
            default_preview_language: Language::En,
            capture_scale: 3.0,
            background: "#ffffff".into(),
            output_dir: None,
            font_files: Vec::new(),
            translator: TranslatorConfig::default(),
        }
    }
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".into(),
            api_key_env: "API_KEY".into(),
            base_url: None,
        }
    }
}

impl AppConfig {
    /// Background fill as RGB. Malformed values fall back to white.
    pub fn background_rgb(&self) -> [u8; 3] {
        parse_hex_color(&self.background).unwrap_or([255, 255, 255])
    }
}

fn parse_hex_color(value: &str) -> Option<[u8; 3]> {
    let hex = value.trim().strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some([channel(0..2)?, channel(2..4)?, channel(4..6)?])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_print_requirements() {
        let config = AppConfig::default();
        assert_eq!(config.capture_scale, 3.0);
        assert_eq!(config.background_rgb(), [255, 255, 255]);
        assert_eq!(config.translator.api_key_env, "API_KEY");
    }

    #[test]
    fn background_parses_hex() {
        let config = AppConfig {
            background: "#FFF8E1".into(),
            ..AppConfig::default()
        };
        assert_eq!(config.background_rgb(), [0xff, 0xf8, 0xe1]);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"default_paper_size": "10x15cm"}"#).unwrap();
        assert_eq!(config.default_paper_size, PaperSize::Rectangular);
        assert_eq!(config.translator.model, "gemini-2.5-flash");
        assert!(config.font_files.is_empty());
    }
}
