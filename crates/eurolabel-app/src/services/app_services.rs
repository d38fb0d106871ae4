// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Central service layer — loads configuration and builds the production
// translator, rasteriser, and exporter from it.

use std::path::{Path, PathBuf};

use eurolabel_core::{AppConfig, Result};
use eurolabel_document::SvgRasterizer;
use eurolabel_export::{CaptureRequest, DirectorySink, ExportOrchestrator, PdfAssembler};
use eurolabel_translate::GeminiTranslator;
use tracing::{debug, info, warn};

use super::data_dir;

const CONFIG_FILE: &str = "config.json";

/// Configuration plus factories for the collaborators a session uses.
pub struct AppServices {
    data_dir: PathBuf,
    config: AppConfig,
    /// Fonts given on the command line, loaded after the configured ones.
    extra_fonts: Vec<PathBuf>,
}

impl AppServices {
    /// Load settings from the platform data directory, falling back to
    /// defaults.
    pub fn init() -> Self {
        Self::with_data_dir(data_dir::data_dir())
    }

    pub fn with_data_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let config = load_config(&dir).unwrap_or_default();
        info!(path = %dir.display(), "app services initialised");
        Self {
            data_dir: dir,
            config,
            extra_fonts: Vec::new(),
        }
    }

    pub fn add_fonts(&mut self, fonts: impl IntoIterator<Item = PathBuf>) {
        self.extra_fonts.extend(fonts);
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join(CONFIG_FILE)
    }

    /// Replace the settings and persist them.
    pub fn save_config(&mut self, config: AppConfig) -> Result<()> {
        persist_config(&self.data_dir, &config)?;
        self.config = config;
        Ok(())
    }

    /// Gemini translator using the configured model and key variable.
    pub fn translator(&self) -> Result<GeminiTranslator> {
        GeminiTranslator::from_config(&self.config.translator)
    }

    /// Rasteriser with the system fonts plus every configured and
    /// command-line font file. An unreadable font file is an error.
    pub fn rasterizer(&self) -> Result<SvgRasterizer> {
        let fonts = self
            .config
            .font_files
            .iter()
            .chain(&self.extra_fonts)
            .map(|path| {
                debug!(path = %path.display(), "loading font file");
                std::fs::read(path)
            })
            .collect::<std::io::Result<Vec<_>>>()?;
        Ok(SvgRasterizer::with_fonts(fonts))
    }

    /// Exporter writing into `out_dir`, else the configured output directory,
    /// else the working directory.
    pub fn exporter(&self, out_dir: Option<PathBuf>) -> Result<ExportOrchestrator> {
        let dir = out_dir
            .or_else(|| self.config.output_dir.clone())
            .unwrap_or_else(|| PathBuf::from("."));
        Ok(ExportOrchestrator::new(
            self.rasterizer()?,
            PdfAssembler,
            DirectorySink::new(dir),
            CaptureRequest::new(self.config.capture_scale, self.config.background_rgb()),
        ))
    }
}

fn load_config(data_dir: &Path) -> Option<AppConfig> {
    let path = data_dir.join(CONFIG_FILE);
    let data = std::fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&data) {
        Ok(config) => Some(config),
        Err(err) => {
            warn!(path = %path.display(), %err, "ignoring unreadable config");
            None
        }
    }
}

fn persist_config(data_dir: &Path, config: &AppConfig) -> Result<()> {
    std::fs::create_dir_all(data_dir)?;
    let path = data_dir.join(CONFIG_FILE);
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(&path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use eurolabel_core::{LabelError, PaperSize};

    use super::*;

    #[test]
    fn missing_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let services = AppServices::with_data_dir(dir.path());
        assert_eq!(services.config().capture_scale, 3.0);
    }

    #[test]
    fn saved_config_is_reloaded() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("eurolabel");
        let mut services = AppServices::with_data_dir(&data_dir);
        let config = AppConfig {
            default_paper_size: PaperSize::Rectangular,
            capture_scale: 4.0,
            ..AppConfig::default()
        };
        services.save_config(config).unwrap();
        assert!(services.config_path().exists());

        let reloaded = AppServices::with_data_dir(&data_dir);
        assert_eq!(reloaded.config().default_paper_size, PaperSize::Rectangular);
        assert_eq!(reloaded.config().capture_scale, 4.0);
    }

    #[test]
    fn missing_font_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut services = AppServices::with_data_dir(dir.path());
        services.add_fonts([dir.path().join("NotoSansSC.otf")]);
        assert!(matches!(services.rasterizer(), Err(LabelError::Io(_))));
        assert!(services.exporter(None).is_err());
    }

    #[test]
    fn configured_font_files_are_read() {
        let dir = tempfile::tempdir().unwrap();
        let font = dir.path().join("custom.ttf");
        // Not a valid face; fontdb skips it, but the file must be readable.
        std::fs::write(&font, b"\0\x01\0\0").unwrap();
        let mut services = AppServices::with_data_dir(dir.path());
        services
            .save_config(AppConfig {
                font_files: vec![font],
                ..AppConfig::default()
            })
            .unwrap();
        assert!(services.rasterizer().is_ok());
    }

    #[test]
    fn corrupt_config_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "{not json").unwrap();
        let services = AppServices::with_data_dir(dir.path());
        assert_eq!(services.config().background, "#ffffff");
    }
}
