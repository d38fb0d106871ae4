// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Session state — the label being edited, its translations, the preview, and
// the export context, for the lifetime of one invocation.

use eurolabel_core::{AppConfig, LabelModel, Language, PaperSize, Result, TranslatedLabels};
use eurolabel_export::{
    BatchReport, ExportContext, ExportOrchestrator, ExportedFile, LivePreview, PreviewSurface,
    SurfaceHandle,
};
use eurolabel_translate::Translator;
use tracing::{info, instrument, warn};

use crate::input::Edit;

/// One editing session. Nothing here outlives the process.
///
/// Translations live only in the preview, so what is exported is what is shown.
pub struct LabelSession {
    model: LabelModel,
    preview: LivePreview,
    export: ExportContext,
}

impl LabelSession {
    pub fn new(config: &AppConfig) -> Self {
        let model = LabelModel::new();
        let preview = LivePreview::new(
            model.snapshot(),
            config.default_preview_language,
            config.default_paper_size,
        );
        Self {
            model,
            preview,
            export: ExportContext::new(),
        }
    }

    pub fn model(&self) -> &LabelModel {
        &self.model
    }

    pub fn translations(&self) -> &TranslatedLabels {
        self.preview.translations()
    }

    pub fn language(&self) -> Language {
        self.preview.language()
    }

    pub fn size(&self) -> PaperSize {
        self.preview.size()
    }

    /// Apply edits in order, stopping at the first rejected one. The preview
    /// follows the model. Must be called within a Tokio runtime.
    pub fn apply(&mut self, edits: impl IntoIterator<Item = Edit>) -> Result<()> {
        let result = edits.into_iter().try_for_each(|edit| match edit {
            Edit::Text(key, value) => {
                self.model.set_field(key, value);
                Ok(())
            }
            Edit::Nutrition(key, value) => {
                self.model.set_nutrition_field(key, value);
                Ok(())
            }
            Edit::Enable(id, enabled) => self.model.set_field_enabled(id, enabled),
        });
        self.preview.set_snapshot(self.model.snapshot());
        result
    }

    /// Translate the current content. On success the translations are
    /// replaced as a whole and the preview switches to English; on failure
    /// the previous translations stay.
    #[instrument(skip_all)]
    pub async fn translate(&mut self, translator: &dyn Translator) -> Result<()> {
        let snapshot = self.model.snapshot();
        let translations = match translator.translate(&snapshot.content).await {
            Ok(translations) => translations,
            Err(err) => {
                warn!(%err, kept = self.translations().len(), "translation failed");
                return Err(err);
            }
        };
        info!(languages = translations.len(), "translations replaced");
        self.preview.set_translations(translations);
        self.preview.show(Language::En, self.preview.size());
        Ok(())
    }

    /// Show `language` at `size` and wait for it to render.
    pub async fn show(&mut self, language: Language, size: PaperSize) -> Result<SurfaceHandle> {
        self.preview.show(language, size).settled().await
    }

    pub async fn export_one(
        &mut self,
        exporter: &ExportOrchestrator,
        language: Language,
    ) -> Result<ExportedFile> {
        exporter
            .export_one(&mut self.export, &mut self.preview, language)
            .await
    }

    /// Export every translated language.
    pub async fn export_all(&mut self, exporter: &ExportOrchestrator) -> Result<BatchReport> {
        // Cheap: the map is shared.
        let translations = self.preview.translations().clone();
        exporter
            .export_batch(&mut self.export, &mut self.preview, &translations)
            .await
    }
}
