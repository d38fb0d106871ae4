// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Export orchestrator — drives the preview surface through each language,
// captures it, and stores one PDF per language.
//
// Exports are strictly sequential. The only suspension point is waiting for
// the surface to finish rendering the requested language; a batch keeps
// going when a single language fails.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use eurolabel_core::{LabelError, Language, PaperSize, Result, TranslatedLabels};
use serde::Serialize;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::filename::output_filename;
use crate::integrity::hash_bytes;
use crate::services::{CaptureRequest, DocumentAssembler, OutputSink, RasterCapture};
use crate::surface::{PreviewSurface, SurfaceHandle};

// -- Export state ---------------------------------------------------------------

/// What the exporter is doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExportState {
    Idle,
    /// Exporting one language on request.
    Single(Language),
    /// Working through a batch; holds the language in progress.
    Batch(Language),
}

/// Explicit export state, owned by the session and passed to every export.
#[derive(Debug, Clone)]
pub struct ExportContext {
    state: ExportState,
    /// Every state entered, oldest first.
    history: Vec<ExportState>,
}

impl ExportContext {
    pub fn new() -> Self {
        Self {
            state: ExportState::Idle,
            history: vec![ExportState::Idle],
        }
    }

    pub fn state(&self) -> ExportState {
        self.state
    }

    pub fn is_busy(&self) -> bool {
        self.state != ExportState::Idle
    }

    pub fn history(&self) -> &[ExportState] {
        &self.history
    }

    fn begin(&mut self, state: ExportState) -> Result<()> {
        if self.is_busy() {
            warn!(current = ?self.state, "Export requested while another is running");
            return Err(LabelError::ExportInProgress);
        }
        self.enter(state);
        Ok(())
    }

    fn enter(&mut self, state: ExportState) {
        self.state = state;
        self.history.push(state);
    }

    fn finish(&mut self) {
        self.enter(ExportState::Idle);
    }
}

impl Default for ExportContext {
    fn default() -> Self {
        Self::new()
    }
}

// -- Results --------------------------------------------------------------------

/// Correlates the log lines and files of one batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BatchId(pub Uuid);

impl BatchId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for BatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A PDF written by an export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportedFile {
    pub language: Language,
    pub size: PaperSize,
    pub filename: String,
    pub path: PathBuf,
    pub bytes_len: usize,
    /// SHA-256 of the file contents, lowercase hex.
    pub sha256: String,
    pub created_at: DateTime<Utc>,
}

/// Result of one language within a batch.
#[derive(Debug)]
pub struct LanguageOutcome {
    pub language: Language,
    pub result: Result<ExportedFile>,
}

/// Everything a batch did. A batch that ran to the end is `Ok` even when
/// some languages failed.
#[derive(Debug)]
pub struct BatchReport {
    pub id: BatchId,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub outcomes: Vec<LanguageOutcome>,
}

impl BatchReport {
    pub fn files(&self) -> impl Iterator<Item = &ExportedFile> {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = (Language, &LabelError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|err| (o.language, err)))
    }

    pub fn all_succeeded(&self) -> bool {
        self.failures().next().is_none()
    }
}

// -- Orchestrator ---------------------------------------------------------------

/// Turns rendered previews into stored PDFs.
pub struct ExportOrchestrator {
    capture: Box<dyn RasterCapture>,
    assembler: Box<dyn DocumentAssembler>,
    sink: Box<dyn OutputSink>,
    request: CaptureRequest,
}

impl ExportOrchestrator {
    pub fn new(
        capture: impl RasterCapture + 'static,
        assembler: impl DocumentAssembler + 'static,
        sink: impl OutputSink + 'static,
        request: CaptureRequest,
    ) -> Self {
        Self {
            capture: Box::new(capture),
            assembler: Box::new(assembler),
            sink: Box::new(sink),
            request,
        }
    }

    /// Export the label in `language` at the surface's paper size.
    #[instrument(skip(self, ctx, surface), fields(language = %language))]
    pub async fn export_one(
        &self,
        ctx: &mut ExportContext,
        surface: &mut dyn PreviewSurface,
        language: Language,
    ) -> Result<ExportedFile> {
        ctx.begin(ExportState::Single(language))?;
        let result = self.export_language(surface, language).await;
        ctx.finish();
        if let Err(err) = &result {
            error!(%err, "Export failed");
        }
        result
    }

    /// Export every translated language, in translation order.
    ///
    /// Fails up front when there is nothing to export; after that, failures
    /// are recorded per language and the batch carries on.
    #[instrument(skip_all, fields(languages = translations.len()))]
    pub async fn export_batch(
        &self,
        ctx: &mut ExportContext,
        surface: &mut dyn PreviewSurface,
        translations: &TranslatedLabels,
    ) -> Result<BatchReport> {
        if ctx.is_busy() {
            return Err(LabelError::ExportInProgress);
        }
        let languages = translations.languages();
        let Some(&first) = languages.first() else {
            warn!("Batch export requested with no translations");
            return Err(LabelError::NoTranslations);
        };

        let id = BatchId::new();
        let started_at = Utc::now();
        info!(batch = %id, "Starting batch export");
        ctx.begin(ExportState::Batch(first))?;

        let mut outcomes = Vec::with_capacity(languages.len());
        for language in languages {
            if ctx.state() != ExportState::Batch(language) {
                ctx.enter(ExportState::Batch(language));
            }
            let result = self.export_language(surface, language).await;
            match &result {
                Ok(file) => info!(batch = %id, %language, file = %file.filename, "Language exported"),
                Err(err) => error!(batch = %id, %language, %err, "Language failed, continuing"),
            }
            outcomes.push(LanguageOutcome { language, result });
        }
        ctx.finish();

        let report = BatchReport {
            id,
            started_at,
            finished_at: Utc::now(),
            outcomes,
        };
        info!(
            batch = %id,
            exported = report.files().count(),
            failed = report.failures().count(),
            "Batch export finished"
        );
        Ok(report)
    }

    async fn export_language(
        &self,
        surface: &mut dyn PreviewSurface,
        language: Language,
    ) -> Result<ExportedFile> {
        let size = surface.size();
        let handle = surface_for(surface, language, size).await?;

        let raster = self.capture.capture(&handle, &self.request)?;
        let product_name = surface.source_product_name();
        let bytes = self.assembler.assemble(&raster, size, &product_name)?;

        let filename = output_filename(&product_name, language, size);
        let sha256 = hash_bytes(&bytes);
        let path = self.sink.save(&filename, &bytes)?;

        Ok(ExportedFile {
            language,
            size,
            filename,
            path,
            bytes_len: bytes.len(),
            sha256,
            created_at: Utc::now(),
        })
    }
}

/// The surface's current render when it already shows `language` at `size`,
/// otherwise a fresh one.
async fn surface_for(
    surface: &mut dyn PreviewSurface,
    language: Language,
    size: PaperSize,
) -> Result<SurfaceHandle> {
    if let Some(handle) = surface.current()
        && handle.language() == language
        && handle.size() == size
    {
        return Ok(handle);
    }
    surface.show(language, size).settled().await
}
