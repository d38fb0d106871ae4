// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Eurolabel.

use thiserror::Error;

use crate::types::{FieldId, Language};

/// Top-level error type for all Eurolabel operations.
#[derive(Debug, Error)]
pub enum LabelError {
    // -- Configuration --
    #[error("translation service credential is not configured (set {0})")]
    MissingCredential(String),

    // -- Translation service --
    #[error("translation failed: {0}")]
    Translation(String),

    #[error("HTTP request failed: {0}")]
    Http(String),

    // -- Content model --
    #[error("field {0} is required and cannot be disabled")]
    RequiredField(FieldId),

    #[error("unknown label key: {0}")]
    UnknownKey(String),

    // -- Rendering / capture --
    #[error("preview surface stopped before {language} finished rendering")]
    RenderInterrupted { language: Language },

    #[error("capture failed for {language}: {detail}")]
    Capture { language: Language, detail: String },

    #[error("PDF operation failed: {0}")]
    PdfError(String),

    #[error("image processing failed: {0}")]
    ImageError(String),

    // -- Export orchestration --
    #[error("no translations available to export")]
    NoTranslations,

    #[error("an export is already in progress")]
    ExportInProgress,

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, LabelError>;
