// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// eurolabel-export — Turns the preview into print-ready files, one language at
// a time.

pub mod adapters;
pub mod filename;
pub mod integrity;
pub mod orchestrator;
pub mod services;
pub mod surface;

pub use adapters::{DirectorySink, PdfAssembler};
pub use filename::{output_filename, sanitize_product_name};
pub use orchestrator::{
    BatchId, BatchReport, ExportContext, ExportOrchestrator, ExportState, ExportedFile,
    LanguageOutcome,
};
pub use services::{CaptureRequest, DocumentAssembler, OutputSink, RasterCapture};
pub use surface::{LivePreview, PreviewSurface, RenderPending, SurfaceHandle};
