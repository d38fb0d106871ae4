// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Eurolabel — Label content model, caption tables, and errors shared across
// all crates.

pub mod config;
pub mod error;
pub mod headers;
pub mod human_errors;
pub mod model;
pub mod types;

pub use config::{AppConfig, TranslatorConfig};
pub use error::{LabelError, Result};
pub use headers::{LabelHeaders, headers_for};
pub use model::{LabelModel, LabelSnapshot};
pub use types::*;
