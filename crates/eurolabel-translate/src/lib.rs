// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// eurolabel-translate — Turns source label content into the four output
// languages through an AI translation backend.

use std::future::Future;
use std::pin::Pin;

use eurolabel_core::{LabelContent, Result, TranslatedLabels};

pub mod gemini;
pub mod payload;
mod retry;

pub use gemini::GeminiTranslator;
pub use payload::parse_translations;

/// Future returned by [`Translator::translate`].
pub type TranslateFuture<'a> = Pin<Box<dyn Future<Output = Result<TranslatedLabels>> + Send + 'a>>;

/// A backend that translates one source label into every output language.
///
/// A call either yields all four languages or fails; partial results are
/// never returned.
pub trait Translator: Send + Sync {
    fn translate<'a>(&'a self, source: &'a LabelContent) -> TranslateFuture<'a>;
}
