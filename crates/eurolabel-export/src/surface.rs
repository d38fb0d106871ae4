// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Preview surface — the label currently on display, and the signal that a
// requested (language, size) has finished rendering.
//
// Every request bumps a generation counter. Renders run as spawned tasks and
// publish their frame on a watch channel; a frame older than the one already
// published is discarded. A pending request settles only on the frame of its
// own generation.

use std::sync::Arc;

use eurolabel_core::{
    LabelError, LabelSnapshot, Language, PaperSize, Result, TranslatedLabels, headers_for,
};
use eurolabel_document::{RenderedLabel, render};
use tokio::sync::watch;
use tracing::{debug, instrument};

/// A rendered label handed from layout to capture.
pub type SurfaceHandle = Arc<RenderedLabel>;

/// A published render.
#[derive(Debug, Clone)]
struct Frame {
    generation: u64,
    handle: SurfaceHandle,
}

/// Something that shows one label at a time and can be switched.
pub trait PreviewSurface: Send {
    /// Paper size currently shown.
    fn size(&self) -> PaperSize;

    /// Product name in the source language.
    fn source_product_name(&self) -> String;

    /// The most recent request's render, if it has completed.
    fn current(&self) -> Option<SurfaceHandle>;

    /// Switch to `language` and `size`. Must be called within a Tokio runtime.
    fn show(&mut self, language: Language, size: PaperSize) -> RenderPending;
}

/// A render that has been requested but may not have completed yet.
#[derive(Debug)]
pub struct RenderPending {
    frames: watch::Receiver<Option<Frame>>,
    generation: u64,
    language: Language,
    size: PaperSize,
}

impl RenderPending {
    pub fn language(&self) -> Language {
        self.language
    }

    pub fn size(&self) -> PaperSize {
        self.size
    }

    /// Wait until this request's render is on the surface.
    ///
    /// Fails with [`LabelError::RenderInterrupted`] if a newer request
    /// superseded it or the surface went away.
    pub async fn settled(mut self) -> Result<SurfaceHandle> {
        let generation = self.generation;
        let interrupted = LabelError::RenderInterrupted {
            language: self.language,
        };
        let frame = match self
            .frames
            .wait_for(|frame| frame.as_ref().is_some_and(|f| f.generation >= generation))
            .await
        {
            Ok(frame) => frame.clone(),
            Err(_) => return Err(interrupted),
        };

        match frame {
            Some(frame)
                if frame.generation == generation
                    && frame.handle.language() == self.language
                    && frame.handle.size() == self.size =>
            {
                Ok(frame.handle)
            }
            _ => Err(interrupted),
        }
    }
}

/// Preview backed by the layout engine.
///
/// Shows the translation for the active language when one exists, the source
/// content otherwise.
pub struct LivePreview {
    snapshot: LabelSnapshot,
    translations: TranslatedLabels,
    language: Language,
    size: PaperSize,
    generation: u64,
    frames: Arc<watch::Sender<Option<Frame>>>,
}

impl LivePreview {
    pub fn new(snapshot: LabelSnapshot, language: Language, size: PaperSize) -> Self {
        let (frames, _) = watch::channel(None);
        Self {
            snapshot,
            translations: TranslatedLabels::default(),
            language,
            size,
            generation: 0,
            frames: Arc::new(frames),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn translations(&self) -> &TranslatedLabels {
        &self.translations
    }

    /// Replace the source content and re-render the active combination.
    pub fn set_snapshot(&mut self, snapshot: LabelSnapshot) -> RenderPending {
        self.snapshot = snapshot;
        self.schedule()
    }

    /// Replace all translations at once and re-render.
    pub fn set_translations(&mut self, translations: TranslatedLabels) -> RenderPending {
        self.translations = translations;
        self.schedule()
    }

    /// Request a render of the active combination.
    #[instrument(skip(self), fields(language = %self.language, size = %self.size))]
    fn schedule(&mut self) -> RenderPending {
        self.generation += 1;
        let generation = self.generation;
        let (language, size) = (self.language, self.size);
        let content = self
            .translations
            .content_for(language, &self.snapshot.content)
            .clone();
        let fields = Arc::clone(&self.snapshot.fields);
        let frames = Arc::clone(&self.frames);
        let pending = RenderPending {
            frames: self.frames.subscribe(),
            generation,
            language,
            size,
        };

        tokio::spawn(async move {
            let label = render(&content, headers_for(language), &fields, size, language);
            let published = frames.send_if_modified(|slot| {
                if slot.as_ref().is_some_and(|f| f.generation > generation) {
                    return false;
                }
                *slot = Some(Frame {
                    generation,
                    handle: Arc::new(label),
                });
                true
            });
            debug!(generation, published, "Preview frame rendered");
        });

        pending
    }
}

impl PreviewSurface for LivePreview {
    fn size(&self) -> PaperSize {
        self.size
    }

    fn source_product_name(&self) -> String {
        self.snapshot.content.product_name.clone()
    }

    fn current(&self) -> Option<SurfaceHandle> {
        self.frames
            .borrow()
            .as_ref()
            .filter(|frame| frame.generation == self.generation)
            .map(|frame| Arc::clone(&frame.handle))
    }

    fn show(&mut self, language: Language, size: PaperSize) -> RenderPending {
        self.language = language;
        self.size = size;
        self.schedule()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use eurolabel_core::{ContentKey, LabelContent, LabelModel};

    use super::*;

    fn preview() -> LivePreview {
        let mut model = LabelModel::new();
        model.set_field(ContentKey::ProductName, "牛肉干");
        LivePreview::new(model.snapshot(), Language::En, PaperSize::Square)
    }

    #[tokio::test]
    async fn settles_on_requested_combination() {
        let mut surface = preview();
        assert!(surface.current().is_none());

        let handle = surface
            .show(Language::De, PaperSize::Rectangular)
            .settled()
            .await
            .unwrap();
        assert_eq!(handle.language(), Language::De);
        assert_eq!(handle.size(), PaperSize::Rectangular);
        assert!(Arc::ptr_eq(&surface.current().unwrap(), &handle));
    }

    #[tokio::test]
    async fn superseded_request_is_interrupted() {
        let mut surface = preview();
        let first = surface.show(Language::Fr, PaperSize::Square);
        let second = surface.show(Language::It, PaperSize::Square);

        let handle = second.settled().await.unwrap();
        assert_eq!(handle.language(), Language::It);

        let err = first.settled().await.unwrap_err();
        assert!(matches!(
            err,
            LabelError::RenderInterrupted {
                language: Language::Fr
            }
        ));
    }

    #[tokio::test]
    async fn translation_is_shown_when_present() {
        let mut surface = preview();
        let german = LabelContent::initial().with(ContentKey::ProductName, "Rindfleisch");
        surface.set_translations(TranslatedLabels::new(BTreeMap::from([(
            Language::De,
            german,
        )])));

        let handle = surface
            .show(Language::De, PaperSize::Square)
            .settled()
            .await
            .unwrap();
        assert!(handle.markup.contains("RINDFLEISCH"));

        // No French translation: source content is shown.
        let handle = surface
            .show(Language::Fr, PaperSize::Square)
            .settled()
            .await
            .unwrap();
        assert!(handle.markup.contains("牛肉干"));
        assert_eq!(surface.source_product_name(), "牛肉干");
    }
}
