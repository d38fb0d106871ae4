// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// SVG rasteriser — turns label markup into pixels with resvg.
//
// The font database is loaded once per rasteriser; system font discovery is
// the slow part of a capture.

use std::sync::Arc;

use eurolabel_core::Language;
use eurolabel_core::error::LabelError;
use tiny_skia::{Pixmap, Transform};
use tracing::{debug, info, instrument};
use usvg::{Options, Tree, fontdb};

use super::raster::Raster;
use crate::image::ImageProcessor;
use crate::layout::RenderedLabel;

/// Rasterises rendered labels at a chosen pixel density.
pub struct SvgRasterizer {
    fontdb: Arc<fontdb::Database>,
}

impl SvgRasterizer {
    /// Create a rasteriser using the fonts installed on this system.
    pub fn new() -> Self {
        Self::with_fonts(Vec::new())
    }

    /// Create a rasteriser with extra font files in addition to system fonts.
    pub fn with_fonts(fonts: impl IntoIterator<Item = Vec<u8>>) -> Self {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        let system_faces = db.len();
        for data in fonts {
            db.load_font_data(data);
        }
        info!(
            faces = db.len(),
            extra = db.len() - system_faces,
            "Font database loaded"
        );
        Self {
            fontdb: Arc::new(db),
        }
    }

    /// Capture `label` at `scale` device pixels per on-screen pixel, composited
    /// over an opaque `background`.
    #[instrument(skip(self, label), fields(language = %label.language(), size = %label.size()))]
    pub fn capture(
        &self,
        label: &RenderedLabel,
        scale: f32,
        background: [u8; 3],
    ) -> Result<Raster, LabelError> {
        self.rasterize(&label.markup, scale, background)
            .map_err(|detail| capture_error(label.language(), detail))
    }

    /// Rasterise arbitrary SVG markup.
    pub fn rasterize(
        &self,
        markup: &str,
        scale: f32,
        background: [u8; 3],
    ) -> Result<Raster, String> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(format!("invalid capture scale {scale}"));
        }
        let options = Options {
            fontdb: Arc::clone(&self.fontdb),
            ..Options::default()
        };
        let tree =
            Tree::from_str(markup, &options).map_err(|err| format!("failed to parse SVG: {err}"))?;

        let size = tree.size();
        let width = (size.width() * scale).round() as u32;
        let height = (size.height() * scale).round() as u32;
        let mut pixmap =
            Pixmap::new(width, height).ok_or_else(|| format!("empty capture {width}x{height}"))?;
        resvg::render(
            &tree,
            Transform::from_scale(scale, scale),
            &mut pixmap.as_mut(),
        );

        // tiny-skia stores premultiplied alpha.
        let pixels: Vec<u8> = pixmap
            .pixels()
            .iter()
            .flat_map(|pixel| {
                let color = pixel.demultiply();
                [color.red(), color.green(), color.blue(), color.alpha()]
            })
            .collect();
        let image = ImageProcessor::from_rgba(width, height, pixels)
            .map_err(|err| err.to_string())?
            .flatten(background)
            .into_rgb8();

        debug!(width, height, scale, "Capture complete");
        Ok(Raster::new(image, scale))
    }
}

impl Default for SvgRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

fn capture_error(language: Language, detail: String) -> LabelError {
    LabelError::Capture { language, detail }
}

#[cfg(test)]
mod tests {
    use eurolabel_core::{ContentKey, FieldSet, LabelContent, PaperSize, headers_for};

    use super::*;
    use crate::layout::render;

    fn rasterizer() -> SvgRasterizer {
        SvgRasterizer {
            fontdb: Arc::new(fontdb::Database::new()),
        }
    }

    #[test]
    fn capture_multiplies_pixel_size() {
        let label = render(
            &LabelContent::initial(),
            headers_for(Language::En),
            &FieldSet::default(),
            PaperSize::Rectangular,
            Language::En,
        );
        let raster = rasterizer().capture(&label, 3.0, [255, 255, 255]).unwrap();
        assert_eq!((raster.width(), raster.height()), (1500, 2250));
        assert_eq!(raster.scale(), 3.0);
    }

    #[test]
    fn background_fills_empty_areas() {
        let markup = r#"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="4"></svg>"#;
        let raster = rasterizer().rasterize(markup, 1.0, [10, 20, 30]).unwrap();
        assert!(raster.as_rgb().pixels().all(|p| p.0 == [10, 20, 30]));
    }

    #[test]
    fn shapes_are_drawn_at_scale() {
        let markup = r##"<svg xmlns="http://www.w3.org/2000/svg" width="2" height="2"><rect width="1" height="2" fill="#000000"/></svg>"##;
        let raster = rasterizer().rasterize(markup, 2.0, [255, 255, 255]).unwrap();
        assert_eq!((raster.width(), raster.height()), (4, 4));
        assert_eq!(raster.as_rgb().get_pixel(0, 0).0, [0, 0, 0]);
        assert_eq!(raster.as_rgb().get_pixel(3, 3).0, [255, 255, 255]);
    }

    #[test]
    fn malformed_markup_is_a_capture_failure() {
        let mut label = render(
            &LabelContent::initial(),
            headers_for(Language::Fr),
            &FieldSet::default(),
            PaperSize::Square,
            Language::Fr,
        );
        label.markup = "<svg".into();
        let err = rasterizer().capture(&label, 3.0, [255, 255, 255]).unwrap_err();
        assert!(matches!(
            err,
            LabelError::Capture {
                language: Language::Fr,
                ..
            }
        ));
    }

    #[test]
    fn control_characters_in_content_still_capture() {
        let content = LabelContent::initial()
            .with(ContentKey::Ingredients, "Beef\u{1}, salt")
            .with(ContentKey::ProductName, "Jerky\u{0}\u{7}");
        let label = render(
            &content,
            headers_for(Language::En),
            &FieldSet::default(),
            PaperSize::Square,
            Language::En,
        );
        assert!(!label.markup.contains('\u{1}'));
        let raster = rasterizer().capture(&label, 3.0, [255, 255, 255]).unwrap();
        assert_eq!((raster.width(), raster.height()), (1500, 1500));
    }

    #[test]
    fn zero_scale_is_rejected() {
        let markup = r#"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="4"></svg>"#;
        assert!(rasterizer().rasterize(markup, 0.0, [0, 0, 0]).is_err());
    }
}
