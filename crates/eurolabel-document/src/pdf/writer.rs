// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF writer — wrap a captured label in a one-page PDF using `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised via
// `PdfDocument::save()`. It writes page boxes in whole points, so the boxes
// are rewritten with `lopdf` afterwards.

use eurolabel_core::PaperSize;
use eurolabel_core::error::LabelError;
use lopdf::{Document, Object, ObjectId};
use printpdf::{
    Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Pt, RawImage, RawImageData,
    RawImageFormat, XObjectTransform,
};
use tracing::{debug, info, instrument, warn};

use crate::capture::Raster;

/// Page boxes pinned to the exact label size.
const PAGE_BOXES: [&str; 3] = ["MediaBox", "CropBox", "TrimBox"];

/// Builds print-ready label PDFs.
///
/// The page is exactly the physical label size and the capture covers it edge
/// to edge, so the printed label matches the preview.
pub struct PdfWriter {
    paper_size: PaperSize,
    /// Title metadata embedded in the PDF /Info dictionary.
    title: Option<String>,
}

impl PdfWriter {
    pub fn new(paper_size: PaperSize) -> Self {
        Self {
            paper_size,
            title: None,
        }
    }

    /// Set a title for the PDF metadata.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// Paper dimensions in printpdf's Mm units.
    fn page_dimensions(&self) -> (Mm, Mm) {
        let (w_mm, h_mm) = self.paper_size.dimensions_mm();
        (Mm(w_mm as f32), Mm(h_mm as f32))
    }

    /// Create a single-page PDF whose only content is `raster`, stretched to
    /// cover the full page from the origin.
    #[instrument(
        skip(self, raster),
        fields(width = raster.width(), height = raster.height(), scale = raster.scale())
    )]
    pub fn create_from_raster(&self, raster: &Raster) -> Result<Vec<u8>, LabelError> {
        let (page_w, page_h) = self.page_dimensions();
        let title = self.title.as_deref().unwrap_or("Eurolabel");

        let img_width = raster.width() as usize;
        let img_height = raster.height() as usize;
        if img_width == 0 || img_height == 0 {
            return Err(LabelError::PdfError("cannot place an empty capture".into()));
        }

        info!(paper = %self.paper_size, title, "Creating label PDF");

        let page_w_pt = page_w.into_pt().0;
        let page_h_pt = page_h.into_pt().0;

        // Pick the density that maps the capture width onto the page width,
        // then correct the height for any rounding in the capture.
        let dpi = img_width as f32 * 72.0 / page_w_pt;
        let native_h_pt = img_height as f32 / dpi * 72.0;
        let scale_y = page_h_pt / native_h_pt;
        if (scale_y - 1.0).abs() > 0.02 {
            warn!(scale_y, "Capture aspect ratio differs from the page");
        }

        let raw = RawImage {
            // Packed RGB8 rows, top to bottom.
            pixels: RawImageData::U8(raster.as_rgb().as_raw().clone()),
            width: img_width,
            height: img_height,
            data_format: RawImageFormat::RGB8,
            tag: Vec::new(),
        };

        let mut doc = PdfDocument::new(title);
        let xobject_id = doc.add_image(&raw);

        let ops = vec![Op::UseXobject {
            id: xobject_id,
            transform: XObjectTransform {
                translate_x: Some(Pt(0.0)),
                translate_y: Some(Pt(0.0)),
                scale_x: Some(1.0),
                scale_y: Some(scale_y),
                dpi: Some(dpi),
                rotate: None,
            },
        }];

        doc.with_pages(vec![PdfPage::new(page_w, page_h, ops)]);

        debug!(dpi, scale_y, "Capture placed on page");

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let output = doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            debug!(warnings = warnings.len(), "printpdf reported warnings");
        }

        pin_page_boxes(&output, page_w_pt, page_h_pt)
    }
}

/// Overwrite every page's boxes with `[0 0 width height]` in fractional points.
fn pin_page_boxes(pdf: &[u8], width_pt: f32, height_pt: f32) -> Result<Vec<u8>, LabelError> {
    let mut document = Document::load_mem(pdf)
        .map_err(|err| LabelError::PdfError(format!("failed to reload generated PDF: {err}")))?;

    let page_ids: Vec<ObjectId> = document.get_pages().into_values().collect();
    for page_id in page_ids {
        let page = document
            .get_object_mut(page_id)
            .and_then(Object::as_dict_mut)
            .map_err(|err| LabelError::PdfError(format!("bad page object: {err}")))?;
        for key in PAGE_BOXES {
            let rect = vec![
                Object::Real(0.0),
                Object::Real(0.0),
                Object::Real(width_pt),
                Object::Real(height_pt),
            ];
            page.set(key, rect);
        }
    }

    let mut output = Vec::new();
    document
        .save_to(&mut output)
        .map_err(|err| LabelError::PdfError(format!("failed to write PDF: {err}")))?;
    Ok(output)
}
