// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF reader — inspect exported label PDFs using the `lopdf` crate.

use std::path::Path;

use eurolabel_core::error::LabelError;
use lopdf::{Document, Object};
use tracing::{debug, info, instrument};

/// Millimetres per PDF point.
const MM_PER_PT: f32 = 25.4 / 72.0;

/// Read-only view of an existing PDF.
pub struct PdfReader {
    document: Document,
}

impl PdfReader {
    /// Open a PDF from the filesystem.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LabelError> {
        let path_ref = path.as_ref();
        info!("Opening PDF: {}", path_ref.display());

        let document = Document::load(path_ref).map_err(|err| {
            LabelError::PdfError(format!("failed to open {}: {}", path_ref.display(), err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded");

        Ok(Self { document })
    }

    /// Create a reader from raw PDF bytes already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self, LabelError> {
        let document = Document::load_mem(data).map_err(|err| {
            LabelError::PdfError(format!("failed to load PDF from memory: {}", err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded from bytes");

        Ok(Self { document })
    }

    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// Width and height of a page (1-indexed) in millimetres, from its MediaBox.
    pub fn page_size_mm(&self, page_number: u32) -> Result<(f32, f32), LabelError> {
        let pages = self.document.get_pages();
        let page_id = pages.get(&page_number).copied().ok_or_else(|| {
            LabelError::PdfError(format!(
                "page {} out of range (document has {} pages)",
                page_number,
                pages.len()
            ))
        })?;

        let page = self
            .document
            .get_dictionary(page_id)
            .map_err(|err| LabelError::PdfError(format!("bad page object: {err}")))?;
        let media_box = page
            .get(b"MediaBox")
            .and_then(Object::as_array)
            .map_err(|err| LabelError::PdfError(format!("page has no MediaBox: {err}")))?;

        let coords = media_box
            .iter()
            .map(|value| {
                value
                    .as_float()
                    .map_err(|err| LabelError::PdfError(format!("bad MediaBox entry: {err}")))
            })
            .collect::<Result<Vec<f32>, LabelError>>()?;
        let [x0, y0, x1, y1] = coords[..] else {
            return Err(LabelError::PdfError(format!(
                "MediaBox has {} entries",
                coords.len()
            )));
        };

        Ok(((x1 - x0) * MM_PER_PT, (y1 - y0) * MM_PER_PT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(
            PdfReader::from_bytes(b"not a pdf"),
            Err(LabelError::PdfError(_))
        ));
    }

    #[test]
    fn missing_file_is_rejected() {
        assert!(PdfReader::open("/nonexistent/label.pdf").is_err());
    }
}
