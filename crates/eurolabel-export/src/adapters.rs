// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Production implementations of the export collaborators.

use std::path::PathBuf;

use eurolabel_core::{LabelError, PaperSize, Result};
use eurolabel_document::{PdfReader, PdfWriter, Raster, SvgRasterizer};
use tracing::{debug, info};

use crate::services::{CaptureRequest, DocumentAssembler, OutputSink, RasterCapture};
use crate::surface::SurfaceHandle;

impl RasterCapture for SvgRasterizer {
    fn capture(&self, surface: &SurfaceHandle, request: &CaptureRequest) -> Result<Raster> {
        SvgRasterizer::capture(self, surface, request.scale(), request.background())
    }
}

/// Largest accepted difference between the page and the label, in mm.
const PAGE_TOLERANCE_MM: f32 = 0.01;

/// Assembles one-page PDFs sized to the label, and reads each one back to
/// confirm the page size before it is saved.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfAssembler;

impl DocumentAssembler for PdfAssembler {
    fn assemble(&self, raster: &Raster, size: PaperSize, title: &str) -> Result<Vec<u8>> {
        let mut writer = PdfWriter::new(size);
        if !title.is_empty() {
            writer.set_title(title);
        }
        let bytes = writer.create_from_raster(raster)?;

        let (width, height) = PdfReader::from_bytes(&bytes)?.page_size_mm(1)?;
        let (want_w, want_h) = size.dimensions_mm();
        if (width - want_w as f32).abs() > PAGE_TOLERANCE_MM
            || (height - want_h as f32).abs() > PAGE_TOLERANCE_MM
        {
            return Err(LabelError::PdfError(format!(
                "page is {width:.3}x{height:.3} mm, expected {want_w}x{want_h} mm"
            )));
        }
        debug!(width, height, "PDF page size verified");
        Ok(bytes)
    }
}

/// Writes files into a directory, creating it on first use.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl OutputSink for DirectorySink {
    fn save(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
        if !self.dir.as_os_str().is_empty() && !self.dir.exists() {
            debug!(dir = %self.dir.display(), "Creating output directory");
            std::fs::create_dir_all(&self.dir)?;
        }
        let path = self.dir.join(filename);
        std::fs::write(&path, bytes)?;
        info!(path = %path.display(), bytes = bytes.len(), "Saved export");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use eurolabel_document::PdfReader;
    use image::{Rgb, RgbImage};

    use super::*;

    #[test]
    fn sink_creates_directory_and_writes() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("out/labels");
        let path = DirectorySink::new(&dir).save("a.pdf", b"%PDF-").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-");
        assert_eq!(path, dir.join("a.pdf"));
    }

    #[test]
    fn assembler_sizes_page_to_label() {
        let raster = Raster::new(RgbImage::from_pixel(300, 450, Rgb([255, 255, 255])), 3.0);
        let bytes = PdfAssembler
            .assemble(&raster, PaperSize::Rectangular, "牛肉干")
            .unwrap();
        let (w, h) = PdfReader::from_bytes(&bytes).unwrap().page_size_mm(1).unwrap();
        assert!((w - 100.0).abs() < 0.01, "width {w}");
        assert!((h - 150.0).abs() < 0.01, "height {h}");
    }
}
