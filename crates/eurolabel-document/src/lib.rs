// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// eurolabel-document — Label layout, rasterisation, and PDF output.
//
// Lays out a label for one language and paper size, draws it as SVG, captures
// it at print density, and wraps the capture in a page-sized PDF.

pub mod capture;
pub mod image;
pub mod layout;
pub mod pdf;

// Re-export the primary types so callers can use `eurolabel_document::PdfWriter` etc.
pub use capture::{Raster, SvgRasterizer};
pub use self::image::processor::ImageProcessor;
pub use layout::{LabelDocument, RenderedLabel, layout, render};
pub use pdf::reader::PdfReader;
pub use pdf::writer::PdfWriter;
