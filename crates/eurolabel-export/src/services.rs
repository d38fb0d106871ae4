// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Collaborators the orchestrator drives: raster capture, document assembly,
// and the place files end up.

use std::path::PathBuf;

use eurolabel_core::{PaperSize, Result};
use eurolabel_document::Raster;

use crate::surface::SurfaceHandle;

/// Capture density and background for one capture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureRequest {
    scale: f32,
    background: [u8; 3],
}

impl CaptureRequest {
    /// Lowest oversampling accepted for print output.
    pub const MIN_SCALE: f32 = 3.0;

    /// Requests below [`Self::MIN_SCALE`] (or not finite) are raised to it.
    pub fn new(scale: f32, background: [u8; 3]) -> Self {
        let scale = if scale.is_finite() {
            scale.max(Self::MIN_SCALE)
        } else {
            Self::MIN_SCALE
        };
        Self { scale, background }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn background(&self) -> [u8; 3] {
        self.background
    }
}

impl Default for CaptureRequest {
    fn default() -> Self {
        Self::new(Self::MIN_SCALE, [255, 255, 255])
    }
}

/// Turns a rendered surface into pixels.
pub trait RasterCapture: Send + Sync {
    fn capture(&self, surface: &SurfaceHandle, request: &CaptureRequest) -> Result<Raster>;
}

/// Wraps a capture in a printable document of the given physical size.
pub trait DocumentAssembler: Send + Sync {
    fn assemble(&self, raster: &Raster, size: PaperSize, title: &str) -> Result<Vec<u8>>;
}

/// Stores finished documents and reports where they went.
pub trait OutputSink: Send + Sync {
    fn save(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_scale_is_raised() {
        assert_eq!(CaptureRequest::new(1.0, [0, 0, 0]).scale(), 3.0);
        assert_eq!(CaptureRequest::new(f32::NAN, [0, 0, 0]).scale(), 3.0);
        assert_eq!(CaptureRequest::new(4.5, [0, 0, 0]).scale(), 4.5);
    }

    #[test]
    fn default_is_white_at_minimum_scale() {
        let request = CaptureRequest::default();
        assert_eq!(request.scale(), CaptureRequest::MIN_SCALE);
        assert_eq!(request.background(), [255, 255, 255]);
    }
}
