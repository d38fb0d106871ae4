// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

use eurolabel_core::error::LabelError;
use image::{DynamicImage, RgbImage};

use crate::image::ImageProcessor;

/// An opaque RGB capture of one label.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    image: RgbImage,
    /// Pixels per on-screen pixel.
    scale: f32,
}

impl Raster {
    pub fn new(image: RgbImage, scale: f32) -> Self {
        Self { image, scale }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn as_rgb(&self) -> &RgbImage {
        &self.image
    }

    pub fn to_png_bytes(&self) -> Result<Vec<u8>, LabelError> {
        ImageProcessor::from_dynamic(DynamicImage::ImageRgb8(self.image.clone())).to_png_bytes()
    }
}
