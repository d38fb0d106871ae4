// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Capture module — rasterise rendered labels at print resolution.

pub mod raster;
pub mod rasterizer;

pub use raster::Raster;
pub use rasterizer::SvgRasterizer;
