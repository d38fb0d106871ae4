// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Layout module — label structure, section ordering, and SVG drawing.

pub mod engine;
pub mod svg;
pub mod tree;

pub use engine::{RenderedLabel, layout, render};
pub use tree::{Canvas, Footer, LabelDocument, Section};
