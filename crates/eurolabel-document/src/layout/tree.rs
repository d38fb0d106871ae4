// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Laid-out label structure: what appears on the label and in which order,
// before it is turned into drawing instructions.

use eurolabel_core::{FieldId, Language, PaperSize};

/// On-screen width of every label in CSS pixels. Height follows the paper
/// size's aspect ratio.
pub const BASE_WIDTH_PX: f32 = 500.0;

/// Product name shown when the field is empty.
pub const TITLE_PLACEHOLDER: &str = "PRODUCT NAME";

/// Prefix of the footer when a batch code is printed.
pub const BATCH_PREFIX: &str = "Batch:";

/// Pixel geometry and base typography of a label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub width: f32,
    pub height: f32,
    pub padding: f32,
    /// Base font size in pixels.
    pub font_size: f32,
    /// Line height as a multiple of the font size.
    pub line_height: f32,
}

impl Canvas {
    pub fn for_size(size: PaperSize) -> Self {
        let font_size = match size {
            PaperSize::Square => 11.0,
            PaperSize::Rectangular => 13.0,
        };
        Self {
            width: BASE_WIDTH_PX,
            height: BASE_WIDTH_PX * size.aspect_ratio(),
            padding: 25.0,
            font_size,
            line_height: 1.3,
        }
    }

    /// Canvas size in whole pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        (self.width.round() as u32, self.height.round() as u32)
    }

    pub fn inner_width(&self) -> f32 {
        self.width - 2.0 * self.padding
    }
}

/// Product name band at the top of the label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderBand {
    pub title: String,
    /// Right-aligned net quantity, when enabled and filled in.
    pub net_weight: Option<String>,
}

/// One entry of the nutrition declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NutritionRow {
    pub caption: &'static str,
    pub value: String,
    /// "of which …" sub-rows are indented and set in italics.
    pub indented: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NutritionTable {
    pub title: &'static str,
    pub rows: Vec<NutritionRow>,
}

/// A captioned value in the secondary information grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailCell {
    pub field: FieldId,
    pub caption: &'static str,
    pub text: String,
}

/// A row of the secondary grid: up to two half-width cells, or one cell
/// spanning both columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRow {
    pub cells: Vec<DetailCell>,
    pub full_width: bool,
}

/// Body sections, in print order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section {
    /// Justified block with the caption inline.
    Ingredients { caption: &'static str, text: String },
    /// Emphasised allergy advice.
    Allergens { caption: &'static str, text: String },
    Nutrition(NutritionTable),
    /// Two-column grid of secondary fields.
    Details(Vec<DetailRow>),
}

/// Footer line. Exactly one form is always present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Footer {
    Batch(String),
    PackagingNote(&'static str),
}

impl Footer {
    pub fn text(&self) -> String {
        match self {
            Self::Batch(code) => format!("{BATCH_PREFIX} {code}"),
            Self::PackagingNote(note) => (*note).to_string(),
        }
    }
}

/// A fully laid-out label for one (language, size) combination.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelDocument {
    pub language: Language,
    pub size: PaperSize,
    pub canvas: Canvas,
    pub header: HeaderBand,
    pub sections: Vec<Section>,
    pub footer: Footer,
}

impl LabelDocument {
    /// Whether any section prints this field's caption or value.
    pub fn contains_field(&self, field: FieldId) -> bool {
        match field {
            FieldId::ProductName => true,
            FieldId::NetWeight => self.header.net_weight.is_some(),
            FieldId::BatchNumber => matches!(self.footer, Footer::Batch(_)),
            FieldId::Ingredients => self
                .sections
                .iter()
                .any(|s| matches!(s, Section::Ingredients { .. })),
            FieldId::Allergens => self
                .sections
                .iter()
                .any(|s| matches!(s, Section::Allergens { .. })),
            FieldId::Nutrition => self
                .sections
                .iter()
                .any(|s| matches!(s, Section::Nutrition(_))),
            FieldId::Storage
            | FieldId::ShelfLife
            | FieldId::ProductionDate
            | FieldId::Origin
            | FieldId::Distributor
            | FieldId::Usage => self.sections.iter().any(|s| match s {
                Section::Details(rows) => rows
                    .iter()
                    .flat_map(|row| row.cells.iter())
                    .any(|cell| cell.field == field),
                _ => false,
            }),
        }
    }
}
