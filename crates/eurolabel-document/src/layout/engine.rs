// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Layout engine — decides which sections a label carries and in which order.
//
// Order follows FIC practice: name and quantity first, then ingredients,
// allergy advice, the nutrition declaration, the secondary grid, and the
// batch footer. Nothing is cached; every call lays the label out afresh.

use eurolabel_core::{
    FieldId, FieldSet, LabelContent, LabelHeaders, Language, NutritionInfo, PaperSize,
};
use tracing::{debug, instrument};

use super::svg;
use super::tree::{
    Canvas, DetailCell, DetailRow, Footer, HeaderBand, LabelDocument, NutritionRow,
    NutritionTable, Section, TITLE_PLACEHOLDER,
};

/// Every field, in the order the layout visits it.
const LAYOUT_ORDER: [FieldId; FieldId::COUNT] = [
    FieldId::ProductName,
    FieldId::NetWeight,
    FieldId::Ingredients,
    FieldId::Allergens,
    FieldId::Nutrition,
    FieldId::Storage,
    FieldId::Origin,
    FieldId::ShelfLife,
    FieldId::ProductionDate,
    FieldId::Distributor,
    FieldId::Usage,
    FieldId::BatchNumber,
];

/// Number of rows in the secondary grid.
const GRID_ROWS: usize = 4;

/// A rendered label: its structure plus the SVG markup drawn from it.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedLabel {
    pub document: LabelDocument,
    /// Self-contained SVG document at on-screen pixel size.
    pub markup: String,
}

impl RenderedLabel {
    pub fn language(&self) -> Language {
        self.document.language
    }

    pub fn size(&self) -> PaperSize {
        self.document.size
    }

    /// On-screen size in pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        self.document.canvas.pixel_size()
    }
}

/// Lay out a label for one language and paper size.
///
/// Pure: the same inputs always produce byte-identical markup.
#[instrument(skip(content, headers, fields), fields(language = %language, size = %size))]
pub fn render(
    content: &LabelContent,
    headers: &LabelHeaders,
    fields: &FieldSet,
    size: PaperSize,
    language: Language,
) -> RenderedLabel {
    let document = layout(content, headers, fields, size, language);
    let markup = svg::to_svg(&document);
    debug!(
        sections = document.sections.len(),
        markup_len = markup.len(),
        "label rendered"
    );
    RenderedLabel { document, markup }
}

/// Build the label structure without drawing it.
pub fn layout(
    content: &LabelContent,
    headers: &LabelHeaders,
    fields: &FieldSet,
    size: PaperSize,
    language: Language,
) -> LabelDocument {
    let mut header = HeaderBand {
        title: TITLE_PLACEHOLDER.to_string(),
        net_weight: None,
    };
    let mut sections = Vec::new();
    let mut grid: [Vec<DetailCell>; GRID_ROWS] = Default::default();
    let mut footer = Footer::PackagingNote(headers.batch_note);

    for field in LAYOUT_ORDER {
        let enabled = fields.is_enabled(field);
        match field {
            // Always printed, whatever the field configuration says.
            FieldId::ProductName => {
                if !content.product_name.is_empty() {
                    header.title = content.product_name.clone();
                }
            }
            FieldId::NetWeight => {
                if enabled && !content.net_weight.is_empty() {
                    header.net_weight = Some(content.net_weight.clone());
                }
            }
            FieldId::Ingredients => {
                if enabled {
                    sections.push(Section::Ingredients {
                        caption: headers.ingredients,
                        text: content.ingredients.clone(),
                    });
                }
            }
            // An empty allergen declaration drops the whole section.
            FieldId::Allergens => {
                if enabled && !content.allergens.is_empty() {
                    sections.push(Section::Allergens {
                        caption: headers.allergens,
                        text: content.allergens.clone(),
                    });
                }
            }
            FieldId::Nutrition => {
                if enabled {
                    sections.push(Section::Nutrition(nutrition_table(
                        &content.nutrition,
                        headers,
                    )));
                }
            }
            FieldId::Storage
            | FieldId::Origin
            | FieldId::ShelfLife
            | FieldId::ProductionDate
            | FieldId::Distributor
            | FieldId::Usage => {
                if enabled {
                    if let Some((row, cell)) = detail_cell(field, content, headers) {
                        grid[row].push(cell);
                    }
                }
            }
            FieldId::BatchNumber => {
                if enabled && !content.batch_number.is_empty() {
                    footer = Footer::Batch(content.batch_number.clone());
                }
            }
        }
    }

    let rows: Vec<DetailRow> = grid
        .into_iter()
        .enumerate()
        .filter(|(_, cells)| !cells.is_empty())
        .map(|(row, cells)| DetailRow {
            cells,
            full_width: GRID_FULL_WIDTH[row],
        })
        .collect();
    if !rows.is_empty() {
        sections.push(Section::Details(rows));
    }

    LabelDocument {
        language,
        size,
        canvas: Canvas::for_size(size),
        header,
        sections,
        footer,
    }
}

/// Whether each grid row spans both columns.
const GRID_FULL_WIDTH: [bool; GRID_ROWS] = [false, false, true, true];

/// Grid row and cell of a secondary field. Storage and origin share the
/// first row, best-before and production date the second; distributor and
/// usage get a full-width row each. Fields printed elsewhere have no cell.
fn detail_cell(
    field: FieldId,
    content: &LabelContent,
    headers: &LabelHeaders,
) -> Option<(usize, DetailCell)> {
    let (row, caption, text) = match field {
        FieldId::Storage => (0, headers.storage, &content.storage),
        FieldId::Origin => (0, headers.origin, &content.origin),
        FieldId::ShelfLife => (1, headers.best_before, &content.shelf_life),
        FieldId::ProductionDate => (1, headers.production_date, &content.production_date),
        FieldId::Distributor => (2, headers.distributor, &content.distributor),
        FieldId::Usage => (3, headers.usage, &content.usage),
        FieldId::ProductName
        | FieldId::NetWeight
        | FieldId::Ingredients
        | FieldId::Allergens
        | FieldId::Nutrition
        | FieldId::BatchNumber => return None,
    };
    Some((
        row,
        DetailCell {
            field,
            caption,
            text: text.clone(),
        },
    ))
}

/// All eight values are always listed, blank or not.
fn nutrition_table(nutrition: &NutritionInfo, headers: &LabelHeaders) -> NutritionTable {
    let row = |caption, value: String, indented| NutritionRow {
        caption,
        value,
        indented,
    };
    let grams = |value: &str| format!("{value} g");

    NutritionTable {
        title: headers.nutrition_title,
        rows: vec![
            row(
                headers.energy,
                format!("{} kJ / {} kcal", nutrition.energy_kj, nutrition.energy_kcal),
                false,
            ),
            row(headers.fat, grams(&nutrition.fat), false),
            row(headers.saturates, grams(&nutrition.saturates), true),
            row(headers.carbohydrate, grams(&nutrition.carbohydrate), false),
            row(headers.sugars, grams(&nutrition.sugars), true),
            row(headers.protein, grams(&nutrition.protein), false),
            row(headers.salt, grams(&nutrition.salt), false),
        ],
    }
}
