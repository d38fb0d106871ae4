// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// SVG drawing of a laid-out label.
//
// Geometry is computed top to bottom with estimated glyph widths; the
// secondary grid is pinned to the bottom of the body, directly above the
// footer, the way the label is printed. All numbers are written with fixed
// precision so identical documents serialise to identical bytes.

use super::tree::{
    Canvas, DetailCell, DetailRow, Footer, HeaderBand, LabelDocument, NutritionTable, Section,
};

const FONT_FAMILY: &str = "Helvetica, Arial, 'Noto Sans', 'Noto Sans CJK SC', sans-serif";
const INK: &str = "#000000";
const MUTED: &str = "#6b7280";

/// Fixed footer text size in pixels.
const FOOTER_FONT_PX: f32 = 10.0;
/// Horizontal gap between grid columns.
const COLUMN_GAP: f32 = 16.0;

/// Draw `document` as a standalone SVG document.
pub fn to_svg(document: &LabelDocument) -> String {
    let canvas = document.canvas;
    let mut svg = SvgBuilder::new(canvas);
    let section_gap = canvas.font_size * 0.75;

    let mut y = svg.header(&document.header, canvas.padding);
    let footer_top = svg.footer(&document.footer);
    let body_bottom = footer_top - 16.0;

    for section in &document.sections {
        y = match section {
            Section::Ingredients { caption, text } => {
                svg.open_group("ingredients");
                let bottom = svg.inline_block(caption, text, y, Emphasis::Caption);
                svg.close_group();
                bottom
            }
            Section::Allergens { caption, text } => {
                svg.open_group("allergens");
                let bottom = svg.inline_block(caption, text, y, Emphasis::Whole);
                svg.close_group();
                bottom
            }
            Section::Nutrition(table) => {
                svg.open_group("nutrition");
                let bottom = svg.nutrition(table, y + 4.0) + 4.0;
                svg.close_group();
                bottom
            }
            Section::Details(rows) => {
                let height = svg.details_height(rows);
                let top = (body_bottom - height).max(y);
                svg.open_group("details");
                svg.details(rows, top);
                svg.close_group();
                top + height
            }
        } + section_gap;
    }

    svg.finish()
}

/// Which part of an inline block is bold.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Emphasis {
    Caption,
    Whole,
}

struct SvgBuilder {
    out: String,
    canvas: Canvas,
}

impl SvgBuilder {
    fn new(canvas: Canvas) -> Self {
        let mut out = String::new();
        out.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="{family}" font-size="{size}" fill="{INK}">"#,
            w = num(canvas.width),
            h = num(canvas.height),
            family = FONT_FAMILY,
            size = num(canvas.font_size),
        ));
        Self { out, canvas }
    }

    fn finish(mut self) -> String {
        self.out.push_str("</svg>");
        self.out
    }

    fn open_group(&mut self, id: &str) {
        self.out.push_str(&format!(r#"<g id="{id}">"#));
    }

    fn close_group(&mut self) {
        self.out.push_str("</g>");
    }

    fn line_box(&self, size: f32) -> f32 {
        size * self.canvas.line_height
    }

    /// Baseline of a line whose box starts at `top`.
    fn baseline(&self, top: f32, size: f32) -> f32 {
        top + self.line_box(size) * 0.78
    }

    fn left(&self) -> f32 {
        self.canvas.padding
    }

    fn right(&self) -> f32 {
        self.canvas.width - self.canvas.padding
    }

    /// Emit one `<text>` element. `body` must already be escaped.
    fn text(&mut self, x: f32, baseline: f32, size: f32, attrs: &str, body: &str) {
        self.out.push_str(&format!(
            r#"<text x="{}" y="{}" font-size="{}"{}>{}</text>"#,
            num(x),
            num(baseline),
            num(size),
            attrs,
            body
        ));
    }

    fn rule(&mut self, y: f32, stroke_width: f32, from: f32, to: f32) {
        self.out.push_str(&format!(
            r#"<line x1="{}" y1="{y}" x2="{}" y2="{y}" stroke="{INK}" stroke-width="{}"/>"#,
            num(from),
            num(to),
            num(stroke_width),
            y = num(y),
        ));
    }

    // -- Header band ----------------------------------------------------------

    /// Product name on the left, net weight right-aligned on the last title
    /// line, rule underneath. Returns the top of the body.
    fn header(&mut self, header: &HeaderBand, top: f32) -> f32 {
        let title_size = self.canvas.font_size * 1.8;
        let weight_size = self.canvas.font_size * 1.6;
        let title_width = self.canvas.inner_width() * 0.75;
        let title = header.title.to_uppercase();
        let lines = wrap_text(&title, title_width, title_size * BOLD_FACTOR);

        self.open_group("header");
        let mut line_top = top;
        for line in &lines {
            let baseline = self.baseline(line_top, title_size);
            self.text(
                self.left(),
                baseline,
                title_size,
                r#" font-weight="bold" letter-spacing="0.5""#,
                &escape_xml(line),
            );
            line_top += self.line_box(title_size);
        }

        let mut bottom = line_top;
        if let Some(weight) = &header.net_weight {
            let last_line_top = line_top - self.line_box(title_size);
            let baseline = self.baseline(last_line_top, title_size);
            self.text(
                self.right(),
                baseline,
                weight_size,
                r#" font-weight="bold" text-anchor="end""#,
                &escape_xml(weight),
            );
            bottom = bottom.max(last_line_top + self.line_box(weight_size));
        }

        let rule_y = bottom + 8.0;
        self.rule(rule_y, 2.0, self.left(), self.right());
        self.close_group();
        rule_y + 16.0
    }

    // -- Body -----------------------------------------------------------------

    /// Caption and text flowed together as one paragraph. Returns the bottom.
    fn inline_block(&mut self, caption: &str, text: &str, top: f32, emphasis: Emphasis) -> f32 {
        let size = self.canvas.font_size;
        let width = self.canvas.inner_width();
        let combined = if text.is_empty() {
            caption.to_string()
        } else {
            format!("{caption} {text}")
        };
        let lines = wrap_text(&combined, width, size * BOLD_FACTOR);
        let weight_attr = match emphasis {
            Emphasis::Whole => r#" font-weight="bold""#,
            Emphasis::Caption => "",
        };

        let mut caption_left = caption.chars().count();
        let mut line_top = top;
        for (index, line) in lines.iter().enumerate() {
            let line_chars = line.chars().count();
            let body = if emphasis == Emphasis::Caption && caption_left > 0 {
                let split = line
                    .char_indices()
                    .nth(caption_left.min(line_chars))
                    .map_or(line.len(), |(i, _)| i);
                let (bold, rest) = line.split_at(split);
                format!(
                    r#"<tspan font-weight="bold">{}</tspan>{}"#,
                    escape_xml(bold),
                    escape_xml(rest)
                )
            } else {
                escape_xml(line)
            };
            // The space consumed by a line break belongs to the caption too.
            caption_left = caption_left.saturating_sub(line_chars + 1);

            let is_last = index + 1 == lines.len();
            let justify = emphasis == Emphasis::Caption
                && !is_last
                && text_width(line, size) >= width * 0.85;
            let attrs = if justify {
                format!(
                    r#"{weight_attr} textLength="{}" lengthAdjust="spacing""#,
                    num(width)
                )
            } else {
                weight_attr.to_string()
            };

            let baseline = self.baseline(line_top, size);
            self.text(self.left(), baseline, size, &attrs, &body);
            line_top += self.line_box(size);
        }
        line_top
    }

    /// Bordered nutrition declaration in two columns. Returns the bottom.
    fn nutrition(&mut self, table: &NutritionTable, top: f32) -> f32 {
        let size = self.canvas.font_size;
        let small = size * 0.9;
        let inset = 8.0;
        let inner_left = self.left() + inset;
        let inner_right = self.right() - inset;
        let column_width = (inner_right - inner_left - COLUMN_GAP) / 2.0;

        let mut y = top + inset;
        let title_lines = wrap_text(table.title, inner_right - inner_left, size * BOLD_FACTOR);
        for line in &title_lines {
            let baseline = self.baseline(y, size);
            self.text(inner_left, baseline, size, r#" font-weight="bold""#, &escape_xml(line));
            y += self.line_box(size);
        }
        y += 4.0;
        self.rule(y, 1.0, inner_left, inner_right);
        y += 4.0;

        let row_height = self.line_box(size);
        for (index, row) in table.rows.iter().enumerate() {
            let column = index % 2;
            let line_top = y + (index / 2) as f32 * row_height;
            let column_left = inner_left + column as f32 * (column_width + COLUMN_GAP);
            let column_right = column_left + column_width;
            let baseline = self.baseline(line_top, size);

            if row.indented {
                self.text(
                    column_left + 8.0,
                    baseline,
                    small,
                    r#" font-style="italic""#,
                    &escape_xml(row.caption),
                );
            } else {
                self.text(column_left, baseline, size, "", &escape_xml(row.caption));
            }
            self.text(
                column_right,
                baseline,
                size,
                r#" font-weight="500" text-anchor="end""#,
                &escape_xml(&row.value),
            );
        }
        let grid_rows = table.rows.len().div_ceil(2);
        let bottom = y + grid_rows as f32 * row_height + inset;

        self.out.push_str(&format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="none" stroke="{INK}" stroke-width="1"/>"#,
            num(self.left()),
            num(top),
            num(self.canvas.inner_width()),
            num(bottom - top),
        ));
        bottom
    }

    // -- Secondary grid -------------------------------------------------------

    fn detail_size(&self) -> f32 {
        self.canvas.font_size * 0.92
    }

    fn column_width(&self, row: &DetailRow) -> f32 {
        if row.full_width {
            self.canvas.inner_width()
        } else {
            (self.canvas.inner_width() - COLUMN_GAP) / 2.0
        }
    }

    /// Caption lines and value lines of a cell.
    fn cell_lines(&self, cell: &DetailCell, width: f32) -> (Vec<String>, Vec<String>) {
        let size = self.detail_size();
        let caption = wrap_text(cell.caption, width, size * BOLD_FACTOR);
        let text = if cell.text.is_empty() {
            Vec::new()
        } else {
            wrap_text(&cell.text, width, size)
        };
        (caption, text)
    }

    fn row_height(&self, row: &DetailRow) -> f32 {
        let width = self.column_width(row);
        let lines = row
            .cells
            .iter()
            .map(|cell| {
                let (caption, text) = self.cell_lines(cell, width);
                caption.len() + text.len()
            })
            .max()
            .unwrap_or(0);
        lines as f32 * self.line_box(self.detail_size())
    }

    fn row_gap(row: &DetailRow) -> f32 {
        if row.full_width { 12.0 } else { 8.0 }
    }

    fn details_height(&self, rows: &[DetailRow]) -> f32 {
        let gaps: f32 = rows.iter().skip(1).map(Self::row_gap).sum();
        rows.iter().map(|row| self.row_height(row)).sum::<f32>() + gaps
    }

    fn details(&mut self, rows: &[DetailRow], top: f32) {
        let size = self.detail_size();
        let mut row_top = top;
        for (index, row) in rows.iter().enumerate() {
            if index > 0 {
                row_top += Self::row_gap(row);
            }
            let width = self.column_width(row);
            for (column, cell) in row.cells.iter().enumerate() {
                let x = self.left() + column as f32 * (width + COLUMN_GAP);
                let (caption, text) = self.cell_lines(cell, width);
                let mut line_top = row_top;
                for line in &caption {
                    let baseline = self.baseline(line_top, size);
                    self.text(x, baseline, size, r#" font-weight="bold""#, &escape_xml(line));
                    line_top += self.line_box(size);
                }
                for line in &text {
                    let baseline = self.baseline(line_top, size);
                    self.text(x, baseline, size, "", &escape_xml(line));
                    line_top += self.line_box(size);
                }
            }
            row_top += self.row_height(row);
        }
    }

    // -- Footer ---------------------------------------------------------------

    /// Centred footer on the bottom edge. Returns the y of its top rule.
    fn footer(&mut self, footer: &Footer) -> f32 {
        let line_top = self.canvas.height - self.canvas.padding - self.line_box(FOOTER_FONT_PX);
        let rule_y = line_top - 8.0;

        self.open_group("footer");
        self.rule(rule_y, 1.0, self.left(), self.right());
        let baseline = self.baseline(line_top, FOOTER_FONT_PX);
        self.text(
            self.canvas.width / 2.0,
            baseline,
            FOOTER_FONT_PX,
            &format!(r#" text-anchor="middle" fill="{MUTED}""#),
            &escape_xml(&footer.text()),
        );
        self.close_group();
        rule_y
    }
}

// -- Text measurement -----------------------------------------------------------

/// Bold glyphs run slightly wider than regular ones.
const BOLD_FACTOR: f32 = 1.06;

/// Estimated advance of one character, in pixels.
fn char_width(ch: char, font_size: f32) -> f32 {
    let em = match ch {
        ' ' => 0.28,
        // CJK, full-width forms and Hangul are square.
        '\u{2E80}'..='\u{9FFF}' | '\u{AC00}'..='\u{D7AF}' | '\u{F900}'..='\u{FAFF}'
        | '\u{FF00}'..='\u{FFEF}' => 1.0,
        'i' | 'l' | 'j' | 'I' | '.' | ',' | ':' | ';' | '\'' | '|' | '!' => 0.28,
        'm' | 'w' | 'M' | 'W' => 0.83,
        c if c.is_uppercase() || c.is_ascii_digit() => 0.64,
        _ => 0.52,
    };
    em * font_size
}

/// Estimated rendered width of `text`, in pixels.
pub(crate) fn text_width(text: &str, font_size: f32) -> f32 {
    text.chars().map(|ch| char_width(ch, font_size)).sum()
}

/// Wrap `text` so that no line is wider than `max_width` pixels.
///
/// Splits on existing newlines first, then word-wraps each paragraph. Words
/// wider than a line, including unspaced CJK runs, are broken between
/// characters.
pub(crate) fn wrap_text(text: &str, max_width: f32, font_size: f32) -> Vec<String> {
    let mut result = Vec::new();
    let space = char_width(' ', font_size);

    for paragraph in text.split('\n') {
        let words: Vec<&str> = paragraph.split_whitespace().collect();
        if words.is_empty() {
            result.push(String::new());
            continue;
        }

        let mut line = String::new();
        let mut line_width = 0.0;

        for word in words {
            let word_width = text_width(word, font_size);
            if word_width > max_width {
                // Continue the current line, breaking between characters.
                if !line.is_empty() {
                    line.push(' ');
                    line_width += space;
                }
                for ch in word.chars() {
                    let advance = char_width(ch, font_size);
                    if line_width + advance > max_width && !line.trim_end().is_empty() {
                        result.push(line.trim_end().to_string());
                        line.clear();
                        line_width = 0.0;
                    }
                    line.push(ch);
                    line_width += advance;
                }
            } else if line.is_empty() {
                line.push_str(word);
                line_width = word_width;
            } else if line_width + space + word_width <= max_width {
                line.push(' ');
                line.push_str(word);
                line_width += space + word_width;
            } else {
                result.push(std::mem::take(&mut line));
                line.push_str(word);
                line_width = word_width;
            }
        }

        if !line.is_empty() {
            result.push(line);
        }
    }

    result
}

/// Escape markup characters and drop characters XML 1.0 does not allow.
fn escape_xml(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' | '\n' | '\r' => out.push(ch),
            '\u{0}'..='\u{1f}' | '\u{fffe}' | '\u{ffff}' => {}
            _ => out.push(ch),
        }
    }
    out
}

/// Fixed-precision number for attribute values.
fn num(value: f32) -> String {
    format!("{value:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_respects_width() {
        let text = "Beef, soy sauce, sugar, salt, spices, yeast extract, garlic powder";
        let lines = wrap_text(text, 120.0, 11.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width(line, 11.0) <= 120.0, "line too wide: {line}");
        }
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn wrap_breaks_unspaced_cjk() {
        let text = "牛肉、酱油、白砂糖、食用盐、香辛料、酵母抽提物";
        let lines = wrap_text(text, 60.0, 10.0);
        assert!(lines.len() >= 4);
        assert_eq!(lines.concat(), text);
        for line in &lines {
            assert!(text_width(line, 10.0) <= 60.0);
        }
    }

    #[test]
    fn wrap_keeps_blank_paragraphs() {
        assert_eq!(wrap_text("", 100.0, 10.0), vec![String::new()]);
        assert_eq!(wrap_text("a\n\nb", 100.0, 10.0), vec!["a", "", "b"]);
    }

    #[test]
    fn escaping_covers_markup_characters() {
        assert_eq!(
            escape_xml(r#"<Fish & "Chips">'"#),
            "&lt;Fish &amp; &quot;Chips&quot;&gt;&apos;"
        );
    }

    #[test]
    fn escaping_drops_control_characters() {
        assert_eq!(escape_xml("Beef\u{1}, salt\u{1b}"), "Beef, salt");
        assert_eq!(escape_xml("a\tb\u{fffe}"), "a\tb");
    }

    #[test]
    fn numbers_have_fixed_precision() {
        assert_eq!(num(1.0 / 3.0), "0.33");
        assert_eq!(num(750.0), "750.00");
    }
}
