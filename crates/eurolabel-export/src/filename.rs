// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Output filenames: `{name}-{LANG}-{Z|C}.pdf`.

use eurolabel_core::{Language, PaperSize};

/// Used when nothing of the product name survives sanitising.
pub const FALLBACK_NAME: &str = "Label";

/// Keep ASCII letters, digits and CJK unified ideographs; drop everything else.
pub fn sanitize_product_name(name: &str) -> String {
    let clean: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || ('\u{4E00}'..='\u{9FA5}').contains(c))
        .collect();
    if clean.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        clean
    }
}

/// Filename for one exported label. `product_name` is the source-language
/// name, so every language of a batch shares the same stem.
pub fn output_filename(product_name: &str, language: Language, size: PaperSize) -> String {
    format!(
        "{}-{}-{}.pdf",
        sanitize_product_name(product_name),
        language.code(),
        size.size_code()
    )
}
