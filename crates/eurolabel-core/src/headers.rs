// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Fixed per-language captions printed on every label, independent of the
// user's content.

use crate::types::Language;

/// Section captions for one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelHeaders {
    pub ingredients: &'static str,
    pub allergens: &'static str,
    pub nutrition_title: &'static str,
    pub energy: &'static str,
    pub fat: &'static str,
    pub saturates: &'static str,
    pub carbohydrate: &'static str,
    pub sugars: &'static str,
    pub protein: &'static str,
    pub salt: &'static str,
    pub storage: &'static str,
    pub origin: &'static str,
    pub best_before: &'static str,
    pub production_date: &'static str,
    pub usage: &'static str,
    pub net_weight: &'static str,
    pub distributor: &'static str,
    /// Footer shown when no batch code is printed on the label itself.
    pub batch_note: &'static str,
}

static EN: LabelHeaders = LabelHeaders {
    ingredients: "Ingredients:",
    allergens: "Allergy Advice:",
    nutrition_title: "Nutrition Information (per 100g/ml)",
    energy: "Energy",
    fat: "Fat",
    saturates: "of which saturates",
    carbohydrate: "Carbohydrate",
    sugars: "of which sugars",
    protein: "Protein",
    salt: "Salt",
    storage: "Storage:",
    origin: "Origin:",
    best_before: "Best Before:",
    production_date: "Production Date:",
    usage: "Usage:",
    net_weight: "Net Weight:",
    distributor: "Manufactured for / Imported by:",
    batch_note: "CHECK PACKAGING FOR BATCH CODE",
};

static DE: LabelHeaders = LabelHeaders {
    ingredients: "Zutaten:",
    allergens: "Allergiehinweis:",
    nutrition_title: "Nährwertangaben (pro 100g/ml)",
    energy: "Energie",
    fat: "Fett",
    saturates: "davon gesättigte Fettsäuren",
    carbohydrate: "Kohlenhydrate",
    sugars: "davon Zucker",
    protein: "Eiweiß",
    salt: "Salz",
    storage: "Lagerung:",
    origin: "Herkunft:",
    best_before: "Mindestens haltbar bis:",
    production_date: "Herstellungsdatum:",
    usage: "Verwendung:",
    net_weight: "Nettofüllmenge:",
    distributor: "Hergestellt für / Importiert durch:",
    batch_note: "SIEHE VERPACKUNG FÜR CHARGENCODE",
};

static FR: LabelHeaders = LabelHeaders {
    ingredients: "Ingrédients:",
    allergens: "Allergènes:",
    nutrition_title: "Valeurs nutritionnelles (pour 100g/ml)",
    energy: "Énergie",
    fat: "Matières grasses",
    saturates: "dont acides gras saturés",
    carbohydrate: "Glucides",
    sugars: "dont sucres",
    protein: "Protéines",
    salt: "Sel",
    storage: "Conservation:",
    origin: "Origine:",
    best_before: "À consommer de préférence avant le:",
    production_date: "Date de fabrication:",
    usage: "Utilisation:",
    net_weight: "Poids net:",
    distributor: "Fabriqué pour / Importé par:",
    batch_note: "VOIR L'EMBALLAGE POUR LE CODE DU LOT",
};

static IT: LabelHeaders = LabelHeaders {
    ingredients: "Ingredienti:",
    allergens: "Allergeni:",
    nutrition_title: "Valori nutrizionali (per 100g/ml)",
    energy: "Energia",
    fat: "Grassi",
    saturates: "di cui acidi grassi saturi",
    carbohydrate: "Carboidrati",
    sugars: "di cui zuccheri",
    protein: "Proteine",
    salt: "Sale",
    storage: "Conservazione:",
    origin: "Origine:",
    best_before: "Da consumarsi preferibilmente entro:",
    production_date: "Data di produzione:",
    usage: "Uso:",
    net_weight: "Peso netto:",
    distributor: "Prodotto per / Importato da:",
    batch_note: "VEDI CONFEZIONE PER IL CODICE LOTTO",
};

/// Captions for `language`.
pub fn headers_for(language: Language) -> &'static LabelHeaders {
    match language {
        Language::En => &EN,
        Language::De => &DE,
        Language::Fr => &FR,
        Language::It => &IT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_language_has_every_caption() {
        for language in Language::ALL {
            let h = headers_for(language);
            let captions = [
                h.ingredients,
                h.allergens,
                h.nutrition_title,
                h.energy,
                h.fat,
                h.saturates,
                h.carbohydrate,
                h.sugars,
                h.protein,
                h.salt,
                h.storage,
                h.origin,
                h.best_before,
                h.production_date,
                h.usage,
                h.net_weight,
                h.distributor,
                h.batch_note,
            ];
            for caption in captions {
                assert!(!caption.trim().is_empty(), "{language} has an empty caption");
            }
        }
    }

    #[test]
    fn batch_notes_differ_per_language() {
        assert_eq!(
            headers_for(Language::En).batch_note,
            "CHECK PACKAGING FOR BATCH CODE"
        );
        assert_ne!(
            headers_for(Language::De).batch_note,
            headers_for(Language::Fr).batch_note
        );
    }
}
