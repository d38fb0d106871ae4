// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for multilingual food labels.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::LabelError;

/// Marker the source form pre-fills for the production date ("see packaging print").
pub const SEE_PACKAGING_MARKER: &str = "见包装喷码";

/// Output languages a label can be translated into.
///
/// Declaration order is the iteration order of [`TranslatedLabels`] and
/// therefore the order of a batch export.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Language {
    En,
    De,
    Fr,
    It,
}

impl Language {
    pub const ALL: [Language; 4] = [Self::En, Self::De, Self::Fr, Self::It];

    /// Two-letter upper-case code used on the wire and in filenames.
    pub fn code(&self) -> &'static str {
        match self {
            Self::En => "EN",
            Self::De => "DE",
            Self::Fr => "FR",
            Self::It => "IT",
        }
    }

}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EN" => Ok(Self::En),
            "DE" => Ok(Self::De),
            "FR" => Ok(Self::Fr),
            "IT" => Ok(Self::It),
            _ => Err(LabelError::UnknownKey(format!("language '{s}'"))),
        }
    }
}

/// The two physical label formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaperSize {
    /// 10x10 cm ("Z" material).
    #[serde(rename = "10x10cm")]
    Square,
    /// 10x15 cm ("C" material).
    #[serde(rename = "10x15cm")]
    Rectangular,
}

impl PaperSize {
    pub const ALL: [PaperSize; 2] = [Self::Square, Self::Rectangular];

    /// Dimensions in millimetres (width, height).
    ///
    /// The preview aspect ratio and the exported page size both derive from
    /// this one table.
    pub fn dimensions_mm(&self) -> (u32, u32) {
        match self {
            Self::Square => (100, 100),
            Self::Rectangular => (100, 150),
        }
    }

    /// Height divided by width.
    pub fn aspect_ratio(&self) -> f32 {
        let (w, h) = self.dimensions_mm();
        h as f32 / w as f32
    }

    /// Single-letter code embedded in output filenames.
    pub fn size_code(&self) -> char {
        match self {
            Self::Square => 'Z',
            Self::Rectangular => 'C',
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Square => "10x10cm",
            Self::Rectangular => "10x15cm",
        }
    }
}

impl fmt::Display for PaperSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PaperSize {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "10x10" | "10x10cm" | "100x100" | "square" | "z" => Ok(Self::Square),
            "10x15" | "10x15cm" | "100x150" | "rectangular" | "c" => Ok(Self::Rectangular),
            _ => Err(LabelError::UnknownKey(format!("paper size '{s}'"))),
        }
    }
}

// -- Nutrition ------------------------------------------------------------------

/// Nutrition declaration per 100 g/ml. Values stay free text so locale
/// formatting ("1,5") survives translation untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionInfo {
    pub energy_kj: String,
    pub energy_kcal: String,
    pub fat: String,
    pub saturates: String,
    pub carbohydrate: String,
    pub sugars: String,
    pub protein: String,
    pub salt: String,
}

/// Addresses one value inside [`NutritionInfo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NutritionKey {
    EnergyKj,
    EnergyKcal,
    Fat,
    Saturates,
    Carbohydrate,
    Sugars,
    Protein,
    Salt,
}

impl NutritionKey {
    pub const ALL: [NutritionKey; 8] = [
        Self::EnergyKj,
        Self::EnergyKcal,
        Self::Fat,
        Self::Saturates,
        Self::Carbohydrate,
        Self::Sugars,
        Self::Protein,
        Self::Salt,
    ];

    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::EnergyKj => "energyKj",
            Self::EnergyKcal => "energyKcal",
            Self::Fat => "fat",
            Self::Saturates => "saturates",
            Self::Carbohydrate => "carbohydrate",
            Self::Sugars => "sugars",
            Self::Protein => "protein",
            Self::Salt => "salt",
        }
    }
}

impl FromStr for NutritionKey {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.wire_name() == s)
            .ok_or_else(|| LabelError::UnknownKey(format!("nutrition field '{s}'")))
    }
}

impl NutritionInfo {
    fn slot(&mut self, key: NutritionKey) -> &mut String {
        match key {
            NutritionKey::EnergyKj => &mut self.energy_kj,
            NutritionKey::EnergyKcal => &mut self.energy_kcal,
            NutritionKey::Fat => &mut self.fat,
            NutritionKey::Saturates => &mut self.saturates,
            NutritionKey::Carbohydrate => &mut self.carbohydrate,
            NutritionKey::Sugars => &mut self.sugars,
            NutritionKey::Protein => &mut self.protein,
            NutritionKey::Salt => &mut self.salt,
        }
    }

    /// Return a copy with one value replaced.
    pub fn with(&self, key: NutritionKey, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        *next.slot(key) = value.into();
        next
    }
}

// -- Label content --------------------------------------------------------------

/// Everything printed on one label, in one language.
///
/// Every field is required on the wire: a translation payload missing a key
/// fails to deserialise rather than producing a half-filled label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelContent {
    pub product_name: String,
    pub net_weight: String,
    pub ingredients: String,
    pub allergens: String,
    pub storage: String,
    pub shelf_life: String,
    pub production_date: String,
    pub origin: String,
    pub usage: String,
    pub distributor: String,
    pub batch_number: String,
    pub nutrition: NutritionInfo,
}

impl LabelContent {
    /// Content a fresh editing session starts from.
    pub fn initial() -> Self {
        Self {
            production_date: SEE_PACKAGING_MARKER.to_string(),
            ..Self::default()
        }
    }

    fn slot(&mut self, key: ContentKey) -> &mut String {
        match key {
            ContentKey::ProductName => &mut self.product_name,
            ContentKey::NetWeight => &mut self.net_weight,
            ContentKey::Ingredients => &mut self.ingredients,
            ContentKey::Allergens => &mut self.allergens,
            ContentKey::Storage => &mut self.storage,
            ContentKey::ShelfLife => &mut self.shelf_life,
            ContentKey::ProductionDate => &mut self.production_date,
            ContentKey::Origin => &mut self.origin,
            ContentKey::Usage => &mut self.usage,
            ContentKey::Distributor => &mut self.distributor,
            ContentKey::BatchNumber => &mut self.batch_number,
        }
    }

    /// Return a copy with one text field replaced.
    pub fn with(&self, key: ContentKey, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        *next.slot(key) = value.into();
        next
    }

    /// Return a copy with one nutrition value replaced.
    pub fn with_nutrition(&self, key: NutritionKey, value: impl Into<String>) -> Self {
        Self {
            nutrition: self.nutrition.with(key, value),
            ..self.clone()
        }
    }
}

/// Top-level text fields of [`LabelContent`] (everything except nutrition).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKey {
    ProductName,
    NetWeight,
    Ingredients,
    Allergens,
    Storage,
    ShelfLife,
    ProductionDate,
    Origin,
    Usage,
    Distributor,
    BatchNumber,
}

impl ContentKey {
    pub const ALL: [ContentKey; 11] = [
        Self::ProductName,
        Self::NetWeight,
        Self::Ingredients,
        Self::Allergens,
        Self::Storage,
        Self::ShelfLife,
        Self::ProductionDate,
        Self::Origin,
        Self::Usage,
        Self::Distributor,
        Self::BatchNumber,
    ];

    /// The field configuration entry governing this key.
    pub fn field_id(&self) -> FieldId {
        match self {
            Self::ProductName => FieldId::ProductName,
            Self::NetWeight => FieldId::NetWeight,
            Self::Ingredients => FieldId::Ingredients,
            Self::Allergens => FieldId::Allergens,
            Self::Storage => FieldId::Storage,
            Self::ShelfLife => FieldId::ShelfLife,
            Self::ProductionDate => FieldId::ProductionDate,
            Self::Origin => FieldId::Origin,
            Self::Usage => FieldId::Usage,
            Self::Distributor => FieldId::Distributor,
            Self::BatchNumber => FieldId::BatchNumber,
        }
    }

    pub fn wire_name(&self) -> &'static str {
        self.field_id().wire_name()
    }
}

impl FromStr for ContentKey {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.wire_name() == s)
            .ok_or_else(|| LabelError::UnknownKey(format!("content field '{s}'")))
    }
}

// -- Field configuration --------------------------------------------------------

/// Identifier of one configurable label section. Nutrition counts as one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldId {
    ProductName,
    NetWeight,
    Ingredients,
    Allergens,
    Nutrition,
    Storage,
    ShelfLife,
    ProductionDate,
    Origin,
    Distributor,
    Usage,
    BatchNumber,
}

impl FieldId {
    pub const COUNT: usize = 12;

    /// All fields in form order.
    pub const ALL: [FieldId; Self::COUNT] = [
        Self::ProductName,
        Self::NetWeight,
        Self::Ingredients,
        Self::Allergens,
        Self::Nutrition,
        Self::Storage,
        Self::ShelfLife,
        Self::ProductionDate,
        Self::Origin,
        Self::Distributor,
        Self::Usage,
        Self::BatchNumber,
    ];

    /// Position in [`FieldId::ALL`].
    pub fn index(&self) -> usize {
        match self {
            Self::ProductName => 0,
            Self::NetWeight => 1,
            Self::Ingredients => 2,
            Self::Allergens => 3,
            Self::Nutrition => 4,
            Self::Storage => 5,
            Self::ShelfLife => 6,
            Self::ProductionDate => 7,
            Self::Origin => 8,
            Self::Distributor => 9,
            Self::Usage => 10,
            Self::BatchNumber => 11,
        }
    }

    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::ProductName => "productName",
            Self::NetWeight => "netWeight",
            Self::Ingredients => "ingredients",
            Self::Allergens => "allergens",
            Self::Nutrition => "nutrition",
            Self::Storage => "storage",
            Self::ShelfLife => "shelfLife",
            Self::ProductionDate => "productionDate",
            Self::Origin => "origin",
            Self::Distributor => "distributor",
            Self::Usage => "usage",
            Self::BatchNumber => "batchNumber",
        }
    }

    /// Prompt shown next to the input for this field in the source-language form.
    pub fn prompt(&self) -> &'static str {
        match self {
            Self::ProductName => "产品名称 (Product Name)",
            Self::NetWeight => "净含量 (Net Weight)",
            Self::Ingredients => "配料表 (Ingredients)",
            Self::Allergens => "致敏物质 (Allergens)",
            Self::Nutrition => "标准营养成分表 (Nutrition)",
            Self::Storage => "储存方法 (Storage)",
            Self::ShelfLife => "保质期 (Shelf Life)",
            Self::ProductionDate => "生产日期 (Production Date)",
            Self::Origin => "产地 (Origin)",
            Self::Distributor => "制造商/经销商信息 (Manufacturer/Distributor)",
            Self::Usage => "使用方法 (Usage)",
            Self::BatchNumber => "批号 (Batch No.) - 不填则显示见包装",
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for FieldId {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.wire_name() == s)
            .ok_or_else(|| LabelError::UnknownKey(format!("field '{s}'")))
    }
}

/// Enable/require settings for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldConfig {
    pub id: FieldId,
    pub label: String,
    pub enabled: bool,
    pub required: bool,
}

impl FieldConfig {
    /// Factory default for a field.
    pub fn default_for(id: FieldId) -> Self {
        let (enabled, required) = match id {
            FieldId::ProductName | FieldId::NetWeight | FieldId::Ingredients => (true, true),
            FieldId::Allergens
            | FieldId::Nutrition
            | FieldId::Storage
            | FieldId::ShelfLife
            | FieldId::ProductionDate
            | FieldId::Origin => (true, false),
            FieldId::Distributor | FieldId::Usage | FieldId::BatchNumber => (false, false),
        };
        Self {
            id,
            label: id.prompt().to_string(),
            enabled,
            required,
        }
    }
}

/// The complete field configuration: exactly one entry per [`FieldId`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSet {
    fields: [FieldConfig; FieldId::COUNT],
}

impl Default for FieldSet {
    fn default() -> Self {
        Self {
            fields: FieldId::ALL.map(FieldConfig::default_for),
        }
    }
}

impl FieldSet {
    pub fn get(&self, id: FieldId) -> &FieldConfig {
        &self.fields[id.index()]
    }

    /// Whether the layout should include this field's section.
    pub fn is_enabled(&self, id: FieldId) -> bool {
        self.get(id).enabled
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldConfig> {
        self.fields.iter()
    }

    /// Return a copy with one field toggled.
    ///
    /// Required fields can never be disabled; enabling them is a no-op.
    pub fn with_enabled(&self, id: FieldId, enabled: bool) -> Result<Self, LabelError> {
        let current = self.get(id);
        if current.required && !enabled {
            return Err(LabelError::RequiredField(id));
        }
        let mut next = self.clone();
        next.fields[id.index()].enabled = enabled;
        Ok(next)
    }
}

// -- Translations ---------------------------------------------------------------

/// Translated label content per language.
///
/// Produced whole by the translation service and swapped in as one value; a
/// language absent from the map simply has no translation yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslatedLabels(Arc<BTreeMap<Language, LabelContent>>);

impl TranslatedLabels {
    pub fn new(map: BTreeMap<Language, LabelContent>) -> Self {
        Self(Arc::new(map))
    }

    pub fn get(&self, language: Language) -> Option<&LabelContent> {
        self.0.get(&language)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Languages with a translation, in export order.
    pub fn languages(&self) -> Vec<Language> {
        self.0.keys().copied().collect()
    }

    /// Content to display for `language`: the translation when present,
    /// otherwise the source content.
    pub fn content_for<'a>(
        &'a self,
        language: Language,
        source: &'a LabelContent,
    ) -> &'a LabelContent {
        self.0.get(&language).unwrap_or(source)
    }
}

impl Serialize for TranslatedLabels {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.as_ref().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paper_sizes_match_physical_formats() {
        assert_eq!(PaperSize::Square.dimensions_mm(), (100, 100));
        assert_eq!(PaperSize::Rectangular.dimensions_mm(), (100, 150));
        assert_eq!(PaperSize::Square.aspect_ratio(), 1.0);
        assert_eq!(PaperSize::Rectangular.aspect_ratio(), 1.5);
        assert_eq!(PaperSize::Square.size_code(), 'Z');
        assert_eq!(PaperSize::Rectangular.size_code(), 'C');
    }

    #[test]
    fn paper_size_parses_codes_and_labels() {
        assert_eq!("10x15cm".parse::<PaperSize>().unwrap(), PaperSize::Rectangular);
        assert_eq!("Z".parse::<PaperSize>().unwrap(), PaperSize::Square);
        assert!("A4".parse::<PaperSize>().is_err());
    }

    #[test]
    fn label_content_uses_camel_case_wire_names() {
        let content = LabelContent::initial().with(ContentKey::ShelfLife, "12 months");
        let json = serde_json::to_value(&content).unwrap();
        assert_eq!(json["shelfLife"], "12 months");
        assert_eq!(json["productionDate"], SEE_PACKAGING_MARKER);
        assert_eq!(json["nutrition"]["energyKj"], "");
    }

    #[test]
    fn label_content_rejects_missing_keys() {
        let partial = r#"{"productName": "Tea"}"#;
        assert!(serde_json::from_str::<LabelContent>(partial).is_err());
    }

    #[test]
    fn every_content_key_has_a_field() {
        for key in ContentKey::ALL {
            assert_eq!(key.wire_name().parse::<ContentKey>().unwrap(), key);
            assert_ne!(key.field_id(), FieldId::Nutrition);
        }
        for key in NutritionKey::ALL {
            assert_eq!(key.wire_name().parse::<NutritionKey>().unwrap(), key);
        }
    }

    #[test]
    fn field_index_matches_declaration_order() {
        for (position, id) in FieldId::ALL.into_iter().enumerate() {
            assert_eq!(id.index(), position);
        }
    }

    #[test]
    fn required_fields_start_enabled_and_stay_enabled() {
        let fields = FieldSet::default();
        for config in fields.iter() {
            if config.required {
                assert!(config.enabled, "{} must start enabled", config.id);
                assert!(matches!(
                    fields.with_enabled(config.id, false),
                    Err(LabelError::RequiredField(id)) if id == config.id
                ));
            }
        }
        assert!(!fields.is_enabled(FieldId::BatchNumber));
        assert!(fields.is_enabled(FieldId::Nutrition));
    }

    #[test]
    fn translations_fall_back_to_source() {
        let source = LabelContent::initial().with(ContentKey::ProductName, "牛肉干");
        let mut map = BTreeMap::new();
        map.insert(
            Language::De,
            source.with(ContentKey::ProductName, "Rindfleisch-Jerky"),
        );
        let translations = TranslatedLabels::new(map);

        assert_eq!(
            translations.content_for(Language::De, &source).product_name,
            "Rindfleisch-Jerky"
        );
        assert_eq!(
            translations.content_for(Language::Fr, &source).product_name,
            "牛肉干"
        );
    }

    #[test]
    fn translations_iterate_in_language_order() {
        let mut map = BTreeMap::new();
        map.insert(Language::It, LabelContent::default());
        map.insert(Language::En, LabelContent::default());
        map.insert(Language::Fr, LabelContent::default());
        let translations = TranslatedLabels::new(map);
        assert_eq!(
            translations.languages(),
            vec![Language::En, Language::Fr, Language::It]
        );
    }
}
