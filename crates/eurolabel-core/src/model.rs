// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Editable label model. Every edit builds a new value and swaps the shared
// pointer, so snapshots handed to layout or export never change underneath
// their readers.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::Result;
use crate::types::{ContentKey, FieldId, FieldSet, LabelContent, NutritionKey};

/// Immutable view of the label at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSnapshot {
    pub content: Arc<LabelContent>,
    pub fields: Arc<FieldSet>,
}

/// Source-language label content plus field configuration.
#[derive(Debug, Clone)]
pub struct LabelModel {
    content: Arc<LabelContent>,
    fields: Arc<FieldSet>,
}

impl Default for LabelModel {
    fn default() -> Self {
        Self::new()
    }
}

impl LabelModel {
    /// Start an editing session from the initial content and default fields.
    pub fn new() -> Self {
        Self {
            content: Arc::new(LabelContent::initial()),
            fields: Arc::new(FieldSet::default()),
        }
    }

    pub fn content(&self) -> &LabelContent {
        &self.content
    }

    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    pub fn snapshot(&self) -> LabelSnapshot {
        LabelSnapshot {
            content: Arc::clone(&self.content),
            fields: Arc::clone(&self.fields),
        }
    }

    /// Replace a top-level text field. Any text is accepted, including "".
    pub fn set_field(&mut self, key: ContentKey, value: impl Into<String>) {
        let value = value.into();
        debug!(field = key.wire_name(), len = value.len(), "set field");
        self.content = Arc::new(self.content.with(key, value));
    }

    /// Replace one nutrition value.
    pub fn set_nutrition_field(&mut self, key: NutritionKey, value: impl Into<String>) {
        let value = value.into();
        debug!(field = key.wire_name(), len = value.len(), "set nutrition field");
        self.content = Arc::new(self.content.with_nutrition(key, value));
    }

    /// Toggle a field's section on the label.
    ///
    /// Fails with [`crate::LabelError::RequiredField`] when asked to disable a
    /// required field; the model is left unchanged.
    pub fn set_field_enabled(&mut self, id: FieldId, enabled: bool) -> Result<()> {
        match self.fields.with_enabled(id, enabled) {
            Ok(next) => {
                debug!(field = %id, enabled, "set field enabled");
                self.fields = Arc::new(next);
                Ok(())
            }
            Err(err) => {
                warn!(field = %id, "refusing to disable required field");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LabelError;
    use crate::types::SEE_PACKAGING_MARKER;

    #[test]
    fn new_model_starts_from_initial_content() {
        let model = LabelModel::new();
        assert_eq!(model.content().product_name, "");
        assert_eq!(model.content().production_date, SEE_PACKAGING_MARKER);
        assert_eq!(model.fields(), &FieldSet::default());
    }

    #[test]
    fn snapshots_are_unaffected_by_later_edits() {
        let mut model = LabelModel::new();
        model.set_field(ContentKey::ProductName, "牛肉干");
        let before = model.snapshot();

        model.set_field(ContentKey::ProductName, "Beef Jerky");
        model.set_nutrition_field(NutritionKey::Salt, "2,1");
        model.set_field_enabled(FieldId::Usage, true).unwrap();

        assert_eq!(before.content.product_name, "牛肉干");
        assert_eq!(before.content.nutrition.salt, "");
        assert!(!before.fields.is_enabled(FieldId::Usage));

        let after = model.snapshot();
        assert_eq!(after.content.product_name, "Beef Jerky");
        assert_eq!(after.content.nutrition.salt, "2,1");
        assert!(after.fields.is_enabled(FieldId::Usage));
    }

    #[test]
    fn empty_values_are_accepted() {
        let mut model = LabelModel::new();
        model.set_field(ContentKey::ProductionDate, "");
        assert_eq!(model.content().production_date, "");
    }

    #[test]
    fn disabling_required_field_is_rejected_without_change() {
        let mut model = LabelModel::new();
        let before = model.snapshot();
        let result = model.set_field_enabled(FieldId::Ingredients, false);
        assert!(matches!(
            result,
            Err(LabelError::RequiredField(FieldId::Ingredients))
        ));
        assert_eq!(model.snapshot(), before);
    }
}
