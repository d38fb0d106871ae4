// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for label operators.
//
// Every technical error is mapped to a plain message with a suggestion. None
// of these are fatal: the session stays usable after any of them.

use crate::error::LabelError;

/// Category of an error from the operator's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Something is missing from the setup (e.g. API key).
    Configuration,
    /// An external service failed; retrying later may help.
    ServiceFailure,
    /// Rendering or file generation failed for one label.
    CaptureFailure,
    /// The operation was requested before its inputs exist.
    Precondition,
    /// The request itself was malformed.
    InvalidInput,
}

/// A human-readable error with message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Short summary.
    pub message: String,
    /// What the operator should try.
    pub suggestion: String,
    pub severity: Severity,
}

/// Convert a `LabelError` into a `HumanError`.
pub fn humanize_error(err: &LabelError) -> HumanError {
    match err {
        LabelError::MissingCredential(var) => HumanError {
            message: "Translation is not set up.".into(),
            suggestion: format!("Configure the API key in the {var} environment variable first."),
            severity: Severity::Configuration,
        },

        LabelError::Translation(_) | LabelError::Http(_) => HumanError {
            message: "Translation failed.".into(),
            suggestion: "Please try again. Previous translations were kept.".into(),
            severity: Severity::ServiceFailure,
        },

        LabelError::RequiredField(id) => HumanError {
            message: format!("\"{}\" is a required field.", id.prompt()),
            suggestion: "Required fields are always printed and cannot be switched off.".into(),
            severity: Severity::InvalidInput,
        },

        LabelError::UnknownKey(detail) => HumanError {
            message: format!("Unknown {detail}."),
            suggestion: "Check the spelling against the supported field names.".into(),
            severity: Severity::InvalidInput,
        },

        LabelError::RenderInterrupted { language } => HumanError {
            message: format!("The {language} preview did not finish rendering."),
            suggestion: "Try exporting that language again.".into(),
            severity: Severity::CaptureFailure,
        },

        LabelError::Capture { language, .. } => HumanError {
            message: format!("Could not capture the {language} label."),
            suggestion: "Check that fonts are installed, then export that language again.".into(),
            severity: Severity::CaptureFailure,
        },

        LabelError::PdfError(_) | LabelError::ImageError(_) => HumanError {
            message: "Could not build the PDF.".into(),
            suggestion: "Try exporting again. If it keeps failing, try the other paper size.".into(),
            severity: Severity::CaptureFailure,
        },

        LabelError::Io(io_err) => HumanError {
            message: "Could not save the file.".into(),
            suggestion: format!("Check the output folder exists and is writable. ({io_err})"),
            severity: Severity::CaptureFailure,
        },

        LabelError::NoTranslations => HumanError {
            message: "Nothing to export yet.".into(),
            suggestion: "Translate the content first, then download all languages.".into(),
            severity: Severity::Precondition,
        },

        LabelError::ExportInProgress => HumanError {
            message: "An export is already running.".into(),
            suggestion: "Wait for it to finish before starting another.".into(),
            severity: Severity::Precondition,
        },

        LabelError::Serialization(_) => HumanError {
            message: "The label data could not be read.".into(),
            suggestion: "Check the input file is valid JSON with the expected field names.".into(),
            severity: Severity::InvalidInput,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FieldId, Language};

    #[test]
    fn missing_key_is_configuration() {
        let human = humanize_error(&LabelError::MissingCredential("API_KEY".into()));
        assert_eq!(human.severity, Severity::Configuration);
        assert!(human.suggestion.contains("API_KEY"));
    }

    #[test]
    fn translation_failure_keeps_previous_results() {
        let human = humanize_error(&LabelError::Translation("no response".into()));
        assert_eq!(human.severity, Severity::ServiceFailure);
        assert!(human.suggestion.contains("kept"));
    }

    #[test]
    fn capture_failure_names_language() {
        let human = humanize_error(&LabelError::Capture {
            language: Language::De,
            detail: "font missing".into(),
        });
        assert_eq!(human.severity, Severity::CaptureFailure);
        assert!(human.message.contains("DE"));
    }

    #[test]
    fn empty_batch_is_precondition() {
        let human = humanize_error(&LabelError::NoTranslations);
        assert_eq!(human.severity, Severity::Precondition);
    }

    #[test]
    fn required_field_uses_prompt() {
        let human = humanize_error(&LabelError::RequiredField(FieldId::NetWeight));
        assert!(human.message.contains("Net Weight"));
    }
}
