//! Diagnostic types and message lookup for the interface checker.
//!
//! Message templates live in `data.rs` and use `{0}`, `{1}`, ... placeholders.

use crate::span::Pos;
use serde::Serialize;

mod data;
pub use data::{DIAGNOSTIC_MESSAGES, diagnostic_codes};

// =============================================================================
// Diagnostic Types
// =============================================================================

/// Diagnostic category.
///
/// `Warning` is used for soft errors: they are reported but do not make the
/// compilation unit fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticCategory {
    Warning = 0,
    Error = 1,
    Message = 3,
}

/// Related information for a diagnostic (e.g. "other declaration of M").
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DiagnosticRelatedInformation {
    pub start: Pos,
    pub message_text: String,
    pub category: DiagnosticCategory,
    pub code: u32,
}

/// A checker diagnostic with optional related information.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub start: Pos,
    pub message_text: String,
    pub category: DiagnosticCategory,
    pub code: u32,
    /// Related positions (e.g., the first declaration of a duplicate)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub related_information: Vec<DiagnosticRelatedInformation>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    #[must_use]
    pub const fn error(start: Pos, message: String, code: u32) -> Self {
        Self {
            start,
            message_text: message,
            category: DiagnosticCategory::Error,
            code,
            related_information: Vec::new(),
        }
    }

    /// Create a new soft (warning) diagnostic.
    #[must_use]
    pub const fn warning(start: Pos, message: String, code: u32) -> Self {
        Self {
            start,
            message_text: message,
            category: DiagnosticCategory::Warning,
            code,
            related_information: Vec::new(),
        }
    }

    /// Build a diagnostic from the message table, filling in `args`.
    ///
    /// The category comes from the table entry.
    #[must_use]
    pub fn from_code(start: Pos, code: u32, args: &[&str]) -> Self {
        let (category, template) = match get_diagnostic_message(code) {
            Some(m) => (m.category, m.message),
            None => (DiagnosticCategory::Error, "{0}"),
        };
        Self {
            start,
            message_text: format_message(template, args),
            category,
            code,
            related_information: Vec::new(),
        }
    }

    /// Add related information to this diagnostic.
    #[must_use]
    pub fn with_related(mut self, start: Pos, code: u32, args: &[&str]) -> Self {
        let template = get_message_template(code).unwrap_or("{0}");
        self.related_information.push(DiagnosticRelatedInformation {
            start,
            message_text: format_message(template, args),
            category: DiagnosticCategory::Message,
            code,
        });
        self
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }
}

/// Format a diagnostic message by replacing {0}, {1}, etc. with arguments.
#[must_use]
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

/// A diagnostic message definition with code, category, and message template.
#[derive(Clone, Copy, Debug)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

/// Look up a diagnostic message definition by code.
#[must_use]
pub fn get_diagnostic_message(code: u32) -> Option<&'static DiagnosticMessage> {
    DIAGNOSTIC_MESSAGES.iter().find(|m| m.code == code)
}

/// Get the message template for a diagnostic code.
#[must_use]
pub fn get_message_template(code: u32) -> Option<&'static str> {
    get_diagnostic_message(code).map(|m| m.message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_code_fills_placeholders() {
        let d = Diagnostic::from_code(Pos::new(4), diagnostic_codes::DUPLICATE_METHOD, &["M"]);
        assert_eq!(d.message_text, "duplicate method M");
        assert!(d.is_error());
    }

    #[test]
    fn legacy_type_list_is_a_warning() {
        let d = Diagnostic::from_code(Pos::new(0), diagnostic_codes::LEGACY_TYPE_LIST, &[]);
        assert_eq!(d.category, DiagnosticCategory::Warning);
        assert!(!d.is_error());
    }

    #[test]
    fn related_information_uses_message_category() {
        let d = Diagnostic::from_code(Pos::new(10), diagnostic_codes::DUPLICATE_METHOD, &["M"])
            .with_related(Pos::new(2), diagnostic_codes::OTHER_DECLARATION, &["M"]);
        assert_eq!(d.related_information.len(), 1);
        let related = &d.related_information[0];
        assert_eq!(related.start, Pos::new(2));
        assert_eq!(related.message_text, "other declaration of M");
        assert_eq!(related.category, DiagnosticCategory::Message);
    }

    #[test]
    fn codes_are_unique() {
        for (i, a) in DIAGNOSTIC_MESSAGES.iter().enumerate() {
            for b in &DIAGNOSTIC_MESSAGES[i + 1..] {
                assert_ne!(a.code, b.code, "duplicate code {}", a.code);
            }
        }
    }
}
