use colored::Colorize;
use tset_common::{Diagnostic, DiagnosticCategory, DiagnosticRelatedInformation, Pos};

/// Renders checker diagnostics as `file@pos - error 1004: message` lines.
pub struct Reporter {
    color: bool,
    file: String,
}

impl Reporter {
    pub fn new(color: bool, file: impl Into<String>) -> Self {
        Reporter {
            color,
            file: file.into(),
        }
    }

    pub fn render(&self, diagnostics: &[Diagnostic]) -> String {
        let mut out = String::new();
        for (index, diagnostic) in diagnostics.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            out.push_str(&self.format_diagnostic(diagnostic));
        }
        out
    }

    pub fn format_diagnostic(&self, diagnostic: &Diagnostic) -> String {
        let mut output = self.format_location(diagnostic.start);
        output.push_str(" - ");
        output.push_str(&self.format_category(diagnostic.category));
        output.push(' ');
        output.push_str(&self.format_code(diagnostic.code));
        output.push_str(": ");
        output.push_str(&diagnostic.message_text);

        for related in &diagnostic.related_information {
            output.push('\n');
            output.push_str(&self.format_related(related));
        }
        output
    }

    fn format_related(&self, related: &DiagnosticRelatedInformation) -> String {
        let prefix = if self.color {
            "  Related".dimmed().to_string()
        } else {
            "  Related".to_string()
        };
        format!(
            "{}: {} - {}",
            prefix,
            self.format_location(related.start),
            related.message_text
        )
    }

    fn format_location(&self, pos: Pos) -> String {
        let location = if self.file.is_empty() {
            pos.to_string()
        } else {
            format!("{}{}", self.file, pos)
        };
        if self.color {
            location.cyan().to_string()
        } else {
            location
        }
    }

    fn format_category(&self, category: DiagnosticCategory) -> String {
        let label = match category {
            DiagnosticCategory::Error => "error",
            DiagnosticCategory::Warning => "warning",
            DiagnosticCategory::Message => "message",
        };
        if !self.color {
            return label.to_string();
        }
        match category {
            DiagnosticCategory::Error => label.red().bold().to_string(),
            DiagnosticCategory::Warning => label.yellow().bold().to_string(),
            DiagnosticCategory::Message => label.blue().to_string(),
        }
    }

    fn format_code(&self, code: u32) -> String {
        let text = code.to_string();
        if self.color { text.dimmed().to_string() } else { text }
    }
}
