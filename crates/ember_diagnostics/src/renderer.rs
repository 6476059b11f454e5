//! Human-readable rendering of diagnostics.

use crate::diagnostic::{Diagnostic, LabelStyle};
use crate::severity::Severity;
use ember_source::SourceDb;

/// Renders diagnostics in a rustc-like layout:
///
/// ```text
/// error[E301]: cannot synthesize division: (a / b)
///   --> rtl/top.v:4:12
///    |
///  4 | assign y = a / b;
///    |            ^^^^^
///    = note: ...
/// ```
pub struct TerminalRenderer {
    /// Emit ANSI colors for the severity header.
    pub color: bool,
}

impl TerminalRenderer {
    /// Creates a renderer.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Renders one diagnostic.
    pub fn render(&self, diag: &Diagnostic, sources: &SourceDb) -> String {
        let mut out = format!(
            "{}[{}]: {}\n",
            self.paint(diag.severity),
            diag.code,
            diag.message
        );

        let span = diag.primary_span;
        if let (Some(loc), Some(file)) = (sources.locate(span), sources.file(span.file)) {
            let gutter = " ".repeat(loc.line.to_string().len());
            out.push_str(&format!("{gutter}--> {loc}\n"));
            out.push_str(&format!("{gutter} |\n"));
            out.push_str(&format!("{} | {}\n", loc.line, file.line_text(loc.line)));
            let label = diag
                .labels
                .iter()
                .find(|l| l.style == LabelStyle::Primary)
                .map(|l| format!(" {}", l.message))
                .unwrap_or_default();
            out.push_str(&format!(
                "{gutter} | {}{}{label}\n",
                " ".repeat(loc.column as usize - 1),
                "^".repeat(span.len().max(1) as usize)
            ));
        }

        for note in &diag.notes {
            out.push_str(&format!("   = note: {note}\n"));
        }
        out
    }

    /// Renders every diagnostic, separated by blank lines.
    pub fn render_all(&self, diags: &[Diagnostic], sources: &SourceDb) -> String {
        diags
            .iter()
            .map(|d| self.render(d, sources))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn paint(&self, severity: Severity) -> String {
        if !self.color {
            return severity.to_string();
        }
        let ansi = match severity {
            Severity::Error => "31",
            Severity::Warning => "33",
            Severity::Note => "36",
        };
        format!("\x1b[1;{ansi}m{severity}\x1b[0m")
    }
}
