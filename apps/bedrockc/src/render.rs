//! Diagnostic rendering: header, line preview, and caret underline, with an
//! ANSI accent color per severity when the output stream supports it.

use bedrock_hir::Context;
use bedrock_token::{Diagnostic, Severity};
use owo_colors::OwoColorize;
use std::io::Write;

/// Long lines are windowed in fixed chunks so the printed preview never
/// grows wider than a terminal column, while still containing the span.
const CHUNK_WIDTH: usize = 32;

fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
        Severity::Note => "note",
    }
}

fn paint(text: &str, severity: Severity, color: bool) -> String {
    if !color {
        return text.to_string();
    }
    match severity {
        Severity::Error => text.red().bold().to_string(),
        Severity::Warning => text.yellow().bold().to_string(),
        Severity::Note => text.cyan().to_string(),
    }
}

/// Renders every diagnostic in `ctx`, grouped by file in file-registration
/// order, followed by a per-file "N error(s) generated" summary line.
pub fn render_all(ctx: &Context, out: &mut impl Write, color: bool) -> std::io::Result<()> {
    for file_id in ctx.file_ids() {
        let path = ctx.path_of(file_id).to_string();
        let file_diagnostics: Vec<&Diagnostic> =
            ctx.diagnostics.iter().filter(|d| d.file == file_id).collect();
        for d in &file_diagnostics {
            render_one(ctx, &path, d, out, color)?;
        }
        let errors = file_diagnostics.iter().filter(|d| d.severity == Severity::Error).count();
        writeln!(out, "{path}: {errors} error(s) generated.")?;
    }
    Ok(())
}

fn render_one(
    ctx: &Context,
    path: &str,
    d: &Diagnostic,
    out: &mut impl Write,
    color: bool,
) -> std::io::Result<()> {
    let source = ctx.sources.get(d.file);
    let (line, col) = source.line_col(d.span.start);
    let label = paint(severity_label(d.severity), d.severity, color);
    writeln!(out, "'{path}': at (line {}, col {}): {label}: {}", line + 1, col + 1, d.message())?;

    let line_text = source.line_text(d.span.start);
    let span_len = d.span.end.saturating_sub(d.span.start).max(1);
    let chunk = col / CHUNK_WIDTH;
    let window_start = chunk * CHUNK_WIDTH;
    let window_end = (window_start + CHUNK_WIDTH).min(line_text.len());
    let window = if window_start < line_text.len() { &line_text[window_start..window_end] } else { "" };
    let underline_col = col - window_start;

    writeln!(out, "  {window}")?;
    let underline: String = " ".repeat(underline_col) + &"^".repeat(span_len);
    writeln!(out, "  {}", paint(&underline, d.severity, color))?;

    if let Some(expected) = d.expected {
        writeln!(out, "  expected: '{}'", bedrock_token::kind_name(expected))?;
    }

    if let Some(next) = d.next {
        let note = ctx.diagnostics.iter().nth(next).expect("chained diagnostic index is always valid");
        render_one(ctx, path, note, out, color)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_labels_match_conventional_names() {
        assert_eq!(severity_label(Severity::Error), "error");
        assert_eq!(severity_label(Severity::Note), "note");
    }

    #[test]
    fn paint_without_color_returns_plain_text() {
        assert_eq!(paint("error", Severity::Error, false), "error");
    }
}
