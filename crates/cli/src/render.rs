//! Pretty diagnostic rendering using ariadne.
//!
//! Converts a [`Diagnostic`] into an ariadne [`Report`] for coloured,
//! source-annotated terminal output. Falls back to structured JSON when the
//! output is piped or when the user explicitly requests it.

use std::io::{self, IsTerminal};

use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use f10cfg_core::{ConfigError, LineIndex};
use f10cfg_diagnostics::{Diagnostic, Severity};

// ── Output format ───────────────────────────────────────────────────────

/// Output format for results and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Format {
    /// Coloured, source-annotated output (ariadne).
    Pretty,
    /// Machine-readable JSON.
    Json,
}

impl Format {
    /// Use the explicit choice, else pretty on a TTY and JSON otherwise.
    pub(crate) fn resolve_or_detect(explicit: Option<&str>) -> Self {
        match explicit {
            Some("json") => Format::Json,
            Some("pretty") => Format::Pretty,
            _ => {
                if io::stdout().is_terminal() {
                    Format::Pretty
                } else {
                    Format::Json
                }
            }
        }
    }
}

// ── Severity mapping ────────────────────────────────────────────────────

fn report_kind(severity: &Severity) -> ReportKind<'static> {
    match severity {
        Severity::Error => ReportKind::Error,
        _ => ReportKind::Warning,
    }
}

fn severity_color(severity: &Severity) -> Color {
    match severity {
        Severity::Error => Color::Red,
        _ => Color::White,
    }
}

// ── Pretty rendering ────────────────────────────────────────────────────

/// Render one diagnostic to stderr.
///
/// A diagnostic with a span is drawn against its source line; one without
/// (a truncated file, a failed source) is printed as a standalone message.
pub(crate) fn render_diagnostic_pretty(source: &str, filename: &str, diag: &Diagnostic) {
    let Some(span) = &diag.span else {
        eprintln!("{}[{}]: {}", diag.severity, diag.id, diag.message);
        for note in &diag.notes {
            eprintln!("  = note: {note}");
        }
        if let Some(explanation) = diag.explain() {
            eprintln!("  = help: {explanation}");
        }
        return;
    };

    // Clamp span to source length to avoid panics on truncated input.
    let start = span.start.min(source.len());
    let end = span.end.min(source.len()).max(start);

    let mut builder = Report::build(report_kind(&diag.severity), (filename, start..end))
        .with_code(diag.id.as_ref())
        .with_message(&diag.message)
        .with_config(Config::default().with_compact(false))
        .with_label(
            Label::new((filename, start..end))
                .with_message(make_label_message(diag))
                .with_color(severity_color(&diag.severity)),
        );
    for note in &diag.notes {
        builder = builder.with_note(note);
    }
    if let Some(explanation) = diag.explain() {
        builder = builder.with_help(explanation);
    }
    let mut cache = (filename, Source::from(source));
    builder.finish().eprint(&mut cache).ok();
}

/// Label text from the diagnostic context, else the message itself.
fn make_label_message(diag: &Diagnostic) -> String {
    match &diag.context {
        Some(ctx) if !ctx.is_empty() => ctx
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(", "),
        _ => diag.message.clone(),
    }
}

// ── Failure reporting ───────────────────────────────────────────────────

/// Report a rejected configuration.
///
/// - `Pretty` → ariadne report on stderr.
/// - `Json`   → `{ "ok": false, "diagnostic": ..., "chain": [...] }` on stdout.
pub(crate) fn report_config_error(source: &str, filename: &str, err: &ConfigError, format: Format) {
    let index = LineIndex::new(source);
    let diag = err.to_diagnostic(Some(&index));
    match format {
        Format::Pretty => render_diagnostic_pretty(source, filename, &diag),
        Format::Json => {
            let out = serde_json::json!({
                "ok": false,
                "diagnostic": diag,
                "chain": err.chain(),
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&out).expect("error JSON serialization cannot fail")
            );
        }
    }
}
