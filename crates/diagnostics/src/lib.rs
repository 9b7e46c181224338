//! Diagnostics for the Force10 configuration parser.
//!
//! Provides [`Diagnostic`], [`Severity`], [`Span`], and [`LineIndex`] types
//! used to report configuration failures. Diagnostic codes are defined in the
//! [`codes`] module and described by [`explain`].

#![warn(missing_docs)]

/// Diagnostic ID constants.
pub mod codes;

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;

// ── LineIndex ────────────────────────────────────────────────────────────

/// Maps between byte offsets and line numbers of a source string.
///
/// Lines are **1-indexed**, matching the line numbers the lexer records on
/// parse nodes.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Byte offset of the start of each line. `line_starts[0]` is always 0.
    line_starts: Vec<usize>,
    /// Total length of the indexed text.
    len: usize,
}

impl LineIndex {
    /// Build a `LineIndex` from source text.
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0usize];
        for (i, b) in text.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self {
            line_starts,
            len: text.len(),
        }
    }

    fn line_start(&self, idx: usize) -> Option<usize> {
        self.line_starts.get(idx).copied()
    }

    /// Byte span of a 1-indexed line, excluding its line terminator.
    ///
    /// Returns `None` for line 0 or a line past the end of the source.
    pub fn line_span(&self, line: usize) -> Option<Span> {
        let idx = line.checked_sub(1)?;
        let start = self.line_start(idx)?;
        let end = match self.line_start(idx + 1) {
            Some(next) => next.saturating_sub(1),
            None => self.len,
        };
        Some(Span::new(start, end.max(start)))
    }
}

/// Severity level for a diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum Severity {
    /// Hard error: the configuration was rejected.
    Error,
}

/// Byte span in the source input.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Span {
    /// Byte offset of the first character (0-based).
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
}

impl Span {
    /// Create a span covering `[start, end)`.
    ///
    /// Panics if `end < start`.
    pub fn new(start: usize, end: usize) -> Self {
        assert!(end >= start, "Span end ({end}) < start ({start})");
        Self { start, end }
    }
}

/// A diagnostic produced while parsing a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Unique diagnostic code (e.g., `"FTOS1001"`).
    pub id: Cow<'static, str>,
    /// Severity level.
    pub severity: Severity,
    /// Human-readable diagnostic message.
    pub message: String,
    /// Byte span of the offending line, when it could be located.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
    /// 1-based source line of the offending directive, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    /// Machine-readable context for tooling.
    ///
    /// Uses `BTreeMap` for deterministic key ordering in serialized output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<BTreeMap<String, String>>,
    /// Enclosing sections, innermost first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

impl Diagnostic {
    /// Create a diagnostic with the given fields.
    pub fn new(
        id: impl Into<Cow<'static, str>>,
        severity: Severity,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self {
            id: id.into(),
            severity,
            message: message.into(),
            span,
            line: None,
            context: None,
            notes: Vec::new(),
        }
    }

    /// Shorthand for an `Error` diagnostic.
    pub fn error(
        id: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self::new(id, Severity::Error, message, span)
    }

    /// Record the 1-based source line (builder pattern).
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Attach machine-readable context metadata (builder pattern).
    pub fn with_context(mut self, ctx: BTreeMap<String, String>) -> Self {
        self.context = Some(ctx);
        self
    }

    /// Attach the enclosing-section notes (builder pattern).
    pub fn with_notes(mut self, notes: Vec<String>) -> Self {
        self.notes = notes;
        self
    }

    /// Returns the human-readable explanation for this diagnostic's code, if available.
    pub fn explain(&self) -> Option<&'static str> {
        explain(&self.id)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.id, self.message)
    }
}

/// Returns the human-readable explanation for a diagnostic code, if known.
pub fn explain(id: &str) -> Option<&'static str> {
    match id {
        "FTOS1001" => Some(
            "No directive in the current section matches this line. Sections are matched \
             word by word against a fixed table; the first matching entry wins.",
        ),
        "FTOS1002" => Some(
            "This directive does not accept a leading `no`. Only directives with a defined \
             reset, disable, or removal meaning can be negated.",
        ),
        "FTOS1003" => Some(
            "This directive does not open a section, but indented lines follow it. Check the \
             indentation of the following lines.",
        ),
        "FTOS1101" => Some(
            "The directive was recognised but has the wrong number or arrangement of words \
             for its grammar.",
        ),
        "FTOS1201" => Some(
            "A directive argument is not a valid value: an address, prefix, integer in \
             range, or one of a fixed set of keywords.",
        ),
        "FTOS1202" => Some(
            "A port range must look like `0/1`, `0/1-8`, `0/1-8,12`, or `1/31,1/32`. The \
             stack unit may not change inside a range, and empty entries are rejected.",
        ),
        "FTOS1203" => Some(
            "An entity that may only be declared once (for example a port's LACP \
             aggregation or the VLT domain) was declared a second time.",
        ),
        "FTOS1204" => Some(
            "The directive family is known, but this interface type or protocol variant is \
             not modelled.",
        ),
        "FTOS1301" => Some(
            "A passthrough section (e.g. `hardware`, `redundancy`) did not match the \
             canonical directives required by the device profile. The dump may be truncated \
             or reordered.",
        ),
        "FTOS1401" => Some(
            "The configuration ended without the terminal `end` directive, so it was \
             probably truncated.",
        ),
        "FTOS1402" => Some("Nothing may follow the terminal `end` directive."),
        "FTOS1403" => Some(
            "An earlier directive already failed. Parse errors are fatal, so the parser \
             accepts no further input and produces no model.",
        ),
        "FTOS1501" => Some("The line source failed while delivering configuration text."),
        _ => None,
    }
}
