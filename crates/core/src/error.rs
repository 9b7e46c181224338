//! Error type for configuration parsing.
//!
//! Every failure is fatal to the parse. Each dispatch level wraps the error
//! it receives in [`ConfigError::Section`], so the `source()` chain runs from
//! the outermost section down to the root cause.

use std::collections::BTreeMap;
use std::error::Error as _;
use std::fmt;

use f10cfg_diagnostics::{Diagnostic, LineIndex, codes};
use f10cfg_profile::PassthroughSection;
use serde::Serialize;

use crate::port_range::PortRangeError;

/// Boxed error produced by a [`LineSource`](crate::LineSource).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Shorthand for building a `BTreeMap<String, String>` context from key-value pairs.
macro_rules! ctx {
    ($($k:expr => $v:expr),+ $(,)?) => {
        BTreeMap::from([$(($k.into(), $v.into())),+])
    };
}

/// The original token sequence of a directive, `no` included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Words(pub Vec<String>);

impl Words {
    /// The tokens as a slice.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl From<Vec<String>> for Words {
    fn from(words: Vec<String>) -> Self {
        Self(words)
    }
}

impl From<&[String]> for Words {
    fn from(words: &[String]) -> Self {
        Self(words.to_vec())
    }
}

impl fmt::Display for Words {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.0.join(" "))
    }
}

/// A configuration parse failure.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// No rule in the active table matches the directive.
    #[error("unrecognised section {words}")]
    UnrecognizedSection {
        /// The directive as written.
        words: Words,
        /// 1-based source line.
        line: usize,
    },

    /// `no` was applied to a directive that cannot be negated.
    #[error("unexpected \"no\" on {words}")]
    UnexpectedNegation {
        /// The directive as written.
        words: Words,
        /// 1-based source line.
        line: usize,
    },

    /// Indented lines follow a directive that takes no body.
    #[error("unexpected children under {words}")]
    UnexpectedChildren {
        /// The directive as written.
        words: Words,
        /// 1-based source line.
        line: usize,
    },

    /// A recognised directive has the wrong shape.
    #[error("malformed {directive} {words}")]
    Malformed {
        /// Upper-cased directive name, e.g. `IP ROUTE`.
        directive: String,
        /// The directive without its `no` prefix.
        words: Words,
    },

    /// An argument failed validation.
    #[error("invalid {what} \"{value}\"")]
    InvalidValue {
        /// What the argument should have been.
        what: &'static str,
        /// The offending token.
        value: String,
    },

    /// A port-range expression could not be expanded.
    #[error("invalid port range \"{range}\"")]
    InvalidPortRange {
        /// The expression as written.
        range: String,
        /// Why expansion failed.
        #[source]
        source: PortRangeError,
    },

    /// An entity that may only be declared once was declared again.
    #[error("duplicate {what} {words}")]
    Duplicate {
        /// The kind of entity.
        what: &'static str,
        /// The second declaration.
        words: Words,
    },

    /// A known directive family with an unmodelled variant.
    #[error("unsupported {what} \"{value}\"")]
    Unsupported {
        /// The directive family.
        what: &'static str,
        /// The unmodelled variant.
        value: String,
    },

    /// A passthrough section did not match the profile's expected directives.
    #[error("\"{section}\" did not match expected list of directives")]
    Incomplete {
        /// The section that was checked.
        section: PassthroughSection,
        /// Directives required by the profile.
        expected: Vec<Vec<String>>,
        /// Directives actually present.
        actual: Vec<Vec<String>>,
    },

    /// Input ended before the terminal `end` directive.
    #[error("config ended before \"end\" directive")]
    Truncated,

    /// A directive followed the terminal `end` directive.
    #[error("directive {words} after \"end\"")]
    AfterEnd {
        /// The directive as written.
        words: Words,
        /// 1-based source line.
        line: usize,
    },

    /// The parser was fed or finished after an earlier error.
    #[error("parser stopped after an earlier error")]
    Aborted,

    /// The line source failed.
    #[error("line source failed")]
    Source(#[source] BoxError),

    /// Context added by each dispatch level.
    #[error("failed to parse config {words}")]
    Section {
        /// The enclosing directive as written.
        words: Words,
        /// 1-based source line of the enclosing directive.
        line: usize,
        /// The failure inside this section.
        #[source]
        source: Box<ConfigError>,
    },
}

impl ConfigError {
    /// Stable diagnostic code for this variant.
    ///
    /// For [`ConfigError::Section`] this is the code of the root cause.
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::UnrecognizedSection { .. } => codes::UNRECOGNIZED_SECTION,
            ConfigError::UnexpectedNegation { .. } => codes::UNEXPECTED_NEGATION,
            ConfigError::UnexpectedChildren { .. } => codes::UNEXPECTED_CHILDREN,
            ConfigError::Malformed { .. } => codes::MALFORMED_DIRECTIVE,
            ConfigError::InvalidValue { .. } => codes::INVALID_VALUE,
            ConfigError::InvalidPortRange { .. } => codes::INVALID_PORT_RANGE,
            ConfigError::Duplicate { .. } => codes::DUPLICATE_ENTRY,
            ConfigError::Unsupported { .. } => codes::UNSUPPORTED,
            ConfigError::Incomplete { .. } => codes::INCOMPLETE_SECTION,
            ConfigError::Truncated => codes::TRUNCATED_CONFIG,
            ConfigError::AfterEnd { .. } => codes::DIRECTIVE_AFTER_END,
            ConfigError::Aborted => codes::PARSE_ABORTED,
            ConfigError::Source(_) => codes::SOURCE_FAILED,
            ConfigError::Section { source, .. } => source.code(),
        }
    }

    /// The innermost error, with every [`ConfigError::Section`] layer removed.
    pub fn root_cause(&self) -> &ConfigError {
        let mut current = self;
        while let ConfigError::Section { source, .. } = current {
            current = &**source;
        }
        current
    }

    /// The enclosing sections, outermost first.
    pub fn sections(&self) -> Vec<&Words> {
        let mut out = Vec::new();
        let mut current = self;
        while let ConfigError::Section { words, source, .. } = current {
            out.push(words);
            current = &**source;
        }
        out
    }

    /// Source line of the innermost directive that carries one.
    pub fn line(&self) -> Option<usize> {
        let mut found = None;
        let mut current = self;
        loop {
            match current {
                ConfigError::Section { line, source, .. } => {
                    found = Some(*line);
                    current = &**source;
                }
                ConfigError::UnrecognizedSection { line, .. }
                | ConfigError::UnexpectedNegation { line, .. }
                | ConfigError::UnexpectedChildren { line, .. }
                | ConfigError::AfterEnd { line, .. } => return Some(*line),
                _ => return found,
            }
        }
    }

    /// Every message in the `source()` chain, outermost first.
    pub fn chain(&self) -> Vec<String> {
        let mut out = vec![self.to_string()];
        let mut source = self.source();
        while let Some(err) = source {
            out.push(err.to_string());
            source = err.source();
        }
        out
    }

    /// Convert into a [`Diagnostic`] anchored on the innermost offending line.
    ///
    /// `index` maps the line number to a byte span; pass `None` when the
    /// source text is not available (e.g. streamed input).
    pub fn to_diagnostic(&self, index: Option<&LineIndex>) -> Diagnostic {
        let root = self.root_cause();
        let line = self.line();
        let span = line.and_then(|l| index.and_then(|idx| idx.line_span(l)));
        let mut notes: Vec<String> = self
            .sections()
            .into_iter()
            .map(|words| format!("in section {words}"))
            .collect();
        notes.reverse();

        let mut diag = Diagnostic::error(root.code(), root.to_string(), span).with_notes(notes);
        if let Some(line) = line {
            diag = diag.with_line(line);
        }
        if let Some(context) = root.context() {
            diag = diag.with_context(context);
        }
        diag
    }

    fn context(&self) -> Option<BTreeMap<String, String>> {
        match self {
            ConfigError::InvalidPortRange { range, source } => Some(ctx! {
                "range" => range.as_str(),
                "reason" => source.to_string(),
            }),
            ConfigError::InvalidValue { what, value } => Some(ctx! {
                "expected" => *what,
                "value" => value.as_str(),
            }),
            ConfigError::Incomplete {
                section,
                expected,
                actual,
            } => Some(ctx! {
                "section" => section.keyword(),
                "expected" => render_lines(expected),
                "actual" => render_lines(actual),
            }),
            ConfigError::Malformed { directive, .. } => Some(ctx! {
                "directive" => directive.as_str(),
            }),
            ConfigError::Source(err) => Some(ctx! {
                "reason" => err.to_string(),
            }),
            _ => None,
        }
    }
}

fn render_lines(lines: &[Vec<String>]) -> String {
    lines
        .iter()
        .map(|words| words.join(" "))
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(s: &str) -> Words {
        Words(s.split(' ').map(str::to_owned).collect())
    }

    fn nested() -> ConfigError {
        ConfigError::Section {
            words: words("interface Vlan 10"),
            line: 4,
            source: Box::new(ConfigError::Section {
                words: words("tagged GigabitEthernet 0/1-x"),
                line: 6,
                source: Box::new(ConfigError::InvalidPortRange {
                    range: "0/1-x".into(),
                    source: PortRangeError::UnexpectedChar('x'),
                }),
            }),
        }
    }

    #[test]
    fn code_comes_from_root_cause() {
        let err = nested();
        assert_eq!(err.code(), codes::INVALID_PORT_RANGE);
        assert!(matches!(
            err.root_cause(),
            ConfigError::InvalidPortRange { .. }
        ));
    }

    #[test]
    fn line_is_innermost_section() {
        assert_eq!(nested().line(), Some(6));
        assert_eq!(ConfigError::Truncated.line(), None);
    }

    #[test]
    fn chain_runs_outermost_first() {
        let chain = nested().chain();
        assert_eq!(
            chain,
            vec![
                "failed to parse config \"interface Vlan 10\"",
                "failed to parse config \"tagged GigabitEthernet 0/1-x\"",
                "invalid port range \"0/1-x\"",
                "unexpected character 'x'",
            ]
        );
    }

    #[test]
    fn diagnostic_points_at_innermost_line() {
        let src = "hostname a\nend\ninterface Vlan 10\n no shutdown\n\n tagged GigabitEthernet 0/1-x\n";
        let index = LineIndex::new(src);
        let diag = nested().to_diagnostic(Some(&index));
        assert_eq!(diag.id, codes::INVALID_PORT_RANGE);
        assert_eq!(diag.line, Some(6));
        let span = diag.span.unwrap();
        assert_eq!(&src[span.start..span.end], " tagged GigabitEthernet 0/1-x");
        assert_eq!(
            diag.notes,
            vec![
                "in section \"tagged GigabitEthernet 0/1-x\"",
                "in section \"interface Vlan 10\"",
            ]
        );
        assert_eq!(diag.context.unwrap()["range"], "0/1-x");
    }

    #[test]
    fn diagnostic_without_index_has_no_span() {
        let diag = nested().to_diagnostic(None);
        assert!(diag.span.is_none());
        assert_eq!(diag.line, Some(6));
    }

    #[test]
    fn truncated_diagnostic() {
        let diag = ConfigError::Truncated.to_diagnostic(None);
        assert_eq!(diag.id, codes::TRUNCATED_CONFIG);
        assert!(diag.notes.is_empty());
        assert!(diag.line.is_none());
    }
}
