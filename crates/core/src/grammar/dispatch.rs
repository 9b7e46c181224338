use super::lexer::ParseNode;
use crate::error::{ConfigError, Words};

/// The token that negates a directive.
pub const NEGATION: &str = "no";

/// One entry of a directive table.
///
/// `pattern` is compared positionally against the leading words of a node
/// (after any `no` has been removed). An empty pattern matches everything and
/// only makes sense as the last entry of a table.
#[derive(Debug, Clone, Copy)]
pub struct SectionRule<D> {
    /// Leading tokens that select this rule.
    pub pattern: &'static [&'static str],
    /// Whether a leading `no` is accepted.
    pub negation: bool,
    /// Whether the directive may have an indented body.
    pub children: bool,
    /// What the handler should do with a matching node.
    pub directive: D,
}

impl<D> SectionRule<D> {
    /// A rule that forbids negation and children.
    pub const fn new(pattern: &'static [&'static str], directive: D) -> Self {
        Self {
            pattern,
            negation: false,
            children: false,
            directive,
        }
    }

    /// Accept a leading `no` (builder pattern).
    pub const fn negatable(mut self) -> Self {
        self.negation = true;
        self
    }

    /// Accept an indented body (builder pattern).
    pub const fn container(mut self) -> Self {
        self.children = true;
        self
    }

    fn matches(&self, words: &[String]) -> bool {
        self.pattern.len() <= words.len()
            && self.pattern.iter().zip(words).all(|(p, w)| *p == w)
    }
}

/// A node that matched a rule, as seen by its handler.
///
/// `words` is a copy of the node's tokens with any `no` removed; the node
/// itself is never modified.
#[derive(Debug)]
pub struct Section<'a, D> {
    /// The matched rule's directive.
    pub directive: D,
    /// Whether the directive was negated.
    pub disable: bool,
    /// The directive's tokens without `no`.
    pub words: Vec<String>,
    /// The indented body.
    pub children: &'a [ParseNode],
    /// 1-based source line.
    pub line: usize,
    pattern: &'static [&'static str],
}

impl<D> Section<'_, D> {
    /// Number of words, `no` excluded.
    pub fn arity(&self) -> usize {
        self.words.len()
    }

    /// The word at `index`, if present.
    pub fn word(&self, index: usize) -> Option<&str> {
        self.words.get(index).map(String::as_str)
    }

    /// The words from `start` onwards joined by single spaces, or `None` if
    /// there are none.
    pub fn rest(&self, start: usize) -> Option<String> {
        let rest = self.words.get(start..).filter(|r| !r.is_empty())?;
        Some(rest.join(" "))
    }

    /// The directive as written, with `no` restored.
    pub fn verbatim(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.words.len() + 1);
        if self.disable {
            out.push(NEGATION.to_owned());
        }
        out.extend(self.words.iter().cloned());
        out
    }

    /// Upper-cased directive name used in error messages, e.g. `IP ROUTE`.
    pub fn name(&self) -> String {
        let name = if self.pattern.is_empty() {
            self.word(0).unwrap_or_default().to_owned()
        } else {
            self.pattern.join(" ")
        };
        name.to_uppercase()
    }

    /// A shape error for this directive.
    pub fn malformed(&self) -> ConfigError {
        ConfigError::Malformed {
            directive: self.name(),
            words: Words::from(self.words.as_slice()),
        }
    }

    /// Require exactly `n` words.
    pub fn expect_arity(&self, n: usize) -> Result<(), ConfigError> {
        if self.words.len() == n {
            Ok(())
        } else {
            Err(self.malformed())
        }
    }

    /// Require the word at `index` to equal `expected`.
    pub fn expect_word(&self, index: usize, expected: &str) -> Result<(), ConfigError> {
        if self.word(index) == Some(expected) {
            Ok(())
        } else {
            Err(self.malformed())
        }
    }

    /// The word at `index`, or a shape error.
    pub fn arg(&self, index: usize) -> Result<&str, ConfigError> {
        self.word(index).ok_or_else(|| self.malformed())
    }
}

/// Match `node` against `table` and run `handler` on the first matching rule.
///
/// First match wins; table order decides between overlapping patterns.
/// Handler errors are wrapped in [`ConfigError::Section`] carrying the node's
/// words and line.
pub fn apply<D, F>(
    node: &ParseNode,
    table: &[SectionRule<D>],
    handler: F,
) -> Result<(), ConfigError>
where
    D: Copy,
    F: FnOnce(Section<'_, D>) -> Result<(), ConfigError>,
{
    let mut words = node.words.clone();
    let disable = words.first().is_some_and(|w| w == NEGATION);
    if disable {
        words.remove(0);
    }

    let Some(rule) = table.iter().find(|rule| rule.matches(&words)) else {
        return Err(ConfigError::UnrecognizedSection {
            words: Words::from(node.words.as_slice()),
            line: node.line,
        });
    };
    if disable && !rule.negation {
        return Err(ConfigError::UnexpectedNegation {
            words: Words::from(node.words.as_slice()),
            line: node.line,
        });
    }
    if !rule.children && !node.children.is_empty() {
        return Err(ConfigError::UnexpectedChildren {
            words: Words::from(node.words.as_slice()),
            line: node.line,
        });
    }

    let section = Section {
        directive: rule.directive,
        disable,
        words,
        children: &node.children,
        line: node.line,
        pattern: rule.pattern,
    };
    handler(section).map_err(|source| ConfigError::Section {
        words: Words::from(node.words.as_slice()),
        line: node.line,
        source: Box::new(source),
    })
}

/// Apply `table` to every child of a container, stopping at the first error.
pub fn apply_children<D, F>(
    children: &[ParseNode],
    table: &[SectionRule<D>],
    mut handler: F,
) -> Result<(), ConfigError>
where
    D: Copy,
    F: FnMut(Section<'_, D>) -> Result<(), ConfigError>,
{
    children
        .iter()
        .try_for_each(|child| apply(child, table, &mut handler))
}
