//! Line-at-a-time driver tying the lexer to the model builder.

use f10cfg_profile::Profile;

use crate::builder::ModelBuilder;
use crate::error::{BoxError, ConfigError};
use crate::grammar::lexer::{Lexer, ParseNode, lex};
use crate::model::SwitchConfig;

/// Anything that yields configuration lines one at a time: a file, a buffer,
/// or a live device session.
pub trait LineSource {
    /// The next line, `None` at end of input, or the error that stopped the
    /// source.
    fn next_line(&mut self) -> Option<Result<String, BoxError>>;
}

impl<I, E> LineSource for I
where
    I: Iterator<Item = Result<String, E>>,
    E: Into<BoxError>,
{
    fn next_line(&mut self) -> Option<Result<String, BoxError>> {
        self.next().map(|line| line.map_err(Into::into))
    }
}

/// Incremental parser: feed lines with [`push_line`](Self::push_line), then
/// call [`finish`](Self::finish).
///
/// Each top-level section is dispatched as soon as the lexer closes it, so
/// an invalid section is reported before the rest of the input is read.
/// After the first error every call returns [`ConfigError::Aborted`].
#[derive(Debug)]
pub struct ConfigParser {
    lexer: Lexer,
    builder: ModelBuilder,
}

impl ConfigParser {
    /// Create a parser whose completeness checks come from `profile`.
    pub fn new(profile: Profile) -> Self {
        Self {
            lexer: Lexer::new(),
            builder: ModelBuilder::new(profile),
        }
    }

    /// Feed one raw line.
    pub fn push_line(&mut self, line: &str) -> Result<(), ConfigError> {
        if self.builder.failed() {
            return Err(ConfigError::Aborted);
        }
        match self.lexer.push_line(line) {
            Some(node) => self.builder.apply(&node),
            None => Ok(()),
        }
    }

    /// Flush the last section and return the finished model.
    pub fn finish(mut self) -> Result<SwitchConfig, ConfigError> {
        if self.builder.failed() {
            return Err(ConfigError::Aborted);
        }
        let lines = self.lexer.lines_read();
        if let Some(node) = self.lexer.finish() {
            self.builder.apply(&node)?;
        }
        tracing::debug!(lines, "input exhausted");
        self.builder.finish()
    }
}

/// Parse everything `source` yields.
///
/// A source error aborts the parse with [`ConfigError::Source`].
pub fn read_config<S: LineSource>(mut source: S, profile: Profile) -> Result<SwitchConfig, ConfigError> {
    let mut parser = ConfigParser::new(profile);
    while let Some(line) = source.next_line() {
        parser.push_line(&line.map_err(ConfigError::Source)?)?;
    }
    parser.finish()
}

/// Parse a configuration with the canonical Force10 profile.
///
/// ```
/// let cfg = f10cfg_core::parse_str(
///     "hostname core1\nredundancy auto-synchronize full\nhardware watchdog\nend\n",
/// )
/// .unwrap();
/// assert_eq!(cfg.hostname.as_deref(), Some("core1"));
/// ```
pub fn parse_str(text: &str) -> Result<SwitchConfig, ConfigError> {
    parse_with_profile(text, Profile::default())
}

/// Parse a configuration, checking completeness against `profile`.
pub fn parse_with_profile(text: &str, profile: Profile) -> Result<SwitchConfig, ConfigError> {
    parse_lines(text.lines(), profile)
}

/// Parse a sequence of lines that cannot fail to read.
pub fn parse_lines<I, S>(lines: I, profile: Profile) -> Result<SwitchConfig, ConfigError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parser = ConfigParser::new(profile);
    for line in lines {
        parser.push_line(line.as_ref())?;
    }
    parser.finish()
}

/// Lex a configuration into its section forest without building a model.
pub fn parse_tree(text: &str) -> Vec<ParseNode> {
    lex(text.lines())
}
