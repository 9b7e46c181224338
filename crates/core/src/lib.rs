//! Force10 FTOS running-config parser.
//!
//! Turns the text of `show running-config` into a typed [`SwitchConfig`].
//! Lines are lexed into a forest of [`ParseNode`]s by indentation, and each
//! node is matched against a per-context directive table that updates the
//! model. Any failure rejects the whole configuration; there is no partial
//! result.
//!
//! The main entry points are [`parse_str`] for a complete document,
//! [`ConfigParser`] for line-at-a-time input, and [`read_config`] for any
//! [`LineSource`].

#![warn(missing_docs)]

/// Model builder: per-context directive tables and their handlers.
pub mod builder;
/// Error type and diagnostic conversion.
pub mod error;
/// Lexer, dispatcher, and serialization helpers.
pub mod grammar;
/// Semantic model of a switch configuration.
pub mod model;
/// Port-range expansion for port-list directives.
pub mod port_range;
/// Streaming driver and parse entry points.
pub mod stream;

// ── Convenience re-exports ──────────────────────────────────────────────────
// Flat imports for the most common entry points. The full module paths
// remain available for less common types.

// Parsing
pub use stream::{
    ConfigParser, LineSource, parse_lines, parse_str, parse_tree, parse_with_profile, read_config,
};

// Parse tree
pub use grammar::lexer::{Lexer, ParseNode, lex};

// Model
pub use builder::ModelBuilder;
pub use model::SwitchConfig;

// Errors
pub use error::{BoxError, ConfigError, Words};
pub use port_range::{MAX_RANGE_SPAN, PortRangeError, expand_port_range};

// Profiles and diagnostics (re-exported from their crates)
pub use f10cfg_diagnostics::{Diagnostic, LineIndex, Severity, Span, codes};
pub use f10cfg_profile::{PassthroughSection, Profile, ProfileError, load_profile_from_str};

// Serialization helpers
pub use grammar::dump::{to_pretty_json, tree_to_pretty_json};
