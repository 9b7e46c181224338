//! Diagnostic ID constants.
//!
//! Use these instead of string literals to get compile-time typo detection
//! and IDE autocomplete. Every constant here must have an [`explain`] entry.
//!
//! Ranges: `FTOS10xx` dispatch, `FTOS11xx` directive shape, `FTOS12xx`
//! values, `FTOS13xx` completeness, `FTOS14xx` document structure,
//! `FTOS15xx` input source.
//!
//! [`explain`]: crate::explain

/// No rule in the active directive table matches the section's words.
pub const UNRECOGNIZED_SECTION: &str = "FTOS1001";

/// A `no` prefix was applied to a directive that cannot be negated.
pub const UNEXPECTED_NEGATION: &str = "FTOS1002";

/// A directive that takes no body has indented child lines.
pub const UNEXPECTED_CHILDREN: &str = "FTOS1003";

/// A recognised directive has the wrong number or arrangement of words.
pub const MALFORMED_DIRECTIVE: &str = "FTOS1101";

/// A directive argument failed value validation.
pub const INVALID_VALUE: &str = "FTOS1201";

/// A port-range expression could not be expanded.
pub const INVALID_PORT_RANGE: &str = "FTOS1202";

/// An entity that may only be declared once was declared again.
pub const DUPLICATE_ENTRY: &str = "FTOS1203";

/// A directive family is recognised but the requested variant is not supported.
pub const UNSUPPORTED: &str = "FTOS1204";

/// A passthrough section did not match the profile's canonical form.
pub const INCOMPLETE_SECTION: &str = "FTOS1301";

/// The document ended before the terminal `end` directive.
pub const TRUNCATED_CONFIG: &str = "FTOS1401";

/// A directive appeared after the terminal `end` directive.
pub const DIRECTIVE_AFTER_END: &str = "FTOS1402";

/// The parser was used again after an earlier directive failed.
pub const PARSE_ABORTED: &str = "FTOS1403";

/// The line source failed while delivering configuration text.
pub const SOURCE_FAILED: &str = "FTOS1501";

/// Every known code, in numeric order.
pub const ALL: &[&str] = &[
    UNRECOGNIZED_SECTION,
    UNEXPECTED_NEGATION,
    UNEXPECTED_CHILDREN,
    MALFORMED_DIRECTIVE,
    INVALID_VALUE,
    INVALID_PORT_RANGE,
    DUPLICATE_ENTRY,
    UNSUPPORTED,
    INCOMPLETE_SECTION,
    TRUNCATED_CONFIG,
    DIRECTIVE_AFTER_END,
    PARSE_ABORTED,
    SOURCE_FAILED,
];
