//! Port-range expansion.
//!
//! Expressions such as `0/1-3`, `1/31,1/32` or `0/1-10,20-30` name a list of
//! ports. A `unit/` prefix is sticky: it applies to every later entry in the
//! same expression.

use thiserror::Error;

use crate::model::set_membership;

/// Upper bound on the number of ports a single range entry may expand to.
pub const MAX_RANGE_SPAN: u32 = 4096;

/// Why a port-range expression was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum PortRangeError {
    /// The expression was empty.
    #[error("empty port range")]
    Empty,
    /// A character other than digits, `/`, `-` or `,` was found.
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),
    /// A `/`, `-` or `,` had no number before it, or the expression ended
    /// without one.
    #[error("missing port number")]
    MissingNumber,
    /// The stack unit was set after a range had been opened.
    #[error("stack unit may not change inside a range")]
    StackUnitInRange,
    /// A second `-` appeared in one entry.
    #[error("range has more than one '-'")]
    NestedRange,
    /// A number did not fit in 32 bits.
    #[error("port number \"{0}\" is too large")]
    Overflow(String),
    /// The lower bound of a range was above its upper bound.
    #[error("range {lower}-{upper} is descending")]
    Descending {
        /// Lower bound as written.
        lower: u32,
        /// Upper bound as written.
        upper: u32,
    },
    /// A range covered more than [`MAX_RANGE_SPAN`] ports.
    #[error("range {lower}-{upper} covers too many ports")]
    TooLarge {
        /// Lower bound as written.
        lower: u32,
        /// Upper bound as written.
        upper: u32,
    },
}

/// Expand a port-range expression into an ordered list of unique port ids.
///
/// Nothing is returned unless the whole expression is valid.
///
/// # Example
/// ```
/// use f10cfg_core::expand_port_range;
///
/// assert_eq!(expand_port_range("0/1-3").unwrap(), ["0/1", "0/2", "0/3"]);
/// assert_eq!(expand_port_range("1/31,1/32").unwrap(), ["1/31", "1/32"]);
/// assert!(expand_port_range("1/11-1/16").is_err());
/// ```
pub fn expand_port_range(range: &str) -> Result<Vec<String>, PortRangeError> {
    if range.is_empty() {
        return Err(PortRangeError::Empty);
    }

    let mut ports = Vec::new();
    let mut unit: Option<u32> = None;
    let mut lower: Option<u32> = None;
    let mut accum = String::new();

    for c in range.chars() {
        match c {
            '0'..='9' => accum.push(c),
            '/' => {
                if lower.is_some() {
                    return Err(PortRangeError::StackUnitInRange);
                }
                unit = Some(take_number(&mut accum)?);
            }
            '-' => {
                if lower.is_some() {
                    return Err(PortRangeError::NestedRange);
                }
                lower = Some(take_number(&mut accum)?);
            }
            ',' => {
                let upper = take_number(&mut accum)?;
                commit(&mut ports, unit, lower.take(), upper)?;
            }
            other => return Err(PortRangeError::UnexpectedChar(other)),
        }
    }

    let upper = take_number(&mut accum)?;
    commit(&mut ports, unit, lower, upper)?;
    Ok(ports)
}

fn take_number(accum: &mut String) -> Result<u32, PortRangeError> {
    if accum.is_empty() {
        return Err(PortRangeError::MissingNumber);
    }
    let n = accum
        .parse::<u32>()
        .map_err(|_| PortRangeError::Overflow(accum.clone()))?;
    accum.clear();
    Ok(n)
}

fn commit(
    ports: &mut Vec<String>,
    unit: Option<u32>,
    lower: Option<u32>,
    upper: u32,
) -> Result<(), PortRangeError> {
    let lower = lower.unwrap_or(upper);
    if lower > upper {
        return Err(PortRangeError::Descending { lower, upper });
    }
    if upper - lower >= MAX_RANGE_SPAN {
        return Err(PortRangeError::TooLarge { lower, upper });
    }
    for port in lower..=upper {
        let id = match unit {
            Some(unit) => format!("{unit}/{port}"),
            None => port.to_string(),
        };
        set_membership(ports, id, true);
    }
    Ok(())
}
