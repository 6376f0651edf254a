//! Section Record Parser
//!
//! Parses one line of the sensing peer's text stream into a [`Section`].
//!
//! # Wire Format
//!
//! ```text
//! <name> <spots> [<score1> [<score2>]]
//! ```
//!
//! Fields are separated by ASCII whitespace, integers are base 10. The number
//! of score fields is fixed per deployment ([`RecordLayout::score_fields`]).
//! The transport strips the `\n` terminator and truncates lines to
//! [`LINE_LEN`] bytes; a trailing `\r` is left in place.
//!
//! # Stream Termination
//!
//! Under [`TerminationRule::Legacy`] any line comparing byte-wise greater than
//! `"END"` or greater than `"NO"` ends ingestion. Since `"END" < "NO"` this
//! reduces to `line > "END"`: the bare `"END"` does not match, while
//! `"END\r"`, `"NO"`, every name starting with `F` to `Z` or a lowercase
//! letter, and names from `"EO"` to `"EZ"` all end the stream.
//! [`TerminationRule::Exact`] only matches `"END"` or `"NO"`.

use core::fmt;

use super::{section_name, Section, MAX_SCORES};

/// Transport line buffer size in bytes
pub const LINE_LEN: usize = 32;

/// Sentinel lines
const END_SENTINEL: &[u8] = b"END";
const NO_SENTINEL: &[u8] = b"NO";

/// Stream termination rule
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TerminationRule {
    /// Byte-wise `line > "END" || line > "NO"` (compatible with deployed peers)
    #[default]
    Legacy,
    /// Trimmed line equals `"END"` or `"NO"`
    Exact,
}

/// Per-deployment record layout
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecordLayout {
    /// Score fields per record (0..=MAX_SCORES)
    pub score_fields: u8,
    /// Stream termination rule
    pub termination: TerminationRule,
}

impl Default for RecordLayout {
    fn default() -> Self {
        Self {
            score_fields: 1,
            termination: TerminationRule::Legacy,
        }
    }
}

impl RecordLayout {
    /// Layout with `score_fields` scores and the legacy termination rule
    pub const fn new(score_fields: u8) -> Self {
        Self {
            score_fields,
            termination: TerminationRule::Legacy,
        }
    }

    /// Same layout with a different termination rule
    pub const fn with_termination(mut self, termination: TerminationRule) -> Self {
        self.termination = termination;
        self
    }

    /// Number of whitespace-separated tokens a record must have
    pub const fn token_count(&self) -> usize {
        2 + self.score_fields as usize
    }
}

/// Result of parsing one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordLine {
    /// A section record
    Section(Section),
    /// Sentinel line; ingestion ends
    EndOfStream,
}

/// Reasons a line is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordError {
    /// Line is not valid UTF-8
    Encoding,
    /// Wrong number of whitespace-separated tokens
    FieldCount {
        /// Tokens the layout requires
        expected: u8,
        /// Tokens found (capped at `MAX_SCORES + 3`)
        found: u8,
    },
    /// Spot count is not a non-negative base-10 integer
    InvalidSpots,
    /// A score is not a base-10 integer
    InvalidScore,
    /// Name token is empty
    EmptyName,
    /// Name exceeds `SECTION_NAME_LEN`
    NameTooLong,
    /// Layout asks for more scores than a section holds
    UnsupportedLayout,
}

impl RecordError {
    /// Short static label
    pub fn label(&self) -> &'static str {
        match self {
            RecordError::Encoding => "invalid encoding",
            RecordError::FieldCount { .. } => "wrong field count",
            RecordError::InvalidSpots => "invalid spots",
            RecordError::InvalidScore => "invalid score",
            RecordError::EmptyName => "empty name",
            RecordError::NameTooLong => "name too long",
            RecordError::UnsupportedLayout => "unsupported layout",
        }
    }
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::FieldCount { expected, found } => {
                write!(f, "expected {} fields, found {}", expected, found)
            }
            other => f.write_str(other.label()),
        }
    }
}

/// Check whether `line` ends the record stream under `rule`.
pub fn is_terminator(line: &[u8], rule: TerminationRule) -> bool {
    match rule {
        TerminationRule::Legacy => line > END_SENTINEL || line > NO_SENTINEL,
        TerminationRule::Exact => {
            let trimmed = line.trim_ascii_end();
            trimmed == END_SENTINEL || trimmed == NO_SENTINEL
        }
    }
}

/// Parse one transport line.
///
/// The termination check runs on the raw bytes before tokenizing.
pub fn parse_record(line: &[u8], layout: &RecordLayout) -> Result<RecordLine, RecordError> {
    if layout.score_fields as usize > MAX_SCORES {
        return Err(RecordError::UnsupportedLayout);
    }

    if is_terminator(line, layout.termination) {
        return Ok(RecordLine::EndOfStream);
    }

    let text = core::str::from_utf8(line).map_err(|_| RecordError::Encoding)?;
    let expected = layout.token_count();

    let mut tokens: heapless::Vec<&str, { 2 + MAX_SCORES }> = heapless::Vec::new();
    for token in text.split_ascii_whitespace() {
        if tokens.push(token).is_err() {
            return Err(RecordError::FieldCount {
                expected: expected as u8,
                found: (2 + MAX_SCORES + 1) as u8,
            });
        }
    }
    if tokens.len() != expected {
        return Err(RecordError::FieldCount {
            expected: expected as u8,
            found: tokens.len() as u8,
        });
    }

    let name = section_name(tokens[0])?;
    let spots = tokens[1]
        .parse::<u16>()
        .map_err(|_| RecordError::InvalidSpots)?;

    let mut scores = [0i32; MAX_SCORES];
    for (slot, token) in scores.iter_mut().zip(&tokens[2..]) {
        *slot = token.parse::<i32>().map_err(|_| RecordError::InvalidScore)?;
    }

    Ok(RecordLine::Section(Section {
        name,
        spots,
        scores,
        active_score: scores[0],
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(line: &[u8], layout: &RecordLayout) -> Section {
        match parse_record(line, layout) {
            Ok(RecordLine::Section(s)) => s,
            other => panic!("expected section, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_one_score() {
        let s = section(b"A 2 5", &RecordLayout::new(1));
        assert_eq!(s.name.as_str(), "A");
        assert_eq!(s.spots, 2);
        assert_eq!(s.scores, [5, 0]);
        assert_eq!(s.active_score, 5);
    }

    #[test]
    fn test_parse_two_scores_with_crlf() {
        let s = section(b"B2 12 -3 7\r", &RecordLayout::new(2));
        assert_eq!(s.name.as_str(), "B2");
        assert_eq!(s.spots, 12);
        assert_eq!(s.scores, [-3, 7]);
    }

    #[test]
    fn test_parse_no_scores() {
        let s = section(b"C 0", &RecordLayout::new(0));
        assert_eq!(s.spots, 0);
        assert_eq!(s.scores, [0, 0]);
    }

    #[test]
    fn test_extra_whitespace_is_accepted() {
        let s = section(b"  A\t 4   1 ", &RecordLayout::new(1));
        assert_eq!(s.name.as_str(), "A");
        assert_eq!(s.spots, 4);
    }

    #[test]
    fn test_wrong_field_count() {
        let layout = RecordLayout::new(1);
        assert_eq!(
            parse_record(b"A 2", &layout),
            Err(RecordError::FieldCount {
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            parse_record(b"A 2 5 6", &layout),
            Err(RecordError::FieldCount {
                expected: 3,
                found: 4
            })
        );
        assert!(matches!(
            parse_record(b"A 1 2 3 4 5 6", &layout),
            Err(RecordError::FieldCount { expected: 3, .. })
        ));
        assert!(matches!(
            parse_record(b"", &layout),
            Err(RecordError::FieldCount { found: 0, .. })
        ));
    }

    #[test]
    fn test_invalid_numbers() {
        let layout = RecordLayout::new(1);
        assert_eq!(parse_record(b"A x 5", &layout), Err(RecordError::InvalidSpots));
        assert_eq!(parse_record(b"A -1 5", &layout), Err(RecordError::InvalidSpots));
        assert_eq!(parse_record(b"A 2 5x", &layout), Err(RecordError::InvalidScore));
    }

    #[test]
    fn test_name_too_long_is_rejected() {
        assert_eq!(
            parse_record(b"ABCDEFGHIJKLMNOPQ 2 5", &RecordLayout::new(1)),
            Err(RecordError::NameTooLong)
        );
    }

    #[test]
    fn test_invalid_utf8() {
        assert_eq!(
            parse_record(&[b'A', 0xC3, b' ', b'1'], &RecordLayout::new(0)),
            Err(RecordError::Encoding)
        );
    }

    #[test]
    fn test_unsupported_layout() {
        assert_eq!(
            parse_record(b"A 1 2 3 4", &RecordLayout::new(3)),
            Err(RecordError::UnsupportedLayout)
        );
    }

    #[test]
    fn test_legacy_termination() {
        let rule = TerminationRule::Legacy;
        // CRLF sentinels terminate
        assert!(is_terminator(b"END\r", rule));
        assert!(is_terminator(b"NO\r", rule));
        // "NO" sorts after "END"; "END" is not greater than itself
        assert!(is_terminator(b"NO", rule));
        assert!(!is_terminator(b"END", rule));
        // Anything sorting after "END" terminates
        assert!(is_terminator(b"F 3 1", rule));
        assert!(is_terminator(b"M2 1 1", rule));
        assert!(is_terminator(b"EO 1 1", rule));
        assert!(is_terminator(b"Z 3 1", rule));
        assert!(is_terminator(b"a 3 1", rule));
        // Names sorting before "END" do not
        assert!(!is_terminator(b"A 2 5", rule));
        assert!(!is_terminator(b"D9 1 1", rule));
        assert!(!is_terminator(b"EN 1 1", rule));
        assert!(!is_terminator(b"EAST 1 1", rule));
    }

    #[test]
    fn test_exact_termination() {
        let rule = TerminationRule::Exact;
        assert!(is_terminator(b"END", rule));
        assert!(is_terminator(b"END\r", rule));
        assert!(is_terminator(b"NO", rule));
        assert!(!is_terminator(b"Z 3 1", rule));
        assert!(!is_terminator(b"ENDX", rule));
    }

    #[test]
    fn test_exact_rule_parses_late_names() {
        let layout = RecordLayout::new(1).with_termination(TerminationRule::Exact);
        let s = section(b"Z 3 1", &layout);
        assert_eq!(s.name.as_str(), "Z");
        assert_eq!(parse_record(b"END", &layout), Ok(RecordLine::EndOfStream));
    }

    #[test]
    fn test_record_error_display() {
        extern crate std;
        use std::format;

        let error = RecordError::FieldCount {
            expected: 3,
            found: 1,
        };
        assert_eq!(format!("{}", error), "expected 3 fields, found 1");
        assert_eq!(format!("{}", RecordError::InvalidSpots), "invalid spots");
    }
}
