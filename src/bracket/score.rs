//! Score text validation
//!
//! A score is whitespace-separated set results, each `<games>-<games>` with
//! non-negative integers, e.g. `"6-4 4-6 7-5"`. It is stored verbatim.

use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Longest accepted score text, in characters
pub const MAX_SCORE_LEN: usize = 120;

/// A validated score string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Score(String);

impl Score {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Per-set games, in the order they were entered. Counts too large for
    /// a `u32` saturate.
    pub fn sets(&self) -> Vec<(u32, u32)> {
        self.0
            .split_whitespace()
            .filter_map(split_set)
            .map(|(a, b)| (games(a), games(b)))
            .collect()
    }
}

/// Both sides of a `<digits>-<digits>` token
fn split_set(token: &str) -> Option<(&str, &str)> {
    let (a, b) = token.split_once('-')?;
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|c| c.is_ascii_digit());
    (digits(a) && digits(b)).then_some((a, b))
}

fn games(digits: &str) -> u32 {
    digits.parse().unwrap_or(u32::MAX)
}

impl FromStr for Score {
    type Err = ValidationError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        let len = trimmed.chars().count();
        if len > MAX_SCORE_LEN {
            return Err(ValidationError::TooLong {
                field: "score",
                len,
                max: MAX_SCORE_LEN,
            });
        }
        let malformed = || ValidationError::MalformedScore {
            input: input.to_string(),
        };
        if trimmed.is_empty() {
            return Err(malformed());
        }
        for token in trimmed.split_whitespace() {
            split_set(token).ok_or_else(malformed)?;
        }
        Ok(Score(trimmed.to_string()))
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_three_sets() {
        let score: Score = "6-4 4-6 7-5".parse().unwrap();
        assert_eq!(score.as_str(), "6-4 4-6 7-5");
        assert_eq!(score.sets(), vec![(6, 4), (4, 6), (7, 5)]);
    }

    #[test]
    fn test_trims_and_keeps_inner_text() {
        let score: Score = "  6-0  ".parse().unwrap();
        assert_eq!(score.to_string(), "6-0");
    }

    #[test]
    fn test_rejects_malformed() {
        for bad in ["6-4 x-6", "6", "", "6-", "-4", "6-4-2", "+6-4", "6 - 4", "６-4"] {
            assert!(bad.parse::<Score>().is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_large_set_counts() {
        let score: Score = "10-8".parse().unwrap();
        assert_eq!(score.sets(), vec![(10, 8)]);
    }

    #[test]
    fn test_counts_beyond_u32_are_well_formed() {
        let score: Score = "4294967296-0".parse().unwrap();
        assert_eq!(score.as_str(), "4294967296-0");
        assert_eq!(score.sets(), vec![(u32::MAX, 0)]);
    }

    #[test]
    fn test_length_limit() {
        let at_limit = vec!["6-4"; 30].join(" ");
        assert_eq!(at_limit.len(), 119);
        assert!(format!("{at_limit}0").parse::<Score>().is_ok());

        let too_long = format!("{at_limit} 6-4");
        assert_eq!(
            too_long.parse::<Score>(),
            Err(ValidationError::TooLong {
                field: "score",
                len: 123,
                max: MAX_SCORE_LEN,
            })
        );
    }
}
