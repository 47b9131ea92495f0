use serde::{Serialize, Serializer};
use std::cmp::Ordering;

/// Score attached to a search result by the model, or the sentinel for
/// output that did not parse as a number. The sentinel is distinct from a
/// rating of zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rating {
    Scored(f64),
    Unrated,
}

pub const UNRATED_LABEL: &str = "N/A";

/// Parse raw model output into a rating. Anything that is not a plain float
/// (empty, prose, malformed) becomes `Unrated`; this never fails.
pub fn parse_rating(raw: &str) -> Rating {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Rating::Scored(value),
        _ => Rating::Unrated,
    }
}

impl Rating {
    /// Render as star glyphs: one full star per whole point, a half marker
    /// when the remainder reaches 0.5, `"N/A"` for the sentinel. Values are
    /// not clamped; a model that answers `7` gets seven stars.
    pub fn to_stars(&self) -> String {
        match self {
            Rating::Scored(value) => {
                let full = value.trunc().max(0.0) as usize;
                let mut stars = "⭐".repeat(full);
                if value - value.trunc() >= 0.5 {
                    stars.push_str("⭐½");
                }
                stars
            }
            Rating::Unrated => UNRATED_LABEL.to_string(),
        }
    }

    pub fn is_rated(&self) -> bool {
        matches!(self, Rating::Scored(_))
    }

    /// Comparison key for descending presentation order, unrated last.
    /// Ties are left to the caller's (stable) sort, so equal scores keep
    /// their original document order.
    pub fn sort_key(&self) -> f64 {
        match self {
            Rating::Scored(value) => *value,
            Rating::Unrated => f64::NEG_INFINITY,
        }
    }

    pub fn cmp_desc(&self, other: &Rating) -> Ordering {
        other
            .sort_key()
            .partial_cmp(&self.sort_key())
            .unwrap_or(Ordering::Equal)
    }
}

// The wire value is always a number or "N/A", never raw model text.
impl Serialize for Rating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Rating::Scored(value) => serializer.serialize_f64(*value),
            Rating::Unrated => serializer.serialize_str(UNRATED_LABEL),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_integers_and_floats() {
        assert_eq!(parse_rating("4"), Rating::Scored(4.0));
        assert_eq!(parse_rating("3.5"), Rating::Scored(3.5));
        assert_eq!(parse_rating("  2.0\n"), Rating::Scored(2.0));
    }

    #[test]
    fn non_numeric_becomes_unrated() {
        assert_eq!(parse_rating(""), Rating::Unrated);
        assert_eq!(parse_rating("I'd rate this a 4"), Rating::Unrated);
        assert_eq!(parse_rating("four"), Rating::Unrated);
        assert_eq!(parse_rating("4.2.1"), Rating::Unrated);
        assert_eq!(parse_rating("NaN"), Rating::Unrated);
    }

    #[test]
    fn stars_for_whole_values() {
        assert_eq!(Rating::Scored(3.0).to_stars(), "⭐⭐⭐");
        assert_eq!(Rating::Scored(0.0).to_stars(), "");
    }

    #[test]
    fn half_star_threshold() {
        assert_eq!(Rating::Scored(3.5).to_stars(), "⭐⭐⭐⭐½");
        // 0.7 remainder is still just a half marker, no rounding up
        assert_eq!(Rating::Scored(4.7).to_stars(), "⭐⭐⭐⭐⭐½");
        assert_eq!(Rating::Scored(2.4).to_stars(), "⭐⭐");
    }

    #[test]
    fn out_of_range_is_not_clamped() {
        assert_eq!(Rating::Scored(7.0).to_stars(), "⭐".repeat(7));
    }

    #[test]
    fn unrated_stars() {
        assert_eq!(Rating::Unrated.to_stars(), "N/A");
    }

    #[test]
    fn descending_order_with_unrated_last() {
        let mut ratings = vec![
            Rating::Unrated,
            Rating::Scored(2.0),
            Rating::Scored(4.5),
            Rating::Scored(3.0),
        ];
        ratings.sort_by(|a, b| a.cmp_desc(b));
        assert_eq!(
            ratings,
            vec![
                Rating::Scored(4.5),
                Rating::Scored(3.0),
                Rating::Scored(2.0),
                Rating::Unrated,
            ]
        );
    }

    #[test]
    fn serializes_number_or_sentinel() {
        assert_eq!(serde_json::to_string(&Rating::Scored(4.5)).unwrap(), "4.5");
        assert_eq!(serde_json::to_string(&Rating::Unrated).unwrap(), "\"N/A\"");
    }
}
