use std::fmt;

/// Chips bought in versus chips counted out.
///
/// Everything paid in is worth `chips_in_play` chips at the game's chip
/// value; every player leaving reports a chip count. The two should agree,
/// give or take a fraction of a chip from odd rebuy amounts.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reconciliation {
    /// Total money in, expressed in chips. May be fractional.
    pub chips_in_play: f64,
    /// Chips already cashed out plus the chips being entered now.
    pub chips_out: i64,
    /// `chips_out - chips_in_play`. Positive means more chips came back than
    /// were bought.
    pub difference: f64,
}

impl Reconciliation {
    pub fn new(chips_in_play: f64, chips_out: i64) -> Self {
        Reconciliation {
            chips_in_play,
            chips_out,
            difference: chips_out as f64 - chips_in_play,
        }
    }

    pub fn is_within(&self, tolerance: f64) -> bool {
        self.difference.abs() <= tolerance
    }
}

impl fmt::Display for Reconciliation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "total chips out ({}) doesn't match total chips in play ({}), difference {} chips",
            self.chips_out,
            self.chips_in_play.round(),
            self.difference.abs().round()
        )
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_difference() {
        let r = Reconciliation::new(600.0, 590);
        assert_relative_eq!(r.difference, -10.0);
        assert!(!r.is_within(0.5));
        assert!(r.is_within(10.0));
    }

    #[test]
    fn test_tolerance_is_inclusive() {
        let r = Reconciliation::new(600.5, 600);
        assert!(r.is_within(0.5));
        let r = Reconciliation::new(600.6, 600);
        assert!(!r.is_within(0.5));
    }

    #[test]
    fn test_display_mentions_both_totals() {
        let r = Reconciliation::new(600.0, 640);
        let msg = r.to_string();
        assert!(msg.contains("640"));
        assert!(msg.contains("600"));
        assert!(msg.contains("difference 40"));
    }
}
