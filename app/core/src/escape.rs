//! Escape-velocity verdict.

use rust_decimal::{Decimal, RoundingStrategy};

/// Earth's escape velocity in meters per second.
pub const ESCAPE_VELOCITY_MPS: f64 = 11_200.0;

/// Delta-v at or above which a rocket is declared able to escape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EscapeThreshold(f64);

impl EscapeThreshold {
    pub fn new(mps: f64) -> Self {
        Self(mps)
    }

    pub fn mps(&self) -> f64 {
        self.0
    }

    /// The boundary is inclusive.
    pub fn classify(&self, delta_v: f64) -> Verdict {
        if delta_v >= self.0 {
            Verdict::Escape
        } else {
            Verdict::NoEscape
        }
    }
}

impl Default for EscapeThreshold {
    fn default() -> Self {
        Self(ESCAPE_VELOCITY_MPS)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Escape,
    NoEscape,
}

impl Verdict {
    pub fn headline(&self) -> &'static str {
        match self {
            Self::Escape => "Your rocket can escape Earth's gravity!",
            Self::NoEscape => "Your rocket cannot escape Earth's gravity.",
        }
    }

    pub fn is_escape(&self) -> bool {
        matches!(self, Self::Escape)
    }
}

/// Fixed two-decimal rendering of a delta-v value.
///
/// Rounds the exact binary value, with ties going away from zero.
pub fn format_delta_v(delta_v: f64) -> String {
    match Decimal::from_f64_retain(delta_v) {
        Some(exact) => {
            let mut rounded = exact.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            rounded.rescale(2);
            rounded.to_string()
        }
        None => format!("{delta_v:.2}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_is_inclusive() {
        let t = EscapeThreshold::default();
        assert_eq!(t.classify(11_200.0), Verdict::Escape);
        assert_eq!(t.classify(11_199.99), Verdict::NoEscape);
        assert_eq!(t.classify(30_000.0), Verdict::Escape);
    }

    #[test]
    fn custom_threshold() {
        let t = EscapeThreshold::new(5_000.0);
        assert_eq!(t.classify(5_000.0), Verdict::Escape);
        assert_eq!(t.classify(4_999.0), Verdict::NoEscape);
    }

    #[test]
    fn formats_two_decimals() {
        assert_eq!(format_delta_v(15_000.5), "15000.50");
        assert_eq!(format_delta_v(0.0), "0.00");
        assert_eq!(format_delta_v(11_199.99), "11199.99");
    }

    #[test]
    fn ties_round_away_from_zero() {
        assert_eq!(format_delta_v(11_200.125), "11200.13");
        assert_eq!(format_delta_v(0.125), "0.13");
        assert_eq!(format_delta_v(0.375), "0.38");
        assert_eq!(format_delta_v(-0.125), "-0.13");
        // 1.115 is stored just below the tie.
        assert_eq!(format_delta_v(1.115), "1.11");
    }
}
