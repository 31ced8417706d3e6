use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{CapProgress, Money};

/// Cap satisfaction summary. `percentage` is `None` when no positive
/// cap is configured — callers render "not configured", not 0%.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage: Option<Decimal>,
    pub remaining: Money,
    /// Passed through from the source of truth, never recomputed:
    /// out-of-band adjustments can complete a cap below 100%.
    pub is_complete: bool,
}

/// Summarize annual commission cap progress, independent of the monthly
/// goal engine. Absent cap configuration is a normal state.
pub fn summarize_cap(cap: Option<&CapProgress>) -> Option<CapSummary> {
    let cap = cap?;
    let percentage = if cap.total_cap > Decimal::ZERO {
        Some((cap.paid_so_far / cap.total_cap * dec!(100)).min(dec!(100)))
    } else {
        None
    };
    Some(CapSummary {
        percentage,
        remaining: (cap.total_cap - cap.paid_so_far).max(Decimal::ZERO),
        is_complete: cap.is_complete,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_cap_percentage() {
        let summary = summarize_cap(Some(&CapProgress {
            paid_so_far: dec!(400000),
            total_cap: dec!(1600000),
            is_complete: false,
        }))
        .unwrap();
        assert_eq!(summary.percentage, Some(dec!(25)));
        assert_eq!(summary.remaining, dec!(1200000));
        assert!(!summary.is_complete);
    }

    #[test]
    fn test_percentage_caps_at_100() {
        let summary = summarize_cap(Some(&CapProgress {
            paid_so_far: dec!(2000000),
            total_cap: dec!(1600000),
            is_complete: true,
        }))
        .unwrap();
        assert_eq!(summary.percentage, Some(dec!(100)));
        assert_eq!(summary.remaining, dec!(0));
    }

    #[test]
    fn test_zero_total_cap_yields_no_percentage() {
        let summary = summarize_cap(Some(&CapProgress {
            paid_so_far: dec!(50000),
            total_cap: dec!(0),
            is_complete: false,
        }))
        .unwrap();
        assert_eq!(summary.percentage, None);
    }

    #[test]
    fn test_unconfigured_cap_is_none() {
        assert_eq!(summarize_cap(None), None);
    }

    #[test]
    fn test_is_complete_passed_through_not_derived() {
        // 50% paid but externally marked complete
        let summary = summarize_cap(Some(&CapProgress {
            paid_so_far: dec!(800000),
            total_cap: dec!(1600000),
            is_complete: true,
        }))
        .unwrap();
        assert_eq!(summary.percentage, Some(dec!(50)));
        assert!(summary.is_complete);
    }
}
