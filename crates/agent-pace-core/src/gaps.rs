use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::ActivityKind;

/// One entry in the ranked focus list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusItem {
    pub activity: ActivityKind,
    pub gap: Decimal,
}

/// Per-activity shortfall against pace-to-date, with the worst offender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GapAnalysis {
    /// target-to-date minus actual, clamped at zero per kind
    pub gaps: BTreeMap<ActivityKind, Decimal>,
    /// Activities with a positive gap, largest first
    pub focus_ranking: Vec<FocusItem>,
    /// The activity with the largest gap, if any gap is positive.
    /// Ties go to the earliest kind in canonical order.
    pub bottleneck: Option<ActivityKind>,
}

/// Compare pace-to-date targets against actual logged counts.
/// Being ahead on one activity never offsets being behind on another,
/// so negative shortfalls clamp to zero.
pub fn analyze_gaps(
    targets_to_date: &BTreeMap<ActivityKind, Decimal>,
    actuals: &BTreeMap<ActivityKind, u32>,
) -> GapAnalysis {
    let mut gaps = BTreeMap::new();
    for (kind, target) in targets_to_date {
        let actual = Decimal::from(actuals.get(kind).copied().unwrap_or(0));
        gaps.insert(*kind, (*target - actual).max(Decimal::ZERO));
    }

    // Canonical-order scan with strict > keeps ties deterministic
    let mut bottleneck: Option<ActivityKind> = None;
    let mut max_gap = Decimal::ZERO;
    for kind in ActivityKind::ALL {
        if let Some(gap) = gaps.get(&kind) {
            if *gap > max_gap {
                max_gap = *gap;
                bottleneck = Some(kind);
            }
        }
    }

    let mut focus_ranking: Vec<FocusItem> = ActivityKind::ALL
        .iter()
        .filter_map(|kind| {
            gaps.get(kind).and_then(|gap| {
                (*gap > Decimal::ZERO).then(|| FocusItem {
                    activity: *kind,
                    gap: *gap,
                })
            })
        })
        .collect();
    // stable sort preserves canonical order among equal gaps
    focus_ranking.sort_by(|a, b| b.gap.cmp(&a.gap));

    GapAnalysis {
        gaps,
        focus_ranking,
        bottleneck,
    }
}
