use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::kpi::safe_div;
use crate::types::{ActivityKind, Money};

/// Badge severity for presentation layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Severity {
    Positive,
    Info,
    Warning,
    Critical,
}

/// Expense-to-income health band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExpenseBand {
    /// below 40%
    Healthy,
    /// 40–60%
    Watch,
    /// above 60%
    Risk,
}

/// A categorical insight derived from the computed numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Insight {
    BehindGoal { gap: Money },
    AheadOfGoal { surplus: Money },
    ExpenseRatio { ratio_pct: Decimal, band: ExpenseBand },
    FocusOn { activity: ActivityKind },
    UpgradeNudge,
}

impl Insight {
    pub fn severity(&self) -> Severity {
        match self {
            Insight::BehindGoal { .. } => Severity::Critical,
            Insight::AheadOfGoal { .. } => Severity::Positive,
            Insight::ExpenseRatio { band, .. } => match band {
                ExpenseBand::Healthy => Severity::Positive,
                ExpenseBand::Watch => Severity::Warning,
                ExpenseBand::Risk => Severity::Critical,
            },
            Insight::FocusOn { .. } => Severity::Warning,
            Insight::UpgradeNudge => Severity::Info,
        }
    }
}

/// Already-derived numbers the rules evaluate against. Keeping the rules
/// off the raw inputs makes the classifier testable in isolation.
#[derive(Debug, Clone)]
pub struct InsightInputs {
    pub earned_to_date: Money,
    /// Unclamped pace-to-date
    pub goal_pace_to_date: Money,
    pub month_income: Option<Money>,
    pub month_expenses: Option<Money>,
    pub has_financial_data: bool,
    pub bottleneck: Option<ActivityKind>,
}

/// Evaluate the fixed, ordered rule list. Rules of the same category
/// never fire together; behind/ahead are mutually exclusive and neither
/// fires on exact equality.
pub fn classify(inputs: &InsightInputs) -> Vec<Insight> {
    let mut insights = Vec::new();

    if inputs.earned_to_date < inputs.goal_pace_to_date {
        insights.push(Insight::BehindGoal {
            gap: inputs.goal_pace_to_date - inputs.earned_to_date,
        });
    } else if inputs.earned_to_date > inputs.goal_pace_to_date {
        insights.push(Insight::AheadOfGoal {
            surplus: inputs.earned_to_date - inputs.goal_pace_to_date,
        });
    }

    if inputs.has_financial_data {
        if let (Some(income), Some(expenses)) = (inputs.month_income, inputs.month_expenses) {
            if income > Decimal::ZERO {
                let ratio_pct = safe_div(expenses, income) * dec!(100);
                insights.push(Insight::ExpenseRatio {
                    ratio_pct,
                    band: band_for(ratio_pct),
                });
            }
        }
    }

    if let Some(activity) = inputs.bottleneck {
        insights.push(Insight::FocusOn { activity });
    }

    if !inputs.has_financial_data {
        insights.push(Insight::UpgradeNudge);
    }

    insights
}

fn band_for(ratio_pct: Decimal) -> ExpenseBand {
    if ratio_pct < dec!(40) {
        ExpenseBand::Healthy
    } else if ratio_pct <= dec!(60) {
        ExpenseBand::Watch
    } else {
        ExpenseBand::Risk
    }
}
