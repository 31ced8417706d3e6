use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::PaceError;
use crate::types::{ActivityKind, GoalSettings, Money, MonthlyGoal};
use crate::PaceResult;

/// A monthly goal decomposed into daily targets and cumulative
/// expected-by-today values, assuming linear pacing over work days.
/// Weekends and holidays contribute no expected progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalPlan {
    pub monthly_income_goal: Money,
    /// monthly goal / total work days (exact)
    pub daily_income_target: Money,
    /// daily target * elapsed work days — where the user should be today
    pub goal_pace_to_date: Money,
    /// Per-activity whole-action targets per work day (ceiled)
    pub daily_activity_targets: BTreeMap<ActivityKind, u32>,
    /// Per-activity cumulative targets by today (exact)
    pub activity_targets_to_date: BTreeMap<ActivityKind, Decimal>,
}

/// Split the monthly income and activity goals into daily targets and
/// pace-to-date values.
pub fn decompose(
    settings: &GoalSettings,
    total_work_days: u32,
    elapsed_work_days: u32,
) -> PaceResult<GoalPlan> {
    validate(settings)?;

    if total_work_days == 0 {
        return Err(PaceError::ZeroWorkDays);
    }

    let total = Decimal::from(total_work_days);
    let elapsed = Decimal::from(elapsed_work_days);

    let monthly_income_goal = settings.monthly_goal.gci_target();
    let daily_income_target = monthly_income_goal / total;
    let goal_pace_to_date = daily_income_target * elapsed;

    let mut daily_activity_targets = BTreeMap::new();
    let mut activity_targets_to_date = BTreeMap::new();
    for (kind, monthly_count) in &settings.activity_goals {
        let monthly = Decimal::from(*monthly_count);
        let per_day = (monthly / total).ceil().to_u32().unwrap_or(0);
        daily_activity_targets.insert(*kind, per_day);
        activity_targets_to_date.insert(*kind, monthly * elapsed / total);
    }

    Ok(GoalPlan {
        monthly_income_goal,
        daily_income_target,
        goal_pace_to_date,
        daily_activity_targets,
        activity_targets_to_date,
    })
}

fn validate(settings: &GoalSettings) -> PaceResult<()> {
    match &settings.monthly_goal {
        MonthlyGoal::Gci { target } => {
            if *target < Decimal::ZERO {
                return Err(PaceError::InvalidConfig {
                    field: "monthly_goal.target".to_string(),
                    reason: "Monthly income goal cannot be negative".to_string(),
                });
            }
        }
        MonthlyGoal::Closings { count, avg_gci } => {
            if *count > 0 && *avg_gci <= Decimal::ZERO {
                return Err(PaceError::InvalidConfig {
                    field: "monthly_goal.avg_gci".to_string(),
                    reason: "Average GCI per closing must be positive".to_string(),
                });
            }
        }
    }

    if let Some(earned) = settings.earned_gci_to_date {
        if earned < Decimal::ZERO {
            return Err(PaceError::InvalidConfig {
                field: "earned_gci_to_date".to_string(),
                reason: "Earned GCI override cannot be negative".to_string(),
            });
        }
    }

    Ok(())
}
