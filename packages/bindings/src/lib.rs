use chrono::NaiveDate;
use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Deserialize;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_snapshot(input_json: String) -> NapiResult<String> {
    let input: agent_pace_core::snapshot::SnapshotInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        agent_pace_core::snapshot::compute_snapshot(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Work calendar
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct WorkDaysInput {
    #[serde(default)]
    calendar: agent_pace_core::types::WorkCalendar,
    as_of: NaiveDate,
}

#[napi]
pub fn resolve_work_days(input_json: String) -> NapiResult<String> {
    let input: WorkDaysInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let period = agent_pace_core::types::Period::month_of(input.as_of);
    let breakdown = agent_pace_core::calendar::resolve(&period, &input.calendar, input.as_of);
    serde_json::to_string(&breakdown).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Commission cap
// ---------------------------------------------------------------------------

#[napi]
pub fn summarize_cap(input_json: String) -> NapiResult<String> {
    let input: agent_pace_core::types::CapProgress =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let summary = agent_pace_core::cap::summarize_cap(Some(&input));
    serde_json::to_string(&summary).map_err(to_napi_error)
}
