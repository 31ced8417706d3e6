use clap::Args;
use serde_json::Value;

use agent_pace_core::cap::summarize_cap;
use agent_pace_core::types::CapProgress;

use crate::input;

/// Arguments for commission cap summary
#[derive(Args)]
pub struct CapArgs {
    /// Path to JSON input file
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_cap(args: CapArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let cap_input: CapProgress = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file.json> or stdin required for cap summary".into());
    };

    let summary = summarize_cap(Some(&cap_input));
    Ok(serde_json::json!({ "result": summary }))
}
