use clap::Args;
use serde_json::Value;

use agent_pace_core::snapshot::{self, SnapshotInput};

use crate::input;

/// Arguments for the full progress snapshot
#[derive(Args)]
pub struct SnapshotArgs {
    /// Path to JSON input file
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_snapshot(args: SnapshotArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let snap_input: SnapshotInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file.json> or stdin required for snapshot".into());
    };
    let result = snapshot::compute_snapshot(&snap_input)?;
    Ok(serde_json::to_value(result)?)
}
