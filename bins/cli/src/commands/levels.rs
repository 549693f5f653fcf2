//! Levels command handler.

use crate::CliOutput;
use crate::error::{CliError, ExitCode};
use fanlog_facade::Level;

/// List level names from most to least verbose.
pub fn run_levels(json: bool) -> Result<CliOutput, CliError> {
    let names: Vec<&str> = Level::ALL.iter().map(|level| level.as_str()).collect();
    let stdout = if json {
        let mut output = serde_json::to_string(&names)?;
        output.push('\n');
        output
    } else {
        names.iter().fold(String::new(), |mut output, name| {
            output.push_str(name);
            output.push('\n');
            output
        })
    };

    Ok(CliOutput {
        stdout,
        stderr: String::new(),
        exit_code: ExitCode::Ok,
    })
}
