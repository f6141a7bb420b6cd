//! Tools command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::mcp::definitions;

/// List the tool catalog.
pub fn run_tools(settings: &Settings) {
    Output::header("Available tools");
    for tool in definitions(&settings.limits) {
        Output::tool(&tool.name, &tool.description);
    }
}
