//! CLI domain: parse, route, output, and presentation only.
//! No domain logic; the route table dispatches to the action, auth and definition modules.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{AuthCommands, Cli, Commands};
pub use presentation::{format_definition_text, format_json, format_sample_text};
pub use route::{command_name, RunContext};
