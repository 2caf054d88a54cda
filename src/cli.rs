//! CLI domain: parse, route, output, and presentation only.
//! No resolution logic; the route table drives the variable registry.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::command_name;
pub use output::map_error;
pub use parse::{Cli, Commands};
pub use presentation::{format_get_result, format_list_result, LookupView, VariableView};
pub use route::RunContext;
