//! CLI domain: parse, route and output only.
//! The route table hands each command to the shell or the config layer.

mod output;
mod parse;
mod route;

pub use output::map_error;
pub use parse::{Cli, Commands};
pub use route::RunContext;
