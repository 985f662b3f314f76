//! Command-line tokenizer

use crate::error::ShellError;

/// Output redirection attached to a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Redirect {
    /// `> file`
    Truncate(String),
    /// `>> file`
    Append(String),
}

impl Redirect {
    pub fn target(&self) -> &str {
        match self {
            Redirect::Truncate(target) | Redirect::Append(target) => target,
        }
    }
}

/// One parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub name: String,
    pub args: Vec<String>,
    pub redirect: Option<Redirect>,
}

impl Command {
    /// Arguments from `start` on, joined by single spaces.
    pub fn joined_args(&self, start: usize) -> String {
        self.args.get(start..).map(|rest| rest.join(" ")).unwrap_or_default()
    }
}

/// Split a line on whitespace and pull out `>` / `>>` redirections.
///
/// Returns `Ok(None)` for a blank line. A redirection may appear anywhere on
/// the line; when several are given the last one wins.
pub fn parse_line(line: &str) -> Result<Option<Command>, ShellError> {
    let mut words = Vec::new();
    let mut redirect = None;
    let mut tokens = line.split_whitespace();

    while let Some(token) = tokens.next() {
        match token {
            ">" | ">>" => {
                let target = tokens
                    .next()
                    .filter(|t| *t != ">" && *t != ">>")
                    .ok_or_else(|| ShellError::MissingRedirectTarget(token.to_string()))?;
                redirect = Some(if token == ">" {
                    Redirect::Truncate(target.to_string())
                } else {
                    Redirect::Append(target.to_string())
                });
            }
            word => words.push(word.to_string()),
        }
    }

    let mut words = words.into_iter();
    let Some(name) = words.next() else {
        return Ok(None);
    };
    Ok(Some(Command {
        name,
        args: words.collect(),
        redirect,
    }))
}
