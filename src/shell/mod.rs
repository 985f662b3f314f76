//! Interactive command interpreter over a [`FileSystem`] session.
//!
//! `Shell::execute` takes one input line and returns the text to show. Errors
//! are rendered as `<command>: <error>` and never end the session; only
//! `exit` and `quit` do.

pub mod parse;
pub mod render;

pub use parse::{parse_line, Command, Redirect};

use crate::config::ShellConfig;
use crate::error::ShellError;
use crate::namespace::{Entry, FileSystem};
use owo_colors::OwoColorize;
use tracing::{debug, warn};

const HELP: &str = "\
Commands:
  pwd                        print the current directory
  ls [-l] [path]             list a directory
  cd [path]                  change directory (no argument: /)
  mkdir [-p] <path>...       create directories
  touch <path>...            create empty files
  cat <file>                 print a file
  echo <text> [> f | >> f]   print text, or write / append it to a file
  rm [-r] <path>             remove a file, or a directory with -r
  chmod <mode> <path>        set permissions, e.g. chmod 644 notes.txt
  find <pattern>             find names containing pattern below the current directory
  tree [path]                show the directory tree
  stats [path]               show directory index statistics
  clear                      clear the screen
  debug                      toggle debug mode
  ed <file> <op> [args]      edit a file in place:
       insert <pos> <text>     insert text at a byte offset
       delete <substring>      delete the first occurrence
       append <text>           append text
       find <substring>        print the offset of the first occurrence
  help                       show this help
  exit | quit                leave the shell";

const ED_USAGE: &str =
    "ed <file> insert <pos> <text> | delete <substring> | append <text> | find <substring>";

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[1;1H";

/// Result of executing one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellOutcome {
    /// Keep reading; show this text (may be empty).
    Continue(String),
    /// Leave the loop.
    Exit,
}

pub struct Shell {
    fs: FileSystem,
    config: ShellConfig,
}

impl Shell {
    /// Start a session, creating the configured seed directories.
    pub fn new(config: ShellConfig) -> Self {
        let mut fs = FileSystem::new();
        for dir in &config.seed_directories {
            if let Err(e) = fs.mkdir_all(dir) {
                warn!(directory = %dir, error = %e, "could not create seed directory");
            }
        }
        fs.set_debug(config.debug);
        Self { fs, config }
    }

    pub fn filesystem(&self) -> &FileSystem {
        &self.fs
    }

    pub fn filesystem_mut(&mut self) -> &mut FileSystem {
        &mut self.fs
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    /// `user@treefs:<cwd>$ `
    pub fn prompt(&self) -> String {
        let host = format!("{}@treefs", self.config.user);
        let cwd = self.fs.pwd();
        if self.config.color {
            format!("{}:{}$ ", host.green().bold(), cwd.blue().bold())
        } else {
            format!("{}:{}$ ", host, cwd)
        }
    }

    pub fn execute(&mut self, line: &str) -> ShellOutcome {
        let command = match parse_line(line) {
            Ok(Some(command)) => command,
            Ok(None) => return ShellOutcome::Continue(String::new()),
            Err(e) => return ShellOutcome::Continue(format!("treefs: {}", e)),
        };

        if command.name == "exit" || command.name == "quit" {
            return ShellOutcome::Exit;
        }

        debug!(command = %command.name, args = ?command.args, "execute");
        let result = self
            .run(&command)
            .and_then(|output| self.redirect(&command, output));

        match result {
            Ok(output) => ShellOutcome::Continue(output),
            Err(e) => ShellOutcome::Continue(format!("{}: {}", command.name, e)),
        }
    }

    /// Send output to the redirection target, if any.
    fn redirect(&self, command: &Command, output: String) -> Result<String, ShellError> {
        let Some(redirect) = &command.redirect else {
            return Ok(output);
        };
        let text = format!("{}\n", output);
        match redirect {
            Redirect::Truncate(target) => self.fs.write(target, &text)?,
            Redirect::Append(target) => self.fs.append(target, &text)?,
        }
        Ok(String::new())
    }

    fn run(&mut self, command: &Command) -> Result<String, ShellError> {
        let args = &command.args;
        match command.name.as_str() {
            "help" => Ok(HELP.to_string()),
            "pwd" => Ok(self.fs.pwd()),
            "ls" => self.ls(args),
            "cd" => {
                self.fs.cd(args.first().map_or("/", String::as_str))?;
                Ok(String::new())
            }
            "mkdir" => self.mkdir(args),
            "touch" => self.touch(args),
            "cat" => {
                let file = args.first().ok_or(ShellError::MissingOperand)?;
                let text = self.fs.read(file)?;
                Ok(text.strip_suffix('\n').unwrap_or(&text).to_string())
            }
            "echo" => Ok(command.joined_args(0)),
            "rm" => self.rm(args),
            "chmod" => {
                let (Some(mode), Some(target)) = (args.first(), args.get(1)) else {
                    return Err(ShellError::MissingOperand);
                };
                self.fs.chmod(mode, target)?;
                Ok(String::new())
            }
            "find" => {
                let pattern = args.first().ok_or(ShellError::MissingOperand)?;
                Ok(self.fs.search(pattern, ".")?.join("\n"))
            }
            "tree" => {
                let target = args.first().map_or("/", String::as_str);
                let label = self.fs.resolve(target)?.path();
                let visits = self.fs.walk(target)?;
                Ok(render::format_tree(&label, &visits, self.config.color))
            }
            "stats" => {
                let target = args.first().map_or(".", String::as_str);
                let label = self.fs.resolve(target)?.path();
                let stats = self.fs.index_stats(target)?;
                Ok(render::format_stats(&label, &stats))
            }
            "clear" => Ok(CLEAR_SCREEN.to_string()),
            "debug" => {
                let on = self.fs.toggle_debug();
                Ok(format!("debug mode: {}", if on { "on" } else { "off" }))
            }
            "ed" => self.ed(command),
            _ => Err(ShellError::UnknownCommand),
        }
    }

    fn ls(&self, args: &[String]) -> Result<String, ShellError> {
        let long = args.iter().any(|a| a == "-l");
        let target = args
            .iter()
            .find(|a| !a.starts_with('-'))
            .map_or(".", String::as_str);
        let entries = self.fs.list(target)?;
        Ok(if long {
            render::format_long_listing(&entries, self.config.color)
        } else {
            render::format_listing(&entries, self.config.color)
        })
    }

    fn mkdir(&self, args: &[String]) -> Result<String, ShellError> {
        let parents = args.iter().any(|a| a == "-p");
        let targets: Vec<&String> = args.iter().filter(|a| *a != "-p").collect();
        if targets.is_empty() {
            return Err(ShellError::MissingOperand);
        }

        let mut notes = Vec::new();
        for target in targets {
            let existed = self.fs.resolve(target).is_ok();
            let created = if parents {
                self.fs.mkdir_all(target)?
            } else {
                self.fs.mkdir(target)?
            };
            if !existed {
                notes.extend(self.insert_note(&created));
            }
        }
        Ok(notes.join("\n"))
    }

    fn touch(&self, args: &[String]) -> Result<String, ShellError> {
        if args.is_empty() {
            return Err(ShellError::MissingOperand);
        }
        let mut notes = Vec::new();
        for target in args {
            let existed = self.fs.resolve(target).is_ok();
            let entry = self.fs.touch(target)?;
            if !existed {
                notes.extend(self.insert_note(&entry));
            }
        }
        Ok(notes.join("\n"))
    }

    /// Debug-mode line describing an index insertion.
    fn insert_note(&self, entry: &Entry) -> Option<String> {
        if !self.fs.is_debug() {
            return None;
        }
        let parent = entry.parent().map_or_else(|| "/".to_string(), |p| p.path());
        Some(format!(
            "[debug] index insert: '{}' into {} (hash {})",
            entry.name(),
            parent,
            entry.name_hash()
        ))
    }

    fn rm(&mut self, args: &[String]) -> Result<String, ShellError> {
        let recursive = args.iter().any(|a| a == "-r" || a == "-rf");
        let target = args
            .iter()
            .find(|a| !a.starts_with('-'))
            .ok_or(ShellError::MissingOperand)?;
        self.fs.remove(target, recursive)?;
        Ok(String::new())
    }

    fn ed(&self, command: &Command) -> Result<String, ShellError> {
        let args = &command.args;
        let (Some(file), Some(op)) = (args.first(), args.get(1)) else {
            return Err(ShellError::Usage(ED_USAGE));
        };
        if args.len() < 3 {
            return Err(ShellError::Usage(ED_USAGE));
        }

        match op.as_str() {
            "insert" => {
                if args.len() < 4 {
                    return Err(ShellError::Usage(ED_USAGE));
                }
                let pos: usize = args[2]
                    .parse()
                    .map_err(|_| ShellError::InvalidNumber(args[2].clone()))?;
                self.fs.insert(file, pos, &command.joined_args(3))?;
                Ok(format!("inserted at position {}", pos))
            }
            "delete" => {
                let pos = self.fs.delete(file, &command.joined_args(2))?;
                Ok(format!("deleted at position {}", pos))
            }
            "append" => {
                let text = command.joined_args(2);
                self.fs.append(file, &text)?;
                Ok(format!("appended {} bytes", text.len()))
            }
            "find" => {
                let needle = command.joined_args(2);
                Ok(match self.fs.find_in_file(file, &needle)? {
                    Some(pos) => format!("found at position {}", pos),
                    None => format!("{:?} not found", needle),
                })
            }
            _ => Err(ShellError::Usage(ED_USAGE)),
        }
    }
}
