//! # Shell Commands
//!
//! One command per line. Arguments are separated by whitespace; wrap an
//! argument in double quotes to keep spaces in it.
//!
//! - `ls` - Show the current folder
//! - `cd <id|..|/>` - Enter a folder, its parent, or root
//! - `mkdir <name>` - Create a folder inside the current one
//! - `rmdir <id>` - Delete a folder, moving its files to root
//! - `upload <path>...` - Upload local files to root
//! - `rm [<id>...]` - Delete files, or the selection when no ids are given
//! - `mv <file-id> <folder-id|/>` - Move a file
//! - `select <id|all|none>` - Change the selection in the current folder
//! - `cat <id>` - Print a file's content
//! - `recent [n]` - First files in upload order
//! - `tree` - Show the folder hierarchy
//! - `find [query] [--kind images|documents|other]` - Search every folder
//! - `du` - Storage usage
//! - `notifications` - Notification history
//! - `help`, `quit`

use std::path::PathBuf;

use thiserror::Error;

use filedesk_core::types::{FileId, FolderId};
use filedesk_service::KindFilter;

/// Shell command error types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShellError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command: {0} (try 'help')")]
    UnknownCommand(String),

    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),

    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("Invalid count: {0}")]
    InvalidCount(String),

    #[error("Unexpected argument: {0}")]
    UnexpectedArgument(String),

    #[error("{0}")]
    InvalidKind(String),

    #[error("Unterminated quote")]
    UnterminatedQuote,
}

/// Where `cd` goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CdTarget {
    /// The root level
    Root,
    /// The parent of the current folder
    Up,
    /// A folder by id
    Folder(FolderId),
}

/// What `select` does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectTarget {
    /// Toggle every visible file
    All,
    /// Clear the selection
    None,
    /// Toggle one file
    File(FileId),
}

/// Shell commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Ls,
    Cd(CdTarget),
    Mkdir { name: String },
    Rmdir { id: FolderId },
    Upload { paths: Vec<PathBuf> },
    Rm { ids: Vec<FileId> },
    Mv { file: FileId, target: Option<FolderId> },
    Select(SelectTarget),
    Cat { id: FileId },
    Recent { count: Option<usize> },
    Tree,
    Find { query: String, kind: KindFilter },
    Du,
    Notifications,
    Help,
    Quit,
}

/// Shell command parser
pub struct ShellCommandParser;

impl ShellCommandParser {
    /// Parses one input line
    pub fn parse(input: &str) -> Result<ShellCommand, ShellError> {
        let tokens = tokenize(input)?;
        let Some((head, args)) = tokens.split_first() else {
            return Err(ShellError::Empty);
        };

        match head.to_lowercase().as_str() {
            "ls" | "dir" => no_args(args, ShellCommand::Ls),
            "cd" => Self::parse_cd(args),
            "mkdir" => {
                if args.is_empty() {
                    return Err(ShellError::MissingArgument("folder name"));
                }
                Ok(ShellCommand::Mkdir {
                    name: args.join(" "),
                })
            }
            "rmdir" => Ok(ShellCommand::Rmdir {
                id: single_id(args, "folder id")?,
            }),
            "upload" => {
                if args.is_empty() {
                    return Err(ShellError::MissingArgument("file path"));
                }
                Ok(ShellCommand::Upload {
                    paths: args.iter().map(PathBuf::from).collect(),
                })
            }
            "rm" | "del" => Ok(ShellCommand::Rm {
                ids: args.iter().map(|a| parse_id(a)).collect::<Result<_, _>>()?,
            }),
            "mv" => Self::parse_mv(args),
            "select" => Self::parse_select(args),
            "cat" => Ok(ShellCommand::Cat {
                id: single_id(args, "file id")?,
            }),
            "recent" => Self::parse_recent(args),
            "tree" => no_args(args, ShellCommand::Tree),
            "find" => Self::parse_find(args),
            "du" => no_args(args, ShellCommand::Du),
            "notifications" | "log" => no_args(args, ShellCommand::Notifications),
            "help" | "?" => Ok(ShellCommand::Help),
            "quit" | "exit" => Ok(ShellCommand::Quit),
            other => Err(ShellError::UnknownCommand(other.to_string())),
        }
    }

    fn parse_cd(args: &[String]) -> Result<ShellCommand, ShellError> {
        let target = match args {
            [] => CdTarget::Root,
            [arg] => match arg.as_str() {
                "/" => CdTarget::Root,
                ".." => CdTarget::Up,
                raw => CdTarget::Folder(parse_id(raw)?),
            },
            [_, extra, ..] => return Err(ShellError::UnexpectedArgument(extra.clone())),
        };
        Ok(ShellCommand::Cd(target))
    }

    fn parse_mv(args: &[String]) -> Result<ShellCommand, ShellError> {
        match args {
            [] => Err(ShellError::MissingArgument("file id")),
            [_] => Err(ShellError::MissingArgument("target folder id or /")),
            [file, target] => Ok(ShellCommand::Mv {
                file: parse_id(file)?,
                target: match target.as_str() {
                    "/" => None,
                    raw => Some(parse_id(raw)?),
                },
            }),
            [_, _, extra, ..] => Err(ShellError::UnexpectedArgument(extra.clone())),
        }
    }

    fn parse_select(args: &[String]) -> Result<ShellCommand, ShellError> {
        let target = match args {
            [] => return Err(ShellError::MissingArgument("file id, all, or none")),
            [arg] => match arg.to_lowercase().as_str() {
                "all" => SelectTarget::All,
                "none" => SelectTarget::None,
                raw => SelectTarget::File(parse_id(raw)?),
            },
            [_, extra, ..] => return Err(ShellError::UnexpectedArgument(extra.clone())),
        };
        Ok(ShellCommand::Select(target))
    }

    fn parse_recent(args: &[String]) -> Result<ShellCommand, ShellError> {
        let count = match args {
            [] => None,
            [raw] => Some(
                raw.parse::<usize>()
                    .map_err(|_| ShellError::InvalidCount(raw.clone()))?,
            ),
            [_, extra, ..] => return Err(ShellError::UnexpectedArgument(extra.clone())),
        };
        Ok(ShellCommand::Recent { count })
    }

    fn parse_find(args: &[String]) -> Result<ShellCommand, ShellError> {
        let mut kind = KindFilter::All;
        let mut words = Vec::new();
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            if arg == "--kind" || arg == "-k" {
                let value = iter.next().ok_or(ShellError::MissingArgument("kind"))?;
                kind = value.parse().map_err(ShellError::InvalidKind)?;
            } else {
                words.push(arg.as_str());
            }
        }
        Ok(ShellCommand::Find {
            query: words.join(" "),
            kind,
        })
    }
}

fn no_args(args: &[String], command: ShellCommand) -> Result<ShellCommand, ShellError> {
    match args.first() {
        Some(extra) => Err(ShellError::UnexpectedArgument(extra.clone())),
        None => Ok(command),
    }
}

fn single_id<T: std::str::FromStr>(
    args: &[String],
    what: &'static str,
) -> Result<T, ShellError> {
    match args {
        [] => Err(ShellError::MissingArgument(what)),
        [raw] => parse_id(raw),
        [_, extra, ..] => Err(ShellError::UnexpectedArgument(extra.clone())),
    }
}

fn parse_id<T: std::str::FromStr>(raw: &str) -> Result<T, ShellError> {
    raw.parse().map_err(|_| ShellError::InvalidId(raw.to_string()))
}

/// Split a line on whitespace, honouring double quotes.
fn tokenize(input: &str) -> Result<Vec<String>, ShellError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut in_quotes = false;

    for ch in input.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                in_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if in_quotes {
        return Err(ShellError::UnterminatedQuote);
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}
