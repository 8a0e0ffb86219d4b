use crate::sql::{recognize, recognize_exact, tokenize, ParseError, SelectStatement};
use anyhow::Result;
use clap::Parser;
use itertools::Itertools;
use std::{
    fmt::Display,
    io::{self, BufRead, Write},
};
use tracing::info;

/// Command line arguments for the SELECT recognizer
#[derive(Debug, Parser)]
#[command(name = "select-recognizer", version, about = "Recognize SELECT <attributes> FROM <table> statements")]
pub struct Args {
    /// Statement to recognize; starts a prompt when omitted
    pub query: Option<String>,

    /// Reject tokens after the table name
    #[arg(long)]
    pub strict: bool,
}

/// How much of the input a statement has to cover
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Anything after the table name is ignored
    #[default]
    Prefix,
    /// The table name must be the last token
    Exact,
}

impl MatchMode {
    pub fn recognize(self, sql: &str) -> Result<SelectStatement, ParseError> {
        match self {
            MatchMode::Prefix => recognize(sql),
            MatchMode::Exact => recognize_exact(sql),
        }
    }
}

impl From<&Args> for MatchMode {
    fn from(args: &Args) -> Self {
        if args.strict {
            MatchMode::Exact
        } else {
            MatchMode::Prefix
        }
    }
}

/// Dot commands understood by the prompt
#[derive(Debug, Clone, PartialEq)]
pub enum MetaCommand {
    Exit,
    Strict,
    Prefix,
    Tokens(String),
}

impl std::str::FromStr for MetaCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, rest) = s.split_once(' ').unwrap_or((s, ""));
        match (name, rest.trim_matches(' ')) {
            (".exit", "") => Ok(MetaCommand::Exit),
            (".strict", "") => Ok(MetaCommand::Strict),
            (".prefix", "") => Ok(MetaCommand::Prefix),
            (".tokens", _) => Ok(MetaCommand::Tokens(rest.to_string())),
            (".exit" | ".strict" | ".prefix", extra) => {
                Err(format!("Command '{}' takes no argument, got '{}'.", name, extra))
            }
            _ => Err(format!("Unrecognized command '{}'.", s)),
        }
    }
}

impl Display for MetaCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetaCommand::Exit => write!(f, ".exit"),
            MetaCommand::Strict => write!(f, ".strict"),
            MetaCommand::Prefix => write!(f, ".prefix"),
            MetaCommand::Tokens(sql) => write!(f, ".tokens {}", sql),
        }
    }
}

pub struct InputBuffer {
    buffer: String,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
        }
    }

    /// Reads one line, returning false at end of input
    pub fn read_input(&mut self, input: &mut impl BufRead) -> Result<bool> {
        self.buffer.clear();
        io::stdout().flush()?;
        let read = input.read_line(&mut self.buffer)?;
        let line_len = self.buffer.trim_end_matches(&['\r', '\n'][..]).len();
        self.buffer.truncate(line_len);
        Ok(read > 0)
    }
}

pub fn print_prompt(mode: MatchMode) {
    match mode {
        MatchMode::Prefix => print!("select> "),
        MatchMode::Exact => print!("select(strict)> "),
    }
}

/// Recognizes `sql` and writes either the statement or the error.
/// Returns true if the statement was recognized.
pub fn handle_query(sql: &str, mode: MatchMode, out: &mut impl Write) -> Result<bool> {
    match mode.recognize(sql) {
        Ok(stmt) => {
            info!("Statement: {:?}", stmt);
            writeln!(out, "{}", stmt)?;
            Ok(true)
        }
        Err(err) => {
            writeln!(out, "error: {}", err)?;
            Ok(false)
        }
    }
}

/// Handles one line of prompt input. Returns true when the prompt should exit.
pub fn handle_command(line: &str, mode: &mut MatchMode, out: &mut impl Write) -> Result<bool> {
    // Only spaces separate tokens, so tabs and newlines stay part of the query
    let line = line.trim_matches(' ');
    if line.is_empty() {
        return Ok(false);
    }

    if !line.starts_with('.') {
        handle_query(line, *mode, out)?;
        return Ok(false);
    }

    match line.parse::<MetaCommand>() {
        Ok(MetaCommand::Exit) => return Ok(true),
        Ok(MetaCommand::Strict) => *mode = MatchMode::Exact,
        Ok(MetaCommand::Prefix) => *mode = MatchMode::Prefix,
        Ok(MetaCommand::Tokens(sql)) => {
            let tokens = tokenize(&sql);
            writeln!(out, "[{}]", tokens.iter().join(" "))?;
        }
        Err(message) => writeln!(out, "{}", message)?,
    }
    Ok(false)
}

pub fn repl_mode(mut mode: MatchMode) -> Result<()> {
    let mut input_buffer = InputBuffer::new();
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();

    loop {
        print_prompt(mode);
        if !input_buffer.read_input(&mut input)? {
            break Ok(());
        }

        if handle_command(&input_buffer.buffer, &mut mode, &mut stdout)? {
            break Ok(());
        }
    }
}

/// Runs a single query, or the prompt when none is given.
/// Returns false if the single query was not recognized.
pub fn execute_command(args: Args, out: &mut impl Write) -> Result<bool> {
    let mode = MatchMode::from(&args);
    match args.query {
        Some(sql) => handle_query(&sql, mode, out),
        None => {
            repl_mode(mode)?;
            Ok(true)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(lines: &[&str]) -> Result<(String, MatchMode)> {
        let mut mode = MatchMode::default();
        let mut out = Vec::new();
        for line in lines {
            if handle_command(line, &mut mode, &mut out)? {
                break;
            }
        }
        Ok((String::from_utf8(out)?, mode))
    }

    #[test]
    fn test_parse_args() {
        let args = Args::parse_from(["select-recognizer", "--strict", "select * from t"]);
        assert_eq!(args.query.as_deref(), Some("select * from t"));
        assert_eq!(MatchMode::from(&args), MatchMode::Exact);

        let args = Args::parse_from(["select-recognizer"]);
        assert!(args.query.is_none());
        assert_eq!(MatchMode::from(&args), MatchMode::Prefix);
    }

    #[test]
    fn test_meta_command_round_trip() {
        assert_eq!(".exit".parse::<MetaCommand>(), Ok(MetaCommand::Exit));
        assert_eq!(
            ".tokens select *".parse::<MetaCommand>(),
            Ok(MetaCommand::Tokens("select *".to_string()))
        );
        assert_eq!(MetaCommand::Tokens("a,b".to_string()).to_string(), ".tokens a,b");
        assert!(".dbinfo".parse::<MetaCommand>().is_err());
    }

    #[test]
    fn test_meta_commands_reject_arguments() -> Result<()> {
        assert!(".exit now".parse::<MetaCommand>().is_err());
        assert!(".strict foo".parse::<MetaCommand>().is_err());
        assert_eq!(".prefix  ".parse::<MetaCommand>(), Ok(MetaCommand::Prefix));

        let (out, mode) = run(&[".strict foo", ".exit now", "select * from t"])?;
        assert_eq!(mode, MatchMode::Prefix);
        assert_eq!(
            out,
            "Command '.strict' takes no argument, got 'foo'.\n\
             Command '.exit' takes no argument, got 'now'.\n\
             table: t attributes: *\n"
        );
        Ok(())
    }

    #[test]
    fn test_single_query_reports_errors_like_the_prompt() -> Result<()> {
        let mut out = Vec::new();
        let args = Args::parse_from(["select-recognizer", "selct * from t"]);
        assert!(!execute_command(args, &mut out)?);
        assert_eq!(
            String::from_utf8(out)?,
            "error: expected 'select' at token 0, found 'selct'\n"
        );

        let mut out = Vec::new();
        let args = Args::parse_from(["select-recognizer", "--strict", "select a,b from t"]);
        assert!(execute_command(args, &mut out)?);
        assert_eq!(String::from_utf8(out)?, "table: t attributes: a,b\n");
        Ok(())
    }

    #[test]
    fn test_prompt_keeps_tabs_in_query() -> Result<()> {
        let (out, _) = run(&["\tselect * from t", "  select * from t\t"])?;
        assert_eq!(
            out,
            "error: expected 'select' at token 0, found '\tselect'\n\
             table: t\t attributes: *\n"
        );
        Ok(())
    }

    #[test]
    fn test_read_input_strips_only_line_terminator() -> Result<()> {
        let mut buffer = InputBuffer::new();
        let mut input = io::Cursor::new("select * from t\t\r\n");
        assert!(buffer.read_input(&mut input)?);
        assert_eq!(buffer.buffer, "select * from t\t");
        assert!(!buffer.read_input(&mut input)?);
        Ok(())
    }

    #[test]
    fn test_prompt_session() -> Result<()> {
        let (out, mode) = run(&[
            "select foo,bar from students",
            "",
            "select from students",
            ".tokens Select A,B",
            ".strict",
            "select * from students extra",
            ".exit",
            "select * from ignored",
        ])?;

        assert_eq!(mode, MatchMode::Exact);
        assert_eq!(
            out,
            "table: students attributes: foo,bar\n\
             error: empty attribute list at token 1\n\
             [select a , b]\n\
             error: unexpected trailing input at token 4: 'extra'\n"
        );
        Ok(())
    }

    #[test]
    fn test_unknown_meta_command() -> Result<()> {
        let (out, _) = run(&[".tables"])?;
        assert_eq!(out, "Unrecognized command '.tables'.\n");
        Ok(())
    }
}
