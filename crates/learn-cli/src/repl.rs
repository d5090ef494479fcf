//! Line handling for the interactive tutor.
//!
//! SQL is buffered until a line ends with `;` or a blank line is entered.
//! Lines starting with `.` on an empty buffer are tutor commands.

use std::str::FromStr;

pub const HELP: &str = "\
Type SQL and end it with ';' (or press Enter on a blank line) to submit.

  .next / .prev       move to the next or previous lesson
  .goto N             jump to lesson N
  .lesson             show the current lesson again
  .hint               reveal the next hint
  .hints              list the hints revealed so far
  .companion [answer] show the companion task, or check an answer for it
  .reset              restore the sample data
  .tables             list the sample tables
  .help               show this help
  .quit               leave the tutor";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DotCommand {
    Next,
    Prev,
    Goto(u32),
    Hint,
    Hints,
    Companion(Option<String>),
    Lesson,
    Reset,
    Tables,
    Help,
    Quit,
}

impl FromStr for DotCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (name, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        let command = match name.to_ascii_lowercase().as_str() {
            ".next" => Self::Next,
            ".prev" => Self::Prev,
            ".goto" => {
                let id = rest
                    .parse()
                    .map_err(|_| format!("usage: .goto N (got '{rest}')"))?;
                Self::Goto(id)
            }
            ".hint" => Self::Hint,
            ".hints" => Self::Hints,
            ".companion" => Self::Companion((!rest.is_empty()).then(|| rest.to_string())),
            ".lesson" => Self::Lesson,
            ".reset" => Self::Reset,
            ".tables" => Self::Tables,
            ".help" => Self::Help,
            ".quit" | ".exit" => Self::Quit,
            other => return Err(format!("unknown command '{other}', try .help")),
        };
        Ok(command)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    /// More lines are needed.
    Pending,
    Query(String),
    Command(DotCommand),
    Invalid(String),
}

#[derive(Debug, Default)]
pub struct InputBuffer {
    lines: Vec<String>,
}

impl InputBuffer {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn feed(&mut self, line: &str) -> Input {
        let trimmed = line.trim();

        if self.lines.is_empty() && trimmed.starts_with('.') {
            return match trimmed.parse() {
                Ok(command) => Input::Command(command),
                Err(message) => Input::Invalid(message),
            };
        }

        if trimmed.is_empty() {
            return if self.lines.is_empty() {
                Input::Pending
            } else {
                Input::Query(self.take())
            };
        }

        self.lines.push(line.trim_end().to_string());
        if trimmed.ends_with(';') {
            Input::Query(self.take())
        } else {
            Input::Pending
        }
    }

    fn take(&mut self) -> String {
        std::mem::take(&mut self.lines).join("\n")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn semicolon_submits_immediately() {
        let mut buffer = InputBuffer::default();
        assert_eq!(
            buffer.feed("SELECT * FROM movies;"),
            Input::Query("SELECT * FROM movies;".into())
        );
        assert!(buffer.is_empty());
    }

    #[test]
    fn multi_line_query_joins_lines() {
        let mut buffer = InputBuffer::default();
        assert_eq!(buffer.feed("SELECT title"), Input::Pending);
        assert_eq!(buffer.feed("  FROM movies"), Input::Pending);
        assert_eq!(
            buffer.feed("  ORDER BY year;"),
            Input::Query("SELECT title\n  FROM movies\n  ORDER BY year;".into())
        );
    }

    #[test]
    fn blank_line_submits_without_semicolon() {
        let mut buffer = InputBuffer::default();
        assert_eq!(buffer.feed(""), Input::Pending);
        buffer.feed("SELECT * FROM movies");
        assert_eq!(buffer.feed("   "), Input::Query("SELECT * FROM movies".into()));
    }

    #[test]
    fn dot_inside_a_query_is_sql() {
        let mut buffer = InputBuffer::default();
        buffer.feed("SELECT movies.title");
        assert_eq!(
            buffer.feed(".5;"),
            Input::Query("SELECT movies.title\n.5;".into())
        );
    }

    #[test]
    fn parses_commands() {
        assert_eq!(".next".parse::<DotCommand>(), Ok(DotCommand::Next));
        assert_eq!(".GOTO 4".parse::<DotCommand>(), Ok(DotCommand::Goto(4)));
        assert_eq!(".companion".parse::<DotCommand>(), Ok(DotCommand::Companion(None)));
        assert_eq!(
            ".companion ctx.db.query(\"movies\").collect()".parse::<DotCommand>(),
            Ok(DotCommand::Companion(Some("ctx.db.query(\"movies\").collect()".into())))
        );
        assert_eq!(".exit".parse::<DotCommand>(), Ok(DotCommand::Quit));
    }

    #[test]
    fn bad_commands_are_reported() {
        let mut buffer = InputBuffer::default();
        assert!(matches!(buffer.feed(".goto x"), Input::Invalid(_)));
        assert!(matches!(buffer.feed(".drop"), Input::Invalid(_)));
        assert!(buffer.is_empty());
    }
}
