//! Terminal commands
//!
//! Every input line is either a slash command or a question.

/// One parsed line of terminal input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Blank line
    Empty,
    /// `/quit` or `/exit`
    Quit,
    /// `/help`
    Help,
    /// `/retry`: regenerate the last failed answer
    Retry,
    /// `/questions`: list the predefined questions
    Questions,
    /// `/suggest <text>`: questions matching a partial input
    Suggest(String),
    /// Anything else is asked as-is
    Ask(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Self::Empty;
        }

        let (head, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        match head {
            "/quit" | "/exit" => Self::Quit,
            "/help" => Self::Help,
            "/retry" => Self::Retry,
            "/questions" => Self::Questions,
            "/suggest" => Self::Suggest(rest.trim().to_string()),
            _ => Self::Ask(line.to_string()),
        }
    }
}

pub const HELP: &str = "\
Type a question and press Enter.
  /suggest <text>  show questions matching <text>
  /questions       list the predefined questions
  /retry           resend the last question that failed
  /quit            exit";
