//! Line commands understood by the interactive loop.

use derive_more::Display;
use strictly_clash::Name;
use strictly_reversi::{Color, Position};

/// One user command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start a game, remote when named.
    New {
        /// Owner color.
        color: Color,
        /// Record name for a remote game.
        name: Option<Name>,
    },
    /// Join a stored game.
    Join(Name),
    /// Play a disc.
    Play(Position),
    /// Pass the turn.
    Pass,
    /// Reload a remote game.
    Refresh,
    /// Poll until it is our turn.
    Wait,
    /// Toggle target highlighting.
    Targets(bool),
    /// Print the board.
    Show,
    /// Finish the session and quit.
    Exit,
}

/// Unparseable command line.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum CommandError {
    /// Blank line.
    #[display("Empty command")]
    Empty,
    /// Unknown verb.
    #[display("Unknown command '{}'", _0)]
    Unknown(String),
    /// Known verb with bad arguments.
    #[display("Usage: {}", _0)]
    Usage(&'static str),
    /// Argument failed validation.
    #[display("{}", _0)]
    Invalid(String),
}

impl std::error::Error for CommandError {}

impl Command {
    /// Parses a line such as `new white g1`, `play 4C` or `targets on`.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut words = line.split_whitespace();
        let verb = words.next().ok_or(CommandError::Empty)?.to_ascii_lowercase();
        let args: Vec<&str> = words.collect();

        match (verb.as_str(), args.as_slice()) {
            ("new", []) => Ok(Command::New {
                color: Color::Black,
                name: None,
            }),
            ("new", [first]) => Ok(match first.parse::<Color>() {
                Ok(color) => Command::New { color, name: None },
                Err(_) => Command::New {
                    color: Color::Black,
                    name: Some(parse_name(first)?),
                },
            }),
            ("new", [color, name]) => Ok(Command::New {
                color: parse_color(color)?,
                name: Some(parse_name(name)?),
            }),
            ("new", _) => Err(CommandError::Usage("new [BLACK|WHITE] [name]")),
            ("join", [name]) => Ok(Command::Join(parse_name(name)?)),
            ("join", _) => Err(CommandError::Usage("join <name>")),
            ("play", [pos]) => pos
                .parse()
                .map(Command::Play)
                .map_err(|e: strictly_reversi::PositionError| CommandError::Invalid(e.to_string())),
            ("play", _) => Err(CommandError::Usage("play <position>")),
            ("pass", []) => Ok(Command::Pass),
            ("refresh", []) => Ok(Command::Refresh),
            ("wait", []) => Ok(Command::Wait),
            ("targets", [flag]) => match flag.to_ascii_lowercase().as_str() {
                "on" => Ok(Command::Targets(true)),
                "off" => Ok(Command::Targets(false)),
                _ => Err(CommandError::Usage("targets on|off")),
            },
            ("targets", _) => Err(CommandError::Usage("targets on|off")),
            ("show", []) => Ok(Command::Show),
            ("exit" | "quit", []) => Ok(Command::Exit),
            ("pass" | "refresh" | "wait" | "show" | "exit" | "quit", _) => {
                Err(CommandError::Usage("this command takes no arguments"))
            }
            (other, _) => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn parse_color(s: &str) -> Result<Color, CommandError> {
    s.parse()
        .map_err(|_| CommandError::Invalid(format!("Invalid color '{}'", s)))
}

fn parse_name(s: &str) -> Result<Name, CommandError> {
    Name::new(s).map_err(|e| CommandError::Invalid(e.to_string()))
}
