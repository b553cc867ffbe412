//! Text commands standing in for the interactive key bindings.
//!
//! A script is a whitespace-separated token stream; commands that take
//! arguments consume the tokens after them. `#` starts a comment that
//! runs to the end of the line.

use std::str::FromStr;

use thiserror::Error;

/// Fraction of the view removed per zoom step.
pub const ZOOM_STEP: f64 = 0.2;
/// Fraction of the view moved per pan step.
pub const PAN_STEP: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    ZoomIn,
    ZoomOut,
    Pan { x_percent: f64, y_percent: f64 },
    Home,
    /// Select palette `1..=4`.
    Palette(u8),
    /// Rotate through the whole palette, presenting every step.
    Cycle,
    /// A single palette rotation.
    Rotate,
    /// Plot the orbits instead of escape counts.
    Orbits,
    ZoomBox { x0: f64, y0: f64, x1: f64, y1: f64 },
    Resize { width: u32, height: u32 },
    Status,
}

#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("unknown command: {0:?}")]
    UnknownCommand(String),

    #[error("`{command}` expects {expected} argument(s)")]
    MissingArgument { command: String, expected: usize },

    #[error("`{command}`: invalid argument {value:?}")]
    InvalidArgument { command: String, value: String },
}

impl FromStr for Command {
    type Err = ParseError;

    /// Parse a command that takes no arguments.
    fn from_str(word: &str) -> Result<Self, Self::Err> {
        Ok(match word {
            "+" | "zoom-in" => Self::ZoomIn,
            "-" | "zoom-out" => Self::ZoomOut,
            "left" => Self::Pan {
                x_percent: -PAN_STEP,
                y_percent: 0.0,
            },
            "right" => Self::Pan {
                x_percent: PAN_STEP,
                y_percent: 0.0,
            },
            "up" => Self::Pan {
                x_percent: 0.0,
                y_percent: -PAN_STEP,
            },
            "down" => Self::Pan {
                x_percent: 0.0,
                y_percent: PAN_STEP,
            },
            "home" => Self::Home,
            "1" => Self::Palette(1),
            "2" => Self::Palette(2),
            "3" => Self::Palette(3),
            "4" => Self::Palette(4),
            "c" | "cycle" => Self::Cycle,
            "r" | "rotate" => Self::Rotate,
            "d" | "orbits" => Self::Orbits,
            "status" => Self::Status,
            other => return Err(ParseError::UnknownCommand(other.to_owned())),
        })
    }
}

/// Parse every command in `script`.
pub fn parse_script(script: &str) -> Result<Vec<Command>, ParseError> {
    let mut tokens = script
        .lines()
        .map(|line| line.split('#').next().unwrap_or_default())
        .flat_map(|line| line.split_whitespace());
    let mut commands = Vec::new();

    while let Some(word) = tokens.next() {
        let command = match word {
            "box" => {
                let [x0, y0, x1, y1] = take_args::<f64, 4>(word, &mut tokens)?;
                Command::ZoomBox { x0, y0, x1, y1 }
            }
            "resize" => {
                let [width, height] = take_args::<u32, 2>(word, &mut tokens)?;
                Command::Resize { width, height }
            }
            other => other.parse()?,
        };
        commands.push(command);
    }
    Ok(commands)
}

fn take_args<'a, T: FromStr + Copy + Default, const N: usize>(
    command: &str,
    tokens: &mut impl Iterator<Item = &'a str>,
) -> Result<[T; N], ParseError> {
    let mut args = [T::default(); N];
    for slot in &mut args {
        let token = tokens.next().ok_or_else(|| ParseError::MissingArgument {
            command: command.to_owned(),
            expected: N,
        })?;
        *slot = token.parse().map_err(|_| ParseError::InvalidArgument {
            command: command.to_owned(),
            value: token.to_owned(),
        })?;
    }
    Ok(args)
}
