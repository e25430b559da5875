use std::str::FromStr;

use thiserror::Error;

use termbrot_core::Command;

/// Default factor for `in` / `out` without an argument.
pub const DEFAULT_ZOOM_FACTOR: f64 = 2.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandParseError {
    #[error("empty command")]
    Empty,

    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),

    #[error("`{command}` expects {expected}")]
    Arity {
        command: &'static str,
        expected: &'static str,
    },

    #[error("`{0}` is not a number")]
    Number(String),
}

/// One line of driver input.
#[derive(Debug, Clone, PartialEq)]
pub enum DriverCommand {
    /// A state transition handed to the session.
    Apply(Command),
    /// Reset the view, optionally at a new resolution.
    Reset(Option<(u32, u32)>),
    Show,
    Presets,
    Help,
    Quit,
}

impl FromStr for DriverCommand {
    type Err = CommandParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let head = words.next().ok_or(CommandParseError::Empty)?;
        let args: Vec<&str> = words.collect();

        let cmd = match (head, args.as_slice()) {
            ("pan", [dx, dy]) => Self::Apply(Command::Pan {
                dx: number(dx)?,
                dy: number(dy)?,
            }),
            ("pan", _) => return Err(arity("pan", "two numbers: <dx> <dy>")),

            ("in", []) => Self::Apply(Command::ZoomIn(DEFAULT_ZOOM_FACTOR)),
            ("in", [f]) => Self::Apply(Command::ZoomIn(number(f)?)),
            ("out", []) => Self::Apply(Command::ZoomOut(DEFAULT_ZOOM_FACTOR)),
            ("out", [f]) => Self::Apply(Command::ZoomOut(number(f)?)),
            ("in" | "out", _) => return Err(arity("in/out", "at most one factor")),

            ("center", [re, im]) => Self::Apply(Command::SetCenter {
                re: number(re)?,
                im: number(im)?,
            }),
            ("center", _) => return Err(arity("center", "two numbers: <re> <im>")),

            ("zoom", [z]) => Self::Apply(Command::SetZoom(number(z)?)),
            ("zoom", _) => return Err(arity("zoom", "one number")),

            ("reset", []) => Self::Reset(None),
            ("reset", [rows, cols]) => Self::Reset(Some((number(rows)?, number(cols)?))),
            ("reset", _) => return Err(arity("reset", "nothing or <rows> <cols>")),

            ("resize", [rows, cols]) => Self::Apply(Command::Resize {
                rows: number(rows)?,
                cols: number(cols)?,
            }),
            ("resize", _) => return Err(arity("resize", "<rows> <cols>")),

            ("mode", []) => Self::Apply(Command::ToggleMode),
            ("mode", _) => return Err(arity("mode", "no arguments")),

            ("color", []) => Self::Apply(Command::CycleColorScheme),
            ("color", [i]) => Self::Apply(Command::SetColorScheme(number(i)?)),
            ("color", _) => return Err(arity("color", "at most one index")),

            ("iter", [n]) => Self::Apply(parse_iterations(n)?),
            ("iter", _) => return Err(arity("iter", "<n>, +<n> or -<n>")),

            ("next", []) => Self::Apply(Command::NextPreset),
            ("prev", []) => Self::Apply(Command::PrevPreset),
            ("show", []) => Self::Show,
            ("presets", []) => Self::Presets,
            ("help", []) => Self::Help,
            ("quit" | "q", []) => Self::Quit,
            ("next" | "prev" | "show" | "presets" | "help" | "quit" | "q", _) => {
                return Err(arity("this command", "no arguments"))
            }

            (other, _) => return Err(CommandParseError::Unknown(other.to_string())),
        };
        Ok(cmd)
    }
}

/// `iter 500` sets, `iter +100` / `iter -100` adjust.
fn parse_iterations(arg: &str) -> Result<Command, CommandParseError> {
    if arg.starts_with('+') || arg.starts_with('-') {
        Ok(Command::AdjustMaxIterations(number(arg)?))
    } else {
        Ok(Command::SetMaxIterations(number(arg)?))
    }
}

fn number<T: FromStr>(word: &str) -> Result<T, CommandParseError> {
    word.parse()
        .map_err(|_| CommandParseError::Number(word.to_string()))
}

fn arity(command: &'static str, expected: &'static str) -> CommandParseError {
    CommandParseError::Arity { command, expected }
}

pub const HELP: &str = "\
commands:
  pan <dx> <dy>      shift the view (scaled by 1/zoom)
  in [f] | out [f]   zoom by f (default 2)
  center <re> <im>   jump to a point
  zoom <z>           set absolute zoom
  reset [rows cols]  back to the default view
  resize <rows> <cols>
  mode               toggle Mandelbrot / Julia
  color [i]          cycle or set the glyph scheme (0-4)
  iter <n|+n|-n>     set or adjust the iteration cap
  next | prev        step through presets
  presets            list presets
  show               print the current frame
  quit";
