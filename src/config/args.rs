use std::path::PathBuf;

use super::config::{Config, ConfigError, parse_color, parse_rotation};
use crate::display::matrix::{Rgb, Rotation};

/// Command line options. Anything set here wins over the config file.
#[derive(Debug, Default, PartialEq)]
pub struct CliArgs {
    pub config_path: Option<PathBuf>,
    pub log_path: Option<PathBuf>,
    pub verbose: bool,
    pub help: bool,
    pub work_minutes: Option<f64>,
    pub short_break_minutes: Option<f64>,
    pub long_break_minutes: Option<f64>,
    pub low_light: bool,
    pub rotation: Option<Rotation>,
    pub check: Option<Rgb>,
    pub work_tick: Option<Rgb>,
    pub break_tick: Option<Rgb>,
    pub work_face: Option<Rgb>,
    pub break_face: Option<Rgb>,
}

impl CliArgs {
    /// Parse arguments, not including the program name.
    pub fn parse_from<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut cli = CliArgs::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" | "-c" => cli.config_path = Some(PathBuf::from(value(&arg, args.next())?)),
                "--log" | "-l" => cli.log_path = Some(PathBuf::from(value(&arg, args.next())?)),
                "--verbose" | "-v" => cli.verbose = true,
                "--help" | "-h" => cli.help = true,
                "--low-light" => cli.low_light = true,
                "--work" => cli.work_minutes = Some(number(&arg, args.next())?),
                "--short-break" => cli.short_break_minutes = Some(number(&arg, args.next())?),
                "--long-break" => cli.long_break_minutes = Some(number(&arg, args.next())?),
                "--rotation" => {
                    let text = value(&arg, args.next())?;
                    let degrees = text
                        .parse()
                        .map_err(|_| ConfigError::InvalidArgument(format!("{arg} {text}")))?;
                    cli.rotation = Some(parse_rotation(degrees)?);
                }
                "--check" => cli.check = Some(parse_color(&value(&arg, args.next())?)?),
                "--work-tick" => cli.work_tick = Some(parse_color(&value(&arg, args.next())?)?),
                "--break-tick" => cli.break_tick = Some(parse_color(&value(&arg, args.next())?)?),
                "--work-face" => cli.work_face = Some(parse_color(&value(&arg, args.next())?)?),
                "--break-face" => cli.break_face = Some(parse_color(&value(&arg, args.next())?)?),
                other => return Err(ConfigError::InvalidArgument(format!("unknown option {other}"))),
            }
        }

        Ok(cli)
    }

    /// Layer these options over `config`.
    pub fn apply(&self, config: &mut Config) {
        if let Some(minutes) = self.work_minutes {
            config.work_minutes = minutes;
        }
        if let Some(minutes) = self.short_break_minutes {
            config.short_break_minutes = minutes;
        }
        if let Some(minutes) = self.long_break_minutes {
            config.long_break_minutes = minutes;
        }
        if self.low_light {
            config.low_light = true;
        }
        if let Some(rotation) = self.rotation {
            config.rotation = rotation;
        }

        let colors = &mut config.colors;
        let overrides = [
            (&mut colors.check, self.check),
            (&mut colors.work_tick, self.work_tick),
            (&mut colors.break_tick, self.break_tick),
            (&mut colors.work_face, self.work_face),
            (&mut colors.break_face, self.break_face),
        ];
        for (slot, color) in overrides {
            if let Some(color) = color {
                *slot = color;
            }
        }
    }
}

fn value(flag: &str, next: Option<String>) -> Result<String, ConfigError> {
    next.ok_or_else(|| ConfigError::InvalidArgument(format!("{flag} needs a value")))
}

fn number(flag: &str, next: Option<String>) -> Result<f64, ConfigError> {
    let text = value(flag, next)?;
    text.parse()
        .map_err(|_| ConfigError::InvalidArgument(format!("{flag} {text}")))
}

pub fn print_help() {
    println!("pomodoro_matrix - Pomodoro timer for an 8x8 LED matrix");
    println!();
    println!("USAGE:");
    println!("    pomodoro_matrix [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -c, --config <PATH>       JSON config file");
    println!("        --work <MIN>          Work phase length (default 25)");
    println!("        --short-break <MIN>   Short break length (default 5)");
    println!("        --long-break <MIN>    Long break length (default 30)");
    println!("        --low-light           Dim the matrix");
    println!("        --rotation <DEG>      Rotate the matrix by 0, 90, 180 or 270 degrees");
    println!("        --check <COLOR>       Checkmark color");
    println!("        --work-tick <COLOR>   Clock ring color while working");
    println!("        --break-tick <COLOR>  Clock ring color on a break");
    println!("        --work-face <COLOR>   Clock face color while working");
    println!("        --break-face <COLOR>  Clock face color on a break");
    println!("    -l, --log <PATH>          Log file (default ~/.local/share/pomodoro_matrix/pomodoro.log)");
    println!("    -v, --verbose             Debug logging");
    println!("    -h, --help                Print this help message");
    println!();
    println!("COLORS are \"#rrggbb\" or \"r,g,b\".");
    println!("Press Enter to quit. RUST_LOG overrides the log level.");
}
