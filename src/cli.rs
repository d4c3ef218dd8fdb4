// File: ./src/cli.rs
//! Command-line argument handling, input reading and help text.
use anyhow::{Context, Result, bail};
use log::LevelFilter;
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Emit an iCalendar file.
    Ics,
    /// Human-readable events plus diagnostics.
    Check,
    Json,
    /// Print the range a calendar sync would clear.
    Window,
    /// Show the effective config; `init` writes the defaults to disk.
    Config { init: bool },
    Help,
    Version,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cli {
    pub command: Command,
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub root: Option<PathBuf>,
    pub timezone: Option<String>,
    /// Overrides the configured log level.
    pub log_level: Option<LevelFilter>,
}

impl Cli {
    /// Parses arguments (without the binary name).
    pub fn parse<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut cli = Cli {
            command: Command::Help,
            input: None,
            output: None,
            root: None,
            timezone: None,
            log_level: None,
        };
        let mut command: Option<Command> = None;
        let mut args = args.into_iter().map(Into::<String>::into);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" | "help" => return Ok(cli),
                "-V" | "--version" => {
                    cli.command = Command::Version;
                    return Ok(cli);
                }
                "-r" | "--root" => {
                    cli.root = Some(PathBuf::from(expect_value(&arg, args.next())?))
                }
                "-o" | "--output" => {
                    cli.output = Some(PathBuf::from(expect_value(&arg, args.next())?))
                }
                "--tz" => cli.timezone = Some(expect_value(&arg, args.next())?),
                "-v" | "--verbose" => cli.log_level = Some(LevelFilter::Debug),
                "-q" | "--quiet" => cli.log_level = Some(LevelFilter::Error),
                flag if flag.starts_with('-') && flag != "-" => {
                    bail!("Unknown option '{}'. See --help.", flag)
                }
                word => match (command.clone(), word) {
                    (None, "ics") => command = Some(Command::Ics),
                    (None, "check") => command = Some(Command::Check),
                    (None, "json") => command = Some(Command::Json),
                    (None, "window") => command = Some(Command::Window),
                    (None, "config") => command = Some(Command::Config { init: false }),
                    (Some(Command::Config { .. }), "init") => {
                        command = Some(Command::Config { init: true })
                    }
                    (None, other) => bail!("Unknown command '{}'. See --help.", other),
                    (Some(_), path) => {
                        if cli.input.is_some() {
                            bail!("Only one input file can be given");
                        }
                        if path != "-" {
                            cli.input = Some(PathBuf::from(path));
                        }
                    }
                },
            }
        }

        cli.command = command.unwrap_or(Command::Help);
        Ok(cli)
    }
}

fn expect_value(flag: &str, value: Option<String>) -> Result<String> {
    value.ok_or_else(|| anyhow::anyhow!("Option '{}' needs a value", flag))
}

/// Reads the schedule text from `path`, or stdin when `None`, refusing
/// anything larger than `max_bytes`.
pub fn read_input(path: Option<&Path>, max_bytes: usize) -> Result<String> {
    let mut buf = Vec::new();
    // Read one byte past the cap so oversize input is detectable.
    let limit = max_bytes as u64 + 1;
    match path {
        Some(p) => {
            let file = std::fs::File::open(p)
                .with_context(|| format!("Failed to open schedule file '{}'", p.display()))?;
            file.take(limit).read_to_end(&mut buf)?;
        }
        None => {
            std::io::stdin().lock().take(limit).read_to_end(&mut buf)?;
        }
    }
    if buf.len() > max_bytes {
        bail!(
            "Schedule text is larger than the {} byte limit (max_input_bytes)",
            max_bytes
        );
    }
    String::from_utf8(buf).context("Schedule text is not valid UTF-8")
}

pub fn print_help(binary_name: &str) {
    println!(
        "Shiftcal v{} - Turn a pasted work schedule into calendar events",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} [OPTIONS] ics [FILE] [-o OUT]", binary_name);
    println!("    {} [OPTIONS] check [FILE]", binary_name);
    println!("    {} [OPTIONS] json [FILE]", binary_name);
    println!("    {} [OPTIONS] window [FILE]", binary_name);
    println!("    {} [OPTIONS] config [init]", binary_name);
    println!();
    println!("    FILE defaults to stdin ('-' also means stdin).");
    println!();
    println!("OPTIONS:");
    println!("    -o, --output <path>   Write the ICS file here instead of stdout.");
    println!("    --tz <zone>           Schedule time zone (default from config).");
    println!("    -r, --root <path>     Use a different directory for config.");
    println!("    -v, --verbose         Debug logging.");
    println!("    -q, --quiet           Only log errors.");
    println!("    -V, --version         Print version.");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("SCHEDULE FORMAT:");
    println!("    A date line (MM/DD/YYYY anywhere on the line) followed by an");
    println!("    indicator line. Blank lines and day names in between are ignored.");
    println!();
    println!("    21                8 hour shift starting 21:00");
    println!("    08TEN             10 hour shift starting 08:00");
    println!("    14$  14TEN$       Overtime shift (8 or 10 hours)");
    println!("    X                 Regular day off (no event)");
    println!("    A<06>             Annual leave, 8 hours from 06:00");
    println!("    AOA<07>           8 hour shift at 07:00 + 2 hours overtime after");
    println!("    AOB<07>           2 hours overtime before + 8 hour shift at 07:00");
    println!();
    println!("EXAMPLE:");
    println!("    04/15/2024 Mon");
    println!("    21");
    println!("    04/16/2024 Tue");
    println!("    AOB<07>");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_means_help() {
        let cli = Cli::parse(Vec::<String>::new()).unwrap();
        assert_eq!(cli.command, Command::Help);
    }

    #[test]
    fn ics_with_file_and_output() {
        let cli = Cli::parse([
            "--tz",
            "Europe/Paris",
            "ics",
            "roster.txt",
            "-o",
            "out.ics",
        ])
        .unwrap();
        assert_eq!(cli.command, Command::Ics);
        assert_eq!(cli.input, Some(PathBuf::from("roster.txt")));
        assert_eq!(cli.output, Some(PathBuf::from("out.ics")));
        assert_eq!(cli.timezone.as_deref(), Some("Europe/Paris"));
    }

    #[test]
    fn dash_reads_stdin() {
        let cli = Cli::parse(["check", "-"]).unwrap();
        assert_eq!(cli.command, Command::Check);
        assert!(cli.input.is_none());
    }

    #[test]
    fn config_init() {
        let cli = Cli::parse(["config", "init"]).unwrap();
        assert_eq!(cli.command, Command::Config { init: true });
    }

    #[test]
    fn rejects_unknown_things() {
        assert!(Cli::parse(["frobnicate"]).is_err());
        assert!(Cli::parse(["ics", "--nope"]).is_err());
        assert!(Cli::parse(["ics", "a.txt", "b.txt"]).is_err());
        assert!(Cli::parse(["ics", "--tz"]).is_err());
    }

    #[test]
    fn verbosity_flags() {
        assert_eq!(
            Cli::parse(["-v", "check"]).unwrap().log_level,
            Some(LevelFilter::Debug)
        );
        assert_eq!(
            Cli::parse(["check", "-q"]).unwrap().log_level,
            Some(LevelFilter::Error)
        );
    }

    #[test]
    fn oversize_input_is_refused() {
        let path =
            std::env::temp_dir().join(format!("shiftcal_cli_{}.txt", uuid::Uuid::new_v4()));
        std::fs::write(&path, "04/15/2024\n21\n").unwrap();
        assert!(read_input(Some(&path), 4).is_err());
        assert_eq!(read_input(Some(&path), 1024).unwrap(), "04/15/2024\n21\n");
        let _ = std::fs::remove_file(&path);
    }
}
