use anyhow::{Result, bail};
use shiftcal::cli::{self, Cli, Command};
use shiftcal::config::Config;
use shiftcal::context::StandardContext;
use shiftcal::diagnostics::{DiagnosticCollector, DiagnosticSink, LogSink, Severity, Tee};
use shiftcal::model::{Event, SyncWindow, parse_schedule, to_ics_string};
use shiftcal::storage::LocalStorage;
use shiftcal::zone::ScheduleZone;
use simplelog::{ColorChoice, TermLogger, TerminalMode};
use std::env;

const BIN_NAME: &str = "shiftcal";

fn main() -> Result<()> {
    let cli = Cli::parse(env::args().skip(1))?;

    match cli.command {
        Command::Help => {
            cli::print_help(BIN_NAME);
            return Ok(());
        }
        Command::Version => {
            println!("{} {}", BIN_NAME, env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        _ => {}
    }

    let ctx = StandardContext::new(cli.root.clone());
    let config = Config::load_or_default(&ctx)?;

    let level = cli.log_level.unwrap_or_else(|| config.log_level_filter());
    // Logging is best-effort; a second init (or no terminal) is not fatal.
    let _ = TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );

    if let Command::Config { init } = cli.command {
        return show_config(&ctx, &config, init);
    }

    let zone_name = cli.timezone.as_deref().unwrap_or(&config.timezone);
    let (zone, zone_diag) = ScheduleZone::resolve(zone_name);
    if let Some(diag) = zone_diag {
        LogSink.report(diag);
    }

    let text = cli::read_input(cli.input.as_deref(), config.max_input_bytes)?;

    let mut collected = DiagnosticCollector::new();
    let events = parse_schedule(&text, &zone, &mut Tee(&mut collected, &mut LogSink));

    match cli.command {
        Command::Ics => {
            if events.is_empty() {
                bail!("Could not parse any valid events from the text provided.");
            }
            let ics = to_ics_string(&events, &config.ics_options());
            match &cli.output {
                Some(path) => {
                    LocalStorage::atomic_write(path, &ics)?;
                    log::info!("Wrote {} events to {}", events.len(), path.display());
                }
                None => println!("{}", ics),
            }
        }
        Command::Check => print_check(&events, &collected, &zone),
        Command::Json => println!("{}", serde_json::to_string_pretty(&events)?),
        Command::Window => match SyncWindow::covering(&events, &zone) {
            Some(window) => {
                println!("{}", window.start.to_rfc3339());
                println!("{}", window.end.to_rfc3339());
            }
            None => bail!("Could not parse any valid events from the text provided."),
        },
        Command::Config { .. } | Command::Help | Command::Version => {}
    }

    Ok(())
}

fn show_config(ctx: &StandardContext, config: &Config, init: bool) -> Result<()> {
    let path = Config::get_path_string(ctx)?;
    if init {
        if std::path::Path::new(&path).exists() {
            bail!("Config already exists at {}", path);
        }
        Config::default().save(ctx)?;
        println!("Wrote default config to {}", path);
        return Ok(());
    }
    println!("# {}", path);
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

fn print_check(events: &[Event], diagnostics: &DiagnosticCollector, zone: &ScheduleZone) {
    println!("Schedule zone: {}", zone);
    if zone.is_fallback() {
        println!("WARNING: configured zone unavailable, times are in local time");
    }
    println!();
    for e in events {
        println!(
            "{}  {} - {}  {}{}",
            e.date,
            e.start.format("%a %Y-%m-%d %H:%M"),
            e.end.format("%a %Y-%m-%d %H:%M"),
            e.summary,
            if e.is_overtime { "  [OT]" } else { "" }
        );
    }
    println!();
    println!("{} events", events.len());

    let notable: Vec<_> = diagnostics.at_least(Severity::Warning).collect();
    if !notable.is_empty() {
        println!();
        for d in notable {
            println!("{}", d);
        }
    }
}
