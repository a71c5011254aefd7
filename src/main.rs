//! levelog command line.
//!
//! Loads an optional logger configuration into the process registry, then routes
//! records through it.
//!
//! ```text
//! levelog --config log.toml emit --logger db --level error "connection lost" 3
//! levelog --config log.toml emit --format "{} took {}ms" query 12
//! tail -f app.out | levelog --config log.toml pipe --logger app
//! ```

use std::error::Error;
use std::io::{self, BufRead};
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use levelog::config::{self, ConfigWatcher, LogConfig};
use levelog::observability::logging::init_tracing;
use levelog::{ctx, global, Arg, Level, Selector};

#[derive(Parser)]
#[command(name = "levelog")]
#[command(about = "Route log records through named, leveled loggers", long_about = None)]
struct Cli {
    /// Logger configuration file (TOML).
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Emit one record
    Emit {
        /// Registered logger name; empty for the default logger
        #[arg(short, long, default_value = "")]
        logger: String,

        /// Level name or raw integer
        #[arg(short = 'L', long, default_value = "info")]
        level: String,

        /// Template whose `{}` placeholders are filled with the values in order
        #[arg(short, long)]
        format: Option<String>,

        /// Exit with status 1 after logging at error
        #[arg(long, conflicts_with = "panic")]
        fatal: bool,

        /// Panic after logging at error
        #[arg(long)]
        panic: bool,

        values: Vec<String>,
    },
    /// List registered logger names
    Loggers,
    /// List named levels
    Levels,
    /// Validate the configuration and print it as JSON
    Check,
    /// Emit every stdin line, reloading the configuration when it changes
    Pipe {
        #[arg(short, long, default_value = "")]
        logger: String,

        #[arg(short = 'L', long, default_value = "info")]
        level: String,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing("levelog=info");

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            let config = config::load_config(path)?;
            config::apply_config(&config, global::registry())?;
            tracing::debug!(path = %path.display(), "Configuration loaded");
            config
        }
        None => LogConfig::default(),
    };

    match cli.command {
        Commands::Emit {
            logger,
            level,
            format,
            fatal,
            panic,
            values,
        } => {
            let selector = ctx!(logger, level.parse::<Level>()?);
            emit(selector, format, fatal, panic, &values);
        }
        Commands::Loggers => {
            for name in global::registry().names() {
                if name.is_default() {
                    println!("\"\" (default)");
                } else {
                    println!("{}", name);
                }
            }
        }
        Commands::Levels => {
            for raw in i8::MIN..=i8::MAX {
                let level = Level::new(raw);
                let name = level.name();
                if !name.is_empty() {
                    println!("{:>4} {}", raw, name);
                }
            }
        }
        Commands::Check => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Commands::Pipe { logger, level } => {
            let _watcher = match &cli.config {
                Some(path) => Some(ConfigWatcher::new(path, global::shared_registry()).run()?),
                None => None,
            };
            let selector = ctx!(logger, level.parse::<Level>()?);
            for line in io::stdin().lock().lines() {
                let line = line?;
                global::printf(Some(selector.clone()), format_args!("{}", line));
            }
        }
    }

    Ok(())
}

fn emit(selector: Selector, format: Option<String>, fatal: bool, panic: bool, values: &[String]) {
    match format {
        Some(template) => {
            let message = fill_template(&template, values);
            if fatal {
                global::fatalf(Some(selector), format_args!("{}", message));
            }
            if panic {
                global::panicf(Some(selector), format_args!("{}", message));
            }
            global::printf(Some(selector), format_args!("{}", message));
        }
        None => {
            let mut args: Vec<Arg<'_>> = Vec::with_capacity(values.len() + 1);
            args.push(Arg::from(selector));
            args.extend(values.iter().map(Arg::from));
            if fatal {
                global::fatal(&args);
            }
            if panic {
                global::panic(&args);
            }
            global::println(&args);
        }
    }
}

/// Replace each `{}` in `template` with the next value; extra values are appended.
fn fill_template(template: &str, values: &[String]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut values = values.iter();
    let mut rest = template;
    while let Some(pos) = rest.find("{}") {
        out.push_str(&rest[..pos]);
        match values.next() {
            Some(value) => out.push_str(value),
            None => out.push_str("{}"),
        }
        rest = &rest[pos + 2..];
    }
    out.push_str(rest);
    for value in values {
        out.push(' ');
        out.push_str(value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_fill_template() {
        assert_eq!(fill_template("{} took {}ms", &strings(&["query", "12"])), "query took 12ms");
        assert_eq!(fill_template("a {} {}", &strings(&["x"])), "a x {}");
        assert_eq!(fill_template("done", &strings(&["1", "2"])), "done 1 2");
    }

    #[test]
    fn test_cli_parses_emit() {
        let cli = Cli::try_parse_from(["levelog", "emit", "-l", "db", "-L", "error", "a", "b"]).unwrap();
        match cli.command {
            Commands::Emit { logger, level, values, fatal, .. } => {
                assert_eq!(logger, "db");
                assert_eq!(level, "error");
                assert_eq!(values, vec!["a", "b"]);
                assert!(!fatal);
            }
            _ => panic!("expected emit"),
        }
    }

    #[test]
    fn test_cli_rejects_fatal_with_panic() {
        assert!(Cli::try_parse_from(["levelog", "emit", "--fatal", "--panic", "x"]).is_err());
    }
}
