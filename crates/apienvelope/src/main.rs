mod cmd;
mod exit;
mod input;
mod logging;
mod output;

use clap::Parser;

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "apienvelope", version, about = "JSON API envelope CLI")]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "warn", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let result = cmd::run(cli.command, format);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_build_subcommand() {
        let cli = Cli::try_parse_from([
            "apienvelope",
            "build",
            "--api-version",
            "0.1",
            "--method",
            "cars.get",
            "--item",
            "{\"color\":\"red\"}",
            "--param",
            "region=eu",
        ])
        .expect("build args should parse");

        match cli.command {
            Command::Build(args) => {
                assert_eq!(args.api_version.as_deref(), Some("0.1"));
                assert_eq!(args.items.len(), 1);
                assert_eq!(args.params, vec!["region=eu".to_string()]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_field_list_with_delimiter() {
        let cli = Cli::try_parse_from(["apienvelope", "build", "--field", "a,b", "--field", "c"])
            .expect("fields should parse");
        match cli.command {
            Command::Build(args) => assert_eq!(args.fields, vec!["a", "b", "c"]),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_negative_start_index() {
        let cli = Cli::try_parse_from(["apienvelope", "build", "--start-index", "-1"])
            .expect("negative index should parse");
        match cli.command {
            Command::Build(args) => assert_eq!(args.start_index, Some(-1)),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_items_subcommand_with_global_format() {
        let cli = Cli::try_parse_from(["apienvelope", "items", "env.json", "--format", "json"])
            .expect("items args should parse");
        assert!(matches!(cli.command, Command::Items(_)));
        assert!(matches!(cli.format, Some(OutputFormat::Json)));
    }

    #[test]
    fn rejects_unknown_format() {
        let err = Cli::try_parse_from(["apienvelope", "inspect", "--format", "xml"])
            .expect_err("unknown format should fail");
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }
}
