use crate::header::headers;
use crate::{Config, Error, OutputFormat, Result, analyze};
use clap::Parser;
use log::LevelFilter;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Read header text from `filename`, or from stdin for `None` and `-`.
pub fn read_input(filename: Option<&Path>) -> Result<Vec<u8>> {
    match filename {
        Some(path) if path != Path::new("-") => {
            fs::read(path).map_err(|e| Error::read(path.display().to_string(), e))
        }
        _ => {
            let mut buffer = Vec::new();
            io::stdin()
                .read_to_end(&mut buffer)
                .map_err(|e| Error::read("<stdin>", e))?;
            Ok(buffer)
        }
    }
}

pub fn cmd_check(config: &Config, filename: Option<&Path>) -> Result<String> {
    let raw = read_input(filename)?;
    log::debug!("read {} bytes of header text", raw.len());
    analyze(&raw).render(config)
}

pub fn cmd_dump(filename: &Path) -> Result<String> {
    let raw = read_input(Some(filename))?;
    let mut out = String::new();
    for (name, value) in headers(&raw) {
        out.push_str(&name);
        out.push_str(": ");
        out.push_str(&value);
        out.push('\n');
    }
    Ok(out)
}

#[derive(clap::Parser)]
#[command(version, about = "Parse raw email headers and flag common spoofing indicators")]
struct Cli {
    #[arg(short, long)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args, Debug)]
struct CheckArgs {
    /// Header text to analyze; stdin when omitted or "-"
    filename: Option<PathBuf>,
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
    /// Text shown for headers that are not present
    #[arg(long)]
    placeholder: Option<String>,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Print the header summary and spoofing analysis
    Check(CheckArgs),
    /// Print every parsed header, unfolded, one per line
    Dump { filename: PathBuf },
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

pub fn xmain(defaults: &Config) -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let output = match cli.command {
        Command::Check(args) => {
            let config = Config {
                format: args.format.unwrap_or(defaults.format),
                placeholder: args
                    .placeholder
                    .unwrap_or_else(|| defaults.placeholder.clone()),
            };
            cmd_check(&config, args.filename.as_deref())?
        }
        Command::Dump { filename } => cmd_dump(&filename)?,
    };
    let mut stdout = io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

#[test]
fn test_cli_definition() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}

#[test]
fn test_cli_check_args() {
    let cli = Cli::parse_from(["hdrcheck", "-v", "check", "--format", "json", "mail.txt"]);
    assert!(cli.verbose);
    match cli.command {
        Command::Check(args) => {
            assert_eq!(args.format, Some(OutputFormat::Json));
            assert_eq!(args.filename, Some(PathBuf::from("mail.txt")));
            assert_eq!(args.placeholder, None);
        }
        Command::Dump { .. } => panic!("expected check"),
    }
}
