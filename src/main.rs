//! tabql - Functional queries over delimited text tables

use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use tabql::config::{Config, MissingColumns, OutputFormat, RaggedRows};
use tabql::output::render_to_stdout;
use tabql::parser::{parse_with, ParserFactory};
use tabql::query::{Condition, Pipeline, Step};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutputFormat {
    Terminal,
    Json,
    Csv,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(f: CliOutputFormat) -> Self {
        match f {
            CliOutputFormat::Terminal => OutputFormat::Terminal,
            CliOutputFormat::Json => OutputFormat::Json,
            CliOutputFormat::Csv => OutputFormat::Csv,
        }
    }
}

/// Rename, filter and select columns of a delimited text table
#[derive(Parser, Debug)]
#[command(name = "tabql")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input file (csv, tsv, txt or json); reads stdin when omitted or `-`
    input: Option<PathBuf>,

    /// Column renames as old=new (comma-separated), applied first
    #[arg(short, long, value_delimiter = ',')]
    rename: Vec<String>,

    /// Row filter such as `age > 40`; repeat to require several
    #[arg(short = 'w', long = "where")]
    conditions: Vec<String>,

    /// Columns to keep, in output order (comma-separated), applied last
    #[arg(short, long, value_delimiter = ',')]
    select: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "terminal")]
    format: CliOutputFormat,

    /// Field delimiter for delimited text
    #[arg(short, long, default_value_t = ',')]
    delimiter: char,

    /// Fail on rows with more or fewer fields than the header
    #[arg(long)]
    strict: bool,

    /// Fail when --select names a column the table does not have
    #[arg(long)]
    strict_columns: bool,

    /// Only print the number of resulting rows
    #[arg(long)]
    count_only: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn main() -> ExitCode {
    init_tracing();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let delimiter = u8::try_from(cli.delimiter)
        .ok()
        .filter(u8::is_ascii)
        .with_context(|| format!("Delimiter must be a single ASCII character: {:?}", cli.delimiter))?;

    let config = Config {
        input: cli.input.filter(|path| path != Path::new("-")),
        ..Config::default()
    }
    .with_delimiter(delimiter)
    .with_ragged_rows(if cli.strict {
        RaggedRows::Reject
    } else {
        RaggedRows::Lenient
    })
    .with_missing_columns(if cli.strict_columns {
        MissingColumns::Reject
    } else {
        MissingColumns::Omit
    })
    .with_output_format(cli.format.into())
    .with_color(!cli.no_color && std::io::stdout().is_terminal());

    let table = match &config.input {
        Some(path) => ParserFactory::new()
            .parse_file(path, &config)
            .with_context(|| format!("Failed to parse input file: {}", path.display()))?,
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read standard input")?;
            parse_with(&text, &config).context("Failed to parse standard input")?
        }
    };

    let query = build_pipeline(&cli.rename, &cli.conditions, &cli.select)?;
    let result = query.run_with(&table, &config)?;

    if cli.count_only {
        println!("{}", result.row_count());
        return Ok(());
    }

    render_to_stdout(&result, &config)
}

/// Steps run in a fixed order: renames, then conditions, then the selection
fn build_pipeline(renames: &[String], conditions: &[String], select: &[String]) -> Result<Pipeline> {
    let mut query = Pipeline::new();

    if !renames.is_empty() {
        let mapping = renames
            .iter()
            .map(|pair| match pair.split_once('=') {
                Some((old, new)) => Ok((old.trim().to_string(), new.trim().to_string())),
                None => bail!("Rename must look like old=new: {}", pair),
            })
            .collect::<Result<Vec<_>>>()?;
        query = query.rename(mapping);
    }

    for expr in conditions {
        let condition = Condition::parse(expr)?;
        query = query.step(Step::Restrict(condition.into_predicate()));
    }

    if !select.is_empty() {
        query = query.project(select.iter().map(|c| c.trim()));
    }

    Ok(query)
}
