//! RevStock CLI — inspect and export filtered price history.
//!
//! Commands:
//! - `symbols` — list the tickers in the dataset
//! - `scopes` — years and months available for one ticker, with defaults
//! - `summary` — latest Open/High/Low/Close for a selection
//! - `export` — write the filtered rows as CSV or JSON

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use chrono::Month;
use clap::{Parser, Subcommand, ValueEnum};
use revstock_core::data::load_csv;
use revstock_core::{Config, DashboardView, Dataset, FilterError, MalformedRows, Record, Selection};
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const NO_DATA_MESSAGE: &str = "No data available for selected filters.";

#[derive(Parser)]
#[command(
    name = "revstock",
    about = "RevStock CLI — filter daily OHLCV history by ticker, year and month"
)]
struct Cli {
    /// Path to a TOML config file. Defaults to ./revstock.toml, then the user config dir.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// CSV file to load. Overrides `[data] path` from the config.
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Skip malformed rows instead of failing the load.
    #[arg(long, global = true, default_value_t = false)]
    skip_malformed: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every ticker in the dataset, sorted.
    Symbols,
    /// Show the years and months available for a ticker.
    Scopes {
        /// Ticker to inspect.
        #[arg(long)]
        symbol: String,
    },
    /// Print the KPI cards for the latest record in a selection.
    Summary {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Emit the full dashboard view as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Write the filtered rows to stdout or a file.
    Export {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Output format.
        #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,

        /// Output file. Defaults to stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(clap::Args, Debug)]
struct SelectionArgs {
    /// Ticker to filter on.
    #[arg(long)]
    symbol: String,

    /// Year to include (repeatable). Defaults to the latest year for the ticker.
    #[arg(long = "year")]
    years: Vec<i32>,

    /// Month to include, by name or abbreviation (repeatable). Defaults to all.
    #[arg(long = "month", value_parser = parse_month)]
    months: Vec<Month>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ExportFormat {
    Csv,
    Json,
}

fn parse_month(s: &str) -> Result<Month, String> {
    s.trim()
        .parse::<Month>()
        .map_err(|_| format!("unknown month '{s}'"))
}

fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();

    let dataset = load_dataset(cli.config.as_deref(), cli.data.as_deref(), cli.skip_malformed)?;

    match cli.command {
        Commands::Symbols => run_symbols(&dataset),
        Commands::Scopes { symbol } => run_scopes(&dataset, &symbol),
        Commands::Summary { selection, json } => run_summary(&dataset, &selection, json),
        Commands::Export {
            selection,
            format,
            output,
        } => run_export(&dataset, &selection, format, output.as_deref()),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("REVSTOCK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn load_dataset(config: Option<&Path>, data: Option<&Path>, skip_malformed: bool) -> Result<Dataset> {
    let config = Config::discover(config).context("loading config")?;
    let mut opts = config.load_options()?;
    if skip_malformed {
        opts.malformed_rows = MalformedRows::Skip;
    }
    let path = data.map(Path::to_path_buf).unwrap_or_else(|| config.data.path.clone());

    let dataset = load_csv(&path, &opts).with_context(|| format!("loading {}", path.display()))?;
    info!(
        path = %path.display(),
        rows = dataset.len(),
        skipped = dataset.skipped_rows(),
        "dataset loaded"
    );
    if dataset.skipped_rows() > 0 {
        eprintln!("WARNING: skipped {} malformed row(s)", dataset.skipped_rows());
    }
    Ok(dataset)
}

/// Build a selection from CLI args, filling unset scopes with the dashboard defaults.
fn resolve_selection(dataset: &Dataset, args: &SelectionArgs) -> Selection {
    let defaults = Selection::defaults_for(dataset, &args.symbol);
    let years = if args.years.is_empty() {
        defaults.years
    } else {
        args.years.iter().copied().collect()
    };
    let months = if args.months.is_empty() {
        defaults.months
    } else {
        args.months.clone()
    };
    let selection = Selection::new(args.symbol.clone(), years, months);
    debug!(?selection, "resolved selection");
    selection
}

fn run_symbols(dataset: &Dataset) -> Result<ExitCode> {
    let symbols = dataset.symbols();
    if symbols.is_empty() {
        println!("Dataset is empty.");
        return Ok(ExitCode::SUCCESS);
    }
    for symbol in symbols {
        println!("{symbol}");
    }
    Ok(ExitCode::SUCCESS)
}

fn run_scopes(dataset: &Dataset, symbol: &str) -> Result<ExitCode> {
    if !dataset.contains_symbol(symbol) {
        bail!("unknown symbol '{symbol}'");
    }
    let years = dataset.years_for(symbol);
    let months = dataset.months_for(symbol);
    let defaults = Selection::defaults_for(dataset, symbol);

    let year_list: Vec<String> = years.iter().map(|y| y.to_string()).collect();
    let month_list: Vec<&str> = months.iter().map(|m| m.name()).collect();
    let default_years: Vec<String> = defaults.years.iter().map(|y| y.to_string()).collect();

    println!("Symbol:         {symbol}");
    println!("Years:          {}", year_list.join(", "));
    println!("Months:         {}", month_list.join(", "));
    println!("Default years:  {}", default_years.join(", "));
    println!("Dataset:        {}", short_hash(dataset));
    Ok(ExitCode::SUCCESS)
}

fn run_summary(dataset: &Dataset, args: &SelectionArgs, json: bool) -> Result<ExitCode> {
    let selection = resolve_selection(dataset, args);
    let view = match DashboardView::build(dataset, &selection) {
        Ok(view) => view,
        Err(FilterError::EmptyResult { .. }) => {
            println!("{NO_DATA_MESSAGE}");
            return Ok(ExitCode::from(2));
        }
    };

    if json {
        let out = serde_json::to_string_pretty(&view)?;
        println!("{out}");
        return Ok(ExitCode::SUCCESS);
    }

    print_summary(&view);
    println!("Dataset:        {}", short_hash(dataset));
    Ok(ExitCode::SUCCESS)
}

fn run_export(
    dataset: &Dataset,
    args: &SelectionArgs,
    format: ExportFormat,
    output: Option<&Path>,
) -> Result<ExitCode> {
    let selection = resolve_selection(dataset, args);
    let view = match DashboardView::build(dataset, &selection) {
        Ok(view) => view,
        Err(FilterError::EmptyResult { .. }) => {
            eprintln!("{NO_DATA_MESSAGE}");
            return Ok(ExitCode::from(2));
        }
    };

    let sink: Box<dyn Write> = match output {
        Some(path) => Box::new(
            std::fs::File::create(path).with_context(|| format!("creating {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };

    match format {
        ExportFormat::Csv => write_csv(sink, &view.records)?,
        ExportFormat::Json => write_json(sink, &view.records)?,
    }

    if let Some(path) = output {
        println!("Exported {} row(s) to {}", view.records.len(), path.display());
    }
    Ok(ExitCode::SUCCESS)
}

/// Rows are written with the source column names and date format.
fn write_csv<W: Write>(sink: W, records: &[Record]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(sink);
    writer.write_record([
        "symbol", "Date", "open", "high", "low", "close", "volume", "change",
    ])?;
    for r in records {
        writer.write_record([
            r.symbol.clone(),
            r.date.format("%d-%m-%Y").to_string(),
            r.open.to_string(),
            r.high.to_string(),
            r.low.to_string(),
            r.close.to_string(),
            r.volume.to_string(),
            r.change.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_json<W: Write>(mut sink: W, records: &[Record]) -> Result<()> {
    serde_json::to_writer_pretty(&mut sink, records)?;
    writeln!(sink)?;
    Ok(())
}

fn short_hash(dataset: &Dataset) -> &str {
    let hash = dataset.content_hash();
    &hash[..hash.len().min(16)]
}

fn print_summary(view: &DashboardView) {
    let years: Vec<String> = view.selection.years.iter().map(|y| y.to_string()).collect();
    let months: Vec<&str> = view.selection.months.iter().map(|m| m.name()).collect();

    println!();
    println!("=== {} ===", view.selection.symbol);
    println!("Years:          {}", years.join(", "));
    println!("Months:         {}", months.join(", "));
    println!("Rows:           {}", view.records.len());
    println!("As of:          {}", view.kpi.date.format("%Y-%m-%d"));
    println!();
    for card in view.kpi.cards() {
        println!("{:<15} {}", format!("{}:", card.title), card.value);
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use clap::CommandFactory;

    fn dataset() -> Dataset {
        let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
        Dataset::new(vec![
            Record::new("ABC", d(2023, 1, 10), 10.0, 10.5, 9.8, 10.2, 1_000, 0.2),
            Record::new("ABC", d(2023, 2, 5), 11.0, 11.2, 10.9, 11.1, 1_100, 0.1),
            Record::new("ABC", d(2024, 1, 15), 12.0, 12.5, 11.7, 12.3, 1_300, 0.3),
        ])
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_repeatable_scopes() {
        let cli = Cli::try_parse_from([
            "revstock", "summary", "--symbol", "ABC", "--year", "2023", "--year", "2024", "--month",
            "Feb", "--month", "january",
        ])
        .unwrap();
        match cli.command {
            Commands::Summary { selection, json } => {
                assert!(!json);
                assert_eq!(selection.years, vec![2023, 2024]);
                assert_eq!(selection.months, vec![Month::February, Month::January]);
            }
            _ => panic!("expected summary"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["revstock", "symbols", "--data", "x.csv", "--skip-malformed"]).unwrap();
        assert_eq!(cli.data, Some(PathBuf::from("x.csv")));
        assert!(cli.skip_malformed);
    }

    #[test]
    fn rejects_unknown_month() {
        assert!(Cli::try_parse_from(["revstock", "summary", "--symbol", "ABC", "--month", "Smarch"]).is_err());
    }

    #[test]
    fn unset_scopes_use_defaults() {
        let args = SelectionArgs {
            symbol: "ABC".into(),
            years: vec![],
            months: vec![],
        };
        let sel = resolve_selection(&dataset(), &args);
        assert_eq!(sel.years.iter().copied().collect::<Vec<_>>(), vec![2024]);
        assert_eq!(sel.months, vec![Month::January, Month::February]);
    }

    #[test]
    fn explicit_scopes_override_defaults() {
        let args = SelectionArgs {
            symbol: "ABC".into(),
            years: vec![2023],
            months: vec![Month::February],
        };
        let sel = resolve_selection(&dataset(), &args);
        let view = DashboardView::build(&dataset(), &sel).unwrap();
        assert_eq!(view.records.len(), 1);
        assert_eq!(view.kpi.close, 11.1);
    }

    #[test]
    fn csv_export_keeps_source_layout() {
        let mut buf = Vec::new();
        write_csv(&mut buf, dataset().records()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("symbol,Date,open,high,low,close,volume,change"));
        assert_eq!(lines.next(), Some("ABC,10-01-2023,10,10.5,9.8,10.2,1000,0.2"));
        assert_eq!(text.lines().count(), 4);
    }

    fn assert_exit(code: ExitCode, expected: ExitCode) {
        assert_eq!(format!("{code:?}"), format!("{expected:?}"));
    }

    fn selection(years: Vec<i32>) -> SelectionArgs {
        SelectionArgs {
            symbol: "ABC".into(),
            years,
            months: vec![],
        }
    }

    #[test]
    fn summary_of_empty_selection_exits_2() {
        let code = run_summary(&dataset(), &selection(vec![2030]), false).unwrap();
        assert_exit(code, ExitCode::from(2));
        let code = run_summary(&dataset(), &selection(vec![2030]), true).unwrap();
        assert_exit(code, ExitCode::from(2));
    }

    #[test]
    fn summary_of_default_selection_succeeds() {
        let code = run_summary(&dataset(), &selection(vec![]), false).unwrap();
        assert_exit(code, ExitCode::SUCCESS);
    }

    #[test]
    fn export_of_empty_selection_exits_2_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let code = run_export(&dataset(), &selection(vec![2030]), ExportFormat::Csv, Some(path.as_path())).unwrap();
        assert_exit(code, ExitCode::from(2));
        assert!(!path.exists());
    }

    #[test]
    fn export_writes_selected_rows_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let code = run_export(&dataset(), &selection(vec![2023]), ExportFormat::Csv, Some(path.as_path())).unwrap();
        assert_exit(code, ExitCode::SUCCESS);
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 3);
        assert!(text.contains("ABC,05-02-2023"));
    }

    #[test]
    fn scopes_of_unknown_symbol_is_an_error() {
        let err = run_scopes(&dataset(), "NOPE").unwrap_err();
        assert!(err.to_string().contains("unknown symbol 'NOPE'"));
        assert_exit(run_scopes(&dataset(), "ABC").unwrap(), ExitCode::SUCCESS);
    }

    #[test]
    fn json_export_is_an_array() {
        let mut buf = Vec::new();
        write_json(&mut buf, dataset().records()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(3));
    }
}
