mod error;
mod fixture;
mod paths;
mod render;

use std::fs;
use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap::ValueEnum;
use erpgrid_lib::ColumnRegistry;
use erpgrid_lib::FilterKind;
use erpgrid_lib::Grid;
use erpgrid_lib::GridConfig;
use erpgrid_lib::PaginationMode;
use erpgrid_lib::Row;
use erpgrid_lib::Value;
use erpgrid_lib::engine;
use erpgrid_lib::state::ColumnFilter;
use erpgrid_lib::state::Direction;
use erpgrid_lib::state::SortState;
use log::debug;
use log::info;
use simplelog::Config;
use simplelog::LevelFilter;
use simplelog::WriteLogger;

use crate::error::CliError;
use crate::error::Result;
use crate::fixture::Fixture;

#[derive(Parser)]
#[command(
    name = "erpgrid",
    version,
    about = "Filter, sort, group and page ERP table fixtures"
)]
struct Args {
    /// JSON fixture with columns, rows and an optional grid config
    fixture: PathBuf,

    /// Global filter text, matched against every filterable column
    #[arg(short, long)]
    filter: Option<String>,

    /// Column filter: `key=text`, `key=v1,v2` or `key=threshold`,
    /// depending on the column's filter kind
    #[arg(short = 'w', long = "where", value_name = "KEY=VALUE")]
    column_filters: Vec<String>,

    /// Sort key, `key` or `key:desc`; repeat for multi-column sort
    #[arg(short, long, value_name = "KEY[:DIR]")]
    sort: Vec<String>,

    /// Group by a column; repeat for nested groups
    #[arg(short, long = "group-by", value_name = "KEY")]
    group_by: Vec<String>,

    /// Full column order, comma separated
    #[arg(long, value_delimiter = ',', value_name = "KEYS")]
    columns: Option<Vec<String>>,

    /// Move one column to a display position, `key:position`
    #[arg(long = "move", value_name = "KEY:POS")]
    moves: Vec<String>,

    /// Zero-based page index
    #[arg(short, long, default_value_t = 0)]
    page: usize,

    /// Rows per page (overrides the fixture)
    #[arg(long)]
    page_size: Option<usize>,

    /// Serve pages through the fetch handshake instead of slicing in memory
    #[arg(long)]
    server: bool,

    /// Print the distinct values of a column and exit
    #[arg(long, value_name = "KEY")]
    distinct: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Log level for the log file
    #[arg(long, default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Current page as a text table
    Table,
    /// Every filtered and sorted row as a JSON snapshot
    Json,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.log_level);

    match run(&args) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(level: LevelFilter) {
    if level == LevelFilter::Off {
        return;
    }
    paths::rotate_logs();
    let Some(path) = paths::log_file() else { return };
    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }
    match File::create(&path) {
        Ok(file) => {
            let _ = WriteLogger::init(level, Config::default(), file);
        }
        Err(e) => eprintln!("Warning: logging disabled ({}: {})", path.display(), e),
    }
}

fn run(args: &Args) -> Result<String> {
    let (registry, mut config, rows) = Fixture::load(&args.fixture)?.into_parts()?;
    info!("Loaded {} with {} rows", args.fixture.display(), rows.len());

    if let Some(key) = &args.distinct {
        return distinct(registry, rows, key);
    }

    if let Some(page_size) = args.page_size {
        config = config.with_page_size(page_size);
    }
    if args.server {
        config = config.with_pagination(PaginationMode::Server);
    }

    let grid = match config.pagination {
        PaginationMode::Client => {
            let mut grid = Grid::with_rows(registry, config, rows)?;
            configure(&mut grid, args)?;
            grid.set_page_index(args.page)?;
            grid
        }
        PaginationMode::Server => {
            let mut grid = Grid::new(registry, config)?;
            configure(&mut grid, args)?;
            // The first fetch reports the total, which bounds the page index
            serve(&mut grid, &rows)?;
            if args.page > 0 {
                grid.set_page_index(args.page)?;
                serve(&mut grid, &rows)?;
            }
            grid
        }
    };

    match args.format {
        OutputFormat::Table => Ok(render::render_view(&grid.view()?, grid.registry())),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&grid.snapshot()?)?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// Applies the command-line grid state.
fn configure(grid: &mut Grid<Row>, args: &Args) -> Result<()> {
    if let Some(order) = &args.columns {
        grid.reorder_columns(order.as_slice())?;
    }
    for entry in &args.moves {
        let (key, position) = parse_move(entry)?;
        grid.move_column(key, position)?;
    }
    for key in &args.group_by {
        grid.group_by(key)?;
    }
    if !args.sort.is_empty() {
        grid.set_sort(parse_sort(&args.sort)?)?;
    }
    if let Some(text) = &args.filter {
        grid.set_global_filter(text.as_str());
    }
    for entry in &args.column_filters {
        let (key, filter) = parse_column_filter(grid.registry(), entry)?;
        grid.set_column_filter(key, filter)?;
    }
    Ok(())
}

/// Answers the grid's fetch request from the fixture rows, standing in for a
/// remote source.
fn serve(grid: &mut Grid<Row>, source: &[Row]) -> Result<()> {
    let request = grid.fetch_request()?;
    debug!(
        "Fetch offset {} limit {} sort {:?}",
        request.offset,
        request.limit,
        request.sort.keys()
    );

    let filtered = engine::apply_filters(source, &request.filters, grid.registry())?;
    let total = filtered.len();
    let page: Vec<Row> = engine::apply_sort(filtered, &request.sort)
        .into_iter()
        .skip(request.offset)
        .take(request.limit)
        .cloned()
        .collect();

    grid.supply_page(page, total)?;
    Ok(())
}

fn distinct(registry: ColumnRegistry, rows: Vec<Row>, key: &str) -> Result<String> {
    let grid = Grid::with_rows(registry, GridConfig::default(), rows)?;
    let mut out = String::new();
    for value in grid.distinct_values(key)? {
        match value {
            Value::Null => out.push_str("(empty)"),
            value => out.push_str(&value.to_text()),
        }
        out.push('\n');
    }
    Ok(out)
}

fn parse_sort(entries: &[String]) -> Result<SortState> {
    let mut sort = SortState::new();
    for entry in entries {
        let (key, direction) = match entry.split_once(':') {
            Some((key, "asc")) => (key, Direction::Asc),
            Some((key, "desc")) => (key, Direction::Desc),
            Some(_) => return Err(CliError::argument(entry, "direction must be asc or desc")),
            None => (entry.as_str(), Direction::Asc),
        };
        sort = sort.then(key, direction);
    }
    Ok(sort)
}

fn parse_move(entry: &str) -> Result<(&str, usize)> {
    let (key, position) = entry
        .split_once(':')
        .ok_or_else(|| CliError::argument(entry, "expected key:position"))?;
    let position = position
        .parse()
        .map_err(|_| CliError::argument(entry, "position must be a number"))?;
    Ok((key, position))
}

/// Builds the filter matching the column's declared filter kind.
fn parse_column_filter<'s>(
    registry: &ColumnRegistry,
    entry: &'s str,
) -> Result<(&'s str, ColumnFilter)> {
    let (key, raw) = entry
        .split_once('=')
        .ok_or_else(|| CliError::argument(entry, "expected key=value"))?;
    let filter = match registry.get(key)?.filter_kind {
        FilterKind::TextSubstring => ColumnFilter::text(raw),
        FilterKind::SetMembership => ColumnFilter::values(raw.split(',').map(parse_value)),
        FilterKind::Custom => ColumnFilter::custom(parse_value(raw)),
    };
    Ok((key, filter))
}

/// Reads a JSON scalar (`500`, `true`, `null`), falling back to plain text.
fn parse_value(raw: &str) -> Value {
    let raw = raw.trim();
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(json) => Value::from(json),
        Err(_) => Value::from(raw),
    }
}

#[cfg(test)]
mod tests {
    use erpgrid_lib::ColumnDescriptor;
    use erpgrid_lib::GridError;

    use super::*;

    fn fixture_path() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures/orders.json")
    }

    fn args(extra: &[&str]) -> Args {
        let fixture = fixture_path();
        let mut argv = vec!["erpgrid", fixture.to_str().unwrap()];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_parse_sort() {
        let entries = vec!["clientName".to_string(), "amount:desc".to_string()];
        assert_eq!(
            parse_sort(&entries).unwrap(),
            SortState::asc("clientName").then_desc("amount")
        );
        assert!(parse_sort(&["amount:up".to_string()]).is_err());
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("500"), Value::Long(500));
        assert_eq!(parse_value(" Pending "), Value::from("Pending"));
        assert_eq!(parse_value("null"), Value::Null);
    }

    #[test]
    fn test_parse_column_filter_follows_kind() {
        let registry = ColumnRegistry::new(vec![
            ColumnDescriptor::new("clientName", "Client").filterable(),
            ColumnDescriptor::new("status", "Status").filter_kind(FilterKind::SetMembership),
        ])
        .unwrap();

        let (key, filter) = parse_column_filter(&registry, "status=Pending,Shipped").unwrap();
        assert_eq!(key, "status");
        assert_eq!(filter, ColumnFilter::values(["Pending", "Shipped"]));

        let (_, filter) = parse_column_filter(&registry, "clientName=syn").unwrap();
        assert_eq!(filter, ColumnFilter::text("syn"));

        assert!(matches!(
            parse_column_filter(&registry, "nope=1"),
            Err(CliError::Grid(GridError::UnknownColumn(_)))
        ));
        assert!(parse_column_filter(&registry, "status").is_err());
    }

    #[test]
    fn test_run_global_filter() {
        let output = run(&args(&["--filter", "syn", "--format", "json"])).unwrap();
        let snapshot: serde_json::Value = serde_json::from_str(&output).unwrap();
        let rows = snapshot["rows"].as_array().unwrap();
        assert!(!rows.is_empty());
        for row in rows {
            let text = row["values"].to_string().to_lowercase();
            assert!(text.contains("syn"));
        }
    }

    #[test]
    fn test_server_and_client_pages_agree() {
        let common = ["--sort", "amount:desc", "--page-size", "3", "--page", "1"];
        let client = run(&args(&common)).unwrap();

        let mut server_args = common.to_vec();
        server_args.push("--server");
        let server = run(&args(&server_args)).unwrap();

        assert_eq!(client, server);
    }

    #[test]
    fn test_run_reports_stale_page() {
        let err = run(&args(&["--page", "99"])).unwrap_err();
        assert!(matches!(
            err,
            CliError::Grid(GridError::PageOutOfRange { page_index: 99, .. })
        ));
    }

    #[test]
    fn test_run_distinct() {
        let output = run(&args(&["--distinct", "status"])).unwrap();
        let values: Vec<&str> = output.lines().collect();
        assert_eq!(values, vec!["Pending", "Shipped", "Invoiced", "Cancelled"]);
    }
}
