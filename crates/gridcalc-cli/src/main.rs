//! gridcalc CLI - evaluate formulas on a small sheet from the command line
//!
//! Usage:
//!   gridcalc eval --set A1=10 --set "B1==A1*2" B1     Print one cell
//!   gridcalc eval --set A1=1 --set A2=2 --grid        Print the whole sheet
//!   gridcalc demo                                     Print the sample sheet
//!   gridcalc functions                                List built-in functions
//!   gridcalc expand A1:B2                             Expand a range
//!   gridcalc --log-level debug eval ...               Show formula failures

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use gridcalc::prelude::*;
use gridcalc::{expand_range, registry};
use std::io::{self, Write};
use tracing::info;

#[derive(Parser)]
#[command(name = "gridcalc")]
#[command(author, version, about = "Spreadsheet formula evaluation tool")]
struct Cli {
    /// Log filter (overridden by RUST_LOG)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill a sheet from assignments and print resolved values
    Eval {
        /// Cell assignment, e.g. `A1=10` or `B1==A1*2` (repeatable)
        #[arg(short, long = "set", value_name = "ADDR=INPUT")]
        assignments: Vec<String>,

        /// Cells to print (default: every non-empty cell)
        cells: Vec<String>,

        /// Print the used range as a table instead of one cell per line
        #[arg(short, long)]
        grid: bool,

        /// Recompute every formula on each read
        #[arg(long)]
        uncached: bool,
    },

    /// Print the sample sheet (names, scores, teams and a total)
    Demo {
        /// Field delimiter (default: tab)
        #[arg(short, long, default_value = "\t")]
        delimiter: char,
    },

    /// List built-in functions
    Functions,

    /// Print the cells of a range in evaluation order (column by column)
    Expand {
        /// Range such as `A1:B3`
        range: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    match cli.command {
        Commands::Eval {
            assignments,
            cells,
            grid,
            uncached,
        } => eval(&assignments, &cells, grid, uncached),
        Commands::Demo { delimiter } => demo(delimiter),
        Commands::Functions => list_functions(),
        Commands::Expand { range } => expand(&range),
    }
}

fn init_logging(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .try_init()
        .ok(); // Ignore error if already initialized

    Ok(())
}

/// Split `ADDR=INPUT` at the first `=`
fn parse_assignment(assignment: &str) -> Result<(CellAddress, &str)> {
    let Some((address, input)) = assignment.split_once('=') else {
        bail!("Expected ADDR=INPUT, got '{}'", assignment);
    };
    let addr = CellAddress::parse(address)
        .with_context(|| format!("Invalid cell address in '{}'", assignment))?;
    Ok((addr, input))
}

fn eval(assignments: &[String], cells: &[String], grid: bool, uncached: bool) -> Result<()> {
    let mut sheet = Sheet::new("Sheet1");
    for assignment in assignments {
        let (addr, input) = parse_assignment(assignment)?;
        sheet.set_cell_value_at(addr, input);
    }

    let options = if uncached {
        CalculationOptions::uncached()
    } else {
        let stats = sheet.calculate().context("Failed to calculate formulas")?;
        info!(
            formulas = stats.formula_count,
            errors = stats.errors,
            circular = stats.circular_references,
            "calculated"
        );
        CalculationOptions::default()
    };

    let mut out = io::stdout().lock();
    if grid {
        out.write_all(render_grid(&sheet, '\t', &options).as_bytes())
            .context("Failed to write to stdout")?;
        return Ok(());
    }

    let addrs: Vec<CellAddress> = if cells.is_empty() {
        let mut addrs: Vec<_> = sheet.cells().map(|(addr, _)| addr).collect();
        addrs.sort();
        addrs
    } else {
        cells
            .iter()
            .map(|c| CellAddress::parse(c).with_context(|| format!("Invalid cell '{}'", c)))
            .collect::<Result<_>>()?
    };

    for addr in addrs {
        writeln!(out, "{}\t{}", addr, sheet.value_with_options(addr, &options))
            .context("Failed to write to stdout")?;
    }
    Ok(())
}

fn demo_sheet() -> Sheet {
    let mut sheet = Sheet::new("Demo");
    let seed = [
        ("A1", "Name"),
        ("B1", "Score"),
        ("C1", "Team"),
        ("A2", "John"),
        ("B2", "30"),
        ("C2", "Red"),
        ("A3", "Alice"),
        ("B3", "25"),
        ("C3", "Blue"),
        ("A4", "Total"),
        ("B4", "=SUM(B2:B3)"),
    ];
    for (address, input) in seed {
        if let Ok(addr) = CellAddress::parse(address) {
            sheet.set_cell_value_at(addr, input);
        }
    }
    sheet
}

fn demo(delimiter: char) -> Result<()> {
    let mut sheet = demo_sheet();
    let stats = sheet.calculate().context("Failed to calculate formulas")?;
    info!(formulas = stats.formula_count, "demo sheet calculated");

    io::stdout()
        .write_all(render_grid(&sheet, delimiter, &CalculationOptions::default()).as_bytes())
        .context("Failed to write to stdout")?;
    Ok(())
}

/// Render the used range (from A1) as delimited rows of resolved values
fn render_grid(sheet: &Sheet, delimiter: char, options: &CalculationOptions) -> String {
    let Some(used_range) = sheet.used_range() else {
        return String::new();
    };

    let mut output = String::new();
    for row in 0..=used_range.end.row {
        let fields: Vec<String> = (0..=used_range.end.col)
            .map(|col| {
                let value = sheet.value_with_options(CellAddress::new(row, col), options);
                quote_field(&value.to_string(), delimiter)
            })
            .collect();
        output.push_str(&fields.join(&delimiter.to_string()));
        output.push('\n');
    }
    output
}

/// Quote a field if it contains the delimiter, a quote or a line break
fn quote_field(text: &str, delimiter: char) -> String {
    if text.contains(delimiter) || text.contains('"') || text.contains('\n') || text.contains('\r')
    {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}

fn list_functions() -> Result<()> {
    io::stdout()
        .write_all(render_functions().as_bytes())
        .context("Failed to write to stdout")?;
    Ok(())
}

/// One `signature<TAB>description` line per built-in function, by name
fn render_functions() -> String {
    registry()
        .functions()
        .iter()
        .map(|def| format!("{}\t{}\n", def.signature, def.description))
        .collect()
}

fn expand(range: &str) -> Result<()> {
    println!("{}", render_expansion(range)?);
    Ok(())
}

/// Space-separated cells of a range, column by column
fn render_expansion(range: &str) -> Result<String> {
    let cells = expand_range(range).with_context(|| format!("Invalid range '{}'", range))?;
    let names: Vec<String> = cells.iter().map(|addr| addr.to_string()).collect();
    Ok(names.join(" "))
}
