use anyhow::{Context, Result};
use clap::Parser;
use prettytable::{format, Cell as PtCell, Row as PtRow, Table as PtTable};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use tabcast::{convert_missing_cells, ColumnType, Table};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Infer per-column types for a delimited file and explore the result"
)]
struct Args {
    /// Input file
    file: PathBuf,

    /// Field delimiter
    #[arg(short, long, default_value = ",")]
    delimiter: char,

    /// Treat the first row as data and name the columns "0".."n-1"
    #[arg(long)]
    skip_header: bool,

    /// Replace missing cells with the per-type defaults before printing
    #[arg(long)]
    fill: bool,

    /// Default for missing cells in str columns (with --fill)
    #[arg(long, default_value = "")]
    dstr: String,

    /// Default for missing cells in int columns (with --fill)
    #[arg(long, default_value_t = 0)]
    dint: i64,

    /// Default for missing cells in float columns (with --fill)
    #[arg(long, default_value_t = 0.0)]
    dfloat: f64,

    /// Print a frequency report for this column instead of the table
    #[arg(long)]
    freq: Option<String>,

    /// Maximum number of values shown in the frequency report
    #[arg(long, default_value_t = 25)]
    limit: usize,

    /// Print the inferred schema as JSON instead of the table
    #[arg(long)]
    schema_json: bool,
}

#[derive(Serialize)]
struct ColumnSchema<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    ty: ColumnType,
}

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let delimiter =
        u8::try_from(args.delimiter).context("delimiter must be a single ASCII character")?;

    let mut table = tabcast::read(&args.file, delimiter, args.skip_header)
        .with_context(|| format!("reading {}", args.file.display()))?;
    info!(
        columns = table.names().len(),
        rows = table.rows().len(),
        "table read"
    );

    if args.fill {
        table = convert_missing_cells(&table, &args.dstr, args.dint, args.dfloat);
    }

    if args.schema_json {
        let schema: Vec<ColumnSchema> = table
            .names()
            .iter()
            .map(|n| ColumnSchema {
                name: n,
                ty: table.types()[n],
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&schema)?);
        return Ok(());
    }

    if let Some(name) = &args.freq {
        print_frequencies(&table, name, args.limit)?;
        return Ok(());
    }

    print_table(&table);
    Ok(())
}

/// Frequency counts for one column, most frequent first.
fn print_frequencies(table: &Table, name: &str, limit: usize) -> Result<()> {
    let column = table.column(name)?;
    let mut pairs: Vec<_> = column.frequencies().into_iter().collect();
    // Descending by count, then by rendered value for a stable report.
    pairs.sort_by(|a, b| {
        b.1.cmp(&a.1)
            .then_with(|| a.0.to_string().cmp(&b.0.to_string()))
    });

    let mut out = PtTable::new();
    out.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
    out.set_titles(PtRow::new(vec![
        PtCell::new("count"),
        PtCell::new(&format!("{} ({})", column.name, column.ty)),
    ]));
    for (value, count) in pairs.into_iter().take(limit) {
        out.add_row(PtRow::new(vec![
            PtCell::new(&count.to_string()),
            PtCell::new(&value.to_string()),
        ]));
    }
    out.printstd();
    Ok(())
}

/// Pretty-print the whole table with "name (type)" headers.
fn print_table(table: &Table) {
    let mut out = PtTable::new();
    out.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
    out.set_titles(PtRow::new(
        table
            .names()
            .iter()
            .map(|n| PtCell::new(&format!("{} ({})", n, table.types()[n])))
            .collect(),
    ));
    for row in table.rows() {
        out.add_row(PtRow::new(
            row.iter().map(|cell| PtCell::new(&cell.to_string())).collect(),
        ));
    }
    out.printstd();
}
