use std::fs::File;
use std::io::{self, BufReader, Cursor};
use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use crate::error::{Error, Result};
use crate::process::cast;
use crate::schema::derive_types;
use crate::table::{Cell, Table};

/// Column names and rectangular rows of trimmed raw strings, as handed to
/// type inference. The loader's only output.
#[derive(Debug)]
pub struct RawTable {
    pub names: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Load a delimited file and return the fully typed table: cells parsed,
/// column headers and one inferred type per column.
///
/// All cells have left and right whitespace trimmed. All rows must be the
/// same length. `delimiter` separates fields in a row. If `skip_header` is
/// set, no header row is consumed and columns are named "0".."n-1" after
/// the first data row's width.
pub fn read<P: AsRef<Path>>(path: P, delimiter: u8, skip_header: bool) -> Result<Table> {
    let file = File::open(path)?;
    read_reader(BufReader::new(file), delimiter, skip_header)
}

/// [`read`], over in-memory text.
pub fn read_str(text: &str, delimiter: u8, skip_header: bool) -> Result<Table> {
    read_reader(Cursor::new(text.as_bytes()), delimiter, skip_header)
}

/// [`read`], over any reader: load raw cells, infer column types, cast.
pub fn read_reader<R: io::Read>(rdr: R, delimiter: u8, skip_header: bool) -> Result<Table> {
    let raw = load_reader(rdr, delimiter, skip_header)?;
    let types = derive_types(&raw.names, &raw.rows);

    let rows = raw
        .rows
        .into_iter()
        .map(|row| row.into_iter().map(Cell::Str).collect())
        .collect();

    let table = Table::new(raw.names, types, rows)?;
    cast(&table)
}

/// Load cell data and column headers without inferring or casting anything.
pub fn load_reader<R: io::Read>(rdr: R, delimiter: u8, skip_header: bool) -> Result<RawTable> {
    let csv = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(rdr);

    let mut names: Vec<String> = Vec::new();
    let mut rows: Vec<Vec<String>> = Vec::new();

    let mut records = csv.into_records();

    if !skip_header {
        if let Some(record) = records.next() {
            names = record?.iter().map(|s| s.trim().to_string()).collect();
        }
    }

    for (i, record) in records.enumerate() {
        let record = record?;
        let row: Vec<String> = record.iter().map(|s| s.trim().to_string()).collect();

        // Without a header row, the first data row's width names the
        // columns "0".."n-1".
        if names.is_empty() {
            names = (0..row.len()).map(|c| c.to_string()).collect();
        }

        if row.len() != names.len() {
            return Err(Error::Shape {
                row: i,
                expected: names.len(),
                actual: row.len(),
            });
        }
        rows.push(row);
    }

    debug!(columns = names.len(), rows = rows.len(), "loaded raw table");
    Ok(RawTable { names, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::convert_missing_cells;
    use crate::schema::ColumnType;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    fn init_test_logging() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("info,tabcast=debug")),
            )
            .with_test_writer()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    #[test]
    fn read_infers_casts_and_fills() -> Result<()> {
        init_test_logging();
        let table = read_str("n,s\n1,a\n2,b\n,c\n", b',', false)?;

        assert_eq!(table.column_type("n"), Some(ColumnType::Int));
        assert_eq!(table.column_type("s"), Some(ColumnType::Str));
        assert_eq!(
            table.rows(),
            &[
                vec![Cell::Int(1), Cell::Str("a".into())],
                vec![Cell::Int(2), Cell::Str("b".into())],
                vec![Cell::Null, Cell::Str("c".into())],
            ]
        );

        let filled = convert_missing_cells(&table, "", 0, 0.0);
        assert_eq!(filled.rows()[2][0], Cell::Int(0));
        Ok(())
    }

    #[test]
    fn skip_header_names_columns_by_index() -> Result<()> {
        let table = read_str("1,2,3\n4,5,6\n", b',', true)?;
        assert_eq!(
            table.names(),
            &["0".to_string(), "1".to_string(), "2".to_string()]
        );
        assert_eq!(table.rows().len(), 2);
        Ok(())
    }

    #[test]
    fn ragged_row_fails_the_whole_load() {
        let err = read_str("a,b\n1,2\n1,2,3\n", b',', false).unwrap_err();
        match err {
            Error::Shape {
                row,
                expected,
                actual,
            } => {
                assert_eq!(row, 1);
                assert_eq!(expected, 2);
                assert_eq!(actual, 3);
            }
            other => panic!("expected shape error, got {:?}", other),
        }
    }

    #[test]
    fn cells_and_headers_are_trimmed() -> Result<()> {
        let table = read_str("  n  ,  s \n  1 ,  a \n", b',', false)?;
        assert_eq!(table.names(), &["n".to_string(), "s".to_string()]);
        assert_eq!(
            table.rows()[0],
            vec![Cell::Int(1), Cell::Str("a".into())]
        );
        Ok(())
    }

    #[test]
    fn empty_input_yields_empty_table() -> Result<()> {
        let table = read_str("", b',', true)?;
        assert!(table.names().is_empty());
        assert!(table.rows().is_empty());
        Ok(())
    }

    #[test]
    fn alternate_delimiter() -> Result<()> {
        let table = read_str("n;s\n1;a\n", b';', false)?;
        assert_eq!(table.names(), &["n".to_string(), "s".to_string()]);
        Ok(())
    }

    #[test]
    fn quoted_fields_keep_embedded_delimiters() -> Result<()> {
        let table = read_str("s,n\n\"x, y\",2\n", b',', false)?;
        assert_eq!(table.rows()[0][0], Cell::Str("x, y".into()));
        assert_eq!(table.rows()[0][1], Cell::Int(2));
        Ok(())
    }

    #[test]
    fn read_from_file() -> Result<()> {
        init_test_logging();
        let mut tmp = NamedTempFile::new()?;
        tmp.write_all(b"name,score\nalice,1.5\nbob,\n")?;

        let table = read(tmp.path(), b',', false)?;
        assert_eq!(table.column_type("score"), Some(ColumnType::Float));
        assert_eq!(table.rows()[1][1], Cell::Null);
        Ok(())
    }
}
