use std::collections::HashMap;

use tracing::debug;

use super::ColumnType;

/// For each column, fold a per-cell classification over every row:
///  - Empty cells classify as `Null` and never change a column's type
///  - A `Str` cell locks the column to `Str` (scanning stops early; the
///    result cannot change after that)
///  - A `Float` cell widens a column previously committed to `Int`
///  - The first non-empty cell otherwise sets the column's type
///
/// A column whose cells are all empty stays `Null`.
pub fn derive_types(names: &[String], rows: &[Vec<String>]) -> HashMap<String, ColumnType> {
    let mut types = HashMap::with_capacity(names.len());

    for (idx, name) in names.iter().enumerate() {
        let mut committed = ColumnType::Null;

        for row in rows {
            let kind = classify(&row[idx]);

            if committed == ColumnType::Str || kind == ColumnType::Str {
                committed = ColumnType::Str;
                // Str absorbs everything else, so the remaining cells
                // cannot affect the result.
                break;
            } else if kind == ColumnType::Float && committed == ColumnType::Int {
                committed = ColumnType::Float;
            } else if committed == ColumnType::Null && kind != ColumnType::Null {
                committed = kind;
            }
        }

        if committed == ColumnType::Null && !rows.is_empty() {
            debug!("derive_types: no non-empty cells in `{}`", name);
        }

        types.insert(name.clone(), committed);
    }

    debug!(columns = names.len(), rows = rows.len(), "derived column types");
    types
}

/// Classify a single trimmed cell.
///
/// The integer parse runs before the float parse: every valid integer
/// literal is also a valid float literal, but not the reverse, so trying
/// float first would misclassify all-integer columns. Integer literals
/// outside the i64 range fall through to the float parse.
pub fn classify(cell: &str) -> ColumnType {
    if cell.is_empty() {
        ColumnType::Null
    } else if cell.parse::<i64>().is_ok() {
        ColumnType::Int
    } else if cell.parse::<f64>().is_ok() {
        ColumnType::Float
    } else {
        ColumnType::Str
    }
}
