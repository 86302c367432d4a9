pub mod convert;

pub use convert::{cast, convert_columns, convert_missing_cells, convert_types, CellFn};

use std::collections::HashMap;

use crate::schema::ColumnType;
use crate::table::{Cell, Table};

/// Rewrite every column header. `f` receives the column's type, index and
/// current name, and returns the replacement name.
///
/// Rows and per-column types are untouched; the types mapping is re-keyed
/// to the new names so every name still has exactly one type entry.
pub fn map_names<F>(table: &Table, mut f: F) -> Table
where
    F: FnMut(ColumnType, usize, &str) -> String,
{
    let mut new_names = Vec::with_capacity(table.names().len());
    let mut new_types = HashMap::with_capacity(table.names().len());

    for (i, name) in table.names().iter().enumerate() {
        let ty = table.types()[name];
        let new_name = f(ty, i, name);
        new_types.insert(new_name.clone(), ty);
        new_names.push(new_name);
    }

    Table::from_parts(new_names, new_types, table.rows().to_vec())
}

/// Rewrite every cell. `f` receives the column's type and name, the row and
/// column indices, and the current cell, and returns the replacement cell.
///
/// Shape, names and types are untouched.
pub fn map_data<F>(table: &Table, mut f: F) -> Table
where
    F: FnMut(ColumnType, &str, usize, usize, &Cell) -> Cell,
{
    let col_types: Vec<ColumnType> = table.names().iter().map(|n| table.types()[n]).collect();

    let mut new_rows = Vec::with_capacity(table.rows().len());
    for (r, row) in table.rows().iter().enumerate() {
        let mut new_row = Vec::with_capacity(row.len());
        for (c, cell) in row.iter().enumerate() {
            new_row.push(f(col_types[c], &table.names()[c], r, c, cell));
        }
        new_rows.push(new_row);
    }

    Table::from_parts(
        table.names().to_vec(),
        table.types().clone(),
        new_rows,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table {
        let names = vec!["n".to_string(), "s".to_string()];
        let types = HashMap::from([
            ("n".to_string(), ColumnType::Int),
            ("s".to_string(), ColumnType::Str),
        ]);
        let rows = vec![
            vec![Cell::Int(1), Cell::Str("a".into())],
            vec![Cell::Null, Cell::Str("b".into())],
        ];
        Table::new(names, types, rows).unwrap()
    }

    #[test]
    fn map_names_rekeys_types() {
        let t = table();
        let renamed = map_names(&t, |ty, i, name| format!("{}_{}_{}", name, i, ty));

        assert_eq!(renamed.names(), &["n_0_int".to_string(), "s_1_str".to_string()]);
        assert_eq!(renamed.column_type("n_0_int"), Some(ColumnType::Int));
        assert_eq!(renamed.column_type("s_1_str"), Some(ColumnType::Str));
        assert_eq!(renamed.column_type("n"), None);
        // Rows ride along unchanged.
        assert_eq!(renamed.rows(), t.rows());
    }

    #[test]
    fn map_data_identity_returns_equal_table() {
        let t = table();
        let copied = map_data(&t, |_ty, _name, _r, _c, cell| cell.clone());
        assert_eq!(copied, t);
    }

    #[test]
    fn map_data_passes_aligned_coordinates() {
        let t = table();
        let mut seen = Vec::new();
        map_data(&t, |ty, name, r, c, cell| {
            seen.push((ty, name.to_string(), r, c, cell.clone()));
            cell.clone()
        });
        assert_eq!(seen.len(), 4);
        assert_eq!(
            seen[0],
            (ColumnType::Int, "n".to_string(), 0, 0, Cell::Int(1))
        );
        assert_eq!(
            seen[3],
            (ColumnType::Str, "s".to_string(), 1, 1, Cell::Str("b".into()))
        );
    }

    #[test]
    fn map_data_leaves_input_untouched() {
        let t = table();
        let before = t.clone();
        let _ = map_data(&t, |_, _, _, _, _| Cell::Null);
        assert_eq!(t, before);
    }
}
