use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::process::map_data;
use crate::schema::ColumnType;
use crate::table::{Cell, Table};

/// A unary cell converter, as used by [`convert_columns`] and
/// [`convert_types`].
pub type CellFn = Box<dyn Fn(&Cell) -> Cell>;

/// Cast every cell to its column's inferred type.
///
/// Missing values (empty strings, cells in a `None`-typed column, cells
/// that are already null) become `Null`. Raw string cells in int/float
/// columns are parsed with that type's parser; inference already proved the
/// parse succeeds for any table built through [`crate::read`], so a failure
/// here means the table was assembled inconsistently and surfaces as
/// [`Error::Invariant`].
///
/// Cast is idempotent: cells that already carry their value form pass
/// through unchanged.
pub fn cast(table: &Table) -> Result<Table> {
    let col_types: Vec<ColumnType> = table.names().iter().map(|n| table.types()[n]).collect();

    let mut new_rows = Vec::with_capacity(table.rows().len());
    for row in table.rows() {
        let mut new_row = Vec::with_capacity(row.len());
        for (c, cell) in row.iter().enumerate() {
            new_row.push(cast_cell(cell, col_types[c], &table.names()[c])?);
        }
        new_rows.push(new_row);
    }

    Ok(Table::from_parts(
        table.names().to_vec(),
        table.types().clone(),
        new_rows,
    ))
}

fn cast_cell(cell: &Cell, ty: ColumnType, name: &str) -> Result<Cell> {
    if ty == ColumnType::Null || cell.is_null() {
        return Ok(Cell::Null);
    }
    match cell {
        Cell::Str(s) if s.is_empty() => Ok(Cell::Null),
        Cell::Str(s) => match ty {
            ColumnType::Int => s.parse::<i64>().map(Cell::Int).map_err(|_| {
                Error::Invariant(format!("cell `{}` in int column `{}` is not an integer", s, name))
            }),
            ColumnType::Float => s.parse::<f64>().map(Cell::Float).map_err(|_| {
                Error::Invariant(format!("cell `{}` in float column `{}` is not a float", s, name))
            }),
            ColumnType::Str => Ok(cell.clone()),
            ColumnType::Null => unreachable!("handled above"),
        },
        // Already-typed values pass through as-is.
        _ => Ok(cell.clone()),
    }
}

/// Replace every `Null` cell in a typed column with the matching default.
/// Cells in `None`-typed columns stay `Null`; there is no meaningful
/// default for a column with no known type.
pub fn convert_missing_cells(table: &Table, dstr: &str, dint: i64, dfloat: f64) -> Table {
    map_data(table, |ty, _name, _r, _c, cell| {
        if !cell.is_null() {
            return cell.clone();
        }
        match ty {
            ColumnType::Str => Cell::Str(dstr.to_string()),
            ColumnType::Int => Cell::Int(dint),
            ColumnType::Float => Cell::Float(dfloat),
            ColumnType::Null => Cell::Null,
        }
    })
}

/// Run converter functions on specific columns. Keys are matched against
/// column names exactly (case-sensitive), unlike the case-insensitive
/// lookup of [`Table::column`]. Cells in unmentioned columns are unchanged.
pub fn convert_columns(table: &Table, converters: &HashMap<String, CellFn>) -> Table {
    map_data(table, |_ty, name, _r, _c, cell| match converters.get(name) {
        Some(f) => f(cell),
        None => cell.clone(),
    })
}

/// Like [`convert_columns`], but keyed on column type instead of name. Any
/// unset slot leaves the matching columns unchanged; `None`-typed columns
/// are never transformed.
pub fn convert_types(
    table: &Table,
    fstr: Option<CellFn>,
    fint: Option<CellFn>,
    ffloat: Option<CellFn>,
) -> Table {
    map_data(table, |ty, _name, _r, _c, cell| {
        let f = match ty {
            ColumnType::Str => fstr.as_ref(),
            ColumnType::Int => fint.as_ref(),
            ColumnType::Float => ffloat.as_ref(),
            ColumnType::Null => None,
        };
        match f {
            Some(f) => f(cell),
            None => cell.clone(),
        }
    })
}
