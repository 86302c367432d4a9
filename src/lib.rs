//! Read delimited text, infer a scalar type per column (null, int, float
//! or str), cast every cell to its typed value, and transform the result
//! as a plain in-memory table.

pub mod error;
pub mod process;
pub mod read;
pub mod schema;
pub mod table;

pub use error::{Error, Result};
pub use process::{
    cast, convert_columns, convert_missing_cells, convert_types, map_data, map_names, CellFn,
};
pub use read::{read, read_reader, read_str, RawTable};
pub use schema::{derive_types, ColumnType};
pub use table::{Cell, Column, Table};
