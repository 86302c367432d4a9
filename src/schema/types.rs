use std::fmt;

use serde::{Deserialize, Serialize};

/// The single inferred scalar type governing all cells in one column.
///
/// `Null` means no non-empty cell was ever seen for the column, so no type
/// could be inferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Null,
    Int,
    Float,
    Str,
}

impl ColumnType {
    /// Short display name, as shown in pretty-printed headers.
    pub fn name(&self) -> &'static str {
        match self {
            ColumnType::Null => "None",
            ColumnType::Int => "int",
            ColumnType::Float => "float",
            ColumnType::Str => "str",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
