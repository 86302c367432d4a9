pub mod derive;
pub mod types;

pub use derive::{classify, derive_types};
pub use types::ColumnType;
