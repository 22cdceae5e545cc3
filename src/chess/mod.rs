mod driver;
mod error;
mod header;
mod natural;
mod reader;
mod table;
mod types;
mod visitor;

pub use driver::{MalformedPolicy, RunConfig, RunSummary, table_path};
pub use error::{Error, ErrorAccumulator, Result};
pub use header::{EncodedHeader, FIELD_DELIMITER, decode_header, normalize_result};
pub use natural::{NaturalKey, natural_cmp};
pub use reader::{is_empty, load_game};
pub use table::{ColumnWeights, TABLE_COLUMNS, TableColumn, append_row, build_row, initialize_table};
pub use types::{GameRecord, Outcome};

pub use shakmaty::Color;
