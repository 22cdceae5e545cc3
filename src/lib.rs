//! Flattens the `||`-encoded player tags of self-play PGN games into one CSV
//! table per iteration and color.
//!
//! Input layout is `<input>/<subdirectory>/<iteration>/<game file>`; each
//! iteration produces `<iteration>_<subdirectory>_white.csv` and
//! `<iteration>_<subdirectory>_black.csv`.

pub mod chess;

pub use chess::{ColumnWeights, Error, MalformedPolicy, Result, RunConfig, RunSummary};
