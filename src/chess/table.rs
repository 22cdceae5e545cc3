use super::error::{Error, Result};
use super::header::decode_header;
use super::types::Outcome;

use std::fs::{self, OpenOptions};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableColumn {
    PlayerName,
    SearchDepth,
    PawnPos,
    PawnPosPieceCountBias,
    KnightsPos,
    BishopPos,
    RooksPos,
    QueenPos,
    CastlingBonus,
    IsWinner,
}

pub const TABLE_COLUMN_COUNT: usize = 10;

pub const TABLE_COLUMNS: [TableColumn; TABLE_COLUMN_COUNT] = [
    TableColumn::PlayerName,
    TableColumn::SearchDepth,
    TableColumn::PawnPos,
    TableColumn::PawnPosPieceCountBias,
    TableColumn::KnightsPos,
    TableColumn::BishopPos,
    TableColumn::RooksPos,
    TableColumn::QueenPos,
    TableColumn::CastlingBonus,
    TableColumn::IsWinner,
];

impl TableColumn {
    pub fn name(self) -> &'static str {
        match self {
            Self::PlayerName => "playername",
            Self::SearchDepth => "search_Depth",
            Self::PawnPos => "weight_PawnPos",
            Self::PawnPosPieceCountBias => "biaSpawnPosPieceCount",
            Self::KnightsPos => "weightKnightsPos",
            Self::BishopPos => "weightBishopPos",
            Self::RooksPos => "weightRooksPos",
            Self::QueenPos => "weightQueenPos",
            Self::CastlingBonus => "weightCastlingBonus",
            Self::IsWinner => "isWinner",
        }
    }
}

/// Weight annotations written into the header row. Values are kept exactly
/// as given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnWeights {
    pub search_depth: String,
    pub pawn_pos: String,
    pub pawn_pos_piece_count_bias: String,
    pub knights_pos: String,
    pub bishop_pos: String,
    pub rooks_pos: String,
    pub queen_pos: String,
    pub castling_bonus: String,
}

impl ColumnWeights {
    pub const DEFAULT_SEARCH_DEPTH: &'static str = "4";
    pub const DEFAULT_PAWN_POS: &'static str = "1";
    pub const DEFAULT_PAWN_POS_PIECE_COUNT_BIAS: &'static str = "16";
    pub const DEFAULT_KNIGHTS_POS: &'static str = "1.3";

    /// Fixed defaults for the first four parameters; the remaining four are
    /// always supplied by the caller.
    pub fn default_fixed(
        bishop_pos: impl Into<String>,
        rooks_pos: impl Into<String>,
        queen_pos: impl Into<String>,
        castling_bonus: impl Into<String>,
    ) -> Self {
        Self {
            search_depth: Self::DEFAULT_SEARCH_DEPTH.to_string(),
            pawn_pos: Self::DEFAULT_PAWN_POS.to_string(),
            pawn_pos_piece_count_bias: Self::DEFAULT_PAWN_POS_PIECE_COUNT_BIAS.to_string(),
            knights_pos: Self::DEFAULT_KNIGHTS_POS.to_string(),
            bishop_pos: bishop_pos.into(),
            rooks_pos: rooks_pos.into(),
            queen_pos: queen_pos.into(),
            castling_bonus: castling_bonus.into(),
        }
    }

    pub fn weight(&self, column: TableColumn) -> &str {
        match column {
            TableColumn::PlayerName => "",
            TableColumn::SearchDepth => &self.search_depth,
            TableColumn::PawnPos => &self.pawn_pos,
            TableColumn::PawnPosPieceCountBias => &self.pawn_pos_piece_count_bias,
            TableColumn::KnightsPos => &self.knights_pos,
            TableColumn::BishopPos => &self.bishop_pos,
            TableColumn::RooksPos => &self.rooks_pos,
            TableColumn::QueenPos => &self.queen_pos,
            TableColumn::CastlingBonus => &self.castling_bonus,
            TableColumn::IsWinner => "1",
        }
    }

    /// `name(weight)` cells, e.g. `search_Depth(4)`.
    pub fn header_row(&self) -> Vec<String> {
        TABLE_COLUMNS
            .iter()
            .map(|&column| format!("{}({})", column.name(), self.weight(column)))
            .collect()
    }
}

fn csv_error(path: &Path) -> impl FnOnce(csv::Error) -> Error + '_ {
    move |source| Error::Csv {
        path: path.to_path_buf(),
        source,
    }
}

/// (Re)creates the table at `path`, truncating it, and writes the header row.
pub fn initialize_table(path: &Path, weights: &ColumnWeights) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| Error::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let mut writer = csv::Writer::from_path(path).map_err(csv_error(path))?;
    writer
        .write_record(weights.header_row())
        .map_err(csv_error(path))?;
    writer.flush().map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Builds one data row: the decoded header with `_<game_index + 1>` appended
/// to the identity, followed by the outcome.
pub fn build_row(game_index: usize, header: &str, outcome: Outcome) -> Vec<String> {
    let mut row: Vec<String> = decode_header(header)
        .into_iter()
        .map(str::to_string)
        .collect();

    if let Some(identity) = row.first_mut() {
        identity.push_str(&format!("_{}", game_index + 1));
    }
    row.push(outcome.to_string());
    row
}

/// Appends one row to the table at `path`, creating the file if needed.
/// Row length follows the header encoding, not the column schema.
pub fn append_row(path: &Path, game_index: usize, header: &str, outcome: Outcome) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(file);
    writer
        .write_record(build_row(game_index, header, outcome))
        .map_err(csv_error(path))?;
    writer.flush().map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}
