use shakmaty::Color;
use std::fmt;

/// Tags consumed from one PGN game.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameRecord {
    /// `||`-encoded player metadata from the `White` tag
    pub white: String,
    /// `||`-encoded player metadata from the `Black` tag
    pub black: String,
    /// Raw result, from the `Result` tag or the movetext termination marker
    pub result: String,

    /// Mainline half-moves seen while parsing; diagnostics only.
    pub ply_count: u32,
}

impl GameRecord {
    pub fn metadata(&self, color: Color) -> &str {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }
}

/// Per-player result of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Draw,
    Loss,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Win => "1",
            Self::Draw => "0.5",
            Self::Loss => "0",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
