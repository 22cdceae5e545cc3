use super::error::{Error, Result};
use super::types::{GameRecord, Outcome};

use shakmaty::Color;
use smallvec::SmallVec;

/// Separator between fields of an encoded player tag.
pub const FIELD_DELIMITER: &str = "||";

/// Fields of one encoded player tag: identity first, then run parameters.
pub type EncodedHeader<'a> = SmallVec<[&'a str; 12]>;

/// Splits an encoded player tag into its fields. Nothing is dropped or
/// parsed; a tag without the delimiter yields a single field.
pub fn decode_header(metadata: &str) -> EncodedHeader<'_> {
    metadata.split(FIELD_DELIMITER).collect()
}

fn side_score(raw: &str) -> Option<f64> {
    match raw.trim() {
        "1/2" | "½" => Some(0.5),
        other => other.parse::<f64>().ok().filter(|v| v.is_finite()),
    }
}

/// Maps a raw `white-black` result to (white, black) outcomes by comparing
/// the two sides numerically.
pub fn normalize_result(raw: &str) -> Result<(Outcome, Outcome)> {
    let malformed = || Error::MalformedResult {
        raw: raw.to_string(),
    };

    let mut sides = raw.split('-');
    let (Some(white_raw), Some(black_raw)) = (sides.next(), sides.next()) else {
        return Err(malformed());
    };
    let white = side_score(white_raw).ok_or_else(malformed)?;
    let black = side_score(black_raw).ok_or_else(malformed)?;

    Ok(if white > black {
        (Outcome::Win, Outcome::Loss)
    } else if white < black {
        (Outcome::Loss, Outcome::Win)
    } else {
        (Outcome::Draw, Outcome::Draw)
    })
}

impl GameRecord {
    pub fn outcome(&self, color: Color) -> Result<Outcome> {
        let (white, black) = normalize_result(&self.result)?;
        Ok(match color {
            Color::White => white,
            Color::Black => black,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_white_win() {
        assert_eq!(
            normalize_result("1-0").unwrap(),
            (Outcome::Win, Outcome::Loss)
        );
    }

    #[test]
    fn test_normalize_black_win() {
        assert_eq!(
            normalize_result("0-1").unwrap(),
            (Outcome::Loss, Outcome::Win)
        );
    }

    #[test]
    fn test_normalize_equal_sides_is_draw() {
        assert_eq!(
            normalize_result("0-0").unwrap(),
            (Outcome::Draw, Outcome::Draw)
        );
        assert_eq!(
            normalize_result("1/2-1/2").unwrap(),
            (Outcome::Draw, Outcome::Draw)
        );
        assert_eq!(
            normalize_result("½-½").unwrap(),
            (Outcome::Draw, Outcome::Draw)
        );
    }

    #[test]
    fn test_normalize_renders_string_pairs() {
        for (raw, white, black) in [("1-0", "1", "0"), ("0-1", "0", "1"), ("0-0", "0.5", "0.5")] {
            let (w, b) = normalize_result(raw).unwrap();
            assert_eq!((w.to_string(), b.to_string()), (white.to_string(), black.to_string()));
        }
    }

    #[test]
    fn test_normalize_rejects_unfinished_game() {
        let err = normalize_result("*").unwrap_err();
        assert!(matches!(err, Error::MalformedResult { raw } if raw == "*"));
    }

    #[test]
    fn test_normalize_rejects_non_numeric_side() {
        assert!(normalize_result("1-x").is_err());
        assert!(normalize_result("").is_err());
    }

    #[test]
    fn test_outcome_per_color() {
        let game = GameRecord {
            white: "W".to_string(),
            black: "B".to_string(),
            result: "0-1".to_string(),
            ply_count: 0,
        };

        assert_eq!(game.outcome(Color::White).unwrap(), Outcome::Loss);
        assert_eq!(game.outcome(Color::Black).unwrap(), Outcome::Win);
    }

    #[test]
    fn test_decode_header_keeps_every_field() {
        let fields = decode_header("Bot1||4||1.0||16||1.3||0.9||1.1||1.0||50");
        assert_eq!(
            fields.as_slice(),
            &["Bot1", "4", "1.0", "16", "1.3", "0.9", "1.1", "1.0", "50"]
        );
    }

    #[test]
    fn test_decode_header_without_delimiter() {
        let fields = decode_header("Stockfish 16");
        assert_eq!(fields.as_slice(), &["Stockfish 16"]);
    }

    #[test]
    fn test_decode_header_keeps_empty_fields() {
        let fields = decode_header("Bot||||3");
        assert_eq!(fields.as_slice(), &["Bot", "", "3"]);
    }
}
