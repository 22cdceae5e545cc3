use super::error::{Error, Result};
use super::types::GameRecord;
use super::visitor::GameVisitor;

use pgn_reader::Reader;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use zstd::stream::read::Decoder as ZstdDecoder;

pub type PgnInput = Box<dyn Read + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMode {
    Plain,
    Zstd,
}

impl CompressionMode {
    /// Picks the decoder from the file extension (`.zst` is zstd).
    pub fn for_path(path: &Path) -> Self {
        match path.extension() {
            Some(ext) if ext.eq_ignore_ascii_case("zst") => Self::Zstd,
            _ => Self::Plain,
        }
    }
}

pub fn open_input_stream(path: &Path) -> Result<PgnInput> {
    let file = File::open(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    match CompressionMode::for_path(path) {
        CompressionMode::Plain => Ok(Box::new(file)),
        CompressionMode::Zstd => ZstdDecoder::new(file)
            .map(|decoder| Box::new(decoder) as PgnInput)
            .map_err(|source| Error::Decompress {
                path: path.to_path_buf(),
                source,
            }),
    }
}

/// True when the (decompressed) file holds nothing but ASCII whitespace.
/// Such files are placeholders and must not reach the loader. Bytes are
/// checked raw, so non-UTF-8 game files are not rejected here.
pub fn is_empty(path: &Path) -> Result<bool> {
    let mut reader = BufReader::new(open_input_stream(path)?);
    let io_error = |source| Error::Io {
        path: path.to_path_buf(),
        source,
    };

    loop {
        let chunk = reader.fill_buf().map_err(io_error)?;
        if chunk.is_empty() {
            return Ok(true);
        }
        if !chunk.iter().all(u8::is_ascii_whitespace) {
            return Ok(false);
        }
        let len = chunk.len();
        reader.consume(len);
    }
}

/// Parses exactly one game from `path`. Trailing games are ignored.
pub fn load_game(path: &Path) -> Result<GameRecord> {
    let mut reader = Reader::new(open_input_stream(path)?);
    let mut visitor = GameVisitor::new();

    match reader.read_game(&mut visitor) {
        Ok(Some(())) => {}
        Ok(None) => {
            return Err(Error::NoGame {
                path: path.to_path_buf(),
            });
        }
        Err(source) => {
            return Err(Error::Parse {
                path: path.to_path_buf(),
                source,
            });
        }
    }

    let game = visitor.current_game.take().ok_or_else(|| Error::NoGame {
        path: path.to_path_buf(),
    })?;

    game.into_record().map_err(|tag| Error::MissingTag {
        path: path.to_path_buf(),
        tag,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const GAME: &str = r#"[Event "Selfplay"]
[White "Bot1||4||1.0"]
[Black "Bot2||3||1.0"]
[Result "0-1"]

1. f3 e5 2. g4 Qh4# 0-1
"#;

    #[test]
    fn test_compression_mode_from_extension() {
        assert_eq!(
            CompressionMode::for_path(Path::new("g.pgn")),
            CompressionMode::Plain
        );
        assert_eq!(
            CompressionMode::for_path(Path::new("g.pgn.zst")),
            CompressionMode::Zstd
        );
        assert_eq!(
            CompressionMode::for_path(Path::new("g.pgn.ZST")),
            CompressionMode::Zstd
        );
        assert_eq!(
            CompressionMode::for_path(Path::new("Game1")),
            CompressionMode::Plain
        );
    }

    #[test]
    fn test_load_game_plain() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Game1.pgn");
        fs::write(&path, GAME).unwrap();

        let game = load_game(&path).unwrap();
        assert_eq!(game.white, "Bot1||4||1.0");
        assert_eq!(game.black, "Bot2||3||1.0");
        assert_eq!(game.result, "0-1");
        assert_eq!(game.ply_count, 4);
    }

    #[test]
    fn test_load_game_zstd() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Game1.pgn.zst");
        let compressed = zstd::stream::encode_all(GAME.as_bytes(), 3).unwrap();
        fs::write(&path, compressed).unwrap();

        let game = load_game(&path).unwrap();
        assert_eq!(game.white, "Bot1||4||1.0");
        assert_eq!(game.result, "0-1");
    }

    #[test]
    fn test_load_game_reads_only_first_game() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("two.pgn");
        let second = GAME.replace("Bot1", "Other");
        fs::write(&path, format!("{GAME}\n{second}")).unwrap();

        let game = load_game(&path).unwrap();
        assert_eq!(game.white, "Bot1||4||1.0");
    }

    #[test]
    fn test_load_game_missing_file() {
        let dir = tempdir().unwrap();
        let err = load_game(&dir.path().join("absent.pgn")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_load_game_without_game() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("blank.pgn");
        fs::write(&path, "\n\n").unwrap();

        let err = load_game(&path).unwrap_err();
        assert!(matches!(err, Error::NoGame { .. }));
    }

    #[test]
    fn test_load_game_missing_player_tag() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("noblack.pgn");
        fs::write(&path, "[White \"W\"]\n[Result \"1-0\"]\n\n1. e4 1-0\n").unwrap();

        let err = load_game(&path).unwrap_err();
        assert!(matches!(err, Error::MissingTag { tag: "Black", .. }));
    }

    #[test]
    fn test_is_empty_for_zero_length_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.pgn");
        fs::write(&path, "").unwrap();

        assert!(is_empty(&path).unwrap());
    }

    #[test]
    fn test_is_empty_for_whitespace_only_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("blank.pgn");
        fs::write(&path, "  \n\t\n").unwrap();

        assert!(is_empty(&path).unwrap());
    }

    #[test]
    fn test_is_empty_for_game_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Game1.pgn");
        fs::write(&path, GAME).unwrap();

        assert!(!is_empty(&path).unwrap());
    }

    #[test]
    fn test_is_empty_accepts_non_utf8_game() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("latin1.pgn");
        fs::write(&path, b"[White \"M\xfcller||4\"]\n").unwrap();

        assert!(!is_empty(&path).unwrap());
    }

    #[test]
    fn test_is_empty_looks_inside_zstd() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.pgn.zst");
        let compressed = zstd::stream::encode_all(&b""[..], 3).unwrap();
        fs::write(&path, compressed).unwrap();

        assert!(is_empty(&path).unwrap());
    }
}
