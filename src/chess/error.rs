use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to access '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to list directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("failed to write table '{}': {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to initialize zstd decoder for '{}': {source}", path.display())]
    Decompress {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse PGN in '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no game found in '{}'", path.display())]
    NoGame { path: PathBuf },

    #[error("missing '{tag}' tag in '{}'", path.display())]
    MissingTag { path: PathBuf, tag: &'static str },

    #[error("malformed result '{raw}'")]
    MalformedResult { raw: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Collects diagnostics for game files that were skipped instead of aborting
/// the run.
#[derive(Debug, Clone, Default)]
pub struct ErrorAccumulator {
    messages: Option<String>,
    count: usize,
}

impl ErrorAccumulator {
    pub fn push(&mut self, msg: &str) {
        self.count += 1;
        match &mut self.messages {
            Some(existing) => {
                existing.push_str("; ");
                existing.push_str(msg);
            }
            None => {
                self.messages = Some(msg.to_string());
            }
        }
    }

    pub fn take(&mut self) -> Option<String> {
        self.count = 0;
        self.messages.take()
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, ErrorAccumulator};
    use std::path::PathBuf;

    #[test]
    fn test_accumulator_joins_messages_and_counts() {
        let mut accumulator = ErrorAccumulator::default();
        assert!(accumulator.is_empty());

        accumulator.push("Game1.pgn: no game found");
        accumulator.push("Game4.pgn: malformed result '*'");

        assert_eq!(accumulator.len(), 2);
        assert_eq!(
            accumulator.take().as_deref(),
            Some("Game1.pgn: no game found; Game4.pgn: malformed result '*'")
        );
        assert!(accumulator.is_empty());
        assert_eq!(accumulator.len(), 0);
    }

    #[test]
    fn test_error_messages_name_the_file() {
        let err = Error::MissingTag {
            path: PathBuf::from("games/g1.pgn"),
            tag: "White",
        };
        assert_eq!(err.to_string(), "missing 'White' tag in 'games/g1.pgn'");

        let err = Error::NoGame {
            path: PathBuf::from("games/g2.pgn"),
        };
        assert_eq!(err.to_string(), "no game found in 'games/g2.pgn'");
    }
}
