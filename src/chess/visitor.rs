use super::types::GameRecord;

use pgn_reader::{Outcome, RawTag, SanPlus, Skip, Visitor};
use std::mem;
use std::ops::ControlFlow;

/// Streaming PGN visitor (pgn-reader).
///
/// Captures the `White`, `Black` and `Result` tags and counts mainline
/// half-moves. Variations are skipped. The movetext termination marker is
/// kept as a fallback for a missing `Result` tag.
pub struct GameVisitor {
    headers: HeaderFields,
    ply_count: u32,
    result_marker: Option<String>,
    pub current_game: Option<PartialGame>,
}

/// A game as seen by the visitor, before required tags are checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialGame {
    pub white: Option<String>,
    pub black: Option<String>,
    pub result: Option<String>,
    pub ply_count: u32,
}

impl PartialGame {
    /// Returns the name of the first missing tag, or the complete record.
    pub fn into_record(self) -> Result<GameRecord, &'static str> {
        Ok(GameRecord {
            white: self.white.ok_or("White")?,
            black: self.black.ok_or("Black")?,
            result: self.result.ok_or("Result")?,
            ply_count: self.ply_count,
        })
    }
}

#[derive(Default)]
struct HeaderFields {
    white: String,
    black: String,
    result: String,
}

impl HeaderFields {
    fn clear(&mut self) {
        *self = Self::default();
    }

    fn opt_take(field: &mut String) -> Option<String> {
        if field.is_empty() {
            None
        } else {
            Some(mem::take(field))
        }
    }

    fn set_known_tag(&mut self, key: &[u8], value: RawTag<'_>) {
        let slot: &mut String = match key {
            b"White" => &mut self.white,
            b"Black" => &mut self.black,
            b"Result" => &mut self.result,
            _ => return,
        };

        // First occurrence wins.
        if !slot.is_empty() {
            return;
        }

        let bytes = value.as_bytes();
        if bytes.is_empty() {
            return;
        }

        *slot = String::from_utf8_lossy(bytes).into_owned();
    }
}

impl GameVisitor {
    pub fn new() -> Self {
        Self {
            headers: HeaderFields::default(),
            ply_count: 0,
            result_marker: None,
            current_game: None,
        }
    }

    fn finalize_game(&mut self) {
        let result = HeaderFields::opt_take(&mut self.headers.result)
            .or_else(|| self.result_marker.take());

        self.current_game = Some(PartialGame {
            white: HeaderFields::opt_take(&mut self.headers.white),
            black: HeaderFields::opt_take(&mut self.headers.black),
            result,
            ply_count: self.ply_count,
        });
    }
}

impl Default for GameVisitor {
    fn default() -> Self {
        Self::new()
    }
}

impl Visitor for GameVisitor {
    type Tags = ();
    type Movetext = ();
    type Output = ();

    fn begin_tags(&mut self) -> ControlFlow<Self::Output, Self::Tags> {
        self.headers.clear();
        self.ply_count = 0;
        self.result_marker = None;
        self.current_game = None;
        ControlFlow::Continue(())
    }

    fn tag(
        &mut self,
        _: &mut Self::Tags,
        key: &[u8],
        value: RawTag<'_>,
    ) -> ControlFlow<Self::Output> {
        self.headers.set_known_tag(key, value);
        ControlFlow::Continue(())
    }

    fn begin_movetext(&mut self, _: Self::Tags) -> ControlFlow<Self::Output, Self::Movetext> {
        ControlFlow::Continue(())
    }

    fn begin_variation(&mut self, _: &mut Self::Movetext) -> ControlFlow<Self::Output, Skip> {
        ControlFlow::Continue(Skip(true))
    }

    fn san(&mut self, _: &mut Self::Movetext, _: SanPlus) -> ControlFlow<Self::Output> {
        self.ply_count += 1;
        ControlFlow::Continue(())
    }

    fn outcome(&mut self, _: &mut Self::Movetext, outcome: Outcome) -> ControlFlow<Self::Output> {
        self.result_marker = Some(outcome.to_string());
        ControlFlow::Continue(())
    }

    fn end_game(&mut self, _: Self::Movetext) -> Self::Output {
        self.finalize_game();
    }
}
