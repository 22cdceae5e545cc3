use super::ErrorAccumulator;
use super::error::{Error, Result};
use super::natural::natural_cmp;
use super::reader::{is_empty, load_game};
use super::table::{ColumnWeights, append_row, initialize_table};
use super::types::Outcome;

use glob::Pattern;
use shakmaty::Color;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// What to do when a non-empty game file cannot be loaded or its result
/// cannot be normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedPolicy {
    /// Abort the whole run on the first malformed file.
    #[default]
    Abort,
    /// Log the file, record it in the summary, and continue.
    Skip,
}

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub weights: ColumnWeights,
    /// Only game files whose name matches are processed; `None` matches all.
    pub file_pattern: Option<Pattern>,
    pub on_malformed: MalformedPolicy,
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub tables_initialized: usize,
    pub games_written: usize,
    pub empty_files_skipped: usize,
    pub malformed: ErrorAccumulator,
}

/// Table path for one (iteration, subdirectory, color).
pub fn table_path(output_dir: &Path, iteration: &str, subdirectory: &str, color: Color) -> PathBuf {
    let color = match color {
        Color::White => "white",
        Color::Black => "black",
    };
    output_dir.join(format!("{iteration}_{subdirectory}_{color}.csv"))
}

/// Direct children of `dir` in natural order of their names.
fn sorted_children(dir: &Path) -> Result<Vec<DirEntry>> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by(|a, b| {
            natural_cmp(
                &a.file_name().to_string_lossy(),
                &b.file_name().to_string_lossy(),
            )
        })
        .into_iter()
        .map(|entry| entry.map_err(Error::from))
        .collect()
}

fn sorted_subdirectories(dir: &Path) -> Result<Vec<DirEntry>> {
    let mut dirs = sorted_children(dir)?;
    dirs.retain(|entry| {
        let keep = entry.file_type().is_dir();
        if !keep {
            log::debug!("Skipping non-directory {}", entry.path().display());
        }
        keep
    });
    Ok(dirs)
}

struct GameRows {
    white_header: String,
    black_header: String,
    white: Outcome,
    black: Outcome,
}

fn read_game_rows(path: &Path) -> Result<GameRows> {
    let game = load_game(path)?;
    log::debug!("{}: {} half-moves", path.display(), game.ply_count);

    Ok(GameRows {
        white: game.outcome(Color::White)?,
        black: game.outcome(Color::Black)?,
        white_header: game.white,
        black_header: game.black,
    })
}

impl RunConfig {
    fn matches_pattern(&self, file_name: &str) -> bool {
        self.file_pattern
            .as_ref()
            .is_none_or(|pattern| pattern.matches(file_name))
    }

    /// Walks `input/<subdirectory>/<iteration>/<file>` and writes one black
    /// and one white table per iteration.
    pub fn run(&self) -> Result<RunSummary> {
        let mut summary = RunSummary::default();

        for subdirectory in sorted_subdirectories(&self.input_dir)? {
            let subdirectory_name = subdirectory.file_name().to_string_lossy();

            for iteration in sorted_subdirectories(subdirectory.path())? {
                let iteration_name = iteration.file_name().to_string_lossy();
                self.process_iteration(
                    iteration.path(),
                    &iteration_name,
                    &subdirectory_name,
                    &mut summary,
                )?;
            }
        }

        Ok(summary)
    }

    fn process_iteration(
        &self,
        iteration_dir: &Path,
        iteration: &str,
        subdirectory: &str,
        summary: &mut RunSummary,
    ) -> Result<()> {
        let black_table = table_path(&self.output_dir, iteration, subdirectory, Color::Black);
        let white_table = table_path(&self.output_dir, iteration, subdirectory, Color::White);

        initialize_table(&black_table, &self.weights)?;
        initialize_table(&white_table, &self.weights)?;
        summary.tables_initialized += 2;
        log::info!(
            "Writing {} and {}",
            black_table.display(),
            white_table.display()
        );

        let mut counter = 0usize;

        for entry in sorted_children(iteration_dir)? {
            let path = entry.path();

            if !entry.file_type().is_file() {
                log::debug!("Skipping non-file {}", path.display());
                continue;
            }
            if !self.matches_pattern(&entry.file_name().to_string_lossy()) {
                log::debug!("Skipping {} (pattern mismatch)", path.display());
                continue;
            }
            if is_empty(path)? {
                log::debug!("Skipping empty file {}", path.display());
                summary.empty_files_skipped += 1;
                continue;
            }

            log::info!("Importing {}", path.display());
            let rows = match read_game_rows(path) {
                Ok(rows) => rows,
                Err(err) => match self.on_malformed {
                    MalformedPolicy::Abort => return Err(err),
                    MalformedPolicy::Skip => {
                        let msg = format!("{}: {err}", path.display());
                        log::warn!("Skipping malformed game {msg}");
                        summary.malformed.push(&msg);
                        continue;
                    }
                },
            };

            append_row(&black_table, counter, &rows.black_header, rows.black)?;
            append_row(&white_table, counter, &rows.white_header, rows.white)?;
            summary.games_written += 1;
            counter += 1;
        }

        Ok(())
    }
}
