use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use glob::Pattern;
use pgn_tables::{ColumnWeights, MalformedPolicy, RunConfig};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Flatten encoded player tags of PGN games into per-iteration CSV tables"
)]
struct Cli {
    /// Top directory: <subdirectory>/<iteration>/<game file>
    input_dir: PathBuf,

    /// Directory receiving <iteration>_<subdirectory>_{white,black}.csv
    output_dir: PathBuf,

    /// Weight annotation for weightBishopPos
    #[arg(value_parser = parse_weight)]
    weight_bishop_pos: String,

    /// Weight annotation for weightRooksPos
    #[arg(value_parser = parse_weight)]
    weight_rooks_pos: String,

    /// Weight annotation for weightQueenPos
    #[arg(value_parser = parse_weight)]
    weight_queen_pos: String,

    /// Weight annotation for weightCastlingBonus
    #[arg(value_parser = parse_weight)]
    weight_castling_bonus: String,

    /// Weight annotation for search_Depth
    #[arg(long, default_value = ColumnWeights::DEFAULT_SEARCH_DEPTH, value_parser = parse_weight)]
    search_depth: String,

    /// Weight annotation for weight_PawnPos
    #[arg(long, default_value = ColumnWeights::DEFAULT_PAWN_POS, value_parser = parse_weight)]
    pawn_pos: String,

    /// Weight annotation for biaSpawnPosPieceCount
    #[arg(long, default_value = ColumnWeights::DEFAULT_PAWN_POS_PIECE_COUNT_BIAS, value_parser = parse_weight)]
    pawn_pos_piece_count_bias: String,

    /// Weight annotation for weightKnightsPos
    #[arg(long, default_value = ColumnWeights::DEFAULT_KNIGHTS_POS, value_parser = parse_weight)]
    knights_pos: String,

    /// Only process game files whose name matches this glob (e.g. "*.pgn")
    #[arg(long)]
    pattern: Option<String>,

    /// Skip game files that cannot be parsed instead of aborting the run
    #[arg(long)]
    skip_malformed: bool,
}

/// Accepts any number, keeping the text exactly as typed.
fn parse_weight(raw: &str) -> std::result::Result<String, String> {
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(trimmed.to_string()),
        _ => Err(format!("'{raw}' is not a number")),
    }
}

impl Cli {
    fn into_config(self) -> Result<RunConfig> {
        let file_pattern = self
            .pattern
            .as_deref()
            .map(Pattern::new)
            .transpose()
            .context("invalid --pattern")?;

        Ok(RunConfig {
            input_dir: self.input_dir,
            output_dir: self.output_dir,
            weights: ColumnWeights {
                search_depth: self.search_depth,
                pawn_pos: self.pawn_pos,
                pawn_pos_piece_count_bias: self.pawn_pos_piece_count_bias,
                knights_pos: self.knights_pos,
                bishop_pos: self.weight_bishop_pos,
                rooks_pos: self.weight_rooks_pos,
                queen_pos: self.weight_queen_pos,
                castling_bonus: self.weight_castling_bonus,
            },
            file_pattern,
            on_malformed: if self.skip_malformed {
                MalformedPolicy::Skip
            } else {
                MalformedPolicy::Abort
            },
        })
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let config = Cli::parse().into_config()?;
    log::info!("Reading games from {}", config.input_dir.display());

    let mut summary = config
        .run()
        .with_context(|| format!("failed to build tables from {}", config.input_dir.display()))?;

    log::info!(
        "{} games written to {} tables ({} empty files skipped)",
        summary.games_written,
        summary.tables_initialized,
        summary.empty_files_skipped
    );
    if let Some(skipped) = summary.malformed.take() {
        log::warn!("Skipped malformed games: {skipped}");
    }

    println!("Done");
    Ok(())
}
