//! MeterMap CLI: prose in, metrically matched poem out.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;

use metermap_core::corpus::Segmentation;
use metermap_core::language::{PhoneticDict, RhymeIndex};
use metermap_core::select::{Direction, LexiconScorer, Policy, Trajectory};
use metermap_core::{meter_map, MeterMapConfig, Resources, Target};

/// Dictionary used when neither `--dict` nor `METERMAP_DICT` is given.
const DEFAULT_DICT: &str = "cmu_dict.json";

#[derive(Parser, Debug)]
#[command(
    name = "metermap",
    about = "Rebuild a poem's meter from lines of a prose corpus",
    version
)]
struct Cli {
    /// Corpus text file
    corpus: PathBuf,

    /// Target poem whose meter is mimicked, one line per line
    #[arg(required_unless_present = "sonnet", conflicts_with = "sonnet")]
    poem: Option<PathBuf>,

    /// Write fourteen lines of iambic pentameter instead of following a poem
    #[arg(long, default_value_t = false)]
    sonnet: bool,

    /// Corpus is separated by line breaks rather than sentences
    #[arg(long, default_value_t = false)]
    lines: bool,

    // -- Prevailing sentiment --
    /// Positive sentiment prevails
    #[arg(long, group = "direction")]
    pos: bool,

    /// Negative sentiment prevails
    #[arg(long, group = "direction")]
    neg: bool,

    /// Neutral sentiment prevails
    #[arg(long, group = "direction")]
    neu: bool,

    // -- Sentiment trajectory --
    /// Rise from negative to positive
    #[arg(long, group = "trajectory")]
    rise: bool,

    /// Fall from positive to negative
    #[arg(long, group = "trajectory")]
    fall: bool,

    /// Maximum likelihood sentiment variance
    #[arg(long, group = "trajectory")]
    maxlike: bool,

    /// Cycle from prevailing to opposite sentiment every LEN lines; requires --pos, --neg, or --neu
    #[arg(long, value_name = "LEN", group = "trajectory")]
    cycle: Option<usize>,

    // -- Rhyme --
    /// Rewrite line endings so lines rhyme
    #[arg(long, default_value_t = false)]
    rhyme: bool,

    /// Rhyme scheme such as ABAB (implies --rhyme)
    #[arg(long)]
    scheme: Option<String>,

    // -- Resources --
    /// Pronouncing dictionary (cmudict text or JSON) [env: METERMAP_DICT]
    #[arg(long)]
    dict: Option<PathBuf>,

    /// Separate pronouncing dictionary for rhymes (default: --dict)
    #[arg(long, conflicts_with = "rhyme_index")]
    rhyme_dict: Option<PathBuf>,

    /// Precomputed rhyme index JSON (key -> words)
    #[arg(long)]
    rhyme_index: Option<PathBuf>,

    /// Sentiment lexicon, tab separated word and -5..5 valence
    #[arg(long)]
    lexicon: Option<PathBuf>,

    // -- Output --
    /// Write the poem here instead of printing it
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write a JSON report of the run
    #[arg(long)]
    report: Option<PathBuf>,

    /// RNG seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Show verbose output
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

impl Cli {
    fn direction(&self) -> Option<Direction> {
        if self.pos {
            Some(Direction::Pos)
        } else if self.neg {
            Some(Direction::Neg)
        } else if self.neu {
            Some(Direction::Neu)
        } else {
            None
        }
    }

    fn trajectory(&self) -> Option<Trajectory> {
        if self.rise {
            Some(Trajectory::Rise)
        } else if self.fall {
            Some(Trajectory::Fall)
        } else if self.maxlike {
            Some(Trajectory::MaxLikelihood)
        } else {
            self.cycle.map(Trajectory::Cycle)
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Init logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    if let Err(e) = run(cli) {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}

/// Dictionary path from `METERMAP_DICT`, else the working directory default.
fn default_dict_path() -> PathBuf {
    std::env::var("METERMAP_DICT")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_DICT))
}

/// Validate input files exist.
fn validate_inputs(paths: &[&Path]) -> Result<()> {
    for p in paths {
        if !p.exists() {
            bail!("File not found: {}", p.display());
        }
    }
    Ok(())
}

/// Read a text file, dropping bytes that are not valid UTF-8.
fn read_text(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn run(cli: Cli) -> Result<()> {
    let policy = Policy::from_flags(cli.direction(), cli.trajectory(), cli.sonnet)?;

    let dict_path = cli.dict.clone().unwrap_or_else(default_dict_path);
    let mut inputs: Vec<&Path> = vec![cli.corpus.as_path(), dict_path.as_path()];
    if let Some(poem) = &cli.poem {
        inputs.push(poem.as_path());
    }
    validate_inputs(&inputs)?;

    let dict = PhoneticDict::load(&dict_path)?;
    let rhyme_dict = match &cli.rhyme_dict {
        Some(path) => Some(PhoneticDict::load(path)?),
        None => None,
    };
    let rhyme_dict = rhyme_dict.as_ref().unwrap_or(&dict);
    let rhyme_index = match &cli.rhyme_index {
        Some(path) => RhymeIndex::load(path)?,
        None => RhymeIndex::build(rhyme_dict),
    };
    let scorer = match &cli.lexicon {
        Some(path) => LexiconScorer::load(path)?,
        None => LexiconScorer::default(),
    };

    let corpus_text = read_text(&cli.corpus)?;
    let target = match &cli.poem {
        Some(path) if !cli.sonnet => Target::Poem(read_text(path)?),
        _ => Target::Sonnet,
    };

    let config = MeterMapConfig {
        segmentation: if cli.lines {
            Segmentation::Lines
        } else {
            Segmentation::Sentences
        },
        policy,
        rhyme: cli.rhyme,
        scheme: cli.scheme.clone(),
        seed: cli.seed,
    };
    let resources = Resources {
        dict: &dict,
        rhyme_dict,
        rhyme_index: &rhyme_index,
        scorer: &scorer,
    };

    let poem = meter_map(&corpus_text, &target, &resources, &config)?;
    if poem.lines.is_empty() {
        bail!("No target line matched the meter of any corpus line");
    }
    log::info!("Wrote {} lines", poem.lines.len());

    let text = poem.lines.join("\n");
    match &cli.output {
        Some(path) => {
            std::fs::write(path, &text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Output: {}", path.display());
        }
        None => println!("{}", text),
    }

    if let Some(path) = &cli.report {
        let json = serde_json::to_string_pretty(&poem)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write report {}", path.display()))?;
        log::info!("Report: {}", path.display());
    }

    Ok(())
}
