use anyhow::{bail, Result};
use clap::Args;
use config::{GeneratorConfig, MergeConfig, Strategy};
use datagen::SegmentGenerator;
use engine::{MergeEngine, MergeStats, WriterSink};
use std::io::{self, Write};
use tracing::info;

/// Merge options shared by `merge` and `generate`.
#[derive(Args, Debug, Default)]
pub struct MergeArgs {
    /// Merge strategy: naive or dedup [env: SEGMERGE_STRATEGY]
    #[arg(long)]
    strategy: Option<Strategy>,

    /// Fail fast on segments that are not strictly ascending [env: SEGMERGE_VALIDATE]
    #[arg(long)]
    validate: bool,
}

impl MergeArgs {
    /// Environment defaults, overridden by whatever flags were given.
    pub fn resolve(&self) -> Result<MergeConfig> {
        let mut cfg = MergeConfig::from_env()?;
        if let Some(strategy) = self.strategy {
            cfg.strategy = strategy;
        }
        if self.validate {
            cfg.validate_order = true;
        }
        Ok(cfg)
    }
}

/// Shape of generated segments.
#[derive(Args, Debug, Default)]
pub struct GeneratorArgs {
    /// Number of segments [env: SEGMERGE_SEGMENTS]
    #[arg(long)]
    segments: Option<usize>,

    /// Size of the random key pool [env: SEGMERGE_KEYS]
    #[arg(long)]
    keys: Option<usize>,

    /// Length of each random key [env: SEGMERGE_KEY_LEN]
    #[arg(long)]
    key_len: Option<usize>,

    /// Maximum keys per segment [env: SEGMERGE_WINDOW]
    #[arg(long)]
    window: Option<usize>,

    /// RNG seed for reproducible segments [env: SEGMERGE_SEED]
    #[arg(long)]
    seed: Option<u64>,
}

impl GeneratorArgs {
    pub fn resolve(&self) -> Result<GeneratorConfig> {
        let mut cfg = GeneratorConfig::from_env()?;
        if let Some(v) = self.segments {
            cfg.segments = v;
        }
        if let Some(v) = self.keys {
            cfg.key_pool = v;
        }
        if let Some(v) = self.key_len {
            cfg.key_len = v;
        }
        if let Some(v) = self.window {
            cfg.max_window = v;
        }
        if self.seed.is_some() {
            cfg.seed = self.seed;
        }
        Ok(cfg)
    }
}

/// Splits a command-line segment (`"a:1,b:2"`) into raw entries.
///
/// Empty pieces are dropped, so `""` is an empty segment.
pub fn parse_segment(arg: &str) -> Vec<String> {
    arg.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

fn stream<W: Write>(
    engine: &MergeEngine,
    segments: &[Vec<String>],
    out: W,
) -> Result<MergeStats> {
    let mut sink = WriterSink::new(out);
    Ok(engine.merge_into(segments, &mut sink)?)
}

fn log_stats(strategy: Strategy, stats: &MergeStats) {
    info!(
        %strategy,
        scanned = stats.records_scanned,
        emitted = stats.records_emitted,
        shadowed = stats.records_shadowed,
        inserts = stats.queue_insertions,
        max_queue = stats.max_queue_len,
        "merge stats"
    );
}

pub fn merge(segment_args: &[String], args: &MergeArgs, stats: bool) -> Result<()> {
    let cfg = args.resolve()?;
    let segments: Vec<Vec<String>> = segment_args.iter().map(|s| parse_segment(s)).collect();

    let engine = MergeEngine::new(cfg);
    let run_stats = stream(&engine, &segments, io::stdout().lock())?;
    if stats {
        log_stats(cfg.strategy, &run_stats);
    }
    Ok(())
}

pub fn generate(gen_args: &GeneratorArgs, args: &MergeArgs, print_segments: bool) -> Result<()> {
    let gen_cfg = gen_args.resolve()?;
    let cfg = args.resolve()?;
    let segments = SegmentGenerator::new(gen_cfg).generate();

    let mut out = io::stdout().lock();
    if print_segments {
        for (segment_id, segment) in segments.iter().enumerate() {
            writeln!(out, "# segment {}: {}", segment_id, segment.join(","))?;
        }
    }

    let engine = MergeEngine::new(cfg);
    let run_stats = stream(&engine, &segments, out)?;
    log_stats(cfg.strategy, &run_stats);
    Ok(())
}

pub fn compare(gen_args: &GeneratorArgs, validate: bool) -> Result<()> {
    let gen_cfg = gen_args.resolve()?;
    let segments = SegmentGenerator::new(gen_cfg).generate();

    let engine = MergeEngine::new(MergeConfig::default().with_validation(validate));
    let cmp = engine.compare(&segments)?;

    let mut out = io::stdout().lock();
    for (strategy, stats) in [
        (Strategy::Naive, &cmp.naive),
        (Strategy::Deduplicated, &cmp.dedup),
    ] {
        writeln!(
            out,
            "{:<6} scanned={} emitted={} shadowed={} inserts={} max_queue={}",
            strategy.as_str(),
            stats.records_scanned,
            stats.records_emitted,
            stats.records_shadowed,
            stats.queue_insertions,
            stats.max_queue_len
        )?;
    }
    writeln!(out, "identical={}", cmp.identical)?;

    if !cmp.identical {
        bail!("strategies produced different output");
    }
    Ok(())
}
