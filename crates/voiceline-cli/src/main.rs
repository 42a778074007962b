//! voiceline CLI - patch scene dialog documents and render screenplay reviews.

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use voiceline_backend::{NoopLocalizer, Pipeline, PipelineConfig, RunReport};
use voiceline_core::Mappings;

/// Assign stable voice-asset slots to scene dialog and generate review
/// documents.
///
/// With no ids, the full canonical registry plus the global document is
/// processed and the aggregate index and cast dataset are written. Ids that
/// are not in the registry are silently dropped; a single surviving id that
/// names a bundle expands to the bundle's file list.
#[derive(Debug, Parser)]
#[command(name = "voiceline", version)]
struct Cli {
    /// File ids to process (default: the full registry)
    ids: Vec<String>,

    /// Directory holding the original scene documents
    #[arg(long, default_value = "xml")]
    src_dir: PathBuf,

    /// Directory receiving patched documents
    #[arg(long, default_value = "patched")]
    out_dir: PathBuf,

    /// Directory receiving rendered review documents
    #[arg(long, default_value = "screenplay")]
    review_dir: PathBuf,

    /// Mapping tables (registry, aliases, colors, omissions, bundles)
    #[arg(long, default_value = "mappings.toml")]
    mappings: PathBuf,

    /// Shared HTML template for review documents
    #[arg(long, default_value = "template.html")]
    template: PathBuf,

    /// Log each processed file id
    #[arg(short, long)]
    verbose: bool,
}

fn print_summary(report: &RunReport) {
    println!("{} {}", "Defined dialog:".bold(), report.counters.total);
    println!("{} {}", "Empty dialog:".bold(), report.counters.empty);
    println!("{} {}", "Duplicate dialog:".bold(), report.counters.duplicate);
    println!("{} {}", "Total unique dialog:".bold(), report.counters.unique);
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let mappings = Mappings::load(&cli.mappings)
        .with_context(|| format!("failed to load mappings from {}", cli.mappings.display()))?;

    let pipeline = Pipeline::new(
        &mappings,
        PipelineConfig {
            src_dir: cli.src_dir,
            out_dir: cli.out_dir,
            review_dir: cli.review_dir,
            template_path: cli.template,
        },
    );

    let report = pipeline
        .run(&cli.ids, &mut NoopLocalizer)
        .context("run aborted")?;

    print_summary(&report);
    Ok(())
}
