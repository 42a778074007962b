//! Sequential per-file pipeline.
//!
//! Files are processed strictly one after another: each id's read, parse,
//! transform and confirmed writes complete before the next id starts. This
//! ordering is required: allocator and cache state is mutated incrementally
//! during traversal, scene ids can alias across files, and interleaving
//! would corrupt the index ordering. Any failure
//! aborts the whole run; a partial run would leave an unusable index.

use crate::global::process_global;
use crate::localize::Localizer;
use crate::room::{process_room, DocumentOutput};
use crate::screenplay::{cast_data_js, index_content, render_document};
use log::info;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use voiceline_core::{Mappings, Result, RunContext, RunCounters, GLOBAL_ID};

/// Input and output locations for one run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory holding the original `{id}.xml` documents.
    pub src_dir: PathBuf,
    /// Directory receiving patched `{id}.xml` documents.
    pub out_dir: PathBuf,
    /// Directory receiving rendered review documents.
    pub review_dir: PathBuf,
    /// Shared HTML template for review documents.
    pub template_path: PathBuf,
}

/// Aggregate result of a completed run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub counters: RunCounters,
    /// Actor id -> unique allocations credited to it across all files.
    pub actor_totals: BTreeMap<String, u64>,
    /// Ids processed, in order.
    pub processed: Vec<String>,
    /// True when the full unfiltered registry was processed.
    pub full_run: bool,
}

/// Sequential per-scene processing pipeline.
#[derive(Debug)]
pub struct Pipeline<'a> {
    mappings: &'a Mappings,
    config: PipelineConfig,
}

impl<'a> Pipeline<'a> {
    #[must_use]
    pub const fn new(mappings: &'a Mappings, config: PipelineConfig) -> Self {
        Self { mappings, config }
    }

    /// Derive the ordered file list for a run.
    ///
    /// The canonical list is the registry plus `global`. Caller-supplied ids
    /// intersect it (canonical order wins, unmatched ids are silently
    /// dropped); if exactly one id remains and it names a bundle, it expands
    /// to the bundle's file list. Returns the list and whether this is a
    /// full unfiltered run.
    #[must_use]
    pub fn select_files(&self, requested: &[String]) -> (Vec<String>, bool) {
        let mut files: Vec<String> = self.mappings.registry.clone();
        files.push(GLOBAL_ID.to_string());

        let full = requested.is_empty();
        if !full {
            files.retain(|id| requested.iter().any(|r| r == id));
        }

        if files.len() == 1 {
            if let Some(bundle) = self.mappings.bundles.get(&files[0]) {
                files = bundle.clone();
            }
        }

        (files, full)
    }

    /// Run the pipeline over the selected files.
    pub fn run(&self, requested: &[String], localizer: &mut dyn Localizer) -> Result<RunReport> {
        let (files, full_run) = self.select_files(requested);

        fs::create_dir_all(&self.config.out_dir)?;
        fs::create_dir_all(&self.config.review_dir)?;
        let template = fs::read_to_string(&self.config.template_path)?;

        let mut ctx = RunContext::new(self.mappings);

        for id in &files {
            info!("{id}");
            let raw = fs::read_to_string(self.config.src_dir.join(format!("{id}.xml")))?;

            let output: DocumentOutput = if id == GLOBAL_ID {
                process_global(&raw, &mut ctx, localizer)?
            } else {
                process_room(id, &raw, &mut ctx, localizer)?
            };

            ctx.actors_by_file
                .insert(id.clone(), output.actors.clone());

            fs::write(
                self.config.out_dir.join(format!("{id}.xml")),
                &output.patched_xml,
            )?;
            let review = render_document(&template, id, &output.actors, &output.content_html);
            fs::write(self.config.review_dir.join(format!("{id}.html")), review)?;
        }

        if full_run {
            let cast = ctx.actor_totals.keys().cloned().collect();
            let index = render_document(
                &template,
                "index",
                &cast,
                &index_content(&files, &ctx.actors_by_file),
            );
            fs::write(self.config.review_dir.join("index.html"), index)?;

            let assets = self.config.review_dir.join("assets");
            fs::create_dir_all(&assets)?;
            fs::write(assets.join("cast_data.js"), cast_data_js(&ctx.actor_totals)?)?;
        }

        Ok(RunReport {
            counters: ctx.counters,
            actor_totals: ctx.actor_totals,
            processed: files,
            full_run,
        })
    }
}
