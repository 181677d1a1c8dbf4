use crate::commands::{print_json, Context};
use crate::error::{invalid_input, not_found};
use anyhow::{Context as _, Result};
use clap::Args;
use listmerge_config::AppConfig;
use listmerge_core::{Pipeline, PipelineOutput, Record, RunSummaryDto};
use listmerge_io::{load_batch, write_record_sets, DocumentShape, FileSelector};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Directory holding the input JSON files
    pub input_dir: PathBuf,
    #[arg(long, help = "Lowest file number to include (inclusive)")]
    pub start: Option<u64>,
    #[arg(long, help = "Highest file number to include (inclusive)")]
    pub end: Option<u64>,
    #[arg(
        long,
        help = "Regex matched against file names; capture group 1 is the file number"
    )]
    pub pattern: Option<String>,
    #[arg(long)]
    pub out_dir: Option<PathBuf>,
    #[arg(long)]
    pub with_email: Option<PathBuf>,
    #[arg(long)]
    pub without_email: Option<PathBuf>,
    #[arg(long)]
    pub all_unique: Option<PathBuf>,
    #[arg(long, help = "Report counts without writing output files")]
    pub dry_run: bool,
}

#[derive(Debug, Serialize)]
struct RunReport {
    #[serde(flatten)]
    summary: RunSummaryDto,
    dry_run: bool,
    outputs: OutputPaths,
}

#[derive(Debug, Serialize)]
struct OutputPaths {
    with_email: String,
    without_email: String,
    all_unique: String,
}

pub fn run(ctx: &Context<'_>, args: RunArgs) -> Result<()> {
    let config = apply_overrides(ctx.config, &args)?;

    if !args.input_dir.exists() {
        return Err(not_found(format!(
            "input directory {}",
            args.input_dir.display()
        )));
    }
    if !args.input_dir.is_dir() {
        return Err(invalid_input(format!(
            "{} is not a directory",
            args.input_dir.display()
        )));
    }

    let selector = FileSelector::new(
        &config.input.file_pattern,
        config.input.start,
        config.input.end,
    )?;
    let paths = selector
        .select(&args.input_dir)
        .with_context(|| format!("scan input directory {}", args.input_dir.display()))?;
    debug!(
        count = paths.len(),
        start = ?config.input.start,
        end = ?config.input.end,
        "input files selected"
    );
    if paths.is_empty() {
        warn!(dir = %args.input_dir.display(), "no input files matched");
    }

    let loaded = load_batch(&paths).with_context(|| "load input files")?;
    for file in &loaded.files {
        match file.shape {
            DocumentShape::Ignored(kind) => {
                warn!(path = %file.path.display(), kind, "file holds no records, skipping");
            }
            _ => debug!(path = %file.path.display(), records = file.records, "file loaded"),
        }
    }

    let pipeline = Pipeline::new(config.fields.clone());
    let output = pipeline.run(loaded.batch);
    debug!(
        replaced = output.dedup.replaced,
        dropped = output.dedup.dropped,
        "duplicates resolved"
    );

    let outputs = OutputPaths {
        with_email: config.output.with_email_path().display().to_string(),
        without_email: config.output.without_email_path().display().to_string(),
        all_unique: config.output.all_unique_path().display().to_string(),
    };
    if !args.dry_run {
        write_outputs(&config, &output)?;
    }

    if ctx.json {
        return print_json(&RunReport {
            summary: output.summary,
            dry_run: args.dry_run,
            outputs,
        });
    }

    print_summary(&output.summary);
    if args.dry_run {
        println!("Dry run: no files written.");
    }
    Ok(())
}

fn apply_overrides(base: &AppConfig, args: &RunArgs) -> Result<AppConfig> {
    let mut config = base.clone();
    if let Some(pattern) = args.pattern.as_ref() {
        config.input.file_pattern = pattern.clone();
    }
    if args.start.is_some() {
        config.input.start = args.start;
    }
    if args.end.is_some() {
        config.input.end = args.end;
    }
    if let Some(dir) = args.out_dir.as_ref() {
        config.output.dir = dir.clone();
    }
    if let Some(name) = args.with_email.as_ref() {
        config.output.with_email = name.clone();
    }
    if let Some(name) = args.without_email.as_ref() {
        config.output.without_email = name.clone();
    }
    if let Some(name) = args.all_unique.as_ref() {
        config.output.all_unique = name.clone();
    }
    config.validate()?;
    Ok(config)
}

fn write_outputs(config: &AppConfig, output: &PipelineOutput) -> Result<()> {
    let with_email = config.output.with_email_path();
    let without_email = config.output.without_email_path();
    let all_unique = config.output.all_unique_path();
    let targets: [(&Path, &[Record]); 3] = [
        (with_email.as_path(), output.with_email.as_slice()),
        (without_email.as_path(), output.without_email.as_slice()),
        (all_unique.as_path(), output.all_unique.as_slice()),
    ];

    write_record_sets(&targets).with_context(|| "write outputs (no output file was replaced)")?;
    for (path, records) in targets {
        debug!(path = %path.display(), records = records.len(), "output written");
    }
    Ok(())
}

fn print_summary(summary: &RunSummaryDto) {
    println!(
        "Processed {} files with a total of {} records.",
        summary.files_processed, summary.total_input_records
    );
    println!("Total input records: {}", summary.total_input_records);
    println!(
        "Unique records after deduplication: {}",
        summary.unique_count
    );
    println!("Records with email: {}", summary.with_email_count);
    println!("Records without email: {}", summary.without_email_count);
    println!("Duplicates removed: {}", summary.duplicates_removed);
}
