//! shadowwipe - find duplicate and visually similar files.
//!
//! Usage:
//!   swipe [PATHS]...                      Scan and print duplicate groups
//!   swipe -t 8 ~/Pictures                 Also cluster visually similar images
//!   swipe --trash-duplicates ~/Downloads  Trash redundant exact copies
//!   swipe --help                          Show help

use std::collections::HashSet;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{Result, eyre};

use shadowwipe_core::{
    CancelToken, DuplicateGroup, DuplicateKind, ScanSettings, SizeUnit, prune_groups,
};
use shadowwipe_ops::move_to_trash;
use shadowwipe_scan::Scanner;

#[derive(Parser)]
#[command(
    name = "shadowwipe",
    version,
    about = "Find duplicate and visually similar files",
    long_about = "shadowwipe scans directory trees for byte-identical files and, \
                  optionally, for visually similar images, then reports the \
                  reclaimable space per duplicate group."
)]
struct Cli {
    /// Directories to scan (defaults to the saved settings' paths)
    paths: Vec<PathBuf>,

    /// Minimum file size to consider, in --unit units
    #[arg(short = 'm', long, default_value = "0")]
    min_size: u64,

    /// Unit for --min-size
    #[arg(short = 'u', long, value_enum, default_value = "kb")]
    unit: UnitArg,

    /// Extra directory names to exclude, on top of the defaults
    #[arg(short = 'x', long = "exclude", value_name = "NAME")]
    excludes: Vec<String>,

    /// Hamming distance for similar-image clustering, 0 to 64 (0 = off)
    #[arg(short = 't', long, default_value = "0")]
    threshold: f64,

    /// Include hidden files and directories
    #[arg(long)]
    include_hidden: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Move every redundant copy in each exact group to the system trash,
    /// keeping the first file
    #[arg(long)]
    trash_duplicates: bool,

    /// Persist the effective settings for future runs
    #[arg(long)]
    save: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum UnitArg {
    Kb,
    Mb,
}

impl From<UnitArg> for SizeUnit {
    fn from(unit: UnitArg) -> Self {
        match unit {
            UnitArg::Kb => SizeUnit::Kb,
            UnitArg::Mb => SizeUnit::Mb,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let settings = build_settings(&cli)?;

    if cli.save {
        settings.save()?;
        eprintln!("Settings saved.");
    }

    let scanner = Scanner::new(settings).with_progress(|stage, processed, total| {
        if processed == 0 {
            eprintln!("{stage}...");
        } else {
            eprintln!("{stage}: {processed}/{total}");
        }
    });

    let groups = match scanner.run(&CancelToken::new()) {
        Ok(groups) => groups,
        Err(err) if err.is_cancelled() => {
            eprintln!("Scan cancelled");
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    match cli.format {
        OutputFormat::Text => print_report(&groups),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&groups)?),
    }

    if cli.trash_duplicates {
        trash_redundant_copies(groups)?;
    }

    Ok(())
}

/// Merge CLI arguments over the persisted settings.
fn build_settings(cli: &Cli) -> Result<ScanSettings> {
    let mut settings = if cli.paths.is_empty() {
        ScanSettings::load()
    } else {
        ScanSettings::default()
    };

    if !cli.paths.is_empty() {
        settings.paths = cli.paths.clone();
    }
    if settings.paths.is_empty() {
        return Err(eyre!(
            "no paths to scan; pass one or more directories or run with --save first"
        ));
    }

    settings.min_file_size = cli.min_size;
    settings.min_file_size_unit = cli.unit.into();
    settings.similarity_threshold = cli.threshold.clamp(0.0, 64.0);
    settings.skip_hidden = !cli.include_hidden;
    for exclude in &cli.excludes {
        if !settings.excluded_dirs.contains(exclude) {
            settings.excluded_dirs.push(exclude.clone());
        }
    }

    Ok(settings)
}

/// Print the duplicate report in the text format.
fn print_report(groups: &[DuplicateGroup]) {
    if groups.is_empty() {
        println!("No duplicate files found.");
        return;
    }

    let total_files: usize = groups.iter().map(|g| g.count()).sum();
    let total_wasted: u64 = groups.iter().map(|g| g.wasted_size).sum();

    println!();
    println!("{}", "-".repeat(70));
    println!(" Duplicate File Report");
    println!("{}", "-".repeat(70));
    println!();
    println!(
        " {} group(s), {} file(s), {} reclaimable",
        groups.len(),
        total_files,
        format_size(total_wasted)
    );
    println!();

    for (i, group) in groups.iter().enumerate() {
        match group.kind {
            DuplicateKind::Exact => println!(
                " Group {} (exact, {} files, {} wasted)",
                i + 1,
                group.count(),
                format_size(group.wasted_size)
            ),
            DuplicateKind::Similar => println!(
                " Group {} (similar ~{:.0}%, {} files)",
                i + 1,
                group.similarity,
                group.count()
            ),
        }
        for file in &group.files {
            println!("   {:>10}  {}", format_size(file.size), file.path.display());
        }
        println!();
    }
}

/// Trash every file but the first of each exact group and report the
/// partition.
fn trash_redundant_copies(mut groups: Vec<DuplicateGroup>) -> Result<()> {
    let redundant: Vec<PathBuf> = groups
        .iter()
        .filter(|g| g.kind == DuplicateKind::Exact)
        .flat_map(|g| g.files.iter().skip(1).map(|f| f.path.clone()))
        .collect();

    if redundant.is_empty() {
        println!("Nothing to trash.");
        return Ok(());
    }

    let op = move_to_trash(&redundant)?;
    println!("Moved {} file(s) to the trash.", op.deleted_paths.len());
    for failure in &op.failed_paths {
        eprintln!("  failed: {}: {}", failure.path.display(), failure.reason);
    }

    let removed: HashSet<PathBuf> = op.deleted_paths.iter().cloned().collect();
    prune_groups(&mut groups, &removed);
    if !groups.is_empty() {
        println!("{} group(s) still contain duplicates.", groups.len());
    }

    Ok(())
}

fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}
