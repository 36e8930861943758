use crate::core::matcher::ExclusionPredicate;
use crate::domain::models::{AggregateConfig, AggregateSummary, FileRecord, RecordBody};
use crate::infra::file_system::{read_file_text, relative_posix};
use crate::infra::output::{RecordWriter, create_output_file};
use anyhow::Context;
use log::{debug, info, warn};
use std::fs;
use std::io::Write;
use std::path::Path;
use walkdir::WalkDir;

/// Writes every non-excluded file under `config.root` into `config.output_path`.
///
/// The rules come from `<root>/<rules_file>`. The output file is created
/// before the walk and never aggregated into itself.
pub fn aggregate(config: &AggregateConfig) -> anyhow::Result<AggregateSummary> {
    let root = fs::canonicalize(&config.root)
        .with_context(|| format!("Failed to resolve root: {}", config.root.display()))?;
    info!("Aggregating files under {}", root.display());

    let rules_path = root.join(&config.rules_file);
    let predicate = ExclusionPredicate::load(&root, &rules_path, &config.special_exclude)?;

    let output = create_output_file(&config.output_path)?;
    let output_abs = fs::canonicalize(&config.output_path).ok();
    let mut writer = RecordWriter::new(output);

    let summary = aggregate_into(&root, &predicate, output_abs.as_deref(), &mut writer)?;
    writer
        .finish()
        .with_context(|| format!("Failed to flush {}", config.output_path.display()))?;

    info!(
        "Wrote {} records ({} unreadable), excluded {} entries",
        summary.files_written, summary.files_failed, summary.entries_excluded
    );
    Ok(summary)
}

/// Walks `root` in name order, pruning excluded directories before descent.
pub fn aggregate_into<W: Write>(
    root: &Path,
    predicate: &ExclusionPredicate,
    skip: Option<&Path>,
    writer: &mut RecordWriter<W>,
) -> anyhow::Result<AggregateSummary> {
    let mut summary = AggregateSummary::default();
    let mut excluded = 0;

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            if entry.depth() == 0 {
                return true;
            }
            let rel = relative_posix(entry.path(), root);
            let is_dir = entry.file_type().is_dir();
            if predicate.is_excluded(&rel, is_dir) || skip == Some(entry.path()) {
                debug!("Excluding {}{}", rel, if is_dir { "/" } else { "" });
                excluded += 1;
                return false;
            }
            true
        });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        let file_type = entry.file_type();
        if file_type.is_dir() {
            continue;
        }
        // Dangling links still get a record; only links to directories are skipped.
        if file_type.is_symlink() && entry.path().is_dir() {
            debug!("Skipping directory symlink: {}", entry.path().display());
            continue;
        }
        if !file_type.is_file() && !file_type.is_symlink() {
            debug!("Skipping special file: {}", entry.path().display());
            continue;
        }

        let record = FileRecord {
            rel_path: relative_posix(entry.path(), root),
            body: read_file_text(entry.path()),
        };
        if let RecordBody::Unreadable(message) = &record.body {
            warn!("{}: {}", record.rel_path, message);
            summary.files_failed += 1;
        }

        writer
            .write_record(&record)
            .with_context(|| format!("Failed to write record for {}", record.rel_path))?;
        summary.files_written += 1;
    }

    summary.entries_excluded = excluded;
    Ok(summary)
}
