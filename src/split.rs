//! Module for splitting a BAM file into read name lists.
//!
//! [`split_reads`] runs the whole pipeline for one input file:
//!
//! 1. check the input is a BAM file this reader supports
//! 2. delete read name lists from a previous run
//! 3. load every record into a [`RecordTable`](crate::records::RecordTable)
//! 4. partition the read names and report consistency warnings
//! 5. write the mitochondrial list (when enabled), then unmapped, placed and
//!    mapped, confirming each file before moving on
//!
//! Consistency problems are logged as warnings before any list is written and
//! never stop the run. A failed write stops it immediately; lists already
//! written stay on disk.
//!
//! # Example
//!
//! ```rust,ignore
//! let config = SplitConfig::new(PathBuf::from("sample.bam"));
//! match split_reads(&config) {
//!     Ok(summary) => println!("{} mapped reads", summary.partition.mapped.len()),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::bam;
use crate::consistency::{self, Violation};
use crate::consts::{DEFAULT_MITO_CONTIG, MISSING_MAPQ};
use crate::error::SplitError;
use crate::output::{
    confirm_written, list_label, remove_stale, write_set, CompressionType, OutputNames,
};
use crate::partition::{mito_contig, partition, Category, Partition};
use crate::preflight;
use crate::records::RecordTable;

/// Settings for one split run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitConfig {
    pub bam_file: PathBuf,
    /// Mitochondrial contig; `None` or empty disables the category.
    pub mito: Option<String>,
    /// Output base; defaults to the input path without its extension.
    pub prefix: Option<String>,
    pub compression: CompressionType,
}

impl SplitConfig {
    pub fn new(bam_file: PathBuf) -> Self {
        Self {
            bam_file,
            mito: Some(DEFAULT_MITO_CONTIG.to_string()),
            prefix: None,
            compression: CompressionType::default(),
        }
    }

    pub fn mito(&self) -> Option<&str> {
        mito_contig(self.mito.as_deref())
    }

    pub fn output_names(&self) -> OutputNames {
        OutputNames::new(
            &self.bam_file,
            self.mito(),
            self.prefix.as_deref(),
            self.compression,
        )
    }
}

/// What a successful run produced.
#[derive(Debug)]
pub struct Summary {
    pub records: usize,
    pub partition: Partition,
    pub outputs: OutputNames,
    pub warnings: Vec<Violation>,
}

fn write_category(
    category: Category,
    parts: &Partition,
    outputs: &OutputNames,
    config: &SplitConfig,
) -> Result<()> {
    let path = outputs.get(category);
    let label = list_label(category, config.mito());
    let written = write_set(path, parts.get(category), config.compression).map_err(|e| {
        anyhow::Error::new(e).context(SplitError::Write {
            category,
            label: label.to_string(),
            path: path.to_path_buf(),
        })
    })?;
    confirm_written(category, label, &written)?;
    info!(
        category = label,
        reads = parts.get(category).len(),
        path = %written.display(),
        "wrote read names"
    );
    Ok(())
}

/// Count of mapped rows with MAPQ 0, and of rows with no MAPQ at all.
fn mapq_stats(table: &RecordTable) -> (usize, usize) {
    table
        .rows()
        .iter()
        .fold((0, 0), |(zero, missing), r| match r.mapping_quality {
            0 if !r.is_unmapped => (zero + 1, missing),
            MISSING_MAPQ => (zero, missing + 1),
            _ => (zero, missing),
        })
}

fn report(violations: &[Violation]) {
    for violation in violations {
        warn!("{violation}");
    }
}

/// Split the reads of `config.bam_file` into four read name lists.
pub fn split_reads(config: &SplitConfig) -> Result<Summary> {
    let bam_file: &Path = &config.bam_file;
    preflight::check_file(bam_file)?;
    let input = bam::open(bam_file)?;
    preflight::check_header(input.header())?;

    let outputs = config.output_names();
    remove_stale(&outputs).context("Could not remove output from a previous run")?;

    let table = input.load_table()?;
    info!(records = table.len(), "loaded records");
    if table.is_empty() {
        warn!(path = %bam_file.display(), "BAM file has no records");
    }
    let (zero_mapq, missing_mapq) = mapq_stats(&table);
    debug!(zero_mapq, missing_mapq, "mapping quality");

    let parts = partition(&table, config.mito());
    debug!(
        reads = parts.all_reads.len(),
        unmapped_mate1 = parts.unmapped_mate1.len(),
        unmapped_mate2 = parts.unmapped_mate2.len(),
        "partitioned read names"
    );
    let warnings = consistency::check(&table, &parts);
    report(&warnings);

    if config.mito().is_some() {
        write_category(Category::Mitochondrial, &parts, &outputs, config)?;
    }
    write_category(Category::Unmapped, &parts, &outputs, config)?;
    write_category(Category::Placed, &parts, &outputs, config)?;
    write_category(Category::Mapped, &parts, &outputs, config)?;

    Ok(Summary {
        records: table.len(),
        partition: parts,
        outputs,
        warnings,
    })
}
