//! Loading BAM records into a [`RecordTable`].
//!
//! The whole file is read eagerly; classification needs every record before
//! it can start.
use std::{
    io::{self, Read},
    path::Path,
};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use noodles::{bam, sam};
use tracing::debug;

use crate::consts::MISSING_MAPQ;
use crate::error::SplitError;
use crate::records::{AlignmentRecord, RecordTable};

/// A BAM record with its read name and contig resolved against the header.
pub struct BamAlignment<'a> {
    record: &'a bam::Record,
    name: &'a str,
    contig: Option<&'a str>,
}

impl<'a> BamAlignment<'a> {
    /// Resolve `record` against `header`. `index` is the zero based position
    /// of the record in the file and is only used in error messages.
    pub fn new(
        record: &'a bam::Record,
        header: &'a sam::Header,
        index: usize,
    ) -> Result<Self, SplitError> {
        let name = record
            .name()
            .ok_or(SplitError::MissingReadName { index })?;
        let name = std::str::from_utf8(name).map_err(|_| SplitError::InvalidUtf8 { index })?;

        let contig = match record.reference_sequence_id() {
            Some(id) => {
                let id = id?;
                let (contig, _) = header.reference_sequences().get_index(id).ok_or_else(|| {
                    io::Error::new(
                        io::ErrorKind::InvalidData,
                        format!("BAM record {index} refers to reference sequence {id}, which is not in the header"),
                    )
                })?;
                Some(std::str::from_utf8(contig).map_err(|_| SplitError::InvalidUtf8 { index })?)
            }
            None => None,
        };

        Ok(Self {
            record,
            name,
            contig,
        })
    }
}

impl AlignmentRecord for BamAlignment<'_> {
    fn read_name(&self) -> &str {
        self.name
    }

    fn is_first_mate(&self) -> bool {
        self.record.flags().is_first_segment()
    }

    fn is_unmapped(&self) -> bool {
        self.record.flags().is_unmapped()
    }

    fn contig(&self) -> Option<&str> {
        self.contig
    }

    fn mapping_quality(&self) -> u8 {
        self.record
            .mapping_quality()
            .map_or(MISSING_MAPQ, |q| q.get())
    }
}

/// An opened BAM file whose header has already been read.
pub struct BamInput<R> {
    reader: bam::io::Reader<R>,
    header: sam::Header,
}

/// Open `bam_file` and read its header.
pub fn open(bam_file: &Path) -> Result<BamInput<impl Read>> {
    let mut reader = bam::io::reader::Builder::default()
        .build_from_path(bam_file)
        .with_context(|| format!("Failed to open BAM file: {}", bam_file.display()))?;
    let header = reader
        .read_header()
        .with_context(|| format!("Failed to read BAM header: {}", bam_file.display()))?;
    Ok(BamInput { reader, header })
}

impl<R: Read> BamInput<R> {
    pub fn header(&self) -> &sam::Header {
        &self.header
    }

    /// Read every remaining record into a [`RecordTable`].
    ///
    /// # Returns
    ///
    /// The table of all records, in file order. A record without a read name
    /// is an error.
    pub fn load_table(mut self) -> Result<RecordTable> {
        let bar = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr())
            .with_message("BAM Records");
        bar.set_style(
            ProgressStyle::with_template("[{elapsed_precise}] {spinner} {pos:>7} {msg}")?
                .tick_strings(&["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"]),
        );

        let mut table = RecordTable::new();
        let mut record = bam::Record::default();
        let mut index = 0;
        while self
            .reader
            .read_record(&mut record)
            .with_context(|| format!("Failed to read BAM record {index}"))?
            != 0
        {
            let alignment = BamAlignment::new(&record, &self.header, index)?;
            table.push(&alignment);
            index += 1;
            bar.inc(1);
        }
        bar.finish_and_clear();

        debug!(records = table.len(), "loaded BAM records");
        Ok(table)
    }
}
