//! Flattened view of alignment records used for set based filtering.
//!
//! Every record read from the alignment file becomes one [`RecordRow`] holding
//! the five attributes the classification needs. Rows are collected into a
//! [`RecordTable`] in input order; nothing is filtered or de-duplicated here,
//! so a read name shows up once per mate and once per secondary or
//! supplementary alignment.
use crate::partition::ReadNameSet;

/// Anything that can describe one aligned read.
///
/// Implemented for BAM records (see [`crate::bam::BamAlignment`]) and for
/// [`RecordRow`] itself, which lets tables be built from in-memory rows.
pub trait AlignmentRecord {
    fn read_name(&self) -> &str;
    fn is_first_mate(&self) -> bool;
    fn is_unmapped(&self) -> bool;
    /// Name of the reference sequence, `None` when the record carries none.
    fn contig(&self) -> Option<&str>;
    fn mapping_quality(&self) -> u8;
}

/// Immutable snapshot of a single alignment record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordRow {
    pub read_name: String,
    pub is_first_mate: bool,
    pub is_unmapped: bool,
    pub contig: Option<String>,
    pub mapping_quality: u8,
}

impl RecordRow {
    pub fn from_record<R: AlignmentRecord + ?Sized>(record: &R) -> Self {
        Self {
            read_name: record.read_name().to_string(),
            is_first_mate: record.is_first_mate(),
            is_unmapped: record.is_unmapped(),
            contig: record.contig().map(str::to_string),
            mapping_quality: record.mapping_quality(),
        }
    }
}

impl AlignmentRecord for RecordRow {
    fn read_name(&self) -> &str {
        &self.read_name
    }

    fn is_first_mate(&self) -> bool {
        self.is_first_mate
    }

    fn is_unmapped(&self) -> bool {
        self.is_unmapped
    }

    fn contig(&self) -> Option<&str> {
        self.contig.as_deref()
    }

    fn mapping_quality(&self) -> u8 {
        self.mapping_quality
    }
}

/// One row per input record, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordTable {
    rows: Vec<RecordRow>,
}

impl RecordTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a snapshot of `record` to the table.
    pub fn push<R: AlignmentRecord + ?Sized>(&mut self, record: &R) {
        self.rows.push(RecordRow::from_record(record));
    }

    pub fn rows(&self) -> &[RecordRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct read names of the rows accepted by `keep`.
    pub fn read_names<F>(&self, keep: F) -> ReadNameSet
    where
        F: Fn(&RecordRow) -> bool,
    {
        self.rows
            .iter()
            .filter(|r| keep(*r))
            .map(|r| r.read_name.clone())
            .collect()
    }

    /// Every distinct read name in the table.
    pub fn all_read_names(&self) -> ReadNameSet {
        self.read_names(|_| true)
    }
}

impl From<Vec<RecordRow>> for RecordTable {
    fn from(rows: Vec<RecordRow>) -> Self {
        Self { rows }
    }
}

/// Shorthand used by tests across the crate to build rows.
#[cfg(test)]
pub(crate) fn row(name: &str, first: bool, unmapped: bool, contig: Option<&str>) -> RecordRow {
    RecordRow {
        read_name: name.to_string(),
        is_first_mate: first,
        is_unmapped: unmapped,
        contig: contig.map(str::to_string),
        mapping_quality: if unmapped { 0 } else { 60 },
    }
}
