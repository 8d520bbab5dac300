use std::path::PathBuf;

use thiserror::Error;

use crate::partition::Category;

/// Fatal conditions that stop a split run.
#[derive(Error, Debug)]
pub enum SplitError {
    /// The input failed the compatibility check, nothing has been written.
    #[error("{0}")]
    Precondition(String),
    /// A read name list could not be written. `label` is the category, or the
    /// contig name for the mitochondrial list.
    #[error("ERROR: Unable to write {label} read names to file: {}", path.display())]
    Write {
        category: Category,
        label: String,
        path: PathBuf,
    },
    #[error("BAM record {index} has no read name")]
    MissingReadName { index: usize },
    #[error("BAM record {index} has a read name or contig that is not valid UTF-8")]
    InvalidUtf8 { index: usize },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
