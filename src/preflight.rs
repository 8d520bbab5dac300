//! Compatibility gate run before any output is touched.
use std::{fs::File, io::Read, path::Path};

use anyhow::Result;
use noodles::sam::{self, header::record::value::map::header::Version};
use tracing::debug;

use crate::consts::{BGZF_MAGIC, SUPPORTED_FORMAT_MAJOR};
use crate::error::SplitError;

/// True when the reader can handle files declaring format `version`.
pub fn is_supported_version(version: Version) -> bool {
    version.major() <= SUPPORTED_FORMAT_MAJOR
}

/// True when `bytes` start like a BGZF block.
pub fn has_bgzf_magic(bytes: &[u8]) -> bool {
    bytes.starts_with(&BGZF_MAGIC)
}

/// Check that `bam_file` exists and is BGZF compressed.
/// Fails with [`SplitError::Precondition`].
pub fn check_file(bam_file: &Path) -> Result<()> {
    if !bam_file.is_file() {
        return Err(SplitError::Precondition(format!(
            "ERROR: The input BAM file {} does not exist!",
            bam_file.display()
        ))
        .into());
    }

    let mut magic = [0; 4];
    let read = File::open(bam_file)?.read(&mut magic)?;
    if !has_bgzf_magic(&magic[..read]) {
        return Err(SplitError::Precondition(format!(
            "ERROR: {} is not a BGZF compressed BAM file!",
            bam_file.display()
        ))
        .into());
    }
    Ok(())
}

/// Check the header declares a format version this reader supports.
pub fn check_header(header: &sam::Header) -> Result<(), SplitError> {
    if let Some(hd) = header.header() {
        let version = hd.version();
        debug!(%version, "BAM format version");
        if !is_supported_version(version) {
            return Err(SplitError::Precondition(format!(
                "ERROR: The BAM format version {version} is not supported (expected {SUPPORTED_FORMAT_MAJOR}.x)!"
            )));
        }
    }
    Ok(())
}
