//! Output file naming and writing of read name lists.
//!
//! # Enums
//!
//! - [`CompressionType`]: whether read name lists are written plain or gzipped.
//! - [`Wrapper`]: the open writer for one list.
//!
//! # Functions
//!
//! - [`OutputNames::new`]: derive the four list paths (plus the unused `.bedpe` path).
//! - [`remove_stale`]: delete lists left behind by an earlier run.
//! - [`write_set`]: write one read name per line.
//! - [`confirm_written`]: fail if a list did not land on disk.
use clap::ValueEnum;
use flate2::{write::GzEncoder, Compression};
use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::consts::{
    BEDPE_EXTENSION, DISABLED_MITO_LABEL, GZ_EXTENSION, READ_LIST_EXTENSION,
};
use crate::error::SplitError;
use crate::partition::{mito_contig, Category, ReadNameSet};

/// Line terminator for read name lists
const NEWLINE_SLICE: &[u8] = &[10];

/// Compression applied to the read name lists.
#[derive(Debug, ValueEnum, Clone, Copy, Default, PartialEq, Eq)]
pub enum CompressionType {
    /// Plain text, one read name per line.
    #[default]
    Uncompressed,
    /// Gzipped text.
    Gzipped,
}

/// Enum representing the writer for one read name list.
pub enum Wrapper {
    Plain(BufWriter<File>),
    Gz(GzEncoder<BufWriter<File>>),
}

impl Wrapper {
    fn create(path: &Path, compression: CompressionType) -> io::Result<Self> {
        let file = BufWriter::new(File::create(path)?);
        Ok(match compression {
            CompressionType::Uncompressed => Wrapper::Plain(file),
            CompressionType::Gzipped => Wrapper::Gz(GzEncoder::new(file, Compression::default())),
        })
    }

    fn write_name(&mut self, name: &str) -> io::Result<()> {
        match self {
            Wrapper::Plain(w) => write_line(w, name),
            Wrapper::Gz(w) => write_line(w, name),
        }
    }

    fn finish(self) -> io::Result<()> {
        match self {
            Wrapper::Plain(mut w) => w.flush(),
            Wrapper::Gz(w) => w.finish()?.flush(),
        }
    }
}

fn write_line<W: Write>(writer: &mut W, name: &str) -> io::Result<()> {
    writer.write_all(name.as_bytes())?;
    writer.write_all(NEWLINE_SLICE)
}

/// Paths of every file a split run produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputNames {
    pub mapped: PathBuf,
    pub placed: PathBuf,
    pub mitochondrial: PathBuf,
    pub unmapped: PathBuf,
    /// Reserved for paired contact output; never written here.
    pub bedpe: PathBuf,
}

impl OutputNames {
    /// Derive output paths.
    ///
    /// The base is `prefix` when given, otherwise `input` with its last
    /// extension dropped (`sample.bam` -> `sample`). Lists are named
    /// `<base>.<category>.txt`, the mitochondrial list taking the contig name
    /// (`<base>.chrM.txt`). A contig named like another category gets a
    /// `.mito` tail so no two lists share a path (`<base>.mapped.mito.txt`).
    pub fn new(
        input: &Path,
        mito: Option<&str>,
        prefix: Option<&str>,
        compression: CompressionType,
    ) -> Self {
        let base = match prefix.filter(|p| !p.is_empty()) {
            Some(p) => p.to_string(),
            None => input.with_extension("").to_string_lossy().into_owned(),
        };
        let suffix = match compression {
            CompressionType::Gzipped => format!(".{GZ_EXTENSION}"),
            CompressionType::Uncompressed => String::new(),
        };
        let list = |label: &str| PathBuf::from(format!("{base}.{label}.{READ_LIST_EXTENSION}{suffix}"));
        let mito_label = match mito_contig(mito) {
            Some(contig) if is_category_label(contig) => format!("{contig}.{DISABLED_MITO_LABEL}"),
            Some(contig) => contig.to_string(),
            None => DISABLED_MITO_LABEL.to_string(),
        };

        Self {
            mapped: list(Category::Mapped.label()),
            placed: list(Category::Placed.label()),
            mitochondrial: list(&mito_label),
            unmapped: list(Category::Unmapped.label()),
            bedpe: PathBuf::from(format!("{base}.{BEDPE_EXTENSION}")),
        }
    }

    pub fn get(&self, category: Category) -> &Path {
        match category {
            Category::Mitochondrial => &self.mitochondrial,
            Category::Unmapped => &self.unmapped,
            Category::Placed => &self.placed,
            Category::Mapped => &self.mapped,
        }
    }

    /// The four read name list paths.
    pub fn lists(&self) -> [&Path; 4] {
        Category::ALL.map(|c| self.get(c))
    }
}

fn is_category_label(name: &str) -> bool {
    Category::ALL.iter().any(|c| c.label() == name)
}

/// Name used for `category` in messages; the mitochondrial list goes by its
/// contig.
pub fn list_label<'a>(category: Category, mito: Option<&'a str>) -> &'a str {
    match (category, mito_contig(mito)) {
        (Category::Mitochondrial, Some(contig)) => contig,
        _ => category.label(),
    }
}

/// Delete any read name list that already exists.
pub fn remove_stale(names: &OutputNames) -> io::Result<()> {
    for path in names.lists() {
        if path.is_file() {
            debug!(path = %path.display(), "removing previous output");
            fs::remove_file(path)?;
        }
    }
    Ok(())
}

/// Write `reads` to `path`, one name per line, sorted.
///
/// Returns the path written to.
pub fn write_set(path: &Path, reads: &ReadNameSet, compression: CompressionType) -> io::Result<PathBuf> {
    let mut sorted: Vec<&String> = reads.iter().collect();
    sorted.sort_unstable();

    let mut writer = Wrapper::create(path, compression)?;
    for name in sorted {
        writer.write_name(name)?;
    }
    writer.finish()?;
    Ok(path.to_path_buf())
}

/// Fail with [`SplitError::Write`] unless `path` exists.
pub fn confirm_written(category: Category, label: &str, path: &Path) -> Result<(), SplitError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(SplitError::Write {
            category,
            label: label.to_string(),
            path: path.to_path_buf(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use pretty_assertions::assert_eq;
    use std::io::Read;
    use tempfile::tempdir;

    fn set(items: &[&str]) -> ReadNameSet {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_names_from_input() {
        let names = OutputNames::new(
            Path::new("data/sample.bam"),
            Some("chrM"),
            None,
            CompressionType::Uncompressed,
        );
        assert_eq!(names.mapped, PathBuf::from("data/sample.mapped.txt"));
        assert_eq!(names.placed, PathBuf::from("data/sample.placed.txt"));
        assert_eq!(names.mitochondrial, PathBuf::from("data/sample.chrM.txt"));
        assert_eq!(names.unmapped, PathBuf::from("data/sample.unmapped.txt"));
        assert_eq!(names.bedpe, PathBuf::from("data/sample.bedpe"));
    }

    #[test]
    fn test_names_with_prefix_and_gzip() {
        let names = OutputNames::new(
            Path::new("sample.bam"),
            Some(""),
            Some("out/run1"),
            CompressionType::Gzipped,
        );
        assert_eq!(names.mitochondrial, PathBuf::from("out/run1.mito.txt.gz"));
        assert_eq!(names.mapped, PathBuf::from("out/run1.mapped.txt.gz"));
        assert_eq!(names.bedpe, PathBuf::from("out/run1.bedpe"));
    }

    #[test]
    fn test_list_paths_are_distinct() {
        let names = OutputNames::new(
            Path::new("x.bam"),
            Some("MT"),
            None,
            CompressionType::Uncompressed,
        );
        let mut lists = names.lists().to_vec();
        lists.sort();
        lists.dedup();
        assert_eq!(lists.len(), 4);
    }

    #[test]
    fn test_mito_named_like_a_category_gets_own_path() {
        for category in Category::ALL {
            let names = OutputNames::new(
                Path::new("x.bam"),
                Some(category.label()),
                None,
                CompressionType::Uncompressed,
            );
            let mut lists = names.lists().to_vec();
            lists.sort();
            lists.dedup();
            assert_eq!(lists.len(), 4, "mito contig {category}");
        }

        let names = OutputNames::new(
            Path::new("x.bam"),
            Some("mapped"),
            None,
            CompressionType::Uncompressed,
        );
        assert_eq!(names.mitochondrial, PathBuf::from("x.mapped.mito.txt"));
        assert_eq!(names.mapped, PathBuf::from("x.mapped.txt"));
    }

    #[test]
    fn test_list_label() {
        assert_eq!(list_label(Category::Mitochondrial, Some("chrM")), "chrM");
        assert_eq!(list_label(Category::Mitochondrial, None), "mitochondrial");
        assert_eq!(list_label(Category::Placed, Some("chrM")), "placed");
    }

    #[test]
    fn test_write_set_plain() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reads.txt");
        let written = write_set(&path, &set(&["b", "a", "c"]), CompressionType::Uncompressed).unwrap();

        assert_eq!(written, path);
        assert_eq!(fs::read_to_string(&path).unwrap(), "a\nb\nc\n");
        assert!(confirm_written(Category::Mapped, "mapped", &written).is_ok());
    }

    #[test]
    fn test_write_set_gzipped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reads.txt.gz");
        write_set(&path, &set(&["r2", "r1"]), CompressionType::Gzipped).unwrap();

        let mut text = String::new();
        GzDecoder::new(File::open(&path).unwrap())
            .read_to_string(&mut text)
            .unwrap();
        assert_eq!(text, "r1\nr2\n");
    }

    #[test]
    fn test_empty_set_still_creates_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.txt");
        write_set(&path, &ReadNameSet::default(), CompressionType::Uncompressed).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_remove_stale() {
        let dir = tempdir().unwrap();
        let prefix = dir.path().join("s");
        let names = OutputNames::new(
            Path::new("s.bam"),
            Some("chrM"),
            prefix.to_str(),
            CompressionType::Uncompressed,
        );
        fs::write(&names.mapped, "old\n").unwrap();
        fs::write(&names.bedpe, "keep\n").unwrap();

        remove_stale(&names).unwrap();
        assert!(!names.mapped.exists());
        assert!(names.bedpe.exists());
    }

    #[test]
    fn test_confirm_missing_file() {
        let dir = tempdir().unwrap();
        let err = confirm_written(Category::Mitochondrial, "chrM", &dir.path().join("nope.txt"))
            .unwrap_err();
        assert!(matches!(
            err,
            SplitError::Write {
                category: Category::Mitochondrial,
                ..
            }
        ));
        assert!(err.to_string().contains("chrM"));
    }
}
