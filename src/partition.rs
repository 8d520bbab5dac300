//! Partitioning of read names into mitochondrial, unmapped, placed and mapped sets.
//!
//! The partition is computed as an ordered chain of immutable set operations:
//!
//! 1. all distinct read names
//! 2. mitochondrial: names with any record on the mitochondrial contig
//! 3. mate 1 and mate 2 rows, ignoring mitochondrial names
//! 4. names of unmapped mate 1 rows, names of unmapped mate 2 rows
//! 5. unmapped: both mates unmapped
//! 6. placed: exactly one mate unmapped
//! 7. mapped: everything left over
//!
//! Nothing here guarantees the four sets are disjoint; that is checked after
//! the fact by [`crate::consistency::check`].
use std::fmt;

use fnv::FnvHashSet;

use crate::records::RecordTable;

/// A set of unique read names.
pub type ReadNameSet = FnvHashSet<String>;

/// The four output categories, in the order they are derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Mitochondrial,
    Unmapped,
    Placed,
    Mapped,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Mitochondrial,
        Category::Unmapped,
        Category::Placed,
        Category::Mapped,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Mitochondrial => "mitochondrial",
            Category::Unmapped => "unmapped",
            Category::Placed => "placed",
            Category::Mapped => "mapped",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of [`partition`], including the intermediate sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    pub all_reads: ReadNameSet,
    pub unmapped_mate1: ReadNameSet,
    pub unmapped_mate2: ReadNameSet,
    pub mitochondrial: ReadNameSet,
    pub unmapped: ReadNameSet,
    pub placed: ReadNameSet,
    pub mapped: ReadNameSet,
}

impl Partition {
    pub fn get(&self, category: Category) -> &ReadNameSet {
        match category {
            Category::Mitochondrial => &self.mitochondrial,
            Category::Unmapped => &self.unmapped,
            Category::Placed => &self.placed,
            Category::Mapped => &self.mapped,
        }
    }

    /// The four category sets in derivation order.
    pub fn sets(&self) -> impl Iterator<Item = (Category, &ReadNameSet)> {
        Category::ALL.into_iter().map(move |c| (c, self.get(c)))
    }
}

/// Returns `None` for an absent or empty contig name, which switches off the
/// mitochondrial category.
pub fn mito_contig(name: Option<&str>) -> Option<&str> {
    name.filter(|n| !n.is_empty())
}

/// Split the read names of `table` into four categories.
///
/// # Arguments
///
/// * `table` - The records to classify.
/// * `mito` - Name of the mitochondrial contig. `None` or `""` yields an
///   empty mitochondrial set.
///
/// # Example
///
/// ```rust,ignore
/// let table = RecordTable::from(vec![
///     RecordRow { read_name: "C".into(), is_first_mate: true, is_unmapped: false, contig: Some("chr1".into()), mapping_quality: 60 },
///     RecordRow { read_name: "C".into(), is_first_mate: false, is_unmapped: true, contig: None, mapping_quality: 0 },
/// ]);
/// let parts = partition(&table, Some("chrM"));
/// assert!(parts.placed.contains("C"));
/// ```
pub fn partition(table: &RecordTable, mito: Option<&str>) -> Partition {
    let all_reads = table.all_read_names();

    let mitochondrial: ReadNameSet = match mito_contig(mito) {
        Some(contig) => table.read_names(|r| r.contig.as_deref() == Some(contig)),
        None => ReadNameSet::default(),
    };

    let unmapped_mate1 = table.read_names(|r| {
        r.is_first_mate && r.is_unmapped && !mitochondrial.contains(&r.read_name)
    });
    let unmapped_mate2 = table.read_names(|r| {
        !r.is_first_mate && r.is_unmapped && !mitochondrial.contains(&r.read_name)
    });

    let unmapped = &unmapped_mate1 & &unmapped_mate2;
    let placed = &(&unmapped_mate1 | &unmapped_mate2) - &unmapped;
    let mapped = &all_reads - &(&(&unmapped | &placed) | &mitochondrial);

    Partition {
        all_reads,
        unmapped_mate1,
        unmapped_mate2,
        mitochondrial,
        unmapped,
        placed,
        mapped,
    }
}
