//! Advisory checks run over a finished [`Partition`].
//!
//! These never change the sets. They report what looks wrong so the caller can
//! print it; a run with violations still succeeds.
use std::fmt;

use crate::consts::{READ_SORT_WARNING, UNMAPPED_MISMATCH_WARNING};
use crate::partition::{Category, Partition, ReadNameSet};
use crate::records::RecordTable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// Names in the unmapped set that still have a contig on some record.
    UnmappedMismatch { missing: usize },
    /// Two categories share read names.
    Overlap {
        first: Category,
        second: Category,
        shared: usize,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::UnmappedMismatch { missing } => write!(
                f,
                "{UNMAPPED_MISMATCH_WARNING} ({missing} unmapped read(s) have a contig)"
            ),
            Violation::Overlap {
                first,
                second,
                shared,
            } => write!(
                f,
                "{READ_SORT_WARNING} ({shared} read(s) are both {first} and {second})"
            ),
        }
    }
}

/// Names of every row without a contig, derived independently of mate pairing.
pub fn unmapped_by_contig(table: &RecordTable) -> ReadNameSet {
    table.read_names(|r| r.contig.is_none())
}

/// Cross check the unmapped set against the contig-less rows.
///
/// Only names present in `partition.unmapped` but absent from the contig-less
/// derivation are reported; the reverse direction is expected whenever an
/// unmapped mate has no placement of its own.
pub fn check_unmapped(table: &RecordTable, partition: &Partition) -> Option<Violation> {
    let by_contig = unmapped_by_contig(table);
    let missing = partition.unmapped.difference(&by_contig).count();
    (missing != 0).then_some(Violation::UnmappedMismatch { missing })
}

/// Every unordered pair of categories that shares at least one read name.
pub fn check_disjoint(partition: &Partition) -> Vec<Violation> {
    let sets: Vec<_> = partition.sets().collect();
    let mut violations = vec![];
    for (i, (first, a)) in sets.iter().enumerate() {
        for (second, b) in &sets[i + 1..] {
            let shared = a.intersection(b).count();
            if shared != 0 {
                violations.push(Violation::Overlap {
                    first: *first,
                    second: *second,
                    shared,
                });
            }
        }
    }
    violations
}

/// Run all checks, returning the violations found (empty when all pass).
pub fn check(table: &RecordTable, partition: &Partition) -> Vec<Violation> {
    check_unmapped(table, partition)
        .into_iter()
        .chain(check_disjoint(partition))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partition::partition;
    use crate::records::row;
    use pretty_assertions::assert_eq;

    fn names(items: &[&str]) -> ReadNameSet {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn empty_partition() -> Partition {
        partition(&RecordTable::new(), None)
    }

    #[test]
    fn test_clean_partition_has_no_violations() {
        let table = RecordTable::from(vec![
            row("A", true, false, Some("chr1")),
            row("A", false, false, Some("chr1")),
            row("B", true, true, None),
            row("B", false, true, None),
            row("C", true, false, Some("chr1")),
            row("C", false, true, Some("chr1")),
            row("D", true, false, Some("chrM")),
        ]);
        let parts = partition(&table, Some("chrM"));
        assert!(check(&table, &parts).is_empty());
    }

    #[test]
    fn test_unmapped_pair_with_contig_is_flagged() {
        // both mates flagged unmapped but still carry a reference name
        let table = RecordTable::from(vec![
            row("B", true, true, Some("chr1")),
            row("B", false, true, Some("chr1")),
        ]);
        let parts = partition(&table, Some("chrM"));
        assert_eq!(
            check(&table, &parts),
            vec![Violation::UnmappedMismatch { missing: 1 }]
        );
    }

    #[test]
    fn test_extra_contigless_reads_are_not_flagged() {
        // C has a contig-less unmapped mate but is placed, not unmapped
        let table = RecordTable::from(vec![
            row("C", true, false, Some("chr1")),
            row("C", false, true, None),
        ]);
        let parts = partition(&table, Some("chrM"));
        assert_eq!(check_unmapped(&table, &parts), None);
    }

    #[test]
    fn test_overlapping_sets_are_flagged() {
        let mut parts = empty_partition();
        parts.placed = names(&["X", "Y"]);
        parts.mapped = names(&["Y"]);
        parts.mitochondrial = names(&["X"]);

        assert_eq!(
            check_disjoint(&parts),
            vec![
                Violation::Overlap {
                    first: Category::Mitochondrial,
                    second: Category::Placed,
                    shared: 1,
                },
                Violation::Overlap {
                    first: Category::Placed,
                    second: Category::Mapped,
                    shared: 1,
                },
            ]
        );
    }

    #[test]
    fn test_checks_do_not_modify_partition() {
        let mut parts = empty_partition();
        parts.unmapped = names(&["Z"]);
        parts.mapped = names(&["Z"]);
        let before = parts.clone();

        let violations = check(&RecordTable::new(), &parts);
        assert_eq!(violations.len(), 2);
        assert_eq!(parts, before);
    }

    #[test]
    fn test_violation_messages() {
        let msg = Violation::Overlap {
            first: Category::Unmapped,
            second: Category::Mapped,
            shared: 3,
        }
        .to_string();
        assert!(msg.starts_with(READ_SORT_WARNING));
        assert!(msg.contains("unmapped and mapped"));

        let msg = Violation::UnmappedMismatch { missing: 2 }.to_string();
        assert!(msg.starts_with(UNMAPPED_MISMATCH_WARNING));
    }
}
