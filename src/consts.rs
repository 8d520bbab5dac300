/// Conventional name of the mitochondrial contig.
pub const DEFAULT_MITO_CONTIG: &str = "chrM";

/// Stand-in for the mitochondrial label in file names when mito splitting is off.
pub const DISABLED_MITO_LABEL: &str = "mito";

/// BAM stores a missing MAPQ as 255.
pub const MISSING_MAPQ: u8 = 255;

pub const READ_LIST_EXTENSION: &str = "txt";
pub const BEDPE_EXTENSION: &str = "bedpe";
pub const GZ_EXTENSION: &str = "gz";

/// First bytes of every BGZF block (gzip magic, deflate, FEXTRA).
pub const BGZF_MAGIC: [u8; 4] = [0x1f, 0x8b, 0x08, 0x04];

/// Highest SAM/BAM major format version the reader understands.
pub const SUPPORTED_FORMAT_MAJOR: u32 = 1;

pub const SPLIT_ABOUT: &str =
    "Splits an input BAM file from a WGS, ChIP, ATAC or Hi-C experiment into mapped, placed, unmapped and mtDNA read sets.";

pub const UNMAPPED_MISMATCH_WARNING: &str =
    "WARNING: The number of unmapped reads did not match during parsing.";
pub const READ_SORT_WARNING: &str =
    "WARNING: There was an unknown error in sorting the reads; likely due to non-unique read names.";
