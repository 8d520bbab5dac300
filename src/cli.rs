use clap::Parser;
use std::path::PathBuf;

use crate::consts::{DEFAULT_MITO_CONTIG, SPLIT_ABOUT};
use crate::output::CompressionType;
use crate::split::SplitConfig;

#[derive(Debug, Parser)]
#[command(version, about = SPLIT_ABOUT, long_about = None)]
pub struct Cli {
    #[arg(short = 'b', long = "bam", visible_alias = "input", value_name = "./path/to/bam")]
    /// Path to input BAM file to split into read sets
    pub bam_file: PathBuf,

    #[arg(short = 'M', long = "mitochondria", default_value = DEFAULT_MITO_CONTIG, value_name = DEFAULT_MITO_CONTIG)]
    /// Name of the mitochondrial contig, an empty string turns mito splitting off
    pub mito: String,

    #[arg(short, long)]
    /// Output file prefix (default is the input path without its extension)
    pub prefix: Option<String>,

    #[arg(short, long, default_value_t, value_enum)]
    /// Compression of the read name lists
    pub compression: CompressionType,

    #[arg(short, long)]
    /// Log debug messages
    pub verbose: bool,
}

impl Cli {
    pub fn into_config(self) -> SplitConfig {
        SplitConfig {
            mito: Some(self.mito),
            prefix: self.prefix,
            compression: self.compression,
            ..SplitConfig::new(self.bam_file)
        }
    }
}
