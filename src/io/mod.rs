//! File input and output around the matcher
//!
//! - [`read_symbol_file`]: headerless (symbol, chromosome) input files
//! - [`write_match_files`]: the `_full`, `_converted` and `_failed` exports
//! - [`open_reader`]: plain or gzip-compressed text input

pub mod export;
pub mod input;

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;

pub use export::{write_match_files, ExportPaths};
pub use input::{parse_symbol_reader, read_symbol_file, strip_bom};

/// Buffer size for file readers
const READ_BUFFER_SIZE: usize = 1024 * 1024;

/// Whether a path names a gzip-compressed file (`.gz` or `.bgz`)
pub fn is_gzipped(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("gz") | Some("bgz")
    )
}

/// Open a text file for buffered reading, decompressing gzip input.
pub fn open_reader(path: &Path) -> io::Result<Box<dyn BufRead>> {
    let file = File::open(path)?;
    let reader: Box<dyn BufRead> = if is_gzipped(path) {
        Box::new(BufReader::with_capacity(
            READ_BUFFER_SIZE,
            MultiGzDecoder::new(file),
        ))
    } else {
        Box::new(BufReader::with_capacity(READ_BUFFER_SIZE, file))
    };
    Ok(reader)
}
