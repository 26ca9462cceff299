use std::io::{Cursor, Write};

use thiserror::Error;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("zip write failed: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Packs (name, bytes) pairs into one in-memory zip. When two entries share
/// a name the later payload wins, keeping the position of the first; this
/// mirrors how repeated same-named results are expected to collide.
pub fn pack<'a>(entries: impl IntoIterator<Item = (&'a str, &'a [u8])>) -> Result<Vec<u8>, ArchiveError> {
    let mut ordered: Vec<(&str, &[u8])> = Vec::new();
    for (name, bytes) in entries {
        match ordered.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = bytes,
            None => ordered.push((name, bytes)),
        }
    }

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
    for (name, bytes) in ordered {
        zip.start_file(name, options)?;
        zip.write_all(bytes)?;
    }
    Ok(zip.finish()?.into_inner())
}
