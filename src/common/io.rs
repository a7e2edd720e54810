//! Common, IO-related code.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Read, Write},
    path::Path,
};

use flate2::{bufread::MultiGzDecoder, write::GzEncoder, Compression};

/// Magic bytes identifying a gzip stream, per RFC 1952.
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Detect whether a file is gzip-compressed by sniffing its magic bytes,
/// not its extension (a file may be named `.tsv` and still be gzipped,
/// or named `.gz` and not be).
pub fn is_gzipped<P: AsRef<Path>>(path: P) -> std::io::Result<bool> {
    let mut file = File::open(path)?;
    let mut magic = [0u8; 2];
    match file.read_exact(&mut magic) {
        Ok(()) => Ok(magic == GZIP_MAGIC),
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => Ok(false),
        Err(e) => Err(e),
    }
}

/// Transparently open a file for reading, decompressing it if its magic
/// bytes identify it as gzip.
pub fn open_read_maybe_gz<P>(path: P) -> std::io::Result<Box<dyn BufRead>>
where
    P: AsRef<Path>,
{
    if is_gzipped(&path)? {
        tracing::trace!("Opening {:?} as gzip for reading", path.as_ref());
        let file = File::open(path)?;
        let bufreader = BufReader::new(file);
        let decoder = MultiGzDecoder::new(bufreader);
        Ok(Box::new(BufReader::new(decoder)))
    } else {
        tracing::trace!("Opening {:?} as plain text for reading", path.as_ref());
        let file = File::open(path).map(BufReader::new)?;
        Ok(Box::new(file))
    }
}

/// Transparently open a file for writing, gzip-encoding it when `gzip` is
/// set (the CLI's `--gzip` toggle; magic-byte detection is meaningless on
/// writes, so the caller states its intent explicitly).
pub fn open_write_maybe_gz<P>(path: P, gzip: bool) -> std::io::Result<Box<dyn Write>>
where
    P: AsRef<Path>,
{
    if gzip {
        tracing::trace!("Opening {:?} as gzip for writing", path.as_ref());
        let file = File::create(path)?;
        let bufwriter = BufWriter::new(file);
        let encoder = GzEncoder::new(bufwriter, Compression::default());
        Ok(Box::new(encoder))
    } else {
        tracing::trace!("Opening {:?} as plain text for writing", path.as_ref());
        let file = File::create(path)?;
        Ok(Box::new(BufWriter::new(file)))
    }
}
