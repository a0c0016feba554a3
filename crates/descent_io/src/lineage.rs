//! Persisted line of descent.
//!
//! The format is UTF-8 JSON lines. The first line is a [`LineageHeader`]
//! carrying the number of organisms; each following line is one
//! [`OrganismSnapshot`], ancestor first. Paths ending in `.gz` are gzipped.
//!
//! Readers are strict: a missing header, a short or overlong body, an
//! unparseable record or a corrupt gzip stream is a format error, and no
//! partial lineage is ever returned.

use crate::error::{IoError, Result};
use descent_core::{AncestryGraph, Lineage};
use descent_data::{LineageHeader, OrganismSnapshot};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Lines, Write};
use std::path::Path;

/// A lineage detached from the ancestry graph, ready for storage.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedLineage<R> {
    pub header: LineageHeader,
    pub organisms: Vec<OrganismSnapshot<R>>,
}

impl<R> SavedLineage<R> {
    pub fn new(tick: u64, config_fingerprint: Option<String>, organisms: Vec<OrganismSnapshot<R>>) -> Self {
        Self {
            header: LineageHeader {
                lineage_size: organisms.len(),
                tick,
                config_fingerprint,
            },
            organisms,
        }
    }

    /// Snapshots every organism of `lineage`.
    pub fn capture(
        ancestry: &AncestryGraph<R>,
        lineage: &Lineage,
        tick: u64,
        config_fingerprint: Option<String>,
    ) -> Result<Self>
    where
        R: Clone,
    {
        let organisms = lineage.to_record(ancestry)?;
        Ok(Self::new(tick, config_fingerprint, organisms))
    }

    pub fn len(&self) -> usize {
        self.organisms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.organisms.is_empty()
    }
}

pub fn write_lineage<W, R>(writer: &mut W, lineage: &SavedLineage<R>) -> Result<()>
where
    W: Write,
    R: Serialize,
{
    if lineage.header.lineage_size != lineage.organisms.len() {
        return Err(IoError::format(format!(
            "header announces {} organisms but {} are present",
            lineage.header.lineage_size,
            lineage.organisms.len()
        )));
    }
    writeln!(writer, "{}", serde_json::to_string(&lineage.header)?)?;
    for organism in &lineage.organisms {
        writeln!(writer, "{}", serde_json::to_string(organism)?)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn read_lineage<B, R>(reader: B) -> Result<SavedLineage<R>>
where
    B: BufRead,
    R: DeserializeOwned,
{
    let mut lines = reader.lines();

    let header_line = next_line(&mut lines)?.ok_or_else(|| IoError::format("missing lineage header"))?;
    let header: LineageHeader = serde_json::from_str(&header_line)
        .map_err(|e| IoError::format(format!("unparseable lineage header: {}", e)))?;

    // The size is untrusted until the body has been read.
    let mut organisms = Vec::with_capacity(header.lineage_size.min(1024));
    for i in 0..header.lineage_size {
        let line = next_line(&mut lines)?.ok_or_else(|| {
            IoError::format(format!(
                "lineage truncated: header announces {} organisms, found {}",
                header.lineage_size, i
            ))
        })?;
        let organism = serde_json::from_str(&line)
            .map_err(|e| IoError::format(format!("unparseable organism {}: {}", i, e)))?;
        organisms.push(organism);
    }

    while let Some(line) = next_line(&mut lines)? {
        if !line.trim().is_empty() {
            return Err(IoError::format(format!(
                "unexpected data after {} organisms",
                header.lineage_size
            )));
        }
    }

    Ok(SavedLineage { header, organisms })
}

fn next_line<B: BufRead>(lines: &mut Lines<B>) -> Result<Option<String>> {
    lines
        .next()
        .transpose()
        .map_err(|e| IoError::format(format!("unreadable lineage stream: {}", e)))
}

fn is_compressed(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "gz")
}

/// Writes `lineage` to `path`, gzipped when the path ends in `.gz`.
pub fn save_lineage<P, R>(path: P, lineage: &SavedLineage<R>) -> Result<()>
where
    P: AsRef<Path>,
    R: Serialize,
{
    let path = path.as_ref();
    let file = File::create(path)?;
    if is_compressed(path) {
        let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
        write_lineage(&mut encoder, lineage)?;
        encoder.finish()?.flush()?;
    } else {
        write_lineage(&mut BufWriter::new(file), lineage)?;
    }
    Ok(())
}

/// Reads a lineage written by [`save_lineage`].
pub fn load_lineage<P, R>(path: P) -> Result<SavedLineage<R>>
where
    P: AsRef<Path>,
    R: DeserializeOwned,
{
    let path = path.as_ref();
    let file = File::open(path)?;
    let result = if is_compressed(path) {
        read_lineage(BufReader::new(GzDecoder::new(file)))
    } else {
        read_lineage(BufReader::new(file))
    };
    result.map_err(|e| e.with_context(format!("loading {}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use descent_core::World;
    use std::io::Cursor;
    use std::path::PathBuf;
    use uuid::Uuid;

    fn sample() -> SavedLineage<Vec<u8>> {
        let mut world = World::with_seed(3);
        let root = world.found(vec![0u8, 0], 1.0);
        let a = world.give_birth(&[root], vec![0, 1], 1.0).unwrap();
        let b = world.give_birth(&[a], vec![1, 1], 1.0).unwrap();
        let lod = Lineage::of(world.ancestry(), b).unwrap();
        SavedLineage::capture(world.ancestry(), &lod, 12, Some("abc".into())).unwrap()
    }

    fn to_text(lineage: &SavedLineage<Vec<u8>>) -> String {
        let mut buf = Vec::new();
        write_lineage(&mut buf, lineage).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("descent-io-{}-{}", Uuid::new_v4(), name))
    }

    #[test]
    fn test_header_precedes_elements() {
        let text = to_text(&sample());
        let mut lines = text.lines();
        let header: LineageHeader = serde_json::from_str(lines.next().unwrap()).unwrap();
        assert_eq!(header.lineage_size, 3);
        assert_eq!(header.tick, 12);
        assert_eq!(lines.count(), 3);
    }

    #[test]
    fn test_read_preserves_order() {
        let original = sample();
        let read: SavedLineage<Vec<u8>> = read_lineage(Cursor::new(to_text(&original))).unwrap();
        assert_eq!(read, original);
        assert!(read.organisms[0].is_ancestor());
    }

    #[test]
    fn test_truncated_body_is_format_error() {
        let text = to_text(&sample());
        let truncated: Vec<&str> = text.lines().take(3).collect();
        let err = read_lineage::<_, Vec<u8>>(Cursor::new(truncated.join("\n"))).unwrap_err();
        assert!(err.is_format());
    }

    #[test]
    fn test_extra_lines_are_format_error() {
        let mut text = to_text(&sample());
        let duplicate = text.lines().nth(1).unwrap().to_string();
        text.push_str(&duplicate);
        text.push('\n');
        let err = read_lineage::<_, Vec<u8>>(Cursor::new(text)).unwrap_err();
        assert!(err.is_format());
    }

    #[test]
    fn test_trailing_blank_lines_are_accepted() {
        let mut text = to_text(&sample());
        text.push_str("\n\n");
        assert!(read_lineage::<_, Vec<u8>>(Cursor::new(text)).is_ok());
    }

    #[test]
    fn test_missing_header_is_format_error() {
        let err = read_lineage::<_, Vec<u8>>(Cursor::new("")).unwrap_err();
        assert!(err.is_format());
        let err = read_lineage::<_, Vec<u8>>(Cursor::new("not json\n")).unwrap_err();
        assert!(err.is_format());
    }

    #[test]
    fn test_inconsistent_header_is_not_written() {
        let mut lineage = sample();
        lineage.header.lineage_size = 7;
        let mut buf = Vec::new();
        assert!(write_lineage(&mut buf, &lineage).unwrap_err().is_format());
        assert!(buf.is_empty());
    }

    #[test]
    fn test_gzip_file_round_trip() {
        let path = temp_path("lod.jsonl.gz");
        let original = sample();
        save_lineage(&path, &original).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..2], &[0x1f, 0x8b]);
        let loaded: SavedLineage<Vec<u8>> = load_lineage(&path).unwrap();
        assert_eq!(loaded, original);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_corrupt_gzip_is_format_error() {
        let path = temp_path("corrupt.jsonl.gz");
        std::fs::write(&path, b"\x1f\x8b\x08\x00garbage that is not deflate").unwrap();
        let err = load_lineage::<_, Vec<u8>>(&path).unwrap_err();
        assert!(err.is_format());
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_file_is_file_system_error() {
        let err = load_lineage::<_, Vec<u8>>(temp_path("absent.jsonl")).unwrap_err();
        assert!(matches!(err, IoError::FileSystem(_)));
    }
}
