//! Minimal zip archive writer
//!
//! Writes a deflate-compressed zip of a directory tree. Only the
//! subset of the format needed for upload bundles is produced: local
//! file headers, a central directory, and the end-of-central-directory
//! record. No zip64, no encryption, no per-entry timestamps. Inputs
//! past the 32-bit field limits (a 4 GiB entry or archive, 65,535
//! entries) are rejected with [`ExportError::ArchiveLimit`] instead of
//! being written with wrapped fields.

use crate::{ExportError, ExportResult};
use miniz_oxide::deflate::compress_to_vec;
use std::fs;
use std::io::Write;
use std::path::Path;
use walkdir::WalkDir;

const LOCAL_FILE_SIG: u32 = 0x04034b50;
const CENTRAL_DIR_SIG: u32 = 0x02014b50;
const EOCD_SIG: u32 = 0x06054b50;

/// Minimum zip version for deflate (2.0)
const VERSION_NEEDED: u16 = 20;
const METHOD_DEFLATE: u16 = 8;

/// 1980-01-01, the DOS date epoch. Entry timestamps are not preserved.
const DOS_DATE: u16 = 0x0021;
const DOS_TIME: u16 = 0;

const DEFLATE_LEVEL: u8 = 6;

/// Most entries the EOCD record's 16-bit count can describe
const MAX_ENTRIES: usize = u16::MAX as usize;

const CRC_TABLE: [u32; 256] = {
    let mut table = [0u32; 256];
    let mut i = 0;
    while i < 256 {
        let mut c = i as u32;
        let mut k = 0;
        while k < 8 {
            c = if c & 1 != 0 {
                0xEDB88320 ^ (c >> 1)
            } else {
                c >> 1
            };
            k += 1;
        }
        table[i] = c;
        i += 1;
    }
    table
};

/// CRC-32 (IEEE) over `data`
pub fn crc32(data: &[u8]) -> u32 {
    let mut c = 0xFFFFFFFFu32;
    for &byte in data {
        c = CRC_TABLE[((c ^ byte as u32) & 0xFF) as usize] ^ (c >> 8);
    }
    c ^ 0xFFFFFFFF
}

struct CentralEntry {
    name: Vec<u8>,
    crc: u32,
    compressed_size: u32,
    uncompressed_size: u32,
    local_offset: u32,
}

struct CountingWriter<W> {
    inner: W,
    count: u64,
}

impl<W: Write> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, count: 0 }
    }

    fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()> {
        self.inner.write_all(buf)?;
        self.count += buf.len() as u64;
        Ok(())
    }

    fn u16(&mut self, v: u16) -> std::io::Result<()> {
        self.write_all(&v.to_le_bytes())
    }

    fn u32(&mut self, v: u32) -> std::io::Result<()> {
        self.write_all(&v.to_le_bytes())
    }
}

/// Zip the contents of `src` into `writer`
///
/// Entry names are relative to `src` with forward slashes. Directory
/// entries are not stored, only files. Returns the total number of
/// bytes written.
pub fn zip_dir<P: AsRef<Path>, W: Write>(src: P, writer: W) -> ExportResult<u64> {
    let src = src.as_ref();
    let mut out = CountingWriter::new(writer);
    let mut central = Vec::new();

    for entry in WalkDir::new(src).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let rel = entry
            .path()
            .strip_prefix(src)
            .map_err(|_| ExportError::InvalidPath(entry.path().display().to_string()))?;
        let name: Vec<u8> = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/")
            .into_bytes();
        if name.len() > u16::MAX as usize {
            return Err(ExportError::InvalidPath(format!(
                "entry name too long: {}",
                rel.display()
            )));
        }
        if central.len() == MAX_ENTRIES {
            return Err(ExportError::ArchiveLimit(format!(
                "more than {} entries",
                MAX_ENTRIES
            )));
        }

        let data = fs::read(entry.path())?;
        let uncompressed_size = u32::try_from(data.len())
            .map_err(|_| ExportError::ArchiveLimit(format!("entry too large: {}", rel.display())))?;
        let crc = crc32(&data);
        let compressed = compress_to_vec(&data, DEFLATE_LEVEL);
        let compressed_size = u32::try_from(compressed.len())
            .map_err(|_| ExportError::ArchiveLimit(format!("entry too large: {}", rel.display())))?;

        let local_offset = u32::try_from(out.count)
            .map_err(|_| ExportError::ArchiveLimit("archive exceeds 4 GiB".to_string()))?;

        out.u32(LOCAL_FILE_SIG)?;
        out.u16(VERSION_NEEDED)?;
        out.u16(0)?; // general purpose flags
        out.u16(METHOD_DEFLATE)?;
        out.u16(DOS_TIME)?;
        out.u16(DOS_DATE)?;
        out.u32(crc)?;
        out.u32(compressed_size)?;
        out.u32(uncompressed_size)?;
        out.u16(name.len() as u16)?;
        out.u16(0)?; // extra field length
        out.write_all(&name)?;
        out.write_all(&compressed)?;

        central.push(CentralEntry {
            name,
            crc,
            compressed_size,
            uncompressed_size,
            local_offset,
        });
    }

    let central_offset = u32::try_from(out.count)
        .map_err(|_| ExportError::ArchiveLimit("archive exceeds 4 GiB".to_string()))?;
    for e in &central {
        out.u32(CENTRAL_DIR_SIG)?;
        out.u16(VERSION_NEEDED)?; // version made by
        out.u16(VERSION_NEEDED)?;
        out.u16(0)?; // general purpose flags
        out.u16(METHOD_DEFLATE)?;
        out.u16(DOS_TIME)?;
        out.u16(DOS_DATE)?;
        out.u32(e.crc)?;
        out.u32(e.compressed_size)?;
        out.u32(e.uncompressed_size)?;
        out.u16(e.name.len() as u16)?;
        out.u16(0)?; // extra field length
        out.u16(0)?; // comment length
        out.u16(0)?; // disk number
        out.u16(0)?; // internal attributes
        out.u32(0)?; // external attributes
        out.u32(e.local_offset)?;
        out.write_all(&e.name)?;
    }
    let central_size = u32::try_from(out.count - u64::from(central_offset))
        .map_err(|_| ExportError::ArchiveLimit("central directory exceeds 4 GiB".to_string()))?;

    out.u32(EOCD_SIG)?;
    out.u16(0)?; // this disk
    out.u16(0)?; // central directory disk
    out.u16(central.len() as u16)?;
    out.u16(central.len() as u16)?;
    out.u32(central_size)?;
    out.u32(central_offset)?;
    out.u16(0)?; // comment length

    Ok(out.count)
}

/// Zip the contents of `src` into a new file at `dest`
pub fn zip_dir_to_file<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dest: Q) -> ExportResult<u64> {
    let file = fs::File::create(dest)?;
    let mut writer = std::io::BufWriter::new(file);
    let bytes = zip_dir(src, &mut writer)?;
    writer.flush()?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_crc32_known_values() {
        assert_eq!(crc32(b""), 0);
        assert_eq!(crc32(b"123456789"), 0xCBF43926);
    }

    #[test]
    fn test_zip_dir_structure() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("hello.txt"), b"hello world").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/data.txt"), b"more data").unwrap();

        let mut buffer = Vec::new();
        let bytes = zip_dir(dir.path(), &mut buffer).unwrap();

        assert_eq!(bytes, buffer.len() as u64);

        // Starts with a local file header, ends with EOCD.
        assert_eq!(&buffer[0..4], &LOCAL_FILE_SIG.to_le_bytes());
        let eocd = buffer.len() - 22;
        assert_eq!(&buffer[eocd..eocd + 4], &EOCD_SIG.to_le_bytes());

        // Two entries in the central directory.
        let entries = u16::from_le_bytes([buffer[eocd + 10], buffer[eocd + 11]]);
        assert_eq!(entries, 2);

        // Entry names are stored with forward slashes.
        let haystack = buffer.as_slice();
        assert!(
            haystack
                .windows(b"sub/data.txt".len())
                .any(|w| w == b"sub/data.txt")
        );
    }

    #[test]
    fn test_zip_dir_empty() {
        let dir = tempdir().unwrap();
        let mut buffer = Vec::new();
        zip_dir(dir.path(), &mut buffer).unwrap();

        // Just the EOCD record.
        assert_eq!(buffer.len(), 22);
        assert_eq!(&buffer[0..4], &EOCD_SIG.to_le_bytes());
    }

    #[test]
    fn test_zip_dir_rejects_entry_count_past_u16() {
        let dir = tempdir().unwrap();
        for i in 0..=MAX_ENTRIES {
            fs::write(dir.path().join(format!("{:05x}", i)), b"").unwrap();
        }

        let mut buffer = Vec::new();
        let err = zip_dir(dir.path(), &mut buffer).unwrap_err();
        assert!(matches!(err, ExportError::ArchiveLimit(_)));
    }

    #[test]
    fn test_zip_dir_to_file() {
        let src = tempdir().unwrap();
        let out = tempdir().unwrap();
        fs::write(src.path().join("a.txt"), b"abc").unwrap();

        let dest = out.path().join("bundle.zip");
        let bytes = zip_dir_to_file(src.path(), &dest).unwrap();

        assert_eq!(fs::metadata(&dest).unwrap().len(), bytes);
    }
}
