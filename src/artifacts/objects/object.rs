//! Binary record encoding shared by commits and repository metadata
//!
//! Records are a 4-byte magic, a big-endian `u32` format version and a sequence
//! of fields. Variable-length fields are prefixed by their length (`u32` for
//! strings and paths, `u64` for raw content).

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use bytes::Bytes;
use std::io::{self, BufRead, Read, Write};
use std::path::{Path, PathBuf};

/// Current version of every record format written by this crate
pub const RECORD_VERSION: u32 = 1;

pub trait Packable {
    fn serialize(&self) -> io::Result<Bytes>;
}

pub trait Unpackable {
    fn deserialize(reader: impl BufRead) -> io::Result<Self>
    where
        Self: Sized;
}

fn invalid_data(message: impl Into<String>) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message.into())
}

pub trait RecordWrite: Write {
    fn write_header(&mut self, magic: &[u8; 4]) -> io::Result<()> {
        self.write_all(magic)?;
        self.write_u32::<BigEndian>(RECORD_VERSION)
    }

    fn write_str(&mut self, value: &str) -> io::Result<()> {
        let len = u32::try_from(value.len()).map_err(|_| invalid_data("string field too long"))?;
        self.write_u32::<BigEndian>(len)?;
        self.write_all(value.as_bytes())
    }

    fn write_path(&mut self, path: &Path) -> io::Result<()> {
        let path = path
            .to_str()
            .ok_or_else(|| invalid_data(format!("path is not valid UTF-8: {:?}", path)))?;
        self.write_str(path)
    }

    fn write_blob(&mut self, data: &[u8]) -> io::Result<()> {
        self.write_u64::<BigEndian>(data.len() as u64)?;
        self.write_all(data)
    }

    fn write_count(&mut self, count: usize) -> io::Result<()> {
        let count = u32::try_from(count).map_err(|_| invalid_data("too many entries"))?;
        self.write_u32::<BigEndian>(count)
    }
}

impl<W: Write + ?Sized> RecordWrite for W {}

pub trait RecordRead: Read {
    fn read_header(&mut self, magic: &[u8; 4]) -> io::Result<()> {
        let mut found = [0; 4];
        self.read_exact(&mut found)?;
        if &found != magic {
            return Err(invalid_data(format!(
                "invalid record signature {:?}, expected {:?}",
                String::from_utf8_lossy(&found),
                String::from_utf8_lossy(magic)
            )));
        }

        let version = self.read_u32::<BigEndian>()?;
        if version != RECORD_VERSION {
            return Err(invalid_data(format!(
                "unsupported record version: {}",
                version
            )));
        }

        Ok(())
    }

    fn read_str(&mut self) -> io::Result<String> {
        let len = self.read_u32::<BigEndian>()? as usize;
        let mut buffer = vec![0; len];
        self.read_exact(&mut buffer)?;

        String::from_utf8(buffer).map_err(|e| invalid_data(e.to_string()))
    }

    fn read_path(&mut self) -> io::Result<PathBuf> {
        Ok(PathBuf::from(self.read_str()?))
    }

    fn read_blob(&mut self) -> io::Result<Bytes> {
        let len = self.read_u64::<BigEndian>()?;
        let mut buffer = Vec::new();
        (&mut *self).take(len).read_to_end(&mut buffer)?;

        if buffer.len() as u64 != len {
            return Err(io::Error::from(io::ErrorKind::UnexpectedEof));
        }

        Ok(buffer.into())
    }

    fn read_count(&mut self) -> io::Result<usize> {
        Ok(self.read_u32::<BigEndian>()? as usize)
    }

    fn expect_end(&mut self) -> io::Result<()> {
        let mut trailing = [0; 1];
        match self.read(&mut trailing)? {
            0 => Ok(()),
            _ => Err(invalid_data("trailing bytes after record")),
        }
    }
}

impl<R: Read + ?Sized> RecordRead for R {}
