//! Scanner output parsers for normalizing findings into issues.
//!
//! Each parser implements the `IssueParser` trait, pulling raw text from a
//! `ReaderFactory` and producing a `Report` of normalized issues.

pub mod json;
pub mod trivy;

use std::fs::File;
use std::io::{self, BufReader, Cursor, Read};
use std::path::{Path, PathBuf};

use crate::errors::ParsingError;
use crate::models::report::Report;

/// Source of the raw text handed to a parser.
///
/// The returned reader is owned by the caller and released when dropped.
pub trait ReaderFactory {
    /// Open a fresh reader over the underlying source.
    fn create(&self) -> io::Result<Box<dyn Read + '_>>;

    /// Human readable name of the source, used in logs.
    fn file_name(&self) -> String;
}

/// Reads a report from a file on disk.
#[derive(Debug, Clone)]
pub struct FileReaderFactory {
    path: PathBuf,
}

impl FileReaderFactory {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ReaderFactory for FileReaderFactory {
    fn create(&self) -> io::Result<Box<dyn Read + '_>> {
        let file = File::open(&self.path)?;
        Ok(Box::new(BufReader::new(file)))
    }

    fn file_name(&self) -> String {
        self.path.display().to_string()
    }
}

/// Reads a report from bytes already held in memory.
#[derive(Debug, Clone)]
pub struct BufferReaderFactory {
    name: String,
    content: Vec<u8>,
}

impl BufferReaderFactory {
    pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Drain `reader` into memory, e.g. for stdin.
    ///
    /// The bytes are kept as-is; encoding problems surface when the parser
    /// decodes them, the same way they do for files.
    pub fn from_reader(name: impl Into<String>, mut reader: impl Read) -> io::Result<Self> {
        let mut content = Vec::new();
        reader.read_to_end(&mut content)?;
        Ok(Self::new(name, content))
    }
}

impl ReaderFactory for BufferReaderFactory {
    fn create(&self) -> io::Result<Box<dyn Read + '_>> {
        Ok(Box::new(Cursor::new(self.content.as_slice())))
    }

    fn file_name(&self) -> String {
        self.name.clone()
    }
}

/// Trait for pluggable scanner output parsers.
pub trait IssueParser: Send + Sync {
    /// Parse raw scanner output into a report of normalized issues.
    fn parse(&self, reader_factory: &dyn ReaderFactory) -> Result<Report, ParsingError>;

    /// The scanner tool name this parser handles.
    fn source_tool(&self) -> &str;
}
