//! Whole-document reading from files and pipes.
//!
//! Regular files are read in one pass into a buffer sized from `fstat`.
//! Anything else (stdin is usually a pipe) is read in fixed increments
//! until end of stream.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::os::fd::AsFd;

use custodiahook_common::error::{HookError, Result};

use crate::tree::ParsedTree;

/// Full contents of one JSON input.
///
/// The byte length is exact; no terminator is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    origin: String,
    bytes: Vec<u8>,
}

impl RawDocument {
    /// Parses the document, consuming the buffer.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::Parse`] if the bytes are not valid JSON.
    pub fn parse(self) -> Result<ParsedTree> {
        match serde_json::from_slice(&self.bytes) {
            Ok(value) => Ok(ParsedTree::new(value)),
            Err(e) => Err(HookError::Parse {
                origin: self.origin,
                source: e,
            }),
        }
    }
}

/// Reads all of `stream` into memory.
///
/// The stream is borrowed and stays open.
///
/// # Errors
///
/// Returns [`HookError::EmptyInput`] if the stream holds no bytes,
/// [`HookError::Read`] on a read failure or short read, and
/// [`HookError::Alloc`] if the buffer cannot be grown.
pub fn read_document<R>(stream: &mut R, chunk_size: usize, origin: &str) -> Result<RawDocument>
where
    R: Read + AsFd,
{
    let bytes = match regular_file_len(stream, origin)? {
        Some(len) => read_sized(stream, len, origin)?,
        None => read_chunked(stream, chunk_size, origin)?,
    };
    tracing::debug!(origin, len = bytes.len(), "read document");
    Ok(RawDocument {
        origin: origin.to_owned(),
        bytes,
    })
}

/// Size of the file behind `stream`, or `None` if it is not a regular file.
fn regular_file_len<F: AsFd>(stream: &F, origin: &str) -> Result<Option<u64>> {
    let read_err = |e| HookError::Read {
        origin: origin.to_owned(),
        source: e,
    };
    let file = File::from(stream.as_fd().try_clone_to_owned().map_err(read_err)?);
    let meta = file.metadata().map_err(read_err)?;
    Ok(meta.is_file().then_some(meta.len()))
}

/// Reads exactly `len` bytes in a single pass.
pub(crate) fn read_sized<R: Read>(stream: &mut R, len: u64, origin: &str) -> Result<Vec<u8>> {
    if len == 0 {
        return Err(HookError::EmptyInput {
            origin: origin.to_owned(),
        });
    }
    let len = usize::try_from(len).map_err(|_| HookError::Read {
        origin: origin.to_owned(),
        source: std::io::Error::new(ErrorKind::InvalidData, "file too large"),
    })?;

    let mut buf = Vec::new();
    buf.try_reserve_exact(len).map_err(|e| HookError::Alloc {
        origin: origin.to_owned(),
        source: e,
    })?;
    buf.resize(len, 0);
    stream.read_exact(&mut buf).map_err(|e| HookError::Read {
        origin: origin.to_owned(),
        source: e,
    })?;
    Ok(buf)
}

/// Reads `chunk_size` bytes at a time until end of stream.
pub(crate) fn read_chunked<R: Read>(
    stream: &mut R,
    chunk_size: usize,
    origin: &str,
) -> Result<Vec<u8>> {
    let chunk_size = chunk_size.max(1);
    let mut buf: Vec<u8> = Vec::new();
    let mut filled = 0;

    loop {
        buf.try_reserve(chunk_size).map_err(|e| HookError::Alloc {
            origin: origin.to_owned(),
            source: e,
        })?;
        buf.resize(filled + chunk_size, 0);

        match stream.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => {
                return Err(HookError::Read {
                    origin: origin.to_owned(),
                    source: e,
                });
            }
        }
    }

    if filled == 0 {
        return Err(HookError::EmptyInput {
            origin: origin.to_owned(),
        });
    }
    buf.truncate(filled);
    buf.shrink_to_fit();
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use std::io::{Seek, SeekFrom, Write};

    use super::*;

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::from(ErrorKind::BrokenPipe))
        }
    }

    #[test]
    fn chunked_read_spans_many_chunks() {
        let input = vec![b'x'; 10_000];
        let bytes = read_chunked(&mut input.as_slice(), 7, "pipe").expect("read");
        assert_eq!(bytes, input);
    }

    #[test]
    fn chunked_read_of_empty_stream_is_empty_input() {
        let err = read_chunked(&mut b"".as_slice(), 4096, "pipe").unwrap_err();
        assert!(matches!(err, HookError::EmptyInput { .. }));
    }

    #[test]
    fn chunked_read_surfaces_io_errors() {
        let err = read_chunked(&mut FailingReader, 4096, "pipe").unwrap_err();
        assert!(matches!(err, HookError::Read { .. }));
    }

    #[test]
    fn sized_read_detects_short_read() {
        let err = read_sized(&mut b"{}".as_slice(), 10, "file").unwrap_err();
        match err {
            HookError::Read { source, .. } => {
                assert_eq!(source.kind(), ErrorKind::UnexpectedEof);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn sized_read_of_zero_length_is_empty_input() {
        let err = read_sized(&mut b"".as_slice(), 0, "file").unwrap_err();
        assert!(matches!(err, HookError::EmptyInput { .. }));
    }

    #[test]
    fn read_document_from_regular_file() {
        let mut file = tempfile::tempfile().expect("tempfile");
        file.write_all(br#"{"id":"abc"}"#).expect("write");
        let _ = file.seek(SeekFrom::Start(0)).expect("seek");

        let doc = read_document(&mut file, 4096, "config").expect("read");
        assert_eq!(doc.bytes, br#"{"id":"abc"}"#);
        assert_eq!(doc.origin, "config");
    }

    #[test]
    fn read_document_from_empty_file_is_empty_input() {
        let mut file = tempfile::tempfile().expect("tempfile");
        let err = read_document(&mut file, 4096, "config").unwrap_err();
        assert!(matches!(err, HookError::EmptyInput { .. }));
    }

    #[test]
    fn read_document_from_pipe() {
        let (rx, tx) = nix::unistd::pipe().expect("pipe");
        let mut writer = File::from(tx);
        writer.write_all(br#"{"pid":0}"#).expect("write");
        drop(writer);

        let mut reader = File::from(rx);
        let doc = read_document(&mut reader, 2, "standard input").expect("read");
        assert_eq!(doc.bytes, br#"{"pid":0}"#);
    }

    #[test]
    fn parse_error_carries_position() {
        let doc = RawDocument {
            origin: "state".into(),
            bytes: b"{\n  \"root\": }".to_vec(),
        };
        match doc.parse().unwrap_err() {
            HookError::Parse { origin, source } => {
                assert_eq!(origin, "state");
                assert_eq!(source.line(), 2);
                assert!(source.column() > 0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
