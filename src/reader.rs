//! Line sources: block reads through one reused buffer, or an in-memory slice.

use std::io::{ErrorKind, Read};

use bstr::ByteSlice;
use log::debug;

use crate::config::TrailingLine;
use crate::error::{Error, Result};

const NEWLINE: u8 = 10;

/// Something that hands out complete lines, without their newline, one at a
/// time and front to back.
pub trait LineSource {
    fn next_line(&mut self) -> Result<Option<&[u8]>>;
}

pub struct ChunkedReader<R> {
    inner: R,
    buffer: Box<[u8]>,
    /// Start of the next unread line.
    start: usize,
    /// One past the last newline in the buffer; lines before it are complete.
    complete: usize,
    /// End of valid data.
    filled: usize,
    eof: bool,
    trailing: TrailingLine,
}

impl<R: Read> ChunkedReader<R> {
    pub fn new(inner: R, block_size: usize, trailing: TrailingLine) -> Result<Self> {
        if block_size == 0 {
            return Err(Error::InvalidBlockSize(block_size));
        }
        Ok(Self {
            inner,
            buffer: vec![0; block_size].into_boxed_slice(),
            start: 0,
            complete: 0,
            filled: 0,
            eof: false,
            trailing,
        })
    }

    /// Moves the unfinished tail to the front and reads behind it.
    fn refill(&mut self) -> Result<()> {
        let tail = self.filled - self.start;
        if tail == self.buffer.len() {
            return Err(Error::LineTooLong { block_size: self.buffer.len() });
        }

        self.buffer.copy_within(self.start..self.filled, 0);
        self.start = 0;
        self.complete = 0;
        self.filled = tail;

        let read = loop {
            match self.inner.read(&mut self.buffer[tail..]) {
                Ok(read) => break read,
                Err(error) if error.kind() == ErrorKind::Interrupted => continue,
                Err(error) => return Err(error.into()),
            }
        };
        debug!("carried {tail} bytes, read {read} bytes");

        if read == 0 {
            self.eof = true;
            return Ok(());
        }
        self.filled += read;

        if let Some(position) = self.buffer[tail..self.filled].rfind_byte(NEWLINE) {
            self.complete = tail + position + 1;
        }
        Ok(())
    }
}

impl<R: Read> LineSource for ChunkedReader<R> {
    fn next_line(&mut self) -> Result<Option<&[u8]>> {
        loop {
            if self.start < self.complete {
                let line_start = self.start;
                let length = match self.buffer[line_start..self.complete].find_byte(NEWLINE) {
                    Some(length) => length,
                    None => unreachable!(),
                };
                self.start = line_start + length + 1;
                return Ok(Some(&self.buffer[line_start..(line_start + length)]));
            }

            if self.eof {
                if self.start == self.filled {
                    return Ok(None);
                }
                if self.trailing == TrailingLine::Reject {
                    return Err(Error::MissingTrailingNewline);
                }
                let line_start = self.start;
                self.start = self.filled;
                return Ok(Some(&self.buffer[line_start..self.filled]));
            }

            self.refill()?;
        }
    }
}

pub struct SliceLines<'a> {
    data: &'a [u8],
    position: usize,
    trailing: TrailingLine,
}

impl<'a> SliceLines<'a> {
    pub fn new(data: &'a [u8], trailing: TrailingLine) -> Self {
        Self { data, position: 0, trailing }
    }
}

impl LineSource for SliceLines<'_> {
    fn next_line(&mut self) -> Result<Option<&[u8]>> {
        let rest = &self.data[self.position..];
        if rest.is_empty() {
            return Ok(None);
        }

        match rest.find_byte(NEWLINE) {
            Some(length) => {
                self.position += length + 1;
                Ok(Some(&rest[..length]))
            }
            None if self.trailing == TrailingLine::Reject => Err(Error::MissingTrailingNewline),
            None => {
                self.position = self.data.len();
                Ok(Some(rest))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hands out at most `step` bytes per read.
    struct Trickle<'a> {
        data: &'a [u8],
        step: usize,
    }

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            let n = self.step.min(buf.len()).min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    fn collect(source: &mut impl LineSource) -> Result<Vec<Vec<u8>>> {
        let mut lines = Vec::new();
        while let Some(line) = source.next_line()? {
            lines.push(line.to_vec());
        }
        Ok(lines)
    }

    fn read_all(data: &[u8], block_size: usize, trailing: TrailingLine) -> Result<Vec<Vec<u8>>> {
        collect(&mut ChunkedReader::new(data, block_size, trailing)?)
    }

    const INPUT: &[u8] = b"Hamburg;12.0\nBulawayo;8.9\nPalembang;38.8\nSt. John's;15.2\nCracow;12.6\n";

    fn expected() -> Vec<Vec<u8>> {
        INPUT.lines().map(<[u8]>::to_vec).collect()
    }

    #[test]
    fn every_block_size_yields_the_same_lines() {
        for block_size in 16..=INPUT.len() + 1 {
            let lines = read_all(INPUT, block_size, TrailingLine::Reject).unwrap();
            assert_eq!(lines, expected(), "block size {block_size}");
        }
    }

    #[test]
    fn block_boundary_on_a_newline() {
        let data = b"ab;1.0\ncd;2.0\n";
        assert_eq!(read_all(data, 7, TrailingLine::Reject).unwrap(), [b"ab;1.0", b"cd;2.0"]);
        assert_eq!(read_all(data, 14, TrailingLine::Reject).unwrap(), [b"ab;1.0", b"cd;2.0"]);
    }

    #[test]
    fn short_reads_are_reassembled() {
        for step in 1..8 {
            let mut reader =
                ChunkedReader::new(Trickle { data: INPUT, step }, 32, TrailingLine::Reject).unwrap();
            assert_eq!(collect(&mut reader).unwrap(), expected(), "step {step}");
        }
    }

    #[test]
    fn final_line_without_newline() {
        let data = b"ab;1.0\ncd;2.0";
        assert_eq!(read_all(data, 8, TrailingLine::Implicit).unwrap(), [b"ab;1.0", b"cd;2.0"]);
        assert!(matches!(
            read_all(data, 8, TrailingLine::Reject),
            Err(Error::MissingTrailingNewline)
        ));
    }

    #[test]
    fn line_longer_than_the_block_fails() {
        let data = b"a-very-long-station-name;1.0\n";
        assert!(matches!(
            read_all(data, 10, TrailingLine::Implicit),
            Err(Error::LineTooLong { block_size: 10 })
        ));
    }

    #[test]
    fn empty_input_has_no_lines() {
        assert!(read_all(b"", 8, TrailingLine::Reject).unwrap().is_empty());
        assert!(collect(&mut SliceLines::new(b"", TrailingLine::Reject)).unwrap().is_empty());
    }

    #[test]
    fn zero_block_size_is_rejected() {
        assert!(matches!(
            ChunkedReader::new(&b""[..], 0, TrailingLine::Implicit),
            Err(Error::InvalidBlockSize(0))
        ));
    }

    #[test]
    fn slice_lines_match_chunked_reads() {
        let mut lines = SliceLines::new(INPUT, TrailingLine::Reject);
        assert_eq!(collect(&mut lines).unwrap(), expected());

        let data = b"ab;1.0\ncd;2.0";
        let mut lines = SliceLines::new(data, TrailingLine::Implicit);
        assert_eq!(collect(&mut lines).unwrap(), [b"ab;1.0", b"cd;2.0"]);

        let mut lines = SliceLines::new(data, TrailingLine::Reject);
        assert_eq!(lines.next_line().unwrap(), Some(&b"ab;1.0"[..]));
        assert!(matches!(lines.next_line(), Err(Error::MissingTrailingNewline)));
    }
}
