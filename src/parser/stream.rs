use crate::error::Result;
use crate::parser::frame::{FrameAssembler, RawFrame};
use std::io::{BufRead, BufReader, ErrorKind, Read};
use tracing::debug;

/// What one call to [`FrameReader::read_event`] produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadEvent {
    /// A sentinel line completed a frame
    Frame(RawFrame),
    /// The source timed out or had nothing to offer; try again
    Idle,
    /// The source is exhausted (files and test buffers only)
    Eof,
}

/// Turns a byte stream into frames
///
/// Bytes are decoded as lossy UTF-8, so garbage on the wire degrades into
/// replacement characters instead of aborting the stream. A line cut short by
/// a read timeout is kept and finished on the next call.
pub struct FrameReader<R: Read> {
    reader: BufReader<R>,
    pending: Vec<u8>,
    assembler: FrameAssembler,
    eof: bool,
}

impl<R: Read> FrameReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            reader: BufReader::new(source),
            pending: Vec::new(),
            assembler: FrameAssembler::new(),
            eof: false,
        }
    }

    pub fn is_eof(&self) -> bool {
        self.eof
    }

    pub fn assembler(&self) -> &FrameAssembler {
        &self.assembler
    }

    /// Read until a frame completes, the source times out, or it ends.
    ///
    /// Timeouts and `WouldBlock` are reported as [`ReadEvent::Idle`]; any other
    /// I/O error is returned and the reader stays usable for the next call.
    pub fn read_event(&mut self) -> Result<ReadEvent> {
        if self.eof {
            return Ok(ReadEvent::Eof);
        }

        loop {
            match self.reader.read_until(b'\n', &mut self.pending) {
                Ok(0) => {
                    self.eof = true;
                    let frame = self.flush_pending();
                    let dropped = self.assembler.reset();
                    if dropped > 0 {
                        debug!(lines = dropped, "discarding unterminated frame at end of stream");
                    }
                    return Ok(frame.map_or(ReadEvent::Eof, ReadEvent::Frame));
                }
                Ok(_) => {
                    if self.pending.last() != Some(&b'\n') {
                        // Partial line at end of stream; the next read returns 0
                        continue;
                    }
                    if let Some(frame) = self.flush_pending() {
                        return Ok(ReadEvent::Frame(frame));
                    }
                }
                Err(e) if matches!(e.kind(), ErrorKind::TimedOut | ErrorKind::WouldBlock) => {
                    return Ok(ReadEvent::Idle);
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn flush_pending(&mut self) -> Option<RawFrame> {
        if self.pending.is_empty() {
            return None;
        }
        let line = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending.clear();
        self.assembler.push_line(&line)
    }
}

impl<R: Read> Iterator for FrameReader<R> {
    type Item = Result<RawFrame>;

    /// Yields frames until end of stream, skipping idle reads
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.read_event() {
                Ok(ReadEvent::Frame(frame)) => return Some(Ok(frame)),
                Ok(ReadEvent::Idle) => continue,
                Ok(ReadEvent::Eof) => return None,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::frame::FRAME_SENTINEL;
    use std::collections::VecDeque;
    use std::io::{self, Cursor};

    /// Replays scripted chunks, with `None` standing for a read timeout
    struct ScriptedSource {
        steps: VecDeque<Option<Vec<u8>>>,
    }

    impl ScriptedSource {
        fn new(steps: Vec<Option<&[u8]>>) -> Self {
            Self {
                steps: steps.into_iter().map(|s| s.map(|b| b.to_vec())).collect(),
            }
        }
    }

    impl Read for ScriptedSource {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.steps.pop_front() {
                None => Ok(0),
                Some(None) => Err(io::Error::new(ErrorKind::TimedOut, "timeout")),
                Some(Some(mut chunk)) => {
                    let n = chunk.len().min(buf.len());
                    buf[..n].copy_from_slice(&chunk[..n]);
                    if n < chunk.len() {
                        chunk.drain(..n);
                        self.steps.push_front(Some(chunk));
                    }
                    Ok(n)
                }
            }
        }
    }

    #[test]
    fn test_reads_consecutive_frames() {
        let text = format!(
            "Latitude: 1\nLongitude: 2\n{FRAME_SENTINEL}\nLatitude: 3\nLongitude: 4\n{FRAME_SENTINEL}\n"
        );
        let frames: Vec<RawFrame> = FrameReader::new(Cursor::new(text))
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[1].lines[0], "Latitude: 3");
    }

    #[test]
    fn test_timeout_mid_line_keeps_partial_line() {
        let source = ScriptedSource::new(vec![
            Some(&b"Latitude: 10."[..]),
            None,
            Some(&b"5\nLongitude: 20.25\r\n"[..]),
            None,
            Some(&b"---------------------------\n"[..]),
        ]);
        let mut reader = FrameReader::new(source);

        assert_eq!(reader.read_event().unwrap(), ReadEvent::Idle);
        assert_eq!(reader.read_event().unwrap(), ReadEvent::Idle);
        match reader.read_event().unwrap() {
            ReadEvent::Frame(frame) => {
                assert_eq!(
                    frame.lines,
                    vec!["Latitude: 10.5", "Longitude: 20.25", FRAME_SENTINEL]
                );
            }
            other => panic!("expected frame, got {other:?}"),
        }
        assert_eq!(reader.read_event().unwrap(), ReadEvent::Eof);
        assert!(reader.is_eof());
    }

    #[test]
    fn test_invalid_utf8_is_replaced_not_fatal() {
        let mut bytes = b"Altitude: 4".to_vec();
        bytes.extend_from_slice(&[0xff, 0xfe]);
        bytes.extend_from_slice(b"00\nLatitude: 1.5\n---------------------------\n");

        let frame = FrameReader::new(Cursor::new(bytes))
            .next()
            .expect("one frame")
            .unwrap();
        assert_eq!(frame.lines.len(), 3);
        assert!(frame.lines[0].starts_with("Altitude: 4"));
        assert!(frame.lines[0].contains('\u{FFFD}'));
        assert_eq!(frame.lines[1], "Latitude: 1.5");
    }

    #[test]
    fn test_sentinel_without_trailing_newline_at_eof() {
        let text = format!("Latitude: 1\n{FRAME_SENTINEL}");
        let mut reader = FrameReader::new(Cursor::new(text));
        assert!(matches!(reader.read_event().unwrap(), ReadEvent::Frame(_)));
        assert_eq!(reader.read_event().unwrap(), ReadEvent::Eof);
    }

    #[test]
    fn test_unterminated_frame_is_discarded_at_eof() {
        let text = format!("Latitude: 1\n{FRAME_SENTINEL}\nLatitude: 2\nLongitude: 3\n");
        let frames: Vec<RawFrame> = FrameReader::new(Cursor::new(text))
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(frames.len(), 1);
    }

    #[test]
    fn test_other_io_errors_are_returned() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(ErrorKind::BrokenPipe, "unplugged"))
            }
        }
        let mut reader = FrameReader::new(Broken);
        assert!(reader.read_event().is_err());
    }
}
