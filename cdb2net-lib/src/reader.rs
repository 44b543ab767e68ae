use crate::error::DumpError;
use crate::event::NetEvent;
use std::io::BufRead;
use tracing::debug;

/// Reads network events from a JSON-lines event log.
///
/// Lines that are valid JSON but not complete network events are skipped and
/// counted. Anything else that goes wrong stops the reader with an error.
pub struct EventReader<R> {
    input: R,
    buf: String,
    lines: usize,
    skipped: usize,
}

impl<R: BufRead> EventReader<R> {
    pub fn new(input: R) -> Self {
        Self {
            input,
            buf: String::new(),
            lines: 0,
            skipped: 0,
        }
    }

    /// Next network event, or `None` at end of input.
    pub fn next_event(&mut self) -> Result<Option<NetEvent>, DumpError> {
        loop {
            self.buf.clear();
            if self.input.read_line(&mut self.buf)? == 0 {
                return Ok(None);
            }
            self.lines += 1;

            match NetEvent::from_json_line(&self.buf, self.lines)? {
                Some(event) => return Ok(Some(event)),
                None => {
                    self.skipped += 1;
                    debug!("line {}: not a network event, skipping", self.lines);
                }
            }
        }
    }

    /// Lines consumed so far
    pub fn lines_read(&self) -> usize {
        self.lines
    }

    /// Lines skipped so far
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl<R: BufRead> Iterator for EventReader<R> {
    type Item = Result<NetEvent, DumpError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_event().transpose()
    }
}
