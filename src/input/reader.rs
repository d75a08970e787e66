//! Batched reader that pulls kernel input events from a byte stream.
//!
//! Events arrive from the character device in whole-packet bursts, so one
//! bulk read usually buffers many events; they are then served one at a
//! time without touching the stream again.

use std::io::{ErrorKind, Read};

use evdevil::event::InputEvent;

use super::event::{parse_input_event, INPUT_EVENT_SIZE};

/// Buffer capacity in events per bulk read.
pub const MAX_EVENTS: usize = 64;

pub struct EventReader<R> {
    stream: R,
    buf: [u8; MAX_EVENTS * INPUT_EVENT_SIZE],
    num_events: usize,
    num_events_read: usize,
}

impl<R: Read> EventReader<R> {
    pub fn new(stream: R) -> Self {
        Self {
            stream,
            buf: [0; MAX_EVENTS * INPUT_EVENT_SIZE],
            num_events: 0,
            num_events_read: 0,
        }
    }

    /// Serve the next buffered event, refilling from the stream when the
    /// buffer is exhausted.
    ///
    /// None means the stream ended, errored, or delivered a chunk that is
    /// not a whole number of input_event records; the caller should stop
    /// processing this cycle. No attempt is made to reassemble partial
    /// records from a misaligned read.
    pub fn next_event(&mut self) -> Option<InputEvent> {
        if self.num_events_read >= self.num_events {
            let n = loop {
                match self.stream.read(&mut self.buf) {
                    Ok(n) => break n,
                    Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                    Err(e) => {
                        log::debug!("input stream read failed: {}", e);
                        return None;
                    }
                }
            };
            if n == 0 {
                return None;
            }
            if n % INPUT_EVENT_SIZE != 0 {
                log::error!("input stream returned a non-aligned chunk ({} bytes)", n);
                return None;
            }
            self.num_events = n / INPUT_EVENT_SIZE;
            self.num_events_read = 0;
        }

        let at = self.num_events_read * INPUT_EVENT_SIZE;
        self.num_events_read += 1;
        parse_input_event(&self.buf[at..at + INPUT_EVENT_SIZE])
    }
}
