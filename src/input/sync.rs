//! Drives the batched reader and the frame decoder together, exposing the
//! stream as a sequence of synchronized contact frames.

use std::io::Read;

use super::decoder::{Contact, DecodeSignal, FrameDecoder};
use super::reader::EventReader;

pub struct FrameSource<R> {
    reader: EventReader<R>,
    decoder: FrameDecoder,
}

impl<R: Read> FrameSource<R> {
    pub fn new(stream: R) -> Self {
        Self {
            reader: EventReader::new(stream),
            decoder: FrameDecoder::new(),
        }
    }

    /// Swap in a reopened stream and discard all decode state, so no stale
    /// contact data survives across device sessions.
    pub fn reattach(&mut self, stream: R) {
        self.reader = EventReader::new(stream);
        self.decoder.reset();
    }

    /// Pump events into the decoder until one full frame is assembled.
    ///
    /// Returns false when the stream yields no more events this cycle
    /// (exhausted or errored). Surplus buffered events past the completed
    /// frame are kept for the next call.
    pub fn await_frame(&mut self) -> bool {
        while let Some(ev) = self.reader.next_event() {
            if self.decoder.consume(&ev) == DecodeSignal::FrameComplete {
                return true;
            }
        }
        false
    }

    /// Contacts of the most recently completed frame.
    pub fn contacts(&self) -> &[Contact] {
        self.decoder.contacts()
    }
}
