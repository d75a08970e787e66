//! Frame decoder for multitouch protocol type A.
//!
//! Type A devices report anonymous contacts: a run of EV_ABS updates per
//! contact, SYN_MT_REPORT after each contact, SYN_REPORT after the full
//! packet. No slot numbers are sent, so the decoder fills a fixed array of
//! in-progress slots in arrival order and publishes the completed set at
//! each SYN_REPORT.

use evdevil::event::InputEvent;

use super::event::{
    ABS_MT_ORIENTATION, ABS_MT_POSITION_X, ABS_MT_POSITION_Y, ABS_MT_PRESSURE,
    ABS_MT_TOUCH_MAJOR, ABS_MT_TOUCH_MINOR, ABS_MT_TRACKING_ID, ABS_MT_WIDTH_MAJOR,
    ABS_MT_WIDTH_MINOR, EV_ABS, EV_SYN, SYN_MT_REPORT, SYN_REPORT,
};

/// Decoder slot capacity. Packets describing more contacts than this are
/// truncated, not rejected.
pub const MAX_CONTACTS: usize = 16;

/// One contact's accumulated axis values for the current frame.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub position_x: i32,
    pub position_y: i32,
    pub touch_major: i32,
    pub touch_minor: i32,
    // Decoded but not forwarded; the pointer transform packs only the
    // positions, touch size and tracking id.
    #[allow(dead_code)]
    pub width_major: i32,
    #[allow(dead_code)]
    pub width_minor: i32,
    #[allow(dead_code)]
    pub orientation: i32,
    #[allow(dead_code)]
    pub pressure: i32,
    pub tracking_id: i32,
}

/// Outcome of feeding one event to the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeSignal {
    /// More events are needed before the frame is complete.
    Continue,
    /// A SYN_REPORT closed the packet; the completed contacts are readable.
    FrameComplete,
}

/// State machine that reassembles contact frames one event at a time.
///
/// The completed frame stays readable through [`FrameDecoder::contacts`]
/// until the next [`FrameDecoder::consume`] call mutates the array.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    contacts: [Contact; MAX_CONTACTS],
    // Contacts confirmed in the last completed frame.
    num_contacts: usize,
    // Contacts confirmed so far in the in-progress frame.
    num_read: usize,
    // Axis updates seen for the in-progress contact.
    num_abs_read: usize,
    // Completed frame still occupies the array; clear before the next write.
    stale: bool,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero all counters and contact slots. Called when the device session
    /// opens or closes so no contact state leaks across sessions.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Feed one raw event into the state machine.
    ///
    /// A contact is confirmed at its SYN_MT_REPORT only if it received at
    /// least one axis update and its touch_major is strictly positive; a
    /// zero touch_major means the contact lifted and its slot is reused.
    pub fn consume(&mut self, ev: &InputEvent) -> DecodeSignal {
        if self.stale {
            self.contacts = [Contact::default(); MAX_CONTACTS];
            self.stale = false;
        }

        match (ev.event_type().raw(), ev.raw_code()) {
            (EV_SYN, SYN_REPORT) => {
                self.num_contacts = self.num_read;
                self.num_read = 0;
                self.num_abs_read = 0;
                self.stale = true;
                DecodeSignal::FrameComplete
            }
            (EV_SYN, SYN_MT_REPORT) => {
                if self.num_read < MAX_CONTACTS
                    && self.num_abs_read > 0
                    && self.contacts[self.num_read].touch_major > 0
                {
                    self.num_read += 1;
                }
                self.num_abs_read = 0;
                DecodeSignal::Continue
            }
            (EV_ABS, code) => {
                // Updates beyond capacity are dropped, not an error.
                if self.num_read >= MAX_CONTACTS {
                    return DecodeSignal::Continue;
                }
                let contact = &mut self.contacts[self.num_read];
                match code {
                    ABS_MT_POSITION_X => contact.position_x = ev.raw_value(),
                    ABS_MT_POSITION_Y => contact.position_y = ev.raw_value(),
                    ABS_MT_TOUCH_MAJOR => contact.touch_major = ev.raw_value(),
                    ABS_MT_TOUCH_MINOR => contact.touch_minor = ev.raw_value(),
                    ABS_MT_WIDTH_MAJOR => contact.width_major = ev.raw_value(),
                    ABS_MT_WIDTH_MINOR => contact.width_minor = ev.raw_value(),
                    ABS_MT_ORIENTATION => contact.orientation = ev.raw_value(),
                    ABS_MT_PRESSURE => contact.pressure = ev.raw_value(),
                    ABS_MT_TRACKING_ID => contact.tracking_id = ev.raw_value(),
                    // Unknown axes from newer devices are ignored.
                    _ => return DecodeSignal::Continue,
                }
                self.num_abs_read += 1;
                DecodeSignal::Continue
            }
            _ => DecodeSignal::Continue,
        }
    }

    /// Contacts of the last completed frame, empty until the first
    /// SYN_REPORT has been consumed.
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts[..self.num_contacts]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::event::syn_event;
    use evdevil::event::{EventType, InputEvent};

    fn abs(code: u16, value: i32) -> InputEvent {
        InputEvent::new(EventType::from_raw(EV_ABS), code, value)
    }

    fn feed(decoder: &mut FrameDecoder, events: &[InputEvent]) -> usize {
        let mut frames = 0;
        for ev in events {
            if decoder.consume(ev) == DecodeSignal::FrameComplete {
                frames += 1;
            }
        }
        frames
    }

    #[test]
    fn test_single_contact_frame() {
        let mut decoder = FrameDecoder::new();
        let frames = feed(
            &mut decoder,
            &[
                abs(ABS_MT_TRACKING_ID, 0),
                abs(ABS_MT_POSITION_X, 5),
                abs(ABS_MT_POSITION_Y, 5),
                abs(ABS_MT_TOUCH_MAJOR, 10),
                syn_event(SYN_MT_REPORT),
                syn_event(SYN_REPORT),
            ],
        );
        assert_eq!(frames, 1);
        let contacts = decoder.contacts();
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].position_x, 5);
        assert_eq!(contacts[0].position_y, 5);
        assert_eq!(contacts[0].touch_major, 10);
        assert_eq!(contacts[0].tracking_id, 0);
    }

    #[test]
    fn test_all_axes_decoded() {
        let mut decoder = FrameDecoder::new();
        feed(
            &mut decoder,
            &[
                abs(ABS_MT_POSITION_X, 1),
                abs(ABS_MT_POSITION_Y, 2),
                abs(ABS_MT_TOUCH_MAJOR, 3),
                abs(ABS_MT_TOUCH_MINOR, 4),
                abs(ABS_MT_WIDTH_MAJOR, 5),
                abs(ABS_MT_WIDTH_MINOR, 6),
                abs(ABS_MT_ORIENTATION, 7),
                abs(ABS_MT_PRESSURE, 8),
                abs(ABS_MT_TRACKING_ID, 9),
                syn_event(SYN_MT_REPORT),
                syn_event(SYN_REPORT),
            ],
        );
        assert_eq!(
            decoder.contacts(),
            [Contact {
                position_x: 1,
                position_y: 2,
                touch_major: 3,
                touch_minor: 4,
                width_major: 5,
                width_minor: 6,
                orientation: 7,
                pressure: 8,
                tracking_id: 9,
            }]
        );
    }

    #[test]
    fn test_lifted_contact_filtered() {
        // touch_major == 0 marks a lifted contact; it must not appear in the
        // frame no matter which other axes were updated.
        let mut decoder = FrameDecoder::new();
        feed(
            &mut decoder,
            &[
                abs(ABS_MT_TRACKING_ID, 0),
                abs(ABS_MT_POSITION_X, 5),
                abs(ABS_MT_POSITION_Y, 5),
                abs(ABS_MT_TOUCH_MAJOR, 0),
                syn_event(SYN_MT_REPORT),
                syn_event(SYN_REPORT),
            ],
        );
        assert!(decoder.contacts().is_empty());
    }

    #[test]
    fn test_negative_touch_major_filtered() {
        let mut decoder = FrameDecoder::new();
        feed(
            &mut decoder,
            &[
                abs(ABS_MT_TOUCH_MAJOR, -3),
                abs(ABS_MT_POSITION_X, 1),
                syn_event(SYN_MT_REPORT),
                syn_event(SYN_REPORT),
            ],
        );
        assert!(decoder.contacts().is_empty());
    }

    #[test]
    fn test_marker_without_updates_reuses_slot() {
        let mut decoder = FrameDecoder::new();
        feed(
            &mut decoder,
            &[
                // Spurious marker first: no axis updates yet.
                syn_event(SYN_MT_REPORT),
                abs(ABS_MT_TOUCH_MAJOR, 4),
                abs(ABS_MT_POSITION_X, 9),
                syn_event(SYN_MT_REPORT),
                syn_event(SYN_REPORT),
            ],
        );
        let contacts = decoder.contacts();
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].position_x, 9);
    }

    #[test]
    fn test_empty_packet_yields_empty_frame() {
        let mut decoder = FrameDecoder::new();
        assert_eq!(
            decoder.consume(&syn_event(SYN_REPORT)),
            DecodeSignal::FrameComplete
        );
        assert!(decoder.contacts().is_empty());

        // Counters are clean: the next packet decodes normally.
        let frames = feed(
            &mut decoder,
            &[
                abs(ABS_MT_TOUCH_MAJOR, 7),
                syn_event(SYN_MT_REPORT),
                syn_event(SYN_REPORT),
            ],
        );
        assert_eq!(frames, 1);
        assert_eq!(decoder.contacts().len(), 1);
        assert_eq!(decoder.contacts()[0].touch_major, 7);
    }

    #[test]
    fn test_contact_capacity_bounded() {
        // More per-contact markers than slots: the frame is truncated at
        // MAX_CONTACTS, never grown.
        let mut decoder = FrameDecoder::new();
        let mut events = Vec::new();
        for i in 0..MAX_CONTACTS as i32 + 4 {
            events.push(abs(ABS_MT_TRACKING_ID, i));
            events.push(abs(ABS_MT_TOUCH_MAJOR, 5));
            events.push(syn_event(SYN_MT_REPORT));
        }
        events.push(syn_event(SYN_REPORT));
        feed(&mut decoder, &events);
        assert_eq!(decoder.contacts().len(), MAX_CONTACTS);
    }

    #[test]
    fn test_unknown_axis_alone_not_confirmed() {
        // An unrecognized axis code does not count as an update, so the
        // marker discards the slot.
        let mut decoder = FrameDecoder::new();
        feed(
            &mut decoder,
            &[
                abs(0x3f, 123),
                syn_event(SYN_MT_REPORT),
                syn_event(SYN_REPORT),
            ],
        );
        assert!(decoder.contacts().is_empty());
    }

    #[test]
    fn test_unknown_axis_interleaved_ignored() {
        let mut decoder = FrameDecoder::new();
        feed(
            &mut decoder,
            &[
                abs(ABS_MT_TOUCH_MAJOR, 6),
                abs(0x3f, 123),
                abs(ABS_MT_POSITION_X, 44),
                syn_event(SYN_MT_REPORT),
                syn_event(SYN_REPORT),
            ],
        );
        assert_eq!(decoder.contacts().len(), 1);
        assert_eq!(decoder.contacts()[0].position_x, 44);
    }

    #[test]
    fn test_contacts_zeroed_between_frames() {
        // A field written in one frame must not leak into the next frame's
        // contact occupying the same slot.
        let mut decoder = FrameDecoder::new();
        feed(
            &mut decoder,
            &[
                abs(ABS_MT_TOUCH_MAJOR, 10),
                abs(ABS_MT_TOUCH_MINOR, 8),
                syn_event(SYN_MT_REPORT),
                syn_event(SYN_REPORT),
            ],
        );
        assert_eq!(decoder.contacts()[0].touch_minor, 8);

        feed(
            &mut decoder,
            &[
                abs(ABS_MT_TOUCH_MAJOR, 10),
                syn_event(SYN_MT_REPORT),
                syn_event(SYN_REPORT),
            ],
        );
        assert_eq!(decoder.contacts()[0].touch_minor, 0);
    }

    #[test]
    fn test_frame_readable_until_next_consume() {
        let mut decoder = FrameDecoder::new();
        feed(
            &mut decoder,
            &[
                abs(ABS_MT_TOUCH_MAJOR, 3),
                syn_event(SYN_MT_REPORT),
                syn_event(SYN_REPORT),
            ],
        );
        // No consume since the SYN_REPORT: the frame is still intact.
        assert_eq!(decoder.contacts()[0].touch_major, 3);
    }

    #[test]
    fn test_reset_clears_state() {
        let mut decoder = FrameDecoder::new();
        feed(
            &mut decoder,
            &[
                abs(ABS_MT_TOUCH_MAJOR, 3),
                syn_event(SYN_MT_REPORT),
                syn_event(SYN_REPORT),
            ],
        );
        decoder.reset();
        assert!(decoder.contacts().is_empty());

        // A packet straddling the reset must not see the old partial state.
        feed(&mut decoder, &[syn_event(SYN_REPORT)]);
        assert!(decoder.contacts().is_empty());
    }
}
