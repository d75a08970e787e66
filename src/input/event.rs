//! Parse Linux input_event records from raw bytes, plus the event and axis
//! codes this driver understands.

use evdevil::event::{EventType, InputEvent};

/// Size of struct input_event on this target (timeval is two native words,
/// then type u16, code u16, value i32).
#[cfg(target_pointer_width = "64")]
pub const INPUT_EVENT_SIZE: usize = 24;
#[cfg(target_pointer_width = "32")]
pub const INPUT_EVENT_SIZE: usize = 16;

// Offset of the type field, past the timestamp.
const PAYLOAD_OFFSET: usize = INPUT_EVENT_SIZE - 8;

pub const EV_SYN: u16 = 0x00;
pub const EV_ABS: u16 = 0x03;

pub const SYN_REPORT: u16 = 0;
/// Per-contact marker in multitouch protocol type A.
pub const SYN_MT_REPORT: u16 = 2;

pub const ABS_MT_TOUCH_MAJOR: u16 = 0x30;
pub const ABS_MT_TOUCH_MINOR: u16 = 0x31;
pub const ABS_MT_WIDTH_MAJOR: u16 = 0x32;
pub const ABS_MT_WIDTH_MINOR: u16 = 0x33;
pub const ABS_MT_ORIENTATION: u16 = 0x34;
pub const ABS_MT_POSITION_X: u16 = 0x35;
pub const ABS_MT_POSITION_Y: u16 = 0x36;
pub const ABS_MT_TRACKING_ID: u16 = 0x39;
pub const ABS_MT_PRESSURE: u16 = 0x3a;

/// Parse one input_event from a buffer (little-endian, native record size).
/// Returns None if the buffer is too short.
pub fn parse_input_event(buf: &[u8]) -> Option<InputEvent> {
    if buf.len() < INPUT_EVENT_SIZE {
        return None;
    }
    let ty = u16::from_le_bytes([buf[PAYLOAD_OFFSET], buf[PAYLOAD_OFFSET + 1]]);
    let code = u16::from_le_bytes([buf[PAYLOAD_OFFSET + 2], buf[PAYLOAD_OFFSET + 3]]);
    let value = i32::from_le_bytes([
        buf[PAYLOAD_OFFSET + 4],
        buf[PAYLOAD_OFFSET + 5],
        buf[PAYLOAD_OFFSET + 6],
        buf[PAYLOAD_OFFSET + 7],
    ]);
    Some(InputEvent::new(EventType::from_raw(ty), code, value))
}

/// Build a synchronization event (EV_SYN) for delivery.
pub fn syn_event(code: u16) -> InputEvent {
    InputEvent::new(EventType::from_raw(EV_SYN), code, 0)
}

/// Encode an event in the kernel wire layout, timestamp zeroed.
#[cfg(test)]
pub fn encode_input_event(ty: u16, code: u16, value: i32) -> [u8; INPUT_EVENT_SIZE] {
    let mut buf = [0u8; INPUT_EVENT_SIZE];
    buf[PAYLOAD_OFFSET..PAYLOAD_OFFSET + 2].copy_from_slice(&ty.to_le_bytes());
    buf[PAYLOAD_OFFSET + 2..PAYLOAD_OFFSET + 4].copy_from_slice(&code.to_le_bytes());
    buf[PAYLOAD_OFFSET + 4..].copy_from_slice(&value.to_le_bytes());
    buf
}
