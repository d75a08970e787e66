//! Dump raw input events from the touch device for debugging.
//! Run: mtpad dump  to stream and print events.

use std::path::Path;

use crate::config::Config;
use crate::device::TouchDevice;
use crate::input::EventReader;

fn code_name(ty: u16, code: u16) -> String {
    if ty == 0 {
        return match code {
            0 => "SYN_REPORT".into(),
            2 => "SYN_MT_REPORT".into(),
            _ => format!("SYN/{}", code),
        };
    }
    if ty == 1 {
        return format!("KEY/{}", code);
    }
    if ty == 3 {
        let abs = match code {
            0x30 => "MT_TOUCH_MAJOR",
            0x31 => "MT_TOUCH_MINOR",
            0x32 => "MT_WIDTH_MAJOR",
            0x33 => "MT_WIDTH_MINOR",
            0x34 => "MT_ORIENTATION",
            0x35 => "MT_POSITION_X",
            0x36 => "MT_POSITION_Y",
            0x39 => "MT_TRACKING_ID",
            0x3a => "MT_PRESSURE",
            _ => "?",
        };
        return format!("ABS_{}({})", abs, code);
    }
    format!("type{} code{}", ty, code)
}

pub fn run_dump(config: &Config) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let device = TouchDevice::open(Path::new(&config.device), false)?;
    eprintln!("Dumping events from {} (Ctrl+C to stop):\n", config.device);
    let mut reader = EventReader::new(device);
    let mut n = 0u64;
    while let Some(ev) = reader.next_event() {
        n += 1;
        let name = code_name(ev.event_type().raw(), ev.raw_code());
        println!("{:6}  {}  value={}", n, name, ev.raw_value());
    }
    Ok(())
}
