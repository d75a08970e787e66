//! One device session: configure from capabilities, then stream decoded
//! frames through the pointer transform and out to the virtual device.

use std::path::Path;
use std::thread;
use std::time::Duration;

use evdevil::uinput::UinputDevice;

use crate::caps::Capabilities;
use crate::config::Config;
use crate::device::TouchDevice;
use crate::input::FrameSource;
use crate::output;
use crate::pointer::PointerState;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Query device capabilities before any streaming starts. Failure here is
/// a configuration error: the session must not proceed to the stream.
pub fn configure(config: &Config) -> Result<Capabilities> {
    let device = TouchDevice::open(Path::new(&config.device), false)?;
    let caps = Capabilities::query(device.fd())?;
    caps.log_ranges();
    Ok(caps)
}

/// Stream frames until the device stops delivering events, then reopen it.
///
/// Decoder and gesture state are reset on every reopen, so a new stream
/// starts with no stale contacts and no pending release.
pub fn run(config: &Config, caps: &Capabilities, uinput: &UinputDevice) -> Result<()> {
    let opts = config.pointer_options();
    let device = TouchDevice::open(Path::new(&config.device), config.grab)?;
    let mut frames = FrameSource::new(device);
    let mut pointer = PointerState::new();

    loop {
        let mut frame_count: u64 = 0;

        while frames.await_frame() {
            let update = pointer.transform(frames.contacts(), caps, opts);

            if frame_count == 0 {
                log::info!("touch frames flowing");
            }
            frame_count += 1;
            if frame_count % 500 == 0 {
                log::debug!("frames: {}, contacts: {}", frame_count, update.num_fingers());
            }

            output::emit_update(uinput, &update)?;
        }

        log::warn!("touch stream ended, reopening in 2s…");
        thread::sleep(Duration::from_secs(2));

        frames.reattach(TouchDevice::open(Path::new(&config.device), config.grab)?);
        pointer = PointerState::new();
    }
}
