//! Device capability model: per-axis value ranges and optional-axis flags,
//! queried once at configuration time via the EVIOC* ioctls.

use std::io;
use std::mem;
use std::os::unix::io::RawFd;

use nix::errno::Errno;
use nix::{ioctl_read_buf, request_code_read};

use crate::input::event::{
    ABS_MT_POSITION_X, ABS_MT_POSITION_Y, ABS_MT_TOUCH_MAJOR, ABS_MT_TOUCH_MINOR,
    ABS_MT_TRACKING_ID, EV_ABS,
};

/// Minimum/maximum bounds of one absolute axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AxisRange {
    pub minimum: i32,
    pub maximum: i32,
}

/// Axis ranges and optional-axis support for one touch device.
///
/// Immutable after the query; shared read-only with the pointer transform
/// and the virtual device setup.
#[derive(Debug, Clone, Copy)]
pub struct Capabilities {
    pub position_x: AxisRange,
    pub position_y: AxisRange,
    pub touch_major: AxisRange,
    pub touch_minor: AxisRange,
    pub tracking_id: AxisRange,
    pub has_touch_minor: bool,
}

// ABS_MAX is 0x3f, so the EV_ABS capability bitmask fits in 8 bytes.
const ABS_BITS_LEN: usize = 8;

// EVIOCGBIT(EV_ABS, len): which absolute axes the device reports.
ioctl_read_buf!(eviocgbit_abs, b'E', 0x20 + EV_ABS as u8, u8);

fn axis_bit(bits: &[u8], axis: u16) -> bool {
    bits[axis as usize / 8] & (1 << (axis % 8)) != 0
}

// EVIOCGABS(axis): min/max (and more) for one absolute axis. The axis code
// is part of the request number, so the request is computed per call.
fn query_axis_range(fd: RawFd, axis: u16) -> io::Result<AxisRange> {
    let mut info: libc::input_absinfo = unsafe { mem::zeroed() };
    let req = request_code_read!(b'E', 0x40 + axis as u32, mem::size_of::<libc::input_absinfo>());
    let res = unsafe { libc::ioctl(fd, req as _, &mut info as *mut libc::input_absinfo) };
    Errno::result(res).map_err(io::Error::from)?;
    Ok(AxisRange {
        minimum: info.minimum,
        maximum: info.maximum,
    })
}

impl Capabilities {
    /// Query the axis ranges of an open touch device.
    ///
    /// Fails if any required multitouch axis is missing; no partial or
    /// default capability state is ever returned. touch_minor is the one
    /// optional axis: when absent, its range mirrors touch_major and
    /// `has_touch_minor` is false.
    pub fn query(fd: RawFd) -> io::Result<Self> {
        let mut bits = [0u8; ABS_BITS_LEN];
        unsafe { eviocgbit_abs(fd, &mut bits) }.map_err(io::Error::from)?;

        for axis in [
            ABS_MT_POSITION_X,
            ABS_MT_POSITION_Y,
            ABS_MT_TOUCH_MAJOR,
            ABS_MT_TRACKING_ID,
        ] {
            if !axis_bit(&bits, axis) {
                return Err(io::Error::new(
                    io::ErrorKind::Unsupported,
                    format!("device does not report absolute axis {:#04x}", axis),
                ));
            }
        }

        let has_touch_minor = axis_bit(&bits, ABS_MT_TOUCH_MINOR);
        let touch_major = query_axis_range(fd, ABS_MT_TOUCH_MAJOR)?;
        Ok(Self {
            position_x: query_axis_range(fd, ABS_MT_POSITION_X)?,
            position_y: query_axis_range(fd, ABS_MT_POSITION_Y)?,
            touch_major,
            touch_minor: if has_touch_minor {
                query_axis_range(fd, ABS_MT_TOUCH_MINOR)?
            } else {
                touch_major
            },
            tracking_id: query_axis_range(fd, ABS_MT_TRACKING_ID)?,
            has_touch_minor,
        })
    }

    /// Log the queried ranges once after configuration.
    pub fn log_ranges(&self) {
        log::info!(
            "position_x: {}..{}",
            self.position_x.minimum,
            self.position_x.maximum
        );
        log::info!(
            "position_y: {}..{}",
            self.position_y.minimum,
            self.position_y.maximum
        );
        log::info!(
            "touch_major: {}..{}",
            self.touch_major.minimum,
            self.touch_major.maximum
        );
        if self.has_touch_minor {
            log::info!(
                "touch_minor: {}..{}",
                self.touch_minor.minimum,
                self.touch_minor.maximum
            );
        } else {
            log::info!("touch_minor: not reported, substituting touch_major");
        }
        log::info!(
            "tracking_id: {}..{}",
            self.tracking_id.minimum,
            self.tracking_id.maximum
        );
    }
}
