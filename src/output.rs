//! Register the virtual pointer with uinput and deliver transformed frames
//! to it.

use evdevil::event::{Abs, AbsEvent, InputEvent, Key, KeyEvent, KeyState};
use evdevil::uinput::{AbsSetup, UinputDevice};
use evdevil::{AbsInfo, InputProp};

use crate::caps::Capabilities;
use crate::input::event::{syn_event, SYN_MT_REPORT, SYN_REPORT};
use crate::pointer::{Edge, PointerOptions, PointerUpdate, AXES_PER_FINGER, MAX_FINGERS};

const DEVICE_NAME: &str = "mtpad Pointer";

/// Create the uinput pointer device, with axis ranges taken from the
/// queried capabilities.
pub fn create_pointer_device(
    caps: &Capabilities,
    opts: PointerOptions,
) -> Result<UinputDevice, Box<dyn std::error::Error + Send + Sync>> {
    // Swapping axes swaps which device range backs each output axis.
    let (x_range, y_range) = if opts.swap_xy {
        (caps.position_y, caps.position_x)
    } else {
        (caps.position_x, caps.position_y)
    };
    // Tracking ids at or above the output slot count are filtered out by
    // the transform, so don't advertise them either.
    let id_max = caps.tracking_id.maximum.min(MAX_FINGERS as i32 - 1);

    let axes = [
        AbsSetup::new(Abs::X, AbsInfo::new(x_range.minimum, x_range.maximum)),
        AbsSetup::new(Abs::Y, AbsInfo::new(y_range.minimum, y_range.maximum)),
        AbsSetup::new(
            Abs::MT_POSITION_X,
            AbsInfo::new(x_range.minimum, x_range.maximum),
        ),
        AbsSetup::new(
            Abs::MT_POSITION_Y,
            AbsInfo::new(y_range.minimum, y_range.maximum),
        ),
        AbsSetup::new(
            Abs::MT_TOUCH_MAJOR,
            AbsInfo::new(caps.touch_major.minimum, caps.touch_major.maximum),
        ),
        AbsSetup::new(
            Abs::MT_TOUCH_MINOR,
            AbsInfo::new(caps.touch_minor.minimum, caps.touch_minor.maximum),
        ),
        AbsSetup::new(
            Abs::MT_TRACKING_ID,
            AbsInfo::new(caps.tracking_id.minimum, id_max),
        ),
    ];

    let device = UinputDevice::builder()?
        .with_props([InputProp::POINTER])?
        .with_abs_axes(axes)?
        .with_keys([Key::BTN_LEFT, Key::BTN_TOUCH])?
        .build(DEVICE_NAME)?;
    Ok(device)
}

/// Send one transformed frame to the virtual device as a single batch.
///
/// Motion goes out before any press edge so clients see position data
/// before the button down; a frame with neither motion nor edge writes
/// nothing at all.
pub fn emit_update(
    device: &UinputDevice,
    update: &PointerUpdate,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut batch: Vec<InputEvent> =
        Vec::with_capacity((AXES_PER_FINGER + 1) * update.num_fingers() + 5);

    if update.motion() {
        for finger in update.valuators().chunks(AXES_PER_FINGER) {
            batch.push(AbsEvent::new(Abs::MT_POSITION_X, finger[0]).into());
            batch.push(AbsEvent::new(Abs::MT_POSITION_Y, finger[1]).into());
            batch.push(AbsEvent::new(Abs::MT_TOUCH_MAJOR, finger[2]).into());
            batch.push(AbsEvent::new(Abs::MT_TOUCH_MINOR, finger[3]).into());
            batch.push(AbsEvent::new(Abs::MT_TRACKING_ID, finger[4]).into());
            batch.push(syn_event(SYN_MT_REPORT));
        }
        // Single-pointer clients track the first contact.
        let v = update.valuators();
        batch.push(AbsEvent::new(Abs::X, v[0]).into());
        batch.push(AbsEvent::new(Abs::Y, v[1]).into());
    }

    match update.edge {
        Some(Edge::Press) => {
            batch.push(KeyEvent::new(Key::BTN_TOUCH, KeyState::PRESSED).into());
            batch.push(KeyEvent::new(Key::BTN_LEFT, KeyState::PRESSED).into());
        }
        Some(Edge::Release) => {
            batch.push(KeyEvent::new(Key::BTN_TOUCH, KeyState::RELEASED).into());
            batch.push(KeyEvent::new(Key::BTN_LEFT, KeyState::RELEASED).into());
        }
        None => {}
    }

    if batch.is_empty() {
        return Ok(());
    }
    batch.push(syn_event(SYN_REPORT));
    device.write(&batch)?;
    Ok(())
}
