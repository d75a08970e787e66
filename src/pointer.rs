//! Contact-to-pointer gesture transform: axis remap, contact filtering,
//! press/release edge detection and output valuator packing.

use std::mem;

use crate::caps::Capabilities;
use crate::input::Contact;

/// Contact slots delivered to pointer clients per frame.
pub const MAX_FINGERS: usize = 5;
/// Valuators packed per contact: x, y, touch_major, touch_minor, tracking_id.
pub const AXES_PER_FINGER: usize = 5;

/// Axis remap options. Inversion is applied before the swap, so each
/// inversion uses its own un-swapped axis bounds.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerOptions {
    pub swap_xy: bool,
    pub invert_x: bool,
    pub invert_y: bool,
}

/// A press or release transition of the aggregate touch state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Press,
    Release,
}

/// One transformed frame: the packed valuators plus the optional edge.
#[derive(Debug, Clone, Copy)]
pub struct PointerUpdate {
    valuators: [i32; MAX_FINGERS * AXES_PER_FINGER],
    num_fingers: usize,
    pub edge: Option<Edge>,
}

impl PointerUpdate {
    /// True when a motion update carrying the valuators should go out.
    /// Motion is ordered before any press edge: clients expect position
    /// data before a button down.
    pub fn motion(&self) -> bool {
        self.num_fingers > 0
    }

    pub fn num_fingers(&self) -> usize {
        self.num_fingers
    }

    /// Packed valuators, AXES_PER_FINGER per retained contact.
    pub fn valuators(&self) -> &[i32] {
        &self.valuators[..self.num_fingers * AXES_PER_FINGER]
    }
}

/// Per-session gesture state. The only state carried across frames is
/// whether the previous frame had any contact down; it lives here, not in
/// module globals, so independent device sessions can coexist.
#[derive(Debug, Default)]
pub struct PointerState {
    previous_down: bool,
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transform one completed contact frame into a pointer update.
    pub fn transform(
        &mut self,
        contacts: &[Contact],
        caps: &Capabilities,
        opts: PointerOptions,
    ) -> PointerUpdate {
        let mut valuators = [0i32; MAX_FINGERS * AXES_PER_FINGER];
        let mut at = 0;
        let mut down = 0;

        for contact in contacts {
            // Tracking ids are never remapped, so ids that would overflow
            // the output slot space are dropped rather than truncated.
            if contact.tracking_id >= MAX_FINGERS as i32 {
                continue;
            }

            let mut x = contact.position_x;
            let mut y = contact.position_y;
            if opts.invert_x {
                x = caps.position_x.maximum - x + caps.position_x.minimum;
            }
            if opts.invert_y {
                y = caps.position_y.maximum - y + caps.position_y.minimum;
            }
            if opts.swap_xy {
                mem::swap(&mut x, &mut y);
            }

            valuators[at] = x;
            valuators[at + 1] = y;
            valuators[at + 2] = contact.touch_major;
            // Clients always receive a value in the minor slot.
            valuators[at + 3] = if caps.has_touch_minor {
                contact.touch_minor
            } else {
                contact.touch_major
            };
            valuators[at + 4] = contact.tracking_id;
            at += AXES_PER_FINGER;

            down += 1;
            if down >= MAX_FINGERS {
                break;
            }
        }

        let is_down = down > 0;
        let edge = match (is_down, self.previous_down) {
            (true, false) => Some(Edge::Press),
            (false, true) => Some(Edge::Release),
            _ => None,
        };
        self.previous_down = is_down;

        PointerUpdate {
            valuators,
            num_fingers: down,
            edge,
        }
    }
}
