//! Open the touch character device, optionally grabbing it exclusively so
//! the desktop session doesn't also interpret the raw contacts.

use std::fs::File;
use std::io::{self, Read};
use std::os::unix::io::{AsRawFd, RawFd};
use std::path::Path;

use nix::errno::Errno;
use nix::request_code_write;

pub struct TouchDevice {
    file: File,
    grabbed: bool,
}

// EVIOCGRAB: the int argument is 1 to acquire, 0 to release.
fn grab_ioctl(fd: RawFd, acquire: bool) -> io::Result<()> {
    let req = request_code_write!(b'E', 0x90, std::mem::size_of::<libc::c_int>());
    let res = unsafe { libc::ioctl(fd, req as _, acquire as libc::c_int) };
    Errno::result(res).map_err(io::Error::from)?;
    Ok(())
}

impl TouchDevice {
    /// Open the device read-only. The blocking bulk read stays the single
    /// suspension point of the processing loop, so O_NONBLOCK is not set.
    pub fn open(path: &Path, grab: bool) -> io::Result<Self> {
        let file = File::open(path)?;
        if grab {
            grab_ioctl(file.as_raw_fd(), true)?;
            log::debug!("grabbed {} exclusively", path.display());
        }
        Ok(Self {
            file,
            grabbed: grab,
        })
    }

    pub fn fd(&self) -> RawFd {
        self.file.as_raw_fd()
    }
}

impl Read for TouchDevice {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }
}

impl Drop for TouchDevice {
    fn drop(&mut self) {
        if self.grabbed {
            if let Err(e) = grab_ioctl(self.file.as_raw_fd(), false) {
                log::warn!("failed to release device grab: {}", e);
            }
        }
    }
}
