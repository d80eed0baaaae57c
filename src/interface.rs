// Collaborator seams: the command/data transport and the time source.
// The driver is written against these traits only; `spi::SpiDbi` is the
// bundled transport for plain 4-wire SPI wiring.

use embedded_hal::delay::DelayNs;

use crate::config::PixelFormat;

/// Geometry of one pixel transfer.
///
/// `pitch` is the row stride of the source buffer in pixels; it may
/// exceed `width` when the buffer carries row padding the controller
/// must not see. `buf_size` is the number of valid bytes, at least
/// `pitch * bytes_per_pixel * height`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BufferDescriptor {
    pub buf_size: usize,
    pub width: u16,
    pub height: u16,
    pub pitch: u16,
}

/// Outcome of the hardware-reset probe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HardReset {
    /// A reset pulse was driven on the hardware line.
    Supported,
    /// No reset line is wired; the caller falls back to software reset.
    Unsupported,
}

/// MIPI DBI style command/data transport.
///
/// Implementations serialize their own bus access but give no
/// reentrancy guarantee; the driver never calls them concurrently.
pub trait Dbi {
    type Error: core::fmt::Debug;

    /// Readiness probe, checked once before bring-up starts.
    fn is_ready(&mut self) -> bool {
        true
    }

    /// Write a command byte followed by its parameter bytes.
    fn write_command(&mut self, cmd: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Stream pixel data for a region previously windowed by the caller.
    /// `desc.pitch` always equals `desc.width` here; the driver chunks
    /// padded buffers into per-row transfers before calling this.
    fn write_display(
        &mut self,
        buf: &[u8],
        desc: &BufferDescriptor,
        format: PixelFormat,
    ) -> Result<(), Self::Error>;

    /// Pulse the hardware reset line for `pulse_ms`, or report that no
    /// such line exists. Never issues bus commands.
    fn reset(&mut self, pulse_ms: u32) -> Result<HardReset, Self::Error>;
}

/// Blocking time source.
///
/// Extends `DelayNs` with a monotonic millisecond clock so settle waits
/// can be anchored to an absolute deadline instead of compounding
/// relative sleeps.
pub trait Clock: DelayNs {
    /// Milliseconds since an arbitrary fixed epoch (typically boot).
    fn now_ms(&mut self) -> u64;

    /// Block until the given instant; returns immediately if it has
    /// already passed.
    fn sleep_until_ms(&mut self, deadline_ms: u64) {
        let now = self.now_ms();
        if deadline_ms > now {
            self.delay_ms((deadline_ms - now) as u32);
        }
    }
}
