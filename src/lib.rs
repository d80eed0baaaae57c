//! Blocking no_std driver for the Sitronix ST7789V LCD controller.
//!
//! The driver brings the panel out of reset into a known electrical and
//! pixel-format state, then streams rectangular pixel regions from caller
//! owned buffers into the controller's RAM with the minimal number of bus
//! transactions.
//!
//! Hardware access goes through two seams:
//! - [`Dbi`]: a MIPI DBI style command/data transport (a ready-made 4-wire
//!   SPI implementation is provided in [`spi::SpiDbi`]),
//! - [`Clock`]: blocking relative and absolute-deadline sleeps.
//!
//! The on-wire pixel format is fixed at build time through the `rgb565`
//! (default), `bgr565` or `rgb888` cargo feature. Runtime format and
//! orientation changes are rejected with [`Error::NotSupported`].
//!
//! All operations are synchronous and perform no internal locking; the
//! caller must serialize access to a driver instance.

#![no_std]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod driver;
pub mod error;
pub mod interface;
pub mod spi;

pub use config::{Capabilities, Config, Orientation, PixelFormat};
pub use driver::St7789v;
pub use error::Error;
pub use interface::{BufferDescriptor, Clock, Dbi, HardReset};

#[cfg(all(feature = "rgb565", feature = "bgr565"))]
compile_error!("pixel format features `rgb565` and `bgr565` are mutually exclusive");
#[cfg(all(feature = "rgb565", feature = "rgb888"))]
compile_error!("pixel format features `rgb565` and `rgb888` are mutually exclusive");
#[cfg(all(feature = "bgr565", feature = "rgb888"))]
compile_error!("pixel format features `bgr565` and `rgb888` are mutually exclusive");
#[cfg(not(any(feature = "rgb565", feature = "bgr565", feature = "rgb888")))]
compile_error!("one of the `rgb565`, `bgr565`, `rgb888` features must be enabled");

/// Pixel format selected at build time.
#[cfg(feature = "rgb565")]
pub const PIXEL_FORMAT: PixelFormat = PixelFormat::Rgb565;
/// Pixel format selected at build time.
#[cfg(feature = "bgr565")]
pub const PIXEL_FORMAT: PixelFormat = PixelFormat::Bgr565;
/// Pixel format selected at build time.
#[cfg(feature = "rgb888")]
pub const PIXEL_FORMAT: PixelFormat = PixelFormat::Rgb888;

/// Bytes per pixel on the wire for the build-selected format.
pub const PIXEL_SIZE: usize = PIXEL_FORMAT.bytes_per_pixel();
