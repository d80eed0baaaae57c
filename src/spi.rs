//! 4-wire SPI implementation of the [`Dbi`] transport.
//!
//! Command/parameter distinction is signalled on a dedicated D/C pin:
//! low for the command byte, high for parameters and pixel data. The
//! hardware reset line is optional; boards without one get the
//! software-reset fallback from the bring-up sequencer.

use display_interface::DisplayError;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

use crate::config::PixelFormat;
use crate::interface::{BufferDescriptor, Dbi, HardReset};

pub struct SpiDbi<SPI, DC, RST, D> {
    spi: SPI,
    dc: DC,
    rst: Option<RST>,
    delay: D,
}

impl<SPI, DC, RST, D> SpiDbi<SPI, DC, RST, D>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    D: DelayNs,
{
    /// `rst` is the active-low hardware reset line, if wired.
    pub fn new(spi: SPI, dc: DC, rst: Option<RST>, delay: D) -> Self {
        Self {
            spi,
            dc,
            rst,
            delay,
        }
    }

    /// Release the bus and pins.
    pub fn release(self) -> (SPI, DC, Option<RST>) {
        (self.spi, self.dc, self.rst)
    }

    fn send_command(&mut self, cmd: u8) -> Result<(), DisplayError> {
        self.dc.set_low().map_err(|_| DisplayError::DCError)?;
        self.spi
            .write(&[cmd])
            .map_err(|_| DisplayError::BusWriteError)?;
        self.dc.set_high().map_err(|_| DisplayError::DCError)
    }

    fn send_data(&mut self, data: &[u8]) -> Result<(), DisplayError> {
        self.dc.set_high().map_err(|_| DisplayError::DCError)?;
        self.spi
            .write(data)
            .map_err(|_| DisplayError::BusWriteError)
    }
}

impl<SPI, DC, RST, D> Dbi for SpiDbi<SPI, DC, RST, D>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    D: DelayNs,
{
    type Error = DisplayError;

    fn write_command(&mut self, cmd: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.send_command(cmd)?;
        if !data.is_empty() {
            self.send_data(data)?;
        }
        Ok(())
    }

    fn write_display(
        &mut self,
        buf: &[u8],
        desc: &BufferDescriptor,
        _format: PixelFormat,
    ) -> Result<(), Self::Error> {
        self.send_data(&buf[..desc.buf_size])
    }

    fn reset(&mut self, pulse_ms: u32) -> Result<HardReset, Self::Error> {
        let Some(rst) = self.rst.as_mut() else {
            return Ok(HardReset::Unsupported);
        };

        rst.set_low().map_err(|_| DisplayError::RSError)?;
        self.delay.delay_ms(pulse_ms);
        rst.set_high().map_err(|_| DisplayError::RSError)?;
        Ok(HardReset::Supported)
    }
}
