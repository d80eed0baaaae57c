//! ST7789V panel driver: bring-up sequencing and windowed RAM writes.
//!
//! Bring-up is a fixed, fail-fast command list issued once at [`St7789v::init`]
//! and partially re-run on [`St7789v::resume`]. Writes window the
//! controller's RAM with CASET/RASET and stream pixel rows in as few
//! transactions as the source buffer's stride allows.

use embedded_graphics_core::geometry::{OriginDimensions, Size};
use embedded_hal::digital::OutputPin;
use log::{debug, error, info};

use crate::config::{Capabilities, Config, Orientation, PixelFormat};
use crate::error::Error;
use crate::interface::{BufferDescriptor, Clock, Dbi, HardReset};
use crate::{PIXEL_FORMAT, PIXEL_SIZE};

// Reset and settle timing. Hardware and software reset are alternative
// paths; exactly one settle applies per bring-up.
const RESET_PULSE_MS: u32 = 6;
const HARD_RESET_SETTLE_MS: u32 = 20;
const SOFT_RESET_SETTLE_MS: u32 = 5;
const SLEEP_OUT_SETTLE_MS: u32 = 120;

// ST7789V commands
#[allow(dead_code)]
mod cmd {
    pub const SW_RESET: u8 = 0x01;
    pub const SLEEP_IN: u8 = 0x10;
    pub const SLEEP_OUT: u8 = 0x11;
    pub const INV_OFF: u8 = 0x20;
    pub const INV_ON: u8 = 0x21;
    pub const GAMSET: u8 = 0x26;
    pub const DISP_OFF: u8 = 0x28;
    pub const DISP_ON: u8 = 0x29;
    pub const CASET: u8 = 0x2a;
    pub const RASET: u8 = 0x2b;
    pub const RAMWR: u8 = 0x2c;
    pub const MADCTL: u8 = 0x36;
    pub const COLMOD: u8 = 0x3a;
    pub const RAMCTRL: u8 = 0xb0;
    pub const RGBCTRL: u8 = 0xb1;
    pub const PORCTRL: u8 = 0xb2;
    pub const GCTRL: u8 = 0xb7;
    pub const DGMEN: u8 = 0xba;
    pub const VCOMS: u8 = 0xbb;
    pub const LCMCTRL: u8 = 0xc0;
    pub const VDVVRHEN: u8 = 0xc2;
    pub const VRH: u8 = 0xc3;
    pub const VDS: u8 = 0xc4;
    pub const FRCTRL2: u8 = 0xc6;
    pub const PWCTRL1: u8 = 0xd0;
    pub const PVGAMCTRL: u8 = 0xe0;
    pub const NVGAMCTRL: u8 = 0xe1;
    pub const CMD2EN: u8 = 0xdf;
}

/// ST7789V driver over a [`Dbi`] transport.
///
/// `supply` is an optional panel supply-enable line, driven active once
/// during bring-up. All methods block on the calling thread; callers
/// serialize access to an instance themselves.
pub struct St7789v<DBI, SUPPLY, CLK> {
    dbi: DBI,
    supply: Option<SUPPLY>,
    clock: CLK,
    config: Config,
    // Absolute instant after which the controller accepts commands,
    // anchored at construction so earlier init work is not re-waited.
    ready_deadline_ms: u64,
    x_offset: u16,
    y_offset: u16,
}

impl<DBI, SUPPLY, CLK> St7789v<DBI, SUPPLY, CLK>
where
    DBI: Dbi,
    SUPPLY: OutputPin,
    CLK: Clock,
{
    /// Attach to the controller. No bus traffic happens here; the ready
    /// deadline starts counting from this call.
    pub fn new(dbi: DBI, supply: Option<SUPPLY>, mut clock: CLK, config: Config) -> Self {
        let ready_deadline_ms = clock.now_ms() + u64::from(config.ready_time_ms);
        let x_offset = config.x_offset;
        let y_offset = config.y_offset;

        Self {
            dbi,
            supply,
            clock,
            config,
            ready_deadline_ms,
            x_offset,
            y_offset,
        }
    }

    /// Release the transport, supply pin and clock.
    pub fn release(self) -> (DBI, Option<SUPPLY>, CLK) {
        (self.dbi, self.supply, self.clock)
    }

    /// Run the full bring-up sequence: readiness checks, reset,
    /// blanking on, configuration, sleep out.
    ///
    /// Fail-fast: the first error aborts the sequence and leaves the
    /// panel in an undefined state; recovery is a fresh `init`. The
    /// panel stays blanked afterwards until [`Self::blanking_off`].
    pub fn init(&mut self) -> Result<(), Error<DBI::Error>> {
        if !self.dbi.is_ready() {
            error!("display transport not ready");
            return Err(Error::NotReady);
        }

        if let Some(supply) = self.supply.as_mut() {
            info!("enabling supply");
            supply.set_high().map_err(|_| Error::NotReady)?;
        }

        self.clock.sleep_until_ms(self.ready_deadline_ms);

        if let Err(e) = self.reset_display() {
            error!("failed to reset display ({e})");
            return Err(e);
        }

        if let Err(e) = self.blanking_on() {
            error!("failed to turn blanking on ({e})");
            return Err(e);
        }

        if let Err(e) = self.lcd_init() {
            error!("failed to configure display ({e})");
            return Err(e);
        }

        if let Err(e) = self.exit_sleep() {
            error!("failed to exit the sleep mode ({e})");
            return Err(e);
        }

        Ok(())
    }

    /// Blank the panel (DISPOFF).
    pub fn blanking_on(&mut self) -> Result<(), Error<DBI::Error>> {
        self.transmit(cmd::DISP_OFF, &[])
    }

    /// Unblank the panel (DISPON).
    pub fn blanking_off(&mut self) -> Result<(), Error<DBI::Error>> {
        self.transmit(cmd::DISP_ON, &[])
    }

    /// Move the logical origin inside the controller's RAM. Applied to
    /// every subsequent write window.
    pub fn set_lcd_margins(&mut self, x_offset: u16, y_offset: u16) {
        self.x_offset = x_offset;
        self.y_offset = y_offset;
    }

    /// Transfer a rectangular region from `buf` into panel RAM.
    ///
    /// Caller contract (debug-asserted): `desc.width <= desc.pitch` and
    /// `desc.pitch * PIXEL_SIZE * desc.height <= desc.buf_size <= buf.len()`.
    /// A release build proceeds unchecked.
    ///
    /// When `pitch == width` the whole region goes out as one
    /// transaction. A padded buffer (`pitch > width`) is sent one row
    /// per transaction so the controller never sees the padding; rows
    /// already written stay written if a later chunk fails.
    pub fn write(
        &mut self,
        x: u16,
        y: u16,
        desc: &BufferDescriptor,
        buf: &[u8],
    ) -> Result<(), Error<DBI::Error>> {
        debug_assert!(desc.width <= desc.pitch, "pitch is smaller than width");
        debug_assert!(
            desc.pitch as usize * PIXEL_SIZE * desc.height as usize <= desc.buf_size,
            "input buffer too small"
        );
        debug_assert!(desc.buf_size <= buf.len(), "input buffer too small");

        debug!(
            "writing {}x{} (w,h) @ {}x{} (x,y)",
            desc.width, desc.height, x, y
        );

        self.set_mem_area(x, y, desc.width, desc.height)?;

        let (write_h, nbr_of_writes) = if desc.pitch > desc.width {
            (1u16, desc.height)
        } else {
            (desc.height, 1u16)
        };

        // The transport requires pitch == width, so each transaction
        // carries exactly the logical bytes of its rows.
        let chunk = BufferDescriptor {
            buf_size: desc.width as usize * write_h as usize * PIXEL_SIZE,
            width: desc.width,
            height: write_h,
            pitch: desc.width,
        };
        let src_stride = desc.pitch as usize * PIXEL_SIZE;

        self.transmit(cmd::RAMWR, &[])?;

        let mut start = 0usize;
        for _ in 0..nbr_of_writes {
            self.dbi
                .write_display(&buf[start..start + chunk.buf_size], &chunk, PIXEL_FORMAT)
                .map_err(Error::Transport)?;
            start += src_stride;
        }

        Ok(())
    }

    /// Fixed resolution and the single supported format/orientation.
    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            x_resolution: self.config.width,
            y_resolution: self.config.height,
            supported_pixel_formats: PIXEL_FORMAT,
            current_pixel_format: PIXEL_FORMAT,
            current_orientation: Orientation::Normal,
        }
    }

    /// Only the build-selected format is accepted; anything else is
    /// rejected without bus traffic.
    pub fn set_pixel_format(&mut self, format: PixelFormat) -> Result<(), Error<DBI::Error>> {
        if format == PIXEL_FORMAT {
            return Ok(());
        }
        error!("pixel format change not implemented");
        Err(Error::NotSupported)
    }

    /// Only [`Orientation::Normal`] is accepted; anything else is
    /// rejected without bus traffic.
    pub fn set_orientation(&mut self, orientation: Orientation) -> Result<(), Error<DBI::Error>> {
        if orientation == Orientation::Normal {
            return Ok(());
        }
        error!("changing display orientation not implemented");
        Err(Error::NotSupported)
    }

    /// Low-power suspend: sleep in, no settle wait.
    pub fn suspend(&mut self) -> Result<(), Error<DBI::Error>> {
        self.transmit(cmd::SLEEP_IN, &[])
    }

    /// Resume from suspend: sleep out plus the mandatory settle wait.
    pub fn resume(&mut self) -> Result<(), Error<DBI::Error>> {
        self.exit_sleep()
    }

    fn transmit(&mut self, op: u8, data: &[u8]) -> Result<(), Error<DBI::Error>> {
        self.dbi.write_command(op, data).map_err(Error::Transport)
    }

    // Ordered (command, payload) steps, first error wins.
    fn run_steps(&mut self, steps: &[(u8, &[u8])]) -> Result<(), Error<DBI::Error>> {
        steps
            .iter()
            .try_for_each(|&(op, data)| self.transmit(op, data))
    }

    fn reset_display(&mut self) -> Result<(), Error<DBI::Error>> {
        debug!("resetting display");

        self.clock.delay_ms(1);
        match self.dbi.reset(RESET_PULSE_MS)? {
            HardReset::Supported => self.clock.delay_ms(HARD_RESET_SETTLE_MS),
            HardReset::Unsupported => {
                self.transmit(cmd::SW_RESET, &[])?;
                self.clock.delay_ms(SOFT_RESET_SETTLE_MS);
            }
        }

        Ok(())
    }

    fn exit_sleep(&mut self) -> Result<(), Error<DBI::Error>> {
        self.transmit(cmd::SLEEP_OUT, &[])?;
        self.clock.delay_ms(SLEEP_OUT_SETTLE_MS);
        Ok(())
    }

    fn lcd_init(&mut self) -> Result<(), Error<DBI::Error>> {
        use core::slice::from_ref;

        let c = self.config.clone();

        let head: [(u8, &[u8]); 6] = [
            (cmd::CMD2EN, &c.cmd2en_param),
            (cmd::PORCTRL, &c.porch_param),
            // digital gamma disabled, frame rate at the default
            (cmd::DGMEN, &[0x00]),
            (cmd::FRCTRL2, &[0x0f]),
            (cmd::GCTRL, from_ref(&c.gctrl)),
            (cmd::VCOMS, from_ref(&c.vcom)),
        ];
        self.run_steps(&head)?;

        if let Some((vrh, vdv)) = c.vdv_vrh {
            let vrh = [vrh];
            let vdv = [vdv];
            let steps: [(u8, &[u8]); 3] =
                [(cmd::VDVVRHEN, &[0x01]), (cmd::VRH, &vrh), (cmd::VDS, &vdv)];
            self.run_steps(&steps)?;
        }

        let inversion = if c.inversion_on {
            cmd::INV_ON
        } else {
            cmd::INV_OFF
        };
        let tail: [(u8, &[u8]); 10] = [
            (cmd::PWCTRL1, &c.pwctrl1_param),
            (cmd::MADCTL, from_ref(&c.mdac)),
            (cmd::COLMOD, from_ref(&c.colmod)),
            (cmd::LCMCTRL, from_ref(&c.lcm)),
            (cmd::GAMSET, from_ref(&c.gamma)),
            (inversion, &[]),
            (cmd::PVGAMCTRL, &c.pvgam_param),
            (cmd::NVGAMCTRL, &c.nvgam_param),
            (cmd::RAMCTRL, &c.ram_param),
            (cmd::RGBCTRL, &c.rgb_param),
        ];
        self.run_steps(&tail)
    }

    fn set_mem_area(
        &mut self,
        x: u16,
        y: u16,
        w: u16,
        h: u16,
    ) -> Result<(), Error<DBI::Error>> {
        let ram_x = x + self.x_offset;
        let ram_y = y + self.y_offset;

        // begin/end pairs, controller-native big endian
        let mut span = [0u8; 4];
        span[..2].copy_from_slice(&ram_x.to_be_bytes());
        span[2..].copy_from_slice(&(ram_x + w - 1).to_be_bytes());
        self.transmit(cmd::CASET, &span)?;

        span[..2].copy_from_slice(&ram_y.to_be_bytes());
        span[2..].copy_from_slice(&(ram_y + h - 1).to_be_bytes());
        self.transmit(cmd::RASET, &span)
    }
}

impl<DBI, SUPPLY, CLK> OriginDimensions for St7789v<DBI, SUPPLY, CLK> {
    fn size(&self) -> Size {
        Size::new(u32::from(self.config.width), u32::from(self.config.height))
    }
}
