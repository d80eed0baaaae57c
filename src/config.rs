// Static panel configuration — the Rust rendition of the devicetree
// properties the controller is registered with. Everything here is fixed
// at construction; the only runtime-mutable state lives on the driver
// itself (the RAM margin offsets).

/// On-wire pixel encoding understood by the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelFormat {
    /// 16 bpp, red in the high bits.
    Rgb565,
    /// 16 bpp, blue in the high bits.
    Bgr565,
    /// 24 bpp.
    Rgb888,
}

impl PixelFormat {
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Rgb565 | PixelFormat::Bgr565 => 2,
            PixelFormat::Rgb888 => 3,
        }
    }
}

/// Panel mounting orientation. Only `Normal` is implemented; the MADCTL
/// byte in [`Config`] bakes in whatever scan direction the panel needs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Orientation {
    #[default]
    Normal,
    Rotated90,
    Rotated180,
    Rotated270,
}

/// Fixed capabilities reported by [`crate::St7789v::capabilities`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capabilities {
    pub x_resolution: u16,
    pub y_resolution: u16,
    /// The single format this build supports.
    pub supported_pixel_formats: PixelFormat,
    pub current_pixel_format: PixelFormat,
    pub current_orientation: Orientation,
}

/// Immutable controller configuration.
///
/// The parameter arrays carry protocol-mandated lengths; handing the
/// controller a wrong-sized table is a type error, not a runtime one.
#[derive(Clone, Debug)]
pub struct Config {
    /// Panel width in pixels.
    pub width: u16,
    /// Panel height in pixels.
    pub height: u16,

    /// VCOM setting (VCOMS).
    pub vcom: u8,
    /// Gate control (GCTRL).
    pub gctrl: u8,
    /// VRH and VDV register values. The VDVVRHEN/VRH/VDS commands are
    /// issued only when both are configured; there is no partial form.
    pub vdv_vrh: Option<(u8, u8)>,
    /// Memory data access control byte (MADCTL) — scan order, RGB/BGR.
    pub mdac: u8,
    /// Gamma curve selection (GAMSET).
    pub gamma: u8,
    /// Interface pixel format byte (COLMOD). Must agree with the
    /// build-selected [`PixelFormat`].
    pub colmod: u8,
    /// LCM control (LCMCTRL).
    pub lcm: u8,
    /// Issue INVON instead of INVOFF during bring-up.
    pub inversion_on: bool,

    /// Porch timing (PORCTRL).
    pub porch_param: [u8; 5],
    /// Command-2 enable key (CMD2EN).
    pub cmd2en_param: [u8; 4],
    /// Power control 1 (PWCTRL1).
    pub pwctrl1_param: [u8; 2],
    /// Positive voltage gamma table (PVGAMCTRL).
    pub pvgam_param: [u8; 14],
    /// Negative voltage gamma table (NVGAMCTRL).
    pub nvgam_param: [u8; 14],
    /// RAM access control (RAMCTRL).
    pub ram_param: [u8; 2],
    /// RGB interface control (RGBCTRL).
    pub rgb_param: [u8; 3],

    /// RAM offset of the panel's logical origin.
    pub x_offset: u16,
    /// RAM offset of the panel's logical origin.
    pub y_offset: u16,

    /// Time after attach before the controller accepts commands.
    /// Consumed as an absolute deadline anchored at construction.
    pub ready_time_ms: u32,
}

impl Default for Config {
    /// Defaults for a plain 240x320 module with the commonly shipped
    /// register tables.
    fn default() -> Self {
        Self {
            width: 240,
            height: 320,
            vcom: 0x19,
            gctrl: 0x35,
            vdv_vrh: Some((0x12, 0x20)),
            mdac: 0x00,
            gamma: 0x01,
            colmod: 0x55,
            lcm: 0x2c,
            inversion_on: true,
            porch_param: [0x0c, 0x0c, 0x00, 0x33, 0x33],
            cmd2en_param: [0x5a, 0x69, 0x02, 0x01],
            pwctrl1_param: [0xa4, 0xa1],
            pvgam_param: [
                0xd0, 0x04, 0x0d, 0x11, 0x13, 0x2b, 0x3f, 0x54, 0x4c, 0x18, 0x0d, 0x0b, 0x1f,
                0x23,
            ],
            nvgam_param: [
                0xd0, 0x04, 0x0c, 0x11, 0x13, 0x2c, 0x3f, 0x44, 0x51, 0x2f, 0x1f, 0x1f, 0x20,
                0x23,
            ],
            ram_param: [0x00, 0xf0],
            rgb_param: [0xcd, 0x08, 0x14],
            x_offset: 0,
            y_offset: 0,
            ready_time_ms: 0,
        }
    }
}
