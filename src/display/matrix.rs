use std::fmt;
use std::time::Duration;

/// Width and height of the LED grid.
pub const MATRIX_SIZE: u8 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const OFF: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const GREEN: Rgb = Rgb::new(0, 255, 0);
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);
    pub const TOMATO: Rgb = Rgb::new(255, 99, 71);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn is_off(&self) -> bool {
        *self == Rgb::OFF
    }

    /// Scale every channel to a quarter, the way the panel's low-light mode does.
    pub fn dimmed(self) -> Self {
        Self::new(self.r / 4, self.g / 4, self.b / 4)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Clockwise rotation of the whole panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub fn from_degrees(degrees: u16) -> Option<Self> {
        match degrees {
            0 => Some(Rotation::Deg0),
            90 => Some(Rotation::Deg90),
            180 => Some(Rotation::Deg180),
            270 => Some(Rotation::Deg270),
            _ => None,
        }
    }

    pub fn degrees(&self) -> u16 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// Map a logical pixel to where it lands on the physical panel.
    pub fn apply(&self, x: u8, y: u8) -> (u8, u8) {
        let last = MATRIX_SIZE - 1;
        match self {
            Rotation::Deg0 => (x, y),
            Rotation::Deg90 => (last - y, x),
            Rotation::Deg180 => (last - x, last - y),
            Rotation::Deg270 => (y, last - x),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    #[error("LED matrix unavailable: {0}")]
    Unavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The 8x8 RGB panel the timer draws on.
///
/// Pixel writes never fail once the panel is open; a device that loses a
/// frame is expected to log it and carry on.
#[allow(async_fn_in_trait)]
pub trait LedMatrix {
    fn set_pixel(&mut self, x: u8, y: u8, color: Rgb);

    /// Current colour of a logical pixel. Out of range reads as off.
    fn pixel(&self, x: u8, y: u8) -> Rgb;

    fn clear(&mut self);

    /// Scroll `text` across the panel, returning once it has scrolled off.
    async fn show_message(&mut self, text: &str, scroll_speed: Duration);

    fn set_low_light(&mut self, enabled: bool);

    fn set_rotation(&mut self, rotation: Rotation);
}

pub(crate) fn in_bounds(x: u8, y: u8) -> bool {
    x < MATRIX_SIZE && y < MATRIX_SIZE
}
