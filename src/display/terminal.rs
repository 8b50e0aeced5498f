use std::io::{self, IsTerminal, Stdout, Write};
use std::time::Duration;

use tracing::{debug, warn};

use super::matrix::{DisplayError, LedMatrix, MATRIX_SIZE, Rgb, Rotation, in_bounds};

const SIZE: usize = MATRIX_SIZE as usize;
const MARQUEE_WIDTH: usize = 16;

/// An 8x8 panel drawn into the terminal with 24-bit ANSI colour.
///
/// The grid is redrawn in place on every write; announcements scroll in a
/// marquee line underneath it.
pub struct TerminalMatrix<W: Write = Stdout> {
    out: W,
    frame: [[Rgb; SIZE]; SIZE],
    rotation: Rotation,
    low_light: bool,
    marquee: String,
}

impl TerminalMatrix {
    pub fn open() -> Result<Self, DisplayError> {
        let out = io::stdout();
        let is_terminal = out.is_terminal();
        Self::with_writer(out, is_terminal)
    }
}

impl<W: Write> TerminalMatrix<W> {
    /// Draw into `out`. Anything that is not a terminal cannot show the grid.
    pub fn with_writer(out: W, is_terminal: bool) -> Result<Self, DisplayError> {
        if !is_terminal {
            return Err(DisplayError::Unavailable(
                "stdout is not a terminal".to_string(),
            ));
        }

        let mut matrix = Self {
            out,
            frame: [[Rgb::OFF; SIZE]; SIZE],
            rotation: Rotation::default(),
            low_light: false,
            marquee: String::new(),
        };
        // Clear the screen once and hide the cursor
        write!(matrix.out, "\x1b[2J\x1b[?25l")?;
        matrix.redraw()?;
        Ok(matrix)
    }

    /// The frame as it lands on the panel, after rotation and dimming.
    fn physical(&self) -> [[Rgb; SIZE]; SIZE] {
        let mut physical = [[Rgb::OFF; SIZE]; SIZE];
        for (y, row) in self.frame.iter().enumerate() {
            for (x, color) in row.iter().enumerate() {
                let (px, py) = self.rotation.apply(x as u8, y as u8);
                let color = if self.low_light { color.dimmed() } else { *color };
                physical[py as usize][px as usize] = color;
            }
        }
        physical
    }

    fn screen(&self) -> String {
        let mut screen = String::from("\x1b[H");
        for row in self.physical().iter() {
            for color in row.iter() {
                if color.is_off() {
                    screen.push_str("\x1b[0m\x1b[90m· ");
                } else {
                    screen.push_str(&format!("\x1b[48;2;{};{};{}m  ", color.r, color.g, color.b));
                }
            }
            screen.push_str("\x1b[0m\n");
        }
        screen.push_str(&format!("\n\x1b[2K {}\n", self.marquee));
        screen
    }

    fn redraw(&mut self) -> io::Result<()> {
        let screen = self.screen();
        self.out.write_all(screen.as_bytes())?;
        self.out.flush()
    }

    fn redraw_or_log(&mut self) {
        if let Err(e) = self.redraw() {
            warn!("Failed to draw LED matrix: {}", e);
        }
    }
}

impl<W: Write> LedMatrix for TerminalMatrix<W> {
    fn set_pixel(&mut self, x: u8, y: u8, color: Rgb) {
        if !in_bounds(x, y) {
            warn!("Ignoring pixel outside the matrix: ({}, {})", x, y);
            return;
        }
        self.frame[y as usize][x as usize] = color;
        self.redraw_or_log();
    }

    fn pixel(&self, x: u8, y: u8) -> Rgb {
        if !in_bounds(x, y) {
            return Rgb::OFF;
        }
        self.frame[y as usize][x as usize]
    }

    fn clear(&mut self) {
        self.frame = [[Rgb::OFF; SIZE]; SIZE];
        self.marquee.clear();
        self.redraw_or_log();
    }

    async fn show_message(&mut self, text: &str, scroll_speed: Duration) {
        debug!("Scrolling message: {}", text);
        // Pad both sides so the text enters from the right and leaves on the left
        let padding = " ".repeat(MARQUEE_WIDTH);
        let track: Vec<char> = format!("{padding}{text}{padding}").chars().collect();

        for window in track.windows(MARQUEE_WIDTH) {
            self.marquee = window.iter().collect();
            self.redraw_or_log();
            tokio::time::sleep(scroll_speed).await;
        }

        self.marquee.clear();
        self.redraw_or_log();
    }

    fn set_low_light(&mut self, enabled: bool) {
        self.low_light = enabled;
        self.redraw_or_log();
    }

    fn set_rotation(&mut self, rotation: Rotation) {
        self.rotation = rotation;
        self.redraw_or_log();
    }
}

impl<W: Write> Drop for TerminalMatrix<W> {
    fn drop(&mut self) {
        // Restore the cursor and default colours
        let _ = write!(self.out, "\x1b[0m\x1b[?25h");
        let _ = self.out.flush();
    }
}
