//! Analog clock face drawn on the 8x8 panel.
//!
//! The twelve ring pixels stand for the hour marks around a 2x2 centre face.
//! Completed work phases are shown as checkmarks in the four corners.

use crate::display::matrix::{LedMatrix, Rgb};

pub const RING_POSITIONS: usize = 12;

/// Ring pixels in clockwise order, starting just right of twelve o'clock.
pub const RING: [(u8, u8); RING_POSITIONS] = [
    (4, 2),
    (5, 2),
    (5, 3),
    (5, 4),
    (5, 5),
    (4, 5),
    (3, 5),
    (2, 5),
    (2, 4),
    (2, 3),
    (2, 2),
    (3, 2),
];

pub const FACE: [(u8, u8); 4] = [(3, 3), (4, 3), (3, 4), (4, 4)];

/// Corner pixels, lit in this order as work phases complete.
pub const CHECKS: [(u8, u8); 4] = [(0, 0), (7, 0), (0, 7), (7, 7)];

/// Number of ring positions lit at `fraction`.
///
/// Position `i` lights once `fraction >= (i + 1) / 12`, so a fresh timer
/// starts with an empty ring and a finished one shows all twelve marks.
pub fn lit_ring_positions(fraction: f64) -> usize {
    let fraction = if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) };
    (1..=RING_POSITIONS)
        .take_while(|mark| fraction >= *mark as f64 / RING_POSITIONS as f64)
        .count()
}

/// Light the ring up to `fraction`. Never turns a pixel off.
pub fn render_ring<D: LedMatrix>(display: &mut D, fraction: f64, color: Rgb) {
    for &(x, y) in RING.iter().take(lit_ring_positions(fraction)) {
        if display.pixel(x, y) != color {
            display.set_pixel(x, y, color);
        }
    }
}

pub fn clear_ring<D: LedMatrix>(display: &mut D) {
    for &(x, y) in RING.iter() {
        display.set_pixel(x, y, Rgb::OFF);
    }
}

pub fn render_face<D: LedMatrix>(display: &mut D, color: Rgb) {
    for &(x, y) in FACE.iter() {
        display.set_pixel(x, y, color);
    }
}

/// Light one corner per completed work phase, up to four.
pub fn render_checks<D: LedMatrix>(display: &mut D, completed: u8, color: Rgb) {
    for &(x, y) in CHECKS.iter().take(completed as usize) {
        display.set_pixel(x, y, color);
    }
}
