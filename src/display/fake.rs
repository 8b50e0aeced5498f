use std::time::Duration;

use super::matrix::{LedMatrix, MATRIX_SIZE, Rgb, Rotation, in_bounds};

const SIZE: usize = MATRIX_SIZE as usize;

/// Every call the timer made against the panel, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    SetPixel(u8, u8, Rgb),
    Clear,
    Message(String),
    LowLight(bool),
    Rotation(Rotation),
}

/// In-memory panel that records calls for assertions.
#[derive(Debug, Default)]
pub struct FakeMatrix {
    pub frame: [[Rgb; SIZE]; SIZE],
    pub calls: Vec<Call>,
    /// Simulated scroll time per message
    pub message_time: Duration,
}

impl FakeMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Message(text) => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn lit(&self) -> Vec<(u8, u8)> {
        let mut lit = Vec::new();
        for y in 0..MATRIX_SIZE {
            for x in 0..MATRIX_SIZE {
                if !self.pixel(x, y).is_off() {
                    lit.push((x, y));
                }
            }
        }
        lit
    }
}

impl LedMatrix for FakeMatrix {
    fn set_pixel(&mut self, x: u8, y: u8, color: Rgb) {
        self.calls.push(Call::SetPixel(x, y, color));
        if in_bounds(x, y) {
            self.frame[y as usize][x as usize] = color;
        }
    }

    fn pixel(&self, x: u8, y: u8) -> Rgb {
        if !in_bounds(x, y) {
            return Rgb::OFF;
        }
        self.frame[y as usize][x as usize]
    }

    fn clear(&mut self) {
        self.calls.push(Call::Clear);
        self.frame = [[Rgb::OFF; SIZE]; SIZE];
    }

    async fn show_message(&mut self, text: &str, _scroll_speed: Duration) {
        self.calls.push(Call::Message(text.to_string()));
        if !self.message_time.is_zero() {
            tokio::time::sleep(self.message_time).await;
        }
    }

    fn set_low_light(&mut self, enabled: bool) {
        self.calls.push(Call::LowLight(enabled));
    }

    fn set_rotation(&mut self, rotation: Rotation) {
        self.calls.push(Call::Rotation(rotation));
    }
}
