//! ANSI terminal display backend
//!
//! Development stand-in for the AMOLED panel: renders the UI as text
//! over UART to any terminal emulator. Pixel coordinates are mapped
//! onto a character grid, colors are dropped, rectangles become blocks
//! of '#'. Good enough to drive the whole navigation stack on a bare
//! board.

use core::fmt::Write as _;

use armilla_core::config::{Rgb565, DISPLAY_HEIGHT, DISPLAY_WIDTH};
use armilla_core::traits::{Display, DisplayError};
use embedded_io::Write;
use heapless::String;

/// Character cell size in panel pixels
const CELL_W: i32 = 8;
const CELL_H: i32 = 16;

pub struct TermDisplay<W> {
    uart: W,
}

impl<W: Write> TermDisplay<W> {
    pub fn new(uart: W) -> Self {
        Self { uart }
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        self.uart.write_all(bytes).map_err(|_| DisplayError::Bus)
    }

    /// Move the terminal cursor to the cell containing (x, y)
    fn move_to(&mut self, x: i32, y: i32) -> Result<(), DisplayError> {
        let mut seq: String<16> = String::new();
        // ANSI cursor addressing is 1-based
        write!(seq, "\x1b[{};{}H", y / CELL_H + 1, x / CELL_W + 1)
            .map_err(|_| DisplayError::Bus)?;
        self.write_bytes(seq.as_bytes())
    }

    fn check_bounds(x: i32, y: i32) -> Result<(), DisplayError> {
        if x < 0 || y < 0 || x >= DISPLAY_WIDTH || y >= DISPLAY_HEIGHT {
            return Err(DisplayError::OutOfBounds);
        }
        Ok(())
    }
}

impl<W: Write> Display for TermDisplay<W> {
    fn clear(&mut self, _color: Rgb565) -> Result<(), DisplayError> {
        self.write_bytes(b"\x1b[2J\x1b[H")
    }

    fn fill_rect(
        &mut self,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        _color: Rgb565,
    ) -> Result<(), DisplayError> {
        Self::check_bounds(x, y)?;
        let cols = (w / CELL_W).max(1);
        let rows = (h / CELL_H).max(1);
        for row in 0..rows {
            self.move_to(x, y + row * CELL_H)?;
            for _ in 0..cols {
                self.write_bytes(b"#")?;
            }
        }
        Ok(())
    }

    fn text(&mut self, x: i32, y: i32, text: &str, _color: Rgb565) -> Result<(), DisplayError> {
        Self::check_bounds(x, y)?;
        self.move_to(x, y)?;
        self.write_bytes(text.as_bytes())
    }

    fn present(&mut self) -> Result<(), DisplayError> {
        self.uart.flush().map_err(|_| DisplayError::Bus)
    }
}
