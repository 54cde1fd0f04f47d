//! FT3168 capacitive touch controller
//!
//! Self-capacitance panel controller on I2C. The chip exposes the
//! current contact count and the first contact's raw 12-bit position in
//! a small register block; polling that block each UI tick is the whole
//! protocol. Raw coordinates are mapped to panel pixels through the
//! persisted calibration.

use armilla_core::config::TouchCalibration;
use armilla_core::input::TouchSample;
use armilla_core::traits::TouchSampleSource;
use embedded_hal::i2c::I2c;

/// Fixed bus address
pub const FT3168_ADDR: u8 = 0x38;

/// TD_STATUS: low nibble is the contact count
const REG_TD_STATUS: u8 = 0x02;

/// TD_STATUS through P1_YL, read in one burst
const REPORT_LEN: usize = 5;

/// Extract a 12-bit coordinate from its high/low register pair
pub const fn unpack_coord(high: u8, low: u8) -> u16 {
    (((high & 0x0F) as u16) << 8) | low as u16
}

pub struct Ft3168<I2C> {
    i2c: I2C,
    address: u8,
    calibration: TouchCalibration,
    /// Contact state from the previous poll, for release edges
    pressed: bool,
    last_x: i32,
    last_y: i32,
}

impl<I2C: I2c> Ft3168<I2C> {
    pub fn new(i2c: I2C, calibration: TouchCalibration) -> Self {
        Self {
            i2c,
            address: FT3168_ADDR,
            calibration,
            pressed: false,
            last_x: 0,
            last_y: 0,
        }
    }

    /// Read the contact-report block
    fn read_report(&mut self) -> Result<[u8; REPORT_LEN], I2C::Error> {
        let mut buf = [0u8; REPORT_LEN];
        self.i2c.write_read(self.address, &[REG_TD_STATUS], &mut buf)?;
        Ok(buf)
    }
}

impl<I2C: I2c> TouchSampleSource for Ft3168<I2C> {
    /// Poll the controller once
    ///
    /// Bus errors yield `None`; the previous contact state is kept so a
    /// transient NAK mid-press does not fabricate a release.
    fn poll(&mut self, now_ms: u64) -> Option<TouchSample> {
        let report = self.read_report().ok()?;
        let contacts = report[0] & 0x0F;

        if contacts > 0 {
            let raw_x = unpack_coord(report[1], report[2]);
            let raw_y = unpack_coord(report[3], report[4]);
            let (x, y) = self.calibration.map(raw_x as i32, raw_y as i32);
            self.pressed = true;
            self.last_x = x;
            self.last_y = y;
            Some(TouchSample::contact(x, y, now_ms))
        } else if self.pressed {
            // Finger lifted since the last poll
            self.pressed = false;
            Some(TouchSample::release(now_ms))
        } else {
            None
        }
    }
}
