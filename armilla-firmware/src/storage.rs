//! Flash-persisted touch calibration
//!
//! The calibration record lives in the last flash sector, written by a
//! factory calibration routine. A missing or corrupt record falls back
//! to the factory defaults inside `CalibrationRecord::effective`.

use armilla_core::config::{CalibrationRecord, TouchCalibration};
use embassy_rp::flash::{Blocking, Flash};
use embassy_rp::peripherals::FLASH;

pub const FLASH_SIZE: usize = 2 * 1024 * 1024;

/// Record offset: last 4KB sector
const CALIBRATION_OFFSET: u32 = (FLASH_SIZE - 4096) as u32;

/// Upper bound on the encoded record size
const RECORD_BUF_LEN: usize = 64;

/// Read the persisted calibration, falling back to defaults
pub fn load_calibration(flash: &mut Flash<'_, FLASH, Blocking, FLASH_SIZE>) -> TouchCalibration {
    let mut buf = [0u8; RECORD_BUF_LEN];
    if flash.blocking_read(CALIBRATION_OFFSET, &mut buf).is_err() {
        #[cfg(feature = "defmt")]
        defmt::warn!("calibration read failed, using defaults");
        return TouchCalibration::default();
    }

    match CalibrationRecord::decode(&buf) {
        Ok(record) => record.effective(),
        Err(_) => {
            #[cfg(feature = "defmt")]
            defmt::info!("no stored calibration, using defaults");
            TouchCalibration::default()
        }
    }
}
