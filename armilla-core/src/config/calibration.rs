//! Touch calibration data types
//!
//! The touch controller reports raw 12-bit coordinates; a persisted
//! linear min/max mapping converts them to display coordinates. The
//! record can be stored to flash and loaded on boot; when no valid
//! record exists the built-in defaults are used instead of failing
//! startup.

use super::types::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Magic number to identify valid calibration data
pub const CALIBRATION_MAGIC: u32 = 0x5443414C; // "TCAL"

/// Current calibration data version
pub const CALIBRATION_VERSION: u8 = 1;

/// Default raw range reported by the FT3168 across the panel
pub const DEFAULT_RAW_MIN: i32 = 100;
pub const DEFAULT_RAW_MAX: i32 = 3900;

/// Linear raw-to-display mapping for one touch panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TouchCalibration {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
}

impl Default for TouchCalibration {
    fn default() -> Self {
        Self {
            min_x: DEFAULT_RAW_MIN,
            max_x: DEFAULT_RAW_MAX,
            min_y: DEFAULT_RAW_MIN,
            max_y: DEFAULT_RAW_MAX,
        }
    }
}

impl TouchCalibration {
    /// Check the mapping is usable (non-degenerate axis spans)
    pub fn is_sane(&self) -> bool {
        self.max_x > self.min_x && self.max_y > self.min_y
    }

    /// Map raw controller coordinates to display coordinates
    ///
    /// The result is clamped to the display surface, so consumers
    /// (the gesture classifier in particular) never see out-of-bounds
    /// positions.
    pub fn map(&self, raw_x: i32, raw_y: i32) -> (i32, i32) {
        let x = map_axis(raw_x, self.min_x, self.max_x, DISPLAY_WIDTH);
        let y = map_axis(raw_y, self.min_y, self.max_y, DISPLAY_HEIGHT);
        (x, y)
    }
}

/// Map one raw axis value onto 0..size-1
fn map_axis(raw: i32, min: i32, max: i32, size: i32) -> i32 {
    if max <= min {
        return 0;
    }
    let scaled = (raw - min) as i64 * size as i64 / (max - min) as i64;
    (scaled as i32).clamp(0, size - 1)
}

/// Persisted calibration record with validation header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CalibrationRecord {
    /// Magic number for validation
    pub magic: u32,
    /// Data format version
    pub version: u8,
    /// The mapping itself
    pub calibration: TouchCalibration,
    /// CRC32 checksum over magic, version and calibration
    pub crc: u32,
}

impl Default for CalibrationRecord {
    fn default() -> Self {
        Self::new(TouchCalibration::default())
    }
}

impl CalibrationRecord {
    /// Create a record ready for persistence (CRC filled in)
    pub fn new(calibration: TouchCalibration) -> Self {
        let mut record = Self {
            magic: CALIBRATION_MAGIC,
            version: CALIBRATION_VERSION,
            calibration,
            crc: 0,
        };
        record.update_crc();
        record
    }

    /// Check magic and version match the current format
    pub fn is_valid(&self) -> bool {
        self.magic == CALIBRATION_MAGIC && self.version == CALIBRATION_VERSION
    }

    /// Calculate CRC32 over everything except the crc field
    pub fn calculate_crc(&self) -> u32 {
        let mut crc: u32 = 0xFFFFFFFF;
        crc = crc32_update(crc, &self.magic.to_le_bytes());
        crc = crc32_update(crc, &[self.version]);
        crc = crc32_update(crc, &self.calibration.min_x.to_le_bytes());
        crc = crc32_update(crc, &self.calibration.max_x.to_le_bytes());
        crc = crc32_update(crc, &self.calibration.min_y.to_le_bytes());
        crc = crc32_update(crc, &self.calibration.max_y.to_le_bytes());
        !crc
    }

    /// Update the CRC field
    pub fn update_crc(&mut self) {
        self.crc = self.calculate_crc();
    }

    /// Verify the CRC is correct
    pub fn verify_crc(&self) -> bool {
        self.crc == self.calculate_crc()
    }

    /// The mapping to actually use
    ///
    /// Falls back to the built-in defaults when the record failed
    /// validation or carries a degenerate mapping. This is the only
    /// place where default substitution, rather than propagation, is
    /// the error policy: a watch with a corrupt calibration blob must
    /// still boot with usable touch.
    pub fn effective(&self) -> TouchCalibration {
        if self.is_valid() && self.verify_crc() && self.calibration.is_sane() {
            self.calibration
        } else {
            TouchCalibration::default()
        }
    }

    /// Serialize to a postcard blob for flash storage
    #[cfg(feature = "serde")]
    pub fn encode<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], postcard::Error> {
        postcard::to_slice(self, buf)
    }

    /// Deserialize from a postcard blob
    #[cfg(feature = "serde")]
    pub fn decode(buf: &[u8]) -> Result<Self, postcard::Error> {
        postcard::from_bytes(buf)
    }
}

/// Simple CRC32 update function (IEEE 802.3 polynomial)
fn crc32_update(crc: u32, data: &[u8]) -> u32 {
    const POLY: u32 = 0xEDB88320;
    let mut crc = crc;

    for &byte in data {
        crc ^= byte as u32;
        for _ in 0..8 {
            if crc & 1 != 0 {
                crc = (crc >> 1) ^ POLY;
            } else {
                crc >>= 1;
            }
        }
    }

    crc
}
