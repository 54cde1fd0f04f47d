//! QMI8658 six-axis IMU, accelerometer side only
//!
//! The part sits at one of two bus addresses depending on the SA0 pin,
//! so `init` probes both. Only the accelerometer is enabled; the gyro
//! stays powered down.

use armilla_core::config::ACCEL_SAMPLE_INTERVAL_MS;
use armilla_core::motion::AccelSample;
use armilla_core::traits::AccelSampleSource;
use embedded_hal::i2c::I2c;

pub const QMI8658_ADDR_PRIMARY: u8 = 0x6A;
pub const QMI8658_ADDR_SECONDARY: u8 = 0x6B;

const REG_WHO_AM_I: u8 = 0x00;
const WHO_AM_I_VALUE: u8 = 0x05;
/// Serial interface config: address auto-increment
const REG_CTRL1: u8 = 0x02;
const CTRL1_AUTO_INC: u8 = 0x40;
/// Accelerometer config: full-scale and output data rate
const REG_CTRL2: u8 = 0x03;
/// +/-4g full scale, 125 Hz ODR
const CTRL2_ACCEL_4G_125HZ: u8 = 0x15;
/// Sensor enable flags
const REG_CTRL7: u8 = 0x08;
const CTRL7_ACCEL_EN: u8 = 0x01;
/// AX_L, first of six little-endian acceleration bytes
const REG_AX_L: u8 = 0x35;

/// LSB per g at +/-4g full scale
const ACCEL_LSB_PER_G: f32 = 8192.0;

/// Raw count to g
pub fn raw_to_g(raw: i16) -> f32 {
    raw as f32 / ACCEL_LSB_PER_G
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ImuError<E> {
    /// I2C transaction failed
    Bus(E),
    /// Neither bus address answered with the expected chip id
    NotDetected,
}

impl<E> From<E> for ImuError<E> {
    fn from(err: E) -> Self {
        ImuError::Bus(err)
    }
}

pub struct Qmi8658<I2C> {
    i2c: I2C,
    address: u8,
    /// Timestamp of the last delivered sample
    last_sample_ms: Option<u64>,
}

impl<I2C: I2c> Qmi8658<I2C> {
    /// Probe the bus and configure the accelerometer
    pub fn init(i2c: I2C) -> Result<Self, ImuError<I2C::Error>> {
        let mut imu = Self { i2c, address: QMI8658_ADDR_PRIMARY, last_sample_ms: None };

        if !imu.probe()? {
            imu.address = QMI8658_ADDR_SECONDARY;
            if !imu.probe()? {
                return Err(ImuError::NotDetected);
            }
        }

        imu.write_reg(REG_CTRL1, CTRL1_AUTO_INC)?;
        imu.write_reg(REG_CTRL2, CTRL2_ACCEL_4G_125HZ)?;
        imu.write_reg(REG_CTRL7, CTRL7_ACCEL_EN)?;
        Ok(imu)
    }

    fn probe(&mut self) -> Result<bool, I2C::Error> {
        let mut id = [0u8; 1];
        // A NAK here just means "not at this address"
        match self.i2c.write_read(self.address, &[REG_WHO_AM_I], &mut id) {
            Ok(()) => Ok(id[0] == WHO_AM_I_VALUE),
            Err(_) => Ok(false),
        }
    }

    fn write_reg(&mut self, reg: u8, value: u8) -> Result<(), I2C::Error> {
        self.i2c.write(self.address, &[reg, value])
    }

    /// Read the three acceleration axes
    fn read_accel(&mut self) -> Result<(i16, i16, i16), I2C::Error> {
        let mut buf = [0u8; 6];
        self.i2c.write_read(self.address, &[REG_AX_L], &mut buf)?;
        Ok((
            i16::from_le_bytes([buf[0], buf[1]]),
            i16::from_le_bytes([buf[2], buf[3]]),
            i16::from_le_bytes([buf[4], buf[5]]),
        ))
    }
}

impl<I2C: I2c> AccelSampleSource for Qmi8658<I2C> {
    /// Poll the accelerometer, rate-limited to the sampling interval
    ///
    /// Callers may poll every UI tick; samples come back at most once
    /// per `ACCEL_SAMPLE_INTERVAL_MS`. Bus errors yield `None`.
    fn poll(&mut self, now_ms: u64) -> Option<AccelSample> {
        if let Some(last) = self.last_sample_ms {
            if now_ms.saturating_sub(last) < ACCEL_SAMPLE_INTERVAL_MS {
                return None;
            }
        }

        let (raw_x, raw_y, raw_z) = self.read_accel().ok()?;
        self.last_sample_ms = Some(now_ms);
        Some(AccelSample::new(
            raw_to_g(raw_x),
            raw_to_g(raw_y),
            raw_to_g(raw_z),
            now_ms,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{ErrorKind, ErrorType, Operation};

    #[derive(Debug)]
    struct MockError;

    impl embedded_hal::i2c::Error for MockError {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    /// Answers WHO_AM_I at one address and replays fixed accel data
    struct MockBus {
        present_at: u8,
        accel: [u8; 6],
    }

    impl ErrorType for MockBus {
        type Error = MockError;
    }

    impl I2c for MockBus {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), MockError> {
            if address != self.present_at {
                return Err(MockError);
            }
            let mut reg = 0u8;
            for op in operations {
                match op {
                    Operation::Write(bytes) => {
                        if let Some(&first) = bytes.first() {
                            reg = first;
                        }
                    }
                    Operation::Read(buf) => match reg {
                        REG_WHO_AM_I => buf[0] = WHO_AM_I_VALUE,
                        REG_AX_L => buf.copy_from_slice(&self.accel),
                        _ => {}
                    },
                }
            }
            Ok(())
        }
    }

    fn accel_bytes(x: i16, y: i16, z: i16) -> [u8; 6] {
        let [xl, xh] = x.to_le_bytes();
        let [yl, yh] = y.to_le_bytes();
        let [zl, zh] = z.to_le_bytes();
        [xl, xh, yl, yh, zl, zh]
    }

    #[test]
    fn test_raw_to_g_scaling() {
        assert_eq!(raw_to_g(8192), 1.0);
        assert_eq!(raw_to_g(-8192), -1.0);
        assert_eq!(raw_to_g(0), 0.0);
        assert_eq!(raw_to_g(4096), 0.5);
    }

    #[test]
    fn test_init_probes_secondary_address() {
        let bus = MockBus { present_at: QMI8658_ADDR_SECONDARY, accel: [0; 6] };
        let imu = Qmi8658::init(bus).unwrap();
        assert_eq!(imu.address, QMI8658_ADDR_SECONDARY);
    }

    #[test]
    fn test_poll_scales_and_timestamps() {
        let bus = MockBus {
            present_at: QMI8658_ADDR_PRIMARY,
            accel: accel_bytes(0, 0, 8192),
        };
        let mut imu = Qmi8658::init(bus).unwrap();

        let sample = imu.poll(100).unwrap();
        assert_eq!(sample.timestamp_ms, 100);
        assert_eq!(sample.z, 1.0);
        assert_eq!(sample.x, 0.0);
    }

    #[test]
    fn test_poll_rate_limited() {
        let bus = MockBus {
            present_at: QMI8658_ADDR_PRIMARY,
            accel: accel_bytes(0, 0, 8192),
        };
        let mut imu = Qmi8658::init(bus).unwrap();

        assert!(imu.poll(0).is_some());
        assert!(imu.poll(16).is_none());
        assert!(imu.poll(49).is_none());
        assert!(imu.poll(50).is_some());
    }
}
