//! System constants and user settings

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Display width in pixels (SH8601 AMOLED panel)
pub const DISPLAY_WIDTH: i32 = 368;

/// Display height in pixels
pub const DISPLAY_HEIGHT: i32 = 448;

/// Target interval between navigation-loop ticks (~60 FPS)
pub const UI_TICK_INTERVAL_MS: u64 = 16;

/// Minimum interval between accepted accelerometer samples (20 Hz cap)
pub const ACCEL_SAMPLE_INTERVAL_MS: u64 = 50;

/// Inactivity timeout before the sleep screen (ms)
pub const SLEEP_TIMEOUT_MS: u64 = 30_000;

/// A 16-bit RGB565 color
pub type Rgb565 = u16;

/// Build an RGB565 color from 8-bit channels
pub const fn rgb565(r: u8, g: u8, b: u8) -> Rgb565 {
    (((r & 0xF8) as u16) << 8) | (((g & 0xFC) as u16) << 3) | ((b >> 3) as u16)
}

/// Built-in color themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Theme {
    /// Warm white and gold
    #[default]
    Ivory,
    /// Dark violet and silver
    Violet,
    /// Teal and energy blue
    Teal,
}

/// Resolved color set for a theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ThemeColors {
    pub primary: Rgb565,
    pub secondary: Rgb565,
    pub accent: Rgb565,
    pub background: Rgb565,
    pub text: Rgb565,
    pub shadow: Rgb565,
}

impl Theme {
    /// Color set for this theme
    pub const fn colors(&self) -> ThemeColors {
        match self {
            Theme::Ivory => ThemeColors {
                primary: 0xFFFF,
                secondary: 0xF7DE,
                accent: 0xFFE0,
                background: 0x0000,
                text: 0xFFFF,
                shadow: 0x2104,
            },
            Theme::Violet => ThemeColors {
                primary: 0x8010,
                secondary: 0xC618,
                accent: 0xA015,
                background: 0x0000,
                text: 0xC618,
                shadow: 0x2104,
            },
            Theme::Teal => ThemeColors {
                primary: 0x0679,
                secondary: 0x867F,
                accent: 0x07FF,
                background: 0x0000,
                text: 0xFFFF,
                shadow: 0x2104,
            },
        }
    }
}

/// User-adjustable settings
///
/// Persistence (file/flash storage) is owned by a collaborator; this is
/// only the in-memory representation and its defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Settings {
    /// Display brightness in percent (10-100)
    pub brightness: u8,
    /// Daily step goal
    pub step_goal: u32,
    /// Active color theme
    pub theme: Theme,
    /// Scheduled wake time, minutes from midnight
    pub wake_minutes: u16,
    /// Scheduled sleep time, minutes from midnight
    pub sleep_minutes: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            brightness: 80,
            step_goal: 10_000,
            theme: Theme::default(),
            wake_minutes: 7 * 60,
            sleep_minutes: 22 * 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb565_packing() {
        assert_eq!(rgb565(0xFF, 0xFF, 0xFF), 0xFFFF);
        assert_eq!(rgb565(0xFF, 0, 0), 0xF800);
        assert_eq!(rgb565(0, 0xFF, 0), 0x07E0);
        assert_eq!(rgb565(0, 0, 0xFF), 0x001F);
    }

    #[test]
    fn test_theme_colors_distinct() {
        let themes = [Theme::Ivory, Theme::Violet, Theme::Teal];
        for theme in themes {
            let colors = theme.colors();
            assert_ne!(colors.primary, colors.background);
        }
    }

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.step_goal, 10_000);
        assert!(settings.brightness <= 100);
        assert!(settings.wake_minutes < settings.sleep_minutes);
    }
}
