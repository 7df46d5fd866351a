//! System configuration parameters
//!
//! Pin map and timing for the PeaPod actuator board.
//! Values can be overridden via NVS; see [`NvsAdapter`](crate::adapters::nvs::NvsAdapter).

use heapless::Vec;
use serde::{Deserialize, Serialize};

use crate::actuators::{LedColor, Polarity};
use crate::app::ports::ConfigError;
use crate::pins;

/// Maximum number of LED channels on the board.
pub const MAX_LED_CHANNELS: usize = LedColor::ALL.len();

/// One PWM-dimmed LED string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedChannelConfig {
    pub pin: u8,
    pub color: LedColor,
}

/// A digital on/off load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnOffConfig {
    pub pin: u8,
    pub polarity: Polarity,
}

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeaPodConfig {
    // --- Outputs ---
    /// LED channels, one per colour.
    pub leds: Vec<LedChannelConfig, MAX_LED_CHANNELS>,
    /// Supply pump output.
    pub supply_pump: OnOffConfig,

    // --- PWM ---
    /// LEDC base frequency for all LED channels (Hz).
    pub pwm_frequency_hz: u32,

    // --- Timing ---
    /// Control loop interval (milliseconds)
    pub control_loop_interval_ms: u32,
    /// Host silence after which every actuator is switched off
    /// (milliseconds, 0 = never).
    pub host_timeout_ms: u32,
}

impl Default for PeaPodConfig {
    fn default() -> Self {
        let leds = [
            (pins::LED_BLUE_PIN, LedColor::Blue),
            (pins::LED_COOL_PIN, LedColor::CoolWhite),
            (pins::LED_WARM_PIN, LedColor::WarmWhite),
            (pins::LED_RED_PIN, LedColor::Red),
            (pins::LED_FAR_PIN, LedColor::FarRed),
        ]
        .into_iter()
        .map(|(pin, color)| LedChannelConfig { pin, color })
        .collect();

        Self {
            leds,
            supply_pump: OnOffConfig {
                pin: pins::SUPPLY_PUMP_PIN,
                polarity: Polarity::ActiveHigh,
            },
            pwm_frequency_hz: pins::LED_PWM_FREQ_HZ,
            control_loop_interval_ms: 50, // 20 Hz
            host_timeout_ms: 30_000,
        }
    }
}

impl PeaPodConfig {
    /// Range- and consistency-check every field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (i, led) in self.leds.iter().enumerate() {
            for other in &self.leds[i + 1..] {
                if led.color == other.color {
                    return Err(ConfigError::ValidationFailed("duplicate LED colour"));
                }
                if led.pin == other.pin {
                    return Err(ConfigError::ValidationFailed("duplicate LED pin"));
                }
            }
            if led.pin == self.supply_pump.pin {
                return Err(ConfigError::ValidationFailed(
                    "supply pump pin shared with an LED channel",
                ));
            }
        }
        if !(100..=40_000).contains(&self.pwm_frequency_hz) {
            return Err(ConfigError::ValidationFailed(
                "pwm_frequency_hz must be 100–40000",
            ));
        }
        if !(10..=1000).contains(&self.control_loop_interval_ms) {
            return Err(ConfigError::ValidationFailed(
                "control_loop_interval_ms must be 10–1000",
            ));
        }
        if self.host_timeout_ms != 0 {
            if !(1_000..=3_600_000).contains(&self.host_timeout_ms) {
                return Err(ConfigError::ValidationFailed(
                    "host_timeout_ms must be 0 or 1000–3600000",
                ));
            }
            if self.host_timeout_ms <= self.control_loop_interval_ms {
                return Err(ConfigError::ValidationFailed(
                    "host_timeout_ms must exceed control_loop_interval_ms",
                ));
            }
        }
        Ok(())
    }

    pub fn led_for(&self, color: LedColor) -> Option<&LedChannelConfig> {
        self.leds.iter().find(|l| l.color == color)
    }
}
