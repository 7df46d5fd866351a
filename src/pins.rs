//! GPIO / peripheral pin assignments for the PeaPod actuator board.
//!
//! Single source of truth for the default wiring. The runtime pin map
//! lives in [`PeaPodConfig`](crate::config::PeaPodConfig), which starts
//! from these values.

// ---------------------------------------------------------------------------
// Grow light LED channels (constant-current drivers, PWM dim input)
// ---------------------------------------------------------------------------

/// PWM dim input, blue (450 nm) channel.
pub const LED_BLUE_PIN: u8 = 4;
/// PWM dim input, cool white channel.
pub const LED_COOL_PIN: u8 = 5;
/// PWM dim input, warm white channel.
pub const LED_WARM_PIN: u8 = 6;
/// PWM dim input, red (660 nm) channel.
pub const LED_RED_PIN: u8 = 7;
/// PWM dim input, far-red (730 nm) channel.
pub const LED_FAR_PIN: u8 = 15;

// ---------------------------------------------------------------------------
// Pumps (MOSFET low-side switch)
// ---------------------------------------------------------------------------

/// Digital output: supply pump, HIGH = running.
pub const SUPPLY_PUMP_PIN: u8 = 16;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// LEDC timer resolution (bits). 8-bit gives 0 – 255 duty levels.
pub const PWM_RESOLUTION_BITS: u32 = 8;
/// LEDC base frequency for the LED drivers' dim inputs.
pub const LED_PWM_FREQ_HZ: u32 = 1_000;
