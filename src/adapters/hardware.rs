//! ESP32 hardware adapter.
//!
//! Configures the LEDC timer and one LEDC channel per grow light string,
//! plus the supply pump GPIO, using raw ESP-IDF sys calls. Each output is
//! wrapped in a small handle implementing the `embedded-hal` trait the
//! actuator drivers are generic over, then boxed into an [`ActuatorBank`].
//!
//! Also installs the console UART driver so `stdin` blocks for the link
//! reader instead of returning `EWOULDBLOCK`.

use core::fmt;

use embedded_hal::digital::{self, OutputPin};
use embedded_hal::pwm::{self, SetDutyCycle};
use esp_idf_svc::sys::*;
use log::info;

use crate::actuators::{ActuatorBank, Led, SupplyPump};
use crate::config::PeaPodConfig;
use crate::error::{Error, Result};
use crate::pins;

/// Raw `esp_err_t` returned by a failed peripheral call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EspCallFailed(pub i32);

impl fmt::Display for EspCallFailed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "esp_err_t {}", self.0)
    }
}

impl pwm::Error for EspCallFailed {
    fn kind(&self) -> pwm::ErrorKind {
        pwm::ErrorKind::Other
    }
}

impl digital::Error for EspCallFailed {
    fn kind(&self) -> digital::ErrorKind {
        digital::ErrorKind::Other
    }
}

fn check(ret: i32) -> core::result::Result<(), EspCallFailed> {
    if ret == ESP_OK { Ok(()) } else { Err(EspCallFailed(ret)) }
}

// ── LEDC PWM ─────────────────────────────────────────────────

/// One configured LEDC channel on the low-speed timer 0.
pub struct LedcChannel {
    channel: ledc_channel_t,
}

impl LedcChannel {
    fn configure(channel: ledc_channel_t, gpio: u8) -> core::result::Result<Self, EspCallFailed> {
        // SAFETY: called from the single main task before the control loop.
        check(unsafe {
            ledc_channel_config(&ledc_channel_config_t {
                speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
                channel,
                timer_sel: ledc_timer_t_LEDC_TIMER_0,
                gpio_num: i32::from(gpio),
                duty: 0,
                hpoint: 0,
                ..Default::default()
            })
        })?;
        Ok(Self { channel })
    }
}

impl pwm::ErrorType for LedcChannel {
    type Error = EspCallFailed;
}

impl SetDutyCycle for LedcChannel {
    fn max_duty_cycle(&self) -> u16 {
        (1u16 << pins::PWM_RESOLUTION_BITS) - 1
    }

    fn set_duty_cycle(&mut self, duty: u16) -> core::result::Result<(), Self::Error> {
        // SAFETY: the channel was configured in `configure`; only the
        // control loop writes duty registers.
        unsafe {
            check(ledc_set_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, self.channel, u32::from(duty)))?;
            check(ledc_update_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, self.channel))
        }
    }
}

fn configure_ledc_timer(freq_hz: u32) -> core::result::Result<(), EspCallFailed> {
    let timer = ledc_timer_config_t {
        speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
        timer_num: ledc_timer_t_LEDC_TIMER_0,
        duty_resolution: ledc_timer_bit_t_LEDC_TIMER_8_BIT,
        freq_hz,
        clk_cfg: soc_periph_ledc_clk_src_legacy_t_LEDC_AUTO_CLK,
        ..Default::default()
    };
    // SAFETY: single main-task context.
    check(unsafe { ledc_timer_config(&timer) })
}

// ── GPIO output ───────────────────────────────────────────────

pub struct GpioOutput {
    gpio: i32,
}

impl GpioOutput {
    fn configure(gpio: u8) -> core::result::Result<Self, EspCallFailed> {
        let gpio = i32::from(gpio);
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << gpio,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        // SAFETY: single main-task context.
        check(unsafe { gpio_config(&cfg) })?;
        Ok(Self { gpio })
    }

    fn write(&mut self, level: u32) -> core::result::Result<(), EspCallFailed> {
        // SAFETY: the pin was configured as an output in `configure`.
        check(unsafe { gpio_set_level(self.gpio, level) })
    }
}

impl digital::ErrorType for GpioOutput {
    type Error = EspCallFailed;
}

impl OutputPin for GpioOutput {
    fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
        self.write(0)
    }

    fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
        self.write(1)
    }
}

// ── Console UART ──────────────────────────────────────────────

const CONSOLE_UART: uart_port_t = 0;
const CONSOLE_RX_BUF: i32 = 1024;

/// Route console `stdin`/`stdout` through the interrupt-driven UART driver.
///
/// Without the driver the VFS console polls the FIFO and `read` fails
/// with `EWOULDBLOCK` when it is empty. Call once before spawning the
/// link reader.
pub fn install_console_driver() -> Result<()> {
    // SAFETY: single main-task context; no other task owns UART0's driver.
    check(unsafe {
        uart_driver_install(CONSOLE_UART, CONSOLE_RX_BUF, 0, 0, core::ptr::null_mut(), 0)
    })
    .map_err(|_| Error::Init("console UART driver install failed"))?;
    // SAFETY: the driver for CONSOLE_UART was installed above.
    unsafe { esp_vfs_dev_uart_use_driver(CONSOLE_UART) };
    info!("hw: console UART{} in blocking driver mode", CONSOLE_UART);
    Ok(())
}

// ── Bank assembly ─────────────────────────────────────────────

/// Configure every output named in `config` and register it in a bank.
///
/// Nothing is energised here; outputs stay at their reset level until
/// the service initialises the bank.
pub fn build_bank(config: &PeaPodConfig) -> Result<ActuatorBank<'static>> {
    configure_ledc_timer(config.pwm_frequency_hz).map_err(|_| Error::Init("LEDC timer config failed"))?;

    let mut bank = ActuatorBank::new();
    for (i, led) in config.leds.iter().enumerate() {
        let channel = ledc_channel_t_LEDC_CHANNEL_0 + i as ledc_channel_t;
        let pwm = LedcChannel::configure(channel, led.pin).map_err(|_| Error::Init("LEDC channel config failed"))?;
        bank.register(Box::new(Led::new(led.pin, led.color, pwm)))?;
        info!("hw: {} on GPIO{} (LEDC CH{})", led.color.actuator_id(), led.pin, channel);
    }

    let pump = &config.supply_pump;
    let output = GpioOutput::configure(pump.pin).map_err(|_| Error::Init("pump GPIO config failed"))?;
    bank.register(Box::new(SupplyPump::with_polarity(pump.pin, output, pump.polarity)))?;
    info!("hw: supply pump on GPIO{} ({:?})", pump.pin, pump.polarity);

    info!("hw: {} actuator(s) configured at {} Hz PWM", bank.len(), config.pwm_frequency_hz);
    Ok(bank)
}
