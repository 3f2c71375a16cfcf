//! One-shot hardware peripheral initialization.
//!
//! Configures the indicator LEDs, the radar wingboard's control lines and
//! SPI bus, and the console UART using raw ESP-IDF sys calls. Each function
//! is called once during startup, before the tasks it serves begin.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    GpioConfigFailed(i32),
    SpiBusInitFailed(i32),
    SpiDeviceAddFailed(i32),
    UartInitFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GpioConfigFailed(rc)   => write!(f, "GPIO config failed (rc={})", rc),
            Self::SpiBusInitFailed(rc)   => write!(f, "SPI bus init failed (rc={})", rc),
            Self::SpiDeviceAddFailed(rc) => write!(f, "SPI device add failed (rc={})", rc),
            Self::UartInitFailed(rc)     => write!(f, "console UART init failed (rc={})", rc),
        }
    }
}

impl std::error::Error for HwInitError {}

// ── Radar transport ───────────────────────────────────────────

/// Pins and clock for the radar wingboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RadarHwConfig {
    pub spi_mosi: i32,
    pub spi_miso: i32,
    pub spi_clk: i32,
    pub spi_cs: i32,
    pub reset: i32,
    pub ldo_en: i32,
    pub irq: i32,
    pub spi_frequency_hz: u32,
}

impl RadarHwConfig {
    /// Board pin map at the given SPI clock.
    pub const fn board(spi_frequency_hz: u32) -> Self {
        Self {
            spi_mosi: pins::RADAR_SPI_MOSI_GPIO,
            spi_miso: pins::RADAR_SPI_MISO_GPIO,
            spi_clk: pins::RADAR_SPI_CLK_GPIO,
            spi_cs: pins::RADAR_SPI_CS_GPIO,
            reset: pins::RADAR_RESET_GPIO,
            ldo_en: pins::RADAR_LDO_EN_GPIO,
            irq: pins::RADAR_IRQ_GPIO,
            spi_frequency_hz,
        }
    }
}

/// A configured radar bus, handed to the sensing engine at construction.
#[derive(Debug)]
pub struct RadarTransport {
    pub config: RadarHwConfig,
    #[cfg(target_os = "espidf")]
    pub device: SpiDevice,
}

/// Raw SPI device handle.
#[cfg(target_os = "espidf")]
#[derive(Debug)]
pub struct SpiDevice(pub spi_device_handle_t);

// SAFETY: the handle is an opaque token owned by exactly one engine; the
// SPI master driver serialises transactions on it internally.
#[cfg(target_os = "espidf")]
unsafe impl Send for SpiDevice {}

#[cfg(target_os = "espidf")]
use log::info;

// ── GPIO helpers ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn config_output(pin: i32, level: bool) -> Result<(), HwInitError> {
    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pin,
        mode: gpio_mode_t_GPIO_MODE_OUTPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    let ret = unsafe { gpio_config(&cfg) };
    if ret != ESP_OK as i32 { return Err(HwInitError::GpioConfigFailed(ret)); }
    unsafe { gpio_set_level(pin, u32::from(level)) };
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: gpio_set_level writes to an already-configured output pin.
    // Each LED pin is owned by one GpioOutput, so writes never race.
    unsafe { gpio_set_level(pin, u32::from(high)); }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(_pin: i32, _high: bool) {}

// ── Indicator LEDs ────────────────────────────────────────────

/// Configure R/G/B as outputs, all off.
#[cfg(target_os = "espidf")]
pub fn init_indicator_outputs() -> Result<(), HwInitError> {
    // SAFETY: called once from the startup path before any GpioOutput exists.
    unsafe {
        for pin in [pins::LED_R_GPIO, pins::LED_G_GPIO, pins::LED_B_GPIO] {
            config_output(pin, false)?;
        }
    }
    info!("hw_init: indicator LEDs configured (all off)");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_indicator_outputs() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): indicator LEDs R={} G={} B={} off",
        pins::LED_R_GPIO, pins::LED_G_GPIO, pins::LED_B_GPIO);
    Ok(())
}

// ── Radar control lines + SPI ─────────────────────────────────

#[cfg(target_os = "espidf")]
const RADAR_SPI_HOST: spi_host_device_t = spi_host_device_t_SPI2_HOST;

/// Bring up the radar wingboard: reset released, LDO on, IRQ input,
/// manual chip-select idle HIGH, SPI mode 0 at `cfg.spi_frequency_hz`.
#[cfg(target_os = "espidf")]
pub fn init_radar_transport(cfg: &RadarHwConfig) -> Result<RadarTransport, HwInitError> {
    // SAFETY: called once from the sensing task's setup; nothing else
    // touches these pins or the SPI2 host.
    unsafe {
        config_output(cfg.reset, true)?;
        config_output(cfg.ldo_en, true)?;
        config_output(cfg.spi_cs, true)?;

        let irq = gpio_config_t {
            pin_bit_mask: 1u64 << cfg.irq,
            mode: gpio_mode_t_GPIO_MODE_INPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_ENABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = gpio_config(&irq);
        if ret != ESP_OK as i32 { return Err(HwInitError::GpioConfigFailed(ret)); }

        let bus = spi_bus_config_t {
            __bindgen_anon_1: spi_bus_config_t__bindgen_ty_1 { mosi_io_num: cfg.spi_mosi },
            __bindgen_anon_2: spi_bus_config_t__bindgen_ty_2 { miso_io_num: cfg.spi_miso },
            sclk_io_num: cfg.spi_clk,
            __bindgen_anon_3: spi_bus_config_t__bindgen_ty_3 { quadwp_io_num: -1 },
            __bindgen_anon_4: spi_bus_config_t__bindgen_ty_4 { quadhd_io_num: -1 },
            max_transfer_sz: 4096,
            ..Default::default()
        };
        let ret = spi_bus_initialize(RADAR_SPI_HOST, &bus, spi_common_dma_t_SPI_DMA_CH_AUTO);
        if ret != ESP_OK as i32 { return Err(HwInitError::SpiBusInitFailed(ret)); }

        // CS stays under manual control, so the driver gets none.
        let dev_cfg = spi_device_interface_config_t {
            mode: 0,
            clock_speed_hz: cfg.spi_frequency_hz as i32,
            spics_io_num: -1,
            queue_size: 1,
            ..Default::default()
        };
        let mut handle: spi_device_handle_t = core::ptr::null_mut();
        let ret = spi_bus_add_device(RADAR_SPI_HOST, &dev_cfg, &mut handle);
        if ret != ESP_OK as i32 { return Err(HwInitError::SpiDeviceAddFailed(ret)); }

        info!("hw_init: radar SPI at {} Hz, CS={} RST={} LDO={} IRQ={}",
            cfg.spi_frequency_hz, cfg.spi_cs, cfg.reset, cfg.ldo_en, cfg.irq);
        Ok(RadarTransport { config: *cfg, device: SpiDevice(handle) })
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn init_radar_transport(cfg: &RadarHwConfig) -> Result<RadarTransport, HwInitError> {
    log::info!("hw_init(sim): radar transport skipped (SPI {} Hz)", cfg.spi_frequency_hz);
    Ok(RadarTransport { config: *cfg })
}

// ── Console UART ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
const UART_RX_BUF: i32 = 256;

/// Install the UART driver used by the operator console (8N1).
#[cfg(target_os = "espidf")]
pub fn init_console_uart() -> Result<(), HwInitError> {
    // SAFETY: called once from main() before either task starts.
    unsafe {
        let cfg = uart_config_t {
            baud_rate: pins::CONSOLE_UART_BAUD as i32,
            data_bits: uart_word_length_t_UART_DATA_8_BITS,
            parity: uart_parity_t_UART_PARITY_DISABLE,
            stop_bits: uart_stop_bits_t_UART_STOP_BITS_1,
            flow_ctrl: uart_hw_flowcontrol_t_UART_HW_FLOWCTRL_DISABLE,
            ..Default::default()
        };
        let ret = uart_param_config(pins::CONSOLE_UART_NUM, &cfg);
        if ret != ESP_OK as i32 { return Err(HwInitError::UartInitFailed(ret)); }

        let ret = uart_set_pin(
            pins::CONSOLE_UART_NUM,
            pins::CONSOLE_UART_TX_GPIO,
            pins::CONSOLE_UART_RX_GPIO,
            -1,
            -1,
        );
        if ret != ESP_OK as i32 { return Err(HwInitError::UartInitFailed(ret)); }

        let ret = uart_driver_install(
            pins::CONSOLE_UART_NUM,
            UART_RX_BUF,
            0,
            0,
            core::ptr::null_mut(),
            0,
        );
        if ret != ESP_OK as i32 { return Err(HwInitError::UartInitFailed(ret)); }
    }
    info!("hw_init: console UART{} at {} baud", pins::CONSOLE_UART_NUM, pins::CONSOLE_UART_BAUD);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_console_uart() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): console on stdin/stdout");
    Ok(())
}
