//! GPIO / peripheral pin assignments for the radar presence board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Radar wingboard: SPI bus
// ---------------------------------------------------------------------------

pub const RADAR_SPI_MOSI_GPIO: i32 = 6;
pub const RADAR_SPI_MISO_GPIO: i32 = 5;
pub const RADAR_SPI_CLK_GPIO: i32 = 7;
/// Chip-select, driven manually (idle HIGH).
pub const RADAR_SPI_CS_GPIO: i32 = 4;

// ---------------------------------------------------------------------------
// Radar wingboard: control lines
// ---------------------------------------------------------------------------

/// Digital output: radar reset, held HIGH (released) after init.
pub const RADAR_RESET_GPIO: i32 = 8;
/// Digital output: radar LDO enable (active HIGH).
pub const RADAR_LDO_EN_GPIO: i32 = 9;
/// Digital input with pull-down: radar data-ready interrupt.
pub const RADAR_IRQ_GPIO: i32 = 10;

// ---------------------------------------------------------------------------
// Presence indicator (discrete RGB LED, active HIGH)
// ---------------------------------------------------------------------------

/// Lit while an object is present.
pub const LED_R_GPIO: i32 = 11;
/// Lit while the range is empty.
pub const LED_G_GPIO: i32 = 12;
/// Unused by the application; held off.
pub const LED_B_GPIO: i32 = 13;

// ---------------------------------------------------------------------------
// Operator console UART
// ---------------------------------------------------------------------------

pub const CONSOLE_UART_NUM: i32 = 0;
pub const CONSOLE_UART_TX_GPIO: i32 = 43;
pub const CONSOLE_UART_RX_GPIO: i32 = 44;
pub const CONSOLE_UART_BAUD: u32 = 115_200;
