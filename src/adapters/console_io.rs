//! Operator channel adapters.
//!
//! | Target   | Input ([`CharInput`])            | Output (`fmt::Write`)       |
//! |----------|----------------------------------|-----------------------------|
//! | ESP-IDF  | `UartInput`: console UART RX     | `UartOutput`: console UART TX |
//! | host     | `StdinInput`: stdin reader thread| `StdoutOutput`: stdout      |
//!
//! The host terminal is line-buffered, so `StdinInput` turns each line
//! into keystrokes when it is consumed. A line taken by a key poll that holds
//! a single character is that key alone; anything else, and every line taken
//! by a value read, is delivered byte-for-byte followed by `\r`. That makes
//! `r⏎ 2.5⏎`, `r⏎ 5⏎` and `r2.5⏎` all work as on the UART.

use core::fmt;
use core::time::Duration;

use crate::app::ports::{CharInput, CharOutput, RxPoll};

/// Blocking read over a fallible single-byte receive.
///
/// `read` returns `Ok(None)` on timeout and `Err(rc)` on a driver error.
/// Errors are logged and retried after `backoff`; the UART has no
/// end-of-input, so this only returns a byte.
#[cfg_attr(not(target_os = "espidf"), allow(dead_code))]
fn read_retrying(mut read: impl FnMut() -> Result<Option<u8>, i32>, backoff: Duration) -> u8 {
    loop {
        match read() {
            Ok(Some(b)) => return b,
            Ok(None) => {}
            Err(rc) => {
                log::warn!("console uart read failed (rc={}), retrying", rc);
                std::thread::sleep(backoff);
            }
        }
    }
}

// ───────────────────────────────────────────────────────────────
// ESP-IDF: console UART
// ───────────────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
mod uart {
    use super::*;
    use crate::pins;
    use esp_idf_svc::sys::{uart_read_bytes, uart_write_bytes, TickType_t};

    /// Receive side of the console UART. The driver is installed by
    /// [`init_console_uart`](crate::drivers::hw_init::init_console_uart).
    pub struct UartInput;

    impl UartInput {
        fn read(&mut self, ticks: TickType_t) -> Result<Option<u8>, i32> {
            let mut byte = 0u8;
            // SAFETY: one-byte buffer on the stack; the driver was installed at boot.
            let n = unsafe {
                uart_read_bytes(pins::CONSOLE_UART_NUM, (&raw mut byte).cast(), 1, ticks)
            };
            match n {
                1 => Ok(Some(byte)),
                0 => Ok(None),
                rc => Err(rc),
            }
        }
    }

    impl CharInput for UartInput {
        fn poll_byte(&mut self) -> RxPoll {
            match self.read(0) {
                Ok(Some(b)) => RxPoll::Byte(b),
                Ok(None) => RxPoll::Empty,
                Err(rc) => {
                    log::trace!("console uart read failed (rc={})", rc);
                    RxPoll::Empty
                }
            }
        }

        fn read_byte(&mut self) -> Option<u8> {
            Some(read_retrying(|| self.read(TickType_t::MAX), READ_ERROR_BACKOFF))
        }
    }

    const READ_ERROR_BACKOFF: Duration = Duration::from_millis(10);

    /// Transmit side of the console UART. `\n` goes out as `\r\n`.
    pub struct UartOutput;

    impl UartOutput {
        fn send(bytes: &[u8]) -> fmt::Result {
            // SAFETY: the slice outlives the call; the driver copies into its TX ring.
            let n = unsafe {
                uart_write_bytes(pins::CONSOLE_UART_NUM, bytes.as_ptr().cast(), bytes.len())
            };
            if n < 0 { Err(fmt::Error) } else { Ok(()) }
        }
    }

    impl fmt::Write for UartOutput {
        fn write_str(&mut self, s: &str) -> fmt::Result {
            let mut lines = s.split('\n');
            if let Some(first) = lines.next() {
                Self::send(first.as_bytes())?;
            }
            for line in lines {
                Self::send(b"\r\n")?;
                Self::send(line.as_bytes())?;
            }
            Ok(())
        }
    }

    impl CharOutput for UartOutput {
        fn write_byte(&mut self, byte: u8) -> fmt::Result {
            Self::send(&[byte])
        }
    }
}

#[cfg(target_os = "espidf")]
pub use uart::{UartInput, UartOutput};

// ───────────────────────────────────────────────────────────────
// Host: stdin / stdout
// ───────────────────────────────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
mod host {
    use super::*;
    use std::collections::VecDeque;
    use std::io::{BufRead, Write as _};
    use std::sync::mpsc::{self, Receiver, TryRecvError};

    /// Keystrokes derived from stdin lines. Closes at end-of-file.
    pub struct StdinInput {
        rx: Receiver<Vec<u8>>,
        pending: VecDeque<u8>,
    }

    impl StdinInput {
        /// Start the background reader over the process's stdin.
        pub fn spawn() -> std::io::Result<Self> {
            Self::spawn_from(std::io::BufReader::new(std::io::stdin()))
        }

        /// Start the background reader over any line source.
        pub fn spawn_from(reader: impl BufRead + Send + 'static) -> std::io::Result<Self> {
            let (tx, rx) = mpsc::channel();
            std::thread::Builder::new()
                .name("stdin-reader".into())
                .spawn(move || {
                    for line in reader.split(b'\n') {
                        let Ok(line) = line else { break };
                        if tx.send(line).is_err() {
                            break;
                        }
                    }
                    log::debug!("stdin: end of input");
                })?;
            Ok(Self {
                rx,
                pending: VecDeque::new(),
            })
        }

        /// Queue one terminal line as keystrokes. A value line always ends
        /// with Enter; a key line of one character is the bare key.
        fn queue(&mut self, mut line: Vec<u8>, as_value: bool) {
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            if as_value || line.len() != 1 {
                line.push(b'\r');
            }
            self.pending.extend(line);
        }
    }

    impl CharInput for StdinInput {
        fn poll_byte(&mut self) -> RxPoll {
            if self.pending.is_empty() {
                match self.rx.try_recv() {
                    Ok(line) => self.queue(line, false),
                    Err(TryRecvError::Empty) => return RxPoll::Empty,
                    Err(TryRecvError::Disconnected) => return RxPoll::Closed,
                }
            }
            self.pending.pop_front().map_or(RxPoll::Empty, RxPoll::Byte)
        }

        fn read_byte(&mut self) -> Option<u8> {
            if self.pending.is_empty() {
                let line = self.rx.recv().ok()?;
                self.queue(line, true);
            }
            self.pending.pop_front()
        }
    }

    /// Operator output on stdout, flushed on every write so prompts and
    /// echoes appear immediately.
    #[derive(Default)]
    pub struct StdoutOutput;

    impl StdoutOutput {
        fn send(bytes: &[u8]) -> fmt::Result {
            let mut out = std::io::stdout().lock();
            out.write_all(bytes).map_err(|_| fmt::Error)?;
            out.flush().map_err(|_| fmt::Error)
        }
    }

    impl fmt::Write for StdoutOutput {
        fn write_str(&mut self, s: &str) -> fmt::Result {
            Self::send(s.as_bytes())
        }
    }

    impl CharOutput for StdoutOutput {
        fn write_byte(&mut self, byte: u8) -> fmt::Result {
            Self::send(&[byte])
        }
    }
}

#[cfg(not(target_os = "espidf"))]
pub use host::{StdinInput, StdoutOutput};
