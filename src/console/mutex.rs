//! Console mutex: the one gate in front of the shared output channel.
//!
//! The writer lives *inside* the lock, so nothing reaches the channel
//! without holding it. Two ways in:
//!
//! - [`ConsoleMutex::try_lock`]: zero-timeout. The sensing task's event
//!   handler uses it and drops its line when the console is busy.
//! - [`ConsoleMutex::lock`]: waits indefinitely. The console task brackets
//!   every multi-line sequence with it (the "mute" of the sensing output).
//!
//! Release is the guard's `Drop`, so every exit path unmutes.
//!
//! ```text
//!  SensingTask ── try_lock ──┐
//!                            ├──▶ ConsoleMutex<W> ──▶ UART / stdout
//!  ConsoleTask ──── lock ────┘
//! ```

use core::fmt;
use core::ops::{Deref, DerefMut};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::{Mutex, MutexGuard};

use crate::app::ports::CharOutput;

/// Mutual exclusion around the operator output channel `W`.
pub struct ConsoleMutex<W> {
    inner: Mutex<CriticalSectionRawMutex, W>,
}

impl<W> ConsoleMutex<W> {
    /// Wrap the output channel. Create this before either task writes.
    pub const fn new(out: W) -> Self {
        Self {
            inner: Mutex::new(out),
        }
    }

    /// Acquire without waiting. `None` if the other task holds the console.
    pub fn try_lock(&self) -> Option<ConsoleGuard<'_, W>> {
        self.inner.try_lock().ok().map(|guard| ConsoleGuard { guard })
    }

    /// Acquire, parking the calling thread until the holder releases.
    pub fn lock(&self) -> ConsoleGuard<'_, W> {
        let guard = futures_lite::future::block_on(self.inner.lock());
        ConsoleGuard { guard }
    }

    /// Take the channel back out (tests, shutdown).
    pub fn into_inner(self) -> W {
        self.inner.into_inner()
    }
}

/// Exclusive access to the output channel; released on drop.
pub struct ConsoleGuard<'a, W> {
    guard: MutexGuard<'a, CriticalSectionRawMutex, W>,
}

impl<W> Deref for ConsoleGuard<'_, W> {
    type Target = W;

    fn deref(&self) -> &W {
        &self.guard
    }
}

impl<W> DerefMut for ConsoleGuard<'_, W> {
    fn deref_mut(&mut self) -> &mut W {
        &mut self.guard
    }
}

impl<W: fmt::Write> fmt::Write for ConsoleGuard<'_, W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.guard.write_str(s)
    }

    fn write_char(&mut self, c: char) -> fmt::Result {
        self.guard.write_char(c)
    }
}

impl<W: CharOutput> CharOutput for ConsoleGuard<'_, W> {
    fn write_byte(&mut self, byte: u8) -> fmt::Result {
        self.guard.write_byte(byte)
    }
}
