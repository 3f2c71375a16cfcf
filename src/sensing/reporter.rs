//! Presence event handler.
//!
//! Runs inside the engine's `process` call, so it must never wait on the
//! console. The indicator is updated first and unconditionally; the status
//! line is printed only if the console mutex is free right now, otherwise
//! it is dropped and counted.

use core::fmt::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::app::events::SensingEvent;
use crate::app::ports::{EventCallback, IndicatorPort};
use crate::console::mutex::ConsoleMutex;

/// Number of status lines dropped because the console was busy.
#[derive(Debug, Clone, Default)]
pub struct DroppedLines(Arc<AtomicU32>);

impl DroppedLines {
    pub fn get(&self) -> u32 {
        self.0.load(Ordering::Relaxed)
    }

    fn bump(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }
}

/// Translates presence events into LED state and status text.
pub struct PresenceReporter<L, W> {
    indicator: L,
    console: Arc<ConsoleMutex<W>>,
    dropped: DroppedLines,
}

impl<L, W> PresenceReporter<L, W>
where
    L: IndicatorPort,
    W: Write,
{
    pub fn new(indicator: L, console: Arc<ConsoleMutex<W>>) -> Self {
        Self {
            indicator,
            console,
            dropped: DroppedLines::default(),
        }
    }

    /// Shared view of the drop counter, usable after the reporter is boxed.
    pub fn dropped_lines(&self) -> DroppedLines {
        self.dropped.clone()
    }

    pub fn indicator(&self) -> &L {
        &self.indicator
    }

    /// Handle one engine event. Non-presence classes are ignored.
    pub fn handle(&mut self, event: &SensingEvent) {
        let Some(presence) = event.presence() else {
            return;
        };

        self.indicator.show(presence.indicator_state());

        match self.console.try_lock() {
            Some(mut out) => {
                let _ = writeln!(out, "{}", presence.status_line());
            }
            None => {
                self.dropped.bump();
                log::trace!("console busy, dropped: {}", presence.status_line());
            }
        }
    }
}

impl<L, W> PresenceReporter<L, W>
where
    L: IndicatorPort + Send + 'static,
    W: Write + Send + 'static,
{
    /// Box the reporter as the engine's event callback.
    pub fn into_callback(mut self) -> EventCallback {
        Box::new(move |event: &SensingEvent| self.handle(event))
    }
}
