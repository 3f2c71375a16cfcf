//! Operator console task.
//!
//! Single-key menu over the shared channel. The only place this task waits
//! without holding the console is the idle sleep between input polls;
//! every output sequence (menu, prompt + line + result, hint) runs under a
//! blocking [`ConsoleMutex::lock`] so presence lines never land inside it.
//!
//! ```text
//!   poll_byte ──▶ Command ──▶ lock ─▶ prompt ─▶ read_line ─▶ set_parameter ─▶ OK/ERROR ─▶ unlock
//! ```

use core::fmt::Write;
use core::ops::ControlFlow;
use core::time::Duration;
use std::sync::Arc;

use log::{debug, info};

use super::line_buffer::{read_line, LineBuffer, LineEnd};
use super::mutex::ConsoleMutex;
use super::ui;
use crate::app::commands::Command;
use crate::app::params::{self, VALUE_MAX_LEN};
use crate::app::ports::{CharInput, CharOutput, RxPoll, SensingEngine};
use crate::sensing::engine::EngineHandle;

pub struct ConsoleTask<E, I, W> {
    engine: EngineHandle<E>,
    input: I,
    console: Arc<ConsoleMutex<W>>,
    idle_poll: Duration,
    line: LineBuffer<VALUE_MAX_LEN>,
}

impl<E, I, W> ConsoleTask<E, I, W>
where
    E: SensingEngine,
    I: CharInput,
    W: Write + CharOutput,
{
    pub fn new(
        engine: EngineHandle<E>,
        input: I,
        console: Arc<ConsoleMutex<W>>,
        idle_poll: Duration,
    ) -> Self {
        Self {
            engine,
            input,
            console,
            idle_poll,
            line: LineBuffer::new(),
        }
    }

    /// Print the menu, then serve keystrokes until the input channel closes.
    ///
    /// Returns the input so callers can inspect what was left unread.
    pub fn run(mut self) -> I {
        info!("console: started");
        self.show_menu();

        loop {
            match self.input.poll_byte() {
                RxPoll::Byte(key) => {
                    if self.dispatch(Command::from_key(key)).is_break() {
                        break;
                    }
                }
                RxPoll::Empty => std::thread::sleep(self.idle_poll),
                RxPoll::Closed => break,
            }
        }

        let _ = writeln!(self.console.lock(), "{}", ui::EXIT_NOTICE);
        info!("console: input closed, exiting");
        self.input
    }

    /// Execute one command. Breaks if the input closed mid-command.
    pub fn dispatch(&mut self, command: Command) -> ControlFlow<()> {
        debug!("console: {:?}", command);
        match command {
            Command::ShowMenu => self.show_menu(),
            Command::SetRangeMax => return self.set_from_line(ui::RANGE_PROMPT, params::RANGE_MAX),
            Command::SetSensitivity => {
                return self.set_from_line(ui::SENSITIVITY_PROMPT, params::SENSITIVITY);
            }
            Command::ShowHelp => {
                let _ = writeln!(self.console.lock(), "{}", ui::HELP_HINT);
            }
        }
        ControlFlow::Continue(())
    }

    fn show_menu(&mut self) {
        let mut out = self.console.lock();
        let range_max = self.engine.get_parameter(params::RANGE_MAX);
        let sensitivity = self.engine.get_parameter(params::SENSITIVITY);
        let _ = ui::write_menu(&mut *out, range_max, sensitivity);
    }

    fn set_from_line(&mut self, prompt: &str, key: &str) -> ControlFlow<()> {
        let mut out = self.console.lock();
        let _ = writeln!(out, "{}", prompt);

        if read_line(&mut self.input, &mut out, &mut self.line) == LineEnd::Closed {
            debug!("console: input closed while reading {}", key);
            return ControlFlow::Break(());
        }

        let value = self.line.as_bytes();
        let result = self.engine.set_parameter(key, value);
        debug!("console: {} = \"{}\" -> {:?}", key, value.escape_ascii(), result);
        let _ = ui::write_result(&mut *out, result);
        ControlFlow::Continue(())
    }
}
