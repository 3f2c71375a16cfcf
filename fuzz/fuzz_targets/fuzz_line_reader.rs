//! Fuzz target: `read_line`
//!
//! Feeds arbitrary operator bytes into the line reader and asserts that it
//! never panics, never consumes more than the buffer budget, and never
//! stores whitespace.
//!
//! cargo fuzz run fuzz_line_reader

#![no_main]

use std::collections::VecDeque;

use libfuzzer_sys::fuzz_target;
use radar_presence::app::ports::{CharInput, RxPoll};
use radar_presence::console::line_buffer::{is_space, read_line, LineBuffer};

struct Bytes(VecDeque<u8>);

impl CharInput for Bytes {
    fn poll_byte(&mut self) -> RxPoll {
        self.0.pop_front().map_or(RxPoll::Closed, RxPoll::Byte)
    }
    fn read_byte(&mut self) -> Option<u8> {
        self.0.pop_front()
    }
}

fuzz_target!(|data: &[u8]| {
    let mut input = Bytes(data.iter().copied().collect());
    let mut echo = Vec::new();
    let mut line = LineBuffer::<255>::new();

    // Keep reading lines until the input runs dry.
    while !input.0.is_empty() {
        let before = input.0.len();
        read_line(&mut input, &mut echo, &mut line);
        let consumed = before - input.0.len();

        assert!(consumed >= 1 && consumed <= 255, "consumed {} bytes", consumed);
        assert!(line.as_bytes().len() <= consumed);
        assert!(line.as_bytes().iter().all(|b| !is_space(*b)));
    }
    assert!(echo.is_empty() || echo.last() == Some(&b'\n'));
});
