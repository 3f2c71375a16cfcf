//! Line input for parameter values.
//!
//! [`read_line`] implements the prompt protocol: bytes are read one at a
//! time, echoed verbatim, whitespace is dropped, and input ends at a
//! carriage return or once the buffer's budget of bytes has been consumed.

use crate::app::ports::{CharInput, CharOutput};

/// Fixed-capacity line buffer.
pub struct LineBuffer<const N: usize> {
    buf: heapless::Vec<u8, N>,
}

impl<const N: usize> LineBuffer<N> {
    /// Create empty buffer
    pub const fn new() -> Self {
        Self {
            buf: heapless::Vec::new(),
        }
    }

    /// Push a byte. Returns `false` when full.
    pub fn push(&mut self, b: u8) -> bool {
        self.buf.push(b).is_ok()
    }

    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Stored bytes, exactly as received minus whitespace.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }
}

impl<const N: usize> Default for LineBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// C `isspace`: space, `\t`, `\n`, `\v`, `\f`, `\r`.
pub const fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0B | 0x0C | b'\r')
}

/// How a [`read_line`] call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnd {
    /// Carriage return received.
    Enter,
    /// `N` bytes consumed without a carriage return.
    Full,
    /// Input channel closed mid-line.
    Closed,
}

/// Read one line from `input` into `line`, echoing to `echo`.
///
/// Every received byte counts against the `N`-byte budget, including the
/// whitespace that is echoed but not stored. Echo is byte-for-byte, UTF-8 or
/// not. A newline is written to `echo` however the read ends.
pub fn read_line<const N: usize>(
    input: &mut impl CharInput,
    echo: &mut impl CharOutput,
    line: &mut LineBuffer<N>,
) -> LineEnd {
    line.clear();

    let mut end = LineEnd::Full;
    for _ in 0..N {
        let Some(b) = input.read_byte() else {
            end = LineEnd::Closed;
            break;
        };
        let _ = echo.write_byte(b);
        if b == b'\r' {
            end = LineEnd::Enter;
            break;
        }
        if !is_space(b) {
            line.push(b);
        }
    }

    let _ = echo.write_byte(b'\n');
    end
}
