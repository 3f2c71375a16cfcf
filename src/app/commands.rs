//! Single-keystroke operator commands.

/// What the console does with one input character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `?`: reprint the parameter menu.
    ShowMenu,
    /// `r`: prompt for and set the presence range maximum.
    SetRangeMax,
    /// `s`: prompt for and set the presence sensitivity.
    SetSensitivity,
    /// Anything else: print the one-line hint.
    ShowHelp,
}

impl Command {
    pub const fn from_key(key: u8) -> Self {
        match key {
            b'?' => Self::ShowMenu,
            b'r' => Self::SetRangeMax,
            b's' => Self::SetSensitivity,
            _ => Self::ShowHelp,
        }
    }
}
