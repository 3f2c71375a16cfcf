//! Operator console: the shared output gate and the interactive task.
//!
//! | Module        | Role                                            |
//! |---------------|-------------------------------------------------|
//! | `mutex`       | Console mutex guarding the output channel       |
//! | `line_buffer` | Echoing, whitespace-dropping line reader        |
//! | `ui`          | Menu, prompts, result lines, boot banner        |
//! | `task`        | Keystroke loop and command dispatch             |

pub mod line_buffer;
pub mod mutex;
pub mod task;
pub mod ui;
