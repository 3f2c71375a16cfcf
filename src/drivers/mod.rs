//! Board drivers: one-shot peripheral bring-up, LED outputs, task spawning.

pub mod gpio;
pub mod hw_init;
pub mod indicator;
pub mod task_pin;
