//! Core-pinned task spawning for the two application tasks.
//!
//! Wraps `esp_pthread_set_cfg()` so that `std::thread` creates a FreeRTOS
//! task pinned to a specific CPU core with explicit priority and stack
//! size. On non-ESP targets, falls back to a plain named thread.
//!
//! # ESP-IDF Threading Model
//!
//! `esp_pthread_set_cfg()` sets thread-local configuration that applies to
//! the *next* `pthread_create()` call from the calling thread. The
//! config→spawn pair must not be interleaved with other thread creation on
//! the same thread, which holds because both tasks are spawned from
//! `main()` in sequence.

use std::thread::JoinHandle;

use crate::config::TaskConfig;

/// CPU core identifiers for the ESP32-S3 dual-core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum Core {
    /// Core 0 (PRO_CPU): protocol stacks and the console UART.
    Pro = 0,
    /// Core 1 (APP_CPU): radar processing.
    App = 1,
}

/// Spawn `f` as the task described by `task`.
#[cfg(target_os = "espidf")]
pub fn spawn_task(
    task: &TaskConfig,
    f: impl FnOnce() + Send + 'static,
) -> std::io::Result<JoinHandle<()>> {
    // esp_pthread_cfg_t keeps the name pointer; it must be NUL-terminated
    // and outlive the spawn call.
    let name: &'static std::ffi::CStr = task.name;
    // SAFETY: esp_pthread_set_cfg copies the struct into thread-local
    // storage read by the next pthread_create on this thread.
    unsafe {
        let mut cfg = esp_idf_sys::esp_pthread_get_default_config();
        cfg.pin_to_core = task.core as i32;
        cfg.prio = usize::from(task.priority);
        cfg.stack_size = task.stack_kb * 1024;
        cfg.thread_name = name.as_ptr();
        let ret = esp_idf_sys::esp_pthread_set_cfg(&cfg);
        if ret != esp_idf_sys::ESP_OK as i32 {
            return Err(std::io::Error::other(format!("esp_pthread_set_cfg failed: {ret}")));
        }
    }

    let display_name = name.to_string_lossy().into_owned();
    log::info!(
        "Spawning '{}' on {:?} (pri={}, stack={}KB)",
        display_name,
        task.core,
        task.priority,
        task.stack_kb
    );

    std::thread::Builder::new().name(display_name).spawn(f)
}

/// Simulation fallback: ignores core affinity and priority.
///
/// Host threads get a larger floor on the stack, since desktop `std`
/// formatting needs more than the firmware budget.
#[cfg(not(target_os = "espidf"))]
pub fn spawn_task(
    task: &TaskConfig,
    f: impl FnOnce() + Send + 'static,
) -> std::io::Result<JoinHandle<()>> {
    const HOST_MIN_STACK_KB: usize = 64;

    let display_name = task.name.to_string_lossy().into_owned();
    log::info!(
        "Spawning '{}' (sim, no core pinning, pri={} ignored)",
        display_name,
        task.priority
    );

    std::thread::Builder::new()
        .name(display_name)
        .stack_size(task.stack_kb.max(HOST_MIN_STACK_KB) * 1024)
        .spawn(f)
}
