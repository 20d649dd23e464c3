//! Browser bindings: LocalStorage and timer ownership.

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use crate::flags::KvStore;

/// LocalStorage-backed key-value store.
///
/// Storage can be unavailable (private browsing, disabled cookies); every
/// access degrades to "no value" rather than failing.
pub struct LocalKv;

fn storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok()).flatten()
}

impl KvStore for LocalKv {
    fn get(&self, key: &str) -> Option<String> {
        storage().and_then(|s| s.get_item(key).ok()).flatten()
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Some(s) = storage() {
            if s.set_item(key, value).is_err() {
                log::warn!("LocalStorage write failed for {key}");
            }
        }
    }
}

/// Owns every interval and timeout a game session registers.
///
/// `clear_all` runs synchronously when the view closes; a timer that
/// outlives its view would keep an invisible game running.
#[derive(Default)]
pub struct TimerRegistry {
    intervals: Vec<i32>,
    timeouts: Vec<i32>,
    // Closures stay alive exactly as long as their timer handles.
    callbacks: Vec<Closure<dyn FnMut()>>,
}

impl TimerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a repeating callback.
    pub fn every(&mut self, period_ms: i32, f: impl FnMut() + 'static) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let cb = Closure::<dyn FnMut()>::new(f);
        match window.set_interval_with_callback_and_timeout_and_arguments_0(
            cb.as_ref().unchecked_ref(),
            period_ms,
        ) {
            Ok(handle) => {
                self.intervals.push(handle);
                self.callbacks.push(cb);
            }
            Err(e) => log::warn!("setInterval failed: {e:?}"),
        }
    }

    /// Register a one-shot callback.
    pub fn after(&mut self, delay_ms: i32, f: impl FnMut() + 'static) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let cb = Closure::<dyn FnMut()>::new(f);
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            cb.as_ref().unchecked_ref(),
            delay_ms,
        ) {
            Ok(handle) => {
                self.timeouts.push(handle);
                self.callbacks.push(cb);
            }
            Err(e) => log::warn!("setTimeout failed: {e:?}"),
        }
    }

    /// Stop everything this session scheduled.
    pub fn clear_all(&mut self) {
        if let Some(window) = web_sys::window() {
            for handle in self.intervals.drain(..) {
                window.clear_interval_with_handle(handle);
            }
            for handle in self.timeouts.drain(..) {
                window.clear_timeout_with_handle(handle);
            }
        }
        self.callbacks.clear();
    }
}

impl Drop for TimerRegistry {
    fn drop(&mut self) {
        self.clear_all();
    }
}
