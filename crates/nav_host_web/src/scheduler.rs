//! `requestAnimationFrame` / `setTimeout` backed [`Scheduler`].

use nav_host::{Scheduler, Task, TaskId};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast, JsValue};

#[derive(Debug, Clone, Copy, Default)]
/// Browser scheduler. On non-wasm targets deferred work is dropped.
pub struct WebScheduler;

impl Scheduler for WebScheduler {
    fn request_frame(&self, task: Task) {
        #[cfg(target_arch = "wasm32")]
        {
            let Some(window) = web_sys::window() else {
                return;
            };
            let callback = Closure::once_into_js(move || task());
            if let Err(err) = window.request_animation_frame(callback.unchecked_ref()) {
                web_sys::console::warn_1(&JsValue::from_str(&format!(
                    "requestAnimationFrame failed, deferring with setTimeout: {err:?}"
                )));
                if let Err(err) = window
                    .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), 0)
                {
                    web_sys::console::warn_1(&JsValue::from_str(&format!(
                        "frame task dropped: {err:?}"
                    )));
                }
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        drop(task);
    }

    fn schedule(&self, delay_ms: u32, task: Task) -> TaskId {
        #[cfg(target_arch = "wasm32")]
        {
            let Some(window) = web_sys::window() else {
                return TaskId(0);
            };
            let callback = Closure::once_into_js(move || task());
            let timeout = i32::try_from(delay_ms).unwrap_or(i32::MAX);
            window
                .set_timeout_with_callback_and_timeout_and_arguments_0(
                    callback.unchecked_ref(),
                    timeout,
                )
                .map(|handle| TaskId(handle as u64))
                .unwrap_or(TaskId(0))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = delay_ms;
            drop(task);
            TaskId(0)
        }
    }

    fn cancel(&self, id: TaskId) {
        #[cfg(target_arch = "wasm32")]
        {
            if id.0 == 0 {
                return;
            }
            if let Some(window) = web_sys::window() {
                window.clear_timeout_with_handle(id.0 as i32);
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        let _ = id;
    }
}
