//! Async utilities for GUI code
//!
//! GTK4 runs on a single-threaded main loop. Vault calls are futures driven
//! by the GLib main context, so callbacks return immediately and results
//! can touch widgets directly when they arrive. The tokio runtime entered in
//! `main` provides the process and timer drivers those futures rely on.

use gtk4::glib;
use std::future::Future;

/// Spawns an async task on the GLib main context.
///
/// This is the preferred way to run async code from GTK callbacks.
/// The task runs on the main thread and can safely update GTK widgets.
pub fn spawn_async<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    let ctx = glib::MainContext::default();
    ctx.spawn_local(future);
}

/// Spawns an async task and calls a callback with the result.
pub fn spawn_async_with_callback<F, T, C>(future: F, callback: C)
where
    F: Future<Output = T> + 'static,
    T: 'static,
    C: FnOnce(T) + 'static,
{
    let ctx = glib::MainContext::default();
    ctx.spawn_local(async move {
        let result = future.await;
        callback(result);
    });
}
