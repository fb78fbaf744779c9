//! Fire-and-forget UI tasks.
//!
//! Event handlers start their simulated backend calls through [`spawn`]. In
//! the browser the future runs on the Leptos local executor; elsewhere there is
//! no event loop to drive it and it is dropped unpolled.

use std::future::Future;

pub fn spawn<F>(task: F)
where
    F: Future<Output = ()> + 'static,
{
    #[cfg(feature = "csr")]
    leptos::task::spawn_local(task);
    #[cfg(not(feature = "csr"))]
    {
        drop(task);
        tracing::debug!("ui task dropped outside the browser");
    }
}
