//! Hit counter shown in verbose mode

use kdam::{Animation, Bar, BarExt};
use std::sync::{Arc, Mutex};

/// Create a counter for an unknown total (shows count without percentage).
pub fn create_counter(desc: &'static str) -> Arc<Mutex<Bar>> {
    Arc::new(Mutex::new(kdam::tqdm!(
        total = 0,
        desc = desc,
        animation = Animation::Classic,
        position = 0,
        unit = " hits"
    )))
}

/// Force a refresh of the bar (so the counter shows "0 hits" immediately).
pub fn refresh_bar(pb: &Arc<Mutex<Bar>>) {
    if let Ok(mut bar) = pb.try_lock() {
        let _ = bar.refresh();
    }
}

/// Advance the counter by `n`. Skips the update if the lock is contended.
pub fn update_progress_bar(pb: &Arc<Mutex<Bar>>, n: usize) {
    if let Ok(mut pb) = pb.try_lock() {
        let _ = pb.update(n);
    }
}

/// Callback for [`RunHooks::on_hits`](crate::pipeline::RunHooks) that advances `bar`.
pub fn hits_callback(bar: &Arc<Mutex<Bar>>) -> Box<dyn Fn(usize)> {
    let bar = Arc::clone(bar);
    Box::new(move |n: usize| update_progress_bar(&bar, n))
}
