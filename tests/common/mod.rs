/*!
 * Common test utilities for the translate-agent test suite
 */

use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use tokio::sync::oneshot;

use translate_agent::session::Notifier;

/// Initialize test logging, ignoring repeat initialization
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Create a notifier that counts how many times it was invoked
pub fn counting_notifier() -> (Notifier, Arc<AtomicUsize>) {
    let count = Arc::new(AtomicUsize::new(0));
    let count_clone = Arc::clone(&count);
    let notifier: Notifier = Box::new(move || {
        count_clone.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    });
    (notifier, count)
}

/// Create a notifier that signals a oneshot channel on invocation
pub fn signal_notifier() -> (Notifier, oneshot::Receiver<()>) {
    let (tx, rx) = oneshot::channel();
    let notifier: Notifier = Box::new(move || {
        let _ = tx.send(());
    });
    (notifier, rx)
}
