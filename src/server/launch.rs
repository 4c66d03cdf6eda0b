use std::sync::Arc;

/// The operation that starts serving once a server endpoint has been set up.
///
/// Any `Fn()` closure or plain function that can be shared between threads implements this trait.
pub trait Launch: Send + Sync {
    /// Start serving
    fn launch(&self);
}

impl<F> Launch for F
where
    F: Fn() + Send + Sync,
{
    fn launch(&self) {
        self()
    }
}

/// Shared reference to a [`Launch`] implementation as it is stored inside a
/// [`ServerConfig`](super::ServerConfig)
pub type LaunchRef = Arc<dyn Launch>;

#[cfg(test)]
mod test {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static FN_CALLS: AtomicUsize = AtomicUsize::new(0);

    fn count_call() {
        FN_CALLS.fetch_add(1, Ordering::SeqCst);
    }

    #[test]
    fn test_plain_fn_is_launchable() {
        let launch: LaunchRef = Arc::new(count_call);
        launch.launch();
        assert_eq!(FN_CALLS.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_closure_is_launchable() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_in_closure = calls.clone();
        let launch: LaunchRef = Arc::new(move || {
            calls_in_closure.fetch_add(1, Ordering::SeqCst);
        });

        launch.launch();
        launch.launch();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
