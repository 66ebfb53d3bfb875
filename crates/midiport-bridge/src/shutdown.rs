use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::Duration;

/// Cancellation signal shared between the port loop and whoever may end it.
///
/// Cloning yields another handle to the same signal. Once triggered it stays
/// triggered.
#[derive(Debug, Clone, Default)]
pub struct Shutdown {
    inner: Arc<State>,
}

#[derive(Debug, Default)]
struct State {
    triggered: Mutex<bool>,
    cond: Condvar,
}

impl Shutdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire the signal and wake every waiter.
    pub fn trigger(&self) {
        let mut triggered = self
            .inner
            .triggered
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *triggered = true;
        self.inner.cond.notify_all();
    }

    pub fn is_triggered(&self) -> bool {
        *self
            .inner
            .triggered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Block until the signal fires.
    pub fn wait(&self) {
        let triggered = self
            .inner
            .triggered
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let _guard = self
            .inner
            .cond
            .wait_while(triggered, |triggered| !*triggered)
            .unwrap_or_else(PoisonError::into_inner);
    }

    /// Block until the signal fires or `timeout` elapses; returns whether it fired.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let triggered = self
            .inner
            .triggered
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let (guard, _) = self
            .inner
            .cond
            .wait_timeout_while(triggered, timeout, |triggered| !*triggered)
            .unwrap_or_else(PoisonError::into_inner);
        *guard
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    #[test]
    fn starts_untriggered() {
        let shutdown = Shutdown::new();
        assert!(!shutdown.is_triggered());
        assert!(!shutdown.wait_timeout(Duration::from_millis(10)));
    }

    #[test]
    fn trigger_is_visible_to_clones() {
        let shutdown = Shutdown::new();
        let other = shutdown.clone();
        other.trigger();
        assert!(shutdown.is_triggered());
        shutdown.wait();
    }

    #[test]
    fn wait_blocks_until_triggered() {
        let shutdown = Shutdown::new();
        let trigger = shutdown.clone();
        let started = Instant::now();

        let handle = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(50));
            trigger.trigger();
        });

        shutdown.wait();
        assert!(started.elapsed() >= Duration::from_millis(50));
        handle.join().unwrap();
    }
}
