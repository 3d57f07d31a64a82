use std::{
    sync::{
        Arc,
        OnceLock,
    },
    time::Duration,
};

use regex::Regex;
use tokio::{
    runtime::Runtime,
    task::JoinHandle,
    time::sleep,
};

use crate::core::LexmineError;

pub const REMINDER_MESSAGE: &str = "Time to study your words!";

const DEFAULT_INTERVAL: Duration = Duration::from_secs(10 * 60);

/// Delivers a reminder message to the user. Delivery lives in the transport
/// layer; the scheduler only invokes it.
pub type Notifier = Arc<dyn Fn(&str) -> Result<(), LexmineError> + Send + Sync>;

fn leading_number(spec: &str) -> Option<u64> {
    static DIGITS: OnceLock<Regex> = OnceLock::new();
    let re = DIGITS.get_or_init(|| Regex::new(r"\d+").unwrap());
    re.find(spec).and_then(|m| m.as_str().parse().ok())
}

/// Turns an interval token into a duration. Accepted forms: "one day",
/// "N hour(s)" (1 if no digit), "N minute(s)" (10 if no digit), or a bare
/// number of minutes. Anything else falls back to ten minutes.
pub fn parse_interval(spec: &str) -> Duration {
    let spec = spec.trim().to_lowercase();

    if spec.contains("day") {
        return Duration::from_secs(24 * 60 * 60);
    }
    if spec.contains("hour") {
        return Duration::from_secs(leading_number(&spec).unwrap_or(1) * 60 * 60);
    }
    if spec.contains("min") {
        return Duration::from_secs(leading_number(&spec).unwrap_or(10) * 60);
    }
    if let Ok(minutes) = spec.parse::<u64>() {
        return Duration::from_secs(minutes * 60);
    }

    log::debug!("unparseable interval '{}', using the ten minute default", spec);
    DEFAULT_INTERVAL
}

/// A single periodic reminder timer. Setting a new interval replaces the
/// running timer, so at most one is ever active.
pub struct ReminderScheduler {
    runtime: Arc<Runtime>,
    notifier: Notifier,
    handle: Option<JoinHandle<()>>,
}

impl ReminderScheduler {
    pub fn new(notifier: Notifier) -> Self {
        let runtime = Arc::new(Runtime::new().expect("Failed to create reminder runtime"));
        Self { runtime, notifier, handle: None }
    }

    /// Cancels any running timer and starts a fresh one firing every
    /// `interval` until cancelled. Notifier failures are logged and the
    /// loop keeps going.
    pub fn set(&mut self, interval: Duration) {
        self.cancel();

        let notifier = self.notifier.clone();
        let handle = self.runtime.spawn(async move {
            loop {
                sleep(interval).await;
                if let Err(e) = notifier(REMINDER_MESSAGE) {
                    log::warn!("reminder delivery failed: {}", e);
                }
            }
        });

        log::info!("reminder timer set to every {:?}", interval);
        self.handle = Some(handle);
    }

    /// Stops the running timer. Cancelling with nothing running is a no-op.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            log::info!("reminder timer cancelled");
        }
    }

    pub fn is_active(&self) -> bool {
        self.handle.as_ref().map(|handle| !handle.is_finished()).unwrap_or(false)
    }
}

impl Drop for ReminderScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{
        AtomicUsize,
        Ordering,
    };

    use super::*;

    fn counting_notifier() -> (Notifier, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = count.clone();
        let notifier: Notifier = Arc::new(move |_message| {
            count_clone.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
        (notifier, count)
    }

    #[test]
    fn test_parse_interval_tokens() {
        assert_eq!(parse_interval("one day"), Duration::from_secs(24 * 60 * 60));
        assert_eq!(parse_interval("3 hours"), Duration::from_secs(3 * 60 * 60));
        assert_eq!(parse_interval("hour"), Duration::from_secs(60 * 60));
        assert_eq!(parse_interval("30 minutes"), Duration::from_secs(30 * 60));
        assert_eq!(parse_interval("minutes"), Duration::from_secs(10 * 60));
        assert_eq!(parse_interval("45"), Duration::from_secs(45 * 60));
        assert_eq!(parse_interval("soonish"), Duration::from_secs(10 * 60));
    }

    #[test]
    fn test_timer_fires_until_cancelled() {
        let (notifier, count) = counting_notifier();
        let mut scheduler = ReminderScheduler::new(notifier);

        scheduler.set(Duration::from_millis(10));
        assert!(scheduler.is_active());

        std::thread::sleep(Duration::from_millis(100));
        assert!(count.load(Ordering::SeqCst) >= 1);

        scheduler.cancel();
        assert!(!scheduler.is_active());
    }

    #[test]
    fn test_set_replaces_the_running_timer() {
        let (notifier, count) = counting_notifier();
        let mut scheduler = ReminderScheduler::new(notifier);

        // A timer that would never fire within the test window...
        scheduler.set(Duration::from_secs(3600));
        // ...replaced by one that fires immediately.
        scheduler.set(Duration::from_millis(10));

        std::thread::sleep(Duration::from_millis(100));
        assert!(scheduler.is_active());
        assert!(count.load(Ordering::SeqCst) >= 1);
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let (notifier, _count) = counting_notifier();
        let mut scheduler = ReminderScheduler::new(notifier);

        scheduler.cancel();
        scheduler.set(Duration::from_secs(3600));
        scheduler.cancel();
        scheduler.cancel();
        assert!(!scheduler.is_active());
    }

    #[test]
    fn test_failing_notifier_keeps_the_loop_alive() {
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = count.clone();
        let notifier: Notifier = Arc::new(move |_message| {
            count_clone.fetch_add(1, Ordering::SeqCst);
            Err(LexmineError::Custom("delivery down".to_string()))
        });

        let mut scheduler = ReminderScheduler::new(notifier);
        scheduler.set(Duration::from_millis(10));
        std::thread::sleep(Duration::from_millis(100));

        assert!(count.load(Ordering::SeqCst) >= 2);
        assert!(scheduler.is_active());
    }
}
