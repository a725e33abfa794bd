use dioxus::prelude::*;
use shared_types::UserProfile;
use std::future::Future;

use crate::api::{api_base, ApiClient};

/// Reference count of tracked requests in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadingCounter {
    count: u32,
}

impl LoadingCounter {
    pub fn start(&mut self) {
        self.count = self.count.saturating_add(1);
    }

    /// Never drops below zero, even on unbalanced calls.
    pub fn finish(&mut self) {
        self.count = self.count.saturating_sub(1);
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn is_loading(&self) -> bool {
        self.count > 0
    }
}

/// Somewhere a [`LoadingCounter`] lives.
pub trait LoadingSlot {
    fn update(&mut self, f: impl FnOnce(&mut LoadingCounter));
}

impl LoadingSlot for Signal<LoadingCounter> {
    fn update(&mut self, f: impl FnOnce(&mut LoadingCounter)) {
        // The store outlives every page, but a task can be dropped during
        // teardown after the signal is gone.
        if let Ok(mut counter) = self.try_write() {
            f(&mut counter);
        }
    }
}

/// Holds one count on a [`LoadingCounter`] and releases it on drop, so a
/// cancelled request still clears the spinner.
pub struct LoadingGuard<S: LoadingSlot> {
    slot: S,
}

impl<S: LoadingSlot> LoadingGuard<S> {
    pub fn start(mut slot: S) -> Self {
        slot.update(LoadingCounter::start);
        Self { slot }
    }
}

impl<S: LoadingSlot> Drop for LoadingGuard<S> {
    fn drop(&mut self) {
        self.slot.update(LoadingCounter::finish);
    }
}

/// Await `fut` while holding a count on `slot`. The count is released
/// when the future completes or is dropped unfinished.
pub async fn tracked<S, F, T>(slot: S, fut: F) -> T
where
    S: LoadingSlot,
    F: Future<Output = T>,
{
    let _guard = LoadingGuard::start(slot);
    fut.await
}

/// Role the session acts as before anything is picked.
pub const DEFAULT_ROLE: &str = "reader";

/// Global front-end state: the acting role, its resolved profile and the
/// loading counter behind the top-bar spinner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PortalStore {
    pub role: Signal<String>,
    pub profile: Signal<UserProfile>,
    pub loading: Signal<LoadingCounter>,
}

impl PortalStore {
    pub fn new() -> Self {
        Self {
            role: Signal::new(DEFAULT_ROLE.to_string()),
            profile: Signal::new(UserProfile {
                role: DEFAULT_ROLE.to_string(),
                ..Default::default()
            }),
            loading: Signal::new(LoadingCounter::default()),
        }
    }

    /// Client acting as the current role.
    pub fn client(&self) -> ApiClient {
        ApiClient::new(api_base(), Some(self.role.peek().clone()))
    }

    /// Run `fut` with the loading counter held for its whole duration.
    pub async fn track<F, T>(self, fut: F) -> T
    where
        F: Future<Output = T>,
    {
        tracked(self.loading, fut).await
    }

    /// Switch the acting role and reload its profile.
    pub fn switch_role(mut self, role: String) {
        self.role.set(role);
        spawn(async move {
            self.refresh_profile().await;
        });
    }

    pub async fn refresh_profile(mut self) {
        let client = self.client();
        match self.track(client.current_profile()).await {
            Ok(profile) => {
                tracing::info!(role = %profile.role, "profile loaded");
                self.profile.set(profile);
            }
            Err(e) => {
                tracing::warn!(error = %e, "profile lookup failed; keeping reader access");
                self.profile.set(UserProfile {
                    role: DEFAULT_ROLE.to_string(),
                    ..Default::default()
                });
            }
        }
    }
}

impl Default for PortalStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Hook to access the global store.
pub fn use_store() -> PortalStore {
    use_context::<PortalStore>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::pin::pin;
    use std::rc::Rc;
    use std::task::{Context, Poll, Waker};

    #[derive(Clone, Default)]
    struct SharedCounter(Rc<RefCell<LoadingCounter>>);

    impl SharedCounter {
        fn count(&self) -> u32 {
            self.0.borrow().count()
        }
    }

    impl LoadingSlot for SharedCounter {
        fn update(&mut self, f: impl FnOnce(&mut LoadingCounter)) {
            f(&mut self.0.borrow_mut());
        }
    }

    #[test]
    fn counter_tracks_overlapping_requests() {
        let mut c = LoadingCounter::default();
        assert!(!c.is_loading());
        c.start();
        c.start();
        c.finish();
        assert!(c.is_loading());
        assert_eq!(c.count(), 1);
        c.finish();
        assert!(!c.is_loading());
    }

    #[test]
    fn counter_never_goes_negative() {
        let mut c = LoadingCounter::default();
        c.finish();
        c.finish();
        assert_eq!(c.count(), 0);
        c.start();
        assert!(c.is_loading());
    }

    #[test]
    fn guard_releases_on_drop() {
        let shared = SharedCounter::default();
        let first = LoadingGuard::start(shared.clone());
        let second = LoadingGuard::start(shared.clone());
        assert_eq!(shared.count(), 2);
        drop(first);
        assert_eq!(shared.count(), 1);
        drop(second);
        assert_eq!(shared.count(), 0);
    }

    #[test]
    fn completed_request_releases_the_count() {
        let shared = SharedCounter::default();
        let mut cx = Context::from_waker(Waker::noop());
        let mut fut = pin!(tracked(shared.clone(), async { 7 }));
        assert_eq!(fut.as_mut().poll(&mut cx), Poll::Ready(7));
        assert_eq!(shared.count(), 0);
    }

    #[test]
    fn cancelled_request_releases_the_count() {
        let shared = SharedCounter::default();
        let mut cx = Context::from_waker(Waker::noop());
        let mut fut = Box::pin(tracked(shared.clone(), std::future::pending::<()>()));
        assert_eq!(fut.as_mut().poll(&mut cx), Poll::Pending);
        assert_eq!(shared.count(), 1);

        drop(fut);
        assert_eq!(shared.count(), 0);
    }
}
