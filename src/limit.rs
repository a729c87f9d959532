//! Fixed-window submission pacing.
//!
//! [`RateLimiter`] admits at most `limit` acquisitions per window of `window` length and
//! blocks excess callers until the window rolls over. Permits are RAII [`Permit`] guards,
//! so every exit path of a submission returns its slot without a manual release call.
//! Completing a call does not refund the current window: spent admissions are only
//! replenished when the window elapses, which caps throughput per unit time rather than
//! mere concurrency.

// self
use crate::{_prelude::*, error::ConfigError};

/// Shared fixed-window rate limiter capping submissions per time window.
///
/// The limiter is constructed once, wrapped in an [`Arc`], and shared by reference with
/// every caller. `admitted` counts acquisitions granted since `window_start` and resets
/// on rollover; `held` counts permits currently alive and is decremented when a
/// [`Permit`] drops. Admission requires room on both counters, so neither the per-window
/// budget nor the number of simultaneous holders can exceed `limit`.
#[derive(Debug)]
pub struct RateLimiter {
	limit: u32,
	window: Duration,
	state: Mutex<WindowState>,
}

#[derive(Debug)]
struct WindowState {
	window_start: Instant,
	admitted: u32,
	held: u32,
}
impl WindowState {
	/// Resets the window lazily once `window` has elapsed. The new window starts at `now`,
	/// so an idle gap is not back-filled with phantom windows.
	fn roll_over(&mut self, now: Instant, window: Duration) {
		if now.duration_since(self.window_start) >= window {
			self.window_start = now;
			self.admitted = 0;
		}
	}
}

impl RateLimiter {
	/// Creates a limiter admitting `limit` submissions per `window`.
	///
	/// Fails fast with [`ConfigError::NonPositiveLimit`] or [`ConfigError::ZeroWindow`]
	/// before any state is allocated.
	pub fn new(limit: u32, window: Duration) -> Result<Self, ConfigError> {
		if limit == 0 {
			return Err(ConfigError::NonPositiveLimit);
		}
		if window.is_zero() {
			return Err(ConfigError::ZeroWindow);
		}

		Ok(Self {
			limit,
			window,
			state: Mutex::new(WindowState {
				window_start: Instant::now(),
				admitted: 0,
				held: 0,
			}),
		})
	}

	/// Waits until a permit is available and takes it.
	///
	/// The wait is a timed re-check loop: the task sleeps until the current window is due
	/// to roll over and retries. Waiters are therefore admitted in no particular order
	/// once capacity recurs. Cancellation is safe at every point: dropping the returned
	/// future before it resolves never consumes a permit, because no counter is touched
	/// until admission succeeds and admission happens without an intervening await.
	pub async fn acquire(&self) -> Permit<'_> {
		loop {
			let deadline = {
				let mut state = self.state.lock();
				let now = Instant::now();

				state.roll_over(now, self.window);

				if state.admitted < self.limit && state.held < self.limit {
					state.admitted += 1;
					state.held += 1;

					return Permit { limiter: self };
				}

				state.window_start + self.window
			};

			tokio::time::sleep_until(deadline).await;
		}
	}

	/// Takes a permit immediately if one is available, without waiting.
	pub fn try_acquire(&self) -> Option<Permit<'_>> {
		let mut state = self.state.lock();

		state.roll_over(Instant::now(), self.window);

		if state.admitted < self.limit && state.held < self.limit {
			state.admitted += 1;
			state.held += 1;

			Some(Permit { limiter: self })
		} else {
			None
		}
	}

	fn release(&self) {
		let mut state = self.state.lock();

		state.held = state.held.saturating_sub(1);
	}

	/// Maximum permits per window.
	pub fn limit(&self) -> u32 {
		self.limit
	}

	/// Window length.
	pub fn window(&self) -> Duration {
		self.window
	}

	/// Permits still grantable at this instant.
	pub fn available_permits(&self) -> u32 {
		let mut state = self.state.lock();

		state.roll_over(Instant::now(), self.window);

		self.limit - state.admitted.max(state.held)
	}

	/// Permits currently held by in-flight acquisitions.
	pub fn held_permits(&self) -> u32 {
		self.state.lock().held
	}
}

/// RAII permit guard returned by [`RateLimiter::acquire`].
///
/// Dropping the guard returns the held slot. The current window's admission count is not
/// refunded; only rollover replenishes it. A guard that is leaked and never dropped
/// permanently consumes one slot of the concurrent budget.
#[must_use = "dropping the permit immediately releases the held slot"]
#[derive(Debug)]
pub struct Permit<'a> {
	limiter: &'a RateLimiter,
}
impl Drop for Permit<'_> {
	fn drop(&mut self) {
		self.limiter.release();
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	const WINDOW: Duration = Duration::from_secs(1);

	#[test]
	fn construction_rejects_degenerate_configuration() {
		assert!(matches!(RateLimiter::new(0, WINDOW), Err(ConfigError::NonPositiveLimit)));
		assert!(matches!(
			RateLimiter::new(3, Duration::ZERO),
			Err(ConfigError::ZeroWindow)
		));
	}

	#[tokio::test(start_paused = true)]
	async fn window_budget_is_not_refunded_by_release() {
		let limiter = RateLimiter::new(1, WINDOW).expect("Limiter should build.");
		let permit = limiter.try_acquire().expect("First acquisition should be admitted.");

		drop(permit);

		// The call completed, yet the window stays spent until rollover.
		assert!(limiter.try_acquire().is_none());
		assert_eq!(limiter.available_permits(), 0);
		assert_eq!(limiter.held_permits(), 0);
	}

	#[tokio::test(start_paused = true)]
	async fn rollover_replenishes_the_budget() {
		let limiter = RateLimiter::new(2, WINDOW).expect("Limiter should build.");

		drop(limiter.try_acquire().expect("First acquisition should be admitted."));
		drop(limiter.try_acquire().expect("Second acquisition should be admitted."));
		assert!(limiter.try_acquire().is_none());

		tokio::time::advance(WINDOW).await;

		assert_eq!(limiter.available_permits(), 2);

		let _permit = limiter.try_acquire().expect("Rollover should admit again.");
	}

	#[tokio::test(start_paused = true)]
	async fn blocked_acquire_is_admitted_after_rollover() {
		let limiter = Arc::new(RateLimiter::new(1, WINDOW).expect("Limiter should build."));

		drop(limiter.acquire().await);

		let started = Instant::now();
		let waiter = tokio::spawn({
			let limiter = limiter.clone();

			async move {
				let _permit = limiter.acquire().await;

				Instant::now()
			}
		});
		let admitted_at = waiter.await.expect("Waiter task should not panic.");

		assert!(admitted_at.duration_since(started) >= WINDOW);
	}

	#[tokio::test(start_paused = true)]
	async fn cancelled_wait_never_consumes_a_permit() {
		let limiter = RateLimiter::new(1, WINDOW).expect("Limiter should build.");

		drop(limiter.try_acquire().expect("First acquisition should be admitted."));

		let cancelled =
			tokio::time::timeout(Duration::from_millis(100), limiter.acquire()).await;

		assert!(cancelled.is_err(), "Exhausted window should leave the waiter pending.");
		assert_eq!(limiter.held_permits(), 0);

		tokio::time::advance(WINDOW).await;

		// The abandoned wait left the fresh window untouched.
		assert_eq!(limiter.available_permits(), 1);

		let _permit = limiter.try_acquire().expect("Fresh window should admit.");
	}

	#[tokio::test(start_paused = true)]
	async fn holders_never_exceed_the_limit_across_rollover() {
		let limiter = Arc::new(RateLimiter::new(2, WINDOW).expect("Limiter should build."));
		let first = limiter.acquire().await;
		let _second = limiter.acquire().await;

		// Both permits stay held across the rollover; the fresh window budget alone
		// must not admit a third concurrent holder.
		tokio::time::advance(WINDOW).await;

		assert_eq!(limiter.held_permits(), 2);
		assert!(limiter.try_acquire().is_none());

		drop(first);

		let _third = limiter.try_acquire().expect("A returned slot should admit again.");
		assert_eq!(limiter.held_permits(), 2);
	}
}
