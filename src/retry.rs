//! Delay policy consulted between request attempts.
//!
//! The service's reference behavior retries immediately with no backoff and no
//! jitter, and [`ImmediateRetry`] reproduces that. The policy is still a seam of
//! its own so a backoff schedule can be substituted without touching the retry
//! loop's control structure.

// crates.io
use async_lock::Semaphore;
// self
use crate::_prelude::*;

/// Boxed future awaited by the executor before a retry attempt.
pub type PauseFuture<'a> = Pin<Box<dyn Future<Output = ()> + 'a + Send>>;

/// Delay schedule between attempts of one request.
pub trait RetryPolicy
where
	Self: 'static + Send + Sync,
{
	/// Delay before retry `attempt` (1-based; attempt 0 is the initial try and is
	/// never delayed). `None` means retry immediately.
	///
	/// Implementing this alone is enough: the default [`pause`](RetryPolicy::pause)
	/// honors whatever schedule is returned here.
	fn next_delay(&self, attempt: u32) -> Option<Duration>;

	/// Awaitable pause honoring [`next_delay`](RetryPolicy::next_delay).
	///
	/// The default implementation resolves immediately for `None` and otherwise
	/// parks a helper thread for the duration, signalling completion through an
	/// async semaphore; the crate itself depends on no async runtime. Policies
	/// running inside a runtime with a timer should override this with that timer.
	fn pause(&self, attempt: u32) -> PauseFuture<'_> {
		let Some(delay) = self.next_delay(attempt) else {
			return Box::pin(std::future::ready(()));
		};

		Box::pin(async move {
			let gate = Arc::new(Semaphore::new(0));
			let alarm = gate.clone();

			std::thread::spawn(move || {
				std::thread::sleep(delay.unsigned_abs());

				alarm.add_permits(1);
			});

			drop(gate.acquire().await);
		})
	}
}

/// Zero-delay policy matching the service client's reference behavior.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImmediateRetry;
impl RetryPolicy for ImmediateRetry {
	fn next_delay(&self, _: u32) -> Option<Duration> {
		None
	}
}
