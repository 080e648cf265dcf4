// self
use crate::{_prelude::*, request::Method};

/// A span builder used by the dispatcher.
#[derive(Clone, Debug)]
pub struct RequestSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl RequestSpan {
	/// Creates a new span tagged with the HTTP verb and endpoint label.
	pub fn new(method: Method, endpoint: &str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("apple_music.request", method = method.as_str(), endpoint);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (method, endpoint);

			Self {}
		}
	}

	/// Enters the span for the duration of the blocking round trip.
	pub fn entered(self) -> RequestSpanGuard {
		#[cfg(feature = "tracing")]
		{
			RequestSpanGuard { guard: self.span.entered() }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = self;

			RequestSpanGuard {}
		}
	}
}

/// RAII guard returned by [`RequestSpan::entered`].
pub struct RequestSpanGuard {
	#[cfg(feature = "tracing")]
	#[allow(dead_code)]
	guard: tracing::span::EnteredSpan,
}
impl Debug for RequestSpanGuard {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("RequestSpanGuard(..)")
	}
}

/// Emits a debug event (when tracing is enabled).
pub(crate) fn debug_event(message: &str) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!("{message}");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = message;
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn spans_open_and_close_per_dispatch() {
		let calls = [(Method::Get, "catalog_song"), (Method::Post, "library_playlist_create")];

		for (method, endpoint) in calls {
			let guard = RequestSpan::new(method, endpoint).entered();

			debug_event("Request failed.");
			drop(guard);
		}
	}

	#[test]
	fn guard_debug_is_opaque() {
		let guard = RequestSpan::new(Method::Delete, "library_playlist_delete").entered();

		assert_eq!(format!("{guard:?}"), "RequestSpanGuard(..)");
	}
}
