//! Embedded-content container shared between the host shell and the registry.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

/// Sandbox allow-list applied to every embedded session container.
///
/// Top-navigation and pointer-lock are deliberately excluded so the embedded
/// session stays contained.
pub const SANDBOX_POLICY: &[&str] = &[
	"allow-same-origin",
	"allow-scripts",
	"allow-forms",
	"allow-modals",
	"allow-popups",
	"allow-downloads",
];

type DisposalObserver = Box<dyn FnOnce(&EmbedFrame) + Send>;

struct FrameState {
	src: String,
	title: String,
	caption: String,
	disposed: bool,
	observers: Vec<DisposalObserver>,
}

/// Clonable handle to an embedded-content container.
///
/// The host shell and the session registry co-own the frame; neither side
/// destroys it through the other. [`EmbedFrame::dispose`] is the single
/// teardown path and notifies each disposal observer exactly once.
#[derive(Clone)]
pub struct EmbedFrame {
	state: Arc<Mutex<FrameState>>,
}

impl EmbedFrame {
	/// Creates a container pointed at an address. Host shells with their own
	/// factory entry points construct frames directly and still participate
	/// in tracking through the registry.
	pub fn new(src: impl Into<String>, title: impl Into<String>) -> Self {
		Self {
			state: Arc::new(Mutex::new(FrameState {
				src: src.into(),
				title: title.into(),
				caption: String::new(),
				disposed: false,
				observers: Vec::new(),
			})),
		}
	}

	/// Current address displayed by the container.
	pub fn src(&self) -> String {
		self.state.lock().src.clone()
	}

	/// Points the container at a new address.
	pub fn set_src(&self, src: impl Into<String>) {
		self.state.lock().src = src.into();
	}

	/// Title shown by the host shell for this container.
	pub fn title(&self) -> String {
		self.state.lock().title.clone()
	}

	pub fn set_title(&self, title: impl Into<String>) {
		self.state.lock().title = title.into();
	}

	/// Longer-form caption shown alongside the title.
	pub fn caption(&self) -> String {
		self.state.lock().caption.clone()
	}

	pub fn set_caption(&self, caption: impl Into<String>) {
		self.state.lock().caption = caption.into();
	}

	/// Sandbox tokens the host must apply when placing this container.
	pub fn sandbox(&self) -> &'static [&'static str] {
		SANDBOX_POLICY
	}

	pub fn is_disposed(&self) -> bool {
		self.state.lock().disposed
	}

	/// Subscribes to disposal. The observer fires exactly once; subscribing
	/// after disposal fires immediately.
	pub fn on_disposed(&self, observer: impl FnOnce(&EmbedFrame) + Send + 'static) {
		{
			let mut state = self.state.lock();
			if !state.disposed {
				state.observers.push(Box::new(observer));
				return;
			}
		}
		observer(self);
	}

	/// Tears down the container. Idempotent; observers run outside the state
	/// lock so they may re-enter the frame.
	pub fn dispose(&self) {
		let observers = {
			let mut state = self.state.lock();
			if state.disposed {
				return;
			}
			state.disposed = true;
			std::mem::take(&mut state.observers)
		};
		debug!(target: "nbframe.frame", count = observers.len(), "disposing embedded container");
		for observer in observers {
			observer(self);
		}
	}

	/// Whether two handles refer to the same underlying container.
	pub fn same_container(&self, other: &EmbedFrame) -> bool {
		Arc::ptr_eq(&self.state, &other.state)
	}
}

impl fmt::Debug for EmbedFrame {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let state = self.state.lock();
		f.debug_struct("EmbedFrame")
			.field("src", &state.src)
			.field("title", &state.title)
			.field("disposed", &state.disposed)
			.finish_non_exhaustive()
	}
}
