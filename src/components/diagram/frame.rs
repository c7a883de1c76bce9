use std::cell::RefCell;
use std::rc::Rc;

/// Shared slots for an animation loop: the simulation state and the frame
/// callback. The callback reschedules itself through a clone of the loop,
/// so the two keep each other alive until [`FrameLoop::stop`] runs.
pub(crate) struct FrameLoop<S, C> {
	state: Rc<RefCell<Option<S>>>,
	callback: Rc<RefCell<Option<C>>>,
}

impl<S, C> Clone for FrameLoop<S, C> {
	fn clone(&self) -> Self {
		Self {
			state: self.state.clone(),
			callback: self.callback.clone(),
		}
	}
}

impl<S, C> FrameLoop<S, C> {
	pub fn new() -> Self {
		Self {
			state: Rc::new(RefCell::new(None)),
			callback: Rc::new(RefCell::new(None)),
		}
	}

	/// Handle to the state slot for event handlers.
	pub fn state(&self) -> Rc<RefCell<Option<S>>> {
		self.state.clone()
	}

	pub fn start(&self, state: S, callback: C) {
		*self.state.borrow_mut() = Some(state);
		*self.callback.borrow_mut() = Some(callback);
	}

	/// Run `f` on the callback, if the loop is still running.
	pub fn with_callback<R>(&self, f: impl FnOnce(&C) -> R) -> Option<R> {
		self.callback.borrow().as_ref().map(f)
	}

	/// Drop the state and hand the callback back. A callback that stops its
	/// own loop must not drop the returned value while it is still running.
	pub fn stop(&self) -> Option<C> {
		self.state.borrow_mut().take();
		self.callback.borrow_mut().take()
	}
}

#[cfg(test)]
mod tests {
	use std::rc::Weak;

	use super::*;

	type Frame = Box<dyn Fn() -> bool>;

	fn self_scheduling(frames: &FrameLoop<Vec<u32>, Frame>) -> Weak<RefCell<Option<Frame>>> {
		let inner = frames.clone();
		frames.start(
			vec![1, 2, 3],
			Box::new(move || inner.with_callback(|_| ()).is_some()),
		);
		Rc::downgrade(&frames.callback)
	}

	#[test]
	fn running_loop_keeps_itself_alive() {
		let frames = FrameLoop::new();
		let slot = self_scheduling(&frames);
		drop(frames);
		let leaked = slot.upgrade().unwrap();
		leaked.borrow_mut().take();
		drop(leaked);
		assert!(slot.upgrade().is_none());
	}

	#[test]
	fn stop_breaks_the_cycle() {
		let frames = FrameLoop::new();
		let slot = self_scheduling(&frames);
		let state = Rc::downgrade(&frames.state);

		let callback = frames.stop().unwrap();
		assert!(frames.with_callback(|_| ()).is_none());
		assert!(frames.state().borrow().is_none());
		assert!(!callback(), "a stopped loop does not reschedule");

		drop(callback);
		drop(frames);
		assert!(slot.upgrade().is_none());
		assert!(state.upgrade().is_none());
	}

	#[test]
	fn stop_twice_is_harmless() {
		let frames: FrameLoop<u8, Frame> = FrameLoop::new();
		frames.start(7, Box::new(|| true));
		assert_eq!(frames.with_callback(|cb| cb()), Some(true));
		assert!(frames.stop().is_some());
		assert!(frames.stop().is_none());
	}
}
