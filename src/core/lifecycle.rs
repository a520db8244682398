use log::info;

use super::frame_loop::{FrameLoop, FrameTicket};

/// Releases everything a mounted scene allocated. Must tolerate being called
/// more than once.
pub trait Teardown {
    fn teardown(&mut self);
}

impl<T: Teardown + ?Sized> Teardown for Box<T> {
    fn teardown(&mut self) {
        (**self).teardown();
    }
}

/// Owns at most one mounted scene handle and its frame loop.
///
/// Unmounted → mounted on `mount`, back on `unmount` or drop. The handle is
/// never reused: every mount builds a fresh one.
pub struct Lifecycle<H: Teardown> {
    handle: Option<H>,
    frames: FrameLoop,
    mounts: u64,
}

impl<H: Teardown> Lifecycle<H> {
    pub fn new() -> Self {
        Self {
            handle: None,
            frames: FrameLoop::new(),
            mounts: 0,
        }
    }

    /// Build and mount a new handle, unmounting the current one first. If
    /// `build` fails the manager stays unmounted.
    pub fn mount<F, E>(&mut self, build: F) -> Result<(), E>
    where
        F: FnOnce() -> Result<H, E>,
    {
        self.unmount();
        let handle = build()?;
        self.handle = Some(handle);
        self.mounts += 1;
        self.frames.start();
        info!("scene mounted (mount #{})", self.mounts);
        Ok(())
    }

    /// Cancel the pending frame and release the handle. Returns false when
    /// nothing was mounted.
    pub fn unmount(&mut self) -> bool {
        self.frames.cancel();
        match self.handle.take() {
            Some(mut handle) => {
                handle.teardown();
                info!("scene unmounted");
                true
            }
            None => false,
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.handle.is_some()
    }

    pub fn mount_count(&self) -> u64 {
        self.mounts
    }

    pub fn handle(&self) -> Option<&H> {
        self.handle.as_ref()
    }

    pub fn handle_mut(&mut self) -> Option<&mut H> {
        self.handle.as_mut()
    }

    pub fn frame_pending(&self) -> bool {
        self.frames.is_pending()
    }

    pub fn pending_ticket(&self) -> Option<FrameTicket> {
        self.frames.pending()
    }

    /// Fire `ticket`, tick the scene and schedule the next frame. Stale tickets
    /// (from an earlier mount, or already fired) do nothing.
    pub fn fire<R>(&mut self, ticket: FrameTicket, tick: impl FnOnce(&mut H, u64) -> R) -> Option<R> {
        if !self.frames.fire(ticket) {
            return None;
        }
        let handle = self.handle.as_mut()?;
        let out = tick(handle, ticket.frame());
        self.frames.schedule();
        Some(out)
    }

    /// Fire whatever ticket is pending
    pub fn run_frame<R>(&mut self, tick: impl FnOnce(&mut H, u64) -> R) -> Option<R> {
        let ticket = self.frames.pending()?;
        self.fire(ticket, tick)
    }
}

impl<H: Teardown> Default for Lifecycle<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Teardown> Drop for Lifecycle<H> {
    fn drop(&mut self) {
        self.unmount();
    }
}
