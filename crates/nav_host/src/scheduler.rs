//! Deferred-task scheduling: paint-frame callbacks and cancellable one-shot timers.
//!
//! The browser adapter maps these onto `requestAnimationFrame` and `setTimeout`. Tests use
//! [`VirtualScheduler`], which only runs work when frames are flushed or time is advanced.

use std::{
    cell::RefCell,
    future::Future,
    pin::Pin,
    rc::Rc,
    task::{Context, Poll},
};

use futures::{channel::oneshot, FutureExt};

/// Deferred unit of work.
pub type Task = Box<dyn FnOnce()>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// Handle for a scheduled timer.
pub struct TaskId(pub u64);

/// Host service for deferring work on the UI thread.
pub trait Scheduler {
    /// Runs `task` before the next paint.
    fn request_frame(&self, task: Task);

    /// Runs `task` once after `delay_ms` milliseconds.
    fn schedule(&self, delay_ms: u32, task: Task) -> TaskId;

    /// Cancels a pending timer. Unknown or already-fired ids are ignored.
    fn cancel(&self, id: TaskId);
}

/// Future that resolves once its timer fires.
///
/// If the timer is cancelled, or the scheduler drops it, the future never resolves.
#[derive(Debug)]
pub struct Sleep {
    id: TaskId,
    fired: oneshot::Receiver<()>,
}

impl Sleep {
    /// Timer handle, for [`Scheduler::cancel`].
    pub fn id(&self) -> TaskId {
        self.id
    }
}

impl Future for Sleep {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        match self.fired.poll_unpin(cx) {
            Poll::Ready(Ok(())) => Poll::Ready(()),
            Poll::Ready(Err(_)) | Poll::Pending => Poll::Pending,
        }
    }
}

/// Starts a timer on `scheduler` and returns a future for its expiry.
pub fn sleep(scheduler: &dyn Scheduler, delay_ms: u32) -> Sleep {
    let (tx, rx) = oneshot::channel::<()>();
    let id = scheduler.schedule(
        delay_ms,
        Box::new(move || {
            let _ = tx.send(());
        }),
    );
    Sleep { id, fired: rx }
}

struct PendingTimer {
    due_ms: u64,
    id: TaskId,
    task: Task,
}

#[derive(Default)]
struct VirtualInner {
    now_ms: u64,
    next_id: u64,
    frames: Vec<Task>,
    timers: Vec<PendingTimer>,
}

#[derive(Clone, Default)]
/// Deterministic scheduler driven by explicit frame flushes and virtual time.
pub struct VirtualScheduler {
    inner: Rc<RefCell<VirtualInner>>,
}

impl VirtualScheduler {
    /// Current virtual time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.inner.borrow().now_ms
    }

    /// Number of frame callbacks waiting for the next flush.
    pub fn pending_frames(&self) -> usize {
        self.inner.borrow().frames.len()
    }

    /// Number of timers not yet fired or cancelled.
    pub fn pending_timers(&self) -> usize {
        self.inner.borrow().timers.len()
    }

    /// Runs every frame callback queued so far. Callbacks queued while flushing wait for the
    /// next flush, like a real paint frame.
    pub fn run_frame(&self) -> usize {
        let frames = std::mem::take(&mut self.inner.borrow_mut().frames);
        let count = frames.len();
        for task in frames {
            task();
        }
        count
    }

    /// Advances virtual time by `ms`, firing due timers in deadline order.
    pub fn advance(&self, ms: u64) {
        let target = self.inner.borrow().now_ms.saturating_add(ms);
        loop {
            let next = {
                let mut inner = self.inner.borrow_mut();
                let due = inner
                    .timers
                    .iter()
                    .enumerate()
                    .filter(|(_, timer)| timer.due_ms <= target)
                    .min_by_key(|(_, timer)| (timer.due_ms, timer.id))
                    .map(|(index, _)| index);
                due.map(|index| {
                    let timer = inner.timers.remove(index);
                    inner.now_ms = inner.now_ms.max(timer.due_ms);
                    timer.task
                })
            };
            match next {
                Some(task) => task(),
                None => break,
            }
        }
        self.inner.borrow_mut().now_ms = target;
    }
}

impl Scheduler for VirtualScheduler {
    fn request_frame(&self, task: Task) {
        self.inner.borrow_mut().frames.push(task);
    }

    fn schedule(&self, delay_ms: u32, task: Task) -> TaskId {
        let mut inner = self.inner.borrow_mut();
        inner.next_id += 1;
        let id = TaskId(inner.next_id);
        let due_ms = inner.now_ms + u64::from(delay_ms);
        inner.timers.push(PendingTimer { due_ms, id, task });
        id
    }

    fn cancel(&self, id: TaskId) {
        self.inner.borrow_mut().timers.retain(|timer| timer.id != id);
    }
}
