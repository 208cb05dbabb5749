use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
    time::Duration,
};

use tokio::{runtime::Handle, task::JoinHandle};

pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Runs a task once after a delay. The returned handle cancels it.
pub trait Scheduler: Send + Sync {
    fn schedule(&self, delay: Duration, task: Task) -> TimerHandle;
}

pub struct TimerHandle {
    kind: HandleKind,
}

enum HandleKind {
    Tokio(JoinHandle<()>),
    Manual { id: u64, queue: Weak<Mutex<ManualQueue>> },
}

impl TimerHandle {
    /// Cancelling a timer that already fired is harmless.
    pub fn cancel(self) {
        match self.kind {
            HandleKind::Tokio(task) => task.abort(),
            HandleKind::Manual { id, queue } => {
                if let Some(queue) = queue.upgrade() {
                    lock(&queue).pending.retain(|p| p.id != id);
                }
            }
        }
    }
}

fn lock(queue: &Mutex<ManualQueue>) -> MutexGuard<'_, ManualQueue> {
    queue.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Timers as tokio tasks on the given runtime.
#[derive(Clone)]
pub struct TokioScheduler {
    runtime: Handle,
}

impl TokioScheduler {
    pub fn new(runtime: Handle) -> Self {
        Self { runtime }
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TimerHandle {
        let join = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        });
        TimerHandle {
            kind: HandleKind::Tokio(join),
        }
    }
}

struct PendingTask {
    id: u64,
    due: Duration,
    task: Task,
}

#[derive(Default)]
struct ManualQueue {
    now: Duration,
    next_id: u64,
    pending: Vec<PendingTask>,
}

/// Deterministic scheduler driven by a virtual clock. Nothing fires until
/// the clock is advanced, which makes timing observable in headless runs.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    queue: Arc<Mutex<ManualQueue>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of timers scheduled and not yet fired or cancelled.
    pub fn live(&self) -> usize {
        lock(&self.queue).pending.len()
    }

    pub fn now(&self) -> Duration {
        lock(&self.queue).now
    }

    /// Delay from now until the earliest pending timer.
    pub fn next_due(&self) -> Option<Duration> {
        let queue = lock(&self.queue);
        queue
            .pending
            .iter()
            .map(|p| p.due)
            .min()
            .map(|due| due.saturating_sub(queue.now))
    }

    /// Moves the clock to the earliest timer and fires it.
    pub fn fire_next(&self) -> bool {
        let task = {
            let mut queue = lock(&self.queue);
            let Some(index) = (0..queue.pending.len()).min_by_key(|&i| queue.pending[i].due) else {
                return false;
            };
            let pending = queue.pending.remove(index);
            queue.now = queue.now.max(pending.due);
            pending.task
        };
        // The task may schedule again, so the queue must be unlocked here.
        task();
        true
    }

    /// Advances the clock by `by`, firing everything that falls due on the
    /// way in due order. Returns how many timers fired.
    pub fn advance(&self, by: Duration) -> usize {
        let deadline = lock(&self.queue).now + by;
        let mut fired = 0;
        while self
            .next_due()
            .is_some_and(|delay| self.now() + delay <= deadline)
        {
            self.fire_next();
            fired += 1;
        }
        lock(&self.queue).now = deadline;
        fired
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TimerHandle {
        let mut queue = lock(&self.queue);
        let id = queue.next_id;
        queue.next_id += 1;
        let due = queue.now + delay;
        queue.pending.push(PendingTask { id, due, task });

        TimerHandle {
            kind: HandleKind::Manual {
                id,
                queue: Arc::downgrade(&self.queue),
            },
        }
    }
}
