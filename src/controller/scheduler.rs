use std::cell::Cell;
use std::rc::Rc;

/// Handle to a scheduled task. Cancelling is idempotent and shared by all
/// clones of the handle.
#[derive(Debug, Clone)]
pub struct TaskHandle {
    id: u64,
    cancelled: Rc<Cell<bool>>,
}

impl TaskHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

struct Scheduled<T> {
    due_ms: u64,
    handle: TaskHandle,
    task: T,
}

/// Single-threaded timer queue on a virtual clock. Time only moves when the
/// owner pops due tasks.
pub struct Scheduler<T> {
    now_ms: u64,
    next_id: u64,
    pending: Vec<Scheduled<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_id: 0,
            pending: vec![],
        }
    }

    pub fn now(&self) -> u64 {
        self.now_ms
    }

    pub fn schedule(&mut self, delay_ms: u64, task: T) -> TaskHandle {
        let handle = TaskHandle {
            id: self.next_id,
            cancelled: Rc::new(Cell::new(false)),
        };
        self.next_id += 1;

        self.pending.push(Scheduled {
            due_ms: self.now_ms + delay_ms,
            handle: handle.clone(),
            task,
        });
        handle
    }

    /// Number of live (not cancelled) tasks.
    pub fn pending_count(&self) -> usize {
        self.pending
            .iter()
            .filter(|s| !s.handle.is_cancelled())
            .count()
    }

    /// Remove and return the earliest live task due at or before `until`,
    /// moving the clock to its due time. Ties run in scheduling order.
    /// When nothing is due the clock moves to `until`.
    pub fn pop_due(&mut self, until: u64) -> Option<T> {
        self.pending.retain(|s| !s.handle.is_cancelled());

        let next = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, s)| s.due_ms <= until)
            .min_by_key(|(_, s)| (s.due_ms, s.handle.id))
            .map(|(i, _)| i);

        match next {
            Some(i) => {
                let scheduled = self.pending.remove(i);
                self.now_ms = self.now_ms.max(scheduled.due_ms);
                Some(scheduled.task)
            }
            None => {
                self.now_ms = self.now_ms.max(until);
                None
            }
        }
    }
}
