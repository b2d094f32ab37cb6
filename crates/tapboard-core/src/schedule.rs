use std::cell::RefCell;
use std::rc::Rc;
use web_time::{Duration, Instant};

use crate::clock::{Clock, SystemClock};

type TaskFn = Rc<RefCell<Option<Box<dyn FnOnce()>>>>;

/// Handle to a scheduled task. The task runs at most once; cancelling after
/// it ran (or cancelling twice) is a no-op.
#[derive(Clone)]
pub struct TaskHandle(TaskFn);

impl TaskHandle {
    pub fn cancel(&self) {
        self.0.borrow_mut().take();
    }

    /// True once the task has run or been cancelled.
    pub fn is_spent(&self) -> bool {
        self.0.borrow().is_none()
    }
}

struct Task {
    due: Instant,
    run: TaskFn,
}

/// Host-pumped queue of one-shot deferred effects.
///
/// The keyboard manager schedules exactly two kinds of task here: the
/// close-grace re-check after a blur, and the scroll-into-view request after
/// an open. The host calls [`run_due`](TaskQueue::run_due) from its event
/// loop; there is no background thread.
pub struct TaskQueue {
    clock: Rc<dyn Clock>,
    tasks: RefCell<Vec<Task>>,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::with_clock(Rc::new(SystemClock))
    }

    pub fn with_clock(clock: Rc<dyn Clock>) -> Self {
        Self {
            clock,
            tasks: RefCell::new(Vec::new()),
        }
    }

    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    pub fn schedule(&self, delay: Duration, f: impl FnOnce() + 'static) -> TaskHandle {
        let run: TaskFn = Rc::new(RefCell::new(Some(Box::new(f) as Box<dyn FnOnce()>)));
        self.tasks.borrow_mut().push(Task {
            due: self.clock.now() + delay,
            run: run.clone(),
        });
        TaskHandle(run)
    }

    /// Runs every task whose deadline has passed, in schedule order. Tasks
    /// scheduled from inside a running task wait for the next pump.
    pub fn run_due(&self) {
        let now = self.clock.now();
        let drained = std::mem::take(&mut *self.tasks.borrow_mut());
        let mut due = Vec::new();
        let mut rest = Vec::new();
        for t in drained {
            if t.due <= now {
                due.push(t);
            } else {
                rest.push(t);
            }
        }
        // put the not-yet-due tasks back before running anything, so a task
        // that schedules appends after them
        self.tasks.borrow_mut().extend(rest);
        for t in due {
            let f = t.run.borrow_mut().take();
            if let Some(f) = f {
                f();
            }
        }
    }

    pub fn pending(&self) -> usize {
        self.tasks.borrow().len()
    }
}

impl Default for TaskQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::TestClock;
    use std::cell::Cell;

    #[test]
    fn test_runs_only_due_tasks() {
        let clock = TestClock::new();
        let q = TaskQueue::with_clock(Rc::new(clock.clone()));
        let hits = Rc::new(RefCell::new(Vec::new()));

        for (name, ms) in [("fast", 50u64), ("slow", 500)] {
            let hits = hits.clone();
            q.schedule(Duration::from_millis(ms), move || {
                hits.borrow_mut().push(name);
            });
        }

        clock.advance(Duration::from_millis(100));
        q.run_due();
        assert_eq!(*hits.borrow(), vec!["fast"]);
        assert_eq!(q.pending(), 1);

        clock.advance(Duration::from_millis(500));
        q.run_due();
        assert_eq!(*hits.borrow(), vec!["fast", "slow"]);
        assert_eq!(q.pending(), 0);
    }

    #[test]
    fn test_cancelled_task_never_runs() {
        let clock = TestClock::new();
        let q = TaskQueue::with_clock(Rc::new(clock.clone()));
        let ran = Rc::new(Cell::new(false));

        let ran_clone = ran.clone();
        let handle = q.schedule(Duration::from_millis(10), move || {
            ran_clone.set(true);
        });
        assert!(!handle.is_spent());
        handle.cancel();
        assert!(handle.is_spent());

        clock.advance(Duration::from_millis(20));
        q.run_due();
        assert!(!ran.get());
    }

    #[test]
    fn test_handle_is_spent_after_run() {
        let clock = TestClock::new();
        let q = TaskQueue::with_clock(Rc::new(clock.clone()));
        let handle = q.schedule(Duration::from_millis(10), || {});

        clock.advance(Duration::from_millis(10));
        q.run_due();
        assert!(handle.is_spent());
        handle.cancel(); // no-op
    }

    #[test]
    fn test_task_may_schedule_followup() {
        let clock = TestClock::new();
        let q = Rc::new(TaskQueue::with_clock(Rc::new(clock.clone())));
        let hits = Rc::new(Cell::new(0));

        let q2 = q.clone();
        let hits2 = hits.clone();
        q.schedule(Duration::from_millis(10), move || {
            hits2.set(hits2.get() + 1);
            let hits3 = hits2.clone();
            q2.schedule(Duration::from_millis(10), move || {
                hits3.set(hits3.get() + 1);
            });
        });

        clock.advance(Duration::from_millis(100));
        q.run_due();
        assert_eq!(hits.get(), 1); // follow-up waits for the next pump
        q.run_due();
        assert_eq!(hits.get(), 2);
    }
}
