use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// The state shared by the tasks of a round: how many tasks have finished and
/// the first solution found, if any.
///
/// Both fields live under the same lock, so the count is never stale with
/// respect to the solution.
#[derive(Debug, Default)]
struct RoundState {
    finished: usize,
    solution: Option<Box<[usize]>>,
}

/// The status of a round of tasks, one per configuration, all searching for a
/// path with the same eccentricity.
#[derive(Debug)]
pub(crate) struct RoundStatus {
    submitted: usize,
    state: Mutex<RoundState>,
    /// Signaled when the round concludes, that is, when a solution is
    /// installed or the last task finishes.
    concluded: Condvar,
}

impl RoundStatus {
    pub fn new(submitted: usize) -> Self {
        Self {
            submitted,
            state: Mutex::new(RoundState::default()),
            concluded: Condvar::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, RoundState> {
        // A poisoned lock means a task panicked, which aborts the process
        // anyway; the state itself is always consistent
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_concluded(&self, state: &RoundState) -> bool {
        state.solution.is_some() || state.finished >= self.submitted
    }

    /// Returns true if some task has already found a solution.
    pub fn is_solved(&self) -> bool {
        self.lock().solution.is_some()
    }

    /// Reports the end of a task; only the first solution reported is kept.
    pub fn report(&self, result: Option<Box<[usize]>>) {
        let mut state = self.lock();
        state.finished += 1;
        if state.solution.is_none() {
            state.solution = result;
        }
        if self.is_concluded(&state) {
            self.concluded.notify_all();
        }
    }

    /// Runs a task of the round, unless a solution has already been found,
    /// and reports its result.
    ///
    /// The check happens only at entry: a task that is skipped does not
    /// count as finished, and a running task is never interrupted.
    pub fn run(&self, solve: impl FnOnce() -> Option<Box<[usize]>>) {
        if self.is_solved() {
            return;
        }
        self.report(solve());
    }

    /// Waits until the round concludes, calling `on_progress` with the number
    /// of finished tasks every `interval`, and returns the solution found, if
    /// any.
    ///
    /// Tasks that have not finished yet when a solution is found are not
    /// waited for.
    pub fn wait(
        &self,
        interval: Duration,
        mut on_progress: impl FnMut(usize),
    ) -> Option<Box<[usize]>> {
        let mut state = self.lock();
        while !self.is_concluded(&state) {
            let (guard, timeout) = self
                .concluded
                .wait_timeout(state, interval)
                .unwrap_or_else(PoisonError::into_inner);
            state = guard;
            if timeout.timed_out() {
                let finished = state.finished;
                // The callback must not run under the lock
                drop(state);
                on_progress(finished);
                state = self.lock();
            }
        }
        let finished = state.finished;
        let solution = state.solution.clone();
        drop(state);
        on_progress(finished);
        solution
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_first_solution_wins() {
        let status = RoundStatus::new(3);
        status.report(None);
        assert!(!status.is_solved());
        status.report(Some(vec![1, 2].into_boxed_slice()));
        status.report(Some(vec![3].into_boxed_slice()));
        assert!(status.is_solved());
        let mut progress = vec![];
        let solution = status.wait(Duration::from_millis(1), |f| progress.push(f));
        assert_eq!(solution.as_deref(), Some(&[1, 2][..]));
        assert_eq!(progress, vec![3]);
    }

    #[test]
    fn test_run_skips_after_solution() {
        let status = RoundStatus::new(3);
        status.run(|| None);
        status.run(|| Some(vec![0, 1].into_boxed_slice()));
        assert_eq!(status.lock().finished, 2);

        let mut called = false;
        status.run(|| {
            called = true;
            Some(vec![2].into_boxed_slice())
        });
        assert!(!called);
        let state = status.lock();
        assert_eq!(state.finished, 2);
        assert_eq!(state.solution.as_deref(), Some(&[0, 1][..]));
    }

    #[test]
    fn test_all_finished_without_solution() {
        let status = Arc::new(RoundStatus::new(4));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let status = Arc::clone(&status);
                std::thread::spawn(move || status.report(None))
            })
            .collect();
        let solution = status.wait(Duration::from_millis(5), |_| {});
        assert_eq!(solution, None);
        for handle in handles {
            handle.join().unwrap();
        }
        assert!(!status.is_solved());
    }
}
