/// One-shot and repeating timers on the simulation clock.
///
/// Timers carry a `TimerAction` instead of a callback; `compute` decides
/// what each action means. Dropping the scheduler cancels everything in it,
/// which is how a restart discards the previous run's timers.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerAction {
    SpawnCollidingEnemy { epoch: u64 },
    SpawnShooter { epoch: u64 },
    EnemyFire,
    EndIntermission,
}

#[derive(Clone, Debug, PartialEq)]
struct Timer {
    due_ms: u64,
    /// Insertion order, used to keep equal due times FIFO.
    seq: u64,
    period_ms: Option<u64>,
    action: TimerAction,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scheduler {
    timers: Vec<Timer>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire `action` once, `delay_ms` after `now_ms`.
    pub fn once(&mut self, now_ms: u64, delay_ms: u64, action: TimerAction) {
        self.push(now_ms + delay_ms, None, action);
    }

    /// Fire `action` every `period_ms`, first at `now_ms + period_ms`.
    /// A zero period is bumped to 1ms so `drain_due` always terminates.
    pub fn repeating(&mut self, now_ms: u64, period_ms: u64, action: TimerAction) {
        let period_ms = period_ms.max(1);
        self.push(now_ms + period_ms, Some(period_ms), action);
    }

    fn push(&mut self, due_ms: u64, period_ms: Option<u64>, action: TimerAction) {
        self.timers.push(Timer {
            due_ms,
            seq: self.next_seq,
            period_ms,
            action,
        });
        self.next_seq += 1;
    }

    /// Remove and return every action due at or before `now_ms`, earliest
    /// first. A repeating timer that missed several periods fires once per
    /// missed period and stays armed.
    pub fn drain_due(&mut self, now_ms: u64) -> Vec<(u64, TimerAction)> {
        let mut fired = Vec::new();
        loop {
            let next = self
                .timers
                .iter()
                .enumerate()
                .filter(|(_, t)| t.due_ms <= now_ms)
                .min_by_key(|(_, t)| (t.due_ms, t.seq))
                .map(|(i, _)| i);
            let Some(i) = next else { break };

            let timer = self.timers.swap_remove(i);
            fired.push((timer.due_ms, timer.action));
            if let Some(period_ms) = timer.period_ms {
                self.push(timer.due_ms + period_ms, Some(period_ms), timer.action);
            }
        }
        fired
    }

    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    pub fn count_matching(&self, pred: impl Fn(&TimerAction) -> bool) -> usize {
        self.timers.iter().filter(|t| pred(&t.action)).count()
    }

    /// Due time of the earliest pending timer, if any.
    pub fn next_due(&self) -> Option<u64> {
        self.timers.iter().map(|t| t.due_ms).min()
    }
}
