use std::collections::{BTreeMap, VecDeque};

/// Simulated time in whole microseconds.
pub type SimTime = u64;

const MICROS_PER_SEC: f64 = 1_000_000.0;

#[inline]
pub fn secs_to_sim(secs: f32) -> SimTime {
    assert!(
        secs.is_finite() && secs >= 0.0,
        "delay must be finite and non-negative, got {secs}"
    );
    (secs as f64 * MICROS_PER_SEC).round() as SimTime
}

#[inline]
pub fn sim_to_secs(t: SimTime) -> f32 {
    (t as f64 / MICROS_PER_SEC) as f32
}

pub struct Envelope<T> {
    pub id: u64,
    pub fire_at: SimTime,
    pub payload: T,
}

/// One-shot deferred events keyed by fire time.
///
/// Entries come out of [`Scheduler::pop_ready`] in non-decreasing `fire_at`
/// order, FIFO among entries scheduled for the same instant. The clock only
/// moves through [`Scheduler::advance`], so callbacks always land on a tick
/// boundary.
pub struct Scheduler<T> {
    // map of fire time -> FIFO queue of events
    by_time: BTreeMap<SimTime, VecDeque<Envelope<T>>>,
    now: SimTime,
    next_id: u64,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            by_time: BTreeMap::new(),
            now: 0,
            next_id: 1,
        }
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn alloc_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1).max(1);
        id
    }

    #[inline]
    pub fn now(&self) -> SimTime {
        self.now
    }

    #[inline]
    pub fn now_secs(&self) -> f32 {
        sim_to_secs(self.now)
    }

    pub fn schedule_at(&mut self, fire_at: SimTime, payload: T) -> u64 {
        let id = self.alloc_id();
        let env = Envelope {
            id,
            fire_at,
            payload,
        };
        self.by_time.entry(fire_at).or_default().push_back(env);
        log::trace!(target: "events", "scheduled #{} at {}us (now {}us)", id, fire_at, self.now);
        id
    }

    pub fn schedule_after(&mut self, delay_secs: f32, payload: T) -> u64 {
        let at = self.now.saturating_add(secs_to_sim(delay_secs));
        self.schedule_at(at, payload)
    }

    /// Removes a pending entry. Returns false if it already fired or never existed.
    pub fn cancel(&mut self, id: u64) -> bool {
        let mut emptied = None;
        let mut found = false;
        for (t, q) in self.by_time.iter_mut() {
            if let Some(pos) = q.iter().position(|e| e.id == id) {
                q.remove(pos);
                found = true;
                if q.is_empty() {
                    emptied = Some(*t);
                }
                break;
            }
        }
        if let Some(t) = emptied {
            self.by_time.remove(&t);
        }
        found
    }

    pub fn advance(&mut self, dt_secs: f32) {
        self.now = self.now.saturating_add(secs_to_sim(dt_secs.max(0.0)));
    }

    /// Pops the earliest entry whose fire time has been reached.
    pub fn pop_ready(&mut self) -> Option<Envelope<T>> {
        let mut entry = self.by_time.first_entry()?;
        if *entry.key() > self.now {
            return None;
        }
        let env = entry.get_mut().pop_front();
        if entry.get().is_empty() {
            entry.remove();
        }
        env
    }

    /// Drains everything due at the current time, in firing order.
    pub fn drain_ready(&mut self) -> Vec<Envelope<T>> {
        let mut out = Vec::new();
        while let Some(env) = self.pop_ready() {
            out.push(env);
        }
        out
    }

    pub fn pending(&self) -> usize {
        self.by_time.values().map(VecDeque::len).sum()
    }

    pub fn next_fire_time(&self) -> Option<SimTime> {
        self.by_time.keys().next().copied()
    }
}
