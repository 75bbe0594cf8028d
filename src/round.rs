//! Round controller: lifecycle, commit scoring, gravity and timer wiring.

use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::GameConfig;
use crate::grid::{Cell, Grid};
use crate::score::HighScoreSink;
use crate::selector::{ChainSelector, GestureEvent, GridGeometry};
use crate::timer::CountdownTimer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundState {
    Running,
    Paused,
    Finished,
}

/// Side effects for the event loop to carry out after driving the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundEvent {
    /// The countdown expired and the round just finished.
    TimeUp,
    /// Display tick with the current remaining seconds.
    Tick(u64),
}

/// Read-only render state, refreshed on every mutation and tick.
#[derive(Debug, Clone)]
pub struct RoundSnapshot {
    pub size: usize,
    pub cells: Vec<Option<Cell>>,
    pub score: u32,
    pub remaining_secs: u64,
    pub state: RoundState,
}

/// One play session: a grid, its countdown, the in-progress chain and the
/// score. The round owns all of its state; `exit` consumes the round, so a
/// destroyed round cannot be touched.
pub struct Round {
    config: GameConfig,
    grid: Grid,
    timer: CountdownTimer,
    selector: ChainSelector,
    score: u32,
    state: RoundState,
    rng: StdRng,
}

impl Round {
    pub fn new(config: GameConfig, now: Instant) -> Self {
        let mut rng = StdRng::from_entropy();
        let grid = Grid::random(usize::from(config.size), &mut rng);
        let mut timer = CountdownTimer::new(Duration::from_secs(config.duration_secs));
        timer.start(now);
        Self {
            config,
            grid,
            timer,
            selector: ChainSelector::default(),
            score: 0,
            state: RoundState::Running,
            rng,
        }
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Feed one gesture step into the round. Anything outside `Running` is
    /// inert: paused and finished rounds ignore the pointer entirely.
    pub fn handle_gesture(&mut self, event: GestureEvent, geometry: &GridGeometry) {
        if self.state != RoundState::Running {
            return;
        }
        match event {
            GestureEvent::Begin(pos) => self.selector.begin(&mut self.grid, geometry, pos),
            GestureEvent::Extend(pos) => self.selector.extend(&mut self.grid, geometry, pos),
            GestureEvent::Commit(_) => self.commit(),
        }
    }

    /// Score and remove the committed chain, then let the touched columns
    /// refill. Clearing finishes before any column compacts, so gravity
    /// always sees the post-removal grid.
    fn commit(&mut self) {
        let path = self.selector.take_commit(&mut self.grid);
        if path.is_empty() {
            return;
        }
        let mut delta = 0u32;
        for (pos, &index) in path.iter().enumerate() {
            if let Some(cell) = self.grid.get(index) {
                delta += u32::from(cell.value) * (pos as u32 + 1);
            }
            self.grid.set(index, None);
        }
        let mut cols: Vec<usize> = path.iter().map(|&i| self.grid.col_of(i)).collect();
        cols.sort_unstable();
        cols.dedup();
        for col in cols {
            self.grid.compact_column(col, &mut self.rng);
        }
        self.score += delta;
    }

    /// Drive the timer schedules. Call once per event-loop turn; expiry
    /// finishes the round and reports the final score to `sink`.
    pub fn poll(&mut self, now: Instant, sink: &mut dyn HighScoreSink) -> Vec<RoundEvent> {
        let mut events = Vec::new();
        if self.timer.poll_expiry(now) && self.state == RoundState::Running {
            self.finish(sink);
            events.push(RoundEvent::TimeUp);
        }
        if let Some(remaining) = self.timer.poll_tick(now) {
            events.push(RoundEvent::Tick(remaining));
        }
        events
    }

    fn finish(&mut self, sink: &mut dyn HighScoreSink) {
        self.selector.abort(&mut self.grid);
        self.state = RoundState::Finished;
        sink.append(self.config.size, self.config.duration_secs, self.score);
    }

    /// `Running` -> `Paused`; freezes the countdown. No-op elsewhere.
    pub fn pause(&mut self, now: Instant) {
        if self.state == RoundState::Running {
            self.timer.pause(now);
            self.state = RoundState::Paused;
        }
    }

    /// `Paused` -> `Running`; the countdown continues from the frozen value.
    pub fn resume(&mut self, now: Instant) {
        if self.state == RoundState::Paused {
            self.timer.resume(now);
            self.state = RoundState::Running;
        }
    }

    /// `Finished` -> `Running`: zero the score, regenerate the grid and
    /// restart the countdown from the full duration. No-op in any other
    /// state; a replay request cannot interrupt a live round.
    pub fn new_round(&mut self, now: Instant) {
        if self.state != RoundState::Finished {
            return;
        }
        self.score = 0;
        self.timer.reset();
        self.grid = Grid::random(usize::from(self.config.size), &mut self.rng);
        self.selector = ChainSelector::default();
        self.timer.start(now);
        self.state = RoundState::Running;
    }

    /// Abandon the round from any state. Consumes the round: grid, timer
    /// and selection go with it, and no stale expiry can outlive it. The
    /// caller owns the "exited" notification.
    pub fn exit(self) {}

    pub fn snapshot(&self, now: Instant) -> RoundSnapshot {
        let size = self.grid.size();
        RoundSnapshot {
            size,
            cells: (0..size * size).map(|i| self.grid.get(i)).collect(),
            score: self.score,
            remaining_secs: self.timer.remaining_secs(now),
            state: self.state,
        }
    }
}
