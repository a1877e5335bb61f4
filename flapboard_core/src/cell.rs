//! Per-cell flip state machine.
//!
//! A cell is either idle, showing `current`, or turning: a step is in flight
//! toward `incoming`, armed at `step_started`. When the step completes the
//! cell shows `incoming` and either settles (it now shows `target`) or picks
//! the next symbol and arms another step. Intermediate symbols always come
//! from the safe alphabet; only the final symbol may be off the wheel.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{BoardError, Result};
use crate::symbol::{SafeAlphabet, Symbol};

pub const DEFAULT_SNAP_CHANCE: f32 = 0.15;
pub const DEFAULT_MAX_STEPS: u32 = 24;

/// How a turning cell picks the symbol it shows next.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StepPolicy {
    /// Walk the wheel in order, like the physical flaps.
    #[default]
    Cycle,
    /// Show random wheel symbols, snapping onto the target with
    /// `snap_chance` per step and always after `max_steps` steps.
    Blur { snap_chance: f32, max_steps: u32 },
}

impl StepPolicy {
    pub fn blur() -> Self {
        Self::Blur {
            snap_chance: DEFAULT_SNAP_CHANCE,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }

    pub fn validate(self) -> Result<Self> {
        if let Self::Blur { snap_chance, max_steps } = self {
            if !(0.0..=1.0).contains(&snap_chance) {
                return Err(BoardError::InvalidSnapChance(snap_chance));
            }
            if max_steps == 0 {
                return Err(BoardError::InvalidTiming("blur needs at least one step"));
            }
        }
        Ok(self)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Cycle => "Cycle",
            Self::Blur { .. } => "Blur",
        }
    }
}

/// Small seeded generator for the blur policy and generated art.
/// Same seed, same sequence.
#[derive(Debug, Clone)]
pub struct FlapRng {
    state: u64,
}

impl FlapRng {
    pub fn seeded(seed: u64) -> Self {
        let mut hasher = DefaultHasher::new();
        seed.hash(&mut hasher);
        Self { state: hasher.finish() }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1103515245).wrapping_add(12345);
        (self.state >> 16) as u32
    }

    /// Uniform-ish index in `0..n`. `n` must be non-zero.
    pub fn below(&mut self, n: usize) -> usize {
        self.next_u32() as usize % n
    }

    /// Value in `[0, 1)`.
    pub fn chance(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }
}

/// Result of completing one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Showing the target; the cell is idle.
    Settled,
    /// Another step was armed.
    Turning,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CellState {
    current: Symbol,
    target: Symbol,
    incoming: Option<Symbol>,
    step_started: Duration,
    steps_taken: u32,
}

impl CellState {
    pub fn current(&self) -> &Symbol {
        &self.current
    }

    pub fn target(&self) -> &Symbol {
        &self.target
    }

    /// Symbol the in-flight step is turning to.
    pub fn incoming(&self) -> Option<&Symbol> {
        self.incoming.as_ref()
    }

    pub fn is_animating(&self) -> bool {
        self.incoming.is_some()
    }

    pub fn steps_taken(&self) -> u32 {
        self.steps_taken
    }

    /// When the in-flight step completes.
    pub fn deadline(&self, flip: Duration) -> Option<Duration> {
        self.incoming.as_ref().map(|_| self.step_started + flip)
    }

    /// Fraction of the in-flight step already shown.
    pub fn progress(&self, now: Duration, flip: Duration) -> Option<f32> {
        self.incoming.as_ref()?;
        let elapsed = now.saturating_sub(self.step_started).as_secs_f32();
        Some((elapsed / flip.as_secs_f32()).clamp(0.0, 1.0))
    }

    /// Point the cell at `target`. Starts turning only when idle; a turning
    /// cell keeps its step and sees the new target when the step completes.
    /// Returns true when a new animation started.
    pub(crate) fn retarget(
        &mut self,
        target: Symbol,
        alphabet: &SafeAlphabet,
        policy: StepPolicy,
        rng: &mut FlapRng,
        now: Duration,
    ) -> bool {
        if self.target != target {
            self.target = target;
            self.steps_taken = 0;
        }
        if self.is_animating() || self.current == self.target {
            return false;
        }
        self.arm(alphabet, policy, rng, now);
        true
    }

    pub(crate) fn complete_step(
        &mut self,
        alphabet: &SafeAlphabet,
        policy: StepPolicy,
        rng: &mut FlapRng,
        now: Duration,
    ) -> StepOutcome {
        let Some(shown) = self.incoming.take() else {
            return StepOutcome::Settled;
        };
        self.current = shown;
        self.steps_taken += 1;

        if let StepPolicy::Blur { snap_chance, max_steps } = policy {
            if self.current != self.target
                && (rng.chance() < snap_chance || self.steps_taken >= max_steps)
            {
                self.current = self.target.clone();
            }
        }

        if self.current == self.target {
            self.steps_taken = 0;
            return StepOutcome::Settled;
        }
        self.arm(alphabet, policy, rng, now);
        StepOutcome::Turning
    }

    fn arm(
        &mut self,
        alphabet: &SafeAlphabet,
        policy: StepPolicy,
        rng: &mut FlapRng,
        now: Duration,
    ) {
        self.incoming = Some(self.next_symbol(alphabet, policy, rng));
        self.step_started = now;
    }

    fn next_symbol(
        &self,
        alphabet: &SafeAlphabet,
        policy: StepPolicy,
        rng: &mut FlapRng,
    ) -> Symbol {
        match policy {
            StepPolicy::Cycle => {
                let on_wheel = alphabet.contains(&self.target);
                // An off-wheel target sits just past the last wheel symbol.
                let lap_done = self.steps_taken as usize > alphabet.len();
                if lap_done || (!on_wheel && &self.current == alphabet.last()) {
                    self.target.clone()
                } else {
                    alphabet.successor(&self.current).clone()
                }
            }
            StepPolicy::Blur { .. } => alphabet
                .get(rng.below(alphabet.len()))
                .cloned()
                .unwrap_or_else(|| self.target.clone()),
        }
    }
}
