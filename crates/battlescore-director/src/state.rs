//! Battle encounter state and its owning store.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use battlescore_core::clock::Clock;
use battlescore_core::error::DirectorError;
use battlescore_core::track::Track;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Kind of encounter currently in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleKind {
    /// No encounter running.
    None,
    /// A single-cue regular encounter.
    Normal,
    /// A multi-phase boss fight.
    Boss,
}

/// The single process-wide encounter state.
///
/// Invariant: `kind == Boss` implies `1 <= phase <= max_phases`; any other
/// kind implies `phase == 0 && max_phases == 0`.
#[derive(Debug, Clone, Serialize)]
pub struct BattleState {
    /// Whether an encounter is running.
    pub active: bool,
    /// Kind of the running encounter.
    pub kind: BattleKind,
    /// 0 outside boss fights; 1-indexed within one.
    pub phase: u8,
    /// Upper bound on `phase`; 0 outside boss fights.
    pub max_phases: u8,
    /// Free-form encounter tag ("minor", "elite", "ambush", "boss", ...).
    pub context: String,
    /// The track currently cued for this encounter, if any.
    pub current_track: Option<Track>,
    /// When the running encounter started; `None` while idle.
    pub started_at: Option<DateTime<Utc>>,
}

impl BattleState {
    fn idle() -> Self {
        Self {
            active: false,
            kind: BattleKind::None,
            phase: 0,
            max_phases: 0,
            context: String::new(),
            current_track: None,
            started_at: None,
        }
    }
}

/// Result of [`BattleStateStore::advance_phase`].
#[derive(Debug, Clone)]
pub struct PhaseAdvance {
    /// State after the advance.
    pub state: BattleState,
    /// Whether the phase actually moved. False when the fight is already
    /// at its last phase or the target equals the current phase.
    pub changed: bool,
}

/// Summary returned by [`BattleStateStore::end`].
#[derive(Debug, Clone)]
pub struct EndedEncounter {
    /// Whether the encounter that just ended was a boss fight.
    pub was_boss: bool,
    /// Whether any encounter was actually running.
    pub was_active: bool,
    /// How long the encounter ran, when one was running.
    pub duration: Option<Duration>,
}

/// Owns the single mutable [`BattleState`] and enforces its invariants.
///
/// Every operation is one lock-guarded read-modify-write. Callers receive
/// cloned snapshots, never references into the guarded state, so provider
/// calls happen outside the lock.
pub struct BattleStateStore {
    state: Mutex<BattleState>,
    clock: Arc<dyn Clock>,
    max_boss_phases: u8,
}

impl BattleStateStore {
    /// Create an idle store. `max_boss_phases` bounds `start_boss`.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, max_boss_phases: u8) -> Self {
        Self {
            state: Mutex::new(BattleState::idle()),
            clock,
            max_boss_phases,
        }
    }

    fn lock(&self) -> MutexGuard<'_, BattleState> {
        // A panic while holding the lock leaves consistent state behind;
        // recover the guard rather than propagating the poison.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn snapshot(&self) -> BattleState {
        self.lock().clone()
    }

    /// Start a regular encounter. Always succeeds, replacing whatever was
    /// running.
    pub fn start_normal(&self, context: &str) -> BattleState {
        let mut state = self.lock();
        *state = BattleState {
            active: true,
            kind: BattleKind::Normal,
            phase: 0,
            max_phases: 0,
            context: context.to_owned(),
            current_track: None,
            started_at: Some(self.clock.now()),
        };
        state.clone()
    }

    /// Start a boss fight at phase 1.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` unless `1 <= max_phases <= self.max_boss_phases`.
    pub fn start_boss(&self, context: &str, max_phases: u8) -> Result<BattleState, DirectorError> {
        if max_phases < 1 || max_phases > self.max_boss_phases {
            return Err(DirectorError::InvalidState(format!(
                "max_phases must be in 1..={}, got {max_phases}",
                self.max_boss_phases
            )));
        }
        let mut state = self.lock();
        *state = BattleState {
            active: true,
            kind: BattleKind::Boss,
            phase: 1,
            max_phases,
            context: context.to_owned(),
            current_track: None,
            started_at: Some(self.clock.now()),
        };
        Ok(state.clone())
    }

    /// Advance the boss fight by one phase, or jump to `target` (clamped
    /// to `[1, max_phases]`). Advancing past the last phase is a no-op
    /// that returns the state unchanged with `changed = false`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` when no boss fight is running.
    pub fn advance_phase(&self, target: Option<u8>) -> Result<PhaseAdvance, DirectorError> {
        let mut state = self.lock();
        if !state.active || state.kind != BattleKind::Boss {
            return Err(DirectorError::InvalidState(
                "no active boss fight to advance".to_owned(),
            ));
        }
        let next = match target {
            Some(explicit) => explicit.clamp(1, state.max_phases),
            None => state.phase.saturating_add(1).min(state.max_phases),
        };
        let changed = next != state.phase;
        state.phase = next;
        Ok(PhaseAdvance {
            state: state.clone(),
            changed,
        })
    }

    /// Record the track cued for the running encounter.
    pub fn set_current_track(&self, track: Track) {
        self.lock().current_track = Some(track);
    }

    /// Reset to the idle state, reporting what the ended encounter was.
    pub fn end(&self) -> EndedEncounter {
        let mut state = self.lock();
        let summary = EndedEncounter {
            was_boss: state.kind == BattleKind::Boss,
            was_active: state.active,
            duration: state.started_at.map(|started| self.clock.now() - started),
        };
        *state = BattleState::idle();
        summary
    }
}
