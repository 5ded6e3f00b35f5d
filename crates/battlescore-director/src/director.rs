//! The Battle Director — turns events into state changes and playback.
//!
//! Events arrive either as explicit calls or as free-text narration run
//! through [`crate::narration::classify`]; both paths dispatch through
//! the same transition operations. State is committed before any provider
//! call so concurrent requests observe a consistent in-progress state.

use std::sync::{Arc, Mutex};

use battlescore_core::clock::Clock;
use battlescore_core::error::DirectorError;
use battlescore_core::provider::AudioProvider;
use battlescore_core::rng::DeterministicRng;
use battlescore_core::track::Track;
use serde::Serialize;
use tracing::info;

use crate::narration::{self, NarrationEvent, PhaseTarget};
use crate::selector::TrackSelector;
use crate::state::{BattleKind, BattleState, BattleStateStore};
use crate::volume::{Intensity, TransitionKind, VolumeCurveEngine, auto_intensity};

/// Result of ending an encounter.
#[derive(Debug, Clone, Serialize)]
pub struct BattleOutcome {
    /// Whether the ended encounter was a boss fight.
    pub was_boss: bool,
    /// The victory sting cued, when an encounter was actually running.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub victory_track: Option<Track>,
}

/// Result of dispatching a line of narration.
#[derive(Debug, Clone, Serialize)]
pub struct NarrationOutcome {
    /// Which event the narration resolved to ("none" when nothing
    /// battle-related was found).
    pub handled_event: &'static str,
    /// The battle state after dispatch, when the event touched it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub battle_state: Option<BattleState>,
    /// The victory sting cued by an end-of-battle narration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub victory_track: Option<Track>,
}

/// Orchestrates the battle state store, track selector, and volume
/// engine into one event-driven director.
pub struct BattleDirector {
    store: BattleStateStore,
    selector: TrackSelector,
    engine: VolumeCurveEngine,
}

impl BattleDirector {
    /// Wire a director over one audio provider.
    #[must_use]
    pub fn new(
        provider: Arc<dyn AudioProvider>,
        clock: Arc<dyn Clock>,
        rng: Arc<Mutex<dyn DeterministicRng + Send>>,
        max_boss_phases: u8,
    ) -> Self {
        Self {
            store: BattleStateStore::new(clock, max_boss_phases),
            selector: TrackSelector::new(Arc::clone(&provider), rng),
            engine: VolumeCurveEngine::new(provider),
        }
    }

    /// Snapshot of the current battle state.
    #[must_use]
    pub fn state(&self) -> BattleState {
        self.store.snapshot()
    }

    /// Start a regular encounter and cue music for its context.
    ///
    /// # Errors
    ///
    /// Track selection and playback failures surface; the state change
    /// itself always succeeds and is committed first.
    pub async fn start_normal(&self, context: &str) -> Result<BattleState, DirectorError> {
        self.store.start_normal(context);
        info!(context, "normal encounter started");

        let track = self
            .selector
            .select_battle_track(BattleKind::Normal, 0, context)
            .await?;
        self.engine
            .transition(&track.uri, TransitionKind::Crossfade, Intensity::Medium)
            .await?;
        self.store.set_current_track(track);
        Ok(self.store.snapshot())
    }

    /// Start a boss fight at phase 1 and cue its build-up theme.
    ///
    /// # Errors
    ///
    /// `InvalidState` for an out-of-range phase count; track selection
    /// and playback failures surface.
    pub async fn start_boss(
        &self,
        context: &str,
        max_phases: u8,
    ) -> Result<BattleState, DirectorError> {
        let state = self.store.start_boss(context, max_phases)?;
        info!(context, max_phases, "boss encounter started");

        let track = self
            .selector
            .select_battle_track(BattleKind::Boss, state.phase, context)
            .await?;
        self.engine
            .transition(
                &track.uri,
                TransitionKind::BuildUp,
                auto_intensity(state.phase, state.max_phases),
            )
            .await?;
        self.store.set_current_track(track);
        Ok(self.store.snapshot())
    }

    /// Advance the boss fight (or jump to `target`) and crossfade into
    /// the new phase's theme at the auto-selected intensity. When the
    /// fight is already at the requested phase nothing is re-cued; the
    /// current theme keeps playing.
    ///
    /// # Errors
    ///
    /// `InvalidState` when no boss fight is running; track selection and
    /// playback failures surface.
    pub async fn advance_phase(&self, target: Option<u8>) -> Result<BattleState, DirectorError> {
        let advance = self.store.advance_phase(target)?;
        let state = advance.state;
        if !advance.changed {
            info!(phase = state.phase, "boss phase unchanged, keeping current theme");
            return Ok(state);
        }
        info!(phase = state.phase, max_phases = state.max_phases, "boss phase advanced");

        let track = self
            .selector
            .select_battle_track(BattleKind::Boss, state.phase, &state.context)
            .await?;
        self.engine
            .transition(
                &track.uri,
                TransitionKind::Crossfade,
                auto_intensity(state.phase, state.max_phases),
            )
            .await?;
        self.store.set_current_track(track);
        Ok(self.store.snapshot())
    }

    /// End the running encounter and cue a victory sting. Ending while
    /// idle is a no-op reporting `was_boss = false`.
    ///
    /// # Errors
    ///
    /// Victory-track selection and playback failures surface.
    pub async fn end_battle(&self) -> Result<BattleOutcome, DirectorError> {
        let ended = self.store.end();
        if !ended.was_active {
            return Ok(BattleOutcome {
                was_boss: false,
                victory_track: None,
            });
        }
        if let Some(duration) = ended.duration {
            info!(
                was_boss = ended.was_boss,
                seconds = duration.num_seconds(),
                "encounter ended"
            );
        }

        let track = self.selector.select_victory_track(ended.was_boss).await?;
        self.engine
            .transition(&track.uri, TransitionKind::Crossfade, Intensity::Low)
            .await?;
        Ok(BattleOutcome {
            was_boss: ended.was_boss,
            victory_track: Some(track),
        })
    }

    /// Play a caller-chosen track (or select one for `context`) with an
    /// explicit transition and intensity, leaving the battle state alone.
    ///
    /// # Errors
    ///
    /// Track selection and playback failures surface.
    pub async fn play_manual(
        &self,
        context: &str,
        track_uri: Option<String>,
        kind: TransitionKind,
        intensity: Intensity,
    ) -> Result<String, DirectorError> {
        let uri = match track_uri {
            Some(uri) => uri,
            None => {
                let state = self.store.snapshot();
                self.selector
                    .select_battle_track(state.kind, state.phase, context)
                    .await?
                    .uri
            }
        };
        info!(uri, ?kind, ?intensity, "manual playback requested");
        self.engine.transition(&uri, kind, intensity).await?;
        Ok(uri)
    }

    /// Classify a narration line and dispatch the resulting event
    /// through the same operations as the explicit API.
    ///
    /// # Errors
    ///
    /// Dispatch errors surface exactly as they would from the explicit
    /// operation; a redundant end-of-battle line is a handled no-op.
    pub async fn direct_narration(&self, narration: &str) -> Result<NarrationOutcome, DirectorError> {
        let event = narration::classify(narration);
        info!(?event, "narration classified");

        match event {
            NarrationEvent::EndBattle => {
                let outcome = self.end_battle().await?;
                Ok(NarrationOutcome {
                    handled_event: "end_battle",
                    battle_state: Some(self.store.snapshot()),
                    victory_track: outcome.victory_track,
                })
            }
            NarrationEvent::BossPhase { target } => {
                let target = match target {
                    PhaseTarget::Explicit(n) => Some(n),
                    PhaseTarget::Final => Some(self.store.snapshot().max_phases),
                    PhaseTarget::Next => None,
                };
                let state = self.advance_phase(target).await?;
                Ok(NarrationOutcome {
                    handled_event: "boss_phase",
                    battle_state: Some(state),
                    victory_track: None,
                })
            }
            NarrationEvent::StartBoss { phases, context } => {
                let state = self.start_boss(&context, phases).await?;
                Ok(NarrationOutcome {
                    handled_event: "start_boss",
                    battle_state: Some(state),
                    victory_track: None,
                })
            }
            NarrationEvent::StartNormal { context } => {
                let state = self.start_normal(&context).await?;
                Ok(NarrationOutcome {
                    handled_event: "start_normal",
                    battle_state: Some(state),
                    victory_track: None,
                })
            }
            NarrationEvent::NoOp => Ok(NarrationOutcome {
                handled_event: "none",
                battle_state: None,
                victory_track: None,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battlescore_test_support::{FixedClock, MockRng, RecordingAudioProvider, sample_tracks};
    use chrono::{TimeZone, Utc};

    fn director_with(provider: &Arc<RecordingAudioProvider>) -> BattleDirector {
        let clock = FixedClock(Utc.with_ymd_and_hms(2026, 3, 1, 20, 0, 0).unwrap());
        BattleDirector::new(
            Arc::clone(provider) as Arc<dyn AudioProvider>,
            Arc::new(clock),
            Arc::new(Mutex::new(MockRng)),
            4,
        )
    }

    fn seeded_provider() -> Arc<RecordingAudioProvider> {
        Arc::new(RecordingAudioProvider::new().with_tracks(sample_tracks(3)))
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_normal_commits_state_and_cues_a_track() {
        let provider = seeded_provider();
        let director = director_with(&provider);

        let state = director.start_normal("minor").await.unwrap();

        assert!(state.active);
        assert_eq!(state.kind, BattleKind::Normal);
        assert_eq!(
            state.current_track.map(|t| t.uri),
            Some("provider:track:0".to_owned())
        );
        assert_eq!(provider.played(), vec!["provider:track:0".to_owned()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_boss_flow_escalates_intensity_per_phase() {
        // maxPhases = 3: advancing to phase 2 sustains High, phase 3 Extreme.
        let provider = seeded_provider();
        let director = director_with(&provider);

        director.start_boss("boss", 3).await.unwrap();
        let before = provider.volume_steps();
        // Boss start at phase 1 of 3 builds up to the Medium sustain.
        assert_eq!(before.last(), Some(&60));

        let state = director.advance_phase(None).await.unwrap();
        assert_eq!(state.phase, 2);
        assert_eq!(provider.volume_steps().last(), Some(&80));

        let state = director.advance_phase(None).await.unwrap();
        assert_eq!(state.phase, 3);
        assert_eq!(provider.volume_steps().last(), Some(&100));
    }

    #[tokio::test(start_paused = true)]
    async fn test_advance_at_last_phase_keeps_current_theme() {
        let provider = seeded_provider();
        let director = director_with(&provider);
        director.start_boss("boss", 2).await.unwrap();
        director.advance_phase(None).await.unwrap();
        let calls_before = provider.calls().len();

        let state = director.advance_phase(None).await.unwrap();

        // Capped: no re-search, no re-play, no volume writes.
        assert_eq!(state.phase, 2);
        assert_eq!(provider.calls().len(), calls_before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_end_after_boss_reports_was_boss_with_fanfare() {
        let provider = seeded_provider();
        let director = director_with(&provider);
        director.start_boss("boss", 2).await.unwrap();

        let outcome = director.end_battle().await.unwrap();

        assert!(outcome.was_boss);
        assert!(outcome.victory_track.is_some());
        let state = director.state();
        assert!(!state.active);
        assert_eq!(state.kind, BattleKind::None);
    }

    #[tokio::test]
    async fn test_end_while_idle_skips_playback() {
        let provider = seeded_provider();
        let director = director_with(&provider);

        let outcome = director.end_battle().await.unwrap();

        assert!(!outcome.was_boss);
        assert!(outcome.victory_track.is_none());
        assert!(provider.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_narration_final_phase_jumps_to_max() {
        let provider = seeded_provider();
        let director = director_with(&provider);
        director.start_boss("boss", 3).await.unwrap();

        let outcome = director
            .direct_narration("The boss enters final phase")
            .await
            .unwrap();

        assert_eq!(outcome.handled_event, "boss_phase");
        assert_eq!(outcome.battle_state.unwrap().phase, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_narration_boss_onset_starts_three_phase_fight() {
        let provider = seeded_provider();
        let director = director_with(&provider);

        let outcome = director
            .direct_narration("The boss roars and the fight begins!")
            .await
            .unwrap();

        assert_eq!(outcome.handled_event, "start_boss");
        let state = outcome.battle_state.unwrap();
        assert_eq!(state.kind, BattleKind::Boss);
        assert_eq!(state.phase, 1);
        assert_eq!(state.max_phases, 3);
        assert_eq!(state.context, "boss");
    }

    #[tokio::test]
    async fn test_narration_end_while_idle_is_idempotent() {
        let provider = seeded_provider();
        let director = director_with(&provider);

        let outcome = director
            .direct_narration("Victory! The field falls silent.")
            .await
            .unwrap();

        assert_eq!(outcome.handled_event, "end_battle");
        assert!(outcome.victory_track.is_none());
        assert!(provider.calls().is_empty());
    }

    #[tokio::test]
    async fn test_narration_phase_without_boss_is_invalid_state() {
        let provider = seeded_provider();
        let director = director_with(&provider);

        let err = director
            .direct_narration("The boss enters phase 2")
            .await
            .unwrap_err();

        assert!(matches!(err, DirectorError::InvalidState(_)));
    }

    #[tokio::test]
    async fn test_narration_noop_touches_nothing() {
        let provider = seeded_provider();
        let director = director_with(&provider);

        let outcome = director
            .direct_narration("The innkeeper pours another round")
            .await
            .unwrap();

        assert_eq!(outcome.handled_event, "none");
        assert!(outcome.battle_state.is_none());
        assert!(provider.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_play_manual_with_explicit_uri_skips_selection() {
        let provider = seeded_provider();
        let director = director_with(&provider);

        let uri = director
            .play_manual(
                "minor",
                Some("provider:track:42".to_owned()),
                TransitionKind::Cut,
                Intensity::Low,
            )
            .await
            .unwrap();

        assert_eq!(uri, "provider:track:42");
        assert_eq!(provider.played(), vec!["provider:track:42".to_owned()]);
        // No search happened.
        assert!(provider
            .calls()
            .iter()
            .all(|c| !matches!(c, battlescore_test_support::AudioCall::Search { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn test_play_manual_without_uri_selects_for_context() {
        let provider = seeded_provider();
        let director = director_with(&provider);

        let uri = director
            .play_manual("elite", None, TransitionKind::FadeIn, Intensity::High)
            .await
            .unwrap();

        assert_eq!(uri, "provider:track:0");
    }
}
