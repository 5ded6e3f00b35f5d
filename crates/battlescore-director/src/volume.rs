//! Volume curves — simulated crossfades as discrete volume-step commands.
//!
//! No real audio mixing happens here: each transition is an ordered
//! sequence of `set_volume` steps around a hard `play`, the way a DJ
//! ducks the level before a track switch and restores it after.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use battlescore_core::error::{DirectorError, ProviderError};
use battlescore_core::provider::AudioProvider;
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// How a track switch is performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    /// Immediate switch, no volume steps.
    Cut,
    /// Duck low, switch, restore after a beat.
    FadeIn,
    /// Duck to mid-low and switch.
    FadeOut,
    /// Duck to mid, switch, restore to sustain shortly after.
    Crossfade,
    /// Three ascending steps over growing delays, then switch.
    BuildUp,
}

/// Target sustain loudness, independent of the transition style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
    Low,
    Medium,
    High,
    Extreme,
    /// Starts below Medium and climbs on a timer until a ceiling.
    Escalating,
}

const SUSTAIN_LOW: u8 = 40;
const SUSTAIN_MEDIUM: u8 = 60;
const SUSTAIN_HIGH: u8 = 80;
const SUSTAIN_EXTREME: u8 = 100;

const ESCALATION_START: u8 = 50;
const ESCALATION_STEP: u8 = 5;
const ESCALATION_CEILING: u8 = 95;
const ESCALATION_PERIOD: Duration = Duration::from_millis(2000);

const DUCK_FADE_IN: u8 = 20;
const DUCK_FADE_OUT: u8 = 30;
const DUCK_CROSSFADE: u8 = 45;
const FADE_IN_RESTORE_DELAY: Duration = Duration::from_millis(800);
const CROSSFADE_RESTORE_DELAY: Duration = Duration::from_millis(400);
const BUILD_UP_STEPS: [(Duration, u8); 3] = [
    (Duration::ZERO, 30),
    (Duration::from_millis(600), 50),
    (Duration::from_millis(900), 70),
];

/// Bounded wait imposed on playback starts.
const PLAY_TIMEOUT: Duration = Duration::from_secs(10);

impl Intensity {
    /// The sustain volume this intensity settles at (the starting level,
    /// for `Escalating`).
    #[must_use]
    pub fn sustain(self) -> u8 {
        match self {
            Self::Low => SUSTAIN_LOW,
            Self::Medium => SUSTAIN_MEDIUM,
            Self::High => SUSTAIN_HIGH,
            Self::Extreme => SUSTAIN_EXTREME,
            Self::Escalating => ESCALATION_START,
        }
    }
}

/// Intensity used when a boss fight advances without an explicit
/// override: High on the penultimate phase, Extreme on the last, Medium
/// before that.
#[must_use]
pub fn auto_intensity(phase: u8, max_phases: u8) -> Intensity {
    if phase == max_phases {
        Intensity::Extreme
    } else if phase.saturating_add(1) == max_phases {
        Intensity::High
    } else {
        Intensity::Medium
    }
}

/// Executes transitions against the audio provider and owns the single
/// escalation ramp task.
pub struct VolumeCurveEngine {
    provider: Arc<dyn AudioProvider>,
    /// Running escalation ramp, if any. Aborted before every new
    /// transition so a stale ramp can never write over the new track's
    /// level.
    ramp: Mutex<Option<JoinHandle<()>>>,
}

impl VolumeCurveEngine {
    /// Create an engine over `provider` with no ramp running.
    #[must_use]
    pub fn new(provider: Arc<dyn AudioProvider>) -> Self {
        Self {
            provider,
            ramp: Mutex::new(None),
        }
    }

    /// Execute `kind` into `uri` at `intensity`: cancel any running ramp,
    /// walk the curve's volume steps around the playback start, and spawn
    /// a fresh ramp when the intensity escalates.
    ///
    /// # Errors
    ///
    /// Playback failures surface as `Provider` after the single
    /// refresh-and-retry cycle; volume-step failures other than the
    /// no-device condition surface as well.
    pub async fn transition(
        &self,
        uri: &str,
        kind: TransitionKind,
        intensity: Intensity,
    ) -> Result<(), DirectorError> {
        self.cancel_ramp();
        debug!(uri, ?kind, ?intensity, "starting transition");

        let sustain = intensity.sustain();
        match kind {
            TransitionKind::Cut => {
                self.play(uri).await?;
            }
            TransitionKind::FadeIn => {
                self.step(DUCK_FADE_IN).await?;
                self.play(uri).await?;
                tokio::time::sleep(FADE_IN_RESTORE_DELAY).await;
                self.step(sustain).await?;
            }
            TransitionKind::FadeOut => {
                self.step(DUCK_FADE_OUT).await?;
                self.play(uri).await?;
            }
            TransitionKind::Crossfade => {
                // The duck never sits above the sustain.
                let duck = DUCK_CROSSFADE.min(sustain);
                self.step(duck).await?;
                self.play(uri).await?;
                if duck < sustain {
                    tokio::time::sleep(CROSSFADE_RESTORE_DELAY).await;
                    self.step(sustain).await?;
                }
            }
            TransitionKind::BuildUp => {
                for (delay, level) in BUILD_UP_STEPS {
                    tokio::time::sleep(delay).await;
                    self.step(level).await?;
                }
                self.play(uri).await?;
                self.step(sustain).await?;
            }
        }

        if intensity == Intensity::Escalating {
            self.start_ramp();
        }
        Ok(())
    }

    /// Issue one volume step. The no-device condition is routine while
    /// the host has no playback target open, so it is logged and
    /// swallowed rather than surfaced.
    async fn step(&self, percent: u8) -> Result<(), DirectorError> {
        match self.provider.set_volume(percent).await {
            Ok(()) => Ok(()),
            Err(ProviderError::DeviceUnavailable) => {
                warn!(percent, "skipping volume step: no active playback device");
                Ok(())
            }
            Err(other) => Err(other.into()),
        }
    }

    /// Start playback, refreshing the credential once on an auth
    /// rejection. A second rejection surfaces.
    async fn play(&self, uri: &str) -> Result<(), DirectorError> {
        match self.bounded_play(uri).await {
            Err(ProviderError::AuthExpired) => {
                debug!(uri, "playback credential expired, refreshing once");
                self.provider.refresh_credential().await?;
                self.bounded_play(uri).await.map_err(DirectorError::from)
            }
            other => other.map_err(DirectorError::from),
        }
    }

    async fn bounded_play(&self, uri: &str) -> Result<(), ProviderError> {
        tokio::time::timeout(PLAY_TIMEOUT, self.provider.play(uri, 0))
            .await
            .map_err(|_| ProviderError::Timeout)?
    }

    fn lock_ramp(&self) -> std::sync::MutexGuard<'_, Option<JoinHandle<()>>> {
        self.ramp.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn cancel_ramp(&self) {
        if let Some(handle) = self.lock_ramp().take() {
            handle.abort();
            debug!("cancelled running escalation ramp");
        }
    }

    fn start_ramp(&self) {
        let provider = Arc::clone(&self.provider);
        let handle = tokio::spawn(async move {
            let mut level = ESCALATION_START;
            let mut ticker = tokio::time::interval(ESCALATION_PERIOD);
            loop {
                ticker.tick().await;
                if let Err(err) = provider.set_volume(level).await {
                    if err == ProviderError::DeviceUnavailable {
                        warn!(level, "skipping escalation step: no active playback device");
                    } else {
                        warn!(error = %err, "escalation ramp stopped");
                        break;
                    }
                }
                if level >= ESCALATION_CEILING {
                    break;
                }
                level = level.saturating_add(ESCALATION_STEP).min(ESCALATION_CEILING);
            }
        });
        *self.lock_ramp() = Some(handle);
    }
}

impl Drop for VolumeCurveEngine {
    fn drop(&mut self) {
        self.cancel_ramp();
    }
}
