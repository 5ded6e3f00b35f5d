//! Track selection — turns encounter shape into a catalog query and picks
//! one candidate.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use battlescore_core::error::{DirectorError, ProviderError};
use battlescore_core::provider::AudioProvider;
use battlescore_core::rng::DeterministicRng;
use battlescore_core::track::Track;

use crate::state::BattleKind;

/// Result-set cap for battle-music searches.
const BATTLE_SEARCH_LIMIT: usize = 10;
/// Victory stingers use a narrower pool and take the top-ranked result.
const VICTORY_SEARCH_LIMIT: usize = 5;
/// Bounded wait imposed on catalog searches.
const SEARCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Catalog query for an encounter. Pure rule table: boss phases escalate
/// from build-up to final theme; normal encounters follow their context
/// tag.
#[must_use]
pub fn battle_query(kind: BattleKind, phase: u8, context: &str) -> &'static str {
    match kind {
        BattleKind::Boss => match phase {
            0 | 1 => "tense orchestral build up boss battle",
            2 => "intense battle theme",
            _ => "epic final boss theme",
        },
        BattleKind::Normal | BattleKind::None => match context {
            "minor" => "light skirmish battle music",
            "elite" => "elite enemy battle theme",
            "ambush" => "ambush combat music",
            _ => "epic orchestral battle",
        },
    }
}

/// Catalog query played once an encounter ends.
#[must_use]
pub fn victory_query(was_boss: bool) -> &'static str {
    if was_boss {
        "victory fanfare orchestral"
    } else {
        "victory theme"
    }
}

/// Picks battle and victory tracks from the audio provider's catalog.
pub struct TrackSelector {
    provider: Arc<dyn AudioProvider>,
    rng: Arc<Mutex<dyn DeterministicRng + Send>>,
}

impl TrackSelector {
    /// Create a selector over `provider`, picking candidates with `rng`.
    #[must_use]
    pub fn new(provider: Arc<dyn AudioProvider>, rng: Arc<Mutex<dyn DeterministicRng + Send>>) -> Self {
        Self { provider, rng }
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Track>, DirectorError> {
        let results = tokio::time::timeout(SEARCH_TIMEOUT, self.provider.search(query, limit))
            .await
            .map_err(|_| ProviderError::Timeout)??;
        Ok(results)
    }

    /// Select a track for the given encounter shape, uniformly at random
    /// among the top candidates so repeated encounters do not sound
    /// identical.
    ///
    /// # Errors
    ///
    /// `NoCandidateTrack` when the search comes back empty; provider
    /// failures surface as `Provider`.
    pub async fn select_battle_track(
        &self,
        kind: BattleKind,
        phase: u8,
        context: &str,
    ) -> Result<Track, DirectorError> {
        let query = battle_query(kind, phase, context);
        let mut candidates = self.search(query, BATTLE_SEARCH_LIMIT).await?;
        if candidates.is_empty() {
            return Err(DirectorError::NoCandidateTrack {
                query: query.to_owned(),
            });
        }
        let last = u32::try_from(candidates.len() - 1).unwrap_or(u32::MAX);
        let index = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            rng.next_u32_range(0, last) as usize
        };
        Ok(candidates.swap_remove(index.min(candidates.len() - 1)))
    }

    /// Select a victory sting. Rank-1 preferred: the top result of a
    /// narrow search, fanfare-flavored after a boss fight.
    ///
    /// # Errors
    ///
    /// `NoCandidateTrack` when the search comes back empty; provider
    /// failures surface as `Provider`.
    pub async fn select_victory_track(&self, was_boss: bool) -> Result<Track, DirectorError> {
        let query = victory_query(was_boss);
        let mut candidates = self.search(query, VICTORY_SEARCH_LIMIT).await?;
        if candidates.is_empty() {
            return Err(DirectorError::NoCandidateTrack {
                query: query.to_owned(),
            });
        }
        Ok(candidates.swap_remove(0))
    }
}
