//! Narration classification — free text in, battle event out.
//!
//! A pure, ordered rule table with no I/O: the first rule that matches
//! wins. Matching is case-insensitive over whole tokens and phrases.

/// Boss fights started from narration default to this many phases.
pub const DEFAULT_BOSS_PHASES: u8 = 3;

/// Battle event extracted from a line of narration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NarrationEvent {
    /// The encounter is over.
    EndBattle,
    /// A running boss fight changes phase.
    BossPhase {
        /// Where the fight should land.
        target: PhaseTarget,
    },
    /// A boss fight starts.
    StartBoss {
        /// Phase count for the new fight.
        phases: u8,
        /// Encounter tag.
        context: String,
    },
    /// A regular encounter starts.
    StartNormal {
        /// Encounter tag refined from the narration's wording.
        context: String,
    },
    /// Nothing battle-related found.
    NoOp,
}

/// Where a `BossPhase` event should land.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseTarget {
    /// An explicit phase number.
    Explicit(u8),
    /// The fight's last phase.
    Final,
    /// Whatever phase comes next.
    Next,
}

const END_PHRASES: &[&str] = &[
    "battle ends",
    "battle is over",
    "fight is over",
    "combat ends",
    "enemy defeated",
    "enemies defeated",
    "we won",
];
const END_TOKENS: &[&str] = &["victory", "victorious"];

const BOSS_ONSET_TOKENS: &[&str] = &[
    "appears", "arrives", "emerges", "roars", "reveals", "transforms", "awakens",
];
const BOSS_ONSET_PHRASES: &[&str] = &["fight begins", "battle begins"];

const COMBAT_ONSET_TOKENS: &[&str] = &["ambush", "ambushed"];
const COMBAT_ONSET_PHRASES: &[&str] = &[
    "enemies appear",
    "enemy attack",
    "enemies attack",
    "combat begins",
    "battle begins",
    "fight breaks out",
    "draw your weapon",
    "hostiles inbound",
];

const DANGER_TOKENS: &[&str] = &["elite", "dangerous", "deadly", "powerful"];
const SURPRISE_TOKENS: &[&str] = &["ambush", "ambushed", "surprise", "sudden", "unexpected"];

/// Lowercased view of a narration line with a token list for whole-word
/// matching.
struct Narration {
    text: String,
    tokens: Vec<String>,
}

impl Narration {
    fn new(raw: &str) -> Self {
        let text = raw.to_lowercase();
        let tokens = text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .map(str::to_owned)
            .collect();
        Self { text, tokens }
    }

    fn has_token(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    fn has_any_token(&self, tokens: &[&str]) -> bool {
        tokens.iter().any(|t| self.has_token(t))
    }

    fn has_any_phrase(&self, phrases: &[&str]) -> bool {
        phrases.iter().any(|p| self.text.contains(p))
    }
}

type Rule = fn(&Narration) -> Option<NarrationEvent>;

/// Evaluated top to bottom; the first match wins. Victory outranks boss
/// keywords so "the boss falls, victory!" ends the fight instead of
/// mutating it.
const RULES: &[Rule] = &[end_battle, boss_phase, boss_onset, combat_onset];

/// Classify one line of narration into a battle event.
#[must_use]
pub fn classify(narration: &str) -> NarrationEvent {
    let narration = Narration::new(narration);
    RULES
        .iter()
        .find_map(|rule| rule(&narration))
        .unwrap_or(NarrationEvent::NoOp)
}

fn end_battle(n: &Narration) -> Option<NarrationEvent> {
    (n.has_any_token(END_TOKENS) || n.has_any_phrase(END_PHRASES)).then_some(NarrationEvent::EndBattle)
}

fn boss_phase(n: &Narration) -> Option<NarrationEvent> {
    (n.has_token("boss") && n.has_token("phase")).then(|| NarrationEvent::BossPhase {
        target: extract_phase(n),
    })
}

fn boss_onset(n: &Narration) -> Option<NarrationEvent> {
    (n.has_token("boss")
        && (n.has_any_token(BOSS_ONSET_TOKENS) || n.has_any_phrase(BOSS_ONSET_PHRASES)))
    .then(|| NarrationEvent::StartBoss {
        phases: DEFAULT_BOSS_PHASES,
        context: "boss".to_owned(),
    })
}

fn combat_onset(n: &Narration) -> Option<NarrationEvent> {
    (n.has_any_token(COMBAT_ONSET_TOKENS) || n.has_any_phrase(COMBAT_ONSET_PHRASES)).then(|| {
        NarrationEvent::StartNormal {
            context: refine_context(n),
        }
    })
}

/// Number adjacent to the "phase" token: digits 1–4, ordinals, or roman
/// numerals, in either order ("phase 2", "second phase", "phase ii").
fn extract_phase(n: &Narration) -> PhaseTarget {
    if n.text.contains("final phase") || n.text.contains("last phase") {
        return PhaseTarget::Final;
    }
    for (i, token) in n.tokens.iter().enumerate() {
        if token == "phase" || token == "phases" {
            if let Some(number) = n.tokens.get(i + 1).and_then(|t| parse_phase_number(t)) {
                return PhaseTarget::Explicit(number);
            }
            if let Some(number) = i
                .checked_sub(1)
                .and_then(|prev| parse_phase_number(&n.tokens[prev]))
            {
                return PhaseTarget::Explicit(number);
            }
        }
    }
    PhaseTarget::Next
}

fn parse_phase_number(token: &str) -> Option<u8> {
    match token {
        "1" | "one" | "first" | "i" => Some(1),
        "2" | "two" | "second" | "ii" => Some(2),
        "3" | "three" | "third" | "iii" => Some(3),
        "4" | "four" | "fourth" | "iv" => Some(4),
        _ => None,
    }
}

/// Refine a normal encounter's context from the narration's wording:
/// danger words make it elite, surprise words make it an ambush.
fn refine_context(n: &Narration) -> String {
    if n.has_any_token(DANGER_TOKENS) {
        "elite"
    } else if n.has_any_token(SURPRISE_TOKENS) {
        "ambush"
    } else {
        "minor"
    }
    .to_owned()
}
