//! Static voice registry, with optional YAML overrides.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// A character's synthesis profile.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VoiceProfile {
    /// Provider voice identifier.
    pub voice_id: String,
    /// Base style descriptor merged with the per-request emotion.
    #[serde(default)]
    pub base_style: String,
}

/// Failure to load a registry override file.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The override file could not be read.
    #[error("cannot read voice registry: {0}")]
    Io(#[from] std::io::Error),
    /// The override file is not valid YAML.
    #[error("cannot parse voice registry: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Voice profiles keyed by character name. Lookup is case-insensitive;
/// an unknown character is a hard failure at the call site, never a
/// silent fallback to a default voice.
#[derive(Debug, Clone)]
pub struct VoiceRegistry {
    profiles: HashMap<String, VoiceProfile>,
}

impl VoiceRegistry {
    /// The built-in cast.
    #[must_use]
    pub fn builtin() -> Self {
        let mut profiles = HashMap::new();
        for (name, voice_id, base_style) in [
            ("narrator", "EXAVITQu4vr4xnSDxMaL", "calm, measured"),
            ("kael", "TxGEqnHWrfWFTfGW9XjX", "gravelly, commanding"),
            ("lyra", "MF3mGyEYCl7XYWbV9V6O", "bright, quick"),
            ("thorne", "VR6AewLTigWG4xSOukaG", "low, menacing"),
            ("shopkeeper", "pNInz6obpgDQGcFmaJgB", "warm, chatty"),
        ] {
            profiles.insert(
                name.to_owned(),
                VoiceProfile {
                    voice_id: voice_id.to_owned(),
                    base_style: base_style.to_owned(),
                },
            );
        }
        Self { profiles }
    }

    /// Load YAML overrides on top of the built-in cast.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError` when the file cannot be read or parsed.
    pub fn with_overrides(path: &Path) -> Result<Self, RegistryError> {
        let raw = std::fs::read_to_string(path)?;
        Self::builtin().apply_yaml(&raw)
    }

    /// Merge YAML-formatted `name: {voice_id, base_style}` entries over
    /// this registry.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::Parse` for malformed YAML.
    pub fn apply_yaml(mut self, raw: &str) -> Result<Self, RegistryError> {
        let overrides: HashMap<String, VoiceProfile> = serde_yaml::from_str(raw)?;
        for (name, profile) in overrides {
            self.profiles.insert(name.to_lowercase(), profile);
        }
        Ok(self)
    }

    /// Look up a character, case-insensitively.
    #[must_use]
    pub fn resolve(&self, character: &str) -> Option<&VoiceProfile> {
        self.profiles.get(&character.to_lowercase())
    }
}
