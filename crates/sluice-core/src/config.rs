use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SluiceError;
use crate::profile::{Profile, DEFAULT_PROFILE};

const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

/// Top-level service configuration: built-in defaults, replaced wholesale
/// by a user file when one is given.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub source_priority: SourcePriority,
    pub server: ServerConfig,
    pub upstreams: Vec<UpstreamConfig>,
    pub profiles: BTreeMap<String, Profile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub listen: String,
    pub port: u16,
}

/// One upstream addon to aggregate streams from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    pub name: String,
    pub base_url: String,
}

/// Preference order among upstream sources. Used only as a late auto-pick
/// tie-break; unlisted sources rank after every listed one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourcePriority(Vec<String>);

impl SourcePriority {
    pub fn new(sources: Vec<String>) -> Self {
        Self(sources)
    }

    /// Rank of `source`, lower is preferred.
    pub fn rank(&self, source: &str) -> usize {
        self.0
            .iter()
            .position(|name| name == source)
            .unwrap_or(self.0.len())
    }
}

impl AppConfig {
    /// Load config: the given file, or the built-in defaults without one.
    pub fn load(path: Option<&Path>) -> Result<Self, SluiceError> {
        let raw = match path {
            Some(p) => std::fs::read_to_string(p)?,
            None => DEFAULT_CONFIG.to_string(),
        };
        let mut config: AppConfig =
            toml::from_str(&raw).map_err(|e| SluiceError::Config(e.to_string()))?;
        config.finish()?;
        Ok(config)
    }

    /// Resolve a request-supplied profile key. Missing or unrecognized
    /// keys fall back to the default profile.
    pub fn resolve_profile(&self, key: Option<&str>) -> &Profile {
        key.and_then(|k| self.profiles.get(k))
            .unwrap_or_else(|| &self.profiles[DEFAULT_PROFILE])
    }

    /// Fill derived fields and validate invariants the engine relies on.
    fn finish(&mut self) -> Result<(), SluiceError> {
        for (key, profile) in &mut self.profiles {
            profile.name = key.clone();
            // A ceiling of zero means "unbounded", same as absent.
            if profile.max_file_size_gb.is_some_and(|gb| gb <= 0.0) {
                profile.max_file_size_gb = None;
            }
            if profile.max_resolution.is_some_and(|px| px == 0) {
                profile.max_resolution = None;
            }
        }
        if !self.profiles.contains_key(DEFAULT_PROFILE) {
            return Err(SluiceError::Config(format!(
                "profile table must define {DEFAULT_PROFILE}"
            )));
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        let mut config: AppConfig =
            toml::from_str(DEFAULT_CONFIG).expect("built-in default config is valid TOML");
        config
            .finish()
            .expect("built-in default config is complete");
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = AppConfig::default();
        assert_eq!(config.profiles.len(), 3);
        assert_eq!(config.upstreams.len(), 2);
        assert_eq!(config.upstreams[0].name, "Torrentio");
        assert_eq!(config.server.port, 7000);

        let weak = &config.profiles[DEFAULT_PROFILE];
        assert!(weak.block_remux);
        assert_eq!(weak.allow_codecs, vec![sluice_parse::Codec::Hevc]);
        assert_eq!(weak.max_file_size_gb, Some(25.0));

        let pc = &config.profiles["PC"];
        assert!(!pc.block_remux);
        assert!(!pc.warn_lossless_audio);
    }

    #[test]
    fn test_profile_names_filled_from_keys() {
        let config = AppConfig::default();
        for (key, profile) in &config.profiles {
            assert_eq!(&profile.name, key);
        }
        assert!(config.profiles[DEFAULT_PROFILE].is_weakest_device());
        assert!(!config.profiles["PC"].is_weakest_device());
    }

    #[test]
    fn test_resolve_profile_falls_back() {
        let config = AppConfig::default();
        assert_eq!(config.resolve_profile(Some("PC")).name, "PC");
        assert_eq!(config.resolve_profile(Some("TOASTER")).name, DEFAULT_PROFILE);
        assert_eq!(config.resolve_profile(None).name, DEFAULT_PROFILE);
    }

    #[test]
    fn test_source_priority_ranks() {
        let config = AppConfig::default();
        let priority = &config.source_priority;
        assert!(priority.rank("Torrentio") < priority.rank("MediaFusion"));
        assert!(priority.rank("MediaFusion") < priority.rank("Nobody"));
        assert_eq!(priority.rank("Nobody"), priority.rank("Unknown"));
    }

    #[test]
    fn test_zero_ceilings_mean_unbounded() {
        let raw = r#"
            source_priority = []
            upstreams = []

            [server]
            listen = "127.0.0.1"
            port = 7000

            [profiles.WEAK_TV]
            allow_codecs = []
            allow_hdr = true
            allow_dolby_vision = true
            allow_10bit = true
            block_remux = false
            warn_lossless_audio = false
            max_file_size_gb = 0.0
            max_resolution = 0
        "#;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, raw).unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();
        let weak = &config.profiles[DEFAULT_PROFILE];
        assert_eq!(weak.max_file_size_gb, None);
        assert_eq!(weak.max_resolution, None);
    }

    #[test]
    fn test_missing_default_profile_is_rejected() {
        let raw = r#"
            source_priority = []
            upstreams = []

            [server]
            listen = "127.0.0.1"
            port = 7000

            [profiles.PC]
            allow_codecs = []
            allow_hdr = true
            allow_dolby_vision = true
            allow_10bit = true
            block_remux = false
            warn_lossless_audio = false
        "#;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, raw).unwrap();

        assert!(AppConfig::load(Some(&path)).is_err());
    }
}
