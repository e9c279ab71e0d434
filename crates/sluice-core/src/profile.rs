use serde::{Deserialize, Serialize};
use sluice_parse::Codec;

/// Key of the weakest-device profile. Doubles as the fallback for missing
/// or unrecognized profile keys.
pub const DEFAULT_PROFILE: &str = "WEAK_TV";

/// A named device-capability profile governing which stream attributes are
/// acceptable or penalized. Immutable once loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// Table key; filled in at config load time.
    #[serde(skip)]
    pub name: String,
    /// Allowed codecs; empty means no restriction.
    #[serde(default)]
    pub allow_codecs: Vec<Codec>,
    pub allow_hdr: bool,
    pub allow_dolby_vision: bool,
    pub allow_10bit: bool,
    /// Hard-reject remux releases instead of merely penalizing them.
    pub block_remux: bool,
    pub warn_lossless_audio: bool,
    /// File size ceiling in GB; `None` is unbounded.
    #[serde(default)]
    pub max_file_size_gb: Option<f64>,
    /// Resolution ceiling in vertical pixels; `None` is uncapped.
    #[serde(default)]
    pub max_resolution: Option<u32>,
}

impl Profile {
    /// The weakest-device profile gets extra codec and resolution caution
    /// during evaluation.
    pub fn is_weakest_device(&self) -> bool {
        self.name == DEFAULT_PROFILE
    }
}
