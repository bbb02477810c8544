//! Cycle configuration: per-kind order values, the lowercase-first flag,
//! and resolution of the effective cycle list.
//!
//! Settings live in `recase.toml` (working directory first, then the
//! platform config dir). Unknown fields are ignored so the file can grow
//! without breaking older builds; a missing or unparsable file falls back
//! to defaults. The defaults reproduce the stock cycle: original, lower,
//! upper, title, sentence, with the width conversions disabled.

use std::{fs, path::PathBuf};

use anyhow::Result;
use core_transform::CaseKind;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

/// Reserved minimal order pinning `Original` to the front of every cycle.
/// Not expressible from the settings file.
const ORIGINAL_ORDER: i32 = i32::MIN;

/// Any negative order disables a kind.
pub const DISABLED_ORDER: i32 = -1;

/// A resolved cycle shorter than this is a configuration error.
pub const MIN_ENABLED_KINDS: usize = 3;

/// Per-kind cycle positions. `original` has no entry: it is always enabled
/// and always first.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct CycleOrders {
    #[serde(default = "CycleOrders::default_lower")]
    pub lower: i32,
    #[serde(default = "CycleOrders::default_upper")]
    pub upper: i32,
    #[serde(default = "CycleOrders::default_title")]
    pub title: i32,
    #[serde(default = "CycleOrders::default_sentence")]
    pub sentence: i32,
    #[serde(default = "CycleOrders::default_fullwidth")]
    pub fullwidth: i32,
    #[serde(default = "CycleOrders::default_halfwidth")]
    pub halfwidth: i32,
}

impl Default for CycleOrders {
    fn default() -> Self {
        Self {
            lower: Self::default_lower(),
            upper: Self::default_upper(),
            title: Self::default_title(),
            sentence: Self::default_sentence(),
            fullwidth: Self::default_fullwidth(),
            halfwidth: Self::default_halfwidth(),
        }
    }
}

impl CycleOrders {
    const fn default_lower() -> i32 {
        1
    }
    const fn default_upper() -> i32 {
        2
    }
    const fn default_title() -> i32 {
        3
    }
    const fn default_sentence() -> i32 {
        4
    }
    const fn default_fullwidth() -> i32 {
        DISABLED_ORDER
    }
    const fn default_halfwidth() -> i32 {
        DISABLED_ORDER
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct TransformSettings {
    /// Fold the selection to lowercase before title/sentence casing.
    #[serde(default = "TransformSettings::default_lowercase_first")]
    pub lowercase_first: bool,
}

impl Default for TransformSettings {
    fn default() -> Self {
        Self {
            lowercase_first: Self::default_lowercase_first(),
        }
    }
}

impl TransformSettings {
    const fn default_lowercase_first() -> bool {
        true
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(default)]
    pub cycle: CycleOrders,
    #[serde(default)]
    pub transform: TransformSettings,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>, // original file string (optional)
    pub file: ConfigFile,    // parsed (or default) data
}

/// Best-effort config path following platform conventions: prefer a local
/// `recase.toml`, then the platform config dir.
pub fn discover() -> PathBuf {
    let local = PathBuf::from("recase.toml");
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("recase").join("recase.toml");
    }
    PathBuf::from("recase.toml")
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    if let Ok(content) = fs::read_to_string(&path) {
        match toml::from_str::<ConfigFile>(&content) {
            Ok(file) => Ok(Config {
                raw: Some(content),
                file,
            }),
            Err(e) => {
                warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed_using_defaults");
                Ok(Config::default())
            }
        }
    } else {
        Ok(Config::default())
    }
}

impl Config {
    pub fn lowercase_first(&self) -> bool {
        self.file.transform.lowercase_first
    }

    /// Configured order for a kind. `Original` reports the reserved
    /// sentinel so it sorts ahead of anything the file can express.
    pub fn order_of(&self, kind: CaseKind) -> i32 {
        let cycle = &self.file.cycle;
        match kind {
            CaseKind::Original => ORIGINAL_ORDER,
            CaseKind::Lower => cycle.lower,
            CaseKind::Upper => cycle.upper,
            CaseKind::Title => cycle.title,
            CaseKind::Sentence => cycle.sentence,
            CaseKind::FullWidth => cycle.fullwidth,
            CaseKind::HalfWidth => cycle.halfwidth,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("cycle configuration enables {found} case kinds, need at least {MIN_ENABLED_KINDS}")]
    TooFewKinds { found: usize },
}

/// Resolve the effective cycle list: enabled kinds (order >= 0, plus
/// `Original`) sorted ascending by order.
///
/// Two enabled kinds sharing an order invalidates the whole arrangement;
/// the full unfiltered default ordering is returned instead and the
/// conflict is logged. Fewer than [`MIN_ENABLED_KINDS`] enabled kinds is a
/// hard configuration error.
pub fn resolve_cycle_list(config: &Config) -> Result<Vec<CaseKind>, ConfigError> {
    let mut enabled: Vec<(CaseKind, i32)> = CaseKind::ALL
        .iter()
        .copied()
        .filter_map(|kind| {
            let order = config.order_of(kind);
            (kind == CaseKind::Original || order >= 0).then_some((kind, order))
        })
        .collect();

    for (i, (first, order)) in enabled.iter().enumerate() {
        if let Some((second, _)) = enabled[i + 1..].iter().find(|(_, o)| o == order) {
            warn!(
                target: "config",
                order = *order,
                first = first.label(),
                second = second.label(),
                "duplicate_cycle_order"
            );
            return Ok(CaseKind::ALL.to_vec());
        }
    }

    if enabled.len() < MIN_ENABLED_KINDS {
        return Err(ConfigError::TooFewKinds {
            found: enabled.len(),
        });
    }

    enabled.sort_by_key(|&(_, order)| order);
    Ok(enabled.into_iter().map(|(kind, _)| kind).collect())
}
