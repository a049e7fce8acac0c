//! Replaceable texture lookup by file naming convention
//!
//! Character models ship their skins next to the model file:
//!
//! ```text
//! {Base}.blp                   plain texture
//! {Base}Skin{Suffix}.blp       body skin variant
//! {Base}Skin{Suffix}_Extra.blp second layer of the same variant
//! ```
//!
//! Suffixes compare case-insensitively and lexicographically; the greatest
//! one is the preferred variant.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::TextureSearchOptions;
use crate::chunks::TextureType;
use crate::error::Result;

const SKIN_INFIX: &str = "skin";
const EXTRA_SUFFIX: &str = "_extra";

/// Texture files of a directory sharing the model's base name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkinCandidates {
    /// File named exactly like the model, else the first prefixed file that
    /// is not a skin
    pub plain: Option<PathBuf>,
    /// `{Base}Skin{Suffix}` files keyed by lowercase suffix
    pub base: BTreeMap<String, PathBuf>,
    /// `{Base}Skin{Suffix}_Extra` files keyed by lowercase suffix
    pub extra: BTreeMap<String, PathBuf>,
}

impl SkinCandidates {
    /// List `dir` and classify its texture files
    pub fn try_scan<P: AsRef<Path>>(dir: P, base_name: &str, extension: &str) -> Result<Self> {
        let mut paths = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let matches_extension = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));
            if matches_extension {
                paths.push(path);
            }
        }
        Ok(Self::classify(paths, base_name))
    }

    /// Like [`SkinCandidates::try_scan`], but an unreadable directory yields
    /// no candidates
    pub fn scan<P: AsRef<Path>>(dir: P, base_name: &str, extension: &str) -> Self {
        let dir = dir.as_ref();
        Self::try_scan(dir, base_name, extension).unwrap_or_else(|e| {
            log::warn!("Cannot list texture directory {}: {}", dir.display(), e);
            Self::default()
        })
    }

    /// Classify texture file paths against a model base name.
    ///
    /// Paths whose file stem does not start with `base_name` are ignored.
    pub fn classify<I>(paths: I, base_name: &str) -> Self
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let base_lower = base_name.to_lowercase();
        let skin_prefix = format!("{base_lower}{SKIN_INFIX}");

        let mut matching: Vec<(String, PathBuf)> = paths
            .into_iter()
            .filter_map(|path| {
                let stem = path.file_stem()?.to_str()?.to_lowercase();
                stem.starts_with(&base_lower).then_some((stem, path))
            })
            .collect();
        matching.sort_by(|a, b| a.1.cmp(&b.1));

        let mut candidates = Self::default();
        let mut exact = None;
        for (stem, path) in matching {
            if stem == base_lower {
                exact = Some(path);
            } else if let Some(suffix) = stem.strip_prefix(&skin_prefix) {
                match suffix.strip_suffix(EXTRA_SUFFIX) {
                    Some(variant) => candidates.extra.insert(variant.to_string(), path),
                    None => candidates.base.insert(suffix.to_string(), path),
                };
            } else if candidates.plain.is_none() {
                candidates.plain = Some(path);
            }
        }
        if exact.is_some() {
            candidates.plain = exact;
        }
        candidates
    }

    pub fn is_empty(&self) -> bool {
        self.plain.is_none() && self.base.is_empty() && self.extra.is_empty()
    }
}

/// One step of the naming convention, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConventionRule {
    /// Greatest suffix present as both a base and an extra skin
    PairedVariant,
    /// Greatest base skin suffix
    HighestBase,
    /// Greatest extra skin suffix
    HighestExtra,
    /// The plain texture
    Plain,
}

/// Rule groups tried in order; the first group producing any match wins.
/// Rules inside a group apply independently.
pub const RULE_GROUPS: &[&[ConventionRule]] = &[
    &[ConventionRule::PairedVariant],
    &[ConventionRule::HighestBase, ConventionRule::HighestExtra],
    &[ConventionRule::Plain],
];

impl ConventionRule {
    /// Texture types and files this rule assigns, empty when it does not match
    pub fn apply(
        self,
        candidates: &SkinCandidates,
        options: &TextureSearchOptions,
    ) -> Vec<(TextureType, PathBuf)> {
        match self {
            Self::PairedVariant => candidates
                .base
                .iter()
                .rev()
                .find_map(|(suffix, base)| {
                    candidates.extra.get(suffix).map(|extra| {
                        vec![
                            (options.primary_type, base.clone()),
                            (options.overlay_type, extra.clone()),
                        ]
                    })
                })
                .unwrap_or_default(),
            Self::HighestBase => candidates
                .base
                .values()
                .next_back()
                .map(|path| vec![(options.primary_type, path.clone())])
                .unwrap_or_default(),
            Self::HighestExtra => candidates
                .extra
                .values()
                .next_back()
                .map(|path| vec![(options.overlay_type, path.clone())])
                .unwrap_or_default(),
            Self::Plain => candidates
                .plain
                .iter()
                .map(|path| (options.fallback_type, path.clone()))
                .collect(),
        }
    }
}

/// Apply the rule groups to classified candidates
pub fn match_candidates(
    candidates: &SkinCandidates,
    options: &TextureSearchOptions,
) -> BTreeMap<TextureType, PathBuf> {
    for group in RULE_GROUPS {
        let mut matched = BTreeMap::new();
        for rule in *group {
            for (texture_type, path) in rule.apply(candidates, options) {
                matched.entry(texture_type).or_insert(path);
            }
        }
        if !matched.is_empty() {
            log::debug!("Naming convention matched via {:?}: {:?}", group, matched);
            return matched;
        }
    }
    BTreeMap::new()
}

/// Replaceable textures found next to a model, keyed by texture type
pub fn match_naming_convention<P: AsRef<Path>>(
    dir: P,
    base_name: &str,
    options: &TextureSearchOptions,
) -> BTreeMap<TextureType, PathBuf> {
    let candidates = SkinCandidates::scan(dir, base_name, &options.extension);
    if candidates.is_empty() {
        log::trace!("No textures named after {base_name}");
    }
    match_candidates(&candidates, options)
}
