//! Texture file resolution for M2 models
//!
//! Maps each entry of a model's texture table to a file on disk. Slots with
//! an embedded path are looked up by that path ([`embedded`]); replaceable
//! slots are matched by their texture type against files named after the
//! model ([`convention`]).
//!
//! Resolution is advisory: slots without a file are absent from the result
//! and an unreadable directory counts as "no match".
//!
//! # Example
//!
//! ```rust,no_run
//! use wow_m2_anim::chunks::{TextureSlot, TextureType};
//! use wow_m2_anim::texture_resolver::{TextureKey, resolve_textures};
//!
//! let slots = vec![
//!     TextureSlot::replaceable(TextureType::Body),
//!     TextureSlot::hardcoded("Creature\\Bear\\BearSkin.blp"),
//! ];
//! let textures = resolve_textures("Models", "Bear", &slots);
//!
//! if let Some(path) = textures.get(&TextureKey::Slot(1)) {
//!     println!("Slot 1: {}", path.display());
//! }
//! ```

pub mod convention;
pub mod embedded;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::chunks::{TextureSlot, TextureType};
use crate::model::M2Model;

pub use convention::{SkinCandidates, match_naming_convention};
pub use embedded::resolve_embedded_path;

/// Texture search configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TextureSearchOptions {
    /// Texture file extension, without the dot
    pub extension: String,
    /// Type assigned to `{Base}Skin{Suffix}` files
    pub primary_type: TextureType,
    /// Type assigned to `{Base}Skin{Suffix}_Extra` files
    pub overlay_type: TextureType,
    /// Type assigned to a plain `{Base}` texture
    pub fallback_type: TextureType,
}

impl Default for TextureSearchOptions {
    fn default() -> Self {
        Self {
            extension: "blp".to_string(),
            primary_type: TextureType::Body,
            overlay_type: TextureType::SkinExtra,
            fallback_type: TextureType::Monster1,
        }
    }
}

/// Key of a resolved texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TextureKey {
    /// Index into the model's texture table
    Slot(usize),
    /// Texture type, used when the model has no texture table
    Type(TextureType),
}

/// Resolved texture files
pub type ResolvedTextures = BTreeMap<TextureKey, PathBuf>;

/// How a texture slot is looked up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy<'a> {
    /// Replaceable slot, matched by type against files named after the model
    NamingConvention(TextureType),
    /// Slot with an embedded relative path
    EmbeddedPath(&'a str),
}

impl<'a> Strategy<'a> {
    pub fn for_slot(slot: &'a TextureSlot) -> Self {
        match slot.embedded_path() {
            Some(path) => Self::EmbeddedPath(path),
            None => Self::NamingConvention(slot.texture_type),
        }
    }
}

/// Resolve texture slots with the default search options
pub fn resolve_textures<P: AsRef<Path>>(
    dir: P,
    base_name: &str,
    slots: &[TextureSlot],
) -> ResolvedTextures {
    resolve_textures_with(dir, base_name, slots, &TextureSearchOptions::default())
}

/// Resolve texture slots to files.
///
/// Results are keyed by slot index. Without any slots the naming convention
/// matches are returned keyed by texture type.
pub fn resolve_textures_with<P: AsRef<Path>>(
    dir: P,
    base_name: &str,
    slots: &[TextureSlot],
    options: &TextureSearchOptions,
) -> ResolvedTextures {
    let dir = dir.as_ref();

    let by_type = if slots.is_empty() || slots.iter().any(TextureSlot::is_replaceable) {
        match_naming_convention(dir, base_name, options)
    } else {
        BTreeMap::new()
    };

    if slots.is_empty() {
        return by_type
            .into_iter()
            .map(|(texture_type, path)| (TextureKey::Type(texture_type), path))
            .collect();
    }

    let mut resolved = BTreeMap::new();
    for (index, slot) in slots.iter().enumerate() {
        let path = match Strategy::for_slot(slot) {
            Strategy::NamingConvention(texture_type) => by_type.get(&texture_type).cloned(),
            Strategy::EmbeddedPath(path) => resolve_embedded_path(dir, path),
        };
        match path {
            Some(path) => {
                resolved.insert(TextureKey::Slot(index), path);
            }
            None => {
                log::debug!("No texture file for slot {} ({})", index, slot.texture_type.name());
            }
        }
    }

    log::info!("Resolved {} of {} texture slots", resolved.len(), slots.len());
    resolved
}

/// Resolve the textures of a model loaded from `model_path`.
///
/// Searches the model's directory, using [`M2Model::texture_base_name`] for
/// the naming convention.
pub fn resolve_model_textures<P: AsRef<Path>>(
    model: &M2Model,
    model_path: P,
    options: &TextureSearchOptions,
) -> ResolvedTextures {
    let model_path = model_path.as_ref();
    let dir = match model_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let base_name = model.texture_base_name(model_path);
    resolve_textures_with(dir, &base_name, &model.textures, options)
}
