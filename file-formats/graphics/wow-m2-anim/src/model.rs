//! The in-memory M2 model consumed by the animation engine

use std::path::Path;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::chunks::{Animation, Bone, SkinProfile, TextureSlot, Vertex};

/// A parsed M2 model.
///
/// Produced by the asset loader; the engine only reads it, while mesh edits
/// mutate `vertices` in place.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct M2Model {
    /// Model name as stored in the header, may carry NUL padding
    pub name: String,
    pub global_sequences: Vec<u32>,
    pub animations: Vec<Animation>,
    pub bones: Vec<Bone>,
    pub vertices: Vec<Vertex>,
    pub textures: Vec<TextureSlot>,
    pub texture_lookup: Vec<u16>,
    pub skin: SkinProfile,
}

impl M2Model {
    /// Base name used for texture naming conventions.
    ///
    /// Taken from the stored model name (its file stem, without padding),
    /// falling back to the stem of the file the model was loaded from.
    pub fn texture_base_name<P: AsRef<Path>>(&self, model_path: P) -> String {
        let clean = self.name.trim_matches(|c: char| c == '\0' || c.is_whitespace());
        let from_name = if clean.is_empty() {
            None
        } else {
            let normalized = clean.replace('\\', "/");
            Path::new(&normalized)
                .file_stem()
                .and_then(|stem| stem.to_str())
                .map(str::to_string)
        };

        from_name.unwrap_or_else(|| {
            model_path
                .as_ref()
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default()
        })
    }

    /// Positions of all vertices in their rest pose
    pub fn rest_positions(&self) -> Vec<glam::Vec3> {
        self.vertices.iter().map(|v| v.position).collect()
    }
}
