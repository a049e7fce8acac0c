#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Group and variant encoded in a skin section id
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Geoset {
    pub group: u16,
    pub variant: u16,
}

impl Geoset {
    pub fn from_skin_section_id(id: u16) -> Self {
        Self {
            group: id / 100,
            variant: id % 100,
        }
    }

    pub fn name(&self) -> String {
        geoset_group_name(self.group)
    }
}

/// Human readable name of a geoset group
pub fn geoset_group_name(group: u16) -> String {
    let name = match group {
        0 => "Body",
        1 => "Hair",
        2 => "Facial 1",
        3 => "Facial 2",
        4 => "Bracers",
        5 => "Boots",
        7 => "Ears",
        8 => "Sleeves",
        9 => "Kneepads",
        10 => "Chest",
        11 => "Pants",
        12 => "Tabard",
        13 => "Legs",
        14 => "Cloak",
        15 => "Cape",
        16 => "Loincloth",
        17 => "Eyeglow",
        18 => "Belt",
        other => return format!("Group {other}"),
    };
    name.to_string()
}

/// A geometry partition of a skin profile
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Submesh {
    /// Encodes the geoset: group = id / 100, variant = id % 100
    pub skin_section_id: u16,
    pub level: u16,
    /// Start in the skin's local vertex list
    pub vertex_start: u16,
    pub vertex_count: u16,
    /// Start in the skin's triangle index list
    pub index_start: u16,
    pub index_count: u16,
}

impl Submesh {
    pub fn geoset(&self) -> Geoset {
        Geoset::from_skin_section_id(self.skin_section_id)
    }

    pub fn triangle_count(&self) -> usize {
        usize::from(self.index_count) / 3
    }
}

/// A draw call (texture unit) of a skin profile
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Batch {
    pub flags: u8,
    pub priority: u8,
    /// Submesh drawn by this batch
    pub skin_section_index: u16,
    pub color_index: u16,
    pub material_index: u16,
    /// First entry in the model's texture lookup table
    pub texture_combo_index: u16,
    pub texture_count: u16,
    pub transparency_index: u16,
}

/// Level-of-detail geometry partition
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SkinProfile {
    /// Local vertex list, values are global vertex indices
    pub vertices: Vec<u16>,
    /// Triangle list, values index `vertices`
    pub indices: Vec<u16>,
    pub submeshes: Vec<Submesh>,
    pub batches: Vec<Batch>,
}

impl SkinProfile {
    /// Texture table slots drawn on a submesh, following
    /// `batch -> texture lookup -> texture slot`.
    ///
    /// Batches whose combo index falls outside the lookup table are skipped.
    pub fn texture_slots_for_submesh(&self, submesh: usize, texture_lookup: &[u16]) -> Vec<usize> {
        let mut slots = Vec::new();
        for batch in self
            .batches
            .iter()
            .filter(|batch| usize::from(batch.skin_section_index) == submesh)
        {
            let start = usize::from(batch.texture_combo_index);
            let count = usize::from(batch.texture_count.max(1));
            for lookup in start..start + count {
                match texture_lookup.get(lookup) {
                    Some(&slot) => {
                        let slot = usize::from(slot);
                        if !slots.contains(&slot) {
                            slots.push(slot);
                        }
                    }
                    None => {
                        log::trace!(
                            "Batch texture lookup {lookup} out of range for submesh {submesh}"
                        );
                    }
                }
            }
        }
        slots
    }

    /// Global vertex indices used by a submesh
    pub fn submesh_vertices(&self, submesh: usize) -> Vec<usize> {
        let Some(submesh) = self.submeshes.get(submesh) else {
            return Vec::new();
        };
        let start = usize::from(submesh.vertex_start);
        let end = (start + usize::from(submesh.vertex_count)).min(self.vertices.len());
        self.vertices
            .get(start..end)
            .map(|local| local.iter().map(|&v| usize::from(v)).collect())
            .unwrap_or_default()
    }

    /// Total triangles per geoset
    pub fn triangles_by_geoset(&self) -> std::collections::BTreeMap<Geoset, usize> {
        let mut totals = std::collections::BTreeMap::new();
        for submesh in &self.submeshes {
            *totals.entry(submesh.geoset()).or_insert(0) += submesh.triangle_count();
        }
        totals
    }
}
