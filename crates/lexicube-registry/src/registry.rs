//! The tag/cube/slot mapping, rebuilt once per round.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::{CubeId, TagId, TileSlot};

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Errors raised while building the registry.
///
/// These are startup/configuration failures, not per-event conditions:
/// an unknown tag at runtime is a normal lookup miss, never an error.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// One of the identifier lists was empty.
    #[error("identifier list is empty")]
    EmptyList,

    /// The two identifier lists cannot be zipped positionally.
    #[error("cube list has {cubes} entries but tag list has {tags}")]
    LengthMismatch { cubes: usize, tags: usize },

    /// An identifier list file could not be read.
    #[error("failed to read identifier list: {0}")]
    Io(#[from] std::io::Error),
}

/// Bijective mapping between tags, cubes, and rack slots.
///
/// Built from two ordered identifier lists zipped by position: the
/// cube at index i owns the tag at index i. The first `max_slots + 1`
/// cubes additionally get rack slots `0, 1, ...` in list order.
#[derive(Debug, Clone)]
pub struct Registry {
    max_slots: usize,
    tag_to_cube: HashMap<TagId, CubeId>,
    cube_to_slot: HashMap<CubeId, TileSlot>,
    slot_to_cube: HashMap<TileSlot, CubeId>,
}

impl Registry {
    /// Build a registry from the two ordered identifier lists.
    ///
    /// Fails loudly on empty or length-mismatched lists; both indicate
    /// a broken deployment and are better caught at round start than
    /// as silent holes in the mapping.
    pub fn build(max_slots: usize, cubes: &[CubeId], tags: &[TagId]) -> Result<Self> {
        let mut registry = Self {
            max_slots,
            tag_to_cube: HashMap::new(),
            cube_to_slot: HashMap::new(),
            slot_to_cube: HashMap::new(),
        };
        registry.rebuild(cubes, tags)?;
        Ok(registry)
    }

    /// Load the identifier lists from two files, one id per line.
    pub fn from_files(
        max_slots: usize,
        cubes_path: impl AsRef<Path>,
        tags_path: impl AsRef<Path>,
    ) -> Result<Self> {
        let cubes: Vec<CubeId> = read_id_list(cubes_path)?
            .into_iter()
            .map(CubeId::new)
            .collect();
        let tags: Vec<TagId> = read_id_list(tags_path)?
            .into_iter()
            .map(TagId::new)
            .collect();
        Self::build(max_slots, &cubes, &tags)
    }

    /// Clear and rebuild the mapping.
    ///
    /// Idempotent; safe to call at the start of every round.
    pub fn rebuild(&mut self, cubes: &[CubeId], tags: &[TagId]) -> Result<()> {
        if cubes.is_empty() || tags.is_empty() {
            return Err(RegistryError::EmptyList);
        }
        if cubes.len() != tags.len() {
            return Err(RegistryError::LengthMismatch {
                cubes: cubes.len(),
                tags: tags.len(),
            });
        }

        self.tag_to_cube.clear();
        self.cube_to_slot.clear();
        self.slot_to_cube.clear();

        for (cube, tag) in cubes.iter().zip(tags) {
            self.tag_to_cube.insert(tag.clone(), cube.clone());
        }

        // Only the first max_slots + 1 cubes get rack positions.
        for (ix, cube) in cubes.iter().take(self.max_slots + 1).enumerate() {
            let slot = TileSlot::new(ix as u8);
            self.cube_to_slot.insert(cube.clone(), slot);
            self.slot_to_cube.insert(slot, cube.clone());
        }

        debug!(
            tags = self.tag_to_cube.len(),
            slots = self.slot_to_cube.len(),
            "registry rebuilt"
        );
        Ok(())
    }

    /// Look up which cube owns a tag.
    ///
    /// `None` is a normal outcome: a mis-scanned or foreign tag belongs
    /// to no registered cube.
    pub fn resolve_tag(&self, tag: &TagId) -> Option<&CubeId> {
        self.tag_to_cube.get(tag)
    }

    /// The rack slot assigned to a cube, if it has one.
    pub fn slot_for_cube(&self, cube: &CubeId) -> Option<TileSlot> {
        self.cube_to_slot.get(cube).copied()
    }

    /// The cube sitting at a rack slot, if one is assigned.
    pub fn cube_for_slot(&self, slot: TileSlot) -> Option<&CubeId> {
        self.slot_to_cube.get(&slot)
    }

    /// Configured rack size.
    pub const fn max_slots(&self) -> usize {
        self.max_slots
    }

    /// All assigned rack slots, in rack order.
    pub fn slots(&self) -> impl Iterator<Item = TileSlot> + '_ {
        (0..self.slot_to_cube.len()).map(|ix| TileSlot::new(ix as u8))
    }
}

/// Read one identifier per line, trimming whitespace and skipping blanks.
fn read_id_list(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let contents = fs::read_to_string(path)?;
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}
