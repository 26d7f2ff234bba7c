//! Lexicube Identifier Registry
//!
//! The game reasons about three identifier spaces:
//! - **tags**: NFC tag ids, read by a neighboring cube's sensor
//! - **cubes**: hardware addresses of the physical cube units
//! - **tile slots**: logical rack positions (small integers) that the
//!   rest of the game addresses letters by
//!
//! The [`Registry`] holds the static, rebuildable bijection between
//! them: which cube owns which tag, and which cube sits at which rack
//! slot. It is rebuilt once per round and immutable between rebuilds.

mod ids;
mod registry;

pub use ids::{CubeId, TagId, TileSlot};
pub use registry::{Registry, RegistryError, Result};
