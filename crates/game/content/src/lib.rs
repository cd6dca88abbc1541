//! Declarative level descriptions.
//!
//! `warren-content` turns RON level descriptions — room tile layouts, hall
//! connections, item placements — into [`warren_core::Level`] values through
//! the core builder. The engine never reads files; everything that touches
//! disk or a parser lives here.
pub mod loaders;

pub use loaders::{LevelLoader, LoadResult};
