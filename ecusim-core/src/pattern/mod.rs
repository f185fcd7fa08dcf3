//! Crank and cam signal patterns
//!
//! Immutable descriptions of the simulated sensor wheels plus the
//! precomputed edge table the sequencer walks. Patterns are validated at
//! construction and never mutated afterwards.

pub mod cam;
pub mod crank;
pub mod presets;
pub mod table;

pub use cam::{CamPattern, MAX_CAM_EDGES};
pub use crank::{ToothPattern, MAX_TEETH};
pub use presets::{preset_by_id, PatternPreset, PRESETS};
pub use table::{EdgeEvent, EdgeTable, MAX_TABLE_EVENTS};
