pub mod invariants;
pub mod types;

pub use invariants::validate_block_counts;
pub use types::{BlockConstraint, BlockCounts, BlockKind};
