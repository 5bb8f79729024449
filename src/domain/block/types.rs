// src/domain/block/types.rs

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The kind of block a source file contributes to the assembled component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Template,
    Script,
    Style,
    Custom,
}

impl BlockKind {
    /// All block kinds, in registry (and validation report) order.
    pub const ALL: [BlockKind; 4] = [
        BlockKind::Template,
        BlockKind::Script,
        BlockKind::Style,
        BlockKind::Custom,
    ];

    /// The fixed cardinality registry. Read-only, fixed at process start:
    ///
    /// | kind     | min | max       |
    /// |----------|-----|-----------|
    /// | template | 0   | 1         |
    /// | script   | 1   | 1         |
    /// | style    | 0   | unbounded |
    /// | custom   | 0   | unbounded |
    pub fn constraint(self) -> BlockConstraint {
        match self {
            BlockKind::Template => BlockConstraint::bounded(0, 1),
            BlockKind::Script => BlockConstraint::bounded(1, 1),
            BlockKind::Style => BlockConstraint::at_least(0),
            BlockKind::Custom => BlockConstraint::at_least(0),
        }
    }
}

impl std::fmt::Display for BlockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BlockKind::Template => write!(f, "template"),
            BlockKind::Script => write!(f, "script"),
            BlockKind::Style => write!(f, "style"),
            BlockKind::Custom => write!(f, "custom"),
        }
    }
}

/// Permitted [min, max] count of source files for one block kind.
/// `max == None` means unbounded.
///
/// INVARIANT: min <= max whenever max is bounded. The registry table is
/// the only constructor site, so the invariant holds by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockConstraint {
    pub min: u32,
    pub max: Option<u32>,
}

impl BlockConstraint {
    pub const fn bounded(min: u32, max: u32) -> Self {
        Self {
            min,
            max: Some(max),
        }
    }

    pub const fn at_least(min: u32) -> Self {
        Self { min, max: None }
    }

    /// True when `count` lies within [min, max].
    pub fn permits(&self, count: u32) -> bool {
        count >= self.min && self.max.map_or(true, |max| count <= max)
    }
}

/// Per-kind found-file counts accumulated by one resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockCounts {
    counts: HashMap<BlockKind, u32>,
}

impl BlockCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, kind: BlockKind) {
        *self.counts.entry(kind).or_insert(0) += 1;
    }

    pub fn get(&self, kind: BlockKind) -> u32 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }
}
