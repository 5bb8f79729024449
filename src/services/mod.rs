// src/services/mod.rs
//
// Services Module - the block-resolution engine

pub mod block_rules;
pub mod resolver_service;


// Re-export the engine surface
pub use block_rules::{BlockDefinition, BlockRules, FragmentKind, PartitionedRules, ScriptStrategy};

pub use resolver_service::ResolverService;
