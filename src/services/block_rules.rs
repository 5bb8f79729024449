// src/services/block_rules.rs
//
// Block Definition Set
//
// Which file-name suffixes map to which block kind, and how each matched
// file renders into the assembled document.
//
// CRITICAL RULES:
// - Definition order is fixed priority order; it decides candidate slots
// - Suffix matching is exact-suffix match against the candidate file name
// - Definitions are immutable once built and shared across resolutions

use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};

use crate::domain::BlockKind;
use crate::infrastructure::FileAccess;

// ============================================================================
// SCRIPT STRATEGY
// ============================================================================

/// How the script block of a component is sourced.
///
/// The two conventions are never active at the same time; the host picks
/// one at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptStrategy {
    /// The virtual source ends in `.vue`; the script file is probed on
    /// disk next to it like every other block and referenced via
    /// `<script src>`.
    SiblingReference,

    /// The source path's own suffix (`.vue-js`, `.vue-ts`, ...) names the
    /// script file; its content is read and inlined into the document.
    InlineFromSource,
}

impl Default for ScriptStrategy {
    fn default() -> Self {
        ScriptStrategy::SiblingReference
    }
}

impl ScriptStrategy {
    /// Include pattern matching the virtual extension for this strategy.
    pub fn default_include_pattern(self) -> &'static str {
        match self {
            ScriptStrategy::SiblingReference => r"\.vue$",
            ScriptStrategy::InlineFromSource => r"\.vue-(?:tsx|ts|jsx|js)$",
        }
    }
}

// ============================================================================
// FRAGMENT GENERATION
// ============================================================================

/// The unified fragment generator: produce fragment text for a resolved
/// path, capable of failing. One asynchronous operation regardless of
/// whether the underlying work is interpolation or a file read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FragmentKind {
    TemplateReference,
    ScriptReference,
    ScriptInline,
    StyleReference { scoped: bool },
    CustomReference { tag: String },
}

impl FragmentKind {
    /// Render the document fragment for a matched file.
    ///
    /// `ScriptInline` reads the file through the filesystem seam and
    /// propagates the read error; reference variants cannot fail.
    pub async fn render(&self, path: &Path, files: &dyn FileAccess) -> io::Result<String> {
        match self {
            FragmentKind::TemplateReference => {
                Ok(format!("<template src=\"{}\" />\n", path.display()))
            }
            FragmentKind::ScriptReference => {
                Ok(format!("<script src=\"{}\" />\n", path.display()))
            }
            FragmentKind::ScriptInline => {
                let code = files.read_to_string(path).await?;
                Ok(format!("<script>\n{}\n</script>\n", code))
            }
            FragmentKind::StyleReference { scoped: true } => {
                Ok(format!("<style scoped src=\"{}\" />\n", path.display()))
            }
            FragmentKind::StyleReference { scoped: false } => {
                Ok(format!("<style src=\"{}\" />\n", path.display()))
            }
            FragmentKind::CustomReference { tag } => {
                Ok(format!("<{} src=\"{}\" />\n", tag, path.display()))
            }
        }
    }
}

// ============================================================================
// BLOCK DEFINITION
// ============================================================================

/// One suffix-to-block rule: ordered candidate suffixes, the block kind
/// they contribute to, and the fragment rendered per matched file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockDefinition {
    suffixes: Vec<String>,
    kind: BlockKind,
    fragment: FragmentKind,
}

impl BlockDefinition {
    pub fn new(suffixes: Vec<String>, kind: BlockKind, fragment: FragmentKind) -> Self {
        Self {
            suffixes,
            kind,
            fragment,
        }
    }

    pub fn template(suffix: &str) -> Self {
        Self::new(
            vec![suffix.to_string()],
            BlockKind::Template,
            FragmentKind::TemplateReference,
        )
    }

    pub fn script_reference(suffixes: &[&str]) -> Self {
        Self::new(
            suffixes.iter().map(|s| s.to_string()).collect(),
            BlockKind::Script,
            FragmentKind::ScriptReference,
        )
    }

    pub fn script_inline(suffixes: &[&str]) -> Self {
        Self::new(
            suffixes.iter().map(|s| s.to_string()).collect(),
            BlockKind::Script,
            FragmentKind::ScriptInline,
        )
    }

    pub fn style(suffix: &str, scoped: bool) -> Self {
        Self::new(
            vec![suffix.to_string()],
            BlockKind::Style,
            FragmentKind::StyleReference { scoped },
        )
    }

    pub fn custom(suffix: &str, tag: &str) -> Self {
        Self::new(
            vec![suffix.to_string()],
            BlockKind::Custom,
            FragmentKind::CustomReference {
                tag: tag.to_string(),
            },
        )
    }

    pub fn kind(&self) -> BlockKind {
        self.kind
    }

    pub fn fragment(&self) -> &FragmentKind {
        &self.fragment
    }

    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }

    /// First suffix that is a trailing match of `source`, if any.
    pub fn matching_suffix(&self, source: &Path) -> Option<&str> {
        let name = source.to_string_lossy();
        self.suffixes
            .iter()
            .map(String::as_str)
            .find(|suffix| name.ends_with(suffix))
    }

    /// Copy of this definition restricted to a single candidate suffix.
    pub fn narrowed(&self, suffix: &str) -> Self {
        Self {
            suffixes: vec![suffix.to_string()],
            kind: self.kind,
            fragment: self.fragment.clone(),
        }
    }

    /// Candidate sibling path for one suffix: directory joined with
    /// base name + "." + suffix, the dot omitted when the suffix already
    /// starts with one.
    pub fn candidate_path(directory: &Path, base_name: &str, suffix: &str) -> PathBuf {
        let file_name = if suffix.starts_with('.') {
            format!("{}{}", base_name, suffix)
        } else {
            format!("{}.{}", base_name, suffix)
        };
        directory.join(file_name)
    }
}

// ============================================================================
// BLOCK RULES
// ============================================================================

/// The fixed-priority definition list for one plugin instance.
#[derive(Debug, Clone)]
pub struct BlockRules {
    definitions: Vec<BlockDefinition>,
}

impl BlockRules {
    /// Default definition set for a script strategy: template (`html`),
    /// the strategy's script rule, scoped style (`scoped.css`), plain
    /// style (`css`).
    pub fn for_strategy(strategy: ScriptStrategy) -> Self {
        let script = match strategy {
            ScriptStrategy::SiblingReference => {
                BlockDefinition::script_reference(&["tsx", "jsx", "ts", "js"])
            }
            ScriptStrategy::InlineFromSource => {
                BlockDefinition::script_inline(&["vue-tsx", "vue-ts", "vue-jsx", "vue-js"])
            }
        };

        Self {
            definitions: vec![
                BlockDefinition::template("html"),
                script,
                BlockDefinition::style("scoped.css", true),
                BlockDefinition::style("css", false),
            ],
        }
    }

    /// Build rules from an explicit definition list, for hosts with
    /// bespoke conventions.
    pub fn from_definitions(definitions: Vec<BlockDefinition>) -> Self {
        Self { definitions }
    }

    /// Append a host-registered custom block rule. Custom blocks always
    /// assemble after every other section; relative order of appended
    /// definitions is preserved.
    pub fn with_custom_block(mut self, suffix: &str, tag: &str) -> Self {
        self.definitions.push(BlockDefinition::custom(suffix, tag));
        self
    }

    pub fn definitions(&self) -> &[BlockDefinition] {
        &self.definitions
    }

    /// Partition into per-kind groups, preserving relative order within
    /// each group. Group order is the document section order.
    pub fn partition(&self) -> PartitionedRules<'_> {
        let mut parts = PartitionedRules::default();
        for definition in &self.definitions {
            match definition.kind() {
                BlockKind::Script => parts.script.push(definition),
                BlockKind::Template => parts.template.push(definition),
                BlockKind::Style => parts.style.push(definition),
                BlockKind::Custom => parts.custom.push(definition),
            }
        }
        parts
    }
}

/// Definitions grouped by kind, in document section order: script,
/// template, style(s), custom.
#[derive(Debug, Default)]
pub struct PartitionedRules<'a> {
    pub script: Vec<&'a BlockDefinition>,
    pub template: Vec<&'a BlockDefinition>,
    pub style: Vec<&'a BlockDefinition>,
    pub custom: Vec<&'a BlockDefinition>,
}

// ============================================================================
// TESTS
// ============================================================================
