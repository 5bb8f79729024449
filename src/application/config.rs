// src/application/config.rs
//
// Plugin configuration and the include/exclude path filter.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::AppResult;
use crate::services::ScriptStrategy;

/// Construction-time options for the plugin adapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginOptions {
    /// Include patterns (regex). Empty means the default virtual-extension
    /// matcher for the configured script strategy.
    pub include: Vec<String>,

    /// Exclude patterns (regex). Default: none.
    pub exclude: Vec<String>,

    /// How the script block of a component is sourced.
    pub script_strategy: ScriptStrategy,
}

impl Default for PluginOptions {
    fn default() -> Self {
        Self {
            include: Vec::new(),
            exclude: Vec::new(),
            script_strategy: ScriptStrategy::default(),
        }
    }
}

/// Compiled inclusion/exclusion predicate over source paths.
///
/// A path is handled when it matches any include pattern and no exclude
/// pattern. Filtering happens before any filesystem probe.
#[derive(Debug, Clone)]
pub struct PathFilter {
    include: Vec<Regex>,
    exclude: Vec<Regex>,
}

impl PathFilter {
    /// Compile the filter from options. An empty include list falls back
    /// to the strategy's virtual-extension pattern.
    pub fn from_options(options: &PluginOptions) -> AppResult<Self> {
        let include_patterns: Vec<String> = if options.include.is_empty() {
            vec![options
                .script_strategy
                .default_include_pattern()
                .to_string()]
        } else {
            options.include.clone()
        };

        let include = include_patterns
            .iter()
            .map(|pattern| Regex::new(pattern))
            .collect::<Result<Vec<_>, _>>()?;
        let exclude = options
            .exclude
            .iter()
            .map(|pattern| Regex::new(pattern))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { include, exclude })
    }

    /// True when the plugin handles this path.
    pub fn matches(&self, path: &Path) -> bool {
        let text = path.to_string_lossy();
        self.include.iter().any(|pattern| pattern.is_match(&text))
            && !self.exclude.iter().any(|pattern| pattern.is_match(&text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn test_default_include_matches_vue_extension() {
        let filter = PathFilter::from_options(&PluginOptions::default()).unwrap();
        assert!(filter.matches(Path::new("/app/foo.vue")));
        assert!(!filter.matches(Path::new("/app/foo.vuex")));
        assert!(!filter.matches(Path::new("/app/foo.js")));
    }

    #[test]
    fn test_inline_strategy_default_matches_script_suffixes() {
        let options = PluginOptions {
            script_strategy: ScriptStrategy::InlineFromSource,
            ..Default::default()
        };
        let filter = PathFilter::from_options(&options).unwrap();
        assert!(filter.matches(Path::new("/app/comp.vue-js")));
        assert!(filter.matches(Path::new("/app/comp.vue-tsx")));
        assert!(!filter.matches(Path::new("/app/comp.vue")));
    }

    #[test]
    fn test_exclude_overrides_include() {
        let options = PluginOptions {
            exclude: vec![r"node_modules".to_string()],
            ..Default::default()
        };
        let filter = PathFilter::from_options(&options).unwrap();
        assert!(filter.matches(Path::new("/app/src/foo.vue")));
        assert!(!filter.matches(Path::new("/app/node_modules/pkg/foo.vue")));
    }

    #[test]
    fn test_explicit_include_replaces_default() {
        let options = PluginOptions {
            include: vec![r"\.component$".to_string()],
            ..Default::default()
        };
        let filter = PathFilter::from_options(&options).unwrap();
        assert!(filter.matches(Path::new("/app/foo.component")));
        assert!(!filter.matches(Path::new("/app/foo.vue")));
    }

    #[test]
    fn test_invalid_pattern_surfaces_as_error() {
        let options = PluginOptions {
            include: vec!["(".to_string()],
            ..Default::default()
        };
        let err = PathFilter::from_options(&options).unwrap_err();
        assert!(matches!(err, AppError::Pattern(_)));
    }
}
