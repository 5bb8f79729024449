// src/application/plugin.rs
//
// Host-facing plugin adapter.
//
// CRITICAL RULES:
// - Both operations filter first; non-matching paths return Ok(None)
//   ("not handled") without touching the filesystem
// - The hand-off cache, filesystem seam and event sink are injected at
//   construction; the adapter owns no process-wide state
// - A caller never receives a usable document alongside an error

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::application::config::{PathFilter, PluginOptions};
use crate::error::{AppError, AppResult};
use crate::events::{
    ComponentResolved, DocumentLoaded, EventSink, LogEventSink, PluginEventRecord,
    ResolutionRejected,
};
use crate::infrastructure::{FileAccess, HandoffCache, TokioFileAccess};
use crate::services::{BlockRules, ResolverService};

pub struct MfcPlugin {
    filter: PathFilter,
    resolver: ResolverService,
    cache: Arc<HandoffCache>,
    events: Arc<dyn EventSink>,
}

impl MfcPlugin {
    /// Production wiring: tokio filesystem access, a fresh hand-off
    /// cache, log-backed events.
    pub fn new(options: PluginOptions) -> AppResult<Self> {
        Self::with_dependencies(
            options,
            Arc::new(TokioFileAccess),
            Arc::new(HandoffCache::new()),
            Arc::new(LogEventSink),
        )
    }

    /// Full dependency injection.
    pub fn with_dependencies(
        options: PluginOptions,
        files: Arc<dyn FileAccess>,
        cache: Arc<HandoffCache>,
        events: Arc<dyn EventSink>,
    ) -> AppResult<Self> {
        let filter = PathFilter::from_options(&options)?;
        let resolver = ResolverService::new(files, options.script_strategy);
        Ok(Self {
            filter,
            resolver,
            cache,
            events,
        })
    }

    /// Swap the definition set, e.g. to register custom blocks.
    pub fn with_rules(mut self, rules: BlockRules) -> Self {
        self.resolver = self.resolver.with_rules(rules);
        self
    }

    /// Resolve a source specifier against its importer.
    ///
    /// Returns the resolved path when this plugin will serve it (the
    /// assembled document is parked in the hand-off cache for the
    /// subsequent `load`), `None` when the path is not handled, and the
    /// aggregated validation error when block constraints fail.
    pub async fn resolve_id(
        &self,
        source: &str,
        importer: Option<&Path>,
    ) -> AppResult<Option<PathBuf>> {
        let resolved = normalize_specifier(source, importer);
        if !self.filter.matches(&resolved) {
            return Ok(None);
        }

        let document = self.run_resolution(&resolved).await?;
        self.events
            .publish(PluginEventRecord::ComponentResolved(ComponentResolved::new(
                resolved.clone(),
                document.len(),
            )));
        self.cache.insert(resolved.clone(), document);
        Ok(Some(resolved))
    }

    /// Serve the document for a previously resolved path.
    ///
    /// Consumes the hand-off cache entry when present; otherwise re-runs
    /// a full resolution. Returns `None` when the path is not handled.
    pub async fn load(&self, id: &Path) -> AppResult<Option<String>> {
        if !self.filter.matches(id) {
            return Ok(None);
        }

        if let Some(document) = self.cache.take(id) {
            self.events
                .publish(PluginEventRecord::DocumentLoaded(DocumentLoaded::new(
                    id.to_path_buf(),
                    true,
                )));
            return Ok(Some(document));
        }

        let document = self.run_resolution(id).await?;
        self.events
            .publish(PluginEventRecord::DocumentLoaded(DocumentLoaded::new(
                id.to_path_buf(),
                false,
            )));
        Ok(Some(document))
    }

    async fn run_resolution(&self, path: &Path) -> AppResult<String> {
        let outcome = self.resolver.resolve_component(path).await?;
        match outcome.combined_error() {
            Some(error) => {
                self.events
                    .publish(PluginEventRecord::ResolutionRejected(ResolutionRejected::new(
                        path.to_path_buf(),
                        error.clone(),
                    )));
                Err(AppError::BlockValidation(error))
            }
            None => Ok(outcome.into_document().unwrap_or_default()),
        }
    }
}

/// Resolve a specifier the way the host hands it over: absolute paths
/// pass through, relative ones resolve against the importer's directory.
fn normalize_specifier(source: &str, importer: Option<&Path>) -> PathBuf {
    let source_path = Path::new(source);
    if source_path.is_absolute() {
        return source_path.to_path_buf();
    }
    match importer.and_then(Path::parent) {
        Some(directory) => directory.join(source_path),
        None => source_path.to_path_buf(),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::NullEventSink;
    use crate::infrastructure::MockFileAccess;
    use std::fs;
    use std::sync::Mutex;

    fn default_plugin() -> (MfcPlugin, Arc<HandoffCache>) {
        let cache = Arc::new(HandoffCache::new());
        let plugin = MfcPlugin::with_dependencies(
            PluginOptions::default(),
            Arc::new(TokioFileAccess),
            Arc::clone(&cache),
            Arc::new(NullEventSink),
        )
        .unwrap();
        (plugin, cache)
    }

    #[test]
    fn test_normalize_specifier() {
        assert_eq!(
            normalize_specifier("/abs/foo.vue", Some(Path::new("/app/main.js"))),
            PathBuf::from("/abs/foo.vue")
        );
        assert_eq!(
            normalize_specifier("./foo.vue", Some(Path::new("/app/main.js"))),
            PathBuf::from("/app/./foo.vue")
        );
        assert_eq!(
            normalize_specifier("foo.vue", None),
            PathBuf::from("foo.vue")
        );
    }

    #[tokio::test]
    async fn test_resolve_then_single_consuming_load() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("foo.js"), "export default {}").unwrap();
        let source = dir.path().join("foo.vue");

        let (plugin, cache) = default_plugin();

        let resolved = plugin
            .resolve_id(source.to_str().unwrap(), None)
            .await
            .unwrap()
            .expect("path should be handled");
        assert_eq!(resolved, source);
        assert_eq!(cache.len(), 1);

        let expected = format!("<script src=\"{}/foo.js\" />\n", dir.path().display());

        // First load consumes the hand-off entry.
        let document = plugin.load(&resolved).await.unwrap().unwrap();
        assert_eq!(document, expected);
        assert!(cache.is_empty());

        // Second load re-runs resolution from scratch and still serves
        // the same document.
        let document = plugin.load(&resolved).await.unwrap().unwrap();
        assert_eq!(document, expected);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_resolve_surfaces_aggregated_validation_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("foo.html"), "<div />").unwrap();
        let source = dir.path().join("foo.vue");

        let (plugin, cache) = default_plugin();
        let err = plugin
            .resolve_id(source.to_str().unwrap(), None)
            .await
            .unwrap_err();

        match err {
            AppError::BlockValidation(message) => {
                assert!(message.contains("Found 0 files for script but 1 are required"));
            }
            other => panic!("expected validation error, got: {}", other),
        }
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_unhandled_paths_trigger_no_probes() {
        let mut files = MockFileAccess::new();
        files.expect_probe().times(0);
        files.expect_read_to_string().times(0);

        let plugin = MfcPlugin::with_dependencies(
            PluginOptions::default(),
            Arc::new(files),
            Arc::new(HandoffCache::new()),
            Arc::new(NullEventSink),
        )
        .unwrap();

        assert!(plugin
            .resolve_id("/app/foo.txt", None)
            .await
            .unwrap()
            .is_none());
        assert!(plugin.load(Path::new("/app/foo.txt")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_excluded_paths_are_not_handled() {
        let options = PluginOptions {
            exclude: vec!["vendor".to_string()],
            ..Default::default()
        };
        let plugin = MfcPlugin::with_dependencies(
            options,
            Arc::new(MockFileAccess::new()),
            Arc::new(HandoffCache::new()),
            Arc::new(NullEventSink),
        )
        .unwrap();

        assert!(plugin
            .resolve_id("/app/vendor/foo.vue", None)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_relative_specifier_resolves_against_importer() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("foo.js"), "export default {}").unwrap();
        let importer = dir.path().join("main.js");

        let (plugin, _cache) = default_plugin();
        let resolved = plugin
            .resolve_id("foo.vue", Some(&importer))
            .await
            .unwrap()
            .expect("path should be handled");
        assert_eq!(resolved, dir.path().join("foo.vue"));
    }

    struct CollectingSink {
        seen: Mutex<Vec<&'static str>>,
    }

    impl EventSink for CollectingSink {
        fn publish(&self, event: PluginEventRecord) {
            self.seen.lock().unwrap().push(event.event_type());
        }
    }

    #[tokio::test]
    async fn test_events_trace_the_resolve_load_cycle() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("foo.js"), "export default {}").unwrap();
        let source = dir.path().join("foo.vue");

        let sink = Arc::new(CollectingSink {
            seen: Mutex::new(Vec::new()),
        });
        let plugin = MfcPlugin::with_dependencies(
            PluginOptions::default(),
            Arc::new(TokioFileAccess),
            Arc::new(HandoffCache::new()),
            Arc::clone(&sink) as Arc<dyn EventSink>,
        )
        .unwrap();

        let resolved = plugin
            .resolve_id(source.to_str().unwrap(), None)
            .await
            .unwrap()
            .unwrap();
        plugin.load(&resolved).await.unwrap();

        let seen = sink.seen.lock().unwrap();
        assert_eq!(*seen, vec!["ComponentResolved", "DocumentLoaded"]);
    }
}
