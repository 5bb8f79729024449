// src/services/resolver_service.rs
//
// Resolution Pipeline
//
// Transforms a virtual source path into a ResolutionOutcome without
// committing anything: probes fan out concurrently, outcomes fold in a
// single deterministic pass, and the assembled document is only exposed
// when every cardinality constraint holds.
//
// CRITICAL RULES:
// - Deterministic: section and candidate slot order alone decide document
//   order, never probe completion order
// - No early exit: every probe runs to completion so all violations are
//   reported together
// - No filesystem access outside the FileAccess seam

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::domain::block::{validate_block_counts, BlockCounts, BlockKind};
use crate::domain::resolution::{ProbeFailure, ResolutionOutcome, ResolutionRequest};
use crate::domain::DomainError;
use crate::error::{AppError, AppResult};
use crate::infrastructure::FileAccess;
use crate::services::block_rules::{BlockDefinition, BlockRules, FragmentKind, ScriptStrategy};

// ============================================================================
// RESOLVER SERVICE
// ============================================================================

pub struct ResolverService {
    files: Arc<dyn FileAccess>,
    rules: BlockRules,
    strategy: ScriptStrategy,
}

impl ResolverService {
    pub fn new(files: Arc<dyn FileAccess>, strategy: ScriptStrategy) -> Self {
        Self {
            files,
            rules: BlockRules::for_strategy(strategy),
            strategy,
        }
    }

    /// Replace the default definition set, e.g. after registering custom
    /// block rules via `BlockRules::with_custom_block`.
    pub fn with_rules(mut self, rules: BlockRules) -> Self {
        self.rules = rules;
        self
    }

    /// Resolve one virtual source path into an outcome.
    pub async fn resolve_component(&self, source: &Path) -> AppResult<ResolutionOutcome> {
        // Step 1-3: classify the source and fix the candidate slot order.
        let (request, ordered) = self.classify(source)?;

        log::debug!(
            "{}: resolving {} ({} definitions)",
            crate::PLUGIN_NAME,
            request.source_path.display(),
            ordered.len()
        );

        // Step 4: scatter. One task per candidate suffix; each task owns
        // its slot in `handles`.
        let mut handles: Vec<JoinHandle<CandidateProbe>> = Vec::new();
        for definition in &ordered {
            for suffix in definition.suffixes() {
                let path = BlockDefinition::candidate_path(
                    &request.directory,
                    &request.base_name,
                    suffix,
                );
                let files = Arc::clone(&self.files);
                let kind = definition.kind();
                let fragment = definition.fragment().clone();
                handles.push(tokio::spawn(async move {
                    probe_candidate(files, kind, fragment, path).await
                }));
            }
        }

        // Gather in slot order: completion order never leaks into the
        // document.
        let mut probes = Vec::with_capacity(handles.len());
        for handle in handles {
            let probe = handle
                .await
                .map_err(|e| AppError::Other(format!("probe task failed: {}", e)))?;
            probes.push(probe);
        }

        // Step 5-6: single fold into counts, failures and the document.
        let mut found_counts = BlockCounts::new();
        let mut probe_failures = Vec::new();
        let mut document = String::new();
        for probe in probes {
            if probe.found {
                found_counts.increment(probe.kind);
            }
            if let Some(failure) = probe.failure {
                probe_failures.push(failure);
            }
            document.push_str(&probe.fragment);
        }

        // Step 7: validate, reporting every violation together.
        let validation_errors = validate_block_counts(&found_counts);
        if !validation_errors.is_empty() {
            log::warn!(
                "{}: {} failed validation: {}",
                crate::PLUGIN_NAME,
                request.source_path.display(),
                validation_errors.join(", ")
            );
        }

        Ok(ResolutionOutcome::new(
            request.source_path,
            document,
            found_counts,
            validation_errors,
            probe_failures,
        ))
    }

    // ========================================================================
    // INTERNAL CLASSIFICATION
    // ========================================================================

    /// Steps 1-3: derive the request (directory, base name) and fix the
    /// ordered candidate slots: script first, then template, style,
    /// custom.
    fn classify(&self, source: &Path) -> AppResult<(ResolutionRequest, Vec<BlockDefinition>)> {
        let parts = self.rules.partition();

        let directory = source.parent().map(Path::to_path_buf).unwrap_or_default();
        let file_name = source
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                DomainError::InvariantViolation(format!(
                    "source path has no usable file name: {:?}",
                    source
                ))
            })?;

        let (base_name, script_definitions) = match self.strategy {
            ScriptStrategy::SiblingReference => {
                let base = file_name.strip_suffix(".vue").unwrap_or(file_name);
                let scripts: Vec<BlockDefinition> =
                    parts.script.into_iter().cloned().collect();
                (base.to_string(), scripts)
            }
            ScriptStrategy::InlineFromSource => {
                // Own-suffix selection: the first script definition with a
                // trailing match wins and fixes the base name. No match
                // means the filter admitted a path the engine cannot
                // classify.
                let selected = parts.script.iter().find_map(|definition| {
                    definition
                        .matching_suffix(source)
                        .map(|suffix| (*definition, suffix.to_string()))
                });
                let (definition, suffix) = selected.ok_or_else(|| {
                    DomainError::InvariantViolation(format!(
                        "no script definition matches the source suffix: {:?}",
                        source
                    ))
                })?;
                let base = file_name
                    .strip_suffix(suffix.as_str())
                    .ok_or_else(|| {
                        DomainError::InvariantViolation(format!(
                            "source file name does not carry its matched suffix {:?}: {:?}",
                            suffix, source
                        ))
                    })?
                    .trim_end_matches('.');
                (base.to_string(), vec![definition.narrowed(&suffix)])
            }
        };

        let mut ordered = script_definitions;
        ordered.extend(parts.template.into_iter().cloned());
        ordered.extend(parts.style.into_iter().cloned());
        ordered.extend(parts.custom.into_iter().cloned());

        let request = ResolutionRequest::new(source.to_path_buf(), directory, base_name);
        Ok((request, ordered))
    }
}

// ============================================================================
// CANDIDATE PROBING
// ============================================================================

/// Outcome of probing one candidate suffix. Each concurrent probe owns
/// exactly one slot; the fold pass never races.
#[derive(Debug)]
struct CandidateProbe {
    kind: BlockKind,
    found: bool,
    fragment: String,
    failure: Option<ProbeFailure>,
}

/// Step 4 worker: probe one candidate path and render its fragment.
///
/// A read failure after a successful existence probe still counts the
/// file as found; the failure is recorded and the fragment stays empty.
async fn probe_candidate(
    files: Arc<dyn FileAccess>,
    kind: BlockKind,
    fragment: FragmentKind,
    path: PathBuf,
) -> CandidateProbe {
    match files.probe(&path).await {
        Ok(()) => match fragment.render(&path, files.as_ref()).await {
            Ok(text) => CandidateProbe {
                kind,
                found: true,
                fragment: text,
                failure: None,
            },
            Err(error) => CandidateProbe {
                kind,
                found: true,
                fragment: String::new(),
                failure: Some(ProbeFailure::new(path, error.to_string())),
            },
        },
        Err(error) => CandidateProbe {
            kind,
            found: false,
            fragment: String::new(),
            failure: Some(ProbeFailure::new(path, error.to_string())),
        },
    }
}
