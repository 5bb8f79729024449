use super::types::{BlockCounts, BlockKind};

/// Validates every block kind's found-count against the fixed registry.
///
/// Returns every violation in registry order; callers must not
/// short-circuit, because a resolution reports the complete picture.
pub fn validate_block_counts(counts: &BlockCounts) -> Vec<String> {
    let mut violations = Vec::new();

    for kind in BlockKind::ALL {
        let constraint = kind.constraint();
        let found = counts.get(kind);

        if found < constraint.min {
            violations.push(format!(
                "Found {} files for {} but {} are required",
                found, kind, constraint.min
            ));
        }
        if let Some(max) = constraint.max {
            if found > max {
                violations.push(format!(
                    "Found {} files for {} but only {} are permitted",
                    found, kind, max
                ));
            }
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts_of(entries: &[(BlockKind, u32)]) -> BlockCounts {
        let mut counts = BlockCounts::new();
        for (kind, n) in entries {
            for _ in 0..*n {
                counts.increment(*kind);
            }
        }
        counts
    }

    #[test]
    fn test_valid_counts_produce_no_violations() {
        let counts = counts_of(&[
            (BlockKind::Script, 1),
            (BlockKind::Template, 1),
            (BlockKind::Style, 3),
            (BlockKind::Custom, 2),
        ]);
        assert!(validate_block_counts(&counts).is_empty());
    }

    #[test]
    fn test_zero_styles_and_templates_are_valid() {
        let counts = counts_of(&[(BlockKind::Script, 1)]);
        assert!(validate_block_counts(&counts).is_empty());
    }

    #[test]
    fn test_missing_script_message_is_exact() {
        let counts = BlockCounts::new();
        let violations = validate_block_counts(&counts);
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0],
            "Found 0 files for script but 1 are required"
        );
    }

    #[test]
    fn test_excess_template_message_is_exact() {
        let counts = counts_of(&[(BlockKind::Template, 2), (BlockKind::Script, 1)]);
        let violations = validate_block_counts(&counts);
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0],
            "Found 2 files for template but only 1 are permitted"
        );
    }

    #[test]
    fn test_violations_aggregate_in_registry_order() {
        // Two templates and no script: both violations must be reported,
        // template (registry order) first.
        let counts = counts_of(&[(BlockKind::Template, 2)]);
        let violations = validate_block_counts(&counts);
        assert_eq!(violations.len(), 2);
        assert_eq!(
            violations[0],
            "Found 2 files for template but only 1 are permitted"
        );
        assert_eq!(
            violations[1],
            "Found 0 files for script but 1 are required"
        );
    }

    #[test]
    fn test_unbounded_kinds_never_violate_max() {
        let counts = counts_of(&[(BlockKind::Script, 1), (BlockKind::Style, 100)]);
        assert!(validate_block_counts(&counts).is_empty());
    }
}
