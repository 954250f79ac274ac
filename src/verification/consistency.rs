//! Cross-checks between independently computed counts

use thiserror::Error;

use super::counter::ToolCounts;
use crate::generation::{ModuleCount, ServerContext};
use crate::naming::Module;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    #[error("Tool count mismatch: expected {expected}, found {actual}")]
    CountMismatch { expected: usize, actual: usize },

    #[error("Read-only ({read_only}) + mutating ({mutating}) does not equal total ({total})")]
    SplitMismatch {
        read_only: usize,
        mutating: usize,
        total: usize,
    },

    #[error("Module tools ({modules}) + always-on ({always_on}) does not equal total ({total})")]
    PartitionMismatch {
        modules: usize,
        always_on: usize,
        total: usize,
    },

    #[error("Module '{module}' differs: expected {expected:?}, found {actual:?}")]
    ModuleMismatch {
        module: Module,
        expected: ModuleCount,
        actual: ModuleCount,
    },
}

/// Internal consistency of one set of counts
pub fn verify_consistency(counts: &ToolCounts) -> Result<(), VerificationError> {
    let total = counts.total();
    if counts.read_only + counts.mutating != total {
        return Err(VerificationError::SplitMismatch {
            read_only: counts.read_only,
            mutating: counts.mutating,
            total,
        });
    }

    let modules: usize = counts.modules.values().map(ModuleCount::total).sum();
    if modules + counts.always_on != total {
        return Err(VerificationError::PartitionMismatch {
            modules,
            always_on: counts.always_on,
            total,
        });
    }
    Ok(())
}

/// Every disagreement between the recomputed counts and a built context
pub fn compare_with_context(counts: &ToolCounts, context: &ServerContext) -> Vec<VerificationError> {
    let mut errors = Vec::new();

    if context.tool_count != counts.total() {
        errors.push(VerificationError::CountMismatch {
            expected: counts.total(),
            actual: context.tool_count,
        });
    }
    if context.tools.len() != context.tool_count {
        errors.push(VerificationError::CountMismatch {
            expected: context.tool_count,
            actual: context.tools.len(),
        });
    }
    if context.read_only_count != counts.read_only || context.mutating_count != counts.mutating {
        errors.push(VerificationError::SplitMismatch {
            read_only: context.read_only_count,
            mutating: context.mutating_count,
            total: counts.total(),
        });
    }

    for module in Module::ALL {
        let expected = counts.modules.get(&module).copied().unwrap_or_default();
        let actual = context.module_counts.get(&module).copied().unwrap_or_default();
        if expected != actual {
            errors.push(VerificationError::ModuleMismatch {
                module,
                expected,
                actual,
            });
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::NamingTables;
    use crate::verification::ToolCounter;
    use serde_json::json;

    fn counts() -> ToolCounts {
        let doc = json!({
            "rest_endpoints": {"tag": {"path": "/t"}},
            "global_endpoints": {"status": {"path": "/status"}}
        });
        ToolCounter::new(NamingTables::builtin()).count(&doc)
    }

    #[test]
    fn test_consistent_counts_pass() {
        assert_eq!(verify_consistency(&counts()), Ok(()));
    }

    #[test]
    fn test_split_mismatch_detected() {
        let mut broken = counts();
        broken.mutating += 1;
        assert!(matches!(
            verify_consistency(&broken),
            Err(VerificationError::SplitMismatch { .. })
        ));
    }

    #[test]
    fn test_partition_mismatch_detected() {
        let mut broken = counts();
        broken.always_on += 1;
        let err = verify_consistency(&broken).unwrap_err();
        assert!(matches!(err, VerificationError::PartitionMismatch { .. }));
        assert!(err.to_string().contains("always-on"));
    }
}
