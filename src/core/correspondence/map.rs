use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CorrespondenceError {
    #[error("source slice {source_index} maps to {target_index}, outside a target stack of {target_count}")]
    TargetOutOfRange {
        source_index: usize,
        target_index: usize,
        target_count: usize,
    },
}

/// Lookup from a source slice index to the matching target slice index.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CorrespondenceMap {
    targets: Vec<usize>,
    target_count: usize,
}

impl CorrespondenceMap {
    /// Index-identity over the first `min(source_count, target_count)` slices.
    #[must_use]
    pub fn identity_truncated(source_count: usize, target_count: usize) -> Self {
        Self {
            targets: (0..source_count.min(target_count)).collect(),
            target_count,
        }
    }

    /// Builds a map from explicit targets, `targets[source_index]`.
    pub fn from_targets(targets: Vec<usize>, target_count: usize) -> Result<Self, CorrespondenceError> {
        if let Some((source_index, &target_index)) = targets
            .iter()
            .enumerate()
            .find(|(_, target)| **target >= target_count)
        {
            return Err(CorrespondenceError::TargetOutOfRange {
                source_index,
                target_index,
                target_count,
            });
        }

        Ok(Self {
            targets,
            target_count,
        })
    }

    #[must_use]
    pub fn get(&self, source_index: usize) -> Option<usize> {
        self.targets.get(source_index).copied()
    }

    /// Mapped target index, falling back to `source_index` itself when
    /// unmapped, clamped to a stack of `target_count` slices.
    #[must_use]
    pub fn resolve(map: Option<&Self>, source_index: usize, target_count: usize) -> Option<usize> {
        let last = target_count.checked_sub(1)?;
        let mapped = map
            .and_then(|map| map.get(source_index))
            .unwrap_or(source_index);

        Some(mapped.min(last))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    #[must_use]
    pub fn target_count(&self) -> usize {
        self.target_count
    }
}
