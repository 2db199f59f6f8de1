// SPDX-License-Identifier: Apache-2.0

/// What to do when an incoming value cannot be stored in its declared slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MismatchPolicy {
    /// Abort with [`BindError::FieldTypeMismatch`](crate::BindError::FieldTypeMismatch).
    #[default]
    Fail,
    /// Consume and drop the value; the slot keeps its previous value.
    Skip,
}

/// Binder configuration.
///
/// ```
/// use picobind::{BindOptions, MismatchPolicy};
///
/// let options = BindOptions::new()
///     .with_max_depth(16)
///     .with_mismatch_policy(MismatchPolicy::Skip);
/// assert_eq!(options.max_depth(), 16);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindOptions {
    max_depth: usize,
    on_mismatch: MismatchPolicy,
}

impl BindOptions {
    pub const DEFAULT_MAX_DEPTH: usize = 128;

    pub const fn new() -> Self {
        BindOptions {
            max_depth: Self::DEFAULT_MAX_DEPTH,
            on_mismatch: MismatchPolicy::Fail,
        }
    }

    /// Limits how many objects/arrays may be open at once while binding.
    /// Values discarded because nothing declares them are skipped without
    /// recursion and do not count against the limit.
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub const fn with_mismatch_policy(mut self, policy: MismatchPolicy) -> Self {
        self.on_mismatch = policy;
        self
    }

    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub const fn mismatch_policy(&self) -> MismatchPolicy {
        self.on_mismatch
    }
}

impl Default for BindOptions {
    fn default() -> Self {
        Self::new()
    }
}
