//! Per-instance liveness state.

/// Whether an outbox or inbox instance is still trusted.
///
/// `Failed` is terminal: it is only ever set by fraud evidence (see
/// [`crate::fraud`]) and is never unset.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum InstanceState {
    /// Accepting mutations.
    #[default]
    Active,
    /// Permanently halted.
    Failed,
}

impl InstanceState {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed)
    }
}
