pub type FrameId = u64;

/// Why a scan pass was started.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanReason {
    /// The delayed first pass after a document loads.
    Initial,
    /// A debounced pass triggered by structural mutations.
    Mutation,
    /// An explicit re-scan requested over the bus.
    Manual,
}
