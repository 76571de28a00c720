//! Script execution triggers.

/// The reason a script is being executed (matches C# TriggerType exactly).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TriggerType {
    /// The system is persisting a block and runs the natives' OnPersist
    /// scripts before its transactions.
    OnPersist = 0x01,
    /// The system is persisting a block and runs the natives' PostPersist
    /// scripts after its transactions.
    PostPersist = 0x02,
    /// A witness verification script is being executed.
    Verification = 0x20,
    /// An application script (transaction body) is being executed.
    Application = 0x40,
}

impl TriggerType {
    /// Returns `true` for the two block-persistence triggers.
    pub fn is_system(self) -> bool {
        matches!(self, TriggerType::OnPersist | TriggerType::PostPersist)
    }
}
