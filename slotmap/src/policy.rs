/// How a [`SlotMap`](crate::SlotMap) closes the hole left by a removed value
///
/// The policy is picked once, when the slot map is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemovalPolicy {
    /// Shift every value after the removed one a position toward the front.
    ///
    /// Keeps the relative order of the remaining values, and costs `O(n)`
    /// in the number of values after the removed one.
    KeepOrder,
    /// Move the last value into the removed value's position.
    ///
    /// `O(1)`, but doesn't preserve the order of the remaining values.
    SwapRemove,
}

impl Default for RemovalPolicy {
    fn default() -> Self { Self::KeepOrder }
}
