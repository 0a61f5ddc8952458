//! Backward operation trait

/// Propagates a result's gradient into the inputs that produced it.
///
/// Implementations read the result gradient from the cell they captured at
/// construction, accumulate into their inputs, then recurse into the
/// inputs' own backward ops.
pub trait BackwardOp {
    /// Run the backward step for this op and everything upstream of it
    fn backward(&self);
}
