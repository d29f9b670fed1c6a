//! Layout trait for diagram geometry

use anyhow::Result;

use crate::model::ClassModel;

/// Arranges an assembled model in diagram coordinates
///
/// Implementations must be deterministic: the same model (same class
/// and relationship order) always yields the same output.
pub trait LayoutAlgorithm: Send + Sync {
    /// The positioned output of this algorithm
    type Output;

    /// Compute positions for every class and relationship of `model`
    fn layout(&self, model: &ClassModel) -> Result<Self::Output>;

    /// Get the name of this layout algorithm
    fn name(&self) -> &'static str;
}
