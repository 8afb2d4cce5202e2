//! Traits for generator system standardization.

use super::{GeneratedDocument, RenderError, ReportFormat};

/// Trait for document generators.
pub trait Generator<Input> {
    /// Generate a document in the requested format.
    fn generate(
        &self,
        input: &Input,
        format: ReportFormat,
    ) -> Result<GeneratedDocument, RenderError>;
}
