//! Typst rendering engine.
//!
//! Handles the low-level details of writing Typst source to temporary files,
//! invoking the compiler, and reading back the output PDF.

use std::fs;
use std::process::Command;
use tempfile::{tempdir, TempDir};

use super::RenderError;

const SOURCE_FILE: &str = "main.typ";
const OUTPUT_FILE: &str = "output.pdf";

/// Engine for rendering Typst source to PDF with an external `typst` binary.
#[derive(Debug, Clone)]
pub struct TypstRenderEngine {
    typst_bin: String,
}

impl Default for TypstRenderEngine {
    fn default() -> Self {
        Self::new("typst")
    }
}

impl TypstRenderEngine {
    pub fn new(typst_bin: impl Into<String>) -> Self {
        Self {
            typst_bin: typst_bin.into(),
        }
    }

    pub fn typst_bin(&self) -> &str {
        &self.typst_bin
    }

    /// Compile a complete Typst document and return the PDF bytes.
    pub fn render(&self, typst_source: &str) -> Result<Vec<u8>, RenderError> {
        let temp_dir = tempdir().map_err(RenderError::TempDir)?;
        let typ_path = temp_dir.path().join(SOURCE_FILE);

        fs::write(&typ_path, typst_source).map_err(RenderError::WriteTypst)?;

        self.compile_typst_to_pdf(&temp_dir)
    }

    fn compile_typst_to_pdf(&self, temp_dir: &TempDir) -> Result<Vec<u8>, RenderError> {
        let typ_path = temp_dir.path().join(SOURCE_FILE);
        let output_path = temp_dir.path().join(OUTPUT_FILE);

        log::debug!("Running {} compile {}", self.typst_bin, typ_path.display());
        let output = Command::new(&self.typst_bin)
            .arg("compile")
            .arg(&typ_path)
            .arg(&output_path)
            .current_dir(temp_dir.path())
            .output()
            .map_err(RenderError::TypstIo)?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            log::error!("Typst compilation failed with status {}: {}", code, stderr);
            return Err(RenderError::TypstExit { code, stderr });
        }

        fs::read(&output_path).map_err(RenderError::ReadPdf)
    }
}
