// src/plot_context.rs

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

/// Context struct containing output parameters shared by every plotting function.
/// This centralizes output naming and makes it easier to extend functionality
/// without breaking existing function signatures
#[derive(Debug, Clone)]
pub struct PlotContext {
    /// Directory all figures and exports are written to
    pub output_dir: PathBuf,

    /// Filename prefix for output file naming (e.g. "OwlWing")
    pub prefix: String,

    /// Whether the coefficient table is exported alongside the figures
    pub export_csv: bool,
}

impl PlotContext {
    /// Create a new PlotContext with the provided parameters
    pub fn new(output_dir: impl Into<PathBuf>, prefix: impl Into<String>, export_csv: bool) -> Self {
        Self {
            output_dir: output_dir.into(),
            prefix: prefix.into(),
            export_csv,
        }
    }

    /// Creates the output directory if it does not exist yet
    pub fn ensure_output_dir(&self) -> Result<(), Box<dyn Error>> {
        if !self.output_dir.as_os_str().is_empty() && !self.output_dir.exists() {
            fs::create_dir_all(&self.output_dir)?;
            println!("  Created output directory '{}'.", self.output_dir.display());
        }
        Ok(())
    }

    /// Path of a PNG figure, e.g. `<dir>/<prefix>_AirfoilGeometry.png`
    pub fn figure_path(&self, name: &str) -> PathBuf {
        self.file_path(name, "png")
    }

    /// Path of an arbitrary output file with the given extension
    pub fn file_path(&self, name: &str, extension: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}_{}.{}", self.prefix, name, extension))
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_figure_path_uses_prefix_and_dir() {
        let ctx = PlotContext::new("out", "Wing", true);
        assert_eq!(
            ctx.figure_path("FlowSeparation"),
            PathBuf::from("out").join("Wing_FlowSeparation.png")
        );
        assert_eq!(
            ctx.file_path("coefficients", "csv"),
            PathBuf::from("out").join("Wing_coefficients.csv")
        );
    }
}
