//! Compile context threaded through pipeline phases.

use gantry_ir::ApiSurface;
use gantry_manifest::Manifest;

use super::diagnostic::{Diagnostic, Severity};
use crate::surface::ComputedData;

/// State of one compilation, accumulated phase by phase.
#[derive(Debug)]
pub struct CompileContext {
    /// The manifest being compiled.
    pub manifest: Manifest,
    /// The lowered API surface (populated by the lower phase).
    pub surface: Option<ApiSurface>,
    /// Shared analysis data (populated by the analyze phase).
    pub computed: Option<ComputedData>,
    /// Everything the lints and phases found.
    pub diagnostics: Vec<Diagnostic>,
}

impl CompileContext {
    pub fn new(manifest: Manifest) -> Self {
        Self {
            manifest,
            surface: None,
            computed: None,
            diagnostics: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    pub fn has_warnings(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_warning())
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    /// All error diagnostics.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity.is_error())
    }

    /// All warning diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Warning))
    }

    pub fn push_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Take the lowered surface out of the context.
    ///
    /// # Panics
    ///
    /// Panics if the lower phase has not run.
    pub fn take_surface(&mut self) -> ApiSurface {
        self.surface
            .take()
            .expect("surface not set - did the lower phase run?")
    }
}
