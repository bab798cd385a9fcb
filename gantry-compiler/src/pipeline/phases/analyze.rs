//! Analyze phase - computes shared data from the API surface.

use eyre::Result;

use crate::{
    pipeline::{CompileContext, Phase},
    surface::ComputedData,
};

/// Phase that computes shared analysis data from the lowered surface.
///
/// Must run after [`super::LowerPhase`].
pub struct AnalyzePhase;

impl Phase for AnalyzePhase {
    fn name(&self) -> &'static str {
        "analyze"
    }

    fn description(&self) -> &'static str {
        "Compute binding counts and surface statistics"
    }

    fn run(&self, ctx: &mut CompileContext) -> Result<()> {
        let surface = ctx
            .surface
            .as_ref()
            .ok_or_else(|| eyre::eyre!("surface not set - AnalyzePhase must run after LowerPhase"))?;

        ctx.computed = Some(ComputedData::from_surface(surface));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use gantry_manifest::Manifest;

    use super::*;
    use crate::pipeline::phases::LowerPhase;

    #[test]
    fn test_analyze_requires_lowered_surface() {
        let manifest = Manifest::from_str("[gateway]\nname = \"api\"").expect("parse");
        let mut ctx = CompileContext::new(manifest);

        assert!(AnalyzePhase.run(&mut ctx).is_err());
    }

    #[test]
    fn test_analyze_populates_computed() {
        let manifest = Manifest::from_str(
            r#"
            [gateway]
            name = "api"

            [routes."/item".methods.GET]
            name = "getAllTodo"
            handler = "app.getAllTodo"
            auth = "none"

            [routes."/item".methods.OPTIONS]
            integration = "mock"
        "#,
        )
        .expect("parse");
        let mut ctx = CompileContext::new(manifest);

        LowerPhase.run(&mut ctx).expect("lower");
        AnalyzePhase.run(&mut ctx).expect("analyze");

        let computed = ctx.computed.as_ref().expect("computed should be set");
        assert_eq!(computed.route_count, 1);
        assert_eq!(computed.method_count, 2);
        assert_eq!(computed.binding_count, 1);
        assert_eq!(computed.mock_count, 1);
    }
}
