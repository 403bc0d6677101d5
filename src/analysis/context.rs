use crate::analysis::external_api::AnalyzerConfig;
use crate::analysis::style_set::StyleSet;

/// State of one walk over a parsed source.
#[derive(Debug)]
pub struct AnalysisContext {
    pub styles: StyleSet,
    pub nodes_visited: usize,
    // nodes that reported their own parse diagnostics
    pub malformed_nodes: usize,
}

impl AnalysisContext {
    pub fn new(config: &AnalyzerConfig) -> Self {
        Self {
            styles: StyleSet::new(config),
            nodes_visited: 0,
            malformed_nodes: 0,
        }
    }
}
