pub mod analysis;
pub mod app;
pub mod config;
pub mod error;
pub mod logging;
pub mod report;
pub mod types {
    pub mod analysis_data;
}

pub use analysis::TextAnalyzer;
pub use types::analysis_data::{AnalysisReport, PosFilter};

use error::AnalysisError;

/// Analyzes `text` and renders the report with `pos_filter` applied.
///
/// This is the whole of what the window does on "Process Text", kept free of
/// any UI type.
pub fn analyze_and_format(analyzer: &TextAnalyzer, text: &str, pos_filter: PosFilter) -> Result<String, AnalysisError> {
    let report = analyzer.analyze(text)?;
    Ok(report.render(pos_filter))
}
