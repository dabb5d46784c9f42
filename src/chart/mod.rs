/// Presentation layer: aggregation results → chart specifications.
///
/// `spec` holds the chart shapes and the functions filling them, `cloud`
/// lays out the genre word cloud and `dashboard` runs one full
/// filter → aggregate → present pass.

pub mod cloud;
pub mod dashboard;
pub mod spec;
