pub mod aggregator;
pub mod formatter;
pub mod closed;

pub use aggregator::{aggregate, ResolutionGroups};
pub use formatter::{bug_count_plural, format_report, NO_BUGS_CLOSED};
pub use closed::{build_report, report, run_cycle, ClosedReport, CycleSummary};
