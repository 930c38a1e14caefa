//! Batch processing of script files: discovery, the per-file state machine,
//! interrupt handling and the end-of-run summary.

pub mod interrupt;
pub mod orchestrator;
pub mod result;
pub mod scripts;

pub use interrupt::{watch_interrupts, FORCED_EXIT_CODE};
pub use orchestrator::{BatchOrchestrator, ProcessOutcome};
pub use result::{BatchResult, FileReport, FileStatus};
pub use scripts::{artifact_path, discover_scripts, status_report, ScriptStatus};
