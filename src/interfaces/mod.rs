// ============================================================================
// Interfaces Module
// Seams to the external collaborators
// ============================================================================

mod command_source;
mod snapshot_sink;
mod trade_reporter;

pub use command_source::{CommandSource, ScriptedSource};
pub use snapshot_sink::{render_top_of_book, FileSnapshotSink, NoOpSnapshotSink, SnapshotSink};
pub use trade_reporter::{LoggingTradeReporter, NoOpTradeReporter, TradeReporter};
