// ============================================================================
// Engine Module
// The crossing algorithm applied after each insertion
// ============================================================================

mod crossing;

pub use crossing::execute_crossings;
