// ============================================================================
// Exchange Configuration
// ============================================================================

/// Tunables for an exchange session.
#[derive(Debug, Clone)]
pub struct ExchangeConfig {
    /// Capacity of the bounded work queue between the input and matching
    /// actors. The input actor blocks once this many submissions are
    /// pending.
    pub queue_capacity: usize,

    /// How many recent transactions an `Inspect` command reports.
    pub inspect_depth: usize,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            queue_capacity: 64,
            inspect_depth: 5,
        }
    }
}

impl ExchangeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the work queue capacity.
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    /// Builder method: set the inspection report depth.
    pub fn with_inspect_depth(mut self, depth: usize) -> Self {
        self.inspect_depth = depth;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.queue_capacity == 0 {
            return Err("Queue capacity must be positive".to_string());
        }
        Ok(())
    }
}
