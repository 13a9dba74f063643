// ID Provider Port (for deterministic testing)

/// ID provider interface (allows deterministic IDs in tests)
pub trait IdProvider: Send + Sync {
    /// Generate a new unique id suffix for a job.
    fn generate_id(&self) -> String;
}

/// UUID v4 provider (production)
pub struct UuidProvider;

impl IdProvider for UuidProvider {
    fn generate_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

#[cfg(test)]
pub struct SequentialIdProvider {
    next: std::sync::atomic::AtomicU64,
}

#[cfg(test)]
impl SequentialIdProvider {
    pub fn new() -> Self {
        Self {
            next: std::sync::atomic::AtomicU64::new(1),
        }
    }
}

#[cfg(test)]
impl IdProvider for SequentialIdProvider {
    fn generate_id(&self) -> String {
        self.next
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst)
            .to_string()
    }
}
