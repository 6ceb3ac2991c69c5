use std::sync::atomic::{AtomicU32, Ordering};

/// Generates a unique schema name per test.
///
/// Names have the form `test_{process_id}_{test_counter}`, so tests running in
/// parallel, within or across processes, never see each other's tables.
#[derive(Clone)]
pub struct TestIsolation {
    process_id: u32,
    test_counter: u32,
}

static TEST_COUNTER: AtomicU32 = AtomicU32::new(0);

impl TestIsolation {
    pub fn new() -> Self {
        Self {
            process_id: std::process::id(),
            test_counter: TEST_COUNTER.fetch_add(1, Ordering::Relaxed),
        }
    }

    pub fn schema(&self) -> String {
        format!("test_{}_{}", self.process_id, self.test_counter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schemas_are_unique() {
        let a = TestIsolation::new().schema();
        let b = TestIsolation::new().schema();

        assert_ne!(a, b);
        assert!(a.starts_with(&format!("test_{}_", std::process::id())));
    }
}
