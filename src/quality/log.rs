use crate::{BatchId, BlockHeight, Principal, QualityTest, TestId};
use std::collections::HashMap;
use tracing::info;

/// Append-only record of quality test outcomes
#[derive(Debug, Default)]
pub struct QualityTestLog {
    last_test_id: TestId,
    tests: HashMap<TestId, QualityTest>,
}

impl QualityTestLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a test result
    ///
    /// Always succeeds, including for batch IDs that were never created.
    pub fn record_test(
        &mut self,
        batch_id: BatchId,
        test_type: String,
        results: String,
        passed: bool,
        caller: &Principal,
        height: BlockHeight,
    ) -> TestId {
        let test_id = self.last_test_id + 1;
        self.last_test_id = test_id;

        info!(
            "Test #{} ({}) on batch #{} by {}: passed={}",
            test_id, test_type, batch_id, caller, passed
        );
        self.tests.insert(
            test_id,
            QualityTest {
                batch_id,
                test_type,
                timestamp: height,
                tester: caller.clone(),
                results,
                passed,
            },
        );
        test_id
    }

    pub fn get_test(&self, test_id: TestId) -> Option<&QualityTest> {
        self.tests.get(&test_id)
    }

    pub fn last_test_id(&self) -> TestId {
        self.last_test_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_get() {
        let mut log = QualityTestLog::new();
        let tester = Principal::from("ST3LAB");

        let id = log.record_test(
            1,
            "gravity".to_string(),
            "OG 1.052".to_string(),
            true,
            &tester,
            12,
        );
        assert_eq!(id, 1);

        let test = log.get_test(id).unwrap();
        assert_eq!(test.batch_id, 1);
        assert_eq!(test.test_type, "gravity");
        assert_eq!(test.results, "OG 1.052");
        assert!(test.passed);
        assert_eq!(test.tester, tester);
        assert_eq!(test.timestamp, 12);
    }

    #[test]
    fn test_unknown_batch_is_accepted() {
        let mut log = QualityTestLog::new();
        let tester = Principal::from("ST3LAB");

        let first = log.record_test(999, "ph".to_string(), "4.9".to_string(), false, &tester, 1);
        let second = log.record_test(999, "ph".to_string(), "4.2".to_string(), true, &tester, 2);

        assert_eq!((first, second), (1, 2));
        assert_eq!(log.last_test_id(), 2);
        assert!(!log.get_test(first).unwrap().passed);
        assert!(log.get_test(3).is_none());
    }
}
