//! Test support for the workspace's MongoDB-backed crates.
//!
//! - [`TestMongo`]: disposable MongoDB container (feature `mongo`, on by default)
//! - [`TestDataBuilder`]: names and ids derived from the test name
//! - [`assertions`]: assertion helpers with contextual panic messages
//!
//! ```rust,ignore
//! use test_utils::{TestDataBuilder, TestMongo};
//!
//! #[tokio::test]
//! #[ignore]
//! async fn stores_products() {
//!     let mongo = TestMongo::new().await;
//!     let data = TestDataBuilder::from_test_name("stores_products");
//!     let db = mongo.database(&data.database_name());
//! }
//! ```

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use uuid::Uuid;

#[cfg(feature = "mongo")]
mod mongo;

#[cfg(feature = "mongo")]
pub use mongo::TestMongo;

/// Deterministic test data keyed on a seed.
///
/// Two builders with the same seed produce the same values, so a failing
/// test can be rerun against identical data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from a hash of the test's name.
    pub fn from_test_name(name: &str) -> Self {
        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// UUID whose two halves are the seed bytes.
    pub fn id(&self) -> Uuid {
        let half = self.seed.to_le_bytes();
        let mut bytes = [0u8; 16];
        bytes[..8].copy_from_slice(&half);
        bytes[8..].copy_from_slice(&half);
        Uuid::from_bytes(bytes)
    }

    /// `test-<prefix>-<seed>-<suffix>`, e.g. `test-product-1234-lamp`.
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    /// Database name private to this seed; tests sharing a container stay
    /// isolated.
    pub fn database_name(&self) -> String {
        format!("test_{}", self.seed)
    }
}

pub mod assertions {
    use uuid::Uuid;

    pub fn assert_uuid_eq(actual: Uuid, expected: Uuid, context: &str) {
        assert_eq!(actual, expected, "{}: ids differ", context);
    }

    /// Unwrap `value`, panicking with `context` when it is `None`.
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        match value {
            Some(inner) => inner,
            None => panic!("{}: expected Some, got None", context),
        }
    }
}
