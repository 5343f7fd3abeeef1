use std::sync::Arc;

use digest_traits::digest::{DigestAlgorithm, DigestInit, DigestRegistry, ErrorType};

use crate::adapter::NativeDigest;
use crate::algorithm::Algorithm;
use crate::config::ReclaimerConfig;
use crate::error::NativeDigestError;
use crate::store::ContextStore;

/// Entry point for creating native digests.
///
/// Cloning a provider shares its context store.
#[derive(Clone, Debug)]
pub struct NativeDigestProvider {
    store: Arc<ContextStore>,
}

impl NativeDigestProvider {
    pub fn new() -> Self {
        Self::with_store(Arc::new(ContextStore::new()))
    }

    pub fn with_config(config: ReclaimerConfig) -> Self {
        Self::with_store(Arc::new(ContextStore::with_config(config)))
    }

    pub fn with_store(store: Arc<ContextStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<ContextStore> {
        &self.store
    }

    /// Creates a digest for a registered algorithm name such as `SHA-256`.
    pub fn create(&self, name: &str) -> Result<NativeDigest, NativeDigestError> {
        let algorithm = Algorithm::from_name(name)?;
        self.create_for(algorithm)
    }

    pub fn create_for(&self, algorithm: Algorithm) -> Result<NativeDigest, NativeDigestError> {
        NativeDigest::new(self.store.clone(), algorithm)
    }
}

impl Default for NativeDigestProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorType for NativeDigestProvider {
    type Error = NativeDigestError;
}

impl DigestRegistry for NativeDigestProvider {
    type AlgorithmId = Algorithm;
    type DigestOp = NativeDigest;

    fn supports_algorithm(&self, algorithm_id: Algorithm) -> bool {
        Algorithm::ALL.contains(&algorithm_id)
    }

    fn get_output_size(&self, algorithm_id: Algorithm) -> Option<usize> {
        Some(algorithm_id.digest_length())
    }

    fn create_digest(&mut self, algorithm_id: Algorithm) -> Result<Self::DigestOp, Self::Error> {
        self.create_for(algorithm_id)
    }

    fn supported_algorithms(&self) -> &[Algorithm] {
        &Algorithm::ALL
    }
}

impl<A: DigestAlgorithm> DigestInit<A> for NativeDigestProvider {
    type OpContext = NativeDigest;

    fn init(&self, _algo: A) -> Result<Self::OpContext, Self::Error> {
        self.create(A::NAME)
    }
}
