use core::fmt::Debug;

/// Common error kinds for digest operations.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The requested digest algorithm is not registered with the provider.
    UnsupportedAlgorithm,
    /// An offset or length passed to an update lies outside the source data.
    InvalidArgument,
    /// Memory for the digest context could not be allocated.
    ResourceExhausted,
    /// The digest was used after its context had been released.
    UseAfterClose,
    /// A digest context was released more than once.
    DoubleFreeDetected,
    /// The output buffer is too small for the digest.
    InvalidOutputSize,
}

/// Registry of supported digest algorithms for discovery and construction.
///
/// Providers map algorithm identifiers to digest operations. Identifiers are
/// usually parsed from configuration, so a registry must report unsupported
/// identifiers through its error type instead of panicking.
pub trait DigestRegistry: ErrorType {
    /// The type of algorithm identifiers used by this registry.
    type AlgorithmId: Copy + Debug + PartialEq;

    /// The type of digest operations created by this registry.
    type DigestOp;

    /// Check if a specific algorithm is supported by this registry.
    fn supports_algorithm(&self, algorithm_id: Self::AlgorithmId) -> bool;

    /// Get the output size in bytes for a supported algorithm.
    ///
    /// # Returns
    ///
    /// `Some(size)` if the algorithm is supported, `None` otherwise.
    fn get_output_size(&self, algorithm_id: Self::AlgorithmId) -> Option<usize>;

    /// Create a digest operation for the specified algorithm.
    ///
    /// # Returns
    ///
    /// A result containing the digest operation, or an error if the algorithm
    /// is not supported or the operation cannot be created.
    fn create_digest(&mut self, algorithm_id: Self::AlgorithmId) -> Result<Self::DigestOp, Self::Error>;

    /// Get a slice of all supported algorithm identifiers.
    fn supported_algorithms(&self) -> &[Self::AlgorithmId];
}

/// Streaming digest operation usable through dynamic dispatch.
///
/// The contract follows the usual message digest object semantics:
/// producing a digest implicitly resets the operation, so the same object
/// can be driven again for the next message.
///
/// ```rust
/// use digest_traits::digest::{DynamicDigestOp, Error, ErrorKind};
///
/// #[derive(Debug)]
/// enum MockError {
///     BufferTooSmall,
/// }
///
/// impl Error for MockError {
///     fn kind(&self) -> ErrorKind {
///         match self {
///             MockError::BufferTooSmall => ErrorKind::InvalidOutputSize,
///         }
///     }
/// }
///
/// struct XorDigest {
///     acc: u8,
/// }
///
/// impl DynamicDigestOp for XorDigest {
///     type Error = MockError;
///     type AlgorithmId = u32;
///
///     fn update(&mut self, input: &[u8]) -> Result<(), Self::Error> {
///         self.acc = input.iter().fold(self.acc, |acc, b| acc ^ b);
///         Ok(())
///     }
///
///     fn digest_into(&mut self, output: &mut [u8]) -> Result<usize, Self::Error> {
///         let first = output.first_mut().ok_or(MockError::BufferTooSmall)?;
///         *first = self.acc;
///         self.acc = 0;
///         Ok(1)
///     }
///
///     fn reset(&mut self) -> Result<(), Self::Error> {
///         self.acc = 0;
///         Ok(())
///     }
///
///     fn output_size(&self) -> usize {
///         1
///     }
///
///     fn algorithm_id(&self) -> Self::AlgorithmId {
///         7
///     }
/// }
///
/// let mut op: Box<dyn DynamicDigestOp<Error = MockError, AlgorithmId = u32>> =
///     Box::new(XorDigest { acc: 0 });
/// op.update(&[0x0f, 0xf0])?;
///
/// let mut out = [0u8; 4];
/// let written = op.digest_into(&mut out)?;
/// assert_eq!(&out[..written], &[0xff]);
///
/// // The digest reset the operation.
/// op.digest_into(&mut out)?;
/// assert_eq!(out[0], 0);
/// # Ok::<(), MockError>(())
/// ```
pub trait DynamicDigestOp {
    /// The type of error returned by digest operations.
    type Error: Error;

    /// The type of algorithm identifier for this digest operation.
    type AlgorithmId: Copy + Debug + PartialEq;

    /// Absorbs `input` into the digest state.
    fn update(&mut self, input: &[u8]) -> Result<(), Self::Error>;

    /// Finalizes the digest into `output` and resets the operation.
    ///
    /// # Returns
    ///
    /// The number of bytes written, which is always `output_size()`.
    fn digest_into(&mut self, output: &mut [u8]) -> Result<usize, Self::Error>;

    /// Discards any accumulated input.
    fn reset(&mut self) -> Result<(), Self::Error>;

    /// Returns the output size in bytes for this digest algorithm.
    fn output_size(&self) -> usize;

    /// Returns the algorithm identifier that was used to create this operation.
    fn algorithm_id(&self) -> Self::AlgorithmId;
}

/// Trait for converting implementation-specific errors into a common error kind.
pub trait Error: Debug {
    /// Returns a generic error kind corresponding to the specific error.
    fn kind(&self) -> ErrorKind;
}

impl Error for core::convert::Infallible {
    fn kind(&self) -> ErrorKind {
        match *self {}
    }
}

/// Trait for types that associate with a specific error type.
pub trait ErrorType {
    /// The associated error type.
    type Error: Error;
}

/// Trait representing a digest algorithm and its output characteristics.
pub trait DigestAlgorithm {
    /// The canonical algorithm name, e.g. `SHA-256`.
    const NAME: &'static str;

    /// The number of bits in the digest output.
    const OUTPUT_BITS: usize;
}

/// Trait for initializing a digest operation for a specific algorithm.
pub trait DigestInit<A: DigestAlgorithm>: ErrorType {
    /// The type representing the operational context for the digest.
    type OpContext: DigestOp;

    /// Initializes the digest operation with the specified algorithm.
    ///
    /// The `algo` parameter is a zero-sized marker. It keeps call sites
    /// self-documenting and drives type inference.
    fn init(&self, algo: A) -> Result<Self::OpContext, Self::Error>;
}

/// Optional trait for resetting a digest context to its initial state.
pub trait DigestCtrlReset: ErrorType {
    /// Resets the digest context.
    fn reset(&mut self) -> Result<(), Self::Error>;
}

/// Trait for performing single-shot digest operations.
pub trait DigestOp: ErrorType {
    /// The type of the digest output.
    type Output;

    /// Updates the digest state with the provided input data.
    fn update(&mut self, input: &[u8]) -> Result<(), Self::Error>;

    /// Finalizes the digest computation and returns the result, consuming
    /// the operation.
    fn finalize(self) -> Result<Self::Output, Self::Error>;
}
