//!
//! Supported digest algorithms and their descriptors.
//!
//! A descriptor is the single source of truth for an algorithm's name,
//! output length and engine table. SHA-512/224 and SHA-512/256 share the
//! SHA-512 context shape, so output lengths are never derived from the
//! context size.
//!

use core::fmt;
use core::str::FromStr;

use digest_traits::digest::DigestAlgorithm;
use native_engine::DigestEngine;

use crate::error::NativeDigestError;

/// Identifier of a supported digest algorithm.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Algorithm {
    Md5,
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
    Sha512_224,
    Sha512_256,
    Sha3_224,
    Sha3_256,
    Sha3_384,
    Sha3_512,
}

/// Immutable description of one algorithm.
#[derive(Debug)]
pub struct AlgorithmDescriptor {
    algorithm: Algorithm,
    name: &'static str,
    digest_length: usize,
    engine: &'static DigestEngine,
}

impl AlgorithmDescriptor {
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Output length in bytes.
    pub fn digest_length(&self) -> usize {
        self.digest_length
    }

    /// Context size reported by the engine.
    pub fn context_size(&self) -> usize {
        (self.engine.context_size)()
    }

    pub(crate) fn engine(&self) -> &'static DigestEngine {
        self.engine
    }
}

const fn descriptor(
    algorithm: Algorithm,
    name: &'static str,
    digest_length: usize,
    engine: &'static DigestEngine,
) -> AlgorithmDescriptor {
    AlgorithmDescriptor {
        algorithm,
        name,
        digest_length,
        engine,
    }
}

// Indexed by `Algorithm as usize`.
static DESCRIPTORS: [AlgorithmDescriptor; 12] = [
    descriptor(Algorithm::Md5, "MD5", 16, &native_engine::MD5),
    descriptor(Algorithm::Sha1, "SHA1", 20, &native_engine::SHA1),
    descriptor(Algorithm::Sha224, "SHA-224", 28, &native_engine::SHA224),
    descriptor(Algorithm::Sha256, "SHA-256", 32, &native_engine::SHA256),
    descriptor(Algorithm::Sha384, "SHA-384", 48, &native_engine::SHA384),
    descriptor(Algorithm::Sha512, "SHA-512", 64, &native_engine::SHA512),
    descriptor(Algorithm::Sha512_224, "SHA-512/224", 28, &native_engine::SHA512_224),
    descriptor(Algorithm::Sha512_256, "SHA-512/256", 32, &native_engine::SHA512_256),
    descriptor(Algorithm::Sha3_224, "SHA3-224", 28, &native_engine::SHA3_224),
    descriptor(Algorithm::Sha3_256, "SHA3-256", 32, &native_engine::SHA3_256),
    descriptor(Algorithm::Sha3_384, "SHA3-384", 48, &native_engine::SHA3_384),
    descriptor(Algorithm::Sha3_512, "SHA3-512", 64, &native_engine::SHA3_512),
];

impl Algorithm {
    pub const ALL: [Algorithm; 12] = [
        Algorithm::Md5,
        Algorithm::Sha1,
        Algorithm::Sha224,
        Algorithm::Sha256,
        Algorithm::Sha384,
        Algorithm::Sha512,
        Algorithm::Sha512_224,
        Algorithm::Sha512_256,
        Algorithm::Sha3_224,
        Algorithm::Sha3_256,
        Algorithm::Sha3_384,
        Algorithm::Sha3_512,
    ];

    pub fn descriptor(self) -> &'static AlgorithmDescriptor {
        &DESCRIPTORS[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    pub fn digest_length(self) -> usize {
        self.descriptor().digest_length
    }

    /// Looks up an algorithm by its exact registered name.
    pub fn from_name(name: &str) -> Result<Self, NativeDigestError> {
        DESCRIPTORS
            .iter()
            .find(|descriptor| descriptor.name == name)
            .map(|descriptor| descriptor.algorithm)
            .ok_or_else(|| NativeDigestError::UnsupportedAlgorithm {
                name: name.to_string(),
            })
    }
}

impl FromStr for Algorithm {
    type Err = NativeDigestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::from_name(s)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Zero-sized markers for statically selected algorithms.
pub mod markers {
    use super::DigestAlgorithm;

    macro_rules! digest_marker {
        ($($marker:ident => $name:literal, $bits:literal;)*) => {
            $(
                #[derive(Clone, Copy, Debug, Default)]
                pub struct $marker;

                impl DigestAlgorithm for $marker {
                    const NAME: &'static str = $name;
                    const OUTPUT_BITS: usize = $bits;
                }
            )*
        };
    }

    digest_marker! {
        Md5 => "MD5", 128;
        Sha1 => "SHA1", 160;
        Sha2_224 => "SHA-224", 224;
        Sha2_256 => "SHA-256", 256;
        Sha2_384 => "SHA-384", 384;
        Sha2_512 => "SHA-512", 512;
        Sha2_512_224 => "SHA-512/224", 224;
        Sha2_512_256 => "SHA-512/256", 256;
        Sha3_224 => "SHA3-224", 224;
        Sha3_256 => "SHA3-256", 256;
        Sha3_384 => "SHA3-384", 384;
        Sha3_512 => "SHA3-512", 512;
    }
}

#[cfg(test)]
mod tests {
    use super::markers::*;
    use super::*;

    #[test]
    fn test_descriptor_table_is_indexed_by_algorithm() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.descriptor().algorithm(), algorithm);
        }
    }

    #[test]
    fn test_names_round_trip() {
        for algorithm in Algorithm::ALL {
            assert_eq!(Algorithm::from_name(algorithm.name()), Ok(algorithm));
            assert_eq!(algorithm.to_string().parse::<Algorithm>(), Ok(algorithm));
        }
    }

    #[test]
    fn test_output_lengths() {
        let expected = [
            ("MD5", 16),
            ("SHA1", 20),
            ("SHA-224", 28),
            ("SHA-256", 32),
            ("SHA-384", 48),
            ("SHA-512", 64),
            ("SHA-512/224", 28),
            ("SHA-512/256", 32),
            ("SHA3-224", 28),
            ("SHA3-256", 32),
            ("SHA3-384", 48),
            ("SHA3-512", 64),
        ];
        for (name, length) in expected {
            assert_eq!(Algorithm::from_name(name).unwrap().digest_length(), length);
        }
    }

    #[test]
    fn test_unknown_name() {
        assert_eq!(
            Algorithm::from_name("sha-256"),
            Err(NativeDigestError::UnsupportedAlgorithm {
                name: "sha-256".to_string()
            })
        );
        assert!("SHA-1".parse::<Algorithm>().is_err());
    }

    #[test]
    fn test_truncated_variants_share_context_shape() {
        let sha512 = Algorithm::Sha512.descriptor().context_size();
        assert_eq!(Algorithm::Sha512_224.descriptor().context_size(), sha512);
        assert_eq!(Algorithm::Sha512_256.descriptor().context_size(), sha512);
        assert_ne!(
            Algorithm::Sha512_224.digest_length(),
            Algorithm::Sha512_256.digest_length()
        );
    }

    fn marker_matches<A: DigestAlgorithm>() {
        let algorithm = Algorithm::from_name(A::NAME).unwrap();
        assert_eq!(algorithm.digest_length() * 8, A::OUTPUT_BITS);
    }

    #[test]
    fn test_markers_agree_with_descriptors() {
        marker_matches::<Md5>();
        marker_matches::<Sha1>();
        marker_matches::<Sha2_224>();
        marker_matches::<Sha2_256>();
        marker_matches::<Sha2_384>();
        marker_matches::<Sha2_512>();
        marker_matches::<Sha2_512_224>();
        marker_matches::<Sha2_512_256>();
        marker_matches::<Sha3_224>();
        marker_matches::<Sha3_256>();
        marker_matches::<Sha3_384>();
        marker_matches::<Sha3_512>();
    }
}
