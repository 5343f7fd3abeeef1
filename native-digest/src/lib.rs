//!
//! Message digests computed by a native engine over natively allocated
//! contexts.
//!
//! ```
//! use native_digest::{ByteWindow, NativeDigestProvider};
//!
//! let provider = NativeDigestProvider::new();
//! let mut digest = provider.create("SHA-256")?;
//!
//! digest.update(b'a')?;
//! digest.update(&b"bc"[..])?;
//! let data = *b"abc";
//! let mut window = ByteWindow::new(&data);
//! digest.update(&mut window)?;
//! assert_eq!(window.position(), 3);
//!
//! let output = digest.digest()?;
//! assert_eq!(output.len(), 32);
//! digest.release()?;
//! # Ok::<(), native_digest::NativeDigestError>(())
//! ```
//!

mod adapter;
mod algorithm;
mod config;
mod error;
mod input;
mod provider;
mod reclaimer;
mod store;

pub use adapter::NativeDigest;
pub use algorithm::{markers, Algorithm, AlgorithmDescriptor};
pub use config::ReclaimerConfig;
pub use error::NativeDigestError;
pub use input::{ByteWindow, Input};
pub use provider::NativeDigestProvider;
pub use store::{ContextHandle, ContextId, ContextStore};
