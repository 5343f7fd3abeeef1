#![allow(dead_code)]

use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512, Sha512_224, Sha512_256};
use sha3::{Sha3_224, Sha3_256, Sha3_384, Sha3_512};
use tracing::level_filters::LevelFilter;

pub const FRANZ_JAGT: &str = "Franz jagt im komplett verwahrlosten Taxi quer durch Bayern";

pub const ALGORITHMS: [&str; 12] = [
    "MD5",
    "SHA1",
    "SHA-224",
    "SHA-256",
    "SHA-384",
    "SHA-512",
    "SHA-512/224",
    "SHA-512/256",
    "SHA3-224",
    "SHA3-256",
    "SHA3-384",
    "SHA3-512",
];

/// Initializes `tracing` output for tests once per process.
pub fn init_tracing() {
    static ONCE: std::sync::Once = std::sync::Once::new();

    ONCE.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_test_writer()
            .with_max_level(LevelFilter::DEBUG)
            .with_thread_names(true)
            .try_init();
    });
}

/// In-process reference digest for `name`.
pub fn reference_digest(name: &str, data: &[u8]) -> Vec<u8> {
    match name {
        "MD5" => Md5::digest(data).to_vec(),
        "SHA1" => Sha1::digest(data).to_vec(),
        "SHA-224" => Sha224::digest(data).to_vec(),
        "SHA-256" => Sha256::digest(data).to_vec(),
        "SHA-384" => Sha384::digest(data).to_vec(),
        "SHA-512" => Sha512::digest(data).to_vec(),
        "SHA-512/224" => Sha512_224::digest(data).to_vec(),
        "SHA-512/256" => Sha512_256::digest(data).to_vec(),
        "SHA3-224" => Sha3_224::digest(data).to_vec(),
        "SHA3-256" => Sha3_256::digest(data).to_vec(),
        "SHA3-384" => Sha3_384::digest(data).to_vec(),
        "SHA3-512" => Sha3_512::digest(data).to_vec(),
        other => panic!("no reference digest for {other}"),
    }
}

pub fn franz_jagt() -> Vec<u8> {
    FRANZ_JAGT.as_bytes().to_vec()
}
