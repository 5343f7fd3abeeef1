//! Compares native digests against in-process reference digests for every
//! supported algorithm.

mod common;

use common::{franz_jagt, init_tracing, reference_digest, ALGORITHMS};
use native_digest::{ByteWindow, NativeDigest, NativeDigestProvider};
use rstest::{fixture, rstest};

#[fixture]
fn provider() -> NativeDigestProvider {
    init_tracing();
    NativeDigestProvider::new()
}

fn create(provider: &NativeDigestProvider, name: &str) -> NativeDigest {
    provider.create(name).unwrap()
}

fn assert_digest(name: &str, actual: Vec<u8>, expected: Vec<u8>) {
    assert_eq!(hex::encode(actual), hex::encode(expected), "algorithm {name}");
}

#[rstest]
fn compare_getters(provider: NativeDigestProvider) {
    for name in ALGORITHMS {
        let digest = create(&provider, name);
        assert_eq!(digest.name(), name);
        assert_eq!(
            digest.digest_length(),
            reference_digest(name, b"").len(),
            "algorithm {name}"
        );
    }
}

#[rstest]
fn digest_with_no_data(provider: NativeDigestProvider) {
    for name in ALGORITHMS {
        let mut digest = create(&provider, name);
        assert_digest(name, digest.digest().unwrap(), reference_digest(name, b""));
    }
}

#[rstest]
fn digest_with_string_bytes(provider: NativeDigestProvider) {
    let data = franz_jagt();
    for name in ALGORITHMS {
        let mut digest = create(&provider, name);
        assert_digest(name, digest.digest_of(&data).unwrap(), reference_digest(name, &data));
    }
}

#[rstest]
fn update_with_single_bytes(provider: NativeDigestProvider) {
    let data = franz_jagt();
    for name in ALGORITHMS {
        let mut digest = create(&provider, name);
        for &byte in &data {
            digest.update(byte).unwrap();
        }
        assert_digest(name, digest.digest().unwrap(), reference_digest(name, &data));
    }
}

#[rstest]
fn update_with_window(provider: NativeDigestProvider) {
    let data = franz_jagt();
    for name in ALGORITHMS {
        let mut window = ByteWindow::new(&data);
        let mut digest = create(&provider, name);
        digest.update(&mut window).unwrap();

        assert_eq!(window.position(), data.len());
        assert_eq!(window.limit(), data.len());
        assert_eq!(window.capacity(), data.len());
        assert_digest(name, digest.digest().unwrap(), reference_digest(name, &data));
    }
}

#[rstest]
fn update_with_window_no_remaining(provider: NativeDigestProvider) {
    // A window whose position was advanced by writing its contents.
    let data = franz_jagt();
    for name in ALGORITHMS {
        let mut window = ByteWindow::with_bounds(&data, data.len(), data.len()).unwrap();
        let mut digest = create(&provider, name);
        digest.update(&mut window).unwrap();

        assert_eq!(window.position(), data.len());
        assert_eq!(window.limit(), data.len());
        assert_eq!(window.capacity(), data.len());
        assert_digest(name, digest.digest().unwrap(), reference_digest(name, b""));
    }
}

#[rstest]
fn update_with_fragmented_array(provider: NativeDigestProvider) {
    let inner = franz_jagt();
    let mut data = inner.clone();
    data.resize(inner.len() * 2, 0);

    for name in ALGORITHMS {
        let mut digest = create(&provider, name);
        digest.update_range(&data, 0, inner.len()).unwrap();
        assert_digest(name, digest.digest().unwrap(), reference_digest(name, &inner));
    }
}

#[rstest]
fn update_with_long_array(provider: NativeDigestProvider) {
    let data: Vec<u8> = (0..64 * 1024).map(|i| i as u8).collect();
    let rounds = 16;
    let whole = data.repeat(rounds);

    for name in ALGORITHMS {
        let mut digest = create(&provider, name);
        for _ in 0..rounds {
            digest.update_range(&data, 0, data.len()).unwrap();
        }
        assert_digest(name, digest.digest().unwrap(), reference_digest(name, &whole));
    }
}

#[rstest]
fn update_with_long_window(provider: NativeDigestProvider) {
    let data: Vec<u8> = (0..64 * 1024).map(|i| i as u8).collect();
    let rounds = 16;
    let whole = data.repeat(rounds);

    for name in ALGORITHMS {
        let mut window = ByteWindow::new(&data);
        let mut digest = create(&provider, name);
        for _ in 0..rounds {
            digest.update(&mut window).unwrap();
            window.flip();
        }
        assert_digest(name, digest.digest().unwrap(), reference_digest(name, &whole));
    }
}

#[rstest]
fn digest_twice_yields_empty_digest(provider: NativeDigestProvider) {
    for name in ALGORITHMS {
        let mut digest = create(&provider, name);
        assert_digest(name, digest.digest().unwrap(), reference_digest(name, b""));
        assert_digest(name, digest.digest().unwrap(), reference_digest(name, b""));
    }
}

#[rstest]
fn reset_reproduces_digest(provider: NativeDigestProvider) {
    let data = franz_jagt();
    for name in ALGORITHMS {
        let mut digest = create(&provider, name);
        let first = digest.digest_of(&data).unwrap();

        digest.update_bytes(b"discarded").unwrap();
        digest.reset().unwrap();
        assert_digest(name, digest.digest_of(&data).unwrap(), first);
    }
}

#[rstest]
fn sha256_four_ways(provider: NativeDigestProvider) {
    let data = franz_jagt();
    let mut digest = create(&provider, "SHA-256");

    let one_shot = hex::encode(digest.digest_of(&data).unwrap());

    for &byte in &data {
        digest.update_byte(byte).unwrap();
    }
    let single_bytes = hex::encode(digest.digest().unwrap());

    for chunk in data.chunks(7) {
        digest.update_bytes(chunk).unwrap();
    }
    let chunked = hex::encode(digest.digest().unwrap());

    let mut window = ByteWindow::new(&data);
    digest.update_window(&mut window).unwrap();
    let windowed = hex::encode(digest.digest().unwrap());

    assert_eq!(one_shot, hex::encode(reference_digest("SHA-256", &data)));
    assert_eq!(single_bytes, one_shot);
    assert_eq!(chunked, one_shot);
    assert_eq!(windowed, one_shot);
}

#[rstest]
fn md5_empty_known_value(provider: NativeDigestProvider) {
    let mut digest = create(&provider, "MD5");
    assert_eq!(
        hex::encode(digest.digest().unwrap()),
        "d41d8cd98f00b204e9800998ecf8427e"
    );
}
