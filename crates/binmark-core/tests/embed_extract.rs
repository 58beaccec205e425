use std::path::PathBuf;

use tempfile::TempDir;

use binmark_core::{commands, pbm, BinmarkError, BitMatrix, CodecOptions};

const PAYLOAD: &[u8] = b"fingerprint template #42, property of the rightful owner";

/// A busy but structured cover: dithered-looking diagonal texture.
fn cover_bitmap() -> BitMatrix {
    let mut rng = fastrand::Rng::with_seed(2024);
    BitMatrix::from_fn(256, 256, |row, col| (row + 2 * col) % 5 == 0 || rng.u8(..) < 32)
}

fn write_cover(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("cover.pbm");
    pbm::write_bitmap(&path, &cover_bitmap(), None).unwrap();
    path
}

#[test]
fn embeds_and_extracts_through_files() {
    let dir = TempDir::new().unwrap();
    let cover = write_cover(&dir);
    let marked = dir.path().join("marked.pbm");
    let options = CodecOptions::default();

    let stats = commands::embed(&cover, &marked, PAYLOAD, &options, None).unwrap();
    assert!(stats.bits > 0);

    let recovered = commands::extract(&marked, &options).unwrap();
    assert_eq!(recovered, PAYLOAD);
}

#[test]
fn verify_accepts_the_embedded_payload_and_rejects_others() {
    let dir = TempDir::new().unwrap();
    let cover = write_cover(&dir);
    let marked = dir.path().join("marked.pbm");
    let options = CodecOptions::default();

    commands::embed(&cover, &marked, PAYLOAD, &options, None).unwrap();

    assert!(commands::verify(&marked, PAYLOAD, &options).unwrap());
    assert!(!commands::verify(&marked, b"someone else entirely", &options).unwrap());
}

#[test]
fn wrong_seed_fails_authentication_instead_of_guessing() {
    let dir = TempDir::new().unwrap();
    let cover = write_cover(&dir);
    let marked = dir.path().join("marked.pbm");

    commands::embed(&cover, &marked, PAYLOAD, &CodecOptions::default(), None).unwrap();

    let wrong = CodecOptions {
        seed: 1337,
        ..CodecOptions::default()
    };
    match commands::extract(&marked, &wrong) {
        Err(BinmarkError::PayloadIntegrity) => {}
        other => panic!("expected an integrity failure, got {other:?}"),
    }
    assert!(!commands::verify(&marked, PAYLOAD, &wrong).unwrap());
}

#[test]
fn plain_cover_has_no_trailer_to_extract() {
    let dir = TempDir::new().unwrap();
    let cover = write_cover(&dir);

    match commands::extract(&cover, &CodecOptions::default()) {
        Err(BinmarkError::MissingTrailer) => {}
        other => panic!("expected a missing trailer, got {other:?}"),
    }
}

#[test]
fn table_cache_is_created_and_reused() {
    let dir = TempDir::new().unwrap();
    let cover = write_cover(&dir);
    let marked = dir.path().join("marked.pbm");
    let cache = dir.path().join("flip-table.dat");
    let options = CodecOptions::default();

    commands::embed(&cover, &marked, PAYLOAD, &options, Some(&cache)).unwrap();
    let first = std::fs::metadata(&cache).unwrap().len();
    assert!(first > 0);

    // Second run loads the cached table rather than rewriting it.
    let modified = std::fs::metadata(&cache).unwrap().modified().unwrap();
    commands::embed(&cover, &marked, PAYLOAD, &options, Some(&cache)).unwrap();
    assert_eq!(std::fs::metadata(&cache).unwrap().len(), first);
    assert_eq!(std::fs::metadata(&cache).unwrap().modified().unwrap(), modified);

    let recovered = commands::extract(&marked, &options).unwrap();
    assert_eq!(recovered, PAYLOAD);
}
