//! Audio store lifecycle integration tests

use std::io::Read;
use std::sync::Arc;
use std::thread;

use kotoba::audio::AudioStore;

#[test]
fn test_saved_file_matches_registered_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let store = AudioStore::new();
    let id = store.register(vec![0x52, 0x49, 0x46, 0x46]);

    let path = store.save_to(id, dir.path()).unwrap();

    assert_eq!(path.extension().and_then(|e| e.to_str()), Some("wav"));
    assert_eq!(std::fs::read(&path).unwrap(), [0x52, 0x49, 0x46, 0x46]);
}

#[test]
fn test_saved_filenames_do_not_collide() {
    let dir = tempfile::tempdir().unwrap();
    let store = AudioStore::new();

    let a = store.register(vec![1]);
    let b = store.register(vec![2]);

    let path_a = store.save_to(a, dir.path()).unwrap();
    let path_b = store.save_to(b, dir.path()).unwrap();

    assert_ne!(path_a, path_b);
}

#[test]
fn test_reader_is_a_streamable_source() {
    let store = AudioStore::new();
    let id = store.register((0u8..100).collect());

    let mut reader = store.reader(id);
    let mut head = [0u8; 10];
    reader.read_exact(&mut head).unwrap();
    assert_eq!(head, [0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);

    let mut rest = Vec::new();
    reader.read_to_end(&mut rest).unwrap();
    assert_eq!(rest.len(), 90);
}

#[test]
fn test_release_is_per_handle() {
    let store = AudioStore::new();
    let keep = store.register(vec![1]);
    let drop_me = store.register(vec![2]);

    store.release(drop_me);

    // The surviving artifact is untouched
    assert_eq!(store.bytes(keep).as_ref(), &[1]);
    assert_eq!(store.len(), 1);
    store.release(keep);
}

#[test]
fn test_concurrent_registration_and_release() {
    let store = Arc::new(AudioStore::new());

    let handles: Vec<_> = (0u8..8)
        .map(|i| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let mut ids = Vec::new();
                for _ in 0..50 {
                    ids.push(store.register(vec![i; 16]));
                }
                for id in &ids {
                    assert_eq!(store.bytes(*id).as_ref(), &[i; 16]);
                }
                for id in ids {
                    store.release(id);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert!(store.is_empty());
}
