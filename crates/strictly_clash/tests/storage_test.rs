//! Tests for the persistent storage backends.

use std::sync::Arc;
use strictly_clash::{
    Clash, FileStorage, GameSerializer, GameStorage, Name, Storage, StorageErrorKind,
};
use strictly_reversi::{Color, Game};
use tempfile::TempDir;

fn name(s: &str) -> Name {
    Name::new(s).expect("valid name")
}

fn file_storage() -> (TempDir, FileStorage<Game, GameSerializer>) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let storage = FileStorage::new(dir.path().join("games"), GameSerializer);
    (dir, storage)
}

#[test]
fn test_file_create_then_read() {
    let (_dir, storage) = file_storage();
    let game = Game::new(Color::White);

    storage.create(&name("g1"), &game).expect("create");
    assert!(storage.dir().join("g1.txt").is_file());
    assert_eq!(storage.read(&name("g1")).expect("read"), Some(game));
}

#[test]
fn test_file_read_missing_is_none() {
    let (_dir, storage) = file_storage();
    assert_eq!(storage.read(&name("nothing")).expect("read"), None);
}

#[test]
fn test_file_create_twice_fails() {
    let (_dir, storage) = file_storage();
    let game = Game::new(Color::Black);
    storage.create(&name("g1"), &game).expect("first create");

    let err = storage.create(&name("g1"), &game).unwrap_err();
    assert_eq!(err.kind, StorageErrorKind::AlreadyExists);
}

#[test]
fn test_file_update_and_delete_require_record() {
    let (_dir, storage) = file_storage();
    let game = Game::new(Color::Black);

    assert_eq!(
        storage.update(&name("g1"), &game).unwrap_err().kind,
        StorageErrorKind::NotFound
    );
    assert_eq!(
        storage.delete(&name("g1")).unwrap_err().kind,
        StorageErrorKind::NotFound
    );

    storage.create(&name("g1"), &game).expect("create");
    let moved = game.play("4C".parse().expect("pos")).expect("legal");
    storage.update(&name("g1"), &moved).expect("update");
    assert_eq!(storage.read(&name("g1")).expect("read"), Some(moved));

    storage.delete(&name("g1")).expect("delete");
    assert_eq!(storage.read(&name("g1")).expect("read"), None);
}

#[test]
fn test_file_corrupt_record_is_codec_error() {
    let (_dir, storage) = file_storage();
    storage
        .create(&name("g1"), &Game::new(Color::Black))
        .expect("create");
    std::fs::write(storage.dir().join("g1.txt"), "not a game").expect("overwrite");

    assert_eq!(
        storage.read(&name("g1")).unwrap_err().kind,
        StorageErrorKind::Codec
    );
}

#[test]
fn test_file_reads_never_see_partial_updates() {
    let (_dir, storage) = file_storage();
    let key = name("g1");
    let fresh = Game::new(Color::Black);
    let moved = fresh.play("4C".parse().expect("pos")).expect("legal");
    storage.create(&key, &fresh).expect("create");

    let done = std::sync::atomic::AtomicBool::new(false);
    std::thread::scope(|scope| {
        scope.spawn(|| {
            for i in 0..500 {
                let game = if i % 2 == 0 { &moved } else { &fresh };
                storage.update(&key, game).expect("update");
            }
            done.store(true, std::sync::atomic::Ordering::SeqCst);
        });

        let mut reads = 0;
        while !done.load(std::sync::atomic::Ordering::SeqCst) || reads < 100 {
            let game = storage
                .read(&key)
                .expect("whole record")
                .expect("record present");
            assert!(game == fresh || game == moved);
            reads += 1;
        }
    });
}

#[test]
fn test_file_create_leaves_no_staging_files() {
    let (_dir, storage) = file_storage();
    let game = Game::new(Color::Black);
    storage.create(&name("g1"), &game).expect("create");
    let _ = storage.create(&name("g1"), &game);
    storage.update(&name("g1"), &game).expect("update");

    let entries: Vec<_> = std::fs::read_dir(storage.dir())
        .expect("list dir")
        .map(|e| e.expect("entry").file_name())
        .collect();
    assert_eq!(entries, vec![std::ffi::OsString::from("g1.txt")]);
}

#[test]
fn test_sessions_share_file_backend() {
    let (_dir, storage) = file_storage();
    let storage: GameStorage = Arc::new(storage);

    let black = Clash::new(storage.clone())
        .new_game(Some(name("g1")), Color::Black)
        .and_then(|c| c.play("4C".parse().expect("pos")))
        .expect("create and play");
    let white = Clash::new(storage.clone()).join(name("g1")).expect("join");
    assert_eq!(white.game(), black.game());
    assert!(white.new_available());
}

#[cfg(feature = "sqlite")]
mod sqlite {
    use super::*;
    use strictly_clash::SqliteStorage;
    use tempfile::NamedTempFile;

    /// Keeps the database file alive alongside the store.
    fn sqlite_storage() -> (NamedTempFile, SqliteStorage<Game, GameSerializer>) {
        let db_file = NamedTempFile::new().expect("Failed to create temp file");
        let db_path = db_file.path().to_str().expect("Invalid path").to_string();
        let storage = SqliteStorage::open(db_path, GameSerializer).expect("Failed to open");
        (db_file, storage)
    }

    #[test]
    fn test_sqlite_crud() {
        let (_db, storage) = sqlite_storage();
        let game = Game::new(Color::Black);

        storage.create(&name("g1"), &game).expect("create");
        assert_eq!(storage.read(&name("g1")).expect("read"), Some(game.clone()));

        let moved = game.play("4C".parse().expect("pos")).expect("legal");
        storage.update(&name("g1"), &moved).expect("update");
        assert_eq!(storage.read(&name("g1")).expect("read"), Some(moved));

        storage.delete(&name("g1")).expect("delete");
        assert_eq!(storage.read(&name("g1")).expect("read"), None);
    }

    #[test]
    fn test_sqlite_conflicts() {
        let (_db, storage) = sqlite_storage();
        let game = Game::new(Color::White);

        storage.create(&name("g1"), &game).expect("create");
        assert_eq!(
            storage.create(&name("g1"), &game).unwrap_err().kind,
            StorageErrorKind::AlreadyExists
        );
        assert_eq!(
            storage.update(&name("g2"), &game).unwrap_err().kind,
            StorageErrorKind::NotFound
        );
        assert_eq!(
            storage.delete(&name("g2")).unwrap_err().kind,
            StorageErrorKind::NotFound
        );
    }
}
