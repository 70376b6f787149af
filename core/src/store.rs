use std::collections::HashMap;
use std::path::PathBuf;

use strive_common::FieldId;

/// Durable per-field persistence port: one plain-text value per field id,
/// last write wins. Reads happen once when a field mounts; writes happen on
/// every edit, from a single thread.
pub trait FieldStore: Send {
    fn read(&self, id: FieldId) -> Option<String>;
    fn write(&mut self, id: FieldId, value: &str) -> std::io::Result<()>;
}

/// Stores each field as a plain file named after its id, by default under
/// `~/.strive/fields`. No serialization, no expiry.
#[derive(Clone, Debug)]
pub struct FsFieldStore {
    dir: PathBuf,
}

impl FsFieldStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn default_dir() -> PathBuf {
        let mut path = home_dir();
        path.push(".strive");
        path.push("fields");
        path
    }

    fn path_for(&self, id: FieldId) -> PathBuf {
        self.dir.join(id.as_str())
    }
}

impl FieldStore for FsFieldStore {
    fn read(&self, id: FieldId) -> Option<String> {
        std::fs::read_to_string(self.path_for(id)).ok()
    }

    fn write(&mut self, id: FieldId, value: &str) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(id), value)
    }
}

/// In-memory store for tests and runs that should not touch the disk.
#[derive(Clone, Debug, Default)]
pub struct MemoryFieldStore {
    values: HashMap<FieldId, String>,
}

impl FieldStore for MemoryFieldStore {
    fn read(&self, id: FieldId) -> Option<String> {
        self.values.get(&id).cloned()
    }

    fn write(&mut self, id: FieldId, value: &str) -> std::io::Result<()> {
        self.values.insert(id, value.to_string());
        Ok(())
    }
}

fn home_dir() -> PathBuf {
    if let Ok(h) = std::env::var("HOME") {
        return PathBuf::from(h);
    }
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fs_round_trip_survives_a_fresh_mount() {
        let dir = tempfile::tempdir().expect("tempdir");
        for id in FieldId::ALL {
            let mut store = FsFieldStore::new(dir.path().to_path_buf());
            store.write(id, "draft text").expect("write");
            // A brand-new store over the same dir sees the value.
            let fresh = FsFieldStore::new(dir.path().to_path_buf());
            assert_eq!(fresh.read(id), Some("draft text".to_string()));
        }
    }

    #[test]
    fn fs_missing_value_reads_as_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FsFieldStore::new(dir.path().to_path_buf());
        assert_eq!(store.read(FieldId::Name), None);
    }

    #[test]
    fn last_write_wins() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = FsFieldStore::new(dir.path().to_path_buf());
        store.write(FieldId::Struggle, "first").expect("write");
        store.write(FieldId::Struggle, "second").expect("write");
        assert_eq!(store.read(FieldId::Struggle), Some("second".to_string()));
    }

    #[test]
    fn memory_round_trip() {
        let mut store = MemoryFieldStore::default();
        assert_eq!(store.read(FieldId::Role), None);
        store.write(FieldId::Role, "nurse").expect("write");
        assert_eq!(store.read(FieldId::Role), Some("nurse".to_string()));
    }

    #[test]
    fn fields_do_not_bleed_into_each_other() {
        let mut store = MemoryFieldStore::default();
        store.write(FieldId::Name, "Ada").expect("write");
        assert_eq!(store.read(FieldId::Role), None);
        assert_eq!(store.read(FieldId::Struggle), None);
    }
}
