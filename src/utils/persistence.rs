//! Generic JSON persistence helpers for the small files kept next to the game.
//!
//! Used by the high score store and the config loader.

use std::fs;
use std::io;
use std::path::Path;

/// Load a JSON file, returning `T::default()` if missing or invalid.
pub fn load_json_or_default<T: Default + serde::de::DeserializeOwned>(path: &Path) -> T {
    match load_json(path) {
        Ok(value) => value,
        Err(e) => {
            log::debug!("Using defaults for {}: {}", path.display(), e);
            T::default()
        }
    }
}

/// Load a JSON file, surfacing both I/O and parse failures as `io::Error`.
pub fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> io::Result<T> {
    let json = fs::read_to_string(path)?;
    serde_json::from_str(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Save a value as pretty-printed JSON, creating parent directories as needed.
pub fn save_json<T: serde::Serialize>(path: &Path, data: &T) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("turmac_persistence_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_load_missing_returns_default() {
        let val: Vec<String> = load_json_or_default(&temp_file("nonexistent_12345.json"));
        assert!(val.is_empty());
    }

    #[test]
    fn test_load_invalid_returns_default() {
        let path = temp_file("invalid.json");
        fs::write(&path, "{ not json").unwrap();

        let val: Vec<String> = load_json_or_default(&path);
        assert!(val.is_empty());

        let err = load_json::<Vec<String>>(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_file("roundtrip.json");
        let data = vec!["hello".to_string(), "world".to_string()];
        save_json(&path, &data).expect("save should succeed");

        let loaded: Vec<String> = load_json_or_default(&path);
        assert_eq!(loaded, data);

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = temp_file("nested_dir");
        let path = dir.join("inner").join("data.json");
        save_json(&path, &vec![1u32, 2, 3]).expect("save should succeed");

        let loaded: Vec<u32> = load_json_or_default(&path);
        assert_eq!(loaded, vec![1, 2, 3]);

        fs::remove_dir_all(dir).ok();
    }
}
