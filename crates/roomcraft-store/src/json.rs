use serde::{Serialize, de::DeserializeOwned};

use crate::{KeyValueStore, StoreError};

/// Typed JSON access to any [`KeyValueStore`].
pub trait JsonStoreExt: KeyValueStore {
    /// Deserializes the value under `key`, or `None` if the key is absent.
    fn load_json<T>(&self, key: &str) -> Result<Option<T>, StoreError>
    where
        T: DeserializeOwned,
    {
        let Some(raw) = self.get(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StoreError::Json {
                key: key.to_owned(),
                source,
            })
    }

    fn save_json<T>(&mut self, key: &str, value: &T) -> Result<(), StoreError>
    where
        T: Serialize + ?Sized,
    {
        let raw = serde_json::to_string_pretty(value).map_err(|source| StoreError::Json {
            key: key.to_owned(),
            source,
        })?;
        self.put(key, raw)
    }
}

impl<S> JsonStoreExt for S where S: KeyValueStore + ?Sized {}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;
    use crate::MemoryStore;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Pointer {
        level_id: u32,
    }

    #[test]
    fn test_typed_round_trip_and_missing_key() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load_json::<Pointer>("current_game").unwrap(), None);
        store
            .save_json("current_game", &Pointer { level_id: 2 })
            .unwrap();
        assert_eq!(
            store.load_json::<Pointer>("current_game").unwrap(),
            Some(Pointer { level_id: 2 })
        );
    }

    #[test]
    fn test_malformed_value_reports_key() {
        let mut store = MemoryStore::new();
        store.put("current_game", "{not json".to_owned()).unwrap();
        let err = store.load_json::<Pointer>("current_game").unwrap_err();
        assert!(matches!(err, StoreError::Json { ref key, .. } if key == "current_game"));
    }
}
