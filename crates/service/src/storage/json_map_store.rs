use std::{collections::BTreeMap, path::PathBuf, sync::Arc};
use tokio::{fs, sync::RwLock};

use crate::errors::ServiceError;

/// Generic JSON file-backed key-value map.
///
/// The whole map lives in memory and is rewritten on every insert through a
/// temporary file and a rename, so a crash mid-write leaves the previous
/// file intact. An unreadable file is reported instead of being replaced.
pub struct JsonMapStore<K, V> {
    inner: RwLock<BTreeMap<K, V>>,
    file_path: PathBuf,
}

impl<K, V> JsonMapStore<K, V>
where
    K: Ord + serde::Serialize + serde::de::DeserializeOwned + Clone,
    V: serde::Serialize + serde::de::DeserializeOwned + Clone,
{
    /// Open the store at `path`, creating an empty file (and parent directories) if missing.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let map: BTreeMap<K, V> = match fs::read(&file_path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => BTreeMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                ServiceError::Serialization(format!("{} is not a valid store file: {e}", file_path.display()))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let empty = BTreeMap::new();
                write_atomic(&file_path, &serde_json::to_vec_pretty(&empty)?).await?;
                empty
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Arc::new(Self { inner: RwLock::new(map), file_path }))
    }

    pub fn path(&self) -> &std::path::Path {
        &self.file_path
    }

    /// All entries, ordered by key.
    pub async fn list(&self) -> Vec<(K, V)> {
        let map = self.inner.read().await;
        map.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }

    pub async fn get(&self, key: &K) -> Option<V> {
        let map = self.inner.read().await;
        map.get(key).cloned()
    }

    /// Insert or replace a value and persist. The in-memory map is only
    /// updated once the file write has succeeded.
    pub async fn insert(&self, key: K, value: V) -> Result<(), ServiceError> {
        let mut map = self.inner.write().await;
        let previous = map.insert(key.clone(), value);
        let data = serde_json::to_vec_pretty(&*map)?;
        if let Err(e) = write_atomic(&self.file_path, &data).await {
            match previous {
                Some(old) => map.insert(key, old),
                None => map.remove(&key),
            };
            return Err(e);
        }
        Ok(())
    }
}

async fn write_atomic(path: &std::path::Path, data: &[u8]) -> Result<(), ServiceError> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    fs::write(&tmp, data).await?;
    fs::rename(&tmp, path).await?;
    Ok(())
}
