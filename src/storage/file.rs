//! 文件键值存储后端
//!
//! 每个键对应目录下的一个 `<key>.json` 文件。写入先落临时文件再
//! 重命名，保证单键写入的原子性。

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::storage::{KvStore, StorageResult};

// ============================================================
// FileKvStore - 文件后端
// ============================================================

/// 文件键值存储
pub struct FileKvStore {
    dir: PathBuf,
}

impl FileKvStore {
    /// 打开 (必要时创建) 存储目录
    pub async fn open<P: AsRef<Path>>(dir: P) -> StorageResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    /// 存储目录路径
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[async_trait]
impl KvStore for FileKvStore {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.path_for(key);
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        fs::write(&tmp, value).await?;
        fs::rename(&tmp, &path).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        match fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// ============================================================
// 单元测试
// ============================================================
