//! 内存键值存储后端
//!
//! 用于测试。支持注入读写故障，验证状态机的容错降级路径。

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::storage::{KvStore, StorageError, StorageResult};

// ============================================================
// MemoryKvStore - 内存后端
// ============================================================

/// 内存键值存储 (测试用)
#[derive(Default)]
pub struct MemoryKvStore {
    entries: Mutex<HashMap<String, String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryKvStore {
    /// 创建空存储
    pub fn new() -> Self {
        Self::default()
    }

    /// 从已有键值创建
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: Mutex::new(map),
            ..Self::default()
        }
    }

    /// 注入读故障
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// 注入写故障
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// 同步读取 (测试断言用)
    pub fn snapshot(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .expect("kv store lock poisoned")
            .get(key)
            .cloned()
    }

    /// 当前键数量
    pub fn len(&self) -> usize {
        self.entries.lock().expect("kv store lock poisoned").len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl KvStore for MemoryKvStore {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::Backend("injected read failure".to_string()));
        }
        Ok(self.snapshot(key))
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Backend("injected write failure".to_string()));
        }
        self.entries
            .lock()
            .expect("kv store lock poisoned")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Backend("injected write failure".to_string()));
        }
        self.entries
            .lock()
            .expect("kv store lock poisoned")
            .remove(key);
        Ok(())
    }
}

// ============================================================
// 单元测试
// ============================================================
