//! 持久化存储模块
//!
//! 提供异步键值存储抽象，支持：
//! - 单词池的本地持久化 (每个池一个键)
//! - 文件后端 (生产环境) 与内存后端 (测试)
//! - 单键原子写入，无跨键事务

// ============================================================
// 子模块声明
// ============================================================

pub mod file;
pub mod memory;

// ============================================================
// 重新导出主要类型
// ============================================================

pub use file::FileKvStore;
pub use memory::MemoryKvStore;

// ============================================================
// 依赖导入
// ============================================================

use async_trait::async_trait;
use thiserror::Error;

// ============================================================
// 错误类型定义
// ============================================================

/// 存储模块错误类型
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("序列化错误: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("存储后端错误: {0}")]
    Backend(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

// ============================================================
// KvStore - 键值存储抽象
// ============================================================

/// 异步键值存储
///
/// 单词进度状态机消费的持久化契约。每个操作单独原子，
/// 键不存在时 `get` 返回 `None`、`remove` 静默成功。
#[async_trait]
pub trait KvStore: Send + Sync {
    /// 读取键对应的文本值
    async fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// 写入键值 (覆盖旧值)
    async fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// 删除键
    async fn remove(&self, key: &str) -> StorageResult<()>;
}
