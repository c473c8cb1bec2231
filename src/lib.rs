//! # kelime-core - 词汇学习核心库
//!
//! 本 crate 提供 "Kelime Ezberleme" 应用的核心状态机:
//!
//! - **WordProgressStore** - 单词进度状态机 (未学 / 已认识 / 待复习 三个池)
//! - **WordCatalog** - 内置分级词表 (A1 / A2 / B1 / YDS)
//! - **KvStore** - 异步持久化键值存储抽象 (文件实现 + 内存实现)
//! - **Quiz** - 复习测验选项生成 (可注入随机源)
//!
//! ## 设计理念
//!
//! - **单一写者** - 状态机由应用根组合点持有，所有变更走 `&mut self`
//! - **乐观写入** - 内存状态同步更新，持久化由单一写者任务按提交顺序落盘
//! - **容错降级** - 读取失败回退为空池，写入失败仅记录日志，UI 永不报错
//!
//! ## 使用示例
//!
//! ```no_run
//! use std::sync::Arc;
//! use kelime_core::{FileKvStore, WordCatalog, WordLevel, WordProgressStore};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = Arc::new(FileKvStore::open("./data").await?);
//! let catalog = WordCatalog::bundled(WordLevel::A1)?;
//! let mut store = WordProgressStore::initialize(backend, catalog.into_words()).await;
//!
//! if let Some(word) = store.unseen().first().cloned() {
//!     store.classify_known(&word);
//! }
//! # Ok(())
//! # }
//! ```

// ============================================================
// 模块声明
// ============================================================

pub mod catalog;
pub mod models;
pub mod progress;
pub mod quiz;
pub mod storage;

// ============================================================
// 重新导出主要类型
// ============================================================

pub use catalog::{CatalogError, WordCatalog, WordLevel};
pub use models::Word;
pub use progress::{PersistHandle, ProgressStats, WordProgressStore};
pub use quiz::{quiz_options, QuizRound, QuizSession};
pub use storage::{FileKvStore, KvStore, MemoryKvStore, StorageError, StorageResult};
