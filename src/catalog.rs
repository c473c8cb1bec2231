//! 词表模块
//!
//! 内置分级词表 (A1 / A2 / B1 / YDS)，编译期通过 `include_str!` 打包，
//! 启动时同步加载。词表一经加载即不可变，进度池只在其之上派生。

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::Word;

// ============================================================
// 内置词表资源
// ============================================================

const A1_WORDS: &str = include_str!("data/a1.json");
const A2_WORDS: &str = include_str!("data/a2.json");
const B1_WORDS: &str = include_str!("data/b1.json");
const YDS_WORDS: &str = include_str!("data/yds.json");

// ============================================================
// 错误类型定义
// ============================================================

/// 词表错误类型
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("词表解析失败: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("词表为空")]
    Empty,

    #[error("重复的单词 ID: {0}")]
    DuplicateId(i64),

    #[error("单词 {0} 缺少拼写")]
    EmptyTerm(i64),
}

// ============================================================
// WordLevel - 词表级别
// ============================================================

/// 词表级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordLevel {
    A1,
    A2,
    B1,
    Yds,
}

impl WordLevel {
    /// 所有级别 (展示顺序)
    pub fn all() -> [WordLevel; 4] {
        [WordLevel::A1, WordLevel::A2, WordLevel::B1, WordLevel::Yds]
    }

    fn asset(self) -> &'static str {
        match self {
            WordLevel::A1 => A1_WORDS,
            WordLevel::A2 => A2_WORDS,
            WordLevel::B1 => B1_WORDS,
            WordLevel::Yds => YDS_WORDS,
        }
    }
}

// ============================================================
// WordCatalog - 词表
// ============================================================

/// 词表
///
/// 应用启动时加载的完整单词全集，有序且 ID 唯一。
#[derive(Debug, Clone)]
pub struct WordCatalog {
    level: Option<WordLevel>,
    words: Vec<Word>,
}

impl WordCatalog {
    /// 加载内置分级词表
    pub fn bundled(level: WordLevel) -> Result<Self, CatalogError> {
        let words: Vec<Word> = serde_json::from_str(level.asset())?;
        let mut catalog = Self::from_words(words)?;
        catalog.level = Some(level);
        Ok(catalog)
    }

    /// 从调用方提供的单词列表创建词表
    ///
    /// 校验规则与内置词表一致：非空、ID 唯一、拼写非空。
    pub fn from_words(words: Vec<Word>) -> Result<Self, CatalogError> {
        if words.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = std::collections::HashSet::with_capacity(words.len());
        for word in &words {
            if word.term.trim().is_empty() {
                return Err(CatalogError::EmptyTerm(word.id));
            }
            if !seen.insert(word.id) {
                return Err(CatalogError::DuplicateId(word.id));
            }
        }

        Ok(Self { level: None, words })
    }

    /// 词表级别 (内置词表才有)
    pub fn level(&self) -> Option<WordLevel> {
        self.level
    }

    /// 单词列表
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// 取出单词列表
    pub fn into_words(self) -> Vec<Word> {
        self.words
    }

    /// 单词数量
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

// ============================================================
// 单元测试
// ============================================================
