//! 数据模型定义
//!
//! 定义单词进度状态机共享的数据结构及其序列化格式。
//! 池在持久化层统一编码为 `[{id, term, translation}, ...]` 的有序数组。

use serde::{Deserialize, Serialize};

// ============================================================
// Word - 单词数据
// ============================================================

/// 单词数据
///
/// 创建后不可变；`id` 在词表内唯一，跨会话稳定，作为身份键。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    /// 单词唯一标识
    pub id: i64,
    /// 单词拼写
    pub term: String,
    /// 释义 (学习者母语)
    #[serde(default)]
    pub translation: Option<String>,
}

impl Word {
    /// 创建新单词
    pub fn new(id: i64, term: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            id,
            term: term.into(),
            translation: Some(translation.into()),
        }
    }
}

// ============================================================
// 单元测试
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_serialization_roundtrip() {
        let word = Word::new(1, "apple", "elma");
        let json = serde_json::to_string(&word).expect("Failed to serialize word");
        let parsed: Word = serde_json::from_str(&json).expect("Failed to parse word");
        assert_eq!(parsed, word);
    }

    #[test]
    fn test_word_missing_translation_defaults_to_none() {
        let parsed: Word =
            serde_json::from_str(r#"{"id":7,"term":"car"}"#).expect("Failed to parse word");
        assert_eq!(parsed.id, 7);
        assert_eq!(parsed.term, "car");
        assert!(parsed.translation.is_none());
    }
}
