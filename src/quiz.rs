//! 复习测验模块
//!
//! 为复习池生成多选题：一个目标单词加若干干扰项，选项乱序。
//! 随机源通过 `rand::Rng` 注入，测试用 `ChaCha8Rng` 固定种子。

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::Word;

/// 默认干扰项数量 (3 干扰 + 1 正确 = 4 个选项)
pub const DEFAULT_DISTRACTORS: usize = 3;

// ============================================================
// QuizRound - 一道测验题
// ============================================================

/// 一道测验题
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizRound {
    /// 被提问的单词
    pub prompt: Word,
    /// 乱序后的选项 (UI 展示各选项的 translation)
    pub options: Vec<Word>,
    /// 正确选项在 `options` 中的下标
    pub correct_index: usize,
}

// ============================================================
// 选项生成
// ============================================================

/// 为 `correct_id` 对应的单词生成选项集
///
/// 从池中不放回地随机抽取至多 `distractors` 个其它单词作为干扰项，
/// 与正确项一起乱序。池中找不到 `correct_id` 时返回 `None`；
/// 干扰项不足时有多少用多少。
pub fn quiz_options<R: Rng + ?Sized>(
    pool: &[Word],
    correct_id: i64,
    distractors: usize,
    rng: &mut R,
) -> Option<QuizRound> {
    let prompt = pool.iter().find(|w| w.id == correct_id)?.clone();

    let mut others: Vec<Word> = pool
        .iter()
        .filter(|w| w.id != correct_id)
        .cloned()
        .collect();
    others.shuffle(rng);
    others.truncate(distractors);

    let mut options = others;
    options.push(prompt.clone());
    options.shuffle(rng);

    let correct_index = options.iter().position(|w| w.id == correct_id)?;

    Some(QuizRound {
        prompt,
        options,
        correct_index,
    })
}

// ============================================================
// QuizSession - 测验会话
// ============================================================

/// 测验会话
///
/// 持有随机源和本次会话的得分，逐题从复习池抽取题目。
pub struct QuizSession<R: Rng> {
    rng: R,
    distractors: usize,
    score: u32,
}

impl QuizSession<rand::rngs::ThreadRng> {
    /// 使用系统随机源创建会话
    pub fn new() -> Self {
        Self::with_rng(rand::thread_rng())
    }
}

impl Default for QuizSession<rand::rngs::ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> QuizSession<R> {
    /// 使用指定随机源创建会话
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            distractors: DEFAULT_DISTRACTORS,
            score: 0,
        }
    }

    /// 设置干扰项数量
    pub fn with_distractors(mut self, distractors: usize) -> Self {
        self.distractors = distractors;
        self
    }

    /// 从池中随机抽一个单词出题
    ///
    /// 池为空时返回 `None` (复习完毕)。
    pub fn next_round(&mut self, pool: &[Word]) -> Option<QuizRound> {
        if pool.is_empty() {
            return None;
        }
        let target = &pool[self.rng.gen_range(0..pool.len())];
        quiz_options(pool, target.id, self.distractors, &mut self.rng)
    }

    /// 提交答案，答对加分
    pub fn answer(&mut self, round: &QuizRound, choice: usize) -> bool {
        let correct = choice == round.correct_index;
        if correct {
            self.score += 1;
        }
        correct
    }

    /// 当前得分
    pub fn score(&self) -> u32 {
        self.score
    }
}

// ============================================================
// 单元测试
// ============================================================
