//! 单词进度状态机
//!
//! `WordProgressStore` 是单词分类状态的唯一持有者：三个池
//! (未学 / 已认识 / 待复习) 对词表构成分区，任意时刻一个单词
//! 至多属于一个池。所有变更同步作用于内存，持久化走单一写者任务
//! 异步落盘 (乐观写入)：变更按提交顺序写入键值存储，后提交的快照
//! 不会被先提交的慢写覆盖。写失败仅记录日志，内存状态仍为准。

use std::collections::HashSet;
use std::sync::Arc;

use log::{debug, warn};
use tokio::sync::{mpsc, oneshot};

use crate::models::Word;
use crate::storage::KvStore;

// ============================================================
// 持久化键
// ============================================================

/// 已认识池的存储键
pub const KNOWN_KEY: &str = "known_words";
/// 待复习池的存储键
pub const REVIEW_KEY: &str = "review_words";
/// 未学池的存储键
pub const UNSEEN_KEY: &str = "unseen_words";

// ============================================================
// PersistHandle - 持久化任务句柄
// ============================================================

/// 持久化任务句柄
///
/// 每个变更操作返回一个句柄。直接丢弃即为 fire-and-forget；
/// 需要落盘确认的调用方 (例如应用挂起前) 可以 `wait().await`，
/// 写者任务处理完该次提交后句柄即完成。
#[derive(Debug)]
pub struct PersistHandle(Option<oneshot::Receiver<()>>);

impl PersistHandle {
    fn noop() -> Self {
        Self(None)
    }

    /// 是否有待完成的写入
    pub fn is_pending(&self) -> bool {
        self.0.is_some()
    }

    /// 等待本次提交落盘
    pub async fn wait(self) {
        if let Some(ack) = self.0 {
            let _ = ack.await;
        }
    }
}

// ============================================================
// 持久化写者任务
// ============================================================

/// 写者任务的一次提交
enum PersistCmd {
    /// 写入池快照
    Write(Vec<(&'static str, String)>),
    /// 删除全部存储键 (重置)
    Clear,
}

struct PersistJob {
    cmd: PersistCmd,
    ack: oneshot::Sender<()>,
}

/// 串行消费提交队列，保证落盘顺序与调用顺序一致
async fn run_persist_writer(backend: Arc<dyn KvStore>, mut jobs: mpsc::UnboundedReceiver<PersistJob>) {
    while let Some(job) = jobs.recv().await {
        match job.cmd {
            PersistCmd::Write(payloads) => {
                for (key, json) in payloads {
                    if let Err(e) = backend.set(key, &json).await {
                        warn!("写入存储键 {key} 失败: {e}");
                    }
                }
            }
            PersistCmd::Clear => {
                for key in [KNOWN_KEY, REVIEW_KEY, UNSEEN_KEY] {
                    if let Err(e) = backend.remove(key).await {
                        warn!("删除存储键 {key} 失败: {e}");
                    }
                }
            }
        }
        let _ = job.ack.send(());
    }
}

// ============================================================
// PoolKey - 池标识
// ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PoolKey {
    Known,
    Review,
    Unseen,
}

impl PoolKey {
    fn storage_key(self) -> &'static str {
        match self {
            PoolKey::Known => KNOWN_KEY,
            PoolKey::Review => REVIEW_KEY,
            PoolKey::Unseen => UNSEEN_KEY,
        }
    }
}

// ============================================================
// ProgressStats - 进度统计
// ============================================================

/// 进度统计数据
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProgressStats {
    /// 词表单词总数
    pub total: usize,
    /// 未学单词数
    pub unseen: usize,
    /// 已认识单词数
    pub known: usize,
    /// 待复习单词数
    pub review: usize,
}

// ============================================================
// WordProgressStore - 单词进度状态机
// ============================================================

/// 单词进度状态机
///
/// 由应用根组合点构造并持有，单一写者；展示层通过只读切片
/// 渲染，通过变更方法提交滑动判定。`initialize` 会启动持久化
/// 写者任务，因此必须在 Tokio 运行时内调用；变更方法本身不
/// 依赖运行时，只向写者队列提交快照。
pub struct WordProgressStore {
    writer: mpsc::UnboundedSender<PersistJob>,
    catalog: Vec<Word>,
    unseen: Vec<Word>,
    known: Vec<Word>,
    review: Vec<Word>,
}

impl WordProgressStore {
    /// 加载持久化状态并初始化三个池
    ///
    /// 读取 `known` / `review` 两个键；缺失或损坏的值降级为空池，
    /// 池内按 ID 去重 (保留首次出现)，跨池重复时已认识池优先。
    /// `unseen` 按词表顺序取词表与已分类集合的差。此方法不会失败。
    pub async fn initialize(backend: Arc<dyn KvStore>, catalog: Vec<Word>) -> Self {
        let mut known = load_pool(backend.as_ref(), KNOWN_KEY).await;
        let mut review = load_pool(backend.as_ref(), REVIEW_KEY).await;

        dedup_by_id(&mut known, KNOWN_KEY);
        dedup_by_id(&mut review, REVIEW_KEY);

        let known_ids: HashSet<i64> = known.iter().map(|w| w.id).collect();
        let before = review.len();
        review.retain(|w| !known_ids.contains(&w.id));
        if review.len() < before {
            warn!(
                "检测到 {} 个同时存在于两个池的单词，保留已认识池",
                before - review.len()
            );
        }

        let classified: HashSet<i64> = known
            .iter()
            .chain(review.iter())
            .map(|w| w.id)
            .collect();
        let unseen: Vec<Word> = catalog
            .iter()
            .filter(|w| !classified.contains(&w.id))
            .cloned()
            .collect();

        debug!(
            "进度初始化完成: 词表 {}, 未学 {}, 已认识 {}, 待复习 {}",
            catalog.len(),
            unseen.len(),
            known.len(),
            review.len()
        );

        let (writer, jobs) = mpsc::unbounded_channel();
        tokio::spawn(run_persist_writer(backend, jobs));

        Self {
            writer,
            catalog,
            unseen,
            known,
            review,
        }
    }

    // ========== 只读访问 ==========

    /// 词表全集
    pub fn catalog(&self) -> &[Word] {
        &self.catalog
    }

    /// 未学池 (下一张卡片取队首)
    pub fn unseen(&self) -> &[Word] {
        &self.unseen
    }

    /// 已认识池
    pub fn known(&self) -> &[Word] {
        &self.known
    }

    /// 待复习池
    pub fn review(&self) -> &[Word] {
        &self.review
    }

    /// 进度统计
    pub fn stats(&self) -> ProgressStats {
        ProgressStats {
            total: self.catalog.len(),
            unseen: self.unseen.len(),
            known: self.known.len(),
            review: self.review.len(),
        }
    }

    // ========== 变更操作 ==========

    /// 标记单词为已认识 (右滑)
    ///
    /// 幂等：已在已认识池中则不做任何事。单词同时从未学池和
    /// 待复习池移除，保证分区不变量。
    pub fn classify_known(&mut self, word: &Word) -> PersistHandle {
        if self.known.iter().any(|w| w.id == word.id) {
            return PersistHandle::noop();
        }

        self.unseen.retain(|w| w.id != word.id);
        self.review.retain(|w| w.id != word.id);
        self.known.push(word.clone());

        self.persist(&[PoolKey::Known, PoolKey::Review, PoolKey::Unseen])
    }

    /// 标记单词为待复习 (左滑)
    ///
    /// 已在待复习池中则不重复追加。单词同时从未学池和已认识池
    /// 移除，保证分区不变量。
    pub fn classify_unknown(&mut self, word: &Word) -> PersistHandle {
        if self.review.iter().any(|w| w.id == word.id) {
            return PersistHandle::noop();
        }

        self.unseen.retain(|w| w.id != word.id);
        self.known.retain(|w| w.id != word.id);
        self.review.push(word.clone());

        self.persist(&[PoolKey::Review, PoolKey::Known, PoolKey::Unseen])
    }

    /// 从待复习池移除单词
    ///
    /// 单词直接退出跟踪，不回到未学池或已认识池。
    pub fn remove_from_review(&mut self, word_id: i64) -> PersistHandle {
        let before = self.review.len();
        self.review.retain(|w| w.id != word_id);
        if self.review.len() == before {
            return PersistHandle::noop();
        }

        self.persist(&[PoolKey::Review])
    }

    /// 将待复习单词轮转到队尾 ("还是不会" 路径)
    ///
    /// 当前项移到队列末尾，实现复习池的轮询推进。
    pub fn requeue_review_to_end(&mut self, word_id: i64) -> PersistHandle {
        let Some(pos) = self.review.iter().position(|w| w.id == word_id) else {
            return PersistHandle::noop();
        };

        let word = self.review.remove(pos);
        self.review.push(word);

        self.persist(&[PoolKey::Review])
    }

    /// 重置全部进度
    ///
    /// 清空已认识池和待复习池，未学池恢复为完整词表，并删除
    /// 对应的持久化键。存储失败仅记录日志，内存重置不受影响。
    pub fn reset(&mut self) -> PersistHandle {
        self.known.clear();
        self.review.clear();
        self.unseen = self.catalog.clone();

        self.submit(PersistCmd::Clear)
    }

    // ========== 持久化 ==========

    /// 将受影响的池快照提交给写者任务
    fn persist(&self, pools: &[PoolKey]) -> PersistHandle {
        let mut payloads = Vec::with_capacity(pools.len());
        for &pool in pools {
            let key = pool.storage_key();
            match serde_json::to_string(self.pool_for(pool)) {
                Ok(json) => payloads.push((key, json)),
                Err(e) => warn!("序列化池 {key} 失败: {e}"),
            }
        }

        if payloads.is_empty() {
            return PersistHandle::noop();
        }

        self.submit(PersistCmd::Write(payloads))
    }

    fn submit(&self, cmd: PersistCmd) -> PersistHandle {
        let (ack, done) = oneshot::channel();
        if self.writer.send(PersistJob { cmd, ack }).is_err() {
            // 写者任务已退出；句柄因 ack 被丢弃而立即完成
            warn!("持久化写者任务不可用，本次提交未落盘");
        }
        PersistHandle(Some(done))
    }

    fn pool_for(&self, pool: PoolKey) -> &Vec<Word> {
        match pool {
            PoolKey::Known => &self.known,
            PoolKey::Review => &self.review,
            PoolKey::Unseen => &self.unseen,
        }
    }
}

// ============================================================
// 辅助函数
// ============================================================

/// 读取并解析一个池；缺失或损坏降级为空
async fn load_pool(backend: &dyn KvStore, key: &str) -> Vec<Word> {
    let raw = match backend.get(key).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!("读取存储键 {key} 失败，降级为空池: {e}");
            return Vec::new();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(words) => words,
        Err(e) => {
            warn!("解析存储键 {key} 失败，降级为空池: {e}");
            Vec::new()
        }
    }
}

/// 按 ID 去重，保留首次出现
fn dedup_by_id(pool: &mut Vec<Word>, key: &str) {
    let mut seen = HashSet::with_capacity(pool.len());
    let before = pool.len();
    pool.retain(|w| seen.insert(w.id));
    if pool.len() < before {
        warn!("池 {key} 中发现 {} 个重复 ID，已丢弃", before - pool.len());
    }
}

// ============================================================
// 单元测试
// ============================================================
