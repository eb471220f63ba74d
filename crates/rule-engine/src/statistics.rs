//! 规则触发统计
//!
//! 每条规则一个无锁原子计数器，多个推荐流程可以并发累加而不会丢失
//! 更新，也不会因为共享一把粗粒度锁而互相阻塞。

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use uuid::Uuid;

/// 规则触发统计服务
///
/// 计数器在首次触发时惰性创建；clear 之后开始的累加不会被静默丢弃。
#[derive(Default)]
pub struct RuleStatisticsService {
    counters: DashMap<Uuid, AtomicU64>,
}

impl RuleStatisticsService {
    pub fn new() -> Self {
        Self::default()
    }

    /// 规则触发一次，对应计数器加一
    pub fn increment(&self, rule_id: Uuid) {
        self.counters
            .entry(rule_id)
            .or_default()
            .fetch_add(1, Ordering::Relaxed);
    }

    /// 查询规则的触发次数，没有记录时返回 0
    pub fn count_for(&self, rule_id: Uuid) -> u64 {
        self.counters
            .get(&rule_id)
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// 全部计数的快照
    pub fn snapshot(&self) -> HashMap<Uuid, u64> {
        self.counters
            .iter()
            .map(|e| (*e.key(), e.value().load(Ordering::Relaxed)))
            .collect()
    }

    /// 清空全部统计
    pub fn clear(&self) {
        self.counters.clear();
    }
}
