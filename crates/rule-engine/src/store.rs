//! 动态规则存储
//!
//! 已编译规则的线程安全缓存：按规则 ID + 条件指纹判断是否需要重新
//! 编译，同时维护规则的存储顺序（推荐结果的顺序对调用方可见）。

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::RwLock;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::composite::CompositeRule;
use crate::dynamic::DynamicRule;
use crate::error::{Result, RuleError};
use crate::interpreter::RuleInterpreter;

/// 编译后的动态规则
pub struct CompiledRule {
    /// 原始规则记录
    pub rule: DynamicRule,
    /// 编译时的条件指纹
    pub fingerprint: u64,
    /// 编译产物：与静态目录同构的组合规则树
    pub predicate: Arc<CompositeRule>,
}

/// 动态规则存储
#[derive(Clone)]
pub struct RuleStore {
    rules: Arc<DashMap<Uuid, Arc<CompiledRule>>>,
    order: Arc<RwLock<Vec<Uuid>>>,
    interpreter: Arc<RuleInterpreter>,
}

impl RuleStore {
    pub fn new(interpreter: RuleInterpreter) -> Self {
        Self {
            rules: Arc::new(DashMap::new()),
            order: Arc::new(RwLock::new(Vec::new())),
            interpreter: Arc::new(interpreter),
        }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// 加载（或更新）规则并编译
    ///
    /// 条件指纹未变化时复用已编译的谓词；条件被修改过则重新编译，
    /// 旧的编译产物随之作废。
    #[instrument(skip(self, rule), fields(rule_id = %rule.id, product = %rule.product_name))]
    pub fn load(&self, rule: DynamicRule) -> Result<()> {
        let fingerprint = rule.content_fingerprint();
        let predicate = match self.rules.get(&rule.id) {
            Some(existing) if existing.fingerprint == fingerprint => {
                Arc::clone(&existing.predicate)
            }
            _ => Arc::new(self.interpreter.compile(&rule)?),
        };

        let rule_id = rule.id;
        let replaced = self
            .rules
            .insert(
                rule_id,
                Arc::new(CompiledRule {
                    rule,
                    fingerprint,
                    predicate,
                }),
            )
            .is_some();
        if !replaced {
            self.order.write().push(rule_id);
        }

        info!("动态规则已加载");
        Ok(())
    }

    /// 干运行编译，用于在持久化之前校验规则
    pub fn validate(&self, rule: &DynamicRule) -> Result<()> {
        self.interpreter.compile(rule).map(|_| ())
    }

    /// 删除规则
    #[instrument(skip(self))]
    pub fn delete(&self, rule_id: Uuid) -> Result<()> {
        if self.rules.remove(&rule_id).is_some() {
            self.order.write().retain(|id| *id != rule_id);
            info!("动态规则已删除");
            Ok(())
        } else {
            warn!("删除不存在的规则");
            Err(RuleError::RuleNotFound(rule_id))
        }
    }

    /// 获取单条已编译规则
    pub fn get(&self, rule_id: Uuid) -> Option<Arc<CompiledRule>> {
        self.rules.get(&rule_id).map(|e| Arc::clone(e.value()))
    }

    pub fn contains(&self, rule_id: Uuid) -> bool {
        self.rules.contains_key(&rule_id)
    }

    /// 按存储顺序返回全部已编译规则
    pub fn list_compiled(&self) -> Vec<Arc<CompiledRule>> {
        let order = self.order.read();
        order
            .iter()
            .filter_map(|id| self.rules.get(id).map(|e| Arc::clone(e.value())))
            .collect()
    }

    /// 批量加载（启动时从数据库恢复），单条编译失败不影响其余规则
    #[instrument(skip(self, rules))]
    pub fn load_batch(&self, rules: Vec<DynamicRule>) -> usize {
        let mut loaded = 0;
        for rule in rules {
            let rule_id = rule.id;
            match self.load(rule) {
                Ok(()) => loaded += 1,
                Err(e) => warn!(%rule_id, error = %e, "规则编译失败，已跳过"),
            }
        }
        info!(loaded, "批量加载完成");
        loaded
    }

    /// 清空全部规则与编译缓存
    #[instrument(skip(self))]
    pub fn clear(&self) {
        let count = self.rules.len();
        self.rules.clear();
        self.order.write().clear();
        info!(count, "已清空全部动态规则");
    }
}
