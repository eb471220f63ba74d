//! 应用状态

use std::sync::Arc;

use rule_engine::{RecommendationService, RuleStore};
use star_shared::database::Database;

use crate::repository::DynamicRuleRepository;

/// 各处理器共享的应用状态
#[derive(Clone)]
pub struct AppState {
    /// 推荐编排服务
    pub service: Arc<RecommendationService>,
    /// 已编译动态规则的内存存储
    pub store: RuleStore,
    /// 动态规则持久化仓储
    pub rule_repo: DynamicRuleRepository,
    /// 数据库连接（健康检查用）
    pub db: Database,
}
