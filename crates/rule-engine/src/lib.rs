//! 规则评估引擎
//!
//! 为银行产品推荐提供可组合的规则评估能力：
//! - 原子谓词：针对用户金融事实的命名布尔检查
//! - 组合规则树：AND/OR 短路求值，支持嵌套
//! - 静态规则目录与数据定义的动态规则编译到同一棵评估树
//! - 规则触发统计：无锁并发计数

pub mod atomic;
pub mod catalog;
pub mod composite;
pub mod dynamic;
pub mod error;
pub mod facts;
pub mod interpreter;
pub mod operators;
pub mod product;
pub mod query;
pub mod recommender;
pub mod rule;
pub mod statistics;
pub mod store;
pub mod test_utils;

pub use atomic::{ACTIVE_USER_MIN_TRANSACTIONS, AtomicRule, AtomicRules};
pub use catalog::{
    INVEST_500_PRODUCT_ID, ProductRecommendation, ProductRuleSets, SIMPLE_CREDIT_PRODUCT_ID,
    StaticRuleEntry, TOP_SAVING_PRODUCT_ID,
};
pub use composite::CompositeRule;
pub use dynamic::{DynamicRule, RuleQuery};
pub use error::{Result, RuleError};
pub use facts::FactsRepository;
pub use interpreter::RuleInterpreter;
pub use operators::{CompareOp, LogicalOperator, TransactionFlow};
pub use product::ProductType;
pub use query::QueryType;
pub use recommender::{RecommendationService, RuleStat};
pub use rule::{NegatedRule, RecommendationRule};
pub use statistics::RuleStatisticsService;
pub use store::{CompiledRule, RuleStore};
