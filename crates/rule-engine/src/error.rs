//! 规则引擎错误类型

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("组合规则 '{0}' 的子规则列表为空")]
    EmptyComposite(String),

    #[error("动态规则 '{0}' 不包含任何条件")]
    EmptyRule(String),

    #[error("未知的产品类型: {0}")]
    UnknownProductType(String),

    #[error("未知的查询类型: {0}")]
    UnknownQueryType(String),

    #[error("未知的比较操作符: {0}")]
    UnknownOperator(String),

    #[error("未知的资金流向: {0}")]
    UnknownFlow(String),

    #[error("无法解析金额: '{0}'")]
    InvalidAmount(String),

    #[error("查询 {query} 需要 {expected} 个参数，实际 {actual} 个")]
    ArgumentCount {
        query: String,
        expected: usize,
        actual: usize,
    },

    #[error("规则条件 #{index} 编译失败: {reason}")]
    QueryCompile { index: usize, reason: String },

    #[error("规则校验失败: {0}")]
    InvalidRule(String),

    #[error("用户不存在: {0}")]
    UserNotFound(Uuid),

    #[error("规则未找到: {0}")]
    RuleNotFound(Uuid),

    #[error("事实查询失败: {0}")]
    FactsLookup(String),
}

pub type Result<T> = std::result::Result<T, RuleError>;
