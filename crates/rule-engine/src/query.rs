//! 动态规则查询类型

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RuleError;

/// 动态规则支持的查询类型（封闭枚举）
///
/// 每种查询的参数按位置解释，见 [`crate::interpreter::RuleInterpreter`]。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QueryType {
    /// 用户持有指定类型的产品，参数：[产品类型]
    UserOf,
    /// 用户是指定类型产品的活跃用户（交易笔数 >= 5），参数：[产品类型]
    ActiveUserOf,
    /// 指定流向的交易总额与给定数值比较，参数：[产品类型, 流向, 操作符, 金额]
    TransactionSumCompare,
    /// 入账总额与支出总额比较，参数：[产品类型, 操作符]
    TransactionSumCompareDepositWithdraw,
}

impl QueryType {
    pub const ALL: [QueryType; 4] = [
        Self::UserOf,
        Self::ActiveUserOf,
        Self::TransactionSumCompare,
        Self::TransactionSumCompareDepositWithdraw,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Self::UserOf => "USER_OF",
            Self::ActiveUserOf => "ACTIVE_USER_OF",
            Self::TransactionSumCompare => "TRANSACTION_SUM_COMPARE",
            Self::TransactionSumCompareDepositWithdraw => {
                "TRANSACTION_SUM_COMPARE_DEPOSIT_WITHDRAW"
            }
        }
    }

    /// 查询类型的业务说明
    pub fn description(&self) -> &'static str {
        match self {
            Self::UserOf => "检查用户是否为指定类型产品的客户",
            Self::ActiveUserOf => "检查用户是否为指定类型产品的活跃客户（交易笔数不低于 5）",
            Self::TransactionSumCompare => "将指定流向的交易总额与给定数值比较",
            Self::TransactionSumCompareDepositWithdraw => "将入账总额与支出总额比较",
        }
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for QueryType {
    type Err = RuleError;

    /// 不区分大小写的解析；未知类型在构造期失败
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|q| q.code() == upper)
            .ok_or_else(|| RuleError::UnknownQueryType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_codes() {
        assert_eq!("USER_OF".parse::<QueryType>().unwrap(), QueryType::UserOf);
        assert_eq!(
            "active_user_of".parse::<QueryType>().unwrap(),
            QueryType::ActiveUserOf
        );
        assert!("SUM_OF".parse::<QueryType>().is_err());
    }

    #[test]
    fn test_serde_matches_code() {
        for query in QueryType::ALL {
            let json = serde_json::to_string(&query).unwrap();
            assert_eq!(json, format!("\"{}\"", query.code()));
        }
    }
}
