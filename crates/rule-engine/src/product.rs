//! 银行产品类型定义

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RuleError;

/// 银行产品类型（封闭枚举）
///
/// 既作为事实查询的参数，也作为规则条件的参数。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductType {
    /// 借记类产品（借记卡、账户）
    Debit,
    /// 信贷类产品（贷款、借款）
    Credit,
    /// 储蓄类产品（存款、积蓄）
    Saving,
    /// 投资类产品（投资账户、券商账户）
    Invest,
}

impl ProductType {
    pub const ALL: [ProductType; 4] = [Self::Debit, Self::Credit, Self::Saving, Self::Invest];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debit => "DEBIT",
            Self::Credit => "CREDIT",
            Self::Saving => "SAVING",
            Self::Invest => "INVEST",
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ProductType {
    type Err = RuleError;

    /// 不区分大小写的解析；未知字面量在构造期失败
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == upper)
            .ok_or_else(|| RuleError::UnknownProductType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("DEBIT".parse::<ProductType>().unwrap(), ProductType::Debit);
        assert_eq!("saving".parse::<ProductType>().unwrap(), ProductType::Saving);
        assert_eq!(" Invest ".parse::<ProductType>().unwrap(), ProductType::Invest);
    }

    #[test]
    fn test_parse_unknown_fails() {
        let err = "MORTGAGE".parse::<ProductType>().unwrap_err();
        assert!(matches!(err, RuleError::UnknownProductType(_)));
    }

    #[test]
    fn test_serde_screaming_snake_case() {
        let json = serde_json::to_string(&ProductType::Credit).unwrap();
        assert_eq!(json, "\"CREDIT\"");
        let parsed: ProductType = serde_json::from_str("\"INVEST\"").unwrap();
        assert_eq!(parsed, ProductType::Invest);
    }
}
