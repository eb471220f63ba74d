//! 规则操作符定义

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RuleError;

/// 数值比较操作符
///
/// 阈值类规则只支持"大于"和"大于等于"两种方向。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CompareOp {
    Gt,
    Gte,
}

impl CompareOp {
    pub fn compare(&self, left: Decimal, right: Decimal) -> bool {
        match self {
            Self::Gt => left > right,
            Self::Gte => left >= right,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gt => "GT",
            Self::Gte => "GTE",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CompareOp {
    type Err = RuleError;

    /// 同时接受符号形式（">"、">="）与名称形式（"GT"、"GTE"）
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            ">" | "GT" => Ok(Self::Gt),
            ">=" | "GTE" => Ok(Self::Gte),
            _ => Err(RuleError::UnknownOperator(s.to_string())),
        }
    }
}

/// 交易资金流向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionFlow {
    /// 入账（充值、转入）
    Deposit,
    /// 支出（消费、转出）
    Withdraw,
}

impl TransactionFlow {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deposit => "DEPOSIT",
            Self::Withdraw => "WITHDRAW",
        }
    }
}

impl fmt::Display for TransactionFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TransactionFlow {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DEPOSIT" => Ok(Self::Deposit),
            "WITHDRAW" => Ok(Self::Withdraw),
            _ => Err(RuleError::UnknownFlow(s.to_string())),
        }
    }
}

/// 逻辑操作符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogicalOperator {
    And,
    Or,
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And => write!(f, "AND"),
            Self::Or => write!(f, "OR"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_boundary() {
        let hundred = Decimal::from(100);
        assert!(!CompareOp::Gt.compare(hundred, hundred));
        assert!(CompareOp::Gte.compare(hundred, hundred));
        assert!(CompareOp::Gt.compare(Decimal::from(101), hundred));
    }

    #[test]
    fn test_parse_operator_forms() {
        assert_eq!(">".parse::<CompareOp>().unwrap(), CompareOp::Gt);
        assert_eq!(">=".parse::<CompareOp>().unwrap(), CompareOp::Gte);
        assert_eq!("gt".parse::<CompareOp>().unwrap(), CompareOp::Gt);
        assert_eq!("GTE".parse::<CompareOp>().unwrap(), CompareOp::Gte);
        assert!("<".parse::<CompareOp>().is_err());
    }

    #[test]
    fn test_parse_flow() {
        assert_eq!(
            "deposit".parse::<TransactionFlow>().unwrap(),
            TransactionFlow::Deposit
        );
        assert!("TRANSFER".parse::<TransactionFlow>().is_err());
    }
}
