//! 动态规则解释器
//!
//! 把存储为数据的规则记录编译成与静态目录相同的组合规则树。对封闭的
//! [`QueryType`] 枚举做穷尽分派，参数个数、产品类型、操作符、金额的
//! 任何问题都在编译期报告，带上出错条件的位置，绝不延迟到求值期。

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::atomic::{AtomicRule, AtomicRules};
use crate::composite::CompositeRule;
use crate::dynamic::{DynamicRule, RuleQuery};
use crate::error::{Result, RuleError};
use crate::facts::FactsRepository;
use crate::query::QueryType;
use crate::rule::{NegatedRule, RecommendationRule};

/// 动态规则解释器
pub struct RuleInterpreter {
    atomic: AtomicRules,
}

impl RuleInterpreter {
    pub fn new(facts: Arc<dyn FactsRepository>) -> Self {
        Self {
            atomic: AtomicRules::new(facts),
        }
    }

    /// 编译动态规则为组合规则树
    ///
    /// 各条件解释为原子规则，取反条件包一层 [`NegatedRule`]，
    /// 整体按 AND 折叠，组合规则以产品名称命名。
    pub fn compile(&self, rule: &DynamicRule) -> Result<CompositeRule> {
        rule.validate()?;

        let mut children: Vec<Arc<dyn RecommendationRule>> = Vec::with_capacity(rule.queries.len());
        for (index, query) in rule.queries.iter().enumerate() {
            let atom = self.interpret(query).map_err(|e| RuleError::QueryCompile {
                index,
                reason: e.to_string(),
            })?;
            if query.negate {
                children.push(Arc::new(NegatedRule::new(Arc::new(atom))));
            } else {
                children.push(Arc::new(atom));
            }
        }

        CompositeRule::and(rule.product_name.clone(), children)
    }

    /// 把单个查询条件解释为原子规则
    ///
    /// 对 [`QueryType`] 的穷尽匹配：新增查询类型时编译器会强制补全这里。
    pub fn interpret(&self, query: &RuleQuery) -> Result<AtomicRule> {
        match query.query {
            QueryType::UserOf => {
                let [product_type] = expect_args::<1>(query)?;
                Ok(self.atomic.has_product_type(product_type.parse()?))
            }
            QueryType::ActiveUserOf => {
                let [product_type] = expect_args::<1>(query)?;
                Ok(self.atomic.active_user_of(product_type.parse()?))
            }
            QueryType::TransactionSumCompare => {
                let [product_type, flow, op, amount] = expect_args::<4>(query)?;
                Ok(self.atomic.transaction_sum_compare(
                    product_type.parse()?,
                    flow.parse()?,
                    op.parse()?,
                    parse_amount(amount)?,
                ))
            }
            QueryType::TransactionSumCompareDepositWithdraw => {
                let [product_type, op] = expect_args::<2>(query)?;
                Ok(self
                    .atomic
                    .deposit_vs_spend(product_type.parse()?, op.parse()?))
            }
        }
    }
}

/// 校验参数个数并按位置取出
fn expect_args<const N: usize>(query: &RuleQuery) -> Result<[&str; N]> {
    if query.arguments.len() != N {
        return Err(RuleError::ArgumentCount {
            query: query.query.code().to_string(),
            expected: N,
            actual: query.arguments.len(),
        });
    }
    Ok(std::array::from_fn(|i| query.arguments[i].as_str()))
}

fn parse_amount(raw: &str) -> Result<Decimal> {
    raw.trim()
        .parse::<Decimal>()
        .map_err(|_| RuleError::InvalidAmount(raw.to_string()))
}
