//! 原子规则（基础检查）
//!
//! 将事实提供者包装为命名的、可复用的布尔判断，按产品类型与数值阈值
//! 参数化。原子规则无状态，可在用户与任务之间并发复用。

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::warn;
use uuid::Uuid;

use crate::error::Result;
use crate::facts::FactsRepository;
use crate::operators::{CompareOp, TransactionFlow};
use crate::product::ProductType;
use crate::rule::RecommendationRule;

/// 活跃用户判定的最低交易笔数
pub const ACTIVE_USER_MIN_TRANSACTIONS: i64 = 5;

/// 原子检查类型（封闭枚举）
#[derive(Debug, Clone)]
enum Check {
    HasProduct(ProductType),
    NoProduct(ProductType),
    ActiveUser(ProductType),
    SumCompare {
        product_type: ProductType,
        flow: TransactionFlow,
        op: CompareOp,
        threshold: Decimal,
    },
    DepositVsSpend {
        product_type: ProductType,
        op: CompareOp,
    },
}

/// 原子规则：针对用户金融事实的单一不可分解检查
pub struct AtomicRule {
    name: String,
    facts: Arc<dyn FactsRepository>,
    check: Check,
}

impl std::fmt::Debug for AtomicRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AtomicRule")
            .field("name", &self.name)
            .field("check", &self.check)
            .finish_non_exhaustive()
    }
}

impl AtomicRule {
    async fn evaluate(&self, user_id: Uuid) -> Result<bool> {
        match &self.check {
            Check::HasProduct(product_type) => {
                self.facts.has_product_type(user_id, *product_type).await
            }
            Check::NoProduct(product_type) => {
                Ok(!self.facts.has_product_type(user_id, *product_type).await?)
            }
            Check::ActiveUser(product_type) => {
                if !self.facts.has_product_type(user_id, *product_type).await? {
                    return Ok(false);
                }
                let count = self.facts.transaction_count(user_id, *product_type).await?;
                Ok(count >= ACTIVE_USER_MIN_TRANSACTIONS)
            }
            Check::SumCompare {
                product_type,
                flow,
                op,
                threshold,
            } => {
                let sum = match flow {
                    TransactionFlow::Deposit => {
                        self.facts.total_deposit(user_id, *product_type).await?
                    }
                    TransactionFlow::Withdraw => {
                        self.facts.total_spend(user_id, *product_type).await?
                    }
                };
                Ok(op.compare(sum, *threshold))
            }
            Check::DepositVsSpend { product_type, op } => {
                let deposit = self.facts.total_deposit(user_id, *product_type).await?;
                let spend = self.facts.total_spend(user_id, *product_type).await?;
                Ok(op.compare(deposit, spend))
            }
        }
    }
}

#[async_trait]
impl RecommendationRule for AtomicRule {
    async fn is_eligible(&self, user_id: Uuid) -> bool {
        match self.evaluate(user_id).await {
            Ok(eligible) => eligible,
            Err(e) => {
                // 事实查询瞬时失败时降级为 false，整个推荐流程不因单次查询失败而中断
                warn!(rule = %self.name, %user_id, error = %e, "事实查询失败，规则降级为不满足");
                false
            }
        }
    }

    fn rule_name(&self) -> &str {
        &self.name
    }
}

/// 原子规则工厂
///
/// 每个工厂方法返回一个闭合了参数的 [`AtomicRule`]。
#[derive(Clone)]
pub struct AtomicRules {
    facts: Arc<dyn FactsRepository>,
}

impl AtomicRules {
    pub fn new(facts: Arc<dyn FactsRepository>) -> Self {
        Self { facts }
    }

    fn rule(&self, name: String, check: Check) -> AtomicRule {
        AtomicRule {
            name,
            facts: Arc::clone(&self.facts),
            check,
        }
    }

    /// 用户持有指定类型的产品
    pub fn has_product_type(&self, product_type: ProductType) -> AtomicRule {
        self.rule(
            format!("HAS_PRODUCT_{}", product_type),
            Check::HasProduct(product_type),
        )
    }

    /// 用户未持有指定类型的产品
    ///
    /// 独立命名的规则而非 NOT 包装，诊断信息里显示正确的名称。
    pub fn has_no_product_type(&self, product_type: ProductType) -> AtomicRule {
        self.rule(
            format!("NO_PRODUCT_{}", product_type),
            Check::NoProduct(product_type),
        )
    }

    /// 用户是指定类型产品的活跃用户（持有产品且交易笔数达到下限）
    pub fn active_user_of(&self, product_type: ProductType) -> AtomicRule {
        self.rule(
            format!("ACTIVE_USER_OF_{}", product_type),
            Check::ActiveUser(product_type),
        )
    }

    /// 入账总额严格大于阈值
    pub fn deposit_greater_than(&self, product_type: ProductType, threshold: Decimal) -> AtomicRule {
        self.transaction_sum_compare(product_type, TransactionFlow::Deposit, CompareOp::Gt, threshold)
    }

    /// 入账总额大于等于阈值
    pub fn deposit_greater_or_equal(
        &self,
        product_type: ProductType,
        threshold: Decimal,
    ) -> AtomicRule {
        self.transaction_sum_compare(product_type, TransactionFlow::Deposit, CompareOp::Gte, threshold)
    }

    /// 支出总额严格大于阈值
    pub fn spend_greater_than(&self, product_type: ProductType, threshold: Decimal) -> AtomicRule {
        self.transaction_sum_compare(product_type, TransactionFlow::Withdraw, CompareOp::Gt, threshold)
    }

    /// 指定流向的交易总额与阈值比较
    pub fn transaction_sum_compare(
        &self,
        product_type: ProductType,
        flow: TransactionFlow,
        op: CompareOp,
        threshold: Decimal,
    ) -> AtomicRule {
        let prefix = match flow {
            TransactionFlow::Deposit => "DEPOSIT",
            TransactionFlow::Withdraw => "SPEND",
        };
        self.rule(
            format!("{}_{}_{}_{}", prefix, product_type, op, threshold),
            Check::SumCompare {
                product_type,
                flow,
                op,
                threshold,
            },
        )
    }

    /// 入账总额大于支出总额（正余额）
    pub fn positive_balance(&self, product_type: ProductType) -> AtomicRule {
        self.rule(
            format!("POSITIVE_BALANCE_{}", product_type),
            Check::DepositVsSpend {
                product_type,
                op: CompareOp::Gt,
            },
        )
    }

    /// 入账总额与支出总额按指定操作符比较
    pub fn deposit_vs_spend(&self, product_type: ProductType, op: CompareOp) -> AtomicRule {
        self.rule(
            format!("DEPOSIT_VS_SPEND_{}_{}", product_type, op),
            Check::DepositVsSpend { product_type, op },
        )
    }
}
