//! 静态规则目录
//!
//! 三个固定产品的参考业务规则，以及推荐输出使用的产品展示元数据。
//! 规则树由原子规则手工组合而成，是动态规则之外始终可用的基准实现。

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::{Uuid, uuid};

use crate::atomic::AtomicRules;
use crate::composite::CompositeRule;
use crate::error::Result;
use crate::product::ProductType;

/// "Invest 500" 产品 ID
pub const INVEST_500_PRODUCT_ID: Uuid = uuid!("147f6a0f-3b91-413b-ab99-87f081d60d5a");
/// "Top Saving" 产品 ID
pub const TOP_SAVING_PRODUCT_ID: Uuid = uuid!("59efc529-2fff-41af-baff-90ccd7402925");
/// "Simple Credit" 产品 ID
pub const SIMPLE_CREDIT_PRODUCT_ID: Uuid = uuid!("ab138afb-f3ba-4a93-b74f-0fcee86d447f");

// 金额阈值常量
const SAVING_THRESHOLD_1K: i64 = 1_000;
const DEPOSIT_THRESHOLD_50K: i64 = 50_000;
const SPEND_THRESHOLD_100K: i64 = 100_000;

/// 推荐结果中的产品描述
///
/// 仅用于组装输出，规则逻辑不会读取这里的任何字段。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecommendation {
    pub name: String,
    pub id: Uuid,
    pub text: String,
}

/// 静态目录条目：产品描述 + 该产品的规则树
pub struct StaticRuleEntry {
    /// 统计计数使用的规则标识（静态规则取产品 ID）
    pub rule_id: Uuid,
    pub product: ProductRecommendation,
    pub rule: CompositeRule,
}

/// 产品规则集
///
/// 把原子规则组合成每个产品的推荐条件。
pub struct ProductRuleSets {
    atomic: AtomicRules,
}

impl ProductRuleSets {
    pub fn new(atomic: AtomicRules) -> Self {
        Self { atomic }
    }

    /// "Invest 500" 的规则集
    ///
    /// 条件：持有 DEBIT 产品，未持有 INVEST 产品，SAVING 入账总额 > 1,000。
    pub fn invest_500_rule_set(&self) -> Result<CompositeRule> {
        CompositeRule::and(
            "INVEST_500_RULES",
            vec![
                Arc::new(self.atomic.has_product_type(ProductType::Debit)),
                Arc::new(self.atomic.has_no_product_type(ProductType::Invest)),
                Arc::new(
                    self.atomic
                        .deposit_greater_than(ProductType::Saving, Decimal::from(SAVING_THRESHOLD_1K)),
                ),
            ],
        )
    }

    /// "Top Saving" 的规则集
    ///
    /// 条件：持有 DEBIT 产品，DEBIT 或 SAVING 入账总额 >= 50,000（OR 分支），
    /// DEBIT 正余额（入账 > 支出）。
    pub fn top_saving_rule_set(&self) -> Result<CompositeRule> {
        let high_deposits = CompositeRule::or(
            "HIGH_DEPOSITS",
            vec![
                Arc::new(self.atomic.deposit_greater_or_equal(
                    ProductType::Debit,
                    Decimal::from(DEPOSIT_THRESHOLD_50K),
                )),
                Arc::new(self.atomic.deposit_greater_or_equal(
                    ProductType::Saving,
                    Decimal::from(DEPOSIT_THRESHOLD_50K),
                )),
            ],
        )?;

        CompositeRule::and(
            "TOP_SAVING_RULES",
            vec![
                Arc::new(self.atomic.has_product_type(ProductType::Debit)),
                Arc::new(high_deposits),
                Arc::new(self.atomic.positive_balance(ProductType::Debit)),
            ],
        )
    }

    /// "Simple Credit" 的规则集
    ///
    /// 条件：未持有 CREDIT 产品，DEBIT 正余额，DEBIT 支出总额 > 100,000。
    pub fn simple_credit_rule_set(&self) -> Result<CompositeRule> {
        CompositeRule::and(
            "SIMPLE_CREDIT_RULES",
            vec![
                Arc::new(self.atomic.has_no_product_type(ProductType::Credit)),
                Arc::new(self.atomic.positive_balance(ProductType::Debit)),
                Arc::new(
                    self.atomic
                        .spend_greater_than(ProductType::Debit, Decimal::from(SPEND_THRESHOLD_100K)),
                ),
            ],
        )
    }

    /// 按声明顺序构建全部静态目录条目
    ///
    /// 输出顺序即推荐结果的顺序：Invest 500 -> Top Saving -> Simple Credit。
    pub fn standard_catalog(&self) -> Result<Vec<StaticRuleEntry>> {
        Ok(vec![
            StaticRuleEntry {
                rule_id: INVEST_500_PRODUCT_ID,
                product: ProductRecommendation {
                    name: "Invest 500".to_string(),
                    id: INVEST_500_PRODUCT_ID,
                    text: "开启专属投资账户，迈出财富增值的第一步。".to_string(),
                },
                rule: self.invest_500_rule_set()?,
            },
            StaticRuleEntry {
                rule_id: TOP_SAVING_PRODUCT_ID,
                product: ProductRecommendation {
                    name: "Top Saving".to_string(),
                    id: TOP_SAVING_PRODUCT_ID,
                    text: "开通我们银行的专属储蓄罐，让每一笔结余都在增值。".to_string(),
                },
                rule: self.top_saving_rule_set()?,
            },
            StaticRuleEntry {
                rule_id: SIMPLE_CREDIT_PRODUCT_ID,
                product: ProductRecommendation {
                    name: "Simple Credit".to_string(),
                    id: SIMPLE_CREDIT_PRODUCT_ID,
                    text: "简单信贷，随时开启优惠贷款之旅。".to_string(),
                },
                rule: self.simple_credit_rule_set()?,
            },
        ])
    }
}
