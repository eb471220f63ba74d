//! 测试工具模块
//!
//! 提供内存版事实提供者与用户画像构造器，用于单元测试与集成测试。

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::{Result, RuleError};
use crate::facts::FactsRepository;
use crate::product::ProductType;

/// 用户金融画像（测试夹具）
#[derive(Debug, Clone, Default)]
pub struct UserProfile {
    products: Vec<ProductType>,
    deposits: HashMap<ProductType, Decimal>,
    spends: HashMap<ProductType, Decimal>,
    transaction_counts: HashMap<ProductType, i64>,
}

impl UserProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_product(mut self, product_type: ProductType) -> Self {
        if !self.products.contains(&product_type) {
            self.products.push(product_type);
        }
        self
    }

    pub fn with_deposit(mut self, product_type: ProductType, amount: i64) -> Self {
        self.deposits.insert(product_type, Decimal::from(amount));
        self
    }

    pub fn with_spend(mut self, product_type: ProductType, amount: i64) -> Self {
        self.spends.insert(product_type, Decimal::from(amount));
        self
    }

    pub fn with_transactions(mut self, product_type: ProductType, count: i64) -> Self {
        self.transaction_counts.insert(product_type, count);
        self
    }
}

/// 内存版事实提供者
///
/// 与生产实现遵守同一约定："没有数据"返回零/false，绝不返回 null。
#[derive(Default)]
pub struct InMemoryFacts {
    users: RwLock<HashMap<Uuid, UserProfile>>,
}

impl InMemoryFacts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_user(&self, user_id: Uuid, profile: UserProfile) {
        self.users.write().insert(user_id, profile);
    }

    pub fn with_user(self, user_id: Uuid, profile: UserProfile) -> Self {
        self.insert_user(user_id, profile);
        self
    }
}

#[async_trait]
impl FactsRepository for InMemoryFacts {
    async fn user_exists(&self, user_id: Uuid) -> Result<bool> {
        Ok(self.users.read().contains_key(&user_id))
    }

    async fn has_product_type(&self, user_id: Uuid, product_type: ProductType) -> Result<bool> {
        Ok(self
            .users
            .read()
            .get(&user_id)
            .map(|p| p.products.contains(&product_type))
            .unwrap_or(false))
    }

    async fn total_deposit(&self, user_id: Uuid, product_type: ProductType) -> Result<Decimal> {
        Ok(self
            .users
            .read()
            .get(&user_id)
            .and_then(|p| p.deposits.get(&product_type).copied())
            .unwrap_or(Decimal::ZERO))
    }

    async fn total_spend(&self, user_id: Uuid, product_type: ProductType) -> Result<Decimal> {
        Ok(self
            .users
            .read()
            .get(&user_id)
            .and_then(|p| p.spends.get(&product_type).copied())
            .unwrap_or(Decimal::ZERO))
    }

    async fn transaction_count(&self, user_id: Uuid, product_type: ProductType) -> Result<i64> {
        Ok(self
            .users
            .read()
            .get(&user_id)
            .and_then(|p| p.transaction_counts.get(&product_type).copied())
            .unwrap_or(0))
    }
}

/// 每次查询都失败的事实提供者，用于验证降级行为
#[derive(Default)]
pub struct FailingFacts;

#[async_trait]
impl FactsRepository for FailingFacts {
    async fn user_exists(&self, _user_id: Uuid) -> Result<bool> {
        Err(RuleError::FactsLookup("connection refused".to_string()))
    }

    async fn has_product_type(&self, _user_id: Uuid, _product_type: ProductType) -> Result<bool> {
        Err(RuleError::FactsLookup("connection refused".to_string()))
    }

    async fn total_deposit(&self, _user_id: Uuid, _product_type: ProductType) -> Result<Decimal> {
        Err(RuleError::FactsLookup("connection refused".to_string()))
    }

    async fn total_spend(&self, _user_id: Uuid, _product_type: ProductType) -> Result<Decimal> {
        Err(RuleError::FactsLookup("connection refused".to_string()))
    }

    async fn transaction_count(&self, _user_id: Uuid, _product_type: ProductType) -> Result<i64> {
        Err(RuleError::FactsLookup("connection refused".to_string()))
    }
}
