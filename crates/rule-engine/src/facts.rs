//! 用户金融事实提供者接口

use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::Result;
use crate::product::ProductType;

/// 用户金融事实提供者
///
/// 回答针对单个用户的原子事实查询。实现方约定："没有数据"一律视为
/// 零/false，绝不返回 null，保证上层比较不会因缺失数据而失败。
/// 引擎不关心事实从哪里来（SQL、缓存、内存夹具均可）。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FactsRepository: Send + Sync {
    /// 用户是否存在
    async fn user_exists(&self, user_id: Uuid) -> Result<bool>;

    /// 用户是否持有指定类型的产品
    async fn has_product_type(&self, user_id: Uuid, product_type: ProductType) -> Result<bool>;

    /// 指定类型产品的入账总额
    async fn total_deposit(&self, user_id: Uuid, product_type: ProductType) -> Result<Decimal>;

    /// 指定类型产品的支出总额
    async fn total_spend(&self, user_id: Uuid, product_type: ProductType) -> Result<Decimal>;

    /// 指定类型产品的交易笔数
    async fn transaction_count(&self, user_id: Uuid, product_type: ProductType) -> Result<i64>;
}
