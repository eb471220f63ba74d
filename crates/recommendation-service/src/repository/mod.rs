//! 数据访问层

mod facts;
mod rules;

pub use facts::PgFactsRepository;
pub use rules::DynamicRuleRepository;
