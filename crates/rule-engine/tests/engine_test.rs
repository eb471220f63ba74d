//! 规则引擎集成测试
//!
//! 覆盖从事实提供者到推荐编排的完整链路：静态目录、动态规则编译、
//! 触发统计与并发行为。

use std::sync::Arc;

use rule_engine::test_utils::{InMemoryFacts, UserProfile};
use rule_engine::{
    DynamicRule, FactsRepository, ProductType, QueryType, RecommendationService, RuleError,
    RuleInterpreter, RuleQuery, RuleStatisticsService, RuleStore, INVEST_500_PRODUCT_ID,
};
use uuid::Uuid;

struct Harness {
    facts: Arc<InMemoryFacts>,
    store: RuleStore,
    statistics: Arc<RuleStatisticsService>,
    service: Arc<RecommendationService>,
}

fn harness() -> Harness {
    let facts = Arc::new(InMemoryFacts::new());
    let store = RuleStore::new(RuleInterpreter::new(
        Arc::clone(&facts) as Arc<dyn FactsRepository>
    ));
    let statistics = Arc::new(RuleStatisticsService::new());
    let service = Arc::new(
        RecommendationService::new(
            Arc::clone(&facts) as Arc<dyn FactsRepository>,
            store.clone(),
            Arc::clone(&statistics),
        )
        .unwrap(),
    );

    Harness {
        facts,
        store,
        statistics,
        service,
    }
}

fn investor_profile() -> UserProfile {
    // 满足 Invest 500：持有 DEBIT、无 INVEST、SAVING 入账 1500 > 1000
    UserProfile::new()
        .with_product(ProductType::Debit)
        .with_deposit(ProductType::Saving, 1_500)
}

#[tokio::test]
async fn full_pass_combines_static_and_dynamic_rules() {
    let h = harness();
    let user_id = Uuid::new_v4();
    h.facts.insert_user(user_id, investor_profile());

    let dynamic = DynamicRule::new(
        "新客礼包",
        Uuid::new_v4(),
        "新客户专享礼包",
        vec![
            RuleQuery::new(QueryType::UserOf, vec!["DEBIT".to_string()], false),
            RuleQuery::new(QueryType::UserOf, vec!["CREDIT".to_string()], true),
        ],
    );
    let dynamic_id = dynamic.id;
    h.store.load(dynamic).unwrap();

    let recommendations = h.service.recommend(user_id).await.unwrap();
    let names: Vec<&str> = recommendations.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["Invest 500", "新客礼包"]);

    assert_eq!(h.statistics.count_for(INVEST_500_PRODUCT_ID), 1);
    assert_eq!(h.statistics.count_for(dynamic_id), 1);
}

#[tokio::test]
async fn unknown_user_is_distinct_from_empty_result() {
    let h = harness();

    // 已知但不符合任何条件的用户：空列表
    let known = Uuid::new_v4();
    h.facts.insert_user(known, UserProfile::new());
    assert!(h.service.recommend(known).await.unwrap().is_empty());

    // 未知用户：错误
    let unknown = Uuid::new_v4();
    assert!(matches!(
        h.service.recommend(unknown).await,
        Err(RuleError::UserNotFound(id)) if id == unknown
    ));
}

#[tokio::test]
async fn rule_edit_changes_behavior_without_restart() {
    let h = harness();
    let user_id = Uuid::new_v4();
    h.facts
        .insert_user(user_id, UserProfile::new().with_product(ProductType::Debit));

    let mut rule = DynamicRule::new(
        "联名卡",
        Uuid::new_v4(),
        "办理联名卡",
        vec![RuleQuery::new(
            QueryType::UserOf,
            vec!["DEBIT".to_string()],
            false,
        )],
    );
    h.store.load(rule.clone()).unwrap();
    assert_eq!(h.service.recommend(user_id).await.unwrap().len(), 1);

    // 编辑条件为要求 INVEST 持仓后，同一用户不再命中
    rule.queries = vec![RuleQuery::new(
        QueryType::UserOf,
        vec!["INVEST".to_string()],
        false,
    )];
    h.store.load(rule).unwrap();
    assert!(h.service.recommend(user_id).await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_passes_accumulate_statistics_correctly() {
    let h = harness();

    // 20 个互相独立的符合条件的用户
    let users: Vec<Uuid> = (0..20).map(|_| Uuid::new_v4()).collect();
    for user_id in &users {
        h.facts.insert_user(*user_id, investor_profile());
    }

    let mut handles = Vec::new();
    for user_id in users {
        let service = Arc::clone(&h.service);
        handles.push(tokio::spawn(async move {
            service.recommend(user_id).await.unwrap()
        }));
    }
    for handle in handles {
        let recommendations = handle.await.unwrap();
        assert_eq!(recommendations.len(), 1);
    }

    assert_eq!(h.statistics.count_for(INVEST_500_PRODUCT_ID), 20);

    h.service.clear_statistics();
    assert_eq!(h.statistics.count_for(INVEST_500_PRODUCT_ID), 0);
}

#[tokio::test]
async fn malformed_rule_never_reaches_evaluation() {
    let h = harness();

    let bad = DynamicRule::new(
        "坏规则",
        Uuid::new_v4(),
        "不应出现",
        vec![RuleQuery::new(
            QueryType::TransactionSumCompare,
            vec!["DEBIT".to_string(), "DEPOSIT".to_string(), "<".to_string(), "100".to_string()],
            false,
        )],
    );
    assert!(matches!(
        h.store.load(bad),
        Err(RuleError::QueryCompile { index: 0, .. })
    ));

    // 坏规则未入库，推荐流程照常工作
    let user_id = Uuid::new_v4();
    h.facts.insert_user(user_id, UserProfile::new());
    assert!(h.service.recommend(user_id).await.unwrap().is_empty());
}
