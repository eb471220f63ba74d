//! 规则评估性能基准测试
//!
//! 针对静态目录与动态规则编译的细粒度性能测试。

use std::hint::black_box;
use std::sync::Arc;

use criterion::{Criterion, criterion_group, criterion_main};
use rule_engine::test_utils::{InMemoryFacts, UserProfile};
use rule_engine::{
    AtomicRules, DynamicRule, FactsRepository, ProductRuleSets, ProductType, QueryType,
    RecommendationRule, RuleInterpreter, RuleQuery,
};
use uuid::Uuid;

fn eligible_facts(user_id: Uuid) -> Arc<InMemoryFacts> {
    Arc::new(InMemoryFacts::new().with_user(
        user_id,
        UserProfile::new()
            .with_product(ProductType::Debit)
            .with_deposit(ProductType::Debit, 200_000)
            .with_deposit(ProductType::Saving, 60_000)
            .with_spend(ProductType::Debit, 150_000),
    ))
}

fn bench_static_catalog(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let user_id = Uuid::new_v4();
    let facts = eligible_facts(user_id);
    let rule_sets = ProductRuleSets::new(AtomicRules::new(facts));

    let mut group = c.benchmark_group("static_catalog");

    let top_saving = rule_sets.top_saving_rule_set().unwrap();
    group.bench_function("top_saving", |b| {
        b.to_async(&runtime)
            .iter(|| async { black_box(top_saving.is_eligible(user_id).await) })
    });

    let simple_credit = rule_sets.simple_credit_rule_set().unwrap();
    group.bench_function("simple_credit", |b| {
        b.to_async(&runtime)
            .iter(|| async { black_box(simple_credit.is_eligible(user_id).await) })
    });

    group.finish();
}

fn bench_dynamic_compile(c: &mut Criterion) {
    let facts: Arc<dyn FactsRepository> = Arc::new(InMemoryFacts::new());
    let interpreter = RuleInterpreter::new(facts);

    let rule = DynamicRule::new(
        "bench",
        Uuid::new_v4(),
        "bench",
        vec![
            RuleQuery::new(QueryType::UserOf, vec!["DEBIT".to_string()], false),
            RuleQuery::new(
                QueryType::TransactionSumCompare,
                vec![
                    "DEBIT".to_string(),
                    "DEPOSIT".to_string(),
                    ">".to_string(),
                    "100000".to_string(),
                ],
                false,
            ),
            RuleQuery::new(QueryType::UserOf, vec!["CREDIT".to_string()], true),
        ],
    );

    c.bench_function("compile_dynamic_rule", |b| {
        b.iter(|| black_box(interpreter.compile(&rule).unwrap()))
    });
}

criterion_group!(benches, bench_static_catalog, bench_dynamic_compile);
criterion_main!(benches);
