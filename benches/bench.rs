// Criterion benchmarks for Kindred Match

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use kindred_match::core::{jaccard_similarity, mbti_score, Matcher};
use kindred_match::models::{Acceptance, AgeRange, Category, MbtiType, Profile};
use std::collections::BTreeSet;

const CITIES: [&str; 3] = ["北京", "上海", "深圳"];
const INTERESTS: [&str; 8] = [
    "coding", "music", "hiking", "reading", "cooking", "film", "travel", "games",
];

fn tags(id: usize, pool: &[&str], count: usize) -> BTreeSet<String> {
    (0..count)
        .map(|k| pool[(id + k * 3) % pool.len()].to_string())
        .collect()
}

fn create_profile(id: usize) -> Profile {
    let (own, wants) = if id % 2 == 0 { ("T", "P") } else { ("P", "T") };
    let city = CITIES[id % CITIES.len()].to_string();

    Profile {
        user_id: format!("U{:04}", id),
        orientation: Category::known(own),
        desired_partner_orientation: Acceptance::from_labels([wants]),
        birth_year: Some(1988 + (id % 10) as i32),
        desired_partner_age_range: AgeRange::new(24, 38),
        province: Some(city.clone()),
        city: Some(city),
        accepts_long_distance: id % 3 != 0,
        marital_status: Category::known("单身"),
        desired_partner_marital_status: Acceptance::Any,
        has_children: Category::known("无"),
        desired_partner_children_status: Acceptance::from_labels(["无"]),
        dealbreaker_tags: BTreeSet::from(["吸烟".to_string()]),
        personal_traits: tags(id, &["爱运动", "理性", "吸烟", "温柔"], 2),
        mbti_type: Some(MbtiType::ALL[id % MbtiType::ALL.len()]),
        communication_style_tags: tags(id, &["直接沟通", "逻辑分析", "倾听"], 2),
        interest_tags: tags(id, &INTERESTS, 3),
    }
}

fn bench_similarity(c: &mut Criterion) {
    let a = tags(0, &INTERESTS, 4);
    let b = tags(5, &INTERESTS, 4);

    c.bench_function("jaccard_similarity", |bench| {
        bench.iter(|| jaccard_similarity(black_box(&a), black_box(&b)));
    });

    c.bench_function("mbti_score", |bench| {
        bench.iter(|| mbti_score(black_box("INTJ"), black_box("enfp")));
    });
}

fn bench_evaluate_pair(c: &mut Criterion) {
    let matcher = Matcher::with_defaults();
    let a = create_profile(0);
    let b = create_profile(1);

    c.bench_function("evaluate_pair", |bench| {
        bench.iter(|| matcher.evaluate_pair(black_box(&a), black_box(&b)));
    });
}

fn bench_matching(c: &mut Criterion) {
    let matcher = Matcher::with_defaults();
    let mut group = c.benchmark_group("matching");

    for profile_count in [10, 50, 100, 500].iter() {
        let profiles: Vec<Profile> = (0..*profile_count).map(create_profile).collect();

        group.bench_with_input(
            BenchmarkId::new("find_best_matches", profile_count),
            profile_count,
            |bench, _| {
                bench.iter(|| {
                    matcher.find_best_matches(
                        black_box(&profiles[0]),
                        black_box(&profiles),
                        black_box(20),
                    )
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("batch_match", profile_count),
            profile_count,
            |bench, _| {
                bench.iter(|| matcher.batch_match(black_box(&profiles)));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_similarity, bench_evaluate_pair, bench_matching);

criterion_main!(benches);
