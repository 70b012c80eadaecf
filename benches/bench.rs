// Criterion benchmarks for Aid Match

use aid_match::core::{distance::haversine_distance, text::text_relevance, Matcher};
use aid_match::models::{
    BatchOptions, Coordinates, MatchOptions, Need, NeedStatus, Offer, OfferStatus, Urgency,
    UrgencyLevel,
};
use chrono::{Duration, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const DESCRIPTIONS: &[&str] = &[
    "rice and beans",
    "winter coats for kids",
    "rides to medical appointments",
    "fresh bread and canned soup",
    "spare tent and sleeping bags",
];

fn create_offer(id: usize, lat: f64, lon: f64) -> Offer {
    Offer {
        id: format!("offer-{}", id),
        user_id: format!("giver-{}", id),
        user_name: None,
        title: format!("Offer {}", id),
        description: DESCRIPTIONS[id % DESCRIPTIONS.len()].to_string(),
        resource: "supplies".to_string(),
        location: Coordinates::new(lat, lon),
        created_at: Utc::now() - Duration::days((id % 14) as i64),
        availability: None,
        is_active: true,
        status: if id % 7 == 0 { OfferStatus::Claimed } else { OfferStatus::Available },
    }
}

fn create_need(id: usize, lat: f64, lon: f64) -> Need {
    let levels = [UrgencyLevel::Low, UrgencyLevel::Medium, UrgencyLevel::High, UrgencyLevel::Critical];
    Need {
        id: format!("need-{}", id),
        user_id: format!("asker-{}", id),
        user_name: None,
        title: format!("Need {}", id),
        description: DESCRIPTIONS[(id * 3) % DESCRIPTIONS.len()].to_string(),
        resource: "supplies".to_string(),
        location: Coordinates::new(lat, lon),
        created_at: Utc::now() - Duration::days((id % 6) as i64),
        urgency: Urgency { level: Some(levels[id % levels.len()]), deadline: None },
        is_active: true,
        status: NeedStatus::Open,
    }
}

fn offers(count: usize) -> Vec<Offer> {
    (0..count)
        .map(|i| {
            let lat_offset = (i as f64 * 0.001) % 0.5;
            let lon_offset = (i as f64 * 0.002) % 0.5;
            create_offer(i, 40.7128 + lat_offset, -74.0060 + lon_offset)
        })
        .collect()
}

fn bench_haversine_distance(c: &mut Criterion) {
    c.bench_function("haversine_distance", |b| {
        b.iter(|| {
            haversine_distance(
                black_box(40.7128),
                black_box(-74.0060),
                black_box(40.72),
                black_box(-74.01),
            )
        });
    });
}

fn bench_text_relevance(c: &mut Criterion) {
    c.bench_function("text_relevance", |b| {
        b.iter(|| {
            text_relevance(
                black_box("food fresh bread and canned soup for the shelter"),
                black_box("food need canned soup and bread this week"),
            )
        });
    });
}

fn bench_candidate_scan(c: &mut Criterion) {
    let need = create_need(3, 40.7128, -74.0060);
    let options = MatchOptions::default();

    let mut group = c.benchmark_group("find_matches_for_need");

    for candidate_count in [10, 100, 1000].iter() {
        let pool = offers(*candidate_count);

        for (label, matcher) in [
            ("sequential", Matcher::new()),
            ("parallel", Matcher::new().with_parallelism(true)),
        ] {
            group.bench_with_input(
                BenchmarkId::new(label, candidate_count),
                candidate_count,
                |b, _| {
                    b.iter(|| matcher.find_matches_for_need(black_box(&need), black_box(&pool), &options));
                },
            );
        }
    }

    group.finish();
}

fn bench_auto_match(c: &mut Criterion) {
    let pool = offers(200);
    let needs: Vec<Need> = (0..100)
        .map(|i| create_need(i, 40.7128 + (i as f64 * 0.003) % 0.4, -74.0060))
        .collect();
    let options = BatchOptions::default();

    let mut group = c.benchmark_group("auto_match_all");
    for (label, matcher) in [
        ("sequential", Matcher::new()),
        ("parallel", Matcher::new().with_parallelism(true)),
    ] {
        group.bench_function(label, |b| {
            b.iter(|| matcher.auto_match_all(black_box(&needs), black_box(&pool), &options));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_haversine_distance,
    bench_text_relevance,
    bench_candidate_scan,
    bench_auto_match
);

criterion_main!(benches);
