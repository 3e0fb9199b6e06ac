#![allow(clippy::all)]
//! Benchmarks for rule and schedule evaluation.
//!
//! Tests: single pattern matching (exact, CIDR), rule-set evaluation over
//! growing lists, schedule evaluation in UTC and a named timezone, and the
//! full flow with both restrictions.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use std::sync::Arc;

use chrono::{TimeZone, Utc};
use r0n_restrict::config::RestrictionConfig;
use r0n_restrict::flow::{AuthRequest, RestrictionFlow};
use r0n_restrict::modules::audit::MemoryAuditObserver;
use r0n_restrict::modules::ip_restriction::{matches, IpRestrictionConfig, RuleSetEvaluator};
use r0n_restrict::modules::time_restriction::{
    Schedule, ScheduleEvaluator, TimeRestrictionConfig, ALL_DAYS,
};

fn rules(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            if i % 4 == 0 {
                format!("-10.{}.{}.1", i / 256 % 256, i % 256)
            } else {
                format!("+10.{}.0.0/16", i % 256)
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Matcher benchmarks
// ---------------------------------------------------------------------------

fn bench_matcher(c: &mut Criterion) {
    let mut group = c.benchmark_group("ip_restriction/matcher");

    group.bench_function("exact_hit", |b| {
        b.iter(|| black_box(matches(black_box("192.168.0.5"), black_box("192.168.0.5"))));
    });

    group.bench_function("cidr_hit", |b| {
        b.iter(|| black_box(matches(black_box("192.168.0.5"), black_box("192.168.0.0/24"))));
    });

    group.bench_function("cidr_miss", |b| {
        b.iter(|| black_box(matches(black_box("172.16.0.1"), black_box("192.168.0.0/24"))));
    });

    group.bench_function("malformed_pattern", |b| {
        b.iter(|| black_box(matches(black_box("192.168.0.5"), black_box("192.168.0.0/99"))));
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Rule-set benchmarks
// ---------------------------------------------------------------------------

fn bench_rule_set(c: &mut Criterion) {
    let mut group = c.benchmark_group("ip_restriction/evaluate");
    let evaluator = RuleSetEvaluator::new();

    for size in [1usize, 10, 100, 1000] {
        let list = rules(size);

        group.bench_with_input(BenchmarkId::new("last_network", size), &list, |b, list| {
            let candidate = format!("10.{}.5.5", (size - 1) % 256);
            b.iter(|| black_box(evaluator.evaluate(black_box(&candidate), list)));
        });

        group.bench_with_input(BenchmarkId::new("not_in_list", size), &list, |b, list| {
            b.iter(|| black_box(evaluator.evaluate(black_box("203.0.113.9"), list)));
        });
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// Schedule benchmarks
// ---------------------------------------------------------------------------

fn bench_schedule(c: &mut Criterion) {
    let mut group = c.benchmark_group("time_restriction/evaluate");
    let evaluator = ScheduleEvaluator::new();
    let now = Utc.with_ymd_and_hms(2024, 1, 15, 23, 30, 0).unwrap();

    let utc = Schedule::new("UTC", ALL_DAYS, "09:00", "17:00");
    group.bench_function("utc_window", |b| {
        b.iter(|| black_box(evaluator.evaluate(black_box(now), &utc)));
    });

    let overnight = Schedule::new("America/New_York", ALL_DAYS, "22:00", "06:00");
    group.bench_function("named_zone_overnight", |b| {
        b.iter(|| black_box(evaluator.evaluate(black_box(now), &overnight)));
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Flow benchmarks
// ---------------------------------------------------------------------------

fn bench_flow(c: &mut Criterion) {
    let mut group = c.benchmark_group("flow/check");

    let config = RestrictionConfig {
        ip_restriction: Some(IpRestrictionConfig::with_rules(rules(100))),
        time_restriction: Some(TimeRestrictionConfig::window("00:00", "23:59")),
        ..Default::default()
    };
    let flow = RestrictionFlow::from_config(&config, Arc::new(MemoryAuditObserver::new()));
    let request = AuthRequest::new()
        .with_remote_addr("10.5.1.1")
        .with_username("bench");

    group.bench_function("ip_and_time_allowed", |b| {
        b.iter(|| black_box(flow.check(black_box(&request))));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_matcher,
    bench_rule_set,
    bench_schedule,
    bench_flow
);
criterion_main!(benches);
