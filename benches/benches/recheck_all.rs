// Copyright 2025 the Vantage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::rc::Rc;

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Rect;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use vantage_proximity::page::{Page, PageScheduler};
use vantage_proximity::{Candidate, Scheduler, Trigger};

const VIEWPORT: f64 = 800.0;

/// A feed of `n` clips stacked top to bottom with a fixed gap.
fn feed(n: usize) -> (Rc<Page>, PageScheduler) {
    let page = Rc::new(Page::new(VIEWPORT));
    let mut scheduler = Scheduler::new(Rc::clone(&page));
    for i in 0..n {
        let top = i as f64 * 500.0;
        let key = format!("clip{i}");
        let element = page.insert(&key, Rect::new(0.0, top, 640.0, top + 360.0));
        scheduler.add(&key, Candidate::new(element, || {}, || {}));
    }
    (page, scheduler)
}

fn bench_recheck(c: &mut Criterion) {
    let mut group = c.benchmark_group("recheck_all");
    for &n in &[10_usize, 100, 1_000] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("steady_n{n}"), |b| {
            let (_page, mut scheduler) = feed(n);
            b.iter(|| {
                scheduler.recheck_all(black_box(Some(Trigger::Scroll)));
                black_box(scheduler.active_key().is_some());
            });
        });
        group.bench_function(format!("random_scroll_n{n}"), |b| {
            let (page, mut scheduler) = feed(n);
            let max = n as f64 * 500.0;
            let mut rng = StdRng::seed_from_u64(0x5eed);
            b.iter_batched(
                || rng.gen_range(0.0..max),
                |offset| {
                    page.scroll_to(offset);
                    scheduler.recheck_all(Some(Trigger::Scroll));
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_register(c: &mut Criterion) {
    c.bench_function("add_remove_1000", |b| {
        b.iter_batched(
            || feed(0),
            |(page, mut scheduler)| {
                let element = page.insert("clip", Rect::new(0.0, 0.0, 640.0, 360.0));
                for i in 0..1_000 {
                    let key = format!("clip{i}");
                    scheduler.add(&key, Candidate::new(element, || {}, || {}));
                }
                for i in 0..1_000 {
                    scheduler.remove(&format!("clip{i}"));
                }
                black_box(scheduler.len())
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_recheck, bench_register);
criterion_main!(benches);
