// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Size;
use understory_slider::geometry::GeometrySnapshot;
use understory_slider::mapper::ValueMapper;
use understory_slider::{AnimationConfig, EventLog, Range, Region, Slider, SliderConfig};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_f64(&mut self) -> f64 {
        // xorshift64*
        let mut x = self.0;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.0 = x;
        let v = x.wrapping_mul(0x2545_F491_4F6C_DD1D);
        (v >> 11) as f64 / (1_u64 << 53) as f64
    }
}

fn gen_offsets(n: usize, span: f64) -> Vec<f64> {
    let mut rng = Rng::new(0x5EED);
    (0..n).map(|_| rng.next_f64() * span * 1.2 - span * 0.1).collect()
}

fn measured_slider(config: SliderConfig) -> Slider<EventLog> {
    let mut s = Slider::with_handler(config, EventLog::new());
    s.measure(Region::Container, 320.0, 40.0);
    s.measure(Region::Track, 320.0, 4.0);
    s.measure(Region::Thumb, 20.0, 20.0);
    s
}

fn bench_mapping(c: &mut Criterion) {
    let geometry = GeometrySnapshot::measured(
        Size::new(320.0, 40.0),
        Size::new(320.0, 4.0),
        Size::new(20.0, 20.0),
    );
    let offsets = gen_offsets(4096, 300.0);
    let mut group = c.benchmark_group("mapping");
    group.throughput(Throughput::Elements(offsets.len() as u64));
    for (name, range, rtl) in [
        ("continuous", Range::default(), false),
        ("stepped", Range::normalized(0.0, 100.0, 5.0), false),
        ("stepped_rtl", Range::normalized(0.0, 100.0, 5.0), true),
    ] {
        let mapper = ValueMapper::new(range, geometry, rtl);
        group.bench_function(format!("value_from_offset_{name}"), |b| {
            b.iter(|| {
                let mut acc = 0.0;
                for &o in &offsets {
                    acc += mapper.value_from_offset(black_box(o));
                }
                black_box(acc)
            })
        });
    }
    group.finish();
}

fn bench_drag(c: &mut Criterion) {
    let moves = gen_offsets(256, 300.0);
    let mut group = c.benchmark_group("drag");
    group.throughput(Throughput::Elements(moves.len() as u64));
    group.bench_function("grant_move_release", |b| {
        b.iter_batched(
            || measured_slider(SliderConfig::default().with_range(Range::normalized(0.0, 10.0, 1.0))),
            |mut s| {
                let c = s.touch_geometry().rect.center();
                let _ = s.on_gesture_start(c.x, c.y);
                for &dx in &moves {
                    s.on_gesture_move(dx);
                }
                s.on_gesture_end(0.0);
                black_box(s.current_value());
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_animation(c: &mut Criterion) {
    let mut group = c.benchmark_group("animation");
    for (name, animation) in [
        ("timing", AnimationConfig::timing().with_duration(Duration::from_millis(500))),
        ("spring", AnimationConfig::spring()),
    ] {
        group.bench_function(format!("settle_{name}"), |b| {
            b.iter_batched(
                || {
                    measured_slider(
                        SliderConfig::default()
                            .with_animate_transitions(true)
                            .with_animation(animation),
                    )
                },
                |mut s| {
                    s.set_value(1.0);
                    let mut now = Duration::ZERO;
                    let mut frames = 0_u32;
                    while s.tick(now) {
                        now += Duration::from_millis(16);
                        frames += 1;
                    }
                    black_box(frames);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_mapping, bench_drag, bench_animation);
criterion_main!(benches);
