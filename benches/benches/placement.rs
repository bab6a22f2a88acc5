// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect, Size};

use canopy_placement::{
    Anchor, Direction, PlacementRequest, Preference, Side, Tunables, compute_placement,
};

const WINDOW: Size = Size::new(1920.0, 1080.0);
const TIP: Size = Size::new(240.0, 56.0);

fn target_request(origin: Point) -> PlacementRequest {
    PlacementRequest {
        anchor: Anchor::Target(Rect::from_origin_size(origin, Size::new(120.0, 32.0))),
        size: Some(TIP),
        window: WINDOW,
        ..PlacementRequest::default()
    }
}

/// A grid of targets covering the window, including edge and corner cells
/// where the fallback search and clamping do real work.
fn target_grid() -> Vec<PlacementRequest> {
    let mut requests = Vec::new();
    for row in 0..12 {
        for col in 0..16 {
            let origin = Point::new(f64::from(col) * 120.0, f64::from(row) * 90.0);
            requests.push(target_request(origin));
        }
    }
    requests
}

fn bench_target_placement(c: &mut Criterion) {
    let tunables = Tunables::default();
    let requests = target_grid();

    c.bench_function("placement/target_grid", |b| {
        b.iter(|| {
            for request in &requests {
                black_box(compute_placement(black_box(request), &tunables));
            }
        });
    });

    let fixed: Vec<PlacementRequest> = requests
        .iter()
        .map(|request| PlacementRequest {
            preference: Preference::Fixed(Side::Right),
            ..*request
        })
        .collect();
    c.bench_function("placement/target_grid_fixed_right", |b| {
        b.iter(|| {
            for request in &fixed {
                black_box(compute_placement(black_box(request), &tunables));
            }
        });
    });
}

fn bench_pointer_placement(c: &mut Criterion) {
    let tunables = Tunables::default();
    let ltr = PlacementRequest {
        anchor: Anchor::Pointer(Point::new(640.0, 400.0)),
        size: Some(TIP),
        window: WINDOW,
        ..PlacementRequest::default()
    };
    let rtl = PlacementRequest {
        direction: Direction::Rtl,
        ..ltr
    };

    c.bench_function("placement/pointer_ltr", |b| {
        b.iter(|| black_box(compute_placement(black_box(&ltr), &tunables)));
    });
    c.bench_function("placement/pointer_rtl", |b| {
        b.iter(|| black_box(compute_placement(black_box(&rtl), &tunables)));
    });
}

criterion_group!(benches, bench_target_placement, bench_pointer_placement);
criterion_main!(benches);
