// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Rect, Size};

use canopy_lifecycle::{ShowRequest, TooltipController, TooltipOptions};

const WINDOW: Size = Size::new(1920.0, 1080.0);

fn controller() -> TooltipController<u32, ()> {
    TooltipController::new(WINDOW)
}

fn request(key: u32, x: f64) -> ShowRequest<u32, ()> {
    ShowRequest::new(TooltipOptions::new("benchmark tooltip"))
        .target(key, Rect::new(x, 400.0, x + 120.0, 432.0))
        .measured(Size::new(240.0, 56.0))
}

fn bench_show_hide_cycle(c: &mut Criterion) {
    c.bench_function("lifecycle/show_hide_cycle", |b| {
        b.iter_batched_ref(
            controller,
            |ctrl| {
                let mut now = 0;
                for key in 0..64_u32 {
                    ctrl.show(black_box(request(key, f64::from(key) * 20.0)), now);
                    now += 1_000;
                    ctrl.hide(now);
                    ctrl.advance(now + 1_000);
                    now += 1_000;
                }
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_reposition_storm(c: &mut Criterion) {
    c.bench_function("lifecycle/reposition_storm", |b| {
        b.iter_batched_ref(
            || {
                let mut ctrl = controller();
                ctrl.show(request(1, 600.0), 0);
                ctrl
            },
            |ctrl| {
                // A scroll handler recomputing geometry every frame.
                for step in 0..256_u32 {
                    let x = 600.0 + f64::from(step);
                    ctrl.update_position(Some(Rect::new(x, 400.0, x + 120.0, 432.0)));
                }
                black_box(ctrl.state().position)
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_show_hide_cycle, bench_reposition_storm);
criterion_main!(benches);
