use criterion::{black_box, criterion_group, criterion_main, Criterion};

use fiv_slotmap::{RemovalPolicy, SlotMap};

#[allow(clippy::many_single_char_names)]
pub fn slotmap(c: &mut Criterion) {
    c.bench_function("slotmap push", |b| {
        b.iter(|| {
            let mut map = SlotMap::new();
            let map = black_box(&mut map);
            map.push(());
        })
    });

    for &(name, policy) in &[("keep order", RemovalPolicy::KeepOrder), ("swap remove", RemovalPolicy::SwapRemove)] {
        c.bench_function(&format!("slotmap re-insertion ({})", name), |b| {
            let mut map = SlotMap::with_policy(policy);
            let _anchor = map.push(());
            b.iter(|| {
                let map = black_box(&mut map);
                let a = map.push(());
                let b = map.push(());
                let c = map.push(());
                let d = map.push(());
                let e = map.push(());

                let (a, b, c, d, e) = black_box((a, b, c, d, e));

                map.remove(b);
                map.remove(d);
                map.remove(a);
                map.remove(c);
                map.remove(e);
            })
        });

        c.bench_function(&format!("slotmap remove front of 1000 ({})", name), |b| {
            b.iter_with_setup(
                || {
                    let mut map = SlotMap::with_capacity(1000, policy);
                    let ids = (0..1000).map(|i| map.push(i)).collect::<Vec<_>>();
                    (map, ids)
                },
                |(mut map, ids)| {
                    for &id in ids.iter().take(100) {
                        black_box(map.remove(id));
                    }
                },
            )
        });
    }

    c.bench_function("slotmap lookup", |b| {
        let mut map = SlotMap::new();
        let ids = (0..1000).map(|i| map.push(i)).collect::<Vec<_>>();

        for &id in ids.iter().step_by(3) {
            map.remove(id);
        }

        b.iter(|| {
            ids.iter()
                .filter_map(|&id| black_box(&map).get(id).ok())
                .sum::<i32>()
        })
    });

    c.bench_function("slotmap iteration packed", |b| {
        let map = (0..1000).collect::<SlotMap<i32>>();

        b.iter(|| black_box(&map).iter().sum::<i32>())
    });
}

criterion_group!(benches, slotmap);
criterion_main!(benches);
