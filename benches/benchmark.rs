use camera_extrinsics_prior::io::parse_extrinsics;
use camera_extrinsics_prior::positional::bind_positionally_str;
use camera_extrinsics_prior::reconstruction::Reconstruction;
use criterion::{Criterion, black_box, criterion_group, criterion_main};

fn extrinsics_text(n: usize) -> String {
    let mut s = format!("{}\n", n);
    for i in 0..n {
        s += &format!(
            "img_{:05}.jpg {} {} {} 1 0 0 0 1 0 0 0 1\n",
            i,
            i as f64 * 0.1,
            -(i as f64),
            1.5
        );
    }
    s
}

fn bench_parse(c: &mut Criterion) {
    let text = extrinsics_text(1000);
    c.bench_function("parse_extrinsics_1000", |b| {
        b.iter(|| parse_extrinsics(black_box(&text)))
    });
}

fn bench_bind(c: &mut Criterion) {
    let text = extrinsics_text(1000);
    let mut reconstruction = Reconstruction::new();
    let ids: Vec<_> = (0..1000)
        .map(|i| reconstruction.add_view(&format!("img_{:05}.jpg", i)))
        .collect();
    c.bench_function("bind_positionally_1000", |b| {
        b.iter(|| bind_positionally_str(black_box(&text), &ids, &mut reconstruction))
    });
}

criterion_group!(benches, bench_parse, bench_bind);
criterion_main!(benches);
