use criterion::{black_box, criterion_group, criterion_main, Criterion};
use medi_forest::{ForestParams, RandomForest};

fn synthetic(rows: usize) -> (Vec<Vec<f64>>, Vec<u8>) {
    let mut x = Vec::with_capacity(rows);
    let mut y = Vec::with_capacity(rows);
    for i in 0..rows {
        let row: Vec<f64> = (0..8).map(|f| ((i * 31 + f * 17) % 97) as f64).collect();
        y.push(u8::from(row[1] > 48.0));
        x.push(row);
    }
    (x, y)
}

fn bench_forest(c: &mut Criterion) {
    let (x, y) = synthetic(768);
    let params = ForestParams::default().with_seed(1);

    c.bench_function("forest_fit_768x8", |b| {
        b.iter(|| RandomForest::fit(black_box(params), black_box(&x), black_box(&y)))
    });

    let forest = RandomForest::fit(params, &x, &y).expect("fit");
    let probe = x[10].clone();
    c.bench_function("forest_predict_single", |b| {
        b.iter(|| forest.predict(black_box(&probe)))
    });
}

criterion_group!(benches, bench_forest);
criterion_main!(benches);
