use criterion::{Criterion, black_box, criterion_group, criterion_main};
use dnd_core::search;
use std::fs;
use tempfile::tempdir;

fn score_benchmark(c: &mut Criterion) {
    c.bench_function("search::score", |b| {
        b.iter(|| search::score(black_box("Google Chrome Helper (Renderer)"), black_box("chrm")))
    });
}

fn search_benchmark(c: &mut Criterion) {
    c.bench_function("search::search (500 entries)", |b| {
        let dir = tempdir().unwrap();
        for i in 0..500 {
            fs::write(dir.path().join(format!("binary-{:03}", i)), "").unwrap();
        }
        let roots = [dir.path().to_path_buf()];

        b.iter(|| {
            let matches = search::search(black_box(&roots), black_box("bin42"));
            assert_eq!(matches.len(), search::MAX_MATCHES);
        })
    });
}

criterion_group!(benches, score_benchmark, search_benchmark);
criterion_main!(benches);
