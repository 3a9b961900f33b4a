use criterion::{criterion_group, criterion_main, Criterion};
use search::{CatalogItem, Searcher};

fn synthetic_catalog(n: usize) -> Vec<CatalogItem> {
    let names = [
        "Betoneira",
        "Andaime Fachadeiro",
        "Gerador",
        "Compactador de Solo",
        "Martelete Rompedor",
        "Serra Mármore",
        "Plataforma Elevatória",
        "Vibrador de Concreto",
    ];
    (0..n)
        .map(|i| CatalogItem {
            id: i.to_string(),
            name: format!("{} {}L", names[i % names.len()], 100 + i),
            description: Some(format!("Equipamento para locação, modelo {i}")),
            category: None,
            daily_price: Some(80.0 + i as f64),
        })
        .collect()
}

fn bench_search(c: &mut Criterion) {
    let records = synthetic_catalog(500);
    let searcher = Searcher::new();
    c.bench_function("search_typo_500", |b| {
        b.iter(|| searcher.search(&records, "betoneria 400", &["name", "description"]))
    });
    c.bench_function("search_exact_500", |b| {
        b.iter(|| searcher.search(&records, "gerador", &["name", "description"]))
    });
}

criterion_group!(benches, bench_search);
criterion_main!(benches);
