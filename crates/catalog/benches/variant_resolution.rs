use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use storefront_catalog::{
    Selection, VariantCategory, VariantConfig, default_selection, generate_combinations,
    regenerate_combinations,
};

fn categories(count: usize, options_per_category: usize) -> Vec<VariantCategory> {
    (0..count)
        .map(|c| {
            VariantCategory::new(
                format!("Category {c}"),
                (0..options_per_category).map(|o| format!("opt-{c}-{o}")),
            )
        })
        .collect()
}

fn bench_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_combinations");
    for (count, options) in [(1, 8), (2, 6), (3, 5), (4, 4)] {
        let cats = categories(count, options);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{count}x{options}")),
            &cats,
            |b, cats| b.iter(|| generate_combinations(black_box(cats))),
        );
    }
    group.finish();
}

fn bench_regeneration(c: &mut Criterion) {
    let cats = categories(3, 5);
    let existing = generate_combinations(&cats);
    c.bench_function("regenerate_combinations/3x5", |b| {
        b.iter(|| regenerate_combinations(black_box(&cats), black_box(&existing)))
    });
}

fn bench_option_availability(c: &mut Criterion) {
    let cats = categories(3, 5);
    let config = VariantConfig::new(true, cats.clone());
    let selection: Selection = default_selection(&cats);
    c.bench_function("is_option_available/3x5", |b| {
        b.iter(|| {
            cats.iter()
                .flat_map(|cat| cat.options.iter().map(move |o| (cat, o)))
                .filter(|(cat, o)| config.is_option_available(&cat.name, o, black_box(&selection)))
                .count()
        })
    });
}

criterion_group!(benches, bench_generation, bench_regeneration, bench_option_availability);
criterion_main!(benches);
