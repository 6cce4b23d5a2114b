use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rayon::prelude::*;

use msea::annotations::{AnnotationCatalog, Category};
use msea::stats::{category_enrichment, correction, fisher};
use msea::CompoundSet;

/// Builds a deterministic catalog of `n_categories` categories over a
/// population of `n_compounds` compounds
fn synthetic_catalog(n_compounds: usize, n_categories: usize) -> AnnotationCatalog {
    let mut catalog = AnnotationCatalog::new();
    for cat in 0..n_categories {
        let members: CompoundSet = (0..n_compounds)
            .filter(|i| (i + cat) % (cat % 17 + 3) == 0)
            .map(|i| format!("C{i:05}"))
            .collect();
        catalog
            .insert(Category::new(&format!("category-{cat:03}"), members))
            .unwrap();
    }
    catalog
}

fn sequential(query: &CompoundSet, catalog: &AnnotationCatalog, background: &CompoundSet) -> usize {
    let rows = category_enrichment(query, catalog, background).unwrap();
    let pvalues: Vec<f64> = rows.iter().map(|row| row.pvalue()).collect();
    let fdr = correction::benjamini_hochberg(&pvalues).unwrap();
    fdr.iter().filter(|q| **q < 0.05).count()
}

fn parallel(query: &CompoundSet, catalog: &AnnotationCatalog, background: &CompoundSet) -> usize {
    let pvalues: Vec<f64> = catalog
        .iter()
        .collect::<Vec<_>>()
        .par_iter()
        .map(|category| {
            fisher::evaluate(query, category.compounds(), background)
                .unwrap()
                .pvalue()
        })
        .collect();
    let fdr = correction::benjamini_hochberg(&pvalues).unwrap();
    fdr.iter().filter(|q| **q < 0.05).count()
}

fn enrichment_benchmark(c: &mut Criterion) {
    let background: CompoundSet = (0..2000).map(|i| format!("C{i:05}")).collect();
    let query: CompoundSet = (0..2000)
        .filter(|i| i % 7 == 0)
        .map(|i| format!("C{i:05}"))
        .collect();
    let catalog = synthetic_catalog(2000, 250);

    c.bench_function("enrichment 250 categories", |b| {
        b.iter(|| {
            sequential(
                black_box(&query),
                black_box(&catalog),
                black_box(&background),
            )
        })
    });

    c.bench_function("enrichment-parallel 250 categories", |b| {
        b.iter(|| {
            parallel(
                black_box(&query),
                black_box(&catalog),
                black_box(&background),
            )
        })
    });
}

criterion_group!(enrichment, enrichment_benchmark);
criterion_main!(enrichment);
