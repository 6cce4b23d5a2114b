use msea::annotations::{AnnotationCatalog, Category};
use msea::stats::{category_enrichment, correction, Enrichment};
use msea::CompoundSet;

/// Builds a small annotation catalog inline, the way an orchestrator
/// would assemble it from its annotation store
fn catalog() -> AnnotationCatalog {
    let mut catalog = AnnotationCatalog::new();
    for (name, members) in [
        ("TCA cycle", vec!["B", "C", "D", "E"]),
        ("fatty acids", vec!["F", "G", "H"]),
        ("amino acids", vec!["A", "B", "I"]),
        ("unrelated", vec!["X", "Y", "Z"]),
    ] {
        catalog
            .insert(Category::new(name, members.into_iter().collect()))
            .expect("inline catalog has unique names");
    }
    catalog
}

fn main() {
    simple_logger::SimpleLogger::new().init().unwrap();

    let query: CompoundSet = ["A", "B", "C", "D", "E"].into_iter().collect();
    let background: CompoundSet = ["A", "B", "C", "D", "E", "F", "G", "H", "I"]
        .into_iter()
        .collect();
    let catalog = catalog();

    let rows = category_enrichment(&query, &catalog, &background).unwrap();
    let pvalues: Vec<f64> = rows.iter().map(Enrichment::pvalue).collect();
    let fdr = correction::benjamini_hochberg(&pvalues).unwrap();

    let mut table: Vec<(&Enrichment, f64)> = rows.iter().zip(fdr).collect();
    table.sort_by(|a, b| {
        a.0.pvalue()
            .partial_cmp(&b.0.pvalue())
            .expect("nan must not appear as p-value")
    });

    println!("category\tpvalue\tFDR\tcount\tsize");
    for (row, fdr) in table {
        println!(
            "{}\t{:.4}\t{:.4}\t{}\t{}",
            row.name(),
            row.pvalue(),
            fdr,
            row.count(),
            row.category_size()
        );
    }
}
