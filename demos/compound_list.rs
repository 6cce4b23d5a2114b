use std::process;

use msea::parser::{annotation_table, compound_list};
use msea::stats::{category_enrichment, correction, Enrichment};

fn main() {
    simple_logger::SimpleLogger::new().init().unwrap();

    let mut args = std::env::args();
    if args.len() < 4 {
        println!("Run an enrichment analysis from plain-text input files\n");
        println!("Usage\ncompound_list <QUERY> <BACKGROUND> <ANNOTATION TABLE> [FDR CUTOFF]");
        println!("\nQUERY and BACKGROUND are newline-delimited compound lists,");
        println!("ANNOTATION TABLE is tab-separated `compound<TAB>category` rows\n");
        process::exit(1)
    }

    let query = compound_list::from_file(args.nth(1).unwrap()).unwrap();
    if query.is_empty() {
        eprintln!("The query compound list is empty");
        process::exit(1)
    }
    let background = compound_list::from_file(args.next().unwrap()).unwrap();
    let catalog = annotation_table::from_file(args.next().unwrap()).unwrap();

    let cutoff = args
        .next()
        .map(|arg| arg.parse::<f64>().unwrap_or(0.05))
        .unwrap_or(0.05);

    let rows = category_enrichment(&query, &catalog, &background).unwrap();
    let pvalues: Vec<f64> = rows.iter().map(Enrichment::pvalue).collect();
    let fdr = correction::benjamini_hochberg(&pvalues).unwrap();

    let mut table: Vec<(&Enrichment, f64)> = rows
        .iter()
        .zip(fdr)
        .filter(|(_, fdr)| *fdr < cutoff)
        .collect();
    table.sort_by(|a, b| {
        a.0.pvalue()
            .partial_cmp(&b.0.pvalue())
            .expect("nan must not appear as p-value")
    });

    println!("category\tpvalue\tFDR\tcount\tsize");
    for (row, fdr) in table {
        println!(
            "{}\t{:e}\t{:e}\t{}\t{}",
            row.name(),
            row.pvalue(),
            fdr,
            row.count(),
            row.category_size()
        );
    }
}
