//! Scanner throughput benchmark.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use jsonfill_scanner::{ScannerState, SyntaxKind};

fn sample_document(entries: usize) -> String {
    let mut out = String::from("{\n");
    for i in 0..entries {
        out.push_str(&format!(
            "  \"key_{i}\": {{\"id\": {i}, \"name\": \"item {i}\", \"active\": true, \"tags\": [\"a\", \"b\"]}},\n"
        ));
    }
    out.push('}');
    out
}

fn scan_all(text: &str) -> usize {
    let mut scanner = ScannerState::new(text, true);
    let mut count = 0;
    while scanner.scan() != SyntaxKind::EndOfFileToken {
        count += 1;
    }
    count
}

fn bench_scanner(c: &mut Criterion) {
    let doc = sample_document(500);
    c.bench_function("scan_500_entries", |b| {
        b.iter(|| scan_all(black_box(&doc)))
    });
}

criterion_group!(benches, bench_scanner);
criterion_main!(benches);
