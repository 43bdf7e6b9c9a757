//! Benchmarks for the highlight scanner and cursor mapping
//!
//! Run with: cargo bench --bench highlighting

use stanza::syntax::{scan_row, SyntaxRegistry};
use stanza::Buffer;

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

const C_SAMPLE: &[&str] = &[
    "#include <stdio.h>",
    "",
    "/* sum the first n integers,",
    "   the slow way */",
    "static int sum(int n) {",
    "\tint total = 0;",
    "\tfor (int i = 0; i < n; i++) {",
    "\t\ttotal += i;",
    "\t}",
    "\treturn total;",
    "}",
    "",
    "int main(void) {",
    "\tprintf(\"%d\\n\", sum(100));",
    "\treturn 0;",
    "}",
];

fn c_profile() -> stanza::LanguageProfile {
    SyntaxRegistry::with_builtin_profiles()
        .unwrap()
        .select_profile("main.c")
        .unwrap()
        .clone()
}

#[divan::bench]
fn scan_c_sample(bencher: divan::Bencher) {
    let profile = c_profile();
    let buffer = Buffer::from_lines(Some(profile.clone()), C_SAMPLE.iter().copied());
    let renders: Vec<String> = buffer
        .rows()
        .iter()
        .map(|row| row.render().to_string())
        .collect();

    bencher.bench(|| {
        let mut open = false;
        for render in &renders {
            let (hl, next) = scan_row(render, open, Some(&profile));
            divan::black_box(hl);
            open = next;
        }
    });
}

#[divan::bench]
fn rebuild_buffer(bencher: divan::Bencher) {
    let profile = c_profile();
    bencher.bench(|| {
        divan::black_box(Buffer::from_lines(
            Some(profile.clone()),
            C_SAMPLE.iter().copied(),
        ))
    });
}

#[divan::bench]
fn cursor_mapping(bencher: divan::Bencher) {
    let buffer = Buffer::from_lines(Some(c_profile()), C_SAMPLE.iter().copied());
    bencher.bench(|| {
        for row in buffer.rows() {
            for cx in 0..=row.text().len() {
                divan::black_box(row.rx_to_cx(row.cx_to_rx(cx)));
            }
        }
    });
}
