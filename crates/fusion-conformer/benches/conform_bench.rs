//! Conformer benchmarks.
//!
//! Measures whole-pipeline conform time for typical page scripts and for
//! generated fragments of increasing size.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use fusion_conformer::{Conformer, PassKind};

/// A small procedural page.
const PROCEDURAL_PAGE: &str = r#"
use App\Models\Podcast;

$podcast = prop(Podcast::first())->readonly();
$title = prop('Untitled');

mount(fn(Podcast $podcast) => $podcast);

expose(favorite: function () use ($podcast) {
    $podcast->favorite();
}, rename: fn(string $title) => $podcast->update(['title' => $title]));
"#;

/// A page written as a class.
const CLASS_PAGE: &str = r#"
use App\Models\User;

new class {
    public string $name = 'Aaron';

    public function validateUser(User $user): bool
    {
        return $user->isActive();
    }
}
"#;

/// Generate a procedural fragment with `props` props and one action each.
fn generate_page(props: usize) -> String {
    let mut source = String::with_capacity(props * 120);
    for i in 0..props {
        source.push_str(&format!("$value{i} = prop({i})->readonly();\n"));
        source.push_str(&format!(
            "if ($value{i} > 10) {{\n    $value{i} = min($value{i}, 100);\n}}\n"
        ));
    }
    source.push_str("expose(");
    for i in 0..props {
        if i > 0 {
            source.push_str(", ");
        }
        source.push_str(&format!("action{i}: fn(int $n) => $n + {i}"));
    }
    source.push_str(");\n");
    source
}

fn conform(source: &str) -> String {
    Conformer::new(source)
        .with_destination("Pages/Bench.php")
        .conform()
        .unwrap_or_default()
}

// =============================================================================
// Conform Benchmarks
// =============================================================================

fn bench_conform_pages(c: &mut Criterion) {
    c.bench_function("conform_procedural_page", |b| {
        b.iter(|| black_box(conform(black_box(PROCEDURAL_PAGE))))
    });
    c.bench_function("conform_class_page", |b| {
        b.iter(|| black_box(conform(black_box(CLASS_PAGE))))
    });
}

/// Parse and print only, as a baseline for the pass cost.
fn bench_parse_print(c: &mut Criterion) {
    c.bench_function("parse_print_procedural_page", |b| {
        b.iter(|| {
            black_box(
                Conformer::new(black_box(PROCEDURAL_PAGE))
                    .with_pipeline(Vec::new())
                    .conform()
                    .unwrap_or_default(),
            )
        })
    });
}

fn bench_single_passes(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_pass");
    let source = generate_page(50);
    for kind in [PassKind::Procedural, PassKind::Prop, PassKind::Expose] {
        group.bench_with_input(BenchmarkId::from_parameter(kind.name()), &source, |b, source| {
            b.iter(|| {
                black_box(
                    Conformer::new(source.as_str())
                        .with_pipeline(vec![kind])
                        .conform()
                        .unwrap_or_default(),
                )
            })
        });
    }
    group.finish();
}

fn bench_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("conform_scaling");
    for props in [10, 100, 500] {
        let source = generate_page(props);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(props), &source, |b, source| {
            b.iter(|| black_box(conform(source)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_conform_pages,
    bench_parse_print,
    bench_single_passes,
    bench_scaling
);
criterion_main!(benches);
