use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tagmark_core::lexer::Lexer;
use tagmark_core::standard::StandardTags;
use tagmark_core::{deserialize, serialize, TagMark};

// ============================================================================
// Test Data: Varying Complexity and Size
// ============================================================================

const TINY_MARKUP: &str = "<red>hello</red>";

const SMALL_MARKUP: &str =
    "<gray>[<gold>Server</gold>]</gray> <red>Alice</red> joined the game";

const MEDIUM_MARKUP: &str = "<gray>=== <bold><gold>Daily Rewards</gold></bold> ===</gray>\
<newline><yellow>Streak: <bold>12 days</bold></yellow>\
<newline><click:run_command:'/claim'><green><bold>[CLAIM]</bold></green></click> \
<hover:show_text:'Resets at midnight'><italic>expires soon</italic></hover>\
<newline><gradient:#ff0000:#ffaa00>Thanks for playing!</gradient>";

const LARGE_MARKUP: &str = "<gray>+-------------------------------+</gray>\
<newline><gray>|</gray> <rainbow>SKYBLOCK LEADERBOARD</rainbow> <gray>|</gray>\
<newline><gray>+-------------------------------+</gray>\
<newline><gold>1.</gold> <red>Alice</red> <gray>-</gray> <yellow>1,204,556</yellow>\
<newline><gold>2.</gold> <blue>Bob</blue> <gray>-</gray> <yellow>988,102</yellow>\
<newline><gold>3.</gold> <green>Charlie</green> <gray>-</gray> <yellow>850,773</yellow>\
<newline><gold>4.</gold> <aqua>David</aqua> <gray>-</gray> <yellow>720,431</yellow>\
<newline><gold>5.</gold> <light_purple>Eve</light_purple> <gray>-</gray> <yellow>698,220</yellow>\
<newline><click:run_command:'/lb next'><gray>[<white>Next Page</white>]</gray></click> \
<hover:show_text:'Updated every 5 minutes'><dark_gray><italic>(?)</italic></dark_gray></hover>\
<newline><gradient:#00ffaa:#0055ff:#aa00ff>May the odds be ever in your favor</gradient>";

// Generate a long chat log line-by-line for stress testing
fn generate_chat_log(lines: usize) -> String {
    let mut markup = String::new();
    for i in 0..lines {
        markup.push_str(&format!(
            "<gray>[{:02}:{:02}]</gray> <{}>player{}</{}>: message number {}<newline>",
            i / 60,
            i % 60,
            if i % 2 == 0 { "red" } else { "blue" },
            i,
            if i % 2 == 0 { "red" } else { "blue" },
            i
        ));
    }
    markup
}

// ============================================================================
// Lexer Benchmarks
// ============================================================================

fn bench_lexer_tiny(c: &mut Criterion) {
    c.bench_function("lexer_tiny", |b| {
        b.iter(|| {
            let mut lexer = Lexer::new(black_box(TINY_MARKUP));
            lexer.lex()
        })
    });
}

fn bench_lexer_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_by_size");

    for (name, source) in [
        ("tiny", TINY_MARKUP),
        ("small", SMALL_MARKUP),
        ("medium", MEDIUM_MARKUP),
        ("large", LARGE_MARKUP),
    ] {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), source, |b, src| {
            b.iter(|| {
                let mut lexer = Lexer::new(black_box(src));
                lexer.lex()
            })
        });
    }

    group.finish();
}

fn bench_lexer_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_line_scaling");

    for size in [10, 50, 100, 500, 1000] {
        let source = generate_chat_log(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &source, |b, src| {
            b.iter(|| {
                let mut lexer = Lexer::new(black_box(src));
                lexer.lex()
            })
        });
    }

    group.finish();
}

// ============================================================================
// End-to-End Deserialization Benchmarks
// ============================================================================

fn bench_deserialize_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("deserialize_by_size");

    for (name, source) in [
        ("tiny", TINY_MARKUP),
        ("small", SMALL_MARKUP),
        ("medium", MEDIUM_MARKUP),
        ("large", LARGE_MARKUP),
    ] {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), source, |b, src| {
            b.iter(|| deserialize(black_box(src)).unwrap())
        });
    }

    group.finish();
}

fn bench_deserialize_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("deserialize_line_scaling");

    for size in [10, 50, 100, 500, 1000] {
        let source = generate_chat_log(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &source, |b, src| {
            b.iter(|| deserialize(black_box(src)).unwrap())
        });
    }

    group.finish();
}

fn bench_strict_vs_lenient(c: &mut Criterion) {
    let mut group = c.benchmark_group("deserialize_modes");
    let strict = TagMark::builder().strict(true).build();
    let lenient = TagMark::new();

    // Strict mode needs every tag closed, so both run the small input.
    group.throughput(Throughput::Bytes(SMALL_MARKUP.len() as u64));
    group.bench_function("lenient", |b| {
        b.iter(|| lenient.deserialize(black_box(SMALL_MARKUP)).unwrap())
    });
    group.bench_function("strict", |b| {
        b.iter(|| strict.deserialize(black_box(SMALL_MARKUP)).unwrap())
    });

    group.finish();
}

fn bench_gradient_cost(c: &mut Criterion) {
    let mut group = c.benchmark_group("fancy_effects");
    let text: String = "x".repeat(256);
    let gradient = format!("<gradient:#ff0000:#00ff00:#0000ff>{text}");
    let rainbow = format!("<rainbow>{text}");

    group.throughput(Throughput::Elements(256));
    group.bench_function("gradient_256_chars", |b| {
        b.iter(|| deserialize(black_box(&gradient)).unwrap())
    });
    group.bench_function("rainbow_256_chars", |b| {
        b.iter(|| deserialize(black_box(&rainbow)).unwrap())
    });

    group.finish();
}

// ============================================================================
// Serialization Benchmarks
// ============================================================================

fn bench_serialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize_by_size");

    for (name, source) in [
        ("tiny", TINY_MARKUP),
        ("small", SMALL_MARKUP),
        ("large", LARGE_MARKUP),
    ] {
        let tree = deserialize(source).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(name), &tree, |b, tree| {
            b.iter(|| serialize(black_box(tree)))
        });
    }

    group.finish();
}

// ============================================================================
// Parser Benchmarks (tokenizing plus tree building, no resolution)
// ============================================================================

fn bench_parse_only(c: &mut Criterion) {
    use tagmark_core::parser::Parser;

    let mut group = c.benchmark_group("parse_by_size");

    for (name, source) in [
        ("tiny", TINY_MARKUP),
        ("small", SMALL_MARKUP),
        ("medium", MEDIUM_MARKUP),
        ("large", LARGE_MARKUP),
    ] {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), source, |b, src| {
            b.iter(|| {
                let parser = Parser::new(black_box(src), &StandardTags, false).unwrap();
                parser.parse()
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_lexer_tiny,
    bench_lexer_sizes,
    bench_lexer_scaling,
    bench_parse_only,
    bench_deserialize_sizes,
    bench_deserialize_scaling,
    bench_strict_vs_lenient,
    bench_gradient_cost,
    bench_serialize
);
criterion_main!(benches);
