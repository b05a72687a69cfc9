use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ens_normalize::EnsNormalizer;

#[path = "../tests/common/mod.rs"]
mod common;

const WARM_UP_TIME: u64 = 3;
const MEASUREMENT_TIME: u64 = 7;

/// (name, input)
fn inputs() -> Vec<(&'static str, String)>
{
    vec![
        ("ascii", "nick.eth".repeat(8)),
        ("mapped", "Nick.ETH".repeat(8)),
        ("latin", "\u{1EA1}\u{302}b\u{E9}c.eth".repeat(8)),
        ("greek", "\u{3B1}\u{3B2}\u{3BE}".repeat(16)),
        ("hangul", "\u{1100}\u{1161}\u{11A8}\u{AC00}".repeat(16)),
        ("emoji", "\u{2764}\u{FE0F}\u{1F44D}\u{1F3FB}\u{1F680}".repeat(8)),
        ("invalid", format!("{}\u{430}", "a".repeat(64))),
    ]
}

macro_rules! group {
    ($fn: ident, $group: expr, $method: ident) => {
        fn $fn(c: &mut Criterion)
        {
            let mut group = c.benchmark_group($group);
            let normalizer: EnsNormalizer = common::normalizer();

            group.warm_up_time(core::time::Duration::from_secs(WARM_UP_TIME));
            group.measurement_time(core::time::Duration::from_secs(MEASUREMENT_TIME));

            for (name, input) in inputs() {
                group.bench_with_input(BenchmarkId::new($group, name), &input, |b, input| {
                    b.iter(|| normalizer.$method(black_box(input)).is_ok())
                });
            }

            group.finish();
        }
    };
}

group!(normalize, "normalize", normalize);
group!(beautify, "beautify", beautify);

fn decode(c: &mut Criterion)
{
    let nf = common::nf_table();
    let spec = common::spec_table();

    c.bench_function("decode tables", |b| {
        b.iter(|| EnsNormalizer::from_bytes(black_box(&nf), black_box(&spec)).is_ok())
    });
}

criterion_group!(benches, normalize, beautify, decode);
criterion_main!(benches);
