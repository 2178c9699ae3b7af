use criterion::{criterion_group, criterion_main};


criterion_group!(
    benches,
    encode::bench_connect,
    encode::bench_publish,
    encode::bench_subscribe,
    encode::bench_remaining_length
);
criterion_main!(benches);
