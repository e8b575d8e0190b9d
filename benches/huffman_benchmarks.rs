use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use huffzip::compression::huffman::{huffman_compress, huffman_decompress};

fn criterion_benchmark(c: &mut Criterion) {
    let mut rng = ChaCha20Rng::seed_from_u64(7);
    let input: Vec<u8> = (0..65536).map(|_| rng.gen()).collect();

    c.bench_function("huffman compress 64k", |b| {
        b.iter(|| huffman_compress(black_box(&input)).unwrap())
    });

    let (payload, table) = huffman_compress(&input).unwrap();
    c.bench_function("huffman decompress 64k", |b| {
        b.iter(|| huffman_decompress(black_box(&payload), &table).unwrap())
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
