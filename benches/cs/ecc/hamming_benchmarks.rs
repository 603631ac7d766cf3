use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{Rng, SeedableRng};
use secded::cs::ecc::bits::{BitSequenceMut, PackedBits};
use secded::cs::ecc::hamming::{decode, encode, Codeword};

fn random_data(len: usize) -> Codeword {
    let mut rng = rand::rngs::StdRng::seed_from_u64(0xC0DE);
    (0..len).map(|_| rng.gen_bool(0.5)).collect()
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("secded_encode");
    for &bits in &[64usize, 1024, 16 * 1024, 256 * 1024] {
        let data = random_data(bits);
        group.throughput(Throughput::Elements(bits as u64));
        group.bench_with_input(BenchmarkId::from_parameter(bits), &data, |b, data| {
            b.iter(|| encode(black_box(data)));
        });
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("secded_decode");
    for &bits in &[64usize, 1024, 16 * 1024, 256 * 1024] {
        let codeword = encode(&random_data(bits));
        let mut corrupted = codeword.clone();
        corrupted.flip_bit(bits / 2);

        group.throughput(Throughput::Elements(bits as u64));
        group.bench_with_input(BenchmarkId::new("clean", bits), &codeword, |b, cw| {
            b.iter(|| decode(black_box(cw)));
        });
        group.bench_with_input(BenchmarkId::new("corrected", bits), &corrupted, |b, cw| {
            b.iter(|| decode(black_box(cw)));
        });
    }
    group.finish();
}

fn bench_packed_word(c: &mut Criterion) {
    let data = PackedBits::new(0xDEAD_BEEF_CAFE_F00Du64, 57).unwrap();
    c.bench_function("secded_encode_packed_u64", |b| {
        b.iter(|| encode(black_box(&data)));
    });
}

criterion_group!(benches, bench_encode, bench_decode, bench_packed_word);
criterion_main!(benches);
