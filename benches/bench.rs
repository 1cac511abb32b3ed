use bencher::{benchmark_group, benchmark_main, black_box, Bencher};
use intfp::{ewma_div, loc, pseudo_log, radix, Radix};
use rand::{rngs::SmallRng, FromEntropy, Rng};

//----

fn loc_encode_100_values(bench: &mut Bencher) {
    let mut rng = SmallRng::from_entropy();
    bench.iter(|| {
        let v = rng.gen::<u64>();
        for _ in 0..100 {
            black_box(loc::encode_max::<u64, u16>(black_box(v)));
        }
    });
}

fn loc_decode_100_values(bench: &mut Bencher) {
    let mut rng = SmallRng::from_entropy();
    bench.iter(|| {
        let v = rng.gen::<u16>();
        for _ in 0..100 {
            black_box(loc::decode_max::<u64, u16>(black_box(v)));
        }
    });
}

fn log_encode_100_values(bench: &mut Bencher) {
    let mut rng = SmallRng::from_entropy();
    bench.iter(|| {
        let v = rng.gen::<u64>();
        for _ in 0..100 {
            black_box(pseudo_log::encode_max::<u64, u32>(black_box(v)));
        }
    });
}

fn log_decode_100_values(bench: &mut Bencher) {
    let mut rng = SmallRng::from_entropy();
    bench.iter(|| {
        let v = rng.gen::<i32>();
        for _ in 0..100 {
            black_box(pseudo_log::decode_max::<u64, u32>(black_box(v)));
        }
    });
}

fn log_mul_100_values(bench: &mut Bencher) {
    let mut rng = SmallRng::from_entropy();
    bench.iter(|| {
        let a = pseudo_log::encode_max::<u64, u32>(rng.gen::<u32>() as u64);
        let b = pseudo_log::encode_max::<u64, u32>(rng.gen::<u32>() as u64);
        for _ in 0..100 {
            black_box(pseudo_log::decode_max::<u64, u32>(pseudo_log::mul(
                black_box(a),
                black_box(b),
            )));
        }
    });
}

fn to_radix_100_values(bench: &mut Bencher) {
    let mut rng = SmallRng::from_entropy();
    bench.iter(|| {
        let v = rng.gen::<i32>();
        for _ in 0..100 {
            black_box(radix::to_radix(black_box(v), Radix::DbPower));
        }
    });
}

fn ewma_div_100_values(bench: &mut Bencher) {
    let mut rng = SmallRng::from_entropy();
    bench.iter(|| {
        let mut average = 0i32;
        for _ in 0..100 {
            let sample = rng.gen_range(0, 1 << 20);
            average = ewma_div(black_box(sample), average, 0, 16);
        }
        black_box(average);
    });
}

//----

benchmark_group!(
    benches,
    loc_encode_100_values,
    loc_decode_100_values,
    log_encode_100_values,
    log_decode_100_values,
    log_mul_100_values,
    to_radix_100_values,
    ewma_div_100_values,
);
benchmark_main!(benches);
