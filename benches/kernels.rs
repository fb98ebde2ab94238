use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use cache_dp::{Aligner, KernelKind};
use rand::{rngs::StdRng, Rng, SeedableRng};
use sysinfo::{get_current_pid, ProcessRefreshKind, System};

fn random_dna(rng: &mut StdRng, len: usize) -> Vec<u8> {
    const ALPHABET: &[u8] = b"ACGT";
    (0..len)
        .map(|_| {
            let idx = rng.gen_range(0..ALPHABET.len());
            ALPHABET[idx]
        })
        .collect()
}

fn rss_kib() -> u64 {
    let mut sys = System::new();
    sys.refresh_processes_specifics(ProcessRefreshKind::new());
    match get_current_pid().ok().and_then(|pid| sys.process(pid)) {
        Some(p) => p.memory() / 1024,
        None => 0,
    }
}

fn bench_kernels(c: &mut Criterion) {
    let aligner = Aligner::new();
    for kind in KernelKind::ALL {
        let mut group = c.benchmark_group(format!("edit_distance_{}", kind.label()));
        for &len in &[256usize, 1_024, 2_048] {
            group.bench_function(format!("len_{len}"), |b| {
                b.iter_batched(
                    || {
                        let mut rng = StdRng::seed_from_u64(42);
                        let s = random_dna(&mut rng, len);
                        let t = random_dna(&mut rng, len);
                        (s, t)
                    },
                    |(s, t)| {
                        let before = rss_kib();
                        let result = aligner.run(kind, &s, &t).expect("alignment failed");
                        let after = rss_kib();
                        criterion::black_box(result.distance);
                        // record memory delta to stderr to avoid criterion noise
                        eprintln!(
                            "RSS KiB delta ({kind} {len}): {}",
                            after.saturating_sub(before)
                        );
                    },
                    BatchSize::PerIteration,
                )
            });
        }
        group.finish();
    }
}

criterion_group!(benches, bench_kernels);
criterion_main!(benches);
