use std::env;
use std::time::Instant;

use cache_dp::cost::substitution_cost;
use cache_dp::{Aligner, KernelKind};
use sysinfo::{get_current_pid, ProcessRefreshKind, System};

const SIZES: &[usize] = &[64, 128, 256, 512, 1024, 2048, 4096, 8192];

fn main() {
    let options = match Options::parse(env::args().skip(1)) {
        Ok(opts) => opts,
        Err(err) => {
            eprintln!("kernel_probe: {err}");
            Options::print_help();
            std::process::exit(2);
        }
    };

    eprintln!("\n{}", "=".repeat(80));
    eprintln!("Edit-distance kernel probe");
    eprintln!("{}", "=".repeat(80));
    eprintln!("  • kernels: iterative, cache_aware (Z={}, L={}), cache_oblivious", options.capacity, options.line_size);
    eprintln!("  • verification against a full-table baseline up to size {}", options.verify_limit);
    eprintln!("  • ops = recurrence evaluations, accesses = DP storage reads/writes");
    eprintln!();

    let aligner = match Aligner::builder()
        .with_cache_capacity(options.capacity)
        .with_line_size(options.line_size)
        .build()
    {
        Ok(a) => a,
        Err(err) => {
            eprintln!("kernel_probe: {err}");
            std::process::exit(2);
        }
    };

    let mut sys = System::new();
    let mut measurements = Vec::new();
    let total = SIZES.len();
    for (idx, &len) in SIZES.iter().enumerate() {
        eprintln!("[{}/{}] len={len}", idx + 1, total);
        let x = deterministic_dna(len);
        let y = deterministic_dna_offset(len, 3);
        let baseline = (len <= options.verify_limit).then(|| full_table_distance(&x, &y));
        for kind in KernelKind::ALL {
            let m = measure(kind, len, &mut sys, || aligner.run(kind, &x, &y), baseline);
            let status_icon = match m.verification_status {
                VerificationStatus::Passed => "✓",
                VerificationStatus::Failed => "✗",
                VerificationStatus::NotChecked => "○",
            };
            eprintln!(
                "      {} {:<16} distance={}, ops={}, accesses={}, time={:.3}s",
                status_icon,
                kind.label(),
                m.distance.map_or_else(|| "-".to_string(), |d| d.to_string()),
                m.operations,
                m.memory_accesses,
                m.wall_s
            );
            measurements.push(m);
        }
    }

    let failed = measurements
        .iter()
        .filter(|m| matches!(m.verification_status, VerificationStatus::Failed))
        .count();
    eprintln!();
    if failed == 0 {
        eprintln!("✓ All verified runs matched the baseline.");
    } else {
        eprintln!("✗ {failed} run(s) failed verification.");
    }
    eprintln!();

    if let Err(err) = options.format.write(&measurements) {
        eprintln!("kernel_probe output error: {err}");
        std::process::exit(1);
    }
    if failed > 0 {
        std::process::exit(1);
    }
}

struct Options {
    format: OutputFormat,
    verify_limit: usize,
    capacity: usize,
    line_size: usize,
}

impl Options {
    fn parse<I, T>(mut args: I) -> Result<Self, String>
    where
        I: Iterator<Item = T>,
        T: Into<String>,
    {
        let mut format = OutputFormat::Csv;
        let mut verify_limit = 1024usize;
        let mut capacity = cache_dp::builder::DEFAULT_CACHE_CAPACITY;
        let mut line_size = cache_dp::builder::DEFAULT_LINE_SIZE;

        while let Some(arg) = args.next() {
            let arg = arg.into();
            let (flag, inline) = match arg.split_once('=') {
                Some((flag, value)) => (flag.to_string(), Some(value.to_string())),
                None => (arg.clone(), None),
            };
            if flag == "--help" || flag == "-h" {
                Options::print_help();
                std::process::exit(0);
            }
            let mut value = || -> Result<String, String> {
                match inline.clone() {
                    Some(v) => Ok(v),
                    None => args
                        .next()
                        .map(Into::into)
                        .ok_or_else(|| format!("missing value after {flag}")),
                }
            };
            match flag.as_str() {
                "--format" => format = OutputFormat::from_str(&value()?)?,
                "--verify-limit" => verify_limit = parse_count("verify limit", &value()?)?,
                "--capacity" => capacity = parse_count("capacity", &value()?)?,
                "--line-size" => line_size = parse_count("line size", &value()?)?,
                _ => return Err(format!("unrecognized argument '{arg}'")),
            }
        }

        Ok(Self {
            format,
            verify_limit,
            capacity,
            line_size,
        })
    }

    fn print_help() {
        println!(
            "\
Usage: cargo run --bin kernel_probe [-- <options>]

Options:
  --format <csv|table|json>     Output format (default: csv)
  --verify-limit <N>            Largest length checked against a full-table baseline (default: 1024)
  --capacity <bytes>            Cache capacity for the cache-aware kernel (default: 4096)
  --line-size <bytes>           Cache line size for the cache-aware kernel (default: 64)
  -h, --help                    Print this help message
"
        );
    }
}

fn parse_count(what: &str, value: &str) -> Result<usize, String> {
    value
        .parse::<usize>()
        .map_err(|_| format!("{what} must be a non-negative integer"))
}

#[derive(Copy, Clone)]
enum OutputFormat {
    Csv,
    Table,
    Json,
}

impl OutputFormat {
    fn from_str(value: &str) -> Result<Self, String> {
        match value {
            "csv" => Ok(Self::Csv),
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown format '{other}'")),
        }
    }

    fn write(self, measurements: &[Measurement]) -> Result<(), String> {
        match self {
            OutputFormat::Csv => write_csv(measurements),
            OutputFormat::Table => write_table(measurements),
            OutputFormat::Json => write_json(measurements),
        }
    }
}

struct Measurement {
    kernel: KernelKind,
    len: usize,
    distance: Option<u32>,
    operations: u64,
    memory_accesses: u64,
    wall_s: f64,
    rss_delta_kib: u64,
    verification_status: VerificationStatus,
    verification_detail: Option<String>,
}

#[derive(Clone, Copy)]
enum VerificationStatus {
    NotChecked,
    Passed,
    Failed,
}

impl VerificationStatus {
    fn label(&self) -> &'static str {
        match self {
            VerificationStatus::NotChecked => "not_checked",
            VerificationStatus::Passed => "passed",
            VerificationStatus::Failed => "failed",
        }
    }
}

fn measure<F>(
    kernel: KernelKind,
    len: usize,
    sys: &mut System,
    compute: F,
    baseline: Option<u32>,
) -> Measurement
where
    F: FnOnce() -> cache_dp::Result<cache_dp::AlignmentResult>,
{
    let before = rss_kib(sys);
    let start = Instant::now();
    let outcome = compute();
    let duration = start.elapsed();
    let after = rss_kib(sys);

    let mut m = Measurement {
        kernel,
        len,
        distance: None,
        operations: 0,
        memory_accesses: 0,
        wall_s: duration.as_secs_f64(),
        rss_delta_kib: after.saturating_sub(before),
        verification_status: VerificationStatus::NotChecked,
        verification_detail: None,
    };
    match outcome {
        Ok(result) => {
            m.distance = Some(result.distance);
            m.operations = result.operations;
            m.memory_accesses = result.memory_accesses;
            if let Some(expected) = baseline {
                if expected == result.distance {
                    m.verification_status = VerificationStatus::Passed;
                } else {
                    m.verification_status = VerificationStatus::Failed;
                    m.verification_detail =
                        Some(format!("expected {expected}, got {}", result.distance));
                }
            }
        }
        Err(err) => {
            m.verification_status = VerificationStatus::Failed;
            m.verification_detail = Some(err.to_string());
        }
    }
    m
}

fn write_csv(measurements: &[Measurement]) -> Result<(), String> {
    println!("kernel,len,distance,operations,memory_accesses,wall_s,rss_delta_kib,verification_status,verification_detail");
    for m in measurements {
        let detail = m
            .verification_detail
            .as_ref()
            .map(|s| s.replace('"', "'"))
            .unwrap_or_default();
        println!(
            "{},{},{},{},{},{:.3},{},{},\"{}\"",
            m.kernel.label(),
            m.len,
            m.distance.map(|d| d.to_string()).unwrap_or_default(),
            m.operations,
            m.memory_accesses,
            m.wall_s,
            m.rss_delta_kib,
            m.verification_status.label(),
            detail
        );
    }
    Ok(())
}

fn write_table(measurements: &[Measurement]) -> Result<(), String> {
    println!(
        "{:<16}  {:>6}  {:>9}  {:>12}  {:>14}  {:>8}  {:>13}  {}",
        "kernel", "len", "distance", "operations", "accesses", "wall_s", "rss_delta_kib", "status"
    );
    println!("{}", "-".repeat(100));
    for m in measurements {
        println!(
            "{:<16}  {:>6}  {:>9}  {:>12}  {:>14}  {:>8.3}  {:>13}  {}",
            m.kernel.label(),
            m.len,
            m.distance.map_or_else(|| "-".to_string(), |d| d.to_string()),
            m.operations,
            m.memory_accesses,
            m.wall_s,
            m.rss_delta_kib,
            m.verification_status.label()
        );
    }
    Ok(())
}

fn write_json(measurements: &[Measurement]) -> Result<(), String> {
    println!("[");
    for (idx, m) in measurements.iter().enumerate() {
        let detail = m.verification_detail.as_ref().map(|s| s.replace('"', "'"));
        println!(
            "  {{\"kernel\":\"{}\",\"len\":{},\"distance\":{},\"operations\":{},\"memory_accesses\":{},\"wall_s\":{:.3},\"rss_delta_kib\":{},\"verification\":{{\"status\":\"{}\",\"detail\":{}}}}}{}",
            m.kernel.label(),
            m.len,
            m.distance.map_or_else(|| "null".to_string(), |d| d.to_string()),
            m.operations,
            m.memory_accesses,
            m.wall_s,
            m.rss_delta_kib,
            m.verification_status.label(),
            match detail {
                Some(ref d) => format!("\"{d}\""),
                None => "null".to_string(),
            },
            if idx + 1 == measurements.len() { "" } else { "," }
        );
    }
    println!("]");
    Ok(())
}

fn rss_kib(sys: &mut System) -> u64 {
    sys.refresh_processes_specifics(ProcessRefreshKind::new());
    if let Some(process) = get_current_pid().ok().and_then(|pid| sys.process(pid)) {
        process.memory() / 1024
    } else {
        0
    }
}

fn deterministic_dna(len: usize) -> Vec<u8> {
    const ALPHABET: &[u8] = b"ACGT";
    (0..len).map(|i| ALPHABET[(i * 7 + i / 5) % ALPHABET.len()]).collect()
}

fn deterministic_dna_offset(len: usize, offset: usize) -> Vec<u8> {
    const ALPHABET: &[u8] = b"ACGTN";
    (0..len)
        .map(|i| ALPHABET[(i * 3 + offset) % ALPHABET.len()])
        .collect()
}

fn full_table_distance(x: &[u8], y: &[u8]) -> u32 {
    let (m, n) = (x.len(), y.len());
    let mut dp = vec![vec![0u32; n + 1]; m + 1];
    for i in 0..=m {
        dp[i][0] = 2 * i as u32;
    }
    for j in 0..=n {
        dp[0][j] = 2 * j as u32;
    }
    for i in 1..=m {
        for j in 1..=n {
            let diag = dp[i - 1][j - 1] + substitution_cost(x[i - 1], y[j - 1]);
            let up = dp[i - 1][j] + 2;
            let left = dp[i][j - 1] + 2;
            dp[i][j] = diag.min(up).min(left);
        }
    }
    dp[m][n]
}
