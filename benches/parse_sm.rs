//! Benchmark for simfile parsing and timing queries.

use criterion::{Criterion, Throughput};
use simfile_rs::sm::{command::Row, default_config, parse_sm};

struct SmFile {
    name: String,
    source: String,
}

fn scan_sm_files() -> Vec<SmFile> {
    let dir = "tests/sm/files";

    std::fs::read_dir(dir)
        .expect("Failed to read directory")
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "sm"))
        .filter_map(|path| {
            let name = path
                .file_stem()
                .and_then(|s| s.to_str())
                .map(String::from)?;

            let source = std::fs::read_to_string(&path).expect("Failed to load test file");

            Some(SmFile { name, source })
        })
        .collect()
}

fn bench_parse_sm(c: &mut Criterion, files: &[SmFile]) {
    let mut group = c.benchmark_group("parse_sm");

    for file in files {
        group.throughput(Throughput::Bytes(file.source.len() as u64));
        group.bench_function(&file.name, |b| {
            b.iter(|| {
                parse_sm(
                    std::hint::black_box(&file.source),
                    std::hint::black_box(default_config()),
                )
            });
        });
    }

    group.finish();
}

fn bench_timing_queries(c: &mut Criterion, files: &[SmFile]) {
    let mut group = c.benchmark_group("timing_queries");

    for file in files {
        let Ok(song) = parse_sm(&file.source, default_config()).song else {
            continue;
        };
        group.bench_function(&file.name, |b| {
            b.iter(|| {
                (0..1536).step_by(12).fold(0.0, |sum, row| {
                    let seconds = song.timing.elapsed_seconds_at_row(Row(row));
                    sum + song.timing.beat_at_elapsed_seconds(std::hint::black_box(seconds))
                })
            });
        });
    }

    group.finish();
}

fn main() {
    let files = scan_sm_files();
    let mut criterion = Criterion::default();
    bench_parse_sm(&mut criterion, &files);
    bench_timing_queries(&mut criterion, &files);
}
