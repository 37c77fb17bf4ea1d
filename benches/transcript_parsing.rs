use std::hint::black_box;

use chat_history_explorer::parse_transcript;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

const SENDERS: [&str; 4] = ["Alice", "Bob", "Carol Smith", "Dr. Dave"];

/// Generate a synthetic transcript with N lines
///
/// Mixes plain messages, multiline bodies, notifications and the occasional corrupt date.
fn generate_transcript(num_lines: usize) -> String {
    let mut text = String::with_capacity(num_lines * 48);
    for i in 0..num_lines {
        let day = (i / 200) % 28 + 1;
        let month = (i / 5600) % 12 + 1;
        let (hour, minute) = ((i / 60) % 24, i % 60);
        let stamp = if i % 500 == 499 {
            format!("{:02}/13/2023, {:02}:{:02} - ", day, hour, minute)
        } else {
            format!("{:02}/{:02}/2023, {:02}:{:02} - ", day, month, hour, minute)
        };

        let line = match i % 10 {
            0 => format!("{}{} added {}\n", stamp, SENDERS[0], SENDERS[i % 4]),
            1 => format!("{}{}: first line\nsecond line of {}\n", stamp, SENDERS[i % 4], i),
            _ => format!("{}{}: message number {} 😂\n", stamp, SENDERS[i % 4], i),
        };
        text.push_str(&line);
    }
    text
}

fn bench_parse_transcript(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_transcript");

    for size in [100, 1_000, 10_000, 50_000].iter() {
        let text = generate_transcript(*size);

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| parse_transcript(black_box(&text)));
        });
    }

    group.finish();
}

fn bench_line_scan_fallback(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_transcript_line_scan");

    for size in [100, 1_000, 10_000].iter() {
        // Without the ", HH:MM - " part no grammar matches
        let text: String = (0..*size)
            .map(|i| format!("{:02}.01.2023 {}: note {}\n", i % 28 + 1, SENDERS[i % 4], i))
            .collect();

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| parse_transcript(black_box(&text)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse_transcript, bench_line_scan_fallback);
criterion_main!(benches);
