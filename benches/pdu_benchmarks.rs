// ABOUTME: Benchmark suite for the SMS PDU codec
// ABOUTME: Measures parse, create and text-split throughput on realistic inputs

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use sms_pdu::{PduType, SmsEncoding, SmsPart, create_submit_pdu, parse_pdu, split_text};
use std::time::Duration;

const DELIVER_GSM7: &str =
    "07912143658709f1040b918100551512f20000111010214365000ae8329bfd4697d9ec37";

const DELIVER_UCS2: &str = concat!(
    "07919730071111f1",
    "04",
    "14d04937bd2c7797e9d3e614",
    "0008",
    "11309291024061",
    "08",
    "0442043504410442",
);

fn sample_submit() -> SmsPart {
    let mut part = SmsPart::new(0, PduType::Submit);
    part.smsc = Some("+19037029920".to_string());
    part.number = "+15555551234".to_string();
    part.set_text(
        "Hi there...Tue 17th Jan 2012 05:30.18 pm (GMT+1) ΔΔΔΔΔ",
        SmsEncoding::Gsm7,
    );
    part.validity_relative = Some(5);
    part
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    group.measurement_time(Duration::from_secs(5));

    group.bench_function(BenchmarkId::new("deliver", "gsm7"), |b| {
        b.iter(|| parse_pdu(0, black_box(DELIVER_GSM7)).unwrap())
    });
    group.bench_function(BenchmarkId::new("deliver", "ucs2"), |b| {
        b.iter(|| parse_pdu(0, black_box(DELIVER_UCS2)).unwrap())
    });

    group.finish();
}

fn bench_create(c: &mut Criterion) {
    let part = sample_submit();
    c.bench_function("create/submit_gsm7", |b| {
        b.iter(|| create_submit_pdu(black_box(&part)).unwrap())
    });
}

fn bench_split(c: &mut Criterion) {
    let long_gsm7: String = "The quick brown fox jumps over the lazy dog. "
        .chars()
        .cycle()
        .take(500)
        .collect();
    let long_ucs2: String = "выше выше и выше ".chars().cycle().take(300).collect();

    let mut group = c.benchmark_group("split");
    group.bench_function(BenchmarkId::new("text", "gsm7"), |b| {
        b.iter(|| split_text(black_box(&long_gsm7)))
    });
    group.bench_function(BenchmarkId::new("text", "ucs2"), |b| {
        b.iter(|| split_text(black_box(&long_ucs2)))
    });
    group.finish();
}

criterion_group!(benches, bench_parse, bench_create, bench_split);
criterion_main!(benches);
