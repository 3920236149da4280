use criterion::{
    Criterion, //
    criterion_group,
    criterion_main,
};
use std::hint::black_box;
use utf8_primitive_parsers::*;

fn benchmark_reading_integers(c: &mut Criterion) {
    let mut group = c.benchmark_group("reading_integers");

    group.bench_function("read_u16_max", |b| {
        b.iter(|| read_u16(black_box(b"65535"), 0))
    });

    group.bench_function("read_u32_large", |b| {
        b.iter(|| read_u32(black_box(b"4294967295"), 0))
    });

    group.bench_function("read_u64_large", |b| {
        b.iter(|| read_u64(black_box(b"18446744073709551615"), 0))
    });

    group.bench_function("read_i32_negative", |b| {
        b.iter(|| read_i32(black_box(b"-123456789"), 0))
    });

    group.bench_function("read_i64_min", |b| {
        b.iter(|| read_i64(black_box(b"-9223372036854775808"), 0))
    });

    group.bench_function("read_u32_grouped", |b| {
        b.iter(|| read_u32(black_box(b"4,294,967,295.00"), b'N'))
    });

    group.bench_function("read_u64_hex", |b| {
        b.iter(|| read_u64(black_box(b"DEADBEEFCAFEBABE"), b'X'))
    });

    group.finish();
}

fn benchmark_reading_reals(c: &mut Criterion) {
    let mut group = c.benchmark_group("reading_reals");

    group.bench_function("read_f32_decimal", |b| {
        b.iter(|| read_f32(black_box(b"123.456"), 0))
    });

    group.bench_function("read_f64_decimal", |b| {
        b.iter(|| read_f64(black_box(b"-98765.4321"), 0))
    });

    group.bench_function("read_f64_exponent", |b| {
        b.iter(|| read_f64(black_box(b"6.02214076E23"), b'E'))
    });

    group.bench_function("read_f64_long_significand", |b| {
        b.iter(|| {
            read_f64(
                black_box(b"3.14159265358979323846264338327950288419716939937510582097"),
                0,
            )
        })
    });

    group.bench_function("read_decimal_price", |b| {
        b.iter(|| read_decimal(black_box(b"1234567.8900"), b'F'))
    });

    group.finish();
}

fn benchmark_reading_layouts(c: &mut Criterion) {
    let mut group = c.benchmark_group("reading_layouts");

    group.bench_function("read_bool_true", |b| {
        b.iter(|| read_bool(black_box(b"True"), 0))
    });

    group.bench_function("read_guid_hyphenated", |b| {
        b.iter(|| read_guid(black_box(b"6f9619ff-8b86-d011-b42d-00c04fc964ff"), b'D'))
    });

    group.bench_function("read_guid_digits", |b| {
        b.iter(|| read_guid(black_box(b"6f9619ff8b86d011b42d00c04fc964ff"), b'N'))
    });

    group.bench_function("read_date_time_rfc1123", |b| {
        b.iter(|| read_date_time(black_box(b"Sun, 06 Nov 1994 08:49:37 GMT"), b'R'))
    });

    group.bench_function("read_date_time_round_trip", |b| {
        b.iter(|| read_date_time(black_box(b"2009-06-15T13:45:30.0000070Z"), b'O'))
    });

    group.bench_function("read_date_time_offset_default", |b| {
        b.iter(|| read_date_time_offset(black_box(b"06/15/2009 13:45:30 -07:00"), 0))
    });

    group.bench_function("read_time_span_constant", |b| {
        b.iter(|| read_time_span(black_box(b"10675199.02:48:05.4775807"), b'c'))
    });

    group.finish();
}

fn benchmark_mixed_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed_parsing");

    // One record of a comma-separated log line, advancing by bytes consumed
    group.bench_function("parse_record_fields", |b| {
        let line: &[u8] =
            b"2009-06-15T13:45:30.0000000Z,6f9619ff-8b86-d011-b42d-00c04fc964ff,00:00:01.5,true,42.5";
        b.iter(|| {
            let line = black_box(line);
            let stamp = read_date_time(line, b'O');
            let mut offset = stamp.consumed() + 1;
            let id = read_guid(&line[offset..], b'D');
            offset += id.consumed() + 1;
            let elapsed = read_time_span(&line[offset..], b'c');
            offset += elapsed.consumed() + 1;
            let ok = read_bool(&line[offset..], 0);
            offset += ok.consumed() + 1;
            let amount = read_decimal(&line[offset..], 0);
            (stamp.value(), id.value(), elapsed.value(), ok.value(), amount.value())
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_reading_integers,
    benchmark_reading_reals,
    benchmark_reading_layouts,
    benchmark_mixed_parsing
);
criterion_main!(benches);
