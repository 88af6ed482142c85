// Benchmarks for request formatting and response decoding.

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use cmdmon_proto::message::{Message, RequestArg};
use cmdmon_proto::protocol::{Address, RESPONSE_HEADER_LEN, fields_len, float};
use cmdmon_proto::reports;

fn ntpdata_request() -> Message {
    let ntpdata = reports::find("ntpdata").unwrap();
    let mut msg = Message::new();
    msg.format_request(
        0x5A5A_A5A5,
        &ntpdata.record.request,
        &[RequestArg::Address(
            Address::V4([192, 0, 2, 10].into()).to_record(),
        )],
        ntpdata.record.responses,
    )
    .unwrap();
    msg
}

fn ntpdata_response(request: &Message) -> Vec<u8> {
    let layout = reports::find("ntpdata").unwrap().record.responses[1].fields;
    let mut data = vec![0u8; RESPONSE_HEADER_LEN + fields_len(layout)];
    data[0] = 6;
    data[1] = 2;
    data[4..6].copy_from_slice(&request.as_bytes()[4..6]);
    data[6..8].copy_from_slice(&26u16.to_be_bytes());
    data[16..20].copy_from_slice(&request.as_bytes()[8..12]);
    data[28..48].copy_from_slice(&Address::V4([192, 0, 2, 10].into()).to_record());
    data
}

fn bench_format_request(c: &mut Criterion) {
    let ntpdata = reports::find("ntpdata").unwrap();
    let args = [RequestArg::Address([0; 20])];
    let mut msg = Message::new();

    c.bench_function("format_request_ntpdata", |b| {
        b.iter(|| {
            msg.format_request(
                black_box(1),
                &ntpdata.record.request,
                &args,
                ntpdata.record.responses,
            )
            .unwrap()
        })
    });
}

fn bench_process_response(c: &mut Criterion) {
    let request = ntpdata_request();
    let data = ntpdata_response(&request);
    let expected = reports::find("ntpdata").unwrap().record.responses;

    c.bench_function("process_response_ntpdata2", |b| {
        b.iter(|| {
            let mut response = Message::from_bytes(black_box(&data));
            assert!(request.is_response_valid(&response));
            response.process_response(expected).unwrap();
            response
        })
    });
}

fn bench_field_values(c: &mut Criterion) {
    let request = ntpdata_request();
    let mut response = Message::from_bytes(&ntpdata_response(&request));
    response
        .process_response(reports::find("ntpdata").unwrap().record.responses)
        .unwrap();

    c.bench_function("field_value_all_ntpdata2", |b| {
        b.iter(|| {
            (0..response.num_fields())
                .filter_map(|i| black_box(&response).field_value(i))
                .count()
        })
    });
}

fn bench_float_codec(c: &mut Criterion) {
    c.bench_function("float_decode", |b| {
        b.iter(|| float::decode(black_box(0x0480_0000)))
    });
    c.bench_function("float_encode", |b| {
        b.iter(|| float::encode(black_box(-1.234e-6)))
    });
}

criterion_group!(
    benches,
    bench_format_request,
    bench_process_response,
    bench_field_values,
    bench_float_codec,
);
criterion_main!(benches);
