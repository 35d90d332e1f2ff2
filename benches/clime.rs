use clime::{Clime, MonthRange};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn synthetic_month() -> String {
    let mut text = String::from("---\n");
    for day in 1..=31 {
        text.push_str(&format!(
            "{} 25.8 29.2 2:31pm 20.8 6:39am 0.40 1 23 12:54pm NNE 1011.09 76\n",
            day
        ));
    }
    text
}

fn bench_ingest(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let client = runtime.block_on(async {
        Clime::builder()
            .secret("bench_secret")
            .data_dir(dir.path().to_path_buf())
            .build()
            .await
            .unwrap()
    });

    let month = synthetic_month();
    c.bench_function("ingest_two_years", |b| {
        b.iter(|| {
            let reports: Vec<_> = MonthRange::new(2010, 1, 2011, 12)
                .unwrap()
                .months()
                .map(|(year, month_no)| (year, month_no, Ok(month.clone())))
                .collect();
            runtime
                .block_on(client.ingest().ingest_reports(black_box(reports)))
                .unwrap()
        })
    });

    c.bench_function("retrieve_month", |b| {
        b.iter(|| {
            runtime
                .block_on(
                    client
                        .observations()
                        .month()
                        .year(black_box(2010))
                        .month(6)
                        .secret("bench_secret")
                        .call(),
                )
                .unwrap()
        })
    });
}

criterion_group!(benches, bench_ingest);
criterion_main!(benches);
