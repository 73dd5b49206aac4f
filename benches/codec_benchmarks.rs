/*!
# Codec Benchmarks

Benchmarks for the filter/sort URL codec and the collection loader.

## Usage

```bash
# Run all benchmarks
cargo bench --bench codec_benchmarks

# Run one group
cargo bench --bench codec_benchmarks -- "Filter Codec"

# Quick run with fewer samples
cargo bench --bench codec_benchmarks -- --quick
```

HTML reports are generated in `target/criterion/report/index.html`.
*/

use axum::{body::Body, http::Request};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::time::Duration;
use storefront_query::routes::router;
use storefront_query::{
    AppliedFilter, CodecConfig, FilterInput, ParamSet, collect_filters, decode_price,
    decode_sort, encode_filter, remove_filter,
};
use tokio::runtime::Runtime;
use tower::ServiceExt;

/// Query string with `vendors` vendor filters, a price range and a sort.
fn collection_query(vendors: usize) -> String {
    let mut params = ParamSet::parse("sort=price-low-high&q=casco");
    for i in 0..vendors {
        params = encode_filter(
            &params,
            &FilterInput::single("productVendor", format!("Vendor{i}")),
        );
    }
    let price = FilterInput::from_json_str(r#"{"price":{"min":100,"max":5000}}"#)
        .expect("valid price filter");
    encode_filter(&params, &price).to_query_string()
}

fn bench_filter_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("Filter Codec");

    for vendors in [1, 10, 50] {
        let query = collection_query(vendors);
        let params = ParamSet::parse(&query);
        let applied = AppliedFilter::new(
            "Vendor0",
            FilterInput::single("productVendor", "Vendor0"),
        )
        .expect("non-empty label");
        let new_vendor = FilterInput::single("productVendor", "Pro-x");

        group.bench_with_input(BenchmarkId::new("parse", vendors), &query, |b, query| {
            b.iter(|| ParamSet::parse(black_box(query)));
        });
        group.bench_with_input(BenchmarkId::new("encode", vendors), &params, |b, params| {
            b.iter(|| encode_filter(black_box(params), black_box(&new_vendor)));
        });
        group.bench_with_input(BenchmarkId::new("remove", vendors), &params, |b, params| {
            b.iter(|| remove_filter(black_box(params), black_box(&applied)));
        });
        group.bench_with_input(BenchmarkId::new("decode", vendors), &params, |b, params| {
            b.iter(|| {
                (
                    decode_price(black_box(params)),
                    decode_sort(black_box(params)),
                    collect_filters(black_box(params)),
                )
            });
        });
    }

    group.finish();
}

fn bench_collection_loader(c: &mut Criterion) {
    let rt = Runtime::new().expect("tokio runtime");
    let app = router(CodecConfig::default());
    let mut group = c.benchmark_group("Collection Loader");
    group.measurement_time(Duration::from_secs(8));

    for vendors in [1, 10] {
        let uri = format!("/collections/todos-los-productos?{}", collection_query(vendors));
        group.bench_with_input(BenchmarkId::new("collection_query", vendors), &uri, |b, uri| {
            b.iter(|| {
                rt.block_on(async {
                    let request = Request::builder()
                        .uri(uri.as_str())
                        .body(Body::empty())
                        .expect("request");
                    black_box(app.clone().oneshot(request).await.expect("response"))
                })
            });
        });
    }

    group.finish();
}

fn configure_criterion() -> Criterion {
    Criterion::default()
        .sample_size(30)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1))
        .with_plots()
        .with_output_color(true)
}

criterion_group! {
    name = benches;
    config = configure_criterion();
    targets = bench_filter_codec, bench_collection_loader
}
criterion_main!(benches);
