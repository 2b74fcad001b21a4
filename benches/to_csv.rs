use std::sync::Arc;

use arrow_array::Int64Array;
use criterion::{criterion_group, criterion_main, Criterion};
use geo::polygon;
use geoframe::io::csv::CsvWriterOptions;
use geoframe::{Column, GeoDataFrame, GeometryArray};

fn create_data() -> GeoDataFrame {
    // An L shape
    let poly = polygon![
        (x: 0.0, y: 0.0),
        (x: 4.0, y: 0.0),
        (x: 4.0, y: 1.0),
        (x: 1.0, y: 1.0),
        (x: 1.0, y: 4.0),
        (x: 0.0, y: 4.0),
        (x: 0.0, y: 0.0),
    ];
    let geometry: GeometryArray = vec![geo::Geometry::Polygon(poly); 1000].into();
    let values = Int64Array::from_iter_values(0..1000);
    GeoDataFrame::from_columns(vec![
        ("geometry".to_string(), Column::Geometry(geometry)),
        ("value".to_string(), Column::Arrow(Arc::new(values))),
    ])
    .unwrap()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let df = create_data();
    let options = CsvWriterOptions::new(true, false);

    c.bench_function("write 1000 polygons to CSV", |b| {
        b.iter(|| {
            let _csv = df.to_csv(&options).unwrap();
        })
    });

    c.bench_function("group 1000 rows and union polygons", |b| {
        b.iter(|| {
            let grouped = df.groupby("value").unwrap();
            let _union = grouped.unary_union("geometry").unwrap();
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
