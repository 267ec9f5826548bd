use criterion::{criterion_group, criterion_main, Criterion};
use geo::geometry::Coord;
use std::f64::consts::TAU;
use tangent::{assemble_rings, simplify, Segment};

/// A jittered circle, roughly the vertex density of an unsimplified
/// OSM lake shoreline.
fn synthetic_coastline(len: usize) -> Vec<Coord> {
    (0..len)
        .map(|i| {
            let theta = i as f64 / len as f64 * TAU;
            let radius = 5_000.0 + ((i * 7_919) % 100) as f64 / 2.0;
            Coord {
                x: radius * theta.cos(),
                y: radius * theta.sin(),
            }
        })
        .collect()
}

/// Splits a closed point loop into consecutive segments that share
/// endpoint node ids, the shape Overpass hands back for large lakes.
fn ring_segments(points: &[Coord], pieces: usize) -> Vec<Segment> {
    let span = points.len() / pieces;
    (0..pieces)
        .map(|piece| {
            let first = piece * span;
            let last = ((piece + 1) * span) % points.len();
            let mut segment_points = points[first..first + span].to_vec();
            segment_points.push(points[last]);
            Segment {
                start_node: first as i64,
                end_node: last as i64,
                points: segment_points,
            }
        })
        .collect()
}

fn coastline(c: &mut Criterion) {
    let mut group = c.benchmark_group("Coastline");

    let points = synthetic_coastline(10_000);
    group.bench_with_input("simplify 10k vertices", &points, |b, points| {
        b.iter(|| simplify(points, 50.0))
    });

    let segments = ring_segments(&points, 40);
    group.bench_with_input("assemble 40 segments", &segments, |b, segments| {
        b.iter(|| assemble_rings(segments, 50.0))
    });
}

criterion_group!(benches, coastline);
criterion_main!(benches);
