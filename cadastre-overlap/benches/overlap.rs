//! Benchmarks pour le calcul de recouvrement

use cadastre_overlap::compute_overlap;
use cadastre_overlap::normalize::normalize;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use geo::{polygon, Polygon};
use inspire_cp::{AdministrativeUnitRef, ParcelRecord, Polygonal};

/// Grille de parcelles carrées de 20 m autour de l'origine S-JTSK de test
fn parcel_grid(side: usize) -> Vec<ParcelRecord> {
    let mut parcels = Vec::with_capacity(side * side);
    for i in 0..side {
        for j in 0..side {
            let x = -745_000.0 + i as f64 * 20.0;
            let y = -1_043_000.0 + j as f64 * 20.0;
            let geometry: Polygon = polygon![
                (x: x, y: y),
                (x: x + 20.0, y: y),
                (x: x + 20.0, y: y + 20.0),
                (x: x, y: y + 20.0),
            ];
            parcels.push(ParcelRecord {
                label: format!("{}/{}", i, j),
                reference: format!("727181-{}-{}", i, j),
                declared_area: Some(400.0),
                administrative_unit: AdministrativeUnitRef {
                    name: Some(format!("KU {}", i % 4)),
                    href: Some(format!("https://services.cuzk.cz/ku/{}", i % 4)),
                },
                geometry: Polygonal::Polygon(geometry),
            });
        }
    }
    parcels
}

/// Octogone irrégulier couvrant le centre de la grille
fn user_polygon(side: usize) -> Polygonal {
    let extent = side as f64 * 20.0;
    let (cx, cy) = (-745_000.0 + extent / 2.0, -1_043_000.0 + extent / 2.0);
    let r = extent / 3.0;
    let raw: Vec<[f64; 2]> = (0..8)
        .map(|k| {
            let angle = k as f64 * std::f64::consts::FRAC_PI_4 + 0.1;
            [cx + r * angle.cos(), cy + r * angle.sin()]
        })
        .collect();
    let ring = normalize(&raw).unwrap();
    Polygonal::Polygon(Polygon::new(ring, vec![]))
}

fn bench_compute_overlap(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_overlap");

    for side in [10usize, 30, 70] {
        let parcels = parcel_grid(side);
        let user = user_polygon(side);
        group.throughput(Throughput::Elements(parcels.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(parcels.len()), &parcels, |b, parcels| {
            b.iter(|| {
                let response = compute_overlap(black_box(&user), black_box(parcels), true).unwrap();
                black_box(response.parcels.len())
            })
        });
    }

    group.finish();
}

fn bench_normalize(c: &mut Criterion) {
    let raw: Vec<[f64; 2]> = (0..1000)
        .map(|k| {
            let angle = k as f64 / 1000.0 * std::f64::consts::TAU;
            [745_000.0 + 500.0 * angle.cos(), 1_043_000.0 + 500.0 * angle.sin()]
        })
        .collect();

    c.bench_function("normalize_1000", |b| {
        b.iter(|| black_box(normalize(black_box(&raw)).unwrap()))
    });
}

criterion_group!(benches, bench_compute_overlap, bench_normalize);
criterion_main!(benches);
