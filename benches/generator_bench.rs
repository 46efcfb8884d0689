//! Benchmarks for load case generation and vector table derivation

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tline_loads::prelude::*;

fn create_load_cases(count: usize) -> Vec<LoadCaseRecord> {
    (0..count)
        .map(|i| {
            let label = match i % 4 {
                0 => format!("{}. NESC Rule B w/ OLF", i + 1),
                1 => format!("{}. NESC Rule C", i + 1),
                2 => format!("{}. ASCE Ice", i + 1),
                _ => format!("{}. Extreme Wind", i + 1),
            };
            LoadCaseRecord::new(
                &label,
                AxisForces::new(1.2, 0.8, 0.1),
                AxisForces::new(3.4, 2.1, 0.3),
            )
            .with_field("GUY-V", 4.5)
            .with_field("GUY-T", 2.0)
        })
        .collect()
}

fn create_overload_factors(cases: &[LoadCaseRecord]) -> OverloadFactorTable {
    let mut factors = OverloadFactorTable::derive(cases);
    for (i, case) in cases.iter().enumerate() {
        if i % 2 == 0 {
            factors.set(&case.label, 1.5, 1.65);
        }
    }
    factors
}

fn create_primary_table(count: usize) -> Table {
    let rows = create_load_cases(count)
        .into_iter()
        .enumerate()
        .map(|(i, case)| {
            let mut row = TableRow::new();
            row.insert("LOAD CASE".to_string(), CellValue::text(&case.label));
            row.insert("WIND".to_string(), CellValue::Number((i % 30) as f64));
            row.insert("TEMP".to_string(), CellValue::Number(15.0));
            row
        })
        .collect();
    Table::from_rows(rows)
}

fn benchmark_small_structure(c: &mut Criterion) {
    let cases = create_load_cases(10);
    let factors = create_overload_factors(&cases);
    let config = GeneratorConfig::default().with_joints(1, 3).with_unfactored();

    c.bench_function("generate_10_cases_4_joints", |b| {
        b.iter(|| {
            let rows = generate(&config, black_box(&cases), &factors).unwrap();
            black_box(rows);
        })
    });
}

fn benchmark_double_circuit(c: &mut Criterion) {
    let cases = create_load_cases(200);
    let factors = create_overload_factors(&cases);
    let config = GeneratorConfig::default()
        .with_joints(2, 6)
        .with_custom_load(
            CustomJointLoadSpec::new("G", 4)
                .with_vertical("GUY-V")
                .with_transverse("GUY-T"),
        )
        .with_unfactored();

    c.bench_function("generate_200_cases_12_joints", |b| {
        b.iter(|| {
            let rows = generate(&config, black_box(&cases), &factors).unwrap();
            black_box(rows);
        })
    });
}

fn benchmark_vector_table(c: &mut Criterion) {
    let primary = create_primary_table(200);
    let secondary = create_primary_table(100);
    let config = VectorConfig::default()
        .with_load_case("LOAD CASE")
        .with_wind("WIND")
        .with_temp("TEMP")
        .with_join("LOAD CASE", "LOAD CASE");

    c.bench_function("vector_table_200_rows_joined", |b| {
        b.iter(|| {
            let table = VectorTableBuilder::new(&config, &primary)
                .with_secondary(Some(&secondary))
                .build(&[]);
            black_box(table);
        })
    });
}

criterion_group!(
    benches,
    benchmark_small_structure,
    benchmark_double_circuit,
    benchmark_vector_table
);
criterion_main!(benches);
