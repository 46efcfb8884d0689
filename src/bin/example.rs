//! Load case example - two NESC cases on a single circuit

use tline_loads::prelude::*;

fn row(label: &str, values: &[(&str, f64)]) -> TableRow {
    let mut row = TableRow::new();
    row.insert("LoadCase".to_string(), CellValue::text(label));
    for (header, value) in values {
        row.insert(header.to_string(), CellValue::Number(*value));
    }
    row
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("=== Load Case Example: Single Circuit Tangent ===\n");

    // Loads per wire in kips, as read off a sag-tension report
    let table = Table::from_rows(vec![
        row(
            "NESC 250B Heavy",
            &[("SW-V", 1.20), ("SW-T", 0.85), ("SW-L", 0.0), ("C-V", 3.10), ("C-T", 1.95), ("C-L", 0.0), ("WindPSF", 4.0)],
        ),
        row(
            "NESC 250C Extreme Wind",
            &[("SW-V", 0.45), ("SW-T", 1.40), ("SW-L", 0.0), ("C-V", 1.60), ("C-T", 3.25), ("C-L", 0.0), ("WindPSF", 21.0)],
        ),
    ]);

    let mut project = LoadCaseProject::from_table(table);
    let mapping = FieldMapping::auto_detect(&project.table().headers);
    println!("Detected mapping:");
    for field in StandardField::ALL {
        println!("  {:<12} -> {}", field.label(), mapping.column(field).unwrap_or("(unmapped)"));
    }
    project.apply_field_mapping(mapping, Vec::new());

    project.generator = GeneratorConfig::default()
        .with_joints(2, 3)
        .with_unfactored();
    project.set_overload_factor("1. NESC 250B Heavy", 1.5, 1.65);

    let rows = project.generate()?;
    println!("\nGenerated {} force rows:", rows.len());
    println!(
        "{:>5}  {:<32} {:<6} {:>12} {:>12} {:>12}",
        "Row", "Load Case", "Joint", "V (lbs)", "T (lbs)", "L (lbs)"
    );
    for r in rows {
        println!(
            "{:>5}  {:<32} {:<6} {:>12.1} {:>12.1} {:>12.1}",
            r.row_number, r.load_case, r.joint_label, r.vertical, r.transverse, r.longitudinal
        );
    }

    let vector = project.build_vector_table();
    println!("\nVector load cases:");
    for row in &vector.rows {
        let cell = |column: VectorColumn| row.get(column).map(|v| v.to_string()).unwrap_or_default();
        println!(
            "  {:>2}. {:<32} DLF {:<4} WAF {:<4} wind {:<5} ice {:<5} temp {}",
            cell(VectorColumn::RowNumber),
            cell(VectorColumn::Description),
            cell(VectorColumn::DeadLoadFactor),
            cell(VectorColumn::WindAreaFactor),
            cell(VectorColumn::TransWindPressure),
            cell(VectorColumn::IceThickness),
            cell(VectorColumn::Temperature),
        );
    }

    println!("\n=== Done ===");
    Ok(())
}
