// src/data_output/csv_export.rs

use csv::WriterBuilder;
use std::error::Error;
use std::path::{Path, PathBuf};

use crate::data_input::cfd_data::{SeparationRegion, SimulationRecord};

pub const COEFFICIENT_CSV_HEADERS: [&str; 11] = [
    "aoa (deg)",
    "cl_bionic",
    "cd_bionic",
    "ld_bionic",
    "cl_naca",
    "cd_naca",
    "ld_naca",
    "sep_pressure_start (x/c)",
    "sep_pressure_end (x/c)",
    "sep_suction_start (x/c)",
    "sep_suction_end (x/c)",
];

fn region_fields(region: Option<SeparationRegion>) -> (String, String) {
    match region {
        Some(r) => (format!("{:.3}", r.start), format!("{:.3}", r.end)),
        None => (String::new(), String::new()),
    }
}

/// Writes the per-angle coefficient table. Angles without separation leave the
/// separation columns empty.
pub fn export_record_csv(record: &SimulationRecord, path: &Path) -> Result<PathBuf, Box<dyn Error>> {
    let mut writer = WriterBuilder::new().has_headers(true).from_path(path)?;
    writer.write_record(COEFFICIENT_CSV_HEADERS)?;

    for i in 0..record.angle_count() {
        let (sp_start, sp_end) = region_fields(record.separation_pressure[i]);
        let (ss_start, ss_end) = region_fields(record.separation_suction[i]);
        writer.write_record([
            format!("{:.1}", record.angles[i]),
            format!("{:.3}", record.cl_bionic[i]),
            format!("{:.3}", record.cd_bionic[i]),
            format!("{:.3}", record.ld_bionic[i]),
            format!("{:.3}", record.cl_naca[i]),
            format!("{:.3}", record.cd_naca[i]),
            format!("{:.3}", record.ld_naca[i]),
            sp_start,
            sp_end,
            ss_start,
            ss_end,
        ])?;
    }
    writer.flush()?;
    println!("  Coefficient table saved as '{}'.", path.display());
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_input::cfd_data::load_cfd_data;
    use csv::ReaderBuilder;

    #[test]
    fn test_export_writes_one_row_per_angle() {
        let dir = std::env::temp_dir().join(format!("owl_wing_csv_test_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("coefficients.csv");

        let record = load_cfd_data();
        export_record_csv(&record, &path).unwrap();

        let mut reader = ReaderBuilder::new().has_headers(true).from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.len(), COEFFICIENT_CSV_HEADERS.len());
        assert_eq!(&headers[0], "aoa (deg)");

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 7);
        assert_eq!(&rows[0][0], "0.0");
        assert_eq!(&rows[0][3], "7.805");
        assert_eq!(&rows[0][7], "0.150");
        assert_eq!(&rows[2][7], "");
        assert_eq!(&rows[6][9], "0.000");

        std::fs::remove_dir_all(&dir).ok();
    }
}
