// tests/cfd_data_integration_test.rs

use approx::assert_relative_eq;

use owl_wing_render::data_analysis::aero_summary::AeroSummary;
use owl_wing_render::data_analysis::flow_field::create_flow_field_data;
use owl_wing_render::data_input::cfd_data::load_cfd_data;

#[test]
fn test_record_is_deterministic() {
    assert_eq!(load_cfd_data(), load_cfd_data());
}

#[test]
fn test_record_dimensions() {
    let record = load_cfd_data();
    assert_eq!(record.angle_count(), 7);
    for len in [
        record.cl_bionic.len(),
        record.cd_bionic.len(),
        record.cl_naca.len(),
        record.cd_naca.len(),
        record.separation_pressure.len(),
        record.separation_suction.len(),
    ] {
        assert_eq!(len, 7);
    }
    for len in [
        record.x_upper.len(),
        record.z_upper.len(),
        record.x_lower.len(),
        record.z_lower.len(),
    ] {
        assert_eq!(len, 20);
    }
    assert_eq!(record.x_upper, record.x_lower);
    assert_eq!(record.acoustic_freq.len(), record.acoustic_spl.len());
    assert!(record.validate().is_ok());
}

#[test]
fn test_lift_to_drag_values() {
    let record = load_cfd_data();
    assert_relative_eq!(record.ld_bionic[0], 7.804878, epsilon = 1e-5);
    assert_eq!(record.ld_naca[0], 0.0);
    for i in 0..record.angle_count() {
        assert_relative_eq!(record.ld_naca[i], record.cl_naca[i] / record.cd_naca[i]);
    }
}

#[test]
fn test_validate_rejects_mismatched_array() {
    let mut record = load_cfd_data();
    record.separation_suction.pop();
    let err = record.validate().unwrap_err().to_string();
    assert!(err.contains("separation_suction"), "{err}");
}

#[test]
fn test_summary_matches_record() {
    let summary = AeroSummary::from_record(&load_cfd_data()).unwrap();
    assert_eq!(summary.max_ld_bionic_angle, 6.0);
    assert!(summary.max_ld_bionic > summary.max_ld_naca);
    assert_eq!(summary.pressure_separation_clear_angle, Some(3.0));
}

#[test]
fn test_flow_field_for_every_visualized_angle() {
    let record = load_cfd_data();
    for (index, expected_angle) in [(0, 0.0), (2, 3.0), (5, 7.5), (6, 9.0)] {
        let grid = create_flow_field_data(&record, index).unwrap();
        assert_eq!(grid.angle_deg, expected_angle);
        assert_eq!(grid.velocity.dim(), (grid.x_bins.len(), grid.y_bins.len()));
        assert!(grid.inside_airfoil.iter().any(|&inside| inside));
        let (lo, hi) = grid.velocity_range();
        assert!(lo >= 0.0 && lo < hi, "velocity range ({lo}, {hi})");
    }
    assert!(create_flow_field_data(&record, 7).is_err());
}
