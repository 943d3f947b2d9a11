#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn defaults_match_controller_constants() {
    let c = OrbitConfig::default();
    assert_eq!(c.rotate_speed, 0.008);
    assert_eq!(c.pan_speed, 0.002);
    assert_eq!(c.wheel_step, 0.05);
    assert_eq!((c.zoom_min, c.zoom_max), (0.2, 3.0));
    assert_eq!(c.damping, 0.1);
    assert_eq!(c.base_distance, 5.0);
    assert!(c.validate().is_ok());
}

#[test]
fn pitch_limit_leaves_margin_at_pole() {
    let c = OrbitConfig::default();
    assert!((c.pitch_limit() - (FRAC_PI_2 - 0.1)).abs() < 1e-12);
}

#[test]
fn partial_json_keeps_other_defaults() {
    let c = OrbitConfig::from_json(r#"{ "damping": 0.25 }"#).unwrap();
    assert_eq!(c.damping, 0.25);
    assert_eq!(c.rotate_speed, 0.008);
}

#[test]
fn malformed_json_is_parse_error() {
    assert!(matches!(OrbitConfig::from_json("{ damping"), Err(ConfigError::Parse(_))));
}

#[test]
fn damping_bounds() {
    for bad in [0.0, -0.1, 1.5, f64::NAN] {
        let c = OrbitConfig { damping: bad, ..OrbitConfig::default() };
        assert!(
            matches!(c.validate(), Err(ConfigError::Invalid { field: "damping", .. })),
            "damping {bad}"
        );
    }
    let full = OrbitConfig { damping: 1.0, ..OrbitConfig::default() };
    assert!(full.validate().is_ok());
}

#[test]
fn inverted_zoom_bounds_rejected() {
    let c = OrbitConfig { zoom_min: 4.0, zoom_max: 2.0, ..OrbitConfig::default() };
    assert!(matches!(c.validate(), Err(ConfigError::Invalid { field: "zoom_max", .. })));
}

#[test]
fn zoom_button_factors_must_move_the_right_way() {
    let c = OrbitConfig { zoom_in_factor: 0.9, ..OrbitConfig::default() };
    assert!(c.validate().is_err());
    let c = OrbitConfig { zoom_out_factor: 1.1, ..OrbitConfig::default() };
    assert!(c.validate().is_err());
}

#[test]
fn error_message_names_field() {
    let err = OrbitConfig::from_json(r#"{ "pan_speed": -1 }"#).unwrap_err();
    assert!(err.to_string().contains("pan_speed"));
}

#[test]
fn or_default_replaces_invalid_config() {
    let c = OrbitConfig { zoom_min: 4.0, zoom_max: 2.0, ..OrbitConfig::default() };
    assert_eq!(c.or_default(), OrbitConfig::default());
    let valid = OrbitConfig { pan_speed: 0.004, ..OrbitConfig::default() };
    assert_eq!(valid.clone().or_default(), valid);
}
