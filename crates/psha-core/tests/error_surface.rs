use psha_core::errors::{ErrorInfo, PshaError, Stage};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .at(Stage::Mesh)
        .with_context("bin", 3)
        .with_context("reason", "example")
}

#[test]
fn configuration_error_surface() {
    let err = PshaError::Configuration(sample_info("C001", "max magnitude below min"));
    assert_eq!(err.info().code, "C001");
    assert_eq!(err.stage(), Some(Stage::Mesh));
    assert!(err.info().context.contains_key("bin"));
}

#[test]
fn domain_error_surface() {
    let err = PshaError::domain(Stage::Distance, "D001", "coincident endpoints");
    assert_eq!(err.info().code, "D001");
    assert_eq!(err.stage(), Some(Stage::Distance));
}

#[test]
fn numeric_error_surface() {
    let err = PshaError::numeric(Stage::Hazard, "N001", "sigma must be positive");
    assert!(matches!(err, PshaError::Numeric(_)));
}

#[test]
fn display_includes_stage_context_and_hint() {
    let err = PshaError::Configuration(
        sample_info("C002", "bad input").with_hint("check the magnitude range"),
    );
    let text = err.to_string();
    assert!(text.starts_with("configuration error: [mesh] bad input (code: C002)"));
    assert!(text.contains("bin=3"));
    assert!(text.contains("hint: check the magnitude range"));
}

#[test]
fn errors_roundtrip_through_json() {
    let err = PshaError::Serde(ErrorInfo::new("S001", "schema mismatch"));
    let json = serde_json::to_string(&err).unwrap();
    assert!(json.contains("\"family\":\"Serde\""));
    assert!(!json.contains("stage"));
    let restored: PshaError = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, err);
}
