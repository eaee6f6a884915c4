use mirath_engine::{EngineConfig, EngineError, ErrorBody, calculate};
use mirath_types::{EstateInput, Gender, Heir};
use rust_decimal_macros::dec;

fn calc(input: &EstateInput) -> EngineError {
    calculate(input, &EngineConfig::default()).unwrap_err()
}

fn base(deceased: Gender) -> EstateInput {
    EstateInput::new(deceased, dec!(1000), dec!(100))
}

// ── Input errors ────────────────────────────────────────────────

#[test]
fn zero_count_rejected() {
    let err = calc(&base(Gender::Male).with_heir(Heir::Son, 0));
    assert!(matches!(err, EngineError::InvalidCount { heir: Heir::Son, count: 0, .. }));
}

#[test]
fn count_above_configured_limit_rejected() {
    let config = EngineConfig {
        max_heir_count: 3,
        ..EngineConfig::default()
    };
    let err = calculate(&base(Gender::Male).with_heir(Heir::Daughter, 4), &config).unwrap_err();
    assert!(matches!(err, EngineError::InvalidCount { heir: Heir::Daughter, count: 4, .. }));
}

#[test]
fn more_than_four_wives_rejected() {
    let err = calc(&base(Gender::Male).with_heir(Heir::Wife, 5));
    assert!(matches!(err, EngineError::InvalidCount { heir: Heir::Wife, .. }));
}

#[test]
fn husband_of_a_male_deceased_rejected() {
    let err = calc(&base(Gender::Male).with_heir(Heir::Husband, 1));
    assert!(matches!(
        err,
        EngineError::IncompatibleHeir { heir: Heir::Husband, deceased: Gender::Male }
    ));
}

#[test]
fn repeated_category_rejected() {
    let input = base(Gender::Female)
        .with_heir(Heir::Daughter, 1)
        .with_heir(Heir::Daughter, 2);
    assert!(matches!(calc(&input), EngineError::DuplicateHeir(Heir::Daughter)));
}

#[test]
fn liabilities_above_assets_rejected() {
    let input = EstateInput::new(Gender::Male, dec!(500), dec!(900)).with_heir(Heir::Son, 1);
    let err = calc(&input);
    assert_eq!(err.kind(), "InvalidEstate");
    assert_eq!(err.field(), Some("liabilities"));
}

#[test]
fn invalid_config_rejected_before_calculation() {
    let config = EngineConfig {
        currency_precision: 40,
        ..EngineConfig::default()
    };
    let err = calculate(&base(Gender::Male).with_heir(Heir::Son, 1), &config).unwrap_err();
    assert!(matches!(err, EngineError::Config(_)));
}

// ── Classification ──────────────────────────────────────────────

#[test]
fn input_errors_are_not_internal() {
    let errors = [
        EngineError::InvalidEstate {
            field: "assets",
            reason: "negative".into(),
        },
        EngineError::UnknownCategory("cousin".into()),
        EngineError::DuplicateHeir(Heir::Son),
        EngineError::Config("bad".into()),
    ];
    for err in &errors {
        assert!(!err.is_internal(), "{err}");
    }
}

#[test]
fn rule_gaps_are_internal() {
    let err = EngineError::ConflictingFixedShares {
        heir: Heir::Mother,
        detail: "no share row matches the present heirs".into(),
    };
    assert!(err.is_internal());
    assert_eq!(err.kind(), "ConflictingFixedShares");
    assert_eq!(err.field(), None);
}

#[test]
fn display_names_the_heir() {
    let err = EngineError::InvalidCount {
        heir: Heir::SonsDaughter,
        count: 0,
        reason: "count must be at least 1".into(),
    };
    assert_eq!(
        err.to_string(),
        "invalid count 0 for Son's Daughter: count must be at least 1"
    );
}

#[test]
fn error_body_carries_kind_and_field() {
    let err = EngineError::UnknownCategory("cousin".into());
    let body = ErrorBody::from(&err);
    assert_eq!(body.error, "UnknownCategory");
    assert_eq!(body.message, "unknown heir category: cousin");
    assert_eq!(body.field.as_deref(), Some("heirs"));
    assert!(!body.internal);

    let json = serde_json::to_value(&body).unwrap();
    assert_eq!(json["error"], "UnknownCategory");
}
