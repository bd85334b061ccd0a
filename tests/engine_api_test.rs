//! Integration tests for the check engine public API.

use assetcheck::engine::{
    resolve, CheckData, CheckDescriptor, CheckRegistry, CheckRunner, CheckSpec, CheckSpecEntry,
    CheckStatus, DataBindings, Details, Outcome, Parameters, Severity,
    Strictness, Validator, Verdict, WarningKind,
};
use assetcheck::geometry::{Face, MeshObject, Scene};
use assetcheck::AssetCheckError;
use serde_json::json;

fn passes(_: &CheckData, _: &Parameters) -> anyhow::Result<Outcome> {
    Ok(Outcome::pass())
}

fn fails(_: &CheckData, _: &Parameters) -> anyhow::Result<Outcome> {
    Ok(Outcome::fail(Details::from([(
        "Cube".to_string(),
        json!(1),
    )])))
}

fn raises(_: &CheckData, _: &Parameters) -> anyhow::Result<Outcome> {
    anyhow::bail!("provider exploded")
}

fn echo_params(_: &CheckData, params: &Parameters) -> anyhow::Result<Outcome> {
    Ok(Outcome::fail(
        params.iter().map(|(k, v)| (k.to_string(), v.clone())).collect(),
    ))
}

fn registry(descriptors: Vec<CheckDescriptor>) -> CheckRegistry {
    let mut registry = CheckRegistry::new();
    for descriptor in descriptors {
        registry.register(descriptor).unwrap();
    }
    registry
}

#[test]
fn resolve_yields_one_check_per_enabled_entry_in_registry_order() {
    let registry = registry(vec![
        CheckDescriptor::new("first", passes).without_data(),
        CheckDescriptor::new("second", passes).without_data(),
        CheckDescriptor::new("third", passes).without_data(),
    ]);
    let spec = CheckSpec::new()
        .with("third", CheckSpecEntry::enabled())
        .with("second", CheckSpecEntry::disabled())
        .with("first", CheckSpecEntry::enabled());

    let plan = resolve(&registry, &spec).unwrap();

    assert_eq!(plan.names(), vec!["first", "third"]);
    assert!(plan.warnings.is_empty());
}

#[test]
fn parameter_merge_is_left_biased_toward_spec() {
    let registry = registry(vec![CheckDescriptor::new("params", echo_params)
        .without_data()
        .with_parameter("a", 1)
        .with_parameter("b", 2)]);
    let spec = CheckSpec::new().with("params", CheckSpecEntry::enabled().with_parameter("b", 3));

    let plan = resolve(&registry, &spec).unwrap();

    let params = &plan.checks[0].effective_parameters;
    assert_eq!(params.get("a"), Some(&json!(1)));
    assert_eq!(params.get("b"), Some(&json!(3)));
}

#[test]
fn faulting_check_is_isolated_from_its_neighbours() {
    let registry = registry(vec![
        CheckDescriptor::new("first", fails)
            .with_severity(Severity::Error)
            .without_data(),
        CheckDescriptor::new("second", raises).without_data(),
        CheckDescriptor::new("third", passes).without_data(),
    ]);
    let spec = CheckSpec::new()
        .with("first", CheckSpecEntry::enabled())
        .with("second", CheckSpecEntry::enabled())
        .with("third", CheckSpecEntry::enabled());

    let plan = resolve(&registry, &spec).unwrap();
    let results = CheckRunner::default().run(&plan.checks, &DataBindings::new());

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].status, CheckStatus::Failed);
    assert_eq!(
        results[0].failure_detail,
        Some(Details::from([("Cube".to_string(), json!(1))]))
    );
    assert_eq!(results[1].status, CheckStatus::Errored);
    assert!(results[1]
        .error_message
        .as_deref()
        .unwrap()
        .contains("provider exploded"));
    assert_eq!(results[2].status, CheckStatus::Passed);
}

#[test]
fn repeated_validation_is_idempotent() {
    let registry = CheckRegistry::with_builtins().unwrap();
    let sliver = MeshObject::new(
        "Sliver",
        vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]],
        vec![Face::flat([0, 1, 2])],
    );
    let bindings = DataBindings::shared(Scene::new(vec![sliver]));
    let spec = CheckSpec::new()
        .with("zeroAreaFaces", CheckSpecEntry::enabled())
        .with("zeroAngleCorners", CheckSpecEntry::enabled())
        .with("noNgons", CheckSpecEntry::enabled());
    let validator = Validator::new(&registry);

    let first = validator.validate(&spec, &bindings).unwrap();
    let second = validator.validate(&spec, &bindings).unwrap();

    assert_eq!(first, second);
}

#[test]
fn warning_failures_alone_keep_verdict_clean() {
    let registry = registry(vec![
        CheckDescriptor::new("cosmetic", fails)
            .with_severity(Severity::Warning)
            .without_data(),
        CheckDescriptor::new("fyi", fails)
            .with_severity(Severity::Info)
            .without_data(),
    ]);
    let spec = CheckSpec::new()
        .with("cosmetic", CheckSpecEntry::enabled())
        .with("fyi", CheckSpecEntry::enabled());

    let report = Validator::new(&registry)
        .validate(&spec, &DataBindings::new())
        .unwrap();

    assert_eq!(report.verdict(), Verdict::Clean);
    assert_eq!(report.summary().total.failed, 2);
}

#[test]
fn error_failure_or_fault_flips_verdict() {
    let registry = registry(vec![
        CheckDescriptor::new("broken", fails)
            .with_severity(Severity::Error)
            .without_data(),
        CheckDescriptor::new("crashing", raises)
            .with_severity(Severity::Error)
            .without_data(),
    ]);

    for name in ["broken", "crashing"] {
        let spec = CheckSpec::new().with(name, CheckSpecEntry::enabled());
        let report = Validator::new(&registry)
            .validate(&spec, &DataBindings::new())
            .unwrap();
        assert_eq!(report.verdict(), Verdict::ViolationsFound, "{}", name);
    }
}

#[test]
fn zero_area_scenario_with_tightened_threshold() {
    let registry = CheckRegistry::with_builtins().unwrap();
    let leg = (2e-6f64).sqrt();
    let tiny = MeshObject::new(
        "thatFace",
        vec![[0.0, 0.0, 0.0], [leg, 0.0, 0.0], [0.0, leg, 0.0]],
        vec![Face::flat([0, 1, 2])],
    );
    let spec = CheckSpec::new()
        .with(
            "zeroAreaFaces",
            CheckSpecEntry::enabled().with_parameter("threshold", 1e-5),
        )
        .with("facetedGeometry", CheckSpecEntry::disabled());

    let plan = resolve(&registry, &spec).unwrap();
    assert_eq!(plan.names(), vec!["zeroAreaFaces"]);
    assert_eq!(
        plan.checks[0].effective_parameters.get("threshold"),
        Some(&json!(1e-5))
    );
    assert_eq!(plan.checks[0].effective_severity, Severity::Error);

    let results = CheckRunner::default().run(
        &plan.checks,
        &DataBindings::shared(Scene::new(vec![tiny])),
    );

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].status, CheckStatus::Failed);
    assert_eq!(
        results[0].failure_detail,
        Some(Details::from([("thatFace".to_string(), json!(1))]))
    );
}

#[test]
fn unknown_check_in_lenient_mode_is_a_warning() {
    let registry = CheckRegistry::with_builtins().unwrap();
    let spec = CheckSpec::new()
        .with("foo", CheckSpecEntry::enabled())
        .with("noNgons", CheckSpecEntry::enabled());

    let report = Validator::new(&registry)
        .validate(&spec, &DataBindings::shared(Scene::default()))
        .unwrap();

    assert_eq!(report.warnings().len(), 1);
    assert_eq!(report.warnings()[0].kind, WarningKind::UnknownCheck);
    assert!(report.result("foo").is_none());
    assert_eq!(report.results().len(), 1);
}

#[test]
fn unknown_check_in_strict_mode_is_fatal() {
    let registry = CheckRegistry::with_builtins().unwrap();
    let spec = CheckSpec::new().with("foo", CheckSpecEntry::enabled());

    let err = Validator::new(&registry)
        .with_strictness(Strictness::Strict)
        .validate(&spec, &DataBindings::new())
        .unwrap_err();

    assert!(matches!(err, AssetCheckError::InvalidSpecification { .. }));
}

#[test]
fn duplicate_registration_is_rejected() {
    let mut registry = CheckRegistry::with_builtins().unwrap();

    let err = registry
        .register(CheckDescriptor::new("zeroAreaFaces", passes))
        .unwrap_err();

    assert!(matches!(err, AssetCheckError::DuplicateCheck { .. }));
}

#[test]
fn unknown_lookup_is_an_error() {
    let registry = CheckRegistry::with_builtins().unwrap();

    let err = registry.get("foo").unwrap_err();

    assert!(matches!(err, AssetCheckError::UnknownCheck { .. }));
}

#[test]
fn missing_data_errors_only_the_check_that_needs_it() {
    let registry = registry(vec![
        CheckDescriptor::new("needsScene", passes),
        CheckDescriptor::new("standalone", passes).without_data(),
    ]);
    let spec = CheckSpec::new()
        .with("needsScene", CheckSpecEntry::enabled())
        .with("standalone", CheckSpecEntry::enabled());

    let report = Validator::new(&registry)
        .validate(&spec, &DataBindings::new())
        .unwrap();

    let needs = report.result("needsScene").unwrap();
    assert_eq!(needs.status, CheckStatus::Errored);
    assert!(needs.error_message.as_deref().unwrap().contains("No data bound"));
    assert_eq!(
        report.result("standalone").unwrap().status,
        CheckStatus::Passed
    );
}

#[test]
fn severity_override_is_carried_into_results() {
    let registry = registry(vec![CheckDescriptor::new("broken", fails)
        .with_severity(Severity::Error)
        .without_data()]);
    let spec = CheckSpec::new().with(
        "broken",
        CheckSpecEntry::enabled().with_severity(Severity::Warning),
    );

    let report = Validator::new(&registry)
        .validate(&spec, &DataBindings::new())
        .unwrap();

    assert_eq!(report.results()[0].effective_severity, Severity::Warning);
    assert!(report.is_clean());
}

#[test]
fn declared_data_key_does_not_borrow_shared_scene() {
    let registry = registry(vec![
        CheckDescriptor::new("lodScene", passes).with_data_key("lod1"),
        CheckDescriptor::new("mainScene", passes),
    ]);
    let spec = CheckSpec::new()
        .with("lodScene", CheckSpecEntry::enabled())
        .with("mainScene", CheckSpecEntry::enabled());

    let report = Validator::new(&registry)
        .validate(&spec, &DataBindings::shared(Scene::default()))
        .unwrap();

    let lod = report.result("lodScene").unwrap();
    assert_eq!(lod.status, CheckStatus::Errored);
    assert!(lod.error_message.as_deref().unwrap().contains("lod1"));
    assert_eq!(
        report.result("mainScene").unwrap().status,
        CheckStatus::Passed
    );
}

#[test]
fn builtin_item_messages_expand_resolved_parameters() {
    let registry = CheckRegistry::with_builtins().unwrap();
    let quad = MeshObject::new(
        "Quad",
        vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
        ],
        vec![Face::flat([0, 1, 2, 3])],
    );
    let spec = CheckSpec::new().with(
        "triangleMaxCount",
        CheckSpecEntry::enabled().with_parameter("triMaxCount", 1),
    );

    let report = Validator::new(&registry)
        .validate(&spec, &DataBindings::shared(Scene::new(vec![quad])))
        .unwrap();

    let result = report.result("triangleMaxCount").unwrap();
    assert_eq!(result.status, CheckStatus::Failed);
    assert_eq!(result.version, "0.1.1");
    assert_eq!(
        result.items[0].message,
        "Scene triangle count of 2 exceeds the maximum allowed: 1"
    );
}
