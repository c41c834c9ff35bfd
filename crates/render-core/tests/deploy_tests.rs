use pretty_assertions::assert_eq;
use render_core::{CheckStatus, Deployment, Error, FileStatus, Manifest, RenderJob};
use render_fs::{ConfigStore, NormalizedPath};
use render_test_utils::{TestDeployment, fixtures};

fn deployment(values: &str) -> TestDeployment {
    TestDeployment::new()
        .with_file("templates/db.php", fixtures::DB_TEMPLATE)
        .with_file("values.toml", values)
        .with_manifest(&["values.toml"], &[("templates/db.php", "out/db.php")])
}

fn load(deploy: &TestDeployment) -> Manifest {
    Manifest::load(&NormalizedPath::new(deploy.path("render.toml"))).unwrap()
}

#[test]
fn test_apply_writes_rendered_file_owner_only() {
    let deploy = deployment(fixtures::DB_VALUES_TOML);
    let plan = Deployment::from_manifest(&load(&deploy), &[], &ConfigStore::new()).unwrap();

    let report = plan.apply(false).unwrap();

    assert_eq!(report.actions.len(), 1);
    assert_eq!(report.actions[0].status, FileStatus::Missing);
    assert!(report.actions[0].applied);
    assert_eq!(deploy.read("out/db.php"), fixtures::DB_RENDERED);
    deploy.assert_mode("out/db.php", 0o600);
}

#[test]
fn test_second_apply_is_a_no_op() {
    let deploy = deployment(fixtures::DB_VALUES_TOML);
    let store = ConfigStore::new();
    let manifest = load(&deploy);

    Deployment::from_manifest(&manifest, &[], &store).unwrap().apply(false).unwrap();
    let first = deploy.read("out/db.php");

    let report = Deployment::from_manifest(&manifest, &[], &store).unwrap().apply(false).unwrap();

    assert!(!report.has_changes());
    assert_eq!(report.actions[0].status, FileStatus::UpToDate);
    assert_eq!(deploy.read("out/db.php"), first);
}

#[test]
fn test_unresolved_placeholders_abort_before_writing() {
    let deploy = deployment(fixtures::DB_VALUES_INCOMPLETE_TOML);

    let err = Deployment::from_manifest(&load(&deploy), &[], &ConfigStore::new()).unwrap_err();

    match err {
        Error::Template(render_template::Error::UnresolvedPlaceholder { paths, .. }) => {
            assert_eq!(
                paths,
                vec!["component.db.password", "component.postfix.connect.port"]
            );
        }
        other => panic!("unexpected error: {other:?}"),
    }
    deploy.assert_file_not_exists("out/db.php");
}

#[test]
fn test_failed_render_leaves_existing_target_untouched() {
    let deploy = deployment(fixtures::DB_VALUES_INCOMPLETE_TOML);
    deploy.write("out/db.php", "previous deployment\n");

    assert!(Deployment::from_manifest(&load(&deploy), &[], &ConfigStore::new()).is_err());

    assert_eq!(deploy.read("out/db.php"), "previous deployment\n");
}

#[test]
fn test_overrides_complete_missing_values() {
    let deploy = deployment(fixtures::DB_VALUES_INCOMPLETE_TOML);
    let overrides = vec![
        "component.db.password=tiger".to_string(),
        "component.postfix.connect.port=25".to_string(),
    ];

    let plan = Deployment::from_manifest(&load(&deploy), &overrides, &ConfigStore::new()).unwrap();
    plan.apply(false).unwrap();

    assert_eq!(deploy.read("out/db.php"), fixtures::DB_RENDERED);
}

#[test]
fn test_dry_run_reports_without_writing() {
    let deploy = deployment(fixtures::DB_VALUES_TOML);
    let plan = Deployment::from_manifest(&load(&deploy), &[], &ConfigStore::new()).unwrap();

    let report = plan.apply(true).unwrap();

    assert!(report.dry_run);
    assert!(report.has_changes());
    assert!(!report.actions[0].applied);
    deploy.assert_file_not_exists("out/db.php");
}

#[test]
fn test_check_reports_missing_then_drift() {
    let deploy = deployment(fixtures::DB_VALUES_TOML);
    let plan = Deployment::from_manifest(&load(&deploy), &[], &ConfigStore::new()).unwrap();

    assert_eq!(plan.check().unwrap().status, CheckStatus::Missing);

    plan.apply(false).unwrap();
    assert!(plan.check().unwrap().is_healthy());

    deploy.write("out/db.php", "edited by hand\n");
    let report = plan.check().unwrap();
    assert_eq!(report.status, CheckStatus::Drifted);
    assert_eq!(report.drifted[0].status, FileStatus::ContentDrift);
}

#[test]
fn test_missing_manifest() {
    let deploy = TestDeployment::new();
    let result = Manifest::load(&NormalizedPath::new(deploy.path("render.toml")));
    assert!(matches!(result, Err(Error::ManifestNotFound { .. })));
}

#[test]
fn test_duplicate_targets_are_rejected() {
    let deploy = TestDeployment::new().with_manifest(
        &[],
        &[("a.tpl", "out/same.php"), ("b.tpl", "./out/same.php")],
    );
    let result = Manifest::load(&NormalizedPath::new(deploy.path("render.toml")));
    assert!(matches!(result, Err(Error::InvalidManifest { .. })));
}

#[test]
fn test_job_without_target() {
    let deploy = deployment(fixtures::DB_VALUES_TOML);
    let job = RenderJob::new(NormalizedPath::new(deploy.path("templates/db.php")));

    let result = job.managed_file(&ConfigStore::new());

    assert!(matches!(result, Err(Error::NoTarget { .. })));
}

#[test]
fn test_job_renders_without_target() {
    let deploy = deployment(fixtures::DB_VALUES_TOML);
    let job = RenderJob::new(NormalizedPath::new(deploy.path("templates/db.php")))
        .with_values([NormalizedPath::new(deploy.path("values.toml"))]);

    let rendered = job.render(&ConfigStore::new()).unwrap();

    assert_eq!(rendered.text, fixtures::DB_RENDERED);
}

#[test]
fn test_write_failure_stops_apply_after_earlier_files() {
    let deploy = TestDeployment::new()
        .with_file("templates/db.php", fixtures::DB_TEMPLATE)
        .with_file("values.toml", fixtures::DB_VALUES_TOML)
        // A regular file where the second target needs a directory
        .with_file("blocked", "not a directory\n")
        .with_manifest(
            &["values.toml"],
            &[
                ("templates/db.php", "out/first.php"),
                ("templates/db.php", "blocked/second.php"),
                ("templates/db.php", "out/third.php"),
            ],
        );
    let plan = Deployment::from_manifest(&load(&deploy), &[], &ConfigStore::new()).unwrap();

    let result = plan.apply(false);

    assert!(matches!(result, Err(Error::Fs(render_fs::Error::Io { .. }))));
    assert_eq!(deploy.read("out/first.php"), fixtures::DB_RENDERED);
    deploy.assert_file_not_exists("out/third.php");
    assert_eq!(deploy.read("blocked"), "not a directory\n");
}
