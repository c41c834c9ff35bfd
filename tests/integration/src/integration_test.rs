//! End-to-end integration test for the vertical slice
//!
//! This test exercises the complete flow: layered values -> PostfixAdmin
//! template -> manifest apply -> check.

use render_core::{CheckStatus, Deployment, FileStatus, Manifest, RenderJob};
use render_fs::{ConfigStore, NormalizedPath};
use render_postfixadmin::CONFIG_TEMPLATE;
use render_template::{Template, ValueTree};
use render_test_utils::TestDeployment;

const BASE_VALUES: &str = r#"[component]
admin_password_encrypted = "{SHA256-CRYPT}$5$salt$hash"

[component.db]
dbms = "pgsql"
username = "postfix"
database = "postfix"

[component.db.address.connect]
host = "db.internal"
port = 5432

[component.postfix.connect]
host = "localhost"
port = 25
"#;

const SITE_VALUES: &str = r#"component:
  db:
    password: "tiger"
  postfix:
    connect:
      host: "mail.example.com"
"#;

fn setup_deployment() -> TestDeployment {
    TestDeployment::new()
        .with_file("templates/config.local.php", CONFIG_TEMPLATE)
        .with_file("values/base.toml", BASE_VALUES)
        .with_file("values/site.yaml", SITE_VALUES)
        .with_manifest(
            &["values/base.toml", "values/site.yaml"],
            &[("templates/config.local.php", "www/postfixadmin/config.local.php")],
        )
}

#[test]
fn test_builtin_template_references_component_tree() {
    let template = Template::parse("config.local.php", CONFIG_TEMPLATE).unwrap();
    let paths: Vec<String> = template.placeholders().iter().map(|p| p.to_string()).collect();

    assert!(paths.contains(&"component.admin_password_encrypted".to_string()));
    assert!(paths.contains(&"component.db.address.connect.host".to_string()));
    assert!(paths.contains(&"component.postfix.connect.port".to_string()));
    assert!(paths.iter().all(|p| p.starts_with("component.")));
}

#[test]
fn test_layered_values_resolve_every_placeholder() {
    let deployment = setup_deployment();
    let store = ConfigStore::new();
    let tree = ValueTree::load(
        &store,
        &[
            NormalizedPath::new(deployment.path("values/base.toml")),
            NormalizedPath::new(deployment.path("values/site.yaml")),
        ],
    )
    .unwrap();

    let template = Template::parse("config.local.php", CONFIG_TEMPLATE).unwrap();
    for path in template.placeholders() {
        assert!(tree.lookup(path).is_some(), "unresolved: {}", path);
    }
}

#[test]
fn test_manifest_apply_and_check() {
    let deployment = setup_deployment();
    let store = ConfigStore::new();
    let manifest =
        Manifest::load(&NormalizedPath::new(deployment.path("render.toml"))).unwrap();

    let plan = Deployment::from_manifest(&manifest, &[], &store).unwrap();
    assert_eq!(plan.check().unwrap().status, CheckStatus::Missing);

    let report = plan.apply(false).unwrap();
    assert_eq!(report.actions.len(), 1);
    assert_eq!(report.actions[0].status, FileStatus::Missing);
    assert!(report.actions[0].applied);

    let written = deployment.read("www/postfixadmin/config.local.php");
    assert!(written.contains("$CONF['database_password'] = 'tiger';"));
    assert!(written.contains("$CONF['smtp_server'] = 'mail.example.com';"));
    assert!(written.contains("$CONF['smtp_port'] = '25';"));
    assert!(!written.contains("{{"));
    deployment.assert_mode("www/postfixadmin/config.local.php", 0o600);

    let replanned = Deployment::from_manifest(&manifest, &[], &store).unwrap();
    assert!(replanned.check().unwrap().is_healthy());
    assert!(!replanned.apply(false).unwrap().has_changes());
}

#[test]
fn test_job_and_manifest_render_identically() {
    let deployment = setup_deployment();
    let store = ConfigStore::new();

    let job = RenderJob::new(NormalizedPath::new(deployment.path("templates/config.local.php")))
        .with_values([
            NormalizedPath::new(deployment.path("values/base.toml")),
            NormalizedPath::new(deployment.path("values/site.yaml")),
        ]);
    let rendered = job.render(&store).unwrap();

    let manifest =
        Manifest::load(&NormalizedPath::new(deployment.path("render.toml"))).unwrap();
    let plan = Deployment::from_manifest(&manifest, &[], &store).unwrap();

    assert_eq!(plan.files()[0].content, rendered.text);
    assert_eq!(plan.files()[0].checksum(), rendered.checksum);
}
