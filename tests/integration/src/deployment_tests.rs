//! Deployment behavior across crates
//!
//! Each module covers one guarantee of a manifest deployment, driven
//! through on-disk fixtures.

use std::sync::LazyLock;

use regex::Regex;
use render_core::{CheckStatus, Deployment, Error, FileStatus, Manifest};
use render_fs::{ConfigStore, NormalizedPath};
use render_test_utils::TestDeployment;
use render_test_utils::fixtures::{
    DB_RENDERED, DB_TEMPLATE, DB_VALUES_INCOMPLETE_TOML, DB_VALUES_TOML,
};

static TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{\{[^{}]*\}\}").unwrap());

fn plan(deployment: &TestDeployment, overrides: &[String]) -> render_core::Result<Deployment> {
    let manifest = Manifest::load(&NormalizedPath::new(deployment.path("render.toml")))?;
    Deployment::from_manifest(&manifest, overrides, &ConfigStore::new())
}

// =============================================================================
// Strict rendering
// =============================================================================

mod strictness {
    use super::*;

    const HOSTS_TEMPLATE: &str = "db {{component.db.address.connect.host}}\n";

    fn two_file_deployment(values: &str) -> TestDeployment {
        TestDeployment::new()
            .with_file("hosts.in", HOSTS_TEMPLATE)
            .with_file("config.local.php.in", DB_TEMPLATE)
            .with_file("values.toml", values)
            .with_manifest(
                &["values.toml"],
                &[("hosts.in", "out/hosts"), ("config.local.php.in", "out/config.local.php")],
            )
    }

    #[test]
    fn unresolved_in_any_file_writes_nothing() {
        let deployment = two_file_deployment(DB_VALUES_INCOMPLETE_TOML);

        let err = plan(&deployment, &[]).unwrap_err();
        match err {
            Error::Template(render_template::Error::UnresolvedPlaceholder { paths, .. }) => {
                assert_eq!(
                    paths,
                    vec!["component.db.password", "component.postfix.connect.port"]
                );
            }
            other => panic!("expected unresolved placeholders, got {other:?}"),
        }

        // The first file renders fine but must not be written either.
        deployment.assert_file_not_exists("out/hosts");
        deployment.assert_file_not_exists("out/config.local.php");
    }

    #[test]
    fn complete_values_leave_no_tokens() {
        let deployment = two_file_deployment(DB_VALUES_TOML);
        plan(&deployment, &[]).unwrap().apply(false).unwrap();

        for target in ["out/hosts", "out/config.local.php"] {
            let written = deployment.read(target);
            assert!(!TOKEN.is_match(&written), "{target} still has tokens");
        }
        assert_eq!(deployment.read("out/hosts"), "db db.example.com\n");
    }

    #[test]
    fn overrides_apply_to_every_file() {
        let deployment = two_file_deployment(DB_VALUES_INCOMPLETE_TOML);
        let overrides = vec![
            "component.db.password=tiger".to_string(),
            "component.postfix.connect.port=25".to_string(),
        ];

        plan(&deployment, &overrides).unwrap().apply(false).unwrap();
        assert_eq!(deployment.read("out/config.local.php"), DB_RENDERED);
    }
}

// =============================================================================
// Idempotency and drift repair
// =============================================================================

mod idempotency {
    use super::*;

    fn deployment() -> TestDeployment {
        TestDeployment::new()
            .with_file("config.local.php.in", DB_TEMPLATE)
            .with_file("values.toml", DB_VALUES_TOML)
            .with_manifest(&["values.toml"], &[("config.local.php.in", "config.local.php")])
    }

    #[test]
    fn second_apply_changes_nothing() {
        let deployment = deployment();

        let first = plan(&deployment, &[]).unwrap().apply(false).unwrap();
        assert!(first.has_changes());
        let written = deployment.read("config.local.php");

        let second = plan(&deployment, &[]).unwrap().apply(false).unwrap();
        assert!(!second.has_changes());
        assert_eq!(second.actions[0].status, FileStatus::UpToDate);
        assert_eq!(deployment.read("config.local.php"), written);
    }

    #[test]
    fn hand_edits_are_detected_and_reverted() {
        let deployment = deployment();
        plan(&deployment, &[]).unwrap().apply(false).unwrap();

        deployment.write(
            "config.local.php",
            &DB_RENDERED.replace("'tiger'", "'hand-edited'"),
        );
        let planned = plan(&deployment, &[]).unwrap();
        let report = planned.check().unwrap();
        assert_eq!(report.status, CheckStatus::Drifted);
        assert_eq!(report.drifted[0].status, FileStatus::ContentDrift);

        planned.apply(false).unwrap();
        assert_eq!(deployment.read("config.local.php"), DB_RENDERED);
        assert!(planned.check().unwrap().is_healthy());
    }

    #[test]
    fn dry_run_reports_without_writing() {
        let deployment = deployment();

        let report = plan(&deployment, &[]).unwrap().apply(true).unwrap();
        assert!(report.dry_run);
        assert!(report.has_changes());
        assert!(!report.actions[0].applied);
        deployment.assert_file_not_exists("config.local.php");
    }
}

// =============================================================================
// File permissions
// =============================================================================

#[cfg(unix)]
mod permissions {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    #[test]
    fn manifest_mode_is_honored() {
        let deployment = TestDeployment::new()
            .with_file("motd.in", "welcome to {{site.name}}\n")
            .with_file("values.toml", "[site]\nname = \"mx1\"\n")
            .with_file(
                "render.toml",
                r#"values = ["values.toml"]

[[file]]
template = "motd.in"
target = "motd"
mode = "644"

[[file]]
template = "motd.in"
target = "motd.private"
"#,
            );

        plan(&deployment, &[]).unwrap().apply(false).unwrap();
        deployment.assert_mode("motd", 0o644);
        deployment.assert_mode("motd.private", 0o600);
    }

    #[test]
    fn loosened_permissions_are_tightened() {
        let deployment = TestDeployment::new()
            .with_file("config.local.php.in", DB_TEMPLATE)
            .with_file("values.toml", DB_VALUES_TOML)
            .with_manifest(&["values.toml"], &[("config.local.php.in", "config.local.php")]);
        plan(&deployment, &[]).unwrap().apply(false).unwrap();

        std::fs::set_permissions(
            deployment.path("config.local.php"),
            std::fs::Permissions::from_mode(0o644),
        )
        .unwrap();

        let report = plan(&deployment, &[]).unwrap().apply(false).unwrap();
        assert_eq!(report.actions[0].status, FileStatus::ModeDrift);
        assert!(report.actions[0].applied);
        deployment.assert_mode("config.local.php", 0o600);
        assert_eq!(deployment.read("config.local.php"), DB_RENDERED);
    }
}
