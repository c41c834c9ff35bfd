//! Sample templates and values used across test suites.

/// A PostfixAdmin-style template exercising nested placeholder paths.
pub const DB_TEMPLATE: &str = "\
<?php
$CONF['database_type'] = '{{component.db.dbms}}';
$CONF['database_host'] = '{{component.db.address.connect.host}}';
$CONF['database_user'] = '{{component.db.username}}';
$CONF['database_password'] = '{{component.db.password}}';
$CONF['database_name'] = '{{component.db.database}}';
$CONF['smtp_server'] = '{{component.postfix.connect.host}}';
$CONF['smtp_port'] = '{{component.postfix.connect.port}}';
";

/// Values that resolve every placeholder of [`DB_TEMPLATE`].
pub const DB_VALUES_TOML: &str = r#"[component.db]
dbms = "pgsql"
username = "postfix"
password = "tiger"
database = "postfix"

[component.db.address.connect]
host = "db.example.com"
port = 5432

[component.postfix.connect]
host = "mail.example.com"
port = 25
"#;

/// [`DB_TEMPLATE`] rendered with [`DB_VALUES_TOML`].
pub const DB_RENDERED: &str = "\
<?php
$CONF['database_type'] = 'pgsql';
$CONF['database_host'] = 'db.example.com';
$CONF['database_user'] = 'postfix';
$CONF['database_password'] = 'tiger';
$CONF['database_name'] = 'postfix';
$CONF['smtp_server'] = 'mail.example.com';
$CONF['smtp_port'] = '25';
";

/// Values missing the database password and the SMTP port.
pub const DB_VALUES_INCOMPLETE_TOML: &str = r#"[component.db]
dbms = "pgsql"
username = "postfix"
database = "postfix"

[component.db.address.connect]
host = "db.example.com"

[component.postfix.connect]
host = "mail.example.com"
"#;
