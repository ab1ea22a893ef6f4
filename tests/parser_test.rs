//! Resolver tests
//!
//! Precedence, coercion and failure behavior of `env::parse` against
//! injected environments.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use envkit::config::{GrpcClientConfig, ServerConfig};
use envkit::env::{self, EnvError, EnvSource, Environment, FieldKind, Options, RawValue, ValueSource};

envkit::env_config! {
    #[derive(Debug, Default, Clone, PartialEq, Eq)]
    struct CustomConfig {
        field1: String => "FIELD1" default "val1",
        field2: i64 => "FIELD2",
    }
}

envkit::env_config! {
    #[derive(Debug, Default, Clone, PartialEq, Eq)]
    struct Widths {
        small: u8 => "SMALL",
        signed: i16 => "SIGNED",
        flag: bool => "FLAG",
        wait: Option<Duration> => "WAIT",
    }
}

/// Provider that serves a fixed set of variables and counts reads
struct CountingSource {
    vars: HashMap<String, String>,
    reads: AtomicUsize,
}

impl CountingSource {
    fn new(pairs: &[(&str, &str)]) -> Self {
        Self {
            vars: pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
            reads: AtomicUsize::new(0),
        }
    }
}

impl EnvSource for CountingSource {
    fn get(&self, key: &str) -> RawValue {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.vars.get(key).cloned())
    }
}

fn server(host: &str, port: &str, cert: &str, key: &str) -> ServerConfig {
    ServerConfig {
        host: host.to_string(),
        port: port.to_string(),
        cert_file: cert.into(),
        key_file: key.into(),
    }
}

#[test]
fn test_parse_server_config() {
    let cases = vec![
        (
            "no prefix",
            Options::new().with_vars([
                ("HOST", "localhost"),
                ("PORT", "8080"),
                ("SERVER_CERT", "cert"),
                ("SERVER_KEY", "key"),
            ]),
        ),
        (
            "prefix",
            Options::new().with_prefix("MF-").with_vars([
                ("MF-HOST", "localhost"),
                ("MF-PORT", "8080"),
                ("MF-SERVER_CERT", "cert"),
                ("MF-SERVER_KEY", "key"),
            ]),
        ),
        (
            "alternate prefix",
            Options::new().with_prefix("MF-").with_alt_prefix("MF-HTTP-").with_vars([
                ("MF-HOST", "localhost"),
                ("MF-HTTP-PORT", "8080"),
                ("MF-SERVER_CERT", "cert"),
                ("MF-SERVER_KEY", "key"),
            ]),
        ),
        (
            "blanked primaries fall through to alternate",
            Options::new().with_prefix("MF-").with_alt_prefix("MF-HTTP-").with_vars([
                ("PORT", ""),
                ("MF-PORT", ""),
                ("MF-HOST", "localhost"),
                ("MF-HTTP-PORT", "8080"),
                ("MF-SERVER_CERT", ""),
                ("MF-SERVER_KEY", ""),
                ("MF-HTTP-SERVER_CERT", "cert"),
                ("MF-HTTP-SERVER_KEY", "key"),
            ]),
        ),
    ];

    for (description, options) in cases {
        let mut config = ServerConfig::default();
        let result = env::parse(&mut config, [options]);
        assert!(result.is_ok(), "{}: expected no error but got {:?}", description, result);
        assert_eq!(config, server("localhost", "8080", "cert", "key"), "{}", description);
    }
}

#[test]
fn test_parse_grpc_config() {
    let mut config = GrpcClientConfig::default();
    let options = Options::new().with_vars([("URL", "val.com"), ("TIMEOUT", "1s")]);
    env::parse(&mut config, [options]).unwrap();
    assert_eq!(config.url, "val.com");
    assert_eq!(config.timeout, Duration::from_secs(1));
    assert!(!config.client_tls);

    // URL is written before TIMEOUT fails
    let mut config = GrpcClientConfig::default();
    let options = Options::new().with_vars([("URL", "val.com"), ("TIMEOUT", "invalid")]);
    let err = env::parse(&mut config, [options]).unwrap_err();
    assert!(matches!(err, EnvError::Conversion { kind: FieldKind::Duration, .. }));
    assert_eq!(
        config,
        GrpcClientConfig {
            url: "val.com".to_string(),
            ..GrpcClientConfig::default()
        }
    );

    let mut config = GrpcClientConfig::default();
    let options = Options::new()
        .with_prefix("MF-")
        .with_alt_prefix("MF-GRPC-")
        .with_vars([("MF-URL", "val.com"), ("MF-GRPC-TIMEOUT", "not-duration")]);
    let err = env::parse(&mut config, [options]).unwrap_err();
    assert_eq!(err.field_name(), "MF-TIMEOUT");
}

#[test]
fn test_parse_grpc_config_conflicting() {
    let options = Options::new()
        .with_prefix("MF-")
        .with_alt_prefix("MF-GRPC-")
        .with_vars([
            ("MF-URL", "val.com"),
            ("MF-GRPC-TIMEOUT", "1s"),
            ("MF-GRPC-CLIENT_TLS", "true"),
            ("MF-GRPC-CA_CERTS", "cert"),
            ("MF-CLIENT_TLS", ""),
            ("MF-CA_CERTS", ""),
        ]);

    let config: GrpcClientConfig = env::new_config([options]).unwrap();
    assert_eq!(
        config,
        GrpcClientConfig {
            client_tls: true,
            ca_certs: "cert".to_string(),
            url: "val.com".to_string(),
            timeout: Duration::from_secs(1),
        }
    );
}

#[test]
fn test_required_field_missing() {
    let mut config = CustomConfig::default();
    let options = Options::new()
        .with_vars([("FIELD1", "test val")])
        .required_if_no_def(true);

    let err = env::parse(&mut config, [options]).unwrap_err();
    assert_eq!(err.to_string(), r#"required environment variable "FIELD2" not set"#);
    assert!(matches!(err, EnvError::RequiredFieldMissing(ref name) if name == "FIELD2"));
    assert_eq!(config.field1, "test val");
}

#[test]
fn test_required_names_primary_candidate() {
    let mut config = CustomConfig::default();
    let options = Options::new()
        .with_prefix("MF-")
        .with_alt_prefix("ALT-")
        .with_vars(Vec::<(String, String)>::new())
        .required_if_no_def(true);

    let err = env::parse(&mut config, [options]).unwrap_err();
    assert_eq!(err.field_name(), "MF-FIELD2");
    // default satisfied FIELD1 before FIELD2 failed
    assert_eq!(config.field1, "val1");
}

#[test]
fn test_wrong_type() {
    let mut config = CustomConfig::default();
    let options = Options::new().with_vars([("FIELD1", "test val"), ("FIELD2", "not int")]);

    match env::parse(&mut config, [options]).unwrap_err() {
        EnvError::Conversion { name, raw, kind, .. } => {
            assert_eq!(name, "FIELD2");
            assert_eq!(raw, "not int");
            assert_eq!(kind, FieldKind::Signed(64));
        }
        other => panic!("unexpected error: {}", other),
    }
    assert_eq!(config.field1, "test val");
    assert_eq!(config.field2, 0);
}

#[test]
fn test_prefix() {
    let options = Options::new()
        .with_prefix("MF-")
        .with_vars([("MF-FIELD1", "test val"), ("MF-FIELD2", "2")]);

    let config: CustomConfig = env::new_config([options]).unwrap();
    assert_eq!(config.field1, "test val");
    assert_eq!(config.field2, 2);
}

#[test]
fn test_default_when_unset() {
    let options = Options::new().with_vars([("OTHER", "x")]);
    let config: CustomConfig = env::new_config([options]).unwrap();
    assert_eq!(config.field1, "val1");
    assert_eq!(config.field2, 0);
}

#[test]
fn test_alternate_port() {
    let options = Options::new()
        .with_prefix("MF-")
        .with_alt_prefix("MF-HTTP-")
        .with_vars([("MF-PORT", ""), ("MF-HTTP-PORT", "8080")]);

    let config: ServerConfig = env::new_config([options]).unwrap();
    assert_eq!(config.port, "8080");
}

#[test]
fn test_primary_beats_alternate() {
    let options = Options::new()
        .with_prefix("P_")
        .with_alt_prefix("A_")
        .with_vars([("P_FIELD1", "primary"), ("A_FIELD1", "alternate"), ("A_FIELD2", "5")]);

    let mut config = CustomConfig::default();
    let report = env::parse_report(&mut config, &options).unwrap();
    assert_eq!(config.field1, "primary");
    assert_eq!(config.field2, 5);
    assert_eq!(report.get("P_FIELD1").unwrap().source, ValueSource::Primary);
    assert_eq!(report.get("P_FIELD2").unwrap().source, ValueSource::Alternate);
}

#[test]
fn test_empty_equals_absent() {
    let blank = Options::new().with_vars([("FIELD1", ""), ("FIELD2", "")]);
    let absent = Options::new().with_vars(Vec::<(String, String)>::new());

    let from_blank: CustomConfig = env::new_config([blank]).unwrap();
    let from_absent: CustomConfig = env::new_config([absent]).unwrap();
    assert_eq!(from_blank, from_absent);

    let required = Options::new().with_vars([("FIELD2", "")]).required_if_no_def(true);
    assert!(matches!(
        env::new_config::<CustomConfig, _>([required]),
        Err(EnvError::RequiredFieldMissing(_))
    ));
}

#[test]
fn test_unset_keeps_pre_call_value() {
    let mut config = CustomConfig {
        field1: "kept".to_string(),
        field2: 42,
    };
    let options = Options::new().with_vars([("FIELD1", "new")]);
    env::parse(&mut config, [options]).unwrap();
    assert_eq!(config.field1, "new");
    assert_eq!(config.field2, 42);
}

#[test]
fn test_last_options_used_in_full() {
    let first = Options::new()
        .with_prefix("MF-")
        .with_vars([("MF-FIELD2", "1")])
        .required_if_no_def(true);
    let second = Options::new().with_vars([("FIELD2", "2")]);

    let config: CustomConfig = env::new_config([first, second]).unwrap();
    assert_eq!(config.field2, 2);
    assert_eq!(config.field1, "val1");
}

#[test]
fn test_integer_width_and_bool() {
    let options = Options::new().with_vars([("SMALL", "255"), ("SIGNED", "-300"), ("FLAG", "true"), ("WAIT", "1m30s")]);
    let config: Widths = env::new_config([options]).unwrap();
    assert_eq!(config.small, 255);
    assert_eq!(config.signed, -300);
    assert!(config.flag);
    assert_eq!(config.wait, Some(Duration::from_secs(90)));

    let overflow = Options::new().with_vars([("SMALL", "256")]);
    let err = env::new_config::<Widths, _>([overflow]).unwrap_err();
    assert!(matches!(err, EnvError::Conversion { kind: FieldKind::Unsigned(8), .. }));

    let bad_bool = Options::new().with_vars([("FLAG", "True")]);
    match env::new_config::<Widths, _>([bad_bool]).unwrap_err() {
        EnvError::Conversion { name, raw, .. } => {
            assert_eq!(name, "FLAG");
            assert_eq!(raw, "True");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_optional_stays_none() {
    let options = Options::new().with_vars([("SMALL", "1")]);
    let config: Widths = env::new_config([options]).unwrap();
    assert_eq!(config.wait, None);
}

#[test]
fn test_idempotent() {
    let options = Options::new()
        .with_prefix("MF-")
        .with_alt_prefix("MF-GRPC-")
        .with_vars([("MF-URL", "val.com"), ("MF-GRPC-TIMEOUT", "250ms"), ("MF-CLIENT_TLS", "true")]);

    let first: GrpcClientConfig = env::new_config([options.clone()]).unwrap();
    let second: GrpcClientConfig = env::new_config([options]).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.timeout, Duration::from_millis(250));
}

#[test]
fn test_custom_environment_provider() {
    let source = Arc::new(CountingSource::new(&[
        ("MF-URL", "val.com"),
        ("MF-GRPC-TIMEOUT", "2s"),
        ("MF-CLIENT_TLS", "true"),
    ]));
    let options = Options::new()
        .with_prefix("MF-")
        .with_alt_prefix("MF-GRPC-")
        .with_environment(Environment::Custom(source.clone()));

    let config: GrpcClientConfig = env::new_config([options]).unwrap();
    assert_eq!(config.url, "val.com");
    assert_eq!(config.timeout, Duration::from_secs(2));
    assert!(config.client_tls);
    assert_eq!(config.ca_certs, "");

    // CLIENT_TLS and URL hit on the primary; CA_CERTS and TIMEOUT probe both names
    assert_eq!(source.reads.load(Ordering::SeqCst), 6);
}

#[test]
fn test_new_config_fails_like_parse() {
    let options = Options::new().with_vars([("FIELD1", "written"), ("FIELD2", "x")]);

    let mut config = CustomConfig::default();
    let parse_err = env::parse(&mut config, [options.clone()]).unwrap_err();
    let new_err = env::new_config::<CustomConfig, _>([options]).unwrap_err();

    assert_eq!(parse_err.to_string(), new_err.to_string());
    // only parse exposes the fields written before the failure
    assert_eq!(config.field1, "written");
}
