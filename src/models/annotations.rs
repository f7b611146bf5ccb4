//! Annotation extraction and typed payload parsing
//!
//! GKE wires Ingresses and Services to their auxiliary objects through
//! annotations, several of which carry JSON blobs. Everything here turns the
//! raw strings into an [`Annotation`] so rule evaluation never inspects
//! annotation text directly.

use std::collections::BTreeMap;
use std::fmt;

use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::de::{DeserializeOwned, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

pub const FRONTEND_CONFIG_KEY: &str = "networking.gke.io/v1beta1.FrontendConfig";
pub const BACKEND_CONFIG_KEY: &str = "cloud.google.com/backend-config";
pub const BETA_BACKEND_CONFIG_KEY: &str = "beta.cloud.google.com/backend-config";
pub const SERVICE_APP_PROTOCOLS_KEY: &str = "service.alpha.kubernetes.io/app-protocols";
pub const GOOGLE_APP_PROTOCOLS_KEY: &str = "cloud.google.com/app-protocols";
pub const NEG_KEY: &str = "cloud.google.com/neg";
pub const INGRESS_CLASS_KEY: &str = "kubernetes.io/ingress.class";

/// Ingress class selecting the internal HTTP(S) load balancer
pub const GCE_L7_ILB_INGRESS_CLASS: &str = "gce-internal";

/// Backend config keys, primary first
pub const BACKEND_CONFIG_KEYS: &[&str] = &[BACKEND_CONFIG_KEY, BETA_BACKEND_CONFIG_KEY];

/// App protocol keys, primary first
pub const APP_PROTOCOLS_KEYS: &[&str] = &[SERVICE_APP_PROTOCOLS_KEY, GOOGLE_APP_PROTOCOLS_KEY];

/// Look up the first candidate key present on the object
///
/// Keys are tried in order and the first match wins. Absence of every key is
/// an ordinary outcome and yields `None`.
pub fn extract<'a>(meta: &'a ObjectMeta, keys: &[&str]) -> Option<&'a str> {
    let annotations = meta.annotations.as_ref()?;
    keys.iter()
        .find_map(|key| annotations.get(*key))
        .map(String::as_str)
}

/// Result of reading a structured annotation
#[derive(Debug, Clone, PartialEq)]
pub enum Annotation<T> {
    /// None of the candidate keys is set
    Absent,
    /// A key is set but its value does not parse; carries the parser error
    Malformed(String),
    Valid(T),
}

impl<T> Annotation<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Annotation::Absent)
    }

    /// The parsed payload, if any
    pub fn valid(self) -> Option<T> {
        match self {
            Annotation::Valid(value) => Some(value),
            _ => None,
        }
    }
}

/// Extract an annotation and decode it as JSON
pub fn parse_json<T: DeserializeOwned>(meta: &ObjectMeta, keys: &[&str]) -> Annotation<T> {
    match extract(meta, keys) {
        None => Annotation::Absent,
        Some(raw) => match serde_json::from_str(raw) {
            Ok(value) => Annotation::Valid(value),
            Err(e) => Annotation::Malformed(e.to_string()),
        },
    }
}

/// Backend configs referenced by a Service
///
/// Parsed from `{"default": "name", "ports": {"80": "name"}}`. Port entries
/// keep the order they are written in.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BackendConfigs {
    #[serde(default)]
    pub default: Option<String>,
    #[serde(default, deserialize_with = "ordered_entries")]
    pub ports: Vec<(String, String)>,
}

impl BackendConfigs {
    /// Referenced names: the default first, then one per port in declaration
    /// order. Duplicates are kept.
    pub fn names(&self) -> Vec<&str> {
        self.default
            .as_deref()
            .filter(|name| !name.is_empty())
            .into_iter()
            .chain(self.ports.iter().map(|(_, name)| name.as_str()))
            .collect()
    }
}

/// Read a JSON object into its entries in document order
///
/// A repeated key keeps its first position and its last value.
fn ordered_entries<'de, D>(deserializer: D) -> Result<Vec<(String, String)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct EntriesVisitor;

    impl<'de> Visitor<'de> for EntriesVisitor {
        type Value = Vec<(String, String)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of port to BackendConfig name")
        }

        fn visit_map<M: MapAccess<'de>>(self, mut map: M) -> Result<Self::Value, M::Error> {
            let mut entries: Vec<(String, String)> = Vec::new();
            while let Some((key, value)) = map.next_entry::<String, String>()? {
                match entries.iter_mut().find(|(existing, _)| *existing == key) {
                    Some(entry) => entry.1 = value,
                    None => entries.push((key, value)),
                }
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(EntriesVisitor)
}

/// Port name or number to declared application protocol
pub type AppProtocols = BTreeMap<String, String>;

/// Protocols the load balancer can speak to a backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppProtocol {
    Http,
    Https,
    Http2,
}

impl AppProtocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppProtocol::Http => "HTTP",
            AppProtocol::Https => "HTTPS",
            AppProtocol::Http2 => "HTTP2",
        }
    }

    /// Parse a declared protocol; values are case-sensitive
    pub fn parse_optional(s: &str) -> Option<Self> {
        match s {
            "HTTP" => Some(AppProtocol::Http),
            "HTTPS" => Some(AppProtocol::Https),
            "HTTP2" => Some(AppProtocol::Http2),
            _ => None,
        }
    }
}

impl fmt::Display for AppProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// `cloud.google.com/neg` payload
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NegAnnotation {
    #[serde(default)]
    pub ingress: bool,
    #[serde(default)]
    pub exposed_ports: BTreeMap<i32, NegAttributes>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NegAttributes {
    #[serde(default)]
    pub name: Option<String>,
}

pub fn frontend_config_name(meta: &ObjectMeta) -> Option<&str> {
    extract(meta, &[FRONTEND_CONFIG_KEY])
}

pub fn backend_configs(meta: &ObjectMeta) -> Annotation<BackendConfigs> {
    parse_json(meta, BACKEND_CONFIG_KEYS)
}

pub fn app_protocols(meta: &ObjectMeta) -> Annotation<AppProtocols> {
    parse_json(meta, APP_PROTOCOLS_KEYS)
}

pub fn neg(meta: &ObjectMeta) -> Annotation<NegAnnotation> {
    parse_json(meta, &[NEG_KEY])
}

/// Whether the Ingress is served by the internal HTTP(S) load balancer
pub fn is_l7_ilb(meta: &ObjectMeta) -> bool {
    extract(meta, &[INGRESS_CLASS_KEY]) == Some(GCE_L7_ILB_INGRESS_CLASS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(annotations: &[(&str, &str)]) -> ObjectMeta {
        ObjectMeta {
            name: Some("obj".to_string()),
            namespace: Some("default".to_string()),
            annotations: Some(
                annotations
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            ),
            ..Default::default()
        }
    }

    #[test]
    fn test_extract_prefers_primary_key() {
        let m = meta(&[
            (BACKEND_CONFIG_KEY, "primary"),
            (BETA_BACKEND_CONFIG_KEY, "beta"),
        ]);
        assert_eq!(extract(&m, BACKEND_CONFIG_KEYS), Some("primary"));
    }

    #[test]
    fn test_extract_falls_back_to_later_keys() {
        let m = meta(&[(GOOGLE_APP_PROTOCOLS_KEY, r#"{"443":"HTTPS"}"#)]);
        assert_eq!(
            extract(&m, APP_PROTOCOLS_KEYS),
            Some(r#"{"443":"HTTPS"}"#)
        );
    }

    #[test]
    fn test_extract_absent() {
        let m = meta(&[("unrelated", "x")]);
        assert_eq!(extract(&m, BACKEND_CONFIG_KEYS), None);
        assert_eq!(extract(&ObjectMeta::default(), BACKEND_CONFIG_KEYS), None);
    }

    #[test]
    fn test_parse_json_malformed() {
        let m = meta(&[(BACKEND_CONFIG_KEY, "not-json")]);
        assert!(matches!(backend_configs(&m), Annotation::Malformed(_)));
    }

    #[test]
    fn test_backend_config_names_order() {
        let m = meta(&[(
            BACKEND_CONFIG_KEY,
            r#"{"ports":{"443":"tls","80":"plain"},"default":"base"}"#,
        )]);
        let configs = backend_configs(&m).valid().unwrap();
        assert_eq!(configs.names(), vec!["base", "tls", "plain"]);
    }

    #[test]
    fn test_backend_config_repeated_port_keeps_last_value() {
        let m = meta(&[(
            BACKEND_CONFIG_KEY,
            r#"{"ports":{"80":"old","443":"tls","80":"new"}}"#,
        )]);
        let configs = backend_configs(&m).valid().unwrap();
        assert_eq!(configs.names(), vec!["new", "tls"]);
    }

    #[test]
    fn test_backend_config_names_keep_duplicates() {
        let configs = BackendConfigs {
            default: Some("shared".to_string()),
            ports: vec![("80".to_string(), "shared".to_string())],
        };
        assert_eq!(configs.names(), vec!["shared", "shared"]);
    }

    #[test]
    fn test_backend_config_empty_default_is_skipped() {
        let m = meta(&[(BACKEND_CONFIG_KEY, r#"{"default":""}"#)]);
        assert!(backend_configs(&m).valid().unwrap().names().is_empty());
    }

    #[test]
    fn test_app_protocol_parse() {
        assert_eq!(AppProtocol::parse_optional("HTTP2"), Some(AppProtocol::Http2));
        assert_eq!(AppProtocol::parse_optional("http"), None);
        assert_eq!(AppProtocol::parse_optional("GRPC"), None);
    }

    #[test]
    fn test_neg_annotation_parse() {
        let m = meta(&[(
            NEG_KEY,
            r#"{"ingress":true,"exposed_ports":{"80":{"name":"neg-80"}}}"#,
        )]);
        let neg = neg(&m).valid().unwrap();
        assert!(neg.ingress);
        assert_eq!(
            neg.exposed_ports.get(&80).and_then(|a| a.name.as_deref()),
            Some("neg-80")
        );
    }

    #[test]
    fn test_is_l7_ilb() {
        assert!(is_l7_ilb(&meta(&[(INGRESS_CLASS_KEY, "gce-internal")])));
        assert!(!is_l7_ilb(&meta(&[(INGRESS_CLASS_KEY, "gce")])));
        assert!(!is_l7_ilb(&meta(&[])));
    }
}
