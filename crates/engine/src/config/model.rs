//! Data models for lookup configuration.

use std::{collections::BTreeSet, collections::HashMap, fmt};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use wayfinder_api::TransportSettings;
use wayfinder_types::ErrorKind;

/// Process-wide configuration: raise policy, transport settings and one
/// [`ProviderSettings`] entry per lookup handle.
///
/// Built once at startup and passed to each lookup at construction; never
/// mutated while requests are in flight.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Configuration {
    /// Classified error kinds that fail the call instead of yielding an empty result.
    pub always_raise: RaisePolicy,
    /// Whether transport failures fail the call instead of yielding an empty result.
    pub raise_on_transport_failure: bool,
    /// Settings for the default HTTP transport.
    pub transport: TransportSettings,
    /// Per-lookup settings keyed by lookup handle (e.g. `google_places_search`).
    pub providers: HashMap<String, ProviderSettings>,
}

impl Configuration {
    /// Settings for `handle`, or empty settings when none are configured.
    pub fn provider(&self, handle: &str) -> ProviderSettings {
        self.providers.get(handle).cloned().unwrap_or_default()
    }

    pub fn with_provider(mut self, handle: impl Into<String>, settings: ProviderSettings) -> Self {
        self.providers.insert(handle.into(), settings);
        self
    }

    pub fn with_always_raise(mut self, policy: RaisePolicy) -> Self {
        self.always_raise = policy;
        self
    }

    pub fn with_raise_on_transport_failure(mut self, raise: bool) -> Self {
        self.raise_on_transport_failure = raise;
        self
    }
}

/// Settings for a single lookup.
///
/// `fields` and `locationbias` keep an explicit `null` distinct from an
/// absent key: `Some(Value::Null)` means "configured to nothing" and
/// suppresses the built-in default, `None` means "not configured".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProviderSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<ApiKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<Protocol>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(deserialize_with = "deserialize_present", skip_serializing_if = "Option::is_none")]
    pub fields: Option<Value>,
    #[serde(deserialize_with = "deserialize_present", skip_serializing_if = "Option::is_none")]
    pub locationbias: Option<Value>,
    /// Extra static parameters merged into every request.
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub params: Map<String, Value>,
}

impl ProviderSettings {
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(ApiKey::Single(key.into()));
        self
    }

    pub fn with_protocol(mut self, protocol: Protocol) -> Self {
        self.protocol = Some(protocol);
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Sets the configured field list; `Value::Null` configures "no field mask".
    pub fn with_fields(mut self, fields: impl Into<Value>) -> Self {
        self.fields = Some(fields.into());
        self
    }

    pub fn with_locationbias(mut self, bias: impl Into<Value>) -> Self {
        self.locationbias = Some(bias.into());
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

/// Maps a present key (including `null`) to `Some`, leaving absence to `#[serde(default)]`.
fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// A credential: a single key, or an ordered list of key parts.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApiKey {
    Single(String),
    Parts(Vec<String>),
}

impl ApiKey {
    /// Credential parts in order; blank parts are reported as missing by the lookups.
    pub fn parts(&self) -> Vec<&str> {
        match self {
            Self::Single(key) => vec![key.as_str()],
            Self::Parts(parts) => parts.iter().map(String::as_str).collect(),
        }
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey(<redacted; {} part(s)>)", self.parts().len())
    }
}

/// Connection scheme used to reach a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Http,
    Https,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The set of classified error kinds that become hard failures.
///
/// Serialized as a list of kind names, or the keyword `"all"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RaisePolicy {
    kinds: BTreeSet<ErrorKind>,
}

impl RaisePolicy {
    /// Never raise; every classified error degrades to an empty result.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        Self::only(ErrorKind::ALL)
    }

    pub fn only(kinds: impl IntoIterator<Item = ErrorKind>) -> Self {
        Self {
            kinds: kinds.into_iter().collect(),
        }
    }

    pub fn raises(&self, kind: ErrorKind) -> bool {
        self.kinds.contains(&kind)
    }

    pub fn kinds(&self) -> impl Iterator<Item = ErrorKind> + '_ {
        self.kinds.iter().copied()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RaisePolicyRepr {
    Keyword(String),
    Kinds(Vec<ErrorKind>),
}

impl<'de> Deserialize<'de> for RaisePolicy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<RaisePolicyRepr>::deserialize(deserializer)? {
            None => Ok(Self::none()),
            Some(RaisePolicyRepr::Kinds(kinds)) => Ok(Self::only(kinds)),
            Some(RaisePolicyRepr::Keyword(keyword)) => match keyword.as_str() {
                "all" => Ok(Self::all()),
                "none" => Ok(Self::none()),
                other => Err(serde::de::Error::custom(format!(
                    "invalid always_raise value '{other}'; expected \"all\", \"none\" or a list of error kinds"
                ))),
            },
        }
    }
}

impl Serialize for RaisePolicy {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.kinds.len() == ErrorKind::ALL.len() {
            return serializer.serialize_str("all");
        }
        serializer.collect_seq(self.kinds.iter())
    }
}
