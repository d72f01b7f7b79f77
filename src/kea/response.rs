//! Shapes of Kea Control Agent responses.
//!
//! Only the fields the summary reads are modelled; everything else is ignored.

use crate::models::value::{first_truthy, subnet_key};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Subnet id used when a configured subnet has no `id`.
pub const UNKNOWN_SUBNET: &str = "unknown";

/// One element of the JSON array a command returns.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct CommandResponse {
    /// 0 on success, 1 error, 2 unsupported command, 3 empty result.
    #[serde(default)]
    pub result: Option<i64>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub arguments: Option<Value>,
}

impl CommandResponse {
    /// `arguments` when it is a JSON object.
    pub fn arguments_map(&self) -> Option<&Map<String, Value>> {
        self.arguments.as_ref().and_then(Value::as_object)
    }
}

/// Decode a JSON list one element at a time, skipping elements of the wrong shape.
/// Anything that is not a list decodes as empty.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Value::deserialize(deserializer)?;
    let items = match raw {
        Value::Array(items) => items,
        Value::Null => return Ok(Vec::new()),
        other => {
            log::warn!("Ignoring non-list configuration value: {other}");
            return Ok(Vec::new());
        }
    };
    let decoded = items
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| {
            let decoded: Result<T, _> = serde_path_to_error::deserialize(item);
            decoded
                .map_err(|e| {
                    log::warn!(
                        "Skipping configuration entry #{i}: path={} error={}",
                        e.path(),
                        e.inner()
                    )
                })
                .ok()
        })
        .collect();
    Ok(decoded)
}

/// The `Dhcp4` block of `config-get`.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Dhcp4Config {
    #[serde(rename = "subnet4", deserialize_with = "lenient_list")]
    pub subnets: Vec<SubnetConfig>,
    #[serde(rename = "shared-networks", deserialize_with = "lenient_list")]
    pub shared_networks: Vec<SharedNetworkConfig>,
    /// Host reservations declared at global level.
    #[serde(deserialize_with = "lenient_list")]
    pub reservations: Vec<GlobalReservation>,
}

impl Dhcp4Config {
    pub fn is_empty(&self) -> bool {
        self.subnets.is_empty() && self.shared_networks.is_empty() && self.reservations.is_empty()
    }

    /// Top-level subnets followed by those nested in shared networks.
    pub fn all_subnets(&self) -> impl Iterator<Item = &SubnetConfig> {
        self.subnets
            .iter()
            .chain(self.shared_networks.iter().flat_map(|n| n.subnets.iter()))
    }
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct SharedNetworkConfig {
    pub name: Option<Value>,
    #[serde(rename = "subnet4", deserialize_with = "lenient_list")]
    pub subnets: Vec<SubnetConfig>,
}

impl SharedNetworkConfig {
    pub fn name(&self) -> &str {
        self.name.as_ref().and_then(Value::as_str).unwrap_or("")
    }
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct SubnetConfig {
    pub id: Option<Value>,
    /// Network in CIDR notation, e.g. `192.0.2.0/24`.
    pub subnet: Option<Value>,
    #[serde(deserialize_with = "lenient_list")]
    pub pools: Vec<PoolConfig>,
    #[serde(deserialize_with = "lenient_list")]
    pub reservations: Vec<Value>,
}

impl SubnetConfig {
    /// Declared network, empty when missing or not a string.
    pub fn cidr(&self) -> &str {
        self.subnet.as_ref().and_then(Value::as_str).unwrap_or("")
    }

    /// Accumulator key: the declared id, or `unknown`.
    pub fn key(&self) -> String {
        self.id
            .as_ref()
            .and_then(subnet_key)
            .unwrap_or_else(|| UNKNOWN_SUBNET.to_string())
    }
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct PoolConfig {
    /// `"start - end"` range string.
    pub pool: Option<Value>,
}

impl PoolConfig {
    /// The range string, `None` when missing or not a string.
    pub fn range(&self) -> Option<&str> {
        self.pool.as_ref().and_then(Value::as_str)
    }
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct GlobalReservation {
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl GlobalReservation {
    /// Subnet the reservation belongs to, from `subnet-id` then `subnet_id`.
    /// Id 0 (a global-scope reservation) resolves to `None`.
    pub fn subnet_id(&self) -> Option<String> {
        first_truthy(&self.fields, &["subnet-id", "subnet_id"]).and_then(subnet_key)
    }
}
