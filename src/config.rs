//! Container configuration read from JSON.
//!
//! A configuration carries injector options plus plain value bindings.
//! Each binding becomes an [`ExplicitProvider`] whose token is
//! `Token::with_id(id, description)` and whose value is the raw
//! `serde_json::Value`.

use serde::{Deserialize, Serialize};

use crate::error::{DiError, DiResult};
use crate::lifetime::Lifetime;
use crate::options::InjectorOptions;
use crate::registration::ExplicitProvider;
use crate::token::Token;

/// A value bound to an explicit token id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueBinding {
    /// Token id. Must not be empty.
    pub id: String,
    /// Token description, defaults to the id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The bound value
    pub value: serde_json::Value,
    #[serde(default)]
    pub lifetime: Lifetime,
}

impl ValueBinding {
    /// The token this binding answers for.
    pub fn token(&self) -> Token {
        Token::with_id(self.id.as_str(), self.description.as_deref().unwrap_or(self.id.as_str()))
    }
}

/// Options and value bindings for a [`Container`](crate::Container).
///
/// # Examples
///
/// ```
/// use ferrous_injector::{Container, ContainerConfig, Resolve, Token};
///
/// let config = ContainerConfig::from_json_str(r#"{
///     "options": { "max_depth": 64 },
///     "bindings": [ { "id": "db.url", "value": "postgres://localhost" } ]
/// }"#).unwrap();
///
/// let container = Container::builder().config(&config).unwrap().build().unwrap();
/// let url = container.resolve::<serde_json::Value>(&Token::with_id("db.url", "")).unwrap();
/// assert_eq!(url.as_str(), Some("postgres://localhost"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    pub options: InjectorOptions,
    pub bindings: Vec<ValueBinding>,
}

impl ContainerConfig {
    /// Parses a configuration document.
    pub fn from_json_str(json: &str) -> DiResult<Self> {
        serde_json::from_str(json).map_err(|e| DiError::Config(format!("invalid container configuration: {e}")))
    }

    /// Parses a configuration from a reader.
    pub fn from_reader(reader: impl std::io::Read) -> DiResult<Self> {
        serde_json::from_reader(reader)
            .map_err(|e| DiError::Config(format!("invalid container configuration: {e}")))
    }

    /// Serializes back to pretty JSON.
    pub fn to_json_string(&self) -> DiResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| DiError::Config(e.to_string()))
    }

    /// One provider per binding, in document order.
    ///
    /// Fails on the first binding with an empty id.
    pub fn providers(&self) -> DiResult<Vec<ExplicitProvider>> {
        self.bindings
            .iter()
            .enumerate()
            .map(|(index, binding)| {
                if binding.id.is_empty() {
                    return Err(DiError::Config(format!("binding {index} has an empty id")));
                }
                ExplicitProvider::builder()
                    .token(binding.token())
                    .value(binding.value.clone())
                    .lifetime(binding.lifetime)
                    .build()
            })
            .collect()
    }
}
