use crate::utils::error::RseError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_BASE_URL: &str = "https://api.rsecloud.com/api/v1";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryType {
    Subdomain,
    CertificateByDomain,
    CertificateByOrg,
}

impl QueryType {
    pub fn path(&self) -> &'static str {
        match self {
            QueryType::Subdomain => "subdomains",
            QueryType::CertificateByDomain => "searchCertificatesByDomain",
            QueryType::CertificateByOrg => "searchCertificatesByOrgName",
        }
    }

    pub fn payload<'a>(&self, query: &'a str) -> QueryPayload<'a> {
        match self {
            QueryType::Subdomain | QueryType::CertificateByDomain => {
                QueryPayload::Domain { domain: query }
            }
            QueryType::CertificateByOrg => QueryPayload::Org { org_name: query },
        }
    }

    pub fn is_certificate(&self) -> bool {
        !matches!(self, QueryType::Subdomain)
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QueryType::Subdomain => "subdomain",
            QueryType::CertificateByDomain => "certificate-by-domain",
            QueryType::CertificateByOrg => "certificate-by-org",
        };
        f.write_str(name)
    }
}

impl FromStr for QueryType {
    type Err = RseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "subdomain" => Ok(QueryType::Subdomain),
            "certificate-by-domain" => Ok(QueryType::CertificateByDomain),
            "certificate-by-org" => Ok(QueryType::CertificateByOrg),
            other => Err(RseError::InvalidQueryType {
                value: other.to_string(),
            }),
        }
    }
}

/// Request body: `{"domain": ..}` or `{"org_name": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum QueryPayload<'a> {
    Domain { domain: &'a str },
    Org { org_name: &'a str },
}

/// Everything needed to issue the requests for one query. Built once, never mutated.
#[derive(Clone)]
pub struct QueryDescriptor {
    query_type: QueryType,
    query: String,
    base_url: String,
    api_key: String,
}

impl QueryDescriptor {
    pub fn new(
        query_type: QueryType,
        query: impl Into<String>,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            query_type,
            query: query.into(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    pub fn query_type(&self) -> QueryType {
        self.query_type
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.query_type.path()
        )
    }

    pub fn payload(&self) -> QueryPayload<'_> {
        self.query_type.payload(&self.query)
    }
}

impl fmt::Debug for QueryDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryDescriptor")
            .field("query_type", &self.query_type)
            .field("query", &self.query)
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Reads `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One page of results as returned by the API.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    #[serde(default, deserialize_with = "null_as_default")]
    pub count: u64,
    #[serde(default = "Vec::new", deserialize_with = "null_as_default")]
    pub data: Vec<T>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub page: u32,
    #[serde(
        default,
        rename = "pagesize",
        alias = "page_size",
        deserialize_with = "null_as_default"
    )]
    pub page_size: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_pages: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificateRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub ip: String,
    /// Arrives as either `"443"` or `443`; see `core::port::normalize_port`.
    #[serde(default)]
    pub port: serde_json::Value,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subject_cn: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subject_org: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub timestamp: String,
}
