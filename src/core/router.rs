use crate::core::paginator::fetch_all;
use crate::core::port::normalize_port;
use crate::domain::model::{CertificateRecord, QueryDescriptor, QueryType};
use crate::domain::ports::PageSource;
use crate::utils::error::{Result, RseError};
use std::io::Write;

/// The three mutually exclusive ways to query the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryMode {
    Subdomain { domain: String },
    CertificateByDomain { domain: String },
    CertificateByOrg { org: String },
}

impl QueryMode {
    /// Picks a mode from the raw flag values. Blank values count as unset.
    pub fn from_flags(domain: Option<&str>, org: Option<&str>, certificate: bool) -> Result<Self> {
        let domain = domain.map(str::trim).filter(|d| !d.is_empty());
        let org = org.map(str::trim).filter(|o| !o.is_empty());

        match (domain, org, certificate) {
            (Some(_), Some(_), _) => Err(invalid(
                "a domain and an organization name cannot be combined",
            )),
            (None, Some(_), true) => Err(invalid(
                "certificate search by domain cannot be combined with an organization name",
            )),
            (None, None, true) => Err(invalid("certificate search requires a domain")),
            (None, None, false) => Err(invalid("a domain or an organization name must be provided")),
            (Some(domain), None, false) => Ok(QueryMode::Subdomain {
                domain: domain.to_string(),
            }),
            (Some(domain), None, true) => Ok(QueryMode::CertificateByDomain {
                domain: domain.to_string(),
            }),
            (None, Some(org), false) => Ok(QueryMode::CertificateByOrg {
                org: org.to_string(),
            }),
        }
    }

    pub fn query_type(&self) -> QueryType {
        match self {
            QueryMode::Subdomain { .. } => QueryType::Subdomain,
            QueryMode::CertificateByDomain { .. } => QueryType::CertificateByDomain,
            QueryMode::CertificateByOrg { .. } => QueryType::CertificateByOrg,
        }
    }

    pub fn query(&self) -> &str {
        match self {
            QueryMode::Subdomain { domain } | QueryMode::CertificateByDomain { domain } => domain,
            QueryMode::CertificateByOrg { org } => org,
        }
    }

    pub fn describe(&self, base_url: &str, api_key: &str) -> QueryDescriptor {
        QueryDescriptor::new(self.query_type(), self.query(), base_url, api_key)
    }
}

fn invalid(message: &str) -> RseError {
    RseError::ValidationError {
        message: message.to_string(),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub printed: usize,
    pub skipped: usize,
}

/// Runs `query` to completion and writes one line per record to `out`.
///
/// Nothing is written unless every page was fetched.
pub async fn execute<S, W>(source: &S, query: &QueryDescriptor, out: &mut W) -> Result<RunSummary>
where
    S: PageSource,
    W: Write,
{
    tracing::info!("🔍 {} search for '{}'", query.query_type(), query.query());

    let summary = if query.query_type().is_certificate() {
        let certificates: Vec<CertificateRecord> = fetch_all(source, query).await?;
        render_certificates(&certificates, out)?
    } else {
        let subdomains: Vec<String> = fetch_all(source, query).await?;
        render_subdomains(&subdomains, out)?
    };

    out.flush()?;
    tracing::info!(
        "✅ {} records printed, {} skipped",
        summary.printed,
        summary.skipped
    );
    Ok(summary)
}

fn render_subdomains<W: Write>(subdomains: &[String], out: &mut W) -> Result<RunSummary> {
    for subdomain in subdomains {
        writeln!(out, "{}", subdomain)?;
    }
    Ok(RunSummary {
        printed: subdomains.len(),
        skipped: 0,
    })
}

fn render_certificates<W: Write>(
    certificates: &[CertificateRecord],
    out: &mut W,
) -> Result<RunSummary> {
    let mut summary = RunSummary::default();
    for certificate in certificates {
        match normalize_port(&certificate.port) {
            Ok(port) => {
                writeln!(out, "{}:{}", certificate.ip, port)?;
                summary.printed += 1;
            }
            Err(e) => {
                tracing::warn!("⚠️ Skipping certificate for {}: {}", certificate.ip, e);
                summary.skipped += 1;
            }
        }
    }
    Ok(summary)
}
