use async_trait::async_trait;
use bytes::Bytes;
use ferrous_doh_domain::DomainError;

/// A resolver that answers wire-format DNS queries.
#[async_trait]
pub trait DnsUpstream: Send + Sync {
    /// Send one wire-format query and return the raw wire-format reply.
    ///
    /// Implementations enforce their own deadline; dropping the returned
    /// future abandons the exchange.
    async fn exchange(&self, query: Bytes) -> Result<Bytes, DomainError>;

    /// Human readable address, used in logs.
    fn endpoint(&self) -> &str;
}
