use crate::DomainError;
use ipnetwork::Ipv4Network;
use std::fmt;
use std::net::Ipv4Addr;

pub const DEFAULT_IPV4_PREFIX: u8 = 24;

/// Source network announced to the upstream in an EDNS Client Subnet option.
///
/// The address is always stored masked to the prefix, so host bits of the
/// client never leave the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EcsSubnet {
    network: Ipv4Network,
}

impl EcsSubnet {
    pub fn new(address: Ipv4Addr, source_prefix: u8) -> Result<Self, DomainError> {
        let unmasked = Ipv4Network::new(address, source_prefix).map_err(|e| {
            DomainError::InvalidCidr(format!("{}/{}: {}", address, source_prefix, e))
        })?;
        let network = Ipv4Network::new(unmasked.network(), source_prefix)
            .map_err(|e| DomainError::InvalidCidr(e.to_string()))?;
        Ok(Self { network })
    }

    /// Derive the subnet from a forwarded-for style header value.
    ///
    /// Only the left-most entry (the original client) is considered. Returns
    /// `None` when that entry is empty, not an address, or not IPv4.
    pub fn from_forwarded_header(value: &str, source_prefix: u8) -> Option<Self> {
        let first = value.split(',').next()?.trim();
        if first.is_empty() {
            return None;
        }
        let address: Ipv4Addr = first.parse().ok()?;
        Self::new(address, source_prefix).ok()
    }

    pub fn address(&self) -> Ipv4Addr {
        self.network.network()
    }

    pub fn source_prefix(&self) -> u8 {
        self.network.prefix()
    }
}

impl fmt::Display for EcsSubnet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.address(), self.source_prefix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masks_host_bits() {
        let subnet = EcsSubnet::new(Ipv4Addr::new(203, 0, 113, 7), 24).unwrap();
        assert_eq!(subnet.address(), Ipv4Addr::new(203, 0, 113, 0));
        assert_eq!(subnet.source_prefix(), 24);
        assert_eq!(subnet.to_string(), "203.0.113.0/24");
    }

    #[test]
    fn test_rejects_prefix_out_of_range() {
        assert!(EcsSubnet::new(Ipv4Addr::LOCALHOST, 33).is_err());
    }
}
