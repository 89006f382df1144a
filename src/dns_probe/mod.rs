pub mod probe;
pub mod result;

pub mod prelude {
    pub use super::probe::{DnsResolver, resolve};
    pub use super::result::{AddressRecord, DnsOutcome, DnsResult};
}
