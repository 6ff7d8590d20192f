pub mod doh;
pub mod health;

pub use doh::{get_dns_query, post_dns_query};
pub use health::health_check;
