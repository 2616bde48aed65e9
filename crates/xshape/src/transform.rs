//! Document transform operations
//!
//! Every operation parses its own input, builds a fresh output tree or
//! value, and returns; nothing is shared between calls, so callers may
//! run them concurrently without coordination.

pub mod channels;
pub mod customers;
pub mod grouping;
pub mod orders;
pub mod text;

pub use channels::{channel_ids, ChannelIds};
pub use customers::{customers_from_csv, replace_customers_with_contacts, sort_customers};
pub use grouping::create_hierarchy;
pub use orders::{orders_value, purchase_orders};
pub use text::{concatenation_string, flatten_string};
