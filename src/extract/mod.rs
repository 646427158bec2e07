//! Page analysis: price, stock state, option groups and product name.
//!
//! Every function here is pure over a parsed [`Document`](crate::page::Document)
//! and a [`CompiledAdapter`](crate::adapter::CompiledAdapter). Absence is
//! reported as `None`/`false`, never as an error.

pub mod candidates;
pub mod name;
pub mod options;
pub mod price;
pub mod stock;

pub use candidates::extract_price;
pub use name::extract_product_name;
pub use options::detect_option_groups;
pub use price::{is_valid_price_context, parse_price};
pub use stock::{detect_stock_state, StockState};
