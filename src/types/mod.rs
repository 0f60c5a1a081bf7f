mod amount;
mod errors;
mod rate_table;

pub use amount::{parse_amount, round_total, to_fixed};
pub use errors::AmountError;
pub use rate_table::RateTable;
