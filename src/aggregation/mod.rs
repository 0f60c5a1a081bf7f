mod aggregator;
#[cfg(test)]
mod tests;

pub use aggregator::Aggregator;
