use thiserror::Error;

#[derive(Debug, Error)]
pub enum AmountError {
    #[error("Amount error: Value is an empty string")]
    Empty,
    #[error("Amount error: [{value}] contains unexpected character '{character}'")]
    UnexpectedCharacter {
        value: String,
        character: char
    },
    #[error("Amount error: [{value}] is not a decimal number: {source}")]
    InvalidFormat {
        value: String,
        source: rust_decimal::Error
    }
}
