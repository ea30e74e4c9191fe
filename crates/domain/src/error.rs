use thiserror::Error;

/// Faults attributable to a single input record.
///
/// Per-record failures are isolated: the offending record is dropped and the
/// rest of the batch still processes.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A field that should hold a decimal quantity could not be parsed.
    #[error("invalid decimal {value:?} for {field}")]
    InvalidAmount {
        field: &'static str,
        value: String,
    },
}
