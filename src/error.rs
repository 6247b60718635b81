use derive_more::{Display, From};

/// Failure of a ledger operation. Lookups signal "not found" through
/// `Ok(None)` rather than an error variant, so an `Err` always means the
/// operation itself failed and its transaction was rolled back.
#[derive(Debug, Display, From)]
pub enum LedgerError {
    #[display(fmt = "database error: {}", _0)]
    Db(sqlx::Error),
}

impl std::error::Error for LedgerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LedgerError::Db(e) => Some(e),
        }
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;
