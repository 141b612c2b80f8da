//! The contract shared by every query result

use crate::domain::Status;
use crate::error::RsmiError;

/// A status plus a metric-specific payload
///
/// When the status is a failure the payload holds neutral values (zeros,
/// empty sequences); see each implementor for the exact rule.
pub trait QueryResult: Sized {
    /// A result carrying `status` and an all-neutral payload
    fn neutral(status: Status) -> Self;

    /// The status reported for this query
    fn status(&self) -> Status;

    fn is_success(&self) -> bool {
        self.status().is_success()
    }

    /// Lift the in-band status into a `Result`
    fn into_result(self) -> Result<Self, RsmiError> {
        self.status().into_result().map(|()| self)
    }
}
