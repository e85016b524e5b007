/// Summary of one spike or target data exchange on the calling rank
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExchangeReport {
    /// Collective all-to-all calls issued
    pub rounds: usize,
    /// Records written into the send buffer over all rounds
    pub records_sent: usize,
    /// Times a record was pushed back to a later round because its segment was full
    pub records_deferred: usize,
    /// Received records handed to the connection layer
    pub records_delivered: usize,
}
