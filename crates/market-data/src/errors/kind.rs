/// Classification of a failed fetch.
///
/// The refresh cycle only logs failures, but the front-end and the logs
/// distinguish an unreachable provider from a provider that answered with
/// something we could not read.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FetchErrorKind {
    /// Bad URL, transport failure or a non-200 HTTP status.
    Network,

    /// The payload did not have the expected shape or carried no result.
    Parse,
}
