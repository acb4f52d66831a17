/// Logs the error of a [`Result`] as a warning and carries on. For failures
/// that can happen under normal operation but should still be visible.
#[macro_export]
macro_rules! log_err_as_warn {
    ($arg: expr) => {
        if let Err(err) = $arg {
            tracing::warn!(?err);
        }
    };
    ($arg: expr, $msg: literal) => {
        if let Err(err) = $arg {
            tracing::warn!(?err, $msg);
        }
    };
}
