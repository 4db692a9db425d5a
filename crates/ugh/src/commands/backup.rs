use crate::backup::BackupValidator;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;

/// Check the backups of the given process ids.
///
/// Every id is checked; failures are reported as error messages rather than
/// aborting the run.
pub fn run<S: AsRef<str>>(validator: &BackupValidator, ids: &[S]) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    for outcome in validator.validate_all(ids) {
        match outcome {
            Ok(report) => result.backups.push(report),
            Err(err) => result.add_message(CmdMessage::error(err.to_string())),
        }
    }

    if !result.has_errors() && !result.backups.is_empty() {
        result.add_message(CmdMessage::success(format!(
            "{} backup(s) ok.",
            result.backups.len()
        )));
    }
    Ok(result)
}
