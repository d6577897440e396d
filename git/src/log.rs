use changelog::CommitRecord;

/// `git log` format placing a unit separator between subject and body and a
/// record separator after each commit
pub const LOG_FORMAT: &str = "--format=%s%x1F%b%x1E";

const FIELD_SEPARATOR: char = '\u{1F}';
const RECORD_SEPARATOR: char = '\u{1E}';

/// Splits output produced with [`LOG_FORMAT`] into commit records.
///
/// Git terminates every record with a newline after the separator, which is
/// stripped from the start of the following record. Bodies are kept as is,
/// blank lines included.
pub fn parse_log_output(output: &str) -> Vec<CommitRecord> {
    output
        .split(RECORD_SEPARATOR)
        .map(|record| record.trim_start_matches(['\n', '\r']))
        .filter(|record| !record.trim().is_empty())
        .map(|record| match record.split_once(FIELD_SEPARATOR) {
            Some((subject, body)) => CommitRecord::new(subject, body.trim_end()),
            None => CommitRecord::new(record.trim_end(), ""),
        })
        .collect()
}
