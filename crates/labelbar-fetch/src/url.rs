//! IG URL construction.

use chrono::{DateTime, Datelike, Timelike, Utc};

/// Builds the login URL.
#[must_use]
pub fn session_url(base: &str) -> String {
    format!("{}/session", base.trim_end_matches('/'))
}

/// Builds the chart snapshot URL for one-minute bars of `epic` between
/// the minutes containing `start` and `end`.
///
/// URL format: `{base}/chart/snapshot/{EPIC}/1/MINUTE/batch/start/{Y}/{M}/{D}/{h}/{m}/0/0/end/{Y}/{M}/{D}/{h}/{m}/59/999?format=json`
///
/// Calendar fields are not zero-padded and months are 1-based. The end
/// bound is the last millisecond of its minute.
///
/// # Example
///
/// ```
/// use labelbar_fetch::url::snapshot_url;
/// use chrono::{TimeZone, Utc};
///
/// let start = Utc.with_ymd_and_hms(2025, 1, 2, 6, 5, 0).unwrap();
/// let end = Utc.with_ymd_and_hms(2025, 1, 7, 14, 30, 0).unwrap();
/// let url = snapshot_url("https://deal.ig.com", "CS.D.CFDGOLD.BMU.IP", start, end);
/// assert_eq!(
///     url,
///     "https://deal.ig.com/chart/snapshot/CS.D.CFDGOLD.BMU.IP/1/MINUTE/batch/start/2025/1/2/6/5/0/0/end/2025/1/7/14/30/59/999?format=json"
/// );
/// ```
#[must_use]
pub fn snapshot_url(base: &str, epic: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> String {
    format!(
        "{}/chart/snapshot/{}/1/MINUTE/batch/start/{}/{}/{}/{}/{}/0/0/end/{}/{}/{}/{}/{}/59/999?format=json",
        base.trim_end_matches('/'),
        epic,
        start.year(),
        start.month(),
        start.day(),
        start.hour(),
        start.minute(),
        end.year(),
        end.month(),
        end.day(),
        end.hour(),
        end.minute(),
    )
}
