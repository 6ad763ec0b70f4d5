//! Report naming

use chrono::{DateTime, Local};
use std::fmt;
use std::path::{Path, PathBuf};

/// Prefix of every generated report file
const REPORT_PREFIX: &str = "inftest-report-";

/// Timestamp layout embedded in the report file name
const REPORT_TIMESTAMP: &str = "%Y.%m.%d-%H.%M.%S";

/// Name of the report all scripts in one run append into
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportName {
    project: Option<String>,
    file_name: String,
}

impl ReportName {
    /// Report name stamped with the current local time
    pub fn generate(project: Option<&str>) -> Self {
        Self::at(Local::now(), project)
    }

    /// Report name stamped with `time`
    pub fn at(time: DateTime<Local>, project: Option<&str>) -> Self {
        Self {
            project: project.map(str::to_string),
            file_name: format!("{REPORT_PREFIX}{}.html", time.format(REPORT_TIMESTAMP)),
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn project(&self) -> Option<&str> {
        self.project.as_deref()
    }

    /// Path relative to the report directory, as handed to JMeter
    pub fn relative(&self) -> PathBuf {
        match &self.project {
            Some(project) => Path::new(project).join(&self.file_name),
            None => PathBuf::from(&self.file_name),
        }
    }

    /// Full path of the report under `report_dir`
    pub fn path_under(&self, report_dir: &Path) -> PathBuf {
        report_dir.join(self.relative())
    }
}

impl fmt::Display for ReportName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.relative().display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap()
    }

    #[test]
    fn test_file_name_pattern() {
        let report = ReportName::at(fixed_time(), None);
        assert_eq!(report.file_name(), "inftest-report-2024.03.09-07.05.01.html");
        assert_eq!(report.relative(), PathBuf::from(report.file_name()));
    }

    #[test]
    fn test_project_only_changes_directory() {
        let time = fixed_time();
        let shop = ReportName::at(time, Some("shop"));
        let billing = ReportName::at(time, Some("billing"));

        assert_eq!(shop.file_name(), billing.file_name());
        assert_eq!(shop.relative(), Path::new("shop").join(shop.file_name()));
        assert_eq!(billing.relative(), Path::new("billing").join(billing.file_name()));
        assert_eq!(shop.project(), Some("shop"));
    }

    #[test]
    fn test_path_under_report_dir() {
        let report = ReportName::at(fixed_time(), Some("shop"));
        let path = report.path_under(Path::new("/opt/jmeter/htmlreport"));
        assert_eq!(
            path,
            PathBuf::from("/opt/jmeter/htmlreport/shop/inftest-report-2024.03.09-07.05.01.html")
        );
    }

    #[test]
    fn test_generate_matches_pattern() {
        let name = ReportName::generate(None).file_name().to_string();
        assert!(name.starts_with(REPORT_PREFIX));
        assert!(name.ends_with(".html"));
        assert_eq!(name.len(), REPORT_PREFIX.len() + "2024.03.09-07.05.01".len() + 5);
    }
}
