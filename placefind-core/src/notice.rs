//! Short user-facing messages that are not treated as errors.

use std::path::PathBuf;

/// Informational or failure message shown instead of a page of rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Previous page requested while already on the first page.
    FirstPage,
    /// Next page requested after the service reported the last page.
    LastPage,
    /// Search requested without a keyword.
    EmptyKeyword,
    /// Page fetch failed; the cached session is unchanged.
    SearchFailed { reason: String },
    /// Export requested with no cached results.
    NoDataToSave,
    /// Export finished.
    Saved { path: PathBuf },
    /// Export failed; details are in the error log.
    SaveFailed { reason: String },
}

impl Notice {
    /// Whether the notice reports a failure rather than a navigation hint.
    pub fn is_failure(&self) -> bool {
        matches!(self, Notice::SearchFailed { .. } | Notice::SaveFailed { .. })
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::FirstPage => write!(f, "첫번째 페이지 입니다."),
            Notice::LastPage => write!(f, "마지막 페이지 입니다."),
            Notice::EmptyKeyword => write!(f, "검색어를 입력하세요."),
            Notice::SearchFailed { reason } => write!(f, "검색 중 오류가 발생했습니다: {reason}"),
            Notice::NoDataToSave => write!(f, "저장할 데이터가 없습니다."),
            Notice::Saved { path } => {
                write!(f, "엑셀 파일로 저장되었습니다: {}", path.display())
            }
            Notice::SaveFailed { reason } => write!(f, "엑셀 저장 중 오류: {reason}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_classification() {
        assert!(!Notice::FirstPage.is_failure());
        assert!(!Notice::NoDataToSave.is_failure());
        assert!(
            Notice::SearchFailed {
                reason: "timeout".to_string()
            }
            .is_failure()
        );
    }

    #[test]
    fn test_navigation_messages() {
        assert_eq!(Notice::FirstPage.to_string(), "첫번째 페이지 입니다.");
        assert_eq!(Notice::LastPage.to_string(), "마지막 페이지 입니다.");
        assert_eq!(Notice::NoDataToSave.to_string(), "저장할 데이터가 없습니다.");
    }
}
