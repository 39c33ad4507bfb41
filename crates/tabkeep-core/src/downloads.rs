//! Save-path suggestions for downloads and screenshots

use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};

pub fn sanitize_file_name(file_name: &str) -> String {
    let name = Path::new(file_name)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("download")
        .trim();

    if name.is_empty() {
        "download".to_string()
    } else {
        name.to_string()
    }
}

pub fn suggested_download_path(download_dir: &Path, file_name: &str) -> PathBuf {
    download_dir.join(sanitize_file_name(file_name))
}

pub fn suggested_screenshot_path(download_dir: &Path, at: DateTime<Local>) -> PathBuf {
    download_dir.join(format!("screenshot-{}.png", at.format("%Y%m%d-%H%M%S")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_sanitize_strips_directories() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("report.pdf"), "report.pdf");
        assert_eq!(sanitize_file_name("  "), "download");
        assert_eq!(sanitize_file_name(""), "download");
    }

    #[test]
    fn test_screenshot_name() {
        let at = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(
            suggested_screenshot_path(Path::new("/dl"), at),
            PathBuf::from("/dl/screenshot-20240309-140507.png")
        );
    }
}
