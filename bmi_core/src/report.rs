//! Plain-text result reports.
//!
//! A report is three lines: the user's name, the BMI label and the category
//! label. Files are written through a temp file in the target directory and
//! renamed into place, so a reader never sees a half-written report.

use crate::{BmiResult, Error, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Extension given to report paths chosen without one
pub const DEFAULT_EXTENSION: &str = "txt";

/// Append `.txt` to a path that has no extension.
///
/// Returns the final path and whether it was changed. A changed path is not
/// the one the user confirmed, so callers must not replace an existing file
/// at it without asking again.
pub fn with_default_extension(path: PathBuf) -> (PathBuf, bool) {
    if path.extension().is_some() {
        return (path, false);
    }
    let mut path = path;
    path.set_extension(DEFAULT_EXTENSION);
    (path, true)
}

/// Render the report text for a result
pub fn render(name: &str, result: &BmiResult) -> String {
    format!(
        "Name: {}\n{}\n{}",
        name,
        result.bmi_label(),
        result.category_label()
    )
}

/// Write a report to `path`, replacing any existing file
pub fn write_report(path: &Path, name: &str, result: &BmiResult) -> Result<()> {
    let temp = write_temp(path, name, result)?;
    temp.persist(path).map_err(|e| Error::Io(e.error))?;

    tracing::info!("Saved BMI report to {:?}", path);
    Ok(())
}

/// Write a report to `path`, failing with `FileExists` if it is already there
pub fn write_report_new(path: &Path, name: &str, result: &BmiResult) -> Result<()> {
    let temp = write_temp(path, name, result)?;
    temp.persist_noclobber(path).map_err(|e| {
        if e.error.kind() == std::io::ErrorKind::AlreadyExists {
            Error::FileExists(path.to_path_buf())
        } else {
            Error::Io(e.error)
        }
    })?;

    tracing::info!("Saved BMI report to {:?}", path);
    Ok(())
}

fn write_temp(path: &Path, name: &str, result: &BmiResult) -> Result<NamedTempFile> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    // Same directory as the target so the final rename stays on one filesystem
    let temp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = std::io::BufWriter::new(temp.as_file());
        writer.write_all(render(name, result).as_bytes())?;
        writer.flush()?;
    }
    temp.as_file().sync_all()?;

    Ok(temp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{classify, Category};

    fn sample() -> BmiResult {
        BmiResult {
            bmi: 26.1224,
            category: Category::Overweight,
        }
    }

    #[test]
    fn test_render() {
        assert_eq!(
            render("Jane Doe", &sample()),
            "Name: Jane Doe\nBMI: 26.12\nCategory: Overweight"
        );
    }

    #[test]
    fn test_render_empty_name() {
        let result = classify(1.75, 50.0).unwrap();
        assert_eq!(render("", &result), "Name: \nBMI: 16.33\nCategory: Underweight");
    }

    #[test]
    fn test_default_extension() {
        let (path, changed) = with_default_extension(PathBuf::from("/tmp/results"));
        assert_eq!(path, PathBuf::from("/tmp/results.txt"));
        assert!(changed);

        let (path, changed) = with_default_extension(PathBuf::from("/tmp/results.log"));
        assert_eq!(path, PathBuf::from("/tmp/results.log"));
        assert!(!changed);
    }

    #[test]
    fn test_added_extension_does_not_clobber() {
        let temp_dir = tempfile::tempdir().unwrap();
        let existing = temp_dir.path().join("results.txt");
        std::fs::write(&existing, "keep me").unwrap();

        let (path, changed) = with_default_extension(temp_dir.path().join("results"));
        assert!(changed);
        let err = write_report_new(&path, "Me", &sample()).unwrap_err();
        assert!(matches!(err, Error::FileExists(p) if p == existing));
        assert_eq!(std::fs::read_to_string(&existing).unwrap(), "keep me");
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("reports").join("me.txt");

        write_report(&path, "Me", &sample()).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 3);
        assert_eq!(contents.lines().nth(1), Some("BMI: 26.12"));
    }

    #[test]
    fn test_write_replaces_existing() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("me.txt");
        std::fs::write(&path, "old contents").unwrap();

        write_report(&path, "Me", &sample()).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().starts_with("Name: Me"));
    }

    #[test]
    fn test_write_new_refuses_existing() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("me.txt");
        std::fs::write(&path, "old contents").unwrap();

        let err = write_report_new(&path, "Me", &sample()).unwrap_err();
        assert!(matches!(err, Error::FileExists(p) if p == path));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "old contents");
    }

    #[test]
    fn test_no_stray_temp_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("me.txt");
        std::fs::write(&path, "old contents").unwrap();

        let _ = write_report_new(&path, "Me", &sample());
        write_report(&path, "Me", &sample()).unwrap();

        let extras: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name() != "me.txt")
            .collect();
        assert!(
            extras.is_empty(),
            "Expected only me.txt, found extras: {:?}",
            extras
        );
    }
}
