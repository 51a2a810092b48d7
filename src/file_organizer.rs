/// Date-filtered relocation of files into a destination folder.
///
/// This module walks a source tree, picks every file whose modification time
/// falls inside a [`DateRange`], and moves it into a single destination folder.
/// Subdirectories are flattened: only the file name is kept, so two files with
/// the same name end up at the same target and the later move overwrites the
/// earlier one.
use crate::date_range::DateRange;
use crate::output::OutputFormatter;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A file that was moved during an organization run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovedFile {
    /// Where the file was found in the source tree.
    pub original_path: PathBuf,
    /// Where the file lives now.
    pub new_path: PathBuf,
}

/// Outcome of one organization run.
#[derive(Debug, Clone, Default)]
pub struct OrganizeReport {
    /// Number of non-directory entries inspected.
    pub scanned: usize,
    /// Files moved into the destination folder.
    pub moved: Vec<MovedFile>,
    /// Files whose rename failed, with the reason.
    pub failed: Vec<(PathBuf, String)>,
}

impl OrganizeReport {
    /// Files left in place because their modification time was out of range.
    pub fn out_of_range(&self) -> usize {
        self.scanned - self.moved.len() - self.failed.len()
    }

    /// Returns true if every matching file was moved.
    pub fn is_complete_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Errors that abort an organization run.
#[derive(Debug)]
pub enum OrganizeError {
    /// Failed to create the destination folder.
    DirectoryCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The source tree could not be traversed.
    WalkFailed {
        /// The entry being visited when the walk failed, if known.
        path: Option<PathBuf>,
        source: std::io::Error,
    },
}

impl std::fmt::Display for OrganizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DirectoryCreationFailed { path, source } => {
                write!(
                    f,
                    "could not create destination directory {}: {}",
                    path.display(),
                    source
                )
            }
            Self::WalkFailed {
                path: Some(path),
                source,
            } => {
                write!(f, "could not walk {}: {}", path.display(), source)
            }
            Self::WalkFailed { path: None, source } => {
                write!(f, "could not walk source tree: {}", source)
            }
        }
    }
}

impl std::error::Error for OrganizeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DirectoryCreationFailed { source, .. } | Self::WalkFailed { source, .. } => {
                Some(source)
            }
        }
    }
}

impl From<walkdir::Error> for OrganizeError {
    fn from(error: walkdir::Error) -> Self {
        let path = error.path().map(Path::to_path_buf);
        let source = error
            .into_io_error()
            .unwrap_or_else(|| std::io::Error::other("filesystem loop detected"));
        Self::WalkFailed { path, source }
    }
}

/// Result type for file organization operations.
pub type OrganizeResult<T> = Result<T, OrganizeError>;

/// Moves files from a source tree into a destination folder.
pub struct FileOrganizer;

impl FileOrganizer {
    /// Moves every file under `source` whose modification time lies strictly
    /// inside `range` into `destination`.
    ///
    /// `destination` (and any missing parents) is created before the walk
    /// starts. When it lies inside `source` it is not descended into.
    ///
    /// # Returns
    ///
    /// An `OrganizeReport` listing moved files and per-file move failures.
    /// A failed move does not stop the walk; a failure to read the tree does.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use fimov::date_range::DateRange;
    /// use fimov::file_organizer::FileOrganizer;
    /// use std::path::Path;
    ///
    /// let today = chrono::Local::now().date_naive();
    /// let (range, _) = DateRange::resolve("2020-01-01", Some("2020-12-31"), today)?;
    /// let report = FileOrganizer::organize(
    ///     Path::new("/media/camera"),
    ///     Path::new("/photos/2020"),
    ///     &range,
    /// )?;
    /// println!("Moved {} files", report.moved.len());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn organize(
        source: &Path,
        destination: &Path,
        range: &DateRange,
    ) -> OrganizeResult<OrganizeReport> {
        fs::create_dir_all(destination).map_err(|e| OrganizeError::DirectoryCreationFailed {
            path: destination.to_path_buf(),
            source: e,
        })?;

        let mut report = OrganizeReport::default();

        let walker = WalkDir::new(source)
            .into_iter()
            .filter_entry(|entry| !(entry.file_type().is_dir() && entry.path() == destination));

        for entry in walker {
            let entry = entry?;
            if entry.file_type().is_dir() {
                continue;
            }

            report.scanned += 1;

            let modified = entry
                .metadata()?
                .modified()
                .map_err(|e| OrganizeError::WalkFailed {
                    path: Some(entry.path().to_path_buf()),
                    source: e,
                })?;

            if !range.contains(modified) {
                continue;
            }

            let new_path = destination.join(entry.file_name());
            match fs::rename(entry.path(), &new_path) {
                Ok(()) => {
                    OutputFormatter::plain(&format!(
                        " - {} → {}/",
                        entry.file_name().to_string_lossy(),
                        destination.display()
                    ));
                    report.moved.push(MovedFile {
                        original_path: entry.path().to_path_buf(),
                        new_path,
                    });
                }
                Err(e) => {
                    OutputFormatter::error(&format!(
                        "Error moving file {}: {}",
                        entry.path().display(),
                        e
                    ));
                    report
                        .failed
                        .push((entry.path().to_path_buf(), e.to_string()));
                }
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date_range::{local_midnight, parse_date};
    use std::fs::{self, File};
    use std::time::SystemTime;
    use tempfile::TempDir;

    fn range(start: &str, end: &str) -> DateRange {
        DateRange::new(parse_date(start).unwrap(), parse_date(end).unwrap()).unwrap()
    }

    fn at_midnight(date: &str) -> SystemTime {
        local_midnight(parse_date(date).unwrap()).unwrap().into()
    }

    fn write_with_mtime(path: &Path, modified: SystemTime) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(path, "image data").expect("Failed to write test file");
        File::options()
            .write(true)
            .open(path)
            .and_then(|f| f.set_modified(modified))
            .expect("Failed to set modification time");
    }

    #[test]
    fn test_organize_moves_only_files_in_range() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let source = temp_dir.path().join("source");
        let destination = temp_dir.path().join("sorted").join("2020");

        write_with_mtime(&source.join("summer.jpg"), at_midnight("2020-06-15"));
        write_with_mtime(&source.join("old.jpg"), at_midnight("2019-12-31"));

        let report =
            FileOrganizer::organize(&source, &destination, &range("2020-01-01", "2020-12-31"))
                .expect("Failed to organize");

        assert_eq!(report.scanned, 2);
        assert_eq!(report.moved.len(), 1);
        assert_eq!(report.out_of_range(), 1);
        assert!(destination.join("summer.jpg").exists());
        assert!(!source.join("summer.jpg").exists());
        assert!(source.join("old.jpg").exists());
    }

    #[test]
    fn test_organize_creates_destination_even_without_matches() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let source = temp_dir.path().join("source");
        fs::create_dir(&source).unwrap();
        let destination = temp_dir.path().join("a").join("b");

        let report =
            FileOrganizer::organize(&source, &destination, &range("2020-01-01", "2020-12-31"))
                .expect("Failed to organize");

        assert!(destination.is_dir());
        assert_eq!(report.scanned, 0);
        assert!(report.is_complete_success());
    }

    #[test]
    fn test_organize_uses_existing_destination() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let source = temp_dir.path().join("source");
        let destination = temp_dir.path().join("sorted");
        fs::create_dir(&destination).unwrap();
        fs::write(destination.join("keep.jpg"), "already here").unwrap();
        write_with_mtime(&source.join("new.jpg"), at_midnight("2020-03-03"));

        FileOrganizer::organize(&source, &destination, &range("2020-01-01", "2020-12-31"))
            .expect("Failed to organize");

        assert!(destination.join("keep.jpg").exists());
        assert!(destination.join("new.jpg").exists());
    }

    #[test]
    fn test_organize_excludes_exact_boundaries() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let source = temp_dir.path().join("source");
        let destination = temp_dir.path().join("sorted");

        write_with_mtime(&source.join("start.jpg"), at_midnight("2020-01-01"));
        write_with_mtime(&source.join("end.jpg"), at_midnight("2020-12-31"));

        let report =
            FileOrganizer::organize(&source, &destination, &range("2020-01-01", "2020-12-31"))
                .expect("Failed to organize");

        assert!(report.moved.is_empty());
        assert!(source.join("start.jpg").exists());
        assert!(source.join("end.jpg").exists());
    }

    #[test]
    fn test_organize_flattens_subdirectories() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let source = temp_dir.path().join("source");
        let destination = temp_dir.path().join("sorted");

        write_with_mtime(
            &source.join("2020").join("trip").join("beach.jpg"),
            at_midnight("2020-07-01"),
        );

        let report =
            FileOrganizer::organize(&source, &destination, &range("2020-01-01", "2020-12-31"))
                .expect("Failed to organize");

        assert_eq!(report.moved.len(), 1);
        assert_eq!(report.moved[0].new_path, destination.join("beach.jpg"));
        assert!(destination.join("beach.jpg").exists());
        // Directories stay behind
        assert!(source.join("2020").join("trip").is_dir());
    }

    #[test]
    fn test_organize_skips_destination_inside_source() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let source = temp_dir.path().join("source");
        let destination = source.join("sorted");

        write_with_mtime(&source.join("a.jpg"), at_midnight("2020-02-02"));
        write_with_mtime(&destination.join("b.jpg"), at_midnight("2020-02-02"));

        let report =
            FileOrganizer::organize(&source, &destination, &range("2020-01-01", "2020-12-31"))
                .expect("Failed to organize");

        assert_eq!(report.scanned, 1);
        assert_eq!(report.moved.len(), 1);
        assert!(destination.join("a.jpg").exists());
        assert!(destination.join("b.jpg").exists());
    }

    #[test]
    fn test_organize_continues_after_failed_move() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let source = temp_dir.path().join("source");
        let destination = temp_dir.path().join("sorted");

        // A non-empty directory at the target name makes the rename fail
        fs::create_dir_all(destination.join("a.jpg")).unwrap();
        fs::write(destination.join("a.jpg").join("inner"), "occupied").unwrap();

        write_with_mtime(&source.join("a.jpg"), at_midnight("2020-02-02"));
        write_with_mtime(&source.join("b.jpg"), at_midnight("2020-03-03"));
        write_with_mtime(&source.join("z").join("c.jpg"), at_midnight("2020-04-04"));

        let report =
            FileOrganizer::organize(&source, &destination, &range("2020-01-01", "2020-12-31"))
                .expect("A failed move should not abort the walk");

        assert!(!report.is_complete_success());
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, source.join("a.jpg"));
        assert_eq!(report.moved.len(), 2);
        assert_eq!(report.out_of_range(), 0);
        assert!(source.join("a.jpg").exists());
        assert!(destination.join("b.jpg").is_file());
        assert!(destination.join("c.jpg").is_file());
    }

    #[test]
    fn test_organize_missing_source_is_walk_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let source = temp_dir.path().join("missing");
        let destination = temp_dir.path().join("sorted");

        let result =
            FileOrganizer::organize(&source, &destination, &range("2020-01-01", "2020-12-31"));
        assert!(matches!(result, Err(OrganizeError::WalkFailed { .. })));
    }

    #[test]
    fn test_organize_destination_creation_failure() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let source = temp_dir.path().join("source");
        fs::create_dir(&source).unwrap();
        let blocker = temp_dir.path().join("file");
        fs::write(&blocker, "not a directory").unwrap();

        let result = FileOrganizer::organize(
            &source,
            &blocker.join("sorted"),
            &range("2020-01-01", "2020-12-31"),
        );
        assert!(matches!(
            result,
            Err(OrganizeError::DirectoryCreationFailed { .. })
        ));
    }
}
