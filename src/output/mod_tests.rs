//! Tests for output writers.

use tempfile::TempDir;

use crate::output::mock::MockOutputWriter;
use crate::output::{DryRunWriter, FileOutputWriter, OutputWriter, WriteError};

mod file_output_writer {
    use super::*;

    #[test]
    fn writes_into_existing_directory() {
        let dir = TempDir::new().unwrap();

        let path = FileOutputWriter::new()
            .write(dir.path(), "cfg000b82000001.xml", b"<xml/>")
            .unwrap();

        assert_eq!(path, dir.path().join("cfg000b82000001.xml"));
        assert_eq!(std::fs::read(&path).unwrap(), b"<xml/>");
    }

    #[test]
    fn creates_missing_nested_directories() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("provisioning").join("GrandStream");

        let path = FileOutputWriter::new()
            .write(&output, "cfg000b82000001.xml", b"data")
            .unwrap();

        assert!(output.is_dir());
        assert!(path.exists());
    }

    #[test]
    fn repeated_writes_into_same_directory_succeed() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("out");
        let writer = FileOutputWriter::new();

        writer.write(&output, "a.xml", b"a").unwrap();
        writer.write(&output, "b.xml", b"b").unwrap();

        assert_eq!(std::fs::read_dir(&output).unwrap().count(), 2);
    }

    #[test]
    fn overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let writer = FileOutputWriter::new();

        writer.write(dir.path(), "cfg.xml", b"old content").unwrap();
        let path = writer.write(dir.path(), "cfg.xml", b"new").unwrap();

        assert_eq!(std::fs::read(path).unwrap(), b"new");
    }

    #[test]
    fn directory_blocked_by_file_returns_create_dir_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        let result = FileOutputWriter::new().write(&blocker.join("sub"), "cfg.xml", b"x");

        match result {
            Err(WriteError::CreateDir { path, .. }) => assert_eq!(path, blocker.join("sub")),
            other => panic!("Expected CreateDir error, got {other:?}"),
        }
    }

    #[test]
    fn unwritable_target_returns_write_error() {
        let dir = TempDir::new().unwrap();
        // A directory with the target name makes the file write fail
        std::fs::create_dir(dir.path().join("cfg.xml")).unwrap();

        let result = FileOutputWriter::new().write(dir.path(), "cfg.xml", b"x");

        match result {
            Err(WriteError::Write { path, .. }) => assert_eq!(path, dir.path().join("cfg.xml")),
            other => panic!("Expected Write error, got {other:?}"),
        }
    }

    #[test]
    fn error_message_names_path() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("cfg.xml")).unwrap();

        let error = FileOutputWriter::new()
            .write(dir.path(), "cfg.xml", b"x")
            .unwrap_err();

        assert!(error.to_string().contains("cfg.xml"));
    }
}

mod dry_run_writer {
    use super::*;

    #[test]
    fn returns_target_path_without_touching_disk() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("never-created");

        let path = DryRunWriter.write(&output, "cfg.xml", b"data").unwrap();

        assert_eq!(path, output.join("cfg.xml"));
        assert!(!output.exists());
    }
}

mod mock_writer {
    use super::*;
    use std::path::Path;

    #[test]
    fn records_writes_in_order() {
        let writer = MockOutputWriter::new();

        writer.write(Path::new("out"), "a.xml", b"a").unwrap();
        writer.write(Path::new("out"), "b.xml", b"b").unwrap();

        assert_eq!(
            writer.written_paths(),
            vec![Path::new("out/a.xml"), Path::new("out/b.xml")]
        );
        assert_eq!(writer.content_of(Path::new("out/b.xml")).unwrap(), b"b");
    }

    #[test]
    fn injected_failure_is_reported() {
        let writer = MockOutputWriter::failing_on("b.xml");

        assert!(writer.write(Path::new("out"), "a.xml", b"a").is_ok());
        assert!(matches!(
            writer.write(Path::new("out"), "b.xml", b"b"),
            Err(WriteError::Write { .. })
        ));
        assert_eq!(writer.written_paths().len(), 1);
    }
}
