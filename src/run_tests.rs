//! Tests for the run module.

use std::path::Path;

use tempfile::TempDir;

use gs_provision::config::{Cli, ValidatedConfig};

use super::*;

/// Builds a config pointing at files inside `dir`.
fn config_in(dir: &TempDir, extra: &[&str]) -> ValidatedConfig {
    let base = dir.path().join("GsBaseConfig.txt");
    let devices = dir.path().join("MAC.csv");
    let output = dir.path().join("provisioning").join("GrandStream");

    let mut args = vec![
        "gs-provision".to_string(),
        "-c".to_string(),
        base.display().to_string(),
        "-d".to_string(),
        devices.display().to_string(),
        "-o".to_string(),
        output.display().to_string(),
    ];
    args.extend(extra.iter().map(ToString::to_string));

    ValidatedConfig::from_raw(&Cli::parse_from_iter(args), None).unwrap()
}

fn write_inputs(dir: &TempDir, roster: &str) {
    std::fs::write(dir.path().join("MAC.csv"), roster).unwrap();
    std::fs::write(
        dir.path().join("GsBaseConfig.txt"),
        "# Account 1 password\nP34=changeme\nP35=changeme\nP47=sip.example.com\n",
    )
    .unwrap();
}

fn output_file(dir: &TempDir, name: &str) -> std::path::PathBuf {
    dir.path().join("provisioning").join("GrandStream").join(name)
}

mod run_error {
    use super::*;

    #[test]
    fn template_error_displays_reason() {
        let error = RunError::Template(RenderError::Template {
            reason: "unclosed block".to_string(),
        });
        assert!(error.to_string().contains("unclosed block"));
    }

    #[test]
    fn pipeline_error_is_transparent() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir, &[]);

        let error = execute(&config).unwrap_err();

        assert!(matches!(error, RunError::Pipeline(PipelineError::Roster(_))));
        assert!(error.to_string().contains("MAC.csv"));
    }
}

mod execution {
    use super::*;

    #[test]
    fn writes_documents_for_valid_devices() {
        let dir = TempDir::new().unwrap();
        write_inputs(&dir, "000b82AABBCC,alice,pw1,auth1\nAA1122334455,bob,pw2,auth2\n");

        let summary = execute(&config_in(&dir, &[])).unwrap();

        assert_eq!(summary.written.len(), 1);
        assert_eq!(summary.rejected, 1);

        let xml = std::fs::read_to_string(output_file(&dir, "cfg000b82AABBCC.xml")).unwrap();
        assert!(xml.contains("<P34>pw1</P34>"));
        assert!(xml.contains("<P35>alice</P35>"));
        assert!(xml.contains("<P47>sip.example.com</P47>"));
        assert!(!output_file(&dir, "cfgAA1122334455.xml").exists());
    }

    #[test]
    fn dry_run_writes_nothing() {
        let dir = TempDir::new().unwrap();
        write_inputs(&dir, "000b82AABBCC,alice,pw1,auth1\n");

        let summary = execute(&config_in(&dir, &["--dry-run"])).unwrap();

        assert_eq!(summary.written, vec![output_file(&dir, "cfg000b82AABBCC.xml")]);
        assert!(!dir.path().join("provisioning").exists());
    }

    #[test]
    fn empty_roster_succeeds() {
        let dir = TempDir::new().unwrap();
        write_inputs(&dir, "");

        let summary = execute(&config_in(&dir, &[])).unwrap();

        assert!(summary.written.is_empty());
        assert!(summary.is_clean());
    }

    #[test]
    fn missing_base_config_aborts() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("MAC.csv"), "000b82AABBCC,alice,pw1,auth1\n").unwrap();

        let result = execute(&config_in(&dir, &[]));

        assert!(matches!(
            result,
            Err(RunError::Pipeline(PipelineError::Device { .. }))
        ));
    }

    #[test]
    fn missing_base_config_with_keep_going_reports_failures() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("MAC.csv"),
            "000b82000001,a,b,c\n000b82000002,d,e,f\n",
        )
        .unwrap();

        let summary = execute(&config_in(&dir, &["--keep-going"])).unwrap();

        assert_eq!(summary.failed.len(), 2);
        assert!(!summary.is_clean());
    }

    #[test]
    fn custom_template_is_used() {
        let dir = TempDir::new().unwrap();
        write_inputs(&dir, "000b82AABBCC,alice,pw1,auth1\n");
        let template = dir.path().join("plain.hbs");
        std::fs::write(&template, "{{#each settings}}{{id}}={{value}}\n{{/each}}").unwrap();

        execute(&config_in(&dir, &["--template", template.to_str().unwrap()])).unwrap();

        let content = std::fs::read_to_string(output_file(&dir, "cfg000b82AABBCC.xml")).unwrap();
        assert_eq!(content, "P34=pw1\nP35=alice\nP47=sip.example.com\n");
    }

    #[test]
    fn output_path_uses_configured_directory() {
        let dir = TempDir::new().unwrap();
        write_inputs(&dir, "000b82AABBCC,alice,pw1,auth1\n");

        let summary = execute(&config_in(&dir, &[])).unwrap();

        assert!(summary.written[0].starts_with(dir.path().join("provisioning")));
        assert_eq!(
            summary.written[0].file_name(),
            Some(Path::new("cfg000b82AABBCC.xml").as_os_str())
        );
    }
}
