//! Tests for roster loading.

use std::io::Write;

use tempfile::{NamedTempFile, TempDir};

use super::{Roster, RosterError, RosterLoader};
use crate::device::Device;

fn load_str(content: &str) -> Result<Roster, RosterError> {
    RosterLoader::new().from_reader(content.as_bytes())
}

mod acceptance {
    use super::*;

    #[test]
    fn accepts_row_with_vendor_prefix() {
        let roster = load_str("000b82AABBCC,alice,pw1,auth1\n").unwrap();

        assert_eq!(
            roster.devices,
            vec![Device::new("000b82AABBCC", "alice", "pw1", "auth1")]
        );
        assert!(roster.rejected.is_empty());
    }

    #[test]
    fn prefix_match_ignores_case() {
        let roster = load_str("000B82000001,a,b,c\n000b82000002,d,e,f\n").unwrap();
        assert_eq!(roster.devices.len(), 2);
    }

    #[test]
    fn rejects_row_with_foreign_prefix() {
        let roster = load_str("AA1122334455,bob,pw,auth\n").unwrap();

        assert!(roster.is_empty());
        assert_eq!(roster.rejected, vec!["AA1122334455".to_string()]);
    }

    #[test]
    fn preserves_input_order_and_skips_rejects() {
        let content = "\
000b82000003,c,pc,ac
AA0000000000,x,px,ax
000b82000001,a,pa,aa
BB0000000000,y,py,ay
000b82000002,b,pb,ab
";
        let roster = load_str(content).unwrap();

        let macs: Vec<&str> = roster.devices.iter().map(|d| d.mac.as_str()).collect();
        assert_eq!(macs, ["000b82000003", "000b82000001", "000b82000002"]);
        assert_eq!(roster.rejected, ["AA0000000000", "BB0000000000"]);
    }

    #[test]
    fn mac_is_kept_verbatim() {
        let roster = load_str("000b82:aa:bb:cc,u,p,a\n").unwrap();
        assert_eq!(roster.devices[0].mac, "000b82:aa:bb:cc");
    }

    #[test]
    fn empty_fields_are_allowed() {
        let roster = load_str("000b82000001,,,\n").unwrap();
        assert_eq!(roster.devices, vec![Device::new("000b82000001", "", "", "")]);
    }
}

mod format {
    use super::*;

    #[test]
    fn empty_input_yields_empty_roster() {
        let roster = load_str("").unwrap();
        assert!(roster.is_empty());
        assert!(roster.rejected.is_empty());
    }

    #[test]
    fn first_row_is_not_treated_as_header() {
        let roster = load_str("000b82000001,u,p,a\n").unwrap();
        assert_eq!(roster.devices.len(), 1);
    }

    #[test]
    fn quoted_fields_may_contain_commas() {
        let roster = load_str("\"000b82000001\",\"alice\",\"p,w\",\"auth\"\n").unwrap();
        assert_eq!(roster.devices[0].password, "p,w");
    }

    #[test]
    fn quoted_fields_may_contain_escaped_quotes() {
        let roster = load_str("000b82000001,alice,\"say \"\"hi\"\"\",auth\n").unwrap();
        assert_eq!(roster.devices[0].password, "say \"hi\"");
    }

    #[test]
    fn crlf_line_endings_are_supported() {
        let roster = load_str("000b82000001,a,b,c\r\n000b82000002,d,e,f\r\n").unwrap();
        assert_eq!(roster.devices.len(), 2);
        assert_eq!(roster.devices[0].auth_id, "c");
    }

    #[test]
    fn missing_trailing_newline_is_fine() {
        let roster = load_str("000b82000001,a,b,c").unwrap();
        assert_eq!(roster.devices.len(), 1);
    }

    #[test]
    fn too_few_fields_fails_whole_load() {
        let result = load_str("000b82000001,a,b,c\n000b82000002,d,e\n");

        match result {
            Err(RosterError::FieldCount { line, found }) => {
                assert_eq!(line, 2);
                assert_eq!(found, 3);
            }
            other => panic!("Expected FieldCount, got {other:?}"),
        }
    }

    #[test]
    fn too_many_fields_fails_whole_load() {
        let result = load_str("000b82000001,a,b,c,extra\n");
        assert!(matches!(
            result,
            Err(RosterError::FieldCount { found: 5, .. })
        ));
    }

    #[test]
    fn short_row_with_foreign_prefix_still_fails() {
        let result = load_str("AA1122334455\n");
        assert!(matches!(
            result,
            Err(RosterError::FieldCount { found: 1, .. })
        ));
    }

    #[test]
    fn invalid_utf8_is_a_parse_error() {
        let bytes: &[u8] = b"000b82000001,\xff\xfe,b,c\n";
        let result = RosterLoader::new().from_reader(bytes);
        assert!(matches!(result, Err(RosterError::Parse(_))));
    }
}

mod file {
    use super::*;

    #[test]
    fn load_reads_file_from_disk() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "000b82AABBCC,alice,pw1,auth1").unwrap();
        writeln!(file, "AA1122334455,bob,pw2,auth2").unwrap();

        let roster = RosterLoader::new().load(file.path()).unwrap();

        assert_eq!(roster.devices.len(), 1);
        assert_eq!(roster.devices[0].user, "alice");
        assert_eq!(roster.rejected, ["AA1122334455"]);
    }

    #[test]
    fn load_missing_file_returns_open_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("MAC.csv");

        let result = RosterLoader::new().load(&path);

        match result {
            Err(RosterError::Open { path: p, .. }) => assert_eq!(p, path),
            other => panic!("Expected Open error, got {other:?}"),
        }
    }

    #[test]
    fn open_error_message_names_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.csv");

        let error = RosterLoader::new().load(&path).unwrap_err();
        assert!(error.to_string().contains("missing.csv"));
    }
}
