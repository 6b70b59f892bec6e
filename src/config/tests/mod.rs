//! Unit tests for the config module
//! No filesystem access except through `TempDir`.

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

use std::{collections::BTreeMap, fs, path::Path};

use tempfile::TempDir;

use crate::config::{
    ConfigError, ConfigFile, ConfigSource, ConfigStore, ConfigValue, IniDocument, MergeStrategy,
    ProjectLocator, expand, expand_home, merge,
};

fn source(name: &str, content: &str) -> ConfigSource {
    ConfigSource::parse(name, content).unwrap()
}

fn text(value: &str) -> ConfigValue {
    ConfigValue::Text(value.to_string())
}

fn table(entries: &[(&str, ConfigValue)]) -> ConfigValue {
    ConfigValue::Table(
        entries
            .iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect(),
    )
}

mod address {
    use super::*;

    #[test]
    fn dotted_section_splits_into_section_and_key() {
        assert_eq!(
            expand("a.b", None, true).unwrap(),
            ("a".to_string(), Some("b".to_string()))
        );
    }

    #[test]
    fn explicit_key_is_used_unchanged() {
        assert_eq!(
            expand("a", Some("b"), true).unwrap(),
            ("a".to_string(), Some("b".to_string()))
        );
        assert_eq!(
            expand("a.x", Some("b"), true).unwrap(),
            ("a.x".to_string(), Some("b".to_string()))
        );
    }

    #[test]
    fn bare_section_allowed_when_key_optional() {
        assert_eq!(expand("a", None, false).unwrap(), ("a".to_string(), None));
    }

    #[test]
    fn bare_section_rejected_when_key_required() {
        assert!(matches!(
            expand("a", None, true),
            Err(ConfigError::MissingKey)
        ));
    }

    #[test]
    fn splits_on_first_dot_only() {
        assert_eq!(
            expand("a.b.c", None, true).unwrap(),
            ("a".to_string(), Some("b.c".to_string()))
        );
    }

    #[test]
    fn empty_parts_are_rejected() {
        assert!(expand(".b", None, true).is_err());
        assert!(expand("a.", None, true).is_err());
    }
}

mod ini {
    use super::*;

    #[test]
    fn parses_sections_comments_and_both_delimiters() {
        let document = IniDocument::parse(
            "# leading comment\n[image]\ndefault = ubuntu:24.04\n; another\ncommand: /bin/zsh\n\n[ports]\n8080=80\n",
            Path::new("test.ini"),
        )
        .unwrap();

        assert_eq!(document.get("image", "default"), Some("ubuntu:24.04"));
        assert_eq!(document.get("image", "command"), Some("/bin/zsh"));
        assert_eq!(document.get("ports", "8080"), Some("80"));
        assert_eq!(document.get("ports", "9090"), None);
    }

    #[test]
    fn keys_are_case_insensitive() {
        let document =
            IniDocument::parse("[alias]\nCrSt = create --start\n", Path::new("t.ini")).unwrap();

        assert_eq!(document.get("alias", "crst"), Some("create --start"));
        assert_eq!(document.get("alias", "CRST"), Some("create --start"));
    }

    #[test]
    fn indented_lines_continue_the_previous_value() {
        let document =
            IniDocument::parse("[x]\ny = first\n  second\n", Path::new("t.ini")).unwrap();

        assert_eq!(document.get("x", "y"), Some("first\nsecond"));
    }

    #[test]
    fn entry_before_section_reports_file_and_line() {
        let error = IniDocument::parse("\nkey = value\n", Path::new("broken.ini")).unwrap_err();

        match error {
            ConfigError::Parse { path, line, .. } => {
                assert_eq!(path, Path::new("broken.ini"));
                assert_eq!(line, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn section_header_may_carry_a_comment() {
        let document = IniDocument::parse(
            "[alias] ; shortcuts\nls = list\n[image]# base\ndefault = debian\n",
            Path::new("t.ini"),
        )
        .unwrap();

        assert_eq!(document.get("alias", "ls"), Some("list"));
        assert_eq!(document.get("image", "default"), Some("debian"));
        assert!(IniDocument::parse("[alias] trailing\n", Path::new("t.ini")).is_err());
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!(IniDocument::parse("[open\n", Path::new("t.ini")).is_err());
        assert!(IniDocument::parse("[]\n", Path::new("t.ini")).is_err());
        assert!(IniDocument::parse("[x]\nno delimiter\n", Path::new("t.ini")).is_err());
        assert!(IniDocument::parse("[x]\n= value\n", Path::new("t.ini")).is_err());
    }

    #[test]
    fn repeated_sections_merge_and_repeated_keys_overwrite() {
        let document =
            IniDocument::parse("[x]\na = 1\n[y]\nb = 2\n[x]\na = 3\nc = 4\n", Path::new("t.ini"))
                .unwrap();

        assert_eq!(document.sections().count(), 2);
        assert_eq!(document.get("x", "a"), Some("3"));
        assert_eq!(document.get("x", "c"), Some("4"));
    }

    #[test]
    fn written_form_parses_back() {
        let mut document = IniDocument::default();
        document.set("image", "default", "debian");
        document.set("x", "multi", "one\ntwo");
        document.set("alias", "crst", "create --start");

        let written = document.to_string();
        assert!(written.starts_with("[image]\ndefault = debian\n\n[x]\n"));

        let reparsed = IniDocument::parse(&written, Path::new("t.ini")).unwrap();
        assert_eq!(reparsed, document);
    }

    #[test]
    fn remove_reports_whether_anything_changed() {
        let mut document = IniDocument::default();
        document.set("x", "y", "1");

        assert!(!document.remove_option("x", "z"));
        assert!(!document.remove_option("missing", "y"));
        assert!(document.remove_option("x", "y"));
        assert!(document.has_section("x"));
        assert!(document.remove_section("x"));
        assert!(!document.remove_section("x"));
    }
}

mod merging {
    use super::*;

    #[test]
    fn deep_merge_keeps_base_keys_missing_from_overlay() {
        let base = table(&[("x", table(&[("a", text("1")), ("b", text("2"))]))]);
        let overlay = table(&[("x", table(&[("a", text("9"))]))]);

        let merged = merge(base, overlay, MergeStrategy::Deep);

        assert_eq!(merged.get("x").unwrap().get("a"), Some(&text("9")));
        assert_eq!(merged.get("x").unwrap().get("b"), Some(&text("2")));
    }

    #[test]
    fn shallow_merge_replaces_whole_tables() {
        let base = table(&[("x", table(&[("a", text("1")), ("b", text("2"))]))]);
        let overlay = table(&[("x", table(&[("a", text("9"))]))]);

        let merged = merge(base, overlay, MergeStrategy::Shallow);

        assert_eq!(merged.get("x").unwrap().get("b"), None);
    }

    #[test]
    fn overlay_text_replaces_table() {
        let merged = merge(table(&[("a", text("1"))]), text("plain"), MergeStrategy::Deep);
        assert_eq!(merged, text("plain"));
    }
}

mod store {
    use super::*;

    fn layered() -> ConfigStore {
        ConfigStore::from_sources(vec![
            source("local.ini", "[x]\ny = 1\n[only_local]\nk = local\n"),
            source("user.ini", "[x]\ny = 2\nz = user\n[z]\ny = fallback\n"),
        ])
    }

    #[test]
    fn earlier_source_wins() {
        assert_eq!(layered().get("x", "y"), Some("1"));
    }

    #[test]
    fn falls_back_to_later_source_when_section_missing() {
        assert_eq!(layered().get("z", "y"), Some("fallback"));
    }

    #[test]
    fn missing_values_use_default() {
        let store = layered();
        assert_eq!(store.get("nope", "y"), None);
        assert_eq!(store.get_or("x", "nope", "default"), "default");
        assert_eq!(store.get_or("x", "y", "default"), "1");
    }

    #[test]
    fn section_unions_keys_with_priority() {
        let section = layered().get_section("x");

        let expected: BTreeMap<String, String> = [("y", "1"), ("z", "user")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        assert_eq!(section, expected);
        assert!(layered().get_section("missing").is_empty());
    }

    #[test]
    fn loads_relative_specs_from_project_root() {
        let temp = TempDir::new().unwrap();
        let project = temp.path().join("project");
        let nested = project.join("src/module");
        fs::create_dir_all(&nested).unwrap();
        fs::create_dir(project.join(".git")).unwrap();
        fs::write(project.join(".den.ini"), "[image]\ndefault = local\n").unwrap();

        let locator = ProjectLocator::new(&nested, None);
        let store = ConfigStore::load(&[".den.ini"], &locator).unwrap();

        assert_eq!(store.get("image", "default"), Some("local"));
        assert_eq!(store.sources()[0].path(), project.join(".den.ini"));
    }

    #[test]
    fn missing_files_are_skipped() {
        let temp = TempDir::new().unwrap();
        let locator = ProjectLocator::new(temp.path(), Some(temp.path().to_path_buf()));

        let store = ConfigStore::load(&[".den.ini", "~/absent.ini", "/definitely/absent.ini"], &locator)
            .unwrap();

        assert!(store.sources().is_empty());
    }

    #[test]
    fn malformed_file_fails_the_whole_load() {
        let temp = TempDir::new().unwrap();
        let good = temp.path().join("good.ini");
        let bad = temp.path().join("bad.ini");
        fs::write(&good, "[x]\ny = 1\n").unwrap();
        fs::write(&bad, "y = 1\n").unwrap();

        let locator = ProjectLocator::new(temp.path(), None);
        let specs = [good.display().to_string(), bad.display().to_string()];

        match ConfigStore::load(&specs, &locator) {
            Err(ConfigError::Parse { path, .. }) => assert_eq!(path, bad),
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}

mod project {
    use super::*;

    #[test]
    fn stops_at_home_and_uses_start() {
        let temp = TempDir::new().unwrap();
        let home = temp.path().join("home");
        let start = home.join("work/project");
        fs::create_dir_all(&start).unwrap();
        fs::create_dir(home.join(".git")).unwrap();

        let locator = ProjectLocator::new(&start, Some(home.clone()));

        assert_eq!(locator.locate(&[".git"]), start);
    }

    #[test]
    fn start_directory_itself_can_be_the_root() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".den.ini"), "").unwrap();

        let locator = ProjectLocator::new(temp.path(), None);

        assert_eq!(locator.locate(&[".git", ".den.ini"]), temp.path());
    }

    #[test]
    fn tilde_expands_into_home() {
        let home = Path::new("/home/dev");
        assert_eq!(
            expand_home("~/.config/den.ini", Some(home)),
            home.join(".config/den.ini")
        );
        assert_eq!(expand_home("/etc/den.ini", Some(home)), Path::new("/etc/den.ini"));
        assert_eq!(expand_home("~/x.ini", None), Path::new("~/x.ini"));
    }
}

mod file {
    use super::*;

    #[test]
    fn set_then_fresh_load_round_trips() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".den.ini");

        let mut file = ConfigFile::open(&path).unwrap();
        file.set_value("x", "y", "v");
        file.save().unwrap();

        let locator = ProjectLocator::new(temp.path(), None);
        let store = ConfigStore::load(&[path.display().to_string()], &locator).unwrap();
        assert_eq!(store.get("x", "y"), Some("v"));
    }

    #[test]
    fn save_creates_missing_parent_directories() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/config/den.ini");

        let mut file = ConfigFile::open(&path).unwrap();
        file.set_value("alias", "crst", "create --start");
        file.save().unwrap();

        let reopened = ConfigFile::open(&path).unwrap();
        assert_eq!(reopened.get("alias", "crst").unwrap(), "create --start");
    }

    #[test]
    fn missing_lookups_name_section_or_option() {
        let temp = TempDir::new().unwrap();
        let mut file = ConfigFile::open(temp.path().join("den.ini")).unwrap();

        assert_eq!(
            file.get("foo", "bar").unwrap_err().to_string(),
            "No `foo` section defined."
        );

        file.set_value("foo", "bar", "baz");
        assert_eq!(
            file.get("foo", "baz").unwrap_err().to_string(),
            "No `foo.baz` option defined."
        );
    }

    #[cfg(unix)]
    #[test]
    fn save_keeps_existing_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".den.ini");
        fs::write(&path, "[a]\nb = 1\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        let mut file = ConfigFile::open(&path).unwrap();
        file.set_value("a", "c", "2");
        file.save().unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
        assert!(fs::read_to_string(&path).unwrap().contains("c = 2"));
    }

    #[cfg(unix)]
    #[test]
    fn new_file_is_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let path = temp.path().join("den.ini");

        let mut file = ConfigFile::open(&path).unwrap();
        file.set_value("a", "b", "1");
        file.save().unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
    }

    #[test]
    fn malformed_existing_file_is_not_opened() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("den.ini");
        fs::write(&path, "garbage\n").unwrap();

        assert!(matches!(
            ConfigFile::open(&path),
            Err(ConfigError::Parse { .. })
        ));
        assert_eq!(fs::read_to_string(&path).unwrap(), "garbage\n");
    }
}
