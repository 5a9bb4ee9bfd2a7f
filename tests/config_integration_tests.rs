//! Integration tests for config loading from fixture files.

use std::fs;
use std::path::Path;

use media_renamer::media_rename::{MediaRenameConfig, MediaRenameUserConfig, NameCleaner};

/// Read the sample config file content.
fn read_sample_config() -> String {
    let config_path = Path::new("tests/fixtures/sample_config.toml");
    fs::read_to_string(config_path).expect("Failed to read sample config file")
}

#[test]
fn sample_config_is_valid_toml() {
    let config_content = read_sample_config();
    let result: Result<toml::Value, _> = toml::from_str(&config_content);
    assert!(result.is_ok(), "Sample config should be valid TOML: {:?}", result.err());
}

#[test]
fn media_rename_section_has_expected_structure() {
    let config_content = read_sample_config();
    let value: toml::Value = toml::from_str(&config_content).expect("should parse");

    let section = value.get("media_rename").expect("should have media_rename section");
    for key in [
        "recursive",
        "debug",
        "verbose",
        "print",
        "log",
        "exclude",
        "unwanted_terms",
        "language_codes",
    ] {
        assert!(section.get(key).is_some(), "[media_rename] should have {key}");
    }
}

#[test]
fn media_rename_config_parses_from_sample() {
    let config = MediaRenameUserConfig::from_toml_str(&read_sample_config()).expect("should parse");
    assert!(config.recursive);
    assert!(config.print);
    assert!(config.log);
    assert!(!config.debug);
    assert_eq!(config.exclude, vec!["Extras", "Featurettes", "Sample"]);
    assert_eq!(config.language_codes, vec!["pob", "zh-tw"]);
}

#[test]
fn sample_config_extends_cleaner_vocabulary() {
    let user_config = MediaRenameUserConfig::from_toml_str(&read_sample_config()).expect("should parse");
    let cleaner = NameCleaner::new(&MediaRenameConfig::from(user_config));

    assert!(cleaner.is_unwanted("proper"));
    assert!(cleaner.is_unwanted("1080p"));
    assert!(cleaner.is_language_extension(".POB"));
    assert_eq!(cleaner.clean_name("Movie.PROPER.pob.srt", false), "Movie.pob.srt");
    assert_eq!(NameCleaner::default().clean_name("Movie.PROPER.pob.srt", false), "Movie PROPER pob.srt");
}
