//! Reading and writing lint profiles as YAML.

use std::fs;
use std::path::Path;

use super::core::LintProfile;
use crate::error::{LintError, Result};

/// Load a lint profile from a YAML file.
///
/// Tags listed as both atomic and extract-first are accepted with a
/// warning; extract-first wins.
pub fn load_profile(path: &Path) -> Result<LintProfile> {
    let yaml = fs::read_to_string(path).map_err(|source| LintError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let profile = parse_profile(&yaml)?;

    for tag in profile.conflicting_tags() {
        tracing::warn!(
            tag = %tag,
            profile = %path.display(),
            "Tag is both atomic and extract-first, treating it as extract-first"
        );
    }

    Ok(profile)
}

/// Parse a lint profile from a YAML string.
///
/// # Examples
/// ```
/// use cnxml_linter::profile::{parse_profile, TagClass};
///
/// let profile = parse_profile("atomic_tags: [para]\nextract_first_tags: [list]\n").unwrap();
/// assert_eq!(profile.classify("para"), TagClass::Atomic);
/// assert!(profile.suppressions.is_empty());
/// ```
pub fn parse_profile(yaml: &str) -> Result<LintProfile> {
    Ok(serde_yaml_ng::from_str(yaml)?)
}

/// Serialize a lint profile to YAML.
pub fn profile_to_yaml(profile: &LintProfile) -> Result<String> {
    Ok(serde_yaml_ng::to_string(profile)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{create_cnxml_profile, TagClass, TagSelector};
    use crate::xml::TEXT_NODE_NAME;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_yaml_round_trip_of_builtin_profile() {
        let profile = create_cnxml_profile();
        let yaml = profile_to_yaml(&profile).unwrap();
        assert_eq!(parse_profile(&yaml).unwrap(), profile);
    }

    #[test]
    fn test_parse_profile_with_selectors() {
        let yaml = r##"
atomic_tags: ["#text", para, caption]
extract_first_tags: [list]
suppressions:
  - selectors:
      - tag: item
        within: list
      - tag: label
    rules: [UPPERCASE_SENTENCE_START]
"##;
        let profile = parse_profile(yaml).unwrap();

        assert_eq!(profile.classify("caption"), TagClass::Atomic);
        assert_eq!(profile.classify(TEXT_NODE_NAME), TagClass::Atomic);
        assert_eq!(profile.suppressions.len(), 1);
        assert_eq!(
            profile.suppressions[0].selectors,
            vec![TagSelector::within("item", "list"), TagSelector::tag("label")]
        );
    }

    #[test]
    fn test_parse_profile_defaults_missing_sections() {
        let profile = parse_profile("atomic_tags: [para]\n").unwrap();
        assert!(profile.extract_first_tags.is_empty());
        assert!(profile.suppressions.is_empty());
    }

    #[test]
    fn test_parse_profile_invalid() {
        assert!(parse_profile("atomic_tags: 3\n").is_err());
    }

    #[test]
    fn test_load_profile_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "atomic_tags: [para]").unwrap();

        let profile = load_profile(file.path()).unwrap();
        assert_eq!(profile.atomic_tags, vec!["para"]);
    }

    #[test]
    fn test_load_profile_missing_file() {
        let err = load_profile(Path::new("/nonexistent/profile.yaml")).unwrap_err();
        assert!(matches!(err, LintError::Read { .. }));
    }
}
