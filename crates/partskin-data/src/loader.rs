//! Loading pipeline: reads catalog files, checks names, builds core types.
//!
//! Provides format detection (RON/JSON/TOML), file discovery, and
//! deserialization helpers, plus [`load_catalog`] which ties them together
//! for a whole catalog directory.

use crate::schema::{IconRuleData, OperationData, PartData, TextureRuleData};
use partskin_core::catalog::{CatalogError, HostCatalog, HostCatalogBuilder};
use partskin_core::rule::{IconRule, TextureRule};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur during data loading.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// A required data file was not found in the given directory.
    #[error("required file '{file}' not found in {dir}")]
    MissingRequired { file: String, dir: PathBuf },

    /// The file has an extension we don't support.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// Two files with the same base name but different formats exist.
    #[error("conflicting formats: {a} and {b}")]
    ConflictingFormats { a: PathBuf, b: PathBuf },

    /// A deserialization error occurred.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// A duplicate name was found.
    #[error("duplicate name '{name}' in {file}")]
    DuplicateName { file: PathBuf, name: String },

    /// The host catalog rejected the loaded definitions.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Format detection
// ===========================================================================

/// Supported data file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

/// Detect the format of a file based on its extension.
pub fn detect_format(path: &Path) -> Result<Format, DataLoadError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("ron") => Ok(Format::Ron),
        Some("toml") => Ok(Format::Toml),
        Some("json") => Ok(Format::Json),
        _ => Err(DataLoadError::UnsupportedFormat {
            file: path.to_path_buf(),
        }),
    }
}

// ===========================================================================
// File discovery
// ===========================================================================

/// Scan a directory for a data file with the given base name (without extension).
///
/// Looks for `{base_name}.ron`, `{base_name}.toml`, and `{base_name}.json`.
/// Returns `Ok(None)` if no file is found, or `Err(ConflictingFormats)` if
/// multiple formats exist for the same base name.
pub fn find_data_file(dir: &Path, base_name: &str) -> Result<Option<PathBuf>, DataLoadError> {
    let mut found: Option<PathBuf> = None;

    for ext in ["ron", "toml", "json"] {
        let candidate = dir.join(format!("{base_name}.{ext}"));
        if candidate.exists() {
            if let Some(existing) = found {
                return Err(DataLoadError::ConflictingFormats {
                    a: existing,
                    b: candidate,
                });
            }
            found = Some(candidate);
        }
    }

    Ok(found)
}

/// Like [`find_data_file`], but returns an error if no file is found.
pub fn require_data_file(dir: &Path, base_name: &str) -> Result<PathBuf, DataLoadError> {
    find_data_file(dir, base_name)?.ok_or_else(|| DataLoadError::MissingRequired {
        file: base_name.to_string(),
        dir: dir.to_path_buf(),
    })
}

// ===========================================================================
// Deserialization
// ===========================================================================

fn parse_error(path: &Path, detail: impl ToString) -> DataLoadError {
    DataLoadError::Parse {
        file: path.to_path_buf(),
        detail: detail.to_string(),
    }
}

/// Deserialize a list from a file. For TOML files, extracts the array at the
/// given `toml_key` from a top-level table. For RON and JSON, deserializes
/// directly as `Vec<T>`.
pub fn deserialize_list<T: DeserializeOwned>(
    path: &Path,
    toml_key: &str,
) -> Result<Vec<T>, DataLoadError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;

    match format {
        Format::Ron => ron::from_str(&content).map_err(|e| parse_error(path, e)),
        Format::Json => serde_json::from_str(&content).map_err(|e| parse_error(path, e)),
        Format::Toml => {
            let mut table: toml::Table =
                toml::from_str(&content).map_err(|e| parse_error(path, e))?;
            let array = table.remove(toml_key).ok_or_else(|| {
                parse_error(path, format!("missing key '{toml_key}' in TOML file"))
            })?;
            array
                .try_into()
                .map_err(|e: toml::de::Error| parse_error(path, e))
        }
    }
}

// ===========================================================================
// Name checks
// ===========================================================================

/// Record `name` as seen, returning a `DuplicateName` error if it already was.
pub fn check_duplicate(
    seen: &mut HashSet<String>,
    name: &str,
    file: &Path,
) -> Result<(), DataLoadError> {
    if seen.insert(name.to_string()) {
        Ok(())
    } else {
        Err(DataLoadError::DuplicateName {
            file: file.to_path_buf(),
            name: name.to_string(),
        })
    }
}

fn load_named<T: DeserializeOwned>(
    path: &Path,
    toml_key: &str,
    name: impl Fn(&T) -> &str,
) -> Result<Vec<T>, DataLoadError> {
    let entries: Vec<T> = deserialize_list(path, toml_key)?;
    let mut seen = HashSet::new();
    for entry in &entries {
        check_duplicate(&mut seen, name(entry), path)?;
    }
    Ok(entries)
}

// ===========================================================================
// Catalog loading
// ===========================================================================

/// Everything needed for one resolution run, loaded from a catalog directory.
#[derive(Debug)]
pub struct LoadedCatalog {
    /// Texture rules in file order.
    pub texture_rules: Vec<TextureRule>,
    /// Icon rules in file order; the index sorts them.
    pub icon_rules: Vec<IconRule>,
    pub host: HostCatalog,
}

/// Load all catalog files from `dir`.
///
/// `texture_rules`, `icon_rules`, and `parts` are required; `body_parts` and
/// `operations` are optional. Without a `body_parts` file, the body parts
/// named by operations make up the body-part catalog. References between
/// files are not checked here: unknown names are skipped during resolution.
pub fn load_catalog(dir: &Path) -> Result<LoadedCatalog, DataLoadError> {
    let path = require_data_file(dir, "texture_rules")?;
    let texture_rules: Vec<TextureRule> =
        load_named(&path, "texture_rules", |r: &TextureRuleData| r.name.as_str())?
            .into_iter()
            .map(TextureRule::from)
            .collect();

    let path = require_data_file(dir, "icon_rules")?;
    let icon_rules: Vec<IconRule> = load_named(&path, "icon_rules", |r: &IconRuleData| r.name.as_str())?
        .into_iter()
        .map(IconRule::from)
        .collect();

    let mut builder = HostCatalogBuilder::new();

    let path = require_data_file(dir, "parts")?;
    for part in load_named(&path, "parts", |p: &PartData| p.name.as_str())? {
        builder.register_part(part.into());
    }

    let operations = match find_data_file(dir, "operations")? {
        Some(path) => load_named(&path, "operations", |o: &OperationData| o.name.as_str())?,
        None => Vec::new(),
    };

    match find_data_file(dir, "body_parts")? {
        Some(path) => {
            let body_parts: Vec<String> = deserialize_list(&path, "body_parts")?;
            for body_part in body_parts {
                builder.register_body_part(body_part);
            }
        }
        None => {
            tracing::debug!(
                "no body_parts file in {}, using body parts named by operations",
                dir.display()
            );
            for op in &operations {
                for body_part in &op.body_parts {
                    builder.register_body_part(body_part.as_str());
                }
            }
        }
    }

    for op in operations {
        builder.register_operation(op.into());
    }

    let host = builder.build()?;
    tracing::info!(
        "loaded catalog from {}: {} texture rules, {} icon rules, {} parts, {} operations",
        dir.display(),
        texture_rules.len(),
        icon_rules.len(),
        host.part_count(),
        host.operation_count()
    );

    Ok(LoadedCatalog {
        texture_rules,
        icon_rules,
        host,
    })
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// Create a temporary directory with a unique name for test isolation.
    fn make_test_dir(suffix: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "partskin_data_test_{suffix}_{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Clean up a test directory.
    fn cleanup(dir: &Path) {
        let _ = fs::remove_dir_all(dir);
    }

    // -----------------------------------------------------------------------
    // detect_format
    // -----------------------------------------------------------------------

    #[test]
    fn detect_format_by_extension() {
        assert_eq!(detect_format(Path::new("parts.ron")).unwrap(), Format::Ron);
        assert_eq!(
            detect_format(Path::new("parts.toml")).unwrap(),
            Format::Toml
        );
        assert_eq!(
            detect_format(Path::new("parts.json")).unwrap(),
            Format::Json
        );
    }

    #[test]
    fn detect_format_unsupported() {
        for name in ["parts.xml", "parts"] {
            let result = detect_format(Path::new(name));
            assert!(matches!(
                result,
                Err(DataLoadError::UnsupportedFormat { .. })
            ));
        }
    }

    // -----------------------------------------------------------------------
    // find_data_file / require_data_file
    // -----------------------------------------------------------------------

    #[test]
    fn find_data_file_found() {
        let dir = make_test_dir("find_found");
        fs::write(dir.join("parts.toml"), "").unwrap();

        let result = find_data_file(&dir, "parts").unwrap();
        assert_eq!(result, Some(dir.join("parts.toml")));

        cleanup(&dir);
    }

    #[test]
    fn find_data_file_missing() {
        let dir = make_test_dir("find_missing");

        assert_eq!(find_data_file(&dir, "parts").unwrap(), None);
        assert!(matches!(
            require_data_file(&dir, "parts"),
            Err(DataLoadError::MissingRequired { ref file, .. }) if file == "parts"
        ));

        cleanup(&dir);
    }

    #[test]
    fn find_data_file_conflict() {
        let dir = make_test_dir("find_conflict");
        fs::write(dir.join("parts.ron"), "[]").unwrap();
        fs::write(dir.join("parts.json"), "[]").unwrap();

        let result = find_data_file(&dir, "parts");
        assert!(matches!(
            result,
            Err(DataLoadError::ConflictingFormats { .. })
        ));

        cleanup(&dir);
    }

    // -----------------------------------------------------------------------
    // deserialize_list
    // -----------------------------------------------------------------------

    #[test]
    fn deserialize_list_ron() {
        let dir = make_test_dir("list_ron");
        let path = dir.join("parts.ron");
        fs::write(&path, r#"[(name: "PegLeg"), (name: "HookHand")]"#).unwrap();

        let parts: Vec<PartData> = deserialize_list(&path, "parts").unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].name, "PegLeg");

        cleanup(&dir);
    }

    #[test]
    fn deserialize_list_json() {
        let dir = make_test_dir("list_json");
        let path = dir.join("parts.json");
        fs::write(&path, r#"[{"name": "PegLeg", "overridable": true}]"#).unwrap();

        let parts: Vec<PartData> = deserialize_list(&path, "parts").unwrap();
        assert_eq!(parts.len(), 1);
        assert!(parts[0].overridable);

        cleanup(&dir);
    }

    #[test]
    fn deserialize_list_toml() {
        let dir = make_test_dir("list_toml");
        let path = dir.join("parts.toml");
        fs::write(
            &path,
            r#"
[[parts]]
name = "PegLeg"
overridable = true

[parts.graphic]
texture = "Things/Item/Prosthetic"

[[parts]]
name = "HookHand"
"#,
        )
        .unwrap();

        let parts: Vec<PartData> = deserialize_list(&path, "parts").unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(
            parts[0].graphic.as_ref().unwrap().texture,
            "Things/Item/Prosthetic"
        );
        assert!(parts[1].graphic.is_none());

        cleanup(&dir);
    }

    #[test]
    fn deserialize_list_toml_missing_key() {
        let dir = make_test_dir("list_toml_missing");
        let path = dir.join("parts.toml");
        fs::write(&path, r#"foo = "bar""#).unwrap();

        let result: Result<Vec<PartData>, _> = deserialize_list(&path, "parts");
        assert!(matches!(result, Err(DataLoadError::Parse { .. })));

        cleanup(&dir);
    }

    #[test]
    fn deserialize_list_parse_error() {
        let dir = make_test_dir("list_parse_err");
        let path = dir.join("parts.ron");
        fs::write(&path, "this is not valid RON {{{").unwrap();

        let result: Result<Vec<PartData>, _> = deserialize_list(&path, "parts");
        assert!(matches!(result, Err(DataLoadError::Parse { .. })));

        cleanup(&dir);
    }

    // -----------------------------------------------------------------------
    // check_duplicate
    // -----------------------------------------------------------------------

    #[test]
    fn check_duplicate_detects_repeat() {
        let mut seen = HashSet::new();
        assert!(check_duplicate(&mut seen, "PegLeg", Path::new("parts.ron")).is_ok());
        let result = check_duplicate(&mut seen, "PegLeg", Path::new("parts.ron"));
        assert!(matches!(
            result,
            Err(DataLoadError::DuplicateName { ref name, .. }) if name == "PegLeg"
        ));
    }

    // -----------------------------------------------------------------------
    // load_catalog
    // -----------------------------------------------------------------------

    fn write_minimal_catalog(dir: &Path) {
        fs::write(
            dir.join("texture_rules.ron"),
            r#"[(name: "Tint", texture: "tex/a", replacement: "tex/a_base", color: (1.0, 0.0, 0.0))]"#,
        )
        .unwrap();
        fs::write(
            dir.join("icon_rules.ron"),
            r#"[(name: "Arm", body_parts: ["Shoulder"], texture: "icon/arm")]"#,
        )
        .unwrap();
        fs::write(
            dir.join("parts.ron"),
            r#"[(name: "BionicArm", overridable: true, graphic: Some((texture: "tex/a")))]"#,
        )
        .unwrap();
    }

    #[test]
    fn load_catalog_minimal() {
        let dir = make_test_dir("catalog_minimal");
        write_minimal_catalog(&dir);

        let loaded = load_catalog(&dir).unwrap();
        assert_eq!(loaded.texture_rules.len(), 1);
        assert_eq!(loaded.icon_rules.len(), 1);
        assert_eq!(loaded.host.part_count(), 1);
        assert_eq!(loaded.host.operation_count(), 0);
        assert_eq!(loaded.host.body_part_count(), 0);

        cleanup(&dir);
    }

    #[test]
    fn load_catalog_derives_body_parts_from_operations() {
        let dir = make_test_dir("catalog_derived_body_parts");
        write_minimal_catalog(&dir);
        fs::write(
            dir.join("operations.json"),
            r#"[{"name": "InstallArm", "body_parts": ["Shoulder", "Hand"], "ingredients": ["BionicArm"]}]"#,
        )
        .unwrap();

        let loaded = load_catalog(&dir).unwrap();
        assert_eq!(loaded.host.operation_count(), 1);
        assert_eq!(loaded.host.body_part_count(), 2);

        cleanup(&dir);
    }

    #[test]
    fn load_catalog_explicit_body_parts_win() {
        let dir = make_test_dir("catalog_explicit_body_parts");
        write_minimal_catalog(&dir);
        fs::write(
            dir.join("operations.json"),
            r#"[{"name": "InstallArm", "body_parts": ["Shoulder", "Hand"], "ingredients": ["BionicArm"]}]"#,
        )
        .unwrap();
        fs::write(dir.join("body_parts.toml"), r#"body_parts = ["Shoulder"]"#).unwrap();

        let loaded = load_catalog(&dir).unwrap();
        assert_eq!(loaded.host.body_part_count(), 1);

        cleanup(&dir);
    }

    #[test]
    fn load_catalog_missing_required_file() {
        let dir = make_test_dir("catalog_missing");
        write_minimal_catalog(&dir);
        fs::remove_file(dir.join("parts.ron")).unwrap();

        assert!(matches!(
            load_catalog(&dir),
            Err(DataLoadError::MissingRequired { ref file, .. }) if file == "parts"
        ));

        cleanup(&dir);
    }

    #[test]
    fn load_catalog_duplicate_rule_name() {
        let dir = make_test_dir("catalog_duplicate");
        write_minimal_catalog(&dir);
        fs::write(
            dir.join("icon_rules.ron"),
            r#"[
                (name: "Arm", body_parts: ["Shoulder"], texture: "icon/arm"),
                (name: "Arm", body_parts: ["Hand"], texture: "icon/hand"),
            ]"#,
        )
        .unwrap();

        assert!(matches!(
            load_catalog(&dir),
            Err(DataLoadError::DuplicateName { ref name, .. }) if name == "Arm"
        ));

        cleanup(&dir);
    }

    // -----------------------------------------------------------------------
    // Error display messages
    // -----------------------------------------------------------------------

    #[test]
    fn error_display_messages() {
        let e = DataLoadError::MissingRequired {
            file: "parts".to_string(),
            dir: PathBuf::from("/data"),
        };
        assert!(format!("{e}").contains("parts"));
        assert!(format!("{e}").contains("/data"));

        let e = DataLoadError::ConflictingFormats {
            a: PathBuf::from("parts.ron"),
            b: PathBuf::from("parts.json"),
        };
        let msg = format!("{e}");
        assert!(msg.contains("parts.ron"));
        assert!(msg.contains("parts.json"));

        let e = DataLoadError::Parse {
            file: PathBuf::from("bad.ron"),
            detail: "syntax error".to_string(),
        };
        assert!(format!("{e}").contains("bad.ron"));
        assert!(format!("{e}").contains("syntax error"));

        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let data_err: DataLoadError = io_err.into();
        assert!(matches!(data_err, DataLoadError::Io(_)));
        assert!(format!("{data_err}").contains("file not found"));
    }
}
