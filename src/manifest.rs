use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, ConfigResult};

/// One value of the `build` manifest: either a single source path to copy,
/// or an ordered list of source paths to concatenate into the destination.
/// Paths are relative to the project's app directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BuildSource {
    Single(String),
    Concat(Vec<String>),
}

impl BuildSource {
    /// The ordered source paths behind this entry.
    pub fn sources(&self) -> Vec<&str> {
        match self {
            BuildSource::Single(path) => vec![path.as_str()],
            BuildSource::Concat(paths) => paths.iter().map(|p| p.as_str()).collect(),
        }
    }

    pub fn validate(&self, destination: &str) -> ConfigResult<()> {
        if destination.is_empty() {
            return Err(ConfigError::MissingField(
                "build destination name".to_string(),
            ));
        }

        let sources = self.sources();
        if sources.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: format!("build.{}", destination),
                message: "source list must not be empty".to_string(),
            });
        }

        for source in sources {
            if source.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: format!("build.{}", destination),
                    message: "source path must not be empty".to_string(),
                });
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepAction {
    Copy,
    Concat,
}

impl StepAction {
    pub fn as_str(&self) -> &str {
        match self {
            StepAction::Copy => "copy",
            StepAction::Concat => "concat",
        }
    }
}

/// A resolved manifest entry. Planning output only; the external build tool
/// is what actually copies or concatenates anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedStep {
    pub destination: PathBuf,
    pub sources: Vec<PathBuf>,
    pub action: StepAction,
}

/// Resolve the build manifest against the app and build directories,
/// ordered by destination name.
pub fn plan(
    build: &BTreeMap<String, BuildSource>,
    app_dir: &Path,
    build_dir: &Path,
) -> Vec<PlannedStep> {
    build
        .iter()
        .map(|(destination, source)| {
            let action = match source {
                BuildSource::Single(_) => StepAction::Copy,
                BuildSource::Concat(_) => StepAction::Concat,
            };

            PlannedStep {
                destination: build_dir.join(destination),
                sources: source
                    .sources()
                    .iter()
                    .map(|path| app_dir.join(path))
                    .collect(),
                action,
            }
        })
        .collect()
}

/// Check that every planned source file exists on disk.
pub fn validate_sources(steps: &[PlannedStep]) -> Result<()> {
    for step in steps {
        for source in &step.sources {
            if !source.exists() {
                return Err(anyhow!(
                    "Source file does not exist: {} (needed by {})",
                    source.display(),
                    step.destination.display()
                ));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_single_and_list_forms_deserialize() {
        let single: BuildSource = serde_json::from_str("\"index.html\"").unwrap();
        assert_eq!(single, BuildSource::Single("index.html".to_string()));
        assert_eq!(single.sources(), vec!["index.html"]);

        let list: BuildSource =
            serde_json::from_str(r#"["javascripts/app.js", "javascripts/vendor.js"]"#).unwrap();
        assert_eq!(
            list.sources(),
            vec!["javascripts/app.js", "javascripts/vendor.js"]
        );
    }

    #[test]
    fn test_validate_rejects_empty_list() {
        let source = BuildSource::Concat(Vec::new());

        let err = source.validate("app.js").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_plan_resolves_paths() {
        let mut build = BTreeMap::new();
        build.insert(
            "index.html".to_string(),
            BuildSource::Single("index.html".to_string()),
        );
        build.insert(
            "app.js".to_string(),
            BuildSource::Concat(vec!["javascripts/app.js".to_string()]),
        );

        let steps = plan(&build, Path::new("app"), Path::new("build"));

        assert_eq!(steps.len(), 2);
        // BTreeMap order: app.js before index.html
        assert_eq!(steps[0].destination, PathBuf::from("build/app.js"));
        assert_eq!(
            steps[0].sources,
            vec![PathBuf::from("app/javascripts/app.js")]
        );
        assert_eq!(steps[0].action, StepAction::Concat);
        assert_eq!(steps[1].destination, PathBuf::from("build/index.html"));
        assert_eq!(steps[1].action, StepAction::Copy);
    }

    #[test]
    fn test_validate_sources_reports_missing_file() {
        let temp = tempfile::tempdir().unwrap();
        let app_dir = temp.path().join("app");
        fs::create_dir_all(&app_dir).unwrap();
        fs::write(app_dir.join("index.html"), "<html></html>").unwrap();

        let mut build = BTreeMap::new();
        build.insert(
            "index.html".to_string(),
            BuildSource::Single("index.html".to_string()),
        );

        let steps = plan(&build, &app_dir, &temp.path().join("build"));
        validate_sources(&steps).unwrap();

        build.insert(
            "app.css".to_string(),
            BuildSource::Concat(vec!["stylesheets/app.css".to_string()]),
        );
        let steps = plan(&build, &app_dir, &temp.path().join("build"));

        let err = validate_sources(&steps).unwrap_err();
        assert!(err.to_string().contains("stylesheets/app.css"));
    }
}
