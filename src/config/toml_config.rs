use crate::config::{validate_sources, DEFAULT_DIFFICULTY, DEFAULT_HISTORY_PATH};
use crate::core::ConfigProvider;
use crate::utils::error::{PlannerError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub catalog: CatalogConfig,
    pub history: Option<HistoryConfig>,
    pub generation: Option<GenerationConfig>,
    /// Set from the command line, never read from the file.
    #[serde(skip)]
    pub dry_run: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub difficulty: Option<String>,
    pub seed: Option<u64>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PlannerError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PlannerError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${MEAL_HOME})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PlannerError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn seed(&self) -> Option<u64> {
        self.generation.as_ref().and_then(|g| g.seed)
    }

    pub fn set_difficulty(&mut self, difficulty: String) {
        self.generation
            .get_or_insert_with(GenerationConfig::default)
            .difficulty = Some(difficulty);
    }

    pub fn set_seed(&mut self, seed: u64) {
        self.generation
            .get_or_insert_with(GenerationConfig::default)
            .seed = Some(seed);
    }
}

impl ConfigProvider for TomlConfig {
    fn catalog_path(&self) -> &str {
        &self.catalog.path
    }

    fn history_path(&self) -> &str {
        self.history
            .as_ref()
            .and_then(|h| h.path.as_deref())
            .unwrap_or(DEFAULT_HISTORY_PATH)
    }

    fn difficulty(&self) -> &str {
        self.generation
            .as_ref()
            .and_then(|g| g.difficulty.as_deref())
            .unwrap_or(DEFAULT_DIFFICULTY)
    }

    fn dry_run(&self) -> bool {
        self.dry_run
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_sources(self.catalog_path(), self.history_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[catalog]
path = "data/dishes.json"

[history]
path = "data/history.txt"

[generation]
difficulty = "hard"
seed = 42
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.catalog_path(), "data/dishes.json");
        assert_eq!(config.history_path(), "data/history.txt");
        assert_eq!(config.difficulty(), "hard");
        assert_eq!(config.seed(), Some(42));
        assert!(!config.dry_run());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_for_optional_sections() {
        let config = TomlConfig::from_toml_str("[catalog]\npath = \"dishes.csv\"\n").unwrap();

        assert_eq!(config.history_path(), DEFAULT_HISTORY_PATH);
        assert_eq!(config.difficulty(), DEFAULT_DIFFICULTY);
        assert_eq!(config.seed(), None);
    }

    #[test]
    fn test_overrides() {
        let mut config = TomlConfig::from_toml_str("[catalog]\npath = \"dishes.csv\"\n").unwrap();
        config.set_difficulty("easy".to_string());
        config.set_seed(7);

        assert_eq!(config.difficulty(), "easy");
        assert_eq!(config.seed(), Some(7));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("MEAL_PLANNER_TEST_CATALOG", "from-env.json");

        let config =
            TomlConfig::from_toml_str("[catalog]\npath = \"${MEAL_PLANNER_TEST_CATALOG}\"\n")
                .unwrap();
        assert_eq!(config.catalog_path(), "from-env.json");

        std::env::remove_var("MEAL_PLANNER_TEST_CATALOG");
    }

    #[test]
    fn test_missing_catalog_section_fails() {
        assert!(matches!(
            TomlConfig::from_toml_str("[generation]\ndifficulty = \"easy\"\n"),
            Err(PlannerError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_validation() {
        let config = TomlConfig::from_toml_str("[catalog]\npath = \"dishes.xml\"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_blank_difficulty_passes_validation() {
        let config = TomlConfig::from_toml_str(
            "[catalog]\npath = \"dishes.json\"\n\n[generation]\ndifficulty = \"\"\n",
        )
        .unwrap();
        assert_eq!(config.difficulty(), "");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[catalog]\npath = \"dishes.json\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.catalog_path(), "dishes.json");
    }
}
