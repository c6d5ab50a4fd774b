use analysis_core::AnalysisError;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(raw: &str) -> Result<Self, AnalysisError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(AnalysisError::Config(format!(
                "unknown output format '{}', expected text or json",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    pub format: OutputFormat,
    /// Pretty-print JSON output
    pub pretty: bool,
    /// Print one line per parameter in text output
    pub show_details: bool,
}

impl ReportConfig {
    pub fn from_env() -> Result<Self, AnalysisError> {
        Self::from_vars(|key| env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, AnalysisError> {
        Ok(Self {
            format: OutputFormat::parse(&var("REPORT_FORMAT").unwrap_or_else(|| "text".to_string()))?,
            pretty: parse_bool("REPORT_PRETTY", var("REPORT_PRETTY"), true)?,
            show_details: parse_bool("REPORT_SHOW_DETAILS", var("REPORT_SHOW_DETAILS"), true)?,
        })
    }
}

fn parse_bool(key: &str, raw: Option<String>, default: bool) -> Result<bool, AnalysisError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(AnalysisError::Config(format!("{} must be a boolean, got '{}'", key, other))),
    }
}

fn flag_value<'a>(args: &'a [String], name: &str) -> Result<Option<&'a String>, AnalysisError> {
    match args.iter().position(|a| a == name) {
        Some(i) => args
            .get(i + 1)
            .filter(|v| !v.starts_with("--"))
            .map(Some)
            .ok_or_else(|| AnalysisError::Config(format!("{} needs a value", name))),
        None => Ok(None),
    }
}

/// Command-line flags. These override the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub input: PathBuf,
    pub format: Option<OutputFormat>,
    pub symbol: Option<String>,
}

impl CliArgs {
    pub fn parse(args: &[String]) -> Result<Self, AnalysisError> {
        let input = flag_value(args, "--input")?
            .map(PathBuf::from)
            .ok_or_else(|| AnalysisError::Config("--input PATH is required".to_string()))?;
        let format = flag_value(args, "--format")?.map(|f| OutputFormat::parse(f)).transpose()?;
        let symbol = flag_value(args, "--symbol")?.cloned();

        Ok(Self { input, format, symbol })
    }

    pub fn apply(&self, config: &mut ReportConfig) {
        if let Some(format) = self.format {
            config.format = format;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| map.get(key).cloned()
    }

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("stock-report")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = ReportConfig::from_vars(vars(&[])).unwrap();
        assert_eq!(config.format, OutputFormat::Text);
        assert!(config.pretty);
        assert!(config.show_details);
    }

    #[test]
    fn test_env_overrides() {
        let config = ReportConfig::from_vars(vars(&[
            ("REPORT_FORMAT", "JSON"),
            ("REPORT_PRETTY", "false"),
            ("REPORT_SHOW_DETAILS", "0"),
        ]))
        .unwrap();
        assert_eq!(config.format, OutputFormat::Json);
        assert!(!config.pretty);
        assert!(!config.show_details);
    }

    #[test]
    fn test_invalid_values_are_config_errors() {
        let err = ReportConfig::from_vars(vars(&[("REPORT_FORMAT", "xml")])).unwrap_err();
        assert!(matches!(err, AnalysisError::Config(_)));

        let err = ReportConfig::from_vars(vars(&[("REPORT_PRETTY", "maybe")])).unwrap_err();
        assert!(err.to_string().contains("REPORT_PRETTY"));
    }

    #[test]
    fn test_cli_args() {
        let cli = CliArgs::parse(&args(&["--input", "infy.json", "--format", "json", "--symbol", "INFY"])).unwrap();
        assert_eq!(cli.input, PathBuf::from("infy.json"));
        assert_eq!(cli.format, Some(OutputFormat::Json));
        assert_eq!(cli.symbol.as_deref(), Some("INFY"));

        let mut config = ReportConfig::from_vars(vars(&[])).unwrap();
        cli.apply(&mut config);
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn test_cli_requires_input() {
        assert!(CliArgs::parse(&args(&["--symbol", "TCS"])).is_err());
        assert!(CliArgs::parse(&args(&["--input", "--format", "json"])).is_err());
    }
}
