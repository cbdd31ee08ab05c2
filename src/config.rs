use std::path::PathBuf;

/// Dataset used when neither the command line nor the environment names one.
pub const DEFAULT_DATA_PATH: &str = "jobs_data_preprocessed.csv";
pub const DATA_PATH_ENV: &str = "JOB_ANALYZER_DATA";
pub const MAX_THRESHOLD_ENV: &str = "JOB_ANALYZER_MAX_THRESHOLD";
/// Upper end of the salary threshold slider, in lacs.
pub const DEFAULT_MAX_THRESHOLD: i64 = 90;

pub const WINDOW_SIZE: [f32; 2] = [1280.0, 860.0];
pub const MIN_WINDOW_SIZE: [f32; 2] = [640.0, 420.0];

/// Process-level settings, resolved once in `main`.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub data_path: PathBuf,
    pub max_salary_threshold: i64,
}

impl AppConfig {
    /// First CLI argument, then `JOB_ANALYZER_DATA`, then the default file name.
    pub fn from_env() -> Self {
        let arg = std::env::args().nth(1);
        let data_env = std::env::var(DATA_PATH_ENV).ok();
        let threshold_env = std::env::var(MAX_THRESHOLD_ENV).ok();
        Self::resolve(arg, data_env, threshold_env)
    }

    fn resolve(arg: Option<String>, data_env: Option<String>, threshold_env: Option<String>) -> Self {
        let non_blank = |p: &String| !p.trim().is_empty();
        let data_path = arg
            .filter(non_blank)
            .or(data_env.filter(non_blank))
            .unwrap_or_else(|| DEFAULT_DATA_PATH.to_string());

        let max_salary_threshold = match threshold_env {
            Some(raw) => match raw.trim().parse::<i64>() {
                Ok(v) if v > 0 => v,
                _ => {
                    log::warn!("ignoring {MAX_THRESHOLD_ENV}={raw:?}, using {DEFAULT_MAX_THRESHOLD}");
                    DEFAULT_MAX_THRESHOLD
                }
            },
            None => DEFAULT_MAX_THRESHOLD,
        };

        AppConfig {
            data_path: PathBuf::from(data_path),
            max_salary_threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argument_wins_over_environment() {
        let cfg = AppConfig::resolve(Some("cli.csv".into()), Some("env.csv".into()), None);
        assert_eq!(cfg.data_path, PathBuf::from("cli.csv"));
        assert_eq!(cfg.max_salary_threshold, DEFAULT_MAX_THRESHOLD);
    }

    #[test]
    fn falls_back_to_environment_then_default() {
        let cfg = AppConfig::resolve(None, Some("env.parquet".into()), Some("120".into()));
        assert_eq!(cfg.data_path, PathBuf::from("env.parquet"));
        assert_eq!(cfg.max_salary_threshold, 120);

        let cfg = AppConfig::resolve(None, None, Some("-3".into()));
        assert_eq!(cfg.data_path, PathBuf::from(DEFAULT_DATA_PATH));
        assert_eq!(cfg.max_salary_threshold, DEFAULT_MAX_THRESHOLD);
    }
}
