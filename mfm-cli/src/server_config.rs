use crate::config::Settings;

pub const DEFAULT_INSTANCE_URL: &str = "https://misskey.io";
pub const INSTANCE_URL_ENV: &str = "MFM_INSTANCE_URL";

/// Where the instance URL in use came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlOrigin {
    Cli,
    Env,
    Settings,
    Default,
}

impl UrlOrigin {
    pub fn describe(&self) -> &'static str {
        match self {
            UrlOrigin::Cli => "command line",
            UrlOrigin::Env => INSTANCE_URL_ENV,
            UrlOrigin::Settings => "settings file",
            UrlOrigin::Default => "default",
        }
    }
}

/// Determine the instance URL to use based on priority:
/// 1. CLI argument (highest priority)
/// 2. Environment variable MFM_INSTANCE_URL
/// 3. Settings file
/// 4. Default (lowest priority)
pub fn determine_instance_url(cli_override: Option<String>, settings: &Settings) -> (String, UrlOrigin) {
    choose_instance_url(cli_override, std::env::var(INSTANCE_URL_ENV).ok(), settings)
}

fn choose_instance_url(
    cli_override: Option<String>,
    env: Option<String>,
    settings: &Settings,
) -> (String, UrlOrigin) {
    let non_blank = |url: &String| !url.trim().is_empty();

    if let Some(url) = cli_override.filter(non_blank) {
        return (url, UrlOrigin::Cli);
    }
    if let Some(url) = env.filter(non_blank) {
        return (url, UrlOrigin::Env);
    }
    if let Some(url) = settings.instance.url.clone().filter(non_blank) {
        return (url, UrlOrigin::Settings);
    }
    (DEFAULT_INSTANCE_URL.to_string(), UrlOrigin::Default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn settings(url: Option<&str>) -> Settings {
        let mut settings = Settings::from_files::<PathBuf>(&[]).unwrap();
        settings.instance.url = url.map(str::to_string);
        settings
    }

    #[test]
    fn test_cli_override_priority() {
        let (url, origin) = choose_instance_url(
            Some("https://cli.example".to_string()),
            Some("https://env.example".to_string()),
            &settings(Some("https://file.example")),
        );
        assert_eq!(url, "https://cli.example");
        assert_eq!(origin, UrlOrigin::Cli);
    }

    #[test]
    fn test_env_var_priority() {
        let (url, origin) = choose_instance_url(
            None,
            Some("https://env.example".to_string()),
            &settings(Some("https://file.example")),
        );
        assert_eq!(url, "https://env.example");
        assert_eq!(origin, UrlOrigin::Env);
    }

    #[test]
    fn test_settings_then_default() {
        let (url, origin) = choose_instance_url(None, None, &settings(Some("https://file.example")));
        assert_eq!((url.as_str(), origin), ("https://file.example", UrlOrigin::Settings));

        let (url, origin) = choose_instance_url(None, None, &settings(None));
        assert_eq!(url, DEFAULT_INSTANCE_URL);
        assert_eq!(origin.describe(), "default");
    }

    #[test]
    fn test_blank_values_skipped() {
        let (_, origin) = choose_instance_url(Some("  ".to_string()), Some(String::new()), &settings(None));
        assert_eq!(origin, UrlOrigin::Default);
    }
}
