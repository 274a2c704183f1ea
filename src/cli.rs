//! Command-line interface configuration.

use argh::FromArgs;

use crate::{state::Preset, store::SharedConfigStore};

/// Interactive console for the shared frontend configuration
#[derive(Debug, FromArgs)]
pub struct Cli {
    /// default variant to start from: 'blank' or 'hosted' (default: 'blank')
    #[argh(option, default = "Preset::Blank", from_str_fn(parse_preset))]
    pub preset: Preset,

    /// backend URL to use instead of the preset's (e.g. 'http://localhost:8000')
    #[argh(option, long = "backend-url")]
    pub backend_url: Option<String>,

    /// results window in minutes (default: 60)
    #[argh(option, long = "time-span")]
    pub time_span: Option<i64>,

    /// start with the origins column hidden
    #[argh(switch, long = "hide-origins")]
    pub hide_origins: bool,

    /// log at debug level
    #[argh(switch, short = 'v')]
    pub verbose: bool,
}

fn parse_preset(value: &str) -> Result<Preset, String> {
    value.parse().map_err(|err: crate::error::ConfigError| err.to_string())
}

impl Cli {
    /// Builds the store from the preset, then writes each override through
    /// the store so that anything already watching sees it.
    pub fn build_store(&self) -> SharedConfigStore {
        let store = SharedConfigStore::with_preset(self.preset);
        self.apply_overrides(&store);
        store
    }

    /// Writes the command-line overrides into an existing store.
    pub fn apply_overrides(&self, store: &SharedConfigStore) {
        if let Some(url) = &self.backend_url {
            store.set_backend_url(url.as_str());
        }
        if let Some(minutes) = self.time_span {
            store.set_time_span_minutes(minutes);
        }
        if self.hide_origins {
            store.set_show_origins(false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, argh::EarlyExit> {
        Cli::from_args(&["shared-config"], args)
    }

    #[test]
    fn test_no_args_gives_blank_defaults() {
        let cli = parse(&[]).unwrap();
        assert_eq!(cli.preset, Preset::Blank);
        let store = cli.build_store();
        assert_eq!(store.snapshot(), Preset::Blank.state());
    }

    #[test]
    fn test_overrides_apply_on_top_of_preset() {
        let cli = parse(&[
            "--preset",
            "hosted",
            "--time-span",
            "30",
            "--hide-origins",
        ])
        .unwrap();
        let store = cli.build_store();
        assert_eq!(store.get_backend_url(), "http://localhost:8000");
        assert_eq!(store.get_time_span_minutes(), 30);
        assert!(!store.get_show_origins());
    }

    #[test]
    fn test_backend_url_taken_verbatim() {
        let cli = parse(&["--backend-url", "example:8000"]).unwrap();
        assert_eq!(cli.build_store().get_backend_url(), "example:8000");
    }

    #[test]
    fn test_unknown_preset_rejected() {
        assert!(parse(&["--preset", "staging"]).is_err());
    }
}
