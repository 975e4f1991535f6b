use std::sync::Arc;

use reo_config::Config;
use reo_config::ui::Theme;
use reo_core::custom::CustomDefinitions;
use reo_core::external::ToolRunner;
use reo_core::pipeline::Pipeline;
use reo_core::types::{ColorScheme, MarkupFlavor};
use tokio::sync::RwLock;

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub pipeline: Pipeline,
    pub scheme: ColorScheme,
    pub flavor: MarkupFlavor,
}

impl AppState {
    pub fn new(config: Config, runner: Arc<dyn ToolRunner>, flavor: MarkupFlavor) -> Self {
        let custom = config.custom_definitions_dir.as_deref().map(CustomDefinitions::new);
        if custom.is_none() {
            tracing::warn!("No custom definitions folder, custom definitions are disabled");
        }
        let pipeline = Pipeline::new(runner, &config, custom);
        let scheme = resolve_scheme(config.ui.theme);
        tracing::debug!("Using {:?} colours", scheme);

        Self {
            config: Arc::new(RwLock::new(config)),
            pipeline,
            scheme,
            flavor,
        }
    }
}

/// Picks the colour pair for a theme, asking the desktop for `system`
pub fn resolve_scheme(theme: Theme) -> ColorScheme {
    match theme {
        Theme::Light => ColorScheme::Light,
        Theme::Dark => ColorScheme::Dark,
        Theme::System => match dark_light::detect() {
            Ok(dark_light::Mode::Dark) => ColorScheme::Dark,
            Ok(dark_light::Mode::Light | dark_light::Mode::Unspecified) => ColorScheme::Light,
            Err(e) => {
                tracing::warn!("Could not detect desktop theme: {}", e);
                ColorScheme::Light
            }
        },
    }
}
