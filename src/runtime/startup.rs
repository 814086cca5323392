use crate::Cli;
use crate::audio::clamp_volume;
use crate::config;

/// Command-line flags win over the config file and environment.
pub fn apply_cli_overrides(settings: &mut config::Settings, cli: &Cli) {
    if cli.shuffle {
        settings.playback.shuffle = true;
    }
    if let Some(volume) = cli.volume {
        settings.audio.volume = clamp_volume(volume);
    }
}
