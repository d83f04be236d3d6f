use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::settings::{Settings, default_db_path, settings_path};

/// Describe where a resolved value came from.
fn source_label(from_flag: bool, from_settings: bool) -> &'static str {
    if from_flag {
        "(--db flag)"
    } else if from_settings {
        "(settings file)"
    } else {
        "(default)"
    }
}

/// Show the settings file and the paths it resolves to.
pub(crate) fn run_config_show(settings: &Settings, db_flag: Option<PathBuf>) -> Result<(), CliError> {
    let path = settings_path();

    log::info!(
        "{}",
        "foodshare Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();

    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    crate::log_blank();

    let db_source = source_label(db_flag.is_some(), settings.database.path.is_some());
    let db_path = settings.resolve_db_path(db_flag);
    log::info!(
        "  {} {} {}",
        "database:".if_supports_color(Stdout, |t| t.cyan()),
        db_path.display(),
        db_source.if_supports_color(Stdout, |t| t.dimmed()),
    );
    if db_path != default_db_path() {
        log::info!(
            "  {} {}",
            "default:".if_supports_color(Stdout, |t| t.cyan()),
            default_db_path()
                .display()
                .if_supports_color(Stdout, |t| t.dimmed()),
        );
    }

    let data_source = if settings.data.dir.is_some() {
        "(settings file)"
    } else {
        "(current directory)"
    };
    log::info!(
        "  {} {} {}",
        "data dir:".if_supports_color(Stdout, |t| t.cyan()),
        settings.resolve_data_dir(None).display(),
        data_source.if_supports_color(Stdout, |t| t.dimmed()),
    );

    Ok(())
}

/// Print the settings file path.
pub(crate) fn run_config_path() {
    log::info!("{}", settings_path().display());
}

pub(crate) fn run_config_set_db(mut settings: Settings, path: &Path) -> Result<(), CliError> {
    let path = absolute(path)?;
    settings.database.path = Some(path.clone());
    settings.save()?;
    log::info!(
        "  {} Database set to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        path.display(),
    );
    Ok(())
}

pub(crate) fn run_config_set_data_dir(mut settings: Settings, dir: &Path) -> Result<(), CliError> {
    let dir = absolute(dir)?;
    if !dir.is_dir() {
        log::warn!("{} does not exist yet", dir.display());
    }
    settings.data.dir = Some(dir.clone());
    settings.save()?;
    log::info!(
        "  {} Data directory set to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        dir.display(),
    );
    Ok(())
}

/// Store paths absolute so they resolve the same from any working directory.
fn absolute(path: &Path) -> Result<PathBuf, CliError> {
    std::path::absolute(path)
        .map_err(|e| CliError::config(format!("Invalid path {}: {}", path.display(), e)))
}
