use crate::cli::Cli;
use crate::error::{CliError, Result};
use crate::settings::Settings;
use crate::ui;
use changelog::ChangelogFormatter;
use git::{GitRepository, TagPersister};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info};

pub fn execute(cli: &Cli) -> Result<()> {
    let settings = Settings::load(&cli.config)?;
    let options = settings.changelog.overridden_by(cli.option_overrides()?);
    let config = options.resolve();
    let tag_prefix = cli
        .tag_prefix
        .clone()
        .or(settings.tag_prefix)
        .unwrap_or_default();
    debug!(?config, %tag_prefix, "Resolved configuration");

    let repo = GitRepository::discover(&cli.repository)
        .map_err(|e| CliError::Git(e).with_context("Failed to open git repository"))?;
    let tags = TagPersister::with_prefix(&repo, tag_prefix);

    let current = match read_lines(&cli.changelog)? {
        Some(lines) => lines,
        None => {
            if !cli.dry_run {
                ui::info_message(&format!(
                    "{} not found, starting a new one",
                    cli.changelog.display()
                ));
            }
            Vec::new()
        }
    };

    let mut formatter = ChangelogFormatter::new(&config, &repo, &tags);
    if let Some(date) = cli.date {
        formatter = formatter.with_date(date);
    }
    let lines = formatter.update_existing_lines(&current, &cli.release)?;
    let document = lines.join("\n");

    if cli.dry_run {
        print!("{document}");
        return Ok(());
    }

    fs::write(&cli.changelog, document).map_err(|e| {
        CliError::Io(e).with_context(format!("Failed to write {}", cli.changelog.display()))
    })?;
    info!(path = %cli.changelog.display(), lines = lines.len(), "Wrote changelog");

    ui::success_message(&format!(
        "Added {} to {}",
        cli.release,
        cli.changelog.display()
    ));
    Ok(())
}

/// Lines of the current changelog, or `None` when the file does not exist yet.
fn read_lines(path: &Path) -> Result<Option<Vec<String>>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content.lines().map(String::from).collect())),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => {
            Err(CliError::Io(e).with_context(format!("Failed to read {}", path.display())))
        }
    }
}
