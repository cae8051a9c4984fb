//! One-shot resolution of a single location.

use crate::{config::Config, report};
use aqm_session::{resolve::LocationSource, Resolution};
use anyhow::{anyhow, bail};

/// Resolve `source` and print its report.
pub async fn run_query(config: &Config, source: LocationSource, json: bool) -> anyhow::Result<()> {
    let mut session = config.session()?;

    match session.resolve_location(source).await {
        Resolution::Applied => {
            let snapshot = session
                .current()
                .ok_or_else(|| anyhow!("resolution applied without a snapshot"))?;
            if json {
                println!("{}", report::snapshot_json(snapshot)?);
            } else {
                print!("{}", report::render_snapshot(snapshot));
            }
            Ok(())
        }
        Resolution::Skipped => bail!("Enter a city name to search for"),
        Resolution::Failed | Resolution::Stale => match session.error() {
            Some(error) => bail!("{} ({})", error.user_message(), error),
            None => bail!("resolution did not complete"),
        },
    }
}
