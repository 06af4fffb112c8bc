use tabled::Table;

use crate::{
    config::{Config, Limits},
    error, info,
    spotify::SpotifyClient,
    success,
    sync::{self, SyncReport, SyncRequest},
    types::TrackTableRow,
    utils, warning,
};

pub async fn sync(owner_id: String, date: Option<String>, limits: Limits, dry_run: bool) {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => error!("Cannot load configuration. Err: {}", e),
    };

    let request = SyncRequest {
        credentials: config.credentials,
        owner_id,
        date: utils::get_date_from_string(date),
        limits,
        dry_run,
    };

    if dry_run {
        warning!("Dry run: no playlist will be created and no track added");
    }
    info!(
        "Syncing liked songs into playlist {}",
        utils::playlist_name(request.date)
    );

    let client = SpotifyClient::new(config.endpoints);
    match sync::run(&client, &request).await {
        Ok(report) => print_report(&report),
        Err(e) => error!("{}", e),
    }
}

fn print_report(report: &SyncReport) {
    if report.created {
        success!("Playlist {} created.", report.playlist_name);
    }

    if !report.tracks.is_empty() {
        let table_rows: Vec<TrackTableRow> = report
            .tracks
            .iter()
            .map(|result| TrackTableRow {
                track: result.track.name.clone(),
                artist: result.track.main_artist().to_string(),
                status: result.outcome.to_string(),
            })
            .collect();

        let table = Table::new(table_rows);
        println!("{}", table);
    }

    success!(
        "{} song(s) added to playlist: {}",
        report.added(),
        report.playlist_name
    );
}
