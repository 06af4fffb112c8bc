use chrono::{Datelike, Local, NaiveDate};

use crate::types::{LikedSong, Track};

/// Name of the playlist for the month containing `date`, e.g. `Jan'25`.
pub fn playlist_name(date: NaiveDate) -> String {
    date.format("%b'%y").to_string()
}

/// Keeps the tracks liked in calendar month `month` (1-12), preserving order.
///
/// Only the month number is compared: a track liked in the same month of an
/// earlier year is kept as well.
pub fn filter_liked_songs_for_month(songs: Vec<LikedSong>, month: u32) -> Vec<Track> {
    songs
        .into_iter()
        .filter(|song| song.added_at.month() == month)
        .map(|song| song.track)
        .collect()
}

/// Parses a `YYYY-MM-DD` date, falling back to today's local date.
pub fn get_date_from_string(date: Option<String>) -> NaiveDate {
    match date {
        Some(date_str) => NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
            .unwrap_or_else(|_| Local::now().date_naive()),
        None => Local::now().date_naive(),
    }
}
