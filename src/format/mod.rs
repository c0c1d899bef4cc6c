//! Reply rendering: durations, markdown tables, now-playing summary
//!
//! Everything here is a pure function from parsed records to display text;
//! the dispatcher picks which renderer a verb's reply goes through.

use crate::mpd::{Record, RecordSet};

/// Song-list slot positions evaluated per table (and the row cap)
const SONG_LIST_SLOTS: usize = 30;

const SONG_TABLE_HEADERS: [&str; 5] = ["No", "Artist", "Title", "Duration", "Genre"];

const NO_SONGS_FOUND: &str = "No songs found!";

/// Format a seconds count as `MM:SS`, or `H:MM:SS` once it reaches an hour.
///
/// Hours are not zero-padded and keep growing past 24 (no wrap, no days
/// component).
pub fn format_duration(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}

/// Read a seconds field off a record: absent or unparseable counts as 0,
/// fractional values (MPD's `elapsed` is a decimal string) truncate.
pub fn seconds_field(record: &Record, key: &str) -> u64 {
    record
        .get(key)
        .and_then(|v| v.parse::<f64>().ok())
        .map(|secs| secs.max(0.0) as u64)
        .unwrap_or(0)
}

/// Render a record set as a generic markdown table.
///
/// Headers come from the first record in insertion order; every record is
/// expected to expose that header set, and missing fields render as empty
/// cells.
pub fn markdown_table(records: &RecordSet) -> String {
    let headers: Vec<&str> = records.first().keys().collect();
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|record| {
            headers
                .iter()
                .map(|h| record.get(h).unwrap_or("").to_string())
                .collect()
        })
        .collect();
    render_table(&headers, &rows)
}

/// Render a song list: capped table plus a count line.
///
/// Exactly [`SONG_LIST_SLOTS`] positions are evaluated; positions past the
/// end of the set are skipped, so the table never exceeds 30 rows however
/// long the reply was.
pub fn song_table(records: &RecordSet) -> String {
    // A lone record without a duration is the daemon's way of saying the
    // search matched nothing.
    if records.len() == 1 && !records.first().contains_key("Time") {
        return NO_SONGS_FOUND.to_string();
    }

    let mut rows = Vec::new();
    for index in 1..=SONG_LIST_SLOTS {
        let Some(record) = records.get(index - 1) else {
            continue;
        };
        let duration = if record.contains_key("Time") {
            format_duration(seconds_field(record, "Time"))
        } else {
            String::new()
        };
        rows.push(vec![
            index.to_string(),
            record.get("Artist").unwrap_or("").to_string(),
            record.get("Title").unwrap_or("").to_string(),
            duration,
            record.get("Genre").unwrap_or("").to_string(),
        ]);
    }

    let table = render_table(&SONG_TABLE_HEADERS, &rows);
    if records.len() > 1 {
        let suffix = if records.len() > SONG_LIST_SLOTS {
            format!(". Showing first {} items:", SONG_LIST_SLOTS)
        } else {
            ":".to_string()
        };
        format!("Found {} items{}\n\n{}", records.len(), suffix, table)
    } else {
        table
    }
}

/// The short play-state summary: `` `state` elapsed / total `` on the first
/// line, title on the second, and an emphasised artist line when known.
pub fn now_playing(status: &Record, song: &Record) -> String {
    let state = status.get("state").unwrap_or("");
    let elapsed = format_duration(seconds_field(status, "elapsed"));
    let total = format_duration(seconds_field(song, "Time"));
    let title = song.get("Title").unwrap_or("No title");

    let mut text = format!("`{}` {} / {}\n{}", state, elapsed, total, title);
    if let Some(artist) = song.get("Artist") {
        text.push_str(&format!("\n~ _{}_", artist));
    }
    text
}

fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut out = String::new();
    out.push_str(&format!("| {} |\n", headers.join(" | ")));
    out.push_str(&format!(
        "| {} |\n",
        headers.iter().map(|_| "---").collect::<Vec<_>>().join(" | ")
    ));
    for row in rows {
        out.push_str(&format!("| {} |\n", row.join(" | ")));
    }
    out
}
