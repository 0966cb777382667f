use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Name of the data directory, both local and in the home directory
pub const DATA_DIR_NAME: &str = ".teamlead";

/// Environment variable that overrides the data directory
pub const DATA_DIR_ENV: &str = "TEAMLEAD_DIR";

/// Get the data directory: `TEAMLEAD_DIR` if set, then a local .teamlead found by
/// walking up from the current directory, then ~/.teamlead
pub fn get_data_dir() -> Result<PathBuf> {
    if let Some(dir) = env::var_os(DATA_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }

    let current_dir = env::current_dir().context("Could not determine current directory")?;
    if let Some(local_dir) = find_local_data_dir(&current_dir) {
        return Ok(local_dir);
    }

    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(DATA_DIR_NAME))
}

/// Find a local .teamlead directory by walking up the directory tree
fn find_local_data_dir(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir;

    loop {
        let candidate = current.join(DATA_DIR_NAME);
        if candidate.is_dir() {
            return Some(candidate);
        }
        current = current.parent()?;
    }
}

/// Ensure the data directory exists
pub fn ensure_data_dir() -> Result<PathBuf> {
    let dir = get_data_dir()?;
    if !dir.exists() {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }
    Ok(dir)
}

/// Initialize a local .teamlead directory in the current directory
pub fn init_local_data_dir() -> Result<PathBuf> {
    let current_dir = env::current_dir().context("Could not determine current directory")?;
    let data_dir = current_dir.join(DATA_DIR_NAME);

    if data_dir.exists() {
        anyhow::bail!("Data directory already exists: {}", data_dir.display());
    }

    fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create directory: {}", data_dir.display()))?;

    Ok(data_dir)
}

/// Path of the preserved in-progress workday
pub fn active_workday_file(dir: &Path) -> PathBuf {
    dir.join("active-workday.json")
}

/// "YYYY-MM-DD" for the first archive of a date, "YYYY-MM-DD-N" for later ones
fn archive_key(date: NaiveDate, sequence: u32) -> String {
    if sequence <= 1 {
        date.format("%Y-%m-%d").to_string()
    } else {
        format!("{}-{}", date.format("%Y-%m-%d"), sequence)
    }
}

/// Split "YYYY-MM-DD" or "YYYY-MM-DD-N" into the date and the explicit sequence, if any
pub fn parse_archive_key(key: &str) -> Option<(NaiveDate, Option<u32>)> {
    let date = NaiveDate::parse_from_str(key.get(..10)?, "%Y-%m-%d").ok()?;
    let rest = key.get(10..)?;
    if rest.is_empty() {
        return Some((date, None));
    }

    let digits = rest.strip_prefix('-')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let sequence: u32 = digits.parse().ok()?;
    (sequence >= 1).then_some((date, Some(sequence)))
}

/// Path of an archived workday (workday-YYYY-MM-DD[-N].json)
pub fn archived_workday_file(dir: &Path, date: NaiveDate, sequence: u32) -> PathBuf {
    dir.join(format!("workday-{}.json", archive_key(date, sequence)))
}

/// Path of the markdown report that goes with an archive (report-YYYY-MM-DD[-N].md)
pub fn report_file(dir: &Path, date: NaiveDate, sequence: u32) -> PathBuf {
    dir.join(format!("report-{}.md", archive_key(date, sequence)))
}

/// First sequence for `date` with neither an archive nor a report on disk
pub fn next_archive_sequence(dir: &Path, date: NaiveDate) -> u32 {
    let mut sequence = 1;
    while archived_workday_file(dir, date, sequence).exists() || report_file(dir, date, sequence).exists() {
        sequence += 1;
    }
    sequence
}

pub fn settings_file(dir: &Path) -> PathBuf {
    dir.join("settings.json")
}

pub fn log_file(dir: &Path) -> PathBuf {
    dir.join("teamlead.log")
}

/// Archived workdays as (date, sequence, path), sorted by date then sequence
fn archived_entries(dir: &Path) -> Result<Vec<(NaiveDate, u32, PathBuf)>> {
    let mut entries = Vec::new();
    if !dir.exists() {
        return Ok(entries);
    }

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();

        // workday-YYYY-MM-DD[-N].json
        let key = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|name| name.strip_prefix("workday-"))
            .and_then(|rest| rest.strip_suffix(".json"))
            .and_then(parse_archive_key);
        if let Some((date, sequence)) = key {
            entries.push((date, sequence.unwrap_or(1), path));
        }
    }

    entries.sort();
    Ok(entries)
}

/// All archived workday files, sorted by date and then by the order they were archived in
pub fn list_archived_workdays(dir: &Path) -> Result<Vec<PathBuf>> {
    Ok(archived_entries(dir)?
        .into_iter()
        .map(|(_, _, path)| path)
        .collect())
}

/// Archived workday files of one date, oldest first
pub fn list_archived_workdays_on(dir: &Path, date: NaiveDate) -> Result<Vec<PathBuf>> {
    Ok(archived_entries(dir)?
        .into_iter()
        .filter(|(day, _, _)| *day == date)
        .map(|(_, _, path)| path)
        .collect())
}

/// Atomically write content to a file using temp file + rename
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();
    let dir = path
        .parent()
        .context("File path has no parent directory")?;

    let mut temp_file = NamedTempFile::new_in(dir)
        .context("Failed to create temporary file")?;

    temp_file
        .write_all(content.as_bytes())
        .context("Failed to write to temporary file")?;

    temp_file
        .as_file()
        .sync_all()
        .context("Failed to sync temporary file")?;

    temp_file
        .persist(path)
        .with_context(|| format!("Failed to persist file: {}", path.display()))?;

    Ok(())
}

/// Read file content, None if the file doesn't exist
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Option<String>> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(None);
    }
    fs::read_to_string(path)
        .map(Some)
        .with_context(|| format!("Failed to read file: {}", path.display()))
}

/// Remove a file if present. Returns whether something was deleted.
pub fn remove_file<P: AsRef<Path>>(path: P) -> Result<bool> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(false);
    }
    fs::remove_file(path)
        .with_context(|| format!("Failed to delete file: {}", path.display()))?;
    Ok(true)
}
