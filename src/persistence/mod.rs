pub mod files;
pub mod settings;
pub mod snapshot;

pub use files::{
    active_workday_file, archived_workday_file, atomic_write, ensure_data_dir, get_data_dir,
    init_local_data_dir, list_archived_workdays, list_archived_workdays_on, log_file,
    next_archive_sequence, parse_archive_key, read_file, remove_file, report_file, settings_file,
};
pub use settings::{load_settings, save_settings, Settings};
pub use snapshot::{
    archive_workday, discard_workday, load_archived_workday, load_workday, restore_workday,
    save_workday, Archive, WorkdaySnapshot,
};
