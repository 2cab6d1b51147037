//! Settings loading and artifact persistence.

use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::Path,
};

use serde::Serialize;

use crate::settings::Settings;

pub fn read_settings(path: impl AsRef<Path>) -> Result<Settings, io::Error> {
    let file = File::open(path)?;
    serde_json::from_reader(file).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
}

pub fn write_text(path: impl AsRef<Path>, contents: &str) -> Result<(), io::Error> {
    ensure_parent(path.as_ref())?;
    fs::write(path, contents)
}

pub fn write_json<T: Serialize>(path: impl AsRef<Path>, value: &T) -> Result<(), io::Error> {
    ensure_parent(path.as_ref())?;
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
    writer.flush()
}

fn ensure_parent(path: &Path) -> Result<(), io::Error> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::HighwayFilter;

    #[test]
    fn settings_round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = Settings {
            bbox: [4.3841, 50.8127, 4.3920, 50.8182],
            highways: HighwayFilter::Selection(vec!["residential".into()]),
            timeout_ms: 60_000,
            max_content_length: 1_000_000,
        };

        write_json(&path, &settings).unwrap();
        let loaded = read_settings(&path).unwrap();
        assert_eq!(loaded.bbox, settings.bbox);
        assert_eq!(loaded.highways, settings.highways);
    }

    #[test]
    fn write_text_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/artifacts/osm-script.txt");
        write_text(&path, "[out:json];").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[out:json];");
    }

    #[test]
    fn invalid_settings_file_surfaces_as_invalid_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "not json").unwrap();
        let err = read_settings(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
