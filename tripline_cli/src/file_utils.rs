use std::path::{Path, PathBuf};

const GEOJSON_EXTENSIONS: [&str; 2] = ["geojson", "json"];
const TRIPS_SUFFIX: &str = ".trips.json";

pub fn read_folder(folder_path: &PathBuf) -> Result<Vec<PathBuf>, std::io::Error> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(folder_path)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        } else if path.is_dir() {
            files.extend(read_folder(&path)?);
        }
    }

    files.sort();

    Ok(files)
}

/// GeoJSON input files. Outputs of earlier runs are left out.
pub fn is_geojson(path: &Path) -> bool {
    let is_trips_output = path
        .file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.to_ascii_lowercase().ends_with(TRIPS_SUFFIX))
        .unwrap_or(false);
    if is_trips_output {
        return false;
    }

    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| GEOJSON_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// `<out>/<stem>.trips.json` for a file read from a folder.
pub fn output_file_for(input: &Path, out: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| String::from("trips"));

    out.join(format!("{stem}{TRIPS_SUFFIX}"))
}
