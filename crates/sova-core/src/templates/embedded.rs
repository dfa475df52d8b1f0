//! Templates bundled into the binary at compile time

use rust_embed::RustEmbed;

/// Every file under the workspace `templates/` directory
#[derive(RustEmbed)]
#[folder = "../../templates/"]
pub(crate) struct BundledTemplates;

/// Iterate `(relative_path, contents)` pairs of the bundled store, sorted by path
pub(crate) fn bundled_files() -> Vec<(String, Vec<u8>)> {
    let mut paths: Vec<String> = BundledTemplates::iter().map(|p| p.into_owned()).collect();
    paths.sort();

    paths
        .into_iter()
        .filter_map(|path| {
            BundledTemplates::get(&path).map(|file| (path, file.data.into_owned()))
        })
        .collect()
}
