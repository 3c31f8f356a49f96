//! Config file search.

use camino::{Utf8Path, Utf8PathBuf};

/// File names tried in every directory, in priority order.
pub const SEARCH_PLACES: &[&str] = &[
    "package.json",
    ".postcssrc",
    ".postcssrc.json",
    ".postcssrc.yaml",
    ".postcssrc.yml",
    ".postcssrc.ts",
    ".postcssrc.cts",
    ".postcssrc.js",
    ".postcssrc.cjs",
    ".postcssrc.mjs",
    "postcss.config.ts",
    "postcss.config.cts",
    "postcss.config.js",
    "postcss.config.cjs",
    "postcss.config.mjs",
];

/// The `package.json` field holding an inline config.
pub const PACKAGE_PROP: &str = "postcss";

/// Returns the directories searched from `start`, nearest first.
///
/// The walk ends after `stop` (inclusive) or at the filesystem root.
pub fn search_dirs<'a>(
    start: &'a Utf8Path,
    stop: Option<&'a Utf8Path>,
) -> impl Iterator<Item = &'a Utf8Path> {
    let mut done = false;
    start.ancestors().take_while(move |dir| {
        if done {
            return false;
        }
        done = stop.is_some_and(|stop| *dir == stop);
        true
    })
}

/// Returns candidate files in `dir` that exist, in priority order.
pub fn candidates(dir: &Utf8Path) -> impl Iterator<Item = Utf8PathBuf> + '_ {
    SEARCH_PLACES
        .iter()
        .map(move |place| dir.join(place))
        .filter(|path| path.is_file())
}
