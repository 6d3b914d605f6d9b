//! Server-side dictionary loading. `scrabble::dictionary` stays I/O-free;
//! this is the one place that touches a filesystem path.

use scrabble::dictionary::{Dictionary, PermissiveDictionary, WordList};
use std::{fs, path::Path, sync::Arc};

/// Loads a newline-delimited word list from `path`. Falls back to
/// [`PermissiveDictionary`] (accepting any word of 2+ letters) if no path
/// was configured or the file can't be read, logging which happened.
pub fn load_or_permissive(path: Option<&Path>) -> Arc<dyn Dictionary> {
    let Some(path) = path else {
        log::warn!("no word list configured; accepting any word of 2+ letters");
        return Arc::new(PermissiveDictionary);
    };

    match fs::read_to_string(path) {
        Ok(contents) => {
            let words: Vec<&str> = contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .collect();
            log::info!("loaded {} words from {}", words.len(), path.display());
            Arc::new(WordList::new(words.into_iter()))
        }
        Err(err) => {
            log::warn!(
                "failed to read word list at {}: {err}; accepting any word of 2+ letters",
                path.display()
            );
            Arc::new(PermissiveDictionary)
        }
    }
}
