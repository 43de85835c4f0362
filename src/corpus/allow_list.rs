use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::CorpusError;

/// Loads held-back segment names from a file, for later comparison against
/// freshly fetched corpus data.
///
/// One identifier per line, surrounding whitespace insignificant; each
/// entry gets the `.wav` suffix so it matches canonical filenames. A
/// missing or unreadable file is fatal to the held-back workflow since the
/// filter is otherwise undefined.
pub fn load_allow_list(path: &Path) -> Result<HashSet<String>, CorpusError> {
    let contents = fs::read_to_string(path)?;
    let segments: HashSet<String> = contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|seg_id| format!("{seg_id}.wav"))
        .collect();

    info!(
        entries = segments.len(),
        path = %path.display(),
        "Held-back allow-list loaded"
    );

    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn suffixes_and_trims_entries() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "  Talk1-49484000-50449000 ").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "Talk2-1000000-2000000").unwrap();

        let list = load_allow_list(file.path()).unwrap();

        assert_eq!(list.len(), 2);
        assert!(list.contains("Talk1-49484000-50449000.wav"));
        assert!(list.contains("Talk2-1000000-2000000.wav"));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = load_allow_list(Path::new("no_such_allow_list.txt"));
        assert!(matches!(result, Err(CorpusError::Io(_))));
    }
}
