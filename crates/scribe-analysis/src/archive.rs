//! Project archive reading
//!
//! Pulls Python sources straight out of an uploaded ZIP. Entry names are
//! checked with `enclosed_name` before anything else, so an archive with
//! traversal paths is rejected as a whole. Hidden directories,
//! `__pycache__` and undecodable files are skipped the same way a
//! filesystem walk would skip them.

use crate::error::ArchiveError;
use std::io::{Cursor, Read};
use std::path::{Component, PathBuf};
use zip::ZipArchive;

/// Collect `(relative path, source)` pairs for every Python file in the
/// archive, sorted by path.
pub fn collect_python_sources(bytes: &[u8]) -> Result<Vec<(String, String)>, ArchiveError> {
    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).map_err(ArchiveError::InvalidArchive)?;

    let mut sources = Vec::new();
    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(ArchiveError::InvalidArchive)?;
        // Reject the whole upload on any unsafe member, python file or not.
        let path: PathBuf = entry.enclosed_name().ok_or(ArchiveError::UnsafePath)?;
        if entry.is_dir() {
            continue;
        }

        let hidden_or_cache = path.components().any(|c| match c {
            Component::Normal(part) => {
                let part = part.to_string_lossy();
                part.starts_with('.') || part == "__pycache__"
            }
            _ => false,
        });
        if hidden_or_cache {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some("py") {
            continue;
        }

        let mut raw = Vec::new();
        entry.read_to_end(&mut raw).map_err(ArchiveError::EntryRead)?;
        let Ok(source) = String::from_utf8(raw) else {
            tracing::debug!(path = %path.display(), "skipping non-utf8 archive entry");
            continue;
        };

        let rel_path = path
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/");
        sources.push((rel_path, source));
    }

    sources.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(sources)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn build_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, data) in entries {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(data).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn collects_python_files_sorted() {
        let bytes = build_zip(&[
            ("pkg/b.py", b"def b(): pass\n"),
            ("a.py", b"def a(): pass\n"),
            ("readme.md", b"# hi\n"),
        ]);
        let sources = collect_python_sources(&bytes).unwrap();
        let paths: Vec<_> = sources.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(paths, vec!["a.py", "pkg/b.py"]);
    }

    #[test]
    fn zero_python_files_is_ok() {
        let bytes = build_zip(&[("notes.txt", b"nothing here")]);
        let sources = collect_python_sources(&bytes).unwrap();
        assert!(sources.is_empty());
    }

    #[test]
    fn traversal_entry_rejects_archive() {
        let bytes = build_zip(&[("../evil.py", b"def evil(): pass\n")]);
        let err = collect_python_sources(&bytes).unwrap_err();
        assert!(matches!(err, ArchiveError::UnsafePath));
    }

    #[test]
    fn skips_hidden_and_cache_dirs() {
        let bytes = build_zip(&[
            (".venv/lib.py", b"x = 1\n"),
            ("pkg/__pycache__/a.py", b"x = 1\n"),
            ("pkg/real.py", b"x = 1\n"),
        ]);
        let sources = collect_python_sources(&bytes).unwrap();
        let paths: Vec<_> = sources.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(paths, vec!["pkg/real.py"]);
    }

    #[test]
    fn skips_non_utf8_python_file() {
        let bytes = build_zip(&[("bad.py", &[0xff, 0xfe, 0x00][..]), ("ok.py", b"y = 2\n")]);
        let sources = collect_python_sources(&bytes).unwrap();
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].0, "ok.py");
    }

    #[test]
    fn garbage_bytes_are_an_invalid_archive() {
        let err = collect_python_sources(b"definitely not a zip").unwrap_err();
        assert!(matches!(err, ArchiveError::InvalidArchive(_)));
    }
}
