//! Config set packaging
//!
//! Zips a local config set directory the way Solr's `UPLOAD` action expects:
//! entry names are relative to the config set root, use `/` separators, and
//! every sub-directory gets its own `name/` entry.

use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::{TesterError, TesterResult};

/// One entry of a packaged config set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveEntry {
    Directory(String),
    File { name: String, contents: Vec<u8> },
}

impl ArchiveEntry {
    pub fn name(&self) -> &str {
        match self {
            ArchiveEntry::Directory(name) => name,
            ArchiveEntry::File { name, .. } => name,
        }
    }
}

/// Zip `source_dir` into a temporary file in the system temp directory.
///
/// The file is removed when the returned handle is dropped or closed.
pub fn package_config_dir(source_dir: &Path) -> TesterResult<NamedTempFile> {
    package_config_dir_in(source_dir, &std::env::temp_dir())
}

/// Zip `source_dir` into a temporary file created under `archive_dir`.
///
/// Symlinks and names that are not valid UTF-8 are rejected rather than
/// followed or rewritten.
pub fn package_config_dir_in(source_dir: &Path, archive_dir: &Path) -> TesterResult<NamedTempFile> {
    if !source_dir.is_dir() {
        return Err(TesterError::MissingConfigSet {
            path: source_dir.to_path_buf(),
        });
    }

    let tree = collect_tree(source_dir)?;

    let mut archive = tempfile::Builder::new()
        .prefix("configset")
        .suffix(".zip")
        .tempfile_in(archive_dir)?;

    let mut writer = ZipWriter::new(archive.as_file_mut());
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for node in tree {
        let name = entry_name(source_dir, &node.path)?;
        if node.is_dir {
            writer.add_directory(format!("{name}/"), options)?;
        } else {
            writer.start_file(name, options)?;
            let contents = fs::read(&node.path)?;
            writer.write_all(&contents)?;
        }
    }

    writer.finish()?;
    Ok(archive)
}

/// Read back every entry of a zip archive, in archive order
pub fn read_entries<R: Read + io::Seek>(reader: R) -> TesterResult<Vec<ArchiveEntry>> {
    let mut archive = ZipArchive::new(reader)?;
    let mut entries = Vec::with_capacity(archive.len());

    for index in 0..archive.len() {
        let mut file = archive.by_index(index)?;
        let name = file.name().to_string();
        if file.is_dir() {
            entries.push(ArchiveEntry::Directory(name));
        } else {
            let mut contents = Vec::new();
            file.read_to_end(&mut contents)?;
            entries.push(ArchiveEntry::File { name, contents });
        }
    }

    Ok(entries)
}

/// Read back every entry of a zip file on disk
pub fn read_entries_from_path(path: &Path) -> TesterResult<Vec<ArchiveEntry>> {
    read_entries(File::open(path)?)
}

struct TreeNode {
    path: PathBuf,
    is_dir: bool,
}

// Pre-order walk: a directory is listed before its contents, siblings sorted by name.
fn collect_tree(root: &Path) -> TesterResult<Vec<TreeNode>> {
    let mut nodes = Vec::new();
    walk(root, &mut nodes)?;
    Ok(nodes)
}

fn walk(dir: &Path, nodes: &mut Vec<TreeNode>) -> TesterResult<()> {
    let mut children = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        // file_type does not follow symlinks
        let file_type = entry.file_type()?;
        if file_type.is_symlink() {
            return Err(TesterError::UnsupportedConfigSetEntry {
                path: entry.path(),
                reason: "symbolic links are not packaged".to_string(),
            });
        }
        children.push(TreeNode {
            path: entry.path(),
            is_dir: file_type.is_dir(),
        });
    }
    children.sort_by(|a, b| a.path.cmp(&b.path));

    for child in children {
        let subdir = child.is_dir.then(|| child.path.clone());
        nodes.push(child);
        if let Some(subdir) = subdir {
            walk(&subdir, nodes)?;
        }
    }
    Ok(())
}

fn entry_name(root: &Path, path: &Path) -> TesterResult<String> {
    let relative = path.strip_prefix(root).map_err(|_| TesterError::MissingConfigSet {
        path: path.to_path_buf(),
    })?;

    let parts = relative
        .components()
        .map(|c| {
            c.as_os_str()
                .to_str()
                .ok_or_else(|| TesterError::UnsupportedConfigSetEntry {
                    path: path.to_path_buf(),
                    reason: "file name is not valid UTF-8".to_string(),
                })
        })
        .collect::<TesterResult<Vec<&str>>>()?;

    Ok(parts.join("/"))
}
