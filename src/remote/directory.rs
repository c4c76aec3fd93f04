//! Directory-backed remote host.
//!
//! ```text
//! <dir>/
//! ├── images/<identifier>.<ext>
//! ├── pages/<name>.md
//! ├── stylesheet.css
//! └── revisions.log
//! ```

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};

use super::RemoteHost;
use crate::debug;
use crate::error::SheetError;
use crate::utils::path::normalize_path;

const FILE_SCHEME: &str = "file://";

#[derive(Debug, Clone)]
pub struct DirectoryHost {
    root: PathBuf,
}

impl DirectoryHost {
    pub fn new(root: &Path) -> Self {
        Self {
            root: normalize_path(root),
        }
    }

    fn images_dir(&self) -> PathBuf {
        self.root.join("images")
    }

    fn stylesheet_path(&self) -> PathBuf {
        self.root.join("stylesheet.css")
    }

    fn page_path(&self, name: &str) -> Result<PathBuf, SheetError> {
        let relative = Path::new(name);
        let is_plain = !name.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !is_plain {
            return Err(SheetError::Remote {
                operation: "page lookup",
                details: format!("invalid page name `{name}`"),
            });
        }
        Ok(self.root.join("pages").join(format!("{name}.md")))
    }

    /// Image files whose stem is `identifier`, whatever the extension.
    fn image_files(&self, identifier: &str) -> io::Result<Vec<PathBuf>> {
        let dir = self.images_dir();
        if !dir.is_dir() {
            return Ok(Vec::new());
        }
        let mut files = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.is_file() && path.file_stem().is_some_and(|stem| stem == identifier) {
                files.push(path);
            }
        }
        Ok(files)
    }

    fn append_revision(&self, what: &str, note: &str) -> Result<(), SheetError> {
        let path = self.root.join("revisions.log");
        let mut log = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|err| SheetError::write("the revision log", &path, err))?;
        writeln!(log, "{what}: {note}")
            .map_err(|err| SheetError::write("the revision log", &path, err))
    }

    fn ensure_dir(&self, dir: &Path, what: &'static str) -> Result<(), SheetError> {
        fs::create_dir_all(dir).map_err(|err| SheetError::write(what, dir, err))
    }
}

fn file_url(path: &Path) -> String {
    format!("{FILE_SCHEME}{}", path.display())
}

fn extension_for(format: &str) -> &'static str {
    match format.to_ascii_lowercase().as_str() {
        "jpeg" | "jpg" => "jpg",
        "gif" => "gif",
        "webp" => "webp",
        _ => "png",
    }
}

impl RemoteHost for DirectoryHost {
    fn list_images(&self) -> Result<Vec<(String, String)>, SheetError> {
        let dir = self.images_dir();
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let remote_err = |err: io::Error| SheetError::Remote {
            operation: "image listing",
            details: err.to_string(),
        };
        let mut images = Vec::new();
        for entry in fs::read_dir(&dir).map_err(remote_err)? {
            let path = entry.map_err(remote_err)?.path();
            if !path.is_file() {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                images.push((stem.to_string(), file_url(&path)));
            }
        }
        images.sort();
        Ok(images)
    }

    fn probe_size(&self, url: &str) -> Option<u64> {
        let path = url.strip_prefix(FILE_SCHEME)?;
        fs::metadata(path).ok().filter(|m| m.is_file()).map(|m| m.len())
    }

    fn upload_image(
        &self,
        identifier: &str,
        path: &Path,
        format: &str,
    ) -> Result<String, SheetError> {
        let upload_err = |err: io::Error| SheetError::Upload {
            path: path.to_path_buf(),
            details: err.to_string(),
        };

        let dir = self.images_dir();
        fs::create_dir_all(&dir).map_err(upload_err)?;
        // a replaced image may have changed format
        for stale in self.image_files(identifier).map_err(upload_err)? {
            fs::remove_file(stale).map_err(upload_err)?;
        }

        let target = dir.join(format!("{identifier}.{}", extension_for(format)));
        fs::copy(path, &target).map_err(upload_err)?;
        debug!("remote"; "uploaded {} as {}", path.display(), identifier);
        Ok(file_url(&target))
    }

    fn remove_image(&self, identifier: &str) -> Result<(), SheetError> {
        let remote_err = |err: io::Error| SheetError::Remote {
            operation: "image removal",
            details: format!("`{identifier}`: {err}"),
        };
        for file in self.image_files(identifier).map_err(remote_err)? {
            fs::remove_file(file).map_err(remote_err)?;
        }
        debug!("remote"; "removed {}", identifier);
        Ok(())
    }

    fn read_page(&self, name: &str) -> Result<Option<String>, SheetError> {
        let path = self.page_path(name)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(SheetError::read("the data page", path, err)),
        }
    }

    fn write_page(&self, name: &str, content: &str, note: &str) -> Result<(), SheetError> {
        let path = self.page_path(name)?;
        if let Some(parent) = path.parent() {
            self.ensure_dir(parent, "the pages directory")?;
        }
        fs::write(&path, content).map_err(|err| SheetError::write("the data page", &path, err))?;
        self.append_revision(name, note)
    }

    fn read_stylesheet(&self) -> Result<String, SheetError> {
        let path = self.stylesheet_path();
        match fs::read_to_string(&path) {
            Ok(css) => Ok(css),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(String::new()),
            Err(err) => Err(SheetError::read("the published stylesheet", path, err)),
        }
    }

    fn write_stylesheet(&self, css: &str, note: &str) -> Result<usize, SheetError> {
        self.ensure_dir(&self.root, "the remote directory")?;
        let path = self.stylesheet_path();
        fs::write(&path, css)
            .map_err(|err| SheetError::write("the published stylesheet", &path, err))?;
        self.append_revision("stylesheet", note)?;
        Ok(self.read_stylesheet()?.len())
    }
}
