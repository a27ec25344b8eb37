//! Output sinks for `cargo-configyml`.

use std::io::{self, Write};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::{Dir, OpenOptions};
use config_yml_codegen::OutputSink;

use crate::error::CliError;

/// Writes each artifact as a file inside one directory.
#[derive(Debug)]
pub struct DirectoryOutput {
    dir: Dir,
    path: Utf8PathBuf,
    written: Vec<Utf8PathBuf>,
}

impl DirectoryOutput {
    /// Opens `out_dir`, creating it when missing.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Io`] when the directory cannot be created or
    /// opened.
    pub fn create(out_dir: &Utf8Path) -> Result<Self, CliError> {
        Ok(Self {
            dir: ensure_dir(out_dir)?,
            path: out_dir.to_path_buf(),
            written: Vec::new(),
        })
    }

    /// Paths written so far, in write order.
    #[must_use]
    pub fn written(&self) -> &[Utf8PathBuf] {
        &self.written
    }
}

impl OutputSink for DirectoryOutput {
    fn write(&mut self, file_name: &str, contents: &str) -> io::Result<()> {
        let mut file = self.dir.open_with(
            file_name,
            OpenOptions::new().write(true).create(true).truncate(true),
        )?;
        file.write_all(contents.as_bytes())?;
        let target = self.path.join(file_name);
        tracing::debug!(path = %target, "wrote serializator");
        self.written.push(target);
        Ok(())
    }
}

/// Accepts every artifact without storing it, for `--check` runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardOutput;

impl OutputSink for DiscardOutput {
    fn write(&mut self, _file_name: &str, _contents: &str) -> io::Result<()> {
        Ok(())
    }
}

fn ensure_dir(path: &Utf8Path) -> Result<Dir, CliError> {
    match Dir::open_ambient_dir(path, ambient_authority()) {
        Ok(dir) => Ok(dir),
        Err(open_err) if open_err.kind() == io::ErrorKind::NotFound => {
            Dir::create_ambient_dir_all(path, ambient_authority())
                .map_err(|io_err| CliError::io(path, io_err))?;
            Dir::open_ambient_dir(path, ambient_authority())
                .map_err(|io_err| CliError::io(path, io_err))
        }
        Err(open_err) => Err(CliError::io(path, open_err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Context, Result};
    use rstest::rstest;

    #[rstest]
    fn creates_missing_directory_and_overwrites() -> Result<()> {
        let tempdir = tempfile::tempdir()?;
        let root = Utf8PathBuf::from_path_buf(tempdir.path().to_path_buf())
            .map_err(|path| anyhow::anyhow!("non UTF-8 temp dir {}", path.display()))?;
        let out_dir = root.join("nested").join("out");

        let mut output = DirectoryOutput::create(&out_dir)?;
        output.write("server_serializator.rs", "first")?;
        output.write("server_serializator.rs", "second")?;

        let written = output.written().first().context("written path")?;
        assert_eq!(written, &out_dir.join("server_serializator.rs"));
        let contents = std::fs::read_to_string(written)?;
        assert_eq!(contents, "second");
        Ok(())
    }
}
