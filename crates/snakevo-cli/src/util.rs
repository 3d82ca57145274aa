use std::{
    fs::{self, File},
    io::{self, BufReader, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::{Serialize, de::DeserializeOwned};

use crate::schema::model::TrainedModel;

/// Destination of one pretty-printed JSON document.
#[derive(Debug)]
pub enum Output {
    Stdout(StdoutLock<'static>),
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub fn stdout() -> Self {
        Output::Stdout(io::stdout().lock())
    }

    /// Creates (or truncates) `path`, creating missing parent directories.
    pub fn create(path: PathBuf) -> anyhow::Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    fn target(&self) -> String {
        match self {
            Output::Stdout(_) => "stdout".to_owned(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    fn writer(&mut self) -> &mut dyn io::Write {
        match self {
            Output::Stdout(writer) => writer,
            Output::File { writer, .. } => writer,
        }
    }

    /// Writes `value` followed by a newline and flushes.
    pub fn write_json<T>(mut self, value: &T) -> anyhow::Result<()>
    where
        T: Serialize + ?Sized,
    {
        let target = self.target();
        let writer = self.writer();
        serde_json::to_writer_pretty(&mut *writer, value)
            .with_context(|| format!("Failed to write JSON to {target}"))?;
        writeln!(writer)
            .and_then(|()| writer.flush())
            .with_context(|| format!("Failed to finish writing {target}"))?;
        Ok(())
    }
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {file_kind} file: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {file_kind} JSON file: {}", path.display()))
}

/// Writes `value` as pretty JSON into `dir/file_name` and returns the path.
pub fn write_json_file<T>(dir: &Path, file_name: &str, value: &T) -> anyhow::Result<PathBuf>
where
    T: Serialize + ?Sized,
{
    let path = dir.join(file_name);
    Output::create(path.clone())?.write_json(value)?;
    Ok(path)
}

pub fn read_model_file<P>(path: P) -> anyhow::Result<TrainedModel>
where
    P: AsRef<Path>,
{
    read_json_file("model", path)
}
