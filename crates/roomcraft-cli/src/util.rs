use std::{
    fs::File,
    io::{self, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use roomcraft_engine::{LevelDefinition, builtin_levels};
use roomcraft_evaluator::policy::ScoringPolicy;
use roomcraft_store::FileStore;

/// Destination of JSON reports: stdout unless a path is given.
#[derive(Debug)]
pub enum Output {
    Stdout {
        writer: StdoutLock<'static>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub fn save_json<T>(value: &T, output_path: Option<&Path>) -> anyhow::Result<()>
    where
        T: serde::Serialize + ?Sized,
    {
        let mut output = match output_path {
            Some(path) => Output::create(path)?,
            None => Output::Stdout {
                writer: io::stdout().lock(),
            },
        };
        output.write_json(value)
    }

    fn create(path: &Path) -> anyhow::Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path: path.to_owned(),
        })
    }

    fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_owned(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    fn write_json<T>(&mut self, value: &T) -> anyhow::Result<()>
    where
        T: serde::Serialize + ?Sized,
    {
        serde_json::to_writer_pretty(&mut *self, value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(self)
            .and_then(|()| self.flush())
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))?;
        Ok(())
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout { writer } => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout { writer } => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {file_kind} file: {}", path.display()))?;
    serde_json::from_reader(io::BufReader::new(file))
        .with_context(|| format!("Failed to parse {file_kind} JSON file: {}", path.display()))
}

/// Loads the level catalog from `path`, or the built-in levels when no path is given.
///
/// Every level is validated; the first invalid one aborts loading.
pub fn load_levels(path: Option<&Path>) -> anyhow::Result<Vec<LevelDefinition>> {
    let levels: Vec<LevelDefinition> = match path {
        Some(path) => read_json_file("levels", path)?,
        None => builtin_levels(),
    };
    anyhow::ensure!(!levels.is_empty(), "Level catalog is empty");
    for level in &levels {
        level
            .validate()
            .with_context(|| format!("Invalid level {} ({})", level.id, level.title))?;
    }
    Ok(levels)
}

pub fn load_policy(path: Option<&Path>) -> anyhow::Result<ScoringPolicy> {
    match path {
        Some(path) => read_json_file("scoring policy", path),
        None => Ok(ScoringPolicy::default()),
    }
}

pub fn open_store(data_dir: &Path) -> anyhow::Result<FileStore> {
    FileStore::open(data_dir)
        .with_context(|| format!("Failed to open data directory: {}", data_dir.display()))
}

/// `mm:ss`
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(75), "01:15");
        assert_eq!(format_clock(420), "07:00");
    }

    #[test]
    fn test_builtin_levels_load_without_a_file() {
        let levels = load_levels(None).unwrap();
        assert_eq!(levels.len(), 2);
    }

    #[test]
    fn test_invalid_level_file_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("levels.json");
        let mut levels = builtin_levels();
        levels[0].rooms.clear();
        fs::write(&path, serde_json::to_string(&levels).unwrap()).unwrap();

        let err = load_levels(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("Invalid level 1"));
    }

    #[test]
    fn test_missing_policy_file_is_an_error() {
        assert!(load_policy(Some(Path::new("/nonexistent/policy.json"))).is_err());
        assert_eq!(load_policy(None).unwrap(), ScoringPolicy::default());
    }
}
