use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// On-disk shape of the score file: one key, decimal string value
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
struct ScoreFile {
    #[serde(default)]
    wpm: Option<String>,
}

/// Home of the last wpm score
pub trait ScoreStore {
    /// Last persisted score, 0 when nothing usable is stored
    fn load(&self) -> u32;
    fn save(&self, wpm: u32) -> io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl ScoreStore for FileScoreStore {
    fn load(&self) -> u32 {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(_) => return 0,
        };
        match serde_json::from_slice::<ScoreFile>(&bytes) {
            Ok(ScoreFile { wpm: Some(value) }) => value.trim().parse().unwrap_or_else(|_| {
                log::warn!("ignoring unparsable score {:?} in {}", value, self.path.display());
                0
            }),
            Ok(ScoreFile { wpm: None }) => 0,
            Err(e) => {
                log::warn!("ignoring corrupt score file {}: {}", self.path.display(), e);
                0
            }
        }
    }

    fn save(&self, wpm: u32) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec(&ScoreFile {
            wpm: Some(wpm.to_string()),
        })?;
        fs::write(&self.path, data)
    }
}

/// Score memory turned off; nothing is read or written
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledScoreStore;

impl ScoreStore for DisabledScoreStore {
    fn load(&self) -> u32 {
        0
    }

    fn save(&self, _wpm: u32) -> io::Result<()> {
        Ok(())
    }
}

/// Process-local store for tests and headless drivers.
/// Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    value: Arc<Mutex<Option<u32>>>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_score(wpm: u32) -> Self {
        Self {
            value: Arc::new(Mutex::new(Some(wpm))),
        }
    }

    /// Raw stored value, None if never written
    pub fn stored(&self) -> Option<u32> {
        self.value.lock().ok().and_then(|v| *v)
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> u32 {
        self.stored().unwrap_or(0)
    }

    fn save(&self, wpm: u32) -> io::Result<()> {
        let mut slot = self
            .value
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "score slot poisoned"))?;
        *slot = Some(wpm);
        Ok(())
    }
}

/// Pick the store for a resolved score path; None disables score memory
pub fn open_store(path: Option<PathBuf>) -> Box<dyn ScoreStore> {
    match path {
        Some(path) => {
            log::debug!("score file at {}", path.display());
            Box::new(FileScoreStore::with_path(path))
        }
        None => {
            log::info!("score memory disabled");
            Box::new(DisabledScoreStore)
        }
    }
}
