//! [`JsonFileStore`]: the single-file implementation of
//! [`CharacterRepository`].

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use tokio::sync::Mutex;
use tome_core::{character::Character, store::CharacterRepository};
use tracing::{debug, info};

use crate::{Error, Result, document::CharacterDocument};

// ─── Store ───────────────────────────────────────────────────────────────────

/// All characters in one JSON file, rewritten whole on every change.
///
/// Writes go to a sibling temp file which is then renamed over the target, so
/// a crash never leaves a half-written document. Clones share a lock that
/// serialises read-modify-write cycles within the process; separate processes
/// are not coordinated.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
  path: PathBuf,
  lock: Arc<Mutex<()>>,
}

impl JsonFileStore {
  /// A store at `path`. The file is created on first save.
  pub fn open(path: impl Into<PathBuf>) -> Self {
    Self {
      path: path.into(),
      lock: Arc::new(Mutex::new(())),
    }
  }

  pub fn path(&self) -> &Path { &self.path }

  async fn read_document(&self) -> Result<CharacterDocument> {
    let bytes = match tokio::fs::read(&self.path).await {
      Ok(bytes) => bytes,
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
        debug!(path = %self.path.display(), "no character file yet");
        return Ok(CharacterDocument::default());
      }
      Err(e) => return Err(Error::io(&self.path, e)),
    };
    CharacterDocument::parse(&bytes).map_err(|e| Error::json(&self.path, e))
  }

  async fn write_document(&self, document: &CharacterDocument) -> Result<()> {
    let bytes = document.to_bytes().map_err(|e| Error::json(&self.path, e))?;

    let parent = self.path.parent().filter(|p| !p.as_os_str().is_empty());
    if let Some(parent) = parent {
      tokio::fs::create_dir_all(parent)
        .await
        .map_err(|e| Error::io(parent, e))?;
    }

    let tmp = self.temp_path();
    tokio::fs::write(&tmp, &bytes)
      .await
      .map_err(|e| Error::io(&tmp, e))?;
    tokio::fs::rename(&tmp, &self.path)
      .await
      .map_err(|e| Error::io(&self.path, e))?;
    Ok(())
  }

  fn temp_path(&self) -> PathBuf {
    let mut name = self
      .path
      .file_name()
      .map(|n| n.to_os_string())
      .unwrap_or_else(|| "characters.json".into());
    name.push(".tmp");
    self.path.with_file_name(name)
  }
}

// ─── CharacterRepository impl ────────────────────────────────────────────────

impl CharacterRepository for JsonFileStore {
  type Error = Error;

  async fn save(&self, character: &Character) -> Result<()> {
    character.validate()?;

    let _guard = self.lock.lock().await;
    let mut document = self.read_document().await?;
    document.upsert(character.clone());
    self.write_document(&document).await?;

    info!(
      name = %character.name,
      path = %self.path.display(),
      "saved character"
    );
    Ok(())
  }

  async fn get_all(&self) -> Result<Vec<Character>> {
    let _guard = self.lock.lock().await;
    Ok(self.read_document().await?.characters)
  }

  async fn get_by_id(&self, name: &str) -> Result<Character> {
    let _guard = self.lock.lock().await;
    self
      .read_document()
      .await?
      .find(name)
      .cloned()
      .ok_or_else(|| not_found(name))
  }

  async fn delete(&self, name: &str) -> Result<()> {
    let _guard = self.lock.lock().await;
    let mut document = self.read_document().await?;
    if !document.remove(name) {
      return Err(not_found(name));
    }
    self.write_document(&document).await?;

    info!(name, "deleted character");
    Ok(())
  }
}

fn not_found(name: &str) -> Error {
  tome_core::Error::CharacterNotFound(name.to_owned()).into()
}
