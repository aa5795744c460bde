//! Directory-backed knowledge base provider
//!
//! Layout inside the store directory:
//! - `meta.json`: format version, dimensions, count, last update time
//! - `chunks.jsonl`: one `{id, text, metadata}` record per line
//! - `vectors.bin`: `EDUV` magic, then version, dims and count as u32 LE,
//!   then `count * dims` f32 LE values in record order
//!
//! Each file is written to a temporary sibling and renamed into place.
//! The whole store is held in memory and rewritten on every insert.
//! `meta.json` is written last and is the commit point: on load only the
//! first `count` records of the other two files are read, so a write that
//! failed partway leaves the previously committed records readable.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use super::in_memory::VectorSet;
use crate::domain::ingestion::Metadata;
use crate::domain::knowledge_base::{
    AddEntriesResult, KnowledgeBaseEntry, KnowledgeBaseProvider, SearchResult, SourceInfo,
};
use crate::domain::DomainError;

const META_FILE: &str = "meta.json";
const CHUNKS_FILE: &str = "chunks.jsonl";
const VECTORS_FILE: &str = "vectors.bin";

const VECTORS_MAGIC: [u8; 4] = *b"EDUV";
const FORMAT_VERSION: u32 = 1;
const HEADER_LEN: usize = 16;

#[derive(Debug, Serialize, Deserialize)]
struct StoreMeta {
    version: u32,
    dimensions: usize,
    count: usize,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChunkRecord {
    id: String,
    text: String,
    #[serde(default)]
    metadata: Metadata,
}

/// Persistent vector store rooted at a directory
#[derive(Debug)]
pub struct LocalKnowledgeBaseProvider {
    directory: PathBuf,
    set: RwLock<VectorSet>,
}

impl LocalKnowledgeBaseProvider {
    /// Open the store at `directory`, creating an empty one if absent
    pub async fn open(directory: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let directory = directory.into();

        tokio::fs::create_dir_all(&directory)
            .await
            .map_err(|e| storage_error("create", &directory, e))?;

        let set = load(&directory).await?;

        tracing::debug!(
            directory = %directory.display(),
            entries = set.entries.len(),
            "Opened local knowledge base"
        );

        Ok(Self {
            directory,
            set: RwLock::new(set),
        })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

#[async_trait]
impl KnowledgeBaseProvider for LocalKnowledgeBaseProvider {
    fn provider_type(&self) -> &'static str {
        "local"
    }

    async fn add(&self, entries: Vec<KnowledgeBaseEntry>) -> Result<AddEntriesResult, DomainError> {
        let mut set = self.set.write().await;
        let (previous_len, previous_dims) = (set.entries.len(), set.dimensions);

        let added = set.append(entries)?;

        if let Err(e) = persist(&self.directory, &set).await {
            set.truncate(previous_len, previous_dims);
            return Err(e);
        }

        Ok(AddEntriesResult::success(added))
    }

    async fn search(
        &self,
        embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<SearchResult>, DomainError> {
        self.set.read().await.search(embedding, top_k)
    }

    async fn delete_all(&self) -> Result<usize, DomainError> {
        let mut set = self.set.write().await;

        for name in [META_FILE, CHUNKS_FILE, VECTORS_FILE] {
            let path = self.directory.join(name);
            match tokio::fs::remove_file(&path).await {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(storage_error("remove", &path, e)),
            }
        }

        tokio::fs::create_dir_all(&self.directory)
            .await
            .map_err(|e| storage_error("create", &self.directory, e))?;

        Ok(set.clear())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.set.read().await.entries.len())
    }

    async fn list_sources(&self) -> Result<Vec<SourceInfo>, DomainError> {
        Ok(self.set.read().await.sources())
    }
}

fn storage_error(action: &str, path: &Path, err: impl std::fmt::Display) -> DomainError {
    DomainError::storage(format!("Failed to {} {}: {}", action, path.display(), err))
}

async fn write_atomic(path: &Path, bytes: Vec<u8>) -> Result<(), DomainError> {
    let tmp = path.with_extension("tmp");

    tokio::fs::write(&tmp, bytes)
        .await
        .map_err(|e| storage_error("write", &tmp, e))?;

    tokio::fs::rename(&tmp, path)
        .await
        .map_err(|e| storage_error("rename", &tmp, e))
}

fn encode_vectors(set: &VectorSet) -> Vec<u8> {
    let dims = set.dimensions.unwrap_or(0);
    let mut bytes = Vec::with_capacity(HEADER_LEN + set.entries.len() * dims * 4);

    bytes.extend_from_slice(&VECTORS_MAGIC);
    bytes.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
    bytes.extend_from_slice(&(dims as u32).to_le_bytes());
    bytes.extend_from_slice(&(set.entries.len() as u32).to_le_bytes());

    for entry in &set.entries {
        for value in &entry.embedding {
            bytes.extend_from_slice(&value.to_le_bytes());
        }
    }

    bytes
}

fn encode_chunks(set: &VectorSet) -> Result<Vec<u8>, DomainError> {
    let mut bytes = Vec::new();

    for entry in &set.entries {
        let record = ChunkRecord {
            id: entry.id.clone(),
            text: entry.content.clone(),
            metadata: entry.metadata.clone(),
        };
        let line = serde_json::to_string(&record)
            .map_err(|e| DomainError::storage(format!("Failed to encode chunk: {}", e)))?;
        bytes.extend_from_slice(line.as_bytes());
        bytes.push(b'\n');
    }

    Ok(bytes)
}

/// Write vectors, then chunks, then metadata
async fn persist(directory: &Path, set: &VectorSet) -> Result<(), DomainError> {
    let meta = StoreMeta {
        version: FORMAT_VERSION,
        dimensions: set.dimensions.unwrap_or(0),
        count: set.entries.len(),
        updated_at: Utc::now(),
    };
    let meta_json = serde_json::to_vec_pretty(&meta)
        .map_err(|e| DomainError::storage(format!("Failed to encode metadata: {}", e)))?;

    write_atomic(&directory.join(VECTORS_FILE), encode_vectors(set)).await?;
    write_atomic(&directory.join(CHUNKS_FILE), encode_chunks(set)?).await?;
    write_atomic(&directory.join(META_FILE), meta_json).await
}

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

fn decode_vectors(bytes: &[u8]) -> Result<(usize, Vec<Vec<f32>>), DomainError> {
    if bytes.len() < HEADER_LEN {
        return Err(DomainError::storage("vectors.bin too small (no header)"));
    }

    if bytes[0..4] != VECTORS_MAGIC {
        return Err(DomainError::storage("Invalid vectors.bin magic"));
    }

    let version = read_u32(bytes, 4);
    if version != FORMAT_VERSION {
        return Err(DomainError::storage(format!(
            "Unsupported vectors.bin version: {}",
            version
        )));
    }

    let dims = read_u32(bytes, 8) as usize;
    let count = read_u32(bytes, 12) as usize;
    let expected_len = dims
        .checked_mul(count)
        .and_then(|n| n.checked_mul(4))
        .and_then(|n| n.checked_add(HEADER_LEN))
        .ok_or_else(|| {
            DomainError::storage(format!(
                "vectors.bin header out of range (dims={}, count={})",
                dims, count
            ))
        })?;

    if bytes.len() != expected_len {
        return Err(DomainError::storage(format!(
            "vectors.bin size mismatch: got {}, expected {} (dims={}, count={})",
            bytes.len(),
            expected_len,
            dims,
            count
        )));
    }

    let values: Vec<f32> = bytes[HEADER_LEN..]
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect();

    let vectors = if dims == 0 {
        Vec::new()
    } else {
        values.chunks_exact(dims).map(<[f32]>::to_vec).collect()
    };

    Ok((dims, vectors))
}

async fn load(directory: &Path) -> Result<VectorSet, DomainError> {
    let meta_path = directory.join(META_FILE);
    if !tokio::fs::try_exists(&meta_path).await.unwrap_or(false) {
        return Ok(VectorSet::default());
    }

    let meta_bytes = tokio::fs::read(&meta_path)
        .await
        .map_err(|e| storage_error("read", &meta_path, e))?;
    let meta: StoreMeta = serde_json::from_slice(&meta_bytes)
        .map_err(|e| storage_error("parse", &meta_path, e))?;

    if meta.version != FORMAT_VERSION {
        return Err(DomainError::storage(format!(
            "Unsupported store version: {}",
            meta.version
        )));
    }

    if meta.count == 0 {
        return Ok(VectorSet::default());
    }

    let vectors_path = directory.join(VECTORS_FILE);
    let vector_bytes = tokio::fs::read(&vectors_path)
        .await
        .map_err(|e| storage_error("read", &vectors_path, e))?;
    let (dims, mut vectors) = decode_vectors(&vector_bytes)?;

    if dims != meta.dimensions {
        return Err(DomainError::storage(format!(
            "vectors.bin has {} dimensions, meta.json records {}",
            dims, meta.dimensions
        )));
    }

    let chunks_path = directory.join(CHUNKS_FILE);
    let chunk_text = tokio::fs::read_to_string(&chunks_path)
        .await
        .map_err(|e| storage_error("read", &chunks_path, e))?;

    let records = chunk_text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .take(meta.count)
        .map(|line| {
            serde_json::from_str::<ChunkRecord>(line)
                .map_err(|e| storage_error("parse", &chunks_path, e))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if records.len() < meta.count || vectors.len() < meta.count {
        return Err(DomainError::storage(format!(
            "Store is missing committed records: {} chunks, {} vectors, meta count {}",
            records.len(),
            vectors.len(),
            meta.count
        )));
    }

    if vectors.len() > meta.count {
        tracing::warn!(
            committed = meta.count,
            found = vectors.len(),
            "Ignoring uncommitted vectors from an interrupted write"
        );
        vectors.truncate(meta.count);
    }

    let entries = records
        .into_iter()
        .zip(vectors)
        .map(|(record, embedding)| KnowledgeBaseEntry {
            id: record.id,
            content: record.text,
            embedding,
            metadata: record.metadata,
        })
        .collect::<Vec<_>>();

    Ok(VectorSet::new(entries, Some(dims)))
}
