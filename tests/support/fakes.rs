// ABOUTME: In-memory fakes for CommandRunner, ObjectStorage and StackQuery.
// ABOUTME: All fakes append to one shared event log so tests can assert call order.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use stackdrop::command::{CommandError, CommandLine, CommandOutput, CommandRunner};
use stackdrop::stack::{StackOutput, StackQuery, StackQueryError, StackRecord};
use stackdrop::storage::{ObjectStorage, StorageError, Upload};
use stackdrop::types::{BucketName, Region, StackName};

/// One observable call made against a fake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Command(String),
    BucketExists(String),
    CreateBucket { bucket: String, region: String },
    Upload {
        bucket: String,
        key: String,
        content_type: Option<String>,
    },
    DescribeStack(String),
}

impl Event {
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            Event::BucketExists(_) | Event::CreateBucket { .. } | Event::Upload { .. }
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct EventLog(Arc<Mutex<Vec<Event>>>);

impl EventLog {
    pub fn push(&self, event: Event) {
        self.0.lock().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.lock().clone()
    }

    pub fn commands(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Command(cmd) => Some(cmd),
                _ => None,
            })
            .collect()
    }

    pub fn uploads(&self) -> Vec<(String, String, Option<String>)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Upload {
                    bucket,
                    key,
                    content_type,
                } => Some((bucket, key, content_type)),
                _ => None,
            })
            .collect()
    }

    pub fn creates(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, Event::CreateBucket { .. }))
            .count()
    }
}

// =============================================================================
// Command runner
// =============================================================================

/// Records commands instead of spawning them.
pub struct FakeRunner {
    log: EventLog,
    fail_on: Option<(String, i32)>,
    spawn_error_on: Option<String>,
    stdout: String,
}

impl FakeRunner {
    pub fn new(log: &EventLog) -> Self {
        Self {
            log: log.clone(),
            fail_on: None,
            spawn_error_on: None,
            stdout: String::new(),
        }
    }

    /// Exit with `code` for any command whose rendered line contains `needle`.
    pub fn failing_on(mut self, needle: &str, code: i32) -> Self {
        self.fail_on = Some((needle.to_string(), code));
        self
    }

    /// Fail to spawn any command whose rendered line contains `needle`.
    pub fn unspawnable(mut self, needle: &str) -> Self {
        self.spawn_error_on = Some(needle.to_string());
        self
    }

    pub fn with_stdout(mut self, stdout: &str) -> Self {
        self.stdout = stdout.to_string();
        self
    }
}

#[async_trait]
impl CommandRunner for FakeRunner {
    async fn execute(
        &self,
        command: &CommandLine,
        _workdir: Option<&Path>,
    ) -> Result<CommandOutput, CommandError> {
        let line = command.to_string();
        self.log.push(Event::Command(line.clone()));

        if let Some(needle) = &self.spawn_error_on
            && line.contains(needle.as_str())
        {
            return Err(CommandError::Spawn {
                command: line,
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not installed"),
            });
        }

        if let Some((needle, code)) = &self.fail_on
            && line.contains(needle.as_str())
        {
            return Ok(CommandOutput {
                success: false,
                exit_code: Some(*code),
                stdout: String::new(),
                stderr: format!("Error: {needle} went wrong\n"),
            });
        }

        Ok(CommandOutput {
            success: true,
            exit_code: Some(0),
            stdout: self.stdout.clone(),
            stderr: String::new(),
        })
    }
}

// =============================================================================
// Object storage
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub body: Vec<u8>,
    pub content_type: Option<String>,
}

/// Buckets and objects kept in memory.
pub struct InMemoryStorage {
    log: EventLog,
    buckets: Mutex<HashMap<String, String>>,
    objects: Mutex<HashMap<(String, String), StoredObject>>,
    reject_create: bool,
    fail_upload_key: Option<String>,
}

impl InMemoryStorage {
    pub fn new(log: &EventLog) -> Self {
        Self {
            log: log.clone(),
            buckets: Mutex::new(HashMap::new()),
            objects: Mutex::new(HashMap::new()),
            reject_create: false,
            fail_upload_key: None,
        }
    }

    pub fn with_bucket(self, bucket: &str, region: &str) -> Self {
        self.buckets
            .lock()
            .insert(bucket.to_string(), region.to_string());
        self
    }

    pub fn rejecting_creates(mut self) -> Self {
        self.reject_create = true;
        self
    }

    pub fn failing_upload_of(mut self, key: &str) -> Self {
        self.fail_upload_key = Some(key.to_string());
        self
    }

    pub fn bucket_region(&self, bucket: &str) -> Option<String> {
        self.buckets.lock().get(bucket).cloned()
    }

    pub fn object(&self, bucket: &str, key: &str) -> Option<StoredObject> {
        self.objects
            .lock()
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }

    pub fn object_count(&self) -> usize {
        self.objects.lock().len()
    }
}

#[async_trait]
impl ObjectStorage for InMemoryStorage {
    async fn bucket_exists(&self, bucket: &BucketName) -> Result<bool, StorageError> {
        self.log.push(Event::BucketExists(bucket.to_string()));
        Ok(self.buckets.lock().contains_key(bucket.as_str()))
    }

    async fn create_bucket(
        &self,
        bucket: &BucketName,
        region: &Region,
    ) -> Result<(), StorageError> {
        self.log.push(Event::CreateBucket {
            bucket: bucket.to_string(),
            region: region.to_string(),
        });

        if self.reject_create {
            return Err(StorageError::CreateRejected {
                bucket: bucket.to_string(),
                message: "BucketAlreadyExists".to_string(),
            });
        }

        self.buckets
            .lock()
            .insert(bucket.to_string(), region.to_string());
        Ok(())
    }

    async fn upload_file(&self, upload: &Upload<'_>) -> Result<(), StorageError> {
        self.log.push(Event::Upload {
            bucket: upload.bucket.to_string(),
            key: upload.key.to_string(),
            content_type: upload.content_type.map(str::to_string),
        });

        if self.fail_upload_key.as_deref() == Some(upload.key) {
            return Err(StorageError::Transfer {
                bucket: upload.bucket.to_string(),
                key: upload.key.to_string(),
                message: "connection reset".to_string(),
            });
        }

        let body = std::fs::read(upload.path).map_err(|e| StorageError::ReadFile {
            path: upload.path.to_path_buf(),
            message: e.to_string(),
        })?;

        self.objects.lock().insert(
            (upload.bucket.to_string(), upload.key.to_string()),
            StoredObject {
                body,
                content_type: upload.content_type.map(str::to_string),
            },
        );
        Ok(())
    }
}

// =============================================================================
// Stack query
// =============================================================================

/// Serves fixed stack records by name.
pub struct FakeStacks {
    log: EventLog,
    stacks: HashMap<String, StackRecord>,
    unavailable: bool,
}

impl FakeStacks {
    pub fn new(log: &EventLog) -> Self {
        Self {
            log: log.clone(),
            stacks: HashMap::new(),
            unavailable: false,
        }
    }

    pub fn with_stack(mut self, name: &str, status: &str, outputs: &[(&str, &str)]) -> Self {
        self.stacks.insert(
            name.to_string(),
            StackRecord {
                name: name.to_string(),
                status: Some(status.to_string()),
                outputs: outputs
                    .iter()
                    .map(|(k, v)| StackOutput::new(*k, *v))
                    .collect(),
            },
        );
        self
    }

    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }
}

#[async_trait]
impl StackQuery for FakeStacks {
    async fn describe_stack(
        &self,
        name: &StackName,
    ) -> Result<Option<StackRecord>, StackQueryError> {
        self.log.push(Event::DescribeStack(name.to_string()));

        if self.unavailable {
            return Err(StackQueryError::Request {
                stack: name.to_string(),
                message: "throttled".to_string(),
            });
        }

        Ok(self.stacks.get(name.as_str()).cloned())
    }
}
