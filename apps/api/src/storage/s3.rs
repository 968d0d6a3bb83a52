use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::info;

use super::{ContentStore, StorageError};

const KEY_PREFIX: &str = "resumes/";

/// Content store backed by an S3 bucket (MinIO locally, AWS in production).
pub struct S3ContentStore {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3ContentStore {
    pub fn new(client: aws_sdk_s3::Client, bucket: String) -> Self {
        info!("S3 content store in bucket {bucket}");
        Self { client, bucket }
    }

    fn object_key(key: &str) -> String {
        format!("{KEY_PREFIX}{key}")
    }
}

#[async_trait]
impl ContentStore for S3ContentStore {
    async fn put(&self, key: &str, bytes: Bytes) -> Result<(), StorageError> {
        let content_type = mime_guess::from_path(key).first_or_octet_stream();
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(Self::object_key(key))
            .body(ByteStream::from(bytes))
            .content_type(content_type.essence_str())
            .send()
            .await
            .map_err(|e| StorageError::ObjectStore(format!("S3 upload failed: {e}")))?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Bytes>, StorageError> {
        let output = match self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(Self::object_key(key))
            .send()
            .await
        {
            Ok(output) => output,
            Err(e) => {
                let service_error = e.into_service_error();
                if service_error.is_no_such_key() {
                    return Ok(None);
                }
                return Err(StorageError::ObjectStore(format!(
                    "S3 download failed: {service_error}"
                )));
            }
        };

        let data = output
            .body
            .collect()
            .await
            .map_err(|e| StorageError::ObjectStore(format!("S3 body read failed: {e}")))?;
        Ok(Some(data.into_bytes()))
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        // DeleteObject succeeds for absent keys.
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(Self::object_key(key))
            .send()
            .await
            .map_err(|e| StorageError::ObjectStore(format!("S3 delete failed: {e}")))?;
        Ok(())
    }
}
