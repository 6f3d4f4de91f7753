use crate::store::StoreError;
use serde::Serialize;
use thiserror::Error;

/// Manager errors
///
/// Precondition failures are not errors here: operations return `Ok(None)`.
#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),
}

/// Coarse error class for operator-facing messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    StorageFull,
    OutOfMemory,
    StorageCorrupted,
    StorageUnavailable,
    SystemBusy,
    InternalError,
}

/// 存储错误分类
fn classify_store_error(e: &StoreError) -> ErrorCode {
    match e {
        StoreError::Serialization(_) => return ErrorCode::InternalError,
        StoreError::Unavailable(_) => return ErrorCode::StorageUnavailable,
        _ => {}
    }

    // redb 错误只能按消息分类
    let err_str = e.to_string().to_lowercase();

    if err_str.contains("no space") || err_str.contains("disk full") || err_str.contains("enospc")
    {
        return ErrorCode::StorageFull;
    }

    if err_str.contains("out of memory") || err_str.contains("cannot allocate") {
        return ErrorCode::OutOfMemory;
    }

    if err_str.contains("corrupt") || err_str.contains("invalid database") {
        return ErrorCode::StorageCorrupted;
    }

    ErrorCode::SystemBusy
}

impl ManagerError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ManagerError::Store(e) => classify_store_error(e),
            ManagerError::PasswordHash(_) => ErrorCode::InternalError,
        }
    }
}

pub type ManagerResult<T> = Result<T, ManagerError>;
