//! Errors produced while building and rendering tables.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("cloudlet {cloudlet} is not assigned to any VM")]
    VmNotAssigned { cloudlet: u64 },

    #[error("VM {vm} is not placed on any host")]
    HostNotAssigned { vm: u64 },

    #[error("host {host} does not belong to any datacenter")]
    DatacenterNotAssigned { host: u64 },

    #[error("row {row} has {actual} values but the table has {expected} columns")]
    RowLength { row: usize, expected: usize, actual: usize },

    #[error("unsupported column format: {0}")]
    InvalidFormat(String),

    #[error("unknown table format: {0}")]
    UnknownTableFormat(String),

    #[error("{kind} {id} referenced by {referrer} is not defined")]
    UnknownReference {
        kind: &'static str,
        id: u64,
        referrer: String,
    },

    #[error("can't read file {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, TableError>;
