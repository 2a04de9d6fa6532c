// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AutoconfError {
    #[error("unable to configure pod without name or generate name")]
    NoName,

    #[error("Failed to decode admission review: {0}")]
    InvalidReview(String),

    #[error("Admission request contains no object")]
    MissingObject,

    #[error("Failed to encode patch: {0}")]
    PatchEncoding(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AutoconfError>;
