// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Mutating admission webhook endpoint.

pub mod handler;
pub mod server;

pub use handler::{admit, review};
pub use server::{router, serve};
