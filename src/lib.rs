// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Murex-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Murex and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Murex: the client-side session lifecycle for a live, server-owned diagram
//! editor.
//!
//! The server holds the authoritative diagram; this crate owns everything a
//! client session needs around it: the lifecycle state machine
//! ([`session`]), the live update channel ([`subscription`]), fire-and-forget
//! mutation commands ([`gateway`]), the tool catalog ([`catalog`]), the
//! two-tier render surface handed to a foreign rendering engine ([`surface`]),
//! and the [`runtime`] actor that ties them together on one action queue.
//!
//! Hosts implement [`remote::DiagramTransport`] for their wire protocol and
//! [`surface::RenderingEngine`] for their canvas, then drive a
//! [`runtime::SessionRuntime`].

pub mod catalog;
pub mod gateway;
pub mod model;
pub mod registry;
pub mod remote;
pub mod runtime;
pub mod session;
pub mod subscription;
pub mod surface;
