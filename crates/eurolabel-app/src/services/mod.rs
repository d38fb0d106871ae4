// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Service layer — configuration and the production collaborators the session
// needs (translator, rasteriser, exporter).

pub mod app_services;
pub mod data_dir;
