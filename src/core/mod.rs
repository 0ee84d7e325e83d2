// Copyright 2026 Scythe Developers
// SPDX-License-Identifier: GPL-3.0-or-later

pub mod remove;
pub mod repair;
pub mod walk;
