// Copyright (c) 2025 FinTrack contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod categories;
pub mod reports;
pub mod stats;
pub mod transactions;
pub mod users;
