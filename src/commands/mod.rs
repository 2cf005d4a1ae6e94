// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod owner;
pub mod transactions;
pub mod reports;
pub mod budgets;
pub mod exporter;
pub mod doctor;
