// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod taxes;
pub mod aggregate;
pub mod statement;
pub mod metrics;
pub mod scenario;
