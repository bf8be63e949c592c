/*
 * Copyright © 2024, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

use chrono::{DateTime, Utc};
use std::time::Duration;

// for simple use cases that do not require to handle leap seconds and the like we provide our own wrappers
#[inline] pub fn secs (n: u64)->Duration { Duration::from_secs(n) }

/// this should be used wherever we might have to use sim clock instead of wall clock
#[inline]
pub fn utc_now()->DateTime<Utc> {
    Utc::now()
}

/// wall clock time in (truncated) seconds since the epoch
#[inline]
pub fn epoch_secs ()->i64 {
    utc_now().timestamp()
}

/// seconds elapsed between an earlier epoch second and `now` (negative if `then` is in the future)
#[inline]
pub fn elapsed_secs (then: i64, now: i64)->i64 {
    now - then
}
