// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Millisecond timestamps that never repeat within a process.
//!
//! Record ids and blob filename prefixes are wall-clock milliseconds. Two
//! calls landing in the same millisecond would collide, so each value is
//! bumped to at least one past the previous one.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

/// Current wall-clock time in milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Strictly increasing millisecond generator.
#[derive(Debug, Default)]
pub struct MonotonicMillis {
    last: AtomicI64,
}

impl MonotonicMillis {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next value: the current time, or `last + 1` if the clock has not moved on.
    pub fn next(&self) -> i64 {
        self.next_at(now_millis())
    }

    fn next_at(&self, now: i64) -> i64 {
        let mut issued = now;
        // fetch_update only fails when the closure returns None, which it never does
        let _ = self
            .last
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |last| {
                issued = now.max(last + 1);
                Some(issued)
            });
        issued
    }
}
