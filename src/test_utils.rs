// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities.
use std::collections::HashSet;

use crate::types::{GroupId, ParticipantId};

pub const G1: GroupId = GroupId::new(1);
pub const G2: GroupId = GroupId::new(2);
pub const G3: GroupId = GroupId::new(3);
pub const G4: GroupId = GroupId::new(4);
pub const G5: GroupId = GroupId::new(5);

pub const P1: ParticipantId = ParticipantId::new(1);
pub const P2: ParticipantId = ParticipantId::new(2);
pub const P3: ParticipantId = ParticipantId::new(3);
pub const P4: ParticipantId = ParticipantId::new(4);
pub const P5: ParticipantId = ParticipantId::new(5);

/// Collect participant ids into a set, handy for comparing resolution results.
pub fn participants(ids: &[ParticipantId]) -> HashSet<ParticipantId> {
    ids.iter().copied().collect()
}

/// Collect group ids into a set.
pub fn groups(ids: &[GroupId]) -> HashSet<GroupId> {
    ids.iter().copied().collect()
}

/// Print `tracing` events of the crate when `RUST_LOG` is set.
pub fn setup_logging() {
    if std::env::var("RUST_LOG").is_ok() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }
}
