//! Health domain: damage application and the heal deadline.

use bevy::prelude::*;

use crate::behavior::{DeathRequested, Spirit, SpiritReset, SpiritState};
use crate::core::SpiritTuning;

use super::components::{DamageOutcome, Health, PendingHeal};
use super::events::{DamageEvent, DamageResolved, Recovered};

/// Apply queued damage to the pool and re-arm the heal deadline. Reaching
/// zero escalates to a death request; the behavior domain owns what
/// happens next.
pub(crate) fn apply_damage_events(
    tuning: Res<SpiritTuning>,
    mut events: MessageReader<DamageEvent>,
    mut spirits: Query<(&mut Health, &mut PendingHeal)>,
    mut resolved: MessageWriter<DamageResolved>,
    mut deaths: MessageWriter<DeathRequested>,
) {
    let Ok((mut health, mut heal)) = spirits.single_mut() else {
        return;
    };

    for event in events.read() {
        let outcome = health.apply_damage(event.amount);
        match outcome {
            DamageOutcome::AlreadyDead => continue,
            DamageOutcome::ReachedZero => {
                heal.clear();
                deaths.write(DeathRequested { cause: event.cause });
            }
            DamageOutcome::Damaged { remaining } => {
                debug!("{:?} damage, {} health left", event.cause, remaining);
                heal.arm(tuning.heal_delay);
            }
        }
        resolved.write(DamageResolved {
            cause: event.cause,
            outcome,
        });
    }
}

/// Restore to full when the deadline expires. Deferred while the spirit is
/// mid-flinch or dying so the restore never races those sequences.
pub(crate) fn tick_heal_deadline(
    time: Res<Time>,
    mut spirits: Query<(&Spirit, &mut Health, &mut PendingHeal)>,
    mut recovered: MessageWriter<Recovered>,
) {
    let Ok((spirit, mut health, mut heal)) = spirits.single_mut() else {
        return;
    };

    if matches!(spirit.state, SpiritState::Hurt | SpiritState::Death) {
        return;
    }
    if heal.tick(time.delta()) {
        health.restore();
        info!("fully recovered");
        recovered.write(Recovered);
    }
}

/// A respawn restores this domain's slice of the record.
pub(crate) fn handle_reset(
    mut resets: MessageReader<SpiritReset>,
    mut spirits: Query<(&mut Health, &mut PendingHeal)>,
) {
    let Ok((mut health, mut heal)) = spirits.single_mut() else {
        return;
    };
    for _ in resets.read() {
        health.restore();
        heal.clear();
    }
}
