//! Consume-protocol tests for the position-phase mailbox

use proptest::prelude::*;
use vigil_shared_memory::data::PositionPhase;
use vigil_shared_memory::{PhaseRead, SegmentStore, ShmError, ShmResult, StoreConfig};

use vigil::shm::consts::{UPDATE_NONE, UPDATE_PENDING};
use vigil::shm::keys::position_phase_key;

fn test_store() -> (tempfile::TempDir, SegmentStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = SegmentStore::with_config(StoreConfig {
        base_dir: dir.path().to_path_buf(),
        prefix: "test".to_string(),
    });
    (dir, store)
}

#[test]
fn pending_observation_comes_back_ordered() -> ShmResult<()> {
    let (_dir, store) = test_store();
    store.write_position_phase(&PositionPhase::pending(0, 0.7, 0.2))?;

    match store.take_position_phase(0)? {
        PhaseRead::Consumed(obs) => {
            assert_eq!({ obs.p1 }, 0.2);
            assert_eq!({ obs.p2 }, 0.7);
            assert_eq!({ obs.update }, UPDATE_PENDING);
            assert_eq!({ obs.camera }, 0);
        }
        other => panic!("expected Consumed, got {other:?}"),
    }
    Ok(())
}

#[test]
fn take_is_destructive() -> ShmResult<()> {
    let (_dir, store) = test_store();
    store.write_position_phase(&PositionPhase::pending(1, 0.3, 0.6))?;

    assert!(matches!(
        store.take_position_phase(1)?,
        PhaseRead::Consumed(_)
    ));

    // Second take with no intervening deposit observes the cleared slot.
    match store.take_position_phase(1)? {
        PhaseRead::Stale(snapshot) => {
            assert_eq!({ snapshot.update }, UPDATE_NONE);
            assert_eq!({ snapshot.p1 }, 0.0);
            assert_eq!({ snapshot.p2 }, 0.0);
            // Camera survives the reset.
            assert_eq!({ snapshot.camera }, 1);
        }
        other => panic!("expected Stale, got {other:?}"),
    }
    Ok(())
}

#[test]
fn out_of_range_ratio_fails_and_leaves_the_slot_untouched() -> ShmResult<()> {
    let (_dir, store) = test_store();
    let deposited = PositionPhase::pending(0, 1.5, 0.2);
    store.write_position_phase(&deposited)?;

    assert!(matches!(
        store.take_position_phase(0),
        Err(ShmError::RatioOutOfRange { .. })
    ));

    // The stored record is exactly what the producer deposited: still
    // pending, ratios unchanged — not zeroed.
    let key = position_phase_key(0).unwrap();
    let stored: PositionPhase = store.read_record(key)?;
    assert_eq!(stored, deposited);

    // And the failure repeats until a producer corrects the slot.
    assert!(store.take_position_phase(0).is_err());
    Ok(())
}

#[test]
fn stale_read_copies_the_snapshot_verbatim() -> ShmResult<()> {
    let (_dir, store) = test_store();

    // A non-pending record, even with nonsense ratios, is returned as-is:
    // validation only applies to pending observations.
    let mut parked = PositionPhase::pending(0, 2.5, -1.0);
    parked.update = UPDATE_NONE;
    store.write_position_phase(&parked)?;

    match store.take_position_phase(0)? {
        PhaseRead::Stale(snapshot) => assert_eq!(snapshot, parked),
        other => panic!("expected Stale, got {other:?}"),
    }
    Ok(())
}

#[test]
fn mailboxes_are_independent_per_camera() -> ShmResult<()> {
    let (_dir, store) = test_store();
    store.write_position_phase(&PositionPhase::pending(0, 0.1, 0.2))?;
    store.write_position_phase(&PositionPhase::pending(1, 0.8, 0.9))?;

    assert!(matches!(
        store.take_position_phase(0)?,
        PhaseRead::Consumed(_)
    ));
    // Camera 1's deposit is still pending.
    match store.take_position_phase(1)? {
        PhaseRead::Consumed(obs) => assert_eq!({ obs.p1 }, 0.8),
        other => panic!("expected Consumed, got {other:?}"),
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn any_valid_pair_consumes_ordered(p1 in 0.0..=1.0f64, p2 in 0.0..=1.0f64) {
        let (_dir, store) = test_store();
        store.write_position_phase(&PositionPhase::pending(0, p1, p2)).unwrap();

        match store.take_position_phase(0).unwrap() {
            PhaseRead::Consumed(obs) => {
                prop_assert_eq!({ obs.p1 }, p1.min(p2));
                prop_assert_eq!({ obs.p2 }, p1.max(p2));
            }
            other => return Err(TestCaseError::fail(format!("expected Consumed, got {other:?}"))),
        }
    }

    #[test]
    fn any_out_of_range_pair_is_rejected_unchanged(p1 in 1.0f64..10.0, p2 in 0.0..=1.0f64) {
        prop_assume!(p1 > 1.0);
        let (_dir, store) = test_store();
        let deposited = PositionPhase::pending(1, p1, p2);
        store.write_position_phase(&deposited).unwrap();

        prop_assert!(store.take_position_phase(1).is_err());
        let stored: PositionPhase = store
            .read_record(position_phase_key(1).unwrap())
            .unwrap();
        prop_assert_eq!(stored, deposited);
    }
}
