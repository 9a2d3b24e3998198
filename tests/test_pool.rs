use zombie_land::pool::Pool;

#[test]
fn new_pool_is_empty() {
    let pool = Pool::new(4, 10.0, 20.0);
    assert_eq!(pool.capacity(), 4);
    assert_eq!(pool.active_count(), 0);
    assert_eq!(pool.iter_active().count(), 0);
    let slot = pool.get(3).unwrap();
    assert_eq!((slot.w, slot.h), (10.0, 20.0));
}

#[test]
fn spawn_takes_first_free_slot() {
    let mut pool = Pool::new(3, 1.0, 1.0);
    assert_eq!(pool.spawn(1.0, 2.0), Some(0));
    assert_eq!(pool.spawn(3.0, 4.0), Some(1));
    pool.deactivate(0);
    assert_eq!(pool.spawn(5.0, 6.0), Some(0));
    let e = pool.get(0).unwrap();
    assert_eq!((e.x, e.y), (5.0, 6.0));
    assert!(e.active);
}

#[test]
fn spawn_into_full_pool_is_dropped() {
    let mut pool = Pool::new(2, 1.0, 1.0);
    pool.spawn(0.0, 0.0);
    pool.spawn(0.0, 0.0);
    assert_eq!(pool.spawn(9.0, 9.0), None);
    assert_eq!(pool.active_count(), 2);
}

#[test]
fn zero_capacity_pool_never_spawns() {
    let mut pool = Pool::new(0, 1.0, 1.0);
    assert_eq!(pool.spawn(0.0, 0.0), None);
}

#[test]
fn iter_active_skips_inactive_slots() {
    let mut pool = Pool::new(4, 1.0, 1.0);
    for i in 0..4 {
        pool.spawn(i as f32, 0.0);
    }
    pool.deactivate(1);
    pool.deactivate(3);
    let indices: Vec<usize> = pool.iter_active().map(|(i, _)| i).collect();
    assert_eq!(indices, vec![0, 2]);
    assert_eq!(pool.iter_active_mut().count(), 2);
}

#[test]
fn deactivate_out_of_range_is_harmless() {
    let mut pool = Pool::new(1, 1.0, 1.0);
    pool.spawn(0.0, 0.0);
    pool.deactivate(7);
    assert_eq!(pool.active_count(), 1);
}
