//! Plain data records for the player and the ghosts.

pub mod ghost;
pub mod pacman;

/// Counts a power/vulnerability timer down by `dt`.
///
/// Clears `active` and clamps `time_left` to zero once the timer runs out. Returns
/// `true` on the frame the timer expires.
pub(crate) fn countdown(active: &mut bool, time_left: &mut f32, dt: f32) -> bool {
    if !*active {
        return false;
    }
    *time_left -= dt;
    if *time_left <= 0.0 {
        *active = false;
        *time_left = 0.0;
        return true;
    }
    false
}
