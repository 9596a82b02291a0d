use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// ---------------------------------------------------------------------------
// Random draw without replacement
// ---------------------------------------------------------------------------

/// Informational note attached to a draw. Never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawNotice {
    /// The pool had no more songs than requested, so all of it was returned.
    WholePool { requested: usize, available: usize },
    /// A request for zero songs was raised to one.
    RaisedToOne,
}

impl fmt::Display for DrawNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawNotice::WholePool {
                requested,
                available,
            } => write!(
                f,
                "Requested {requested} but only {available} songs available. Showing all songs."
            ),
            DrawNotice::RaisedToOne => write!(f, "Song count must be at least 1; drawing one song."),
        }
    }
}

/// Result of [`draw`]: the picked items plus an optional notice.
#[derive(Debug, Clone, PartialEq)]
pub struct Draw<T> {
    pub picked: Vec<T>,
    pub notice: Option<DrawNotice>,
}

/// Pick `requested` distinct items from `pool`, uniformly at random.
///
/// Every call seeds a fresh generator from the operating system, so two
/// draws over the same pool are independent.
pub fn draw<T: Clone>(pool: &[T], requested: usize) -> Draw<T> {
    let mut rng = StdRng::from_os_rng();
    draw_with_rng(pool, requested, &mut rng)
}

/// [`draw`] with a caller-supplied generator.
pub fn draw_with_rng<T: Clone, R: Rng + ?Sized>(pool: &[T], requested: usize, rng: &mut R) -> Draw<T> {
    let (count, notice) = if requested == 0 {
        (1, Some(DrawNotice::RaisedToOne))
    } else {
        (requested, None)
    };

    if count >= pool.len() {
        log::debug!("Draw of {count} covers the whole pool of {}", pool.len());
        return Draw {
            picked: pool.to_vec(),
            notice: notice.or(Some(DrawNotice::WholePool {
                requested: count,
                available: pool.len(),
            })),
        };
    }

    let picked = rand::seq::index::sample(rng, pool.len(), count)
        .into_iter()
        .map(|i| pool[i].clone())
        .collect();
    Draw { picked, notice }
}
