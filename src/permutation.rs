//! Admission-order sources for clearing passes.
//!
//! A market admits its posted orders in the order given by a
//! [`PermutationSource`]. Production uses [`RandomPermutation`]; tests pin the
//! order with [`SequentialPermutation`] or [`FixedPermutation`].

use std::sync::{Arc, Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::ClearError;

/// Supplies a permutation of `0..n` for one clearing pass.
pub trait PermutationSource {
    fn permutation(&mut self, n: usize) -> Vec<usize>;
}

impl<P: PermutationSource + ?Sized> PermutationSource for &mut P {
    fn permutation(&mut self, n: usize) -> Vec<usize> {
        (**self).permutation(n)
    }
}

/// Identity permutation: orders are admitted in the order they were posted.
#[derive(Clone, Copy, Debug, Default)]
pub struct SequentialPermutation;

impl PermutationSource for SequentialPermutation {
    fn permutation(&mut self, n: usize) -> Vec<usize> {
        (0..n).collect()
    }
}

/// Returns the same caller-supplied indices on every draw, whatever `n` is.
#[derive(Clone, Debug)]
pub struct FixedPermutation(pub Vec<usize>);

impl PermutationSource for FixedPermutation {
    fn permutation(&mut self, _n: usize) -> Vec<usize> {
        self.0.clone()
    }
}

/// Uniform random permutations from a seeded RNG. Same seed ⇒ same sequence of draws.
#[derive(Clone, Debug)]
pub struct RandomPermutation {
    rng: StdRng,
}

impl RandomPermutation {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl PermutationSource for RandomPermutation {
    fn permutation(&mut self, n: usize) -> Vec<usize> {
        let mut perm: Vec<usize> = (0..n).collect();
        perm.shuffle(&mut self.rng);
        perm
    }
}

/// One source shared by markets cleared on different threads. Draws are
/// serialized by a mutex; clone to hand the same source to another market.
#[derive(Debug)]
pub struct SharedPermutation<P> {
    inner: Arc<Mutex<P>>,
}

impl<P> SharedPermutation<P> {
    pub fn new(source: P) -> Self {
        Self {
            inner: Arc::new(Mutex::new(source)),
        }
    }
}

impl<P> Clone for SharedPermutation<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P: PermutationSource> PermutationSource for SharedPermutation<P> {
    fn permutation(&mut self, n: usize) -> Vec<usize> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .permutation(n)
    }
}

/// Checks that `perm` holds each index of `0..n` exactly once.
pub fn validate_permutation(perm: &[usize], n: usize) -> Result<(), ClearError> {
    if perm.len() != n {
        return Err(ClearError::PermutationLength {
            expected: n,
            actual: perm.len(),
        });
    }
    let mut seen = vec![false; n];
    for &index in perm {
        let slot = seen
            .get_mut(index)
            .ok_or(ClearError::PermutationIndexOutOfRange { index, len: n })?;
        if *slot {
            return Err(ClearError::PermutationDuplicate { index });
        }
        *slot = true;
    }
    Ok(())
}
