// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! K-subsets enumeration.
//!
//! Hands and decks are enumerated with the lexicographic combinations
//! generator (Algorithm L, pg. 358 Knuth 4a) that visits the k-subsets of
//! `0..n` in colex order, the combinatorial number system is used to start
//! the enumeration from any position so that it can be split across tasks.

/// Max number of elements in a subset.
pub const MAX_K: usize = 7;

/// Max number of elements to choose from.
pub const MAX_N: usize = 52;

/// Creates table for nck(n, k) for n <= 52 and k <= 7.
const fn make_nck() -> [[u32; MAX_K + 1]; MAX_N] {
    let mut t = [[0u32; MAX_K + 1]; MAX_N];
    let mut n = 0;

    while n < MAX_N {
        // base case nck(n, 0) = 1
        t[n][0] = 1;

        let mut k = 1;
        while k <= MAX_K && k <= n + 1 {
            // nck(n, k) = nck(n-1, k-1) + nck(n-1, k)
            let n_1 = n.saturating_sub(1);
            let k_1 = k.saturating_sub(1);
            t[n][k] = t[n_1][k_1] + t[n_1][k];
            k += 1;
        }

        n += 1;
    }

    t
}

const NCKS: [[u32; MAX_K + 1]; MAX_N] = make_nck();

/// Returns the binomial coefficient for n choose k.
///
/// Panics if n > 52 or k > 7.
#[inline]
pub fn nck(n: usize, k: usize) -> usize {
    assert!(n <= MAX_N, "n={n} must be 0 <= n <= {MAX_N}");
    assert!(k <= MAX_K, "k={k} must be 0 <= k <= {MAX_K}");

    if n < k || n == 0 {
        0
    } else {
        NCKS[n - 1][k] as usize
    }
}

/// Uses the combinatorial number system to convert n to a
/// k-combination (see Theorem L pg. 360 Knuth 4a).
pub fn nth_ksubset(mut n: usize, k: usize) -> [usize; MAX_K] {
    assert!(k <= MAX_K);

    let mut out = [0; MAX_K];
    for k in (0..k).rev() {
        let mut c = k;
        while nck(c, k + 1) <= n {
            c += 1;
        }

        c = c.saturating_sub(1);
        out[k] = c;

        n = n.saturating_sub(nck(c, k + 1));
    }

    out
}

/// Calls the closure for up to `count` k-subsets of `0..n` starting from the
/// `nth` k-subset in colex order.
pub fn for_each_ksubset<F>(n: usize, k: usize, nth: usize, count: usize, mut f: F)
where
    F: FnMut(&[usize]),
{
    assert!(0 < k && k <= n && k <= MAX_K, "0 < k={k} <= min(n={n}, {MAX_K})");

    if count == 0 {
        return;
    }

    // Two extra slots for the Algorithm L sentinels c[k+1] = n, c[k+2] = 0.
    let mut c = [0usize; MAX_K + 3];

    let ks = nth_ksubset(nth, k);
    c[1..=k].copy_from_slice(&ks[..k]);
    c[k + 1] = n;

    let mut counter = 1;
    loop {
        f(&c[1..=k]);

        counter += 1;
        if counter > count {
            break;
        }

        let mut j = 1;
        while c[j] + 1 == c[j + 1] {
            c[j] = j - 1;
            j += 1;
        }

        if j > k {
            break;
        }

        c[j] += 1;
    }
}

/// Calls the closure for each k-subset of the items.
///
/// The closure gets the subset items and the items that are not in the subset,
/// both in the original order.
pub fn for_each_split<T, F>(items: &[T], k: usize, mut f: F)
where
    T: Copy,
    F: FnMut(&[T], &[T]),
{
    let n = items.len();
    let mut subset = Vec::with_capacity(k);
    let mut rest = Vec::with_capacity(n.saturating_sub(k));

    for_each_ksubset(n, k, 0, nck(n, k), |idx| {
        subset.clear();
        rest.clear();

        let mut next = 0;
        for (pos, item) in items.iter().enumerate() {
            if next < k && idx[next] == pos {
                subset.push(*item);
                next += 1;
            } else {
                rest.push(*item);
            }
        }

        f(&subset, &rest);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nck() {
        // For n < k = 0
        assert_eq!(nck(2, 3), 0);

        [1, 52, 1326, 22100, 270725, 2598960, 20358520, 133784560]
            .into_iter()
            .enumerate()
            .for_each(|(k, v)| assert_eq!(nck(52, k), v));

        [1, 23, 253, 1771, 8855, 33649, 100947, 245157]
            .into_iter()
            .enumerate()
            .for_each(|(k, v)| assert_eq!(nck(23, k), v));

        [1, 7, 21, 35, 35, 21, 7, 1]
            .into_iter()
            .enumerate()
            .for_each(|(k, v)| assert_eq!(nck(7, k), v));

        [1, 5, 10, 10, 5, 1, 0, 0]
            .into_iter()
            .enumerate()
            .for_each(|(k, v)| assert_eq!(nck(5, k), v));
    }

    #[test]
    fn ksubsets_of_seven() {
        let mut subsets = Vec::new();
        for_each_ksubset(7, 5, 0, nck(7, 5), |s| subsets.push(s.to_vec()));

        assert_eq!(subsets.len(), 21);
        assert_eq!(subsets[0], vec![0, 1, 2, 3, 4]);
        assert_eq!(subsets[20], vec![2, 3, 4, 5, 6]);

        // All strictly increasing and distinct.
        assert!(subsets.iter().all(|s| s.windows(2).all(|w| w[0] < w[1])));
        subsets.sort();
        subsets.dedup();
        assert_eq!(subsets.len(), 21);
    }

    #[test]
    fn ksubset_whole_set() {
        let mut count = 0;
        for_each_ksubset(5, 5, 0, nck(5, 5), |s| {
            assert_eq!(s, &[0, 1, 2, 3, 4]);
            count += 1;
        });
        assert_eq!(count, 1);
    }

    #[test]
    fn nth_ksubset_matches_enumeration() {
        let mut counter = 0;
        let count = nck(20, 4);
        for_each_ksubset(20, 4, 0, count, |s| {
            let ks = nth_ksubset(counter, 4);
            assert_eq!(s, &ks[..4]);
            counter += 1;
        });

        assert_eq!(count, counter);

        // Start from half way.
        counter = 0;
        let nth = count / 2;
        for_each_ksubset(20, 4, nth, count - nth, |s| {
            let ks = nth_ksubset(nth + counter, 4);
            assert_eq!(s, &ks[..4]);
            counter += 1;
        });

        assert_eq!(count - nth, counter);
    }

    #[test]
    fn split_items() {
        let items = ['a', 'b', 'c', 'd', 'e', 'f'];
        let mut count = 0;
        for_each_split(&items, 5, |subset, rest| {
            assert_eq!(subset.len(), 5);
            assert_eq!(rest.len(), 1);
            assert!(!subset.contains(&rest[0]));
            count += 1;
        });
        assert_eq!(count, 6);
    }
}
