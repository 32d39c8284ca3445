//! Primality helpers used to size grown tables.

/// Trial division over candidates of the form 6k ± 1.
pub fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }
    if n < 4 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }
    let mut d = 5usize;
    while let Some(square) = d.checked_mul(d) {
        if square > n {
            break;
        }
        if n % d == 0 || n % (d + 2) == 0 {
            return false;
        }
        d += 6;
    }
    true
}

/// Smallest prime `>= n`, or `None` if it does not fit in `usize`.
pub fn next_prime(n: usize) -> Option<usize> {
    let mut candidate = n.max(2);
    while !is_prime(candidate) {
        candidate = candidate.checked_add(1)?;
    }
    Some(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn small_primes() {
        let primes: Vec<usize> = (0..50).filter(|&n| is_prime(n)).collect();
        assert_eq!(
            primes,
            vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47]
        );
    }

    #[test]
    fn squares_of_primes_are_composite() {
        for p in [5usize, 7, 11, 13, 9973] {
            assert!(!is_prime(p * p), "{}", p * p);
        }
        assert!(is_prime(1_000_000_007));
    }

    /// Growth doubles and then searches upward.
    #[test]
    fn next_prime_at_least() {
        assert_eq!(next_prime(0), Some(2));
        assert_eq!(next_prime(6), Some(7));
        assert_eq!(next_prime(7), Some(7));
        assert_eq!(next_prime(22), Some(23));
        assert_eq!(next_prime(26), Some(29));
        assert_eq!(next_prime(24), Some(29));
    }

    #[test]
    fn next_prime_overflow_is_none() {
        // usize::MAX is composite on every supported target width.
        assert_eq!(next_prime(usize::MAX), None);
    }
}
