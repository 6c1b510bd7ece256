//! Picking the most favourable value among several raw candidates.

use super::amount::Amount;
use super::coat::Coat;
use super::licence::LicenceNormalizer;

/// Returns the candidate with the lowest key; ties keep the first-seen candidate.
pub fn pick_best<T, K, I, F>(candidates: I, mut key: F) -> Option<T>
where
    I: IntoIterator<Item = T>,
    F: FnMut(&T) -> K,
    K: Ord,
{
    let mut best: Option<(K, T)> = None;
    for candidate in candidates {
        let candidate_key = key(&candidate);
        let improves = best
            .as_ref()
            .map_or(true, |(best_key, _)| candidate_key < *best_key);
        if improves {
            best = Some((candidate_key, candidate));
        }
    }
    best.map(|(_, candidate)| candidate)
}

/// Best licence string among several entries.
///
/// A single candidate is returned as is, even when it is not recognised.
pub fn select_best_licence<'a, S: AsRef<str>>(
    normalizer: &LicenceNormalizer,
    candidates: &'a [S],
) -> Option<&'a S> {
    match candidates {
        [] => None,
        [only] => Some(only),
        _ => pick_best(candidates.iter(), |candidate| {
            normalizer.classify(candidate.as_ref())
        }),
    }
}

/// Prefers an amount in the reference currency, else the first candidate.
pub fn select_amount<I>(candidates: I, reference_currency: &str) -> Option<Amount>
where
    I: IntoIterator<Item = Amount>,
{
    pick_best(candidates, |amount| {
        !amount.currency.eq_ignore_ascii_case(reference_currency)
    })
}

/// Three-way fee policy: a parsed amount wins, a flagged fee without amount is
/// the unknown-fee sentinel, otherwise no fee.
pub fn resolve_fee(has_fee: bool, amount: Option<Amount>, reference_currency: &str) -> Amount {
    match (amount, has_fee) {
        (Some(amount), _) => amount,
        (None, true) => Amount::fee_unknown(reference_currency),
        (None, false) => Amount::free(reference_currency),
    }
}

/// Dominant item by its tuple.
///
/// Scans in order and replaces the current best only by a tuple that strictly
/// dominates it. Items without a tuple lose to any item with one.
pub fn select_dominant<T, F>(items: impl IntoIterator<Item = T>, mut coat_of: F) -> Option<T>
where
    F: FnMut(&T) -> Option<&Coat>,
{
    let mut best: Option<T> = None;
    for item in items {
        let replace = match &best {
            None => true,
            Some(current) => match (coat_of(current), coat_of(&item)) {
                (None, Some(_)) => true,
                (Some(current), Some(candidate)) => candidate.strictly_dominates(current),
                _ => false,
            },
        };
        if replace {
            best = Some(item);
        }
    }
    best
}
