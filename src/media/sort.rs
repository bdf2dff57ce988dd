// SPDX-License-Identifier: MPL-2.0
//! Sort policy for gallery listings.
//!
//! Images are ordered by the date embedded in their filename (`YYYY-MM-DD`,
//! hyphens optional). Names without a usable date sort as if taken at the
//! Unix epoch. Ties fall back to a case-insensitive, numeric-aware name
//! comparison and finally to the raw name, so the result never depends on
//! the input order.

use super::ImageEntry;
use crate::config::SortOrder;
use std::cmp::Ordering;

/// Sorts filenames into gallery order.
#[must_use]
pub fn sort_images<I, S>(images: I, order: SortOrder) -> Vec<ImageEntry>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut entries: Vec<ImageEntry> = images.into_iter().map(ImageEntry::new).collect();
    sort_entries(&mut entries, order);
    entries
}

/// Sorts already-parsed entries in place.
pub fn sort_entries(entries: &mut [ImageEntry], order: SortOrder) {
    entries.sort_by(|a, b| compare(a, b, order));
}

/// Total order used by [`sort_images`].
#[must_use]
pub fn compare(a: &ImageEntry, b: &ImageEntry, order: SortOrder) -> Ordering {
    let ascending = a
        .sort_date()
        .cmp(&b.sort_date())
        .then_with(|| natural_cmp(a.filename(), b.filename()))
        .then_with(|| a.filename().cmp(b.filename()));

    match order {
        SortOrder::Oldest => ascending,
        SortOrder::Newest => ascending.reverse(),
    }
}

/// Case-insensitive comparison where runs of ASCII digits compare by value.
///
/// `img2` sorts before `img10`. Leading zeros do not affect the value, so
/// `01` and `1` compare equal here.
#[must_use]
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) if l.is_ascii_digit() && r.is_ascii_digit() => {
                let l_digits = take_digits(&mut left);
                let r_digits = take_digits(&mut right);
                let ord = compare_digit_runs(&l_digits, &r_digits);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(l), Some(r)) => {
                left.next();
                right.next();
                let ord = l.to_lowercase().cmp(r.to_lowercase());
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

fn take_digits(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.next_if(char::is_ascii_digit) {
        run.push(c);
    }
    run
}

fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}
