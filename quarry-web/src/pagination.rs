//! Pagination window
//!
//! Decides which page numbers appear in the pagination bar. Small result
//! sets list every page. Larger ones are compressed to roughly `steps` slots
//! using one of three layouts, picked by where the current page sits:
//!
//! ```text
//! near start:  1 2 3 4 5 6 7 ... 100
//! middle:      1 ... 48 49 [50] 51 52 ... 100
//! near end:    1 ... 93 94 95 96 97 98 99 100
//! ```
//!
//! The bubble widens the zone around each edge in which the current page
//! counts as "near" that edge.

/// A slot in the pagination bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Page(u64),
    Ellipsis,
}

/// Which compressed layout applies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regime {
    /// Every page listed
    Full,
    NearStart,
    NearEnd,
    Middle,
}

/// Total page count for a result set
///
/// An exact multiple of `page_size` does not get an empty trailing page.
pub fn total_pages(num_found: u64, page_size: u64) -> u64 {
    num_found.div_ceil(page_size.max(1))
}

/// Pick the layout for a current page
///
/// Thresholds are strict: a page exactly on a boundary is in the middle.
pub fn regime(page_on: u64, total_pages: u64, steps: u64, bubble: u64) -> Regime {
    if total_pages < steps {
        return Regime::Full;
    }

    let page_on = page_on as i128;
    let total = total_pages as i128;
    let steps = steps as i128;
    let edge = bubble as i128 + 1;

    if page_on < steps - edge {
        Regime::NearStart
    } else if page_on > total - steps + edge {
        Regime::NearEnd
    } else {
        Regime::Middle
    }
}

/// Compute the slots of the pagination bar
///
/// The middle window spans `page_on ± floor((steps - 4) / 2)` and is clamped
/// to `2..=total_pages - 1`, so page numbers stay in range and never repeat
/// the fixed first and last entries.
pub fn window(page_on: u64, total_pages: u64, steps: u64, bubble: u64) -> Vec<Slot> {
    match regime(page_on, total_pages, steps, bubble) {
        Regime::Full => (1..=total_pages).map(Slot::Page).collect(),
        Regime::NearStart => {
            let mut slots: Vec<Slot> = (1..=steps.saturating_sub(2)).map(Slot::Page).collect();
            slots.push(Slot::Ellipsis);
            slots.push(Slot::Page(total_pages));
            slots
        }
        Regime::NearEnd => {
            let mut slots = vec![Slot::Page(1), Slot::Ellipsis];
            slots.extend((total_pages.saturating_sub(steps.saturating_sub(2))..=total_pages).map(Slot::Page));
            slots
        }
        Regime::Middle => {
            let siding = steps.saturating_sub(4) / 2;
            let low = page_on.saturating_sub(siding).max(2);
            let high = page_on.saturating_add(siding).min(total_pages.saturating_sub(1));

            let mut slots = vec![Slot::Page(1), Slot::Ellipsis];
            slots.extend((low..=high).map(Slot::Page));
            slots.push(Slot::Ellipsis);
            slots.push(Slot::Page(total_pages));
            slots
        }
    }
}

/// Format a page number with thousands separators (`12,345`)
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}
