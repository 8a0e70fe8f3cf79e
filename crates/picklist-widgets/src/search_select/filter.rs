//! Filter engine: which options the popover shows, and how wide it is.

use super::option::{SelectOption, SortDirection};
use crate::error::OptionFault;

/// Narrowest popover, before the margin is added.
pub const MIN_POPOVER_WIDTH: f32 = 150.0;

/// Space added to the widest label for padding and the check mark.
pub const POPOVER_WIDTH_MARGIN: f32 = 30.0;

/// Width counted for an option without a label.
pub const UNLABELLED_WIDTH: f32 = 100.0;

/// Approximate pixels per label character in single mode.
pub const SINGLE_CHAR_WIDTH: f32 = 6.8;

/// Approximate pixels per label character in multi mode (room for the checkbox).
pub const MULTI_CHAR_WIDTH: f32 = 7.8;

/// Options the popover should list.
///
/// Malformed options are skipped. With `filter_enabled`, an option stays
/// when its label or additional search text contains `search_text`,
/// ignoring case. Flat lists are sorted by label when `sort` is given; trees
/// keep their order, and only top-level entries are matched.
#[must_use]
pub fn compute_visible_options(
    options: &[SelectOption],
    search_text: &str,
    filter_enabled: bool,
    sort: Option<SortDirection>,
    display_as_tree: bool,
) -> Vec<SelectOption> {
    let needle = search_text.to_lowercase();
    let mut skipped = 0usize;

    let mut visible: Vec<SelectOption> = options
        .iter()
        .filter(|option| match is_visible(option, &needle, filter_enabled) {
            Ok(keep) => keep,
            Err(fault) => {
                skipped += 1;
                tracing::debug!(%fault, ?option.value, "option skipped");
                false
            }
        })
        .cloned()
        .collect();

    if skipped > 0 {
        tracing::debug!(skipped, total = options.len(), "malformed options left out");
    }

    if let Some(direction) = sort {
        if !display_as_tree {
            sort_by_label(&mut visible, direction);
        }
    }

    visible
}

/// Decide whether one option is shown.
fn is_visible(
    option: &SelectOption,
    needle: &str,
    filter_enabled: bool,
) -> Result<bool, OptionFault> {
    let (_, label) = option.check()?;

    if !filter_enabled {
        return Ok(true);
    }

    Ok(label.to_lowercase().contains(needle)
        || option
            .additional_search_text
            .as_deref()
            .is_some_and(|extra| extra.to_lowercase().contains(needle)))
}

/// Stable sort by label.
fn sort_by_label(options: &mut [SelectOption], direction: SortDirection) {
    options.sort_by(|a, b| {
        let ordering = a.label.cmp(&b.label);
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

/// Pixels per label character for the mode.
#[must_use]
pub const fn char_width(multi: bool) -> f32 {
    if multi {
        MULTI_CHAR_WIDTH
    } else {
        SINGLE_CHAR_WIDTH
    }
}

/// Popover width that fits every label, visible or not.
///
/// Measuring all options keeps the popover from shrinking while the user
/// narrows the list.
#[must_use]
pub fn popover_width_for(options: &[SelectOption], multi: bool) -> f32 {
    let factor = char_width(multi);
    let widest = options
        .iter()
        .map(|option| {
            option
                .label
                .as_ref()
                .map_or(UNLABELLED_WIDTH, |label| label.chars().count() as f32 * factor)
        })
        .fold(MIN_POPOVER_WIDTH, f32::max);
    widest + POPOVER_WIDTH_MARGIN
}
