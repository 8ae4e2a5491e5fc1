use crate::common::Size;

/// Smallest edge a preview frame may have, whatever the caller asks for.
pub const MINIMUM_PREVIEW_SIZE: u32 = 320;

/// Picks the capture resolution for a wanted `width x height`.
///
/// An exact match always wins. Otherwise the smallest-area candidate whose
/// edges both reach `max(min(width, height), floor)` is used, the first one
/// listed on ties. When nothing is big enough, the first candidate is
/// returned.
///
/// Panics if `choices` is empty.
pub fn choose_optimal_size(choices: &[Size], width: u32, height: u32, floor: u32) -> Size {
    assert!(!choices.is_empty(), "No preview sizes to choose from");

    let min_size = width.min(height).max(floor);
    let desired_size = Size::new(width, height);

    let (big_enough, too_small): (Vec<Size>, Vec<Size>) = choices
        .iter()
        .partition(|option| option.width >= min_size && option.height >= min_size);
    let exact_size_found = choices.contains(&desired_size);

    log::info!("Desired size: {}, min size: {}x{}", desired_size, min_size, min_size);
    log::info!("Valid preview sizes: [{}]", join_sizes(&big_enough));
    log::info!("Rejected preview sizes: [{}]", join_sizes(&too_small));

    if exact_size_found {
        log::info!("Exact size match found.");
        return desired_size;
    }

    match big_enough.iter().min_by_key(|size| size.area()) {
        Some(chosen) => {
            log::info!("Chosen size: {}", chosen);
            *chosen
        }
        None => {
            log::error!("Couldn't find any suitable preview size");
            choices[0]
        }
    }
}

/// [`choose_optimal_size`] with the default [`MINIMUM_PREVIEW_SIZE`] floor.
pub fn choose_preview_size(choices: &[Size], wanted: Size) -> Size {
    choose_optimal_size(choices, wanted.width, wanted.height, MINIMUM_PREVIEW_SIZE)
}

fn join_sizes(sizes: &[Size]) -> String {
    sizes.iter().map(|s| s.to_string()).collect::<Vec<_>>().join(", ")
}
