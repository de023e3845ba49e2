use crate::projection::UtmZone;
use rand::Rng;

pub const TARGET_ZONE_NUMBERS: [u8; 9] = [19, 20, 21, 22, 23, 24, 25, 26, 27];
pub const TARGET_ZONE_LETTERS: [char; 4] = ['R', 'S', 'T', 'U'];

/// Picks the zone every record of a run is reprojected into.
pub fn select_target_zone<R: Rng + ?Sized>(rng: &mut R) -> UtmZone {
    let number = TARGET_ZONE_NUMBERS[rng.gen_range(0..TARGET_ZONE_NUMBERS.len())];
    let letter = TARGET_ZONE_LETTERS[rng.gen_range(0..TARGET_ZONE_LETTERS.len())];
    UtmZone::new_unchecked(number, letter)
}
