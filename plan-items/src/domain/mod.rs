mod accommodation;
mod budget;
mod category;
mod item_type;
mod plan_item;

pub use accommodation::*;
pub use budget::*;
pub use category::*;
pub use item_type::*;
pub use plan_item::*;

use strum::IntoEnumIterator;

/// Fixed value sets shown as choice fields in the editor.
pub trait Choice: IntoEnumIterator + PartialEq + Copy + 'static {
    /// Human readable (Spanish) label.
    fn label(&self) -> &'static str;

    /// Step to the neighbouring value, wrapping at both ends.
    fn cycled(self, forward: bool) -> Self {
        let all: Vec<Self> = Self::iter().collect();
        let idx = all.iter().position(|v| *v == self).unwrap_or(0);
        let len = all.len();
        let next = if forward {
            (idx + 1) % len
        } else {
            (idx + len - 1) % len
        };
        all[next]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycled_wraps_both_directions() {
        assert_eq!(RoomType::Single.cycled(false), RoomType::Dormitory);
        assert_eq!(RoomType::Dormitory.cycled(true), RoomType::Single);
        assert_eq!(BathroomType::Private.cycled(true), BathroomType::Shared);
    }
}
