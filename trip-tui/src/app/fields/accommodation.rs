use plan_items::draft::labels::*;
use plan_items::draft::AccommodationDraft;

use super::{cost_row, cycle_option, FieldId, FieldInput, FieldRow, FieldSpec};

pub(super) fn rows(draft: &AccommodationDraft) -> Vec<FieldRow> {
    vec![
        FieldRow::Single(FieldSpec::required_text(FieldId::Name, NAME, &draft.name)),
        FieldRow::Single(FieldSpec::text(FieldId::Address, ADDRESS, &draft.address)),
        FieldRow::Row2(
            FieldSpec::text(FieldId::City, CITY, &draft.city),
            FieldSpec::text(FieldId::Country, COUNTRY, &draft.country),
        ),
        FieldRow::Row2(
            FieldSpec::datetime(FieldId::CheckIn, CHECK_IN, draft.check_in_at, false),
            FieldSpec::datetime(FieldId::CheckOut, CHECK_OUT, draft.check_out_at, false),
        ),
        FieldRow::Row2(
            FieldSpec::text(FieldId::Guests, GUESTS, &draft.guests),
            FieldSpec::text(FieldId::Rooms, ROOMS, &draft.rooms),
        ),
        FieldRow::Row2(
            FieldSpec::choice(FieldId::RoomType, ROOM_TYPE, draft.room_type),
            FieldSpec::choice(FieldId::BathroomType, BATHROOM_TYPE, draft.bathroom_type),
        ),
        FieldRow::Single(FieldSpec::text(FieldId::BookingRef, BOOKING_REF, &draft.booking_ref)),
        FieldRow::Row2(
            FieldSpec::text(FieldId::Phone, PHONE, &draft.phone),
            FieldSpec::text(FieldId::Website, WEBSITE, &draft.website),
        ),
        cost_row(&draft.cost, &draft.currency),
    ]
}

pub(super) fn apply(draft: &mut AccommodationDraft, id: FieldId, input: FieldInput) {
    match id {
        FieldId::Name => draft.name = input.into_text(),
        FieldId::Address => draft.address = input.into_text(),
        FieldId::City => draft.city = input.into_text(),
        FieldId::Country => draft.country = input.into_text(),
        FieldId::CheckIn => draft.check_in_at = input.into_instant(),
        FieldId::CheckOut => draft.check_out_at = input.into_instant(),
        FieldId::Guests => draft.guests = input.into_text(),
        FieldId::Rooms => draft.rooms = input.into_text(),
        FieldId::BookingRef => draft.booking_ref = input.into_text(),
        FieldId::Phone => draft.phone = input.into_text(),
        FieldId::Website => draft.website = input.into_text(),
        FieldId::Cost => draft.cost = input.into_text(),
        FieldId::Currency => draft.currency = input.into_text(),
        _ => {}
    }
}

pub(super) fn cycle(draft: &mut AccommodationDraft, id: FieldId, forward: bool) {
    match id {
        FieldId::RoomType => draft.room_type = cycle_option(draft.room_type, forward),
        FieldId::BathroomType => draft.bathroom_type = cycle_option(draft.bathroom_type, forward),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plan_items::domain::{BathroomType, Choice, RoomType};

    #[test]
    fn optional_choices_start_unset() {
        let mut draft = AccommodationDraft::default();
        let group = rows(&draft);
        let FieldRow::Row2(room, _) = &group[5] else {
            panic!("expected room row");
        };
        assert_eq!(room.display(), "—");

        cycle(&mut draft, FieldId::RoomType, true);
        assert_eq!(draft.room_type, Some(RoomType::Single));
        cycle(&mut draft, FieldId::BathroomType, false);
        assert_eq!(draft.bathroom_type, Some(BathroomType::Shared));
        assert_eq!(
            FieldSpec::choice(FieldId::RoomType, ROOM_TYPE, draft.room_type).display(),
            RoomType::Single.label()
        );
    }

    #[test]
    fn counts_stay_raw_text() {
        let mut draft = AccommodationDraft::default();
        apply(&mut draft, FieldId::Guests, FieldInput::Text("2".to_string()));
        apply(&mut draft, FieldId::Rooms, FieldInput::Text("x".to_string()));
        assert_eq!(draft.guests, "2");
        assert_eq!(draft.rooms, "x");
        assert!(draft.validate().is_err());
    }
}
